//! Screen navigation
//!
//! Which screen is mounted is a plain value; `transition` is the whole
//! navigation table. Events that make no sense on the current screen are
//! rejected rather than guessed at.

use serde::Serialize;

use crate::difficulty::Difficulty;

/// Which kind of round produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameMode {
    Slicer,
    OddOneOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "screen")]
pub enum Screen {
    #[default]
    Title,
    Game {
        difficulty: Difficulty,
    },
    MiniGame {
        difficulty: Difficulty,
    },
    Result {
        mode: GameMode,
        difficulty: Difficulty,
        score: u64,
        /// Name entry is open over the result
        name_prompt: bool,
    },
    Ranking,
    CandySelection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    StartGame(Difficulty),
    StartMiniGame(Difficulty),
    /// The active round reported its final score
    RoundFinished { score: u64, qualifies: bool },
    /// Name entry submitted or dismissed
    NameSettled,
    /// Replay the same slicer difficulty
    Restart,
    GoToTitle,
    GoToRanking,
    GoToCandySelection,
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Title => "Title",
            Screen::Game { .. } => "Game",
            Screen::MiniGame { .. } => "MiniGame",
            Screen::Result { .. } => "Result",
            Screen::Ranking => "Ranking",
            Screen::CandySelection => "CandySelection",
        }
    }

    /// A round is mounted
    pub fn is_playing(&self) -> bool {
        matches!(self, Screen::Game { .. } | Screen::MiniGame { .. })
    }

    /// Result screen whose buttons are usable
    fn result_idle(&self) -> bool {
        matches!(
            self,
            Screen::Result {
                name_prompt: false,
                ..
            }
        )
    }

    /// Next screen for `event`, or `None` if it doesn't apply here
    pub fn transition(&self, event: NavEvent) -> Option<Screen> {
        use NavEvent::*;

        match (*self, event) {
            (Screen::Title, StartGame(difficulty)) => Some(Screen::Game { difficulty }),
            (Screen::Title, StartMiniGame(difficulty)) => Some(Screen::MiniGame { difficulty }),
            (Screen::Title, GoToCandySelection) => Some(Screen::CandySelection),

            (Screen::Game { difficulty }, RoundFinished { score, qualifies }) => {
                Some(Screen::Result {
                    mode: GameMode::Slicer,
                    difficulty,
                    score,
                    name_prompt: qualifies,
                })
            }
            // Minigame scores never enter the ranking
            (Screen::MiniGame { difficulty }, RoundFinished { score, .. }) => {
                Some(Screen::Result {
                    mode: GameMode::OddOneOut,
                    difficulty,
                    score,
                    name_prompt: false,
                })
            }

            (
                Screen::Result {
                    mode,
                    difficulty,
                    score,
                    name_prompt: true,
                },
                NameSettled,
            ) => Some(Screen::Result {
                mode,
                difficulty,
                score,
                name_prompt: false,
            }),
            (
                Screen::Result {
                    mode: GameMode::Slicer,
                    difficulty,
                    name_prompt: false,
                    ..
                },
                Restart,
            ) => Some(Screen::Game { difficulty }),

            (screen, GoToRanking) if screen == Screen::Title || screen.result_idle() => {
                Some(Screen::Ranking)
            }
            (screen, GoToTitle) if screen != Screen::Title => match screen {
                Screen::Result { .. } if !screen.result_idle() => None,
                _ => Some(Screen::Title),
            },

            _ => None,
        }
    }
}
