//! Events emitted by the simulation for the host to act on

use serde::{Deserialize, Serialize};

use super::belt::SegmentId;

/// Whether a round is still accepting input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    Playing,
    /// Terminal; waiting to report the final score
    Over,
}

/// Named sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// Candy sliced
    Slice,
    /// Candy sliced with combo > threshold
    Combo,
    /// Swing that hit nothing
    Miss,
    /// Slice landed on an obstacle
    GameOver,
    /// Menu navigation
    Button,
    /// Minigame: odd candy found
    Correct,
    /// Minigame: wrong candy tapped
    Wrong,
    /// Background music phrase
    Bgm,
}

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    Timeout,
    Obstacle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    /// Play a cue at `gain` relative to the configured volume
    Sound { cue: SoundCue, gain: f32 },
    /// Displayed countdown changed
    TimeChanged { remaining: u32 },
    Scored { points: u64, combo: u32, total: u64 },
    /// Minigame odd cell found; `boards` counts cleared boards this round
    BoardCleared { points: u64, boards: u32, total: u64 },
    ComboBroken,
    SegmentRecycled { segment: SegmentId },
    ObstacleSpawned { segment: SegmentId, id: u32 },
    TimePenalty { seconds: u32 },
    /// Minigame board regenerated
    RoundReset { row: usize, index: usize },
    GameOver { cause: GameOverCause, score: u64 },
    /// Final score, after the display hold
    Finished { score: u64 },
}

impl GameEvent {
    pub fn sound(cue: SoundCue) -> Self {
        GameEvent::Sound { cue, gain: 1.0 }
    }
}
