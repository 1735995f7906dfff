//! Difficulty tiers and the parameters each one fixes

use serde::{Deserialize, Serialize};

/// Difficulty selected before a round starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

/// Minigame parameters fixed by difficulty
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MiniGameParams {
    /// Number of scrolling rows
    pub rows: usize,
    /// Seconds taken off the deadline for a wrong tap
    pub penalty_secs: u32,
    /// Scroll speed multiplier
    pub speed_multiplier: f32,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    /// Stable ordinal, also used in storage keys
    pub fn ordinal(self) -> u8 {
        match self {
            Difficulty::Beginner => 0,
            Difficulty::Intermediate => 1,
            Difficulty::Advanced => 2,
        }
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.get(ordinal as usize).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "beginner" | "easy" => Some(Difficulty::Beginner),
            "intermediate" | "normal" => Some(Difficulty::Intermediate),
            "advanced" | "hard" => Some(Difficulty::Advanced),
            _ => None,
        }
    }

    /// Whether the belt speeds up during a round
    pub fn accelerates(&self) -> bool {
        matches!(self, Difficulty::Advanced)
    }

    /// Whether obstacles spawn onto the belt
    pub fn spawns_obstacles(&self) -> bool {
        !matches!(self, Difficulty::Beginner)
    }

    pub fn mini_game(&self) -> MiniGameParams {
        match self {
            Difficulty::Beginner => MiniGameParams {
                rows: 3,
                penalty_secs: 3,
                speed_multiplier: 1.0,
            },
            Difficulty::Intermediate => MiniGameParams {
                rows: 4,
                penalty_secs: 5,
                speed_multiplier: 1.4,
            },
            Difficulty::Advanced => MiniGameParams {
                rows: 5,
                penalty_secs: 7,
                speed_multiplier: 1.8,
            },
        }
    }
}
