//! Data-driven game balance
//!
//! Defaults come from `consts`; hosts may load overrides from JSON.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Points awarded for a hit at a given combo count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboScoring {
    /// Points for any hit
    pub base_points: u64,
    /// Extra points per consecutive hit after the first
    pub bonus_per_combo: u64,
}

impl Default for ComboScoring {
    fn default() -> Self {
        Self {
            base_points: 1,
            bonus_per_combo: 1,
        }
    }
}

impl ComboScoring {
    /// Points for the hit that brought the combo to `combo` (1-based)
    pub fn points(&self, combo: u32) -> u64 {
        let streak = u64::from(combo.saturating_sub(1));
        self.base_points + self.bonus_per_combo * streak
    }
}

/// Slicing game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlicerTuning {
    pub duration_secs: u32,
    pub play_area_width: f32,
    pub play_area_height: f32,
    pub segment_width: f32,
    pub segment_height: f32,
    pub base_speed: f32,
    /// Applied only when the difficulty accelerates
    pub acceleration: f32,
    pub scoring: ComboScoring,
    /// Combo count above which the combo banner and cue fire
    pub combo_banner_after: u32,
    pub spawn_min_ms: f64,
    pub spawn_max_ms: f64,
    pub obstacle_clearance: f32,
    pub obstacle_min_width: f32,
    pub obstacle_width_jitter: f32,
    pub timeout_hold_ms: f64,
    pub collision_hold_ms: f64,
    pub bgm_repeat_ms: f64,
    pub particles_per_hit: usize,
    /// Relative volume of the miss cue
    pub miss_gain: f32,
}

impl Default for SlicerTuning {
    fn default() -> Self {
        Self {
            duration_secs: GAME_DURATION_SECS,
            play_area_width: PLAY_AREA_WIDTH,
            play_area_height: PLAY_AREA_HEIGHT,
            segment_width: SEGMENT_WIDTH,
            segment_height: SEGMENT_HEIGHT,
            base_speed: BASE_SPEED,
            acceleration: ADVANCED_ACCELERATION,
            scoring: ComboScoring::default(),
            combo_banner_after: 2,
            spawn_min_ms: OBSTACLE_SPAWN_MIN_MS,
            spawn_max_ms: OBSTACLE_SPAWN_MAX_MS,
            obstacle_clearance: OBSTACLE_CLEARANCE,
            obstacle_min_width: OBSTACLE_MIN_WIDTH,
            obstacle_width_jitter: OBSTACLE_WIDTH_JITTER,
            timeout_hold_ms: TIMEOUT_HOLD_MS,
            collision_hold_ms: COLLISION_HOLD_MS,
            bgm_repeat_ms: BGM_REPEAT_MS,
            particles_per_hit: PARTICLES_PER_HIT,
            miss_gain: 0.5,
        }
    }
}

impl SlicerTuning {
    /// Top edge of the belt lane (lane is vertically centered)
    pub fn lane_top(&self) -> f32 {
        (self.play_area_height - self.segment_height) / 2.0
    }
}

/// Odd-one-out minigame balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OddOneOutTuning {
    pub duration_secs: u32,
    pub columns: usize,
    pub buffer_columns: usize,
    pub cell_size: f32,
    pub cell_margin: f32,
    pub row_gap: f32,
    pub hit_score: u64,
    pub base_scroll: f32,
    pub scroll_ramp: f32,
    pub finish_hold_ms: f64,
}

impl Default for OddOneOutTuning {
    fn default() -> Self {
        Self {
            duration_secs: MINI_GAME_DURATION_SECS,
            columns: MINI_COLUMNS,
            buffer_columns: MINI_BUFFER_COLUMNS,
            cell_size: MINI_CANDY_SIZE,
            cell_margin: MINI_CANDY_MARGIN,
            row_gap: MINI_ROW_GAP,
            hit_score: MINI_HIT_SCORE,
            base_scroll: MINI_BASE_SCROLL,
            scroll_ramp: MINI_SCROLL_RAMP,
            finish_hold_ms: TIMEOUT_HOLD_MS,
        }
    }
}

impl OddOneOutTuning {
    /// Horizontal distance between neighbouring cells
    pub fn cell_pitch(&self) -> f32 {
        self.cell_size + 2.0 * self.cell_margin
    }

    /// Top edge of a row strip
    pub fn row_top(&self, row: usize) -> f32 {
        row as f32 * (self.cell_size + self.row_gap) + self.row_gap
    }

    /// Row offsets wrap by this distance
    pub fn wrap_distance(&self) -> f32 {
        self.cell_size * 2.0
    }
}
