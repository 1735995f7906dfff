//! Odd-one-out minigame
//!
//! Rows of identical candies scroll left; exactly one logical cell carries a
//! different pattern. Finding it scores and deals a fresh board, tapping any
//! other candy costs time.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::event::{GameEvent, GameOverCause, RoundPhase, SoundCue};
use super::schedule::{Delay, FrameDelta};
use super::timer::{CountdownTimer, TimerTick};
use crate::difficulty::{Difficulty, MiniGameParams};
use crate::tuning::OddOneOutTuning;

/// A logical cell: `index` is the column modulo the pattern width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellRef {
    pub row: usize,
    pub index: usize,
}

/// How a tap was classified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// Round over, or the tap missed every candy
    Ignored,
    Correct { score: u64 },
    Wrong { penalty_secs: u32 },
}

#[derive(Debug, Clone)]
pub struct OddOneOutState {
    pub difficulty: Difficulty,
    pub tuning: OddOneOutTuning,
    pub params: MiniGameParams,
    pub score: u64,
    pub phase: RoundPhase,
    pub timer: CountdownTimer,
    /// Pattern shared by every other cell
    pub common: usize,
    /// Pattern of the odd cell
    pub odd: usize,
    pub odd_cell: CellRef,
    /// Horizontal offset of each row strip
    pub row_offsets: Vec<f32>,
    /// Scroll speed used on the last tick (pixels/s)
    pub scroll_speed: f32,
    pub boards_cleared: u32,
    patterns: Vec<String>,
    report: Delay,
    frame: FrameDelta,
    rng: Pcg32,
    events: Vec<GameEvent>,
}

impl OddOneOutState {
    pub fn new(
        difficulty: Difficulty,
        patterns: Vec<String>,
        seed: u64,
        tuning: OddOneOutTuning,
    ) -> Self {
        debug_assert!(!patterns.is_empty(), "candy set must not be empty");
        if patterns.len() < 2 {
            log::warn!("Candy set has a single pattern; the odd candy will look identical");
        }

        let params = difficulty.mini_game();
        let mut state = Self {
            difficulty,
            params,
            score: 0,
            phase: RoundPhase::Playing,
            timer: CountdownTimer::new(tuning.duration_secs),
            common: 0,
            odd: 0,
            odd_cell: CellRef { row: 0, index: 0 },
            row_offsets: vec![0.0; params.rows],
            scroll_speed: 0.0,
            boards_cleared: 0,
            patterns,
            report: Delay::idle(),
            frame: FrameDelta::default(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            tuning,
        };
        state.deal();
        state
    }

    pub fn start(&mut self, now_ms: f64) {
        self.frame.reset();
        self.timer.start(now_ms);
        log::info!(
            "Odd-one-out started ({}, {} rows, {}s penalty)",
            self.difficulty.as_str(),
            self.params.rows,
            self.params.penalty_secs
        );
    }

    pub fn teardown(&mut self) {
        self.timer.cancel();
        self.report.cancel();
    }

    pub fn time_remaining(&self) -> u32 {
        self.timer.remaining()
    }

    pub fn is_over(&self) -> bool {
        self.phase == RoundPhase::Over
    }

    pub fn rows(&self) -> usize {
        self.params.rows
    }

    /// Cells drawn per row, including the scroll buffer
    pub fn rendered_columns(&self) -> usize {
        self.tuning.columns + self.tuning.buffer_columns
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn is_odd_cell(&self, row: usize, column: usize) -> bool {
        row == self.odd_cell.row && column % self.tuning.columns == self.odd_cell.index
    }

    /// Pattern index drawn at a rendered cell
    pub fn pattern_at(&self, row: usize, column: usize) -> usize {
        if self.is_odd_cell(row, column) {
            self.odd
        } else {
            self.common
        }
    }

    /// Rendered cell under a play-area point, if any
    pub fn cell_at(&self, point: Vec2) -> Option<(usize, usize)> {
        let size = self.tuning.cell_size;
        let margin = self.tuning.cell_margin;
        let pitch = self.tuning.cell_pitch();

        (0..self.rows()).find_map(|row| {
            let y = point.y - (self.tuning.row_top(row) + margin);
            if !(0.0..=size).contains(&y) {
                return None;
            }
            let x = point.x - self.row_offsets[row];
            if x < 0.0 {
                return None;
            }
            let column = (x / pitch).floor() as usize;
            let within = x - column as f32 * pitch;
            (column < self.rendered_columns() && (margin..=margin + size).contains(&within))
                .then_some((row, column))
        })
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Pick a new pattern pair and odd cell
    fn deal(&mut self) {
        let count = self.patterns.len().max(1);
        self.common = self.rng.random_range(0..count);
        self.odd = if count > 1 {
            (self.common + 1 + self.rng.random_range(0..count - 1)) % count
        } else {
            self.common
        };
        self.odd_cell = CellRef {
            row: self.rng.random_range(0..self.params.rows.max(1)),
            index: self.rng.random_range(0..self.tuning.columns.max(1)),
        };
        self.events.push(GameEvent::RoundReset {
            row: self.odd_cell.row,
            index: self.odd_cell.index,
        });
    }

    fn end_round(&mut self, now_ms: f64) {
        if self.phase == RoundPhase::Over {
            return;
        }
        self.phase = RoundPhase::Over;
        self.teardown();
        self.report.arm(now_ms, self.tuning.finish_hold_ms);
        self.events.push(GameEvent::GameOver {
            cause: GameOverCause::Timeout,
            score: self.score,
        });
        log::info!(
            "Odd-one-out over, score {} ({} boards)",
            self.score,
            self.boards_cleared
        );
    }
}

/// Advance the minigame to `now_ms`
pub fn tick(state: &mut OddOneOutState, now_ms: f64) {
    if state.phase == RoundPhase::Over {
        if state.report.fire(now_ms) {
            state.events.push(GameEvent::Finished { score: state.score });
        }
        return;
    }

    let dt = state.frame.sample(now_ms);

    // Speeds up with elapsed time, penalties included
    let elapsed = state
        .timer
        .duration_secs()
        .saturating_sub(state.timer.remaining()) as f32;
    state.scroll_speed =
        (state.tuning.base_scroll + elapsed * state.tuning.scroll_ramp) * state.params.speed_multiplier;

    let wrap = state.tuning.wrap_distance();
    let step = state.scroll_speed * dt;
    for offset in &mut state.row_offsets {
        *offset -= step;
        if *offset < -wrap {
            *offset %= wrap;
        }
    }

    match state.timer.tick(now_ms) {
        TimerTick::Changed(remaining) => {
            state.events.push(GameEvent::TimeChanged { remaining });
        }
        TimerTick::Expired => {
            state.events.push(GameEvent::TimeChanged { remaining: 0 });
            state.end_round(now_ms);
        }
        TimerTick::Idle | TimerTick::Unchanged => {}
    }
}

/// Resolve a tap on a rendered cell
pub fn tap_cell(state: &mut OddOneOutState, row: usize, column: usize) -> TapOutcome {
    if state.phase == RoundPhase::Over
        || row >= state.rows()
        || column >= state.rendered_columns()
    {
        return TapOutcome::Ignored;
    }

    if state.is_odd_cell(row, column) {
        state.score += state.tuning.hit_score;
        state.boards_cleared += 1;
        state.events.push(GameEvent::sound(SoundCue::Correct));
        state.events.push(GameEvent::BoardCleared {
            points: state.tuning.hit_score,
            boards: state.boards_cleared,
            total: state.score,
        });
        state.deal();
        TapOutcome::Correct { score: state.score }
    } else {
        let seconds = state.params.penalty_secs;
        state.timer.penalize(seconds);
        state.events.push(GameEvent::sound(SoundCue::Wrong));
        state.events.push(GameEvent::TimePenalty { seconds });
        TapOutcome::Wrong {
            penalty_secs: seconds,
        }
    }
}

/// Resolve a tap at a play-area point
pub fn tap(state: &mut OddOneOutState, point: Vec2) -> TapOutcome {
    match state.cell_at(point) {
        Some((row, column)) => tap_cell(state, row, column),
        None => TapOutcome::Ignored,
    }
}
