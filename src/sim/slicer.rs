//! Candy slicing round
//!
//! Owns one round's state and advances it with two entry points:
//! - `tick`: per-frame motion, obstacle spawning, BGM repeat and countdown
//! - `slice`: hit-test and scoring for one pointer event

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::belt::{Belt, SegmentId};
use super::effects::{EffectKind, Effects};
use super::event::{GameEvent, GameOverCause, RoundPhase, SoundCue};
use super::geometry::Rect;
use super::schedule::{Delay, FrameDelta};
use super::spawner::ObstacleSpawner;
use super::timer::{CountdownTimer, TimerTick};
use crate::consts::{COMBO_BANNER_MS, PARTICLE_MS, SCORE_POPUP_MS, SLASH_MS, SLICE_DEBRIS_MS};
use crate::difficulty::Difficulty;
use crate::tuning::SlicerTuning;

/// How a pointer event was classified
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SliceOutcome {
    /// Round already over, or the press fell outside the play area
    Ignored,
    /// Touched a hazard; round ended
    Obstacle,
    Hit {
        segment: SegmentId,
        points: u64,
        combo: u32,
    },
    Miss,
}

/// Complete state of one slicing round
#[derive(Debug, Clone)]
pub struct SlicerState {
    pub difficulty: Difficulty,
    pub tuning: SlicerTuning,
    pub score: u64,
    pub combo: u32,
    pub phase: RoundPhase,
    pub belt: Belt,
    pub timer: CountdownTimer,
    pub spawner: ObstacleSpawner,
    /// Visual feedback (not gameplay-affecting)
    pub effects: Effects,
    pub cause: Option<GameOverCause>,
    patterns: Vec<String>,
    bgm: Delay,
    report: Delay,
    frame: FrameDelta,
    rng: Pcg32,
    events: Vec<GameEvent>,
}

impl SlicerState {
    /// Create a round; nothing runs until `start`
    pub fn new(difficulty: Difficulty, patterns: Vec<String>, seed: u64, tuning: SlicerTuning) -> Self {
        debug_assert!(!patterns.is_empty(), "candy set must not be empty");

        let mut rng = Pcg32::seed_from_u64(seed);
        let count = patterns.len().max(1);
        let initial = (rng.random_range(0..count), rng.random_range(0..count));
        let belt = Belt::new(&tuning, difficulty.accelerates(), initial);

        Self {
            difficulty,
            score: 0,
            combo: 0,
            phase: RoundPhase::Playing,
            belt,
            timer: CountdownTimer::new(tuning.duration_secs),
            spawner: ObstacleSpawner::new(),
            effects: Effects::new(),
            cause: None,
            patterns,
            bgm: Delay::idle(),
            report: Delay::idle(),
            frame: FrameDelta::default(),
            rng,
            events: Vec::new(),
            tuning,
        }
    }

    /// Start the countdown and the recurring loops
    pub fn start(&mut self, now_ms: f64) {
        self.frame.reset();
        self.timer.start(now_ms);
        if self.difficulty.spawns_obstacles() {
            self.spawner.start(now_ms, &mut self.rng, &self.tuning);
        }
        self.bgm.arm(now_ms, 0.0);
        log::info!(
            "Slicer round started ({}, {}s)",
            self.difficulty.as_str(),
            self.tuning.duration_secs
        );
    }

    /// Cancel every recurring loop (timer, spawner, BGM, pending report)
    pub fn teardown(&mut self) {
        self.timer.cancel();
        self.spawner.cancel();
        self.bgm.cancel();
        self.report.cancel();
    }

    pub fn time_remaining(&self) -> u32 {
        self.timer.remaining()
    }

    pub fn is_over(&self) -> bool {
        self.phase == RoundPhase::Over
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Pattern id currently shown on a segment
    pub fn segment_pattern(&self, id: SegmentId) -> &str {
        &self.patterns[self.belt.segment(id).pattern]
    }

    /// Whether the final score is still waiting to be reported
    pub fn is_reporting(&self) -> bool {
        self.report.is_armed()
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn end_round(&mut self, cause: GameOverCause, now_ms: f64) {
        if self.phase == RoundPhase::Over {
            return;
        }
        self.phase = RoundPhase::Over;
        self.cause = Some(cause);
        self.teardown();

        let hold = match cause {
            GameOverCause::Timeout => self.tuning.timeout_hold_ms,
            GameOverCause::Obstacle => self.tuning.collision_hold_ms,
        };
        self.report.arm(now_ms, hold);
        self.events.push(GameEvent::GameOver {
            cause,
            score: self.score,
        });
        log::info!("Slicer round over ({:?}), score {}", cause, self.score);
    }
}

/// Advance the round to `now_ms`
pub fn tick(state: &mut SlicerState, now_ms: f64) {
    if state.phase == RoundPhase::Over {
        if state.report.fire(now_ms) {
            state.events.push(GameEvent::Finished { score: state.score });
        }
        state.effects.prune(now_ms);
        return;
    }

    let dt = state.frame.sample(now_ms);

    let pattern_count = state.patterns.len();
    for segment in state.belt.advance(dt, &mut state.rng, pattern_count) {
        state.events.push(GameEvent::SegmentRecycled { segment });
    }

    if let Some((segment, obstacle)) = state.spawner.poll(now_ms, &mut state.rng, &state.tuning) {
        log::debug!("Obstacle {} spawned on {:?}", obstacle.id, segment);
        state.events.push(GameEvent::ObstacleSpawned {
            segment,
            id: obstacle.id,
        });
        state.belt.segment_mut(segment).obstacles.push(obstacle);
    }

    match state.timer.tick(now_ms) {
        TimerTick::Changed(remaining) => {
            state.events.push(GameEvent::TimeChanged { remaining });
        }
        TimerTick::Expired => {
            state.events.push(GameEvent::TimeChanged { remaining: 0 });
            state.end_round(GameOverCause::Timeout, now_ms);
        }
        TimerTick::Idle | TimerTick::Unchanged => {}
    }

    // Cancelled by end_round, so no phrase starts on the game-over frame
    if state.bgm.fire(now_ms) {
        state.events.push(GameEvent::sound(SoundCue::Bgm));
        state.bgm.arm(now_ms, state.tuning.bgm_repeat_ms);
    }

    state.effects.prune(now_ms);
}

/// Resolve a pointer event at `point` (play-area pixels)
pub fn slice(state: &mut SlicerState, point: Vec2, now_ms: f64) -> SliceOutcome {
    let play_area = Rect::new(
        0.0,
        0.0,
        state.tuning.play_area_width,
        state.tuning.play_area_height,
    );
    if state.phase == RoundPhase::Over || !play_area.contains(point) {
        return SliceOutcome::Ignored;
    }

    let on_obstacle = SegmentId::ALL.iter().any(|&id| {
        state
            .belt
            .segment(id)
            .obstacles
            .iter()
            .any(|obstacle| state.belt.obstacle_rect(id, obstacle).contains(point))
    });
    if on_obstacle {
        state.events.push(GameEvent::sound(SoundCue::GameOver));
        state.end_round(GameOverCause::Obstacle, now_ms);
        return SliceOutcome::Obstacle;
    }

    let hit = SegmentId::ALL
        .into_iter()
        .find(|&id| state.belt.segment_rect(id).contains(point));

    let Some(segment) = hit else {
        state.combo = 0;
        state.events.push(GameEvent::ComboBroken);
        state.events.push(GameEvent::Sound {
            cue: SoundCue::Miss,
            gain: state.tuning.miss_gain,
        });
        return SliceOutcome::Miss;
    };

    state.combo += 1;
    let combo = state.combo;
    let points = state.tuning.scoring.points(combo);
    state.score += points;
    state.events.push(GameEvent::Scored {
        points,
        combo,
        total: state.score,
    });

    let pattern = state.belt.segment(segment).pattern;
    let effects = &mut state.effects;
    effects.spawn(
        point,
        EffectKind::Slash {
            angle_deg: (state.rng.random::<f32>() - 0.5) * 20.0,
        },
        now_ms,
        SLASH_MS,
    );
    effects.spawn(point, EffectKind::SliceDebris { pattern }, now_ms, SLICE_DEBRIS_MS);
    effects.spawn(point, EffectKind::ScorePopup { points }, now_ms, SCORE_POPUP_MS);
    effects.burst(
        point,
        state.tuning.particles_per_hit,
        now_ms,
        PARTICLE_MS,
        &mut state.rng,
    );

    if combo > state.tuning.combo_banner_after {
        let center = Vec2::new(
            state.tuning.play_area_width / 2.0,
            state.tuning.play_area_height / 2.0,
        );
        state.effects.show_banner(combo, center, now_ms, COMBO_BANNER_MS);
        state.events.push(GameEvent::sound(SoundCue::Combo));
    } else {
        state.events.push(GameEvent::sound(SoundCue::Slice));
    }

    SliceOutcome::Hit {
        segment,
        points,
        combo,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::belt::Obstacle;

    const LANE_Y: f32 = 96.0;

    fn patterns() -> Vec<String> {
        vec!["a".into(), "b".into(), "c".into()]
    }

    fn round(difficulty: Difficulty) -> SlicerState {
        let mut state = SlicerState::new(difficulty, patterns(), 1234, SlicerTuning::default());
        state.start(0.0);
        state
    }

    #[test]
    fn test_consecutive_hits_ramp() {
        let mut state = round(Difficulty::Beginner);
        let totals: Vec<u64> = (0..4)
            .map(|_| {
                slice(&mut state, Vec2::new(100.0, LANE_Y), 10.0);
                state.score
            })
            .collect();
        assert_eq!(totals, vec![1, 3, 6, 10]);
        assert_eq!(state.combo, 4);
    }

    #[test]
    fn test_press_outside_play_area_is_ignored() {
        let mut state = round(Difficulty::Beginner);
        slice(&mut state, Vec2::new(100.0, LANE_Y), 10.0);
        state.drain_events();

        for point in [
            Vec2::new(-1.0, LANE_Y),
            Vec2::new(897.0, LANE_Y),
            Vec2::new(100.0, -5.0),
            Vec2::new(100.0, 193.0),
        ] {
            assert_eq!(slice(&mut state, point, 20.0), SliceOutcome::Ignored);
        }
        assert_eq!(state.combo, 1);
        assert_eq!(state.score, 1);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_lane_covered_after_long_frame_gap() {
        let mut state = round(Difficulty::Beginner);
        tick(&mut state, 0.0);
        tick(&mut state, 20_000.0);
        assert!(!state.is_over());

        let outcome = slice(&mut state, Vec2::new(400.0, LANE_Y), 20_000.0);
        assert!(matches!(outcome, SliceOutcome::Hit { .. }), "{outcome:?}");
        assert_eq!(state.combo, 1);
    }

    #[test]
    fn test_miss_resets_combo_only() {
        let mut state = round(Difficulty::Beginner);
        slice(&mut state, Vec2::new(100.0, LANE_Y), 10.0);
        slice(&mut state, Vec2::new(100.0, LANE_Y), 10.0);
        let outcome = slice(&mut state, Vec2::new(100.0, 5.0), 10.0);
        assert_eq!(outcome, SliceOutcome::Miss);
        assert_eq!(state.combo, 0);
        assert_eq!(state.score, 3);

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Sound {
            cue: SoundCue::Miss,
            gain: 0.5
        }));
    }

    #[test]
    fn test_hit_spawns_feedback() {
        let mut state = round(Difficulty::Beginner);
        slice(&mut state, Vec2::new(100.0, LANE_Y), 0.0);
        let particles = state
            .effects
            .iter()
            .filter(|e| matches!(e.kind, EffectKind::Particle { .. }))
            .count();
        assert_eq!(particles, 20);
        assert!(state
            .effects
            .iter()
            .any(|e| e.kind == EffectKind::ScorePopup { points: 1 }));

        tick(&mut state, 250.0);
        assert!(!state
            .effects
            .iter()
            .any(|e| matches!(e.kind, EffectKind::Slash { .. })));
        tick(&mut state, 2_100.0);
        assert!(state.effects.is_empty());
        // Effects expiring never touch the score
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_combo_cue_after_two() {
        let mut state = round(Difficulty::Beginner);
        for _ in 0..3 {
            slice(&mut state, Vec2::new(100.0, LANE_Y), 0.0);
        }
        let cues: Vec<SoundCue> = state
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                GameEvent::Sound { cue, .. } if cue != SoundCue::Bgm => Some(cue),
                _ => None,
            })
            .collect();
        assert_eq!(cues, vec![SoundCue::Slice, SoundCue::Slice, SoundCue::Combo]);
        assert!(state
            .effects
            .iter()
            .any(|e| e.kind == EffectKind::ComboBanner { combo: 3 }));
    }

    #[test]
    fn test_segment_b_hit() {
        let mut state = round(Difficulty::Beginner);
        let outcome = slice(&mut state, Vec2::new(850.0, LANE_Y), 0.0);
        assert!(matches!(
            outcome,
            SliceOutcome::Hit {
                segment: SegmentId::B,
                ..
            }
        ));
    }

    #[test]
    fn test_obstacle_ends_round_immediately() {
        let mut state = round(Difficulty::Intermediate);
        slice(&mut state, Vec2::new(100.0, LANE_Y), 0.0);
        slice(&mut state, Vec2::new(100.0, LANE_Y), 0.0);
        state.belt.segments[0].obstacles.push(Obstacle {
            id: 99,
            left: 200.0,
            width: 100.0,
        });

        let outcome = slice(&mut state, Vec2::new(250.0, LANE_Y), 1_000.0);
        assert_eq!(outcome, SliceOutcome::Obstacle);
        assert!(state.is_over());
        assert_eq!(state.cause, Some(GameOverCause::Obstacle));
        assert_eq!(state.score, 3);
        assert!(!state.spawner.is_active());
        assert!(!state.timer.is_running());

        // Further input is ignored
        assert_eq!(
            slice(&mut state, Vec2::new(100.0, LANE_Y), 1_100.0),
            SliceOutcome::Ignored
        );

        state.drain_events();
        tick(&mut state, 1_499.0);
        assert!(state.drain_events().is_empty());
        tick(&mut state, 1_500.0);
        assert_eq!(state.drain_events(), vec![GameEvent::Finished { score: 3 }]);
        tick(&mut state, 5_000.0);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_timeout_fires_game_over_once() {
        let mut state = round(Difficulty::Beginner);
        let mut now = 0.0;
        let mut game_overs = 0;
        let mut finished = Vec::new();
        let mut last_remaining = state.time_remaining();
        while now < 40_000.0 {
            now += 16.0;
            tick(&mut state, now);
            assert!(state.time_remaining() <= last_remaining);
            last_remaining = state.time_remaining();
            for event in state.drain_events() {
                match event {
                    GameEvent::GameOver { cause, .. } => {
                        assert_eq!(cause, GameOverCause::Timeout);
                        assert_eq!(state.time_remaining(), 0);
                        game_overs += 1;
                    }
                    GameEvent::Finished { score } => finished.push((now, score)),
                    _ => {}
                }
            }
        }
        assert_eq!(game_overs, 1);
        assert_eq!(finished.len(), 1);
        // Reported after the 1.5 s hold
        assert!(finished[0].0 >= 31_500.0 && finished[0].0 < 31_520.0);
    }

    #[test]
    fn test_beginner_never_spawns_obstacles() {
        let mut state = round(Difficulty::Beginner);
        let mut now = 0.0;
        while now < 29_000.0 {
            now += 16.0;
            tick(&mut state, now);
        }
        assert!(!state.spawner.is_active());
        assert!(state.belt.segments.iter().all(|s| s.obstacles.is_empty()));
    }

    #[test]
    fn test_advanced_speed_never_decreases() {
        let mut state = round(Difficulty::Advanced);
        let mut now = 0.0;
        let mut last = state.belt.speed;
        while now < 10_000.0 {
            now += 16.0;
            tick(&mut state, now);
            assert!(state.belt.speed >= last);
            last = state.belt.speed;
        }
        assert!(state.belt.speed > 300.0);
    }

    #[test]
    fn test_bgm_repeats_until_over() {
        let mut state = round(Difficulty::Beginner);
        let mut now = 0.0;
        let mut phrases = 0;
        while now < 33_000.0 {
            tick(&mut state, now);
            phrases += state
                .drain_events()
                .iter()
                .filter(|e| matches!(e, GameEvent::Sound { cue: SoundCue::Bgm, .. }))
                .count();
            now += 10.0;
        }
        // 0, 2, 4, ... 28 s; none after the round ended at 30 s
        assert_eq!(phrases, 15);
    }
}
