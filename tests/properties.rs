//! Property tests for scoring, countdown, belt and ranking invariants

use candy_slicer::ranking::{MAX_RANKING_ENTRIES, Ranking, RankingEntry};
use candy_slicer::sim::timer::remaining_secs;
use candy_slicer::sim::{Belt, CountdownTimer, SliceOutcome, SlicerState, TimerTick, slicer};
use candy_slicer::{Difficulty, SlicerTuning};
use glam::Vec2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

fn patterns() -> Vec<String> {
    vec!["a".into(), "b".into(), "c".into()]
}

fn round(seed: u64) -> SlicerState {
    let mut state = SlicerState::new(Difficulty::Beginner, patterns(), seed, SlicerTuning::default());
    state.start(0.0);
    slicer::tick(&mut state, 0.0);
    state
}

fn entry(score: u64) -> RankingEntry {
    RankingEntry {
        name: "p".into(),
        score,
        date: "d".into(),
    }
}

proptest! {
    #[test]
    fn hit_streak_scores_triangular(seed in any::<u64>(), hits in 1u32..40) {
        let mut state = round(seed);
        for k in 1..=hits {
            let before = state.score;
            let outcome = slicer::slice(&mut state, Vec2::new(400.0, 96.0), 1.0);
            prop_assert!(matches!(outcome, SliceOutcome::Hit { .. }), "{:?}", outcome);
            prop_assert_eq!(state.score - before, u64::from(k));
        }
        let n = u64::from(hits);
        prop_assert_eq!(state.score, n * (n + 1) / 2);
        prop_assert_eq!(state.combo, hits);
    }

    #[test]
    fn miss_resets_combo_and_keeps_score(seed in any::<u64>(), hits in 0u32..10, y in 0.0f32..31.0) {
        let mut state = round(seed);
        for _ in 0..hits {
            slicer::slice(&mut state, Vec2::new(400.0, 96.0), 1.0);
        }
        let score = state.score;
        let outcome = slicer::slice(&mut state, Vec2::new(400.0, y), 2.0);
        prop_assert_eq!(outcome, SliceOutcome::Miss);
        prop_assert_eq!(state.combo, 0);
        prop_assert_eq!(state.score, score);
    }

    #[test]
    fn countdown_never_increases_and_expires_once(
        steps in prop::collection::vec(1.0f64..900.0, 1..200)
    ) {
        let mut timer = CountdownTimer::new(30);
        timer.start(0.0);
        let mut now = 0.0;
        let mut last = timer.remaining();
        let mut expiries = 0;
        for step in steps.iter().copied().chain(std::iter::repeat_n(1_000.0, 40)) {
            now += step;
            match timer.tick(now) {
                TimerTick::Expired => {
                    prop_assert_eq!(timer.remaining(), 0);
                    expiries += 1;
                }
                _ => prop_assert!(timer.remaining() <= last),
            }
            last = timer.remaining();
        }
        prop_assert_eq!(expiries, 1);
    }

    #[test]
    fn penalty_shifts_remaining(now in 0.0f64..30_000.0, penalty in 0u32..40) {
        let mut timer = CountdownTimer::new(30);
        timer.start(0.0);
        let expected = remaining_secs(30_000.0, now).saturating_sub(penalty);
        timer.penalize(penalty);
        timer.tick(now);
        prop_assert_eq!(timer.remaining(), expected);
    }

    #[test]
    fn wrapped_segments_stay_one_width_apart(
        seed in any::<u64>(),
        accelerate in any::<bool>(),
        steps in prop::collection::vec(prop_oneof![4 => 0.0f32..0.1, 1 => 0.1f32..30.0], 1..120)
    ) {
        let tuning = SlicerTuning::default();
        let mut belt = Belt::new(&tuning, accelerate, (0, 1));
        let mut rng = Pcg32::seed_from_u64(seed);
        for dt in steps {
            let recycled = belt.advance(dt, &mut rng, 3);
            if !recycled.is_empty() {
                prop_assert!((belt.spacing() - tuning.segment_width).abs() < 1e-2);
            }
            for segment in &belt.segments {
                prop_assert!(segment.offset > -tuning.segment_width);
            }
        }
    }

    #[test]
    fn ranking_stays_sorted_and_capped(scores in prop::collection::vec(0u64..500, 0..40)) {
        let mut ranking = Ranking::new();
        for score in scores {
            let lowest = ranking.entries().last().map(|e| e.score);
            let was_full = ranking.len() == MAX_RANKING_ENTRIES;
            let rank = ranking.insert(entry(score));

            prop_assert!(ranking.len() <= MAX_RANKING_ENTRIES);
            prop_assert!(ranking.entries().windows(2).all(|w| w[0].score >= w[1].score));
            if was_full && rank.is_some() {
                prop_assert!(ranking.entries().last().map(|e| e.score) >= lowest);
            }
            prop_assert_eq!(rank.is_some(), score > 0 && (!was_full || Some(score) > lowest));
        }
    }
}
