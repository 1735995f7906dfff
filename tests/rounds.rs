//! End-to-end rounds driven through the public API

use candy_slicer::audio::LogSink;
use candy_slicer::persistence::MemoryStore;
use candy_slicer::sim::{
    GameEvent, GameOverCause, OddOneOutState, SegmentId, SliceOutcome, SlicerState, SoundCue,
    TapOutcome, odd_one_out, slicer,
};
use candy_slicer::{App, Difficulty, NavEvent, OddOneOutTuning, Screen, SlicerTuning};
use glam::Vec2;

const LANE: Vec2 = Vec2::new(300.0, 96.0);
const ABOVE_LANE: Vec2 = Vec2::new(300.0, 10.0);

fn patterns() -> Vec<String> {
    ["classic/smile", "classic/star", "classic/swirl"]
        .iter()
        .map(|p| p.to_string())
        .collect()
}

#[test]
fn beginner_hits_miss_hits() {
    let mut state = SlicerState::new(Difficulty::Beginner, patterns(), 8, SlicerTuning::default());
    state.start(0.0);
    slicer::tick(&mut state, 0.0);

    let mut now = 0.0;
    for point in [LANE, LANE, LANE, ABOVE_LANE, LANE, LANE] {
        now += 100.0;
        slicer::tick(&mut state, now);
        slicer::slice(&mut state, point, now);
    }

    assert_eq!(state.score, 9);
    assert_eq!(state.combo, 2);
}

#[test]
fn beginner_sequence_through_app() {
    let mut app = App::new(MemoryStore::new(), LogSink::new(), 99);
    app.navigate(NavEvent::StartGame(Difficulty::Beginner), 0.0);

    let mut now = 0.0;
    for point in [LANE, LANE, LANE, ABOVE_LANE, LANE, LANE] {
        app.frame(now);
        app.pointer(point, now);
        now += 50.0;
    }

    let audio = app.audio();
    assert_eq!(audio.count(SoundCue::Slice), 4);
    // Third hit in a row
    assert_eq!(audio.count(SoundCue::Combo), 1);
    assert_eq!(audio.count(SoundCue::Miss), 1);
    assert!(
        audio
            .played()
            .iter()
            .any(|&(cue, volume)| cue == SoundCue::Miss && (volume - 0.4).abs() < 1e-6)
    );

    while app.screen().is_playing() {
        app.frame(now);
        now += 16.0;
    }
    assert_eq!(
        app.screen(),
        Screen::Result {
            mode: candy_slicer::screen::GameMode::Slicer,
            difficulty: Difficulty::Beginner,
            score: 9,
            name_prompt: true,
        }
    );
    assert!(now >= 31_500.0);
}

#[test]
fn obstacle_freezes_score() {
    let mut state = SlicerState::new(Difficulty::Intermediate, patterns(), 21, SlicerTuning::default());
    state.start(0.0);

    slicer::tick(&mut state, 0.0);
    // Obstacles can't spawn this early
    for _ in 0..3 {
        slicer::slice(&mut state, LANE, 0.0);
    }

    let mut now = 0.0;
    let target = loop {
        now += 16.0;
        assert!(now < 30_000.0, "no obstacle came into view");
        slicer::tick(&mut state, now);
        let found = SegmentId::ALL.iter().find_map(|&id| {
            let obstacle = state.belt.segment(id).obstacles.first()?;
            let rect = state.belt.obstacle_rect(id, obstacle);
            (rect.left() > 0.0 && rect.right() < 800.0).then(|| rect.center())
        });
        if let Some(point) = found {
            break point;
        }
    };
    let score = state.score;
    assert_eq!(score, 6);

    assert_eq!(slicer::slice(&mut state, target, now), SliceOutcome::Obstacle);
    assert!(state.is_over());
    assert_eq!(state.cause, Some(GameOverCause::Obstacle));
    assert_eq!(slicer::slice(&mut state, LANE, now + 1.0), SliceOutcome::Ignored);
    assert_eq!(state.score, score);

    let mut reported = Vec::new();
    for step in 0..100 {
        let t = now + f64::from(step) * 10.0;
        slicer::tick(&mut state, t);
        for event in state.drain_events() {
            if let GameEvent::Finished { score } = event {
                reported.push((t, score));
            }
        }
    }
    assert_eq!(reported, vec![(now + 500.0, score)]);
}

#[test]
fn minigame_correct_and_wrong_taps() {
    for difficulty in Difficulty::ALL {
        let mut state =
            OddOneOutState::new(difficulty, patterns(), 5, OddOneOutTuning::default());
        state.start(0.0);
        odd_one_out::tick(&mut state, 0.0);

        let cell = state.odd_cell;
        assert_eq!(
            odd_one_out::tap_cell(&mut state, cell.row, cell.index),
            TapOutcome::Correct { score: 100 }
        );

        let odd_cells: usize = (0..state.rows())
            .map(|row| {
                (0..state.tuning.columns)
                    .filter(|&column| state.pattern_at(row, column) == state.odd)
                    .count()
            })
            .sum();
        assert_eq!(odd_cells, 1);

        let deadline = state.timer.deadline_ms().unwrap_or_default();
        let cell = state.odd_cell;
        let wrong_column = (cell.index + 1) % state.tuning.columns;
        let penalty = difficulty.mini_game().penalty_secs;
        assert_eq!(
            odd_one_out::tap_cell(&mut state, cell.row, wrong_column),
            TapOutcome::Wrong {
                penalty_secs: penalty
            }
        );
        assert_eq!(state.score, 100);
        assert_eq!(
            state.timer.deadline_ms(),
            Some(deadline - f64::from(penalty) * 1000.0)
        );
    }
}

#[test]
fn minigame_tap_by_position() {
    let mut state = OddOneOutState::new(
        Difficulty::Beginner,
        patterns(),
        13,
        OddOneOutTuning::default(),
    );
    state.start(0.0);
    odd_one_out::tick(&mut state, 0.0);

    let cell = state.odd_cell;
    let pitch = state.tuning.cell_pitch();
    let center = Vec2::new(
        state.row_offsets[cell.row] + cell.index as f32 * pitch + pitch / 2.0,
        state.tuning.row_top(cell.row) + state.tuning.cell_margin + state.tuning.cell_size / 2.0,
    );
    assert_eq!(
        odd_one_out::tap(&mut state, center),
        TapOutcome::Correct { score: 100 }
    );
    // Gap between rows
    assert_eq!(
        odd_one_out::tap(&mut state, Vec2::new(40.0, 97.0)),
        TapOutcome::Ignored
    );
}
