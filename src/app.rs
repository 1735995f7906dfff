//! Session driver
//!
//! `App` owns the mounted screen, the player's settings and rankings, and at
//! most one running round. The host calls `frame` once per animation frame
//! and forwards pointer input; everything else is navigation.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::audio::{SoundSink, dispatch};
use crate::difficulty::Difficulty;
use crate::persistence::KeyValueStore;
use crate::platform;
use crate::ranking::RankingBook;
use crate::screen::{GameMode, NavEvent, Screen};
use crate::settings::{Settings, SoundSettings};
use crate::sim::{
    Effect, GameEvent, Obstacle, OddOneOutState, SegmentId, SliceOutcome, SlicerState, SoundCue,
    TapOutcome, odd_one_out, slicer,
};
use crate::tuning::{OddOneOutTuning, SlicerTuning};

/// The round currently mounted
#[derive(Debug, Clone)]
pub enum Session {
    Slicer(SlicerState),
    OddOneOut(OddOneOutState),
}

impl Session {
    pub fn score(&self) -> u64 {
        match self {
            Session::Slicer(state) => state.score,
            Session::OddOneOut(state) => state.score,
        }
    }

    pub fn is_over(&self) -> bool {
        match self {
            Session::Slicer(state) => state.is_over(),
            Session::OddOneOut(state) => state.is_over(),
        }
    }

    fn teardown(&mut self) {
        match self {
            Session::Slicer(state) => state.teardown(),
            Session::OddOneOut(state) => state.teardown(),
        }
    }

    fn tick(&mut self, now_ms: f64) {
        match self {
            Session::Slicer(state) => slicer::tick(state, now_ms),
            Session::OddOneOut(state) => odd_one_out::tick(state, now_ms),
        }
    }

    fn drain_events(&mut self) -> Vec<GameEvent> {
        match self {
            Session::Slicer(state) => state.drain_events(),
            Session::OddOneOut(state) => state.drain_events(),
        }
    }
}

/// What a pointer event did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerOutcome {
    /// No round is accepting input
    Ignored,
    Slice(SliceOutcome),
    Tap(TapOutcome),
}

pub struct App<S: KeyValueStore, A: SoundSink> {
    screen: Screen,
    settings: Settings,
    rankings: RankingBook,
    session: Option<Session>,
    slicer_tuning: SlicerTuning,
    odd_tuning: OddOneOutTuning,
    store: S,
    audio: A,
    /// Seeds each new round
    seeds: Pcg32,
}

impl<S: KeyValueStore, A: SoundSink> App<S, A> {
    pub fn new(store: S, audio: A, seed: u64) -> Self {
        let settings = Settings::load(&store);
        let rankings = RankingBook::load(&store);
        Self {
            screen: Screen::Title,
            settings,
            rankings,
            session: None,
            slicer_tuning: SlicerTuning::default(),
            odd_tuning: OddOneOutTuning::default(),
            store,
            audio,
            seeds: Pcg32::seed_from_u64(seed),
        }
    }

    /// Override game balance for rounds started from now on
    pub fn with_tuning(mut self, slicer: SlicerTuning, odd_one_out: OddOneOutTuning) -> Self {
        self.slicer_tuning = slicer;
        self.odd_tuning = odd_one_out;
        self
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn rankings(&self) -> &RankingBook {
        &self.rankings
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    /// Apply a navigation request; returns false if it doesn't apply here
    pub fn navigate(&mut self, event: NavEvent, now_ms: f64) -> bool {
        let Some(next) = self.screen.transition(event) else {
            log::debug!("{event:?} ignored on {}", self.screen.name());
            return false;
        };

        if !matches!(event, NavEvent::RoundFinished { .. }) {
            self.play(SoundCue::Button, 1.0);
        }

        if let Some(mut session) = self.session.take() {
            session.teardown();
        }

        match next {
            Screen::Game { difficulty } => {
                let mut state = SlicerState::new(
                    difficulty,
                    self.settings.candy_set().pattern_ids(),
                    self.seeds.random(),
                    self.slicer_tuning.clone(),
                );
                state.start(now_ms);
                self.session = Some(Session::Slicer(state));
            }
            Screen::MiniGame { difficulty } => {
                let mut state = OddOneOutState::new(
                    difficulty,
                    self.settings.candy_set().pattern_ids(),
                    self.seeds.random(),
                    self.odd_tuning.clone(),
                );
                state.start(now_ms);
                self.session = Some(Session::OddOneOut(state));
            }
            _ => {}
        }

        log::info!("Screen {} -> {}", self.screen.name(), next.name());
        self.screen = next;
        true
    }

    /// Advance the mounted round
    pub fn frame(&mut self, now_ms: f64) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.tick(now_ms);
        self.pump(now_ms);
    }

    /// Route a pointer press at a play-area point to the mounted round
    pub fn pointer(&mut self, point: Vec2, now_ms: f64) -> PointerOutcome {
        let outcome = match self.session.as_mut() {
            Some(Session::Slicer(state)) => {
                PointerOutcome::Slice(slicer::slice(state, point, now_ms))
            }
            Some(Session::OddOneOut(state)) => {
                PointerOutcome::Tap(odd_one_out::tap(state, point))
            }
            None => PointerOutcome::Ignored,
        };
        self.pump(now_ms);
        outcome
    }

    /// Minigame tap on a known rendered cell
    pub fn tap_cell(&mut self, row: usize, column: usize, now_ms: f64) -> PointerOutcome {
        let outcome = match self.session.as_mut() {
            Some(Session::OddOneOut(state)) => {
                PointerOutcome::Tap(odd_one_out::tap_cell(state, row, column))
            }
            _ => PointerOutcome::Ignored,
        };
        self.pump(now_ms);
        outcome
    }

    /// Handle everything the round emitted since the last call
    fn pump(&mut self, now_ms: f64) {
        let events = match self.session.as_mut() {
            Some(session) => session.drain_events(),
            None => return,
        };

        for event in events {
            match event {
                GameEvent::Sound { cue, gain } => self.play(cue, gain),
                GameEvent::Finished { score } => self.finish_round(score, now_ms),
                other => log::debug!("{other:?}"),
            }
        }
    }

    fn finish_round(&mut self, score: u64, now_ms: f64) {
        let qualifies = match (&self.session, self.screen) {
            (Some(Session::Slicer(_)), Screen::Game { difficulty }) => {
                self.rankings.qualifies(difficulty, score)
            }
            _ => false,
        };
        self.navigate(NavEvent::RoundFinished { score, qualifies }, now_ms);
    }

    fn play(&mut self, cue: SoundCue, gain: f32) {
        dispatch(&mut self.audio, &self.settings.sound, cue, gain);
    }

    /// Save the pending slicer score under `name`
    ///
    /// Storage failures are logged; the prompt closes either way. Returns
    /// the rank achieved when the entry was stored.
    pub fn submit_name(&mut self, name: &str, now_ms: f64) -> Option<usize> {
        self.submit_name_dated(name, platform::today(), now_ms)
    }

    /// `submit_name` with an explicit display date
    pub fn submit_name_dated(&mut self, name: &str, date: String, now_ms: f64) -> Option<usize> {
        let Screen::Result {
            mode: GameMode::Slicer,
            difficulty,
            score,
            name_prompt: true,
        } = self.screen
        else {
            return None;
        };

        let rank = match self
            .rankings
            .record(&mut self.store, difficulty, name, score, date)
        {
            Ok(rank) => rank,
            Err(err) => {
                log::warn!("Ranking entry not saved: {err}");
                None
            }
        };
        self.navigate(NavEvent::NameSettled, now_ms);
        rank
    }

    /// Close name entry without saving
    pub fn dismiss_name_prompt(&mut self, now_ms: f64) -> bool {
        self.navigate(NavEvent::NameSettled, now_ms)
    }

    /// Choose the candy set used by the next round
    pub fn select_candy_set(&mut self, index: usize) -> bool {
        if !self.settings.select_candy_set(index) {
            return false;
        }
        self.play(SoundCue::Button, 1.0);
        self.persist_settings();
        true
    }

    pub fn set_sound_settings(&mut self, sound: SoundSettings) {
        self.settings.sound = sound.normalized();
        self.persist_settings();
    }

    fn persist_settings(&mut self) {
        if let Err(err) = self.settings.save(&mut self.store) {
            log::warn!("Settings not saved: {err}");
        }
    }

    /// Everything a renderer needs for the current frame
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            screen: self.screen,
            settings: &self.settings,
            candy_set: self.settings.candy_set().name,
            round: self.session.as_ref().map(RoundView::from_session),
            rankings: &self.rankings,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub screen: Screen,
    pub settings: &'a Settings,
    pub candy_set: &'static str,
    pub round: Option<RoundView<'a>>,
    pub rankings: &'a RankingBook,
}

#[derive(Debug, Serialize)]
pub struct SegmentView<'a> {
    pub offset: f32,
    pub pattern: &'a str,
    pub obstacles: &'a [Obstacle],
}

#[derive(Debug, Serialize)]
pub struct RowView<'a> {
    pub offset: f32,
    /// Pattern id of every rendered cell, buffer columns included
    pub cells: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RoundView<'a> {
    Slicer {
        difficulty: Difficulty,
        score: u64,
        combo: u32,
        time_remaining: u32,
        over: bool,
        lane_top: f32,
        segment_height: f32,
        segments: Vec<SegmentView<'a>>,
        effects: &'a [Effect],
    },
    OddOneOut {
        difficulty: Difficulty,
        score: u64,
        time_remaining: u32,
        over: bool,
        penalty_secs: u32,
        rows: Vec<RowView<'a>>,
    },
}

impl<'a> RoundView<'a> {
    fn from_session(session: &'a Session) -> Self {
        match session {
            Session::Slicer(state) => RoundView::Slicer {
                difficulty: state.difficulty,
                score: state.score,
                combo: state.combo,
                time_remaining: state.time_remaining(),
                over: state.is_over(),
                lane_top: state.belt.lane_top,
                segment_height: state.belt.segment_height,
                segments: SegmentId::ALL
                    .iter()
                    .map(|&id| {
                        let segment = state.belt.segment(id);
                        SegmentView {
                            offset: segment.offset,
                            pattern: state.segment_pattern(id),
                            obstacles: &segment.obstacles,
                        }
                    })
                    .collect(),
                effects: state.effects.as_slice(),
            },
            Session::OddOneOut(state) => RoundView::OddOneOut {
                difficulty: state.difficulty,
                score: state.score,
                time_remaining: state.time_remaining(),
                over: state.is_over(),
                penalty_secs: state.params.penalty_secs,
                rows: state
                    .row_offsets
                    .iter()
                    .enumerate()
                    .map(|(row, &offset)| RowView {
                        offset,
                        cells: (0..state.rendered_columns())
                            .map(|column| {
                                state.patterns()[state.pattern_at(row, column)].as_str()
                            })
                            .collect(),
                    })
                    .collect(),
            },
        }
    }
}
