//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes in as explicit `now_ms` arguments, never from a global clock
//! - Seeded RNG only
//! - Side effects leave as `GameEvent`s
//! - No rendering or platform dependencies

pub mod belt;
pub mod effects;
pub mod event;
pub mod geometry;
pub mod odd_one_out;
pub mod schedule;
pub mod slicer;
pub mod spawner;
pub mod timer;

pub use belt::{Belt, Obstacle, Segment, SegmentId};
pub use effects::{Effect, EffectKind, Effects};
pub use event::{GameEvent, GameOverCause, RoundPhase, SoundCue};
pub use geometry::Rect;
pub use odd_one_out::{CellRef, OddOneOutState, TapOutcome};
pub use schedule::{Delay, FrameDelta};
pub use slicer::{SliceOutcome, SlicerState};
pub use spawner::ObstacleSpawner;
pub use timer::{CountdownTimer, TimerTick};
