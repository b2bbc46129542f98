//! Deterministic game engine
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through explicit ticks
//! - Seeded RNG only
//! - Collisions are reported from outside, never computed here
//! - No rendering or platform dependencies

pub mod board;
pub mod layout;
pub mod ledger;
pub mod state;
pub mod timer;
pub mod trajectory;

pub use board::{Continuation, GameBoard};
pub use layout::HoopLayout;
pub use ledger::Ledger;
pub use state::{
    Alignment, Ball, BallStyle, Cue, Entrance, Frame, GameEvent, GamePhase, GameState, Hoop,
};
pub use timer::{TimerHandle, Timers};
pub use trajectory::{TrajectoryPoint, trajectory};
