//! Flick Hoops - A flick-to-shoot basketball mini-game core
//!
//! Core modules:
//! - `sim`: Deterministic game engine (state machine, layout, scoring, timers)
//! - `session`: Lifecycle controller the presentation layer talks to
//! - `settings`: Data-driven tunables

pub mod session;
pub mod settings;
pub mod sim;

pub use session::{Command, Session, SessionBests};
pub use settings::{LayoutPolicy, Settings};

/// Game configuration constants
pub mod consts {
    /// Gravity used by the aim preview (units/s²)
    pub const GRAVITY: f32 = -9.8;
    /// Number of points in a trajectory preview
    pub const TRAJECTORY_POINTS: usize = 11;
    /// Time between trajectory preview points (seconds)
    pub const TRAJECTORY_STEP: f32 = 0.5;

    /// Drag distance is divided by this to get the preview velocity
    pub const PREVIEW_DRAG_DIVISOR: f32 = 1.3;
    /// Drag distance is divided by this to get the launch impulse
    pub const SHOT_DRAG_DIVISOR: f32 = 1.65;

    /// Ball sprite and hit box size
    pub const BALL_SIZE: f32 = 50.0;
    /// Ball resting height as a fraction of frame height
    pub const BALL_REST_RATIO: f32 = 0.2;

    /// Hoop sprite size
    pub const HOOP_SIZE: f32 = 80.0;
    /// Maximum hoops on the board
    pub const MAX_HOOPS: usize = 3;
    /// Height of the lowest hoop slot as a fraction of frame height
    pub const HOOP_BASE_RATIO: f32 = 0.5;
    /// Vertical distance between hoop slots as a fraction of frame height
    pub const HOOP_ROW_RATIO: f32 = 0.15;
    /// Maximum random horizontal jitter inside an alignment zone
    pub const HOOP_JITTER: f32 = 20.0;
    /// Maximum hoop tilt (radians, ~20 degrees)
    pub const MAX_HOOP_TILT: f32 = 0.35;
    /// Swing distance for left/right aligned dynamic hoops
    pub const SIDE_SWING: f32 = 50.0;
    /// Swing distance either side of base for center dynamic hoops
    pub const CENTER_SWING: f32 = 25.0;
    /// Seconds to swing one way
    pub const SWING_HALF_PERIOD: f32 = 1.5;
    /// Entities enter from this far above the frame
    pub const SPAWN_OFFSET: f32 = 100.0;

    /// Entrance animation length per hoop replaced (seconds)
    pub const ENTRANCE_PER_HOOP: f32 = 0.5;
    /// Extra delay per hoop index during entrance (seconds)
    pub const ENTRANCE_STAGGER: f32 = 0.1;
    /// Ball fade-out before an air ball counts as a miss (seconds)
    pub const AIR_BALL_FADE: f32 = 0.5;
    /// Ball fade-in after a miss (seconds)
    pub const RESPAWN_FADE: f32 = 0.5;

    /// Lives at the start of a game
    pub const MAX_LIVES: u8 = 3;
    /// Points for each hoop cleared by a shot
    pub const POINTS_PER_HOOP: u64 = 1;
    /// Award multiplier when the ball touched a wall before scoring
    pub const BANK_SHOT_MULTIPLIER: u64 = 2;
    /// Winning streak stops raising the award past this
    pub const MAX_STREAK_MULTIPLIER: u32 = 5;
}
