//! Game state and core entity types
//!
//! Everything the presentation layer needs to mirror the board lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ledger::Ledger;
use super::trajectory::TrajectoryPoint;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No board loaded (before start, after cleanup)
    Inactive,
    /// Restart in progress, waiting for the reload continuation
    Loading,
    /// Ball resting, waiting for a drag
    Idle,
    /// Player is dragging the ball
    Aim,
    /// Ball in flight
    Shoot,
    /// Shot scored (transient)
    Bucket,
    /// Shot missed (transient)
    Miss,
    /// Game is paused
    Pause,
    /// Out of lives
    GameOver,
}

impl GamePhase {
    /// Phases in which the hoop sequence must be populated
    pub fn is_active_play(self) -> bool {
        matches!(self, GamePhase::Idle | GamePhase::Aim | GamePhase::Shoot)
    }
}

/// Play field bounds (y axis points up)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub min: Vec2,
    pub max: Vec2,
}

impl Frame {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Frame anchored at the origin
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(Vec2::ZERO, Vec2::new(width, height))
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn mid_x(&self) -> f32 {
        (self.min.x + self.max.x) / 2.0
    }

    /// Clamp x so a body of `half_width` (plus `reach` either side) stays inside
    pub fn clamp_x(&self, x: f32, half_width: f32, reach_left: f32, reach_right: f32) -> f32 {
        let lo = self.min.x + half_width + reach_left;
        let hi = self.max.x - half_width - reach_right;
        if lo > hi {
            // Frame too narrow, center what we can
            return (lo + hi) / 2.0;
        }
        x.clamp(lo, hi)
    }

    /// Ball resting height
    pub fn rest_y(&self) -> f32 {
        self.min.y + self.height() * BALL_REST_RATIO
    }

    /// Height of hoop slot `slot` (0 = lowest)
    pub fn slot_y(&self, slot: usize) -> f32 {
        let ratio = HOOP_BASE_RATIO + HOOP_ROW_RATIO * slot as f32;
        (self.min.y + self.height() * ratio).clamp(self.min.y, self.max.y)
    }

    /// Where entities appear before sliding into place
    pub fn spawn_y(&self) -> f32 {
        self.max.y + SPAWN_OFFSET
    }
}

/// Ball skin, picked by the player outside the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BallStyle {
    #[default]
    Classic,
    Street,
    Beach,
    Neon,
}

/// The ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Resting height the ball returns to between shots
    pub rest_y: f32,
    pub style: BallStyle,
}

impl Ball {
    pub fn new(frame: &Frame, style: BallStyle) -> Self {
        Self {
            pos: Vec2::new(frame.mid_x(), frame.rest_y()),
            rest_y: frame.rest_y(),
            style,
        }
    }

    /// Resting position with the current x
    pub fn rest_pos(&self) -> Vec2 {
        Vec2::new(self.pos.x, self.rest_y)
    }

    /// Hit test against the ball's square bounds
    pub fn contains(&self, point: Vec2) -> bool {
        let half = BALL_SIZE / 2.0;
        (point - self.pos).abs().cmple(Vec2::splat(half)).all()
    }
}

/// Horizontal zone a hoop is anchored to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl Alignment {
    pub const ALL: [Alignment; 3] = [Alignment::Left, Alignment::Center, Alignment::Right];

    /// Swing end points relative to the base x, as (start offset, end offset)
    pub fn swing_offsets(self) -> (f32, f32) {
        match self {
            Alignment::Left => (0.0, SIDE_SWING),
            Alignment::Right => (0.0, -SIDE_SWING),
            Alignment::Center => (-CENTER_SWING, CENTER_SWING),
        }
    }
}

/// A hoop entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hoop {
    /// Base position (resting target after the entrance animation)
    pub pos: Vec2,
    /// Rotation in radians (counter-clockwise)
    pub rotation: f32,
    pub alignment: Alignment,
    /// Swings horizontally between the swing end points
    pub is_dynamic: bool,
}

impl Hoop {
    /// Horizontal swing range as (start x, end x). Static hoops return (x, x).
    pub fn swing_range(&self) -> (f32, f32) {
        if !self.is_dynamic {
            return (self.pos.x, self.pos.x);
        }
        let (start, end) = self.alignment.swing_offsets();
        (self.pos.x + start, self.pos.x + end)
    }

    /// Leftmost and rightmost x the hoop center can reach
    pub fn reach(&self) -> (f32, f32) {
        let (a, b) = self.swing_range();
        (a.min(b), a.max(b))
    }

    /// Sample the oscillation at `t` seconds (start -> end -> start, linear)
    pub fn swing_x(&self, t: f32) -> f32 {
        let (start, end) = self.swing_range();
        if start == end {
            return start;
        }
        let phase = t.rem_euclid(2.0 * SWING_HALF_PERIOD) / SWING_HALF_PERIOD;
        let f = if phase <= 1.0 { phase } else { 2.0 - phase };
        start + (end - start) * f
    }
}

/// Timing for hoops sliding in after a round change
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entrance {
    /// Slide duration for each hoop
    pub duration: f32,
    /// Delay added per hoop index
    pub stagger: f32,
    /// Height new hoops slide down from (and cleared hoops leave toward)
    pub from_y: f32,
}

impl Entrance {
    /// Entrance for `count` replaced hoops on `frame`
    pub fn for_count(frame: &Frame, count: usize) -> Self {
        Self {
            duration: ENTRANCE_PER_HOOP * count as f32,
            stagger: ENTRANCE_STAGGER,
            from_y: frame.spawn_y(),
        }
    }

    /// Delay before hoop `index` starts moving
    pub fn delay_for(&self, index: usize) -> f32 {
        self.stagger * (index + 1) as f32
    }

    /// Time until the last of `count` hoops is in place
    pub fn finish_time(&self, count: usize) -> f32 {
        match count {
            0 => self.duration,
            n => self.delay_for(n - 1) + self.duration,
        }
    }
}

/// Sound cues for the presentation to play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cue {
    /// Player grabbed the ball
    Drag,
    /// Ball released
    Release,
    /// Shot scored
    Score,
    /// Life lost
    LifeLost,
    /// Game over
    GameOver,
}

/// Notifications produced for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    StateChanged(GamePhase),
    /// Move the ball to `to` over `duration`; `fade_in` > 0 means respawn
    BallMoved { to: Vec2, duration: f32, fade_in: f32 },
    /// Aim preview updated
    AimChanged {
        velocity: Vec2,
        preview: Vec<TrajectoryPoint>,
    },
    /// Apply this impulse to the ball's physics body
    BallLaunched { impulse: Vec2 },
    /// Shot clock ran out; fade the ball out, a miss follows
    AirBall { fade_out: f32 },
    /// `removed` hoops left the front, `added` were appended; `hoops` is the
    /// full sequence after the change
    HoopsChanged {
        added: Vec<Hoop>,
        removed: usize,
        hoops: Vec<Hoop>,
        entrance: Entrance,
    },
    ScoreChanged {
        points: u64,
        streak: u32,
        awarded: u64,
        bank_shot: bool,
    },
    LivesChanged(u8),
    GameOver {
        points: u64,
        best_streak: u32,
    },
    Cue(Cue),
    /// Entrance or respawn animation finished
    Settled,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seed the hoop layout RNG was created with
    pub seed: u64,
    pub phase: GamePhase,
    pub frame: Frame,
    pub ball: Ball,
    /// Front hoop is the lowest slot
    pub hoops: Vec<Hoop>,
    pub ledger: Ledger,
    /// Rounds started this game (0-based index of the current round)
    pub round: u32,
    /// Where the current drag began
    pub drag_origin: Option<Vec2>,
}

impl GameState {
    pub fn new(seed: u64, frame: Frame, style: BallStyle) -> Self {
        Self {
            seed,
            phase: GamePhase::Inactive,
            frame,
            ball: Ball::new(&frame, style),
            hoops: Vec::new(),
            ledger: Ledger::new(),
            round: 0,
            drag_origin: None,
        }
    }
}
