//! Aim preview trajectory
//!
//! Constant-gravity parabola sampled at fixed time steps. Only used for
//! drawing the dotted preview while the player drags; the real flight is
//! owned by the presentation's physics.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// One sample of the preview arc
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    /// Seconds since release
    pub time: f32,
    pub pos: Vec2,
}

/// Predict ball positions for `velocity` launched from `origin`.
///
/// Samples t = 0, 0.5, ..., 5.0 using `pos = origin + v*t + 0.5*a*t^2`.
pub fn trajectory(origin: Vec2, velocity: Vec2) -> [TrajectoryPoint; TRAJECTORY_POINTS] {
    let accel = Vec2::new(0.0, GRAVITY);
    std::array::from_fn(|i| {
        let time = i as f32 * TRAJECTORY_STEP;
        TrajectoryPoint {
            time,
            pos: origin + velocity * time + 0.5 * accel * time * time,
        }
    })
}
