//! Hoop layout generation
//!
//! The frame is split into horizontal zones, one per usable alignment.
//! Hoops created by one call never share a zone, so their footprints never
//! overlap. Each hoop sits in a vertical slot; slot 0 is the lowest.

use glam::Vec2;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{Alignment, Frame, Hoop};
use crate::consts::*;
use crate::settings::LayoutPolicy;

/// Seeded hoop generator
#[derive(Debug, Clone)]
pub struct HoopLayout {
    policy: LayoutPolicy,
    rng: Pcg32,
    /// Next alignment for the cycling policy
    cursor: usize,
}

impl HoopLayout {
    pub fn new(policy: LayoutPolicy, seed: u64) -> Self {
        Self {
            policy,
            rng: Pcg32::seed_from_u64(seed),
            cursor: 0,
        }
    }

    pub fn policy(&self) -> LayoutPolicy {
        self.policy
    }

    /// Alignments whose zones are at least a hoop apart on `frame`.
    ///
    /// Three zones need a frame `3 * HOOP_SIZE` wide, two need
    /// `2 * HOOP_SIZE`; anything narrower gets a single centered zone.
    pub fn zones(frame: &Frame) -> &'static [Alignment] {
        let fit = (frame.width() / HOOP_SIZE).floor();
        if fit >= 3.0 {
            &Alignment::ALL
        } else if fit >= 2.0 {
            &[Alignment::Left, Alignment::Right]
        } else {
            &[Alignment::Center]
        }
    }

    /// Most hoops a single call can place on `frame` without overlap
    pub fn capacity(frame: &Frame) -> usize {
        Self::zones(frame).len().min(MAX_HOOPS)
    }

    /// Generate up to `count` hoops for slots `first_slot..first_slot + count`.
    ///
    /// `count` is clamped to `1..=capacity(frame)`, so narrow frames get
    /// fewer hoops rather than overlapping ones.
    ///
    /// `below` is the alignment of the hoop directly under the first new
    /// slot, if any; the first new hoop avoids it so consecutive hoops
    /// alternate sides.
    pub fn generate(
        &mut self,
        frame: &Frame,
        first_slot: usize,
        count: usize,
        dynamic_chance: f32,
        below: Option<Alignment>,
    ) -> Vec<Hoop> {
        let zones = Self::zones(frame);
        let capacity = zones.len().min(MAX_HOOPS);
        if count > capacity {
            log::debug!("Frame {} wide fits only {capacity} hoop(s)", frame.width());
        }
        let count = count.clamp(1, capacity);
        let alignments = self.pick_alignments(zones, count, below);

        let zone_width = frame.width() / zones.len() as f32;
        let jitter = HOOP_JITTER.min(((zone_width - HOOP_SIZE) / 2.0).max(0.0));
        let dynamic_chance = f64::from(dynamic_chance.clamp(0.0, 1.0));

        alignments
            .into_iter()
            .enumerate()
            .map(|(i, alignment)| {
                let zone = zones.iter().position(|z| *z == alignment).unwrap_or(0);
                let zone_center = frame.min.x + zone_width * (zone as f32 + 0.5);

                let (offset, rotation, is_dynamic) = match self.policy {
                    LayoutPolicy::Seeded => {
                        let offset = if jitter > 0.0 {
                            self.rng.random_range(-jitter..=jitter)
                        } else {
                            0.0
                        };
                        let tilt = self.rng.random_range(0.0..=MAX_HOOP_TILT);
                        let rotation = match alignment {
                            // Tilt toward the middle of the court
                            Alignment::Left => -tilt,
                            Alignment::Right => tilt,
                            Alignment::Center => tilt / 2.0 - MAX_HOOP_TILT / 4.0,
                        };
                        (offset, rotation, self.rng.random_bool(dynamic_chance))
                    }
                    LayoutPolicy::Cycling => (0.0, 0.0, false),
                };

                let (a, b) = alignment.swing_offsets();
                let swing = ((-a.min(b)).max(0.0), a.max(b).max(0.0));
                // Stay put when the swing cannot fit the frame
                let is_dynamic = is_dynamic && frame.width() >= HOOP_SIZE + swing.0 + swing.1;
                let (reach_left, reach_right) = if is_dynamic { swing } else { (0.0, 0.0) };
                let x = frame.clamp_x(
                    zone_center + offset,
                    HOOP_SIZE / 2.0,
                    reach_left,
                    reach_right,
                );

                Hoop {
                    pos: Vec2::new(x, frame.slot_y(first_slot + i)),
                    rotation,
                    alignment,
                    is_dynamic,
                }
            })
            .collect()
    }

    fn pick_alignments(
        &mut self,
        zones: &[Alignment],
        count: usize,
        below: Option<Alignment>,
    ) -> Vec<Alignment> {
        let len = zones.len();
        match self.policy {
            LayoutPolicy::Seeded => {
                let mut all = zones.to_vec();
                all.shuffle(&mut self.rng);
                if len > 1 && below.is_some_and(|b| b == all[0]) {
                    all.rotate_left(1);
                }
                all.truncate(count);
                all
            }
            LayoutPolicy::Cycling => {
                if len > 1 && below.is_some_and(|b| b == zones[self.cursor % len]) {
                    self.cursor += 1;
                }
                let picked = (0..count).map(|i| zones[(self.cursor + i) % len]).collect();
                self.cursor = (self.cursor + count) % len;
                picked
            }
        }
    }
}
