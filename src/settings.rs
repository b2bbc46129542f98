//! Game settings and tunables
//!
//! Loaded from an optional JSON file; anything missing falls back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_HOOPS;
use crate::sim::BallStyle;

/// How hoop alignments and the dynamic flag are chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LayoutPolicy {
    /// Shuffled alignments, tilt and dynamic flag from the seeded RNG
    #[default]
    Seeded,
    /// Left, Center, Right in turn; no tilt, never dynamic
    Cycling,
}

impl LayoutPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutPolicy::Seeded => "Seeded",
            LayoutPolicy::Cycling => "Cycling",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "seeded" | "random" => Some(LayoutPolicy::Seeded),
            "cycling" | "fixed" => Some(LayoutPolicy::Cycling),
            _ => None,
        }
    }
}

/// Game settings/tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Hoops on the board (1-3)
    pub hoop_count: usize,
    pub ball_style: BallStyle,
    pub layout: LayoutPolicy,

    // === Layout variety ===
    /// Chance a new hoop swings, on round 0
    pub dynamic_chance: f32,
    /// Added to the swing chance each round
    pub dynamic_chance_per_round: f32,
    /// Swing chance never exceeds this
    pub max_dynamic_chance: f32,

    // === Timing (seconds) ===
    /// Flight time before a shot counts as an air ball
    pub shot_clock: f32,
    /// Hoop exit animation before a restarted game reloads
    pub restart_delay: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            hoop_count: MAX_HOOPS,
            ball_style: BallStyle::Classic,
            layout: LayoutPolicy::Seeded,

            dynamic_chance: 0.2,
            dynamic_chance_per_round: 0.05,
            max_dynamic_chance: 0.6,

            shot_clock: 6.0,
            restart_delay: 1.0,
        }
    }
}

impl Settings {
    /// Clamp every value into its valid range
    pub fn sanitized(mut self) -> Self {
        self.hoop_count = self.hoop_count.clamp(1, MAX_HOOPS);
        self.max_dynamic_chance = finite_or(self.max_dynamic_chance, 0.0).clamp(0.0, 1.0);
        self.dynamic_chance = finite_or(self.dynamic_chance, 0.0).clamp(0.0, 1.0);
        self.dynamic_chance_per_round = finite_or(self.dynamic_chance_per_round, 0.0).max(0.0);
        self.shot_clock = finite_or(self.shot_clock, Self::default().shot_clock).max(0.1);
        self.restart_delay = finite_or(self.restart_delay, 0.0).max(0.0);
        self
    }

    /// Swing chance for hoops spawned in `round`
    pub fn dynamic_chance_for_round(&self, round: u32) -> f32 {
        (self.dynamic_chance + self.dynamic_chance_per_round * round as f32)
            .min(self.max_dynamic_chance)
            .clamp(0.0, 1.0)
    }

    /// Parse settings from JSON (missing fields use defaults)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Settings>(json).map(Settings::sanitized)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults on any failure
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {e}, using defaults", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                log::info!("No settings at {} ({e}), using defaults", path.display());
                Self::default()
            }
        }
    }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() { value } else { fallback }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "hoop_count": 2, "layout": "Cycling" }"#)
            .expect("valid json");
        assert_eq!(settings.hoop_count, 2);
        assert_eq!(settings.layout, LayoutPolicy::Cycling);
        assert_eq!(settings.shot_clock, Settings::default().shot_clock);
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let settings =
            Settings::from_json(r#"{ "hoop_count": 9, "dynamic_chance": 4.0, "shot_clock": -1 }"#)
                .expect("valid json");
        assert_eq!(settings.hoop_count, MAX_HOOPS);
        assert_eq!(settings.dynamic_chance, 1.0);
        assert!(settings.shot_clock > 0.0);

        let settings = Settings::from_json(r#"{ "hoop_count": 0 }"#).expect("valid json");
        assert_eq!(settings.hoop_count, 1);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Settings::from_json("{ hoop_count: ").is_err());
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let settings = Settings::load("/nonexistent/flick-hoops/settings.json");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            ball_style: BallStyle::Neon,
            ..Settings::default()
        };
        let json = settings.to_json().expect("serializable");
        assert_eq!(Settings::from_json(&json).expect("parses"), settings);
    }

    #[test]
    fn test_dynamic_chance_ramps_and_caps() {
        let settings = Settings::default();
        assert!((settings.dynamic_chance_for_round(0) - 0.2).abs() < 1e-6);
        assert!(settings.dynamic_chance_for_round(2) > settings.dynamic_chance_for_round(1));
        assert!((settings.dynamic_chance_for_round(100) - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!(LayoutPolicy::from_str("FIXED"), Some(LayoutPolicy::Cycling));
        assert_eq!(LayoutPolicy::from_str("seeded"), Some(LayoutPolicy::Seeded));
        assert_eq!(LayoutPolicy::from_str("chaos"), None);
    }
}
