//! Difficulty curve
//!
//! Pure mapping from elapsed session time to the parameter set in effect:
//! each parameter interpolates linearly between an initial and a final bound
//! over the ramp-up window, then holds at the final bound.

use serde::{Deserialize, Serialize};

use crate::lerp;

/// One end of the difficulty ramp
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyEndpoint {
    /// Fastest crossing, in seconds (smaller is faster)
    pub min_speed: f32,
    /// Slowest crossing, in seconds
    pub max_speed: f32,
    /// Shortest delay between spawn cycles (ms)
    pub min_spawn_rate: f32,
    /// Longest delay between spawn cycles (ms)
    pub max_spawn_rate: f32,
    /// Cap on simultaneously animating obstacles
    pub max_obstacles: f32,
    /// Interpolated but not consumed by the spawn procedure; kept for
    /// tuning-surface compatibility
    pub multi_spawn_chance: f32,
}

/// Parameter set in effect at a point in the session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyParams {
    pub min_speed: f32,
    pub max_speed: f32,
    pub min_spawn_rate: f32,
    pub max_spawn_rate: f32,
    pub max_obstacles: u32,
    pub multi_spawn_chance: f32,
}

/// Linear ramp between two difficulty endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyCurve {
    pub initial: DifficultyEndpoint,
    #[serde(rename = "final")]
    pub final_: DifficultyEndpoint,
    /// Time to reach the final endpoint (ms)
    #[serde(rename = "difficultyRampUpTime")]
    pub ramp_up_ms: u64,
}

impl Default for DifficultyCurve {
    fn default() -> Self {
        Self {
            initial: DifficultyEndpoint {
                min_speed: 2.0,
                max_speed: 2.5,
                min_spawn_rate: 1000.0,
                max_spawn_rate: 1500.0,
                max_obstacles: 6.0,
                multi_spawn_chance: 0.1,
            },
            final_: DifficultyEndpoint {
                min_speed: 1.2,
                max_speed: 3.5,
                min_spawn_rate: 300.0,
                max_spawn_rate: 900.0,
                max_obstacles: 12.0,
                multi_spawn_chance: 0.4,
            },
            ramp_up_ms: 60_000,
        }
    }
}

impl DifficultyCurve {
    /// Parameters in effect after `elapsed_ms` of play. Progress clamps to
    /// [0, 1]; past the ramp the final endpoint holds, no extrapolation.
    pub fn params_at(&self, elapsed_ms: u64) -> DifficultyParams {
        let progress = (elapsed_ms as f32 / self.ramp_up_ms as f32).clamp(0.0, 1.0);
        let (a, b) = (&self.initial, &self.final_);
        DifficultyParams {
            min_speed: lerp(a.min_speed, b.min_speed, progress),
            max_speed: lerp(a.max_speed, b.max_speed, progress),
            min_spawn_rate: lerp(a.min_spawn_rate, b.min_spawn_rate, progress),
            max_spawn_rate: lerp(a.max_spawn_rate, b.max_spawn_rate, progress),
            // The cap is a count; round to nearest like the reference tuning
            max_obstacles: lerp(a.max_obstacles, b.max_obstacles, progress).round() as u32,
            multi_spawn_chance: lerp(a.multi_spawn_chance, b.multi_spawn_chance, progress),
        }
    }
}
