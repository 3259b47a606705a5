//! Lane Catch - a lane-crossing collectible reflex minigame
//!
//! Core modules:
//! - `sim`: Deterministic session core (difficulty curve, lane registry,
//!   obstacle spawner, collision detector, collection tracker)
//! - `scheduler`: Delayed-task queue driving spawn cadence and the session deadline
//! - `animation`: Animation seam toward the presentation layer
//! - `catalog`: Fixed table of collectible kinds
//! - `config`: Game configuration and geometry
//! - `hud`: Display formatting helpers

pub mod animation;
pub mod catalog;
pub mod config;
pub mod hud;
pub mod scheduler;
pub mod sim;

pub use config::GameConfig;
pub use sim::{GameEvent, GameSession, Session};

/// Game constants
pub mod consts {
    /// Delay before the spawner probes again when it finds no capacity
    /// or no free lane (ms).
    pub const PROBE_DELAY_MS: u64 = 100;
    /// Cosmetic collision flash duration (ms). Does not suppress re-detection.
    pub const COLLISION_FLASH_MS: u64 = 300;
    /// Score reward per registered hit.
    pub const HIT_REWARD: u32 = 1;
    /// Overshoot past the lane edge as a fraction of the base half-span,
    /// so obstacles visibly enter and exit beyond the lane (6 units on the
    /// reference 330-unit span).
    pub const OVERSHOOT_RATIO: f32 = 6.0 / 330.0;
    /// Number of pipes. One marker lives in each, at either end of the lanes.
    pub const PIPE_COUNT: usize = 2;
}

/// Linear interpolation between two bounds
#[inline]
pub fn lerp(start: f32, end: f32, progress: f32) -> f32 {
    start + (end - start) * progress
}

#[cfg(test)]
mod tests {
    use super::lerp;

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp(2.0, 3.5, 0.0), 2.0);
        assert_eq!(lerp(2.0, 3.5, 1.0), 3.5);
        assert_eq!(lerp(1000.0, 300.0, 0.5), 650.0);
    }
}
