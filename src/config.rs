//! Game configuration
//!
//! Everything the session core treats as external tuning: the difficulty
//! curve endpoints, the session length, and the abstract lane geometry the
//! collision detector measures against. Defaults reproduce the reference
//! tuning; embedders may deserialize their own from JSON.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::OVERSHOOT_RATIO;
use crate::sim::collision::Aabb;
use crate::sim::difficulty::DifficultyCurve;
use crate::sim::lanes::LaneId;
use crate::sim::state::{Direction, MarkerSlot};

/// Abstract lane/pipe layout in presentation-agnostic units
///
/// Lanes are horizontal strips stacked at `lane_pitch` intervals; obstacles
/// travel along a lane between `±lane_span` of its centre, overshooting the
/// edge slightly on entry and exit. A pipe sits at each end; its marker
/// toggles between two anchor rows aligned with the outermost lanes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Geometry {
    /// Number of lanes
    pub lane_count: usize,
    /// Vertical distance between lane centrelines
    pub lane_pitch: f32,
    /// Base half-span of a lane: obstacles cross from one `±lane_span`
    /// neighbourhood to the other
    pub lane_span: f32,
    /// Hits only register within this distance of a lane end
    pub hit_margin: f32,
    /// Half-extent of an obstacle's square bounding box
    pub obstacle_half: f32,
    /// Half-extent of a marker's square bounding box
    pub marker_half: f32,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            lane_count: 4,
            lane_pitch: 80.0,
            lane_span: 330.0,
            hit_margin: 70.0,
            obstacle_half: 20.0,
            marker_half: 20.0,
        }
    }
}

impl Geometry {
    /// Overshoot distance past the lane edge, proportional to the span
    pub fn overshoot(&self) -> f32 {
        self.lane_span * OVERSHOOT_RATIO
    }

    /// Centreline y of a lane
    pub fn lane_y(&self, lane: LaneId) -> f32 {
        lane.0 as f32 * self.lane_pitch
    }

    /// Horizontal extent of every lane: (left edge, right edge)
    pub fn lane_bounds(&self) -> (f32, f32) {
        (-self.lane_span, self.lane_span)
    }

    /// Start and end x offsets for a traversal, mirrored around the lane
    /// centre. The start sits just inside the entry edge, the end just past
    /// the exit edge.
    pub fn traversal_offsets(&self, direction: Direction) -> (f32, f32) {
        let near = self.lane_span - self.overshoot();
        let far = self.lane_span + self.overshoot();
        match direction {
            Direction::Leftward => (near, -far),
            Direction::Rightward => (-near, far),
        }
    }

    /// X position of a pipe (pipe 0 guards the left end, pipe 1 the right)
    pub fn pipe_x(&self, pipe: usize) -> f32 {
        if pipe == 0 {
            -self.lane_span
        } else {
            self.lane_span
        }
    }

    /// Marker anchor row: the top slot aligns with the first lane, the
    /// bottom slot with the last
    pub fn marker_y(&self, slot: MarkerSlot) -> f32 {
        match slot {
            MarkerSlot::Top => self.lane_y(LaneId(0)),
            MarkerSlot::Bottom => self.lane_y(LaneId(self.lane_count - 1)),
        }
    }

    /// Bounding box of a pipe's marker in its current slot
    pub fn marker_aabb(&self, pipe: usize, slot: MarkerSlot) -> Aabb {
        Aabb::from_center_half(
            glam::vec2(self.pipe_x(pipe), self.marker_y(slot)),
            self.marker_half,
        )
    }

    /// Bounding box of an obstacle at an interpolated position
    pub fn obstacle_aabb(&self, center: glam::Vec2) -> Aabb {
        Aabb::from_center_half(center, self.obstacle_half)
    }
}

/// Top-level configuration: difficulty curve, session length, geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    pub difficulty: DifficultyCurve,
    /// Authoritative session length (ms)
    pub session_duration_ms: u64,
    pub geometry: Geometry,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            difficulty: DifficultyCurve::default(),
            session_duration_ms: 120_000,
            geometry: Geometry::default(),
        }
    }
}

/// Configuration rejected at setup. Fatal to initialization, never a
/// gameplay error path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    NonPositive(&'static str),
    InvertedRange(&'static str),
    OutOfUnitRange(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositive(field) => write!(f, "{field} must be positive"),
            ConfigError::InvertedRange(field) => {
                write!(f, "{field}: min bound exceeds max bound")
            }
            ConfigError::OutOfUnitRange(field) => write!(f, "{field} must be within 0..=1"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl GameConfig {
    /// Parse a configuration from JSON
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reject configurations the session cannot run with. Embedders call
    /// this once at setup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session_duration_ms == 0 {
            return Err(ConfigError::NonPositive("sessionDurationMs"));
        }
        if self.difficulty.ramp_up_ms == 0 {
            return Err(ConfigError::NonPositive("difficultyRampUpTime"));
        }
        for ep in [&self.difficulty.initial, &self.difficulty.final_] {
            if ep.min_speed <= 0.0 || ep.min_spawn_rate <= 0.0 {
                return Err(ConfigError::NonPositive("difficulty speed/spawn bounds"));
            }
            if ep.min_speed > ep.max_speed {
                return Err(ConfigError::InvertedRange("speed"));
            }
            if ep.min_spawn_rate > ep.max_spawn_rate {
                return Err(ConfigError::InvertedRange("spawnRate"));
            }
            if ep.max_obstacles < 1.0 {
                return Err(ConfigError::NonPositive("maxObstacles"));
            }
            if !(0.0..=1.0).contains(&ep.multi_spawn_chance) {
                return Err(ConfigError::OutOfUnitRange("multiSpawnChance"));
            }
        }
        let geo = &self.geometry;
        if geo.lane_count == 0 {
            return Err(ConfigError::NonPositive("laneCount"));
        }
        if geo.lane_span <= 0.0
            || geo.lane_pitch <= 0.0
            || geo.hit_margin <= 0.0
            || geo.obstacle_half <= 0.0
            || geo.marker_half <= 0.0
        {
            return Err(ConfigError::NonPositive("geometry dimensions"));
        }
        Ok(())
    }
}
