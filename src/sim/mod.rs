//! Deterministic session core
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Clock passed in by the caller, never read from the environment
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collection;
pub mod collision;
pub mod difficulty;
pub mod lanes;
pub mod session;
pub mod spawner;
pub mod state;

pub use collection::{CollectionSummary, CollectionTracker};
pub use collision::Aabb;
pub use difficulty::{DifficultyCurve, DifficultyEndpoint, DifficultyParams};
pub use lanes::{LaneAlreadyLocked, LaneId, LaneRegistry};
pub use session::GameSession;
pub use state::{
    Direction, GameEvent, Marker, MarkerSlot, Obstacle, ObstaclePhase, Session, SessionTask,
};
