//! Session state and core entity types
//!
//! The [`Session`] aggregate holds every piece of mutable game state and is
//! passed explicitly to component operations; nothing closes over shared
//! globals.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::animation::AnimationId;
use crate::catalog::CollectibleId;
use crate::consts::PIPE_COUNT;
use crate::scheduler::TaskId;

use super::collection::CollectionTracker;
use super::lanes::{LaneId, LaneRegistry};

/// Traversal direction along a lane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Enters at the right edge, exits past the left
    Leftward,
    /// Enters at the left edge, exits past the right
    Rightward,
}

/// Obstacle lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstaclePhase {
    Animating,
    Completed,
}

/// A moving collectible crossing one lane
///
/// Owned by its lane for its whole lifetime: the lane is locked before the
/// obstacle exists and unlocked when it retires.
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub id: u32,
    pub kind: CollectibleId,
    pub lane: LaneId,
    pub direction: Direction,
    /// Crossing time in seconds, drawn from the difficulty curve bounds
    pub speed_secs: f32,
    pub spawned_at_ms: u64,
    pub phase: ObstaclePhase,
    pub animation: AnimationId,
    /// Cosmetic collision flash; cleared by the frame pump, never gates
    /// re-detection
    pub flash_until_ms: Option<u64>,
}

/// Marker anchor within a pipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkerSlot {
    #[default]
    Top,
    Bottom,
}

impl MarkerSlot {
    pub fn toggled(self) -> Self {
        match self {
            MarkerSlot::Top => MarkerSlot::Bottom,
            MarkerSlot::Bottom => MarkerSlot::Top,
        }
    }
}

/// Player-controlled token, one per pipe
#[derive(Debug, Clone)]
pub struct Marker {
    pub pipe: usize,
    pub slot: MarkerSlot,
    pub flash_until_ms: Option<u64>,
}

/// Tasks the session schedules for itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionTask {
    /// Run one spawn cycle
    SpawnCycle,
    /// The single authoritative session deadline
    Deadline,
}

/// Everything the presentation layer needs to react to
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    SessionStarted,
    SessionEnded {
        time_up: bool,
    },
    ObstacleSpawned {
        obstacle: u32,
        kind: CollectibleId,
        lane: LaneId,
        direction: Direction,
        duration_ms: u64,
    },
    /// Obstacle left play, either by finishing its crossing or by the
    /// forced reset at session end
    ObstacleRetired {
        obstacle: u32,
        lane: LaneId,
    },
    MarkerToggled {
        pipe: usize,
        slot: MarkerSlot,
    },
    /// A marker intercepted an obstacle near a lane end
    Hit {
        obstacle: u32,
        kind: CollectibleId,
        pipe: usize,
        newly_collected: bool,
    },
    ScoreChanged {
        score: u32,
    },
    /// Emitted when the displayed whole second changes
    CountdownChanged {
        remaining_ms: u64,
    },
}

/// Complete mutable session state
#[derive(Debug)]
pub struct Session {
    pub running: bool,
    pub started_at_ms: u64,
    pub score: u32,
    pub collected: CollectionTracker,
    pub lanes: LaneRegistry,
    pub obstacles: Vec<Obstacle>,
    pub markers: Vec<Marker>,
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) spawn_task: Option<TaskId>,
    pub(crate) deadline_task: Option<TaskId>,
    pub(crate) next_obstacle_id: u32,
    pub(crate) last_countdown_secs: Option<u64>,
    events: Vec<GameEvent>,
}

impl Session {
    pub fn new(lane_count: usize, seed: u64) -> Self {
        let markers = (0..PIPE_COUNT)
            .map(|pipe| Marker {
                pipe,
                slot: MarkerSlot::Top,
                flash_until_ms: None,
            })
            .collect();
        Self {
            running: false,
            started_at_ms: 0,
            score: 0,
            collected: CollectionTracker::new(),
            lanes: LaneRegistry::new(lane_count),
            obstacles: Vec::new(),
            markers,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            spawn_task: None,
            deadline_task: None,
            next_obstacle_id: 1,
            last_countdown_secs: None,
            events: Vec::new(),
        }
    }

    /// Milliseconds since session start
    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.started_at_ms)
    }

    /// Count of obstacles still crossing their lane
    pub fn active_obstacles(&self) -> usize {
        self.obstacles
            .iter()
            .filter(|o| o.phase == ObstaclePhase::Animating)
            .count()
    }

    pub(crate) fn alloc_obstacle_id(&mut self) -> u32 {
        let id = self.next_obstacle_id;
        self.next_obstacle_id += 1;
        id
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take everything that happened since the last drain, in order
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_idle() {
        let session = Session::new(4, 7);
        assert!(!session.running);
        assert_eq!(session.score, 0);
        assert!(session.collected.is_empty());
        assert_eq!(session.markers.len(), PIPE_COUNT);
        assert!(session.markers.iter().all(|m| m.slot == MarkerSlot::Top));
        assert_eq!(session.lanes.free_lanes().len(), 4);
    }

    #[test]
    fn test_marker_slot_toggles() {
        assert_eq!(MarkerSlot::Top.toggled(), MarkerSlot::Bottom);
        assert_eq!(MarkerSlot::Bottom.toggled(), MarkerSlot::Top);
    }

    #[test]
    fn test_obstacle_ids_increase() {
        let mut session = Session::new(4, 7);
        let a = session.alloc_obstacle_id();
        let b = session.alloc_obstacle_id();
        assert!(b > a);
    }

    #[test]
    fn test_drain_events_empties_queue() {
        let mut session = Session::new(4, 7);
        session.push_event(GameEvent::SessionStarted);
        assert_eq!(session.drain_events(), vec![GameEvent::SessionStarted]);
        assert!(session.drain_events().is_empty());
    }
}
