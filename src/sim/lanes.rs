//! Lane registry
//!
//! Lanes have exclusive occupancy: the spawner locks a lane before placing an
//! obstacle on it and the completion path unlocks it. Double-locking is the
//! one programmer invariant this crate checks for.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable lane handle (index from the top)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LaneId(pub usize);

/// Attempted to lock a lane that is already occupied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneAlreadyLocked(pub LaneId);

impl fmt::Display for LaneAlreadyLocked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lane {} is already locked", self.0.0)
    }
}

impl std::error::Error for LaneAlreadyLocked {}

/// Occupancy tracker over a fixed set of lanes
///
/// Lanes are created once at setup and never destroyed during a session.
/// BTreeSet keeps iteration order stable for deterministic lane selection.
#[derive(Debug, Clone)]
pub struct LaneRegistry {
    lane_count: usize,
    locked: BTreeSet<LaneId>,
}

impl LaneRegistry {
    pub fn new(lane_count: usize) -> Self {
        Self {
            lane_count,
            locked: BTreeSet::new(),
        }
    }

    pub fn lane_count(&self) -> usize {
        self.lane_count
    }

    pub fn is_locked(&self, lane: LaneId) -> bool {
        self.locked.contains(&lane)
    }

    pub fn locked_count(&self) -> usize {
        self.locked.len()
    }

    /// Mark a lane occupied. Callers only lock lanes returned by
    /// [`free_lanes`](Self::free_lanes); a second lock is an invariant
    /// violation and fails.
    pub fn lock(&mut self, lane: LaneId) -> Result<(), LaneAlreadyLocked> {
        if !self.locked.insert(lane) {
            return Err(LaneAlreadyLocked(lane));
        }
        Ok(())
    }

    /// Release a lane. Safe no-op if it was not locked.
    pub fn unlock(&mut self, lane: LaneId) {
        self.locked.remove(&lane);
    }

    /// Lanes currently free, in ascending order
    pub fn free_lanes(&self) -> Vec<LaneId> {
        (0..self.lane_count)
            .map(LaneId)
            .filter(|lane| !self.locked.contains(lane))
            .collect()
    }

    /// Unlock everything. Used at session end so no lane stays stuck
    /// across sessions.
    pub fn clear(&mut self) {
        self.locked.clear();
    }
}
