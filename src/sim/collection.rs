//! Collection tracker
//!
//! The set of distinct collectible kinds intercepted this session. Cleared
//! only when a new session starts; preserved across session end so the final
//! collection can be shown.

use std::collections::BTreeSet;

use crate::catalog::CollectibleId;

/// Progress tiers the presentation layer renders differently
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionSummary {
    Empty,
    Partial { collected: usize, remaining: usize },
    Complete { total: usize },
}

/// Set of unique collected kinds
#[derive(Debug, Clone, Default)]
pub struct CollectionTracker {
    collected: BTreeSet<CollectibleId>,
}

impl CollectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an interception. Idempotent; returns whether the kind was new.
    pub fn add(&mut self, kind: CollectibleId) -> bool {
        self.collected.insert(kind)
    }

    pub fn contains(&self, kind: CollectibleId) -> bool {
        self.collected.contains(&kind)
    }

    pub fn len(&self) -> usize {
        self.collected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collected.is_empty()
    }

    pub fn is_complete(&self, catalog_len: usize) -> bool {
        self.collected.len() == catalog_len
    }

    /// Only called on session (re)start
    pub fn clear(&mut self) {
        self.collected.clear();
    }

    pub fn summary(&self, catalog_len: usize) -> CollectionSummary {
        if self.collected.is_empty() {
            CollectionSummary::Empty
        } else if self.is_complete(catalog_len) {
            CollectionSummary::Complete { total: catalog_len }
        } else {
            CollectionSummary::Partial {
                collected: self.collected.len(),
                remaining: catalog_len - self.collected.len(),
            }
        }
    }
}
