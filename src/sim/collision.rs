//! Collision detection
//!
//! Per-frame scan pairing every marker against every animating obstacle.
//! Two-stage test: a proximity gate (hits only count near the lane ends,
//! where the pipes sit) followed by a standard 2D AABB overlap check.
//!
//! Nothing suppresses re-detection of a pair that stays overlapped across
//! consecutive frames; the same physical overlap can score more than once
//! until the obstacle moves on or retires. That matches the observed
//! reference behaviour and is preserved as-is.

use glam::Vec2;

use crate::animation::Animator;
use crate::catalog::CollectibleId;
use crate::config::Geometry;
use crate::consts::{COLLISION_FLASH_MS, HIT_REWARD};

use super::state::{GameEvent, Session};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center_half(center: Vec2, half: f32) -> Self {
        Self {
            min: center - Vec2::splat(half),
            max: center + Vec2::splat(half),
        }
    }

    /// Standard AABB intersection: not fully left of, right of, above, or
    /// below the other box
    pub fn intersects(&self, other: &Aabb) -> bool {
        !(self.max.x < other.min.x
            || self.min.x > other.max.x
            || self.max.y < other.min.y
            || self.min.y > other.max.y)
    }
}

/// Proximity gate: the obstacle's box must sit within `margin` of either
/// lane end. Obstacles mid-lane never register hits.
pub fn near_lane_end(obstacle: &Aabb, lane_left: f32, lane_right: f32, margin: f32) -> bool {
    obstacle.max.x <= lane_left + margin || obstacle.min.x >= lane_right - margin
}

/// Full two-stage hit test for one (marker, obstacle) pair
pub fn check_hit(
    marker: &Aabb,
    obstacle: &Aabb,
    lane_left: f32,
    lane_right: f32,
    margin: f32,
) -> bool {
    near_lane_end(obstacle, lane_left, lane_right, margin) && marker.intersects(obstacle)
}

/// One registered hit from a scan
#[derive(Debug, Clone, Copy)]
struct HitPair {
    marker_index: usize,
    obstacle_id: u32,
    kind: CollectibleId,
}

/// Scan every (marker, obstacle) pair once. No-op while the session is not
/// running; the caller keeps invoking it every frame regardless so detection
/// resumes the instant a session starts.
pub fn scan<A: Animator>(session: &mut Session, geo: &Geometry, animator: &A, now_ms: u64) {
    if !session.running {
        return;
    }

    let (lane_left, lane_right) = geo.lane_bounds();
    let mut hits: Vec<HitPair> = Vec::new();

    for (marker_index, marker) in session.markers.iter().enumerate() {
        let marker_box = geo.marker_aabb(marker.pipe, marker.slot);
        for obstacle in &session.obstacles {
            let Some(pos) = animator.position(obstacle.animation, now_ms) else {
                continue;
            };
            let obstacle_box = geo.obstacle_aabb(pos);
            if check_hit(
                &marker_box,
                &obstacle_box,
                lane_left,
                lane_right,
                geo.hit_margin,
            ) {
                hits.push(HitPair {
                    marker_index,
                    obstacle_id: obstacle.id,
                    kind: obstacle.kind,
                });
            }
        }
    }

    for hit in hits {
        let newly_collected = session.collected.add(hit.kind);
        session.score += HIT_REWARD;

        let pipe = session.markers[hit.marker_index].pipe;
        session.markers[hit.marker_index].flash_until_ms = Some(now_ms + COLLISION_FLASH_MS);
        if let Some(obstacle) = session
            .obstacles
            .iter_mut()
            .find(|o| o.id == hit.obstacle_id)
        {
            obstacle.flash_until_ms = Some(now_ms + COLLISION_FLASH_MS);
        }

        log::debug!(
            "hit: pipe {} caught {} (obstacle {})",
            pipe,
            hit.kind.name(),
            hit.obstacle_id
        );
        session.push_event(GameEvent::Hit {
            obstacle: hit.obstacle_id,
            kind: hit.kind,
            pipe,
            newly_collected,
        });
        session.push_event(GameEvent::ScoreChanged {
            score: session.score,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;
    use proptest::prelude::*;

    #[test]
    fn test_intersects_basic() {
        let a = Aabb::from_center_half(vec2(0.0, 0.0), 10.0);
        let b = Aabb::from_center_half(vec2(15.0, 0.0), 10.0);
        let c = Aabb::from_center_half(vec2(25.0, 0.0), 4.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_touching_edges_intersect() {
        let a = Aabb::from_center_half(vec2(0.0, 0.0), 10.0);
        let b = Aabb::from_center_half(vec2(20.0, 0.0), 10.0);
        assert!(a.intersects(&b));
    }

    #[test]
    fn test_vertical_separation_misses() {
        let a = Aabb::from_center_half(vec2(0.0, 0.0), 10.0);
        let b = Aabb::from_center_half(vec2(0.0, 30.0), 10.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_gate_rejects_mid_lane() {
        // Lane from -330 to 330, margin 70
        let mid = Aabb::from_center_half(vec2(0.0, 0.0), 20.0);
        assert!(!near_lane_end(&mid, -330.0, 330.0, 70.0));

        let near_left = Aabb::from_center_half(vec2(-300.0, 0.0), 20.0);
        let near_right = Aabb::from_center_half(vec2(300.0, 0.0), 20.0);
        assert!(near_lane_end(&near_left, -330.0, 330.0, 70.0));
        assert!(near_lane_end(&near_right, -330.0, 330.0, 70.0));
    }

    #[test]
    fn test_hit_requires_both_stages() {
        let lane = (-330.0, 330.0);
        let margin = 70.0;
        let marker = Aabb::from_center_half(vec2(-330.0, 0.0), 20.0);

        // Overlapping and near the end: hit
        let at_end = Aabb::from_center_half(vec2(-320.0, 0.0), 20.0);
        assert!(check_hit(&marker, &at_end, lane.0, lane.1, margin));

        // Near the end but not overlapping: miss
        let apart = Aabb::from_center_half(vec2(-280.0, 60.0), 20.0);
        assert!(!check_hit(&marker, &apart, lane.0, lane.1, margin));

        // Overlapping a mid-lane marker position never happens, but a
        // mid-lane obstacle is gated out even against a wide box
        let wide_marker = Aabb::from_center_half(vec2(0.0, 0.0), 400.0);
        let mid = Aabb::from_center_half(vec2(0.0, 0.0), 20.0);
        assert!(!check_hit(&wide_marker, &mid, lane.0, lane.1, margin));
    }

    proptest! {
        // Intersection is symmetric
        #[test]
        fn prop_intersects_symmetric(ax in -500.0f32..500.0, ay in -500.0f32..500.0,
                                     bx in -500.0f32..500.0, by in -500.0f32..500.0,
                                     ha in 1.0f32..50.0, hb in 1.0f32..50.0) {
            let a = Aabb::from_center_half(vec2(ax, ay), ha);
            let b = Aabb::from_center_half(vec2(bx, by), hb);
            prop_assert_eq!(a.intersects(&b), b.intersects(&a));
        }

        // Separation beyond the sum of half-extents on either axis is a miss
        #[test]
        fn prop_separated_boxes_miss(ax in -500.0f32..500.0, ay in -500.0f32..500.0,
                                     dx in 101.0f32..1000.0, ha in 1.0f32..50.0, hb in 1.0f32..50.0) {
            let a = Aabb::from_center_half(vec2(ax, ay), ha);
            let b = Aabb::from_center_half(vec2(ax + dx, ay), hb);
            prop_assert!(!a.intersects(&b));
        }
    }
}
