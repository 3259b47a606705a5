//! Animation seam toward the presentation layer
//!
//! The session core never draws anything. It commands movements through the
//! [`Animator`] trait ("move this from A to B over D milliseconds, tell me
//! when it finishes") and reads interpolated positions back for collision
//! checks. The presentation layer supplies the real implementation;
//! [`LinearAnimator`] is the bundled headless one used by tests and the demo
//! binary.

use glam::Vec2;

/// Handle to a running animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationId(u64);

/// A commanded movement: linear pacing from `from` to `to` over `duration_ms`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    pub from: Vec2,
    pub to: Vec2,
    pub duration_ms: u64,
}

/// Position/animation service the session core commands
pub trait Animator {
    /// Begin an animation at `now_ms`
    fn start(&mut self, spec: AnimationSpec, now_ms: u64) -> AnimationId;

    /// Cancel a running animation. A cancelled animation never reports
    /// completion and its position becomes unknown.
    fn cancel(&mut self, id: AnimationId);

    /// Animations that finished at or before `now_ms`, in completion order.
    /// Each id is reported exactly once.
    fn poll_completed(&mut self, now_ms: u64) -> Vec<AnimationId>;

    /// Current interpolated position, clamped to the end point once the
    /// duration has elapsed. `None` for unknown, cancelled, or already
    /// polled-off animations.
    fn position(&self, id: AnimationId, now_ms: u64) -> Option<Vec2>;
}

#[derive(Debug)]
struct Active {
    id: AnimationId,
    spec: AnimationSpec,
    started_at_ms: u64,
}

impl Active {
    fn ends_at_ms(&self) -> u64 {
        self.started_at_ms + self.spec.duration_ms
    }
}

/// Headless linear animator driven entirely by the caller's clock
#[derive(Debug, Default)]
pub struct LinearAnimator {
    active: Vec<Active>,
    next_id: u64,
}

impl LinearAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}

impl Animator for LinearAnimator {
    fn start(&mut self, spec: AnimationSpec, now_ms: u64) -> AnimationId {
        let id = AnimationId(self.next_id);
        self.next_id += 1;
        self.active.push(Active {
            id,
            spec,
            started_at_ms: now_ms,
        });
        id
    }

    fn cancel(&mut self, id: AnimationId) {
        self.active.retain(|a| a.id != id);
    }

    fn poll_completed(&mut self, now_ms: u64) -> Vec<AnimationId> {
        let mut done: Vec<&Active> = self
            .active
            .iter()
            .filter(|a| a.ends_at_ms() <= now_ms)
            .collect();
        done.sort_by_key(|a| (a.ends_at_ms(), a.id.0));
        let ids: Vec<AnimationId> = done.into_iter().map(|a| a.id).collect();
        self.active.retain(|a| a.ends_at_ms() > now_ms);
        ids
    }

    fn position(&self, id: AnimationId, now_ms: u64) -> Option<Vec2> {
        let active = self.active.iter().find(|a| a.id == id)?;
        if active.spec.duration_ms == 0 {
            return Some(active.spec.to);
        }
        let elapsed = now_ms.saturating_sub(active.started_at_ms);
        let t = (elapsed as f32 / active.spec.duration_ms as f32).clamp(0.0, 1.0);
        Some(active.spec.from.lerp(active.spec.to, t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    fn spec() -> AnimationSpec {
        AnimationSpec {
            from: vec2(-100.0, 0.0),
            to: vec2(100.0, 0.0),
            duration_ms: 1000,
        }
    }

    #[test]
    fn test_linear_interpolation() {
        let mut anim = LinearAnimator::new();
        let id = anim.start(spec(), 0);

        assert_eq!(anim.position(id, 0), Some(vec2(-100.0, 0.0)));
        assert_eq!(anim.position(id, 500), Some(vec2(0.0, 0.0)));
        assert_eq!(anim.position(id, 1000), Some(vec2(100.0, 0.0)));
        // Past the end the position clamps, no extrapolation
        assert_eq!(anim.position(id, 5000), Some(vec2(100.0, 0.0)));
    }

    #[test]
    fn test_completion_reported_once() {
        let mut anim = LinearAnimator::new();
        let id = anim.start(spec(), 0);

        assert!(anim.poll_completed(999).is_empty());
        assert_eq!(anim.poll_completed(1000), vec![id]);
        assert!(anim.poll_completed(2000).is_empty());
        assert_eq!(anim.position(id, 2000), None);
    }

    #[test]
    fn test_completions_in_end_time_order() {
        let mut anim = LinearAnimator::new();
        let slow = anim.start(
            AnimationSpec {
                duration_ms: 2000,
                ..spec()
            },
            0,
        );
        let fast = anim.start(spec(), 0);
        assert_eq!(anim.poll_completed(2000), vec![fast, slow]);
    }

    #[test]
    fn test_cancel_suppresses_completion() {
        let mut anim = LinearAnimator::new();
        let id = anim.start(spec(), 0);
        anim.cancel(id);
        assert!(anim.poll_completed(5000).is_empty());
        assert_eq!(anim.position(id, 500), None);
    }
}
