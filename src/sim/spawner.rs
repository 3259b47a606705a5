//! Obstacle spawner
//!
//! One spawn cycle per scheduled task: consult the difficulty curve, find a
//! free lane, lock it, place a randomized obstacle, command its crossing
//! animation, and reschedule the next cycle. When the session is at obstacle
//! capacity or no lane is free, the cycle probes again after a short fixed
//! delay instead of spawning.

use glam::vec2;
use rand::Rng;

use crate::animation::{AnimationId, AnimationSpec, Animator};
use crate::catalog::{self, CollectibleId};
use crate::config::GameConfig;
use crate::consts::PROBE_DELAY_MS;
use crate::scheduler::Scheduler;

use super::lanes::LaneAlreadyLocked;
use super::state::{Direction, GameEvent, Obstacle, ObstaclePhase, Session, SessionTask};

/// Run one spawn cycle at `now_ms`.
///
/// Always leaves a follow-up `SpawnCycle` task scheduled while the session
/// runs: after the probe delay when capacity or lanes block spawning, or
/// after a difficulty-derived random delay otherwise. The cycle is a no-op
/// if the session stopped before the task fired.
///
/// `multi_spawn_chance` from the difficulty parameters is deliberately not
/// consulted here; the reference tuning computes it but nothing spawns in
/// multiples. Kept inert rather than inventing behaviour.
pub fn spawn_cycle<A: Animator>(
    session: &mut Session,
    config: &GameConfig,
    scheduler: &mut Scheduler<SessionTask>,
    animator: &mut A,
    now_ms: u64,
) -> Result<(), LaneAlreadyLocked> {
    if !session.running {
        return Ok(());
    }

    let params = config.difficulty.params_at(session.elapsed_ms(now_ms));

    if session.active_obstacles() >= params.max_obstacles as usize {
        session.spawn_task =
            Some(scheduler.schedule_after(now_ms, PROBE_DELAY_MS, SessionTask::SpawnCycle));
        return Ok(());
    }

    let free = session.lanes.free_lanes();
    if free.is_empty() {
        session.spawn_task =
            Some(scheduler.schedule_after(now_ms, PROBE_DELAY_MS, SessionTask::SpawnCycle));
        return Ok(());
    }

    let lane = free[session.rng.random_range(0..free.len())];
    session.lanes.lock(lane)?;

    let kind = CollectibleId(session.rng.random_range(0..catalog::CATALOG.len()));
    let direction = if session.rng.random_bool(0.5) {
        Direction::Leftward
    } else {
        Direction::Rightward
    };
    let speed_secs = session
        .rng
        .random_range(params.min_speed..=params.max_speed);

    let geo = &config.geometry;
    let (start_x, end_x) = geo.traversal_offsets(direction);
    let lane_y = geo.lane_y(lane);
    let duration_ms = (speed_secs * 1000.0) as u64;

    let animation = animator.start(
        AnimationSpec {
            from: vec2(start_x, lane_y),
            to: vec2(end_x, lane_y),
            duration_ms,
        },
        now_ms,
    );

    let id = session.alloc_obstacle_id();
    session.obstacles.push(Obstacle {
        id,
        kind,
        lane,
        direction,
        speed_secs,
        spawned_at_ms: now_ms,
        phase: ObstaclePhase::Animating,
        animation,
        flash_until_ms: None,
    });

    log::debug!(
        "spawned obstacle {} ({}) on lane {} heading {:?}, {} ms crossing",
        id,
        kind.name(),
        lane.0,
        direction,
        duration_ms
    );
    session.push_event(GameEvent::ObstacleSpawned {
        obstacle: id,
        kind,
        lane,
        direction,
        duration_ms,
    });

    // Reschedule regardless of what this cycle did above
    let delay = session
        .rng
        .random_range(params.min_spawn_rate..=params.max_spawn_rate) as u64;
    session.spawn_task = Some(scheduler.schedule_after(now_ms, delay, SessionTask::SpawnCycle));

    Ok(())
}

/// Completion callback for a crossing animation. Only acts while the session
/// is still running; after a forced end-of-game reset the lane cleanup has
/// already happened and a late completion must not double-unlock.
pub fn on_animation_complete(session: &mut Session, animation: AnimationId) {
    if !session.running {
        return;
    }
    let Some(index) = session
        .obstacles
        .iter()
        .position(|o| o.animation == animation)
    else {
        return;
    };
    let mut obstacle = session.obstacles.remove(index);
    obstacle.phase = ObstaclePhase::Completed;
    session.lanes.unlock(obstacle.lane);
    session.push_event(GameEvent::ObstacleRetired {
        obstacle: obstacle.id,
        lane: obstacle.lane,
    });
}
