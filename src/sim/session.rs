//! Session aggregate
//!
//! [`GameSession`] wires the components together behind three entry points:
//! [`press_start`](GameSession::press_start) and
//! [`press_pipe`](GameSession::press_pipe) for player input, and
//! [`frame`](GameSession::frame) as the per-frame pump the embedder drives
//! with its clock. Everything that happens comes out as [`GameEvent`]s for
//! the presentation layer to drain.

use crate::animation::{Animator, LinearAnimator};
use crate::catalog;
use crate::config::GameConfig;
use crate::consts::PIPE_COUNT;
use crate::scheduler::Scheduler;

use super::collection::CollectionSummary;
use super::collision;
use super::spawner;
use super::state::{GameEvent, MarkerSlot, Session, SessionTask};

/// A complete game session: state, task queue, difficulty config, and the
/// animator seam
#[derive(Debug)]
pub struct GameSession<A: Animator = LinearAnimator> {
    config: GameConfig,
    session: Session,
    scheduler: Scheduler<SessionTask>,
    animator: A,
}

impl GameSession<LinearAnimator> {
    /// Session driven by the bundled headless animator
    pub fn with_default_animator(config: GameConfig, seed: u64) -> Self {
        Self::new(config, seed, LinearAnimator::new())
    }
}

impl<A: Animator> GameSession<A> {
    pub fn new(config: GameConfig, seed: u64, animator: A) -> Self {
        let session = Session::new(config.geometry.lane_count, seed);
        Self {
            config,
            session,
            scheduler: Scheduler::new(),
            animator,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn animator(&self) -> &A {
        &self.animator
    }

    pub fn is_running(&self) -> bool {
        self.session.running
    }

    pub fn score(&self) -> u32 {
        self.session.score
    }

    /// Milliseconds left on the clock; zero once the deadline passed or
    /// while idle
    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        if !self.session.running {
            return 0;
        }
        self.config
            .session_duration_ms
            .saturating_sub(self.session.elapsed_ms(now_ms))
    }

    pub fn collection_summary(&self) -> CollectionSummary {
        self.session.collected.summary(catalog::CATALOG.len())
    }

    /// Take every event produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.session.drain_events()
    }

    /// The start/reset control. Starts a session when idle, force-ends the
    /// current one otherwise.
    pub fn press_start(&mut self, now_ms: u64) {
        if self.session.running {
            self.end(now_ms, false);
        } else {
            self.start(now_ms);
        }
    }

    /// Toggle the marker of `pipe` between its two anchor rows. Ignored
    /// while idle and for out-of-range pipes.
    pub fn press_pipe(&mut self, pipe: usize, now_ms: u64) {
        let _ = now_ms;
        if !self.session.running || pipe >= PIPE_COUNT {
            return;
        }
        let slot = self.session.markers[pipe].slot.toggled();
        self.session.markers[pipe].slot = slot;
        self.session.push_event(GameEvent::MarkerToggled { pipe, slot });
    }

    /// Advance the session to `now_ms`: fire due tasks, retire finished
    /// crossings, detect collisions, expire flashes, tick the countdown.
    /// Callers pump this every frame with a monotonic clock; pumping while
    /// idle is a cheap no-op.
    pub fn frame(&mut self, now_ms: u64) {
        for task in self.scheduler.due(now_ms) {
            match task {
                SessionTask::SpawnCycle => {
                    self.session.spawn_task = None;
                    self.run_spawn_cycle(now_ms);
                }
                SessionTask::Deadline => {
                    self.session.deadline_task = None;
                    self.end(now_ms, true);
                }
            }
        }

        for animation in self.animator.poll_completed(now_ms) {
            spawner::on_animation_complete(&mut self.session, animation);
        }

        collision::scan(
            &mut self.session,
            &self.config.geometry,
            &self.animator,
            now_ms,
        );

        for marker in &mut self.session.markers {
            if marker.flash_until_ms.is_some_and(|until| until <= now_ms) {
                marker.flash_until_ms = None;
            }
        }
        for obstacle in &mut self.session.obstacles {
            if obstacle.flash_until_ms.is_some_and(|until| until <= now_ms) {
                obstacle.flash_until_ms = None;
            }
        }

        if self.session.running {
            let remaining_ms = self.remaining_ms(now_ms);
            let secs = remaining_ms / 1000;
            if self.session.last_countdown_secs != Some(secs) {
                self.session.last_countdown_secs = Some(secs);
                self.session
                    .push_event(GameEvent::CountdownChanged { remaining_ms });
            }
        }
    }

    fn run_spawn_cycle(&mut self, now_ms: u64) {
        if let Err(err) = spawner::spawn_cycle(
            &mut self.session,
            &self.config,
            &mut self.scheduler,
            &mut self.animator,
            now_ms,
        ) {
            // Unreachable while the lock/free invariant holds, but a bug
            // here must not poison the whole session
            log::error!("spawn cycle skipped: {err}");
        }
    }

    fn start(&mut self, now_ms: u64) {
        self.session.running = true;
        self.session.started_at_ms = now_ms;
        self.session.score = 0;
        self.session.collected.clear();
        self.session.lanes.clear();
        self.session.last_countdown_secs = None;
        self.session.push_event(GameEvent::SessionStarted);
        log::info!("session started (seed {})", self.session.seed);

        self.session.deadline_task = Some(self.scheduler.schedule_after(
            now_ms,
            self.config.session_duration_ms,
            SessionTask::Deadline,
        ));
        // First spawn happens immediately, not after a random delay
        self.run_spawn_cycle(now_ms);
    }

    /// Tear the running session down. Score resets, the collection is kept
    /// for display, every lane unlocks, and all crossings are cancelled.
    fn end(&mut self, now_ms: u64, time_up: bool) {
        let elapsed_ms = self.session.elapsed_ms(now_ms);
        self.session.running = false;

        if let Some(task) = self.session.deadline_task.take() {
            self.scheduler.cancel(task);
        }
        if let Some(task) = self.session.spawn_task.take() {
            self.scheduler.cancel(task);
        }

        for obstacle in std::mem::take(&mut self.session.obstacles) {
            self.animator.cancel(obstacle.animation);
            self.session.push_event(GameEvent::ObstacleRetired {
                obstacle: obstacle.id,
                lane: obstacle.lane,
            });
        }
        self.session.lanes.clear();

        for marker in &mut self.session.markers {
            marker.slot = MarkerSlot::Top;
            marker.flash_until_ms = None;
        }

        let final_score = self.session.score;
        self.session.score = 0;
        self.session.push_event(GameEvent::ScoreChanged { score: 0 });
        self.session.push_event(GameEvent::SessionEnded { time_up });
        log::info!(
            "session ended after {} ms ({}), final score {}, {} kinds collected",
            elapsed_ms,
            if time_up { "time up" } else { "reset" },
            final_score,
            self.session.collected.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Geometry;
    use crate::sim::state::ObstaclePhase;

    fn session(seed: u64) -> GameSession {
        GameSession::with_default_animator(GameConfig::default(), seed)
    }

    /// One lane, so the marker rows and every obstacle share a centreline
    /// and hits are guaranteed near the pipe ends
    fn single_lane_session(seed: u64) -> GameSession {
        let config = GameConfig {
            geometry: Geometry {
                lane_count: 1,
                ..Geometry::default()
            },
            ..GameConfig::default()
        };
        GameSession::with_default_animator(config, seed)
    }

    fn pump(game: &mut GameSession, from_ms: u64, to_ms: u64, step_ms: u64) {
        let mut now = from_ms;
        while now <= to_ms {
            game.frame(now);
            now += step_ms;
        }
    }

    #[test]
    fn test_start_spawns_immediately() {
        let mut game = session(1);
        game.press_start(0);

        assert!(game.is_running());
        assert_eq!(game.session().obstacles.len(), 1);
        let events = game.drain_events();
        assert!(events.contains(&GameEvent::SessionStarted));
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::ObstacleSpawned { .. })));
    }

    #[test]
    fn test_press_start_twice_ends_session() {
        let mut game = session(1);
        game.press_start(0);
        game.press_start(5_000);

        assert!(!game.is_running());
        assert_eq!(game.score(), 0);
        assert!(game.session().obstacles.is_empty());
        assert_eq!(game.session().lanes.locked_count(), 0);
        let events = game.drain_events();
        assert!(events.contains(&GameEvent::SessionEnded { time_up: false }));
    }

    #[test]
    fn test_deadline_ends_with_time_up() {
        let mut game = session(2);
        game.press_start(0);
        pump(&mut game, 0, 121_000, 100);

        assert!(!game.is_running());
        let events = game.drain_events();
        assert!(events.contains(&GameEvent::SessionEnded { time_up: true }));
    }

    #[test]
    fn test_press_pipe_toggles_marker() {
        let mut game = session(3);

        // Ignored while idle
        game.press_pipe(0, 0);
        assert_eq!(game.session().markers[0].slot, MarkerSlot::Top);

        game.press_start(0);
        game.press_pipe(0, 10);
        assert_eq!(game.session().markers[0].slot, MarkerSlot::Bottom);
        game.press_pipe(0, 20);
        assert_eq!(game.session().markers[0].slot, MarkerSlot::Top);

        // Out of range pipe is ignored
        game.press_pipe(9, 30);
        let events = game.drain_events();
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::MarkerToggled { .. }))
                .count(),
            2
        );
    }

    #[test]
    fn test_single_lane_run_scores() {
        let mut game = single_lane_session(4);
        game.press_start(0);
        pump(&mut game, 0, 30_000, 16);

        assert!(game.score() > 0, "single-lane run must land hits");
        assert!(!game.session().collected.is_empty());
        let events = game.drain_events();
        assert!(events.iter().any(|e| matches!(e, GameEvent::Hit { .. })));
    }

    #[test]
    fn test_end_keeps_collection_resets_score() {
        let mut game = single_lane_session(5);
        game.press_start(0);
        pump(&mut game, 0, 30_000, 16);
        assert!(game.score() > 0);
        let collected = game.session().collected.len();
        assert!(collected > 0);

        game.press_start(30_016);
        assert_eq!(game.score(), 0);
        assert_eq!(game.session().collected.len(), collected);
        assert_eq!(game.session().lanes.locked_count(), 0);
        assert!(game.session().obstacles.is_empty());
        assert!(game
            .session()
            .markers
            .iter()
            .all(|m| m.slot == MarkerSlot::Top));
    }

    #[test]
    fn test_restart_clears_collection() {
        let mut game = single_lane_session(6);
        game.press_start(0);
        pump(&mut game, 0, 30_000, 16);
        game.press_start(30_016);
        assert!(!game.session().collected.is_empty());

        game.press_start(31_000);
        assert!(game.session().collected.is_empty());
        assert!(game.is_running());
    }

    #[test]
    fn test_active_obstacles_never_exceed_cap() {
        let mut game = session(7);
        game.press_start(0);
        let mut now = 0;
        while now <= 60_000 {
            game.frame(now);
            let params = game.config().difficulty.params_at(now);
            assert!(game.session().active_obstacles() <= params.max_obstacles as usize);
            assert!(game
                .session()
                .obstacles
                .iter()
                .all(|o| o.phase == ObstaclePhase::Animating));
            now += 16;
        }
    }

    #[test]
    fn test_every_obstacle_sits_on_a_locked_lane() {
        let mut game = session(8);
        game.press_start(0);
        let mut now = 0;
        while now <= 20_000 {
            game.frame(now);
            for obstacle in &game.session().obstacles {
                assert!(game.session().lanes.is_locked(obstacle.lane));
            }
            now += 16;
        }
    }

    #[test]
    fn test_same_seed_same_event_stream() {
        let mut a = session(9);
        let mut b = session(9);
        a.press_start(0);
        b.press_start(0);

        let mut now = 0;
        while now <= 10_000 {
            a.frame(now);
            b.frame(now);
            assert_eq!(a.drain_events(), b.drain_events());
            now += 16;
        }
    }

    #[test]
    fn test_countdown_ticks_once_per_second() {
        let mut game = session(10);
        game.press_start(0);
        pump(&mut game, 0, 3_000, 16);

        let countdowns: Vec<_> = game
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::CountdownChanged { .. }))
            .collect();
        // 120s, 119s, 118s, 117s
        assert_eq!(countdowns.len(), 4);
    }

    #[test]
    fn test_remaining_ms_counts_down() {
        let mut game = session(11);
        assert_eq!(game.remaining_ms(0), 0);

        game.press_start(1_000);
        assert_eq!(game.remaining_ms(1_000), 120_000);
        assert_eq!(game.remaining_ms(61_000), 60_000);
        assert_eq!(game.remaining_ms(500_000), 0);
    }
}
