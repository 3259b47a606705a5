//! Headless demo: runs one full session with a naive auto-player and prints
//! the HUD lines a real frontend would render.

use std::time::{SystemTime, UNIX_EPOCH};

use lane_catch::sim::{Direction, GameEvent, LaneId, MarkerSlot, ObstaclePhase};
use lane_catch::{GameConfig, GameSession, hud};

const FRAME_MS: u64 = 16;

fn main() {
    env_logger::init();

    let config = GameConfig::default();
    if let Err(err) = config.validate() {
        log::error!("invalid configuration: {err}");
        std::process::exit(1);
    }

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let duration_ms = config.session_duration_ms;
    let lane_count = config.geometry.lane_count;
    let mut game = GameSession::with_default_animator(config, seed);

    println!("{}", hud::start_label(false, false));
    game.press_start(0);

    let mut now = 0;
    while now <= duration_ms + FRAME_MS {
        game.frame(now);
        auto_play(&mut game, lane_count, now);

        for event in game.drain_events() {
            match event {
                GameEvent::CountdownChanged { remaining_ms } => {
                    if remaining_ms % 10_000 < 1000 {
                        println!("{}  {}", hud::format_countdown(remaining_ms),
                            hud::format_score(game.score()));
                    }
                }
                GameEvent::Hit { kind, pipe, newly_collected, .. } => {
                    if newly_collected {
                        println!("pipe {pipe} caught a new one: {} {}", kind.emoji(), kind.name());
                    }
                }
                GameEvent::SessionEnded { time_up } => {
                    println!("{}", hud::start_label(false, time_up));
                }
                _ => {}
            }
        }
        now += FRAME_MS;
    }

    println!("{}", hud::format_collection(game.collection_summary()));
}

/// Move each marker toward the nearest incoming obstacle on its side. Top
/// row is lane 0, bottom row the last lane; anything in between is ignored.
fn auto_play(game: &mut GameSession, lane_count: usize, now_ms: u64) {
    if !game.is_running() {
        return;
    }
    for pipe in 0..2 {
        let guarded_direction = if pipe == 0 {
            Direction::Leftward
        } else {
            Direction::Rightward
        };
        let wanted = game
            .session()
            .obstacles
            .iter()
            .filter(|o| o.phase == ObstaclePhase::Animating && o.direction == guarded_direction)
            .find_map(|o| {
                if o.lane == LaneId(0) {
                    Some(MarkerSlot::Top)
                } else if o.lane == LaneId(lane_count - 1) {
                    Some(MarkerSlot::Bottom)
                } else {
                    None
                }
            });
        if let Some(slot) = wanted {
            if game.session().markers[pipe].slot != slot {
                game.press_pipe(pipe, now_ms);
            }
        }
    }
}
