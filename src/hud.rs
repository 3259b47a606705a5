//! HUD text formatting
//!
//! Pure string builders for the score line, the countdown clock, the
//! collection status, and the start button label. Kept apart from the sim so
//! embedders can render state their own way and tests can assert on exact
//! output.

use crate::sim::CollectionSummary;

/// `⏱️ m:ss`, truncating toward zero
pub fn format_countdown(remaining_ms: u64) -> String {
    let total_secs = remaining_ms / 1000;
    format!("⏱️ {}:{:02}", total_secs / 60, total_secs % 60)
}

pub fn format_score(score: u32) -> String {
    format!("🧭 Adventures: {score}")
}

/// Collection status in three tiers: nothing yet, partial progress with a
/// remaining count, or the full-catalog congratulation
pub fn format_collection(summary: CollectionSummary) -> String {
    match summary {
        CollectionSummary::Empty => "No adventures yet! 💎".to_string(),
        CollectionSummary::Partial {
            collected,
            remaining,
        } => format!(
            "💎 {collected} different adventures collected! 🗺️\n🔍 {remaining} more to discover! ✨"
        ),
        CollectionSummary::Complete { .. } => {
            "🎉 Congratulations! You've collected all adventures! You're a true explorer! 🌟"
                .to_string()
        }
    }
}

/// Label for the start/reset control. `time_up` only matters when idle: it
/// distinguishes "never started / manually reset" from "clock ran out".
pub fn start_label(running: bool, time_up: bool) -> &'static str {
    if running {
        "🔄 Reset Game"
    } else if time_up {
        "🏁 Game Over! Play Again?"
    } else {
        "🎮 Start Game"
    }
}
