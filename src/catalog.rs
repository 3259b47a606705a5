//! The fixed catalog of collectible kinds
//!
//! Obstacle identity is an index into this table. The display name next to
//! each emoji is what the presentation layer shows in collection summaries.

use serde::{Deserialize, Serialize};

/// One collectible kind
#[derive(Debug, Clone, Copy)]
pub struct Collectible {
    pub emoji: &'static str,
    pub name: &'static str,
}

/// Stable identity token for a collectible kind (index into [`CATALOG`])
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CollectibleId(pub usize);

impl CollectibleId {
    pub fn emoji(&self) -> &'static str {
        CATALOG[self.0].emoji
    }

    pub fn name(&self) -> &'static str {
        CATALOG[self.0].name
    }
}

/// Every collectible kind an obstacle can carry
pub const CATALOG: &[Collectible] = &[
    // Places & landmarks
    Collectible { emoji: "🗺️", name: "Treasure Map" },
    Collectible { emoji: "🧭", name: "Compass" },
    Collectible { emoji: "⛺", name: "Camp Site" },
    Collectible { emoji: "🏰", name: "Castle" },
    Collectible { emoji: "🗿", name: "Ancient Monument" },
    Collectible { emoji: "🎪", name: "Circus" },
    Collectible { emoji: "🎡", name: "Fair" },
    Collectible { emoji: "🎢", name: "Adventure Park" },
    Collectible { emoji: "🏛️", name: "Ancient Ruins" },
    Collectible { emoji: "⛩️", name: "Sacred Shrine" },
    Collectible { emoji: "🕌", name: "Grand Mosque" },
    Collectible { emoji: "⛪", name: "Old Church" },
    Collectible { emoji: "🏯", name: "Palace" },
    Collectible { emoji: "🏭", name: "Steam Factory" },
    // Nature & weather
    Collectible { emoji: "🌋", name: "Volcano" },
    Collectible { emoji: "🏔️", name: "Mountain Peak" },
    Collectible { emoji: "🏝️", name: "Desert Island" },
    Collectible { emoji: "🌅", name: "Sunset Beach" },
    Collectible { emoji: "🌠", name: "Stargazing" },
    Collectible { emoji: "🌄", name: "Mountain Sunrise" },
    Collectible { emoji: "🏞️", name: "National Park" },
    Collectible { emoji: "🌈", name: "Rainbow Valley" },
    Collectible { emoji: "🌊", name: "Ocean Waves" },
    Collectible { emoji: "❄️", name: "Snow Peak" },
    Collectible { emoji: "🌺", name: "Flower Garden" },
    Collectible { emoji: "🌴", name: "Palm Beach" },
    Collectible { emoji: "🍄", name: "Mystic Forest" },
    Collectible { emoji: "🌵", name: "Desert Trail" },
    // Transport & movement
    Collectible { emoji: "🚂", name: "Steam Train" },
    Collectible { emoji: "🚤", name: "Speed Boat" },
    Collectible { emoji: "✈️", name: "Sky Journey" },
    Collectible { emoji: "🎈", name: "Balloon Ride" },
    Collectible { emoji: "🛸", name: "Space Travel" },
    Collectible { emoji: "🚁", name: "Helicopter Tour" },
    Collectible { emoji: "⛵", name: "Sailing Trip" },
    // Wildlife
    Collectible { emoji: "🦁", name: "Lion Safari" },
    Collectible { emoji: "🐘", name: "Elephant Trek" },
    Collectible { emoji: "🦒", name: "Giraffe Watch" },
    Collectible { emoji: "🦜", name: "Exotic Birds" },
    Collectible { emoji: "🐠", name: "Ocean Diving" },
    Collectible { emoji: "🦋", name: "Butterfly Garden" },
    Collectible { emoji: "🐪", name: "Desert Caravan" },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_size() {
        assert_eq!(CATALOG.len(), 42);
    }

    #[test]
    fn test_catalog_entries_unique() {
        let emojis: HashSet<_> = CATALOG.iter().map(|c| c.emoji).collect();
        let names: HashSet<_> = CATALOG.iter().map(|c| c.name).collect();
        assert_eq!(emojis.len(), CATALOG.len());
        assert_eq!(names.len(), CATALOG.len());
    }

    #[test]
    fn test_id_lookup() {
        let id = CollectibleId(1);
        assert_eq!(id.emoji(), "🧭");
        assert_eq!(id.name(), "Compass");
    }
}
