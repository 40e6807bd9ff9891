use bevy::prelude::*;
use serde::Serialize;
use std::collections::HashMap;

use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// HARVEST STATS: tracks crop harvest counts and revenue
// ═══════════════════════════════════════════════════════════════════════

/// Accumulated statistics about crop harvests.
/// Value = (total_harvested_count, total_revenue_gold).
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HarvestStats {
    pub crops: HashMap<SeedKind, (u32, u32)>,
}

impl HarvestStats {
    pub fn harvested(&self, crop: SeedKind) -> u32 {
        self.crops.get(&crop).map_or(0, |(count, _)| *count)
    }

    pub fn revenue(&self, crop: SeedKind) -> u32 {
        self.crops.get(&crop).map_or(0, |(_, gold)| *gold)
    }
}

/// Reads `CropHarvestedEvent` and updates `HarvestStats`.
pub fn track_crop_harvests(
    mut events: EventReader<CropHarvestedEvent>,
    mut stats: ResMut<HarvestStats>,
) {
    for ev in events.read() {
        let entry = stats.crops.entry(ev.crop).or_insert((0, 0));
        entry.0 = entry.0.saturating_add(1);
        entry.1 = entry.1.saturating_add(ev.sell_price);
        info!(
            "[Economy/Stats] Harvested {:?} from plot {} for {}g ({} total)",
            ev.crop, ev.plot, ev.sell_price, entry.0
        );
    }
}
