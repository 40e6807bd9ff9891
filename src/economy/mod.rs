//! Economy domain: the well, gold bookkeeping, harvest statistics.
//!
//! All cross-domain communication goes through `crate::shared::*` events and resources.
//! No other domain module is imported here.

use bevy::prelude::*;
use crate::shared::*;

pub mod gold;
pub mod stats;

use gold::{track_gold_changes, EconomyStats};
use stats::{track_crop_harvests, HarvestStats};

pub const CAN_REFILLED: &str = "Watering can refilled!";

// ─────────────────────────────────────────────────────────────────────────────
// Plugin
// ─────────────────────────────────────────────────────────────────────────────

pub struct EconomyPlugin;

impl Plugin for EconomyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EconomyStats>()
            .init_resource::<HarvestStats>();

        // The well stays open while the player sleeps.
        app.add_systems(
            Update,
            handle_refill_water
                .in_set(FarmSet::Actions)
                .run_if(in_state(GameState::Playing)),
        );

        app.add_systems(
            Update,
            (track_gold_changes, track_crop_harvests)
                .in_set(FarmSet::Feedback)
                .run_if(in_state(GameState::Playing)),
        );
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Well
// ─────────────────────────────────────────────────────────────────────────────

/// Fills the watering can to capacity. Free, and allowed at any time.
pub fn handle_refill_water(
    mut refill_events: EventReader<RefillWaterEvent>,
    mut ledger: ResMut<Ledger>,
    rules: Res<FarmRules>,
    mut toast_events: EventWriter<ToastEvent>,
) {
    for _ in refill_events.read() {
        ledger.refill();
        info!("[Economy] Watering can refilled to {}", ledger.water_level);
        toast_events.send(ToastEvent {
            message: CAN_REFILLED.to_string(),
            duration_secs: rules.notification_secs,
        });
    }
}
