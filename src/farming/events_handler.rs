//! Handlers for cross-domain events: DayEndEvent and the daily report.

use bevy::prelude::*;
use crate::shared::*;
use super::crops::run_overnight;

pub const RAIN_NOTICE: &str = "It's raining! Crops watered.";

// ─────────────────────────────────────────────────────────────────────────────
// Day End
// ─────────────────────────────────────────────────────────────────────────────

/// Overnight farming logic for the day that just ended:
/// 1. Watered crops grow one stage, every crop wakes up dry.
/// 2. Dry crops may wither (only if the rules enable it).
/// 3. Idle tilled soil may revert to untouched ground.
pub fn on_day_end(
    mut day_end_events: EventReader<DayEndEvent>,
    mut grid: ResMut<FarmGrid>,
    rules: Res<FarmRules>,
    mut rng: ResMut<FarmRng>,
) {
    for event in day_end_events.read() {
        let summary = run_overnight(&mut grid, &rules, &mut rng.0);
        info!(
            "[Farming] Night after day {}: {} grown, {} withered, {} plots went fallow",
            event.day,
            summary.grown.len(),
            summary.withered.len(),
            summary.decayed.len()
        );
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rain
// ─────────────────────────────────────────────────────────────────────────────

/// Rain soaks every worked plot that can take water. Returns how many did.
pub fn apply_rain(grid: &mut FarmGrid) -> usize {
    let mut soaked = 0;
    for plot in grid.plots_mut() {
        if plot.soak() {
            soaked += 1;
        }
    }
    soaked
}

/// Whenever the daily report changes to rain, water the farm and fill the can.
/// This includes the very first report of the session.
pub fn react_to_weather(
    report: Res<DailyReport>,
    mut grid: ResMut<FarmGrid>,
    mut ledger: ResMut<Ledger>,
    rules: Res<FarmRules>,
    mut toast_events: EventWriter<ToastEvent>,
) {
    if !report.is_changed() || !report.is_rainy() {
        return;
    }

    let soaked = apply_rain(&mut grid);
    ledger.refill();
    info!("[Farming] Rain watered {} plots and refilled the can", soaked);

    toast_events.send(ToastEvent {
        message: RAIN_NOTICE.to_string(),
        duration_secs: rules.notification_secs,
    });
}
