//! Tool resolution: one click, one tool, one plot.

use bevy::prelude::*;
use crate::shared::*;
use super::{crops, harvest, soil};

pub const TOO_TIRED: &str = "Too tired! Need to sleep.";

/// Money earned by a harvest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropSale {
    pub crop: SeedKind,
    pub price: u32,
}

/// Result of applying a tool. `reason` is the player-facing line, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutcome {
    pub success: bool,
    pub reason: Option<String>,
    pub sale: Option<CropSale>,
}

impl ToolOutcome {
    pub fn applied() -> Self {
        Self {
            success: true,
            ..default()
        }
    }

    pub fn applied_with(reason: impl Into<String>) -> Self {
        Self {
            success: true,
            reason: Some(reason.into()),
            sale: None,
        }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            reason: Some(reason.into()),
            sale: None,
        }
    }

    /// Silent no-op: wrong tool for the plot.
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn with_sale(mut self, sale: CropSale) -> Self {
        self.sale = Some(sale);
        self
    }
}

/// Apply `tool` to `plot`. Either every mutation the tool implies commits,
/// or nothing changes.
pub fn apply_tool(
    tool: ToolKind,
    plot: PlotId,
    grid: &mut FarmGrid,
    ledger: &mut Ledger,
    rules: &FarmRules,
    registry: &CropRegistry,
) -> ToolOutcome {
    if grid.get(plot).is_none() {
        return ToolOutcome::ignored();
    }
    if !ledger.can_act() {
        return ToolOutcome::rejected(TOO_TIRED);
    }

    match tool {
        ToolKind::Hoe => soil::till(grid, ledger, rules, plot),
        ToolKind::WateringCan => soil::water_swing(grid, ledger, rules, plot),
        ToolKind::Seed(seed) => crops::plant(grid, ledger, rules, registry, plot, seed),
        ToolKind::Basket => harvest::harvest(grid, ledger, rules, registry, plot),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Plot clicks
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_plot_clicks(
    mut click_events: EventReader<PlotClickEvent>,
    selected: Res<SelectedTool>,
    sleeping: Res<Sleeping>,
    mut grid: ResMut<FarmGrid>,
    mut ledger: ResMut<Ledger>,
    rules: Res<FarmRules>,
    registry: Res<CropRegistry>,
    mut toast_events: EventWriter<ToastEvent>,
    mut gold_events: EventWriter<GoldChangeEvent>,
    mut harvest_events: EventWriter<CropHarvestedEvent>,
) {
    for event in click_events.read() {
        if sleeping.active {
            debug!("[Farming] Ignoring click on plot {} while asleep", event.plot);
            continue;
        }
        let Some(tool) = selected.0 else {
            continue;
        };

        let money_before = ledger.money;
        let outcome = apply_tool(tool, event.plot, &mut grid, &mut ledger, &rules, &registry);

        if outcome.success {
            info!(
                "[Farming] {:?} on plot {}: energy {}, water {}, money {}",
                tool, event.plot, ledger.energy, ledger.water_level, ledger.money
            );
        }

        let delta = ledger.money as i64 - money_before as i64;
        if delta != 0 {
            let reason = match (tool, outcome.sale) {
                (_, Some(sale)) => format!("sold {:?}", sale.crop),
                (ToolKind::Seed(seed), None) => format!("{:?} seeds", seed),
                _ => format!("{:?}", tool),
            };
            gold_events.send(GoldChangeEvent { amount: delta, reason });
        }

        if let Some(sale) = outcome.sale {
            harvest_events.send(CropHarvestedEvent {
                crop: sale.crop,
                plot: event.plot,
                sell_price: sale.price,
            });
        }

        if let Some(message) = outcome.reason {
            toast_events.send(ToastEvent {
                message,
                duration_secs: rules.notification_secs,
            });
        }
    }
}
