//! Crop planting and overnight growth.

use rand::Rng;

use crate::shared::*;
use super::ToolOutcome;

pub const NOT_ENOUGH_MONEY: &str = "Not enough money!";

// ─────────────────────────────────────────────────────────────────────────────
// Planting
// ─────────────────────────────────────────────────────────────────────────────

/// Sow `seed` into a tilled plot, paying the seed cost up front.
pub fn plant(
    grid: &mut FarmGrid,
    ledger: &mut Ledger,
    rules: &FarmRules,
    registry: &CropRegistry,
    plot: PlotId,
    seed: SeedKind,
) -> ToolOutcome {
    let Some(target) = grid.get_mut(plot) else {
        return ToolOutcome::ignored();
    };
    if !matches!(target.status, PlotStatus::Tilled { .. }) {
        return ToolOutcome::ignored();
    }
    let Some(def) = registry.get(seed) else {
        return ToolOutcome::ignored();
    };
    if !ledger.can_afford(def.seed_cost) {
        return ToolOutcome::rejected(NOT_ENOUGH_MONEY);
    }

    target.status = PlotStatus::Planted(CropTile::sown(seed));
    ledger.spend_money(def.seed_cost);
    ledger.spend_energy(rules.plant_cost);
    ToolOutcome::applied()
}

// ─────────────────────────────────────────────────────────────────────────────
// Overnight pass (called from events_handler::on_day_end)
// ─────────────────────────────────────────────────────────────────────────────

/// What changed on the farm overnight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NightSummary {
    pub grown: Vec<PlotId>,
    pub withered: Vec<PlotId>,
    pub decayed: Vec<PlotId>,
}

/// Advance every planted crop by one night.
///
/// Watered crops gain a growth stage. Dry crops stay put, and wither once the
/// optional dry-night limit is reached. Every crop wakes up unwatered.
pub fn advance_crop_growth(grid: &mut FarmGrid, rules: &FarmRules, summary: &mut NightSummary) {
    for plot in grid.plots_mut() {
        let PlotStatus::Planted(crop) = &mut plot.status else {
            continue;
        };

        if crop.is_withered {
            crop.is_watered = false;
            continue;
        }

        if crop.is_watered {
            crop.growth_stage += 1;
            crop.dry_nights = 0;
            summary.grown.push(plot.id);
        } else {
            crop.dry_nights += 1;
            if let Some(limit) = rules.wither_after_dry_nights {
                if crop.dry_nights >= limit {
                    crop.is_withered = true;
                    summary.withered.push(plot.id);
                }
            }
        }

        crop.is_watered = false;
    }
}

/// Unplanted tilled soil dries out and may revert to untouched ground.
/// One independent draw per tilled plot.
pub fn decay_idle_soil(
    grid: &mut FarmGrid,
    rules: &FarmRules,
    rng: &mut impl Rng,
    summary: &mut NightSummary,
) {
    let chance = rules.soil_decay_chance.clamp(0.0, 1.0);
    for plot in grid.plots_mut() {
        if !matches!(plot.status, PlotStatus::Tilled { .. }) {
            continue;
        }
        if rng.gen_bool(chance) {
            plot.status = PlotStatus::Empty;
            summary.decayed.push(plot.id);
        } else {
            plot.status = PlotStatus::Tilled { watered: false };
        }
    }
}

/// Full overnight farm pass: growth first, then soil decay.
pub fn run_overnight(grid: &mut FarmGrid, rules: &FarmRules, rng: &mut impl Rng) -> NightSummary {
    let mut summary = NightSummary::default();
    advance_crop_growth(grid, rules, &mut summary);
    decay_idle_soil(grid, rules, rng, &mut summary);
    summary
}
