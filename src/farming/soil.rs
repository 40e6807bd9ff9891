//! Soil tilling and watering.

use crate::shared::*;
use super::ToolOutcome;

pub const CAN_EMPTY: &str = "Watering can is empty! Refill at the well.";

// ─────────────────────────────────────────────────────────────────────────────
// Hoe: till untouched ground
// ─────────────────────────────────────────────────────────────────────────────

/// Hoe can only till Empty ground. Worked or planted plots are left alone.
pub fn till(
    grid: &mut FarmGrid,
    ledger: &mut Ledger,
    rules: &FarmRules,
    plot: PlotId,
) -> ToolOutcome {
    let Some(target) = grid.get_mut(plot) else {
        return ToolOutcome::ignored();
    };
    if !target.is_empty() {
        return ToolOutcome::ignored();
    }

    target.status = PlotStatus::Tilled { watered: false };
    ledger.spend_energy(rules.till_cost);
    ToolOutcome::applied()
}

// ─────────────────────────────────────────────────────────────────────────────
// Watering Can: one swing covers the plot and its row neighbours
// ─────────────────────────────────────────────────────────────────────────────

/// Swing the can at `plot`. Candidates are visited target, left, right; each
/// dry, worked plot takes one unit while the can still holds water.
///
/// A swing that wets nothing costs nothing. Otherwise the energy cost is flat
/// no matter how many plots were reached.
pub fn water_swing(
    grid: &mut FarmGrid,
    ledger: &mut Ledger,
    rules: &FarmRules,
    plot: PlotId,
) -> ToolOutcome {
    if ledger.water_level == 0 {
        return ToolOutcome::rejected(CAN_EMPTY);
    }

    // Decide the whole swing before touching anything.
    let mut to_soak: Vec<PlotId> = Vec::new();
    for id in grid.swing_targets(plot) {
        let remaining = ledger.water_level - to_soak.len() as u32;
        if remaining == 0 {
            break;
        }
        if grid.get(id).is_some_and(Plot::accepts_water) {
            to_soak.push(id);
        }
    }

    if to_soak.is_empty() {
        return ToolOutcome::ignored();
    }

    for &id in &to_soak {
        if let Some(target) = grid.get_mut(id) {
            target.soak();
        }
    }
    ledger.consume_water(to_soak.len() as u32);
    ledger.spend_energy(rules.water_cost);
    ToolOutcome::applied()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (FarmGrid, Ledger, FarmRules) {
        let rules = FarmRules::default();
        (FarmGrid::default(), Ledger::new(&rules), rules)
    }

    fn set(grid: &mut FarmGrid, id: PlotId, status: PlotStatus) {
        grid.get_mut(id).unwrap().status = status;
    }

    #[test]
    fn till_empty_plot() {
        let (mut grid, mut ledger, rules) = setup();
        let outcome = till(&mut grid, &mut ledger, &rules, 7);
        assert!(outcome.success);
        assert_eq!(grid.get(7).unwrap().status, PlotStatus::Tilled { watered: false });
        assert_eq!(ledger.energy, 50 - TILL_COST);
    }

    #[test]
    fn till_worked_plot_is_noop() {
        let (mut grid, mut ledger, rules) = setup();
        set(&mut grid, 3, PlotStatus::Planted(CropTile::sown(SeedKind::Corn)));
        let before = (grid.clone(), ledger.clone());

        let outcome = till(&mut grid, &mut ledger, &rules, 3);
        assert_eq!(outcome, ToolOutcome::ignored());
        assert_eq!((grid, ledger), before);
    }

    #[test]
    fn swing_waters_only_dry_worked_plots() {
        // Row segment [Empty, Tilled, Planted(already watered)], aim at the middle.
        let (mut grid, mut ledger, rules) = setup();
        set(&mut grid, 6, PlotStatus::Tilled { watered: false });
        let mut wet = CropTile::sown(SeedKind::Carrot);
        wet.is_watered = true;
        set(&mut grid, 7, PlotStatus::Planted(wet.clone()));
        ledger.water_level = 1;

        let outcome = water_swing(&mut grid, &mut ledger, &rules, 6);
        assert!(outcome.success);
        assert_eq!(ledger.water_level, 0);
        assert_eq!(ledger.energy, 50 - WATER_COST);
        assert_eq!(grid.get(6).unwrap().status, PlotStatus::Tilled { watered: true });
        assert_eq!(grid.get(5).unwrap().status, PlotStatus::Empty);
        assert_eq!(grid.get(7).unwrap().status, PlotStatus::Planted(wet));
    }

    #[test]
    fn swing_is_flat_cost_for_three_plots() {
        let (mut grid, mut ledger, rules) = setup();
        for id in 11..=13 {
            set(&mut grid, id, PlotStatus::Tilled { watered: false });
        }
        water_swing(&mut grid, &mut ledger, &rules, 12);
        assert_eq!(ledger.water_level, MAX_WATER_CAPACITY - 3);
        assert_eq!(ledger.energy, 50 - WATER_COST);
        assert!((11..=13).all(|id| grid.get(id).unwrap().is_watered()));
    }

    #[test]
    fn swing_stops_when_can_runs_dry() {
        let (mut grid, mut ledger, rules) = setup();
        for id in 11..=13 {
            set(&mut grid, id, PlotStatus::Tilled { watered: false });
        }
        ledger.water_level = 2;
        water_swing(&mut grid, &mut ledger, &rules, 12);
        assert_eq!(ledger.water_level, 0);
        // Order is target, left, right: the right neighbour misses out.
        assert!(grid.get(12).unwrap().is_watered());
        assert!(grid.get(11).unwrap().is_watered());
        assert!(!grid.get(13).unwrap().is_watered());
    }

    #[test]
    fn swing_never_wraps_rows() {
        let (mut grid, mut ledger, rules) = setup();
        set(&mut grid, 4, PlotStatus::Tilled { watered: false });
        set(&mut grid, 5, PlotStatus::Tilled { watered: false });
        water_swing(&mut grid, &mut ledger, &rules, 5);
        assert!(grid.get(5).unwrap().is_watered());
        assert!(!grid.get(4).unwrap().is_watered());
        assert_eq!(ledger.water_level, MAX_WATER_CAPACITY - 1);
    }

    #[test]
    fn swing_over_nothing_is_free() {
        let (mut grid, mut ledger, rules) = setup();
        let outcome = water_swing(&mut grid, &mut ledger, &rules, 12);
        assert_eq!(outcome, ToolOutcome::ignored());
        assert_eq!(ledger.water_level, MAX_WATER_CAPACITY);
        assert_eq!(ledger.energy, 50);
    }

    #[test]
    fn empty_can_rejects() {
        let (mut grid, mut ledger, rules) = setup();
        set(&mut grid, 0, PlotStatus::Tilled { watered: false });
        ledger.water_level = 0;
        let outcome = water_swing(&mut grid, &mut ledger, &rules, 0);
        assert!(!outcome.success);
        assert_eq!(outcome.reason.as_deref(), Some(CAN_EMPTY));
        assert!(!grid.get(0).unwrap().is_watered());
        assert_eq!(ledger.energy, 50);
    }

    #[test]
    fn withered_crops_refuse_water() {
        let (mut grid, mut ledger, rules) = setup();
        let mut dead = CropTile::sown(SeedKind::Carrot);
        dead.is_withered = true;
        set(&mut grid, 0, PlotStatus::Planted(dead));
        let outcome = water_swing(&mut grid, &mut ledger, &rules, 0);
        assert_eq!(outcome, ToolOutcome::ignored());
        assert_eq!(ledger.water_level, MAX_WATER_CAPACITY);
    }
}
