//! Harvest: collect mature crops, clear dead ones.

use crate::shared::*;
use super::{CropSale, ToolOutcome};

pub const CLEARED_DEAD_CROP: &str = "Cleared dead crop.";

/// Use the basket on `plot`.
///
/// Withered crops are cleared for a flat energy cost. Mature crops are sold on
/// the spot. Anything still growing is left alone.
pub fn harvest(
    grid: &mut FarmGrid,
    ledger: &mut Ledger,
    rules: &FarmRules,
    registry: &CropRegistry,
    plot: PlotId,
) -> ToolOutcome {
    let Some(target) = grid.get_mut(plot) else {
        return ToolOutcome::ignored();
    };
    let Some(crop) = target.crop() else {
        return ToolOutcome::ignored();
    };
    let (seed, stage, withered) = (crop.crop, crop.growth_stage, crop.is_withered);

    if withered {
        target.status = PlotStatus::Tilled { watered: false };
        ledger.spend_energy(rules.clear_cost);
        return ToolOutcome::applied_with(CLEARED_DEAD_CROP);
    }

    let Some(def) = registry.get(seed) else {
        return ToolOutcome::ignored();
    };
    if stage < def.growth_days {
        return ToolOutcome::ignored(); // Not ready.
    }

    ledger.earn_money(def.sell_price);
    target.status = PlotStatus::Tilled { watered: false };
    ledger.spend_energy(rules.harvest_cost);

    ToolOutcome::applied_with(format!("Sold {} for {}!", def.name, def.sell_price)).with_sale(
        CropSale {
            crop: seed,
            price: def.sell_price,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::crops::default_registry;

    fn planted(stage: u32, withered: bool) -> PlotStatus {
        let mut crop = CropTile::sown(SeedKind::Carrot);
        crop.growth_stage = stage;
        crop.is_withered = withered;
        PlotStatus::Planted(crop)
    }

    fn setup(status: PlotStatus) -> (FarmGrid, Ledger, FarmRules, CropRegistry) {
        let rules = FarmRules::default();
        let mut grid = FarmGrid::default();
        grid.get_mut(9).unwrap().status = status;
        (grid, Ledger::new(&rules), rules, default_registry())
    }

    #[test]
    fn mature_crop_sells() {
        let (mut grid, mut ledger, rules, registry) = setup(planted(3, false));
        let outcome = harvest(&mut grid, &mut ledger, &rules, &registry, 9);

        assert!(outcome.success);
        assert_eq!(outcome.reason.as_deref(), Some("Sold Carrot for 25!"));
        assert_eq!(outcome.sale, Some(CropSale { crop: SeedKind::Carrot, price: 25 }));
        assert_eq!(ledger.money, INITIAL_MONEY + 25);
        assert_eq!(ledger.energy, 50 - HARVEST_COST);
        assert_eq!(grid.get(9).unwrap().status, PlotStatus::Tilled { watered: false });
    }

    #[test]
    fn overgrown_crop_still_sells() {
        let (mut grid, mut ledger, rules, registry) = setup(planted(7, false));
        assert!(harvest(&mut grid, &mut ledger, &rules, &registry, 9).success);
        assert_eq!(ledger.money, INITIAL_MONEY + 25);
    }

    #[test]
    fn growing_crop_is_untouched() {
        let (mut grid, mut ledger, rules, registry) = setup(planted(2, false));
        let before = (grid.clone(), ledger.clone());
        let outcome = harvest(&mut grid, &mut ledger, &rules, &registry, 9);
        assert_eq!(outcome, ToolOutcome::ignored());
        assert_eq!((grid, ledger), before);
    }

    #[test]
    fn withered_crop_is_cleared_for_one_energy() {
        for stage in [0, 3, 10] {
            let (mut grid, mut ledger, rules, registry) = setup(planted(stage, true));
            let outcome = harvest(&mut grid, &mut ledger, &rules, &registry, 9);
            assert_eq!(outcome.reason.as_deref(), Some(CLEARED_DEAD_CROP));
            assert_eq!(outcome.sale, None);
            assert_eq!(ledger.energy, 50 - CLEAR_COST);
            assert_eq!(ledger.money, INITIAL_MONEY);
            assert_eq!(grid.get(9).unwrap().status, PlotStatus::Tilled { watered: false });
        }
    }

    #[test]
    fn basket_on_bare_soil_does_nothing() {
        let (mut grid, mut ledger, rules, registry) =
            setup(PlotStatus::Tilled { watered: false });
        let outcome = harvest(&mut grid, &mut ledger, &rules, &registry, 9);
        assert_eq!(outcome, ToolOutcome::ignored());
        assert_eq!(ledger.energy, 50);
    }
}
