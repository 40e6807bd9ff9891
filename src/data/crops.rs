use crate::shared::*;

/// Populate the CropRegistry with every seed sold at the valley store.
///
///   Carrot:  cheap and quick, 3 watered nights
///   Corn:    mid-tier, 5 watered nights
///   Pumpkin: expensive, 8 watered nights, best margin
pub fn populate_crops(registry: &mut CropRegistry) {
    let crops: Vec<CropDef> = vec![
        CropDef {
            seed: SeedKind::Carrot,
            name: "Carrot".into(),
            seed_cost: 10,
            sell_price: 25,
            growth_days: 3,
            crop_glyph: '🥕',
            seed_glyph: '🌰',
        },
        CropDef {
            seed: SeedKind::Corn,
            name: "Corn".into(),
            seed_cost: 20,
            sell_price: 55,
            growth_days: 5,
            crop_glyph: '🌽',
            seed_glyph: '🌽',
        },
        CropDef {
            seed: SeedKind::Pumpkin,
            name: "Pumpkin".into(),
            seed_cost: 50,
            sell_price: 150,
            growth_days: 8,
            crop_glyph: '🎃',
            seed_glyph: '🎃',
        },
    ];

    for crop in crops {
        registry.crops.insert(crop.seed, crop);
    }
}

/// Registry pre-filled with the catalog, for callers outside the ECS.
pub fn default_registry() -> CropRegistry {
    let mut registry = CropRegistry::default();
    populate_crops(&mut registry);
    registry
}
