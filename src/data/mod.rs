//! Data layer: populates the crop catalog at startup and loads farm rules.
//!
//! This plugin runs in OnEnter(GameState::Loading), fills the CropRegistry
//! from the hard-coded catalog in `crops`, then transitions the game into
//! GameState::Playing.
//!
//! No other domain needs to seed the catalog. All domain plugins can
//! safely read it once GameState has advanced past Loading.

pub mod crops;
pub mod rules;

use bevy::prelude::*;
use crate::shared::*;

pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Loading), load_all_data);
    }
}

fn load_all_data(
    mut crop_registry: ResMut<CropRegistry>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    info!("DataPlugin: populating registries…");

    crops::populate_crops(&mut crop_registry);
    info!("  Crops loaded: {}", crop_registry.crops.len());

    info!("DataPlugin: catalog ready. Transitioning to Playing.");
    next_state.set(GameState::Playing);
}
