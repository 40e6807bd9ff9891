//! Farming domain: tilling, watering, planting, crop growth, harvest.
//!
//! Communicates with other domains exclusively through crate::shared events/resources.

use bevy::prelude::*;
use crate::shared::*;

pub mod actions;
pub mod crops;
pub mod events_handler;
pub mod harvest;
pub mod soil;

pub use actions::{apply_tool, CropSale, ToolOutcome};

pub struct FarmingPlugin;

impl Plugin for FarmingPlugin {
    fn build(&self, app: &mut App) {
        app
            // ------------------------------------------------------------------
            // Tool use: player clicks on a plot
            // ------------------------------------------------------------------
            .add_systems(
                Update,
                actions::handle_plot_clicks
                    .in_set(FarmSet::Actions)
                    .run_if(in_state(GameState::Playing)),
            )
            // ------------------------------------------------------------------
            // DayEnd processing: crop growth & overnight logic
            // ------------------------------------------------------------------
            .add_systems(
                Update,
                events_handler::on_day_end
                    .in_set(FarmSet::Night)
                    .run_if(in_state(GameState::Playing)),
            )
            // ------------------------------------------------------------------
            // Weather: rain waters the farm whenever the report turns rainy
            // ------------------------------------------------------------------
            .add_systems(
                Update,
                events_handler::react_to_weather
                    .in_set(FarmSet::Weather)
                    .run_if(in_state(GameState::Playing)),
            );
    }
}
