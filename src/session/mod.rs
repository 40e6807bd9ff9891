//! Session domain: wires every plugin into one farm and exposes its state.
//!
//! Insert a `FarmRules` (and optionally a `Narrator` or an opening
//! `DailyReport`) before adding `ValleyPlugin` to override the defaults.

use bevy::prelude::*;

use crate::calendar::CalendarPlugin;
use crate::data::DataPlugin;
use crate::economy::gold::EconomyStats;
use crate::economy::stats::HarvestStats;
use crate::economy::EconomyPlugin;
use crate::farming::FarmingPlugin;
use crate::input::InputPlugin;
use crate::narrative::Narrator;
use crate::shared::*;
use crate::ui::UiPlugin;

pub struct ValleyPlugin;

impl Plugin for ValleyPlugin {
    fn build(&self, app: &mut App) {
        let rules = app
            .world()
            .get_resource::<FarmRules>()
            .cloned()
            .unwrap_or_default();
        info!(
            "[Session] New farm: {} coins, {} energy, {} water",
            rules.initial_money, rules.max_energy, rules.max_water
        );

        // Game state
        app.init_state::<GameState>();

        // Shared resources
        app.insert_resource(FarmGrid::default())
            .insert_resource(Ledger::new(&rules))
            .insert_resource(FarmRng::from_rules(&rules))
            .insert_resource(rules)
            .init_resource::<CropRegistry>()
            .init_resource::<DailyReport>()
            .init_resource::<SelectedTool>()
            .init_resource::<Sleeping>()
            .init_resource::<Notification>()
            .init_resource::<Narrator>();

        // Events
        app.add_event::<SelectToolEvent>()
            .add_event::<PlotClickEvent>()
            .add_event::<RefillWaterEvent>()
            .add_event::<SleepRequestEvent>()
            .add_event::<DayEndEvent>()
            .add_event::<ResetSessionEvent>()
            .add_event::<GoldChangeEvent>()
            .add_event::<CropHarvestedEvent>()
            .add_event::<ToastEvent>();

        app.configure_sets(
            Update,
            (
                FarmSet::Input,
                FarmSet::Actions,
                FarmSet::Dusk,
                FarmSet::Night,
                FarmSet::Dawn,
                FarmSet::Morning,
                FarmSet::Weather,
                FarmSet::Feedback,
            )
                .chain(),
        );

        app.add_plugins((
            DataPlugin,
            InputPlugin,
            FarmingPlugin,
            EconomyPlugin,
            CalendarPlugin,
            UiPlugin,
        ));

        app.add_systems(
            Update,
            reset_session
                .in_set(FarmSet::Input)
                .run_if(in_state(GameState::Playing)),
        );
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Observable state
// ─────────────────────────────────────────────────────────────────────────────

impl FarmSnapshot {
    pub fn capture(
        grid: &FarmGrid,
        ledger: &Ledger,
        selected: &SelectedTool,
        report: &DailyReport,
        sleeping: &Sleeping,
        notification: &Notification,
    ) -> Self {
        Self {
            plots: grid.plots().to_vec(),
            money: ledger.money,
            energy: ledger.energy,
            display_energy: ledger.display_energy(),
            max_energy: ledger.max_energy,
            water_level: ledger.water_level,
            max_water: ledger.max_water,
            day: ledger.day,
            selected_tool: selected.0,
            report: report.clone(),
            sleeping: sleeping.active,
            notification: notification.message.clone(),
        }
    }
}

/// Copy of everything the UI may show. `None` before `ValleyPlugin` is added.
pub fn snapshot(world: &World) -> Option<FarmSnapshot> {
    Some(FarmSnapshot::capture(
        world.get_resource::<FarmGrid>()?,
        world.get_resource::<Ledger>()?,
        world.get_resource::<SelectedTool>()?,
        world.get_resource::<DailyReport>()?,
        world.get_resource::<Sleeping>()?,
        world.get_resource::<Notification>()?,
    ))
}

/// True while a day advance is waiting on its morning report.
pub fn is_sleeping(world: &World) -> bool {
    world
        .get_resource::<Sleeping>()
        .is_some_and(|sleeping| sleeping.active)
}

// ─────────────────────────────────────────────────────────────────────────────
// Reset
// ─────────────────────────────────────────────────────────────────────────────

fn reset_session(
    mut reset_events: EventReader<ResetSessionEvent>,
    sleeping: Res<Sleeping>,
    rules: Res<FarmRules>,
    mut grid: ResMut<FarmGrid>,
    mut ledger: ResMut<Ledger>,
    mut rng: ResMut<FarmRng>,
    mut selected: ResMut<SelectedTool>,
    mut report: ResMut<DailyReport>,
    mut notification: ResMut<Notification>,
    mut economy: ResMut<EconomyStats>,
    mut harvests: ResMut<HarvestStats>,
) {
    for _ in reset_events.read() {
        if sleeping.active {
            warn!("[Session] Can't reset while the night is in progress");
            continue;
        }
        *grid = FarmGrid::default();
        *ledger = Ledger::new(&rules);
        *rng = FarmRng::from_rules(&rules);
        *selected = SelectedTool::default();
        *report = DailyReport::welcome();
        *notification = Notification::default();
        *economy = EconomyStats::default();
        *harvests = HarvestStats::default();
        info!("[Session] Farm reset to day {}", ledger.day);
    }
}
