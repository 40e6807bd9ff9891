//! Calendar domain: the day cycle of the valley.
//!
//! Responsible for:
//! - Accepting sleep requests, one at a time
//! - Sending DayEndEvent so farming can run the overnight pass
//! - Advancing the day counter and restoring energy
//! - Fetching the morning report in the background and publishing it
//!
//! A sleep request sets `Sleeping` synchronously in `begin_night`, so a
//! second request in the same frame (or any later frame before the report
//! lands) is turned away. `Sleeping` clears only once the report is stored.

use bevy::prelude::*;
use bevy::tasks::{block_on, IoTaskPool, Task, TaskPool};

use crate::narrative::{narrate, Narrator};
use crate::shared::*;

/// The morning report being written for the day that just started.
#[derive(Resource, Default)]
pub struct PendingReport(pub Option<Task<DailyReport>>);

impl PendingReport {
    pub fn is_waiting(&self) -> bool {
        self.0.is_some()
    }
}

pub struct CalendarPlugin;

impl Plugin for CalendarPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PendingReport>().add_systems(
            Update,
            (
                begin_night.in_set(FarmSet::Dusk),
                advance_day.in_set(FarmSet::Dawn),
                collect_daily_report.in_set(FarmSet::Morning),
            )
                .run_if(in_state(GameState::Playing)),
        );
    }
}

// ─── Sleep ───────────────────────────────────────────────────────────────────

/// Turns the first sleep request into a DayEndEvent. Extra requests are
/// dropped while the previous night is still in progress.
pub fn begin_night(
    mut sleep_events: EventReader<SleepRequestEvent>,
    mut sleeping: ResMut<Sleeping>,
    ledger: Res<Ledger>,
    mut day_end_events: EventWriter<DayEndEvent>,
) {
    for _ in sleep_events.read() {
        if sleeping.active {
            warn!("[Calendar] Already sleeping; ignoring extra sleep request");
            continue;
        }
        sleeping.active = true;
        info!("[Calendar] Player went to sleep at the end of day {}", ledger.day);
        day_end_events.send(DayEndEvent { day: ledger.day });
    }
}

// ─── Dawn ────────────────────────────────────────────────────────────────────

/// Runs after farming has handled the night. Starts the new day and asks the
/// narrator for its report off the main schedule.
pub fn advance_day(
    mut day_end_events: EventReader<DayEndEvent>,
    mut ledger: ResMut<Ledger>,
    narrator: Res<Narrator>,
    mut pending: ResMut<PendingReport>,
) {
    for event in day_end_events.read() {
        ledger.advance_day();
        ledger.reset_energy_for_new_day();
        info!(
            "[Calendar] Day {} ended. Good morning, day {} (energy {})",
            event.day, ledger.day, ledger.energy
        );

        let narrator = narrator.clone();
        let (day, money) = (ledger.day, ledger.money);
        let pool = IoTaskPool::get_or_init(TaskPool::new);
        pending.0 = Some(pool.spawn(async move { narrate(&narrator, day, money) }));
    }
}

/// Polls the narrator task. When it finishes, the report becomes current and
/// the player wakes up.
pub fn collect_daily_report(
    mut pending: ResMut<PendingReport>,
    mut report: ResMut<DailyReport>,
    mut sleeping: ResMut<Sleeping>,
    rules: Res<FarmRules>,
    mut toast_events: EventWriter<ToastEvent>,
) {
    let Some(task) = pending.0.as_mut() else {
        return;
    };
    let Some(fresh) = block_on(futures_lite::future::poll_once(task)) else {
        return;
    };
    pending.0 = None;

    info!("[Calendar] Morning report: {:?}, \"{}\"", fresh.weather, fresh.message);
    toast_events.send(ToastEvent {
        message: fresh.message.clone(),
        duration_secs: rules.notification_secs,
    });
    *report = fresh;
    sleeping.active = false;
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    fn calendar_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .init_state::<GameState>()
            .init_resource::<Ledger>()
            .init_resource::<FarmRules>()
            .init_resource::<Sleeping>()
            .init_resource::<DailyReport>()
            .init_resource::<Narrator>()
            .add_event::<SleepRequestEvent>()
            .add_event::<DayEndEvent>()
            .add_event::<ToastEvent>()
            .configure_sets(
                Update,
                (FarmSet::Dusk, FarmSet::Dawn, FarmSet::Morning).chain(),
            )
            .add_plugins(CalendarPlugin);
        app.world_mut()
            .resource_mut::<NextState<GameState>>()
            .set(GameState::Playing);
        app.update();
        app
    }

    fn wait_for_morning(app: &mut App) {
        for _ in 0..10_000 {
            app.update();
            if !app.world().resource::<Sleeping>().active {
                return;
            }
            std::thread::yield_now();
        }
        panic!("the night never ended");
    }

    #[test]
    fn sleeping_advances_one_day() {
        let mut app = calendar_app();
        app.world_mut().resource_mut::<Ledger>().energy = 3;
        app.world_mut().send_event(SleepRequestEvent);
        app.update();
        assert_eq!(app.world().resource::<Ledger>().day, 2);

        wait_for_morning(&mut app);
        let ledger = app.world().resource::<Ledger>();
        assert_eq!(ledger.day, 2);
        assert_eq!(ledger.energy, MAX_ENERGY);
        assert_eq!(
            app.world().resource::<DailyReport>().message,
            crate::narrative::RADIO_SILENT
        );
    }

    #[test]
    fn double_sleep_in_one_frame_counts_once() {
        let mut app = calendar_app();
        app.world_mut().send_event(SleepRequestEvent);
        app.world_mut().send_event(SleepRequestEvent);
        app.update();
        wait_for_morning(&mut app);
        assert_eq!(app.world().resource::<Ledger>().day, 2);
        assert!(!app.world().resource::<PendingReport>().is_waiting());
    }
}
