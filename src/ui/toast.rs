use std::time::Duration;

use bevy::prelude::*;
use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// HANDLE TOAST EVENTS: the newest toast replaces the current one
// ═══════════════════════════════════════════════════════════════════════

pub fn handle_toast_events(
    mut events: EventReader<ToastEvent>,
    mut notification: ResMut<Notification>,
) {
    for event in events.read() {
        show_toast(&mut notification, event);
    }
}

pub fn show_toast(notification: &mut Notification, event: &ToastEvent) {
    notification.message = Some(event.message.clone());
    notification.timer = Timer::from_seconds(event.duration_secs.max(0.0), TimerMode::Once);
}

// ═══════════════════════════════════════════════════════════════════════
// UPDATE NOTIFICATION: tick the timer, clear when it runs out
// ═══════════════════════════════════════════════════════════════════════

pub fn update_notification(time: Res<Time>, mut notification: ResMut<Notification>) {
    if notification.message.is_none() {
        return;
    }
    tick_notification(&mut notification, time.delta());
}

pub fn tick_notification(notification: &mut Notification, delta: Duration) {
    notification.timer.tick(delta);
    if notification.timer.finished() {
        notification.message = None;
    }
}
