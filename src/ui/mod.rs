pub mod hud;
pub mod toast;

use bevy::prelude::*;
use crate::shared::*;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        // ─── TOASTS: not gated on GameState ───
        app.add_systems(
            Update,
            (toast::handle_toast_events, toast::update_notification)
                .chain()
                .in_set(FarmSet::Feedback),
        );
    }
}
