mod hud;
mod inspector;
mod labels;

use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPlugin};

use crate::scene::{PointerOverUi, UniverseSet};

pub use hud::{hud_plugin, HudState};
pub use inspector::inspector_plugin;
pub use labels::{category_label_plugin, LabelSettings};

/// Shared by every UI plugin, added once: egui itself, pointer capture for
/// the interaction systems, and the event-fed `HudState`.
fn ensure_egui(app: &mut App) {
    if !app.is_plugin_added::<EguiPlugin>() {
        app.add_plugins(EguiPlugin);
    }
    if app.world().contains_resource::<HudState>() {
        return;
    }
    app.init_resource::<HudState>()
        .add_systems(Update, capture_ui_pointer.in_set(UniverseSet::Ui))
        .add_systems(
            Update,
            hud::record_universe_events.after(UniverseSet::Camera),
        );
}

fn capture_ui_pointer(mut contexts: EguiContexts, mut over_ui: ResMut<PointerOverUi>) {
    let ctx = contexts.ctx_mut();
    let captured = ctx.is_pointer_over_area() || ctx.wants_pointer_input();
    if over_ui.0 != captured {
        over_ui.0 = captured;
    }
}

fn panel_frame() -> bevy_egui::egui::Frame {
    use bevy_egui::egui;
    egui::Frame::default()
        .fill(egui::Color32::from_rgba_premultiplied(15, 15, 25, 210))
        .inner_margin(egui::Margin::same(12))
        .corner_radius(egui::CornerRadius::same(6))
}

fn apply_panel_style(ui: &mut bevy_egui::egui::Ui) {
    use bevy_egui::egui;
    ui.style_mut().override_text_style = Some(egui::TextStyle::Monospace);
    ui.visuals_mut().override_text_color = Some(egui::Color32::from_rgb(200, 220, 240));
}
