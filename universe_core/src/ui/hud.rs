//! HUD overlay: universe counts, layout, active filter, FPS counter.

use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::data::{FilterState, Resource};
use crate::interaction::UniverseEvent;
use crate::scene::{Catalog, UniverseAccess, UniverseSet};
use crate::ui::{apply_panel_style, ensure_egui, panel_frame};

/// Interaction state mirrored from `UniverseEvent`s for the overlays.
#[derive(Resource, Debug, Default)]
pub struct HudState {
    pub hovered: Option<Resource>,
    pub hover_position: Vec2,
    pub last_clicked: Option<Resource>,
    pub clicks: u64,
}

impl HudState {
    pub fn record(&mut self, event: &UniverseEvent) {
        match event {
            UniverseEvent::Hover {
                resource,
                screen_position,
            } => {
                self.hovered = resource.clone();
                self.hover_position = *screen_position;
            }
            UniverseEvent::Click { resource } => {
                self.last_clicked = Some(resource.clone());
                self.clicks += 1;
            }
        }
    }
}

pub fn hud_plugin(app: &mut App) {
    ensure_egui(app);
    app.add_plugins(FrameTimeDiagnosticsPlugin)
        .add_systems(Update, hud_overlay_system.after(UniverseSet::Camera));
}

pub(crate) fn record_universe_events(
    mut events: EventReader<UniverseEvent>,
    mut hud: ResMut<HudState>,
) {
    for event in events.read() {
        hud.record(event);
    }
}

fn hud_overlay_system(
    mut contexts: EguiContexts,
    hud: Res<HudState>,
    catalog: Res<Catalog>,
    filter: Res<FilterState>,
    access: UniverseAccess,
    diagnostics: Res<DiagnosticsStore>,
) {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|d| d.smoothed())
        .unwrap_or(0.0);

    egui::Window::new("Orrery")
        .anchor(egui::Align2::LEFT_TOP, [10.0, 10.0])
        .resizable(false)
        .collapsible(false)
        .title_bar(false)
        .frame(panel_frame())
        .show(contexts.ctx_mut(), |ui| {
            apply_panel_style(ui);

            ui.label(
                egui::RichText::new(format!("{} resources", access.len()))
                    .size(16.0)
                    .color(egui::Color32::from_rgb(100, 220, 180)),
            );
            ui.add_space(4.0);

            let fraction = visible_fraction(access.visible_count(), access.len());
            ui.add(
                egui::ProgressBar::new(fraction)
                    .text(format!("{} visible", access.visible_count()))
                    .fill(egui::Color32::from_rgb(80, 180, 140)),
            );
            ui.add_space(4.0);

            ui.label(format!(
                "Layout {}  ({} categories)",
                catalog.layout().mode(),
                catalog.layout().clusters().len()
            ));
            ui.label(format!("Filter {}", filter.summary()));
            if let Some(resource) = &hud.last_clicked {
                ui.label(format!("Last click {}", resource.name));
            }
            ui.add_space(4.0);

            ui.separator();
            ui.label(format!("Clicks  {}", hud.clicks));
            ui.label(format!("FPS  {fps:.0}"));
        });
}

fn visible_fraction(visible: usize, total: usize) -> f32 {
    if total == 0 {
        0.0
    } else {
        visible as f32 / total as f32
    }
}
