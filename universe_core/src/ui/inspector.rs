//! Resource inspector: tooltip for the hovered resource and a side panel
//! for the last clicked one.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::data::Resource;
use crate::scene::UniverseSet;
use crate::ui::{apply_panel_style, ensure_egui, panel_frame, HudState};

const TOOLTIP_OFFSET: egui::Vec2 = egui::vec2(16.0, 16.0);

pub fn inspector_plugin(app: &mut App) {
    ensure_egui(app);
    app.add_systems(
        Update,
        (hover_tooltip_system, inspector_panel_system, dismiss_selection_system)
            .after(UniverseSet::Camera),
    );
}

fn hover_tooltip_system(mut contexts: EguiContexts, hud: Res<HudState>) {
    let Some(resource) = &hud.hovered else {
        return;
    };
    if !hud.hover_position.is_finite() {
        return;
    }
    let anchor = egui::pos2(hud.hover_position.x, hud.hover_position.y) + TOOLTIP_OFFSET;

    egui::Area::new(egui::Id::new("orrery_hover"))
        .fixed_pos(anchor)
        .order(egui::Order::Tooltip)
        .interactable(false)
        .show(contexts.ctx_mut(), |ui| {
            panel_frame().show(ui, |ui| {
                apply_panel_style(ui);
                ui.label(
                    egui::RichText::new(&resource.name)
                        .size(14.0)
                        .color(egui::Color32::from_rgb(100, 220, 180)),
                );
                ui.label(category_line(resource));
                ui.label(format!("Score {:.1}", resource.clamped_score()));
                if let Some(description) = &resource.description {
                    ui.add_space(2.0);
                    ui.label(egui::RichText::new(description).size(11.0));
                }
            });
        });
}

fn inspector_panel_system(mut contexts: EguiContexts, hud: Res<HudState>) {
    let Some(resource) = &hud.last_clicked else {
        return;
    };

    egui::SidePanel::right("inspector")
        .default_width(260.0)
        .frame(panel_frame())
        .show(contexts.ctx_mut(), |ui| {
            apply_panel_style(ui);
            ui.heading(&resource.name);
            ui.add_space(4.0);
            ui.label(category_line(resource));
            ui.label(format!("Id     {}", resource.id));
            ui.label(format!("Score  {:.1}", resource.clamped_score()));
            if let Some(description) = &resource.description {
                ui.add_space(4.0);
                ui.label(description);
            }
            if let Some(url) = &resource.url {
                ui.add_space(4.0);
                ui.hyperlink_to(url.host_str().unwrap_or(url.as_str()), url.as_str());
            }
            ui.add_space(8.0);
            ui.label(
                egui::RichText::new("Esc to dismiss")
                    .size(11.0)
                    .color(egui::Color32::from_rgb(120, 120, 140)),
            );
        });
}

fn dismiss_selection_system(keys: Res<ButtonInput<KeyCode>>, mut hud: ResMut<HudState>) {
    if keys.just_pressed(KeyCode::Escape) && hud.last_clicked.is_some() {
        hud.last_clicked = None;
    }
}

fn category_line(resource: &Resource) -> String {
    match &resource.sub_category {
        Some(sub) => format!("{} / {sub}", resource.category),
        None => resource.category.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_line_includes_subcategory() {
        let plain = Resource::new(1, "tokio", "Async", 9.0);
        assert_eq!(category_line(&plain), "Async");
        let nested = plain.with_sub_category("Runtimes");
        assert_eq!(category_line(&nested), "Async / Runtimes");
    }
}
