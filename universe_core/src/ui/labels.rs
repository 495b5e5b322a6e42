//! Category names painted at their projected cluster centers.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::data::FilterState;
use crate::scene::{Catalog, UniverseCamera, UniverseRoot, UniverseSet};
use crate::ui::ensure_egui;

#[derive(Resource, Clone, Debug)]
pub struct LabelSettings {
    /// Labels beyond this camera distance are not drawn.
    pub cull_distance: f32,
    /// Fraction of the cull distance where fading starts.
    pub fade_start: f32,
    pub font_size: f32,
    /// Gap above the cluster's top edge, in world units.
    pub lift: f32,
}

impl Default for LabelSettings {
    fn default() -> Self {
        Self {
            cull_distance: 320.0,
            fade_start: 0.7,
            font_size: 15.0,
            lift: 2.0,
        }
    }
}

pub fn category_label_plugin(app: &mut App) {
    ensure_egui(app);
    app.init_resource::<LabelSettings>()
        .add_systems(Update, category_labels_system.after(UniverseSet::Camera));
}

fn category_labels_system(
    mut contexts: EguiContexts,
    settings: Res<LabelSettings>,
    catalog: Res<Catalog>,
    filter: Res<FilterState>,
    roots: Query<&GlobalTransform, With<UniverseRoot>>,
    cameras: Query<(&Camera, &GlobalTransform), With<UniverseCamera>>,
) {
    if catalog.is_empty() {
        return;
    }
    let Ok((camera, camera_transform)) = cameras.get_single() else {
        return;
    };
    let root = roots.get_single().copied().unwrap_or_default();
    let camera_position = camera_transform.translation();
    let painter = contexts
        .ctx_mut()
        .layer_painter(egui::LayerId::background());

    for cluster in catalog.layout().clusters() {
        let local = cluster.center + Vec3::Y * (cluster.radius.y + settings.lift);
        let world = root.transform_point(local);
        let fade = distance_fade(world.distance(camera_position), &settings);
        if fade <= 0.0 {
            continue;
        }
        let Ok(screen) = camera.world_to_viewport(camera_transform, world) else {
            continue;
        };

        let emphasis = if filter_mentions(&filter, &cluster.category) {
            1.0
        } else if filter.is_empty() {
            0.8
        } else {
            0.3
        };
        painter.text(
            egui::pos2(screen.x, screen.y),
            egui::Align2::CENTER_BOTTOM,
            format!("{} ({})", cluster.category, cluster.member_count),
            egui::FontId::proportional(settings.font_size),
            to_color32(cluster.color, fade * emphasis),
        );
    }
}

/// 1 up to `fade_start` of the cull distance, then linear down to 0.
fn distance_fade(distance: f32, settings: &LabelSettings) -> f32 {
    let start = settings.cull_distance * settings.fade_start;
    if distance >= settings.cull_distance {
        0.0
    } else if distance <= start {
        1.0
    } else {
        1.0 - (distance - start) / (settings.cull_distance - start)
    }
}

fn filter_mentions(filter: &FilterState, category: &str) -> bool {
    filter.active_category.as_deref() == Some(category)
        || filter
            .matched_categories
            .as_ref()
            .is_some_and(|cats| cats.contains(category))
}

fn to_color32(color: Color, alpha: f32) -> egui::Color32 {
    let srgba = color.to_srgba();
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    egui::Color32::from_rgba_unmultiplied(
        channel(srgba.red),
        channel(srgba.green),
        channel(srgba.blue),
        channel(alpha),
    )
}
