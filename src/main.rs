//! Orrery: curated resources as an interactive 3D universe.
//!
//! Keys: 1-9 focus a category, L cycles the layout, Esc clears the filter.

use bevy::prelude::*;
use universe_core::prelude::*;
use universe_core::scene::UniverseSettings;

const DIGIT_KEYS: [KeyCode; 9] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

fn main() {
    let _ = dotenvy::dotenv();
    let config = universe_config();

    UniverseBuilder::new()
        .config(&config)
        .build()
        .add_systems(Update, (category_keys_system, layout_keys_system))
        .run();
}

/// Digit keys pick the n-th largest category; pressing it again or Esc
/// clears the filter.
fn category_keys_system(
    keys: Res<ButtonInput<KeyCode>>,
    catalog: Res<Catalog>,
    mut filter: ResMut<FilterState>,
) {
    if keys.just_pressed(KeyCode::Escape) {
        if !filter.is_empty() {
            filter.clear();
        }
        return;
    }

    let clusters = catalog.layout().clusters();
    let Some(cluster) = DIGIT_KEYS
        .iter()
        .position(|key| keys.just_pressed(*key))
        .and_then(|slot| clusters.get(slot))
    else {
        return;
    };

    if filter.active_category.as_deref() == Some(cluster.category.as_str()) {
        filter.clear();
    } else {
        *filter = FilterState::category(cluster.category.clone());
    }
    info!("filter: {}", filter.summary());
}

fn layout_keys_system(keys: Res<ButtonInput<KeyCode>>, mut settings: ResMut<UniverseSettings>) {
    if !keys.just_pressed(KeyCode::KeyL) {
        return;
    }
    let next = match settings.layout.mode {
        LayoutMode::Clusters => LayoutMode::Sphere,
        LayoutMode::Sphere => LayoutMode::Tiers,
        LayoutMode::Tiers => LayoutMode::Clusters,
    };
    settings.layout.mode = next;
    info!("layout: {next}");
}
