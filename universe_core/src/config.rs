//! Environment configuration and defaults.

use std::path::PathBuf;
use std::str::FromStr;

use crate::layout::sphere::MAX_FLATNESS;
use crate::layout::{LayoutMode, LayoutSettings, SphereSettings};

pub const CATALOG_ENV: &str = "ORRERY_CATALOG";
pub const LAYOUT_ENV: &str = "ORRERY_LAYOUT";
pub const MIN_RADIUS_ENV: &str = "ORRERY_MIN_RADIUS";
pub const MAX_RADIUS_ENV: &str = "ORRERY_MAX_RADIUS";
pub const FLATNESS_ENV: &str = "ORRERY_FLATNESS";

const DEFAULT_CATALOG: &str = "assets/catalog.json";

#[derive(Clone, Debug, PartialEq)]
pub struct UniverseConfig {
    pub catalog_path: PathBuf,
    pub layout_mode: LayoutMode,
    pub sphere: SphereSettings,
}

impl Default for UniverseConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from(DEFAULT_CATALOG),
            layout_mode: LayoutMode::default(),
            sphere: SphereSettings::default(),
        }
    }
}

impl UniverseConfig {
    pub fn layout_settings(&self) -> LayoutSettings {
        LayoutSettings {
            mode: self.layout_mode,
            sphere: self.sphere.clone(),
            ..Default::default()
        }
    }
}

/// Reads `ORRERY_*` variables. Unset variables keep their defaults; invalid
/// ones are reported and ignored.
pub fn universe_config() -> UniverseConfig {
    let mut config = UniverseConfig::default();

    if let Ok(path) = std::env::var(CATALOG_ENV) {
        if !path.trim().is_empty() {
            config.catalog_path = PathBuf::from(path);
        }
    }
    if let Some(mode) = parsed_env::<LayoutMode>(LAYOUT_ENV) {
        config.layout_mode = mode;
    }

    let min = parsed_env::<f32>(MIN_RADIUS_ENV).unwrap_or(config.sphere.min_radius);
    let max = parsed_env::<f32>(MAX_RADIUS_ENV).unwrap_or(config.sphere.max_radius);
    if min.is_finite() && max.is_finite() && min > 0.0 && min <= max {
        config.sphere.min_radius = min;
        config.sphere.max_radius = max;
    } else {
        eprintln!(
            "orrery: invalid radius range {min}..{max}, keeping {}..{}",
            config.sphere.min_radius, config.sphere.max_radius
        );
    }

    if let Some(flatness) = parsed_env::<f32>(FLATNESS_ENV) {
        if (0.0..=1.0).contains(&flatness) {
            config.sphere.flatness = flatness.min(MAX_FLATNESS);
        } else {
            eprintln!("orrery: {FLATNESS_ENV} must be within [0, 1], got {flatness}");
        }
    }

    config
}

fn parsed_env<T>(key: &str) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(err) => {
            eprintln!("orrery: invalid {key} {raw:?}: {err}");
            None
        }
    }
}
