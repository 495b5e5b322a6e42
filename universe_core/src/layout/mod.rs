//! Procedural layout: resource list → fixed 3D positions + category clusters.
//!
//! A layout is computed once per resource list and layout mode, then shared
//! read-only behind an `Arc`. Filter changes never touch it.

pub mod clusters;
pub mod palette;
pub mod random;
pub mod rings;
pub mod score;
pub mod sphere;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use bevy::prelude::*;

use crate::data::Resource;

pub use clusters::ClusterSettings;
pub use palette::CategoryPalette;
pub use random::SeededRandom;
pub use rings::TierSettings;
pub use sphere::SphereSettings;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LayoutMode {
    Sphere,
    #[default]
    Clusters,
    Tiers,
}

impl FromStr for LayoutMode {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "sphere" => Ok(Self::Sphere),
            "clusters" | "cluster" => Ok(Self::Clusters),
            "tiers" | "rings" => Ok(Self::Tiers),
            other => Err(format!("unknown layout mode {other:?}")),
        }
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Sphere => "sphere",
            Self::Clusters => "clusters",
            Self::Tiers => "tiers",
        };
        f.write_str(name)
    }
}

/// Score → size multiplier bounds, applied by the instance animation.
#[derive(Clone, Debug)]
pub struct SizeSettings {
    pub min_size: f32,
    pub max_size: f32,
}

impl Default for SizeSettings {
    fn default() -> Self {
        Self {
            min_size: 0.6,
            max_size: 1.6,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct LayoutSettings {
    pub mode: LayoutMode,
    pub sphere: SphereSettings,
    pub clusters: ClusterSettings,
    pub tiers: TierSettings,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitalPosition {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl OrbitalPosition {
    pub fn distance_from_origin(&self) -> f32 {
        Vec3::from(*self).length()
    }
}

impl From<Vec3> for OrbitalPosition {
    fn from(v: Vec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl From<OrbitalPosition> for Vec3 {
    fn from(p: OrbitalPosition) -> Self {
        Vec3::new(p.x, p.y, p.z)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CategoryCluster {
    pub category: String,
    pub center: Vec3,
    /// Per-axis half extents.
    pub radius: Vec3,
    pub color: Color,
    pub member_count: usize,
}

/// Immutable snapshot of every resource's position plus the cluster list.
#[derive(Clone, Debug, Default)]
pub struct UniverseLayout {
    mode: LayoutMode,
    by_key: HashMap<String, OrbitalPosition>,
    ordered: Vec<Vec3>,
    clusters: Vec<CategoryCluster>,
}

impl UniverseLayout {
    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn position_of(&self, key: &str) -> Option<OrbitalPosition> {
        self.by_key.get(key).copied()
    }

    pub fn position_at(&self, index: usize) -> Option<Vec3> {
        self.ordered.get(index).copied()
    }

    /// Positions in resource-list order.
    pub fn positions(&self) -> &[Vec3] {
        &self.ordered
    }

    pub fn clusters(&self) -> &[CategoryCluster] {
        &self.clusters
    }

    pub fn cluster_for(&self, category: &str) -> Option<&CategoryCluster> {
        self.clusters.iter().find(|c| c.category == category)
    }
}

/// Computes the layout for a resource list. Deterministic for a given list,
/// mode and settings.
pub fn compute_layout(
    resources: &[Resource],
    settings: &LayoutSettings,
    palette: &CategoryPalette,
) -> UniverseLayout {
    if resources.is_empty() {
        return UniverseLayout {
            mode: settings.mode,
            ..Default::default()
        };
    }

    let (ordered, clusters) = match settings.mode {
        LayoutMode::Sphere => {
            let count = resources.len();
            let ordered: Vec<Vec3> = resources
                .iter()
                .enumerate()
                .map(|(i, r)| sphere::sphere_position(&r.key(), i, count, &settings.sphere))
                .collect();
            let clusters = summarize_clusters(resources, &ordered, palette);
            (ordered, clusters)
        }
        LayoutMode::Tiers => {
            let ordered = rings::tier_positions(resources, &settings.tiers);
            let clusters = summarize_clusters(resources, &ordered, palette);
            (ordered, clusters)
        }
        LayoutMode::Clusters => {
            let built = clusters::build_clusters(resources, &settings.clusters, palette);
            let mut ordered = vec![Vec3::ZERO; resources.len()];
            for (cluster, members) in &built {
                for &i in members {
                    ordered[i] =
                        clusters::member_position(&resources[i].key(), cluster, &settings.clusters);
                }
            }
            let clusters = built.into_iter().map(|(cluster, _)| cluster).collect();
            (ordered, clusters)
        }
    };

    let by_key = resources
        .iter()
        .zip(&ordered)
        .map(|(r, p)| (r.key(), OrbitalPosition::from(*p)))
        .collect();

    UniverseLayout {
        mode: settings.mode,
        by_key,
        ordered,
        clusters,
    }
}

/// Clusters for layouts that do not place by category: centroid of the
/// members and their per-axis extent around it.
fn summarize_clusters(
    resources: &[Resource],
    positions: &[Vec3],
    palette: &CategoryPalette,
) -> Vec<CategoryCluster> {
    clusters::group_by_category(resources)
        .into_iter()
        .map(|(category, members)| {
            let sum: Vec3 = members.iter().map(|&i| positions[i]).sum();
            let center = sum / members.len() as f32;
            let radius = members
                .iter()
                .map(|&i| (positions[i] - center).abs())
                .fold(Vec3::ZERO, Vec3::max);
            let hint = resources[members[0]].color.as_deref();
            CategoryCluster {
                color: palette.color_for(&category, hint),
                center,
                radius,
                member_count: members.len(),
                category,
            }
        })
        .collect()
}
