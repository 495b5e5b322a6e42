//! Category clusters: centers on a tilted ring, members drawn from a
//! flattened Gaussian around each center.

use std::collections::HashMap;
use std::f32::consts::TAU;

use bevy::prelude::*;

use crate::data::Resource;
use crate::layout::palette::CategoryPalette;
use crate::layout::random::SeededRandom;
use crate::layout::CategoryCluster;

const SIGMA_CLAMP: f32 = 2.5;

#[derive(Clone, Debug)]
pub struct ClusterSettings {
    /// Radius of the ring the cluster centers sit on.
    pub ring_radius: f32,
    /// Extra ring radius per category.
    pub ring_growth: f32,
    /// Tilt of the ring about the X axis, in radians.
    pub tilt: f32,
    /// Max seeded vertical offset of a cluster center.
    pub height_jitter: f32,
    pub base_radius: f32,
    /// Radius added per sqrt(member count).
    pub member_radius: f32,
    /// Standard deviation as a fraction of the cluster radius.
    pub spread: f32,
    /// Y compression of the cluster silhouette.
    pub flatten: f32,
}

impl Default for ClusterSettings {
    fn default() -> Self {
        Self {
            ring_radius: 55.0,
            ring_growth: 2.5,
            tilt: 0.35,
            height_jitter: 6.0,
            base_radius: 4.0,
            member_radius: 1.2,
            spread: 0.45,
            flatten: 0.35,
        }
    }
}

/// Distinct categories with their members' indices, largest first, ties by name.
pub fn group_by_category(resources: &[Resource]) -> Vec<(String, Vec<usize>)> {
    let mut groups: HashMap<&str, Vec<usize>> = HashMap::new();
    for (i, resource) in resources.iter().enumerate() {
        groups.entry(resource.category.as_str()).or_default().push(i);
    }

    let mut sorted: Vec<(String, Vec<usize>)> = groups
        .into_iter()
        .map(|(category, members)| (category.to_string(), members))
        .collect();
    sorted.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then_with(|| a.0.cmp(&b.0)));
    sorted
}

pub fn cluster_radius(member_count: usize, settings: &ClusterSettings) -> Vec3 {
    let r = settings.base_radius + settings.member_radius * (member_count as f32).sqrt();
    Vec3::new(r, r * settings.flatten, r)
}

/// Center of cluster `slot` out of `total` clusters.
pub fn cluster_center(category: &str, slot: usize, total: usize, settings: &ClusterSettings) -> Vec3 {
    if total <= 1 {
        return Vec3::ZERO;
    }
    let ring = settings.ring_radius + settings.ring_growth * total as f32;
    let angle = slot as f32 / total as f32 * TAU;
    let flat = Vec3::new(ring * angle.cos(), 0.0, ring * angle.sin());
    let tilted = Quat::from_rotation_x(settings.tilt) * flat;
    let lift = SeededRandom::new(category).range(-settings.height_jitter, settings.height_jitter);
    tilted + Vec3::Y * lift
}

pub fn build_clusters(
    resources: &[Resource],
    settings: &ClusterSettings,
    palette: &CategoryPalette,
) -> Vec<(CategoryCluster, Vec<usize>)> {
    let groups = group_by_category(resources);
    let total = groups.len();
    groups
        .into_iter()
        .enumerate()
        .map(|(slot, (category, members))| {
            let hint = members
                .first()
                .and_then(|&i| resources[i].color.as_deref());
            let cluster = CategoryCluster {
                center: cluster_center(&category, slot, total, settings),
                radius: cluster_radius(members.len(), settings),
                color: palette.color_for(&category, hint),
                member_count: members.len(),
                category,
            };
            (cluster, members)
        })
        .collect()
}

/// Gaussian offset around the cluster center, seeded by the resource key.
pub fn member_position(key: &str, cluster: &CategoryCluster, settings: &ClusterSettings) -> Vec3 {
    let mut rng = SeededRandom::new(key);
    let sigma = cluster.radius.x * settings.spread;
    let mut sample = || rng.gaussian().clamp(-SIGMA_CLAMP, SIGMA_CLAMP);
    let offset = Vec3::new(sample(), sample() * settings.flatten, sample());
    cluster.center + offset * sigma
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Resource> {
        vec![
            Resource::new(1, "a", "Web", 5.0),
            Resource::new(2, "b", "Web", 5.0),
            Resource::new(3, "c", "Games", 5.0),
            Resource::new(4, "d", "Audio", 5.0),
            Resource::new(5, "e", "Games", 5.0),
            Resource::new(6, "f", "Web", 5.0),
        ]
    }

    #[test]
    fn groups_are_ordered_by_size_then_name() {
        let groups = group_by_category(&catalog());
        let names: Vec<&str> = groups.iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(names, ["Web", "Games", "Audio"]);
        assert_eq!(groups[0].1, vec![0, 1, 5]);
    }

    #[test]
    fn radius_grows_with_membership() {
        let settings = ClusterSettings::default();
        assert!(cluster_radius(16, &settings).x > cluster_radius(4, &settings).x);
        let r = cluster_radius(9, &settings);
        assert!((r.y - r.x * settings.flatten).abs() < 1e-6);
    }

    #[test]
    fn lone_category_is_centered() {
        assert_eq!(cluster_center("Web", 0, 1, &ClusterSettings::default()), Vec3::ZERO);
    }

    #[test]
    fn centers_are_distinct_and_on_the_ring() {
        let settings = ClusterSettings {
            height_jitter: 0.0,
            ..Default::default()
        };
        let ring = settings.ring_radius + settings.ring_growth * 6.0;
        let centers: Vec<Vec3> = (0..6)
            .map(|slot| cluster_center(&format!("cat{slot}"), slot, 6, &settings))
            .collect();
        for (i, a) in centers.iter().enumerate() {
            assert!((a.length() - ring).abs() < 1e-3);
            for b in &centers[i + 1..] {
                assert!(a.distance(*b) > 1.0);
            }
        }
    }

    #[test]
    fn members_stay_within_clamped_gaussian() {
        let settings = ClusterSettings::default();
        let clusters = build_clusters(&catalog(), &settings, &CategoryPalette::default());
        for (cluster, members) in &clusters {
            let sigma = cluster.radius.x * settings.spread;
            let limit = Vec3::new(1.0, settings.flatten, 1.0) * sigma * SIGMA_CLAMP + 1e-3;
            for &i in members {
                let pos = member_position(&(i + 1).to_string(), cluster, &settings);
                let offset = (pos - cluster.center).abs();
                assert!(offset.cmple(limit).all(), "{offset:?} exceeds {limit:?}");
            }
        }
    }
}
