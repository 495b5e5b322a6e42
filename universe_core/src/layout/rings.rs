//! Score tiers: concentric horizontal rings, best scores innermost.

use bevy::prelude::*;

use crate::data::Resource;
use crate::layout::random::SeededRandom;
use crate::layout::score::{tier_index, tier_radius};
use crate::layout::sphere::golden_angle;

#[derive(Clone, Debug)]
pub struct TierSettings {
    pub tier_count: usize,
    pub inner_radius: f32,
    pub outer_radius: f32,
    /// Max seeded vertical offset from the ring plane.
    pub thickness: f32,
}

impl Default for TierSettings {
    fn default() -> Self {
        Self {
            tier_count: 4,
            inner_radius: 12.0,
            outer_radius: 48.0,
            thickness: 2.0,
        }
    }
}

/// Positions for every resource, in list order.
pub fn tier_positions(resources: &[Resource], settings: &TierSettings) -> Vec<Vec3> {
    let tiers = settings.tier_count.max(1);
    let mut seen_per_tier = vec![0usize; tiers];

    resources
        .iter()
        .map(|resource| {
            let tier = tier_index(resource.score, tiers);
            let slot = seen_per_tier[tier];
            seen_per_tier[tier] += 1;

            let radius = tier_radius(
                resource.score,
                tiers,
                settings.inner_radius,
                settings.outer_radius,
            );
            let angle = slot as f32 * golden_angle();
            let lift = SeededRandom::new(&resource.key()).range(-settings.thickness, settings.thickness);
            Vec3::new(radius * angle.cos(), lift, radius * angle.sin())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn better_scores_orbit_closer() {
        let resources = vec![
            Resource::new(1, "low", "x", 1.5),
            Resource::new(2, "mid", "x", 5.5),
            Resource::new(3, "high", "x", 9.9),
        ];
        let positions = tier_positions(&resources, &TierSettings::default());
        let planar = |v: Vec3| Vec2::new(v.x, v.z).length();
        assert!(planar(positions[2]) <= planar(positions[1]));
        assert!(planar(positions[1]) <= planar(positions[0]));
    }

    #[test]
    fn ring_members_keep_their_tier_radius() {
        let settings = TierSettings::default();
        let resources: Vec<Resource> = (0..12).map(|i| Resource::new(i, "r", "x", 10.0)).collect();
        for pos in tier_positions(&resources, &settings) {
            let planar = Vec2::new(pos.x, pos.z).length();
            assert!((planar - settings.inner_radius).abs() < 1e-3);
            assert!(pos.y.abs() <= settings.thickness);
        }
    }
}
