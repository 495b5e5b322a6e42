//! Fibonacci-sphere distribution with seeded per-resource radii.

use std::f32::consts::PI;

use bevy::prelude::*;

use crate::layout::random::SeededRandom;

/// Flatness at 1.0 would collapse the poles onto the origin.
pub const MAX_FLATNESS: f32 = 0.95;

pub fn golden_angle() -> f32 {
    PI * (3.0 - 5.0_f32.sqrt())
}

#[derive(Clone, Debug, PartialEq)]
pub struct SphereSettings {
    pub min_radius: f32,
    pub max_radius: f32,
    /// 0 keeps a round sphere; values toward 1 squash it into a disk.
    pub flatness: f32,
}

impl Default for SphereSettings {
    fn default() -> Self {
        Self {
            min_radius: 15.0,
            max_radius: 50.0,
            flatness: 0.3,
        }
    }
}

/// Unit direction for slot `index` of `count`, flattened on Y and
/// renormalized so every slot keeps unit length.
pub fn fibonacci_direction(index: usize, count: usize, flatness: f32) -> Vec3 {
    let y = if count <= 1 {
        0.0
    } else {
        1.0 - (index as f32 / (count - 1) as f32) * 2.0
    };
    let ring = (1.0 - y * y).max(0.0).sqrt();
    let theta = index as f32 * golden_angle();

    let squash = 1.0 - flatness.clamp(0.0, MAX_FLATNESS);
    let flattened = Vec3::new(theta.cos() * ring, y * squash, theta.sin() * ring);
    flattened.normalize_or(Vec3::X)
}

/// Final position for one resource. The radius comes from the resource key
/// alone, so it does not depend on list order.
pub fn sphere_position(key: &str, index: usize, count: usize, settings: &SphereSettings) -> Vec3 {
    let direction = fibonacci_direction(index, count, settings.flatness);
    let (lo, hi) = ordered(settings.min_radius, settings.max_radius);
    let radius = SeededRandom::new(key).range(lo, hi);
    direction * radius
}

fn ordered(a: f32, b: f32) -> (f32, f32) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directions_are_unit_length_for_any_flatness() {
        for flatness in [0.0, 0.25, 0.5, 0.75, 0.9, 0.99] {
            for i in 0..64 {
                let dir = fibonacci_direction(i, 64, flatness);
                assert!((dir.length() - 1.0).abs() < 1e-4, "flatness {flatness} index {i}");
            }
        }
    }

    #[test]
    fn flattening_compresses_height() {
        let round = fibonacci_direction(5, 40, 0.0);
        let flat = fibonacci_direction(5, 40, 0.8);
        assert!(flat.y.abs() < round.y.abs());
    }

    #[test]
    fn single_item_sits_on_equator() {
        let dir = fibonacci_direction(0, 1, 0.3);
        assert!(dir.y.abs() < 1e-6);
        assert!((dir.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn radii_stay_inside_bounds() {
        let settings = SphereSettings {
            min_radius: 15.0,
            max_radius: 50.0,
            flatness: 0.7,
        };
        for i in 0..200 {
            let pos = sphere_position(&i.to_string(), i, 200, &settings);
            let r = pos.length();
            assert!((15.0 - 1e-3..=50.0 + 1e-3).contains(&r), "radius {r}");
        }
    }

    #[test]
    fn swapped_bounds_are_tolerated() {
        let settings = SphereSettings {
            min_radius: 50.0,
            max_radius: 15.0,
            flatness: 0.0,
        };
        let r = sphere_position("3", 3, 10, &settings).length();
        assert!((15.0 - 1e-3..=50.0 + 1e-3).contains(&r));
    }
}
