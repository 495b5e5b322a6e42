//! Pointer → instance resolution: ray/sphere hits first, then a forgiving
//! screen-space proximity search.

use bevy::prelude::*;

#[derive(Clone, Debug)]
pub struct PickSettings {
    /// Proximity fallback radius in logical pixels.
    pub proximity_px: f32,
    /// Picking radius of an instance at scale 1.
    pub base_radius: f32,
}

impl Default for PickSettings {
    fn default() -> Self {
        Self {
            proximity_px: 24.0,
            base_radius: 0.6,
        }
    }
}

/// One instance as seen by the picker this frame.
#[derive(Clone, Copy, Debug)]
pub struct PickCandidate {
    pub index: usize,
    pub world: Vec3,
    pub radius: f32,
    /// Viewport position, `None` when behind the camera or off screen.
    pub screen: Option<Vec2>,
    pub opacity: f32,
}

/// Screen (logical px, origin top-left) → normalized device coordinates.
pub fn screen_to_ndc(screen: Vec2, viewport: Vec2) -> Vec2 {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(
        screen.x / viewport.x * 2.0 - 1.0,
        1.0 - screen.y / viewport.y * 2.0,
    )
}

/// Distance along the ray to the first intersection with a sphere.
pub fn ray_sphere_distance(origin: Vec3, direction: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = origin - center;
    let b = oc.dot(direction);
    let c = oc.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let root = discriminant.sqrt();
    let near = -b - root;
    if near >= 0.0 {
        return Some(near);
    }
    let far = -b + root;
    (far >= 0.0).then_some(far)
}

/// Nearest ray hit among interactive candidates. Instances under the
/// threshold are transparent to the ray.
pub fn ray_pick(ray: Ray3d, candidates: &[PickCandidate], threshold: f32) -> Option<usize> {
    let direction: Vec3 = *ray.direction;
    candidates
        .iter()
        .filter(|c| c.opacity >= threshold)
        .filter_map(|c| {
            ray_sphere_distance(ray.origin, direction, c.world, c.radius).map(|d| (c.index, d))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(index, _)| index)
}

/// Nearest interactive candidate within `max_px` of the cursor on screen.
pub fn proximity_pick(
    cursor: Vec2,
    candidates: &[PickCandidate],
    threshold: f32,
    max_px: f32,
) -> Option<usize> {
    let max_sq = max_px * max_px;
    candidates
        .iter()
        .filter(|c| c.opacity >= threshold)
        .filter_map(|c| c.screen.map(|s| (c.index, s.distance_squared(cursor))))
        .filter(|&(_, d)| d <= max_sq)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(index, _)| index)
}

/// Full resolution: direct hit, else proximity fallback.
pub fn pick(
    ray: Option<Ray3d>,
    cursor: Vec2,
    candidates: &[PickCandidate],
    threshold: f32,
    settings: &PickSettings,
) -> Option<usize> {
    ray.and_then(|ray| ray_pick(ray, candidates, threshold))
        .or_else(|| proximity_pick(cursor, candidates, threshold, settings.proximity_px))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(index: usize, world: Vec3, screen: Vec2, opacity: f32) -> PickCandidate {
        PickCandidate {
            index,
            world,
            radius: 0.5,
            screen: Some(screen),
            opacity,
        }
    }

    fn forward_ray() -> Ray3d {
        Ray3d {
            origin: Vec3::new(0.0, 0.0, 10.0),
            direction: Dir3::NEG_Z,
        }
    }

    #[test]
    fn ndc_maps_corners() {
        let viewport = Vec2::new(800.0, 600.0);
        assert_eq!(screen_to_ndc(Vec2::ZERO, viewport), Vec2::new(-1.0, 1.0));
        assert_eq!(screen_to_ndc(viewport, viewport), Vec2::new(1.0, -1.0));
        assert_eq!(screen_to_ndc(viewport / 2.0, viewport), Vec2::ZERO);
        assert_eq!(screen_to_ndc(Vec2::ONE, Vec2::ZERO), Vec2::ZERO);
    }

    #[test]
    fn ray_hits_sphere_front_face() {
        let d = ray_sphere_distance(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z, Vec3::ZERO, 1.0);
        assert!((d.unwrap() - 9.0).abs() < 1e-5);
        assert!(ray_sphere_distance(Vec3::new(0.0, 5.0, 10.0), Vec3::NEG_Z, Vec3::ZERO, 1.0).is_none());
        assert!(ray_sphere_distance(Vec3::new(0.0, 0.0, 10.0), Vec3::Z, Vec3::ZERO, 1.0).is_none());
    }

    #[test]
    fn nearest_interactive_hit_wins() {
        let candidates = [
            candidate(0, Vec3::new(0.0, 0.0, -5.0), Vec2::ZERO, 1.0),
            candidate(1, Vec3::new(0.0, 0.0, 2.0), Vec2::ZERO, 1.0),
        ];
        assert_eq!(ray_pick(forward_ray(), &candidates, 0.2), Some(1));
    }

    #[test]
    fn faded_instances_are_transparent_to_rays() {
        let candidates = [
            candidate(0, Vec3::new(0.0, 0.0, -5.0), Vec2::ZERO, 1.0),
            candidate(1, Vec3::new(0.0, 0.0, 2.0), Vec2::ZERO, 0.15),
        ];
        assert_eq!(ray_pick(forward_ray(), &candidates, 0.2), Some(0));
    }

    #[test]
    fn proximity_picks_nearest_within_radius() {
        let candidates = [
            candidate(0, Vec3::ZERO, Vec2::new(110.0, 100.0), 1.0),
            candidate(1, Vec3::ZERO, Vec2::new(104.0, 100.0), 1.0),
            candidate(2, Vec3::ZERO, Vec2::new(101.0, 100.0), 0.1),
        ];
        assert_eq!(proximity_pick(Vec2::new(100.0, 100.0), &candidates, 0.2, 24.0), Some(1));
        assert_eq!(proximity_pick(Vec2::new(300.0, 100.0), &candidates, 0.2, 24.0), None);
    }

    #[test]
    fn pick_falls_back_when_ray_misses() {
        let candidates = [candidate(3, Vec3::new(50.0, 0.0, 0.0), Vec2::new(210.0, 200.0), 1.0)];
        let settings = PickSettings::default();
        let picked = pick(Some(forward_ray()), Vec2::new(200.0, 200.0), &candidates, 0.2, &settings);
        assert_eq!(picked, Some(3));
    }

    #[test]
    fn filtered_out_instance_is_never_picked() {
        let candidates = [candidate(4, Vec3::ZERO, Vec2::new(200.0, 200.0), 0.15)];
        let settings = PickSettings::default();
        let picked = pick(Some(forward_ray()), Vec2::new(200.0, 200.0), &candidates, 0.2, &settings);
        assert_eq!(picked, None);
    }
}
