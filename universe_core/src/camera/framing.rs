//! Camera framing: bounding sphere over the filter's relevant points and an
//! eased transition from the live pose to a pose that frames it.

use std::collections::BTreeSet;

use bevy::prelude::*;

use crate::anim::easing::ease_out_cubic;
use crate::data::{FilterState, Resource};
use crate::layout::{LayoutMode, UniverseLayout};

#[derive(Clone, Debug)]
pub struct FramingSettings {
    pub distance_factor: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Angle of the camera above the look-at plane, in radians.
    pub elevation: f32,
    pub duration: f32,
}

impl Default for FramingSettings {
    fn default() -> Self {
        Self {
            distance_factor: 2.5,
            min_distance: 20.0,
            max_distance: 220.0,
            elevation: 0.45,
            duration: 0.5,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
}

/// A point of interest plus how far its content reaches around it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FocusPoint {
    pub position: Vec3,
    pub extent: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

/// Centroid-centered sphere enclosing every point and its extent.
pub fn bounding_sphere(points: &[FocusPoint]) -> Option<BoundingSphere> {
    if points.is_empty() {
        return None;
    }
    let center = points.iter().map(|p| p.position).sum::<Vec3>() / points.len() as f32;
    let radius = points
        .iter()
        .map(|p| p.position.distance(center) + p.extent.max(0.0))
        .fold(0.0, f32::max);
    Some(BoundingSphere { center, radius })
}

/// Points the camera should frame for a filter, in layout space. Empty when
/// the filter names nothing (or is cleared), which leaves the camera alone.
pub fn relevant_points(
    resources: &[Resource],
    layout: &UniverseLayout,
    filter: &FilterState,
) -> Vec<FocusPoint> {
    if let Some(ids) = &filter.matched_resource_ids {
        let matched = resources
            .iter()
            .enumerate()
            .filter(|(_, r)| ids.contains(&r.id));

        if layout.mode() == LayoutMode::Clusters {
            let categories: BTreeSet<&str> = matched.map(|(_, r)| r.category.as_str()).collect();
            return categories
                .into_iter()
                .filter_map(|c| cluster_point(layout, c))
                .collect();
        }
        return matched
            .filter_map(|(i, _)| layout.position_at(i))
            .map(|position| FocusPoint {
                position,
                extent: 0.0,
            })
            .collect();
    }

    if let Some(category) = &filter.active_category {
        return cluster_point(layout, category).into_iter().collect();
    }

    if let Some(sub) = &filter.active_sub_category {
        return resources
            .iter()
            .enumerate()
            .filter(|(_, r)| r.sub_category.as_ref() == Some(sub))
            .filter_map(|(i, _)| layout.position_at(i))
            .map(|position| FocusPoint {
                position,
                extent: 0.0,
            })
            .collect();
    }

    if let Some(categories) = &filter.matched_categories {
        let ordered: BTreeSet<&String> = categories.iter().collect();
        return ordered
            .into_iter()
            .filter_map(|c| cluster_point(layout, c))
            .collect();
    }

    Vec::new()
}

fn cluster_point(layout: &UniverseLayout, category: &str) -> Option<FocusPoint> {
    layout.cluster_for(category).map(|cluster| FocusPoint {
        position: cluster.center,
        extent: cluster.radius.max_element(),
    })
}

/// Pose that frames `sphere` from the fixed elevation, keeping the current
/// horizontal heading of the camera.
pub fn framing_pose(sphere: BoundingSphere, current: CameraPose, settings: &FramingSettings) -> CameraPose {
    let distance = (sphere.radius * settings.distance_factor)
        .clamp(settings.min_distance, settings.max_distance);
    let flat = current.position - current.look_at;
    let heading = Vec3::new(flat.x, 0.0, flat.z).normalize_or(Vec3::Z);
    let offset = heading * settings.elevation.cos() * distance
        + Vec3::Y * settings.elevation.sin() * distance;
    CameraPose {
        position: sphere.center + offset,
        look_at: sphere.center,
    }
}

/// Eased move between two poses. Restarting means building a new one from
/// the live pose.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraTransition {
    pub from: CameraPose,
    pub to: CameraPose,
    pub started_at: f32,
    pub duration: f32,
}

impl CameraTransition {
    pub fn new(from: CameraPose, to: CameraPose, now: f32, duration: f32) -> Self {
        Self {
            from,
            to,
            started_at: now,
            duration,
        }
    }

    pub fn progress(&self, now: f32) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.started_at) / self.duration).clamp(0.0, 1.0)
    }

    pub fn sample(&self, now: f32) -> CameraPose {
        let t = ease_out_cubic(self.progress(now));
        CameraPose {
            position: self.from.position.lerp(self.to.position, t),
            look_at: self.from.look_at.lerp(self.to.look_at, t),
        }
    }

    pub fn is_finished(&self, now: f32) -> bool {
        self.progress(now) >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{compute_layout, CategoryPalette, LayoutSettings};

    fn catalog() -> Vec<Resource> {
        (0..12)
            .map(|i| Resource::new(i, format!("r{i}"), format!("cat{}", i % 6), 5.0))
            .collect()
    }

    fn layout(mode: LayoutMode, resources: &[Resource]) -> UniverseLayout {
        let settings = LayoutSettings {
            mode,
            ..Default::default()
        };
        compute_layout(resources, &settings, &CategoryPalette::default())
    }

    #[test]
    fn sphere_covers_points_and_extents() {
        let points = [
            FocusPoint {
                position: Vec3::new(-10.0, 0.0, 0.0),
                extent: 2.0,
            },
            FocusPoint {
                position: Vec3::new(10.0, 0.0, 0.0),
                extent: 1.0,
            },
        ];
        let sphere = bounding_sphere(&points).unwrap();
        assert_eq!(sphere.center, Vec3::ZERO);
        assert_eq!(sphere.radius, 12.0);
        assert!(bounding_sphere(&[]).is_none());
    }

    #[test]
    fn distance_is_clamped() {
        let settings = FramingSettings::default();
        let current = CameraPose {
            position: Vec3::new(0.0, 0.0, 100.0),
            look_at: Vec3::ZERO,
        };
        let tiny = framing_pose(
            BoundingSphere {
                center: Vec3::ZERO,
                radius: 0.0,
            },
            current,
            &settings,
        );
        assert!((tiny.position.length() - settings.min_distance).abs() < 1e-3);

        let huge = framing_pose(
            BoundingSphere {
                center: Vec3::ZERO,
                radius: 1_000.0,
            },
            current,
            &settings,
        );
        assert!((huge.position.length() - settings.max_distance).abs() < 1e-2);

        let mid = framing_pose(
            BoundingSphere {
                center: Vec3::ONE,
                radius: 20.0,
            },
            current,
            &settings,
        );
        assert!((mid.position.distance(mid.look_at) - 50.0).abs() < 1e-3);
        assert_eq!(mid.look_at, Vec3::ONE);
    }

    #[test]
    fn framing_keeps_heading_and_elevation() {
        let settings = FramingSettings::default();
        let current = CameraPose {
            position: Vec3::new(30.0, 80.0, 0.0),
            look_at: Vec3::ZERO,
        };
        let pose = framing_pose(
            BoundingSphere {
                center: Vec3::ZERO,
                radius: 10.0,
            },
            current,
            &settings,
        );
        let offset = pose.position - pose.look_at;
        assert!(offset.x > 0.0 && offset.z.abs() < 1e-4);
        let elevation = (offset.y / offset.length()).asin();
        assert!((elevation - settings.elevation).abs() < 1e-4);
    }

    #[test]
    fn transition_eases_and_finishes() {
        let from = CameraPose {
            position: Vec3::ZERO,
            look_at: Vec3::ZERO,
        };
        let to = CameraPose {
            position: Vec3::new(10.0, 0.0, 0.0),
            look_at: Vec3::new(0.0, 4.0, 0.0),
        };
        let transition = CameraTransition::new(from, to, 2.0, 0.5);
        assert_eq!(transition.sample(2.0), from);
        let mid = transition.sample(2.25);
        assert!(mid.position.x > 5.0, "ease-out should be past halfway");
        assert!(!transition.is_finished(2.4));
        assert!(transition.is_finished(2.5));
        assert_eq!(transition.sample(9.0), to);
    }

    #[test]
    fn matched_ids_frame_their_clusters() {
        let resources = catalog();
        let layout = layout(LayoutMode::Clusters, &resources);
        let filter = FilterState::matched_ids([0, 6, 1]);
        let points = relevant_points(&resources, &layout, &filter);
        // ids 0 and 6 share cat0; id 1 is cat1.
        assert_eq!(points.len(), 2);
        let cat0 = layout.cluster_for("cat0").unwrap();
        assert!(points.iter().any(|p| p.position == cat0.center));
    }

    #[test]
    fn matched_ids_frame_items_outside_cluster_mode() {
        let resources = catalog();
        let layout = layout(LayoutMode::Sphere, &resources);
        let points = relevant_points(&resources, &layout, &FilterState::matched_ids([3, 7]));
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].position, layout.positions()[3]);
    }

    #[test]
    fn active_category_frames_one_cluster() {
        let resources = catalog();
        let layout = layout(LayoutMode::Clusters, &resources);
        let points = relevant_points(&resources, &layout, &FilterState::category("cat2"));
        assert_eq!(points.len(), 1);
        let cluster = layout.cluster_for("cat2").unwrap();
        assert_eq!(points[0].extent, cluster.radius.max_element());
    }

    #[test]
    fn cleared_filter_has_nothing_to_frame() {
        let resources = catalog();
        let layout = layout(LayoutMode::Clusters, &resources);
        assert!(relevant_points(&resources, &layout, &FilterState::default()).is_empty());
        assert!(relevant_points(&resources, &layout, &FilterState::category("nope")).is_empty());
    }
}
