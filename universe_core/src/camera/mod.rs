//! Camera rig: filter-driven framing transitions and user orbit controls.

pub mod framing;
mod orbit;

use bevy::prelude::*;

use crate::data::FilterState;
use crate::scene::{Catalog, UniverseCamera, UniverseRoot, UniverseSet};

pub use framing::{
    bounding_sphere, framing_pose, relevant_points, BoundingSphere, CameraPose, CameraTransition,
    FocusPoint, FramingSettings,
};
pub use orbit::{orbit_position, OrbitSettings};

/// Where the camera looks and any framing move in flight.
#[derive(Resource, Debug, Default)]
pub struct CameraRig {
    pub look_at: Vec3,
    pub framing: FramingSettings,
    pub orbit: OrbitSettings,
    transition: Option<CameraTransition>,
}

impl CameraRig {
    pub fn new(framing: FramingSettings, orbit: OrbitSettings) -> Self {
        Self {
            framing,
            orbit,
            ..Default::default()
        }
    }

    pub fn transition(&self) -> Option<&CameraTransition> {
        self.transition.as_ref()
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    pub fn start(&mut self, transition: CameraTransition) {
        self.transition = Some(transition);
    }

    pub fn cancel_transition(&mut self) {
        self.transition = None;
    }
}

/// Filter framing. Always installed; orbit input is optional.
pub fn camera_plugin(app: &mut App) {
    app.init_resource::<CameraRig>().add_systems(
        Update,
        (frame_on_filter_change, advance_camera_transition)
            .chain()
            .in_set(UniverseSet::Camera),
    );
}

pub fn orbit_camera_plugin(app: &mut App) {
    app.add_systems(
        Update,
        orbit::orbit_controls_system.in_set(UniverseSet::Input),
    );
}

/// Starts a framing move whenever a non-empty filter (or a new catalog
/// under one) names something to look at. Clearing the filter leaves the
/// camera where it is.
fn frame_on_filter_change(
    time: Res<Time>,
    filter: Res<FilterState>,
    catalog: Res<Catalog>,
    roots: Query<&GlobalTransform, With<UniverseRoot>>,
    cameras: Query<&Transform, With<UniverseCamera>>,
    mut rig: ResMut<CameraRig>,
) {
    if !(filter.is_changed() || catalog.is_changed()) || filter.is_empty() || catalog.is_empty() {
        return;
    }
    let Ok(camera) = cameras.get_single() else {
        return;
    };
    let root = roots.get_single().copied().unwrap_or_default();

    let points: Vec<FocusPoint> = relevant_points(catalog.resources(), catalog.layout(), &filter)
        .into_iter()
        .map(|p| FocusPoint {
            position: root.transform_point(p.position),
            extent: p.extent,
        })
        .collect();
    let Some(sphere) = bounding_sphere(&points) else {
        debug!("filter matches nothing to frame");
        return;
    };

    let from = CameraPose {
        position: camera.translation,
        look_at: rig.look_at,
    };
    let to = framing_pose(sphere, from, &rig.framing);
    let duration = rig.framing.duration;
    debug!(
        "framing {} points: center {} radius {:.1}",
        points.len(),
        sphere.center,
        sphere.radius
    );
    rig.start(CameraTransition::new(from, to, time.elapsed_secs(), duration));
}

fn advance_camera_transition(
    time: Res<Time>,
    mut rig: ResMut<CameraRig>,
    mut cameras: Query<&mut Transform, With<UniverseCamera>>,
) {
    let Some(transition) = rig.transition.clone() else {
        return;
    };
    let Ok(mut transform) = cameras.get_single_mut() else {
        return;
    };

    let now = time.elapsed_secs();
    let pose = transition.sample(now);
    transform.translation = pose.position;
    transform.look_at(pose.look_at, Vec3::Y);
    rig.look_at = pose.look_at;

    if transition.is_finished(now) {
        rig.cancel_transition();
    }
}
