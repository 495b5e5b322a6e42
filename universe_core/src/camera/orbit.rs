//! Right-drag orbit and wheel zoom around the rig's look-at point.

use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use crate::camera::CameraRig;
use crate::scene::{PointerOverUi, UniverseCamera};

const PIXELS_PER_LINE: f32 = 40.0;

#[derive(Clone, Debug)]
pub struct OrbitSettings {
    /// Radians per dragged pixel.
    pub rotate_speed: f32,
    /// Fraction of the current distance per wheel line.
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub max_pitch: f32,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            rotate_speed: 0.005,
            zoom_speed: 0.1,
            min_distance: 5.0,
            max_distance: 400.0,
            max_pitch: 1.45,
        }
    }
}

/// New camera position after dragging by `drag` pixels and scrolling
/// `scroll` lines (positive zooms in).
pub fn orbit_position(
    position: Vec3,
    look_at: Vec3,
    drag: Vec2,
    scroll: f32,
    settings: &OrbitSettings,
) -> Vec3 {
    let offset = position - look_at;
    let radius = offset.length().max(f32::EPSILON);
    let mut yaw = offset.x.atan2(offset.z);
    let mut pitch = (offset.y / radius).clamp(-1.0, 1.0).asin();

    yaw -= drag.x * settings.rotate_speed;
    pitch = (pitch + drag.y * settings.rotate_speed).clamp(-settings.max_pitch, settings.max_pitch);
    let radius = (radius * (1.0 - scroll * settings.zoom_speed))
        .clamp(settings.min_distance, settings.max_distance);

    look_at
        + Vec3::new(
            radius * pitch.cos() * yaw.sin(),
            radius * pitch.sin(),
            radius * pitch.cos() * yaw.cos(),
        )
}

pub(crate) fn orbit_controls_system(
    mouse: Res<ButtonInput<MouseButton>>,
    mut motion: EventReader<MouseMotion>,
    mut wheel: EventReader<MouseWheel>,
    over_ui: Res<PointerOverUi>,
    mut rig: ResMut<CameraRig>,
    mut cameras: Query<&mut Transform, With<UniverseCamera>>,
) {
    let dragged: Vec2 = motion.read().map(|m| m.delta).sum();
    let drag = if mouse.pressed(MouseButton::Right) {
        dragged
    } else {
        Vec2::ZERO
    };
    let scroll: f32 = wheel
        .read()
        .map(|w| match w.unit {
            MouseScrollUnit::Line => w.y,
            MouseScrollUnit::Pixel => w.y / PIXELS_PER_LINE,
        })
        .sum();

    if over_ui.0 || (drag == Vec2::ZERO && scroll == 0.0) {
        return;
    }
    let Ok(mut transform) = cameras.get_single_mut() else {
        return;
    };

    rig.cancel_transition();
    let look_at = rig.look_at;
    transform.translation = orbit_position(transform.translation, look_at, drag, scroll, &rig.orbit);
    transform.look_at(look_at, Vec3::Y);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_input_keeps_position() {
        let position = Vec3::new(10.0, 20.0, 30.0);
        let settings = OrbitSettings::default();
        let moved = orbit_position(position, Vec3::ZERO, Vec2::ZERO, 0.0, &settings);
        assert!(moved.distance(position) < 1e-3);
    }

    #[test]
    fn drag_preserves_distance() {
        let settings = OrbitSettings::default();
        let look_at = Vec3::new(1.0, 2.0, 3.0);
        let position = look_at + Vec3::new(0.0, 10.0, 40.0);
        let moved = orbit_position(position, look_at, Vec2::new(120.0, -30.0), 0.0, &settings);
        assert!((moved.distance(look_at) - position.distance(look_at)).abs() < 1e-3);
        assert!(moved.distance(position) > 1.0);
    }

    #[test]
    fn zoom_is_clamped() {
        let settings = OrbitSettings::default();
        let position = Vec3::new(0.0, 0.0, 50.0);
        let near = orbit_position(position, Vec3::ZERO, Vec2::ZERO, 100.0, &settings);
        assert!((near.length() - settings.min_distance).abs() < 1e-3);
        let far = orbit_position(position, Vec3::ZERO, Vec2::ZERO, -1_000.0, &settings);
        assert!((far.length() - settings.max_distance).abs() < 1e-2);
    }

    #[test]
    fn pitch_stops_short_of_the_pole() {
        let settings = OrbitSettings::default();
        let moved = orbit_position(
            Vec3::new(0.0, 0.0, 50.0),
            Vec3::ZERO,
            Vec2::new(0.0, 10_000.0),
            0.0,
            &settings,
        );
        let pitch = (moved.y / moved.length()).asin();
        assert!((pitch - settings.max_pitch).abs() < 1e-3);
    }
}
