//! Window input → pointer intent → picked instance → callbacks.

use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowEvent};

use crate::anim::InstanceAnimation;
use crate::interaction::{
    pick, HandlerResource, InteractionEvent, PickCandidate, PointerController, UniverseEvent,
};
use crate::scene::{Catalog, ResourceInstance, UniverseCamera, UniverseSettings};

/// Whether egui is using the pointer. Written by the HUD; stays false
/// without it.
#[derive(Resource, Debug, Default)]
pub struct PointerOverUi(pub bool);

/// Applies cursor moves and leaves in the order the window reported them,
/// so leaving and re-entering within one frame ends on the surface.
#[allow(clippy::too_many_arguments)]
pub fn track_pointer(
    mut window_events: EventReader<WindowEvent>,
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    over_ui: Res<PointerOverUi>,
    catalog: Res<Catalog>,
    handler: Res<HandlerResource>,
    mut events: EventWriter<UniverseEvent>,
    mut pointer: ResMut<PointerController>,
) {
    let viewport = windows.get_single().map(Window::size).ok();
    for window_event in window_events.read() {
        match window_event {
            WindowEvent::CursorMoved(moved) => {
                if let Some(viewport) = viewport {
                    pointer.pointer_moved(moved.position, viewport);
                }
            }
            WindowEvent::CursorLeft(_) => {
                if let Some(event) = pointer.pointer_left() {
                    dispatch(event, &catalog, &handler, &mut events);
                }
            }
            _ => {}
        }
    }
    if mouse.just_pressed(MouseButton::Left) && !over_ui.0 {
        pointer.request_click();
    }
}

/// Picks the instance under the cursor, emits hover changes and starts a
/// click sequence for a pending click.
#[allow(clippy::too_many_arguments)]
pub fn resolve_pointer(
    time: Res<Time>,
    cameras: Query<(&Camera, &GlobalTransform), With<UniverseCamera>>,
    instances: Query<(&ResourceInstance, &GlobalTransform)>,
    anim: Res<InstanceAnimation>,
    settings: Res<UniverseSettings>,
    catalog: Res<Catalog>,
    handler: Res<HandlerResource>,
    mut events: EventWriter<UniverseEvent>,
    mut pointer: ResMut<PointerController>,
) {
    let picked = match pointer.cursor() {
        Some(cursor) if !catalog.is_empty() => {
            let Ok((camera, camera_transform)) = cameras.get_single() else {
                return;
            };
            let base_radius = settings.pick.base_radius;
            let candidates: Vec<PickCandidate> = instances
                .iter()
                .filter(|(instance, _)| instance.index < anim.len())
                .map(|(instance, transform)| {
                    let world = transform.translation();
                    PickCandidate {
                        index: instance.index,
                        world,
                        radius: base_radius * anim.rendered_scale(instance.index).unwrap_or(0.0),
                        screen: camera.world_to_viewport(camera_transform, world).ok(),
                        opacity: anim.opacity_at(instance.index),
                    }
                })
                .collect();
            let ray = camera.viewport_to_world(camera_transform, cursor).ok();
            let threshold = anim.settings().opacity.interaction_threshold;
            pick(ray, cursor, &candidates, threshold, &settings.pick)
        }
        _ => None,
    };

    if let Some(event) = pointer.resolve(picked) {
        dispatch(event, &catalog, &handler, &mut events);
    }
    if pointer.take_click_request() && pointer.click(time.elapsed_secs()) {
        debug!("click sequence started on {:?}", pointer.intent().clicked);
    }
}

/// Fires click callbacks and clears clicked flags whose time has come.
pub fn advance_click_sequence(
    time: Res<Time>,
    catalog: Res<Catalog>,
    handler: Res<HandlerResource>,
    mut events: EventWriter<UniverseEvent>,
    mut pointer: ResMut<PointerController>,
) {
    for event in pointer.advance(time.elapsed_secs()) {
        dispatch(event, &catalog, &handler, &mut events);
    }
}

/// Maps an index event to its resource and delivers it to the handler and
/// the Bevy event queue. Stale indices are dropped.
fn dispatch(
    event: InteractionEvent,
    catalog: &Catalog,
    handler: &HandlerResource,
    events: &mut EventWriter<UniverseEvent>,
) {
    match event {
        InteractionEvent::Hover {
            index,
            screen_position,
        } => {
            let resource = index.and_then(|i| catalog.resource_at(i));
            if index.is_some() && resource.is_none() {
                return;
            }
            handler.0.on_hover(resource, screen_position);
            events.send(UniverseEvent::Hover {
                resource: resource.cloned(),
                screen_position,
            });
        }
        InteractionEvent::Click { index } => {
            let Some(resource) = catalog.resource_at(index) else {
                return;
            };
            handler.0.on_click(resource);
            events.send(UniverseEvent::Click {
                resource: resource.clone(),
            });
        }
    }
}
