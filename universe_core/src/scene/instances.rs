use bevy::prelude::*;

use crate::anim::InstanceAnimation;
use crate::data::FilterState;
use crate::interaction::PointerController;
use crate::scene::{Catalog, InstanceEntities};

/// Re-targets on filter/catalog changes, feeds pointer intent in and
/// advances the state one frame.
pub fn animate_instances(
    time: Res<Time>,
    catalog: Res<Catalog>,
    filter: Res<FilterState>,
    pointer: Res<PointerController>,
    mut anim: ResMut<InstanceAnimation>,
) {
    if anim.is_empty() {
        return;
    }
    if catalog.is_changed() || filter.is_changed() {
        anim.apply_filter(catalog.resources(), &filter);
    }
    let intent = pointer.intent();
    anim.apply_pointer(intent.hovered, intent.clicked);
    anim.tick(time.elapsed_secs(), time.delta_secs());
}

/// Pushes scale and alpha to the entities whose values moved this frame.
pub fn sync_instance_visuals(
    anim: Res<InstanceAnimation>,
    entities: Res<InstanceEntities>,
    mut instances: Query<(&mut Transform, &MeshMaterial3d<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for &index in anim.changed() {
        let Some(&entity) = entities.0.get(index) else {
            continue;
        };
        let Ok((mut transform, material)) = instances.get_mut(entity) else {
            continue;
        };
        transform.scale = Vec3::splat(anim.rendered_scale(index).unwrap_or(0.0));
        if let Some(material) = materials.get_mut(&material.0) {
            material.base_color.set_alpha(anim.opacity_at(index));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::data::{init_static_channel, Resource};
    use crate::scene::test_support::headless_app;

    fn catalog() -> Vec<Resource> {
        (0..10)
            .map(|i| Resource::new(i, format!("r{i}"), format!("cat{}", i % 2), 5.0))
            .collect()
    }

    fn run_for(app: &mut App, frames: usize) {
        for _ in 0..frames {
            std::thread::sleep(Duration::from_millis(20));
            app.update();
        }
    }

    #[test]
    fn entrance_grows_instances_from_zero() {
        let mut app = headless_app();
        app.insert_resource(init_static_channel(catalog()));
        app.update();

        let first = app.world().resource::<InstanceEntities>().0[0];
        run_for(&mut app, 2);
        let early = app.world().get::<Transform>(first).unwrap().scale.x;
        run_for(&mut app, 60);
        let settled = app.world().get::<Transform>(first).unwrap().scale.x;

        let anim = app.world().resource::<InstanceAnimation>();
        assert!(anim.entrance_complete());
        assert!(early < settled);
        assert!((settled - anim.rendered_scale(0).unwrap()).abs() < 1e-6);
    }

    #[test]
    fn search_filter_fades_non_matches() {
        let mut app = headless_app();
        app.insert_resource(init_static_channel(catalog()));
        app.update();
        app.insert_resource(FilterState::matched_ids([3, 7]));
        run_for(&mut app, 100);

        let anim = app.world().resource::<InstanceAnimation>();
        assert_eq!(anim.target_opacity_at(3), Some(1.0));
        assert_eq!(anim.target_opacity_at(4), Some(0.15));
        assert_eq!(anim.visible_count(), 2);

        let entity = app.world().resource::<InstanceEntities>().0[4];
        let handle = app
            .world()
            .get::<MeshMaterial3d<StandardMaterial>>(entity)
            .unwrap()
            .0
            .clone();
        let materials = app.world().resource::<Assets<StandardMaterial>>();
        let alpha = materials.get(&handle).unwrap().base_color.alpha();
        assert!((alpha - anim.opacity_at(4)).abs() < 1e-6);
    }
}
