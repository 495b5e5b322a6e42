//! Universe root, catalog snapshot and instance lifecycle.

use std::sync::Arc;

use bevy::prelude::*;

use crate::anim::InstanceAnimation;
use crate::data::{FilterState, Resource, ResourceChannel};
use crate::interaction::{HandlerResource, PickSettings, PointerController, UniverseEvent};
use crate::layout::{compute_layout, CategoryPalette, LayoutSettings, UniverseLayout};
use crate::render::{InstanceSpec, RendererResource};
use crate::scene::CategoryTextures;

/// Parent of every instance; spins slowly while no filter is active.
#[derive(Component)]
pub struct UniverseRoot;

#[derive(Component)]
pub struct UniverseCamera;

/// Index into the current resource list, plus the id for debugging.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResourceInstance {
    pub index: usize,
    pub id: u64,
}

#[derive(Resource, Clone, Debug)]
pub struct UniverseSettings {
    pub layout: LayoutSettings,
    pub palette: CategoryPalette,
    pub pick: PickSettings,
    /// Root rotation about Y in radians per second.
    pub spin_speed: f32,
}

impl Default for UniverseSettings {
    fn default() -> Self {
        Self {
            layout: LayoutSettings::default(),
            palette: CategoryPalette::default(),
            pick: PickSettings::default(),
            spin_speed: 0.03,
        }
    }
}

/// Current resource list and its layout, swapped together as one snapshot.
#[derive(Resource, Clone, Debug, Default)]
pub struct Catalog {
    resources: Arc<Vec<Resource>>,
    layout: Arc<UniverseLayout>,
    generation: u64,
}

impl Catalog {
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn layout(&self) -> &UniverseLayout {
        &self.layout
    }

    pub fn resource_at(&self, index: usize) -> Option<&Resource> {
        self.resources.get(index)
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Bumped on every swap.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn replace(&mut self, resources: Vec<Resource>, layout: UniverseLayout) {
        self.resources = Arc::new(resources);
        self.layout = Arc::new(layout);
        self.generation += 1;
    }
}

/// Instance entities in resource-list order.
#[derive(Resource, Debug, Default)]
pub struct InstanceEntities(pub Vec<Entity>);

pub fn setup_scene(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 60.0, 140.0).looking_at(Vec3::ZERO, Vec3::Y),
        UniverseCamera,
    ));
    commands.spawn((
        DirectionalLight {
            illuminance: 6_000.0,
            ..default()
        },
        Transform::from_xyz(40.0, 80.0, 40.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 400.0,
    });
    commands.spawn((
        UniverseRoot,
        Transform::default(),
        Visibility::Visible,
        Name::new("universe"),
    ));
}

/// Swaps in the newest resource list waiting on the channel (or re-lays out
/// the current one after a settings change), respawns the instances and
/// re-mounts the animation state.
#[allow(clippy::too_many_arguments)]
pub fn ingest_catalog(
    mut commands: Commands,
    time: Res<Time>,
    channel: Option<Res<ResourceChannel>>,
    settings: Res<UniverseSettings>,
    renderer: Res<RendererResource>,
    textures: Res<CategoryTextures>,
    handler: Res<HandlerResource>,
    roots: Query<Entity, With<UniverseRoot>>,
    mut catalog: ResMut<Catalog>,
    mut entities: ResMut<InstanceEntities>,
    mut anim: ResMut<InstanceAnimation>,
    mut pointer: ResMut<PointerController>,
    mut events: EventWriter<UniverseEvent>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Ok(root) = roots.get_single() else {
        return;
    };
    let incoming = channel.and_then(|channel| channel.0.try_iter().last());
    let relayout = settings.is_changed() && !settings.is_added() && !catalog.is_empty();
    let (resources, fresh) = match incoming {
        Some(resources) => (resources, true),
        None if relayout => (catalog.resources().to_vec(), false),
        None => return,
    };

    for entity in entities.0.drain(..) {
        commands.entity(entity).despawn_recursive();
    }
    if pointer.intent().hovered.is_some() {
        let screen_position = pointer.cursor().unwrap_or(Vec2::NAN);
        handler.0.on_hover(None, screen_position);
        events.send(UniverseEvent::Hover {
            resource: None,
            screen_position,
        });
    }
    pointer.reset_indices();

    let layout = compute_layout(&resources, &settings.layout, &settings.palette);
    let now = time.elapsed_secs();
    anim.mount(&resources, now);
    // A new list always enters; a relayout of the current one does not.
    if fresh {
        anim.rearm_entrance(now);
    }

    entities.0 = {
        let specs: Vec<InstanceSpec<'_>> = resources
            .iter()
            .enumerate()
            .map(|(index, resource)| InstanceSpec {
                index,
                resource,
                position: layout.position_at(index).unwrap_or_default(),
                color: settings
                    .palette
                    .color_for(&resource.category, resource.color.as_deref()),
                texture: textures.texture_for(&resource.category),
                scale: anim.rendered_scale(index).unwrap_or(0.0),
                opacity: anim.opacity_at(index),
            })
            .collect();
        renderer
            .0
            .spawn_instances(&mut commands, &mut meshes, &mut materials, root, &specs)
    };

    info!(
        "universe: {} resources in {} categories ({} layout{})",
        resources.len(),
        layout.clusters().len(),
        layout.mode(),
        if fresh { ", entrance armed" } else { "" }
    );
    catalog.replace(resources, layout);
}

pub fn rotate_universe(
    time: Res<Time>,
    filter: Res<FilterState>,
    settings: Res<UniverseSettings>,
    mut roots: Query<&mut Transform, With<UniverseRoot>>,
) {
    if !filter.is_empty() || settings.spin_speed == 0.0 {
        return;
    }
    let angle = settings.spin_speed * time.delta_secs();
    for mut transform in &mut roots {
        transform.rotate_y(angle);
    }
}
