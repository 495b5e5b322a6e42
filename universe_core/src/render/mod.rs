//! Renderer traits and default implementations.

mod orbs;

use bevy::prelude::*;

use crate::data::Resource;

pub use orbs::{GlowSettings, OrbRenderSettings, OrbRenderer, OrbSettings};

/// Everything a renderer needs to spawn one instance.
#[derive(Clone, Debug)]
pub struct InstanceSpec<'a> {
    pub index: usize,
    pub resource: &'a Resource,
    /// Position relative to the universe root.
    pub position: Vec3,
    pub color: Color,
    pub texture: Option<Handle<Image>>,
    pub scale: f32,
    pub opacity: f32,
}

/// Spawns the entities for a resource list. Instances must carry a
/// `MeshMaterial3d<StandardMaterial>` of their own so the sync system can
/// fade them individually.
pub trait InstanceRenderer: Send + Sync + 'static {
    fn setup(&self, _app: &mut App) {}
    /// Returns one entity per spec, in spec order, each parented to `root`.
    fn spawn_instances(
        &self,
        commands: &mut Commands,
        meshes: &mut ResMut<Assets<Mesh>>,
        materials: &mut ResMut<Assets<StandardMaterial>>,
        root: Entity,
        instances: &[InstanceSpec<'_>],
    ) -> Vec<Entity>;
}

#[derive(Resource)]
pub struct RendererResource(pub Box<dyn InstanceRenderer>);

impl RendererResource {
    pub fn new(renderer: impl InstanceRenderer) -> Self {
        Self(Box::new(renderer))
    }
}

impl Default for RendererResource {
    fn default() -> Self {
        Self::new(OrbRenderer::default())
    }
}
