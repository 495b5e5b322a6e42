//! Bevy wiring: the universe root, instance entities, and the per-frame
//! ingest → input → pick → animate → camera chain.

mod access;
mod instances;
pub(crate) mod materials;
mod pointer;
mod universe;

use bevy::prelude::*;

use crate::anim::InstanceAnimation;
use crate::data::FilterState;
use crate::interaction::{HandlerResource, PointerController, UniverseEvent};
use crate::render::RendererResource;

pub use access::UniverseAccess;
pub use instances::{animate_instances, sync_instance_visuals};
pub use materials::CategoryTextures;
pub use pointer::{advance_click_sequence, resolve_pointer, track_pointer, PointerOverUi};
pub use universe::{
    ingest_catalog, rotate_universe, setup_scene, Catalog, InstanceEntities, ResourceInstance,
    UniverseCamera, UniverseRoot, UniverseSettings,
};

/// Frame phases, run in this order every `Update`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniverseSet {
    /// egui pointer capture, before any input reads it.
    Ui,
    Ingest,
    Input,
    Resolve,
    Animate,
    Camera,
}

/// Core scene plugin. Resources already inserted (by the builder or a host)
/// are kept; anything missing gets its default.
pub fn universe_plugin(app: &mut App) {
    app.init_resource::<UniverseSettings>()
        .init_resource::<FilterState>()
        .init_resource::<Catalog>()
        .init_resource::<InstanceEntities>()
        .init_resource::<InstanceAnimation>()
        .init_resource::<PointerController>()
        .init_resource::<PointerOverUi>()
        .init_resource::<HandlerResource>()
        .init_resource::<RendererResource>()
        .init_resource::<CategoryTextures>()
        .add_event::<UniverseEvent>()
        .configure_sets(
            Update,
            (
                UniverseSet::Ui,
                UniverseSet::Ingest,
                UniverseSet::Input,
                UniverseSet::Resolve,
                UniverseSet::Animate,
                UniverseSet::Camera,
            )
                .chain(),
        )
        .add_systems(Startup, (setup_scene, materials::load_category_textures))
        .add_systems(Update, ingest_catalog.in_set(UniverseSet::Ingest))
        .add_systems(Update, track_pointer.in_set(UniverseSet::Input))
        .add_systems(
            Update,
            (resolve_pointer, advance_click_sequence)
                .chain()
                .in_set(UniverseSet::Resolve),
        )
        .add_systems(
            Update,
            (animate_instances, sync_instance_visuals, rotate_universe)
                .chain()
                .in_set(UniverseSet::Animate),
        );
}

#[cfg(test)]
pub(crate) mod test_support {
    use bevy::input::mouse::{MouseMotion, MouseWheel};
    use bevy::prelude::*;
    use bevy::window::WindowEvent;

    use crate::camera::camera_plugin;

    /// Headless app with the core plugins and the input/asset plumbing the
    /// window and render plugins would normally provide.
    pub fn headless_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .init_resource::<Assets<Image>>()
            .init_resource::<ButtonInput<MouseButton>>()
            .add_event::<WindowEvent>()
            .add_event::<MouseMotion>()
            .add_event::<MouseWheel>()
            .add_plugins((super::universe_plugin, camera_plugin));
        app
    }
}
