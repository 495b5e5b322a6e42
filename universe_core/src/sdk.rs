//! SDK entry points and builder for composing the universe app.

use std::path::PathBuf;
use std::time::Duration;

use bevy::prelude::*;

use crate::anim::{AnimationSettings, InstanceAnimation};
use crate::camera::{
    camera_plugin, orbit_camera_plugin, CameraRig, FramingSettings, OrbitSettings,
};
use crate::config::{self, UniverseConfig};
use crate::data::{
    init_catalog_file_channel, init_static_channel, FilterState, Resource, ResourceChannel,
};
use crate::interaction::{
    ClickTiming, HandlerResource, InteractionHandler, PickSettings, PointerController,
};
use crate::layout::{CategoryPalette, LayoutMode, LayoutSettings};
use crate::render::{InstanceRenderer, OrbRenderer, RendererResource};
use crate::scene::{universe_plugin, CategoryTextures, UniverseSettings};
use crate::ui::{category_label_plugin, hud_plugin, inspector_plugin};

/// Where the resource list comes from.
enum CatalogSource {
    Resources(Vec<Resource>),
    File(PathBuf),
    Channel(ResourceChannel),
}

/// Builder for constructing an Orrery app with customizable plugins.
pub struct UniverseBuilder {
    source: Option<CatalogSource>,
    settings: UniverseSettings,
    animation: AnimationSettings,
    click_timing: ClickTiming,
    framing: FramingSettings,
    orbit: OrbitSettings,
    filter: FilterState,
    textures: CategoryTextures,
    handler: Option<Box<dyn InteractionHandler>>,
    renderer: Option<Box<dyn InstanceRenderer>>,
    window_title: String,
    window_resolution: (f32, f32),
    clear_color: Color,
    enable_orbit: bool,
    enable_hud: bool,
    enable_inspector: bool,
    enable_labels: bool,
}

impl Default for UniverseBuilder {
    fn default() -> Self {
        Self {
            source: None,
            settings: UniverseSettings::default(),
            animation: AnimationSettings::default(),
            click_timing: ClickTiming::default(),
            framing: FramingSettings::default(),
            orbit: OrbitSettings::default(),
            filter: FilterState::default(),
            textures: CategoryTextures::default(),
            handler: None,
            renderer: None,
            window_title: "Orrery".to_string(),
            window_resolution: (1280.0, 720.0),
            clear_color: Color::srgb(0.02, 0.02, 0.05),
            enable_orbit: true,
            enable_hud: true,
            enable_inspector: true,
            enable_labels: true,
        }
    }
}

impl UniverseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply environment configuration: catalog path and layout settings.
    pub fn config(mut self, config: &UniverseConfig) -> Self {
        self.settings.layout = config.layout_settings();
        self.source = Some(CatalogSource::File(config.catalog_path.clone()));
        self
    }

    /// Use a fixed resource list.
    pub fn resources(mut self, resources: Vec<Resource>) -> Self {
        self.source = Some(CatalogSource::Resources(resources));
        self
    }

    /// Load the resource list from a catalog JSON file.
    pub fn catalog_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(CatalogSource::File(path.into()));
        self
    }

    /// Receive resource lists from a host-owned publisher.
    pub fn channel(mut self, channel: ResourceChannel) -> Self {
        self.source = Some(CatalogSource::Channel(channel));
        self
    }

    pub fn layout_mode(mut self, mode: LayoutMode) -> Self {
        self.settings.layout.mode = mode;
        self
    }

    pub fn layout(mut self, layout: LayoutSettings) -> Self {
        self.settings.layout = layout;
        self
    }

    pub fn palette(mut self, palette: CategoryPalette) -> Self {
        self.settings.palette = palette;
        self
    }

    pub fn category_color(mut self, category: impl Into<String>, color: Color) -> Self {
        self.settings.palette = self.settings.palette.with_color(category, color);
        self
    }

    /// Texture asset path for a category's instances.
    pub fn category_texture(
        mut self,
        category: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        self.textures = self.textures.with_path(category, path);
        self
    }

    pub fn animation(mut self, animation: AnimationSettings) -> Self {
        self.animation = animation;
        self
    }

    pub fn click_timing(mut self, timing: ClickTiming) -> Self {
        self.click_timing = timing;
        self
    }

    pub fn picking(mut self, pick: PickSettings) -> Self {
        self.settings.pick = pick;
        self
    }

    pub fn framing(mut self, framing: FramingSettings) -> Self {
        self.framing = framing;
        self
    }

    pub fn orbit(mut self, orbit: OrbitSettings) -> Self {
        self.orbit = orbit;
        self
    }

    /// Root rotation in radians per second; 0 disables it.
    pub fn spin_speed(mut self, radians_per_sec: f32) -> Self {
        self.settings.spin_speed = radians_per_sec;
        self
    }

    /// Initial filter state.
    pub fn filter(mut self, filter: FilterState) -> Self {
        self.filter = filter;
        self
    }

    /// Receive hover/click callbacks. Defaults to logging them.
    pub fn handler(mut self, handler: impl InteractionHandler) -> Self {
        self.handler = Some(Box::new(handler));
        self
    }

    /// Provide a custom instance renderer implementation.
    pub fn renderer(mut self, renderer: impl InstanceRenderer) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    pub fn window_title(mut self, title: impl Into<String>) -> Self {
        self.window_title = title.into();
        self
    }

    pub fn window_resolution(mut self, width: f32, height: f32) -> Self {
        self.window_resolution = (width, height);
        self
    }

    pub fn clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    pub fn disable_orbit(mut self) -> Self {
        self.enable_orbit = false;
        self
    }

    pub fn disable_hud(mut self) -> Self {
        self.enable_hud = false;
        self
    }

    pub fn disable_inspector(mut self) -> Self {
        self.enable_inspector = false;
        self
    }

    pub fn disable_labels(mut self) -> Self {
        self.enable_labels = false;
        self
    }

    /// Disable every egui overlay.
    pub fn headless_ui(self) -> Self {
        self.disable_hud().disable_inspector().disable_labels()
    }

    /// Build the Bevy app with the selected configuration and plugins.
    pub fn build(self) -> App {
        let mut app = App::new();
        app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: self.window_title.clone(),
                resolution: self.window_resolution.into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(self.clear_color));
        self.install(&mut app);
        app
    }

    /// Install the universe into an existing app. The app must already
    /// provide time, input, asset storage and (for the overlays) a window.
    pub fn install(self, app: &mut App) {
        let channel = match self.source {
            Some(CatalogSource::Resources(resources)) => init_static_channel(resources),
            Some(CatalogSource::File(path)) => init_catalog_file_channel(&path, Duration::ZERO),
            Some(CatalogSource::Channel(channel)) => channel,
            None => {
                let path = config::universe_config().catalog_path;
                init_catalog_file_channel(&path, Duration::ZERO)
            }
        };
        let renderer = self
            .renderer
            .unwrap_or_else(|| Box::new(OrbRenderer::default()));
        let handler = match self.handler {
            Some(handler) => HandlerResource(handler),
            None => HandlerResource::default(),
        };

        renderer.setup(app);
        app.insert_resource(channel)
            .insert_resource(self.settings)
            .insert_resource(self.filter)
            .insert_resource(self.textures)
            .insert_resource(InstanceAnimation::new(self.animation))
            .insert_resource(PointerController::new(self.click_timing))
            .insert_resource(CameraRig::new(self.framing, self.orbit))
            .insert_resource(handler)
            .insert_resource(RendererResource(renderer))
            .add_plugins((universe_plugin, camera_plugin));

        if self.enable_orbit {
            app.add_plugins(orbit_camera_plugin);
        }
        if self.enable_hud {
            app.add_plugins(hud_plugin);
        }
        if self.enable_inspector {
            app.add_plugins(inspector_plugin);
        }
        if self.enable_labels {
            app.add_plugins(category_label_plugin);
        }
    }
}
