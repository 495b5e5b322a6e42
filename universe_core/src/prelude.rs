//! Minimal prelude for SDK consumers.

pub use crate::config::{universe_config, UniverseConfig};
pub use crate::data::{catalog_channel, CatalogPublisher, FilterState, Resource};
pub use crate::interaction::{channel_handler, InteractionHandler, UniverseEvent};
pub use crate::layout::{CategoryPalette, LayoutMode};
pub use crate::render::{InstanceRenderer, OrbRenderer};
pub use crate::scene::{Catalog, UniverseAccess};
pub use crate::sdk::UniverseBuilder;
