//! Orrery: an interactive 3D universe of catalogued resources.
//!
//! Library root: layout, animation, interaction and camera engines, the Bevy
//! scene that drives them, and the SDK builder.

pub mod anim;
pub mod camera;
pub mod config;
pub mod data;
pub mod error;
pub mod interaction;
pub mod layout;
pub mod render;
pub mod scene;
mod ui;

pub mod prelude;
pub mod sdk;

pub use data::{load_catalog, FilterState, Resource};
pub use error::CatalogError;
pub use layout::{compute_layout, LayoutMode, UniverseLayout};
pub use ui::{HudState, LabelSettings};
