pub mod catalog;
mod channel;
mod model;

pub use catalog::load_catalog;
pub use channel::{
    catalog_channel, init_catalog_file_channel, init_static_channel, CatalogPublisher,
    ResourceChannel,
};
pub use model::{clamp_score, FilterState, Resource, MAX_SCORE, MIN_SCORE};
