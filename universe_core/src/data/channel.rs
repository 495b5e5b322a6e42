use std::path::Path;
use std::time::Duration;

use bevy::log::{info, warn};
use crossbeam_channel::{Receiver, Sender};

use crate::data::catalog::load_catalog;
use crate::data::model::Resource;

/// Bevy resource holding the channel the host pushes resource lists into.
/// `ingest_catalog` drains it each frame and keeps only the newest list.
#[derive(bevy::prelude::Resource)]
pub struct ResourceChannel(pub Receiver<Vec<Resource>>);

/// Sending half kept by the host to publish new resource lists.
#[derive(Clone)]
pub struct CatalogPublisher(Sender<Vec<Resource>>);

impl CatalogPublisher {
    /// Never blocks; lists queued before the app drains the channel are
    /// superseded by the newest one. Returns false once the app side has
    /// been dropped.
    pub fn publish(&self, resources: Vec<Resource>) -> bool {
        self.0.send(resources).is_ok()
    }
}

/// Create a paired publisher/channel. Unbounded so publishing from the main
/// thread before `App::run` cannot stall.
pub fn catalog_channel() -> (CatalogPublisher, ResourceChannel) {
    let (tx, rx) = crossbeam_channel::unbounded();
    (CatalogPublisher(tx), ResourceChannel(rx))
}

/// Channel pre-loaded with a fixed resource list.
pub fn init_static_channel(resources: Vec<Resource>) -> ResourceChannel {
    let (publisher, channel) = catalog_channel();
    publisher.publish(resources);
    channel
}

/// Load a catalog file on a background thread and deliver it once, after
/// `delay`. Load failures are logged and leave the universe empty.
pub fn init_catalog_file_channel(path: &Path, delay: Duration) -> ResourceChannel {
    let (publisher, channel) = catalog_channel();
    let path = path.to_path_buf();

    std::thread::spawn(move || {
        std::thread::sleep(delay);
        match load_catalog(&path) {
            Ok(resources) => {
                info!("loaded {} resources from {}", resources.len(), path.display());
                publisher.publish(resources);
            }
            Err(err) => warn!("{err}"),
        }
    });

    channel
}
