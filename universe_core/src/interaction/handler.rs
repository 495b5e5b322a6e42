//! Host-facing hover/click callbacks.

use bevy::prelude::*;
use crossbeam_channel::{Receiver, Sender};

use crate::data::Resource;

/// Resource-level interaction event, emitted as a Bevy event and forwarded
/// to channel handlers.
#[derive(Event, Clone, Debug, PartialEq)]
pub enum UniverseEvent {
    Hover {
        resource: Option<Resource>,
        screen_position: Vec2,
    },
    Click {
        resource: Resource,
    },
}

/// Callbacks invoked by the interaction systems.
pub trait InteractionHandler: Send + Sync + 'static {
    fn on_hover(&self, resource: Option<&Resource>, screen_position: Vec2);
    fn on_click(&self, resource: &Resource);
}

#[derive(Resource)]
pub struct HandlerResource(pub Box<dyn InteractionHandler>);

impl HandlerResource {
    pub fn new(handler: impl InteractionHandler) -> Self {
        Self(Box::new(handler))
    }
}

impl Default for HandlerResource {
    fn default() -> Self {
        Self::new(LoggingHandler)
    }
}

/// Logs hovers at debug level and clicks (with their link) at info level.
pub struct LoggingHandler;

impl InteractionHandler for LoggingHandler {
    fn on_hover(&self, resource: Option<&Resource>, screen_position: Vec2) {
        match resource {
            Some(r) => debug!("hover {} ({}) at {screen_position}", r.name, r.id),
            None => debug!("hover cleared"),
        }
    }

    fn on_click(&self, resource: &Resource) {
        match &resource.url {
            Some(url) => info!("open {} -> {url}", resource.name),
            None => info!("clicked {} (no link)", resource.name),
        }
    }
}

/// Forwards every callback to a host thread over a channel.
pub struct ChannelHandler {
    tx: Sender<UniverseEvent>,
}

impl InteractionHandler for ChannelHandler {
    fn on_hover(&self, resource: Option<&Resource>, screen_position: Vec2) {
        // A dropped receiver just means nobody is listening any more.
        let _ = self.tx.try_send(UniverseEvent::Hover {
            resource: resource.cloned(),
            screen_position,
        });
    }

    fn on_click(&self, resource: &Resource) {
        let _ = self.tx.try_send(UniverseEvent::Click {
            resource: resource.clone(),
        });
    }
}

pub fn channel_handler() -> (ChannelHandler, Receiver<UniverseEvent>) {
    let (tx, rx) = crossbeam_channel::unbounded();
    (ChannelHandler { tx }, rx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_handler_forwards_events() {
        let (handler, rx) = channel_handler();
        let resource = Resource::new(3, "wgpu", "Graphics", 9.0);

        handler.on_hover(Some(&resource), Vec2::new(4.0, 5.0));
        handler.on_click(&resource);
        handler.on_hover(None, Vec2::ZERO);

        assert_eq!(
            rx.try_recv().unwrap(),
            UniverseEvent::Hover {
                resource: Some(resource.clone()),
                screen_position: Vec2::new(4.0, 5.0)
            }
        );
        assert_eq!(rx.try_recv().unwrap(), UniverseEvent::Click { resource });
        assert!(matches!(
            rx.try_recv().unwrap(),
            UniverseEvent::Hover { resource: None, .. }
        ));
    }

    #[test]
    fn channel_handler_survives_dropped_receiver() {
        let (handler, rx) = channel_handler();
        drop(rx);
        handler.on_click(&Resource::new(1, "a", "b", 1.0));
    }
}
