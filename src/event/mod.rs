mod bus;
mod events;

pub use bus::EventBus;
pub use events::{DrawnFeature, EngineEvent, MapViewEvent};

/// Receives events published by the map view host
pub trait EventHandler {
    fn handle_event(&mut self, event: &MapViewEvent);
}

/// Logs every event at debug level
#[derive(Debug, Default)]
pub struct LogEventHandler;

impl EventHandler for LogEventHandler {
    fn handle_event(&mut self, event: &MapViewEvent) {
        log::debug!("map view event: {:?}", event);
    }
}
