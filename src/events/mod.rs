//! Events module - observability bus and event types

mod bus;
mod types;

pub use bus::{BusEvent, EventBus, log_events, update_event_bus_time};
pub use types::{ControllerSource, GameEvent};
