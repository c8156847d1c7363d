//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the relay core and the outside world. Adapters implement these ports.
//!
//! ## Delivery Ports
//!
//! - `EventSink` - Non-blocking delivery of outbound events to a session

mod event_sink;

pub use event_sink::{DeliveryError, EventSink};
