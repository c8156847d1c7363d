//! HTTP surface of the relay.

mod router;

pub use router::{build_router, HealthResponse};
