//! HTTP server: host, record routes, CORS and the builder that wires them
//!
//! The `ServerBuilder` registers:
//! - the health and version endpoints
//! - CRUD routes for every record collection
//! - any custom routes supplied by the caller

pub mod builder;
pub mod cors;
pub mod exposure;
pub mod host;
pub mod router;

pub use builder::ServerBuilder;
pub use exposure::RestExposure;
pub use host::ServerHost;
