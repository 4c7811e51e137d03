//! HTTP layer — routing, request/response schemas, error mapping.
//!
//! Everything here is thin plumbing around `pipeline::assemble`; the
//! router is composable and can be mounted on any axum server instance.

pub mod error;
pub mod routes;
pub mod types;

pub use routes::service_router;
pub use types::ApiContext;
