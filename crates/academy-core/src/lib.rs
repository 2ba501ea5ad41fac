//! Shared HTTP plumbing for Academy services.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
