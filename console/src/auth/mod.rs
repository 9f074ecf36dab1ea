//! Authentication module for the console session.
//!
//! This module provides login and logout against the backend, the persisted
//! session record, and the guard every screen passes through before it may
//! use the session.

pub mod middleware;
pub mod models;
pub mod service;
pub mod store;

// Re-exports for convenience
pub use middleware::*;
pub use models::*;
pub use service::*;
pub use store::*;
