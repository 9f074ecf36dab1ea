//! Typed request and response schemas, one submodule per backend resource.
//!
//! Field names follow the backend's camelCase JSON; unknown response fields
//! are ignored unless a model says otherwise.

pub mod auth;
pub mod catalog;
pub mod personal;
pub mod solicitudes;
pub mod timbradas;
pub mod usuarios;

pub use auth::*;
pub use catalog::*;
pub use personal::*;
pub use solicitudes::*;
pub use timbradas::*;
pub use usuarios::*;

/// Reference to another record by id, as the backend expects in nested bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct IdRef {
    pub id: i64,
}

impl From<i64> for IdRef {
    fn from(id: i64) -> Self {
        Self { id }
    }
}
