//! Contract layer - public models and errors
//!
//! NO serde derives on models - these are pure domain types.

pub mod error;
pub mod model;

pub use error::StoreError;
pub use model::*;
