//! Authors API model.
//!
//! Wire types shared by the authors service and its clients:
//!
//! - [`model::author`]: the author record and its identifier
//! - [`model::author_service`]: request parsing and response bodies
//! - [`model::error`]: domain errors
//! - [`error`]: request validation errors with per-field violations

pub mod error;
pub mod model;
