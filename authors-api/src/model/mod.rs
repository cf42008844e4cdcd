//! Model definitions for the authors service.

/// Author record and identifier.
pub mod author;
/// Author service request parsing and response bodies.
pub mod author_service;
/// Domain errors for author operations.
pub mod error;
