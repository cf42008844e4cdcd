//! Author management module.
//!
//! Provides the author operations exposed over HTTP:
//! - HTTP adapter translating requests into commands and queries
//! - Command handler for author creation
//! - Query manager for retrieving author data
//! - Repository abstraction and the in-memory store
//! - Startup seed data

/// HTTP adapter for authors.
pub mod adapter;

/// Author creation command handler.
pub mod create_author_command;

/// Author query manager for data retrieval.
pub mod query_manager;

/// Author repository abstraction and implementations.
pub mod repository;

/// Initial author records loaded at startup.
pub mod seed;
