pub mod author;
pub mod config;
pub mod error;
pub mod server;
pub mod tracing;

pub use server::create_app;
