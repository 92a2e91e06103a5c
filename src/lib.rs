//! Job Board Server Library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod auth;
pub mod board_store;
pub mod gateway;
pub mod server;
pub mod sqlite_persistence;

// Re-export commonly used types for convenience
pub use board_store::{BoardStore, SqliteBoardStore};
pub use server::{make_app, run_server, RequestsLoggingLevel, ServerConfig};
