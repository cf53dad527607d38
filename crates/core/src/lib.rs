//! Core types and shared functionality for pagesplice.
//!
//! This crate provides:
//! - Session-scoped key/value storage abstraction
//! - TTL-gated page cache built on top of it
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;
pub mod store;

pub use cache::PageCache;
pub use config::AppConfig;
pub use error::Error;
pub use store::{MemoryStore, SessionStore};
