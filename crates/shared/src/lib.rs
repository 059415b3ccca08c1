//! # Spy Cat Agency Shared
//!
//! Configuration types and the error type used while loading them.

pub mod config;
pub mod error;

// Re-exports
pub use config::*;
pub use error::*;
