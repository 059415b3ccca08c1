//! Persistence Adapters - Repository implementations
//!
//! These implement the repository traits from agency-domain.

pub mod in_memory;
pub mod postgres;
