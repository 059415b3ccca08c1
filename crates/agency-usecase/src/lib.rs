//! # Spy Cat Agency Use Case Layer
//!
//! Application-specific business rules.
//! This layer sequences the domain's lifecycle checks against the
//! repositories and classifies every failure into an [`AppError`].
//!
//! - [`AgentService`] - hire, fire, salary updates
//! - [`MissionService`] - missions, targets, assignment and the
//!   completion cascade

pub mod agent_service;
pub mod error;
pub mod mission_service;

#[cfg(test)]
mod fake;

pub use agency_domain;
pub use agent_service::AgentService;
pub use error::{AppError, AppResult, ErrorKind};
pub use mission_service::MissionService;
