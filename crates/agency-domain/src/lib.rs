//! # Spy Cat Agency Domain Layer
//!
//! The heart of the agency - entities, lifecycle rules and the ports
//! the use case layer talks through.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Domain Layer (This Crate)                     │
//! │  ┌─────────────────────────────────────────────────────────────┐│
//! │  │  model/     - Entities & Value Objects, lifecycle checks    ││
//! │  │  repository/- Persistence ports (not implementations)       ││
//! │  │  gateway/   - Ports to external systems (breed catalog)     ││
//! │  └─────────────────────────────────────────────────────────────┘│
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Golden Rule
//!
//! **This crate knows nothing about HTTP or SQL.**
//!
//! If we switch from PostgreSQL to something else, this crate doesn't change.
//! If the breed whitelist moves to another provider, this crate doesn't change.

pub mod gateway;
pub mod model;
pub mod repository;

// Re-export commonly used types
pub use model::{
    agent::{Agent, AgentId, NewAgent},
    mission::{Mission, MissionId, NewMission, RuleViolation, MAX_TARGETS, MIN_TARGETS},
    target::{NewTarget, Target, TargetId},
};

pub use repository::{
    agent_repository::AgentRepository,
    mission_repository::MissionRepository,
    RepositoryError,
};

pub use gateway::breed_catalog::BreedCatalog;
