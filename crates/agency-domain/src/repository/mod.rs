//! Repository Traits - The "Ports" of Hexagonal Architecture
//!
//! These traits define HOW the domain wants to persist data,
//! but NOT how it's actually done. That's the adapter's job.
//!
//! ```text
//! Domain Layer          │  Adapter Layer
//! ──────────────────────┼────────────────────────
//! trait MissionRepo     │  PgMissionRepository
//!   fn find_by_id()     │  InMemoryMissionRepository
//!   fn assign()         │
//! ```
//!
//! Absence is `Ok(None)` on reads. `RepositoryError::NotFound` is reserved
//! for writes that hit a row which is no longer there.

pub mod agent_repository;
pub mod mission_repository;

/// Errors that can occur during repository operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The row a write was aimed at does not exist
    NotFound { entity: &'static str, id: i64 },
    /// A write would leave a dangling reference (or remove a referenced row)
    ForeignKeyViolation { message: String },
    /// Failed to persist
    PersistenceError { message: String },
}

impl RepositoryError {
    pub fn persistence(message: impl Into<String>) -> Self {
        RepositoryError::PersistenceError {
            message: message.into(),
        }
    }
}

impl core::fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RepositoryError::NotFound { entity, id } => {
                write!(f, "{} not found: {}", entity, id)
            }
            RepositoryError::ForeignKeyViolation { message } => {
                write!(f, "Foreign key violation: {}", message)
            }
            RepositoryError::PersistenceError { message } => {
                write!(f, "Persistence error: {}", message)
            }
        }
    }
}

impl std::error::Error for RepositoryError {}
