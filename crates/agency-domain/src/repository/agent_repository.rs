//! Agent Repository - Abstract persistence for Agents

use async_trait::async_trait;

use crate::model::agent::{Agent, AgentId, NewAgent};
use crate::repository::RepositoryError;

/// Agent Repository Trait
///
/// This is a PORT in hexagonal architecture.
#[async_trait]
pub trait AgentRepository: Send + Sync {
    /// Persist a newly hired cat and hand back the stored entity
    async fn add(&self, agent: NewAgent) -> Result<Agent, RepositoryError>;

    /// Remove a cat.
    ///
    /// Fails with `ForeignKeyViolation` while any mission references it.
    async fn delete(&self, id: AgentId) -> Result<(), RepositoryError>;

    async fn update_salary(&self, id: AgentId, salary: f64) -> Result<(), RepositoryError>;

    /// All cats, ordered by id
    async fn list_all(&self) -> Result<Vec<Agent>, RepositoryError>;

    async fn find_by_id(&self, id: AgentId) -> Result<Option<Agent>, RepositoryError>;
}
