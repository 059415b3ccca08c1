//! Mission Repository - Abstract persistence for Missions and their Targets
//!
//! Targets have no repository of their own; they live and die with the
//! mission aggregate, so their operations sit on this port too.

use async_trait::async_trait;

use crate::model::agent::AgentId;
use crate::model::mission::{Mission, MissionId, NewMission};
use crate::model::target::{NewTarget, Target, TargetId};
use crate::repository::RepositoryError;

/// Mission Repository Trait
///
/// This is a PORT in hexagonal architecture.
/// The domain defines what it needs; adapters provide implementations.
#[async_trait]
pub trait MissionRepository: Send + Sync {
    /// Create the mission row, its target rows and the optional initial
    /// assignment as one unit
    async fn add_mission(&self, mission: NewMission) -> Result<Mission, RepositoryError>;

    async fn assign(&self, mission_id: MissionId, agent_id: AgentId)
        -> Result<(), RepositoryError>;

    /// Find a mission by ID, targets included
    async fn find_by_id(&self, id: MissionId) -> Result<Option<Mission>, RepositoryError>;

    /// The mission referencing this cat, completed or not.
    ///
    /// `Ok(None)` means the cat is free; it is never an error.
    async fn find_by_agent(&self, agent_id: AgentId) -> Result<Option<Mission>, RepositoryError>;

    /// Delete a mission together with all of its targets
    async fn delete_mission(&self, id: MissionId) -> Result<(), RepositoryError>;

    /// All missions ordered by id, each with its full target list
    async fn list_all(&self) -> Result<Vec<Mission>, RepositoryError>;

    async fn update_completion(&self, id: MissionId, completed: bool)
        -> Result<(), RepositoryError>;

    // ========== Targets ==========

    async fn find_target(&self, id: TargetId) -> Result<Option<Target>, RepositoryError>;

    async fn delete_target(&self, id: TargetId) -> Result<(), RepositoryError>;

    async fn add_target(
        &self,
        mission_id: MissionId,
        target: NewTarget,
    ) -> Result<Target, RepositoryError>;

    async fn complete_target(&self, id: TargetId) -> Result<(), RepositoryError>;

    async fn update_target_notes(&self, id: TargetId, notes: &str)
        -> Result<(), RepositoryError>;
}
