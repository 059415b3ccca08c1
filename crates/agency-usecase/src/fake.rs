//! Write-counting wrapper around the in-memory adapter, for service tests
//!
//! Storage is the adapter's `InMemoryStore`. Reads pass straight through;
//! every write is counted first and fails once `fail_writes` was called.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use agency_adapter::repository::in_memory::{
    InMemoryAgentRepository, InMemoryMissionRepository, InMemoryStore,
};
use agency_domain::{
    Agent, AgentId, AgentRepository, Mission, MissionId, MissionRepository, NewAgent,
    NewMission, NewTarget, RepositoryError, Target, TargetId,
};
use async_trait::async_trait;

#[derive(Default)]
struct Writes {
    count: AtomicUsize,
    failing: AtomicBool,
}

impl Writes {
    fn record(&self) -> Result<(), RepositoryError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(RepositoryError::persistence("disk on fire"));
        }
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct FakeStore {
    store: InMemoryStore,
    writes: Arc<Writes>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn agents(&self) -> Arc<dyn AgentRepository> {
        Arc::new(FakeAgents {
            inner: self.store.agent_repository(),
            writes: Arc::clone(&self.writes),
        })
    }

    pub fn missions(&self) -> Arc<dyn MissionRepository> {
        Arc::new(FakeMissions {
            inner: self.store.mission_repository(),
            writes: Arc::clone(&self.writes),
        })
    }

    pub fn writes(&self) -> usize {
        self.writes.count.load(Ordering::SeqCst)
    }

    pub fn fail_writes(&self) {
        self.writes.failing.store(true, Ordering::SeqCst);
    }

    /// Inserts a cat behind the services' back; not counted as a write
    pub async fn seed_agent(&self, name: &str) -> AgentId {
        let profile = NewAgent {
            name: name.to_string(),
            years_of_experience: 3,
            breed: "Bengal".to_string(),
            salary: 900.0,
        };
        self.store
            .agent_repository()
            .add(profile)
            .await
            .unwrap()
            .id()
    }

    pub async fn mission(&self, id: MissionId) -> Option<Mission> {
        self.store.mission_repository().find_by_id(id).await.unwrap()
    }

    pub async fn agent(&self, id: AgentId) -> Option<Agent> {
        self.store.agent_repository().find_by_id(id).await.unwrap()
    }
}

struct FakeAgents {
    inner: InMemoryAgentRepository,
    writes: Arc<Writes>,
}

#[async_trait]
impl AgentRepository for FakeAgents {
    async fn add(&self, agent: NewAgent) -> Result<Agent, RepositoryError> {
        self.writes.record()?;
        self.inner.add(agent).await
    }

    async fn delete(&self, id: AgentId) -> Result<(), RepositoryError> {
        self.writes.record()?;
        self.inner.delete(id).await
    }

    async fn update_salary(&self, id: AgentId, salary: f64) -> Result<(), RepositoryError> {
        self.writes.record()?;
        self.inner.update_salary(id, salary).await
    }

    async fn list_all(&self) -> Result<Vec<Agent>, RepositoryError> {
        self.inner.list_all().await
    }

    async fn find_by_id(&self, id: AgentId) -> Result<Option<Agent>, RepositoryError> {
        self.inner.find_by_id(id).await
    }
}

struct FakeMissions {
    inner: InMemoryMissionRepository,
    writes: Arc<Writes>,
}

#[async_trait]
impl MissionRepository for FakeMissions {
    async fn add_mission(&self, mission: NewMission) -> Result<Mission, RepositoryError> {
        self.writes.record()?;
        self.inner.add_mission(mission).await
    }

    async fn assign(
        &self,
        mission_id: MissionId,
        agent_id: AgentId,
    ) -> Result<(), RepositoryError> {
        self.writes.record()?;
        self.inner.assign(mission_id, agent_id).await
    }

    async fn find_by_id(&self, id: MissionId) -> Result<Option<Mission>, RepositoryError> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_agent(&self, agent_id: AgentId) -> Result<Option<Mission>, RepositoryError> {
        self.inner.find_by_agent(agent_id).await
    }

    async fn delete_mission(&self, id: MissionId) -> Result<(), RepositoryError> {
        self.writes.record()?;
        self.inner.delete_mission(id).await
    }

    async fn list_all(&self) -> Result<Vec<Mission>, RepositoryError> {
        self.inner.list_all().await
    }

    async fn update_completion(
        &self,
        id: MissionId,
        completed: bool,
    ) -> Result<(), RepositoryError> {
        self.writes.record()?;
        self.inner.update_completion(id, completed).await
    }

    async fn find_target(&self, id: TargetId) -> Result<Option<Target>, RepositoryError> {
        self.inner.find_target(id).await
    }

    async fn delete_target(&self, id: TargetId) -> Result<(), RepositoryError> {
        self.writes.record()?;
        self.inner.delete_target(id).await
    }

    async fn add_target(
        &self,
        mission_id: MissionId,
        target: NewTarget,
    ) -> Result<Target, RepositoryError> {
        self.writes.record()?;
        self.inner.add_target(mission_id, target).await
    }

    async fn complete_target(&self, id: TargetId) -> Result<(), RepositoryError> {
        self.writes.record()?;
        self.inner.complete_target(id).await
    }

    async fn update_target_notes(&self, id: TargetId, notes: &str) -> Result<(), RepositoryError> {
        self.writes.record()?;
        self.inner.update_target_notes(id, notes).await
    }
}
