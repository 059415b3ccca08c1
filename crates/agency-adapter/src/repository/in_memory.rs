//! In-Memory Repository Implementations
//!
//! Table-shaped in-memory storage behind the repository traits.
//! Enforces the same foreign keys as the PostgreSQL schema so services
//! behave identically on both. Useful for testing and development.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use agency_domain::{
    Agent, AgentId, AgentRepository, Mission, MissionId, MissionRepository, NewAgent,
    NewMission, NewTarget, RepositoryError, Target, TargetId,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

struct CatRow {
    profile: NewAgent,
    created_at: DateTime<Utc>,
}

struct MissionRow {
    name: String,
    cat_id: Option<AgentId>,
    completed: bool,
    created_at: DateTime<Utc>,
}

struct TargetRow {
    mission_id: MissionId,
    details: NewTarget,
    completed: bool,
    created_at: DateTime<Utc>,
}

/// One sequence per table, like BIGSERIAL
#[derive(Default)]
struct Tables {
    cats: BTreeMap<i64, CatRow>,
    missions: BTreeMap<i64, MissionRow>,
    targets: BTreeMap<i64, TargetRow>,
    cat_seq: i64,
    mission_seq: i64,
    target_seq: i64,
}

impl Tables {
    fn cat(&self, id: i64) -> Option<Agent> {
        self.cats
            .get(&id)
            .map(|row| Agent::new(AgentId::new(id), row.profile.clone(), row.created_at))
    }

    fn target(&self, id: i64) -> Option<Target> {
        self.targets.get(&id).map(|row| {
            Target::new(
                TargetId::new(id),
                row.mission_id,
                row.details.clone(),
                row.completed,
                row.created_at,
            )
        })
    }

    fn mission(&self, id: i64) -> Option<Mission> {
        let row = self.missions.get(&id)?;
        let targets = self
            .targets
            .iter()
            .filter(|(_, t)| t.mission_id.value() == id)
            .filter_map(|(target_id, _)| self.target(*target_id))
            .collect();
        Some(Mission::new(
            MissionId::new(id),
            row.name.clone(),
            row.cat_id,
            targets,
            row.completed,
            row.created_at,
        ))
    }

    fn ensure_cat_exists(&self, id: AgentId) -> Result<(), RepositoryError> {
        if self.cats.contains_key(&id.value()) {
            Ok(())
        } else {
            Err(RepositoryError::ForeignKeyViolation {
                message: format!("missions.cat_id references missing cat {}", id),
            })
        }
    }

    fn insert_target(&mut self, mission_id: MissionId, details: NewTarget) -> i64 {
        self.target_seq += 1;
        let id = self.target_seq;
        self.targets.insert(
            id,
            TargetRow {
                mission_id,
                details,
                completed: false,
                created_at: Utc::now(),
            },
        );
        id
    }

    fn mission_row_mut(&mut self, id: MissionId) -> Result<&mut MissionRow, RepositoryError> {
        self.missions
            .get_mut(&id.value())
            .ok_or(RepositoryError::NotFound {
                entity: "mission",
                id: id.value(),
            })
    }

    fn target_row_mut(&mut self, id: TargetId) -> Result<&mut TargetRow, RepositoryError> {
        self.targets
            .get_mut(&id.value())
            .ok_or(RepositoryError::NotFound {
                entity: "target",
                id: id.value(),
            })
    }
}

/// Shared in-memory database
///
/// Thread-safe implementation using RwLock. Clones share the same tables.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn agent_repository(&self) -> InMemoryAgentRepository {
        InMemoryAgentRepository {
            store: self.clone(),
        }
    }

    pub fn mission_repository(&self) -> InMemoryMissionRepository {
        InMemoryMissionRepository {
            store: self.clone(),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, RepositoryError> {
        self.tables
            .read()
            .map_err(|_| RepositoryError::persistence("Failed to acquire read lock"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, RepositoryError> {
        self.tables
            .write()
            .map_err(|_| RepositoryError::persistence("Failed to acquire write lock"))
    }
}

/// In-memory Agent Repository
#[derive(Clone)]
pub struct InMemoryAgentRepository {
    store: InMemoryStore,
}

#[async_trait]
impl AgentRepository for InMemoryAgentRepository {
    async fn add(&self, agent: NewAgent) -> Result<Agent, RepositoryError> {
        let mut tables = self.store.write()?;
        tables.cat_seq += 1;
        let id = tables.cat_seq;
        let created_at = Utc::now();
        tables.cats.insert(
            id,
            CatRow {
                profile: agent.clone(),
                created_at,
            },
        );
        Ok(Agent::new(AgentId::new(id), agent, created_at))
    }

    async fn delete(&self, id: AgentId) -> Result<(), RepositoryError> {
        let mut tables = self.store.write()?;
        if let Some((mission_id, _)) = tables.missions.iter().find(|(_, m)| m.cat_id == Some(id)) {
            return Err(RepositoryError::ForeignKeyViolation {
                message: format!("cat {} is still referenced by mission {}", id, mission_id),
            });
        }
        tables
            .cats
            .remove(&id.value())
            .map(|_| ())
            .ok_or(RepositoryError::NotFound {
                entity: "cat",
                id: id.value(),
            })
    }

    async fn update_salary(&self, id: AgentId, salary: f64) -> Result<(), RepositoryError> {
        let mut tables = self.store.write()?;
        let row = tables
            .cats
            .get_mut(&id.value())
            .ok_or(RepositoryError::NotFound {
                entity: "cat",
                id: id.value(),
            })?;
        row.profile.salary = salary;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Agent>, RepositoryError> {
        let tables = self.store.read()?;
        Ok(tables.cats.keys().filter_map(|id| tables.cat(*id)).collect())
    }

    async fn find_by_id(&self, id: AgentId) -> Result<Option<Agent>, RepositoryError> {
        Ok(self.store.read()?.cat(id.value()))
    }
}

/// In-memory Mission Repository
#[derive(Clone)]
pub struct InMemoryMissionRepository {
    store: InMemoryStore,
}

#[async_trait]
impl MissionRepository for InMemoryMissionRepository {
    async fn add_mission(&self, mission: NewMission) -> Result<Mission, RepositoryError> {
        // Single write lock for the whole unit: nobody sees a half-built mission
        let mut tables = self.store.write()?;
        if let Some(cat_id) = mission.agent_id {
            tables.ensure_cat_exists(cat_id)?;
        }

        tables.mission_seq += 1;
        let id = tables.mission_seq;
        tables.missions.insert(
            id,
            MissionRow {
                name: mission.name,
                cat_id: mission.agent_id,
                completed: false,
                created_at: Utc::now(),
            },
        );
        for details in mission.targets {
            tables.insert_target(MissionId::new(id), details);
        }

        tables
            .mission(id)
            .ok_or_else(|| RepositoryError::persistence("mission vanished while being created"))
    }

    async fn assign(
        &self,
        mission_id: MissionId,
        agent_id: AgentId,
    ) -> Result<(), RepositoryError> {
        let mut tables = self.store.write()?;
        tables.ensure_cat_exists(agent_id)?;
        tables.mission_row_mut(mission_id)?.cat_id = Some(agent_id);
        Ok(())
    }

    async fn find_by_id(&self, id: MissionId) -> Result<Option<Mission>, RepositoryError> {
        Ok(self.store.read()?.mission(id.value()))
    }

    async fn find_by_agent(&self, agent_id: AgentId) -> Result<Option<Mission>, RepositoryError> {
        let tables = self.store.read()?;
        let found = tables
            .missions
            .iter()
            .find(|(_, m)| m.cat_id == Some(agent_id))
            .map(|(id, _)| *id);
        Ok(found.and_then(|id| tables.mission(id)))
    }

    async fn delete_mission(&self, id: MissionId) -> Result<(), RepositoryError> {
        let mut tables = self.store.write()?;
        if tables.missions.remove(&id.value()).is_none() {
            return Err(RepositoryError::NotFound {
                entity: "mission",
                id: id.value(),
            });
        }
        tables.targets.retain(|_, t| t.mission_id != id);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Mission>, RepositoryError> {
        let tables = self.store.read()?;
        Ok(tables
            .missions
            .keys()
            .filter_map(|id| tables.mission(*id))
            .collect())
    }

    async fn update_completion(
        &self,
        id: MissionId,
        completed: bool,
    ) -> Result<(), RepositoryError> {
        self.store.write()?.mission_row_mut(id)?.completed = completed;
        Ok(())
    }

    async fn find_target(&self, id: TargetId) -> Result<Option<Target>, RepositoryError> {
        Ok(self.store.read()?.target(id.value()))
    }

    async fn delete_target(&self, id: TargetId) -> Result<(), RepositoryError> {
        self.store
            .write()?
            .targets
            .remove(&id.value())
            .map(|_| ())
            .ok_or(RepositoryError::NotFound {
                entity: "target",
                id: id.value(),
            })
    }

    async fn add_target(
        &self,
        mission_id: MissionId,
        target: NewTarget,
    ) -> Result<Target, RepositoryError> {
        let mut tables = self.store.write()?;
        if !tables.missions.contains_key(&mission_id.value()) {
            return Err(RepositoryError::ForeignKeyViolation {
                message: format!("targets.mission_id references missing mission {}", mission_id),
            });
        }
        let id = tables.insert_target(mission_id, target);
        tables
            .target(id)
            .ok_or_else(|| RepositoryError::persistence("target vanished while being created"))
    }

    async fn complete_target(&self, id: TargetId) -> Result<(), RepositoryError> {
        self.store.write()?.target_row_mut(id)?.completed = true;
        Ok(())
    }

    async fn update_target_notes(&self, id: TargetId, notes: &str) -> Result<(), RepositoryError> {
        self.store.write()?.target_row_mut(id)?.details.notes = notes.to_string();
        Ok(())
    }
}
