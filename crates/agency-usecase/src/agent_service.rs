//! Agent lifecycle - hiring, firing and paying cats

use std::sync::Arc;

use agency_domain::{Agent, AgentId, AgentRepository, NewAgent, RepositoryError};
use tracing::info;

use crate::error::{AppError, AppResult};

pub struct AgentService {
    agents: Arc<dyn AgentRepository>,
}

impl AgentService {
    pub fn new(agents: Arc<dyn AgentRepository>) -> Self {
        Self { agents }
    }

    /// Persist a new cat. Field validation is the request layer's job.
    pub async fn hire(&self, profile: NewAgent) -> AppResult<Agent> {
        let agent = self.agents.add(profile).await?;
        info!(cat_id = %agent.id(), breed = agent.breed(), "cat hired");
        Ok(agent)
    }

    /// Remove a cat that is not referenced by any mission
    pub async fn fire(&self, id: AgentId) -> AppResult<()> {
        self.get(id).await?;

        match self.agents.delete(id).await {
            Ok(()) => {
                info!(cat_id = %id, "cat fired");
                Ok(())
            }
            Err(RepositoryError::ForeignKeyViolation { message }) => Err(AppError::conflict(
                format!("cat {} is still referenced by a mission: {}", id, message),
                "you cannot fire cat, while it is on mission",
            )),
            Err(other) => Err(AppError::database(other.to_string())),
        }
    }

    pub async fn update_salary(&self, id: AgentId, salary: f64) -> AppResult<()> {
        self.get(id).await?;
        self.agents.update_salary(id, salary).await?;
        info!(cat_id = %id, salary, "salary updated");
        Ok(())
    }

    pub async fn list(&self) -> AppResult<Vec<Agent>> {
        Ok(self.agents.list_all().await?)
    }

    pub async fn get(&self, id: AgentId) -> AppResult<Agent> {
        self.agents.find_by_id(id).await?.ok_or_else(|| {
            AppError::not_found(format!("cat {} not found", id), "there is no cat with such id")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::fake::FakeStore;
    use crate::mission_service::MissionService;
    use agency_domain::{NewMission, NewTarget};

    fn profile(name: &str) -> NewAgent {
        NewAgent {
            name: name.to_string(),
            years_of_experience: 2,
            breed: "Siamese".to_string(),
            salary: 1500.0,
        }
    }

    #[tokio::test]
    async fn test_hire_then_list_in_id_order() {
        let store = FakeStore::new();
        let service = AgentService::new(store.agents());

        let tom = service.hire(profile("Tom")).await.unwrap();
        let felix = service.hire(profile("Felix")).await.unwrap();

        let all = service.list().await.unwrap();
        let ids: Vec<_> = all.iter().map(|a| a.id()).collect();
        assert_eq!(ids, vec![tom.id(), felix.id()]);
    }

    #[tokio::test]
    async fn test_list_is_empty_not_an_error() {
        let service = AgentService::new(FakeStore::new().agents());
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_cat_is_not_found() {
        let store = FakeStore::new();
        let service = AgentService::new(store.agents());
        let ghost = AgentId::new(404);

        assert_eq!(service.get(ghost).await.unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(service.fire(ghost).await.unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(
            service.update_salary(ghost, 10.0).await.unwrap_err().kind(),
            ErrorKind::NotFound
        );
        assert_eq!(store.writes(), 0);
    }

    #[tokio::test]
    async fn test_update_salary() {
        let store = FakeStore::new();
        let service = AgentService::new(store.agents());
        let id = store.seed_agent("Tom").await;

        service.update_salary(id, 4200.0).await.unwrap();

        assert_eq!(service.get(id).await.unwrap().salary(), 4200.0);
    }

    #[tokio::test]
    async fn test_fire_blocked_while_referenced_by_any_mission() {
        let store = FakeStore::new();
        let agents = AgentService::new(store.agents());
        let missions = MissionService::new(store.missions());
        let cat = store.seed_agent("Tom").await;

        let mission = missions
            .add_mission(NewMission::new("Recon", vec![NewTarget::new("Jerry", "France")]))
            .await
            .unwrap();
        missions.assign(mission.id(), cat).await.unwrap();

        let err = agents.fire(cat).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.client_message(), "you cannot fire cat, while it is on mission");

        // Completing the mission does not release the cat
        let target = mission.targets()[0].id();
        missions.complete_target(target).await.unwrap();
        assert!(store.mission(mission.id()).await.unwrap().is_completed());
        assert_eq!(agents.fire(cat).await.unwrap_err().kind(), ErrorKind::Conflict);
        assert!(store.agent(cat).await.is_some());
    }

    #[tokio::test]
    async fn test_fire_free_cat() {
        let store = FakeStore::new();
        let service = AgentService::new(store.agents());
        let cat = store.seed_agent("Tom").await;

        service.fire(cat).await.unwrap();

        assert!(store.agent(cat).await.is_none());
    }

    #[tokio::test]
    async fn test_persistence_failure_is_database_error() {
        let store = FakeStore::new();
        let service = AgentService::new(store.agents());
        let cat = store.seed_agent("Tom").await;
        store.fail_writes();

        let err = service.fire(cat).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Database);
        assert_eq!(err.client_message(), "database raised an error");

        let err = service.hire(profile("Felix")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Database);
    }
}
