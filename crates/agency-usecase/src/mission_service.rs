//! Mission lifecycle - assignment, targets and the completion cascade
//!
//! Every mutating operation follows the same shape: load, check the
//! domain rules against what was loaded, then write. There is no
//! transaction around that sequence; two concurrent requests can both pass
//! a check before either writes.

use std::sync::Arc;

use agency_domain::{
    AgentId, Mission, MissionId, MissionRepository, NewMission, NewTarget, RepositoryError,
    RuleViolation, Target, TargetId,
};
use tracing::info;

use crate::error::{AppError, AppResult};

pub struct MissionService {
    missions: Arc<dyn MissionRepository>,
}

impl MissionService {
    pub fn new(missions: Arc<dyn MissionRepository>) -> Self {
        Self { missions }
    }

    /// Create a mission with its 1 to 3 targets, optionally assigned
    pub async fn add_mission(&self, mission: NewMission) -> AppResult<Mission> {
        mission.validate()?;

        if let Some(agent) = mission.agent_id {
            self.ensure_agent_free(agent, None).await?;
        }

        let created = self
            .missions
            .add_mission(mission)
            .await
            .map_err(unknown_cat)?;
        info!(
            mission_id = %created.id(),
            targets = created.targets().len(),
            "mission created"
        );
        Ok(created)
    }

    /// Put a cat on a mission. One open mission per cat, one cat per mission.
    pub async fn assign(&self, mission_id: MissionId, agent_id: AgentId) -> AppResult<()> {
        let mission = self.get_mission(mission_id).await?;

        self.ensure_agent_free(agent_id, Some(mission_id)).await?;
        mission.ensure_unassigned()?;

        self.missions
            .assign(mission_id, agent_id)
            .await
            .map_err(unknown_cat)?;
        info!(mission_id = %mission_id, cat_id = %agent_id, "mission assigned");
        Ok(())
    }

    pub async fn get_mission(&self, id: MissionId) -> AppResult<Mission> {
        self.missions
            .find_by_id(id)
            .await?
            .ok_or_else(|| missing("mission", id.value()))
    }

    pub async fn list_missions(&self) -> AppResult<Vec<Mission>> {
        Ok(self.missions.list_all().await?)
    }

    /// Only unassigned missions can go, completed or not
    pub async fn delete_mission(&self, id: MissionId) -> AppResult<()> {
        let mission = self.get_mission(id).await?;

        if mission.agent_id().is_some() {
            return Err(AppError::conflict(
                format!("mission {} is assigned and cannot be deleted", id),
                "assigned mission cannot be deleted",
            ));
        }

        self.missions.delete_mission(id).await?;
        info!(mission_id = %id, "mission deleted");
        Ok(())
    }

    /// Administrative override of the completion flag.
    ///
    /// Does not look at the targets.
    pub async fn update_mission(&self, id: MissionId, completed: bool) -> AppResult<()> {
        let mission = self.get_mission(id).await?;
        mission.ensure_open()?;

        self.missions.update_completion(id, completed).await?;
        info!(mission_id = %id, completed, "mission updated");
        Ok(())
    }

    pub async fn get_target(&self, id: TargetId) -> AppResult<Target> {
        self.missions
            .find_target(id)
            .await?
            .ok_or_else(|| missing("target", id.value()))
    }

    pub async fn delete_target(&self, id: TargetId) -> AppResult<()> {
        let target = self.get_target(id).await?;
        target.ensure_open()?;

        let mission = self.get_mission(target.mission_id()).await?;
        mission.ensure_open()?;
        mission.ensure_target_removable()?;

        self.missions.delete_target(id).await?;
        info!(target_id = %id, mission_id = %mission.id(), "target deleted");
        Ok(())
    }

    pub async fn add_target(&self, mission_id: MissionId, target: NewTarget) -> AppResult<Target> {
        let mission = self.get_mission(mission_id).await?;
        mission.ensure_open()?;
        mission.ensure_room_for_target()?;

        let target = self.missions.add_target(mission_id, target).await?;
        info!(target_id = %target.id(), mission_id = %mission_id, "target added");
        Ok(target)
    }

    /// Complete a target; completing the last open one completes the mission
    pub async fn complete_target(&self, id: TargetId) -> AppResult<()> {
        let mission = self.load_open_target(id).await?;

        self.missions.complete_target(id).await?;
        info!(target_id = %id, "target completed");

        // `mission` was loaded before the write above, so it still shows
        // this target as open. completes_with skips it by id.
        if mission.completes_with(id) {
            self.missions.update_completion(mission.id(), true).await?;
            info!(mission_id = %mission.id(), "all targets done, mission completed");
        }

        Ok(())
    }

    pub async fn update_target_notes(&self, id: TargetId, notes: &str) -> AppResult<()> {
        self.load_open_target(id).await?;

        self.missions.update_target_notes(id, notes).await?;
        info!(target_id = %id, "target notes updated");
        Ok(())
    }

    // ========== Helpers ==========

    /// Checks that the target and its mission are both open, and hands back
    /// the mission as loaded
    async fn load_open_target(&self, id: TargetId) -> AppResult<Mission> {
        let target = self.get_target(id).await?;
        target.ensure_open()?;

        let mission = self.get_mission(target.mission_id()).await?;
        mission.ensure_open()?;

        Ok(mission)
    }

    /// The cat must not be referenced by any mission other than `except`.
    ///
    /// Completed missions count: a cat never gets a second mission.
    async fn ensure_agent_free(
        &self,
        agent_id: AgentId,
        except: Option<MissionId>,
    ) -> AppResult<()> {
        match self.missions.find_by_agent(agent_id).await? {
            Some(current) if Some(current.id()) != except => {
                Err(RuleViolation::AgentOnMission {
                    agent: agent_id,
                    mission: current.id(),
                }
                .into())
            }
            _ => Ok(()),
        }
    }
}

fn missing(entity: &str, id: i64) -> AppError {
    AppError::not_found(
        format!("{} {} not found", entity, id),
        format!("there is no {} with such id", entity),
    )
}

/// An assignment pointing at a cat that does not exist
fn unknown_cat(err: RepositoryError) -> AppError {
    match err {
        RepositoryError::ForeignKeyViolation { message } => AppError::not_found(
            format!("assignment references an unknown cat: {}", message),
            "there is no cat with such id",
        ),
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::fake::FakeStore;
    use agency_domain::MAX_TARGETS;

    fn targets(names: &[&str]) -> Vec<NewTarget> {
        names.iter().map(|n| NewTarget::new(*n, "Germany")).collect()
    }

    fn setup() -> (FakeStore, MissionService) {
        let store = FakeStore::new();
        let service = MissionService::new(store.missions());
        (store, service)
    }

    async fn recon(service: &MissionService, names: &[&str]) -> Mission {
        service
            .add_mission(NewMission::new("Recon", targets(names)))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_add_mission_rejects_bad_target_counts_without_writing() {
        let (store, service) = setup();

        for count in [0usize, 4, 7] {
            let names = vec!["Jerry"; count];
            let err = service
                .add_mission(NewMission::new("Bad", targets(&names)))
                .await
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        }

        assert_eq!(store.writes(), 0);
    }

    #[tokio::test]
    async fn test_add_mission_with_initial_agent() {
        let (store, service) = setup();
        let cat = store.seed_agent("Tom").await;

        let mission = service
            .add_mission(NewMission::new("Recon", targets(&["Jerry"])).with_agent(cat))
            .await
            .unwrap();
        assert_eq!(mission.agent_id(), Some(cat));

        // The cat is taken now
        let err = service
            .add_mission(NewMission::new("Heist", targets(&["Spike"])).with_agent(cat))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_add_mission_with_unknown_agent_is_not_found() {
        let (_, service) = setup();

        let err = service
            .add_mission(NewMission::new("Recon", targets(&["Jerry"])).with_agent(AgentId::new(99)))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.client_message(), "there is no cat with such id");
    }

    #[tokio::test]
    async fn test_assign_is_exclusive_both_ways() {
        let (store, service) = setup();
        let a = store.seed_agent("Tom").await;
        let b = store.seed_agent("Felix").await;
        let m1 = recon(&service, &["Jerry"]).await;
        let m2 = recon(&service, &["Spike"]).await;

        service.assign(m1.id(), a).await.unwrap();

        // Same cat, second mission
        let err = service.assign(m2.id(), a).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        // Second cat, same mission
        let err = service.assign(m1.id(), b).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        // Re-assigning the same pair is still a conflict
        let err = service.assign(m1.id(), a).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        assert_eq!(store.mission(m1.id()).await.unwrap().agent_id(), Some(a));
        assert_eq!(store.mission(m2.id()).await.unwrap().agent_id(), None);
    }

    #[tokio::test]
    async fn test_assign_missing_mission_or_cat() {
        let (store, service) = setup();
        let cat = store.seed_agent("Tom").await;
        let mission = recon(&service, &["Jerry"]).await;

        let err = service.assign(MissionId::new(999), cat).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = service.assign(mission.id(), AgentId::new(999)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_delete_mission_blocked_while_assigned() {
        let (store, service) = setup();
        let cat = store.seed_agent("Tom").await;
        let mission = recon(&service, &["Jerry"]).await;
        service.assign(mission.id(), cat).await.unwrap();

        let err = service.delete_mission(mission.id()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        // Completion changes nothing
        service.update_mission(mission.id(), true).await.unwrap();
        let err = service.delete_mission(mission.id()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_delete_unassigned_mission_removes_targets() {
        let (_, service) = setup();
        let mission = recon(&service, &["Jerry", "Spike"]).await;
        let target = mission.targets()[0].id();

        service.delete_mission(mission.id()).await.unwrap();

        assert_eq!(
            service.get_mission(mission.id()).await.unwrap_err().kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            service.get_target(target).await.unwrap_err().kind(),
            ErrorKind::NotFound
        );
        assert!(service.list_missions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_missions_carries_each_target_list() {
        let (_, service) = setup();
        let solo = recon(&service, &["Jerry"]).await;
        let pair = recon(&service, &["Spike", "Tyke"]).await;

        let listed: Vec<_> = service
            .list_missions()
            .await
            .unwrap()
            .iter()
            .map(|m| (m.id(), m.targets().len()))
            .collect();
        assert_eq!(listed, vec![(solo.id(), 1), (pair.id(), 2)]);

        let gone = pair.targets()[0].id();
        service.delete_target(gone).await.unwrap();

        let missions = service.list_missions().await.unwrap();
        let target_ids: Vec<Vec<TargetId>> = missions
            .iter()
            .map(|m| m.targets().iter().map(|t| t.id()).collect())
            .collect();
        assert_eq!(
            target_ids,
            vec![
                vec![solo.targets()[0].id()],
                vec![pair.targets()[1].id()],
            ]
        );
        assert!(missions
            .iter()
            .flat_map(|m| m.targets())
            .all(|t| t.id() != gone));
    }

    #[tokio::test]
    async fn test_update_mission_only_while_open() {
        let (_, service) = setup();
        let mission = recon(&service, &["Jerry"]).await;

        service.update_mission(mission.id(), true).await.unwrap();
        assert!(service.get_mission(mission.id()).await.unwrap().is_completed());

        for flag in [true, false] {
            let err = service.update_mission(mission.id(), flag).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Conflict);
        }
    }

    #[tokio::test]
    async fn test_delete_target_guards() {
        let (_, service) = setup();

        let single = recon(&service, &["Jerry"]).await;
        let err = service
            .delete_target(single.targets()[0].id())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        let trio = recon(&service, &["Tyke", "Spike", "Butch"]).await;
        let done = trio.targets()[0].id();
        service.complete_target(done).await.unwrap();
        let err = service.delete_target(done).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        service.delete_target(trio.targets()[1].id()).await.unwrap();
        assert_eq!(service.get_mission(trio.id()).await.unwrap().targets().len(), 2);

        service.update_mission(trio.id(), true).await.unwrap();
        let err = service
            .delete_target(trio.targets()[2].id())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        let err = service.delete_target(TargetId::new(999)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_add_target_guards() {
        let (_, service) = setup();
        let mission = recon(&service, &["Jerry", "Spike"]).await;

        service
            .add_target(mission.id(), NewTarget::new("Butch", "Norway"))
            .await
            .unwrap();
        assert_eq!(
            service.get_mission(mission.id()).await.unwrap().targets().len(),
            MAX_TARGETS
        );

        let err = service
            .add_target(mission.id(), NewTarget::new("Tyke", "Norway"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        let open = recon(&service, &["Quacker"]).await;
        service.update_mission(open.id(), true).await.unwrap();
        let err = service
            .add_target(open.id(), NewTarget::new("Tyke", "Norway"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        let err = service
            .add_target(MissionId::new(999), NewTarget::new("Tyke", "Norway"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_complete_target_cascades_on_last_one() {
        let (store, service) = setup();
        let cat = store.seed_agent("Tom").await;
        let mission = recon(&service, &["Jerry", "Spike"]).await;
        service.assign(mission.id(), cat).await.unwrap();
        let t1 = mission.targets()[0].id();
        let t2 = mission.targets()[1].id();

        service.complete_target(t1).await.unwrap();
        assert!(!store.mission(mission.id()).await.unwrap().is_completed());

        service.complete_target(t2).await.unwrap();
        assert!(store.mission(mission.id()).await.unwrap().is_completed());

        let err = service.update_target_notes(t1, "late intel").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_complete_target_twice_is_conflict() {
        let (_, service) = setup();
        let mission = recon(&service, &["Jerry", "Spike"]).await;
        let t1 = mission.targets()[0].id();

        service.complete_target(t1).await.unwrap();
        let err = service.complete_target(t1).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_complete_target_on_completed_mission_is_conflict() {
        let (store, service) = setup();
        let mission = recon(&service, &["Jerry", "Spike"]).await;
        service.update_mission(mission.id(), true).await.unwrap();
        let writes = store.writes();

        let err = service
            .complete_target(mission.targets()[0].id())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(store.writes(), writes);
    }

    #[tokio::test]
    async fn test_update_target_notes() {
        let (_, service) = setup();
        let mission = recon(&service, &["Jerry", "Spike"]).await;
        let t1 = mission.targets()[0].id();

        service.update_target_notes(t1, "hides in the wall").await.unwrap();
        assert_eq!(service.get_target(t1).await.unwrap().notes(), "hides in the wall");

        service.complete_target(t1).await.unwrap();
        let err = service.update_target_notes(t1, "again").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        let err = service
            .update_target_notes(TargetId::new(999), "nobody")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_write_failure_surfaces_as_database_error() {
        let (store, service) = setup();
        let mission = recon(&service, &["Jerry"]).await;
        store.fail_writes();

        let err = service
            .complete_target(mission.targets()[0].id())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Database);
        assert!(!store.mission(mission.id()).await.unwrap().is_completed());
    }
}
