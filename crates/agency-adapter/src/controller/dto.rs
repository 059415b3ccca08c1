//! Wire types
//!
//! Field names follow the public JSON contract (`cat_id`, `target_list`,
//! `is_completed`, ...), which is why the domain entities are not
//! serialized directly.

use agency_domain::{Agent, AgentId, Mission, MissionId, NewAgent, NewMission, NewTarget, Target, TargetId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::validation::{Validate, ValidatePositive, ValidateText};

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct HireCatRequest {
    pub name: String,
    pub years_of_experience: u32,
    pub breed: String,
    pub salary: f64,
}

impl Validate for HireCatRequest {
    fn validate(&self) -> Result<(), ApiError> {
        self.name.validate_alpha("name")?;
        self.years_of_experience.validate_positive("years_of_experience")?;
        self.breed.validate_alpha("breed")?;
        self.salary.validate_positive("salary")
    }
}

impl From<HireCatRequest> for NewAgent {
    fn from(req: HireCatRequest) -> Self {
        NewAgent {
            name: req.name,
            years_of_experience: req.years_of_experience,
            breed: req.breed,
            salary: req.salary,
        }
    }
}

/// `{cat_id}` as a body (delete) or a query string (get)
#[derive(Debug, Deserialize)]
pub struct CatIdRequest {
    pub cat_id: i64,
}

impl Validate for CatIdRequest {
    fn validate(&self) -> Result<(), ApiError> {
        self.cat_id.validate_positive("cat_id")
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateSalaryRequest {
    pub cat_id: i64,
    pub salary: f64,
}

impl Validate for UpdateSalaryRequest {
    fn validate(&self) -> Result<(), ApiError> {
        self.cat_id.validate_positive("cat_id")?;
        self.salary.validate_positive("salary")
    }
}

#[derive(Debug, Deserialize)]
pub struct TargetPayload {
    pub name: String,
    pub country: String,
    #[serde(default)]
    pub notes: String,
}

impl Validate for TargetPayload {
    fn validate(&self) -> Result<(), ApiError> {
        self.name.validate_alpha("name")?;
        self.country.validate_alpha("country")
    }
}

impl From<TargetPayload> for NewTarget {
    fn from(payload: TargetPayload) -> Self {
        NewTarget::new(payload.name, payload.country).with_notes(payload.notes)
    }
}

/// Target count is a domain rule and is left to the mission service
#[derive(Debug, Deserialize)]
pub struct AddMissionRequest {
    pub name: String,
    #[serde(default)]
    pub cat_id: Option<i64>,
    pub target_list: Vec<TargetPayload>,
}

impl Validate for AddMissionRequest {
    fn validate(&self) -> Result<(), ApiError> {
        self.name.validate_alpha("name")?;
        if let Some(cat_id) = self.cat_id {
            cat_id.validate_positive("cat_id")?;
        }
        self.target_list.iter().try_for_each(Validate::validate)
    }
}

impl From<AddMissionRequest> for NewMission {
    fn from(req: AddMissionRequest) -> Self {
        let targets = req.target_list.into_iter().map(NewTarget::from).collect();
        let mission = NewMission::new(req.name, targets);
        match req.cat_id {
            Some(id) => mission.with_agent(AgentId::new(id)),
            None => mission,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AssignRequest {
    pub mission_id: i64,
    pub cat_id: i64,
}

impl Validate for AssignRequest {
    fn validate(&self) -> Result<(), ApiError> {
        self.mission_id.validate_positive("mission_id")?;
        self.cat_id.validate_positive("cat_id")
    }
}

#[derive(Debug, Deserialize)]
pub struct MissionIdRequest {
    pub mission_id: i64,
}

impl Validate for MissionIdRequest {
    fn validate(&self) -> Result<(), ApiError> {
        self.mission_id.validate_positive("mission_id")
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateMissionRequest {
    pub mission_id: i64,
    pub is_completed: bool,
}

impl Validate for UpdateMissionRequest {
    fn validate(&self) -> Result<(), ApiError> {
        self.mission_id.validate_positive("mission_id")
    }
}

#[derive(Debug, Deserialize)]
pub struct TargetIdRequest {
    pub target_id: i64,
}

impl Validate for TargetIdRequest {
    fn validate(&self) -> Result<(), ApiError> {
        self.target_id.validate_positive("target_id")
    }
}

#[derive(Debug, Deserialize)]
pub struct AddTargetRequest {
    pub mission_id: i64,
    pub target: TargetPayload,
}

impl Validate for AddTargetRequest {
    fn validate(&self) -> Result<(), ApiError> {
        self.mission_id.validate_positive("mission_id")?;
        self.target.validate()
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateNotesRequest {
    pub target_id: i64,
    pub notes: String,
}

impl Validate for UpdateNotesRequest {
    fn validate(&self) -> Result<(), ApiError> {
        self.target_id.validate_positive("target_id")?;
        self.notes.validate_non_empty("notes")
    }
}

impl CatIdRequest {
    pub fn id(&self) -> AgentId {
        AgentId::new(self.cat_id)
    }
}

impl MissionIdRequest {
    pub fn id(&self) -> MissionId {
        MissionId::new(self.mission_id)
    }
}

impl TargetIdRequest {
    pub fn id(&self) -> TargetId {
        TargetId::new(self.target_id)
    }
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct CatResponse {
    pub id: i64,
    pub name: String,
    pub years_of_experience: u32,
    pub breed: String,
    pub salary: f64,
    pub created_at: DateTime<Utc>,
}

impl From<&Agent> for CatResponse {
    fn from(agent: &Agent) -> Self {
        Self {
            id: agent.id().value(),
            name: agent.name().to_string(),
            years_of_experience: agent.years_of_experience(),
            breed: agent.breed().to_string(),
            salary: agent.salary(),
            created_at: agent.created_at(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct TargetResponse {
    pub id: i64,
    pub mission_id: i64,
    pub name: String,
    pub country: String,
    pub notes: String,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Target> for TargetResponse {
    fn from(target: &Target) -> Self {
        Self {
            id: target.id().value(),
            mission_id: target.mission_id().value(),
            name: target.name().to_string(),
            country: target.country().to_string(),
            notes: target.notes().to_string(),
            is_completed: target.is_completed(),
            created_at: target.created_at(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct MissionResponse {
    pub id: i64,
    pub name: String,
    pub cat_id: Option<i64>,
    pub target_list: Vec<TargetResponse>,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Mission> for MissionResponse {
    fn from(mission: &Mission) -> Self {
        Self {
            id: mission.id().value(),
            name: mission.name().to_string(),
            cat_id: mission.agent_id().map(|id| id.value()),
            target_list: mission.targets().iter().map(TargetResponse::from).collect(),
            is_completed: mission.is_completed(),
            created_at: mission.created_at(),
        }
    }
}
