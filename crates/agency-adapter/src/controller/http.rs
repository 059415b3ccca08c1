//! Routes and handlers
//!
//! Handlers stay thin: extract and validate, call one service operation,
//! map the result. Everything that can fail does so through [`ApiError`].

use std::sync::Arc;

use agency_domain::{AgentId, BreedCatalog, MissionId, TargetId};
use agency_usecase::{AgentService, MissionService};
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;
use tracing::warn;

use super::dto::{
    AddMissionRequest, AddTargetRequest, AssignRequest, CatIdRequest, CatResponse,
    HireCatRequest, MissionIdRequest, MissionResponse, TargetIdRequest, TargetResponse,
    UpdateMissionRequest, UpdateNotesRequest, UpdateSalaryRequest,
};
use super::error::{ApiError, ApiResult};
use super::validation::{ValidatedJson, ValidatedQuery};

/// Everything a handler can reach
#[derive(Clone)]
pub struct AppState {
    pub agents: Arc<AgentService>,
    pub missions: Arc<MissionService>,
    pub breeds: Arc<dyn BreedCatalog>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/cat/add", post(hire_cat))
        .route("/cat/delete", delete(fire_cat))
        .route("/cat/list", get(list_cats))
        .route("/cat/get", get(get_cat))
        .route("/cat/updateSalary", patch(update_salary))
        .route("/mission/add", post(add_mission))
        .route("/mission/assign", patch(assign_mission))
        .route("/mission/get", get(get_mission))
        .route("/mission/delete", delete(delete_mission))
        .route("/mission/list", get(list_missions))
        .route("/mission/update", patch(update_mission))
        .route("/target/get", get(get_target))
        .route("/target/delete", delete(delete_target))
        .route("/target/add", post(add_target))
        .route("/target/complete", patch(complete_target))
        .route("/target/updateNotes", patch(update_target_notes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

// ========== Cats ==========

async fn hire_cat(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<HireCatRequest>,
) -> ApiResult<Json<CatResponse>> {
    if !state.breeds.is_known_breed(&req.breed).await {
        warn!(breed = %req.breed, "breed rejected by catalog");
        return Err(ApiError::bad_request(format!(
            "breed {} is not a known breed",
            req.breed
        )));
    }
    let agent = state.agents.hire(req.into()).await?;
    Ok(Json(CatResponse::from(&agent)))
}

async fn fire_cat(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CatIdRequest>,
) -> ApiResult<StatusCode> {
    state.agents.fire(req.id()).await?;
    Ok(StatusCode::OK)
}

async fn list_cats(State(state): State<AppState>) -> ApiResult<Json<Vec<CatResponse>>> {
    let agents = state.agents.list().await?;
    Ok(Json(agents.iter().map(CatResponse::from).collect()))
}

async fn get_cat(
    State(state): State<AppState>,
    ValidatedQuery(req): ValidatedQuery<CatIdRequest>,
) -> ApiResult<Json<CatResponse>> {
    let agent = state.agents.get(req.id()).await?;
    Ok(Json(CatResponse::from(&agent)))
}

async fn update_salary(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<UpdateSalaryRequest>,
) -> ApiResult<StatusCode> {
    state
        .agents
        .update_salary(AgentId::new(req.cat_id), req.salary)
        .await?;
    Ok(StatusCode::OK)
}

// ========== Missions ==========

async fn add_mission(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<AddMissionRequest>,
) -> ApiResult<Json<MissionResponse>> {
    let mission = state.missions.add_mission(req.into()).await?;
    Ok(Json(MissionResponse::from(&mission)))
}

async fn assign_mission(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<AssignRequest>,
) -> ApiResult<StatusCode> {
    state
        .missions
        .assign(MissionId::new(req.mission_id), AgentId::new(req.cat_id))
        .await?;
    Ok(StatusCode::OK)
}

async fn get_mission(
    State(state): State<AppState>,
    ValidatedQuery(req): ValidatedQuery<MissionIdRequest>,
) -> ApiResult<Json<MissionResponse>> {
    let mission = state.missions.get_mission(req.id()).await?;
    Ok(Json(MissionResponse::from(&mission)))
}

async fn delete_mission(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<MissionIdRequest>,
) -> ApiResult<StatusCode> {
    state.missions.delete_mission(req.id()).await?;
    Ok(StatusCode::OK)
}

async fn list_missions(State(state): State<AppState>) -> ApiResult<Json<Vec<MissionResponse>>> {
    let missions = state.missions.list_missions().await?;
    Ok(Json(missions.iter().map(MissionResponse::from).collect()))
}

async fn update_mission(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<UpdateMissionRequest>,
) -> ApiResult<StatusCode> {
    state
        .missions
        .update_mission(MissionId::new(req.mission_id), req.is_completed)
        .await?;
    Ok(StatusCode::OK)
}

// ========== Targets ==========

async fn get_target(
    State(state): State<AppState>,
    ValidatedQuery(req): ValidatedQuery<TargetIdRequest>,
) -> ApiResult<Json<TargetResponse>> {
    let target = state.missions.get_target(req.id()).await?;
    Ok(Json(TargetResponse::from(&target)))
}

async fn delete_target(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<TargetIdRequest>,
) -> ApiResult<StatusCode> {
    state.missions.delete_target(req.id()).await?;
    Ok(StatusCode::OK)
}

async fn add_target(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<AddTargetRequest>,
) -> ApiResult<Json<TargetResponse>> {
    let target = state
        .missions
        .add_target(MissionId::new(req.mission_id), req.target.into())
        .await?;
    Ok(Json(TargetResponse::from(&target)))
}

async fn complete_target(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<TargetIdRequest>,
) -> ApiResult<StatusCode> {
    state.missions.complete_target(req.id()).await?;
    Ok(StatusCode::OK)
}

async fn update_target_notes(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<UpdateNotesRequest>,
) -> ApiResult<StatusCode> {
    state
        .missions
        .update_target_notes(TargetId::new(req.target_id), &req.notes)
        .await?;
    Ok(StatusCode::OK)
}
