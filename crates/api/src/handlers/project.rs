//! Handlers for the project list resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use verkefni_core::project::ProjectInput;
use verkefni_core::types::DbId;
use verkefni_db::models::project::{Project, SortOrder};
use verkefni_db::repositories::ProjectRepo;

use crate::error::AppResult;
use crate::state::AppState;

/// Query parameters for the listing endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Sort direction on `id`; defaults to ascending.
    #[serde(default)]
    pub order: SortOrder,
    /// Optional completion filter.
    pub completed: Option<bool>,
}

/// GET /
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<Project>>> {
    let projects = ProjectRepo::list(&state.pool, params.order, params.completed).await?;
    Ok(Json(projects))
}

/// GET /{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    let project = ProjectRepo::get(&state.pool, id).await?;
    Ok(Json(project))
}

/// POST /
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<ProjectInput>,
) -> AppResult<Json<Project>> {
    let project = ProjectRepo::create(&state.pool, &input).await?;
    Ok(Json(project))
}

/// PATCH /{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ProjectInput>,
) -> AppResult<Json<Project>> {
    let project = ProjectRepo::update(&state.pool, id, &input).await?;
    Ok(Json(project))
}

/// DELETE /{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    ProjectRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
