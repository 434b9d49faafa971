//! Task list handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::dto::{CreateListRequest, RenameListRequest, ReorderTasksRequest, TaskListDto};
use crate::app::AppState;
use crate::auth::CurrentOwner;
use crate::error::Result;

/// GET /api/lists
pub async fn get_lists(
    State(state): State<AppState>,
    owner: CurrentOwner,
) -> Result<Json<Vec<TaskListDto>>> {
    let lists = state.lists.get_lists(owner.id).await?;

    Ok(Json(lists.into_iter().map(TaskListDto::from).collect()))
}

/// GET /api/lists/{id}
pub async fn get_list(
    State(state): State<AppState>,
    owner: CurrentOwner,
    Path(id): Path<i64>,
) -> Result<Json<TaskListDto>> {
    let list = state.lists.get_list(owner.id, id).await?;

    Ok(Json(list.into()))
}

/// POST /api/lists
pub async fn create_list(
    State(state): State<AppState>,
    owner: CurrentOwner,
    Json(request): Json<CreateListRequest>,
) -> Result<(StatusCode, Json<TaskListDto>)> {
    let list = state.lists.create_list(owner.id, &request.name).await?;

    Ok((StatusCode::CREATED, Json(list.into())))
}

/// PATCH /api/lists/{id}/title
pub async fn rename_list(
    State(state): State<AppState>,
    owner: CurrentOwner,
    Path(id): Path<i64>,
    Json(request): Json<RenameListRequest>,
) -> Result<Json<TaskListDto>> {
    let list = state.lists.rename_list(owner.id, id, &request.name).await?;

    Ok(Json(list.into()))
}

/// PUT /api/lists/{id}/reorder-tasks
pub async fn reorder_tasks(
    State(state): State<AppState>,
    owner: CurrentOwner,
    Path(id): Path<i64>,
    Json(request): Json<ReorderTasksRequest>,
) -> Result<StatusCode> {
    state
        .lists
        .reorder_tasks(owner.id, id, &request.task_ids)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/lists/{id}
pub async fn delete_list(
    State(state): State<AppState>,
    owner: CurrentOwner,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    state.lists.delete_list(owner.id, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
