//! Task handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::dto::{
    CreateTaskRequest, ListTasksQuery, TaskItemDto, UpdateCompleteRequest, UpdatePriorityRequest,
    UpdateTaskRequest, UpdateTitleRequest,
};
use crate::app::AppState;
use crate::auth::CurrentOwner;
use crate::error::Result;

/// GET /api/tasks?listId=
pub async fn get_tasks(
    State(state): State<AppState>,
    owner: CurrentOwner,
    Query(query): Query<ListTasksQuery>,
) -> Result<Json<Vec<TaskItemDto>>> {
    let tasks = state.tasks.list_tasks(owner.id, query.list_id).await?;

    Ok(Json(tasks.into_iter().map(TaskItemDto::from).collect()))
}

/// GET /api/tasks/{id}
pub async fn get_task(
    State(state): State<AppState>,
    owner: CurrentOwner,
    Path(id): Path<i64>,
) -> Result<Json<TaskItemDto>> {
    let task = state.tasks.get_task(owner.id, id).await?;

    Ok(Json(task.into()))
}

/// POST /api/tasks
pub async fn create_task(
    State(state): State<AppState>,
    owner: CurrentOwner,
    Json(request): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskItemDto>)> {
    let task = state
        .tasks
        .create_task(owner.id, &request.title, request.task_list_id)
        .await?;

    Ok((StatusCode::CREATED, Json(task.into())))
}

/// PUT /api/tasks/{id}
pub async fn update_task(
    State(state): State<AppState>,
    owner: CurrentOwner,
    Path(id): Path<i64>,
    Json(request): Json<UpdateTaskRequest>,
) -> Result<StatusCode> {
    state
        .tasks
        .update_task(
            owner.id,
            id,
            &request.title,
            request.is_complete,
            request.priority,
            request.task_list_id,
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/tasks/{id}/title
pub async fn update_title(
    State(state): State<AppState>,
    owner: CurrentOwner,
    Path(id): Path<i64>,
    Json(request): Json<UpdateTitleRequest>,
) -> Result<StatusCode> {
    state.tasks.set_title(owner.id, id, &request.title).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/tasks/{id}/complete
pub async fn update_complete(
    State(state): State<AppState>,
    owner: CurrentOwner,
    Path(id): Path<i64>,
    Json(request): Json<UpdateCompleteRequest>,
) -> Result<StatusCode> {
    state
        .tasks
        .set_complete(owner.id, id, request.is_complete)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/tasks/{id}/priority
pub async fn update_priority(
    State(state): State<AppState>,
    owner: CurrentOwner,
    Path(id): Path<i64>,
    Json(request): Json<UpdatePriorityRequest>,
) -> Result<StatusCode> {
    state
        .tasks
        .set_priority(owner.id, id, request.priority)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/tasks/{id}
pub async fn delete_task(
    State(state): State<AppState>,
    owner: CurrentOwner,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    state.tasks.delete_task(owner.id, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
