//! Wire types
//!
//! Request and response bodies for the HTTP API. All fields are
//! camelCase on the wire; `position` travels as `order`.

use crate::database::{Priority, TaskItem};
use crate::services::{AuthSession, ListWithTasks};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskItemDto {
    pub id: i64,
    pub title: String,
    pub is_complete: bool,
    pub priority: Priority,
    pub task_list_id: i64,
    pub order: i64,
}

impl From<TaskItem> for TaskItemDto {
    fn from(task: TaskItem) -> Self {
        Self {
            id: task.id,
            title: task.title,
            is_complete: task.is_complete,
            priority: task.priority,
            task_list_id: task.task_list_id,
            order: task.position,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListDto {
    pub id: i64,
    pub name: String,
    pub task_items: Vec<TaskItemDto>,
}

impl From<ListWithTasks> for TaskListDto {
    fn from(value: ListWithTasks) -> Self {
        Self {
            id: value.list.id,
            name: value.list.name,
            task_items: value.tasks.into_iter().map(TaskItemDto::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user_id: Uuid,
    pub email: String,
    pub token: String,
}

impl From<AuthSession> for AuthResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            user_id: session.user_id,
            email: session.email,
            token: session.token,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateListRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct RenameListRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderTasksRequest {
    pub task_ids: Vec<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTasksQuery {
    pub list_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: String,
    pub task_list_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub title: String,
    #[serde(default)]
    pub is_complete: bool,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub task_list_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTitleRequest {
    pub title: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCompleteRequest {
    pub is_complete: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePriorityRequest {
    pub priority: Priority,
}
