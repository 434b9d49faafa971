//! Database models
//!
//! Rust structs representing database rows. These stay store-shaped
//! (snake_case columns, audit fields included); the wire DTOs live in
//! `crate::api::dto`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Task priority flag, stored and serialized as `normal` / `fire`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Normal,
    Fire,
}

/// A registered account. Guests have no row here; a guest identity exists
/// only in its cookie and on the rows it owns.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub password_salt: String,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// A task list
#[derive(Debug, Clone, FromRow)]
pub struct TaskList {
    pub id: i64,
    pub owner_user_id: Uuid,
    pub name: String,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// A task within a list
///
/// `position` is the stored order. It is meaningful only among the
/// incomplete tasks of one list; completed tasks keep whatever position
/// they had when completed.
#[derive(Debug, Clone, FromRow)]
pub struct TaskItem {
    pub id: i64,
    pub owner_user_id: Uuid,
    pub title: String,
    pub is_complete: bool,
    pub priority: Priority,
    pub position: i64,
    pub task_list_id: i64,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}
