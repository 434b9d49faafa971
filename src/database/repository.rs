//! Repository layer for database operations
//!
//! Every read and write for task data goes through here, and every method
//! takes the acting owner id: rows are always filtered by
//! `owner_user_id` and `is_deleted = 0`, so an unowned or soft-deleted
//! row is indistinguishable from a missing one. This layer is also the
//! only writer of the audit columns; "delete" intents become soft-delete
//! writes that leave `updated_at` alone.

use super::models::*;
use crate::error::{AppError, Result};
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Repository for database operations
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ===== Users =====

    /// Create a user row with a caller-chosen id.
    ///
    /// The id is the registrant's current owner identity, which is what
    /// keeps guest-created rows attached to the new account. A unique
    /// violation (email index or id collision from a concurrent
    /// registration) surfaces as a conflict.
    pub async fn create_user(
        &self,
        id: Uuid,
        email: &str,
        password_hash: &str,
        password_salt: &str,
    ) -> Result<User> {
        let now = Utc::now();

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, password_hash, password_salt, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(email)
        .bind(password_hash)
        .bind(password_salt)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(unique_violation_to_conflict)?;

        tracing::debug!("Created user: {}", id);
        Ok(user)
    }

    /// Find a non-deleted user by (already normalized) email.
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT * FROM users WHERE email = ? AND is_deleted = 0
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    // ===== Task lists =====

    /// Create a task list owned by the given owner
    pub async fn create_list(&self, owner: Uuid, name: &str) -> Result<TaskList> {
        let now = Utc::now();

        let list = sqlx::query_as::<_, TaskList>(
            r#"
            INSERT INTO task_lists (owner_user_id, name, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(owner)
        .bind(name)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Created list {} for owner {}", list.id, owner);
        Ok(list)
    }

    /// Get one owned, non-deleted list by id
    pub async fn get_list(&self, owner: Uuid, id: i64) -> Result<TaskList> {
        let list = sqlx::query_as::<_, TaskList>(
            r#"
            SELECT * FROM task_lists
            WHERE id = ? AND owner_user_id = ? AND is_deleted = 0
            "#,
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::not_found("List not found."))?;

        Ok(list)
    }

    /// Whether an owned, non-deleted list with this id exists
    pub async fn list_exists(&self, owner: Uuid, id: i64) -> Result<bool> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM task_lists
            WHERE id = ? AND owner_user_id = ? AND is_deleted = 0
            "#,
        )
        .bind(id)
        .bind(owner)
        .fetch_one(&self.pool)
        .await?;

        Ok(count > 0)
    }

    /// List all owned, non-deleted lists
    pub async fn list_lists(&self, owner: Uuid) -> Result<Vec<TaskList>> {
        let lists = sqlx::query_as::<_, TaskList>(
            r#"
            SELECT * FROM task_lists
            WHERE owner_user_id = ? AND is_deleted = 0
            ORDER BY id ASC
            "#,
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        Ok(lists)
    }

    /// Rename a list, bumping `updated_at`
    pub async fn rename_list(&self, owner: Uuid, id: i64, name: &str) -> Result<TaskList> {
        let now = Utc::now();

        let list = sqlx::query_as::<_, TaskList>(
            r#"
            UPDATE task_lists SET name = ?, updated_at = ?
            WHERE id = ? AND owner_user_id = ? AND is_deleted = 0
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(now)
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::not_found("List not found."))?;

        tracing::debug!("Renamed list {}", id);
        Ok(list)
    }

    /// Soft-delete a list and all its tasks in one transaction.
    ///
    /// The cascade marks rows deleted without touching `updated_at`.
    pub async fn delete_list(&self, owner: Uuid, id: i64) -> Result<()> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let rows = sqlx::query(
            r#"
            UPDATE task_lists SET is_deleted = 1, deleted_at = ?
            WHERE id = ? AND owner_user_id = ? AND is_deleted = 0
            "#,
        )
        .bind(now)
        .bind(id)
        .bind(owner)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if rows == 0 {
            return Err(AppError::not_found("List not found."));
        }

        sqlx::query(
            r#"
            UPDATE task_items SET is_deleted = 1, deleted_at = ?
            WHERE task_list_id = ? AND owner_user_id = ? AND is_deleted = 0
            "#,
        )
        .bind(now)
        .bind(id)
        .bind(owner)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!("Soft deleted list {} and its tasks", id);
        Ok(())
    }

    // ===== Task items =====

    /// Create a task at the end of its list's incomplete queue.
    ///
    /// The next position is read-then-insert; two concurrent creates in
    /// one list can land on the same position. Reorder repairs this.
    pub async fn create_task(&self, owner: Uuid, list_id: i64, title: &str) -> Result<TaskItem> {
        let now = Utc::now();

        let position: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(MAX(position) + 1, 0) FROM task_items
            WHERE task_list_id = ? AND owner_user_id = ? AND is_complete = 0 AND is_deleted = 0
            "#,
        )
        .bind(list_id)
        .bind(owner)
        .fetch_one(&self.pool)
        .await?;

        let task = sqlx::query_as::<_, TaskItem>(
            r#"
            INSERT INTO task_items
                (owner_user_id, title, priority, position, task_list_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(owner)
        .bind(title)
        .bind(Priority::Normal)
        .bind(position)
        .bind(list_id)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Created task {} in list {} at position {}", task.id, list_id, position);
        Ok(task)
    }

    /// Get one owned, non-deleted task by id
    pub async fn get_task(&self, owner: Uuid, id: i64) -> Result<TaskItem> {
        let task = sqlx::query_as::<_, TaskItem>(
            r#"
            SELECT * FROM task_items
            WHERE id = ? AND owner_user_id = ? AND is_deleted = 0
            "#,
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::not_found("Task not found."))?;

        Ok(task)
    }

    /// All owned tasks, incomplete first, each block in stored order
    pub async fn list_tasks(&self, owner: Uuid) -> Result<Vec<TaskItem>> {
        let tasks = sqlx::query_as::<_, TaskItem>(
            r#"
            SELECT * FROM task_items
            WHERE owner_user_id = ? AND is_deleted = 0
            ORDER BY is_complete ASC, position ASC, id ASC
            "#,
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    /// Owned tasks of one list, incomplete first, each block in stored order
    pub async fn list_tasks_in_list(&self, owner: Uuid, list_id: i64) -> Result<Vec<TaskItem>> {
        let tasks = sqlx::query_as::<_, TaskItem>(
            r#"
            SELECT * FROM task_items
            WHERE task_list_id = ? AND owner_user_id = ? AND is_deleted = 0
            ORDER BY is_complete ASC, position ASC, id ASC
            "#,
        )
        .bind(list_id)
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    /// Ids of a list's incomplete tasks, in stored order
    pub async fn incomplete_task_ids(&self, owner: Uuid, list_id: i64) -> Result<Vec<i64>> {
        let ids = sqlx::query_scalar(
            r#"
            SELECT id FROM task_items
            WHERE task_list_id = ? AND owner_user_id = ? AND is_complete = 0 AND is_deleted = 0
            ORDER BY position ASC, id ASC
            "#,
        )
        .bind(list_id)
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    /// Update a task's title
    pub async fn set_task_title(&self, owner: Uuid, id: i64, title: &str) -> Result<()> {
        let rows = sqlx::query(
            r#"
            UPDATE task_items SET title = ?, updated_at = ?
            WHERE id = ? AND owner_user_id = ? AND is_deleted = 0
            "#,
        )
        .bind(title)
        .bind(Utc::now())
        .bind(id)
        .bind(owner)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if rows == 0 {
            return Err(AppError::not_found("Task not found."));
        }

        tracing::debug!("Updated title of task {}", id);
        Ok(())
    }

    /// Update a task's completion flag
    pub async fn set_task_complete(&self, owner: Uuid, id: i64, is_complete: bool) -> Result<()> {
        let rows = sqlx::query(
            r#"
            UPDATE task_items SET is_complete = ?, updated_at = ?
            WHERE id = ? AND owner_user_id = ? AND is_deleted = 0
            "#,
        )
        .bind(is_complete)
        .bind(Utc::now())
        .bind(id)
        .bind(owner)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if rows == 0 {
            return Err(AppError::not_found("Task not found."));
        }

        tracing::debug!("Set task {} complete = {}", id, is_complete);
        Ok(())
    }

    /// Update a task's priority flag
    pub async fn set_task_priority(&self, owner: Uuid, id: i64, priority: Priority) -> Result<()> {
        let rows = sqlx::query(
            r#"
            UPDATE task_items SET priority = ?, updated_at = ?
            WHERE id = ? AND owner_user_id = ? AND is_deleted = 0
            "#,
        )
        .bind(priority)
        .bind(Utc::now())
        .bind(id)
        .bind(owner)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if rows == 0 {
            return Err(AppError::not_found("Task not found."));
        }

        tracing::debug!("Set task {} priority = {:?}", id, priority);
        Ok(())
    }

    /// Replace all business fields of a task, possibly moving it to
    /// another list
    pub async fn update_task(
        &self,
        owner: Uuid,
        id: i64,
        title: &str,
        is_complete: bool,
        priority: Priority,
        list_id: i64,
    ) -> Result<()> {
        let rows = sqlx::query(
            r#"
            UPDATE task_items
            SET title = ?, is_complete = ?, priority = ?, task_list_id = ?, updated_at = ?
            WHERE id = ? AND owner_user_id = ? AND is_deleted = 0
            "#,
        )
        .bind(title)
        .bind(is_complete)
        .bind(priority)
        .bind(list_id)
        .bind(Utc::now())
        .bind(id)
        .bind(owner)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if rows == 0 {
            return Err(AppError::not_found("Task not found."));
        }

        tracing::debug!("Updated task {}", id);
        Ok(())
    }

    /// Soft-delete a task
    pub async fn delete_task(&self, owner: Uuid, id: i64) -> Result<()> {
        let rows = sqlx::query(
            r#"
            UPDATE task_items SET is_deleted = 1, deleted_at = ?
            WHERE id = ? AND owner_user_id = ? AND is_deleted = 0
            "#,
        )
        .bind(Utc::now())
        .bind(id)
        .bind(owner)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if rows == 0 {
            return Err(AppError::not_found("Task not found."));
        }

        tracing::debug!("Soft deleted task {}", id);
        Ok(())
    }

    /// Apply a validated position assignment to a list's incomplete
    /// tasks, all or nothing.
    ///
    /// If any targeted row has vanished (completed, deleted, or moved
    /// since validation), the whole transaction rolls back.
    pub async fn apply_task_order(
        &self,
        owner: Uuid,
        list_id: i64,
        assignments: &[(i64, i64)],
    ) -> Result<()> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        for &(task_id, position) in assignments {
            let rows = sqlx::query(
                r#"
                UPDATE task_items SET position = ?, updated_at = ?
                WHERE id = ? AND task_list_id = ? AND owner_user_id = ?
                  AND is_complete = 0 AND is_deleted = 0
                "#,
            )
            .bind(position)
            .bind(now)
            .bind(task_id)
            .bind(list_id)
            .bind(owner)
            .execute(&mut *tx)
            .await?
            .rows_affected();

            if rows == 0 {
                return Err(AppError::not_found("Task not found."));
            }
        }

        tx.commit().await?;

        tracing::debug!("Reordered {} tasks in list {}", assignments.len(), list_id);
        Ok(())
    }
}

/// Map a unique-constraint violation to a conflict, pass anything else
/// through as a database error.
fn unique_violation_to_conflict(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(ref db) = e {
        if db.is_unique_violation() {
            return AppError::conflict("Account already exists.");
        }
    }
    AppError::Database(e)
}
