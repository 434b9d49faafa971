//! Task service
//!
//! High-level operations on individual tasks. Every update compares the
//! incoming values against the stored row first and skips the write when
//! nothing would change, so no-op requests never move `updated_at`.

use crate::database::{Priority, Repository, TaskItem};
use crate::error::{AppError, Result};
use uuid::Uuid;

/// Service for managing tasks
#[derive(Clone)]
pub struct TasksService {
    repo: Repository,
}

impl TasksService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Create a task at the end of a list's incomplete section
    pub async fn create_task(
        &self,
        owner: Uuid,
        title: &str,
        list_id: Option<i64>,
    ) -> Result<TaskItem> {
        let Some(list_id) = list_id else {
            return Err(AppError::validation("A task list id is required."));
        };

        if !self.repo.list_exists(owner, list_id).await? {
            return Err(AppError::validation(format!(
                "Task list {} does not exist.",
                list_id
            )));
        }

        tracing::info!("Creating task in list {}", list_id);
        self.repo.create_task(owner, list_id, title).await
    }

    /// Get one owned task
    pub async fn get_task(&self, owner: Uuid, id: i64) -> Result<TaskItem> {
        self.repo.get_task(owner, id).await
    }

    /// Get owned tasks, optionally narrowed to one list.
    ///
    /// Narrowing to a list the owner does not have is not-found, not an
    /// empty result.
    pub async fn list_tasks(&self, owner: Uuid, list_id: Option<i64>) -> Result<Vec<TaskItem>> {
        match list_id {
            Some(list_id) => {
                self.repo.get_list(owner, list_id).await?;
                self.repo.list_tasks_in_list(owner, list_id).await
            }
            None => self.repo.list_tasks(owner).await,
        }
    }

    /// Set a task's title
    pub async fn set_title(&self, owner: Uuid, id: i64, title: &str) -> Result<()> {
        let current = self.repo.get_task(owner, id).await?;
        if current.title == title {
            return Ok(());
        }

        tracing::info!("Updating title of task {}", id);
        self.repo.set_task_title(owner, id, title).await
    }

    /// Set a task's completion flag
    pub async fn set_complete(&self, owner: Uuid, id: i64, is_complete: bool) -> Result<()> {
        let current = self.repo.get_task(owner, id).await?;
        if current.is_complete == is_complete {
            return Ok(());
        }

        tracing::info!("Marking task {} complete={}", id, is_complete);
        self.repo.set_task_complete(owner, id, is_complete).await
    }

    /// Set a task's priority
    pub async fn set_priority(&self, owner: Uuid, id: i64, priority: Priority) -> Result<()> {
        let current = self.repo.get_task(owner, id).await?;
        if current.priority == priority {
            return Ok(());
        }

        tracing::info!("Setting priority of task {} to {:?}", id, priority);
        self.repo.set_task_priority(owner, id, priority).await
    }

    /// Replace a task's fields in one shot, optionally re-parenting it.
    ///
    /// An absent `list_id` keeps the current list; an absent `priority`
    /// keeps the current priority. Re-parenting requires the target
    /// list to exist for the same owner.
    pub async fn update_task(
        &self,
        owner: Uuid,
        id: i64,
        title: &str,
        is_complete: bool,
        priority: Option<Priority>,
        list_id: Option<i64>,
    ) -> Result<()> {
        let current = self.repo.get_task(owner, id).await?;

        let target_list = list_id.unwrap_or(current.task_list_id);
        if target_list != current.task_list_id && !self.repo.list_exists(owner, target_list).await?
        {
            return Err(AppError::validation(format!(
                "Task list {} does not exist.",
                target_list
            )));
        }

        let priority = priority.unwrap_or(current.priority);

        if current.title == title
            && current.is_complete == is_complete
            && current.priority == priority
            && current.task_list_id == target_list
        {
            return Ok(());
        }

        tracing::info!("Updating task {}", id);
        self.repo
            .update_task(owner, id, title, is_complete, priority, target_list)
            .await
    }

    /// Soft-delete a task
    pub async fn delete_task(&self, owner: Uuid, id: i64) -> Result<()> {
        tracing::info!("Deleting task {}", id);
        self.repo.delete_task(owner, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::initialize_database;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn create_test_service() -> (TasksService, Repository) {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        initialize_database(&pool).await.unwrap();

        let repo = Repository::new(pool);
        (TasksService::new(repo.clone()), repo)
    }

    #[tokio::test]
    async fn test_create_task_requires_a_list_id() {
        let (service, _) = create_test_service().await;

        let result = service.create_task(Uuid::new_v4(), "Task", None).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_task_rejects_unknown_list() {
        let (service, _) = create_test_service().await;

        let result = service
            .create_task(Uuid::new_v4(), "Task", Some(9999))
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_task_appends_to_list() {
        let (service, repo) = create_test_service().await;
        let owner = Uuid::new_v4();
        let list = repo.create_list(owner, "List").await.unwrap();

        let task = service
            .create_task(owner, "Buy milk", Some(list.id))
            .await
            .unwrap();

        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.position, 0);
        assert_eq!(task.priority, Priority::Normal);
        assert!(!task.is_complete);
    }

    #[tokio::test]
    async fn test_list_tasks_for_unknown_list_is_not_found() {
        let (service, _) = create_test_service().await;

        let result = service.list_tasks(Uuid::new_v4(), Some(9999)).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_tasks_without_filter_spans_lists() {
        let (service, repo) = create_test_service().await;
        let owner = Uuid::new_v4();

        let a = repo.create_list(owner, "A").await.unwrap();
        let b = repo.create_list(owner, "B").await.unwrap();
        service.create_task(owner, "One", Some(a.id)).await.unwrap();
        service.create_task(owner, "Two", Some(b.id)).await.unwrap();

        let all = service.list_tasks(owner, None).await.unwrap();
        assert_eq!(all.len(), 2);

        let only_a = service.list_tasks(owner, Some(a.id)).await.unwrap();
        assert_eq!(only_a.len(), 1);
        assert_eq!(only_a[0].title, "One");
    }

    #[tokio::test]
    async fn test_set_complete_skips_write_when_unchanged() {
        let (service, repo) = create_test_service().await;
        let owner = Uuid::new_v4();

        let list = repo.create_list(owner, "List").await.unwrap();
        let task = service.create_task(owner, "Task", Some(list.id)).await.unwrap();

        service.set_complete(owner, task.id, false).await.unwrap();

        let stored = repo.get_task(owner, task.id).await.unwrap();
        assert_eq!(stored.updated_at, task.updated_at);

        service.set_complete(owner, task.id, true).await.unwrap();
        let stored = repo.get_task(owner, task.id).await.unwrap();
        assert!(stored.is_complete);
    }

    #[tokio::test]
    async fn test_set_title_skips_write_when_unchanged() {
        let (service, repo) = create_test_service().await;
        let owner = Uuid::new_v4();

        let list = repo.create_list(owner, "List").await.unwrap();
        let task = service.create_task(owner, "Task", Some(list.id)).await.unwrap();

        service.set_title(owner, task.id, "Task").await.unwrap();
        let stored = repo.get_task(owner, task.id).await.unwrap();
        assert_eq!(stored.updated_at, task.updated_at);
    }

    #[tokio::test]
    async fn test_update_task_reparents_to_existing_list() {
        let (service, repo) = create_test_service().await;
        let owner = Uuid::new_v4();

        let a = repo.create_list(owner, "A").await.unwrap();
        let b = repo.create_list(owner, "B").await.unwrap();
        let task = service.create_task(owner, "Task", Some(a.id)).await.unwrap();

        service
            .update_task(owner, task.id, "Task", false, None, Some(b.id))
            .await
            .unwrap();

        let stored = repo.get_task(owner, task.id).await.unwrap();
        assert_eq!(stored.task_list_id, b.id);
    }

    #[tokio::test]
    async fn test_update_task_rejects_unknown_target_list() {
        let (service, repo) = create_test_service().await;
        let owner = Uuid::new_v4();

        let list = repo.create_list(owner, "List").await.unwrap();
        let task = service.create_task(owner, "Task", Some(list.id)).await.unwrap();

        let result = service
            .update_task(owner, task.id, "Task", false, None, Some(9999))
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        let stored = repo.get_task(owner, task.id).await.unwrap();
        assert_eq!(stored.task_list_id, list.id);
    }

    #[tokio::test]
    async fn test_update_task_missing_task_is_not_found() {
        let (service, _) = create_test_service().await;

        let result = service
            .update_task(Uuid::new_v4(), 9999, "Task", false, None, None)
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_task_identical_values_skip_the_write() {
        let (service, repo) = create_test_service().await;
        let owner = Uuid::new_v4();

        let list = repo.create_list(owner, "List").await.unwrap();
        let task = service.create_task(owner, "Task", Some(list.id)).await.unwrap();

        service
            .update_task(owner, task.id, "Task", false, Some(Priority::Normal), None)
            .await
            .unwrap();

        let stored = repo.get_task(owner, task.id).await.unwrap();
        assert_eq!(stored.updated_at, task.updated_at);
    }

    #[tokio::test]
    async fn test_absent_priority_keeps_the_current_one() {
        let (service, repo) = create_test_service().await;
        let owner = Uuid::new_v4();

        let list = repo.create_list(owner, "List").await.unwrap();
        let task = service.create_task(owner, "Task", Some(list.id)).await.unwrap();
        service.set_priority(owner, task.id, Priority::Fire).await.unwrap();

        service
            .update_task(owner, task.id, "Renamed", false, None, None)
            .await
            .unwrap();

        let stored = repo.get_task(owner, task.id).await.unwrap();
        assert_eq!(stored.title, "Renamed");
        assert_eq!(stored.priority, Priority::Fire);
    }

    #[tokio::test]
    async fn test_delete_task_then_get_is_not_found() {
        let (service, repo) = create_test_service().await;
        let owner = Uuid::new_v4();

        let list = repo.create_list(owner, "List").await.unwrap();
        let task = service.create_task(owner, "Task", Some(list.id)).await.unwrap();

        service.delete_task(owner, task.id).await.unwrap();

        let result = service.get_task(owner, task.id).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
