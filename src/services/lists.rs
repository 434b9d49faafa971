//! Task list service
//!
//! High-level operations on task lists: CRUD with embedded tasks, and
//! the reordering of a list's incomplete tasks.

use std::collections::{HashMap, HashSet};

use crate::database::{Repository, TaskItem, TaskList};
use crate::error::{AppError, Result};
use uuid::Uuid;

/// A list together with its tasks, incomplete first
#[derive(Debug, Clone)]
pub struct ListWithTasks {
    pub list: TaskList,
    pub tasks: Vec<TaskItem>,
}

/// Service for managing task lists
#[derive(Clone)]
pub struct ListsService {
    repo: Repository,
}

impl ListsService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Create a list for the given owner
    pub async fn create_list(&self, owner: Uuid, name: &str) -> Result<ListWithTasks> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("List name is required."));
        }

        tracing::info!("Creating list for owner {}", owner);
        let list = self.repo.create_list(owner, name).await?;

        Ok(ListWithTasks {
            list,
            tasks: Vec::new(),
        })
    }

    /// Get one owned list with its tasks
    pub async fn get_list(&self, owner: Uuid, id: i64) -> Result<ListWithTasks> {
        let list = self.repo.get_list(owner, id).await?;
        let tasks = self.repo.list_tasks_in_list(owner, id).await?;

        Ok(ListWithTasks { list, tasks })
    }

    /// Get all owned lists, each with its tasks
    pub async fn get_lists(&self, owner: Uuid) -> Result<Vec<ListWithTasks>> {
        let lists = self.repo.list_lists(owner).await?;

        let mut tasks_by_list: HashMap<i64, Vec<TaskItem>> = HashMap::new();
        for task in self.repo.list_tasks(owner).await? {
            tasks_by_list.entry(task.task_list_id).or_default().push(task);
        }

        Ok(lists
            .into_iter()
            .map(|list| {
                let tasks = tasks_by_list.remove(&list.id).unwrap_or_default();
                ListWithTasks { list, tasks }
            })
            .collect())
    }

    /// Rename a list.
    ///
    /// Renaming to the current name is a no-op: the stored row is
    /// returned untouched and `updated_at` does not move.
    pub async fn rename_list(&self, owner: Uuid, id: i64, name: &str) -> Result<ListWithTasks> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("List name is required."));
        }

        let current = self.repo.get_list(owner, id).await?;

        let list = if current.name == name {
            current
        } else {
            tracing::info!("Renaming list {}", id);
            self.repo.rename_list(owner, id, name).await?
        };

        let tasks = self.repo.list_tasks_in_list(owner, id).await?;
        Ok(ListWithTasks { list, tasks })
    }

    /// Soft-delete a list and all its tasks
    pub async fn delete_list(&self, owner: Uuid, id: i64) -> Result<()> {
        tracing::info!("Deleting list {}", id);
        self.repo.delete_list(owner, id).await
    }

    /// Reorder a list's incomplete tasks to match the submitted id
    /// sequence.
    ///
    /// Precondition failures are distinct: an empty sequence is a
    /// validation error, a missing list is not-found, and a sequence
    /// that is not an exact permutation of the list's incomplete task
    /// ids is a validation error. Nothing is written unless every check
    /// passes.
    pub async fn reorder_tasks(&self, owner: Uuid, list_id: i64, task_ids: &[i64]) -> Result<()> {
        if task_ids.is_empty() {
            return Err(AppError::validation("Task ids are required."));
        }

        self.repo.get_list(owner, list_id).await?;

        let incomplete = self.repo.incomplete_task_ids(owner, list_id).await?;
        let assignments = plan_reorder(task_ids, &incomplete)?;

        tracing::info!("Reordering {} tasks in list {}", assignments.len(), list_id);
        self.repo.apply_task_order(owner, list_id, &assignments).await
    }
}

/// Validate a submitted ordering against the current incomplete set and
/// produce the new position assignment.
///
/// The submitted ids must be exactly the incomplete ids: equal count and
/// equal membership. That one check rejects missing ids, foreign or
/// extra ids, and duplicates. Each task's new position is its zero-based
/// index in the submitted sequence.
fn plan_reorder(submitted: &[i64], incomplete: &[i64]) -> Result<Vec<(i64, i64)>> {
    let submitted_set: HashSet<i64> = submitted.iter().copied().collect();
    let incomplete_set: HashSet<i64> = incomplete.iter().copied().collect();

    if submitted.len() != incomplete.len() || submitted_set != incomplete_set {
        return Err(AppError::validation(
            "Task ids must be exactly the list's incomplete tasks.",
        ));
    }

    Ok(submitted
        .iter()
        .enumerate()
        .map(|(index, &id)| (id, index as i64))
        .collect())
}
