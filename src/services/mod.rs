//! Services module
//!
//! Business logic services that coordinate between handlers and repository.

pub mod auth;
pub mod lists;
pub mod tasks;

pub use auth::{AuthService, AuthSession};
pub use lists::{ListWithTasks, ListsService};
pub use tasks::TasksService;
