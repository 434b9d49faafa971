//! Application state and initialization
//!
//! This module manages the central application state. All services are
//! initialized here and made available to handlers through AppState.

use crate::auth::TokenIssuer;
use crate::config::AppConfig;
use crate::database::Repository;
use crate::services::{AuthService, ListsService, TasksService};
use sqlx::SqlitePool;

/// Central application state holding all services
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub lists: ListsService,
    pub tasks: TasksService,
    pub tokens: TokenIssuer,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: &AppConfig) -> Self {
        let repo = Repository::new(pool);
        let tokens = TokenIssuer::new(&config.jwt_secret);

        Self {
            auth: AuthService::new(repo.clone(), tokens.clone()),
            lists: ListsService::new(repo.clone()),
            tasks: TasksService::new(repo),
            tokens,
        }
    }
}
