//! Route configuration
//!
//! | Method | Path | Purpose |
//! |--------|------|---------|
//! | POST | /api/auth/register | Create an account, adopting guest data |
//! | POST | /api/auth/login | Authenticate |
//! | POST | /api/auth/logout | Clear the guest cookie |
//! | GET, POST | /api/lists | List / create task lists |
//! | GET, DELETE | /api/lists/{id} | Fetch / soft-delete one list |
//! | PATCH | /api/lists/{id}/title | Rename a list |
//! | PUT | /api/lists/{id}/reorder-tasks | Reorder incomplete tasks |
//! | GET, POST | /api/tasks | List / create tasks |
//! | GET, PUT, DELETE | /api/tasks/{id} | Fetch / replace / soft-delete one task |
//! | PATCH | /api/tasks/{id}/title,complete,priority | Partial updates |
//! | GET | /health | Liveness probe |

use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::routing::{get, patch, post, put};
use axum::{middleware, Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;

use crate::api::handlers::{auth, lists, tasks};
use crate::app::AppState;
use crate::auth::resolve_owner;

/// GET /health
async fn health() -> (StatusCode, Json<serde_json::Value>) {
    let body = json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    });
    (StatusCode::OK, Json(body))
}

/// Build the application router.
///
/// Every route sits behind the owner resolver, so handlers can rely on
/// a `CurrentOwner` being present.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/lists", get(lists::get_lists).post(lists::create_list))
        .route(
            "/api/lists/{id}",
            get(lists::get_list).delete(lists::delete_list),
        )
        .route("/api/lists/{id}/title", patch(lists::rename_list))
        .route("/api/lists/{id}/reorder-tasks", put(lists::reorder_tasks))
        .route("/api/tasks", get(tasks::get_tasks).post(tasks::create_task))
        .route(
            "/api/tasks/{id}",
            get(tasks::get_task)
                .put(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .route("/api/tasks/{id}/title", patch(tasks::update_title))
        .route("/api/tasks/{id}/complete", patch(tasks::update_complete))
        .route("/api/tasks/{id}/priority", patch(tasks::update_priority))
        .route("/health", get(health))
        .layer(middleware::from_fn_with_state(state.clone(), resolve_owner))
        .with_state(state)
}

/// CORS for the browser client.
///
/// Credentials are allowed so the guest cookie travels, which rules out
/// wildcard origins.
pub fn cors_layer(origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}
