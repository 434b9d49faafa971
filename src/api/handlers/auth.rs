//! Auth handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar};

use crate::api::dto::{AuthResponse, LoginRequest, RegisterRequest};
use crate::app::AppState;
use crate::auth::{CurrentOwner, GUEST_COOKIE};
use crate::error::Result;

/// POST /api/auth/register
///
/// The resolved owner id becomes the account id, so a guest's data is
/// adopted in place.
pub async fn register(
    State(state): State<AppState>,
    owner: CurrentOwner,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>> {
    let session = state
        .auth
        .register(owner.id, &request.email, &request.password)
        .await?;

    Ok(Json(session.into()))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let session = state.auth.login(&request.email, &request.password).await?;

    Ok(Json(session.into()))
}

/// POST /api/auth/logout
///
/// Stateless on the server: just tells the client to drop its guest
/// cookie. Bearer tokens expire on their own.
pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    let jar = jar.remove(Cookie::build(GUEST_COOKIE).path("/"));
    (jar, StatusCode::NO_CONTENT)
}
