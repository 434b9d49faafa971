//! Per-request owner resolution
//!
//! Every request acts as exactly one owner. The owner is the subject of
//! a valid bearer token if one is presented, else the id carried by the
//! guest cookie, else a freshly minted guest id whose cookie rides back
//! on the response. Handlers receive the result through the
//! [`CurrentOwner`] extractor; resolution always completes before any
//! data access.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use uuid::Uuid;

use crate::app::AppState;
use crate::auth::tokens::TokenIssuer;
use crate::config::GUEST_COOKIE_TTL_DAYS;

/// Name of the guest identity cookie
pub const GUEST_COOKIE: &str = "todo.guest_id";

/// The owner identity resolved for the current request.
///
/// Guests and registered users share one identifier space; nothing at
/// this level distinguishes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentOwner {
    pub id: Uuid,
}

/// Middleware that resolves the acting owner before the handler runs.
///
/// Malformed evidence at any step falls through to the next step rather
/// than failing the request: a bad bearer token or an unparseable cookie
/// just means the caller is a guest. At most one Set-Cookie is emitted
/// per request, and only when a fresh guest id was minted.
pub async fn resolve_owner(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(id) = bearer_subject(&request, &state.tokens) {
        request.extensions_mut().insert(CurrentOwner { id });
        return next.run(request).await;
    }

    if let Some(id) = jar
        .get(GUEST_COOKIE)
        .and_then(|c| Uuid::parse_str(c.value()).ok())
    {
        request.extensions_mut().insert(CurrentOwner { id });
        return next.run(request).await;
    }

    let id = Uuid::new_v4();
    tracing::debug!("Minted guest identity: {}", id);

    let jar = jar.add(guest_cookie(id, is_secure(&request)));
    request.extensions_mut().insert(CurrentOwner { id });

    (jar, next.run(request).await).into_response()
}

fn bearer_subject(request: &Request, tokens: &TokenIssuer) -> Option<Uuid> {
    let value = request.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?;
    tokens.subject_of(token)
}

fn is_secure(request: &Request) -> bool {
    request
        .headers()
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.eq_ignore_ascii_case("https"))
        .unwrap_or(false)
}

/// Build the persistent guest cookie.
///
/// Cross-site sending (SameSite=None) requires Secure, so requests over
/// plain transport get Lax instead.
pub fn guest_cookie(id: Uuid, secure: bool) -> Cookie<'static> {
    let same_site = if secure { SameSite::None } else { SameSite::Lax };

    Cookie::build((GUEST_COOKIE, id.to_string()))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(same_site)
        .max_age(time::Duration::days(GUEST_COOKIE_TTL_DAYS))
        .build()
}

impl<S> FromRequestParts<S> for CurrentOwner
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Absent only if the resolver layer is not installed on the route
        parts
            .extensions
            .get::<CurrentOwner>()
            .copied()
            .ok_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}
