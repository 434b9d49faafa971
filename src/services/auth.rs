//! Authentication service
//!
//! Registration adopts the caller's current identity: the new account's
//! id is the id the request was already operating under, so everything
//! created as a guest belongs to the account from the moment it exists.

use crate::auth::TokenIssuer;
use crate::crypto;
use crate::database::Repository;
use crate::error::{AppError, Result};
use uuid::Uuid;

/// An authenticated session: the user plus a signed bearer token
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user_id: Uuid,
    pub email: String,
    pub token: String,
}

/// Service for account registration and login
#[derive(Clone)]
pub struct AuthService {
    repo: Repository,
    tokens: TokenIssuer,
}

impl AuthService {
    pub fn new(repo: Repository, tokens: TokenIssuer) -> Self {
        Self { repo, tokens }
    }

    /// Register an account under the caller's current identity
    pub async fn register(&self, owner: Uuid, email: &str, password: &str) -> Result<AuthSession> {
        let email = email.trim().to_lowercase();
        if email.is_empty() || password.trim().is_empty() {
            return Err(AppError::validation("Email and password are required."));
        }

        if self.repo.find_user_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("Email already registered."));
        }

        let (password_hash, password_salt) = crypto::hash_password(password)?;
        let user = self
            .repo
            .create_user(owner, &email, &password_hash, &password_salt)
            .await?;

        tracing::info!("Registered account {} for owner {}", user.email, owner);
        let token = self.tokens.issue(user.id, &user.email)?;

        Ok(AuthSession {
            user_id: user.id,
            email: user.email,
            token,
        })
    }

    /// Log in with email and password.
    ///
    /// Unknown email and wrong password are indistinguishable to the
    /// caller.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession> {
        let email = email.trim().to_lowercase();

        let user = self
            .repo
            .find_user_by_email(&email)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid credentials."))?;

        if !crypto::verify_password(password, &user.password_hash, &user.password_salt)? {
            return Err(AppError::unauthorized("Invalid credentials."));
        }

        tracing::info!("User {} logged in", user.email);
        let token = self.tokens.issue(user.id, &user.email)?;

        Ok(AuthSession {
            user_id: user.id,
            email: user.email,
            token,
        })
    }
}
