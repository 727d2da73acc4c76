//! Axum route handlers for signup and login.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::password::{
    hash_password_blocking, verify_password_blocking, verify_unknown_account_blocking,
};
use crate::auth::store::normalize_email;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub user_id: Uuid,
}

impl CredentialsRequest {
    /// Normalized email and raw password; both required and non-blank.
    fn into_parts(self) -> Result<(String, String), AppError> {
        let email = self.email.map(|e| normalize_email(&e)).unwrap_or_default();
        let password = self.password.unwrap_or_default();
        if email.is_empty() || password.is_empty() {
            return Err(AppError::Validation(
                "Email and password are required.".to_string(),
            ));
        }
        Ok((email, password))
    }
}

/// POST /signup
pub async fn handle_signup(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let (email, password) = request.into_parts()?;

    if state.users.find_by_email(&email).await?.is_some() {
        return Err(AppError::DuplicateUser);
    }

    let password_hash = hash_password_blocking(password).await?;
    let user = state.users.insert(&email, &password_hash).await?;
    info!("Created user {}", user.id);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User created successfully.".to_string(),
            user_id: user.id,
        }),
    ))
}

/// POST /login
///
/// Unknown email and wrong password produce the same error.
pub async fn handle_login(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let (email, password) = request.into_parts()?;

    let Some(user) = state.users.find_by_email(&email).await? else {
        verify_unknown_account_blocking(password).await?;
        return Err(AppError::Unauthorized);
    };

    if !verify_password_blocking(password, user.password_hash.clone()).await? {
        return Err(AppError::Unauthorized);
    }

    Ok(Json(AuthResponse {
        message: "Login successful.".to_string(),
        user_id: user.id,
    }))
}
