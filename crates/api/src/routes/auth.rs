//! Authentication and staff account routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use domain::models::{AccountStatus, Role};
use persistence::entities::AccountEntity;

use crate::app::AppState;
use crate::error::ApiError;
use crate::services::auth::AuthService;

/// Login request body.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Login response carrying the session token.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub role: Role,
}

/// Request body for creating a staff account.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAccountRequest {
    #[validate(length(min = 3, max = 64, message = "username must be 3-64 characters"))]
    pub username: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
}

/// Request body for suspending or reactivating an account.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: AccountStatus,
}

/// Staff account summary (never includes the password hash).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub account_id: Uuid,
    pub username: String,
    pub role: Role,
    pub status: AccountStatus,
    pub created_at: DateTime<Utc>,
}

impl From<AccountEntity> for AccountResponse {
    fn from(entity: AccountEntity) -> Self {
        let role = entity.role();
        let status = entity.status();
        Self {
            account_id: entity.account_id,
            username: entity.username,
            role,
            status,
            created_at: entity.created_at,
        }
    }
}

fn auth_service(state: &AppState) -> AuthService {
    AuthService::new(state.pool.clone(), state.session_tokens.clone())
}

/// Authenticates a staff account.
///
/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    request.validate()?;

    let outcome = auth_service(&state)
        .login(&request.username, &request.password)
        .await?;

    Ok(Json(LoginResponse {
        token: outcome.token,
        username: outcome.username,
        role: outcome.role,
    }))
}

/// Creates a registerer account.
///
/// POST /api/auth/registerer (admin)
pub async fn create_registerer(
    State(state): State<AppState>,
    Json(request): Json<CreateAccountRequest>,
) -> Result<(StatusCode, Json<AccountResponse>), ApiError> {
    request.validate()?;

    let account = auth_service(&state)
        .create_account(&request.username, &request.password, Role::Registerer)
        .await?;

    Ok((StatusCode::CREATED, Json(account.into())))
}

/// Lists all registerer accounts.
///
/// GET /api/auth/registerers (admin)
pub async fn list_registerers(
    State(state): State<AppState>,
) -> Result<Json<Vec<AccountResponse>>, ApiError> {
    let accounts = auth_service(&state).list_registerers().await?;
    Ok(Json(accounts.into_iter().map(Into::into).collect()))
}

/// Suspends or reactivates an account.
///
/// PUT /api/auth/registerer/:id/status (admin)
pub async fn update_status(
    State(state): State<AppState>,
    Path(account_id): Path<Uuid>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<StatusCode, ApiError> {
    auth_service(&state)
        .set_status(account_id, request.status)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Deletes a registerer account. Admin accounts are not deletable here.
///
/// DELETE /api/auth/registerer/:id (admin)
pub async fn delete_registerer(
    State(state): State<AppState>,
    Path(account_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    auth_service(&state).delete_registerer(account_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
