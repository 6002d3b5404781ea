//! Session token authentication and role gating middleware.
//!
//! Every protected route goes through one of the `require_*` middlewares.
//! The middleware validates the Bearer session token, checks the role
//! claim, and for registerer routes re-reads the account row so a
//! suspension takes effect on the next request, not at token expiry.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use domain::models::{AccountStatus, Role};
use persistence::repositories::AccountRepository;

use crate::app::AppState;
use crate::error::ApiError;

/// Authenticated account information extracted from the session token.
#[derive(Debug, Clone)]
pub struct CurrentAccount {
    pub account_id: Uuid,
    pub username: String,
    pub role: Role,
}

fn authenticate(state: &AppState, req: &Request<Body>) -> Result<CurrentAccount, ApiError> {
    let header = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or(ApiError::Unauthenticated)?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(ApiError::Unauthenticated)?;

    let claims = state.session_tokens.validate(token)?;
    let account_id = claims.account_id()?;
    let role: Role = claims
        .role
        .parse()
        .map_err(|_| ApiError::Unauthenticated)?;

    Ok(CurrentAccount {
        account_id,
        username: claims.username,
        role,
    })
}

/// Middleware that restricts a route to admin accounts.
pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let account = match authenticate(&state, &req) {
        Ok(account) => account,
        Err(err) => return err.into_response(),
    };

    if !account.role.can_manage_accounts() {
        return ApiError::Forbidden.into_response();
    }

    req.extensions_mut().insert(account);
    next.run(req).await
}

/// Middleware that restricts a route to check-in staff (registerers and
/// admins). Registerer accounts can be suspended at any time, so the
/// account status is checked against the database on every request.
pub async fn require_registerer(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let account = match authenticate(&state, &req) {
        Ok(account) => account,
        Err(err) => return err.into_response(),
    };

    if !account.role.can_check_in() {
        return ApiError::Forbidden.into_response();
    }

    let accounts = AccountRepository::new(state.pool.clone());
    match accounts.find_by_id(account.account_id).await {
        Ok(Some(row)) => {
            if row.status() == AccountStatus::Suspended {
                tracing::info!(
                    username = %account.username,
                    "suspended account rejected"
                );
                return ApiError::Suspended.into_response();
            }
        }
        Ok(None) => {
            // Token outlived the account row.
            return ApiError::Unauthenticated.into_response();
        }
        Err(err) => {
            return ApiError::from(err).into_response();
        }
    }

    req.extensions_mut().insert(account);
    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_account_clone() {
        let account = CurrentAccount {
            account_id: Uuid::new_v4(),
            username: "gatekeeper".to_string(),
            role: Role::Registerer,
        };
        let cloned = account.clone();
        assert_eq!(account.account_id, cloned.account_id);
        assert_eq!(cloned.role, Role::Registerer);
    }

    #[test]
    fn test_role_gates() {
        assert!(Role::Admin.can_manage_accounts());
        assert!(!Role::Registerer.can_manage_accounts());
        assert!(Role::Admin.can_check_in());
        assert!(Role::Registerer.can_check_in());
    }
}
