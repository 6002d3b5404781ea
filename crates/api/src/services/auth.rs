//! Staff authentication and account management.

use std::sync::{Arc, OnceLock};

use sqlx::PgPool;
use uuid::Uuid;

use domain::models::{AccountStatus, Role};
use persistence::{entities::AccountEntity, repositories::AccountRepository};
use shared::{jwt::SessionTokenConfig, password};

use crate::error::{ApiError, ApiResult};

/// Hash verified against when the username matches no account, so that
/// path costs the same as a real mismatch.
fn dummy_password_hash() -> &'static str {
    static DUMMY: OnceLock<String> = OnceLock::new();
    DUMMY.get_or_init(|| password::hash_password("not-a-real-password").unwrap_or_default())
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub account_id: Uuid,
    pub username: String,
    pub role: Role,
}

/// Service for login and staff account administration.
#[derive(Clone)]
pub struct AuthService {
    accounts: AccountRepository,
    session_tokens: Arc<SessionTokenConfig>,
}

impl AuthService {
    pub fn new(pool: PgPool, session_tokens: Arc<SessionTokenConfig>) -> Self {
        Self {
            accounts: AccountRepository::new(pool),
            session_tokens,
        }
    }

    /// Authenticates a staff account and mints a session token.
    ///
    /// Unknown usernames and wrong passwords both come back as
    /// `InvalidCredentials` so the response does not reveal which
    /// usernames exist; the missing-user path still burns an Argon2
    /// verification so response timing does not reveal it either.
    /// Suspension is not checked here: a suspended account can hold a
    /// session token, and the registerer gate re-reads the account status
    /// on every request.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<LoginOutcome> {
        let Some(account) = self.accounts.find_by_username(username).await? else {
            let _ = password::verify_password(password, dummy_password_hash());
            return Err(ApiError::InvalidCredentials);
        };

        let matches = password::verify_password(password, &account.password_hash)?;
        if !matches {
            return Err(ApiError::InvalidCredentials);
        }

        let role = account.role();
        let token =
            self.session_tokens
                .generate(account.account_id, &account.username, role.as_str())?;

        tracing::info!(username = %account.username, role = %role, "staff login");

        Ok(LoginOutcome {
            token,
            account_id: account.account_id,
            username: account.username,
            role,
        })
    }

    /// Creates a staff account with the given role.
    pub async fn create_account(
        &self,
        username: &str,
        plain_password: &str,
        role: Role,
    ) -> ApiResult<AccountEntity> {
        let password_hash = password::hash_password(plain_password)?;

        self.accounts
            .create(username, &password_hash, role)
            .await?
            .ok_or_else(|| {
                ApiError::Conflict(format!("Username '{}' is already taken", username))
            })
    }

    /// Suspends or reactivates an account.
    pub async fn set_status(&self, account_id: Uuid, status: AccountStatus) -> ApiResult<()> {
        let updated = self.accounts.set_status(account_id, status).await?;
        if !updated {
            return Err(ApiError::NotFound("Account".to_string()));
        }
        tracing::info!(%account_id, status = %status, "account status changed");
        Ok(())
    }

    /// Deletes a registerer account. Admin accounts cannot be deleted
    /// through this path.
    pub async fn delete_registerer(&self, account_id: Uuid) -> ApiResult<()> {
        let deleted = self.accounts.delete_registerer(account_id).await?;
        if !deleted {
            return Err(ApiError::NotFound("Registerer account".to_string()));
        }
        Ok(())
    }

    /// Lists all registerer accounts.
    pub async fn list_registerers(&self) -> ApiResult<Vec<AccountEntity>> {
        Ok(self.accounts.list_registerers().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dummy_hash_is_a_real_phc_hash() {
        let hash = dummy_password_hash();
        assert!(hash.starts_with("$argon2id$"));
        // Any supplied password verifies to a clean mismatch, not an error.
        let matches = password::verify_password("guess", hash).unwrap();
        assert!(!matches);
    }
}
