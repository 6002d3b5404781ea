//! Repository for staff account database operations.

use domain::models::{AccountStatus, Role};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::AccountEntity;

/// Repository for staff account operations.
#[derive(Clone)]
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    /// Creates a new account repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new account.
    ///
    /// Returns `None` when the username is already taken (the unique
    /// constraint swallows the insert via ON CONFLICT DO NOTHING).
    pub async fn create(
        &self,
        username: &str,
        password_hash: &str,
        role: Role,
    ) -> Result<Option<AccountEntity>, sqlx::Error> {
        sqlx::query_as::<_, AccountEntity>(
            r#"
            INSERT INTO accounts (username, password_hash, role)
            VALUES ($1, $2, $3)
            ON CONFLICT (username) DO NOTHING
            RETURNING account_id, username, password_hash, role, status, created_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(role.as_str())
        .fetch_optional(&self.pool)
        .await
    }

    /// Finds an account by username.
    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AccountEntity>, sqlx::Error> {
        sqlx::query_as::<_, AccountEntity>(
            r#"
            SELECT account_id, username, password_hash, role, status, created_at
            FROM accounts
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
    }

    /// Finds an account by its identifier.
    pub async fn find_by_id(
        &self,
        account_id: Uuid,
    ) -> Result<Option<AccountEntity>, sqlx::Error> {
        sqlx::query_as::<_, AccountEntity>(
            r#"
            SELECT account_id, username, password_hash, role, status, created_at
            FROM accounts
            WHERE account_id = $1
            "#,
        )
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Updates an account's suspension status.
    ///
    /// Returns `false` when no such account exists.
    pub async fn set_status(
        &self,
        account_id: Uuid,
        status: AccountStatus,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET status = $2
            WHERE account_id = $1
            "#,
        )
        .bind(account_id)
        .bind(status.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes a registerer account. Admin accounts are never hard-deleted;
    /// the role predicate makes this a no-op for them.
    ///
    /// Returns `true` when an account was deleted.
    pub async fn delete_registerer(&self, account_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM accounts
            WHERE account_id = $1 AND role = 'registerer'
            "#,
        )
        .bind(account_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists all registerer accounts, newest first.
    pub async fn list_registerers(&self) -> Result<Vec<AccountEntity>, sqlx::Error> {
        sqlx::query_as::<_, AccountEntity>(
            r#"
            SELECT account_id, username, password_hash, role, status, created_at
            FROM accounts
            WHERE role = 'registerer'
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }
}
