//! First-admin bootstrap for initial setup.
//!
//! Creates the first admin account on startup if configured via environment
//! variables. Without it a fresh deployment has no account that can log in,
//! since only admins can create further accounts.

use sqlx::PgPool;
use tracing::{info, warn};

use domain::models::Role;
use persistence::repositories::AccountRepository;
use shared::password::{hash_password, PasswordError};

use crate::config::AdminBootstrapConfig;

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] PasswordError),
}

/// Creates the bootstrap admin account if configured and not already done.
///
/// Called after migrations on startup. Idempotent: if any admin account
/// already exists the configured credentials are ignored.
pub async fn bootstrap_admin(
    pool: &PgPool,
    config: &AdminBootstrapConfig,
) -> Result<(), BootstrapError> {
    if config.bootstrap_username.is_empty() {
        return Ok(());
    }

    if config.bootstrap_password.is_empty() {
        warn!(
            "RAMS__ADMIN__BOOTSTRAP_USERNAME is set but \
             RAMS__ADMIN__BOOTSTRAP_PASSWORD is empty - skipping bootstrap"
        );
        return Ok(());
    }

    let admin_exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM accounts WHERE role = 'admin')")
            .fetch_one(pool)
            .await?;

    if admin_exists {
        info!("Admin account already exists - skipping bootstrap");
        return Ok(());
    }

    let password_hash = hash_password(&config.bootstrap_password)?;

    let accounts = AccountRepository::new(pool.clone());
    match accounts
        .create(&config.bootstrap_username, &password_hash, Role::Admin)
        .await?
    {
        Some(account) => {
            info!(
                username = %account.username,
                account_id = %account.account_id,
                "Bootstrap admin account created"
            );
            warn!(
                "SECURITY: Remove RAMS__ADMIN__BOOTSTRAP_USERNAME and \
                 RAMS__ADMIN__BOOTSTRAP_PASSWORD from the environment now \
                 that the admin account exists"
            );
        }
        None => {
            // Username taken by a non-admin account; the credentials are
            // wrong, not the system state.
            warn!(
                username = %config.bootstrap_username,
                "Bootstrap username is already taken - skipping bootstrap"
            );
        }
    }

    Ok(())
}
