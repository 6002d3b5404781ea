//! Staff account entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{AccountStatus, Role};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the accounts table.
#[derive(Debug, Clone, FromRow)]
pub struct AccountEntity {
    pub account_id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl AccountEntity {
    /// Parses the stored role. Unknown values are treated as the least
    /// privileged role rather than failing the whole request.
    pub fn role(&self) -> Role {
        self.role.parse().unwrap_or(Role::Registerer)
    }

    /// Parses the stored status. Unknown values fail closed as suspended.
    pub fn status(&self) -> AccountStatus {
        self.status.parse().unwrap_or(AccountStatus::Suspended)
    }

    pub fn is_active(&self) -> bool {
        self.status().is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(role: &str, status: &str) -> AccountEntity {
        AccountEntity {
            account_id: Uuid::new_v4(),
            username: "gate1".to_string(),
            password_hash: "$argon2id$...".to_string(),
            role: role.to_string(),
            status: status.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!(account("admin", "active").role(), Role::Admin);
        assert_eq!(account("registerer", "active").role(), Role::Registerer);
    }

    #[test]
    fn test_unknown_role_least_privileged() {
        assert_eq!(account("root", "active").role(), Role::Registerer);
    }

    #[test]
    fn test_status_parsing() {
        assert!(account("admin", "active").is_active());
        assert!(!account("admin", "suspended").is_active());
    }

    #[test]
    fn test_unknown_status_fails_closed() {
        assert!(!account("admin", "???").is_active());
    }
}
