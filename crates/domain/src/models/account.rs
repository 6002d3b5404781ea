//! Account roles and status.
//!
//! Accounts belong to back-office staff: admins manage candidates, institutes
//! and other accounts; registerers only operate the check-in gate. Only
//! admins may create, suspend, or delete accounts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Staff role attached to an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Registerer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Registerer => "registerer",
        }
    }

    /// Whether this role may manage accounts (create/suspend/delete).
    pub fn can_manage_accounts(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Whether this role may operate the check-in gate.
    pub fn can_check_in(&self) -> bool {
        matches!(self, Role::Admin | Role::Registerer)
    }
}

impl FromStr for Role {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "registerer" => Ok(Role::Registerer),
            other => Err(UnknownValue(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account activation status. Suspended accounts keep their credentials but
/// are refused at registerer-gated routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
    Suspended,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "active",
            AccountStatus::Suspended => "suspended",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, AccountStatus::Active)
    }
}

impl FromStr for AccountStatus {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(AccountStatus::Active),
            "suspended" => Ok(AccountStatus::Suspended),
            other => Err(UnknownValue(other.to_string())),
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for parsing an unrecognized enum value from the store or a request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown value: {0}")]
pub struct UnknownValue(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("registerer".parse::<Role>().unwrap(), Role::Registerer);
        assert_eq!(Role::Admin.as_str(), "admin");
        assert_eq!(Role::Registerer.to_string(), "registerer");
    }

    #[test]
    fn test_role_unknown_rejected() {
        assert!("superuser".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
        assert!("Admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_capabilities() {
        assert!(Role::Admin.can_manage_accounts());
        assert!(!Role::Registerer.can_manage_accounts());
        assert!(Role::Admin.can_check_in());
        assert!(Role::Registerer.can_check_in());
    }

    #[test]
    fn test_status_round_trip() {
        assert_eq!("active".parse::<AccountStatus>().unwrap(), AccountStatus::Active);
        assert_eq!(
            "suspended".parse::<AccountStatus>().unwrap(),
            AccountStatus::Suspended
        );
        assert!("disabled".parse::<AccountStatus>().is_err());
    }

    #[test]
    fn test_status_is_active() {
        assert!(AccountStatus::Active.is_active());
        assert!(!AccountStatus::Suspended.is_active());
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(
            serde_json::to_string(&AccountStatus::Suspended).unwrap(),
            "\"suspended\""
        );
    }
}
