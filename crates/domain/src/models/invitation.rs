//! Invitation lifecycle state machine.
//!
//! Exactly one invitation exists per (candidate, event) pair. The lifecycle:
//!
//! ```text
//! pending --confirm--> Accepted --check-in--> CheckedIn
//!    \
//!     `--decline--> Rejected
//! ```
//!
//! Rejected and CheckedIn are terminal. Accepted is not terminal: it is the
//! prerequisite for check-in. Re-issuing an invitation rotates its token and
//! bumps the resend counter but never resets the state.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::account::UnknownValue;

/// Invitation state as stored on the invitation row.
///
/// The string forms mirror the store values, including the historical casing
/// (`pending` lowercase, response states capitalized).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvitationState {
    #[serde(rename = "pending")]
    Pending,
    Accepted,
    Rejected,
    CheckedIn,
}

impl InvitationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvitationState::Pending => "pending",
            InvitationState::Accepted => "Accepted",
            InvitationState::Rejected => "Rejected",
            InvitationState::CheckedIn => "CheckedIn",
        }
    }

    /// Whether a confirm/decline response is still possible.
    pub fn can_respond(&self) -> bool {
        matches!(self, InvitationState::Pending)
    }

    /// Whether the QR view may be rendered. The QR code must not be viewable
    /// before the invitation is confirmed, and stays viewable after check-in
    /// (the gate refuses a second check-in on its own).
    pub fn qr_viewable(&self) -> bool {
        matches!(self, InvitationState::Accepted | InvitationState::CheckedIn)
    }

    /// Whether the check-in transition is currently allowed.
    pub fn can_check_in(&self) -> bool {
        matches!(self, InvitationState::Accepted)
    }

    /// Whether the state is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, InvitationState::Rejected | InvitationState::CheckedIn)
    }
}

impl FromStr for InvitationState {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(InvitationState::Pending),
            "Accepted" => Ok(InvitationState::Accepted),
            "Rejected" => Ok(InvitationState::Rejected),
            "CheckedIn" => Ok(InvitationState::CheckedIn),
            other => Err(UnknownValue(other.to_string())),
        }
    }
}

impl fmt::Display for InvitationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A candidate's decision when responding to an invitation link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseDecision {
    Accept,
    Decline,
}

impl ResponseDecision {
    /// The state the invitation transitions to for this decision.
    pub fn target_state(&self) -> InvitationState {
        match self {
            ResponseDecision::Accept => InvitationState::Accepted,
            ResponseDecision::Decline => InvitationState::Rejected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_round_trip() {
        for state in [
            InvitationState::Pending,
            InvitationState::Accepted,
            InvitationState::Rejected,
            InvitationState::CheckedIn,
        ] {
            assert_eq!(state.as_str().parse::<InvitationState>().unwrap(), state);
        }
        assert!("accepted".parse::<InvitationState>().is_err());
        assert!("unknown".parse::<InvitationState>().is_err());
    }

    #[test]
    fn test_only_pending_can_respond() {
        assert!(InvitationState::Pending.can_respond());
        assert!(!InvitationState::Accepted.can_respond());
        assert!(!InvitationState::Rejected.can_respond());
        assert!(!InvitationState::CheckedIn.can_respond());
    }

    #[test]
    fn test_qr_requires_confirmation() {
        assert!(!InvitationState::Pending.qr_viewable());
        assert!(!InvitationState::Rejected.qr_viewable());
        assert!(InvitationState::Accepted.qr_viewable());
        assert!(InvitationState::CheckedIn.qr_viewable());
    }

    #[test]
    fn test_check_in_only_from_accepted() {
        assert!(InvitationState::Accepted.can_check_in());
        assert!(!InvitationState::Pending.can_check_in());
        assert!(!InvitationState::Rejected.can_check_in());
        assert!(!InvitationState::CheckedIn.can_check_in());
    }

    #[test]
    fn test_terminal_states() {
        assert!(InvitationState::Rejected.is_terminal());
        assert!(InvitationState::CheckedIn.is_terminal());
        assert!(!InvitationState::Pending.is_terminal());
        assert!(!InvitationState::Accepted.is_terminal());
    }

    #[test]
    fn test_decision_targets() {
        assert_eq!(
            ResponseDecision::Accept.target_state(),
            InvitationState::Accepted
        );
        assert_eq!(
            ResponseDecision::Decline.target_state(),
            InvitationState::Rejected
        );
    }
}
