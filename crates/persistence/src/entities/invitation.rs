//! Event invitation entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::InvitationState;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the event_invitations table.
#[derive(Debug, Clone, FromRow)]
pub struct InvitationEntity {
    pub invitation_id: Uuid,
    pub candidate_id: Uuid,
    pub event_id: Uuid,
    pub state: String,
    pub invitations_sent: i32,
    pub invitation_token: String,
    pub responded_at: Option<DateTime<Utc>>,
    pub checked_in_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl InvitationEntity {
    /// Parses the stored state. Unknown values fail closed as terminal:
    /// they can neither be responded to nor checked in.
    pub fn state(&self) -> InvitationState {
        self.state.parse().unwrap_or(InvitationState::Rejected)
    }
}

/// Candidate summary joined with invitation state, shown on the registerer's
/// screen after a QR scan.
#[derive(Debug, Clone, FromRow)]
pub struct CheckinRow {
    pub invitation_id: Uuid,
    pub candidate_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub institute: Option<String>,
    pub state: String,
    pub checked_in_at: Option<DateTime<Utc>>,
}

impl CheckinRow {
    pub fn state(&self) -> InvitationState {
        self.state.parse().unwrap_or(InvitationState::Rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invitation(state: &str) -> InvitationEntity {
        InvitationEntity {
            invitation_id: Uuid::new_v4(),
            candidate_id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            state: state.to_string(),
            invitations_sent: 1,
            invitation_token: "tokentokentokentokentokentokenAA".to_string(),
            responded_at: None,
            checked_in_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_state_parsing() {
        assert_eq!(invitation("pending").state(), InvitationState::Pending);
        assert_eq!(invitation("Accepted").state(), InvitationState::Accepted);
        assert_eq!(invitation("Rejected").state(), InvitationState::Rejected);
        assert_eq!(invitation("CheckedIn").state(), InvitationState::CheckedIn);
    }

    #[test]
    fn test_unknown_state_fails_closed() {
        let state = invitation("garbage").state();
        assert!(!state.can_respond());
        assert!(!state.can_check_in());
        assert!(!state.qr_viewable());
    }
}
