//! Check-in gate routes.
//!
//! The registerer scans a guest's QR code, which carries the invitation id.
//! GET shows who is at the gate and whether they may enter; POST performs
//! the one-shot check-in transition.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use domain::models::InvitationState;
use persistence::entities::CheckinRow;
use persistence::repositories::{CheckinOutcome, InvitationRepository};

use crate::app::AppState;
use crate::error::ApiError;

/// Candidate summary shown on the registerer's screen.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckinDetailsResponse {
    pub invitation_id: Uuid,
    pub candidate_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub institute: Option<String>,
    pub state: InvitationState,
    pub eligible: bool,
    pub checked_in_at: Option<DateTime<Utc>>,
}

impl From<CheckinRow> for CheckinDetailsResponse {
    fn from(row: CheckinRow) -> Self {
        let state = row.state();
        Self {
            invitation_id: row.invitation_id,
            candidate_id: row.candidate_id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone_number: row.phone_number,
            institute: row.institute,
            state,
            eligible: state.can_check_in(),
            checked_in_at: row.checked_in_at,
        }
    }
}

/// Response after a successful check-in.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckinResponse {
    pub message: String,
    pub invitation_id: Uuid,
}

/// Looks up the candidate behind a scanned invitation id.
///
/// GET /api/checkin/:invitation_id (registerer|admin)
pub async fn get_checkin_details(
    State(state): State<AppState>,
    Path(invitation_id): Path<Uuid>,
) -> Result<Json<CheckinDetailsResponse>, ApiError> {
    let row = InvitationRepository::new(state.pool.clone())
        .find_for_checkin(invitation_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Invitation".to_string()))?;

    Ok(Json(row.into()))
}

/// Marks the guest as checked in.
///
/// POST /api/checkin/:invitation_id (registerer|admin)
///
/// The transition only succeeds from `Accepted`. A repeat attempt answers
/// 409 `already_done`; an invitation that was never confirmed (or was
/// declined) answers 409 `conflict`.
pub async fn check_in(
    State(state): State<AppState>,
    Path(invitation_id): Path<Uuid>,
) -> Result<Json<CheckinResponse>, ApiError> {
    let invitations = InvitationRepository::new(state.pool.clone());

    match invitations.check_in(invitation_id).await? {
        CheckinOutcome::Done => {
            tracing::info!(%invitation_id, "guest checked in");
            Ok(Json(CheckinResponse {
                message: "Candidate checked in successfully.".to_string(),
                invitation_id,
            }))
        }
        CheckinOutcome::NotFound => Err(ApiError::NotFound("Invitation".to_string())),
        CheckinOutcome::NotEligible => {
            // Distinguish a repeat check-in from a never-confirmed invitation
            // for the error body; the state may have moved again in between,
            // in which case the generic message is still truthful.
            let current = invitations
                .find_by_id(invitation_id)
                .await?
                .map(|i| i.state());

            match current {
                Some(InvitationState::CheckedIn) => Err(ApiError::AlreadyDone(
                    "Guest has already been checked in".to_string(),
                )),
                _ => Err(ApiError::Conflict(
                    "Invitation is not confirmed for check-in".to_string(),
                )),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(state: &str) -> CheckinRow {
        CheckinRow {
            invitation_id: Uuid::new_v4(),
            candidate_id: Uuid::new_v4(),
            first_name: "Amina".to_string(),
            last_name: "Hassan".to_string(),
            email: "amina@example.org".to_string(),
            phone_number: "+201000000000".to_string(),
            institute: Some("Chamber".to_string()),
            state: state.to_string(),
            checked_in_at: None,
        }
    }

    #[test]
    fn test_details_eligibility() {
        let accepted: CheckinDetailsResponse = row("Accepted").into();
        assert!(accepted.eligible);

        let pending: CheckinDetailsResponse = row("pending").into();
        assert!(!pending.eligible);

        let done: CheckinDetailsResponse = row("CheckedIn").into();
        assert!(!done.eligible);
    }

    #[test]
    fn test_details_serialization_camel_case() {
        let details: CheckinDetailsResponse = row("Accepted").into();
        let json = serde_json::to_string(&details).unwrap();
        assert!(json.contains("\"invitationId\""));
        assert!(json.contains("\"phoneNumber\""));
        assert!(json.contains("\"state\":\"Accepted\""));
    }
}
