//! Candidate management routes, plus the public institute-scoped
//! registration lookup.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use domain::models::{Institute, Language};
use persistence::entities::CandidateEntity;
use persistence::repositories::{
    CandidateFilter, CandidateListRow, CandidateRepository, InstituteRepository, NewCandidate,
};

use crate::app::AppState;
use crate::error::ApiError;

/// Request body for creating a candidate.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCandidateRequest {
    #[validate(length(min = 1, message = "firstName is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "lastName is required"))]
    pub last_name: String,
    pub position: Option<String>,
    pub institute: Option<String>,
    pub country: Option<String>,
    #[validate(length(min = 5, message = "phoneNumber is required"))]
    pub phone_number: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    pub language: Option<String>,
    pub institute_id: Option<Uuid>,
}

/// Candidate response body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateResponse {
    pub candidate_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub position: Option<String>,
    pub institute: Option<String>,
    pub country: Option<String>,
    pub phone_number: String,
    pub email: String,
    pub language: Language,
    pub institute_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<CandidateEntity> for CandidateResponse {
    fn from(entity: CandidateEntity) -> Self {
        let language = entity.language();
        Self {
            candidate_id: entity.candidate_id,
            first_name: entity.first_name,
            last_name: entity.last_name,
            position: entity.position,
            institute: entity.institute,
            country: entity.country,
            phone_number: entity.phone_number,
            email: entity.email,
            language,
            institute_id: entity.institute_id,
            created_at: entity.created_at,
        }
    }
}

/// Optional filters for the candidate listing.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListCandidatesQuery {
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub invitation_id: Option<Uuid>,
    pub state: Option<String>,
    pub invitations_sent: Option<i32>,
}

/// Candidate row in the admin listing, joined with invitation state.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateListItem {
    pub candidate_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
    pub institute: Option<String>,
    pub invitation_id: Option<Uuid>,
    pub state: Option<String>,
    pub invitations_sent: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<CandidateListRow> for CandidateListItem {
    fn from(row: CandidateListRow) -> Self {
        let institute = row.institute_label().map(str::to_string);
        Self {
            candidate_id: row.candidate_id,
            first_name: row.first_name,
            last_name: row.last_name,
            phone_number: row.phone_number,
            email: row.email,
            institute,
            invitation_id: row.invitation_id,
            state: row.state,
            invitations_sent: row.invitations_sent,
            created_at: row.created_at,
        }
    }
}

/// Creates a candidate.
///
/// POST /api/candidates (admin)
///
/// A duplicate (email, phone) pair answers 409.
pub async fn create_candidate(
    State(state): State<AppState>,
    Json(request): Json<CreateCandidateRequest>,
) -> Result<(StatusCode, Json<CandidateResponse>), ApiError> {
    request.validate()?;

    let language = Language::parse_or_default(request.language.as_deref());

    let candidate = NewCandidate {
        first_name: request.first_name,
        last_name: request.last_name,
        position: request.position,
        institute: request.institute,
        country: request.country,
        phone_number: request.phone_number,
        email: request.email,
        language: language.as_str().to_string(),
        institute_id: request.institute_id,
    };

    let created = CandidateRepository::new(state.pool.clone())
        .create(&candidate)
        .await?
        .ok_or_else(|| {
            ApiError::Conflict(
                "A candidate with this email and phone number already exists".to_string(),
            )
        })?;

    tracing::info!(candidate_id = %created.candidate_id, "candidate created");

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Lists candidates with optional filters, joined with invitation state.
///
/// GET /api/candidates (admin)
pub async fn list_candidates(
    State(state): State<AppState>,
    Query(query): Query<ListCandidatesQuery>,
) -> Result<Json<Vec<CandidateListItem>>, ApiError> {
    let filter = CandidateFilter {
        phone_number: query.phone_number,
        email: query.email,
        invitation_id: query.invitation_id,
        state: query.state,
        invitations_sent: query.invitations_sent,
    };

    let rows = CandidateRepository::new(state.pool.clone())
        .list_filtered(&filter)
        .await?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// Deletes a candidate.
///
/// DELETE /api/candidates/:id (admin)
pub async fn delete_candidate(
    State(state): State<AppState>,
    Path(candidate_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let deleted = CandidateRepository::new(state.pool.clone())
        .delete(candidate_id)
        .await?;

    if !deleted {
        return Err(ApiError::NotFound("Candidate".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Resolves an institute from its registration token, for the
/// institute-scoped self-registration form.
///
/// GET /api/candidates/register/:token (public)
pub async fn get_institute_by_token(
    State(state): State<AppState>,
    Path(token): Path<Uuid>,
) -> Result<Json<Institute>, ApiError> {
    let institute = InstituteRepository::new(state.pool.clone())
        .find_by_registration_token(token)
        .await?
        .ok_or_else(|| ApiError::NotFound("Institute".to_string()))?;

    Ok(Json(institute.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateCandidateRequest {
        CreateCandidateRequest {
            first_name: "Amina".to_string(),
            last_name: "Hassan".to_string(),
            position: None,
            institute: None,
            country: Some("EG".to_string()),
            phone_number: "+201000000000".to_string(),
            email: "amina@example.org".to_string(),
            language: Some("ar".to_string()),
            institute_id: None,
        }
    }

    #[test]
    fn test_create_request_validation() {
        assert!(valid_request().validate().is_ok());

        let mut bad_email = valid_request();
        bad_email.email = "not-an-email".to_string();
        assert!(bad_email.validate().is_err());

        let mut empty_name = valid_request();
        empty_name.first_name = String::new();
        assert!(empty_name.validate().is_err());
    }

    #[test]
    fn test_list_query_defaults_to_no_filters() {
        let query: ListCandidatesQuery = serde_json::from_str("{}").unwrap();
        assert!(query.phone_number.is_none());
        assert!(query.state.is_none());
    }

    #[test]
    fn test_list_item_uses_institute_label() {
        let row = CandidateListRow {
            candidate_id: Uuid::new_v4(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            phone_number: "+20".to_string(),
            email: "a@b.c".to_string(),
            institute: Some("Free text".to_string()),
            custom_institute_name: Some("Referenced".to_string()),
            invitation_id: None,
            state: None,
            invitations_sent: None,
            created_at: Utc::now(),
        };
        let item: CandidateListItem = row.into();
        assert_eq!(item.institute.as_deref(), Some("Referenced"));
    }
}
