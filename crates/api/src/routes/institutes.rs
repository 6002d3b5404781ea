//! Invited institute management routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use domain::models::Institute;
use persistence::repositories::InstituteRepository;

use crate::app::AppState;
use crate::error::ApiError;

/// Request body for creating an institute.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateInstituteRequest {
    #[validate(length(min = 1, message = "instituteName is required"))]
    pub institute_name: String,
    pub institute_type: Option<String>,
    pub institute_priority: Option<i32>,
    #[serde(default)]
    pub is_vip: bool,
}

/// Creates an institute. The registration token is minted by the store.
///
/// POST /api/institutes (admin)
pub async fn create_institute(
    State(state): State<AppState>,
    Json(request): Json<CreateInstituteRequest>,
) -> Result<(StatusCode, Json<Institute>), ApiError> {
    request.validate()?;

    let institute = InstituteRepository::new(state.pool.clone())
        .create(
            &request.institute_name,
            request.institute_type.as_deref(),
            request.institute_priority,
            request.is_vip,
        )
        .await?;

    tracing::info!(institute_id = %institute.institute_id, "institute created");

    Ok((StatusCode::CREATED, Json(institute.into())))
}

/// Lists all institutes.
///
/// GET /api/institutes (admin)
pub async fn list_institutes(
    State(state): State<AppState>,
) -> Result<Json<Vec<Institute>>, ApiError> {
    let institutes = InstituteRepository::new(state.pool.clone()).list().await?;
    Ok(Json(institutes.into_iter().map(Into::into).collect()))
}

/// Deletes an institute.
///
/// DELETE /api/institutes/:id (admin)
pub async fn delete_institute(
    State(state): State<AppState>,
    Path(institute_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let deleted = InstituteRepository::new(state.pool.clone())
        .delete(institute_id)
        .await?;

    if !deleted {
        return Err(ApiError::NotFound("Institute".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_requires_name() {
        let request: CreateInstituteRequest =
            serde_json::from_str(r#"{"instituteName":""}"#).unwrap();
        assert!(request.validate().is_err());

        let request: CreateInstituteRequest =
            serde_json::from_str(r#"{"instituteName":"Chamber of Commerce"}"#).unwrap();
        assert!(request.validate().is_ok());
        assert!(!request.is_vip);
    }

    #[test]
    fn test_vip_flag_parses() {
        let request: CreateInstituteRequest = serde_json::from_str(
            r#"{"instituteName":"VIP Org","isVip":true,"institutePriority":1}"#,
        )
        .unwrap();
        assert!(request.is_vip);
        assert_eq!(request.institute_priority, Some(1));
    }
}
