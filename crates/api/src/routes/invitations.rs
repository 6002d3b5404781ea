//! Invitation routes: admin batch issue plus the public guest pages.
//!
//! The guest pages (confirm, decline, show-qrcode) are reached from email
//! links, so they answer with localized HTML rather than JSON. Error pages
//! render in English; successful pages follow the candidate's language
//! unless a `lang` query parameter overrides it.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use domain::models::{Language, ResponseDecision};

use crate::app::AppState;
use crate::error::ApiError;
use crate::i18n::{self, PageText};
use crate::services::invitation::InvitationService;
use crate::services::qr;

/// Request body for issuing an invitation batch.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendInvitationsRequest {
    #[validate(length(min = 1, message = "candidateIds must not be empty"))]
    pub candidate_ids: Vec<Uuid>,
    pub event_id: Uuid,
}

/// Batch outcome: successful recipients and excluded candidate ids.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendInvitationsResponse {
    pub message: String,
    pub sent: Vec<String>,
    pub excluded_recipients: Vec<Uuid>,
}

/// Query parameters shared by the guest pages.
#[derive(Debug, Deserialize)]
pub struct GuestPageQuery {
    pub token: Option<String>,
    pub lang: Option<String>,
}

fn invitation_service(state: &AppState) -> InvitationService {
    InvitationService::new(
        state.pool.clone(),
        state.email.clone(),
        &state.config.server.public_base_url,
    )
}

/// Renders a localized error page. Error pages always render in English:
/// at this point there is no trusted candidate language to use.
fn error_page(status: StatusCode, message_key: PageText, token: &str) -> Response {
    let lang = Language::En;
    let body = format!(
        "<h1>{}</h1><p>{}</p>",
        i18n::text(lang, PageText::ErrorHeader),
        i18n::text(lang, message_key),
    );
    let page = i18n::render_page(lang, i18n::text(lang, PageText::ErrorHeader), &body, token);
    (status, Html(page)).into_response()
}

/// Issues invitations to a batch of candidates.
///
/// POST /api/invitations/send-emails (admin)
///
/// A candidate that cannot be invited (missing, no email, dispatch failure)
/// is reported in `excludedRecipients` without failing the batch. The batch
/// as a whole only fails when no candidate could be invited.
pub async fn send_invitations(
    State(state): State<AppState>,
    Json(request): Json<SendInvitationsRequest>,
) -> Result<Response, ApiError> {
    request.validate()?;

    let outcome = invitation_service(&state)
        .issue(request.candidate_ids, request.event_id)
        .await?;

    let status = if outcome.sent.is_empty() {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::OK
    };

    let body = SendInvitationsResponse {
        message: format!("Sent {} invitation(s).", outcome.sent.len()),
        sent: outcome.sent,
        excluded_recipients: outcome.excluded,
    };

    Ok((status, Json(body)).into_response())
}

/// Guest confirms attendance.
///
/// GET /api/invitations/confirm?token&lang (public, HTML)
pub async fn confirm(
    State(state): State<AppState>,
    Query(query): Query<GuestPageQuery>,
) -> Response {
    respond_page(&state, query, ResponseDecision::Accept).await
}

/// Guest declines the invitation.
///
/// GET /api/invitations/decline?token&lang (public, HTML)
pub async fn decline(
    State(state): State<AppState>,
    Query(query): Query<GuestPageQuery>,
) -> Response {
    respond_page(&state, query, ResponseDecision::Decline).await
}

async fn respond_page(
    state: &AppState,
    query: GuestPageQuery,
    decision: ResponseDecision,
) -> Response {
    let Some(token) = query.token.as_deref().filter(|t| !t.is_empty()) else {
        return error_page(StatusCode::BAD_REQUEST, PageText::ErrorMissingToken, "");
    };

    let outcome = invitation_service(state)
        .respond(token, decision, query.lang.as_deref())
        .await;

    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(ApiError::NotFound(_)) => {
            return error_page(StatusCode::NOT_FOUND, PageText::ErrorInvalidToken, token);
        }
        Err(err) => {
            tracing::error!(error = %err, "guest response failed");
            return error_page(
                StatusCode::INTERNAL_SERVER_ERROR,
                PageText::ErrorServer,
                token,
            );
        }
    };

    let (title_key, header_key, message_key) = match decision {
        ResponseDecision::Accept => (
            PageText::ConfirmTitle,
            PageText::ConfirmHeader,
            PageText::ConfirmMessage,
        ),
        ResponseDecision::Decline => (
            PageText::DeclineTitle,
            PageText::DeclineHeader,
            PageText::DeclineMessage,
        ),
    };

    let lang = outcome.lang;
    let body = format!(
        "<h1>{}</h1><p>{}</p>",
        i18n::text(lang, header_key),
        i18n::text(lang, message_key),
    );
    let page = i18n::render_page(lang, i18n::text(lang, title_key), &body, token);
    (StatusCode::OK, Html(page)).into_response()
}

/// Renders the guest's QR code page for a confirmed invitation.
///
/// GET /api/invitations/show-qrcode?token&lang (public, HTML)
pub async fn show_qrcode(
    State(state): State<AppState>,
    Query(query): Query<GuestPageQuery>,
) -> Response {
    let Some(token) = query.token.as_deref().filter(|t| !t.is_empty()) else {
        return error_page(StatusCode::BAD_REQUEST, PageText::ErrorMissingToken, "");
    };

    let view = match invitation_service(&state)
        .show_qr(token, query.lang.as_deref())
        .await
    {
        Ok(view) => view,
        Err(ApiError::NotFound(_)) => {
            return error_page(StatusCode::NOT_FOUND, PageText::ErrorInvalidQrToken, token);
        }
        Err(err) => {
            tracing::error!(error = %err, "QR page failed");
            return error_page(
                StatusCode::INTERNAL_SERVER_ERROR,
                PageText::ErrorServer,
                token,
            );
        }
    };

    let invitation_id = view.invitation_id.to_string();
    let data_url = match qr::data_url(&invitation_id) {
        Ok(url) => url,
        Err(err) => {
            tracing::error!(error = %err, "QR rendering failed");
            return error_page(
                StatusCode::INTERNAL_SERVER_ERROR,
                PageText::ErrorServer,
                token,
            );
        }
    };

    let lang = view.lang;
    let body = format!(
        r#"<h1>{header}</h1>
<p>{message}</p>
<img src="{data_url}" alt="QR Code"><br/>
<a href="{data_url}" download="rams-qrcode-{invitation_id}.svg" class="download-btn">{button}</a>"#,
        header = i18n::text(lang, PageText::QrHeader),
        message = i18n::text_with_invitation_id(lang, PageText::QrMessage, &invitation_id),
        button = i18n::text(lang, PageText::QrDownloadButton),
    );
    let page = i18n::render_page(lang, i18n::text(lang, PageText::QrTitle), &body, token);
    (StatusCode::OK, Html(page)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_request_requires_candidates() {
        let request = SendInvitationsRequest {
            candidate_ids: vec![],
            event_id: Uuid::new_v4(),
        };
        assert!(request.validate().is_err());

        let request = SendInvitationsRequest {
            candidate_ids: vec![Uuid::new_v4()],
            event_id: Uuid::new_v4(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_send_request_camel_case() {
        let request: SendInvitationsRequest = serde_json::from_str(
            r#"{"candidateIds":["6a1f6f86-1c3a-4f0e-9c57-0d54f3a6b001"],
                "eventId":"6a1f6f86-1c3a-4f0e-9c57-0d54f3a6b002"}"#,
        )
        .unwrap();
        assert_eq!(request.candidate_ids.len(), 1);
    }

    #[test]
    fn test_error_page_status() {
        let response = error_page(StatusCode::NOT_FOUND, PageText::ErrorInvalidToken, "tok");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
