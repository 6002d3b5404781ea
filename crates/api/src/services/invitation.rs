//! Invitation issuing, guest responses, and the QR view.
//!
//! Issuing fans out over the requested candidates concurrently; each
//! candidate either gets an email with a fresh token or lands in the
//! excluded list, and one bad candidate never aborts the batch. Guest
//! responses ride on the conditional writes in the repository, so the
//! first response wins and every later attempt reads as an invalid token.

use tokio::task::JoinSet;
use uuid::Uuid;

use domain::models::{Language, ResponseDecision};
use persistence::entities::{CandidateEntity, InvitationEntity};
use persistence::repositories::{CandidateRepository, InvitationRepository};
use shared::token::generate_invitation_token;
use sqlx::PgPool;

use crate::error::{ApiError, ApiResult};
use crate::i18n;
use crate::services::email::{EmailMessage, EmailService};

/// Result of an invitation batch: who got an email, who was excluded.
#[derive(Debug, Clone)]
pub struct IssueOutcome {
    /// Recipient addresses that were sent an invitation.
    pub sent: Vec<String>,
    /// Candidate ids that could not be invited.
    pub excluded: Vec<Uuid>,
}

/// Result of a guest response, carrying what the response page needs.
#[derive(Debug, Clone)]
pub struct RespondOutcome {
    pub invitation: InvitationEntity,
    pub lang: Language,
}

/// Resolved data for the QR code page.
#[derive(Debug, Clone)]
pub struct QrView {
    pub invitation_id: Uuid,
    pub lang: Language,
}

/// Service for the invitation lifecycle.
#[derive(Clone)]
pub struct InvitationService {
    invitations: InvitationRepository,
    candidates: CandidateRepository,
    email: EmailService,
    base_url: String,
}

impl InvitationService {
    pub fn new(pool: PgPool, email: EmailService, public_base_url: &str) -> Self {
        Self {
            invitations: InvitationRepository::new(pool.clone()),
            candidates: CandidateRepository::new(pool),
            email,
            base_url: format!("{}/api/invitations", public_base_url.trim_end_matches('/')),
        }
    }

    /// Issues invitations to the given candidates for an event.
    ///
    /// Each candidate is handled in its own task: load the candidate,
    /// mint a fresh token, upsert the invitation row (re-issue rotates
    /// the token and bumps the send counter), and dispatch the email.
    /// A failure at any step excludes that candidate only.
    pub async fn issue(&self, candidate_ids: Vec<Uuid>, event_id: Uuid) -> ApiResult<IssueOutcome> {
        if candidate_ids.is_empty() {
            return Err(ApiError::Validation(
                "candidateIds must not be empty".to_string(),
            ));
        }

        let mut tasks: JoinSet<Result<String, Uuid>> = JoinSet::new();

        for candidate_id in candidate_ids {
            let service = self.clone();
            tasks.spawn(async move {
                service
                    .issue_one(candidate_id, event_id)
                    .await
                    .map_err(|err| {
                        tracing::warn!(
                            %candidate_id,
                            error = %err,
                            "failed to send invitation"
                        );
                        candidate_id
                    })
            });
        }

        let mut sent = Vec::new();
        let mut excluded = Vec::new();

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(email)) => sent.push(email),
                Ok(Err(candidate_id)) => excluded.push(candidate_id),
                Err(join_err) => {
                    // A panicked task loses its candidate id; surface the
                    // batch as a server error rather than drop it silently.
                    return Err(ApiError::Internal(anyhow::anyhow!(
                        "invitation task failed: {join_err}"
                    )));
                }
            }
        }

        Ok(IssueOutcome { sent, excluded })
    }

    async fn issue_one(&self, candidate_id: Uuid, event_id: Uuid) -> anyhow::Result<String> {
        let candidate = self
            .candidates
            .find_by_id(candidate_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("candidate {candidate_id} not found"))?;

        if !candidate.has_email() {
            anyhow::bail!("candidate {candidate_id} has no valid email");
        }

        let token = generate_invitation_token();
        let invitation = self
            .invitations
            .upsert_for_issue(candidate_id, event_id, &token)
            .await?;

        let lang = candidate.language();
        let confirm_url = format!("{}/confirm?token={}", self.base_url, token);
        let decline_url = format!("{}/decline?token={}", self.base_url, token);
        let content = i18n::invitation_email(lang, &candidate.first_name, &confirm_url, &decline_url);

        self.email
            .send(EmailMessage {
                to: candidate.email.clone(),
                to_name: Some(format!("{} {}", candidate.first_name, candidate.last_name)),
                subject: content.subject,
                html_body: content.html_body,
            })
            .await?;

        tracing::info!(
            %candidate_id,
            invitation_id = %invitation.invitation_id,
            invitations_sent = invitation.invitations_sent,
            "invitation sent"
        );

        Ok(candidate.email)
    }

    /// Applies a guest's confirm or decline response for the given token.
    ///
    /// Returns `NotFound` when the token matches no pending invitation:
    /// unknown, rotated, and already-consumed tokens are indistinguishable
    /// on purpose. The follow-up email is best-effort; by the time it is
    /// sent the state transition has already committed, so a dispatch
    /// failure only gets logged.
    pub async fn respond(
        &self,
        token: &str,
        decision: ResponseDecision,
        lang_override: Option<&str>,
    ) -> ApiResult<RespondOutcome> {
        let invitation = self
            .invitations
            .respond(token, decision.target_state())
            .await?
            .ok_or_else(|| ApiError::NotFound("Invitation".to_string()))?;

        let candidate = self
            .candidates
            .find_by_id(invitation.candidate_id)
            .await?
            .ok_or_else(|| {
                ApiError::Internal(anyhow::anyhow!(
                    "invitation {} references missing candidate",
                    invitation.invitation_id
                ))
            })?;

        let lang = Language::resolve(lang_override, Some(&candidate.language));

        let content = match decision {
            ResponseDecision::Accept => {
                let qr_link = format!(
                    "{}/show-qrcode?token={}&lang={}",
                    self.base_url, token, lang
                );
                i18n::confirmation_email(lang, &qr_link)
            }
            ResponseDecision::Decline => i18n::decline_ack_email(lang),
        };

        if let Err(err) = self
            .email
            .send(EmailMessage {
                to: candidate.email.clone(),
                to_name: Some(format!("{} {}", candidate.first_name, candidate.last_name)),
                subject: content.subject,
                html_body: content.html_body,
            })
            .await
        {
            tracing::warn!(
                invitation_id = %invitation.invitation_id,
                error = %err,
                "response recorded but follow-up email failed"
            );
        }

        tracing::info!(
            invitation_id = %invitation.invitation_id,
            decision = ?decision,
            "guest response recorded"
        );

        Ok(RespondOutcome { invitation, lang })
    }

    /// Resolves the QR code page for a confirmed invitation token.
    pub async fn show_qr(&self, token: &str, lang_override: Option<&str>) -> ApiResult<QrView> {
        let invitation = self
            .invitations
            .find_confirmed_by_token(token)
            .await?
            .ok_or_else(|| ApiError::NotFound("Invitation".to_string()))?;

        let stored_lang = self
            .candidates
            .find_by_id(invitation.candidate_id)
            .await?
            .map(|c: CandidateEntity| c.language);

        let lang = Language::resolve(lang_override, stored_lang.as_deref());

        Ok(QrView {
            invitation_id: invitation.invitation_id,
            lang,
        })
    }
}
