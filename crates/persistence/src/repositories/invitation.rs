//! Repository for event invitation database operations.
//!
//! All state transitions are conditional writes: the WHERE clause carries the
//! expected prior state, so concurrent callers race on the store's row lock
//! and exactly one wins. No in-process locking is used.

use domain::models::InvitationState;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{CheckinRow, InvitationEntity};

/// Outcome of a check-in attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckinOutcome {
    /// Transitioned to CheckedIn.
    Done,
    /// Invitation exists but is not in a check-in-eligible state.
    NotEligible,
    /// No invitation with that identifier.
    NotFound,
}

/// Repository for event invitation operations.
#[derive(Clone)]
pub struct InvitationRepository {
    pool: PgPool,
}

impl InvitationRepository {
    /// Creates a new invitation repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Upserts the invitation row for a (candidate, event) pair at issue time.
    ///
    /// First issue inserts the row in `pending` with the given token. A
    /// re-issue increments `invitations_sent` and rotates the token to the
    /// given one in the same conditional write, so the old token is invalid
    /// the moment the new one exists. State is never reset.
    pub async fn upsert_for_issue(
        &self,
        candidate_id: Uuid,
        event_id: Uuid,
        token: &str,
    ) -> Result<InvitationEntity, sqlx::Error> {
        sqlx::query_as::<_, InvitationEntity>(
            r#"
            INSERT INTO event_invitations (candidate_id, event_id, state, invitations_sent, invitation_token)
            VALUES ($1, $2, 'pending', 1, $3)
            ON CONFLICT (candidate_id, event_id) DO UPDATE
            SET invitations_sent = event_invitations.invitations_sent + 1,
                invitation_token = EXCLUDED.invitation_token
            RETURNING invitation_id, candidate_id, event_id, state, invitations_sent,
                      invitation_token, responded_at, checked_in_at, created_at
            "#,
        )
        .bind(candidate_id)
        .bind(event_id)
        .bind(token)
        .fetch_one(&self.pool)
        .await
    }

    /// Finds an invitation by its identifier.
    pub async fn find_by_id(
        &self,
        invitation_id: Uuid,
    ) -> Result<Option<InvitationEntity>, sqlx::Error> {
        sqlx::query_as::<_, InvitationEntity>(
            r#"
            SELECT invitation_id, candidate_id, event_id, state, invitations_sent,
                   invitation_token, responded_at, checked_in_at, created_at
            FROM event_invitations
            WHERE invitation_id = $1
            "#,
        )
        .bind(invitation_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Finds the invitation row for a (candidate, event) pair.
    pub async fn find_by_candidate_event(
        &self,
        candidate_id: Uuid,
        event_id: Uuid,
    ) -> Result<Option<InvitationEntity>, sqlx::Error> {
        sqlx::query_as::<_, InvitationEntity>(
            r#"
            SELECT invitation_id, candidate_id, event_id, state, invitations_sent,
                   invitation_token, responded_at, checked_in_at, created_at
            FROM event_invitations
            WHERE candidate_id = $1 AND event_id = $2
            "#,
        )
        .bind(candidate_id)
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Finds an invitation by its current token. Rotated and consumed tokens
    /// match nothing; the caller cannot tell those cases apart, by contract.
    pub async fn find_by_token(
        &self,
        token: &str,
    ) -> Result<Option<InvitationEntity>, sqlx::Error> {
        sqlx::query_as::<_, InvitationEntity>(
            r#"
            SELECT invitation_id, candidate_id, event_id, state, invitations_sent,
                   invitation_token, responded_at, checked_in_at, created_at
            FROM event_invitations
            WHERE invitation_token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
    }

    /// Applies a confirm/decline response: first writer wins.
    ///
    /// The update only matches while the row still holds this exact token AND
    /// is still `pending`, so a retry, a stale token, or a concurrent loser
    /// all fall out as `None`.
    pub async fn respond(
        &self,
        token: &str,
        target: InvitationState,
    ) -> Result<Option<InvitationEntity>, sqlx::Error> {
        sqlx::query_as::<_, InvitationEntity>(
            r#"
            UPDATE event_invitations
            SET state = $2, responded_at = NOW()
            WHERE invitation_token = $1 AND state = 'pending'
            RETURNING invitation_id, candidate_id, event_id, state, invitations_sent,
                      invitation_token, responded_at, checked_in_at, created_at
            "#,
        )
        .bind(token)
        .bind(target.as_str())
        .fetch_optional(&self.pool)
        .await
    }

    /// Resolves an invitation by token for the QR view, requiring that it has
    /// been confirmed. Pending and rejected invitations match nothing.
    pub async fn find_confirmed_by_token(
        &self,
        token: &str,
    ) -> Result<Option<InvitationEntity>, sqlx::Error> {
        sqlx::query_as::<_, InvitationEntity>(
            r#"
            SELECT invitation_id, candidate_id, event_id, state, invitations_sent,
                   invitation_token, responded_at, checked_in_at, created_at
            FROM event_invitations
            WHERE invitation_token = $1 AND state IN ('Accepted', 'CheckedIn')
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
    }

    /// Loads the candidate summary for the registerer's screen, keyed by the
    /// bare invitation identifier scanned from the QR code.
    pub async fn find_for_checkin(
        &self,
        invitation_id: Uuid,
    ) -> Result<Option<CheckinRow>, sqlx::Error> {
        sqlx::query_as::<_, CheckinRow>(
            r#"
            SELECT i.invitation_id, c.candidate_id, c.first_name, c.last_name,
                   c.email, c.phone_number, c.institute, i.state, i.checked_in_at
            FROM event_invitations i
            JOIN candidates c ON i.candidate_id = c.candidate_id
            WHERE i.invitation_id = $1
            "#,
        )
        .bind(invitation_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Performs the terminal check-in transition.
    ///
    /// The conditional update only succeeds from `Accepted`; on zero rows a
    /// follow-up read distinguishes "no such invitation" from "exists but not
    /// eligible" (pending, rejected, or already checked in).
    pub async fn check_in(&self, invitation_id: Uuid) -> Result<CheckinOutcome, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE event_invitations
            SET state = 'CheckedIn', checked_in_at = NOW()
            WHERE invitation_id = $1 AND state = 'Accepted'
            "#,
        )
        .bind(invitation_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() > 0 {
            return Ok(CheckinOutcome::Done);
        }

        match self.find_by_id(invitation_id).await? {
            Some(_) => Ok(CheckinOutcome::NotEligible),
            None => Ok(CheckinOutcome::NotFound),
        }
    }
}
