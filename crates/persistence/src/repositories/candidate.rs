//! Repository for candidate database operations.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::entities::CandidateEntity;

/// Fields for inserting a candidate.
#[derive(Debug, Clone)]
pub struct NewCandidate {
    pub first_name: String,
    pub last_name: String,
    pub position: Option<String>,
    pub institute: Option<String>,
    pub country: Option<String>,
    pub phone_number: String,
    pub email: String,
    pub language: String,
    pub institute_id: Option<Uuid>,
}

/// Optional filters for the candidate listing.
#[derive(Debug, Clone, Default)]
pub struct CandidateFilter {
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub invitation_id: Option<Uuid>,
    pub state: Option<String>,
    pub invitations_sent: Option<i32>,
}

/// Candidate row joined with its invitation and institute, for the admin list.
#[derive(Debug, Clone, FromRow)]
pub struct CandidateListRow {
    pub candidate_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
    pub institute: Option<String>,
    pub custom_institute_name: Option<String>,
    pub invitation_id: Option<Uuid>,
    pub state: Option<String>,
    pub invitations_sent: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl CandidateListRow {
    /// Effective institute label: the referenced institute's name wins over
    /// the free-text field.
    pub fn institute_label(&self) -> Option<&str> {
        self.custom_institute_name
            .as_deref()
            .or(self.institute.as_deref())
    }
}

/// Repository for candidate operations.
#[derive(Clone)]
pub struct CandidateRepository {
    pool: PgPool,
}

impl CandidateRepository {
    /// Creates a new candidate repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a candidate.
    ///
    /// Returns `None` when a candidate with the same (email, phone) pair
    /// already exists.
    pub async fn create(
        &self,
        candidate: &NewCandidate,
    ) -> Result<Option<CandidateEntity>, sqlx::Error> {
        sqlx::query_as::<_, CandidateEntity>(
            r#"
            INSERT INTO candidates (first_name, last_name, position, institute, country,
                                    phone_number, email, language, institute_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (email, phone_number) DO NOTHING
            RETURNING candidate_id, first_name, last_name, position, institute, country,
                      phone_number, email, language, institute_id, created_at
            "#,
        )
        .bind(&candidate.first_name)
        .bind(&candidate.last_name)
        .bind(&candidate.position)
        .bind(&candidate.institute)
        .bind(&candidate.country)
        .bind(&candidate.phone_number)
        .bind(&candidate.email)
        .bind(&candidate.language)
        .bind(candidate.institute_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Finds a candidate by its identifier.
    pub async fn find_by_id(
        &self,
        candidate_id: Uuid,
    ) -> Result<Option<CandidateEntity>, sqlx::Error> {
        sqlx::query_as::<_, CandidateEntity>(
            r#"
            SELECT candidate_id, first_name, last_name, position, institute, country,
                   phone_number, email, language, institute_id, created_at
            FROM candidates
            WHERE candidate_id = $1
            "#,
        )
        .bind(candidate_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Deletes a candidate.
    ///
    /// Returns `true` when a row was deleted. A foreign-key violation (the
    /// candidate is referenced by an invitation) surfaces as an sqlx error
    /// with code 23503.
    pub async fn delete(&self, candidate_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM candidates
            WHERE candidate_id = $1
            "#,
        )
        .bind(candidate_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists candidates joined with invitation and institute, applying the
    /// given optional filters, newest first.
    pub async fn list_filtered(
        &self,
        filter: &CandidateFilter,
    ) -> Result<Vec<CandidateListRow>, sqlx::Error> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(
            r#"
            SELECT c.candidate_id, c.first_name, c.last_name, c.phone_number, c.email,
                   c.institute, ii.institute_name AS custom_institute_name,
                   ei.invitation_id, ei.state, ei.invitations_sent, c.created_at
            FROM candidates c
            LEFT JOIN event_invitations ei ON c.candidate_id = ei.candidate_id
            LEFT JOIN invited_institutes ii ON c.institute_id = ii.institute_id
            WHERE 1 = 1
            "#,
        );

        if let Some(phone) = &filter.phone_number {
            query.push(" AND c.phone_number = ").push_bind(phone);
        }
        if let Some(email) = &filter.email {
            query.push(" AND c.email = ").push_bind(email);
        }
        if let Some(invitation_id) = filter.invitation_id {
            query.push(" AND ei.invitation_id = ").push_bind(invitation_id);
        }
        if let Some(state) = &filter.state {
            query.push(" AND ei.state = ").push_bind(state);
        }
        if let Some(sent) = filter.invitations_sent {
            query.push(" AND ei.invitations_sent = ").push_bind(sent);
        }

        query.push(" ORDER BY c.created_at DESC");

        query
            .build_query_as::<CandidateListRow>()
            .fetch_all(&self.pool)
            .await
    }
}
