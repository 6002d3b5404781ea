//! Repository for invited institute database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::InstituteEntity;

/// Repository for institute operations.
#[derive(Clone)]
pub struct InstituteRepository {
    pool: PgPool,
}

impl InstituteRepository {
    /// Creates a new institute repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new institute. The registration token is generated by the
    /// store's column default.
    pub async fn create(
        &self,
        name: &str,
        institute_type: Option<&str>,
        priority: Option<i32>,
        is_vip: bool,
    ) -> Result<InstituteEntity, sqlx::Error> {
        sqlx::query_as::<_, InstituteEntity>(
            r#"
            INSERT INTO invited_institutes (institute_name, institute_type, institute_priority, is_vip)
            VALUES ($1, $2, $3, $4)
            RETURNING institute_id, institute_name, institute_type, institute_priority,
                      is_vip, registration_token, created_at
            "#,
        )
        .bind(name)
        .bind(institute_type)
        .bind(priority)
        .bind(is_vip)
        .fetch_one(&self.pool)
        .await
    }

    /// Lists all institutes, newest first.
    pub async fn list(&self) -> Result<Vec<InstituteEntity>, sqlx::Error> {
        sqlx::query_as::<_, InstituteEntity>(
            r#"
            SELECT institute_id, institute_name, institute_type, institute_priority,
                   is_vip, registration_token, created_at
            FROM invited_institutes
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    /// Resolves an institute from its registration token (capability URL).
    pub async fn find_by_registration_token(
        &self,
        token: Uuid,
    ) -> Result<Option<InstituteEntity>, sqlx::Error> {
        sqlx::query_as::<_, InstituteEntity>(
            r#"
            SELECT institute_id, institute_name, institute_type, institute_priority,
                   is_vip, registration_token, created_at
            FROM invited_institutes
            WHERE registration_token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
    }

    /// Deletes an institute.
    ///
    /// Returns `true` when a row was deleted.
    pub async fn delete(&self, institute_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM invited_institutes
            WHERE institute_id = $1
            "#,
        )
        .bind(institute_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
