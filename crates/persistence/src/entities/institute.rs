//! Institute entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::institute::Institute;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the invited_institutes table.
#[derive(Debug, Clone, FromRow)]
pub struct InstituteEntity {
    pub institute_id: Uuid,
    pub institute_name: String,
    pub institute_type: Option<String>,
    pub institute_priority: Option<i32>,
    pub is_vip: bool,
    pub registration_token: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<InstituteEntity> for Institute {
    fn from(e: InstituteEntity) -> Self {
        Institute {
            institute_id: e.institute_id,
            institute_name: e.institute_name,
            institute_type: e.institute_type,
            institute_priority: e.institute_priority,
            is_vip: e.is_vip,
            registration_token: e.registration_token,
        }
    }
}
