//! Institute affiliation model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An invited institute. Each institute carries a unique registration token,
/// a capability URL component for institute-scoped self-registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Institute {
    pub institute_id: Uuid,
    pub institute_name: String,
    pub institute_type: Option<String>,
    pub institute_priority: Option<i32>,
    pub is_vip: bool,
    pub registration_token: Uuid,
}
