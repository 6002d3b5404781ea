//! Candidate entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::Language;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the candidates table.
#[derive(Debug, Clone, FromRow)]
pub struct CandidateEntity {
    pub candidate_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub position: Option<String>,
    pub institute: Option<String>,
    pub country: Option<String>,
    pub phone_number: String,
    pub email: String,
    pub language: String,
    pub institute_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl CandidateEntity {
    /// Stored language preference, falling back to English for unknown codes.
    pub fn language(&self) -> Language {
        Language::parse_or_default(Some(&self.language))
    }

    /// Whether this candidate can receive an invitation email at all.
    pub fn has_email(&self) -> bool {
        !self.email.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(email: &str, language: &str) -> CandidateEntity {
        CandidateEntity {
            candidate_id: Uuid::new_v4(),
            first_name: "Amina".to_string(),
            last_name: "Hassan".to_string(),
            position: None,
            institute: None,
            country: Some("EG".to_string()),
            phone_number: "+201000000000".to_string(),
            email: email.to_string(),
            language: language.to_string(),
            institute_id: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_language_fallback() {
        assert_eq!(candidate("a@b.c", "ar").language(), Language::Ar);
        assert_eq!(candidate("a@b.c", "xx").language(), Language::En);
    }

    #[test]
    fn test_has_email() {
        assert!(candidate("a@b.c", "en").has_email());
        assert!(!candidate("", "en").has_email());
        assert!(!candidate("   ", "en").has_email());
    }
}
