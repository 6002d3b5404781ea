//! Candidate language preferences.
//!
//! The supported language set is closed: Arabic, English, French. Every
//! outward-facing artifact (emails, response pages) is localized by an
//! explicit override if supplied, else the candidate's stored language, else
//! English. Unknown values, supplied or stored, fall back to English rather
//! than failing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Candidate's preferred language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Ar,
    #[default]
    En,
    Fr,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Ar => "ar",
            Language::En => "en",
            Language::Fr => "fr",
        }
    }

    /// Parses a language code, falling back to English for anything outside
    /// the closed set (including absent values).
    pub fn parse_or_default(code: Option<&str>) -> Self {
        match code {
            Some("ar") => Language::Ar,
            Some("fr") => Language::Fr,
            Some("en") => Language::En,
            _ => Language::En,
        }
    }

    /// Resolves the effective language: explicit override wins, then the
    /// candidate's stored preference, then English. A supplied override
    /// outside the closed set resolves to English, not to the stored
    /// preference; only an absent (or empty) override falls through.
    pub fn resolve(override_code: Option<&str>, stored: Option<&str>) -> Self {
        match override_code {
            Some(code) if !code.is_empty() => Self::parse_or_default(Some(code)),
            _ => Self::parse_or_default(stored),
        }
    }

    /// Text direction for rendered pages.
    pub fn is_rtl(&self) -> bool {
        matches!(self, Language::Ar)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_codes() {
        assert_eq!(Language::parse_or_default(Some("ar")), Language::Ar);
        assert_eq!(Language::parse_or_default(Some("en")), Language::En);
        assert_eq!(Language::parse_or_default(Some("fr")), Language::Fr);
    }

    #[test]
    fn test_unknown_falls_back_to_english() {
        assert_eq!(Language::parse_or_default(Some("de")), Language::En);
        assert_eq!(Language::parse_or_default(Some("AR")), Language::En);
        assert_eq!(Language::parse_or_default(Some("")), Language::En);
        assert_eq!(Language::parse_or_default(None), Language::En);
    }

    #[test]
    fn test_resolve_override_wins() {
        assert_eq!(Language::resolve(Some("fr"), Some("ar")), Language::Fr);
    }

    #[test]
    fn test_resolve_unknown_override_falls_back_to_english() {
        assert_eq!(Language::resolve(Some("de"), Some("ar")), Language::En);
        assert_eq!(Language::resolve(Some("xx"), Some("fr")), Language::En);
    }

    #[test]
    fn test_resolve_absent_override_uses_stored() {
        assert_eq!(Language::resolve(None, Some("fr")), Language::Fr);
        assert_eq!(Language::resolve(Some(""), Some("ar")), Language::Ar);
    }

    #[test]
    fn test_resolve_default() {
        assert_eq!(Language::resolve(None, None), Language::En);
        assert_eq!(Language::resolve(None, Some("unknown")), Language::En);
    }

    #[test]
    fn test_rtl() {
        assert!(Language::Ar.is_rtl());
        assert!(!Language::En.is_rtl());
        assert!(!Language::Fr.is_rtl());
    }
}
