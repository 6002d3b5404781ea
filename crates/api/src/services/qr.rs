//! QR code rendering for invitation entry passes.
//!
//! The QR payload is the invitation id. Check-in staff scan the code and
//! look the invitation up by that id, so the payload carries no secret.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use qrcode::{render::svg, QrCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QrError {
    #[error("Failed to encode QR payload: {0}")]
    Encoding(#[from] qrcode::types::QrError),
}

/// Renders the payload as an SVG QR code wrapped in a base64 data URL,
/// suitable for an `<img src>` attribute.
pub fn data_url(payload: &str) -> Result<String, QrError> {
    let code = QrCode::new(payload.as_bytes())?;
    let image = code
        .render::<svg::Color>()
        .min_dimensions(240, 240)
        .build();
    Ok(format!(
        "data:image/svg+xml;base64,{}",
        STANDARD.encode(image)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_url_prefix() {
        let url = data_url("6a1f6f86-1c3a-4f0e-9c57-0d54f3a6b001").unwrap();
        assert!(url.starts_with("data:image/svg+xml;base64,"));
    }

    #[test]
    fn test_payload_round_trips_through_base64() {
        let url = data_url("invitation-id").unwrap();
        let encoded = url.trim_start_matches("data:image/svg+xml;base64,");
        let decoded = STANDARD.decode(encoded).unwrap();
        let svg = String::from_utf8(decoded).unwrap();
        assert!(svg.contains("<svg"));
    }

    #[test]
    fn test_distinct_payloads_produce_distinct_codes() {
        let a = data_url("invitation-a").unwrap();
        let b = data_url("invitation-b").unwrap();
        assert_ne!(a, b);
    }
}
