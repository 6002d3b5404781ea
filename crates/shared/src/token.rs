//! Opaque invitation-token generation.
//!
//! Invitation tokens are the single-use credentials embedded in emailed
//! confirm/decline links. They carry no structure: verification is a store
//! lookup against the currently stored token for an invitation row, and the
//! token is rotated on every re-issue. They must never be derivable from the
//! invitation identifier.

use rand::Rng;

/// Token length in characters. 32 characters over a 55-symbol alphabet gives
/// well over 180 bits of entropy.
pub const INVITATION_TOKEN_LEN: usize = 32;

// URL-safe alphabet, avoiding confusable characters (0, O, 1, l, I).
const CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZabcdefghjkmnpqrstuvwxyz23456789";

/// Generates a fresh invitation token.
pub fn generate_invitation_token() -> String {
    let mut rng = rand::thread_rng();

    (0..INVITATION_TOKEN_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
