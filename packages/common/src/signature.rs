//! Standard-webhooks style signature verification: HMAC-SHA256 over
//! `{id}.{timestamp}.{body}`, base64-encoded, carried in a header of
//! space-separated `version,value` pairs.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Maximum accepted clock skew between the timestamp header and the
/// receiver, in either direction.
pub const REPLAY_WINDOW_SECS: i64 = 300;

/// Prefix marking a shared secret as base64-encoded key material.
pub const SECRET_PREFIX: &str = "whsec_";

#[derive(Debug, Error)]
pub enum SecretError {
    #[error("webhook secret carries the {SECRET_PREFIX} prefix but is not valid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
}

/// Decodes a configured shared secret into raw key bytes. Secrets with
/// the `whsec_` prefix are base64-decoded; anything else is used as
/// UTF-8 bytes directly.
pub fn decode_secret(secret: &str) -> Result<Vec<u8>, SecretError> {
    match secret.strip_prefix(SECRET_PREFIX) {
        Some(encoded) => Ok(BASE64.decode(encoded)?),
        None => Ok(secret.as_bytes().to_vec()),
    }
}

/// Collects the values of every `v1,<value>` pair in a signature
/// header. Other version tags are ignored.
pub fn extract_v1_signatures(header: &str) -> Vec<&str> {
    header
        .split_whitespace()
        .filter_map(|segment| segment.split_once(','))
        .filter(|(version, value)| *version == "v1" && !value.is_empty())
        .map(|(_, value)| value)
        .collect()
}

/// Verifies a signed webhook delivery at a given instant (seconds since
/// epoch). Malformed input is a `false` verdict, never an error: the
/// caller decides separately whether verification is enabled and
/// whether a secret is configured.
pub fn verify_at(
    key: &[u8],
    id: &str,
    timestamp: &str,
    signature_header: &str,
    body: &str,
    now: i64,
) -> bool {
    let Ok(ts) = timestamp.parse::<i64>() else {
        return false;
    };
    // Checked arithmetic: the timestamp is attacker-controlled and may
    // sit at the i64 extremes, which would overflow a plain subtraction.
    let Some(skew) = now.checked_sub(ts).and_then(i64::checked_abs) else {
        return false;
    };
    if skew > REPLAY_WINDOW_SECS {
        return false;
    }

    let Ok(mut mac) = HmacSha256::new_from_slice(key) else {
        return false;
    };
    // Signed content is the exact concatenation, not re-serialized JSON.
    mac.update(id.as_bytes());
    mac.update(b".");
    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(body.as_bytes());
    let expected = BASE64.encode(mac.finalize().into_bytes());

    extract_v1_signatures(signature_header)
        .into_iter()
        .any(|candidate| constant_time_eq(candidate.as_bytes(), expected.as_bytes()))
}

/// Constant-time equality over byte strings. Length mismatch is an
/// immediate `false`.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && bool::from(a.ct_eq(b))
}
