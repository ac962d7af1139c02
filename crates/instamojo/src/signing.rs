//! Link signing: canonical message construction and HMAC-SHA1.
//!
//! The canonical message is built from the field *values* only:
//!
//! 1. entries are ordered by ASCII-lowercased key,
//! 2. each value is rendered with [`FieldValue::canonical`] (lists are sorted
//!    and concatenated with no separator),
//! 3. the rendered values are joined with `|`.
//!
//! The MAC is HMAC-SHA1 over that message keyed by the account salt, encoded
//! as lowercase hex. This must stay bit-compatible with the platform's
//! verifier, so do not change the hash without a protocol version bump.
//!
//! Keys are not part of the message. Two maps whose values coincide once
//! sorted by key sign identically; do not reuse this construction for new
//! protocols.

use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::error::{InstamojoError, Result};
use crate::fields::FieldMap;

type HmacSha1 = Hmac<Sha1>;

/// Build the `|`-joined message that gets signed.
pub fn canonical_message(fields: &FieldMap) -> Result<String> {
    if fields.is_empty() {
        return Err(InstamojoError::Input(
            "field map to sign is empty".to_string(),
        ));
    }

    let parts: Vec<String> = fields
        .sorted_case_insensitive()
        .into_iter()
        .map(|(_, value)| value.canonical())
        .collect();
    Ok(parts.join("|"))
}

/// Sign `fields` with `salt`. Returns the lowercase hex HMAC-SHA1.
pub fn sign(fields: &FieldMap, salt: &str) -> Result<String> {
    let mac = keyed_mac(fields, salt)?;
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Check a signature produced by [`sign`]. Comparison is constant-time;
/// malformed hex, an empty map and an empty salt all count as a mismatch.
pub fn verify(fields: &FieldMap, salt: &str, signature: &str) -> bool {
    let Ok(mac) = keyed_mac(fields, salt) else {
        return false;
    };
    // Decode first; a bad encoding still goes through verify_slice
    let expected = hex::decode(signature).unwrap_or_else(|_| vec![0u8; 20]);
    mac.verify_slice(&expected).is_ok()
}

fn keyed_mac(fields: &FieldMap, salt: &str) -> Result<HmacSha1> {
    if salt.is_empty() {
        return Err(InstamojoError::Configuration(
            "can't sign without salt".to_string(),
        ));
    }
    let message = canonical_message(fields)?;
    tracing::debug!(fields = fields.len(), "computing link signature");

    let mut mac = HmacSha1::new_from_slice(salt.as_bytes())
        .map_err(|e| InstamojoError::Configuration(format!("invalid salt: {e}")))?;
    mac.update(message.as_bytes());
    Ok(mac)
}
