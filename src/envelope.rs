//! Envelope wire format: `[4 ASCII chars: version tag][base64 payload]`.
//!
//! The base64 region uses the standard alphabet with padding. Unwrapping
//! scans the character class before decoding so pathological inputs are
//! rejected cheaply, before any cryptographic work.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::OpError;
use crate::types::VERSION_TAG_LENGTH;

fn is_base64_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'+' || c == b'/' || c == b'='
}

/// Wrap a binary payload in the envelope wire format.
pub(crate) fn wrap(payload: &[u8], tag: &str) -> String {
    debug_assert_eq!(tag.len(), VERSION_TAG_LENGTH);
    let mut envelope = String::with_capacity(VERSION_TAG_LENGTH + payload.len().div_ceil(3) * 4);
    envelope.push_str(tag);
    STANDARD.encode_string(payload, &mut envelope);
    envelope
}

/// Split an envelope into its version tag and decoded binary payload.
///
/// Dispatch on the tag is the caller's job; this layer only guarantees the
/// tag is 4 ASCII characters and the remainder is well-formed base64.
pub(crate) fn unwrap(envelope: &str) -> Result<(&str, Vec<u8>), OpError> {
    if envelope.len() <= VERSION_TAG_LENGTH {
        return Err(OpError::EnvelopeTooShort);
    }
    if !envelope.is_char_boundary(VERSION_TAG_LENGTH) {
        return Err(OpError::UnknownVersionTag);
    }
    let (tag, body) = envelope.split_at(VERSION_TAG_LENGTH);
    if !tag.bytes().all(|c| c.is_ascii_graphic()) {
        return Err(OpError::UnknownVersionTag);
    }
    if !body.bytes().all(is_base64_char) {
        return Err(OpError::InvalidBase64);
    }
    let payload = STANDARD.decode(body).map_err(|_| OpError::InvalidBase64)?;
    Ok((tag, payload))
}
