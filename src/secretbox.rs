//! XSalsa20-Poly1305 secret-box backend.
//!
//! Binary payload: `[nonce:24][ciphertext + embedded tag]`. Unlike the GCM
//! layout there is no detached tag region; the sealed remainder after the
//! nonce is handed whole to the opening primitive.

use crypto_secretbox::aead::{Aead, KeyInit};
use crypto_secretbox::{Nonce, XSalsa20Poly1305};

use crate::error::OpError;
use crate::keys::Passphrase;
use crate::types::{SECRETBOX_NONCE_LENGTH, SECRETBOX_TAG_LENGTH};

/// Smallest payload this backend can produce: nonce, one ciphertext byte,
/// embedded tag.
pub(crate) const MIN_PAYLOAD_LENGTH: usize = SECRETBOX_NONCE_LENGTH + 1 + SECRETBOX_TAG_LENGTH;

/// Generate a random 24-byte nonce. Fresh for every call, never reused.
fn generate_nonce() -> Result<[u8; SECRETBOX_NONCE_LENGTH], OpError> {
    let mut nonce = [0u8; SECRETBOX_NONCE_LENGTH];
    getrandom::getrandom(&mut nonce).map_err(|_| OpError::EncryptionFailed)?;
    Ok(nonce)
}

pub(crate) fn encrypt(plaintext: &[u8], passphrase: &Passphrase) -> Result<Vec<u8>, OpError> {
    let cipher = XSalsa20Poly1305::new_from_slice(passphrase.as_bytes())
        .map_err(|_| OpError::EncryptionFailed)?;
    let nonce = generate_nonce()?;

    let sealed = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|_| OpError::EncryptionFailed)?;

    let mut payload = Vec::with_capacity(SECRETBOX_NONCE_LENGTH + sealed.len());
    payload.extend_from_slice(&nonce);
    payload.extend_from_slice(&sealed);
    Ok(payload)
}

pub(crate) fn decrypt(payload: &[u8], passphrase: &Passphrase) -> Result<Vec<u8>, OpError> {
    if payload.len() < MIN_PAYLOAD_LENGTH {
        return Err(OpError::PayloadTooShort);
    }
    let cipher = XSalsa20Poly1305::new_from_slice(passphrase.as_bytes())
        .map_err(|_| OpError::DecryptionFailed)?;
    let nonce = &payload[..SECRETBOX_NONCE_LENGTH];
    let sealed = &payload[SECRETBOX_NONCE_LENGTH..];

    cipher
        .decrypt(Nonce::from_slice(nonce), sealed)
        .map_err(|_| OpError::DecryptionFailed)
}
