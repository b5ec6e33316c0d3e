//! AES-256-GCM backend.
//!
//! Binary payload: `[IV:12][ciphertext][tag:16]`. The AEAD appends its tag
//! to the ciphertext, which yields exactly this layout; decryption derives
//! the split offsets from the total length.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};

use crate::error::OpError;
use crate::keys::Passphrase;
use crate::types::{AES_GCM_IV_LENGTH, AES_GCM_TAG_LENGTH};

/// Smallest payload this backend can produce: IV, one ciphertext byte, tag.
pub(crate) const MIN_PAYLOAD_LENGTH: usize = AES_GCM_IV_LENGTH + 1 + AES_GCM_TAG_LENGTH;

/// Generate a random 12-byte IV. Fresh for every call, never reused.
fn generate_iv() -> Result<[u8; AES_GCM_IV_LENGTH], OpError> {
    let mut iv = [0u8; AES_GCM_IV_LENGTH];
    getrandom::getrandom(&mut iv).map_err(|_| OpError::EncryptionFailed)?;
    Ok(iv)
}

pub(crate) fn encrypt(plaintext: &[u8], passphrase: &Passphrase) -> Result<Vec<u8>, OpError> {
    let cipher = Aes256Gcm::new_from_slice(passphrase.as_bytes())
        .map_err(|_| OpError::EncryptionFailed)?;
    let iv = generate_iv()?;

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&iv), plaintext)
        .map_err(|_| OpError::EncryptionFailed)?;

    let mut payload = Vec::with_capacity(AES_GCM_IV_LENGTH + ciphertext.len());
    payload.extend_from_slice(&iv);
    payload.extend_from_slice(&ciphertext);
    Ok(payload)
}

pub(crate) fn decrypt(payload: &[u8], passphrase: &Passphrase) -> Result<Vec<u8>, OpError> {
    if payload.len() < MIN_PAYLOAD_LENGTH {
        return Err(OpError::PayloadTooShort);
    }
    let cipher = Aes256Gcm::new_from_slice(passphrase.as_bytes())
        .map_err(|_| OpError::DecryptionFailed)?;
    let iv = &payload[..AES_GCM_IV_LENGTH];
    let ciphertext = &payload[AES_GCM_IV_LENGTH..];

    // Tag mismatch and any cipher-level error fold into one opaque failure.
    cipher
        .decrypt(Nonce::from_slice(iv), ciphertext)
        .map_err(|_| OpError::DecryptionFailed)
}
