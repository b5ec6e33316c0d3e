//! Secrets, passphrase derivation, and the rotation keyring.
//!
//! An operator secret is a high-entropy string of at least 88 bytes. The
//! cipher never sees it: a one-way hash turns it into a fixed 32-byte
//! passphrase. A keyring holds one passphrase per configured secret, in
//! trial order. Entry 0 is current and used for new encryptions; later
//! entries are decrypt-only rotation leftovers.

use std::fmt;
use std::sync::OnceLock;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use sha2::{Digest, Sha256, Sha512_256};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::config::KeyHashAlgorithm;
use crate::error::ConfigError;
use crate::types::{KEY_LENGTH, MIN_SECRET_LENGTH};

/// Operator-supplied secret string.
///
/// Zeroized on drop and redacted in debug output. Never logged, never
/// placed in an error record.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Secret(String);

impl Secret {
    /// Wrap a secret string, enforcing the minimum length in bytes.
    ///
    /// A short secret is a configuration problem, reported once here and
    /// never per call.
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.len() < MIN_SECRET_LENGTH {
            return Err(ConfigError::SecretTooShort {
                got: secret.len(),
                min: MIN_SECRET_LENGTH,
            });
        }
        Ok(Self(secret))
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(..)")
    }
}

/// Derived 32-byte key, the only key form a backend ever touches.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Passphrase([u8; KEY_LENGTH]);

impl Passphrase {
    pub(crate) fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.0
    }
}

impl fmt::Debug for Passphrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Passphrase(..)")
    }
}

/// Derive a passphrase from a secret with the configured one-way hash.
pub(crate) fn derive_passphrase(secret: &Secret, hash: KeyHashAlgorithm) -> Passphrase {
    let digest: [u8; KEY_LENGTH] = match hash {
        KeyHashAlgorithm::Sha512_256 => Sha512_256::digest(secret.as_bytes()).into(),
        KeyHashAlgorithm::Sha256 => Sha256::digest(secret.as_bytes()).into(),
    };
    Passphrase(digest)
}

/// Generate a fresh operator secret: 64 OS-random bytes as padded base64,
/// which comes out at exactly the 88-character minimum.
pub fn generate_secret() -> String {
    let mut raw = [0u8; 64];
    getrandom::getrandom(&mut raw).expect("getrandom failed");
    let secret = STANDARD.encode(raw);
    raw.zeroize();
    secret
}

/// Ordered passphrase list for one service instance.
///
/// Derivation happens on first use and is cached for the instance lifetime
/// through a one-shot cell. The cache is instance-owned, never a process
/// global, so independently configured instances stay isolated.
pub(crate) struct Keyring {
    secrets: Vec<Secret>,
    hash: KeyHashAlgorithm,
    derived: OnceLock<Vec<Passphrase>>,
}

impl Keyring {
    pub(crate) fn new(secrets: Vec<Secret>, hash: KeyHashAlgorithm) -> Result<Self, ConfigError> {
        if secrets.is_empty() {
            return Err(ConfigError::EmptySecretList);
        }
        Ok(Self {
            secrets,
            hash,
            derived: OnceLock::new(),
        })
    }

    /// Passphrase used for new encryptions (always the list head).
    pub(crate) fn current(&self) -> &Passphrase {
        &self.candidates()[0]
    }

    /// All passphrases, in decryption trial order.
    pub(crate) fn candidates(&self) -> &[Passphrase] {
        self.derived.get_or_init(|| {
            self.secrets
                .iter()
                .map(|secret| derive_passphrase(secret, self.hash))
                .collect()
        })
    }
}
