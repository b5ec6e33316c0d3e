//! The envelope encryption service.
//!
//! Control flow: `encrypt` runs encoder, keyring head, backend, envelope
//! wrap; `decrypt` runs envelope unwrap, tag dispatch, keyring trial
//! decryption, decode. Any failing step short-circuits, records one error,
//! and (first failure only) triggers the timing-masking delay.

use serde_json::Value;
use tracing::{debug, trace};

use crate::config::Config;
use crate::delay;
use crate::encode::{decode_value, encode_value};
use crate::envelope;
use crate::error::{ConfigError, OpError};
use crate::keys::{Keyring, Passphrase, Secret};
use crate::types::{TAG_AES_GCM, TAG_SECRET_BOX};
use crate::{gcm, secretbox};

/// Cryptographic backend selection. Fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// AES-256-GCM: 12-byte IV, detached 16-byte tag.
    AesGcm,
    /// XSalsa20-Poly1305 secret-box: 24-byte nonce, embedded tag.
    SecretBox,
}

impl BackendKind {
    /// Envelope version tag registered for this backend.
    pub fn version_tag(self) -> &'static str {
        match self {
            BackendKind::AesGcm => TAG_AES_GCM,
            BackendKind::SecretBox => TAG_SECRET_BOX,
        }
    }

    fn min_payload_length(self) -> usize {
        match self {
            BackendKind::AesGcm => gcm::MIN_PAYLOAD_LENGTH,
            BackendKind::SecretBox => secretbox::MIN_PAYLOAD_LENGTH,
        }
    }

    fn encrypt(self, plaintext: &[u8], passphrase: &Passphrase) -> Result<Vec<u8>, OpError> {
        match self {
            BackendKind::AesGcm => gcm::encrypt(plaintext, passphrase),
            BackendKind::SecretBox => secretbox::encrypt(plaintext, passphrase),
        }
    }

    fn decrypt(self, payload: &[u8], passphrase: &Passphrase) -> Result<Vec<u8>, OpError> {
        match self {
            BackendKind::AesGcm => gcm::decrypt(payload, passphrase),
            BackendKind::SecretBox => secretbox::decrypt(payload, passphrase),
        }
    }
}

/// Deployment pattern the keyring is configured for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UseCase {
    /// Ciphertext handed to a cooperating but untrusted party and returned
    /// unmodified. Keyring: current secret plus at most one previous.
    RoundTrip,
    /// Ciphertext stored long-term by the service itself. The keyring grows
    /// as keys rotate; the list head is current, the rest decrypt only.
    AtRest,
}

/// Authenticated envelope encryption over structured values.
///
/// `encrypt` and `decrypt` never panic and never return `Err`: a failure
/// yields `None` and appends an opaque record to the instance error list.
/// Construction is the only fallible surface.
pub struct Cryptor {
    config: Config,
    backend: BackendKind,
    use_case: UseCase,
    keyring: Keyring,
    errors: Vec<String>,
}

impl std::fmt::Debug for Cryptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cryptor")
            .field("config", &self.config)
            .field("backend", &self.backend)
            .field("use_case", &self.use_case)
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}

impl Cryptor {
    /// Round-trip service with the default config and the AES-GCM backend.
    ///
    /// To rotate: move the old current secret to `previous` and issue a new
    /// current. Old ciphertexts stay readable for one rotation cycle.
    pub fn round_trip(current: Secret, previous: Option<Secret>) -> Result<Self, ConfigError> {
        Self::round_trip_with(Config::default(), BackendKind::AesGcm, current, previous)
    }

    /// Round-trip service with explicit config and backend.
    pub fn round_trip_with(
        config: Config,
        backend: BackendKind,
        current: Secret,
        previous: Option<Secret>,
    ) -> Result<Self, ConfigError> {
        let mut secrets = vec![current];
        secrets.extend(previous);
        Self::build(config, backend, UseCase::RoundTrip, secrets)
    }

    /// At-rest service with the default config and the AES-GCM backend.
    ///
    /// The list head is current and encrypts; every entry may decrypt. To
    /// rotate, prepend the new secret and keep old ones for as long as old
    /// ciphertexts must remain readable.
    pub fn at_rest(secrets: Vec<Secret>) -> Result<Self, ConfigError> {
        Self::at_rest_with(Config::default(), BackendKind::AesGcm, secrets)
    }

    /// At-rest service with explicit config and backend.
    pub fn at_rest_with(
        config: Config,
        backend: BackendKind,
        secrets: Vec<Secret>,
    ) -> Result<Self, ConfigError> {
        Self::build(config, backend, UseCase::AtRest, secrets)
    }

    fn build(
        config: Config,
        backend: BackendKind,
        use_case: UseCase,
        secrets: Vec<Secret>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let keyring = Keyring::new(secrets, config.key_hash)?;
        Ok(Self {
            config,
            backend,
            use_case,
            keyring,
            errors: Vec::new(),
        })
    }

    /// Encrypt a structured value into an envelope string.
    ///
    /// Returns `None` on failure; consult [`Cryptor::error_list`] for the
    /// causes.
    pub fn encrypt(&mut self, value: &Value) -> Option<String> {
        match self.try_encrypt(value) {
            Ok(envelope) => {
                trace!(backend = ?self.backend, "encrypted value");
                Some(envelope)
            }
            Err(err) => self.fail(err),
        }
    }

    /// Decrypt an envelope string back into a structured value.
    pub fn decrypt(&mut self, ciphertext: &str) -> Option<Value> {
        match self.try_decrypt(ciphertext) {
            Ok(value) => {
                trace!(backend = ?self.backend, "decrypted value");
                Some(value)
            }
            Err(err) => self.fail(err),
        }
    }

    fn try_encrypt(&self, value: &Value) -> Result<String, OpError> {
        let encoded = encode_value(value, &self.config)?;
        let payload = self.backend.encrypt(&encoded, self.keyring.current())?;
        Ok(envelope::wrap(&payload, self.backend.version_tag()))
    }

    fn try_decrypt(&self, ciphertext: &str) -> Result<Value, OpError> {
        let (tag, payload) = envelope::unwrap(ciphertext)?;
        if tag != self.backend.version_tag() {
            return Err(OpError::UnknownVersionTag);
        }
        let plaintext = self.open_payload(&payload)?;
        decode_value(&plaintext, &self.config)
    }

    /// Try every keyring candidate in order, newest first. The aggregated
    /// error never reveals which candidate was tried or how each one
    /// failed.
    fn open_payload(&self, payload: &[u8]) -> Result<Vec<u8>, OpError> {
        if payload.len() < self.backend.min_payload_length() {
            return Err(OpError::PayloadTooShort);
        }
        for passphrase in self.keyring.candidates() {
            if let Ok(plaintext) = self.backend.decrypt(payload, passphrase) {
                return Ok(plaintext);
            }
        }
        Err(OpError::DecryptionFailed)
    }

    /// Record a failure: append the record and, for the first failure since
    /// the last clear, run the timing-masking delay.
    fn fail<T>(&mut self, err: OpError) -> Option<T> {
        debug!(error = %err, "operation failed");
        let first = self.errors.is_empty();
        self.errors.push(err.to_string());
        if first {
            self.delay();
        }
        None
    }

    /// Most recent error record, if any.
    pub fn error(&self) -> Option<&str> {
        self.errors.last().map(String::as_str)
    }

    /// All error records since the last clear, oldest first.
    pub fn error_list(&self) -> &[String] {
        &self.errors
    }

    /// Clear the error list, returning the instance to the clean state.
    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    /// Run the randomized timing-masking delay. Exposed so callers can mask
    /// their own validation failures the same way.
    pub fn delay(&self) {
        delay::random_delay(self.config.delay_min_nanos, self.config.delay_max_nanos);
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn backend(&self) -> BackendKind {
        self.backend
    }

    pub fn use_case(&self) -> UseCase {
        self.use_case
    }
}
