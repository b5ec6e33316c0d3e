//! Per-instance configuration.
//!
//! A `Config` is created once, validated at service construction, and never
//! mutated afterwards. Invalid values are the fatal-constructor case; no
//! configuration problem is ever reported per call.

use crate::error::ConfigError;
use crate::types::{
    DEFAULT_DELAY_MAX_NANOS, DEFAULT_DELAY_MIN_NANOS, DEFAULT_LENGTH_QUANTUM,
    DEFAULT_MAX_DATA_LENGTH,
};

/// Data encoding used for the plaintext value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataEncoding {
    /// Strict JSON (default). Decoding it cannot execute code, which is why
    /// it is the default for untrusted input.
    Json,
    /// CBOR, kept for compatibility with previously stored data. Requires
    /// the explicit `legacy_enabled` opt-in; while disabled, any attempt to
    /// use it fails outright rather than falling back to JSON.
    Legacy,
}

/// Hash used to derive a 32-byte passphrase from an operator secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyHashAlgorithm {
    /// SHA-512/256: the 256-bit truncated SHA-512 variant (default).
    Sha512_256,
    /// Plain SHA-256.
    Sha256,
}

/// Immutable service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Encoding for structured values.
    pub encoding: DataEncoding,
    /// Gate for the legacy CBOR encoding.
    pub legacy_enabled: bool,
    /// Whether `Value::Bool(false)` may be encrypted. Off by default because
    /// it is this library's historical failure sentinel.
    pub allow_false: bool,
    /// Maximum encoded plaintext length in bytes.
    pub max_data_length: usize,
    /// Quantum for length values in diagnostics. Lengths are rounded up to
    /// a multiple of this before being reported anywhere.
    pub length_quantum: usize,
    /// Passphrase derivation hash.
    pub key_hash: KeyHashAlgorithm,
    /// Lower bound of the failure delay in nanoseconds.
    pub delay_min_nanos: u64,
    /// Upper bound of the failure delay in nanoseconds.
    pub delay_max_nanos: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            encoding: DataEncoding::Json,
            legacy_enabled: false,
            allow_false: false,
            max_data_length: DEFAULT_MAX_DATA_LENGTH,
            length_quantum: DEFAULT_LENGTH_QUANTUM,
            key_hash: KeyHashAlgorithm::Sha512_256,
            delay_min_nanos: DEFAULT_DELAY_MIN_NANOS,
            delay_max_nanos: DEFAULT_DELAY_MAX_NANOS,
        }
    }
}

impl Config {
    /// Check the configuration once, at service construction.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.max_data_length == 0 {
            return Err(ConfigError::ZeroMaxDataLength);
        }
        if self.length_quantum == 0 {
            return Err(ConfigError::ZeroLengthQuantum);
        }
        if self.delay_min_nanos >= self.delay_max_nanos {
            return Err(ConfigError::InvalidDelayWindow {
                min_nanos: self.delay_min_nanos,
                max_nanos: self.delay_max_nanos,
            });
        }
        Ok(())
    }
}
