use thiserror::Error;

/// Fatal configuration problems, surfaced once at construction.
///
/// This is the only error type the library ever returns as a hard `Err`.
/// Per-call failures go to the instance error list instead, so no stack
/// trace can ever carry key material. Variants describe the problem but
/// never include a secret value.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("secret too short: {got} bytes, minimum {min}")]
    SecretTooShort { got: usize, min: usize },

    #[error("at-rest secret list is empty")]
    EmptySecretList,

    #[error("invalid delay window: min {min_nanos}ns must be below max {max_nanos}ns")]
    InvalidDelayWindow { min_nanos: u64, max_nanos: u64 },

    #[error("max_data_length must be positive")]
    ZeroMaxDataLength,

    #[error("length_quantum must be positive")]
    ZeroLengthQuantum,
}

impl ConfigError {
    /// Stable problem code for operator-facing diagnostics.
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::SecretTooShort { .. } => "config/secret-too-short",
            ConfigError::EmptySecretList => "config/empty-secret-list",
            ConfigError::InvalidDelayWindow { .. } => "config/invalid-delay-window",
            ConfigError::ZeroMaxDataLength => "config/zero-max-data-length",
            ConfigError::ZeroLengthQuantum => "config/zero-length-quantum",
        }
    }
}

/// Per-call failure causes.
///
/// These never cross the public boundary as `Err`. Their display strings
/// populate the error list and the caller sees `None`. Display strings are
/// opaque by design: authentication failure and cipher-level errors share
/// one message, and no variant ever carries key material or plaintext.
#[derive(Debug, Error)]
pub(crate) enum OpError {
    #[error("encoded data too large: about {quantized} bytes exceeds limit {max}")]
    DataTooLarge { quantized: usize, max: usize },

    #[error("data encoding failed")]
    EncodeFailed,

    #[error("data decoding failed")]
    DecodeFailed,

    #[error("legacy data encoding is disabled")]
    LegacyDisabled,

    #[error("refusing to process boolean false (enable allow_false to permit it)")]
    FalseValueDisabled,

    #[error("envelope too short")]
    EnvelopeTooShort,

    #[error("unknown envelope version tag")]
    UnknownVersionTag,

    #[error("envelope payload is not valid base64")]
    InvalidBase64,

    #[error("binary payload too short")]
    PayloadTooShort,

    #[error("encryption failed")]
    EncryptionFailed,

    #[error("decryption failed")]
    DecryptionFailed,
}
