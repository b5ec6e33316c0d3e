//! Wire-format constants shared across the crate.

/// Envelope version tag length in ASCII characters.
pub const VERSION_TAG_LENGTH: usize = 4;

/// Version tag for the AES-256-GCM backend.
/// Payload layout: `[IV:12][ciphertext][tag:16]`.
pub const TAG_AES_GCM: &str = "AGM1";

/// Version tag for the XSalsa20-Poly1305 secret-box backend.
/// Payload layout: `[nonce:24][ciphertext + embedded tag]`.
pub const TAG_SECRET_BOX: &str = "SBX1";

/// Derived key length in bytes (256 bits). Both backends use 32-byte keys,
/// so a single digest size serves them both.
pub const KEY_LENGTH: usize = 32;

/// AES-GCM IV length in bytes (96 bits per NIST recommendation).
pub const AES_GCM_IV_LENGTH: usize = 12;

/// AES-GCM tag length in bytes (128 bits).
pub const AES_GCM_TAG_LENGTH: usize = 16;

/// XSalsa20 nonce length in bytes.
pub const SECRETBOX_NONCE_LENGTH: usize = 24;

/// Poly1305 tag length in bytes. The secret-box primitive embeds the tag in
/// its sealed ciphertext rather than detaching it.
pub const SECRETBOX_TAG_LENGTH: usize = 16;

/// Minimum operator secret length in bytes: 64 random bytes in padded
/// base64 come out at exactly this many characters.
pub const MIN_SECRET_LENGTH: usize = 88;

/// Default cap on encoded plaintext length (64 MiB). Functions as an
/// admission-control limit, checked before any cryptographic work.
pub const DEFAULT_MAX_DATA_LENGTH: usize = 1 << 26;

/// Default quantum for length reporting in diagnostics. Observed lengths
/// are rounded up to a multiple of this before they appear anywhere.
pub const DEFAULT_LENGTH_QUANTUM: usize = 4096;

/// Default lower bound for the failure delay, in nanoseconds (1 ms).
pub const DEFAULT_DELAY_MIN_NANOS: u64 = 1_000_000;

/// Default upper bound for the failure delay, in nanoseconds (10 ms).
pub const DEFAULT_DELAY_MAX_NANOS: u64 = 10_000_000;
