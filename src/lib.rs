//! Authenticated envelope encryption for structured values.
//!
//! [`Cryptor::encrypt`] turns a `serde_json::Value` into a self-describing
//! ciphertext string: a 4-character version tag followed by the base64 of a
//! backend-specific binary payload. [`Cryptor::decrypt`] reverses it.
//!
//! Per-call operations never panic and never return `Err`. A failure yields
//! `None`, appends an opaque record to the instance error list, and (for the
//! first failure since the last clear) runs a randomized delay so failure
//! causes cannot be told apart by response time.
//!
//! Two backends share one contract: AES-256-GCM (tag `AGM1`) and the
//! XSalsa20-Poly1305 secret-box (tag `SBX1`). Two deployment patterns:
//! round-trip (current secret plus at most one previous) and at-rest
//! (rotation list; the head encrypts, every entry may decrypt).

pub mod config;
mod delay;
mod encode;
mod envelope;
pub mod error;
mod gcm;
pub mod keys;
mod secretbox;
mod service;
pub mod types;

pub use config::{Config, DataEncoding, KeyHashAlgorithm};
pub use error::ConfigError;
pub use keys::{generate_secret, Secret};
pub use service::{BackendKind, Cryptor, UseCase};
