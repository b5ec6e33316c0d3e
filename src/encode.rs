//! Structured-value encoding with admission control.
//!
//! Default encoding is strict JSON, selected because decoding it cannot
//! execute code. The legacy CBOR encoding survives for previously stored
//! data and sits behind an explicit opt-in; while disabled, any attempt to
//! use it fails outright instead of falling back. Oversized values are
//! rejected before any cryptographic work, and diagnostics only ever see
//! lengths rounded up to the configured quantum.

use serde_json::Value;
use tracing::debug;

use crate::config::{Config, DataEncoding};
use crate::error::OpError;

/// Round a length up to the nearest multiple of `quantum`.
///
/// Diagnostics-only: this keeps exact plaintext sizes out of logs and error
/// records. It never affects ciphertext lengths.
pub(crate) fn quantize_length(len: usize, quantum: usize) -> usize {
    len.div_ceil(quantum).saturating_mul(quantum)
}

pub(crate) fn encode_value(value: &Value, config: &Config) -> Result<Vec<u8>, OpError> {
    if !config.allow_false && *value == Value::Bool(false) {
        return Err(OpError::FalseValueDisabled);
    }

    let encoded = match config.encoding {
        DataEncoding::Json => serde_json::to_vec(value).map_err(|_| OpError::EncodeFailed)?,
        DataEncoding::Legacy => {
            if !config.legacy_enabled {
                return Err(OpError::LegacyDisabled);
            }
            let mut buf = Vec::new();
            ciborium::into_writer(value, &mut buf).map_err(|_| OpError::EncodeFailed)?;
            buf
        }
    };

    if encoded.len() > config.max_data_length {
        let quantized = quantize_length(encoded.len(), config.length_quantum);
        debug!(
            quantized_length = quantized,
            max = config.max_data_length,
            "encoded value over size limit"
        );
        return Err(OpError::DataTooLarge {
            quantized,
            max: config.max_data_length,
        });
    }

    Ok(encoded)
}

pub(crate) fn decode_value(bytes: &[u8], config: &Config) -> Result<Value, OpError> {
    match config.encoding {
        DataEncoding::Json => serde_json::from_slice(bytes).map_err(|_| OpError::DecodeFailed),
        DataEncoding::Legacy => {
            if !config.legacy_enabled {
                return Err(OpError::LegacyDisabled);
            }
            ciborium::from_reader(bytes).map_err(|_| OpError::DecodeFailed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn legacy_config() -> Config {
        Config {
            encoding: DataEncoding::Legacy,
            legacy_enabled: true,
            ..Config::default()
        }
    }

    #[test]
    fn json_round_trip() {
        let config = Config::default();
        let value = json!({"name": "test", "count": 3, "nested": [1, 2, null]});
        let encoded = encode_value(&value, &config).unwrap();
        let decoded = decode_value(&encoded, &config).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn legacy_round_trip_when_enabled() {
        let config = legacy_config();
        let value = json!({"id": 17, "tags": ["a", "b"]});
        let encoded = encode_value(&value, &config).unwrap();
        let decoded = decode_value(&encoded, &config).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn legacy_disabled_fails_encode_and_decode() {
        let config = Config {
            encoding: DataEncoding::Legacy,
            ..Config::default()
        };
        assert!(matches!(
            encode_value(&json!("data"), &config),
            Err(OpError::LegacyDisabled)
        ));
        assert!(matches!(
            decode_value(b"\x63abc", &config),
            Err(OpError::LegacyDisabled)
        ));
    }

    #[test]
    fn legacy_never_silently_falls_back_to_json() {
        // JSON bytes are not a valid top-level CBOR item here; the legacy
        // decoder must fail rather than reinterpret them.
        let config = legacy_config();
        let json_bytes = serde_json::to_vec(&json!({"k": "v"})).unwrap();
        assert!(decode_value(&json_bytes, &config).is_err());
    }

    #[test]
    fn false_rejected_by_default() {
        let config = Config::default();
        assert!(matches!(
            encode_value(&json!(false), &config),
            Err(OpError::FalseValueDisabled)
        ));
    }

    #[test]
    fn false_allowed_with_opt_in() {
        let config = Config {
            allow_false: true,
            ..Config::default()
        };
        let encoded = encode_value(&json!(false), &config).unwrap();
        assert_eq!(decode_value(&encoded, &config).unwrap(), json!(false));
    }

    #[test]
    fn true_is_never_gated() {
        let config = Config::default();
        assert!(encode_value(&json!(true), &config).is_ok());
    }

    #[test]
    fn oversized_value_rejected_with_quantized_length() {
        let config = Config {
            max_data_length: 64,
            length_quantum: 16,
            ..Config::default()
        };
        let value = json!("a".repeat(100));
        match encode_value(&value, &config).unwrap_err() {
            OpError::DataTooLarge { quantized, max } => {
                assert_eq!(max, 64);
                assert_eq!(quantized % 16, 0);
                assert!(quantized >= 100);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn value_at_limit_is_accepted() {
        let config = Config {
            max_data_length: 6,
            ..Config::default()
        };
        // "abcd" encodes to 6 bytes including quotes.
        assert!(encode_value(&json!("abcd"), &config).is_ok());
    }

    #[test]
    fn rejects_malformed_json_bytes() {
        let config = Config::default();
        assert!(matches!(
            decode_value(b"{not json", &config),
            Err(OpError::DecodeFailed)
        ));
    }

    #[test]
    fn rejects_truncated_cbor() {
        let config = legacy_config();
        let mut encoded = encode_value(&json!({"k": "a longer value"}), &config).unwrap();
        encoded.truncate(encoded.len() / 2);
        assert!(decode_value(&encoded, &config).is_err());
    }

    #[test]
    fn quantize_rounds_up() {
        assert_eq!(quantize_length(1, 4096), 4096);
        assert_eq!(quantize_length(4096, 4096), 4096);
        assert_eq!(quantize_length(4097, 4096), 8192);
        assert_eq!(quantize_length(0, 4096), 0);
    }
}
