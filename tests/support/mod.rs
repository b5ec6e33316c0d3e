#![allow(dead_code)] // not every suite uses every helper

use envseal::{BackendKind, Config, Cryptor, Secret};

/// Deterministic 88-byte secret for cross-instance scenarios.
pub fn secret_of(seed: char) -> Secret {
    Secret::new(seed.to_string().repeat(88)).unwrap()
}

/// Default config with the failure delay shrunk so adversarial tests stay
/// fast.
pub fn fast_config() -> Config {
    Config {
        delay_min_nanos: 1_000,
        delay_max_nanos: 100_000,
        ..Config::default()
    }
}

pub fn round_trip_cryptor(backend: BackendKind, seed: char) -> Cryptor {
    Cryptor::round_trip_with(fast_config(), backend, secret_of(seed), None).unwrap()
}
