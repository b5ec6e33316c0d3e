mod support;

use envseal::BackendKind;
use serde_json::json;
use support::round_trip_cryptor;

#[test]
fn any_single_bit_flip_in_the_payload_fails() {
    for backend in [BackendKind::AesGcm, BackendKind::SecretBox] {
        let mut service = round_trip_cryptor(backend, 'a');
        let envelope = service.encrypt(&json!({"k": "v"})).unwrap();
        let (tag, body) = envelope.split_at(4);
        let payload = {
            use base64::Engine as _;
            base64::engine::general_purpose::STANDARD.decode(body).unwrap()
        };

        for byte in 0..payload.len() {
            for bit in 0..8 {
                let mut tampered = payload.clone();
                tampered[byte] ^= 1 << bit;
                let tampered_envelope = {
                    use base64::Engine as _;
                    format!(
                        "{tag}{}",
                        base64::engine::general_purpose::STANDARD.encode(&tampered)
                    )
                };
                service.clear_errors();
                assert!(
                    service.decrypt(&tampered_envelope).is_none(),
                    "bit {bit} of byte {byte} survived tampering ({backend:?})"
                );
                assert_eq!(service.error_list().len(), 1);
            }
        }
    }
}

#[test]
fn unregistered_version_tag_fails() {
    let mut service = round_trip_cryptor(BackendKind::AesGcm, 'a');
    let envelope = service.encrypt(&json!("x")).unwrap();
    let swapped = format!("ZZZ9{}", &envelope[4..]);
    assert!(service.decrypt(&swapped).is_none());
    assert_eq!(service.error(), Some("unknown envelope version tag"));
}

#[test]
fn malformed_inputs_yield_sentinel_plus_error_record() {
    let mut service = round_trip_cryptor(BackendKind::AesGcm, 'a');
    let cases: &[&str] = &[
        "",
        "A",
        "AGM1",
        "AGM1 ",
        "AGM1!!!!",
        "AGM1====",
        "AGM1AA",
        "AGM1AAAAAAAA",
        "\u{00e9}\u{00e9}AAAA",
        "AGM1\u{00e9}AAA",
        "SBX1AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA",
    ];
    for case in cases {
        service.clear_errors();
        assert!(service.decrypt(case).is_none(), "accepted {case:?}");
        assert!(
            !service.error_list().is_empty(),
            "no error recorded for {case:?}"
        );
    }
}

#[test]
fn truncated_binary_payload_fails() {
    let mut service = round_trip_cryptor(BackendKind::AesGcm, 'a');
    // Valid base64 of a payload shorter than IV + 1 + tag.
    let short = {
        use base64::Engine as _;
        format!(
            "AGM1{}",
            base64::engine::general_purpose::STANDARD.encode([0u8; 20])
        )
    };
    assert!(service.decrypt(&short).is_none());
    assert_eq!(service.error(), Some("binary payload too short"));
}

#[test]
fn valid_looking_payload_under_the_wrong_key_never_decodes() {
    let mut a = round_trip_cryptor(BackendKind::AesGcm, 'a');
    let mut b = round_trip_cryptor(BackendKind::AesGcm, 'b');
    for i in 0..32 {
        let envelope = a.encrypt(&json!({"i": i})).unwrap();
        assert!(b.decrypt(&envelope).is_none());
        b.clear_errors();
    }
}

#[test]
fn delay_runs_once_per_errored_state() {
    use std::time::Instant;

    let mut service = round_trip_cryptor(BackendKind::AesGcm, 'a');
    service.decrypt("first failure sleeps");

    // Subsequent failures only append records; within one errored state
    // they skip the delay and so stay fast.
    let start = Instant::now();
    for _ in 0..50 {
        service.decrypt("already errored");
    }
    assert!(start.elapsed().as_millis() < 50);
    assert_eq!(service.error_list().len(), 51);
}
