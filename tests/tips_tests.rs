use std::collections::BTreeMap;

use base64::Engine;
use chrono::{TimeZone, Utc};

use afl_tipping_fixtures::tips::{decrypt, encrypt, TipError, TipPayload};

fn payload() -> TipPayload {
    let mut tips = BTreeMap::new();
    tips.insert(101, "Richmond".to_string());
    tips.insert(102, "Hawthorn".to_string());
    TipPayload {
        user_name: "jo".to_string(),
        round: 1,
        year: 2025,
        created_at: Utc.with_ymd_and_hms(2025, 3, 12, 9, 0, 0).unwrap(),
        tips,
        margin: Some(18),
    }
}

#[test]
fn decrypts_what_it_encrypted() {
    let sealed = encrypt(&payload(), "correct horse").expect("encrypt");
    assert!(sealed.starts_with("tips:v1:"));
    assert_eq!(decrypt(&sealed, "correct horse").expect("decrypt"), payload());
}

#[test]
fn wrong_password_is_rejected() {
    let sealed = encrypt(&payload(), "correct horse").expect("encrypt");
    assert!(matches!(decrypt(&sealed, "battery staple"), Err(TipError::Decryption)));
}

#[test]
fn same_payload_encrypts_differently_each_time() {
    let a = encrypt(&payload(), "pw").expect("encrypt");
    let b = encrypt(&payload(), "pw").expect("encrypt");
    assert_ne!(a, b);
}

#[test]
fn tampered_ciphertext_fails() {
    let sealed = encrypt(&payload(), "pw").expect("encrypt");
    let engine = base64::engine::general_purpose::STANDARD;
    let mut blob = engine.decode(sealed.trim_start_matches("tips:v1:")).expect("base64");
    let last = blob.len() - 1;
    blob[last] ^= 0x01;
    let tampered = format!("tips:v1:{}", engine.encode(blob));
    assert!(matches!(decrypt(&tampered, "pw"), Err(TipError::Decryption)));
}

#[test]
fn malformed_input_is_invalid_ciphertext() {
    for bad in ["tips:v2:AAAA", "tips:v1:***", "tips:v1:AAAA"] {
        assert!(
            matches!(decrypt(bad, "pw"), Err(TipError::InvalidCiphertext { .. })),
            "input {:?}",
            bad
        );
    }
}

#[test]
fn payload_json_shape() {
    let mut p = payload();
    p.margin = None;
    let value = serde_json::to_value(&p).expect("json");
    assert_eq!(value["user_name"], "jo");
    assert_eq!(value["tips"]["101"], "Richmond");
    assert!(value.get("margin").is_none());

    let back: TipPayload = serde_json::from_value(value).expect("parse back");
    assert_eq!(back, p);
}

#[test]
fn empty_inputs_are_rejected_before_encrypting() {
    let mut nameless = payload();
    nameless.user_name = "  ".to_string();
    assert!(matches!(encrypt(&nameless, "pw"), Err(TipError::Invalid { .. })));

    assert!(matches!(encrypt(&payload(), ""), Err(TipError::Invalid { .. })));

    let mut no_tips = payload();
    no_tips.tips.clear();
    assert!(matches!(encrypt(&no_tips, "pw"), Err(TipError::Invalid { .. })));
}

#[test]
fn empty_inputs_are_rejected_before_decrypting() {
    let sealed = encrypt(&payload(), "pw").expect("encrypt");
    assert!(matches!(decrypt("", "pw"), Err(TipError::Invalid { .. })));
    assert!(matches!(decrypt("   ", "pw"), Err(TipError::Invalid { .. })));
    assert!(matches!(decrypt(&sealed, ""), Err(TipError::Invalid { .. })));
}
