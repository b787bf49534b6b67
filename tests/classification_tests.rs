// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Classification and canonicalization of the documented input shapes

use pact_gas::{
    classify, decode_input, detect_input_type, hash_command, Canonicalizer, ClassificationError,
    ClassifiedInput, EncodingError, InputType,
};
use serde_json::{json, Value};

fn classify_raw(raw: &str) -> pact_gas::Classified {
    classify(decode_input(raw).unwrap()).unwrap()
}

#[test]
fn test_each_minimal_shape_has_its_tag() {
    let cases = [
        (r#"{"cmd":"c","hash":"h","sigs":[]}"#, InputType::FullTransaction),
        (r#"{"cmd":"c"}"#, InputType::ParsedCommand),
        (r#"{"payload":{},"meta":{},"signers":[]}"#, InputType::FullCommand),
        (r#"{"payload":{},"meta":{}}"#, InputType::PartialCommand),
        (r#"{"payload":{},"chainId":"0"}"#, InputType::Payload),
        (r#"{"code":"c","chainId":"0"}"#, InputType::Code),
    ];

    for (raw, expected) in cases {
        assert_eq!(classify_raw(raw).input_type(), expected, "input: {raw}");
    }
}

#[test]
fn test_full_transaction_wins_over_looser_shapes() {
    let classified = classify_raw(
        r#"{"cmd":"(+ 1 1)","hash":"H1","sigs":["S1"],"payload":{},"chainId":"0","code":"x"}"#,
    );
    assert_eq!(classified.input_type(), InputType::FullTransaction);
}

#[test]
fn test_partial_command_wins_over_payload() {
    let set = decode_input(r#"{"payload":{},"signers":[],"chainId":"0"}"#).unwrap();
    assert_eq!(detect_input_type(&set), Some(InputType::PartialCommand));
}

#[test]
fn test_payload_wins_over_code() {
    let set = decode_input(r#"{"payload":{},"code":"c","chainId":"0"}"#).unwrap();
    assert_eq!(detect_input_type(&set), Some(InputType::Payload));
}

#[test]
fn test_signed_transaction_scenario() {
    let classified = classify_raw(r#"{"cmd":"(+ 1 1)","hash":"H1","sigs":["S1"]}"#);

    assert_eq!(classified.input_type(), InputType::FullTransaction);
    assert!(classified.policy.signature_verification);
    assert!(classified.policy.preflight);

    let tx = Canonicalizer::default()
        .canonicalize(&classified.input)
        .unwrap();
    assert_eq!(tx.cmd, "(+ 1 1)");
    assert_eq!(tx.hash, "H1");
}

#[test]
fn test_parsed_command_scenario() {
    let first = classify_raw(r#"{"cmd":"(+ 1 1)"}"#);
    let second = classify_raw(r#"{"cmd":"(+ 1 1)"}"#);

    assert_eq!(first.input_type(), InputType::ParsedCommand);
    assert!(!first.policy.signature_verification);
    assert_eq!(first, second);
    match first.input {
        ClassifiedInput::ParsedCommand { hash, .. } => assert_eq!(hash, hash_command("(+ 1 1)")),
        other => panic!("expected ParsedCommand, got {other:?}"),
    }
}

#[test]
fn test_payload_scenario() {
    let classified =
        classify_raw(r#"{"payload":{"exec":{"code":"(+ 1 1)","data":{}}},"chainId":"0"}"#);

    assert_eq!(classified.input_type(), InputType::Payload);
    assert!(!classified.policy.preflight);
}

#[test]
fn test_code_scenario() {
    let classified = classify_raw(r#"{"code":"(+ 1 1)","chainId":"0"}"#);
    assert_eq!(classified.input_type(), InputType::Code);
    assert!(!classified.policy.preflight);

    let tx = Canonicalizer::default()
        .canonicalize(&classified.input)
        .unwrap();
    let cmd: Value = serde_json::from_str(&tx.cmd).unwrap();
    assert_eq!(
        cmd["payload"],
        json!({ "exec": { "code": "(+ 1 1)", "data": {} } })
    );
    assert!(!tx.hash.is_empty());
}

#[test]
fn test_malformed_input_scenario() {
    assert!(matches!(
        decode_input("{not valid"),
        Err(EncodingError::InvalidJson { .. })
    ));
}

#[test]
fn test_hash_only_is_unknown() {
    let err = classify(decode_input(r#"{"hash":"H1"}"#).unwrap()).unwrap_err();
    assert!(matches!(err, ClassificationError::UnknownInputType));
    assert!(err.to_string().contains("README"));
}

#[test]
fn test_unrecognized_fields_are_ignored() {
    let classified = classify_raw(r#"{"code":"(+ 1 1)","chainId":"0","comment":"hello"}"#);
    assert_eq!(classified.input_type(), InputType::Code);
}
