// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end estimation tests against a mock node transport

mod helpers;

use std::error::Error as _;

use helpers::{command_json, estimator_with, MockNode, Reply};
use pact_gas::{
    hash_command, CanonicalTransaction, ClassificationError, EncodingError, EstimationError,
    GasAmount, InputType, NodeError,
};
use serde_json::{json, Value};

fn gas_error(err: EstimationError) -> pact_gas::GasEstimationError {
    match err {
        EstimationError::GasEstimation(err) => err,
        other => panic!("expected GasEstimationError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_code_input_is_estimated_without_preflight() {
    let node = MockNode::gas(42);
    let estimator = estimator_with(node.clone());

    let result = estimator
        .estimate(r#"{"code":"(+ 1 1)","chainId":"0"}"#)
        .await
        .unwrap();

    assert_eq!(result.amount, GasAmount::new(42));
    assert_eq!(result.input_type, InputType::Code);
    assert!(!result.used_preflight);
    assert!(!result.used_signature_verification);

    let request = node.last_request();
    assert_eq!(
        request.url.path(),
        "/chainweb/0.0/development/chain/0/pact/api/v1/local"
    );
    assert_eq!(request.flag("preflight"), Some(false));
    assert_eq!(request.flag("signatureVerification"), Some(false));

    let cmd: Value = serde_json::from_str(&request.transaction.cmd).unwrap();
    assert_eq!(
        cmd["payload"],
        json!({ "exec": { "code": "(+ 1 1)", "data": {} } })
    );

    let reported: CanonicalTransaction = serde_json::from_str(&result.transaction).unwrap();
    assert_eq!(reported, request.transaction);
    assert_eq!(reported.hash, hash_command(&reported.cmd));
}

#[tokio::test]
async fn test_full_transaction_is_verified_and_preflighted() {
    let node = MockNode::preflight_gas(77);
    let estimator = estimator_with(node.clone());
    let cmd = command_json("(coin.details \"k:abc\")", "3");
    let raw = json!({
        "cmd": cmd,
        "hash": "H1",
        "sigs": ["S1"],
        "networkId": "testnet04",
    })
    .to_string();

    let result = estimator.estimate(&raw).await.unwrap();

    assert_eq!(result.amount, GasAmount::new(77));
    assert_eq!(result.input_type, InputType::FullTransaction);
    assert!(result.used_preflight);
    assert!(result.used_signature_verification);

    let request = node.last_request();
    assert_eq!(
        request.url.path(),
        "/chainweb/0.0/testnet04/chain/3/pact/api/v1/local"
    );
    assert_eq!(request.flag("preflight"), Some(true));
    assert_eq!(request.flag("signatureVerification"), Some(true));
    assert_eq!(request.transaction.cmd, cmd);
    assert_eq!(request.transaction.hash, "H1");
    assert_eq!(request.transaction.signatures.len(), 1);
    assert_eq!(request.transaction.signatures[0].sig, "S1");
}

#[tokio::test]
async fn test_parsed_command_uses_computed_hash() {
    let node = MockNode::preflight_gas(10);
    let estimator = estimator_with(node.clone());
    let cmd = command_json("(+ 1 1)", "1");

    let result = estimator
        .estimate(&json!({ "cmd": cmd }).to_string())
        .await
        .unwrap();

    assert_eq!(result.input_type, InputType::ParsedCommand);
    assert!(result.used_preflight);
    assert!(!result.used_signature_verification);
    assert_eq!(node.last_request().transaction.hash, hash_command(&cmd));
}

#[tokio::test]
async fn test_full_command_preflight_depends_on_network_id() {
    let raw_without = json!({
        "payload": { "exec": { "code": "(+ 1 1)", "data": {} } },
        "meta": { "chainId": "2" },
        "signers": [],
    })
    .to_string();
    let raw_with = json!({
        "payload": { "exec": { "code": "(+ 1 1)", "data": {} } },
        "meta": { "chainId": "2" },
        "signers": [],
        "networkId": "mainnet01",
    })
    .to_string();

    let node = MockNode::gas(5);
    let without = estimator_with(node.clone())
        .estimate(&raw_without)
        .await
        .unwrap();
    assert_eq!(without.input_type, InputType::FullCommand);
    assert!(!without.used_preflight);
    assert_eq!(node.last_request().flag("preflight"), Some(false));
    assert!(node
        .last_request()
        .url
        .path()
        .starts_with("/chainweb/0.0/development/"));

    let node = MockNode::preflight_gas(5);
    let with = estimator_with(node.clone())
        .estimate(&raw_with)
        .await
        .unwrap();
    assert!(with.used_preflight);
    assert!(node
        .last_request()
        .url
        .path()
        .starts_with("/chainweb/0.0/mainnet01/"));
}

#[tokio::test]
async fn test_partial_command_targets_synthesized_chain() {
    let node = MockNode::gas(8);
    let estimator = estimator_with(node.clone());

    let result = estimator
        .estimate(r#"{"payload":{"exec":{"code":"(+ 1 1)","data":{}}},"signers":[],"chainId":"9"}"#)
        .await
        .unwrap();

    assert_eq!(result.input_type, InputType::PartialCommand);
    assert!(node.last_request().url.path().contains("/chain/9/"));
}

#[tokio::test]
async fn test_http_failure_is_wrapped() {
    let node = MockNode::new(Reply::Status(400, "Validation failed".to_string()));
    let estimator = estimator_with(node);

    let err = gas_error(
        estimator
            .estimate(r#"{"code":"(+ 1 1)","chainId":"0"}"#)
            .await
            .unwrap_err(),
    );

    assert!(err.message().starts_with("Chainweb Node was unable"));
    assert!(matches!(
        err.cause(),
        Some(NodeError::Status { status: 400, .. })
    ));
    assert!(err.source().is_some());
}

#[tokio::test]
async fn test_missing_gas_is_wrapped() {
    let node = MockNode::new(Reply::Json(json!({ "result": { "status": "success" } })));
    let estimator = estimator_with(node);

    let err = gas_error(
        estimator
            .estimate(r#"{"code":"(+ 1 1)","chainId":"0"}"#)
            .await
            .unwrap_err(),
    );

    assert!(matches!(err.cause(), Some(NodeError::MissingGas)));
}

#[tokio::test]
async fn test_unreachable_node_is_wrapped() {
    let estimator = estimator_with(MockNode::new(Reply::Unreachable));

    let err = gas_error(
        estimator
            .estimate(r#"{"code":"(+ 1 1)","chainId":"0"}"#)
            .await
            .unwrap_err(),
    );

    assert!(matches!(err.cause(), Some(NodeError::Transport { .. })));
    assert!(!err.to_string().contains("connection refused"));
}

#[tokio::test]
async fn test_unresolvable_chain_never_reaches_node() {
    let node = MockNode::gas(1);
    let estimator = estimator_with(node.clone());

    let err = gas_error(
        estimator
            .estimate(r#"{"cmd":"(+ 1 1)","hash":"H1","sigs":["S1"]}"#)
            .await
            .unwrap_err(),
    );

    assert!(matches!(err.cause(), Some(NodeError::InvalidCommand { .. })));
    assert!(node.requests().is_empty());
}

#[tokio::test]
async fn test_local_failures_never_reach_node() {
    let node = MockNode::gas(1);
    let estimator = estimator_with(node.clone());

    let err = estimator.estimate("{not valid").await.unwrap_err();
    assert!(matches!(
        err,
        EstimationError::Encoding(EncodingError::InvalidJson { .. })
    ));

    let err = estimator.estimate(r#"{"hash":"H1"}"#).await.unwrap_err();
    assert!(matches!(
        err,
        EstimationError::Classification(ClassificationError::UnknownInputType)
    ));

    assert!(node.requests().is_empty());
}

#[tokio::test]
async fn test_estimate_all_keeps_order_and_isolates_failures() {
    let node = MockNode::gas(3);
    let estimator = estimator_with(node.clone());

    let results = estimator
        .estimate_all(&[
            r#"{"code":"(+ 1 1)","chainId":"0"}"#,
            "{not valid",
            r#"{"payload":{"exec":{"code":"1","data":{}}},"chainId":"4"}"#,
        ])
        .await;

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().input_type, InputType::Code);
    assert!(matches!(results[1], Err(EstimationError::Encoding(_))));
    assert_eq!(results[2].as_ref().unwrap().input_type, InputType::Payload);
    assert_eq!(node.requests().len(), 2);
}

#[tokio::test]
async fn test_ids_cannot_escape_the_local_endpoint() {
    let node = MockNode::gas(2);
    let estimator = estimator_with(node.clone());

    estimator
        .estimate(r#"{"code":"(+ 1 1)","chainId":"0/../../admin"}"#)
        .await
        .unwrap();
    let segments: Vec<String> = node
        .last_request()
        .url
        .path_segments()
        .unwrap()
        .map(str::to_string)
        .collect();
    assert_eq!(
        segments,
        [
            "chainweb",
            "0.0",
            "development",
            "chain",
            "0%2F..%2F..%2Fadmin",
            "pact",
            "api",
            "v1",
            "local"
        ]
    );

    estimator
        .estimate(r#"{"code":"(+ 1 1)","chainId":"0","networkId":"x/../../../spv"}"#)
        .await
        .unwrap();
    assert_eq!(
        node.last_request().url.path(),
        "/chainweb/0.0/x%2F..%2F..%2F..%2Fspv/chain/0/pact/api/v1/local"
    );
}

#[tokio::test]
async fn test_dot_segment_chain_never_reaches_node() {
    let node = MockNode::gas(2);
    let estimator = estimator_with(node.clone());

    let err = gas_error(
        estimator
            .estimate(r#"{"code":"(+ 1 1)","chainId":".."}"#)
            .await
            .unwrap_err(),
    );

    assert!(matches!(
        err.cause(),
        Some(NodeError::InvalidSegment {
            field: "chainId",
            ..
        })
    ));
    assert!(node.requests().is_empty());
}
