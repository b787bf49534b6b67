// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for pact-gas integration tests
//!
//! Provides a mock node transport so the estimator can be exercised without a
//! running Chainweb node.

#![allow(dead_code)]

use std::future::{ready, Ready};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use pact_gas::transport::LocalRequest;
use pact_gas::{EstimatorConfig, GasLimitEstimator, NodeError};
use serde_json::{json, Value};

/// What the mock node answers with
#[derive(Debug, Clone)]
pub enum Reply {
    /// 2xx with this JSON body
    Json(Value),
    /// Non-success HTTP status with a text body
    Status(u16, String),
    /// Connection failure
    Unreachable,
}

/// Mock node transport that records every request it receives
///
/// # Example
///
/// ```rust,ignore
/// let node = MockNode::gas(42);
/// let estimator = estimator_with(node.clone());
/// estimator.estimate(raw).await?;
/// assert_eq!(node.requests().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockNode {
    reply: Reply,
    requests: Arc<Mutex<Vec<LocalRequest>>>,
}

impl MockNode {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Node that reports `gas` for every transaction (non-preflight shape)
    pub fn gas(gas: u64) -> Self {
        Self::new(Reply::Json(json!({
            "gas": gas,
            "result": { "status": "success", "data": 2 },
            "reqKey": "mock",
        })))
    }

    /// Node that reports `gas` wrapped in a preflight result
    pub fn preflight_gas(gas: u64) -> Self {
        Self::new(Reply::Json(json!({
            "preflightResult": {
                "gas": gas,
                "result": { "status": "success", "data": 2 },
            },
            "preflightWarnings": [],
        })))
    }

    pub fn requests(&self) -> Vec<LocalRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> LocalRequest {
        self.requests()
            .pop()
            .expect("mock node received no request")
    }
}

impl tower::Service<LocalRequest> for MockNode {
    type Response = Value;
    type Error = NodeError;
    type Future = Ready<Result<Value, NodeError>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: LocalRequest) -> Self::Future {
        let url = request.url.to_string();
        self.requests.lock().unwrap().push(request);

        ready(match &self.reply {
            Reply::Json(body) => Ok(body.clone()),
            Reply::Status(status, body) => Err(NodeError::status(*status, body.clone())),
            Reply::Unreachable => Err(NodeError::transport(
                url,
                std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused"),
            )),
        })
    }
}

pub fn estimator_with(node: MockNode) -> GasLimitEstimator<MockNode> {
    GasLimitEstimator::with_transport(EstimatorConfig::default(), node)
}

/// A serialized Pact command targeting `chain_id`
pub fn command_json(code: &str, chain_id: &str) -> String {
    json!({
        "payload": { "exec": { "code": code, "data": {} } },
        "meta": {
            "chainId": chain_id,
            "creationTime": 1_700_000_000,
            "gasLimit": 2500,
            "gasPrice": 1.0e-8,
            "sender": "",
            "ttl": 28_800,
        },
        "signers": [],
        "networkId": "development",
        "nonce": "test",
    })
    .to_string()
}
