// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Remote gas estimation against a Chainweb node
//!
//! [`ChainwebNode`] sends one `local` (simulate) request per estimation to the
//! chain named in the transaction's `meta.chainId`, with the derived
//! [`Policy`] encoded as `preflight` / `signatureVerification` query flags, and
//! reads the `gas` figure from the response.
//!
//! Every failure, whether transport, HTTP status, malformed body or missing
//! gas, is reported as a [`GasEstimationError`] with the originating
//! [`NodeError`] attached as its cause. Nothing is retried.

use serde_json::Value;
use tower::{Service, ServiceExt};
use tracing::{warn, Instrument};

use crate::classify::Policy;
use crate::command::CanonicalTransaction;
use crate::config::EstimatorConfig;
use crate::errors::{GasEstimationError, NodeError};
use crate::tracing::spans;
use crate::transport::LocalRequest;
use crate::types::{ChainId, GasAmount, NetworkId};

/// Client for the Pact `local` endpoint of a Chainweb node
///
/// Generic over the transport so any `tower` service stack can be used.
#[derive(Debug, Clone)]
pub struct ChainwebNode<S> {
    config: EstimatorConfig,
    service: S,
}

impl<S> ChainwebNode<S>
where
    S: Service<LocalRequest, Response = Value, Error = NodeError> + Clone + Send,
    S::Future: Send,
{
    pub fn new(config: EstimatorConfig, service: S) -> Self {
        Self { config, service }
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Simulate `transaction` and return the gas it consumes.
    ///
    /// `network_id` falls back to the configured default when `None`.
    pub async fn local_gas(
        &self,
        transaction: &CanonicalTransaction,
        policy: Policy,
        network_id: Option<&NetworkId>,
    ) -> Result<GasAmount, GasEstimationError> {
        self.try_local_gas(transaction, policy, network_id)
            .await
            .map_err(GasEstimationError::from_node)
    }

    async fn try_local_gas(
        &self,
        transaction: &CanonicalTransaction,
        policy: Policy,
        network_id: Option<&NetworkId>,
    ) -> Result<GasAmount, NodeError> {
        let chain_id = resolve_chain_id(&transaction.cmd)?;
        let network_id = self.config.resolve_network_id(network_id);
        let url = self.config.local_endpoint(
            network_id,
            &chain_id,
            policy.preflight,
            policy.signature_verification,
        )?;

        let span = spans::local_call(
            network_id,
            &chain_id,
            policy.preflight,
            policy.signature_verification,
        );

        let response = self
            .service
            .clone()
            .oneshot(LocalRequest::new(url, transaction.clone()))
            .instrument(span)
            .await?;

        extract_gas(&response)
    }
}

/// Read the target chain from the `meta.chainId` of a serialized command.
pub fn resolve_chain_id(cmd: &str) -> Result<ChainId, NodeError> {
    let command: Value = serde_json::from_str(cmd)
        .map_err(|e| NodeError::invalid_command(format!("cmd is not a JSON command: {e}")))?;

    match command.pointer("/meta/chainId") {
        Some(Value::String(id)) => Ok(ChainId::new(id.as_str())),
        Some(Value::Number(n)) if n.is_u64() => Ok(ChainId::new(n.to_string())),
        Some(_) => Err(NodeError::invalid_command("meta.chainId is not a chain id")),
        None => Err(NodeError::invalid_command("cmd has no meta.chainId")),
    }
}

/// Extract the gas figure from a `local` response.
///
/// Preflight responses wrap the command result in `preflightResult`; plain
/// responses are the command result itself.
pub fn extract_gas(response: &Value) -> Result<GasAmount, NodeError> {
    let result = response.get("preflightResult").unwrap_or(response);

    if let Some(warnings) = response
        .get("preflightWarnings")
        .and_then(Value::as_array)
        .filter(|warnings| !warnings.is_empty())
    {
        warn!(warnings = ?warnings, "Node reported preflight warnings");
    }
    if result.pointer("/result/status").and_then(Value::as_str) == Some("failure") {
        warn!(
            error = ?result.pointer("/result/error"),
            "Transaction failed during simulation; reporting gas consumed"
        );
    }

    result
        .get("gas")
        .and_then(Value::as_u64)
        .map(GasAmount::new)
        .ok_or(NodeError::MissingGas)
}
