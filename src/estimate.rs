// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Gas limit estimation pipeline
//!
//! [`GasLimitEstimator`] runs one raw input through
//! decode → classify → canonicalize → node `local` call → assemble, and returns
//! either a complete [`EstimationResult`] or exactly one [`EstimationError`].
//! Only the node call performs I/O; nothing is cached or shared between calls,
//! so one estimator can serve concurrent callers.
//!
//! # Example
//!
//! ```rust,no_run
//! use pact_gas::{EstimatorConfig, GasLimitEstimator};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let estimator = GasLimitEstimator::new(EstimatorConfig::from_env()?)?;
//! let result = estimator
//!     .estimate(r#"{"code":"(+ 1 1)","chainId":"0"}"#)
//!     .await?;
//! println!("{} gas ({})", result.amount, result.input_type);
//! # Ok(())
//! # }
//! ```

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower::{Layer, Service};
use tracing::{info, Instrument, Span};

use crate::classify::{classify, Classified, InputType, Policy};
use crate::command::Canonicalizer;
use crate::config::EstimatorConfig;
use crate::errors::{EstimationError, NodeError};
use crate::input::decode_input;
use crate::node::ChainwebNode;
use crate::tracing::spans;
use crate::transport::{HttpTransport, LocalRequest, LoggingLayer, LoggingService};
use crate::types::GasAmount;

/// Outcome of one successful estimation
///
/// Serializes as `{"amount", "inputType", "usedPreflight",
/// "usedSignatureVerification", "transaction"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationResult {
    /// Gas units the node reported
    pub amount: GasAmount,
    /// Shape the input was classified as
    pub input_type: InputType,
    pub used_preflight: bool,
    pub used_signature_verification: bool,
    /// The canonical transaction that was simulated, as JSON
    pub transaction: String,
}

impl EstimationResult {
    /// Combine the gas figure with what was sent to the node.
    pub fn assemble(
        amount: GasAmount,
        input_type: InputType,
        policy: Policy,
        transaction: String,
    ) -> Self {
        Self {
            amount,
            input_type,
            used_preflight: policy.preflight,
            used_signature_verification: policy.signature_verification,
            transaction,
        }
    }
}

/// Transport stack used by [`GasLimitEstimator::new`]
pub type DefaultTransport = LoggingService<HttpTransport>;

/// Estimates gas limits for transactions described in any accepted input shape
#[derive(Debug, Clone)]
pub struct GasLimitEstimator<S = DefaultTransport> {
    canonicalizer: Canonicalizer,
    node: ChainwebNode<S>,
}

impl GasLimitEstimator<DefaultTransport> {
    /// Create an estimator that calls the configured node over HTTP.
    pub fn new(config: EstimatorConfig) -> Result<Self, NodeError> {
        let transport = LoggingLayer::new().layer(HttpTransport::new(config.request_timeout)?);
        Ok(Self::with_transport(config, transport))
    }
}

impl<S> GasLimitEstimator<S>
where
    S: Service<LocalRequest, Response = Value, Error = NodeError> + Clone + Send,
    S::Future: Send,
{
    /// Create an estimator over a custom transport service.
    pub fn with_transport(config: EstimatorConfig, transport: S) -> Self {
        Self {
            canonicalizer: Canonicalizer::new(config.command.clone()),
            node: ChainwebNode::new(config, transport),
        }
    }

    pub fn config(&self) -> &EstimatorConfig {
        self.node.config()
    }

    /// Estimate the gas limit for one raw JSON input.
    pub async fn estimate(&self, raw: &str) -> Result<EstimationResult, EstimationError> {
        let span = spans::estimate_gas_limit(raw.len());
        self.run(raw).instrument(span).await
    }

    /// Estimate several inputs concurrently.
    ///
    /// Results are returned in input order; each entry succeeds or fails on its own.
    pub async fn estimate_all<I>(&self, raws: &[I]) -> Vec<Result<EstimationResult, EstimationError>>
    where
        I: AsRef<str>,
    {
        let span = spans::estimate_gas_limits(raws.len());
        join_all(raws.iter().map(|raw| self.estimate(raw.as_ref())))
            .instrument(span)
            .await
    }

    async fn run(&self, raw: &str) -> Result<EstimationResult, EstimationError> {
        let fields = decode_input(raw)?;
        let Classified { input, policy } = classify(fields)?;
        let input_type = input.input_type();
        Span::current().record("input_type", input_type.as_str());

        let transaction = self.canonicalizer.canonicalize(&input)?;
        let serialized = transaction.to_json()?;

        let amount = self
            .node
            .local_gas(&transaction, policy, input.network_id())
            .await?;
        Span::current().record("gas", amount.as_u64());

        info!(
            gas = %amount,
            input_type = %input_type,
            preflight = policy.preflight,
            signature_verification = policy.signature_verification,
            "Estimated gas limit"
        );

        Ok(EstimationResult::assemble(
            amount,
            input_type,
            policy,
            serialized,
        ))
    }
}
