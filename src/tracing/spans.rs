// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Span creation helpers for estimation operations.
//!
//! Telemetry is kept out of the business logic: instead of `#[instrument]`
//! attributes, each instrumented operation has a span helper here.
//!
//! Usage pattern:
//! ```rust,ignore
//! pub async fn my_operation(&self, param: Type) -> Result<T> {
//!     let span = spans::my_operation(param_value);
//!     // enter for sync code, `.instrument(span)` for futures
//! }
//! ```

use ::tracing::{Level, Span};

use crate::classify::InputType;
use crate::types::{ChainId, NetworkId};

/// Create span for a complete estimation call.
///
/// Parent: None (root span for this operation)
/// Children: classify_input, local_call
#[inline]
pub(crate) fn estimate_gas_limit(input_len: usize) -> Span {
    ::tracing::span!(
        Level::INFO,
        "pact_gas.estimate_gas_limit",
        input_len = input_len,
        input_type = ::tracing::field::Empty,
        gas = ::tracing::field::Empty,
    )
}

/// Create span for classifying decoded input.
///
/// Parent: estimate_gas_limit span
#[inline]
pub(crate) fn classify_input(input_type: InputType) -> Span {
    ::tracing::debug_span!("pact_gas.classify_input", input_type = %input_type)
}

/// Create span for one `local` call against a Chainweb node.
///
/// Parent: estimate_gas_limit span
/// Children: node_request span from the transport logging layer
#[inline]
pub(crate) fn local_call(
    network_id: &NetworkId,
    chain_id: &ChainId,
    preflight: bool,
    signature_verification: bool,
) -> Span {
    ::tracing::debug_span!(
        "pact_gas.local_call",
        network_id = %network_id,
        chain_id = %chain_id,
        preflight = preflight,
        signature_verification = signature_verification,
    )
}

/// Create span for a batch of estimations.
///
/// Parent: None
/// Children: estimate_gas_limit spans (one per input)
#[inline]
pub(crate) fn estimate_gas_limits(batch_size: usize) -> Span {
    ::tracing::info_span!("pact_gas.estimate_gas_limits", batch_size = batch_size)
}
