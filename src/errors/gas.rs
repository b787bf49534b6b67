// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error type for remote gas estimation.

use super::NodeError;

/// Message reported for every node-side failure, independent of transport details.
pub(crate) const NODE_UNABLE_TO_ESTIMATE: &str = "Chainweb Node was unable to estimate the gas limit for the transaction. Please check your input and try again.";

/// The node rejected the request, was unreachable, or returned no usable gas figure.
///
/// The display message is stable and human-readable. The originating
/// [`NodeError`] is kept as `cause` and exposed through
/// [`std::error::Error::source`] for diagnostics.
///
/// # Examples
///
/// ```rust
/// use pact_gas::{GasEstimationError, NodeError};
///
/// let err = GasEstimationError::from_node(NodeError::MissingGas);
/// assert!(err.cause().is_some());
/// assert!(err.to_string().starts_with("Chainweb Node was unable"));
/// ```
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct GasEstimationError {
    message: String,
    #[source]
    cause: Option<NodeError>,
}

impl GasEstimationError {
    /// Create an error with a custom message and an optional cause.
    pub fn new(message: impl Into<String>, cause: Option<NodeError>) -> Self {
        Self {
            message: message.into(),
            cause,
        }
    }

    /// Wrap a node failure with the standard message.
    pub fn from_node(cause: NodeError) -> Self {
        Self::new(NODE_UNABLE_TO_ESTIMATE, Some(cause))
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The underlying node failure, if any.
    pub fn cause(&self) -> Option<&NodeError> {
        self.cause.as_ref()
    }
}

impl From<NodeError> for GasEstimationError {
    fn from(cause: NodeError) -> Self {
        Self::from_node(cause)
    }
}
