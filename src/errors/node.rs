// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Errors raised while talking to a Chainweb node.
//!
//! These are never returned to callers directly; the remote estimator wraps
//! them into [`GasEstimationError`](super::GasEstimationError).

/// Failure modes of a `local` call against a Chainweb node.
#[derive(Debug, thiserror::Error)]
pub enum NodeError {
    /// The HTTP request failed or the response body could not be read.
    #[error("Request to {url} failed")]
    Transport {
        /// Endpoint that was called
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The node answered with a non-success status.
    #[error("Node responded with HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, as text
        body: String,
    },

    /// The response body is not JSON.
    #[error("Node response from {url} is not valid JSON")]
    InvalidResponse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    /// The response has no integer `gas` field.
    #[error("Node response does not contain a gas figure")]
    MissingGas,

    /// The canonical command does not name a target chain.
    #[error("Cannot resolve target chain from command: {reason}")]
    InvalidCommand { reason: String },

    /// A network or chain id cannot be used as a URL path segment.
    #[error("Invalid {field} `{value}` for a node endpoint")]
    InvalidSegment { field: &'static str, value: String },

    /// The endpoint URL could not be built.
    #[error("Invalid node endpoint")]
    InvalidEndpoint(#[from] url::ParseError),
}

impl NodeError {
    pub fn transport(
        url: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        NodeError::Transport {
            url: url.into(),
            source: Box::new(source),
        }
    }

    pub fn status(status: u16, body: impl Into<String>) -> Self {
        NodeError::Status {
            status,
            body: body.into(),
        }
    }

    pub fn invalid_response(url: impl Into<String>, source: serde_json::Error) -> Self {
        NodeError::InvalidResponse {
            url: url.into(),
            source,
        }
    }

    pub fn invalid_segment(field: &'static str, value: impl Into<String>) -> Self {
        NodeError::InvalidSegment {
            field,
            value: value.into(),
        }
    }

    pub fn invalid_command(reason: impl Into<String>) -> Self {
        NodeError::InvalidCommand {
            reason: reason.into(),
        }
    }
}
