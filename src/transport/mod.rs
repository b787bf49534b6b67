// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Transport layer for Chainweb node calls.
//!
//! The remote estimator talks to the node through any
//! `tower::Service<LocalRequest, Response = serde_json::Value, Error = NodeError>`.
//! [`HttpTransport`] is the production implementation; tests substitute
//! `tower::service_fn` closures.
//!
//! # Logging
//!
//! [`LoggingLayer`] wraps a transport and records each call's duration and
//! outcome with `tracing`.
//!
//! ```rust,ignore
//! use pact_gas::transport::{HttpTransport, LoggingLayer};
//! use tower::Layer;
//!
//! let transport = LoggingLayer::new().layer(HttpTransport::new(None)?);
//! ```

use url::Url;

use crate::command::CanonicalTransaction;

mod http;
mod logging;

pub use http::HttpTransport;
pub use logging::{LoggingLayer, LoggingService};

/// A `local` (simulate) call: the endpoint, with policy already encoded in its
/// query string, and the transaction to evaluate.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalRequest {
    pub url: Url,
    pub transaction: CanonicalTransaction,
}

impl LocalRequest {
    pub fn new(url: Url, transaction: CanonicalTransaction) -> Self {
        Self { url, transaction }
    }

    /// Value of a boolean query flag, if present
    pub fn flag(&self, name: &str) -> Option<bool> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == name)
            .and_then(|(_, value)| value.parse().ok())
    }
}
