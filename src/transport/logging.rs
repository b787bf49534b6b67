// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Tower-based logging layer for node transports.
//!
//! This module implements a logging layer that uses `tracing` to record
//! `local` call request/response information for debugging and observability.

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Instant,
};

use serde_json::Value;
use tower::Layer;
use tracing::{debug, trace, warn, Instrument};

use super::LocalRequest;
use crate::errors::NodeError;

/// A Tower layer that adds logging/tracing to node calls.
///
/// This layer wraps each call in a tracing span and logs timing
/// information, request details, and any errors that occur.
///
/// # Example
///
/// ```rust,ignore
/// use pact_gas::transport::{HttpTransport, LoggingLayer};
/// use tower::Layer;
///
/// let transport = LoggingLayer::new().verbose().layer(HttpTransport::new(None)?);
/// ```
#[derive(Clone, Debug, Default)]
pub struct LoggingLayer {
    /// Whether to log request payloads (can be verbose)
    log_requests: bool,
    /// Whether to log response payloads (can be verbose)
    log_responses: bool,
}

impl LoggingLayer {
    /// Creates a new logging layer with default settings.
    ///
    /// By default, only timing and errors are logged.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables logging of request payloads.
    pub fn with_request_logging(mut self) -> Self {
        self.log_requests = true;
        self
    }

    /// Enables logging of response payloads.
    pub fn with_response_logging(mut self) -> Self {
        self.log_responses = true;
        self
    }

    /// Enables logging of both request and response payloads.
    pub fn verbose(mut self) -> Self {
        self.log_requests = true;
        self.log_responses = true;
        self
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = LoggingService<S>;

    fn layer(&self, service: S) -> Self::Service {
        LoggingService {
            service,
            log_requests: self.log_requests,
            log_responses: self.log_responses,
        }
    }
}

/// A Tower service that logs node requests and responses.
#[derive(Clone, Debug)]
pub struct LoggingService<S> {
    service: S,
    log_requests: bool,
    log_responses: bool,
}

impl<S> tower::Service<LocalRequest> for LoggingService<S>
where
    S: tower::Service<LocalRequest, Response = Value, Error = NodeError> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Value;
    type Error = NodeError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&mut self, request: LocalRequest) -> Self::Future {
        let log_requests = self.log_requests;
        let log_responses = self.log_responses;
        // Take the service that was driven to readiness, leave a fresh clone behind
        let clone = self.service.clone();
        let mut service = std::mem::replace(&mut self.service, clone);

        let endpoint = request.url.path().to_string();
        let span = tracing::info_span!(
            "node_request",
            endpoint = %endpoint,
            duration_ms = tracing::field::Empty,
        );

        Box::pin(
            async move {
                let start = Instant::now();

                let preflight = request.flag("preflight").unwrap_or_default();
                let signature_verification =
                    request.flag("signatureVerification").unwrap_or_default();

                if log_requests {
                    trace!(
                        transaction = ?request.transaction,
                        url = %request.url,
                        preflight,
                        signature_verification,
                        "Node request"
                    );
                } else {
                    debug!(preflight, signature_verification, "Node request: {endpoint}");
                }

                let result = service.call(request).await;
                let duration = start.elapsed();

                tracing::Span::current().record("duration_ms", duration.as_millis() as u64);

                match &result {
                    Ok(response) => {
                        if log_responses {
                            trace!(
                                response = %response,
                                duration_ms = %duration.as_millis(),
                                "Node response"
                            );
                        } else {
                            debug!(
                                duration_ms = %duration.as_millis(),
                                "Node response: {endpoint}"
                            );
                        }
                    }
                    Err(e) => {
                        warn!(
                            error = %e,
                            duration_ms = %duration.as_millis(),
                            "Node error: {endpoint}"
                        );
                    }
                }

                result
            }
            .instrument(span),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CanonicalTransaction;
    use serde_json::json;
    use tower::{service_fn, ServiceExt};

    #[test]
    fn test_logging_layer_default() {
        let layer = LoggingLayer::new();
        assert!(!layer.log_requests);
        assert!(!layer.log_responses);
    }

    #[test]
    fn test_logging_layer_with_request_logging() {
        let layer = LoggingLayer::new().with_request_logging();
        assert!(layer.log_requests);
        assert!(!layer.log_responses);
    }

    #[test]
    fn test_logging_layer_verbose() {
        let layer = LoggingLayer::new().verbose();
        assert!(layer.log_requests);
        assert!(layer.log_responses);
    }

    #[tokio::test]
    async fn test_logging_service_passes_results_through() {
        let inner = service_fn(|_request: LocalRequest| async {
            Ok::<_, NodeError>(json!({ "gas": 7 }))
        });
        let failing = service_fn(|_request: LocalRequest| async {
            Err::<Value, _>(NodeError::MissingGas)
        });
        let request = LocalRequest::new(
            "http://localhost:8080/chainweb/0.0/development/chain/0/pact/api/v1/local"
                .parse()
                .unwrap(),
            CanonicalTransaction::unsigned("{}".to_string()),
        );

        let ok = LoggingLayer::new()
            .verbose()
            .layer(inner)
            .oneshot(request.clone())
            .await
            .unwrap();
        assert_eq!(ok, json!({ "gas": 7 }));

        let err = LoggingLayer::new()
            .layer(failing)
            .oneshot(request)
            .await
            .unwrap_err();
        assert!(matches!(err, NodeError::MissingGas));
    }
}
