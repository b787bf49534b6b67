// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP transport backed by `reqwest`.

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Duration,
};

use serde_json::Value;

use super::LocalRequest;
use crate::errors::NodeError;

/// Posts canonical transactions to a node's `local` endpoint
///
/// Non-success statuses become [`NodeError::Status`] carrying the response
/// body. No retries are performed.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport, optionally bounding each request.
    pub fn new(timeout: Option<Duration>) -> Result<Self, NodeError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(NodeError::Client)?;
        Ok(Self::with_client(client))
    }

    /// Use an already configured client (proxies, TLS settings, ...)
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl tower::Service<LocalRequest> for HttpTransport {
    type Response = Value;
    type Error = NodeError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: LocalRequest) -> Self::Future {
        let client = self.client.clone();

        Box::pin(async move {
            let url = request.url.to_string();

            let response = client
                .post(request.url)
                .json(&request.transaction)
                .send()
                .await
                .map_err(|e| NodeError::transport(&url, e))?;

            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|e| NodeError::transport(&url, e))?;

            if !status.is_success() {
                return Err(NodeError::status(status.as_u16(), body));
            }

            serde_json::from_str(&body).map_err(|e| NodeError::invalid_response(&url, e))
        })
    }
}
