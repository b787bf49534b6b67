// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Configuration for gas estimation
//!
//! This module holds everything the estimator would otherwise read implicitly:
//! the node host to call, an optional request timeout, and the named defaults
//! ([`CommandDefaults`]) used to complete partially specified commands.
//!
//! # Example: Using defaults
//!
//! ```rust
//! use pact_gas::EstimatorConfig;
//!
//! // Local devnet at http://localhost:8080, network "development"
//! let config = EstimatorConfig::default();
//! assert_eq!(config.command.network_id.as_str(), "development");
//! ```
//!
//! # Example: Custom configuration
//!
//! ```rust
//! use pact_gas::EstimatorConfigBuilder;
//! use std::time::Duration;
//!
//! let config = EstimatorConfigBuilder::new()
//!     .network_host("https://api.testnet.chainweb.com")
//!     .unwrap()
//!     .network_id("testnet04")
//!     .request_timeout(Duration::from_secs(10))
//!     .build();
//! ```

use std::time::Duration;

use url::Url;

use crate::errors::{ConfigError, NodeError};
use crate::types::{ChainId, NetworkId};

pub mod constants;

/// Configuration for a [`GasLimitEstimator`](crate::GasLimitEstimator)
///
/// Use [`EstimatorConfigBuilder`] for a fluent API or [`EstimatorConfig::from_env`]
/// to read `NETWORK_HOST`, `NETWORK_ID` and `REQUEST_TIMEOUT_SECS`.
#[derive(Debug, Clone)]
pub struct EstimatorConfig {
    /// Base URL of the Chainweb node
    /// Default: `http://localhost:8080`
    pub network_host: Url,

    /// Timeout for the `local` call
    /// Default: None (the caller bounds the call if needed)
    pub request_timeout: Option<Duration>,

    /// Defaults used to complete commands
    pub command: CommandDefaults,
}

/// Named defaults for building Pact commands from partial input
#[derive(Debug, Clone, PartialEq)]
pub struct CommandDefaults {
    /// Network id used when the caller does not supply one
    pub network_id: NetworkId,
    pub gas_limit: u64,
    pub gas_price: f64,
    /// Time-to-live in seconds
    pub ttl: u64,
    pub sender: String,
}

impl Default for CommandDefaults {
    fn default() -> Self {
        Self {
            network_id: NetworkId::new(constants::DEFAULT_NETWORK_ID),
            gas_limit: constants::meta::GAS_LIMIT,
            gas_price: constants::meta::GAS_PRICE,
            ttl: constants::meta::TTL_SECS,
            sender: constants::meta::SENDER.to_string(),
        }
    }
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            network_host: default_host(),
            request_timeout: None,
            command: CommandDefaults::default(),
        }
    }
}

fn default_host() -> Url {
    Url::parse(constants::DEFAULT_NETWORK_HOST).expect("default network host is a valid URL")
}

impl EstimatorConfig {
    /// Load configuration from the process environment (and a `.env` file if present)
    ///
    /// Unset variables fall back to the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| dotenvy::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    ///
    /// # Example
    ///
    /// ```rust
    /// use pact_gas::EstimatorConfig;
    ///
    /// let config = EstimatorConfig::from_lookup(|name| match name {
    ///     "NETWORK_ID" => Some("mainnet01".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert_eq!(config.command.network_id.as_str(), "mainnet01");
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = EstimatorConfigBuilder::new();

        if let Some(host) = lookup("NETWORK_HOST") {
            builder = builder.network_host(&host)?;
        }
        if let Some(network_id) = lookup("NETWORK_ID") {
            builder = builder.network_id(network_id);
        }
        if let Some(timeout) = lookup("REQUEST_TIMEOUT_SECS") {
            let secs = timeout
                .parse::<u64>()
                .map_err(|e| ConfigError::invalid_value("REQUEST_TIMEOUT_SECS", &timeout, e))?;
            builder = builder.request_timeout(Duration::from_secs(secs));
        }

        Ok(builder.build())
    }

    /// Network id to address: the caller's, else the configured default
    pub fn resolve_network_id<'a>(&'a self, requested: Option<&'a NetworkId>) -> &'a NetworkId {
        requested.unwrap_or(&self.command.network_id)
    }

    /// URL of the Pact `local` endpoint for one chain
    ///
    /// # Example
    ///
    /// ```rust
    /// use pact_gas::{ChainId, EstimatorConfig, NetworkId};
    ///
    /// let config = EstimatorConfig::default();
    /// let url = config
    ///     .local_endpoint(&NetworkId::from("development"), &ChainId::from("0"), true, false)
    ///     .unwrap();
    /// assert_eq!(
    ///     url.as_str(),
    ///     "http://localhost:8080/chainweb/0.0/development/chain/0/pact/api/v1/local?preflight=true&signatureVerification=false"
    /// );
    /// ```
    pub fn local_endpoint(
        &self,
        network_id: &NetworkId,
        chain_id: &ChainId,
        preflight: bool,
        signature_verification: bool,
    ) -> Result<Url, NodeError> {
        let network_id = path_segment("networkId", network_id.as_str())?;
        let chain_id = path_segment("chainId", chain_id.as_str())?;

        let mut url = self.network_host.clone();
        url.set_query(None);
        url.set_fragment(None);
        // Ids are pushed as single segments, so `/`, `?` and `#` are percent-encoded
        url.path_segments_mut()
            .map_err(|()| {
                NodeError::InvalidEndpoint(url::ParseError::RelativeUrlWithCannotBeABaseBase)
            })?
            .pop_if_empty()
            .extend(constants::CHAINWEB_API_PREFIX.split('/'))
            .push(network_id)
            .push("chain")
            .push(chain_id)
            .extend(constants::PACT_LOCAL_PATH.split('/'));
        url.query_pairs_mut()
            .append_pair("preflight", &preflight.to_string())
            .append_pair("signatureVerification", &signature_verification.to_string());
        Ok(url)
    }
}

/// An id that can stand as one path segment
fn path_segment<'a>(field: &'static str, value: &'a str) -> Result<&'a str, NodeError> {
    match value {
        "" | "." | ".." => Err(NodeError::invalid_segment(field, value)),
        _ => Ok(value),
    }
}

/// Builder for [`EstimatorConfig`]
///
/// # Example
///
/// ```rust
/// use pact_gas::EstimatorConfigBuilder;
///
/// let config = EstimatorConfigBuilder::new()
///     .network_id("testnet04")
///     .gas_limit(10_000)
///     .build();
/// assert_eq!(config.command.gas_limit, 10_000);
/// ```
#[derive(Debug, Default)]
pub struct EstimatorConfigBuilder {
    config: EstimatorConfig,
}

impl EstimatorConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the node base URL
    pub fn network_host(mut self, host: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(host).map_err(|e| ConfigError::invalid_host(host, e))?;
        if url.cannot_be_a_base() {
            return Err(ConfigError::invalid_value(
                "NETWORK_HOST",
                host,
                "not a hierarchical URL",
            ));
        }
        self.config.network_host = url;
        Ok(self)
    }

    /// Set the default network id
    pub fn network_id(mut self, network_id: impl Into<String>) -> Self {
        self.config.command.network_id = NetworkId::new(network_id);
        self
    }

    /// Bound the `local` call
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = Some(timeout);
        self
    }

    pub fn gas_limit(mut self, gas_limit: u64) -> Self {
        self.config.command.gas_limit = gas_limit;
        self
    }

    pub fn gas_price(mut self, gas_price: f64) -> Self {
        self.config.command.gas_price = gas_price;
        self
    }

    pub fn ttl(mut self, ttl: u64) -> Self {
        self.config.command.ttl = ttl;
        self
    }

    pub fn sender(mut self, sender: impl Into<String>) -> Self {
        self.config.command.sender = sender.into();
        self
    }

    pub fn build(self) -> EstimatorConfig {
        self.config
    }
}
