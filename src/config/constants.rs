// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Well-known defaults
//!
//! This module centralizes the defaults used when a caller leaves parts of a
//! command unspecified, and the endpoint layout of a Chainweb node.

/// Node host used when `NETWORK_HOST` is not set
pub const DEFAULT_NETWORK_HOST: &str = "http://localhost:8080";

/// Network id used when neither the caller nor `NETWORK_ID` supplies one
pub const DEFAULT_NETWORK_ID: &str = "development";

/// Pact command metadata defaults
pub mod meta {
    /// Gas limit written into synthesized commands
    pub const GAS_LIMIT: u64 = 2500;

    /// Gas price written into synthesized commands
    pub const GAS_PRICE: f64 = 1.0e-8;

    /// Time-to-live in seconds (8 hours)
    pub const TTL_SECS: u64 = 8 * 60 * 60;

    /// Sender account written into synthesized commands
    pub const SENDER: &str = "";
}

/// Prefix of the nonce written into synthesized commands, followed by unix millis
pub const NONCE_PREFIX: &str = "kjs:nonce:";

/// Path prefix of the Chainweb node API
pub const CHAINWEB_API_PREFIX: &str = "chainweb/0.0";

/// Path of the Pact local (simulate) endpoint below a chain
pub const PACT_LOCAL_PATH: &str = "pact/api/v1/local";
