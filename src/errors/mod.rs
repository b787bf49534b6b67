// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the pact-gas library.
//!
//! Each stage of the estimation pipeline has its own error type, so callers
//! can match on exactly the failures a stage can produce:
//!
//! - [`EncodingError`] - the raw input is not a JSON object
//! - [`ClassificationError`] - the decoded fields match none of the accepted shapes
//! - [`CanonicalizationError`] - a recognized shape could not be turned into a transaction
//! - [`GasEstimationError`] - the node could not produce a gas figure
//!
//! [`NodeError`] describes the underlying transport/response failure and is only
//! ever surfaced as the `cause` of a [`GasEstimationError`]. [`ConfigError`]
//! covers environment-driven configuration.
//!
//! [`EstimationError`] unifies the four pipeline errors for callers that only
//! need to report the failure.
//!
//! # Examples
//!
//! ```rust,ignore
//! use pact_gas::{EstimationError, GasLimitEstimator};
//!
//! match estimator.estimate(raw).await {
//!     Ok(result) => println!("gas: {}", result.amount),
//!     Err(EstimationError::GasEstimation(err)) => {
//!         eprintln!("{err}");
//!         if let Some(cause) = err.cause() {
//!             tracing::debug!(%cause, "node failure");
//!         }
//!     }
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```

mod canonical;
mod config;
mod gas;
mod input;
mod node;

pub use canonical::CanonicalizationError;
pub use config::ConfigError;
pub use gas::GasEstimationError;
pub use input::{ClassificationError, EncodingError};
pub use node::NodeError;

/// Unified error type for a single estimation call.
///
/// Every failure aborts the call; there is no partial result.
#[derive(Debug, thiserror::Error)]
pub enum EstimationError {
    /// The raw input could not be decoded.
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    /// The decoded input matched none of the accepted shapes.
    #[error(transparent)]
    Classification(#[from] ClassificationError),

    /// The classified input could not be turned into a transaction.
    #[error(transparent)]
    Canonicalization(#[from] CanonicalizationError),

    /// The node failed to estimate the transaction.
    #[error(transparent)]
    GasEstimation(#[from] GasEstimationError),
}
