// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Gas limit estimation for Chainweb/Pact transactions.
//!
//! Callers describe a not-yet-submitted transaction in one of six shapes (a
//! signed transaction, a parsed command, a structured or partial command, a
//! bare payload, or raw Pact code). [`GasLimitEstimator`] decodes the input,
//! classifies it, builds a canonical transaction, derives whether to preflight
//! and verify signatures, and asks a Chainweb node to simulate it.
//!
//! Each stage is also usable on its own: [`decode_input`], [`classify`],
//! [`Canonicalizer`], [`ChainwebNode`].

pub mod bootstrap;
mod classify;
mod command;
pub mod config;
mod errors;
mod estimate;
mod input;
mod node;
mod tracing;
pub mod transport;
mod types;

pub use classify::*;
pub use command::*;
pub use config::{CommandDefaults, EstimatorConfig, EstimatorConfigBuilder};
pub use errors::*;
pub use estimate::*;
pub use input::*;
pub use node::*;
pub use types::*;
