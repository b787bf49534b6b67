// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Entry point for the `pact-gas` binary.
//!
//! Reads one raw input from stdin, estimates it against the node named by
//! `NETWORK_HOST`/`NETWORK_ID`, and prints the result as JSON.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{EstimatorConfig, GasLimitEstimator};

/// Install a `tracing` subscriber writing to stderr, filtered by `RUST_LOG`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
}

/// Main entry point for the application.
pub async fn run() -> anyhow::Result<()> {
    let config = EstimatorConfig::from_env()?;
    info!(
        host = %config.network_host,
        network_id = %config.command.network_id,
        "Loaded configuration"
    );

    let mut raw = String::new();
    tokio::io::stdin().read_to_string(&mut raw).await?;

    let estimator = GasLimitEstimator::new(config)?;
    let result = estimator.estimate(raw.trim()).await?;

    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(serde_json::to_string_pretty(&result)?.as_bytes())
        .await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await?;

    Ok(())
}
