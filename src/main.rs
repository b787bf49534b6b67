// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use std::process::ExitCode;

use pact_gas::bootstrap::{init_tracing, run};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    if let Err(e) = run().await {
        tracing::error!("Gas estimation failed: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}
