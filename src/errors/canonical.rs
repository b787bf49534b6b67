// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for building canonical transactions.

/// A classified input could not be turned into a canonical transaction.
#[derive(Debug, thiserror::Error)]
pub enum CanonicalizationError {
    /// The command could not be serialized to JSON.
    #[error("Something went wrong generating the transaction")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },

    /// Caller-supplied `meta` is not a JSON object and cannot be merged with defaults.
    #[error("Invalid `meta`: expected a JSON object but found {found}")]
    InvalidMeta { found: &'static str },
}

impl CanonicalizationError {
    pub fn serialize(source: serde_json::Error) -> Self {
        CanonicalizationError::Serialize { source }
    }

    pub fn invalid_meta(found: &'static str) -> Self {
        CanonicalizationError::InvalidMeta { found }
    }
}
