// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for decoding and classifying raw input.

/// The raw input is not a well-formed JSON object.
#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    /// The input is not valid JSON.
    #[error("Unable to parse input as JSON. Please see the README for the accepted input format.")]
    InvalidJson {
        /// The underlying parser error
        #[source]
        source: serde_json::Error,
    },

    /// The input is valid JSON but not an object.
    #[error("Expected a JSON object but found {found}. Please see the README for the accepted input format.")]
    NotAnObject {
        /// JSON type that was found instead
        found: &'static str,
    },
}

impl EncodingError {
    pub fn invalid_json(source: serde_json::Error) -> Self {
        EncodingError::InvalidJson { source }
    }

    pub fn not_an_object(found: &'static str) -> Self {
        EncodingError::NotAnObject { found }
    }
}

/// The decoded input matched none of the accepted shapes, or a field of the
/// matched shape has the wrong type.
#[derive(Debug, thiserror::Error)]
pub enum ClassificationError {
    #[error("Unknown input type. Please see the README for the accepted input format.")]
    UnknownInputType,

    /// A field required by the matched shape has an unexpected JSON type.
    #[error("Invalid `{field}` field: expected {expected}. Please see the README for the accepted input format.")]
    InvalidField {
        /// Name of the offending field
        field: &'static str,
        /// Human-readable description of the expected type
        expected: &'static str,
    },
}

impl ClassificationError {
    pub fn invalid_field(field: &'static str, expected: &'static str) -> Self {
        ClassificationError::InvalidField { field, expected }
    }
}
