// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Errors raised while loading configuration from the environment.

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid NETWORK_HOST `{value}`")]
    InvalidHost {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Invalid {name} `{value}`: {reason}")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    pub fn invalid_host(value: impl Into<String>, source: url::ParseError) -> Self {
        ConfigError::InvalidHost {
            value: value.into(),
            source,
        }
    }

    pub fn invalid_value(
        name: &'static str,
        value: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        ConfigError::InvalidValue {
            name,
            value: value.into(),
            reason: reason.to_string(),
        }
    }
}
