// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Decoding of raw caller input into a field set.

use serde_json::{Map, Value};

use crate::errors::EncodingError;

/// Field names that take part in classification
pub mod fields {
    pub const CMD: &str = "cmd";
    pub const HASH: &str = "hash";
    pub const SIGS: &str = "sigs";
    pub const PAYLOAD: &str = "payload";
    pub const META: &str = "meta";
    pub const SIGNERS: &str = "signers";
    pub const CHAIN_ID: &str = "chainId";
    pub const CODE: &str = "code";
    pub const NETWORK_ID: &str = "networkId";
}

/// Weakly typed fields decoded from a raw input.
///
/// A field is present when its key exists with a non-`null` value. Keys outside
/// [`fields`] are kept but never consulted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSet(Map<String, Value>);

impl FieldSet {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn has(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field).filter(|value| !value.is_null())
    }

    /// Remove a present field, returning its value
    pub fn take(&mut self, field: &str) -> Option<Value> {
        self.0.remove(field).filter(|value| !value.is_null())
    }
}

impl From<Map<String, Value>> for FieldSet {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

/// Decode a raw JSON string into a [`FieldSet`].
///
/// Decoding is all-or-nothing: the input must be a single JSON object.
///
/// # Example
///
/// ```rust
/// use pact_gas::decode_input;
///
/// let set = decode_input(r#"{"code":"(+ 1 1)","chainId":"0"}"#).unwrap();
/// assert!(set.has("code"));
/// assert!(decode_input("{not valid").is_err());
/// ```
pub fn decode_input(raw: &str) -> Result<FieldSet, EncodingError> {
    let value: Value = serde_json::from_str(raw).map_err(EncodingError::invalid_json)?;

    match value {
        Value::Object(fields) => Ok(FieldSet::new(fields)),
        other => Err(EncodingError::not_an_object(json_type_name(&other))),
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
