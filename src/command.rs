// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Canonical transactions and the command builder
//!
//! Every classified input is turned into a [`CanonicalTransaction`]
//! (`{cmd, hash, sigs}`), the form a Chainweb node accepts on its `local`
//! endpoint. Signed transactions and parsed commands pass through. Structured
//! inputs are completed from [`CommandDefaults`], serialized into `cmd` and hashed.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use blake2::{digest::consts::U32, Blake2b, Digest};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::classify::ClassifiedInput;
use crate::config::constants::NONCE_PREFIX;
use crate::config::CommandDefaults;
use crate::errors::CanonicalizationError;
use crate::input::json_type_name;
use crate::types::{ChainId, NetworkId};

type Blake2b256 = Blake2b<U32>;

/// Ledger content hash: unpadded base64url of BLAKE2b-256 over the command text.
///
/// # Example
///
/// ```rust
/// use pact_gas::hash_command;
///
/// assert_eq!(hash_command("(+ 1 1)"), "hmdU9BSvZ0s2W9Mtyu0BxcdIKD0i7owN_P4HhupAiLc");
/// ```
pub fn hash_command(cmd: &str) -> String {
    URL_SAFE_NO_PAD.encode(Blake2b256::digest(cmd.as_bytes()))
}

/// A single signature attached to a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub sig: String,
}

impl From<String> for Signature {
    fn from(sig: String) -> Self {
        Self { sig }
    }
}

/// Transaction in the form the node evaluates
///
/// `hash` is never empty: it is either supplied by the caller alongside a
/// signed `cmd` or computed with [`hash_command`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalTransaction {
    pub cmd: String,
    pub hash: String,
    #[serde(rename = "sigs")]
    pub signatures: Vec<Signature>,
}

impl CanonicalTransaction {
    /// Build an unsigned transaction from serialized command text
    pub fn unsigned(cmd: String) -> Self {
        let hash = hash_command(&cmd);
        Self {
            cmd,
            hash,
            signatures: Vec::new(),
        }
    }

    /// Serialize as `{"cmd":..,"hash":..,"sigs":[{"sig":..}]}`
    pub fn to_json(&self) -> Result<String, CanonicalizationError> {
        serde_json::to_string(self).map_err(CanonicalizationError::serialize)
    }
}

/// A Pact command before serialization
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PactCommand<'a> {
    payload: &'a Value,
    meta: Map<String, Value>,
    signers: &'a [Value],
    #[serde(skip_serializing_if = "Option::is_none")]
    network_id: Option<&'a NetworkId>,
    nonce: String,
}

/// Turns classified input into canonical transactions
///
/// Missing command parts are filled from the [`CommandDefaults`] given at
/// construction, never from ambient process state.
#[derive(Debug, Clone, Default)]
pub struct Canonicalizer {
    defaults: CommandDefaults,
}

impl Canonicalizer {
    pub fn new(defaults: CommandDefaults) -> Self {
        Self { defaults }
    }

    /// Canonicalize using the current time for `creationTime` and `nonce`.
    pub fn canonicalize(
        &self,
        input: &ClassifiedInput,
    ) -> Result<CanonicalTransaction, CanonicalizationError> {
        self.canonicalize_at(input, Utc::now())
    }

    /// Canonicalize with an explicit timestamp for `creationTime` and `nonce`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chrono::{TimeZone, Utc};
    /// use pact_gas::{Canonicalizer, ChainId, ClassifiedInput};
    ///
    /// let input = ClassifiedInput::Code {
    ///     code: "(+ 1 1)".to_string(),
    ///     chain_id: ChainId::from("0"),
    ///     network_id: None,
    /// };
    /// let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    ///
    /// let a = Canonicalizer::default().canonicalize_at(&input, now).unwrap();
    /// let b = Canonicalizer::default().canonicalize_at(&input, now).unwrap();
    /// assert_eq!(a, b);
    /// ```
    pub fn canonicalize_at(
        &self,
        input: &ClassifiedInput,
        now: DateTime<Utc>,
    ) -> Result<CanonicalTransaction, CanonicalizationError> {
        match input {
            ClassifiedInput::FullTransaction {
                cmd, hash, sigs, ..
            } => Ok(CanonicalTransaction {
                cmd: cmd.clone(),
                hash: hash.clone(),
                signatures: sigs.iter().cloned().map(Signature::from).collect(),
            }),
            ClassifiedInput::ParsedCommand {
                cmd, hash, sigs, ..
            } => Ok(CanonicalTransaction {
                cmd: cmd.clone(),
                hash: hash.clone(),
                signatures: sigs
                    .iter()
                    .flatten()
                    .cloned()
                    .map(Signature::from)
                    .collect(),
            }),
            ClassifiedInput::FullCommand {
                payload,
                meta,
                signers,
                network_id,
            } => self.build(
                payload,
                meta,
                signers,
                Some(network_id.as_ref().unwrap_or(&self.defaults.network_id)),
                now,
            ),
            ClassifiedInput::PartialCommand {
                payload,
                meta,
                signers,
                network_id,
                ..
            } => self.build(
                payload,
                meta,
                signers.as_deref().unwrap_or_default(),
                Some(network_id.as_ref().unwrap_or(&self.defaults.network_id)),
                now,
            ),
            ClassifiedInput::Payload {
                payload, chain_id, ..
            } => self.build(payload, &chain_meta(chain_id), &[], None, now),
            ClassifiedInput::Code { code, chain_id, .. } => {
                let payload = json!({ "exec": { "code": code, "data": {} } });
                self.build(&payload, &chain_meta(chain_id), &[], None, now)
            }
        }
    }

    fn build(
        &self,
        payload: &Value,
        meta: &Value,
        signers: &[Value],
        network_id: Option<&NetworkId>,
        now: DateTime<Utc>,
    ) -> Result<CanonicalTransaction, CanonicalizationError> {
        let command = PactCommand {
            payload,
            meta: self.merge_meta(meta, now)?,
            signers,
            network_id,
            nonce: format!("{NONCE_PREFIX}{}", now.timestamp_millis()),
        };

        let cmd = serde_json::to_string(&command).map_err(CanonicalizationError::serialize)?;
        Ok(CanonicalTransaction::unsigned(cmd))
    }

    /// Default meta overlaid with the caller's keys
    fn merge_meta(
        &self,
        meta: &Value,
        now: DateTime<Utc>,
    ) -> Result<Map<String, Value>, CanonicalizationError> {
        let supplied = meta
            .as_object()
            .ok_or_else(|| CanonicalizationError::invalid_meta(json_type_name(meta)))?;

        let mut merged = Map::new();
        merged.insert("creationTime".into(), json!(now.timestamp()));
        merged.insert("gasLimit".into(), json!(self.defaults.gas_limit));
        merged.insert("gasPrice".into(), json!(self.defaults.gas_price));
        merged.insert("sender".into(), json!(self.defaults.sender));
        merged.insert("ttl".into(), json!(self.defaults.ttl));
        for (key, value) in supplied {
            merged.insert(key.clone(), value.clone());
        }
        Ok(merged)
    }
}

fn chain_meta(chain_id: &ChainId) -> Value {
    json!({ "chainId": chain_id })
}
