// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Classification of decoded input into one of six transaction shapes
//!
//! Callers describe the transaction to estimate in whichever shape they have at
//! hand. Several shapes share fields, so the classifier evaluates a fixed,
//! ordered chain of predicates and the first match wins:
//!
//! | # | Shape | Required fields |
//! |---|-------|-----------------|
//! | 1 | [`InputType::FullTransaction`] | `cmd`, `hash`, `sigs` |
//! | 2 | [`InputType::ParsedCommand`] | `cmd` |
//! | 3 | [`InputType::FullCommand`] | `payload`, `meta`, `signers` |
//! | 4 | [`InputType::PartialCommand`] | `payload` and (`meta` or (`signers` and `chainId`)) |
//! | 5 | [`InputType::Payload`] | `payload`, `chainId` |
//! | 6 | [`InputType::Code`] | `code`, `chainId` |
//!
//! More fully specified shapes come first, so extra context is never dropped by
//! a looser interpretation. The estimation [`Policy`] is derived from the
//! classified shape alone.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::command::hash_command;
use crate::errors::ClassificationError;
use crate::input::{fields, FieldSet};
use crate::tracing::spans;
use crate::types::{ChainId, NetworkId};

/// Tag of a classified input, as reported in [`EstimationResult`](crate::EstimationResult)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputType {
    FullTransaction,
    ParsedCommand,
    FullCommand,
    PartialCommand,
    Payload,
    Code,
}

impl InputType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            InputType::FullTransaction => "full-transaction",
            InputType::ParsedCommand => "parsed-command",
            InputType::FullCommand => "full-command",
            InputType::PartialCommand => "partial-command",
            InputType::Payload => "payload",
            InputType::Code => "code",
        }
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller input resolved to exactly one shape
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifiedInput {
    /// A signed transaction: command, its hash and signatures
    FullTransaction {
        cmd: String,
        hash: String,
        sigs: Vec<String>,
        network_id: Option<NetworkId>,
    },
    /// A serialized command without a hash; `hash` is computed from `cmd`
    ParsedCommand {
        cmd: String,
        hash: String,
        sigs: Option<Vec<String>>,
        network_id: Option<NetworkId>,
    },
    /// A structured command with payload, meta and signers
    FullCommand {
        payload: Value,
        meta: Value,
        signers: Vec<Value>,
        network_id: Option<NetworkId>,
    },
    /// A structured command missing some parts; `meta` is `{chainId}` when not supplied
    PartialCommand {
        payload: Value,
        meta: Value,
        signers: Option<Vec<Value>>,
        chain_id: Option<ChainId>,
        network_id: Option<NetworkId>,
    },
    /// A bare execution payload for one chain
    Payload {
        payload: Value,
        chain_id: ChainId,
        network_id: Option<NetworkId>,
    },
    /// Raw Pact code for one chain
    Code {
        code: String,
        chain_id: ChainId,
        network_id: Option<NetworkId>,
    },
}

impl ClassifiedInput {
    pub fn input_type(&self) -> InputType {
        match self {
            ClassifiedInput::FullTransaction { .. } => InputType::FullTransaction,
            ClassifiedInput::ParsedCommand { .. } => InputType::ParsedCommand,
            ClassifiedInput::FullCommand { .. } => InputType::FullCommand,
            ClassifiedInput::PartialCommand { .. } => InputType::PartialCommand,
            ClassifiedInput::Payload { .. } => InputType::Payload,
            ClassifiedInput::Code { .. } => InputType::Code,
        }
    }

    /// Network id supplied by the caller, if any
    pub fn network_id(&self) -> Option<&NetworkId> {
        match self {
            ClassifiedInput::FullTransaction { network_id, .. }
            | ClassifiedInput::ParsedCommand { network_id, .. }
            | ClassifiedInput::FullCommand { network_id, .. }
            | ClassifiedInput::PartialCommand { network_id, .. }
            | ClassifiedInput::Payload { network_id, .. }
            | ClassifiedInput::Code { network_id, .. } => network_id.as_ref(),
        }
    }
}

/// How the node should evaluate the transaction
///
/// Derived purely from what the caller supplied, never from node state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    /// Dry-run the transaction as if it were included in a block
    pub preflight: bool,
    /// Check the attached signatures before simulating
    pub signature_verification: bool,
}

impl Policy {
    /// Derive the policy for a classified input.
    ///
    /// - A signed transaction is simulated with signature checks.
    /// - A parsed command is simulated without signature checks.
    /// - Structured commands are simulated only when the caller named the network.
    /// - Bare payloads and code are never simulated.
    pub fn derive(input: &ClassifiedInput) -> Self {
        match input {
            ClassifiedInput::FullTransaction { .. } => Self {
                preflight: true,
                signature_verification: true,
            },
            ClassifiedInput::ParsedCommand { .. } => Self {
                preflight: true,
                signature_verification: false,
            },
            ClassifiedInput::FullCommand { network_id, .. }
            | ClassifiedInput::PartialCommand { network_id, .. } => Self {
                preflight: network_id.is_some(),
                signature_verification: false,
            },
            ClassifiedInput::Payload { .. } | ClassifiedInput::Code { .. } => Self {
                preflight: false,
                signature_verification: false,
            },
        }
    }
}

/// A classified input together with its derived policy
#[derive(Debug, Clone, PartialEq)]
pub struct Classified {
    pub input: ClassifiedInput,
    pub policy: Policy,
}

impl Classified {
    pub fn input_type(&self) -> InputType {
        self.input.input_type()
    }
}

type Predicate = fn(&FieldSet) -> bool;

/// Shape predicates in precedence order. The first match wins.
const PRECEDENCE: [(InputType, Predicate); 6] = [
    (InputType::FullTransaction, is_full_transaction),
    (InputType::ParsedCommand, is_parsed_command),
    (InputType::FullCommand, is_full_command),
    (InputType::PartialCommand, is_partial_command),
    (InputType::Payload, is_payload),
    (InputType::Code, is_code),
];

fn is_full_transaction(set: &FieldSet) -> bool {
    set.has(fields::CMD) && set.has(fields::HASH) && set.has(fields::SIGS)
}

fn is_parsed_command(set: &FieldSet) -> bool {
    set.has(fields::CMD)
}

fn is_full_command(set: &FieldSet) -> bool {
    set.has(fields::PAYLOAD) && set.has(fields::META) && set.has(fields::SIGNERS)
}

fn is_partial_command(set: &FieldSet) -> bool {
    set.has(fields::PAYLOAD)
        && (set.has(fields::META) || (set.has(fields::SIGNERS) && set.has(fields::CHAIN_ID)))
}

fn is_payload(set: &FieldSet) -> bool {
    set.has(fields::PAYLOAD) && set.has(fields::CHAIN_ID)
}

fn is_code(set: &FieldSet) -> bool {
    set.has(fields::CODE) && set.has(fields::CHAIN_ID)
}

/// Determine which shape a field set has, without extracting it.
///
/// Returns `None` when no shape matches.
pub fn detect_input_type(set: &FieldSet) -> Option<InputType> {
    PRECEDENCE
        .iter()
        .find(|(_, matches)| matches(set))
        .map(|(input_type, _)| *input_type)
}

/// Classify a decoded field set and derive its estimation policy.
///
/// # Example
///
/// ```rust
/// use pact_gas::{classify, decode_input, InputType};
///
/// let classified = classify(decode_input(r#"{"code":"(+ 1 1)","chainId":"0"}"#).unwrap()).unwrap();
/// assert_eq!(classified.input_type(), InputType::Code);
/// assert!(!classified.policy.preflight);
/// ```
pub fn classify(mut set: FieldSet) -> Result<Classified, ClassificationError> {
    let input_type = detect_input_type(&set).ok_or(ClassificationError::UnknownInputType)?;

    let span = spans::classify_input(input_type);
    let _guard = span.enter();

    let network_id = take_network_id(&mut set)?;

    let input = match input_type {
        InputType::FullTransaction => ClassifiedInput::FullTransaction {
            cmd: take_string(&mut set, fields::CMD)?,
            hash: take_string(&mut set, fields::HASH)?,
            sigs: take_string_array(&mut set, fields::SIGS)?,
            network_id,
        },
        InputType::ParsedCommand => {
            let cmd = take_string(&mut set, fields::CMD)?;
            let hash = hash_command(&cmd);
            let sigs = if set.has(fields::SIGS) {
                Some(take_string_array(&mut set, fields::SIGS)?)
            } else {
                None
            };
            ClassifiedInput::ParsedCommand {
                cmd,
                hash,
                sigs,
                network_id,
            }
        }
        InputType::FullCommand => ClassifiedInput::FullCommand {
            payload: take_value(&mut set, fields::PAYLOAD)?,
            meta: take_value(&mut set, fields::META)?,
            signers: take_array(&mut set, fields::SIGNERS)?,
            network_id,
        },
        InputType::PartialCommand => {
            let payload = take_value(&mut set, fields::PAYLOAD)?;
            let chain_id = if set.has(fields::CHAIN_ID) {
                Some(take_chain_id(&mut set)?)
            } else {
                None
            };
            let meta = match set.take(fields::META) {
                Some(meta) => meta,
                None => json!({ "chainId": chain_id }),
            };
            let signers = if set.has(fields::SIGNERS) {
                Some(take_array(&mut set, fields::SIGNERS)?)
            } else {
                None
            };
            ClassifiedInput::PartialCommand {
                payload,
                meta,
                signers,
                chain_id,
                network_id,
            }
        }
        InputType::Payload => ClassifiedInput::Payload {
            payload: take_value(&mut set, fields::PAYLOAD)?,
            chain_id: take_chain_id(&mut set)?,
            network_id,
        },
        InputType::Code => ClassifiedInput::Code {
            code: take_string(&mut set, fields::CODE)?,
            chain_id: take_chain_id(&mut set)?,
            network_id,
        },
    };

    let policy = Policy::derive(&input);
    debug!(
        input_type = %input_type,
        preflight = policy.preflight,
        signature_verification = policy.signature_verification,
        "Classified input"
    );

    Ok(Classified { input, policy })
}

fn take_value(set: &mut FieldSet, field: &'static str) -> Result<Value, ClassificationError> {
    set.take(field)
        .ok_or(ClassificationError::invalid_field(field, "a value"))
}

fn take_string(set: &mut FieldSet, field: &'static str) -> Result<String, ClassificationError> {
    match set.take(field) {
        Some(Value::String(value)) => Ok(value),
        _ => Err(ClassificationError::invalid_field(field, "a string")),
    }
}

fn take_array(set: &mut FieldSet, field: &'static str) -> Result<Vec<Value>, ClassificationError> {
    match set.take(field) {
        Some(Value::Array(values)) => Ok(values),
        _ => Err(ClassificationError::invalid_field(field, "an array")),
    }
}

fn take_string_array(
    set: &mut FieldSet,
    field: &'static str,
) -> Result<Vec<String>, ClassificationError> {
    take_array(set, field)?
        .into_iter()
        .map(|value| match value {
            Value::String(s) => Ok(s),
            _ => Err(ClassificationError::invalid_field(field, "an array of strings")),
        })
        .collect()
}

fn take_chain_id(set: &mut FieldSet) -> Result<ChainId, ClassificationError> {
    match set.take(fields::CHAIN_ID) {
        Some(Value::String(id)) => Ok(ChainId::new(id)),
        Some(Value::Number(n)) if n.is_u64() => Ok(ChainId::new(n.to_string())),
        _ => Err(ClassificationError::invalid_field(
            fields::CHAIN_ID,
            "a string or non-negative integer",
        )),
    }
}

fn take_network_id(set: &mut FieldSet) -> Result<Option<NetworkId>, ClassificationError> {
    match set.take(fields::NETWORK_ID) {
        None => Ok(None),
        Some(Value::String(id)) => Ok(Some(NetworkId::new(id))),
        Some(_) => Err(ClassificationError::invalid_field(
            fields::NETWORK_ID,
            "a string",
        )),
    }
}
