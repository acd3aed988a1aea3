//! Event recorder.
//!
//! Height-gated serialization: a structured record once a node is past
//! `OptimizeHeight`, and a legacy, protobuf-inside-JSON record before it.
//! The legacy format is consensus-observable for historical blocks and must
//! be reproduced exactly, do not "clean it up".

use serde::Serialize;

use crate::config::Config;
use crate::transaction::Transaction;
use crate::uint128::Uint128;

pub const TOPIC_EXECUTE_TX_SUCCESS: &str = "chain.transaction.executeSuccess";
pub const TOPIC_EXECUTE_TX_FAILED: &str = "chain.transaction.executeFailed";
pub const TOPIC_TRANSACTION_EXECUTION_RESULT: &str = "chain.transaction.executionResult";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Failed,
}

/// An event attached to a block, keyed by transaction hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub topic: &'static str,
    /// Raw bytes of the event body: JSON for the structured record, or a
    /// protobuf blob (optionally JSON-wrapped) for the legacy record.
    pub data: Vec<u8>,
}

#[derive(Serialize)]
struct StructuredResult<'a> {
    hash: String,
    status: Status,
    gas_used: String,
    error: Option<&'a str>,
}

#[derive(Serialize)]
struct LegacyFailurePayload {
    tx: Vec<u8>,
    error: Option<String>,
}

fn structured_event(tx: &Transaction, status: Status, gas_used: Uint128, error: Option<&str>) -> Event {
    let body = StructuredResult {
        hash: tx.hash().map(hex::encode).unwrap_or_default(),
        status,
        gas_used: gas_used.to_string(),
        error,
    };
    Event {
        topic: TOPIC_TRANSACTION_EXECUTION_RESULT,
        data: serde_json::to_vec(&body).expect("structured event is always serializable"),
    }
}

fn legacy_event(tx: &Transaction, success: bool, error: Option<&str>) -> Event {
    let protobuf_bytes = tx.to_wire().encode_to_vec();
    if success {
        Event {
            topic: TOPIC_EXECUTE_TX_SUCCESS,
            data: protobuf_bytes,
        }
    } else {
        let payload = LegacyFailurePayload {
            tx: protobuf_bytes,
            error: error.map(str::to_owned),
        };
        Event {
            topic: TOPIC_EXECUTE_TX_FAILED,
            data: serde_json::to_vec(&payload).expect("legacy failure payload is always serializable"),
        }
    }
}

/// Emits a success event for `tx`, height-gated per `config.optimize_height`.
pub fn success_event(tx: &Transaction, config: &Config, height: u64, gas_used: Uint128) -> Event {
    if height > config.optimize_height {
        structured_event(tx, Status::Success, gas_used, None)
    } else {
        legacy_event(tx, true, None)
    }
}

/// Emits a failure event for `tx`. `error_message` is `None` in exactly the
/// historical-quirk case documented at execution step 13; callers resolve
/// that before reaching here, this function just serializes what it's given.
pub fn failure_event(
    tx: &Transaction,
    config: &Config,
    height: u64,
    gas_used: Uint128,
    error_message: Option<&str>,
) -> Event {
    if height > config.optimize_height {
        structured_event(tx, Status::Failed, gas_used, error_message)
    } else {
        legacy_event(tx, false, error_message)
    }
}
