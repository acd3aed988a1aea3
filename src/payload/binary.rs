//! Binary (plain value transfer) payload loaders, height-gated.
//!
//! A binary payload does no work of its own; the value transfer it
//! represents is carried out by the execution engine at step 14, not here.
//! These loaders only exist so the dispatch and gas pipeline have something
//! concrete to call for the most common transaction kind.

use super::Payload;
use crate::state::ExecutionBlock;
use crate::transaction::Transaction;
use crate::uint128::Uint128;

pub struct LoadBinaryPayload;

impl LoadBinaryPayload {
    pub fn load() -> Self {
        LoadBinaryPayload
    }
}

impl Payload for LoadBinaryPayload {
    fn base_gas_count(&self) -> Uint128 {
        Uint128::ZERO
    }

    fn execute(&self, _block: &mut dyn ExecutionBlock, _tx: &Transaction) -> Result<(Uint128, String), String> {
        Ok((Uint128::ZERO, "binary".to_string()))
    }
}

/// Original pre-`OptimizeHeight` binary loader. Semantics are identical to
/// the modern loader; only the `deprecated fail` window below behaves
/// differently.
pub struct LoadBinaryPayloadDeprecated;

impl LoadBinaryPayloadDeprecated {
    pub fn load() -> Self {
        LoadBinaryPayloadDeprecated
    }
}

impl Payload for LoadBinaryPayloadDeprecated {
    fn base_gas_count(&self) -> Uint128 {
        Uint128::ZERO
    }

    fn execute(&self, _block: &mut dyn ExecutionBlock, _tx: &Transaction) -> Result<(Uint128, String), String> {
        Ok((Uint128::ZERO, "binary".to_string()))
    }
}

/// Historical variant used only within the two deprecated-fail height
/// windows: loading itself fails, preserving a bug-compatible
/// consensus outcome for blocks in that range.
pub struct LoadBinaryPayloadDeprecatedFail;

impl LoadBinaryPayloadDeprecatedFail {
    pub fn load() -> Result<Box<dyn Payload>, String> {
        Err("binary payload rejected in this historical height window".to_string())
    }
}
