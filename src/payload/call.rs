//! `call` payload.
//!
//! `data.payload` is `function_name ++ 0x00 ++ args`; actual contract
//! bytecode execution is out of scope, so `execute` only reports the
//! function name it would have invoked.

use super::Payload;
use crate::constants::MIN_GAS_COUNT_PER_TRANSACTION;
use crate::state::ExecutionBlock;
use crate::transaction::Transaction;
use crate::uint128::Uint128;

pub struct LoadCallPayload {
    function: String,
}

impl LoadCallPayload {
    pub fn load(tx: &Transaction) -> Result<Box<dyn Payload>, String> {
        let payload = tx.data_payload();
        let function_bytes = match payload.iter().position(|&b| b == 0) {
            Some(sep) => &payload[..sep],
            None => payload,
        };
        let function = String::from_utf8(function_bytes.to_vec())
            .map_err(|_| "call payload function name is not valid utf-8".to_string())?;
        Ok(Box::new(LoadCallPayload { function }))
    }
}

impl Payload for LoadCallPayload {
    fn base_gas_count(&self) -> Uint128 {
        Uint128::new(MIN_GAS_COUNT_PER_TRANSACTION)
    }

    fn execute(&self, _block: &mut dyn ExecutionBlock, _tx: &Transaction) -> Result<(Uint128, String), String> {
        Ok((Uint128::ZERO, self.function.clone()))
    }
}
