//! `deploy` payload.
//!
//! `data.payload` is the contract's init code in full; this core does not
//! execute that bytecode (out of scope), it only charges for its size and
//! names the new contract.

use super::Payload;
use crate::constants::GAS_COUNT_PER_BYTE;
use crate::signing::generate_contract_address;
use crate::state::ExecutionBlock;
use crate::transaction::Transaction;
use crate::uint128::Uint128;

pub struct LoadDeployPayload {
    code: Vec<u8>,
}

impl LoadDeployPayload {
    pub fn load(tx: &Transaction) -> Result<Box<dyn Payload>, String> {
        Ok(Box::new(LoadDeployPayload {
            code: tx.data_payload().to_vec(),
        }))
    }
}

impl Payload for LoadDeployPayload {
    fn base_gas_count(&self) -> Uint128 {
        Uint128::from(self.code.len() as u64)
            .checked_mul(Uint128::new(GAS_COUNT_PER_BYTE))
            .unwrap_or(Uint128::ZERO)
    }

    fn execute(&self, _block: &mut dyn ExecutionBlock, tx: &Transaction) -> Result<(Uint128, String), String> {
        let contract = generate_contract_address(&tx.from(), tx.nonce());
        Ok((Uint128::ZERO, contract.to_string()))
    }
}
