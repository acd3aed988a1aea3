//! `delegate` payload: delegate or cancel a
//! vote to a candidate. Actual delegation bookkeeping is out of scope; this
//! just validates the action byte and charges the fixed base gas.

use super::Payload;
use crate::constants::DELEGATE_BASE_GAS_COUNT;
use crate::state::ExecutionBlock;
use crate::transaction::Transaction;
use crate::uint128::Uint128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DelegateAction {
    Delegate,
    CancelDelegate,
}

pub struct LoadDelegatePayload {
    action: DelegateAction,
}

impl LoadDelegatePayload {
    pub fn load(tx: &Transaction) -> Result<Box<dyn Payload>, String> {
        let action = match tx.data_payload().first() {
            None | Some(0) => DelegateAction::Delegate,
            Some(1) => DelegateAction::CancelDelegate,
            Some(other) => return Err(format!("invalid delegate action byte: {other}")),
        };
        Ok(Box::new(LoadDelegatePayload { action }))
    }
}

impl Payload for LoadDelegatePayload {
    fn base_gas_count(&self) -> Uint128 {
        Uint128::new(DELEGATE_BASE_GAS_COUNT)
    }

    fn execute(&self, _block: &mut dyn ExecutionBlock, _tx: &Transaction) -> Result<(Uint128, String), String> {
        let result = match self.action {
            DelegateAction::Delegate => "delegated",
            DelegateAction::CancelDelegate => "delegate cancelled",
        };
        Ok((Uint128::ZERO, result.to_string()))
    }
}
