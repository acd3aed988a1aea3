//! `candidate` payload: register or withdraw a
//! validator candidacy. Actual validator-set bookkeeping is out of scope;
//! this just validates the action byte and charges the fixed base gas.

use super::Payload;
use crate::constants::CANDIDATE_BASE_GAS_COUNT;
use crate::state::ExecutionBlock;
use crate::transaction::Transaction;
use crate::uint128::Uint128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CandidateAction {
    Register,
    Quit,
}

pub struct LoadCandidatePayload {
    action: CandidateAction,
}

impl LoadCandidatePayload {
    pub fn load(tx: &Transaction) -> Result<Box<dyn Payload>, String> {
        let action = match tx.data_payload().first() {
            None | Some(0) => CandidateAction::Register,
            Some(1) => CandidateAction::Quit,
            Some(other) => return Err(format!("invalid candidate action byte: {other}")),
        };
        Ok(Box::new(LoadCandidatePayload { action }))
    }
}

impl Payload for LoadCandidatePayload {
    fn base_gas_count(&self) -> Uint128 {
        Uint128::new(CANDIDATE_BASE_GAS_COUNT)
    }

    fn execute(&self, _block: &mut dyn ExecutionBlock, _tx: &Transaction) -> Result<(Uint128, String), String> {
        let result = match self.action {
            CandidateAction::Register => "candidate registered",
            CandidateAction::Quit => "candidacy withdrawn",
        };
        Ok((Uint128::ZERO, result.to_string()))
    }
}
