//! Payload loader & dispatcher.

mod binary;
mod candidate;
mod call;
mod delegate;
mod deploy;

use crate::config::Config;
use crate::constants::BINARY_DEPRECATED_FAIL_WINDOWS;
use crate::state::ExecutionBlock;
use crate::transaction::Transaction;
use crate::uint128::Uint128;

pub use binary::{LoadBinaryPayload, LoadBinaryPayloadDeprecated, LoadBinaryPayloadDeprecatedFail};
pub use candidate::LoadCandidatePayload;
pub use call::LoadCallPayload;
pub use delegate::LoadDelegatePayload;
pub use deploy::LoadDeployPayload;

/// A decoded, type-specific transaction body. Bytecode/contract execution
/// itself is out of scope beyond this trait surface; concrete kinds supply
/// their own gas accounting and execution semantics.
pub trait Payload {
    fn base_gas_count(&self) -> Uint128;

    /// Executes the payload against the (already-cloned) transaction-scoped
    /// block. Returns the gas the payload itself consumed, a free-form
    /// result string, or an error message on failure.
    fn execute(
        &self,
        block: &mut dyn ExecutionBlock,
        tx: &Transaction,
    ) -> Result<(Uint128, String), String>;
}

/// `LoadPayload(block)`: selects a loader by `data.type`, applying the
/// binary-payload height gate (consensus-critical; the two inclusive
/// windows below must never be refactored into a computed range).
pub fn load_payload(
    tx: &Transaction,
    height: u64,
    config: &Config,
) -> Result<Box<dyn Payload>, String> {
    match tx.data_type() {
        "binary" => load_binary_payload(height, config),
        "deploy" => LoadDeployPayload::load(tx),
        "call" => LoadCallPayload::load(tx),
        "candidate" => LoadCandidatePayload::load(tx),
        "delegate" => LoadDelegatePayload::load(tx),
        other => Err(format!("invalid transaction payload type: {other}")),
    }
}

fn load_binary_payload(height: u64, config: &Config) -> Result<Box<dyn Payload>, String> {
    if height > config.optimize_height {
        Ok(Box::new(LoadBinaryPayload::load()))
    } else if BINARY_DEPRECATED_FAIL_WINDOWS
        .iter()
        .any(|&(start, end)| (start..=end).contains(&height))
    {
        LoadBinaryPayloadDeprecatedFail::load()
    } else {
        Ok(Box::new(LoadBinaryPayloadDeprecated::load()))
    }
}
