//! In-memory `Account`/`AccountState`/`ExecutionBlock` implementations.
//!
//! Not meant for production use: balances live in a plain `HashMap` and
//! nothing is persisted. This is the fixture the crate's own unit tests and
//! the `tests/` integration suite build transactions against.

use std::any::Any;
use std::collections::HashMap;

use crate::address::Address;
use crate::config::Config;
use crate::error::CoreError;
use crate::events::Event;
use crate::execution::run_with_payload;
use crate::payload::Payload;
use crate::state::{Account, AccountState, ExecutionBlock};
use crate::transaction::Transaction;
use crate::uint128::Uint128;

#[derive(Debug, Clone, Default)]
pub struct InMemoryAccount {
    balance: Uint128,
}

impl InMemoryAccount {
    pub fn with_balance(balance: Uint128) -> Self {
        InMemoryAccount { balance }
    }
}

impl Account for InMemoryAccount {
    fn balance(&self) -> Uint128 {
        self.balance
    }

    fn add_balance(&mut self, amount: Uint128) -> Result<(), CoreError> {
        self.balance = self.balance.checked_add(amount)?;
        Ok(())
    }

    fn sub_balance(&mut self, amount: Uint128) -> Result<(), CoreError> {
        self.balance = self.balance.checked_sub(amount)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryAccountState {
    accounts: HashMap<Address, InMemoryAccount>,
}

impl InMemoryAccountState {
    pub fn new() -> Self {
        InMemoryAccountState::default()
    }

    /// Seeds an account with a starting balance, for test setup.
    pub fn seed(&mut self, addr: Address, balance: Uint128) {
        self.accounts.insert(addr, InMemoryAccount::with_balance(balance));
    }

    pub fn balance_of(&self, addr: &Address) -> Uint128 {
        self.accounts.get(addr).map(Account::balance).unwrap_or(Uint128::ZERO)
    }
}

impl AccountState for InMemoryAccountState {
    fn get_or_create_user_account(&mut self, addr: &Address) -> Result<&mut dyn Account, CoreError> {
        Ok(self.accounts.entry(*addr).or_insert_with(InMemoryAccount::default))
    }
}

/// A block whose account state is an in-memory map and whose event log is
/// a plain `Vec`, keyed by transaction hash for lookup in assertions.
pub struct InMemoryBlock {
    height: u64,
    coinbase: Address,
    accounts: InMemoryAccountState,
    events: Vec<([u8; 32], Event)>,
    snapshots: Vec<InMemoryAccountState>,
}

impl InMemoryBlock {
    pub fn new(height: u64, coinbase: Address) -> Self {
        InMemoryBlock {
            height,
            coinbase,
            accounts: InMemoryAccountState::new(),
            events: Vec::new(),
            snapshots: Vec::new(),
        }
    }

    pub fn accounts(&self) -> &InMemoryAccountState {
        &self.accounts
    }

    pub fn accounts_mut_ref(&mut self) -> &mut InMemoryAccountState {
        &mut self.accounts
    }

    pub fn events(&self) -> &[([u8; 32], Event)] {
        &self.events
    }

    pub fn event_for(&self, hash: &[u8; 32]) -> Option<&Event> {
        self.events.iter().find(|(h, _)| h == hash).map(|(_, e)| e)
    }
}

impl ExecutionBlock for InMemoryBlock {
    fn height(&self) -> u64 {
        self.height
    }

    fn coinbase_hash(&self) -> Address {
        self.coinbase
    }

    fn accounts_mut(&mut self) -> &mut dyn AccountState {
        &mut self.accounts
    }

    fn clone_block(&self) -> Box<dyn ExecutionBlock> {
        Box::new(InMemoryBlock {
            height: self.height,
            coinbase: self.coinbase,
            accounts: self.accounts.clone(),
            events: Vec::new(),
            snapshots: Vec::new(),
        })
    }

    fn merge(&mut self, other: Box<dyn ExecutionBlock>) -> Result<(), CoreError> {
        let other = other
            .into_any()
            .downcast::<InMemoryBlock>()
            .map_err(|_| CoreError::AccountState("merge: mismatched block implementation".to_string()))?;
        self.accounts = other.accounts;
        Ok(())
    }

    fn begin(&mut self) {
        self.snapshots.push(self.accounts.clone());
    }

    fn rollback(&mut self) {
        if let Some(snapshot) = self.snapshots.pop() {
            self.accounts = snapshot;
        }
    }

    fn record_event(&mut self, hash: [u8; 32], event: Event) {
        self.events.push((hash, event));
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Drives `verify_execution`'s steps 6–14 from an already-loaded payload,
/// bypassing `load_payload`'s fixed five-tag dispatch table. Lets tests pair
/// `HighGasPayload`/`FailingPayload` with `verify_execution`'s real gas
/// clamp and rollback logic instead of only exercising those structs'
/// `execute` methods in isolation.
pub fn drive_execution_with_payload(
    block: &mut dyn ExecutionBlock,
    tx: &Transaction,
    config: &Config,
    gas_used_base: Uint128,
    payload: Box<dyn Payload>,
) -> Result<Uint128, CoreError> {
    let height = block.height();
    let coinbase = block.coinbase_hash();
    run_with_payload(block, tx, config, height, &coinbase, gas_used_base, payload)
}

/// A payload whose `execute` reports far more gas than any reasonable
/// `gas_limit`, for exercising the post-`TransactionOptimizeHeight`
/// execution-gas clamp. Also mutates the cloned block it is handed, so a
/// test can confirm the clamp's discard (not just the gas clamp) actually
/// happens.
pub struct HighGasPayload {
    pub gas_execution: Uint128,
}

impl Payload for HighGasPayload {
    fn base_gas_count(&self) -> Uint128 {
        Uint128::ZERO
    }

    fn execute(&self, block: &mut dyn ExecutionBlock, tx: &Transaction) -> Result<(Uint128, String), String> {
        block
            .accounts_mut()
            .get_or_create_user_account(&tx.to())
            .map_err(|e| e.to_string())?
            .add_balance(tx.value())
            .map_err(|e| e.to_string())?;
        Ok((self.gas_execution, "high gas execution".to_string()))
    }
}

/// A payload whose `execute` always fails, after mutating the cloned block
/// it was handed, for exercising rollback-on-payload-error.
pub struct FailingPayload;

impl Payload for FailingPayload {
    fn base_gas_count(&self) -> Uint128 {
        Uint128::ZERO
    }

    fn execute(&self, block: &mut dyn ExecutionBlock, tx: &Transaction) -> Result<(Uint128, String), String> {
        let _ = block
            .accounts_mut()
            .get_or_create_user_account(&tx.to())
            .and_then(|account| account.add_balance(tx.value()));
        Err("payload execution failed".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(byte: u8) -> Address {
        Address::from_slice(&[byte; crate::address::ADDRESS_LEN]).unwrap()
    }

    #[test]
    fn merge_copies_clone_state_into_original() {
        let mut block = InMemoryBlock::new(10, addr(0xAA));
        block.accounts_mut_ref().seed(addr(0x01), Uint128::new(1_000));

        let mut clone = block.clone_block();
        clone
            .accounts_mut()
            .get_or_create_user_account(&addr(0x01))
            .unwrap()
            .sub_balance(Uint128::new(400))
            .unwrap();

        block.merge(clone).unwrap();
        assert_eq!(block.accounts().balance_of(&addr(0x01)), Uint128::new(600));
    }

    #[test]
    fn rollback_restores_pre_begin_balances() {
        let mut block = InMemoryBlock::new(10, addr(0xAA));
        block.accounts_mut_ref().seed(addr(0x01), Uint128::new(1_000));

        block.begin();
        block
            .accounts_mut()
            .get_or_create_user_account(&addr(0x01))
            .unwrap()
            .add_balance(Uint128::new(500))
            .unwrap();
        assert_eq!(block.accounts().balance_of(&addr(0x01)), Uint128::new(1_500));

        block.rollback();
        assert_eq!(block.accounts().balance_of(&addr(0x01)), Uint128::new(1_000));
    }

    #[test]
    fn record_event_is_retrievable_by_hash() {
        let mut block = InMemoryBlock::new(10, addr(0xAA));
        let event = Event {
            topic: crate::events::TOPIC_EXECUTE_TX_SUCCESS,
            data: vec![1, 2, 3],
        };
        block.record_event([7u8; 32], event);
        assert_eq!(block.event_for(&[7u8; 32]).unwrap().data, vec![1, 2, 3]);
    }
}
