//! Account-state and block interfaces.
//!
//! These are external collaborators: a real
//! node supplies production-backed implementations (a trie-backed account
//! store, a real block with header/coinbase/event log). This crate only
//! defines the trait surface the execution engine is written against; an
//! in-memory reference implementation for the crate's own tests lives in
//! `testutil`.

use crate::address::Address;
use crate::error::CoreError;
use crate::events::Event;
use crate::uint128::Uint128;

/// A single account's native-currency balance.
pub trait Account {
    fn balance(&self) -> Uint128;
    fn add_balance(&mut self, amount: Uint128) -> Result<(), CoreError>;
    fn sub_balance(&mut self, amount: Uint128) -> Result<(), CoreError>;
}

/// The account store backing one block. `get_or_create_user_account`
/// creates an empty account on first reference, mirroring
/// `GetOrCreateUserAccount`.
pub trait AccountState {
    fn get_or_create_user_account(&mut self, addr: &Address) -> Result<&mut dyn Account, CoreError>;
}

/// The block a transaction executes against: height, coinbase, a
/// forkable account-state snapshot, and an event log.
///
/// `clone_block`/`merge` implement the Clone/Merge snapshot semantics of
/// `clone_block` must be a full logical copy whose mutations are
/// invisible to the original until `merge` is called on it. `begin`/
/// `rollback` provide the additional nested scope `LocalExecution` uses to
/// guarantee it never mutates the input block.
pub trait ExecutionBlock {
    fn height(&self) -> u64;
    fn coinbase_hash(&self) -> Address;
    fn accounts_mut(&mut self) -> &mut dyn AccountState;
    fn clone_block(&self) -> Box<dyn ExecutionBlock>;
    fn merge(&mut self, other: Box<dyn ExecutionBlock>) -> Result<(), CoreError>;
    fn begin(&mut self);
    fn rollback(&mut self);
    fn record_event(&mut self, hash: [u8; 32], event: Event);

    /// Lets `merge` implementations downcast the snapshot they are given
    /// back to their own concrete type. Every implementor's body is just
    /// `self`.
    fn into_any(self: Box<Self>) -> Box<dyn std::any::Any>;
}
