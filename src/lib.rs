//! Deterministic transaction execution core.
//!
//! Data model, canonical hashing, signing/recovery, gas accounting, payload
//! dispatch, and the `verify_execution` state-transition function. The
//! account-state and block types this core executes against are external
//! collaborators (see `state`), so a host node supplies production-backed
//! implementations; `testutil` only exists for this crate's own tests.

pub mod address;
pub mod codec;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod execution;
pub mod gas;
pub mod hash;
pub mod metrics;
pub mod payload;
pub mod signing;
pub mod state;
pub mod testutil;
pub mod transaction;
pub mod uint128;

pub use address::Address;
pub use config::Config;
pub use error::{CoreError, ExecutionFailure, VerifyError};
pub use execution::{local_execution, verify_execution};
pub use signing::{sign, verify_integrity, Secp256k1Signer, Signer};
pub use state::{Account, AccountState, ExecutionBlock};
pub use transaction::Transaction;
pub use uint128::Uint128;
