//! Consensus-critical constants for the transaction execution core.
//!
//! None of these may change without a height-gated migration; a silent edit
//! here would split honest nodes onto different chains.

/// Upper bound on `gasPrice`. Transactions above this are rejected upstream
/// of this core (mempool admission); the core itself does not enforce it,
/// it only uses it as a sanity ceiling callers may rely on.
pub const TRANSACTION_MAX_GAS_PRICE: u128 = 50_000_000_000;

/// Upper bound on `gasLimit`.
pub const TRANSACTION_MAX_GAS: u128 = 50_000_000_000;

/// Default `gasPrice` used by `NewTransaction` when none (or zero) is supplied.
pub const TRANSACTION_GAS_PRICE: u128 = 1_000_000;

/// Minimum gas every transaction is charged regardless of payload.
pub const MIN_GAS_COUNT_PER_TRANSACTION: u128 = 20_000;

/// Gas charged per byte of `data.payload`.
pub const GAS_COUNT_PER_BYTE: u128 = 1;

/// Base gas for a `delegate` payload.
pub const DELEGATE_BASE_GAS_COUNT: u128 = 20_000;

/// Base gas for a `candidate` payload.
pub const CANDIDATE_BASE_GAS_COUNT: u128 = 20_000;

/// Inclusive block-height windows in which the `binary` payload loader must
/// use `LoadBinaryPayloadDeprecatedFail` instead of `LoadBinaryPayloadDeprecated`,
/// for any height at or below `OptimizeHeight`. Literal consensus constants;
/// do not refactor into a computed range.
pub const BINARY_DEPRECATED_FAIL_WINDOWS: [(u64, u64); 2] = [(280_921, 297_680), (300_087, 302_302)];
