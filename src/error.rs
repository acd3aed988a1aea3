use thiserror::Error;

/// Failures that belong to a single transaction. These never abort the
/// enclosing block: the caller still gets back a gas figure and a recorded
/// event, just no state transfer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExecutionFailure {
    #[error("insufficient balance")]
    InsufficientBalance,
    #[error("out of gas limit")]
    OutOfGasLimit,
    #[error("invalid transaction payload type: {0}")]
    InvalidTxPayloadType(String),
    #[error("payload load failed: {0}")]
    PayloadLoad(String),
    #[error("payload execution failed: {0}")]
    PayloadExecute(String),
}

/// Failures that abort the enclosing block: something outside the
/// transaction's own validity broke (arithmetic, storage, serialization).
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("uint128 arithmetic overflow")]
    Uint128Overflow,
    #[error("uint128 arithmetic underflow")]
    Uint128Underflow,
    #[error("account state error: {0}")]
    AccountState(String),
    #[error("hash pre-image assembly failed: {0}")]
    HashAssembly(String),
    #[error("gas consumption failed: {0}")]
    GasConsumption(String),
    #[error(transparent)]
    Execution(#[from] ExecutionFailure),
}

/// Failures surfaced only by `VerifyIntegrity`. Never bubbled through
/// `VerifyExecution`; signature checking is the caller's job.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VerifyError {
    #[error("invalid chain id: expected {expected}, got {got}")]
    InvalidChainID { expected: u32, got: u32 },
    #[error("invalid transaction hash")]
    InvalidTransactionHash,
    #[error("invalid transaction signer")]
    InvalidTransactionSigner,
    #[error("unsupported signature algorithm: {0}")]
    UnsupportedAlgorithm(u8),
    #[error("signing backend error: {0}")]
    SigningBackend(String),
}
