/// Network-specific configuration the core needs but does not own: the
/// chain ID a node expects, and the two height gates that switch
/// consensus-compatible behavior. Carried explicitly (rather than read from
/// globals) so mainnet, a testnet, and unit tests can each run the correct
/// gate table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub chain_id: u32,
    /// Height above which the event format switches to the structured
    /// record and the modern `binary` payload loader is used.
    pub optimize_height: u64,
    /// Height above which the stricter balance pre-check (fee + value) and
    /// the execution-gas clamp in `VerifyExecution` apply.
    pub transaction_optimize_height: u64,
}

impl Config {
    pub const fn new(chain_id: u32, optimize_height: u64, transaction_optimize_height: u64) -> Self {
        Self {
            chain_id,
            optimize_height,
            transaction_optimize_height,
        }
    }
}
