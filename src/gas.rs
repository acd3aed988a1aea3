//! Gas accountant.

use crate::address::Address;
use crate::constants::{GAS_COUNT_PER_BYTE, MIN_GAS_COUNT_PER_TRANSACTION};
use crate::error::CoreError;
use crate::state::AccountState;
use crate::uint128::Uint128;

/// `GasCountOfTxBase`: the flat cost every transaction pays regardless of
/// payload kind, plus one unit of gas per payload byte.
pub fn gas_count_of_tx_base(payload_len: usize) -> Result<Uint128, CoreError> {
    let per_byte = Uint128::from(payload_len as u64).checked_mul(Uint128::new(GAS_COUNT_PER_BYTE))?;
    Uint128::new(MIN_GAS_COUNT_PER_TRANSACTION).checked_add(per_byte)
}

/// `PayloadGasLimit(payload)`: gas remaining for a payload's own execution
/// after the base transaction cost and the payload's declared base cost are
/// subtracted from `gasLimit`. Underflow at either subtraction is
/// `ErrOutOfGasLimit`.
pub fn payload_gas_limit(
    gas_limit: Uint128,
    gas_used_base: Uint128,
    payload_base_gas: Uint128,
) -> Result<Uint128, CoreError> {
    let after_base = gas_limit
        .checked_sub(gas_used_base)
        .map_err(|_| CoreError::Execution(crate::error::ExecutionFailure::OutOfGasLimit))?;
    after_base
        .checked_sub(payload_base_gas)
        .map_err(|_| CoreError::Execution(crate::error::ExecutionFailure::OutOfGasLimit))
}

/// `MinBalanceRequired()`: the maximum fee a transaction could possibly
/// charge, used for the up-front balance pre-check.
pub fn min_balance_required(gas_price: Uint128, gas_limit: Uint128) -> Result<Uint128, CoreError> {
    gas_price.checked_mul(gas_limit)
}

/// `gasConsumption`: debits `gasPrice * gas` from `from` and credits the
/// same amount to `coinbase`. Either side failing (most commonly
/// insufficient balance on the debit) is an infrastructure-level failure,
/// by the time this is called the caller has already decided the fee is
/// owed.
pub fn gas_consumption(
    accounts: &mut dyn AccountState,
    from: &Address,
    coinbase: &Address,
    gas_price: Uint128,
    gas: Uint128,
) -> Result<(), CoreError> {
    let fee = gas_price.checked_mul(gas)?;
    if fee.is_zero() {
        return Ok(());
    }
    let from_account = accounts.get_or_create_user_account(from)?;
    from_account.sub_balance(fee)?;
    let coinbase_account = accounts.get_or_create_user_account(coinbase)?;
    coinbase_account.add_balance(fee)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gas_monotonic_in_payload_length() {
        for n in 0..200usize {
            let gas = gas_count_of_tx_base(n).unwrap();
            assert_eq!(gas, Uint128::new(MIN_GAS_COUNT_PER_TRANSACTION + n as u128));
        }
    }

    #[test]
    fn payload_gas_limit_underflows_to_out_of_gas() {
        let result = payload_gas_limit(Uint128::new(100), Uint128::new(50), Uint128::new(100));
        assert!(matches!(
            result,
            Err(CoreError::Execution(crate::error::ExecutionFailure::OutOfGasLimit))
        ));
    }

    #[test]
    fn min_balance_required_multiplies() {
        let required = min_balance_required(Uint128::new(1_000_000), Uint128::new(20_000)).unwrap();
        assert_eq!(required, Uint128::new(20_000_000_000));
    }
}
