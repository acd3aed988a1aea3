//! Canonical transaction hashing.
//!
//! Assembles the pre-image in exactly the field order of the data model's
//! invariant (1) and returns SHA3-256 of the concatenation. Pure function:
//! same input bytes in, same 32-byte digest out, on every platform.

use sha3::{Digest, Sha3_256};

use crate::address::Address;
use crate::codec::TxData;
use crate::error::CoreError;
use crate::uint128::Uint128;

#[allow(clippy::too_many_arguments)]
pub fn canonical_hash(
    from: &Address,
    to: &Address,
    value: Uint128,
    nonce: u64,
    timestamp: i64,
    data: &TxData,
    chain_id: u32,
    gas_price: Uint128,
    gas_limit: Uint128,
) -> Result<[u8; 32], CoreError> {
    let mut hasher = Sha3_256::new();
    hasher.update(from.as_ref());
    hasher.update(to.as_ref());
    hasher.update(value.to_be_bytes());
    hasher.update(nonce.to_be_bytes());
    hasher.update(timestamp.to_be_bytes());
    hasher.update(data.encode_to_vec());
    hasher.update(chain_id.to_be_bytes());
    hasher.update(gas_price.to_be_bytes());
    hasher.update(gas_limit.to_be_bytes());
    Ok(hasher.finalize().into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_data() -> TxData {
        TxData::new("binary", Vec::new())
    }

    #[test]
    fn deterministic_across_calls() {
        let from = Address::new([1u8; crate::address::ADDRESS_LEN]);
        let to = Address::new([2u8; crate::address::ADDRESS_LEN]);
        let a = canonical_hash(
            &from,
            &to,
            Uint128::new(100),
            1,
            1_700_000_000,
            &sample_data(),
            1,
            Uint128::new(1_000_000),
            Uint128::new(20_000),
        )
        .unwrap();
        let b = canonical_hash(
            &from,
            &to,
            Uint128::new(100),
            1,
            1_700_000_000,
            &sample_data(),
            1,
            Uint128::new(1_000_000),
            Uint128::new(20_000),
        )
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn field_change_changes_hash() {
        let from = Address::new([1u8; crate::address::ADDRESS_LEN]);
        let to = Address::new([2u8; crate::address::ADDRESS_LEN]);
        let base = canonical_hash(
            &from,
            &to,
            Uint128::new(100),
            1,
            1_700_000_000,
            &sample_data(),
            1,
            Uint128::new(1_000_000),
            Uint128::new(20_000),
        )
        .unwrap();
        let changed = canonical_hash(
            &from,
            &to,
            Uint128::new(101),
            1,
            1_700_000_000,
            &sample_data(),
            1,
            Uint128::new(1_000_000),
            Uint128::new(20_000),
        )
        .unwrap();
        assert_ne!(base, changed);
    }
}
