//! Property-based invariants that must hold across arbitrary inputs, not
//! just the fixed scenarios in `execution_tests`.

use proptest::prelude::*;

use nebulas_tx_core::address::{Address, ADDRESS_LEN};
use nebulas_tx_core::gas::gas_count_of_tx_base;
use nebulas_tx_core::signing::{sign, verify_integrity, Secp256k1Signer};
use nebulas_tx_core::transaction::Transaction;
use nebulas_tx_core::uint128::Uint128;

fn addr(byte: u8) -> Address {
    Address::new([byte; ADDRESS_LEN])
}

fn any_signer() -> Secp256k1Signer {
    let (secret_key, _) = secp256k1::generate_keypair(&mut rand::thread_rng());
    Secp256k1Signer::new(secret_key)
}

proptest! {
    /// Hashing the same transaction twice always yields the same digest.
    #[test]
    fn hash_is_deterministic(value in 0u128..u128::MAX, nonce in 0u64..u64::MAX) {
        let tx = Transaction::new(
            1, addr(1), addr(2), Uint128::new(value), nonce, "binary", Vec::new(), None, None,
        );
        prop_assert_eq!(tx.compute_hash().unwrap(), tx.compute_hash().unwrap());
    }

    /// Base gas is strictly non-decreasing in payload length, and always at
    /// least the minimum per-transaction floor.
    #[test]
    fn base_gas_is_monotonic_in_payload_length(len_a in 0usize..4096, len_b in 0usize..4096) {
        let gas_a = gas_count_of_tx_base(len_a).unwrap();
        let gas_b = gas_count_of_tx_base(len_b).unwrap();
        if len_a <= len_b {
            prop_assert!(gas_a <= gas_b);
        } else {
            prop_assert!(gas_a >= gas_b);
        }
        prop_assert!(gas_a >= Uint128::new(20_000));
    }

    /// A transaction signed by its own `from` key always verifies, for any
    /// value/nonce/chain id combination.
    #[test]
    fn sign_then_verify_round_trips(value in 0u128..u128::MAX, nonce in 0u64..u64::MAX, chain_id in 1u32..u32::MAX) {
        let signer = any_signer();
        let mut tx = Transaction::new(
            chain_id, signer.address(), addr(2), Uint128::new(value), nonce, "binary", Vec::new(), None, None,
        );
        sign(&mut tx, &signer).unwrap();
        prop_assert!(verify_integrity(&tx, chain_id).is_ok());
    }

    /// Changing the chain id used for verification always fails integrity
    /// checking, for any two distinct ids.
    #[test]
    fn wrong_chain_id_always_rejected(chain_id in 1u32..u32::MAX, offset in 1u32..u32::MAX) {
        let signer = any_signer();
        let mut tx = Transaction::new(
            chain_id, signer.address(), addr(2), Uint128::new(1), 0, "binary", Vec::new(), None, None,
        );
        sign(&mut tx, &signer).unwrap();
        let wrong = chain_id.wrapping_add(offset);
        prop_assume!(wrong != chain_id);
        prop_assert!(verify_integrity(&tx, wrong).is_err());
    }

    /// The wire round trip preserves every field, for arbitrary value/nonce
    /// combinations, both before and after signing.
    #[test]
    fn wire_round_trip_preserves_fields(value in 0u128..u128::MAX, nonce in 0u64..u64::MAX, gas_limit in 20_000u128..1_000_000) {
        let signer = any_signer();
        let mut tx = Transaction::new(
            7, signer.address(), addr(4), Uint128::new(value), nonce, "call", vec![1, 2, 3],
            Some(Uint128::new(2_000_000)), Some(Uint128::new(gas_limit)),
        );
        sign(&mut tx, &signer).unwrap();
        let wire = tx.to_wire();
        let round_tripped = Transaction::from_wire(&wire).unwrap();
        prop_assert_eq!(tx, round_tripped);
    }
}
