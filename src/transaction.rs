//! The transaction value object.
//!
//! Immutable after construction except for `hash`, `alg`, and `sign`, which
//! are filled in by signing.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::address::Address;
use crate::codec::{TxData, WireTransaction};
use crate::constants::{MIN_GAS_COUNT_PER_TRANSACTION, TRANSACTION_GAS_PRICE};
use crate::error::CoreError;
use crate::hash::canonical_hash;
use crate::uint128::Uint128;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    hash: Option<[u8; 32]>,
    from: Address,
    to: Address,
    value: Uint128,
    nonce: u64,
    timestamp: i64,
    data: TxData,
    chain_id: u32,
    gas_price: Uint128,
    gas_limit: Uint128,
    alg: Option<u8>,
    sign: Option<Vec<u8>>,
}

impl Transaction {
    /// `NewTransaction`: applies the default `gasPrice`/`gasLimit` fallback
    /// rules and stamps `timestamp` with the current wall clock. `hash`,
    /// `alg`, and `sign` stay empty until the transaction is signed.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        chain_id: u32,
        from: Address,
        to: Address,
        value: Uint128,
        nonce: u64,
        payload_type: impl Into<String>,
        payload: impl Into<Vec<u8>>,
        gas_price: Option<Uint128>,
        gas_limit: Option<Uint128>,
    ) -> Self {
        let gas_price = match gas_price {
            Some(price) if !price.is_zero() => price,
            _ => Uint128::new(TRANSACTION_GAS_PRICE),
        };
        let gas_limit = match gas_limit {
            Some(limit) if !limit.is_zero() => limit,
            _ => Uint128::new(MIN_GAS_COUNT_PER_TRANSACTION),
        };
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0);

        Transaction {
            hash: None,
            from,
            to,
            value,
            nonce,
            timestamp,
            data: TxData::new(payload_type, payload),
            chain_id,
            gas_price,
            gas_limit,
            alg: None,
            sign: None,
        }
    }

    pub fn hash(&self) -> Option<[u8; 32]> {
        self.hash
    }

    pub fn from(&self) -> Address {
        self.from
    }

    pub fn to(&self) -> Address {
        self.to
    }

    pub fn value(&self) -> Uint128 {
        self.value
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn data_type(&self) -> &str {
        &self.data.r#type
    }

    pub fn data_payload(&self) -> &[u8] {
        &self.data.payload
    }

    pub fn chain_id(&self) -> u32 {
        self.chain_id
    }

    pub fn gas_price(&self) -> Uint128 {
        self.gas_price
    }

    pub fn gas_limit(&self) -> Uint128 {
        self.gas_limit
    }

    pub fn alg(&self) -> Option<u8> {
        self.alg
    }

    pub fn sign_bytes(&self) -> Option<&[u8]> {
        self.sign.as_deref()
    }

    /// Recomputes the canonical hash from the current field values.
    pub fn compute_hash(&self) -> Result<[u8; 32], CoreError> {
        canonical_hash(
            &self.from,
            &self.to,
            self.value,
            self.nonce,
            self.timestamp,
            &self.data,
            self.chain_id,
            self.gas_price,
            self.gas_limit,
        )
    }

    /// Sets `hash`, `alg`, and `sign`; called only from the signing
    /// protocol, never directly by callers.
    pub(crate) fn apply_signature(&mut self, hash: [u8; 32], alg: u8, sign: Vec<u8>) {
        self.hash = Some(hash);
        self.alg = Some(alg);
        self.sign = Some(sign);
    }

    /// Bridges this transaction to the wire-level record. `alg`
    /// defaults to `0` on the wire if the transaction has not been signed.
    pub fn to_wire(&self) -> WireTransaction {
        WireTransaction {
            hash: self.hash.map(|h| h.to_vec()).unwrap_or_default(),
            from: self.from.as_ref().to_vec(),
            to: self.to.as_ref().to_vec(),
            value: self.value.to_be_bytes().to_vec(),
            nonce: self.nonce,
            timestamp: self.timestamp,
            data: Some(self.data.clone()),
            chain_id: self.chain_id,
            gas_price: self.gas_price.to_be_bytes().to_vec(),
            gas_limit: self.gas_limit.to_be_bytes().to_vec(),
            alg: self.alg.map(|a| a as u32).unwrap_or(0),
            sign: self.sign.clone().unwrap_or_default(),
        }
    }

    /// Decodes a wire-level record back into a `Transaction`. Fails if
    /// `value`, `gas_price`, or `gas_limit` are not exactly 16 bytes, or if
    /// `from`/`to` are not valid addresses.
    pub fn from_wire(wire: &WireTransaction) -> Result<Transaction, CoreError> {
        let from = Address::from_slice(&wire.from)
            .ok_or_else(|| CoreError::AccountState("invalid `from` address length".into()))?;
        let to = Address::from_slice(&wire.to)
            .ok_or_else(|| CoreError::AccountState("invalid `to` address length".into()))?;
        let value = Uint128::from_be_slice(&wire.value)?;
        let gas_price = Uint128::from_be_slice(&wire.gas_price)?;
        let gas_limit = Uint128::from_be_slice(&wire.gas_limit)?;
        let data = wire.data.clone().unwrap_or_else(|| TxData::new("", Vec::new()));

        let hash = if wire.hash.is_empty() {
            None
        } else {
            let array: [u8; 32] = wire
                .hash
                .as_slice()
                .try_into()
                .map_err(|_| CoreError::AccountState("invalid hash length".into()))?;
            Some(array)
        };

        Ok(Transaction {
            hash,
            from,
            to,
            value,
            nonce: wire.nonce,
            timestamp: wire.timestamp,
            data,
            chain_id: wire.chain_id,
            gas_price,
            gas_limit,
            alg: if wire.alg == 0 && wire.sign.is_empty() {
                None
            } else {
                Some(wire.alg as u8)
            },
            sign: if wire.sign.is_empty() { None } else { Some(wire.sign.clone()) },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(byte: u8) -> Address {
        Address::new([byte; crate::address::ADDRESS_LEN])
    }

    #[test]
    fn defaults_applied_when_missing() {
        let tx = Transaction::new(1, addr(1), addr(2), Uint128::new(100), 0, "binary", Vec::new(), None, None);
        assert_eq!(tx.gas_price(), Uint128::new(TRANSACTION_GAS_PRICE));
        assert_eq!(tx.gas_limit(), Uint128::new(MIN_GAS_COUNT_PER_TRANSACTION));
        assert!(tx.hash().is_none());
    }

    #[test]
    fn defaults_applied_when_zero() {
        let tx = Transaction::new(
            1,
            addr(1),
            addr(2),
            Uint128::new(100),
            0,
            "binary",
            Vec::new(),
            Some(Uint128::ZERO),
            Some(Uint128::ZERO),
        );
        assert_eq!(tx.gas_price(), Uint128::new(TRANSACTION_GAS_PRICE));
        assert_eq!(tx.gas_limit(), Uint128::new(MIN_GAS_COUNT_PER_TRANSACTION));
    }

    #[test]
    fn wire_round_trip() {
        let mut tx = Transaction::new(
            7,
            addr(1),
            addr(2),
            Uint128::new(555),
            42,
            "call",
            vec![1, 2, 3],
            Some(Uint128::new(2_000_000)),
            Some(Uint128::new(40_000)),
        );
        tx.apply_signature([9u8; 32], 1, vec![5; 65]);

        let wire = tx.to_wire();
        let round_tripped = Transaction::from_wire(&wire).unwrap();
        assert_eq!(tx, round_tripped);
    }
}
