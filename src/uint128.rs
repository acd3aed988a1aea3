//! A minimal checked-arithmetic unsigned 128-bit integer.
//!
//! No published crate carries this chain's exact wire format, so it is
//! implemented here as a thin, `Copy` newtype. Every arithmetic operation is
//! checked; there is deliberately no `Add`/`Sub`/`Mul` operator overload, so
//! a caller can never reach for `+` and get silent wraparound.

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Uint128(u128);

impl Uint128 {
    pub const ZERO: Uint128 = Uint128(0);

    pub const fn new(value: u128) -> Self {
        Uint128(value)
    }

    pub const fn as_u128(self) -> u128 {
        self.0
    }

    pub fn checked_add(self, rhs: Uint128) -> Result<Uint128, CoreError> {
        self.0
            .checked_add(rhs.0)
            .map(Uint128)
            .ok_or(CoreError::Uint128Overflow)
    }

    pub fn checked_sub(self, rhs: Uint128) -> Result<Uint128, CoreError> {
        self.0
            .checked_sub(rhs.0)
            .map(Uint128)
            .ok_or(CoreError::Uint128Underflow)
    }

    pub fn checked_mul(self, rhs: Uint128) -> Result<Uint128, CoreError> {
        self.0
            .checked_mul(rhs.0)
            .map(Uint128)
            .ok_or(CoreError::Uint128Overflow)
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Fixed-16-byte big-endian encoding. The only canonical serialization.
    pub fn to_be_bytes(self) -> [u8; 16] {
        self.0.to_be_bytes()
    }

    /// Decodes a fixed-16-byte big-endian slice. Fails if the slice is not
    /// exactly 16 bytes long.
    pub fn from_be_slice(bytes: &[u8]) -> Result<Uint128, CoreError> {
        let array: [u8; 16] = bytes
            .try_into()
            .map_err(|_| CoreError::AccountState("uint128 slice must be exactly 16 bytes".into()))?;
        Ok(Uint128(u128::from_be_bytes(array)))
    }
}

impl From<u128> for Uint128 {
    fn from(value: u128) -> Self {
        Uint128(value)
    }
}

impl From<u64> for Uint128 {
    fn from(value: u64) -> Self {
        Uint128(value as u128)
    }
}

impl std::fmt::Display for Uint128 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_add_overflows() {
        let max = Uint128::new(u128::MAX);
        assert!(matches!(
            max.checked_add(Uint128::new(1)),
            Err(CoreError::Uint128Overflow)
        ));
    }

    #[test]
    fn checked_sub_underflows() {
        let zero = Uint128::ZERO;
        assert!(matches!(
            zero.checked_sub(Uint128::new(1)),
            Err(CoreError::Uint128Underflow)
        ));
    }

    #[test]
    fn be_round_trip() {
        let value = Uint128::new(123_456_789_012_345_678);
        let bytes = value.to_be_bytes();
        assert_eq!(bytes.len(), 16);
        assert_eq!(Uint128::from_be_slice(&bytes).unwrap(), value);
    }

    #[test]
    fn from_be_slice_rejects_wrong_length() {
        assert!(Uint128::from_be_slice(&[0u8; 15]).is_err());
        assert!(Uint128::from_be_slice(&[0u8; 17]).is_err());
    }
}
