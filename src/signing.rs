//! Signing / integrity verifier.
//!
//! The data model treats the signature scheme as an external collaborator
//! addressed only through `alg` and `sign` bytes. This crate wires up the
//! one concrete algorithm the reference chain actually ships (`alg == 1`,
//! recoverable ECDSA over secp256k1 with a SHA3-256 address derivation), so
//! its own tests can sign and verify real transactions end to end.

use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{Message, PublicKey, SecretKey, SECP256K1};
use sha3::{Digest, Sha3_256};

use crate::address::{Address, ADDRESS_LEN};
use crate::error::{CoreError, VerifyError};
use crate::transaction::Transaction;

/// The only signature algorithm this core supports end to end.
pub const ALG_SECP256K1: u8 = 1;

const ADDRESS_MAGIC: u8 = 0x19;
const ADDRESS_TYPE_USER: u8 = 0x57;
const ADDRESS_TYPE_CONTRACT: u8 = 0x58;

/// A signer capable of producing a recoverable signature over a 32-byte
/// digest, and of reporting which `alg` tag that signature is tagged with.
pub trait Signer {
    fn algorithm(&self) -> u8;
    fn sign(&self, hash: &[u8; 32]) -> Result<Vec<u8>, VerifyError>;
}

/// Recoverable secp256k1 signer. Signatures are serialized as 65 bytes:
/// a 64-byte compact `(r, s)` pair followed by a single recovery-id byte.
pub struct Secp256k1Signer {
    secret_key: SecretKey,
}

impl Secp256k1Signer {
    pub fn new(secret_key: SecretKey) -> Self {
        Secp256k1Signer { secret_key }
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey::from_secret_key(SECP256K1, &self.secret_key)
    }

    pub fn address(&self) -> Address {
        address_from_public_key(&self.public_key(), ADDRESS_TYPE_USER)
    }
}

impl Signer for Secp256k1Signer {
    fn algorithm(&self) -> u8 {
        ALG_SECP256K1
    }

    fn sign(&self, hash: &[u8; 32]) -> Result<Vec<u8>, VerifyError> {
        let message = Message::from_digest(*hash);
        let signature = SECP256K1.sign_ecdsa_recoverable(&message, &self.secret_key);
        let (recovery_id, compact) = signature.serialize_compact();
        let mut out = Vec::with_capacity(65);
        out.extend_from_slice(&compact);
        out.push(recovery_id.to_i32() as u8);
        Ok(out)
    }
}

/// Derives an address from an uncompressed public key the way the source
/// chain does: SHA3-256 of the 64-byte uncompressed point (no `0x04`
/// prefix), keep the last 20 bytes, and wrap with a magic byte, a type
/// byte, and a 4-byte checksum over the preceding 22 bytes.
fn address_from_public_key(public_key: &PublicKey, account_type: u8) -> Address {
    let uncompressed = public_key.serialize_uncompressed();
    let digest = Sha3_256::digest(&uncompressed[1..]);
    let mut bytes = [0u8; ADDRESS_LEN];
    bytes[0] = ADDRESS_MAGIC;
    bytes[1] = account_type;
    bytes[2..22].copy_from_slice(&digest[digest.len() - 20..]);
    let checksum = Sha3_256::digest(&bytes[0..22]);
    bytes[22..26].copy_from_slice(&checksum[0..4]);
    Address::new(bytes)
}

/// `Sign(signer)`: computes the canonical hash, signs it, and stores
/// `hash`/`alg`/`sign` on the transaction.
pub fn sign(tx: &mut Transaction, signer: &impl Signer) -> Result<(), CoreError> {
    let hash = tx.compute_hash()?;
    let signature = signer
        .sign(&hash)
        .map_err(|e| CoreError::HashAssembly(e.to_string()))?;
    tx.apply_signature(hash, signer.algorithm(), signature);
    Ok(())
}

/// `VerifyIntegrity(expectedChainID)`.
pub fn verify_integrity(tx: &Transaction, expected_chain_id: u32) -> Result<(), VerifyError> {
    if tx.chain_id() != expected_chain_id {
        return Err(VerifyError::InvalidChainID {
            expected: expected_chain_id,
            got: tx.chain_id(),
        });
    }

    let recomputed = tx
        .compute_hash()
        .map_err(|e| VerifyError::SigningBackend(e.to_string()))?;
    let stored = tx.hash().ok_or(VerifyError::InvalidTransactionHash)?;
    if recomputed != stored {
        return Err(VerifyError::InvalidTransactionHash);
    }

    let alg = tx.alg().ok_or(VerifyError::InvalidTransactionSigner)?;
    if alg != ALG_SECP256K1 {
        return Err(VerifyError::UnsupportedAlgorithm(alg));
    }

    let sign = tx.sign_bytes().ok_or(VerifyError::InvalidTransactionSigner)?;
    let recovered = recover_address(&stored, sign)?;
    if recovered != tx.from() {
        return Err(VerifyError::InvalidTransactionSigner);
    }
    Ok(())
}

fn recover_address(hash: &[u8; 32], sign: &[u8]) -> Result<Address, VerifyError> {
    if sign.len() != 65 {
        return Err(VerifyError::InvalidTransactionSigner);
    }
    let recovery_id = RecoveryId::from_i32(sign[64] as i32)
        .map_err(|_| VerifyError::InvalidTransactionSigner)?;
    let signature = RecoverableSignature::from_compact(&sign[0..64], recovery_id)
        .map_err(|_| VerifyError::InvalidTransactionSigner)?;
    let message = Message::from_digest(*hash);
    let public_key = SECP256K1
        .recover_ecdsa(&message, &signature)
        .map_err(|_| VerifyError::InvalidTransactionSigner)?;
    Ok(address_from_public_key(&public_key, ADDRESS_TYPE_USER))
}

/// `GenerateContractAddress()`: the address a `deploy` payload gives
/// its new contract, derived from `SHA3-256(from.bytes ∥ be8(nonce))`.
pub fn generate_contract_address(from: &Address, nonce: u64) -> Address {
    let mut hasher = Sha3_256::new();
    hasher.update(from.as_ref());
    hasher.update(nonce.to_be_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; ADDRESS_LEN];
    bytes[0] = ADDRESS_MAGIC;
    bytes[1] = ADDRESS_TYPE_CONTRACT;
    bytes[2..22].copy_from_slice(&digest[digest.len() - 20..]);
    let checksum = Sha3_256::digest(&bytes[0..22]);
    bytes[22..26].copy_from_slice(&checksum[0..4]);
    Address::new(bytes)
}
