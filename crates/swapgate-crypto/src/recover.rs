//! Recoverable secp256k1 signature handling.
//!
//! Signatures are 65 bytes: `r(32) || s(32) || v(1)`, with `v` accepted in
//! both raw ({0, 1}) and offset ({27, 28}) form. Recovery never panics:
//! malformed input of any kind yields `None`, and callers treat every
//! failure identically as "invalid signature".
//!
//! High-S signatures are rejected to close the ECDSA malleability channel;
//! without this, a third party could mint a second valid encoding of an
//! already-seen signature.

use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use swapgate_types::{constants::SIGNATURE_LEN, Address};

use crate::digest::keccak256;

/// Derive the 20-byte account address from a secp256k1 public key:
/// the last 20 bytes of the Keccak-256 of the uncompressed point body.
#[must_use]
pub fn eth_address(key: &VerifyingKey) -> Address {
    let point = key.to_encoded_point(false);
    let hash = keccak256(&point.as_bytes()[1..]);
    let mut out = [0u8; 20];
    out.copy_from_slice(&hash[12..]);
    Address(out)
}

/// Recover the signing address from a 32-byte digest and a 65-byte
/// recoverable signature.
///
/// Returns `None` for any malformed signature: wrong length, invalid scalar
/// encoding, high-S, invalid recovery id, or a point that does not recover.
#[must_use]
pub fn recover_address(digest: &[u8; 32], signature: &[u8]) -> Option<Address> {
    if signature.len() != SIGNATURE_LEN {
        return None;
    }
    let sig = Signature::from_slice(&signature[..64]).ok()?;
    if sig.normalize_s().is_some() {
        // High-S: the malleable twin of a canonical signature.
        return None;
    }
    let v = signature[64];
    let v = if v >= 27 { v - 27 } else { v };
    let recovery_id = RecoveryId::from_byte(v)?;
    let key = VerifyingKey::recover_from_prehash(digest, &sig, recovery_id).ok()?;
    Some(eth_address(&key))
}

/// Produce a 65-byte recoverable signature over a digest.
///
/// Used by the off-chain approver, signer, and notary services, and by the
/// test suites. The `v` byte uses the conventional 27/28 offset.
///
/// # Errors
/// Returns the underlying ECDSA error if signing fails.
pub fn sign_digest(key: &SigningKey, digest: &[u8; 32]) -> Result<Vec<u8>, k256::ecdsa::Error> {
    let (sig, recovery_id) = key.sign_prehash_recoverable(digest)?;
    let mut out = Vec::with_capacity(SIGNATURE_LEN);
    out.extend_from_slice(&sig.to_bytes());
    out.push(recovery_id.to_byte() + 27);
    Ok(out)
}
