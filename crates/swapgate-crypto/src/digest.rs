//! Message digest construction.
//!
//! Two digest schemes are used system-wide:
//!
//! - **Personal-message** (`"\x19Ethereum Signed Message:\n" || len || msg`):
//!   used for the approver's order approval and the notary's claim
//!   authorization. The prefix domain-separates these signatures so they can
//!   never be reinterpreted as authorizing a different protocol action.
//! - **Typed-data** (`0x19 0x01 || domainSepHash || payloadHash`): the
//!   signer's commitment to the order's full terms, bound to one gateway
//!   deployment by the domain separator.
//!
//! All digests are Keccak-256. The exact byte layouts are normative.

use sha3::{Digest, Keccak256};
use swapgate_types::{Address, DomainHash, OrderId, PayloadHash};

/// Personal-message signing prefix (a domain-separating string followed by
/// the ASCII byte length of the message that follows).
pub const PERSONAL_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n";

/// Typed-data signing prefix.
pub const TYPED_DATA_PREFIX: [u8; 2] = [0x19, 0x01];

/// Byte length of the approval payload:
/// orderId(32) + signer(20) + notary(20) + expiration(32) + domain(32) + payload(32).
pub const APPROVAL_PAYLOAD_LEN: usize = 168;

/// Keccak-256 of arbitrary bytes.
#[must_use]
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Personal-message digest over an arbitrary message.
#[must_use]
fn personal_message_digest(message: &[u8]) -> [u8; 32] {
    let mut buf = Vec::with_capacity(PERSONAL_MESSAGE_PREFIX.len() + 3 + message.len());
    buf.extend_from_slice(PERSONAL_MESSAGE_PREFIX);
    buf.extend_from_slice(message.len().to_string().as_bytes());
    buf.extend_from_slice(message);
    keccak256(&buf)
}

/// Digest the approver signs to co-authorize a deposit.
///
/// Personal-message digest over the 168-byte payload
/// `orderId || signer || notary || approvalExpiration(u256 BE) ||
/// domainSepHash || payloadHash`.
#[must_use]
pub fn approval_digest(
    order_id: &OrderId,
    signer: Address,
    notary: Address,
    approval_expiration: u64,
    domain_hash: &DomainHash,
    payload_hash: &PayloadHash,
) -> [u8; 32] {
    let mut payload = Vec::with_capacity(APPROVAL_PAYLOAD_LEN);
    payload.extend_from_slice(order_id.as_bytes());
    payload.extend_from_slice(signer.as_bytes());
    payload.extend_from_slice(notary.as_bytes());
    // Expiration as a 32-byte big-endian word.
    payload.extend_from_slice(&[0u8; 24]);
    payload.extend_from_slice(&approval_expiration.to_be_bytes());
    payload.extend_from_slice(domain_hash.as_bytes());
    payload.extend_from_slice(payload_hash.as_bytes());
    debug_assert_eq!(payload.len(), APPROVAL_PAYLOAD_LEN);
    personal_message_digest(&payload)
}

/// Digest the depositor signs: a standard structured-data digest binding the
/// payload commitment to this gateway's deployment.
#[must_use]
pub fn typed_data_digest(domain_hash: &DomainHash, payload_hash: &PayloadHash) -> [u8; 32] {
    let mut buf = Vec::with_capacity(2 + 32 + 32);
    buf.extend_from_slice(&TYPED_DATA_PREFIX);
    buf.extend_from_slice(domain_hash.as_bytes());
    buf.extend_from_slice(payload_hash.as_bytes());
    keccak256(&buf)
}

/// Digest the notary signs to authorize release of one order's funds:
/// a personal-message digest over `keccak256(orderId)`.
#[must_use]
pub fn claim_digest(order_id: &OrderId) -> [u8; 32] {
    personal_message_digest(&keccak256(order_id.as_bytes()))
}
