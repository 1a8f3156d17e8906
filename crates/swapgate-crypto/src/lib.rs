//! # swapgate-crypto
//!
//! Digest construction and secp256k1 recoverable-signature verification for
//! the SwapGate escrow gateway.
//!
//! Everything here is a pure function over bytes — no ledger state, no I/O —
//! so the two signature schemes are testable in isolation. The byte layouts
//! in [`digest`] are normative: any cross-chain client must reproduce them
//! bit-for-bit.

pub mod digest;
pub mod recover;

pub use digest::{approval_digest, claim_digest, keccak256, typed_data_digest};
pub use recover::{eth_address, recover_address, sign_digest};
