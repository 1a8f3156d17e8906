//! # swapgate-gateway
//!
//! The SwapGate escrow gateway: an order ledger guarded by two independent
//! secp256k1 signatures and strict replay protection.
//!
//! An off-chain service negotiates order terms with a user, obtains the
//! user's typed-data signature and its own approval signature, then the user
//! (or a funding proxy) submits the deposit. The gateway validates and
//! records the order, locks funds, and later either settles a batch of
//! notary-signed claims to a claimant or refunds an expired order to its
//! depositor. Claim and refund both gate on the OPEN status and both land in
//! a terminal state, so at most one can ever succeed per order.
//!
//! Module map:
//! - [`gateway`] — the [`EscrowGateway`] facade and its entry points
//! - [`ledger`] — the authoritative order / payload-index / counter maps
//! - [`admin`] — owner-gated allow-lists, config, and the ownership handshake
//! - [`token`] — the external stablecoin seam and its in-memory model
//! - [`guard`] — the call-scoped reentrancy lock
//! - [`clock`] — the time source seam

pub mod admin;
pub mod clock;
pub mod gateway;
pub mod guard;
pub mod ledger;
pub mod token;

pub use admin::AdminStore;
pub use clock::{Clock, ManualClock, SystemClock};
pub use gateway::{ClaimRequest, DepositParams, EscrowGateway};
pub use guard::{EntryPermit, ReentrancyGuard};
pub use ledger::OrderLedger;
pub use token::{InMemoryToken, SettlementToken, TokenError, TransferAuthorization};
