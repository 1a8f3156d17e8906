//! # Order — the escrowed deposit record
//!
//! An `Order` is a single escrowed deposit awaiting claim or refund.
//!
//! ## State Machine
//!
//! ```text
//!              deposit            claim
//!   ┌──────┐ ──────────▶ ┌──────┐ ─────▶ ┌───────────┐
//!   │ NONE │             │ OPEN │        │ COMPLETED │
//!   └──────┘             └──┬───┘        └───────────┘
//!                           │ refund (after expiration)
//!                           ▼
//!                      ┌─────────┐
//!                      │ ABORTED │
//!                      └─────────┘
//! ```
//!
//! ## Security Properties
//!
//! - **Single transition**: OPEN → COMPLETED or OPEN → ABORTED happens at
//!   most once; both targets are terminal
//! - **Immutable amount**: fixed at creation, never mutated
//! - **Never deleted**: terminal orders stay in the ledger forever, so an
//!   order id can never be reused

use serde::{Deserialize, Serialize};

use crate::Address;

/// The lifecycle state of an order.
///
/// `None` is the implicit default for identifiers the ledger has never seen;
/// it is never explicitly stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// The order does not exist.
    None,
    /// Funds are locked in gateway custody, awaiting claim or refund.
    Open,
    /// A notary-signed claim released the funds to a claimant.
    /// **Irreversible.**
    Completed,
    /// The order expired unclaimed and the funds were refunded.
    /// **Irreversible.**
    Aborted,
}

impl OrderStatus {
    /// Can this status transition to the given target?
    #[must_use]
    pub fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Open, Self::Completed | Self::Aborted)
        )
    }

    /// Whether this status is terminal (absorbs all further transitions).
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Aborted)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "NONE"),
            Self::Open => write!(f, "OPEN"),
            Self::Completed => write!(f, "COMPLETED"),
            Self::Aborted => write!(f, "ABORTED"),
        }
    }
}

/// A single escrowed deposit.
///
/// Created only by the deposit authorization protocol; mutated only by claim
/// settlement (→ COMPLETED) or refund (→ ABORTED); never deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Current lifecycle state.
    pub status: OrderStatus,
    /// Absolute unix timestamp (seconds) after which the order is refundable.
    pub expiration: u64,
    /// Address whose signature authorizes a claim against this order.
    pub notary: Address,
    /// Address entitled to the funds if the order is aborted (the original
    /// signer).
    pub refundee: Address,
    /// Locked amount in token base units. Always > 0 once created.
    pub amount: u128,
}

impl Order {
    /// Create a new OPEN order.
    #[must_use]
    pub fn open(expiration: u64, notary: Address, refundee: Address, amount: u128) -> Self {
        Self {
            status: OrderStatus::Open,
            expiration,
            notary,
            refundee,
            amount,
        }
    }

    /// Whether the order is currently claimable / refundable.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status == OrderStatus::Open
    }

    /// Whether the refund window has opened at the given time.
    #[must_use]
    pub fn is_expired(&self, now: u64) -> bool {
        now >= self.expiration
    }
}
