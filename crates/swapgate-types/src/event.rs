//! Gateway events — the observable effects of every successful operation.
//!
//! The gateway appends one event per effect to its event log and mirrors it
//! to structured logs. Events are the interface off-chain services watch to
//! track escrow lifecycles.

use serde::{Deserialize, Serialize};

use crate::{Address, GatewayConfig, OrderId};

/// An observable effect emitted by a successful gateway operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GatewayEvent {
    /// A deposit funded via a delegated-transfer authorization.
    Deposit {
        signer: Address,
        order_id: OrderId,
        amount: u128,
        duration: u64,
    },
    /// A deposit funded by a forwarding contract's held balance.
    ProxyDeposit {
        signer: Address,
        order_id: OrderId,
        amount: u128,
        duration: u64,
    },
    /// One order settled inside a claim batch.
    Claim {
        order_id: OrderId,
        recipient: Address,
        amount: u128,
    },
    /// An expired order refunded to its depositor.
    Refund {
        order_id: OrderId,
        refundee: Address,
        amount: u128,
    },
    /// Validation bounds were replaced.
    ConfigUpdated { config: GatewayConfig },
    /// An approver joined the allow-list.
    ApproverAdded { approver: Address },
    /// An approver left the allow-list.
    ApproverRemoved { approver: Address },
    /// A claimer joined the allow-list.
    ClaimerAdded { claimer: Address },
    /// A claimer left the allow-list.
    ClaimerRemoved { claimer: Address },
    /// The per-batch claims cap was replaced.
    ClaimsCapUpdated { cap: usize },
    /// The owner nominated a successor.
    OwnershipTransferStarted { from: Address, to: Address },
    /// The successor accepted ownership.
    OwnershipTransferred { from: Address, to: Address },
}

impl GatewayEvent {
    /// Stable name for log fields and filtering.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Deposit { .. } => "deposit",
            Self::ProxyDeposit { .. } => "proxy_deposit",
            Self::Claim { .. } => "claim",
            Self::Refund { .. } => "refund",
            Self::ConfigUpdated { .. } => "config_updated",
            Self::ApproverAdded { .. } => "approver_added",
            Self::ApproverRemoved { .. } => "approver_removed",
            Self::ClaimerAdded { .. } => "claimer_added",
            Self::ClaimerRemoved { .. } => "claimer_removed",
            Self::ClaimsCapUpdated { .. } => "claims_cap_updated",
            Self::OwnershipTransferStarted { .. } => "ownership_transfer_started",
            Self::OwnershipTransferred { .. } => "ownership_transferred",
        }
    }
}
