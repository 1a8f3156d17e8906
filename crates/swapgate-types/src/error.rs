//! Error types for the SwapGate escrow gateway.
//!
//! All errors use the `SG_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Admin / authorization errors
//! - 2xx: Deposit validation errors
//! - 3xx: Deposit signature errors
//! - 4xx: Claim settlement errors
//! - 5xx: Refund / order-state errors
//! - 6xx: External transfer / concurrency errors
//! - 9xx: General / internal errors
//!
//! Every validation failure is a synchronous, atomic rejection: the
//! triggering call leaves ledger, index, balances, and counters untouched.

use thiserror::Error;

use crate::{Address, OrderId, OrderStatus, PayloadHash};

/// Central error enum for all SwapGate operations.
#[derive(Debug, Error)]
pub enum GatewayError {
    // =================================================================
    // Admin / Authorization Errors (1xx)
    // =================================================================
    /// An owner-only operation was called by another principal.
    #[error("SG_ERR_100: Caller {0} is not the owner")]
    NotOwner(Address),

    /// Ownership acceptance from an address that is not the pending successor.
    #[error("SG_ERR_101: Caller {0} is not the pending owner")]
    NotPendingOwner(Address),

    /// Config rejected: minimum duration exceeds maximum.
    #[error("SG_ERR_102: Invalid config: min_duration {min_duration} > max_duration {max_duration}")]
    InvalidConfig { min_duration: u64, max_duration: u64 },

    /// The approver is not in the authorized approver set.
    #[error("SG_ERR_103: Approver {0} is not authorized")]
    UnknownApprover(Address),

    /// The caller is not in the authorized claimer set.
    #[error("SG_ERR_104: Claimer {0} is not authorized")]
    UnknownClaimer(Address),

    // =================================================================
    // Deposit Validation Errors (2xx)
    // =================================================================
    /// The funding proof is inconsistent with the claimed signer / recipient.
    #[error("SG_ERR_200: Malformed funding authorization: {reason}")]
    MalformedAuthorization { reason: String },

    /// The approval's validity window has lapsed.
    #[error("SG_ERR_201: Approval expired at {expires_at}, now {now}")]
    ApprovalExpired { expires_at: u64, now: u64 },

    /// Requested escrow duration outside the configured bounds.
    #[error("SG_ERR_202: Duration {duration}s out of range [{min}s, {max}s]")]
    DurationOutOfRange { duration: u64, min: u64, max: u64 },

    /// An order with this identifier already exists (replay).
    #[error("SG_ERR_203: Order id already used: {0}")]
    DuplicateOrder(OrderId),

    /// This payload commitment already funded an order (replay).
    #[error("SG_ERR_204: Payload hash already used: {0}")]
    DuplicatePayload(PayloadHash),

    /// Deposit amount is zero or below the configured minimum.
    #[error("SG_ERR_205: Deposit amount {amount} below minimum {minimum}")]
    BelowMinimumDeposit { amount: u128, minimum: u128 },

    // =================================================================
    // Deposit Signature Errors (3xx)
    // =================================================================
    /// The approval signature did not recover to the claimed approver.
    #[error("SG_ERR_300: Approval signature does not recover to approver {approver}")]
    InvalidApprovalSignature { approver: Address },

    /// The typed-data signature did not recover to the claimed signer.
    #[error("SG_ERR_301: Order signature does not recover to signer {signer}")]
    InvalidSignerSignature { signer: Address },

    // =================================================================
    // Claim Settlement Errors (4xx)
    // =================================================================
    /// The batch exceeds the configured claims cap.
    #[error("SG_ERR_400: Claim batch of {len} exceeds cap {cap}")]
    BatchTooLarge { len: usize, cap: usize },

    /// A claim in the batch references an order that is not OPEN.
    #[error("SG_ERR_401: Claim {index}: order {order_id} is {status}, not OPEN")]
    ClaimOrderNotOpen {
        index: usize,
        order_id: OrderId,
        status: OrderStatus,
    },

    /// A claim's notary signature did not recover to the order's notary.
    #[error("SG_ERR_402: Claim {index}: notary signature invalid for order {order_id}")]
    InvalidNotarySignature { index: usize, order_id: OrderId },

    // =================================================================
    // Refund / Order-State Errors (5xx)
    // =================================================================
    /// The order is not in the OPEN state required for this operation.
    #[error("SG_ERR_500: Order {order_id} is {status}, not OPEN")]
    OrderNotOpen {
        order_id: OrderId,
        status: OrderStatus,
    },

    /// Refund attempted before the order's expiration.
    #[error("SG_ERR_501: Order {order_id} not yet expired: expires at {expires_at}, now {now}")]
    NotYetExpired {
        order_id: OrderId,
        expires_at: u64,
        now: u64,
    },

    // =================================================================
    // External Transfer / Concurrency Errors (6xx)
    // =================================================================
    /// The token reported a transfer failure; all state changes were rolled
    /// back.
    #[error("SG_ERR_600: Token transfer failed: {reason}")]
    TransferFailed { reason: String },

    /// Nested entry into a guarded operation was rejected.
    #[error("SG_ERR_601: Reentrant call blocked")]
    ReentrancyBlocked,

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("SG_ERR_900: Internal error: {0}")]
    Internal(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, GatewayError>;
