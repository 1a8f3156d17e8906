//! System-wide constants for the SwapGate escrow gateway.

/// Default minimum escrow duration in seconds (1 hour).
pub const DEFAULT_MIN_DURATION_SECS: u64 = 3_600;

/// Default maximum escrow duration in seconds (30 days).
pub const DEFAULT_MAX_DURATION_SECS: u64 = 2_592_000;

/// Default minimum deposit in token base units
/// (one whole token at 6 decimals).
pub const DEFAULT_MIN_DEPOSIT_AMOUNT: u128 = 1_000_000;

/// Default upper bound on claims per settlement batch.
pub const DEFAULT_CLAIMS_CAP: usize = 100;

/// Length of a recoverable secp256k1 signature: r(32) || s(32) || v(1).
pub const SIGNATURE_LEN: usize = 65;
