//! Configuration for the SwapGate gateway.

use serde::{Deserialize, Serialize};

use crate::{constants, GatewayError, Result};

/// Owner-tunable validation bounds for new deposits.
///
/// Invariant: `min_duration <= max_duration`. Enforced by [`validate`]
/// before any config is accepted.
///
/// [`validate`]: GatewayConfig::validate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Minimum escrow duration in seconds.
    pub min_duration: u64,
    /// Maximum escrow duration in seconds.
    pub max_duration: u64,
    /// Minimum deposit in token base units.
    pub min_deposit_amount: u128,
}

impl GatewayConfig {
    /// Check the internal invariant.
    ///
    /// # Errors
    /// Returns [`GatewayError::InvalidConfig`] if `min_duration > max_duration`.
    pub fn validate(&self) -> Result<()> {
        if self.min_duration > self.max_duration {
            return Err(GatewayError::InvalidConfig {
                min_duration: self.min_duration,
                max_duration: self.max_duration,
            });
        }
        Ok(())
    }

    /// Whether a requested escrow duration is inside the configured bounds.
    #[must_use]
    pub fn duration_in_range(&self, duration: u64) -> bool {
        duration >= self.min_duration && duration <= self.max_duration
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            min_duration: constants::DEFAULT_MIN_DURATION_SECS,
            max_duration: constants::DEFAULT_MAX_DURATION_SECS,
            min_deposit_amount: constants::DEFAULT_MIN_DEPOSIT_AMOUNT,
        }
    }
}
