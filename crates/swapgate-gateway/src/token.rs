//! Token seam — the external stablecoin contract boundary.
//!
//! The gateway consumes exactly three token capabilities:
//! - a delegated transfer driven by a signed authorization tuple (the
//!   deposit funding proof),
//! - an allowance-based pull (the forwarding contract's proxy path),
//! - a direct transfer out of gateway custody (claims and refunds).
//!
//! [`InMemoryToken`] is the reference implementation used by the test suites
//! and simulations. It enforces balances, allowances, and authorization
//! nonce replay, and can be switched to fail so transfer-failure rollback is
//! testable. Signature and time-window validation of the authorization tuple
//! belong to the real token contract, not to this model.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use swapgate_types::Address;

/// A signed delegated-transfer authorization: the deposit funding proof.
///
/// The gateway checks `from`, `to`, and `amount` against the order terms and
/// forwards the whole tuple to the token, which verifies `signature` itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferAuthorization {
    pub from: Address,
    pub to: Address,
    pub amount: u128,
    pub valid_after: u64,
    pub valid_before: u64,
    pub nonce: [u8; 32],
    pub signature: Vec<u8>,
}

/// Failures reported by a token implementation.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: u128, available: u128 },

    #[error("insufficient allowance: need {needed}, have {available}")]
    InsufficientAllowance { needed: u128, available: u128 },

    #[error("authorization nonce already used")]
    AuthorizationReplayed,

    #[error("transfer rejected: {0}")]
    Rejected(String),
}

/// The stablecoin surface the gateway settles against.
pub trait SettlementToken {
    /// Pull `auth.amount` from `auth.from` to `auth.to` on the strength of
    /// the signed authorization tuple.
    fn transfer_with_authorization(
        &mut self,
        auth: &TransferAuthorization,
    ) -> Result<(), TokenError>;

    /// Allowance-based pull: `spender` moves `amount` from `from` to `to`.
    fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: u128,
    ) -> Result<(), TokenError>;

    /// Direct transfer from `from`'s own balance.
    fn transfer(&mut self, from: Address, to: Address, amount: u128) -> Result<(), TokenError>;
}

/// Balance-map token model for tests and simulations.
#[derive(Debug, Default)]
pub struct InMemoryToken {
    balances: HashMap<Address, u128>,
    allowances: HashMap<(Address, Address), u128>,
    used_nonces: HashSet<(Address, [u8; 32])>,
    fail_next: bool,
}

impl InMemoryToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mint(&mut self, to: Address, amount: u128) {
        *self.balances.entry(to).or_insert(0) += amount;
    }

    #[must_use]
    pub fn balance_of(&self, addr: Address) -> u128 {
        self.balances.get(&addr).copied().unwrap_or(0)
    }

    /// `owner` grants `spender` the right to pull up to `amount`.
    pub fn approve(&mut self, owner: Address, spender: Address, amount: u128) {
        self.allowances.insert((owner, spender), amount);
    }

    /// Force the next transfer call to fail.
    pub fn set_fail_next(&mut self) {
        self.fail_next = true;
    }

    fn check_forced_failure(&mut self) -> Result<(), TokenError> {
        if self.fail_next {
            self.fail_next = false;
            return Err(TokenError::Rejected("forced failure".into()));
        }
        Ok(())
    }

    fn move_balance(&mut self, from: Address, to: Address, amount: u128) -> Result<(), TokenError> {
        let available = self.balance_of(from);
        if available < amount {
            return Err(TokenError::InsufficientBalance {
                needed: amount,
                available,
            });
        }
        *self.balances.entry(from).or_insert(0) -= amount;
        *self.balances.entry(to).or_insert(0) += amount;
        Ok(())
    }
}

impl SettlementToken for InMemoryToken {
    fn transfer_with_authorization(
        &mut self,
        auth: &TransferAuthorization,
    ) -> Result<(), TokenError> {
        self.check_forced_failure()?;
        if !self.used_nonces.insert((auth.from, auth.nonce)) {
            return Err(TokenError::AuthorizationReplayed);
        }
        self.move_balance(auth.from, auth.to, auth.amount)
    }

    fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: u128,
    ) -> Result<(), TokenError> {
        self.check_forced_failure()?;
        let allowance = self.allowances.get(&(from, spender)).copied().unwrap_or(0);
        if allowance < amount {
            return Err(TokenError::InsufficientAllowance {
                needed: amount,
                available: allowance,
            });
        }
        self.allowances.insert((from, spender), allowance - amount);
        self.move_balance(from, to, amount)
    }

    fn transfer(&mut self, from: Address, to: Address, amount: u128) -> Result<(), TokenError> {
        self.check_forced_failure()?;
        self.move_balance(from, to, amount)
    }
}
