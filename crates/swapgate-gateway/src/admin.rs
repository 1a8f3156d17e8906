//! Admin/config store — owner-controlled allow-lists and validation bounds.
//!
//! Every mutator takes the calling principal explicitly and rejects anyone
//! but the current owner. Ownership moves through a two-phase handshake
//! (nominate, then accept) so a mistyped successor address cannot strand
//! administrative control.

use std::collections::HashSet;

use swapgate_types::{constants, Address, GatewayConfig, GatewayError, Result};

/// Owner-controlled sets of authorized approvers and claimers, plus the
/// tunable deposit bounds and the per-batch claims cap.
#[derive(Debug)]
pub struct AdminStore {
    owner: Address,
    pending_owner: Option<Address>,
    approvers: HashSet<Address>,
    claimers: HashSet<Address>,
    config: GatewayConfig,
    claims_cap: usize,
}

impl AdminStore {
    /// Create a store with the given owner and initial config.
    ///
    /// # Errors
    /// Returns [`GatewayError::InvalidConfig`] if the config invariant does
    /// not hold.
    pub fn new(owner: Address, config: GatewayConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            owner,
            pending_owner: None,
            approvers: HashSet::new(),
            claimers: HashSet::new(),
            config,
            claims_cap: constants::DEFAULT_CLAIMS_CAP,
        })
    }

    fn require_owner(&self, caller: Address) -> Result<()> {
        if caller != self.owner {
            return Err(GatewayError::NotOwner(caller));
        }
        Ok(())
    }

    /// Replace the validation bounds.
    pub fn set_config(&mut self, caller: Address, config: GatewayConfig) -> Result<()> {
        self.require_owner(caller)?;
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Add an address to the approver set. Idempotent.
    pub fn add_approver(&mut self, caller: Address, approver: Address) -> Result<()> {
        self.require_owner(caller)?;
        self.approvers.insert(approver);
        Ok(())
    }

    /// Remove an address from the approver set. Idempotent.
    pub fn remove_approver(&mut self, caller: Address, approver: Address) -> Result<()> {
        self.require_owner(caller)?;
        self.approvers.remove(&approver);
        Ok(())
    }

    /// Add an address to the claimer set. Idempotent.
    pub fn add_claimer(&mut self, caller: Address, claimer: Address) -> Result<()> {
        self.require_owner(caller)?;
        self.claimers.insert(claimer);
        Ok(())
    }

    /// Remove an address from the claimer set. Idempotent.
    pub fn remove_claimer(&mut self, caller: Address, claimer: Address) -> Result<()> {
        self.require_owner(caller)?;
        self.claimers.remove(&claimer);
        Ok(())
    }

    /// Replace the per-batch claims cap. A cap of zero blocks all settlement
    /// until raised.
    pub fn set_claims_cap(&mut self, caller: Address, cap: usize) -> Result<()> {
        self.require_owner(caller)?;
        self.claims_cap = cap;
        Ok(())
    }

    /// Phase one of the ownership handshake: nominate a successor.
    pub fn transfer_ownership(&mut self, caller: Address, successor: Address) -> Result<()> {
        self.require_owner(caller)?;
        self.pending_owner = Some(successor);
        Ok(())
    }

    /// Phase two: the nominated successor takes over. Returns the previous
    /// owner.
    ///
    /// # Errors
    /// Returns [`GatewayError::NotPendingOwner`] unless the caller is the
    /// nominated successor.
    pub fn accept_ownership(&mut self, caller: Address) -> Result<Address> {
        if self.pending_owner != Some(caller) {
            return Err(GatewayError::NotPendingOwner(caller));
        }
        let previous = self.owner;
        self.owner = caller;
        self.pending_owner = None;
        Ok(previous)
    }

    // -----------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------

    #[must_use]
    pub fn owner(&self) -> Address {
        self.owner
    }

    #[must_use]
    pub fn pending_owner(&self) -> Option<Address> {
        self.pending_owner
    }

    #[must_use]
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    #[must_use]
    pub fn claims_cap(&self) -> usize {
        self.claims_cap
    }

    #[must_use]
    pub fn is_approver(&self, addr: &Address) -> bool {
        self.approvers.contains(addr)
    }

    #[must_use]
    pub fn is_claimer(&self, addr: &Address) -> bool {
        self.claimers.contains(addr)
    }
}
