//! The escrow gateway — deposit authorization, claim settlement, refunds.
//!
//! `EscrowGateway` wires the admin store, the order ledger, the reentrancy
//! guard, and the token seam into the public entry points. Every
//! state-mutating operation is all-or-nothing: validation happens first, the
//! external token call second, and ledger commits either complete fully or
//! are reverted, so a rejected call has zero observable effect.

use std::collections::HashSet;

use swapgate_crypto::{approval_digest, claim_digest, recover_address, typed_data_digest};
use swapgate_types::{
    Address, DomainHash, GatewayConfig, GatewayError, GatewayEvent, Order, OrderId, OrderStatus,
    PayloadHash, Result,
};

use crate::admin::AdminStore;
use crate::clock::Clock;
use crate::guard::ReentrancyGuard;
use crate::ledger::OrderLedger;
use crate::token::{SettlementToken, TransferAuthorization};

/// The dual-signed terms of a new deposit.
///
/// Shared by both deposit entry points; only the funding mechanism differs.
#[derive(Debug, Clone)]
pub struct DepositParams {
    /// Caller-supplied order identifier. Must never have been used.
    pub order_id: OrderId,
    /// The depositor; funds are pulled from and refundable to this address.
    pub signer: Address,
    /// Address whose signature will authorize the claim.
    pub notary: Address,
    /// The off-chain service co-signing this deposit.
    pub approver: Address,
    /// The approver's signature over the approval digest.
    pub order_approval: Vec<u8>,
    /// Unix timestamp the approval lapses at (exclusive).
    pub approval_expiration: u64,
    /// Requested escrow duration in seconds.
    pub duration: u64,
    /// Typed-data domain separator for this gateway deployment.
    pub domain_hash: DomainHash,
    /// Commitment to the order's full human-readable terms.
    pub payload_hash: PayloadHash,
    /// The signer's typed-data signature over the payload commitment.
    pub signer_signature: Vec<u8>,
}

/// One element of a claim settlement batch.
#[derive(Debug, Clone)]
pub struct ClaimRequest {
    pub order_id: OrderId,
    /// The notary's signature over the claim digest for this order.
    pub notary_signature: Vec<u8>,
}

/// The escrow gateway state machine.
pub struct EscrowGateway<T: SettlementToken, C: Clock> {
    address: Address,
    admin: AdminStore,
    ledger: OrderLedger,
    guard: ReentrancyGuard,
    token: T,
    clock: C,
    events: Vec<GatewayEvent>,
}

impl<T: SettlementToken, C: Clock> EscrowGateway<T, C> {
    /// Create a gateway with the given custody address, owner, and initial
    /// config.
    ///
    /// # Errors
    /// Returns [`GatewayError::InvalidConfig`] if the config invariant does
    /// not hold.
    pub fn new(
        address: Address,
        owner: Address,
        config: GatewayConfig,
        token: T,
        clock: C,
    ) -> Result<Self> {
        Ok(Self {
            address,
            admin: AdminStore::new(owner, config)?,
            ledger: OrderLedger::new(),
            guard: ReentrancyGuard::new(),
            token,
            clock,
            events: Vec::new(),
        })
    }

    // =================================================================
    // Deposit authorization protocol
    // =================================================================

    /// Open a new order funded by a signed delegated-transfer authorization.
    ///
    /// Validation order: funding proof consistency, approval window,
    /// duration bounds, approver membership, order/payload replay, approval
    /// signature, signer signature. All must hold or the call has no effect.
    pub fn deposit(
        &mut self,
        params: &DepositParams,
        funding: &TransferAuthorization,
    ) -> Result<()> {
        let _permit = self.guard.enter()?;
        let now = self.clock.now();

        if funding.from != params.signer {
            return Err(GatewayError::MalformedAuthorization {
                reason: format!(
                    "authorization from {} does not match signer {}",
                    funding.from, params.signer
                ),
            });
        }
        if funding.to != self.address {
            return Err(GatewayError::MalformedAuthorization {
                reason: format!(
                    "authorization recipient {} is not the gateway {}",
                    funding.to, self.address
                ),
            });
        }
        self.check_amount(funding.amount)?;
        self.validate_deposit(params, now)?;

        self.commit_deposit(params, funding.amount, now, |gateway| {
            gateway.token.transfer_with_authorization(funding)
        })?;

        tracing::info!(
            order = %params.order_id,
            signer = %params.signer,
            amount = funding.amount,
            duration = params.duration,
            "deposit committed"
        );
        self.emit(GatewayEvent::Deposit {
            signer: params.signer,
            order_id: params.order_id,
            amount: funding.amount,
            duration: params.duration,
        });
        Ok(())
    }

    /// Open a new order funded from the caller's already-held balance.
    ///
    /// Used by the funds-forwarding contract, which cannot know the exact
    /// bridged amount in advance and supplies the balance it actually holds.
    /// The caller must have approved the gateway for at least `amount`.
    /// Validation matches [`deposit`] except the funding proof's from/to
    /// checks, which do not apply.
    ///
    /// [`deposit`]: EscrowGateway::deposit
    pub fn deposit_proxy(
        &mut self,
        caller: Address,
        params: &DepositParams,
        amount: u128,
    ) -> Result<()> {
        let _permit = self.guard.enter()?;
        let now = self.clock.now();

        self.check_amount(amount)?;
        self.validate_deposit(params, now)?;

        let gateway_address = self.address;
        self.commit_deposit(params, amount, now, |gateway| {
            gateway
                .token
                .transfer_from(gateway_address, caller, gateway_address, amount)
        })?;

        tracing::info!(
            order = %params.order_id,
            signer = %params.signer,
            caller = %caller,
            amount,
            duration = params.duration,
            "proxy deposit committed"
        );
        self.emit(GatewayEvent::ProxyDeposit {
            signer: params.signer,
            order_id: params.order_id,
            amount,
            duration: params.duration,
        });
        Ok(())
    }

    fn check_amount(&self, amount: u128) -> Result<()> {
        let minimum = self.admin.config().min_deposit_amount;
        if amount == 0 || amount < minimum {
            return Err(GatewayError::BelowMinimumDeposit { amount, minimum });
        }
        Ok(())
    }

    /// Steps 2–8 of the deposit validation sequence, shared by both entry
    /// points.
    fn validate_deposit(&self, params: &DepositParams, now: u64) -> Result<()> {
        if now >= params.approval_expiration {
            return Err(GatewayError::ApprovalExpired {
                expires_at: params.approval_expiration,
                now,
            });
        }

        let config = self.admin.config();
        if !config.duration_in_range(params.duration) {
            return Err(GatewayError::DurationOutOfRange {
                duration: params.duration,
                min: config.min_duration,
                max: config.max_duration,
            });
        }

        if !self.admin.is_approver(&params.approver) {
            return Err(GatewayError::UnknownApprover(params.approver));
        }
        if self.ledger.order_exists(&params.order_id) {
            return Err(GatewayError::DuplicateOrder(params.order_id));
        }
        if self.ledger.payload_exists(&params.payload_hash) {
            return Err(GatewayError::DuplicatePayload(params.payload_hash));
        }

        let approval = approval_digest(
            &params.order_id,
            params.signer,
            params.notary,
            params.approval_expiration,
            &params.domain_hash,
            &params.payload_hash,
        );
        if recover_address(&approval, &params.order_approval) != Some(params.approver) {
            return Err(GatewayError::InvalidApprovalSignature {
                approver: params.approver,
            });
        }

        let typed = typed_data_digest(&params.domain_hash, &params.payload_hash);
        if recover_address(&typed, &params.signer_signature) != Some(params.signer) {
            return Err(GatewayError::InvalidSignerSignature {
                signer: params.signer,
            });
        }
        Ok(())
    }

    /// Write the ledger entries, run the funding transfer, and either count
    /// the deposit or revert both writes.
    fn commit_deposit(
        &mut self,
        params: &DepositParams,
        amount: u128,
        now: u64,
        fund: impl FnOnce(&mut Self) -> std::result::Result<(), crate::token::TokenError>,
    ) -> Result<()> {
        let order = Order::open(
            now.saturating_add(params.duration),
            params.notary,
            params.signer,
            amount,
        );
        self.ledger
            .record_deposit(params.order_id, params.payload_hash, order)?;

        if let Err(err) = fund(self) {
            // Custody was never established; undo both ledger writes.
            self.ledger
                .revert_deposit(&params.order_id, &params.payload_hash);
            tracing::warn!(
                order = %params.order_id,
                error = %err,
                "funding transfer failed, deposit reverted"
            );
            return Err(GatewayError::TransferFailed {
                reason: err.to_string(),
            });
        }

        self.ledger.increment_signer(params.signer);
        Ok(())
    }

    // =================================================================
    // Claim settlement
    // =================================================================

    /// Settle a batch of notary-signed claims and pay the aggregate to
    /// `recipient`.
    ///
    /// The whole batch is validated before anything moves: any single
    /// invalid claim rejects the entire call with no state change and no
    /// transfer. Returns the total paid out.
    pub fn claim(
        &mut self,
        caller: Address,
        claims: &[ClaimRequest],
        recipient: Address,
    ) -> Result<u128> {
        let _permit = self.guard.enter()?;

        if !self.admin.is_claimer(&caller) {
            return Err(GatewayError::UnknownClaimer(caller));
        }
        let cap = self.admin.claims_cap();
        if claims.len() > cap {
            return Err(GatewayError::BatchTooLarge {
                len: claims.len(),
                cap,
            });
        }

        // Validation pass: statuses and notary signatures, in array order.
        // `accepted` tracks ids earlier in this batch so a duplicate later
        // claim observes COMPLETED, as sequential processing would report.
        let mut accepted: HashSet<OrderId> = HashSet::new();
        let mut total: u128 = 0;
        for (index, claim) in claims.iter().enumerate() {
            let status = if accepted.contains(&claim.order_id) {
                OrderStatus::Completed
            } else {
                self.ledger.status(&claim.order_id)
            };
            if status != OrderStatus::Open {
                return Err(GatewayError::ClaimOrderNotOpen {
                    index,
                    order_id: claim.order_id,
                    status,
                });
            }
            let order = self
                .ledger
                .get(&claim.order_id)
                .ok_or_else(|| GatewayError::Internal("validated order missing".into()))?;

            let digest = claim_digest(&claim.order_id);
            if recover_address(&digest, &claim.notary_signature) != Some(order.notary) {
                return Err(GatewayError::InvalidNotarySignature {
                    index,
                    order_id: claim.order_id,
                });
            }

            accepted.insert(claim.order_id);
            total = total
                .checked_add(order.amount)
                .ok_or_else(|| GatewayError::Internal("claim total overflow".into()))?;
        }

        // One aggregate transfer for the whole batch.
        if total > 0 {
            self.token
                .transfer(self.address, recipient, total)
                .map_err(|err| GatewayError::TransferFailed {
                    reason: err.to_string(),
                })?;
        }

        // Commit pass: every claim validated above, so transitions cannot
        // fail under the held guard.
        for claim in claims {
            let order = self.ledger.complete(&claim.order_id)?;
            self.emit(GatewayEvent::Claim {
                order_id: claim.order_id,
                recipient,
                amount: order.amount,
            });
        }

        tracing::info!(
            claimer = %caller,
            recipient = %recipient,
            count = claims.len(),
            total,
            "claim batch settled"
        );
        Ok(total)
    }

    // =================================================================
    // Refund path
    // =================================================================

    /// Return an expired, unclaimed order's funds to its depositor.
    pub fn refund(&mut self, order_id: OrderId) -> Result<()> {
        let _permit = self.guard.enter()?;
        let now = self.clock.now();

        let status = self.ledger.status(&order_id);
        if status != OrderStatus::Open {
            return Err(GatewayError::OrderNotOpen { order_id, status });
        }
        let order = *self
            .ledger
            .get(&order_id)
            .ok_or_else(|| GatewayError::Internal("open order missing".into()))?;
        if !order.is_expired(now) {
            return Err(GatewayError::NotYetExpired {
                order_id,
                expires_at: order.expiration,
                now,
            });
        }

        self.token
            .transfer(self.address, order.refundee, order.amount)
            .map_err(|err| GatewayError::TransferFailed {
                reason: err.to_string(),
            })?;
        let order = self.ledger.abort(&order_id)?;

        tracing::info!(
            order = %order_id,
            refundee = %order.refundee,
            amount = order.amount,
            "order refunded"
        );
        self.emit(GatewayEvent::Refund {
            order_id,
            refundee: order.refundee,
            amount: order.amount,
        });
        Ok(())
    }

    // =================================================================
    // Admin operations
    // =================================================================

    pub fn set_config(&mut self, caller: Address, config: GatewayConfig) -> Result<()> {
        let _permit = self.guard.enter()?;
        self.admin.set_config(caller, config)?;
        self.emit(GatewayEvent::ConfigUpdated { config });
        Ok(())
    }

    pub fn add_approver(&mut self, caller: Address, approver: Address) -> Result<()> {
        let _permit = self.guard.enter()?;
        self.admin.add_approver(caller, approver)?;
        self.emit(GatewayEvent::ApproverAdded { approver });
        Ok(())
    }

    pub fn remove_approver(&mut self, caller: Address, approver: Address) -> Result<()> {
        let _permit = self.guard.enter()?;
        self.admin.remove_approver(caller, approver)?;
        self.emit(GatewayEvent::ApproverRemoved { approver });
        Ok(())
    }

    pub fn add_claimer(&mut self, caller: Address, claimer: Address) -> Result<()> {
        let _permit = self.guard.enter()?;
        self.admin.add_claimer(caller, claimer)?;
        self.emit(GatewayEvent::ClaimerAdded { claimer });
        Ok(())
    }

    pub fn remove_claimer(&mut self, caller: Address, claimer: Address) -> Result<()> {
        let _permit = self.guard.enter()?;
        self.admin.remove_claimer(caller, claimer)?;
        self.emit(GatewayEvent::ClaimerRemoved { claimer });
        Ok(())
    }

    pub fn set_claims_cap(&mut self, caller: Address, cap: usize) -> Result<()> {
        let _permit = self.guard.enter()?;
        self.admin.set_claims_cap(caller, cap)?;
        self.emit(GatewayEvent::ClaimsCapUpdated { cap });
        Ok(())
    }

    pub fn transfer_ownership(&mut self, caller: Address, successor: Address) -> Result<()> {
        let _permit = self.guard.enter()?;
        self.admin.transfer_ownership(caller, successor)?;
        self.emit(GatewayEvent::OwnershipTransferStarted {
            from: caller,
            to: successor,
        });
        Ok(())
    }

    pub fn accept_ownership(&mut self, caller: Address) -> Result<()> {
        let _permit = self.guard.enter()?;
        let previous = self.admin.accept_ownership(caller)?;
        self.emit(GatewayEvent::OwnershipTransferred {
            from: previous,
            to: caller,
        });
        Ok(())
    }

    // =================================================================
    // Queries (side-effect-free)
    // =================================================================

    /// The gateway's custody address.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    /// Status of an order; `NONE` for identifiers never seen.
    #[must_use]
    pub fn order_status(&self, order_id: &OrderId) -> OrderStatus {
        self.ledger.status(order_id)
    }

    /// Full order record, if it exists.
    #[must_use]
    pub fn order(&self, order_id: &OrderId) -> Option<&Order> {
        self.ledger.get(order_id)
    }

    /// The order a payload commitment funded, if any.
    #[must_use]
    pub fn payload_order(&self, payload_hash: &PayloadHash) -> Option<OrderId> {
        self.ledger.payload_order(payload_hash)
    }

    #[must_use]
    pub fn config(&self) -> &GatewayConfig {
        self.admin.config()
    }

    #[must_use]
    pub fn claims_cap(&self) -> usize {
        self.admin.claims_cap()
    }

    #[must_use]
    pub fn signer_count(&self, signer: &Address) -> u64 {
        self.ledger.signer_count(signer)
    }

    #[must_use]
    pub fn is_authorized_approver(&self, addr: &Address) -> bool {
        self.admin.is_approver(addr)
    }

    #[must_use]
    pub fn is_authorized_claimer(&self, addr: &Address) -> bool {
        self.admin.is_claimer(addr)
    }

    #[must_use]
    pub fn owner(&self) -> Address {
        self.admin.owner()
    }

    #[must_use]
    pub fn pending_owner(&self) -> Option<Address> {
        self.admin.pending_owner()
    }

    /// The append-only event log.
    #[must_use]
    pub fn events(&self) -> &[GatewayEvent] {
        &self.events
    }

    /// The token collaborator.
    #[must_use]
    pub fn token(&self) -> &T {
        &self.token
    }

    /// Mutable token access, for embedders that own the token model.
    pub fn token_mut(&mut self) -> &mut T {
        &mut self.token
    }

    fn emit(&mut self, event: GatewayEvent) {
        tracing::debug!(kind = event.kind(), "event emitted");
        self.events.push(event);
    }
}
