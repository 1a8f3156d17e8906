//! End-to-end gateway scenarios: full order lifecycles driven through the
//! public API with real secp256k1 keys, a manual clock, and the in-memory
//! token model.

use k256::ecdsa::SigningKey;
use rand::rngs::OsRng;

use swapgate_crypto::{approval_digest, claim_digest, eth_address, sign_digest, typed_data_digest};
use swapgate_gateway::{
    ClaimRequest, Clock, DepositParams, EscrowGateway, InMemoryToken, ManualClock,
    TransferAuthorization,
};
use swapgate_types::{
    Address, DomainHash, GatewayConfig, GatewayError, GatewayEvent, OrderId, OrderStatus,
    PayloadHash,
};

const GATEWAY_ADDR: Address = Address([0xee; 20]);
const OWNER: Address = Address([0x01; 20]);
const CLAIMER: Address = Address([0x02; 20]);
const TREASURY: Address = Address([0x03; 20]);
const START: u64 = 1_700_000_000;

const MIN_DURATION: u64 = 3_600;
const MAX_DURATION: u64 = 2_592_000;
const MIN_AMOUNT: u128 = 1_000_000;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

struct Actor {
    key: SigningKey,
    address: Address,
}

impl Actor {
    fn random() -> Self {
        let key = SigningKey::random(&mut OsRng);
        let address = eth_address(key.verifying_key());
        Self { key, address }
    }
}

struct Harness {
    gateway: EscrowGateway<InMemoryToken, ManualClock>,
    clock: ManualClock,
    user: Actor,
    service: Actor,
    notary: Actor,
}

impl Harness {
    fn new() -> Self {
        init_tracing();
        let user = Actor::random();
        let service = Actor::random();
        let notary = Actor::random();

        let clock = ManualClock::new(START);
        let mut token = InMemoryToken::new();
        token.mint(user.address, 100 * MIN_AMOUNT);

        let config = GatewayConfig {
            min_duration: MIN_DURATION,
            max_duration: MAX_DURATION,
            min_deposit_amount: MIN_AMOUNT,
        };
        let mut gateway =
            EscrowGateway::new(GATEWAY_ADDR, OWNER, config, token, clock.clone()).unwrap();
        gateway.add_approver(OWNER, service.address).unwrap();
        gateway.add_claimer(OWNER, CLAIMER).unwrap();

        Self {
            gateway,
            clock,
            user,
            service,
            notary,
        }
    }

    /// Build a dual-signed deposit and its matching funding authorization.
    fn signed_deposit(
        &self,
        order_byte: u8,
        amount: u128,
        duration: u64,
    ) -> (DepositParams, TransferAuthorization) {
        let order_id = OrderId([order_byte; 32]);
        let payload_hash = PayloadHash([order_byte ^ 0xff; 32]);
        let domain_hash = DomainHash([0xd0; 32]);
        let approval_expiration = self.clock.now() + 900;

        let approval = approval_digest(
            &order_id,
            self.user.address,
            self.notary.address,
            approval_expiration,
            &domain_hash,
            &payload_hash,
        );
        let typed = typed_data_digest(&domain_hash, &payload_hash);

        let params = DepositParams {
            order_id,
            signer: self.user.address,
            notary: self.notary.address,
            approver: self.service.address,
            order_approval: sign_digest(&self.service.key, &approval).unwrap(),
            approval_expiration,
            duration,
            domain_hash,
            payload_hash,
            signer_signature: sign_digest(&self.user.key, &typed).unwrap(),
        };
        let funding = TransferAuthorization {
            from: self.user.address,
            to: GATEWAY_ADDR,
            amount,
            valid_after: 0,
            valid_before: approval_expiration,
            nonce: [order_byte; 32],
            signature: vec![0u8; 65],
        };
        (params, funding)
    }

    fn open(&mut self, order_byte: u8, amount: u128, duration: u64) -> OrderId {
        let (params, funding) = self.signed_deposit(order_byte, amount, duration);
        self.gateway.deposit(&params, &funding).unwrap();
        params.order_id
    }

    fn claim_for(&self, order_id: OrderId) -> ClaimRequest {
        let digest = claim_digest(&order_id);
        ClaimRequest {
            order_id,
            notary_signature: sign_digest(&self.notary.key, &digest).unwrap(),
        }
    }
}

// ---------------------------------------------------------------------------
// Full lifecycles
// ---------------------------------------------------------------------------

#[test]
fn deposit_then_claim_lifecycle() {
    let mut h = Harness::new();
    let user_start = h.gateway.token().balance_of(h.user.address);

    let order_id = h.open(1, 3 * MIN_AMOUNT, MIN_DURATION);
    assert_eq!(h.gateway.order_status(&order_id), OrderStatus::Open);
    assert_eq!(
        h.gateway.token().balance_of(h.user.address),
        user_start - 3 * MIN_AMOUNT
    );

    let total = h
        .gateway
        .claim(CLAIMER, &[h.claim_for(order_id)], TREASURY)
        .unwrap();
    assert_eq!(total, 3 * MIN_AMOUNT);
    assert_eq!(h.gateway.order_status(&order_id), OrderStatus::Completed);
    assert_eq!(h.gateway.token().balance_of(TREASURY), 3 * MIN_AMOUNT);
    assert_eq!(h.gateway.token().balance_of(GATEWAY_ADDR), 0);

    // Terminal: the same order can never be claimed or refunded again.
    let err = h
        .gateway
        .claim(CLAIMER, &[h.claim_for(order_id)], TREASURY)
        .unwrap_err();
    assert!(matches!(err, GatewayError::ClaimOrderNotOpen { .. }));
    h.clock.set(START + MAX_DURATION + 1);
    let err = h.gateway.refund(order_id).unwrap_err();
    assert!(matches!(err, GatewayError::OrderNotOpen { .. }));
}

#[test]
fn deposit_then_refund_lifecycle() {
    let mut h = Harness::new();
    let user_start = h.gateway.token().balance_of(h.user.address);

    let order_id = h.open(1, MIN_AMOUNT, MIN_DURATION);
    h.clock.set(START + MIN_DURATION);
    h.gateway.refund(order_id).unwrap();

    assert_eq!(h.gateway.order_status(&order_id), OrderStatus::Aborted);
    assert_eq!(h.gateway.token().balance_of(h.user.address), user_start);

    // Refund is also terminal.
    let err = h
        .gateway
        .claim(CLAIMER, &[h.claim_for(order_id)], TREASURY)
        .unwrap_err();
    assert!(matches!(
        err,
        GatewayError::ClaimOrderNotOpen {
            status: OrderStatus::Aborted,
            ..
        }
    ));
}

#[test]
fn independent_orders_settle_independently() {
    let mut h = Harness::new();
    let a = h.open(1, MIN_AMOUNT, MIN_DURATION);
    let b = h.open(2, 2 * MIN_AMOUNT, MAX_DURATION);

    // Claim `a`, let `b` expire and refund it.
    h.gateway.claim(CLAIMER, &[h.claim_for(a)], TREASURY).unwrap();
    h.clock.set(START + MAX_DURATION);
    h.gateway.refund(b).unwrap();

    assert_eq!(h.gateway.order_status(&a), OrderStatus::Completed);
    assert_eq!(h.gateway.order_status(&b), OrderStatus::Aborted);
    assert_eq!(h.gateway.token().balance_of(GATEWAY_ADDR), 0);
}

// ---------------------------------------------------------------------------
// Boundary behavior
// ---------------------------------------------------------------------------

#[test]
fn duration_bounds_are_inclusive() {
    let mut h = Harness::new();

    let (params, funding) = h.signed_deposit(1, MIN_AMOUNT, MIN_DURATION - 1);
    assert!(matches!(
        h.gateway.deposit(&params, &funding),
        Err(GatewayError::DurationOutOfRange { .. })
    ));
    let (params, funding) = h.signed_deposit(1, MIN_AMOUNT, MAX_DURATION + 1);
    assert!(matches!(
        h.gateway.deposit(&params, &funding),
        Err(GatewayError::DurationOutOfRange { .. })
    ));

    h.open(1, MIN_AMOUNT, MIN_DURATION);
    h.open(2, MIN_AMOUNT, MAX_DURATION);
}

#[test]
fn minimum_amount_is_inclusive() {
    let mut h = Harness::new();
    let (params, funding) = h.signed_deposit(1, MIN_AMOUNT - 1, MIN_DURATION);
    assert!(matches!(
        h.gateway.deposit(&params, &funding),
        Err(GatewayError::BelowMinimumDeposit { .. })
    ));
    h.open(1, MIN_AMOUNT, MIN_DURATION);
}

#[test]
fn refund_allowed_exactly_at_expiration() {
    let mut h = Harness::new();
    let order_id = h.open(1, MIN_AMOUNT, MIN_DURATION);

    h.clock.set(START + MIN_DURATION - 1);
    assert!(matches!(
        h.gateway.refund(order_id),
        Err(GatewayError::NotYetExpired { .. })
    ));

    h.clock.set(START + MIN_DURATION);
    h.gateway.refund(order_id).unwrap();
}

#[test]
fn expired_order_remains_claimable_until_refunded() {
    let mut h = Harness::new();
    let order_id = h.open(1, MIN_AMOUNT, MIN_DURATION);
    h.clock.set(START + MIN_DURATION + 10_000);

    // Expiry gates refunds only; the claim path never looks at it.
    let total = h
        .gateway
        .claim(CLAIMER, &[h.claim_for(order_id)], TREASURY)
        .unwrap();
    assert_eq!(total, MIN_AMOUNT);
}

// ---------------------------------------------------------------------------
// Batch settlement
// ---------------------------------------------------------------------------

#[test]
fn batch_pays_sum_in_one_movement() {
    let mut h = Harness::new();
    let ids: Vec<OrderId> = (1..=5)
        .map(|i| h.open(i, u128::from(i) * MIN_AMOUNT, MIN_DURATION))
        .collect();
    let claims: Vec<ClaimRequest> = ids.iter().map(|id| h.claim_for(*id)).collect();

    let total = h.gateway.claim(CLAIMER, &claims, TREASURY).unwrap();
    assert_eq!(total, 15 * MIN_AMOUNT);
    assert_eq!(h.gateway.token().balance_of(TREASURY), 15 * MIN_AMOUNT);
    for id in &ids {
        assert_eq!(h.gateway.order_status(id), OrderStatus::Completed);
    }
}

#[test]
fn over_cap_batch_rejected_wholesale() {
    let mut h = Harness::new();
    let a = h.open(1, MIN_AMOUNT, MIN_DURATION);
    let b = h.open(2, MIN_AMOUNT, MIN_DURATION);
    let c = h.open(3, MIN_AMOUNT, MIN_DURATION);
    h.gateway.set_claims_cap(OWNER, 2).unwrap();

    let claims = vec![h.claim_for(a), h.claim_for(b), h.claim_for(c)];
    let err = h.gateway.claim(CLAIMER, &claims, TREASURY).unwrap_err();
    assert!(matches!(err, GatewayError::BatchTooLarge { len: 3, cap: 2 }));
    for id in [a, b, c] {
        assert_eq!(h.gateway.order_status(&id), OrderStatus::Open);
    }
    assert_eq!(h.gateway.token().balance_of(TREASURY), 0);

    // Split into two conforming batches.
    h.gateway
        .claim(CLAIMER, &[h.claim_for(a), h.claim_for(b)], TREASURY)
        .unwrap();
    h.gateway.claim(CLAIMER, &[h.claim_for(c)], TREASURY).unwrap();
    assert_eq!(h.gateway.token().balance_of(TREASURY), 3 * MIN_AMOUNT);
}

#[test]
fn one_bad_signature_poisons_whole_batch() {
    let mut h = Harness::new();
    let a = h.open(1, MIN_AMOUNT, MIN_DURATION);
    let b = h.open(2, MIN_AMOUNT, MIN_DURATION);

    let mut bad = h.claim_for(b);
    bad.notary_signature[40] ^= 0x01;
    let err = h
        .gateway
        .claim(CLAIMER, &[h.claim_for(a), bad], TREASURY)
        .unwrap_err();
    assert!(matches!(
        err,
        GatewayError::InvalidNotarySignature { index: 1, .. }
    ));
    assert_eq!(h.gateway.order_status(&a), OrderStatus::Open);
    assert_eq!(h.gateway.order_status(&b), OrderStatus::Open);
    assert_eq!(h.gateway.token().balance_of(TREASURY), 0);
}

#[test]
fn notary_binding_is_per_order() {
    let mut h = Harness::new();
    let order_id = h.open(1, MIN_AMOUNT, MIN_DURATION);

    // A different notary key signs a well-formed claim digest.
    let rogue = Actor::random();
    let digest = claim_digest(&order_id);
    let claim = ClaimRequest {
        order_id,
        notary_signature: sign_digest(&rogue.key, &digest).unwrap(),
    };
    let err = h.gateway.claim(CLAIMER, &[claim], TREASURY).unwrap_err();
    assert!(matches!(err, GatewayError::InvalidNotarySignature { .. }));
}

// ---------------------------------------------------------------------------
// Replay and tamper resistance
// ---------------------------------------------------------------------------

#[test]
fn deposit_replay_is_blocked_both_ways() {
    let mut h = Harness::new();
    let (params, funding) = h.signed_deposit(1, MIN_AMOUNT, MIN_DURATION);
    h.gateway.deposit(&params, &funding).unwrap();

    // Whole-request replay trips the order-id guard.
    let err = h.gateway.deposit(&params, &funding).unwrap_err();
    assert!(matches!(err, GatewayError::DuplicateOrder(_)));

    // Replay survives settlement: terminal orders pin their id forever.
    h.gateway
        .claim(CLAIMER, &[h.claim_for(params.order_id)], TREASURY)
        .unwrap();
    let err = h.gateway.deposit(&params, &funding).unwrap_err();
    assert!(matches!(err, GatewayError::DuplicateOrder(_)));
}

#[test]
fn approval_does_not_transfer_between_orders() {
    let mut h = Harness::new();
    let (good, _) = h.signed_deposit(1, MIN_AMOUNT, MIN_DURATION);

    // Graft order 1's approval onto an otherwise valid order 2.
    let (mut grafted, funding) = h.signed_deposit(2, MIN_AMOUNT, MIN_DURATION);
    grafted.order_approval = good.order_approval;
    let err = h.gateway.deposit(&grafted, &funding).unwrap_err();
    assert!(matches!(err, GatewayError::InvalidApprovalSignature { .. }));
}

#[test]
fn every_tampered_approval_byte_rejected() {
    let mut h = Harness::new();
    let (params, funding) = h.signed_deposit(1, MIN_AMOUNT, MIN_DURATION);

    for position in [0usize, 17, 31, 32, 50, 63, 64] {
        let mut tampered = params.clone();
        tampered.order_approval[position] ^= 0x01;
        let err = h.gateway.deposit(&tampered, &funding).unwrap_err();
        assert!(
            matches!(err, GatewayError::InvalidApprovalSignature { .. }),
            "byte {position} should invalidate the approval"
        );
    }
    // The untouched original still goes through.
    h.gateway.deposit(&params, &funding).unwrap();
}

#[test]
fn changing_terms_invalidates_signatures() {
    let mut h = Harness::new();
    let (params, funding) = h.signed_deposit(1, MIN_AMOUNT, MIN_DURATION);

    // Swap in a different notary: the approval digest no longer matches.
    let mut altered = params.clone();
    altered.notary = Actor::random().address;
    let err = h.gateway.deposit(&altered, &funding).unwrap_err();
    assert!(matches!(err, GatewayError::InvalidApprovalSignature { .. }));

    // Stretch the approval window: same story.
    let mut altered = params.clone();
    altered.approval_expiration += 1;
    let err = h.gateway.deposit(&altered, &funding).unwrap_err();
    assert!(matches!(err, GatewayError::InvalidApprovalSignature { .. }));

    // Swap the payload commitment: both signatures break, the replay guard
    // never even gets a say.
    let mut altered = params;
    altered.payload_hash = PayloadHash([0x99; 32]);
    let err = h.gateway.deposit(&altered, &funding).unwrap_err();
    assert!(matches!(err, GatewayError::InvalidApprovalSignature { .. }));
}

// ---------------------------------------------------------------------------
// Proxy funding
// ---------------------------------------------------------------------------

#[test]
fn proxy_deposit_lifecycle_with_adjusted_amount() {
    let mut h = Harness::new();
    let forwarder = Actor::random().address;
    h.gateway.token_mut().mint(forwarder, 10 * MIN_AMOUNT);
    h.gateway
        .token_mut()
        .approve(forwarder, GATEWAY_ADDR, 10 * MIN_AMOUNT);

    // Bridged amount came in slightly under the approved figure.
    let (params, _) = h.signed_deposit(1, 2 * MIN_AMOUNT, MIN_DURATION);
    let received = 2 * MIN_AMOUNT - 137;
    h.gateway.deposit_proxy(forwarder, &params, received).unwrap();

    let order = h.gateway.order(&params.order_id).unwrap();
    assert_eq!(order.amount, received);
    // Refunds go to the signer, never the forwarder.
    assert_eq!(order.refundee, h.user.address);

    let total = h
        .gateway
        .claim(CLAIMER, &[h.claim_for(params.order_id)], TREASURY)
        .unwrap();
    assert_eq!(total, received);
}

// ---------------------------------------------------------------------------
// Administration
// ---------------------------------------------------------------------------

#[test]
fn revoked_approver_stops_new_deposits_only() {
    let mut h = Harness::new();
    let order_id = h.open(1, MIN_AMOUNT, MIN_DURATION);

    h.gateway.remove_approver(OWNER, h.service.address).unwrap();
    let (params, funding) = h.signed_deposit(2, MIN_AMOUNT, MIN_DURATION);
    assert!(matches!(
        h.gateway.deposit(&params, &funding),
        Err(GatewayError::UnknownApprover(_))
    ));

    // The already-open order still settles.
    h.gateway
        .claim(CLAIMER, &[h.claim_for(order_id)], TREASURY)
        .unwrap();
}

#[test]
fn ownership_handshake_end_to_end() {
    let mut h = Harness::new();
    let successor = Address([0x77; 20]);

    h.gateway.transfer_ownership(OWNER, successor).unwrap();
    // Nomination alone changes nothing.
    assert_eq!(h.gateway.owner(), OWNER);
    h.gateway.set_claims_cap(OWNER, 10).unwrap();

    h.gateway.accept_ownership(successor).unwrap();
    assert_eq!(h.gateway.owner(), successor);
    assert!(matches!(
        h.gateway.set_claims_cap(OWNER, 5),
        Err(GatewayError::NotOwner(_))
    ));
    h.gateway.set_claims_cap(successor, 5).unwrap();
}

#[test]
fn zero_claims_cap_freezes_settlement() {
    let mut h = Harness::new();
    let order_id = h.open(1, MIN_AMOUNT, MIN_DURATION);
    h.gateway.set_claims_cap(OWNER, 0).unwrap();

    let err = h
        .gateway
        .claim(CLAIMER, &[h.claim_for(order_id)], TREASURY)
        .unwrap_err();
    assert!(matches!(err, GatewayError::BatchTooLarge { len: 1, cap: 0 }));

    // The empty batch still conforms and still pays nothing.
    assert_eq!(h.gateway.claim(CLAIMER, &[], TREASURY).unwrap(), 0);

    h.gateway.set_claims_cap(OWNER, 1).unwrap();
    h.gateway
        .claim(CLAIMER, &[h.claim_for(order_id)], TREASURY)
        .unwrap();
}

// ---------------------------------------------------------------------------
// Event log
// ---------------------------------------------------------------------------

#[test]
fn lifecycle_event_sequence() {
    let mut h = Harness::new();
    let order_id = h.open(1, MIN_AMOUNT, MIN_DURATION);
    h.gateway
        .claim(CLAIMER, &[h.claim_for(order_id)], TREASURY)
        .unwrap();
    let refunded = h.open(2, MIN_AMOUNT, MIN_DURATION);
    h.clock.set(START + MIN_DURATION);
    h.gateway.refund(refunded).unwrap();

    let kinds: Vec<&str> = h.gateway.events().iter().map(GatewayEvent::kind).collect();
    assert_eq!(
        kinds,
        vec![
            "approver_added",
            "claimer_added",
            "deposit",
            "claim",
            "deposit",
            "refund",
        ]
    );

    assert!(matches!(
        h.gateway.events().last(),
        Some(GatewayEvent::Refund {
            order_id: id,
            amount: MIN_AMOUNT,
            ..
        }) if *id == refunded
    ));
}
