//! Order ledger — the authoritative escrow state.
//!
//! Three maps, none of which ever delete entries:
//! - `orders`: order id → order record. Terminal orders stay forever, so an
//!   id can never be reused.
//! - `payloads`: payload commitment → order id. Write-once; key existence is
//!   itself the replay guard.
//! - `signer_counts`: per-signer count of successful deposits. Monotonic,
//!   informational only.

use std::collections::HashMap;

use swapgate_types::{
    Address, GatewayError, Order, OrderId, OrderStatus, PayloadHash, Result,
};

/// The authoritative map from order identifier to order record.
#[derive(Debug, Default)]
pub struct OrderLedger {
    orders: HashMap<OrderId, Order>,
    payloads: HashMap<PayloadHash, OrderId>,
    signer_counts: HashMap<Address, u64>,
}

impl OrderLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Status of an order; `None` for identifiers never seen.
    #[must_use]
    pub fn status(&self, order_id: &OrderId) -> OrderStatus {
        self.orders
            .get(order_id)
            .map_or(OrderStatus::None, |order| order.status)
    }

    /// Look up an order record.
    #[must_use]
    pub fn get(&self, order_id: &OrderId) -> Option<&Order> {
        self.orders.get(order_id)
    }

    /// The order a payload commitment funded, if any.
    #[must_use]
    pub fn payload_order(&self, payload_hash: &PayloadHash) -> Option<OrderId> {
        self.payloads.get(payload_hash).copied()
    }

    /// Whether this order id has ever been used.
    #[must_use]
    pub fn order_exists(&self, order_id: &OrderId) -> bool {
        self.orders.contains_key(order_id)
    }

    /// Whether this payload commitment has ever funded an order.
    #[must_use]
    pub fn payload_exists(&self, payload_hash: &PayloadHash) -> bool {
        self.payloads.contains_key(payload_hash)
    }

    /// Number of successful deposits attributed to a signer.
    #[must_use]
    pub fn signer_count(&self, signer: &Address) -> u64 {
        self.signer_counts.get(signer).copied().unwrap_or(0)
    }

    /// Total orders ever recorded.
    #[must_use]
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Commit a validated deposit: write the order and its payload index
    /// entry together.
    ///
    /// # Errors
    /// - [`GatewayError::DuplicateOrder`] if the order id was ever used
    /// - [`GatewayError::DuplicatePayload`] if the commitment already funded
    ///   an order
    pub fn record_deposit(
        &mut self,
        order_id: OrderId,
        payload_hash: PayloadHash,
        order: Order,
    ) -> Result<()> {
        if self.orders.contains_key(&order_id) {
            return Err(GatewayError::DuplicateOrder(order_id));
        }
        if self.payloads.contains_key(&payload_hash) {
            return Err(GatewayError::DuplicatePayload(payload_hash));
        }
        self.orders.insert(order_id, order);
        self.payloads.insert(payload_hash, order_id);
        Ok(())
    }

    /// Undo a deposit whose external token transfer failed. Only valid for
    /// the entries written by the immediately preceding `record_deposit`
    /// under the same guard.
    pub fn revert_deposit(&mut self, order_id: &OrderId, payload_hash: &PayloadHash) {
        self.orders.remove(order_id);
        self.payloads.remove(payload_hash);
    }

    /// Count one more successful deposit for a signer.
    pub fn increment_signer(&mut self, signer: Address) {
        *self.signer_counts.entry(signer).or_insert(0) += 1;
    }

    /// Transition an order OPEN → COMPLETED. Returns the updated record.
    ///
    /// # Errors
    /// Returns [`GatewayError::OrderNotOpen`] unless the order is OPEN.
    pub fn complete(&mut self, order_id: &OrderId) -> Result<Order> {
        self.transition(order_id, OrderStatus::Completed)
    }

    /// Transition an order OPEN → ABORTED. Returns the updated record.
    ///
    /// # Errors
    /// Returns [`GatewayError::OrderNotOpen`] unless the order is OPEN.
    pub fn abort(&mut self, order_id: &OrderId) -> Result<Order> {
        self.transition(order_id, OrderStatus::Aborted)
    }

    fn transition(&mut self, order_id: &OrderId, target: OrderStatus) -> Result<Order> {
        let status = self.status(order_id);
        let Some(order) = self.orders.get_mut(order_id) else {
            return Err(GatewayError::OrderNotOpen {
                order_id: *order_id,
                status,
            });
        };
        if !order.status.can_transition_to(target) {
            return Err(GatewayError::OrderNotOpen {
                order_id: *order_id,
                status: order.status,
            });
        }
        order.status = target;
        Ok(*order)
    }
}
