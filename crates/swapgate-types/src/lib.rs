//! # swapgate-types
//!
//! Shared types, errors, and configuration for the **SwapGate** escrow
//! gateway.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`Address`], [`OrderId`], [`PayloadHash`], [`DomainHash`]
//! - **Order model**: [`Order`], [`OrderStatus`]
//! - **Configuration**: [`GatewayConfig`]
//! - **Events**: [`GatewayEvent`]
//! - **Errors**: [`GatewayError`] with `SG_ERR_` prefix codes
//! - **Constants**: system-wide limits and defaults

pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod ids;
pub mod order;

// Re-export all primary types at crate root for ergonomic imports:
//   use swapgate_types::{Order, OrderStatus, GatewayError, ...};

pub use config::*;
pub use error::*;
pub use event::*;
pub use ids::*;
pub use order::*;

// Constants are accessed via `swapgate_types::constants::FOO`
// (not re-exported to avoid name collisions).
