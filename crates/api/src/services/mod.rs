//! Application services.
//!
//! Services own the cross-entity logic the repositories stay out of:
//! catalog validation before an order write, policy checks on reads, the
//! status state machine on updates.

pub mod orders;

pub use orders::OrderService;
