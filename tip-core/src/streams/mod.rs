//! Stream composition used by the calculator.

pub mod combine_latest;
pub mod subscriptions;

pub use combine_latest::{Latest3, combine_latest3};
pub use subscriptions::Subscriptions;
