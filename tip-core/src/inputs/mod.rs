//! Owners of the three calculator inputs.
//!
//! Each owner holds its own state and publishes changes on an unbounded
//! channel that feeds the combinator. Only the owner mutates its state.

pub mod bill;
pub mod split;
pub mod tip;

pub use bill::{BillEvent, BillInput, BillNormalizer};
pub use split::SplitInput;
pub use tip::TipInput;
