//! Tip calculation.
//!
//! [`calculator`] holds the pure snapshot-to-result mapping; [`common`] holds
//! amount parsing shared by the bill input pipeline.

pub mod calculator;
pub mod common;

pub use calculator::{calculate, tip_amount};
pub use common::{ParseAmountError, amount_or_zero, parse_amount};
