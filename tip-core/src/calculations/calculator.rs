//! Result calculation for the tip calculator.
//!
//! | Tip              | Tip amount        |
//! |------------------|-------------------|
//! | `None`           | 0                 |
//! | `TenPercent`     | bill × 0.10       |
//! | `FifteenPercent` | bill × 0.15       |
//! | `TwentyPercent`  | bill × 0.20       |
//! | `Custom(n)`      | n (flat amount)   |
//!
//! The total bill is the bill plus the tip amount, and the per-person share
//! is the total bill divided by the party size.
//!
//! # Example
//!
//! ```
//! use tip_core::calculations::calculate;
//! use tip_core::{Snapshot, Tip};
//!
//! let result = calculate(&Snapshot::new(100.0, Tip::TenPercent, 2));
//!
//! assert_eq!(result.total_tip, 10.0);
//! assert_eq!(result.total_bill, 110.0);
//! assert_eq!(result.amount_per_person, 55.0);
//! ```

use crate::{Snapshot, Tip, TipResult};

/// Derives the tip, total and per-person share from a snapshot.
///
/// `snapshot.party_size` must be at least 1. No rounding is applied.
pub fn calculate(snapshot: &Snapshot) -> TipResult {
    let total_tip = tip_amount(snapshot.tip, snapshot.bill);
    let total_bill = snapshot.bill + total_tip;
    let amount_per_person = total_bill / f64::from(snapshot.party_size);

    TipResult {
        amount_per_person,
        total_bill,
        total_tip,
    }
}

/// Tip in currency units for the given bill.
pub fn tip_amount(
    tip: Tip,
    bill: f64,
) -> f64 {
    match (tip, tip.rate()) {
        (Tip::Custom(amount), _) => f64::from(amount),
        (_, Some(rate)) => bill * rate,
        (_, None) => 0.0,
    }
}
