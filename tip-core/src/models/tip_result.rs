use serde::{Deserialize, Serialize};

/// Amounts derived from a [`Snapshot`](super::Snapshot).
///
/// Values are unrounded; formatting for display happens in the presentation
/// layer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TipResult {
    /// Total bill divided by the party size.
    pub amount_per_person: f64,

    /// Bill plus tip.
    pub total_bill: f64,

    /// Tip amount in currency units.
    pub total_tip: f64,
}
