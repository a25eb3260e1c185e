use serde::{Deserialize, Serialize};

use super::Tip;

/// One consistent read of the three calculator inputs.
///
/// `party_size` is at least 1; the owner of the split counter guarantees it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub bill: f64,
    pub tip: Tip,
    pub party_size: u32,
}

impl Snapshot {
    pub fn new(
        bill: f64,
        tip: Tip,
        party_size: u32,
    ) -> Self {
        Self {
            bill,
            tip,
            party_size,
        }
    }
}
