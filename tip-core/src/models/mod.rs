mod party_size;
mod snapshot;
mod tip;
mod tip_result;

pub use party_size::PartySize;
pub use snapshot::Snapshot;
pub use tip::Tip;
pub use tip_result::TipResult;
