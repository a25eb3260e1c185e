use serde::{Deserialize, Serialize};

/// Number of people splitting the bill. Never below 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PartySize(u32);

impl PartySize {
    pub const MIN: u32 = 1;

    pub fn new() -> Self {
        Self(Self::MIN)
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    pub fn increment(&mut self) {
        self.0 = self.0.saturating_add(1);
    }

    /// Decrements by one, stopping at [`PartySize::MIN`].
    pub fn decrement(&mut self) {
        if self.0 > Self::MIN {
            self.0 -= 1;
        }
    }

    pub fn reset(&mut self) {
        self.0 = Self::MIN;
    }
}

impl Default for PartySize {
    fn default() -> Self {
        Self::new()
    }
}

impl From<PartySize> for u32 {
    fn from(size: PartySize) -> Self {
        size.0
    }
}
