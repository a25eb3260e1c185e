use std::fmt;

use serde::{Deserialize, Serialize};

/// A tip choice offered by the calculator.
///
/// The three fixed kinds are percentages of the bill. `Custom` is a flat
/// currency amount added to the bill as-is, not a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tip {
    #[default]
    None,
    TenPercent,
    FifteenPercent,
    TwentyPercent,
    Custom(u32),
}

impl Tip {
    /// Fixed tip choices, in the order they are offered.
    pub fn fixed() -> &'static [Tip] {
        &[Tip::TenPercent, Tip::FifteenPercent, Tip::TwentyPercent]
    }

    /// Label shown on the tip selector. Empty for `None`.
    pub fn label(&self) -> String {
        match self {
            Tip::None => String::new(),
            Tip::TenPercent => "10%".to_string(),
            Tip::FifteenPercent => "15%".to_string(),
            Tip::TwentyPercent => "20%".to_string(),
            Tip::Custom(amount) => amount.to_string(),
        }
    }

    /// Fraction of the bill for percentage tips, `None` for flat tips.
    pub fn rate(&self) -> Option<f64> {
        match self {
            Tip::TenPercent => Some(0.10),
            Tip::FifteenPercent => Some(0.15),
            Tip::TwentyPercent => Some(0.20),
            Tip::None | Tip::Custom(_) => None,
        }
    }

    /// Parses the text of the custom-tip prompt.
    ///
    /// Only a plain non-negative integer is accepted; anything else yields
    /// `None` and the selection is left untouched by the caller.
    pub fn parse_custom(text: &str) -> Option<Tip> {
        text.trim().parse::<u32>().ok().map(Tip::Custom)
    }
}

impl fmt::Display for Tip {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.label())
    }
}
