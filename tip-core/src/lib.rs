//! Reactive core of the tip calculator.
//!
//! Three input owners ([`inputs`]) publish the bill, the tip selection and
//! the party size. The view model ([`view_model`]) combines them with
//! combine-latest ([`streams`]), maps each snapshot through the pure
//! calculator ([`calculations`]) and, separately, turns logo taps into a
//! sound plus a reset signal ([`reset`]).

pub mod calculations;
pub mod config;
pub mod inputs;
pub mod models;
pub mod reset;
pub mod streams;
pub mod view_model;

pub use config::CalculatorConfig;
pub use models::*;
pub use reset::{AudioError, AudioPlayer, ResetSignal};
pub use view_model::{CalculatorInput, CalculatorOutput, TipCalculator};
