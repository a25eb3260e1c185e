//! Binds the calculator inputs to its outputs.
//!
//! [`TipCalculator::transform`] takes the four input streams and returns the
//! result stream, the reset stream and the [`Subscriptions`] that keep both
//! alive.
//!
//! ```
//! use std::sync::Arc;
//!
//! use tip_core::inputs::{SplitInput, TipInput};
//! use tip_core::reset::SilentAudio;
//! use tip_core::view_model::{CalculatorInput, TipCalculator};
//! use tip_core::Tip;
//!
//! # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
//! let (bill_tx, bill) = tokio::sync::mpsc::unbounded_channel();
//! let (mut tips, tip) = TipInput::new();
//! let (mut split, party_size) = SplitInput::new();
//! let (_logo_tx, logo_taps) = tokio::sync::mpsc::unbounded_channel();
//!
//! let calculator = TipCalculator::new(Arc::new(SilentAudio));
//! let mut output = calculator.transform(CalculatorInput { bill, tip, party_size, logo_taps });
//!
//! bill_tx.send(100.0).unwrap();
//! assert_eq!(output.updates.recv().await.unwrap().total_bill, 100.0);
//!
//! tips.select(Tip::TenPercent);
//! split.increment();
//! output.updates.recv().await.unwrap();
//! let result = output.updates.recv().await.unwrap();
//! assert_eq!(result.amount_per_person, 55.0);
//! # });
//! ```

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};
use tracing::debug;

use crate::calculations::calculate;
use crate::config::CalculatorConfig;
use crate::reset::{AudioPlayer, ResetCoordinator, ResetSignal};
use crate::streams::{Subscriptions, combine_latest3};
use crate::{Snapshot, Tip, TipResult};

/// Streams the calculator listens to.
#[derive(Debug)]
pub struct CalculatorInput {
    /// Settled bill amounts.
    pub bill: UnboundedReceiver<f64>,
    pub tip: UnboundedReceiver<Tip>,
    /// Party sizes, each at least 1.
    pub party_size: UnboundedReceiver<u32>,
    pub logo_taps: UnboundedReceiver<()>,
}

/// Streams the calculator produces.
#[derive(Debug)]
pub struct CalculatorOutput {
    /// One result per combined snapshot.
    pub updates: UnboundedReceiver<TipResult>,
    /// One signal per logo tap.
    pub reset: broadcast::Receiver<ResetSignal>,
    /// Tasks backing the two streams above; dropping this stops them.
    pub subscriptions: Subscriptions,
}

pub struct TipCalculator {
    audio: Arc<dyn AudioPlayer>,
    config: CalculatorConfig,
}

impl TipCalculator {
    pub fn new(audio: Arc<dyn AudioPlayer>) -> Self {
        Self::with_config(audio, CalculatorConfig::default())
    }

    pub fn with_config(
        audio: Arc<dyn AudioPlayer>,
        config: CalculatorConfig,
    ) -> Self {
        Self { audio, config }
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Wires the inputs to the outputs. Must be called inside a tokio runtime.
    pub fn transform(
        &self,
        input: CalculatorInput,
    ) -> CalculatorOutput {
        let mut subscriptions = Subscriptions::new();

        let (updates_tx, updates) = unbounded_channel();
        subscriptions.push(
            "combine_latest",
            tokio::spawn(combine_latest3(
                input.bill,
                input.tip,
                input.party_size,
                updates_tx,
                |bill, tip, party_size| {
                    let snapshot = Snapshot::new(bill, tip, party_size);
                    let result = calculate(&snapshot);
                    debug!(?snapshot, ?result, "calculated");
                    result
                },
            )),
        );

        let coordinator = ResetCoordinator::new(self.audio.clone(), self.config.reset_capacity);
        let reset = coordinator.subscribe();
        subscriptions.push("reset_coordinator", tokio::spawn(coordinator.run(input.logo_taps)));

        CalculatorOutput {
            updates,
            reset,
            subscriptions,
        }
    }
}

impl std::fmt::Debug for TipCalculator {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("TipCalculator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
