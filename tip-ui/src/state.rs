//! Input state owned by the calculator screen.

use tip_core::{
    Tip,
    inputs::{BillEvent, BillInput, SplitInput, TipInput},
};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::debug;

/// The three input owners plus the logo, as the screen holds them.
#[derive(Debug)]
pub struct ScreenState {
    pub bill: BillInput,
    pub tip: TipInput,
    pub split: SplitInput,
    logo: UnboundedSender<()>,
}

/// Receiving ends handed to the calculator when the screen is bound.
#[derive(Debug)]
pub struct StateStreams {
    pub bill_events: UnboundedReceiver<BillEvent>,
    pub tips: UnboundedReceiver<Tip>,
    pub party_sizes: UnboundedReceiver<u32>,
    pub logo_taps: UnboundedReceiver<()>,
}

impl ScreenState {
    pub fn new() -> (Self, StateStreams) {
        let (bill, bill_events) = BillInput::channel();
        let (tip, tips) = TipInput::new();
        let (split, party_sizes) = SplitInput::new();
        let (logo, logo_taps) = unbounded_channel();

        let state = Self {
            bill,
            tip,
            split,
            logo,
        };
        let streams = StateStreams {
            bill_events,
            tips,
            party_sizes,
            logo_taps,
        };
        (state, streams)
    }

    pub fn tap_logo(&self) {
        if self.logo.send(()).is_err() {
            debug!("reset coordinator is gone; logo tap dropped");
        }
    }

    /// Puts every input back to its starting value.
    pub fn clear_inputs(&mut self) {
        self.bill.clear();
        self.tip.reset();
        self.split.reset();
    }
}
