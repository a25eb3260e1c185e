use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::debug;

use crate::Tip;

/// Owner of the tip selection.
///
/// Publishes `Tip::None` on creation and every selection afterwards,
/// including repeats of the current one.
#[derive(Debug)]
pub struct TipInput {
    current: Tip,
    tips: UnboundedSender<Tip>,
}

impl TipInput {
    pub fn new() -> (Self, UnboundedReceiver<Tip>) {
        let (tips, rx) = unbounded_channel();
        let input = Self {
            current: Tip::None,
            tips,
        };
        input.publish();
        (input, rx)
    }

    pub fn current(&self) -> Tip {
        self.current
    }

    pub fn select(
        &mut self,
        tip: Tip,
    ) {
        self.current = tip;
        self.publish();
    }

    /// Selects a custom tip from prompt text.
    ///
    /// Text that is not a non-negative integer leaves the selection as it was
    /// and returns `None`.
    pub fn select_custom(
        &mut self,
        text: &str,
    ) -> Option<Tip> {
        let tip = Tip::parse_custom(text)?;
        self.select(tip);
        Some(tip)
    }

    pub fn reset(&mut self) {
        self.select(Tip::None);
    }

    fn publish(&self) {
        if self.tips.send(self.current).is_err() {
            debug!(tip = ?self.current, "tip receiver is gone");
        }
    }
}
