//! Bill text normalization.
//!
//! Raw text edits from the bill field become settled bill amounts:
//!
//! 1. The first edit after the field is bound is the empty text produced by
//!    focusing it; it is dropped.
//! 2. Edits are debounced; only the text left after a quiet period is used.
//! 3. A settled text equal to the previous settled text is dropped.
//! 4. The text is parsed; anything unparsable becomes 0.
//!
//! Clearing the field bypasses all of the above and publishes 0 at once.

use std::time::Duration;

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};
use tracing::debug;

use crate::calculations::amount_or_zero;

/// Raw events coming from the bill field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillEvent {
    /// The field text changed (including the initial empty text on focus).
    Edited(String),
    /// The field was cleared programmatically by a reset.
    Cleared,
}

/// Write side of the bill field.
#[derive(Debug, Clone)]
pub struct BillInput {
    events: UnboundedSender<BillEvent>,
}

impl BillInput {
    pub fn channel() -> (Self, UnboundedReceiver<BillEvent>) {
        let (events, rx) = unbounded_channel();
        (Self { events }, rx)
    }

    /// Reports that the field gained focus with nothing typed yet.
    pub fn focus(&self) {
        self.edit("");
    }

    pub fn edit(
        &self,
        text: impl Into<String>,
    ) {
        self.send(BillEvent::Edited(text.into()));
    }

    pub fn clear(&self) {
        self.send(BillEvent::Cleared);
    }

    fn send(
        &self,
        event: BillEvent,
    ) {
        if self.events.send(event).is_err() {
            debug!("bill normalizer is gone; event dropped");
        }
    }
}

/// Turns [`BillEvent`]s into settled bill amounts.
#[derive(Debug)]
pub struct BillNormalizer {
    events: UnboundedReceiver<BillEvent>,
    output: UnboundedSender<f64>,
    quiet_period: Duration,
    focused: bool,
    last_text: Option<String>,
}

impl BillNormalizer {
    pub fn new(
        events: UnboundedReceiver<BillEvent>,
        output: UnboundedSender<f64>,
        quiet_period: Duration,
    ) -> Self {
        Self {
            events,
            output,
            quiet_period,
            focused: false,
            last_text: None,
        }
    }

    /// Spawns the normalizer and returns the bill amount stream.
    pub fn spawn(
        events: UnboundedReceiver<BillEvent>,
        quiet_period: Duration,
    ) -> (UnboundedReceiver<f64>, JoinHandle<()>) {
        let (output, bills) = unbounded_channel();
        let task = tokio::spawn(Self::new(events, output, quiet_period).run());
        (bills, task)
    }

    /// Runs until the event channel closes or the output is dropped.
    ///
    /// A text still waiting for its quiet period when the event channel
    /// closes is settled before returning.
    pub async fn run(mut self) {
        let mut pending: Option<(String, Instant)> = None;

        loop {
            let deadline = pending.as_ref().map(|(_, at)| *at);

            tokio::select! {
                event = self.events.recv() => match event {
                    Some(BillEvent::Edited(text)) => {
                        if !self.focused {
                            self.focused = true;
                            debug!(%text, "dropping focus text");
                            continue;
                        }
                        pending = Some((text, Instant::now() + self.quiet_period));
                    }
                    Some(BillEvent::Cleared) => {
                        pending = None;
                        self.last_text = None;
                        if !self.publish(0.0) {
                            return;
                        }
                    }
                    None => {
                        if let Some((text, _)) = pending.take() {
                            self.settle(text);
                        }
                        break;
                    }
                },
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    if let Some((text, _)) = pending.take() {
                        if !self.settle(text) {
                            return;
                        }
                    }
                }
            }
        }

        debug!("bill normalizer finished");
    }

    /// Publishes a settled text unless it repeats the previous one.
    /// Returns `false` once the output is gone.
    fn settle(
        &mut self,
        text: String,
    ) -> bool {
        if self.last_text.as_deref() == Some(text.as_str()) {
            debug!(%text, "settled bill text unchanged");
            return true;
        }

        let bill = amount_or_zero(&text);
        self.last_text = Some(text);
        self.publish(bill)
    }

    fn publish(
        &self,
        bill: f64,
    ) -> bool {
        debug!(bill, "bill settled");
        self.output.send(bill).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tokio::sync::mpsc::error::TryRecvError;
    use tokio::time::sleep;

    use super::*;

    const QUIET: Duration = Duration::from_millis(300);

    fn bill_pipeline() -> (BillInput, UnboundedReceiver<f64>, JoinHandle<()>) {
        let (input, events) = BillInput::channel();
        let (bills, task) = BillNormalizer::spawn(events, QUIET);
        (input, bills, task)
    }

    #[tokio::test(start_paused = true)]
    async fn focus_text_is_dropped() {
        let (input, mut bills, _task) = bill_pipeline();

        input.focus();
        sleep(QUIET * 2).await;

        assert_eq!(bills.try_recv(), Err(TryRecvError::Empty));
    }

    #[tokio::test(start_paused = true)]
    async fn first_edit_is_dropped_whatever_its_text() {
        let (input, mut bills, _task) = bill_pipeline();

        input.edit("40");
        sleep(QUIET * 2).await;
        assert_eq!(bills.try_recv(), Err(TryRecvError::Empty));

        input.edit("41");
        sleep(QUIET * 2).await;
        assert_eq!(bills.try_recv(), Ok(41.0));
    }

    #[tokio::test(start_paused = true)]
    async fn only_the_last_edit_in_a_burst_is_published() {
        let (input, mut bills, _task) = bill_pipeline();
        input.focus();

        for text in ["1", "12", "123"] {
            input.edit(text);
            sleep(Duration::from_millis(100)).await;
        }
        assert_eq!(bills.try_recv(), Err(TryRecvError::Empty));

        sleep(QUIET).await;
        assert_eq!(bills.try_recv(), Ok(123.0));
        assert_eq!(bills.try_recv(), Err(TryRecvError::Empty));
    }

    #[tokio::test(start_paused = true)]
    async fn edit_within_quiet_period_restarts_the_timer() {
        let (input, mut bills, _task) = bill_pipeline();
        input.focus();

        input.edit("5");
        sleep(Duration::from_millis(250)).await;
        input.edit("50");
        sleep(Duration::from_millis(250)).await;
        assert_eq!(bills.try_recv(), Err(TryRecvError::Empty));

        sleep(Duration::from_millis(100)).await;
        assert_eq!(bills.try_recv(), Ok(50.0));
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_settled_text_is_suppressed() {
        let (input, mut bills, _task) = bill_pipeline();
        input.focus();

        input.edit("20");
        sleep(QUIET * 2).await;
        input.edit("200");
        input.edit("20");
        sleep(QUIET * 2).await;

        assert_eq!(bills.try_recv(), Ok(20.0));
        assert_eq!(bills.try_recv(), Err(TryRecvError::Empty));
    }

    #[tokio::test(start_paused = true)]
    async fn unparsable_text_is_zero() {
        let (input, mut bills, _task) = bill_pipeline();
        input.focus();

        input.edit("12x");
        sleep(QUIET * 2).await;

        assert_eq!(bills.try_recv(), Ok(0.0));
    }

    #[tokio::test(start_paused = true)]
    async fn clear_publishes_zero_immediately() {
        let (input, mut bills, _task) = bill_pipeline();
        input.focus();
        input.edit("75");
        sleep(QUIET * 2).await;
        assert_eq!(bills.try_recv(), Ok(75.0));

        input.clear();
        tokio::task::yield_now().await;

        assert_eq!(bills.recv().await, Some(0.0));
    }

    #[tokio::test(start_paused = true)]
    async fn clear_cancels_pending_edit_and_forgets_last_text() {
        let (input, mut bills, _task) = bill_pipeline();
        input.focus();
        input.edit("75");
        sleep(QUIET * 2).await;
        assert_eq!(bills.try_recv(), Ok(75.0));

        input.edit("99");
        input.clear();
        sleep(QUIET * 2).await;
        assert_eq!(bills.try_recv(), Ok(0.0));
        assert_eq!(bills.try_recv(), Err(TryRecvError::Empty));

        input.edit("75");
        sleep(QUIET * 2).await;
        assert_eq!(bills.try_recv(), Ok(75.0));
    }

    #[tokio::test(start_paused = true)]
    async fn pending_text_is_settled_when_input_closes() {
        let (input, mut bills, task) = bill_pipeline();
        input.focus();
        input.edit("33");

        drop(input);
        task.await.unwrap();

        assert_eq!(bills.recv().await, Some(33.0));
        assert_eq!(bills.recv().await, None);
    }
}
