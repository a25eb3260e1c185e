use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::debug;

use crate::PartySize;

/// Owner of the party size counter.
///
/// Publishes 1 on creation, then only values that differ from the last one
/// published.
#[derive(Debug)]
pub struct SplitInput {
    size: PartySize,
    last_published: u32,
    sizes: UnboundedSender<u32>,
}

impl SplitInput {
    pub fn new() -> (Self, UnboundedReceiver<u32>) {
        let (sizes, rx) = unbounded_channel();
        let size = PartySize::new();
        let input = Self {
            size,
            last_published: size.get(),
            sizes,
        };
        input.send(size.get());
        (input, rx)
    }

    pub fn current(&self) -> u32 {
        self.size.get()
    }

    pub fn increment(&mut self) {
        self.size.increment();
        self.publish();
    }

    pub fn decrement(&mut self) {
        self.size.decrement();
        self.publish();
    }

    pub fn reset(&mut self) {
        self.size.reset();
        self.publish();
    }

    fn publish(&mut self) {
        let size = self.size.get();
        if size == self.last_published {
            return;
        }
        self.last_published = size;
        self.send(size);
    }

    fn send(
        &self,
        size: u32,
    ) {
        if self.sizes.send(size).is_err() {
            debug!(size, "party size receiver is gone");
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tokio::sync::mpsc::error::TryRecvError;

    use super::*;

    fn drain(rx: &mut UnboundedReceiver<u32>) -> Vec<u32> {
        std::iter::from_fn(|| rx.try_recv().ok()).collect()
    }

    #[test]
    fn publishes_one_on_creation() {
        let (input, mut rx) = SplitInput::new();

        assert_eq!(input.current(), 1);
        assert_eq!(drain(&mut rx), vec![1]);
    }

    #[test]
    fn increment_and_decrement_publish_changes() {
        let (mut input, mut rx) = SplitInput::new();

        input.increment();
        input.increment();
        input.decrement();

        assert_eq!(drain(&mut rx), vec![1, 2, 3, 2]);
    }

    #[test]
    fn decrement_at_one_stays_at_one_and_publishes_nothing() {
        let (mut input, mut rx) = SplitInput::new();
        rx.try_recv().unwrap();

        input.decrement();

        assert_eq!(input.current(), 1);
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
    }

    #[test]
    fn reset_publishes_one_only_when_changed() {
        let (mut input, mut rx) = SplitInput::new();
        input.reset();
        input.increment();
        input.reset();

        assert_eq!(drain(&mut rx), vec![1, 2, 1]);
    }
}
