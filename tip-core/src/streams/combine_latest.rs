//! Combine-latest over three channels.
//!
//! [`Latest3`] keeps the most recent value from each source and yields a
//! complete tuple once every source has produced at least one value.
//! [`combine_latest3`] drives it from three receivers and pushes each
//! completed tuple, mapped, into an output channel.

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::debug;

/// Most recent value from each of three sources.
#[derive(Debug, Clone)]
pub struct Latest3<A, B, C> {
    first: Option<A>,
    second: Option<B>,
    third: Option<C>,
}

impl<A, B, C> Latest3<A, B, C>
where
    A: Clone,
    B: Clone,
    C: Clone,
{
    pub fn new() -> Self {
        Self {
            first: None,
            second: None,
            third: None,
        }
    }

    pub fn set_first(
        &mut self,
        value: A,
    ) -> Option<(A, B, C)> {
        self.first = Some(value);
        self.current()
    }

    pub fn set_second(
        &mut self,
        value: B,
    ) -> Option<(A, B, C)> {
        self.second = Some(value);
        self.current()
    }

    pub fn set_third(
        &mut self,
        value: C,
    ) -> Option<(A, B, C)> {
        self.third = Some(value);
        self.current()
    }

    /// The combined tuple, once all three sources have produced a value.
    pub fn current(&self) -> Option<(A, B, C)> {
        match (&self.first, &self.second, &self.third) {
            (Some(a), Some(b), Some(c)) => Some((a.clone(), b.clone(), c.clone())),
            _ => None,
        }
    }
}

impl<A, B, C> Default for Latest3<A, B, C>
where
    A: Clone,
    B: Clone,
    C: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Combines three receivers, sending `map(a, b, c)` on every upstream value
/// once all three have produced one.
///
/// Returns when any upstream closes or when the output receiver is dropped.
/// Values already queued on the other sources are not drained.
pub async fn combine_latest3<A, B, C, T, F>(
    mut first: UnboundedReceiver<A>,
    mut second: UnboundedReceiver<B>,
    mut third: UnboundedReceiver<C>,
    output: UnboundedSender<T>,
    mut map: F,
) where
    A: Clone,
    B: Clone,
    C: Clone,
    F: FnMut(A, B, C) -> T,
{
    let mut latest = Latest3::new();

    loop {
        let combined = tokio::select! {
            biased;
            value = first.recv() => match value {
                Some(value) => latest.set_first(value),
                None => break,
            },
            value = second.recv() => match value {
                Some(value) => latest.set_second(value),
                None => break,
            },
            value = third.recv() => match value {
                Some(value) => latest.set_third(value),
                None => break,
            },
        };

        let Some((a, b, c)) = combined else {
            continue;
        };
        if output.send(map(a, b, c)).is_err() {
            debug!("combine_latest output dropped");
            return;
        }
    }

    debug!("combine_latest upstream closed");
}
