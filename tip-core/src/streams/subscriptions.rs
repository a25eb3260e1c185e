use tokio::task::{JoinError, JoinHandle};
use tracing::debug;

/// Owns the tasks backing a bound calculator.
///
/// Dropping it aborts every task, so nothing fires after the owning screen is
/// torn down. [`Subscriptions::shutdown`] does the same but also hands back
/// each task's outcome, so a task that panicked can be reported.
#[derive(Debug, Default)]
pub struct Subscriptions {
    tasks: Vec<(&'static str, JoinHandle<()>)>,
}

impl Subscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &mut self,
        name: &'static str,
        task: JoinHandle<()>,
    ) {
        self.tasks.push((name, task));
    }

    /// Number of tasks that have not finished yet.
    pub fn active(&self) -> usize {
        self.tasks.iter().filter(|(_, task)| !task.is_finished()).count()
    }

    pub fn cancel(&mut self) {
        debug!(tasks = self.tasks.len(), "cancelling subscriptions");
        for (_, task) in self.tasks.drain(..) {
            task.abort();
        }
    }

    /// Aborts every task and waits for it, returning each task's name with
    /// its outcome. Tasks still running at the call end up cancelled; a task
    /// that had already panicked reports the panic.
    pub async fn shutdown(&mut self) -> Vec<(&'static str, Result<(), JoinError>)> {
        debug!(
            tasks = self.tasks.len(),
            active = self.active(),
            "shutting down subscriptions"
        );
        for (_, task) in &self.tasks {
            task.abort();
        }

        let mut outcomes = Vec::with_capacity(self.tasks.len());
        for (name, task) in self.tasks.drain(..) {
            outcomes.push((name, task.await));
        }
        outcomes
    }
}

impl Drop for Subscriptions {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;
    use tokio::sync::mpsc::unbounded_channel;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn drop_aborts_tasks() {
        let (tx, mut rx) = unbounded_channel::<u32>();
        let mut subscriptions = Subscriptions::new();
        subscriptions.push(
            "sender",
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_secs(1)).await;
                let _ = tx.send(1);
            }),
        );
        assert_eq!(subscriptions.active(), 1);

        drop(subscriptions);

        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn cancel_empties_the_set() {
        let mut subscriptions = Subscriptions::new();
        subscriptions.push("pending", tokio::spawn(std::future::pending::<()>()));
        assert_eq!(subscriptions.active(), 1);

        subscriptions.cancel();

        assert_eq!(subscriptions.active(), 0);
        assert!(subscriptions.shutdown().await.is_empty());
    }

    #[tokio::test]
    async fn shutdown_reports_a_panicked_task() {
        let mut subscriptions = Subscriptions::new();
        subscriptions.push("pending", tokio::spawn(std::future::pending::<()>()));
        subscriptions.push(
            "broken",
            tokio::spawn(async {
                panic!("map failed");
            }),
        );
        while subscriptions.active() > 1 {
            tokio::task::yield_now().await;
        }

        let outcomes = subscriptions.shutdown().await;

        let summary: Vec<_> = outcomes
            .iter()
            .map(|(name, outcome)| {
                let kind = match outcome {
                    Ok(()) => "ok",
                    Err(error) if error.is_panic() => "panic",
                    Err(_) => "cancelled",
                };
                (*name, kind)
            })
            .collect();
        assert_eq!(summary, vec![("pending", "cancelled"), ("broken", "panic")]);
        assert_eq!(subscriptions.active(), 0);
    }
}
