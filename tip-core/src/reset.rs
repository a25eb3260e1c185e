//! Logo-tap reset handling.
//!
//! Each tap plays the notification sound through the injected
//! [`AudioPlayer`] and then forwards one [`ResetSignal`] to every subscriber.
//! A failing player is logged and otherwise ignored.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::broadcast;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, warn};

/// Errors an [`AudioPlayer`] may report. They never leave the coordinator.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("sound asset not found: {}", .0.display())]
    MissingAsset(PathBuf),

    #[error("playback failed: {0}")]
    Playback(#[from] std::io::Error),
}

/// Plays the reset confirmation sound.
///
/// Implementations must return promptly; playback itself may continue in
/// the background.
pub trait AudioPlayer: Send + Sync {
    fn play_sound(&self) -> Result<(), AudioError>;
}

/// Player that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAudio;

impl AudioPlayer for SilentAudio {
    fn play_sound(&self) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Tells presentation code to clear its inputs and play the restore
/// animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetSignal;

#[derive(Clone)]
pub struct ResetCoordinator {
    audio: Arc<dyn AudioPlayer>,
    signals: broadcast::Sender<ResetSignal>,
}

impl ResetCoordinator {
    pub fn new(
        audio: Arc<dyn AudioPlayer>,
        capacity: usize,
    ) -> Self {
        let (signals, _) = broadcast::channel(capacity.max(1));
        Self { audio, signals }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ResetSignal> {
        self.signals.subscribe()
    }

    /// Handles a single logo tap: one sound, then one signal.
    pub fn handle_tap(&self) {
        if let Err(error) = self.audio.play_sound() {
            warn!(%error, "reset sound failed");
        }

        match self.signals.send(ResetSignal) {
            Ok(receivers) => debug!(receivers, "reset signal sent"),
            Err(_) => debug!("reset signal has no subscribers"),
        }
    }

    /// Handles taps until the tap channel closes.
    pub async fn run(
        self,
        mut taps: UnboundedReceiver<()>,
    ) {
        while taps.recv().await.is_some() {
            self.handle_tap();
        }
        debug!("logo tap stream closed");
    }
}

impl std::fmt::Debug for ResetCoordinator {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("ResetCoordinator")
            .field("subscribers", &self.signals.receiver_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use pretty_assertions::assert_eq;
    use tokio::sync::broadcast::error::TryRecvError;
    use tokio::sync::mpsc::unbounded_channel;
    use tracing_subscriber::fmt::format::FmtSpan;

    use super::*;

    #[derive(Default)]
    struct CountingAudio {
        plays: AtomicUsize,
    }

    impl AudioPlayer for CountingAudio {
        fn play_sound(&self) -> Result<(), AudioError> {
            self.plays.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct MissingAudio;

    impl AudioPlayer for MissingAudio {
        fn play_sound(&self) -> Result<(), AudioError> {
            Err(AudioError::MissingAsset(PathBuf::from("click.m4a")))
        }
    }

    /// Initializes tracing subscriber for tests that exercise warning paths.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_span_events(FmtSpan::NONE)
            .with_test_writer()
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    #[test]
    fn one_tap_plays_once_and_signals_once() {
        let audio = Arc::new(CountingAudio::default());
        let coordinator = ResetCoordinator::new(audio.clone(), 4);
        let mut signals = coordinator.subscribe();

        coordinator.handle_tap();

        assert_eq!(audio.plays.load(Ordering::SeqCst), 1);
        assert_eq!(signals.try_recv(), Ok(ResetSignal));
        assert_eq!(signals.try_recv(), Err(TryRecvError::Empty));
    }

    #[test]
    fn every_subscriber_sees_each_signal() {
        let coordinator = ResetCoordinator::new(Arc::new(SilentAudio), 4);
        let mut first = coordinator.subscribe();
        let mut second = coordinator.subscribe();

        coordinator.handle_tap();

        assert_eq!(first.try_recv(), Ok(ResetSignal));
        assert_eq!(second.try_recv(), Ok(ResetSignal));
    }

    #[test]
    fn failing_audio_still_signals() {
        let _guard = init_test_tracing();
        let coordinator = ResetCoordinator::new(Arc::new(MissingAudio), 4);
        let mut signals = coordinator.subscribe();

        coordinator.handle_tap();

        assert_eq!(signals.try_recv(), Ok(ResetSignal));
    }

    #[test]
    fn tap_without_subscribers_still_plays() {
        let audio = Arc::new(CountingAudio::default());
        let coordinator = ResetCoordinator::new(audio.clone(), 4);

        coordinator.handle_tap();

        assert_eq!(audio.plays.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn run_handles_each_tap_without_batching() {
        let audio = Arc::new(CountingAudio::default());
        let coordinator = ResetCoordinator::new(audio.clone(), 8);
        let mut signals = coordinator.subscribe();
        let (taps, taps_rx) = unbounded_channel();

        for _ in 0..3 {
            taps.send(()).unwrap();
        }
        drop(taps);
        coordinator.run(taps_rx).await;

        assert_eq!(audio.plays.load(Ordering::SeqCst), 3);
        for _ in 0..3 {
            assert_eq!(signals.recv().await, Ok(ResetSignal));
        }
        assert!(matches!(signals.recv().await, Err(_)));
    }

    #[test]
    fn missing_asset_error_names_the_file() {
        let error = AudioError::MissingAsset(PathBuf::from("sounds/click.m4a"));

        assert_eq!(error.to_string(), "sound asset not found: sounds/click.m4a");
    }

    #[test]
    fn write_failure_is_a_playback_error() {
        let error = AudioError::from(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"));

        assert!(matches!(error, AudioError::Playback(_)));
        assert_eq!(error.to_string(), "playback failed: closed");
    }
}
