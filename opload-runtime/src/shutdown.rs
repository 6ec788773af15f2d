//! Run-wide stop propagation
//!
//! One [`StopHandle`] per run, one cloned [`StopSignal`] per virtual user.
//! Users observe the signal between tasks and during think-time only, so an
//! in-flight remote call always completes.

use std::time::Duration;
use tokio::sync::watch;

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Configured run time elapsed
    RunTimeElapsed,
    /// Interrupted from outside, e.g. Ctrl+C
    Interrupted,
    /// Every user finished on its own
    Completed,
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StopReason::RunTimeElapsed => write!(f, "run time elapsed"),
            StopReason::Interrupted => write!(f, "interrupted"),
            StopReason::Completed => write!(f, "all users completed"),
        }
    }
}

/// Sending side, owned by the runner
#[derive(Debug)]
pub struct StopHandle {
    sender: watch::Sender<bool>,
}

/// Receiving side handed to each virtual user
#[derive(Debug, Clone)]
pub struct StopSignal {
    receiver: watch::Receiver<bool>,
}

impl StopHandle {
    pub fn channel() -> (StopHandle, StopSignal) {
        let (sender, receiver) = watch::channel(false);
        (StopHandle { sender }, StopSignal { receiver })
    }

    /// Signal every subscriber; idempotent
    pub fn stop(&self) {
        self.sender.send_replace(true);
    }

    pub fn signal(&self) -> StopSignal {
        StopSignal {
            receiver: self.sender.subscribe(),
        }
    }
}

impl StopSignal {
    pub fn is_stopped(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Resolves once stop is requested or the handle is dropped
    pub async fn stopped(&self) {
        let mut receiver = self.receiver.clone();
        // An Err means the handle is gone, which also ends the run
        let _ = receiver.wait_for(|stopped| *stopped).await;
    }

    /// Sleep for `duration` unless stopped first. Returns `true` if the
    /// sleep was cut short by a stop.
    pub async fn sleep(&self, duration: Duration) -> bool {
        tokio::select! {
            _ = tokio::time::sleep(duration) => self.is_stopped(),
            _ = self.stopped() => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stop_reaches_every_clone() {
        let (handle, signal) = StopHandle::channel();
        let other = signal.clone();
        let late = handle.signal();

        assert!(!signal.is_stopped());
        handle.stop();

        assert!(signal.is_stopped());
        assert!(other.is_stopped());
        assert!(late.is_stopped());
        signal.stopped().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_sleep_is_interrupted_by_stop() {
        let (handle, signal) = StopHandle::channel();

        let sleeper = tokio::spawn(async move { signal.sleep(Duration::from_secs(60)).await });
        tokio::time::sleep(Duration::from_secs(1)).await;
        handle.stop();

        assert!(sleeper.await.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sleep_completes_without_stop() {
        let (_handle, signal) = StopHandle::channel();
        assert!(!signal.sleep(Duration::from_millis(10)).await);
    }
}
