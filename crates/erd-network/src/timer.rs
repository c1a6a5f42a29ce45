//! One-shot cancellable timers.
//!
//! A timer is started with a duration and yields a future that resolves
//! when the duration elapses or when the timer is aborted, whichever
//! comes first. A timer runs at most once at a time; it can be started
//! again after it fired or was aborted.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::error::NetworkError;

/// A named, restartable, one-shot timer.
#[derive(Debug, Clone)]
pub struct AsyncTimer {
    name: String,
    state: Arc<Mutex<TimerState>>,
}

#[derive(Debug, Default)]
struct TimerState {
    /// Incremented on every start; identifies a run in traces.
    correlation_tag: u64,
    running: Option<CancellationToken>,
}

impl AsyncTimer {
    /// Create a stopped timer. The name appears in errors and traces.
    pub fn new(name: impl Into<String>) -> Self {
        AsyncTimer {
            name: name.into(),
            state: Arc::default(),
        }
    }

    /// The timer's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Start the timer.
    ///
    /// The deadline is fixed when this is called, not when the returned
    /// future is first polled.
    ///
    /// # Returns
    /// A future resolving to `Ok(())` once `duration` has elapsed, or to
    /// `TimerAborted` if [`abort`](Self::abort) is called first. Fails with
    /// `TimerAlreadyRunning` if a previous run has neither fired nor been
    /// aborted.
    pub fn start(
        &self,
        duration: Duration,
    ) -> Result<impl Future<Output = Result<(), NetworkError>> + Send + 'static, NetworkError> {
        let (token, tag) = {
            let mut state = lock(&self.state);
            if state.running.is_some() {
                return Err(NetworkError::TimerAlreadyRunning(self.name.clone()));
            }
            state.correlation_tag += 1;
            let token = CancellationToken::new();
            state.running = Some(token.clone());
            (token, state.correlation_tag)
        };

        let deadline = Instant::now() + duration;
        let name = self.name.clone();
        let state = Arc::clone(&self.state);
        trace!(timer = %name, tag, ?duration, "timer started");

        Ok(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    trace!(timer = %name, tag, "timer aborted");
                    Err(NetworkError::TimerAborted(name))
                }
                _ = tokio::time::sleep_until(deadline) => {
                    let mut state = lock(&state);
                    if state.correlation_tag == tag {
                        state.running = None;
                    }
                    trace!(timer = %name, tag, "timer fired");
                    Ok(())
                }
            }
        })
    }

    /// Abort the current run, if any. Its future resolves to `TimerAborted`.
    ///
    /// A run whose future is dropped before firing stays registered until
    /// aborted.
    pub fn abort(&self) {
        let running = lock(&self.state).running.take();
        if let Some(token) = running {
            token.cancel();
        }
    }

    /// Whether no run is in progress.
    pub fn is_stopped(&self) -> bool {
        lock(&self.state).running.is_none()
    }
}

fn lock(state: &Mutex<TimerState>) -> MutexGuard<'_, TimerState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_timer_fires_after_duration() {
        let timer = AsyncTimer::new("test");
        let started = Instant::now();
        let fired = timer.start(Duration::from_secs(3)).unwrap();
        assert!(!timer.is_stopped());

        fired.await.unwrap();
        assert!(started.elapsed() >= Duration::from_secs(3));
        assert!(timer.is_stopped());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_cannot_run_twice() {
        let timer = AsyncTimer::new("busy");
        let _first = timer.start(Duration::from_secs(1)).unwrap();
        let err = timer.start(Duration::from_secs(1)).err().unwrap();
        assert!(matches!(err, NetworkError::TimerAlreadyRunning(ref name) if name == "busy"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_abort_resolves_with_error() {
        let timer = AsyncTimer::new("aborted");
        let started = Instant::now();
        let fired = timer.start(Duration::from_secs(60)).unwrap();

        let aborter = timer.clone();
        let (outcome, ()) = tokio::join!(fired, async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            aborter.abort();
        });

        assert!(matches!(outcome, Err(NetworkError::TimerAborted(_))));
        assert!(started.elapsed() < Duration::from_secs(60));
        assert!(timer.is_stopped());
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_after_fire_and_abort() {
        let timer = AsyncTimer::new("restart");
        timer.start(Duration::from_millis(10)).unwrap().await.unwrap();

        let second = timer.start(Duration::from_millis(10)).unwrap();
        timer.abort();
        assert!(second.await.is_err());

        timer.start(Duration::from_millis(10)).unwrap().await.unwrap();
    }

    #[test]
    fn test_abort_when_stopped_is_noop() {
        let timer = AsyncTimer::new("idle");
        timer.abort();
        assert!(timer.is_stopped());
        assert_eq!(timer.name(), "idle");
    }
}
