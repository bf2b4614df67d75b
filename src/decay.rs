//! Background pet decay.
//!
//! A tokio task ticks at a fixed period and applies
//! [`WellnessState::decay_tick`] to the shared state. The first tick fires
//! one full period after start. Stopping is explicit through [`DecayTicker::stop`];
//! dropping a ticker that is still running aborts its task so nothing can
//! touch the state after teardown.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Notify, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::error::{Result, WellnessError};
use crate::wellness::WellnessState;

pub type SharedState = Arc<RwLock<WellnessState>>;

pub const DEFAULT_TICK: Duration = Duration::from_secs(60);
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

pub fn shared(state: WellnessState) -> SharedState {
    Arc::new(RwLock::new(state))
}

pub struct DecayTicker {
    state: SharedState,
    period: Duration,
    shutdown: Arc<Notify>,
    handle: Option<JoinHandle<()>>,
    ticks: Arc<AtomicU64>,
    shutdown_timeout: Duration,
}

impl DecayTicker {
    pub fn new(state: SharedState, period: Duration) -> Self {
        DecayTicker {
            state,
            // tokio::time::interval panics on a zero period
            period: period.max(Duration::from_millis(1)),
            shutdown: Arc::new(Notify::new()),
            handle: None,
            ticks: Arc::new(AtomicU64::new(0)),
            shutdown_timeout: SHUTDOWN_TIMEOUT,
        }
    }

    /// How long [`stop`](Self::stop) waits before aborting the task
    pub fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }

    /// Create and immediately start a ticker.
    pub fn spawn(state: SharedState, period: Duration) -> Self {
        let mut ticker = Self::new(state, period);
        ticker.spawn_task();
        ticker
    }

    pub fn start(&mut self) -> Result<()> {
        if self.is_running() {
            return Err(WellnessError::TickerAlreadyRunning);
        }
        self.spawn_task();
        Ok(())
    }

    fn spawn_task(&mut self) {
        self.shutdown = Arc::new(Notify::new());
        let state = Arc::clone(&self.state);
        let shutdown = Arc::clone(&self.shutdown);
        let ticks = Arc::clone(&self.ticks);
        let period = self.period;

        self.handle = Some(tokio::spawn(async move {
            decay_loop(state, shutdown, ticks, period).await;
        }));

        info!(period_ms = period.as_millis() as u64, "Decay ticker started");
    }

    /// Signal the task to finish and wait for it. A task that does not
    /// finish within the shutdown timeout is aborted.
    pub async fn stop(&mut self) -> Result<()> {
        let handle = self.handle.take().ok_or(WellnessError::TickerNotRunning)?;
        let abort = handle.abort_handle();
        self.shutdown.notify_one();

        match tokio::time::timeout(self.shutdown_timeout, handle).await {
            Ok(Ok(())) => {
                info!(ticks = self.ticks(), "Decay ticker stopped");
                Ok(())
            }
            Ok(Err(e)) => {
                error!(error = ?e, "Decay ticker task failed");
                Ok(())
            }
            Err(_) => {
                abort.abort();
                let waited_ms = self.shutdown_timeout.as_millis() as u64;
                error!(waited_ms, "Decay ticker did not stop in time, aborted");
                Err(WellnessError::TickerShutdownTimeout(waited_ms))
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().map_or(false, |h| !h.is_finished())
    }

    /// Number of decay ticks applied since this ticker was created
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::SeqCst)
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Drop for DecayTicker {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!("Decay ticker aborted on drop");
        }
    }
}

async fn decay_loop(
    state: SharedState,
    shutdown: Arc<Notify>,
    ticks: Arc<AtomicU64>,
    period: Duration,
) {
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;

            _ = shutdown.notified() => {
                debug!("Decay ticker received shutdown signal");
                break;
            }

            _ = interval.tick() => {
                state.write().await.decay_tick();
                ticks.fetch_add(1, Ordering::SeqCst);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded() -> SharedState {
        shared(WellnessState::with_rng(
            chrono::Utc::now(),
            &mut StdRng::seed_from_u64(1),
        ))
    }

    #[tokio::test]
    async fn test_ticks_decay_state() {
        let state = seeded();
        let mut ticker = DecayTicker::spawn(Arc::clone(&state), Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(80)).await;
        ticker.stop().await.unwrap();

        assert!(ticker.ticks() > 0);
        let pet = state.read().await.pet().clone();
        assert!(pet.happiness < 80.0);
        assert!(pet.health < 85.0);
        assert!(pet.happiness >= 0.0 && pet.health >= 0.0);
    }

    #[tokio::test]
    async fn test_no_tick_before_first_period() {
        let state = seeded();
        let ticker = DecayTicker::spawn(Arc::clone(&state), Duration::from_secs(60));
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(ticker.ticks(), 0);
        assert_eq!(state.read().await.pet().happiness, 80.0);
    }

    #[tokio::test]
    async fn test_no_decay_after_stop() {
        let state = seeded();
        let mut ticker = DecayTicker::spawn(Arc::clone(&state), Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(50)).await;
        ticker.stop().await.unwrap();
        assert!(!ticker.is_running());

        let ticks = ticker.ticks();
        let pet = state.read().await.pet().clone();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(ticker.ticks(), ticks);
        assert_eq!(state.read().await.pet(), &pet);
    }

    #[tokio::test]
    async fn test_no_decay_after_drop() {
        let state = seeded();
        let ticker = DecayTicker::spawn(Arc::clone(&state), Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(30)).await;
        drop(ticker);

        let pet = state.read().await.pet().clone();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(state.read().await.pet(), &pet);
    }

    #[tokio::test]
    async fn test_start_stop_errors() {
        let mut ticker = DecayTicker::new(seeded(), Duration::from_millis(10));
        assert!(matches!(
            ticker.stop().await,
            Err(WellnessError::TickerNotRunning)
        ));
        ticker.start().unwrap();
        assert!(matches!(
            ticker.start(),
            Err(WellnessError::TickerAlreadyRunning)
        ));
        ticker.stop().await.unwrap();
        // restart after a clean stop
        ticker.start().unwrap();
        ticker.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_stop_timeout_aborts_task() {
        let state = seeded();
        let mut ticker = DecayTicker::spawn(Arc::clone(&state), Duration::from_millis(10))
            .with_shutdown_timeout(Duration::from_millis(20));

        // The first tick blocks on the lock held here, so shutdown cannot complete
        let guard = state.write().await;
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(matches!(
            ticker.stop().await,
            Err(WellnessError::TickerShutdownTimeout(20))
        ));
        drop(guard);

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(ticker.ticks(), 0);
        assert_eq!(state.read().await.pet().happiness, 80.0);
        assert!(!ticker.is_running());
    }

    #[test]
    fn test_zero_period_is_raised() {
        let ticker = DecayTicker::new(seeded(), Duration::ZERO);
        assert_eq!(ticker.period(), Duration::from_millis(1));
    }
}
