//! Periodic live feed.
//!
//! [`LiveFeed::spawn`] registers a recurring Tokio task that perturbs the
//! current reading once per period and hands back a [`FeedHandle`]. The
//! handle is the only way to stop the feed, and dropping it stops the feed
//! too, so teardown happens on every exit path.
//!
//! Ticks run one after another inside a single task and never overlap. The
//! first tick fires one full period after registration.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use rand::Rng;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::cell::{ReadingWriter, Sealer};
use crate::live::{LiveConfig, perturb};

/// Default tick period.
pub const DEFAULT_REFRESH: Duration = Duration::from_millis(3000);

/// Shortest period accepted by [`LiveFeed::spawn`].
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Entry point for registering a live feed.
pub struct LiveFeed;

impl LiveFeed {
    /// Start perturbing the reading behind `writer` every `period`.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn spawn<R>(
        mut writer: ReadingWriter,
        period: Duration,
        config: LiveConfig,
        mut rng: R,
    ) -> FeedHandle
    where
        R: Rng + Send + 'static,
    {
        let period = period.max(MIN_PERIOD);
        let sealer = writer.sealer();
        let ticks = Arc::new(AtomicU64::new(0));
        let tick_count = Arc::clone(&ticks);

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                let applied = writer.update(|prev| perturb(prev, &config, &mut rng));
                let n = tick_count.fetch_add(1, Ordering::Release) + 1;
                if applied {
                    log::debug!("live feed tick #{n}");
                } else if writer.is_sealed() {
                    break;
                } else {
                    log::debug!("live feed tick #{n} skipped: no reading yet");
                }
            }
        });

        log::info!("live feed started ({} ms period)", period.as_millis());

        FeedHandle {
            sealer,
            task: Some(task),
            ticks,
            period,
        }
    }
}

/// Handle to a running feed. Cancels the feed when dropped.
#[derive(Debug)]
pub struct FeedHandle {
    sealer: Sealer,
    task: Option<JoinHandle<()>>,
    ticks: Arc<AtomicU64>,
    period: Duration,
}

impl FeedHandle {
    /// Stop the feed permanently.
    ///
    /// The state cell is sealed before the task is aborted, so no tick can
    /// write after this call begins.
    pub fn cancel(mut self) {
        self.shutdown();
    }

    /// Number of timer ticks that have fired.
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Acquire)
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_cancelled(&self) -> bool {
        self.task.is_none()
    }

    fn shutdown(&mut self) {
        self.sealer.seal();
        if let Some(task) = self.task.take() {
            task.abort();
            log::info!("live feed stopped after {} ticks", self.ticks());
        }
    }
}

impl Drop for FeedHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}
