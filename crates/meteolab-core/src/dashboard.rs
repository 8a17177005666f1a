//! Dashboard lifecycle.
//!
//! Mounting generates the history window, seeds the current-reading cell
//! with the newest history sample and starts the live feed. Unmounting (or
//! dropping the [`Dashboard`]) cancels the feed. The history never changes
//! after mount; only the current reading moves.

use std::time::{Duration, SystemTime};

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::cell::{ReadingView, reading_cell};
use crate::config::DashboardConfig;
use crate::feed::{FeedHandle, LiveFeed};
use crate::history::generate_history;
use crate::reading::SensorReading;
use crate::snapshot::DashboardSnapshot;
use crate::timestamp;

/// A mounted dashboard: fixed history plus a live current reading.
#[derive(Debug)]
pub struct Dashboard {
    history: Vec<SensorReading>,
    view: ReadingView,
    feed: Option<FeedHandle>,
    refresh: Duration,
    seed: Option<u64>,
}

impl Dashboard {
    /// Mount with history ending today.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn mount(config: &DashboardConfig) -> Self {
        Self::mount_at(config, timestamp::since_epoch(SystemTime::now()))
    }

    /// Mount with history ending on the day containing `now` (since the epoch).
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn mount_at(config: &DashboardConfig, now: Duration) -> Self {
        if let Err(e) = config.validate() {
            log::warn!("mounting with invalid config: {e}");
        }

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };

        let history = generate_history(&config.history, &mut rng, now);
        let (mut writer, view) = reading_cell();
        if let Some(latest) = history.last() {
            writer.set(latest.clone());
        }

        let feed_rng = StdRng::from_rng(&mut rng);
        let feed = LiveFeed::spawn(writer, config.refresh(), config.live, feed_rng);

        log::info!(
            "dashboard mounted: {} days of history, refresh {} ms{}",
            history.len(),
            config.refresh_ms,
            config
                .seed
                .map(|s| format!(", seed {s}"))
                .unwrap_or_default()
        );

        Self {
            history,
            view,
            refresh: feed.period(),
            feed: Some(feed),
            seed: config.seed,
        }
    }

    /// The history window, oldest first.
    pub fn history(&self) -> &[SensorReading] {
        &self.history
    }

    /// The live reading as of now.
    pub fn current(&self) -> Option<SensorReading> {
        self.view.get()
    }

    /// A read handle for renderers that outlive a borrow of the dashboard.
    pub fn view(&self) -> ReadingView {
        self.view.clone()
    }

    /// Live feed ticks fired since mount.
    pub fn ticks(&self) -> u64 {
        self.feed.as_ref().map_or(0, FeedHandle::ticks)
    }

    pub fn refresh(&self) -> Duration {
        self.refresh
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn is_mounted(&self) -> bool {
        self.feed.is_some()
    }

    /// Capture history, current reading and feed state for export.
    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot::capture(self)
    }

    /// Stop the live feed. The history and last reading stay readable.
    pub fn unmount(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        if let Some(feed) = self.feed.take() {
            let ticks = feed.ticks();
            feed.cancel();
            log::info!("dashboard unmounted after {ticks} ticks");
        }
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        self.teardown();
    }
}
