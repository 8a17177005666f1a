//! # meteolab-core
//!
//! **A school greenhouse, simulated.**
//!
//! `meteolab-core` produces the data behind the MeteoLab greenhouse
//! dashboard: a 21-day history of synthetic sensor readings and a live
//! "current reading" that drifts a little every few seconds.
//!
//! ## Quick Start
//!
//! ```no_run
//! use meteolab_core::{Dashboard, DashboardConfig};
//!
//! # #[tokio::main] async fn main() {
//! let dashboard = Dashboard::mount(&DashboardConfig::default());
//! assert_eq!(dashboard.history().len(), 21);
//!
//! let view = dashboard.view();
//! println!("{:?}", view.get());
//!
//! dashboard.unmount();
//! # }
//! ```
//!
//! ## Architecture
//!
//! History generator → state cell ← live feed (timer task) → read views
//!
//! - [`generate_history`] draws one reading per day, oldest first.
//! - [`reading_cell`] splits the current reading into one writer and many
//!   read views.
//! - [`LiveFeed`] owns the writer and perturbs the reading every period;
//!   its [`FeedHandle`] cancels the feed when dropped.
//! - [`Dashboard`] ties the three together for one mount/unmount cycle.

pub mod catalog;
pub mod cell;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod feed;
pub mod history;
pub mod live;
pub mod reading;
pub mod snapshot;
pub mod timestamp;

pub use cell::{ReadingView, ReadingWriter, Sealer, reading_cell};
pub use config::DashboardConfig;
pub use dashboard::Dashboard;
pub use error::{MeteoError, Result};
pub use feed::{DEFAULT_REFRESH, FeedHandle, LiveFeed};
pub use history::{
    DEFAULT_HISTORY_DAYS, HistoryConfig, ValueRange, generate_history, generate_history_now,
};
pub use live::{ClampBounds, DriftPolicy, LiveConfig, perturb};
pub use reading::{Metric, MetricSummary, SensorReading, summarize, summarize_all};
pub use snapshot::DashboardSnapshot;

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
