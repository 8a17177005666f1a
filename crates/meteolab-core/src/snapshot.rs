//! JSON export of a dashboard's state.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::dashboard::Dashboard;
use crate::error::Result;
use crate::reading::{MetricSummary, SensorReading, summarize_all};
use crate::timestamp;

/// Point-in-time capture of a mounted dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub version: u32,
    pub captured_at: String,
    pub refresh_ms: u64,
    pub ticks: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub current: Option<SensorReading>,
    pub history: Vec<SensorReading>,
    #[serde(default, skip_deserializing)]
    pub summary: Vec<MetricSummary>,
    pub meteolab_version: String,
}

impl DashboardSnapshot {
    pub fn capture(dashboard: &Dashboard) -> Self {
        let history = dashboard.history().to_vec();
        Self {
            version: 1,
            captured_at: timestamp::format_iso8601(timestamp::since_epoch(SystemTime::now())),
            refresh_ms: dashboard.refresh().as_millis() as u64,
            ticks: dashboard.ticks(),
            seed: dashboard.seed(),
            current: dashboard.current(),
            summary: summarize_all(&history),
            history,
            meteolab_version: crate::VERSION.to_string(),
        }
    }

    /// Write as pretty JSON into `dir` under a timestamped file name.
    pub fn write_to_dir<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf> {
        let now = timestamp::since_epoch(SystemTime::now());
        let name = format!(
            "meteolab-snapshot-{}.json",
            timestamp::format_iso8601_compact(now)
        );
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let path = dir.join(name);
        std::fs::write(&path, serde_json::to_string_pretty(self)?)?;
        Ok(path)
    }
}
