//! Dashboard configuration.
//!
//! Stored as JSON. Every field has a default, so a config file only needs
//! the keys it wants to change:
//!
//! ```json
//! { "refresh_ms": 1000, "seed": 42, "live": { "drift": { "mode": "clamped",
//!   "temperature": { "min": 10, "max": 40 },
//!   "humidity": { "min": 0, "max": 100 },
//!   "light": { "min": 0, "max": 100000 } } } }
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{MeteoError, Result};
use crate::feed::DEFAULT_REFRESH;
use crate::history::HistoryConfig;
use crate::live::LiveConfig;

/// Everything needed to mount a dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Live feed period in milliseconds.
    pub refresh_ms: u64,
    /// Seed for reproducible history and feed. Random when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub history: HistoryConfig,
    pub live: LiveConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            refresh_ms: DEFAULT_REFRESH.as_millis() as u64,
            seed: None,
            history: HistoryConfig::default(),
            live: LiveConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Read and validate a JSON config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `path` if given, otherwise the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Write this config as pretty JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.refresh_ms == 0 {
            return Err(MeteoError::InvalidConfig(
                "refresh_ms must be > 0".to_string(),
            ));
        }
        self.history.validate()?;
        self.live.validate()
    }

    pub fn refresh(&self) -> Duration {
        Duration::from_millis(self.refresh_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::live::DriftPolicy;

    #[test]
    fn defaults_match_classroom_demo() {
        let c = DashboardConfig::default();
        assert_eq!(c.refresh(), Duration::from_millis(3000));
        assert_eq!(c.history.days, 21);
        assert_eq!(c.live.drift, DriftPolicy::Unbounded);
        assert!(c.seed.is_none());
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let c: DashboardConfig =
            serde_json::from_str(r#"{"refresh_ms": 500, "history": {"days": 7}}"#).unwrap();
        assert_eq!(c.refresh_ms, 500);
        assert_eq!(c.history.days, 7);
        assert_eq!(c.history.temperature.min, 18.0);
        assert_eq!(c.live.light_step, 5.0);
    }

    #[test]
    fn clamped_drift_from_json() {
        let c: DashboardConfig = serde_json::from_str(
            r#"{"live": {"drift": {"mode": "clamped",
                "temperature": {"min": 10, "max": 40},
                "humidity": {"min": 0, "max": 100},
                "light": {"min": 0, "max": 100000}}}}"#,
        )
        .unwrap();
        assert!(matches!(c.live.drift, DriftPolicy::Clamped(_)));
        assert!(c.validate().is_ok());
    }

    #[test]
    fn zero_refresh_is_rejected() {
        let c = DashboardConfig {
            refresh_ms: 0,
            ..Default::default()
        };
        assert!(matches!(c.validate(), Err(MeteoError::InvalidConfig(_))));
    }

    #[test]
    fn save_then_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("meteolab.json");
        let c = DashboardConfig {
            refresh_ms: 1200,
            seed: Some(9),
            ..Default::default()
        };
        c.save(&path).unwrap();
        assert_eq!(DashboardConfig::load(&path).unwrap(), c);
    }

    #[test]
    fn load_reports_missing_file_and_bad_json() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(matches!(
            DashboardConfig::load(tmp.path().join("nope.json")),
            Err(MeteoError::Io(_))
        ));

        let bad = tmp.path().join("bad.json");
        std::fs::write(&bad, "{ not json").unwrap();
        assert!(matches!(DashboardConfig::load(&bad), Err(MeteoError::Json(_))));

        let invalid = tmp.path().join("invalid.json");
        std::fs::write(&invalid, r#"{"history": {"days": 0}}"#).unwrap();
        assert!(matches!(
            DashboardConfig::load(&invalid),
            Err(MeteoError::InvalidConfig(_))
        ));
    }

    #[test]
    fn load_or_default_without_path() {
        assert_eq!(
            DashboardConfig::load_or_default(None).unwrap(),
            DashboardConfig::default()
        );
    }
}
