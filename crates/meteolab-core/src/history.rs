//! Synthetic sensor history.
//!
//! Produces one reading per day for the most recent `days` days, oldest
//! first, ending today. Climate fields are drawn independently and uniformly
//! from their configured ranges; plant height follows a linear growth trend
//! with a little noise on top.

use std::time::{Duration, SystemTime};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{MeteoError, Result};
use crate::reading::SensorReading;
use crate::timestamp;

/// Default number of days in the history window.
pub const DEFAULT_HISTORY_DAYS: usize = 21;

/// Closed interval a generated value is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }

    pub fn clamp(&self, v: f64) -> f64 {
        v.clamp(self.min, self.max)
    }

    /// `min + U * (max - min)` for U uniform in [0, 1).
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.min + rng.random::<f64>() * (self.max - self.min)
    }

    pub(crate) fn check(&self, name: &str) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max {
            return Err(MeteoError::InvalidConfig(format!(
                "{name} range [{}, {}] is not a valid interval",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Generator parameters. Defaults reproduce the classroom demo data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Number of daily samples, ending today.
    pub days: usize,
    pub temperature: ValueRange,
    pub humidity: ValueRange,
    pub light: ValueRange,
    /// Plant height of the oldest sample before noise, cm.
    pub plant_base_cm: f64,
    /// Growth added per day, cm.
    pub growth_per_day_cm: f64,
    /// Upper bound of the uniform noise added to each height, cm.
    pub growth_noise_cm: f64,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            days: DEFAULT_HISTORY_DAYS,
            temperature: ValueRange::new(18.0, 28.0),
            humidity: ValueRange::new(55.0, 75.0),
            light: ValueRange::new(800.0, 2000.0),
            plant_base_cm: 5.0,
            growth_per_day_cm: 0.8,
            growth_noise_cm: 0.5,
        }
    }
}

impl HistoryConfig {
    pub fn validate(&self) -> Result<()> {
        if self.days == 0 {
            return Err(MeteoError::InvalidConfig(
                "history.days must be at least 1".to_string(),
            ));
        }
        self.temperature.check("history.temperature")?;
        self.humidity.check("history.humidity")?;
        self.light.check("history.light")?;
        if self.growth_noise_cm.is_nan() || self.growth_noise_cm < 0.0 {
            return Err(MeteoError::InvalidConfig(
                "history.growth_noise_cm must be >= 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Generate the history window ending on the day containing `now`.
///
/// `now` is a duration since the Unix epoch. Readings are returned oldest
/// first; `result.last()` is today's sample.
pub fn generate_history<R: Rng + ?Sized>(
    config: &HistoryConfig,
    rng: &mut R,
    now: Duration,
) -> Vec<SensorReading> {
    let today = timestamp::epoch_day(now);
    let days = config.days as u64;

    (0..days)
        .map(|k| {
            // Clocks before `days` after the epoch would underflow; pin to day 0.
            let day = (today + k + 1).saturating_sub(days);
            let noise = rng.random::<f64>() * config.growth_noise_cm;
            SensorReading {
                timestamp: timestamp::day_label(day),
                day,
                temperature: config.temperature.sample(rng),
                humidity: config.humidity.sample(rng),
                light: config.light.sample(rng),
                plant_height: Some(
                    config.plant_base_cm + k as f64 * config.growth_per_day_cm + noise,
                ),
            }
        })
        .collect()
}

/// Generate a history window ending today using the thread-local RNG.
pub fn generate_history_now(config: &HistoryConfig) -> Vec<SensorReading> {
    let now = timestamp::since_epoch(SystemTime::now());
    generate_history(config, &mut rand::rng(), now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const NOW: Duration = Duration::from_secs(20_745 * timestamp::SECS_PER_DAY + 12 * 3600);

    fn history(seed: u64) -> Vec<SensorReading> {
        let mut rng = StdRng::seed_from_u64(seed);
        generate_history(&HistoryConfig::default(), &mut rng, NOW)
    }

    #[test]
    fn produces_exactly_twenty_one_days() {
        for seed in 0..20 {
            assert_eq!(history(seed).len(), 21);
        }
    }

    #[test]
    fn strictly_ascending_and_ends_today() {
        let h = history(7);
        assert!(h.windows(2).all(|w| w[0].day + 1 == w[1].day));
        assert_eq!(h.last().unwrap().day, 20_745);
        assert_eq!(h.last().unwrap().timestamp, "19. 10. 2026");
        assert_eq!(h.first().unwrap().timestamp, "29. 9. 2026");
    }

    #[test]
    fn values_stay_within_intended_ranges() {
        for seed in 0..50 {
            for r in history(seed) {
                assert!((16.0..=30.0).contains(&r.temperature), "temperature {}", r.temperature);
                assert!((50.0..=80.0).contains(&r.humidity), "humidity {}", r.humidity);
                assert!((800.0..=2000.0).contains(&r.light), "light {}", r.light);
            }
        }
    }

    #[test]
    fn plant_height_nets_positive() {
        for seed in 0..50 {
            let h = history(seed);
            let first = h.first().unwrap().plant_height.unwrap();
            let last = h.last().unwrap().plant_height.unwrap();
            // 20 days of 0.8 cm growth dwarfs the 0.5 cm noise band.
            assert!(last - first > 15.0, "growth {}", last - first);
            for w in h.windows(2) {
                let step = w[1].plant_height.unwrap() - w[0].plant_height.unwrap();
                assert!(step > 0.8 - 0.5 - 1e-9, "step {step}");
            }
        }
    }

    #[test]
    fn same_seed_same_history() {
        assert_eq!(history(42), history(42));
        assert_ne!(history(42), history(43));
    }

    #[test]
    fn custom_window_length() {
        let config = HistoryConfig {
            days: 3,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let h = generate_history(&config, &mut rng, NOW);
        assert_eq!(h.len(), 3);
        assert_eq!(h[0].day, 20_743);
    }

    #[test]
    fn early_clock_does_not_underflow() {
        let mut rng = StdRng::seed_from_u64(1);
        let h = generate_history(&HistoryConfig::default(), &mut rng, Duration::ZERO);
        assert_eq!(h.len(), 21);
        assert!(h.iter().all(|r| r.day == 0));
    }

    #[test]
    fn validate_rejects_bad_values() {
        let zero_days = HistoryConfig {
            days: 0,
            ..Default::default()
        };
        assert!(zero_days.validate().is_err());

        let inverted = HistoryConfig {
            light: ValueRange::new(2000.0, 800.0),
            ..Default::default()
        };
        assert!(inverted.validate().is_err());

        assert!(HistoryConfig::default().validate().is_ok());
    }

    #[test]
    fn generate_history_now_uses_defaults() {
        assert_eq!(generate_history_now(&HistoryConfig::default()).len(), 21);
    }
}
