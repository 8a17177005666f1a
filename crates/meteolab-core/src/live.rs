//! Live sample perturbation.
//!
//! Each tick derives the next "current reading" from the previous one by
//! adding small independent uniform deltas to the climate fields. The result
//! is a bounded-step random walk. By default nothing pulls values back into
//! a plausible range, so long runs drift; [`DriftPolicy::Clamped`] opts into
//! pinning each field to fixed bounds instead.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{MeteoError, Result};
use crate::history::ValueRange;
use crate::reading::SensorReading;

/// Bounds applied by [`DriftPolicy::Clamped`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClampBounds {
    pub temperature: ValueRange,
    pub humidity: ValueRange,
    pub light: ValueRange,
}

impl Default for ClampBounds {
    fn default() -> Self {
        Self {
            temperature: ValueRange::new(10.0, 40.0),
            humidity: ValueRange::new(0.0, 100.0),
            light: ValueRange::new(0.0, 100_000.0),
        }
    }
}

/// What happens when the walk wanders away from realistic values.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum DriftPolicy {
    /// Let the walk drift without limit.
    #[default]
    Unbounded,
    /// Pin every field into the given bounds after each step.
    Clamped(ClampBounds),
}

/// Per-tick step sizes and drift policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveConfig {
    /// Maximum absolute temperature change per tick, °C.
    pub temperature_step: f64,
    /// Maximum absolute humidity change per tick, %.
    pub humidity_step: f64,
    /// Maximum absolute light change per tick, lux.
    pub light_step: f64,
    pub drift: DriftPolicy,
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self {
            temperature_step: 0.5,
            humidity_step: 0.5,
            light_step: 5.0,
            drift: DriftPolicy::Unbounded,
        }
    }
}

impl LiveConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, step) in [
            ("live.temperature_step", self.temperature_step),
            ("live.humidity_step", self.humidity_step),
            ("live.light_step", self.light_step),
        ] {
            if !step.is_finite() || step < 0.0 {
                return Err(MeteoError::InvalidConfig(format!(
                    "{name} must be a finite value >= 0, got {step}"
                )));
            }
        }
        if let DriftPolicy::Clamped(bounds) = &self.drift {
            bounds.temperature.check("live.drift.temperature")?;
            bounds.humidity.check("live.drift.humidity")?;
            bounds.light.check("live.drift.light")?;
        }
        Ok(())
    }
}

/// Uniform delta in `[-step, step]`. Non-finite or non-positive steps yield 0.
fn delta<R: Rng + ?Sized>(rng: &mut R, step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    rng.random_range(-step..=step)
}

/// Derive the next live reading from `prev`.
///
/// Timestamp, day and plant height carry over unchanged.
pub fn perturb<R: Rng + ?Sized>(
    prev: &SensorReading,
    config: &LiveConfig,
    rng: &mut R,
) -> SensorReading {
    let mut next = SensorReading {
        temperature: prev.temperature + delta(rng, config.temperature_step),
        humidity: prev.humidity + delta(rng, config.humidity_step),
        light: prev.light + delta(rng, config.light_step),
        ..prev.clone()
    };

    if let DriftPolicy::Clamped(bounds) = &config.drift {
        let before = (next.temperature, next.humidity, next.light);
        next.temperature = bounds.temperature.clamp(next.temperature);
        next.humidity = bounds.humidity.clamp(next.humidity);
        next.light = bounds.light.clamp(next.light);
        if before != (next.temperature, next.humidity, next.light) {
            log::warn!(
                "live reading clamped: {:.2}/{:.2}/{:.0} -> {:.2}/{:.2}/{:.0}",
                before.0,
                before.1,
                before.2,
                next.temperature,
                next.humidity,
                next.light
            );
        }
    }

    log::trace!(
        "perturb: T {:.3} -> {:.3}, RH {:.3} -> {:.3}, L {:.1} -> {:.1}",
        prev.temperature,
        next.temperature,
        prev.humidity,
        next.humidity,
        prev.light,
        next.light
    );
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn seed_reading() -> SensorReading {
        SensorReading {
            timestamp: "19. 10. 2026".to_string(),
            day: 20_745,
            temperature: 24.0,
            humidity: 65.0,
            light: 1000.0,
            plant_height: Some(21.3),
        }
    }

    #[test]
    fn one_step_stays_within_step_bounds() {
        let config = LiveConfig::default();
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let next = perturb(&seed_reading(), &config, &mut rng);
            assert!((23.5..=24.5).contains(&next.temperature), "{}", next.temperature);
            assert!((64.5..=65.5).contains(&next.humidity), "{}", next.humidity);
            assert!((995.0..=1005.0).contains(&next.light), "{}", next.light);
        }
    }

    #[test]
    fn carries_label_and_plant_height() {
        let mut rng = StdRng::seed_from_u64(3);
        let next = perturb(&seed_reading(), &LiveConfig::default(), &mut rng);
        assert_eq!(next.timestamp, "19. 10. 2026");
        assert_eq!(next.day, 20_745);
        assert_eq!(next.plant_height, Some(21.3));
    }

    #[test]
    fn walk_is_bounded_by_steps_times_ticks() {
        let config = LiveConfig::default();
        let mut rng = StdRng::seed_from_u64(11);
        let start = seed_reading();
        let mut cur = start.clone();
        for n in 1..=500u32 {
            cur = perturb(&cur, &config, &mut rng);
            let n = f64::from(n);
            assert!((cur.temperature - start.temperature).abs() <= n * 0.5 + 1e-9);
            assert!((cur.humidity - start.humidity).abs() <= n * 0.5 + 1e-9);
            assert!((cur.light - start.light).abs() <= n * 5.0 + 1e-9);
        }
    }

    #[test]
    fn zero_steps_freeze_the_walk() {
        let config = LiveConfig {
            temperature_step: 0.0,
            humidity_step: 0.0,
            light_step: 0.0,
            drift: DriftPolicy::Unbounded,
        };
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(perturb(&seed_reading(), &config, &mut rng), seed_reading());
    }

    #[test]
    fn non_finite_steps_do_not_move_the_walk() {
        let config = LiveConfig {
            temperature_step: f64::INFINITY,
            humidity_step: f64::NAN,
            light_step: f64::NEG_INFINITY,
            drift: DriftPolicy::Unbounded,
        };
        let mut rng = StdRng::seed_from_u64(6);
        assert_eq!(perturb(&seed_reading(), &config, &mut rng), seed_reading());
    }

    #[test]
    fn clamped_policy_pins_values() {
        let config = LiveConfig {
            temperature_step: 50.0,
            humidity_step: 50.0,
            light_step: 5000.0,
            drift: DriftPolicy::Clamped(ClampBounds {
                temperature: ValueRange::new(23.0, 25.0),
                humidity: ValueRange::new(60.0, 70.0),
                light: ValueRange::new(900.0, 1100.0),
            }),
        };
        let mut rng = StdRng::seed_from_u64(9);
        let mut cur = seed_reading();
        for _ in 0..100 {
            cur = perturb(&cur, &config, &mut rng);
            assert!((23.0..=25.0).contains(&cur.temperature));
            assert!((60.0..=70.0).contains(&cur.humidity));
            assert!((900.0..=1100.0).contains(&cur.light));
        }
    }

    #[test]
    fn validate_rejects_negative_steps_and_bad_bounds() {
        let negative = LiveConfig {
            light_step: -1.0,
            ..Default::default()
        };
        assert!(negative.validate().is_err());

        let inverted = LiveConfig {
            drift: DriftPolicy::Clamped(ClampBounds {
                humidity: ValueRange::new(90.0, 10.0),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(inverted.validate().is_err());
        assert!(LiveConfig::default().validate().is_ok());
    }

    #[test]
    fn drift_policy_json_shape() {
        let unbounded: DriftPolicy = serde_json::from_str(r#"{"mode":"unbounded"}"#).unwrap();
        assert_eq!(unbounded, DriftPolicy::Unbounded);

        let json = serde_json::to_value(DriftPolicy::Clamped(ClampBounds::default())).unwrap();
        assert_eq!(json["mode"], "clamped");
        assert_eq!(json["temperature"]["min"], 10.0);
    }
}
