//! Sensor readings and the metrics drawn from them.
//!
//! A [`SensorReading`] is one timestamped tuple of greenhouse measurements.
//! [`Metric`] names each measured quantity so renderers can pick a field,
//! a label and a unit without matching on struct fields themselves.

use serde::{Deserialize, Serialize};

/// One timestamped set of greenhouse measurements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorReading {
    /// Display label for the day, e.g. `19. 10. 2026`.
    pub timestamp: String,
    /// Days since the Unix epoch. Orders readings chronologically.
    pub day: u64,
    /// Air temperature in °C.
    pub temperature: f64,
    /// Relative humidity in %.
    pub humidity: f64,
    /// Light intensity in lux.
    pub light: f64,
    /// Average plant height in cm, when measured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plant_height: Option<f64>,
}

// ---------------------------------------------------------------------------
// Metric
// ---------------------------------------------------------------------------

/// A measured quantity of a [`SensorReading`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    #[default]
    Temperature,
    Humidity,
    Light,
    PlantHeight,
}

impl Metric {
    /// Every metric, in status-card order.
    pub const ALL: [Metric; 4] = [
        Metric::Temperature,
        Metric::Humidity,
        Metric::Light,
        Metric::PlantHeight,
    ];

    pub fn next(self) -> Self {
        match self {
            Self::Temperature => Self::Humidity,
            Self::Humidity => Self::Light,
            Self::Light => Self::PlantHeight,
            Self::PlantHeight => Self::Temperature,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Temperature => "Temperature",
            Self::Humidity => "Humidity",
            Self::Light => "Light intensity",
            Self::PlantHeight => "Avg. plant height",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Self::Temperature => "°C",
            Self::Humidity => "%",
            Self::Light => "lux",
            Self::PlantHeight => "cm",
        }
    }

    /// Status-card hint shown under the value.
    pub fn hint(self) -> &'static str {
        match self {
            Self::Temperature => "Optimal: 22-26 °C",
            Self::Humidity => "Optimal: 60-80 %",
            Self::Light => "Daily average",
            Self::PlantHeight => "+0.8 cm per 24 h",
        }
    }

    /// Range considered healthy for the plants, if the metric has one.
    pub fn optimal_range(self) -> Option<(f64, f64)> {
        match self {
            Self::Temperature => Some((22.0, 26.0)),
            Self::Humidity => Some((60.0, 80.0)),
            Self::Light | Self::PlantHeight => None,
        }
    }

    /// Extract this metric from a reading. `None` only for a missing plant height.
    pub fn value_from(self, r: &SensorReading) -> Option<f64> {
        match self {
            Self::Temperature => Some(r.temperature),
            Self::Humidity => Some(r.humidity),
            Self::Light => Some(r.light),
            Self::PlantHeight => r.plant_height,
        }
    }

    /// Format a value the way the status cards show it.
    pub fn format(self, value: f64) -> String {
        match self {
            Self::Light => format!("{} {}", value.round(), self.unit()),
            _ => format!("{value:.1} {}", self.unit()),
        }
    }

    /// Formatted value of this metric for a reading, `—` when absent.
    pub fn display(self, r: &SensorReading) -> String {
        self.value_from(r)
            .map(|v| self.format(v))
            .unwrap_or_else(|| "—".to_string())
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Temperature => write!(f, "temperature"),
            Self::Humidity => write!(f, "humidity"),
            Self::Light => write!(f, "light"),
            Self::PlantHeight => write!(f, "plant_height"),
        }
    }
}

// ---------------------------------------------------------------------------
// Summary statistics
// ---------------------------------------------------------------------------

/// Min / max / mean of one metric across a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricSummary {
    pub metric: Metric,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub count: usize,
}

/// Summarize one metric over a series. Returns `None` if no reading carries it.
pub fn summarize(readings: &[SensorReading], metric: Metric) -> Option<MetricSummary> {
    let values: Vec<f64> = readings.iter().filter_map(|r| metric.value_from(r)).collect();
    if values.is_empty() {
        return None;
    }
    let min = values.iter().copied().fold(f64::MAX, f64::min);
    let max = values.iter().copied().fold(f64::MIN, f64::max);
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    Some(MetricSummary {
        metric,
        min,
        max,
        mean,
        count: values.len(),
    })
}

/// Summaries for every metric present in the series.
pub fn summarize_all(readings: &[SensorReading]) -> Vec<MetricSummary> {
    Metric::ALL
        .iter()
        .filter_map(|&m| summarize(readings, m))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(temperature: f64, plant_height: Option<f64>) -> SensorReading {
        SensorReading {
            timestamp: "1. 1. 1970".to_string(),
            day: 0,
            temperature,
            humidity: 65.0,
            light: 1000.4,
            plant_height,
        }
    }

    #[test]
    fn metric_cycles_through_all_variants() {
        let mut m = Metric::default();
        for expected in Metric::ALL.iter().skip(1) {
            m = m.next();
            assert_eq!(m, *expected);
        }
        assert_eq!(m.next(), Metric::Temperature);
    }

    #[test]
    fn value_from_extracts_correct_field() {
        let r = reading(24.0, Some(12.5));
        assert_eq!(Metric::Temperature.value_from(&r), Some(24.0));
        assert_eq!(Metric::Humidity.value_from(&r), Some(65.0));
        assert_eq!(Metric::Light.value_from(&r), Some(1000.4));
        assert_eq!(Metric::PlantHeight.value_from(&r), Some(12.5));
        assert_eq!(Metric::PlantHeight.value_from(&reading(24.0, None)), None);
    }

    #[test]
    fn display_matches_card_format() {
        let r = reading(24.04, None);
        assert_eq!(Metric::Temperature.display(&r), "24.0 °C");
        assert_eq!(Metric::Light.display(&r), "1000 lux");
        assert_eq!(Metric::PlantHeight.display(&r), "—");
    }

    #[test]
    fn optimal_ranges_only_for_climate() {
        assert_eq!(Metric::Temperature.optimal_range(), Some((22.0, 26.0)));
        assert_eq!(Metric::Humidity.optimal_range(), Some((60.0, 80.0)));
        assert!(Metric::Light.optimal_range().is_none());
    }

    #[test]
    fn summarize_computes_min_max_mean() {
        let rs = vec![reading(20.0, Some(5.0)), reading(24.0, None), reading(22.0, Some(7.0))];
        let t = summarize(&rs, Metric::Temperature).unwrap();
        assert_eq!(t.min, 20.0);
        assert_eq!(t.max, 24.0);
        assert!((t.mean - 22.0).abs() < 1e-12);
        assert_eq!(t.count, 3);

        let h = summarize(&rs, Metric::PlantHeight).unwrap();
        assert_eq!(h.count, 2);
        assert!((h.mean - 6.0).abs() < 1e-12);
    }

    #[test]
    fn summarize_empty_is_none() {
        assert!(summarize(&[], Metric::Light).is_none());
        assert!(summarize_all(&[]).is_empty());
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(reading(24.0, Some(9.0))).unwrap();
        assert!(json.get("plantHeight").is_some());
        let json = serde_json::to_value(reading(24.0, None)).unwrap();
        assert!(json.get("plantHeight").is_none());
    }
}
