//! Static project content: student hypotheses, research journal, project
//! timeline and seasonal light averages.
//!
//! None of this changes at runtime. It is exposed as `&'static` slices so
//! renderers and the HTTP server can borrow it freely.

use serde::Serialize;

/// Where a hypothesis stands after measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HypothesisStatus {
    Pending,
    Verified,
    Refuted,
}

impl HypothesisStatus {
    pub const ALL: [HypothesisStatus; 3] = [Self::Pending, Self::Verified, Self::Refuted];

    /// Parse the lowercase name used in JSON and query strings.
    pub fn from_name(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|st| st.to_string() == s)
    }

    /// Badge text.
    pub fn badge(self) -> &'static str {
        match self {
            Self::Pending => "IN PROGRESS",
            Self::Verified => "VERIFIED",
            Self::Refuted => "REFUTED",
        }
    }
}

impl std::fmt::Display for HypothesisStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Verified => write!(f, "verified"),
            Self::Refuted => write!(f, "refuted"),
        }
    }
}

/// A student hypothesis and the reflection on its outcome.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hypothesis {
    pub id: u32,
    pub student_name: &'static str,
    pub statement: &'static str,
    pub status: HypothesisStatus,
    pub notes: &'static str,
}

/// One milestone of the school-year project plan.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectPhase {
    pub date: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub completed: bool,
}

/// A short research-journal post.
#[derive(Debug, Clone, Serialize)]
pub struct JournalEntry {
    pub date: &'static str,
    pub author: &'static str,
    pub title: &'static str,
    pub preview: &'static str,
}

/// Average light intensity for one month of the season.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MonthlyLight {
    pub month: &'static str,
    pub lux: f64,
}

/// Student feedback score on a five-point scale.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EvaluationScore {
    pub label: &'static str,
    pub score: f64,
    pub out_of: f64,
}

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

pub static HYPOTHESES: &[Hypothesis] = &[
    Hypothesis {
        id: 1,
        student_name: "Group Alpha (III.S)",
        statement: "Temperatures above 25 °C speed up tomato growth but raise the risk of the soil drying out.",
        status: HypothesisStatus::Verified,
        notes: "Confirmed by January measurements. At 26 °C growth was 15% faster, but soil moisture dropped twice as fast.",
    },
    Hypothesis {
        id: 2,
        student_name: "Group Beta (III.A)",
        statement: "An optimal humidity of 60-80 % supports seed germination without mould.",
        status: HypothesisStatus::Verified,
        notes: "We held humidity at 70%. Germination reached 95% and visual checks found no mould.",
    },
    Hypothesis {
        id: 3,
        student_name: "Ján Novák",
        statement: "Light intensity below 500 lux stops pepper growth.",
        status: HypothesisStatus::Refuted,
        notes: "Growth did not stop completely but slowed by 80%. The plant started stretching toward the light (etiolation).",
    },
];

pub static JOURNAL: &[JournalEntry] = &[
    JournalEntry {
        date: "15 Jan 2026",
        author: "Marek (III.S)",
        title: "Calibrating the DHT22 sensors",
        preview: "Today we compared our Arduino station against a certified thermometer. The deviation was only 0.3 °C...",
    },
    JournalEntry {
        date: "20 Jan 2026",
        author: "Petra (III.A)",
        title: "First germination",
        preview: "Tomatoes at 24 °C germinated two days earlier than the control sample in the cooler part of the greenhouse.",
    },
];

pub static TIMELINE: &[ProjectPhase] = &[
    ProjectPhase {
        date: "Oct 2025",
        title: "Pilot phase",
        description: "Kick-off motivation, SWOT analysis, writing hypotheses, workplace safety workshop.",
        completed: true,
    },
    ProjectPhase {
        date: "Nov 2025",
        title: "Hardware & software",
        description: "Building the Arduino station, programming the sensors, bench testing in the workshop.",
        completed: true,
    },
    ProjectPhase {
        date: "Jan 2026",
        title: "Installation",
        description: "Mounting in the greenhouse, start of data collection, planting the crops.",
        completed: false,
    },
    ProjectPhase {
        date: "May 2026",
        title: "Growing season",
        description: "Intensive observation, correlating growth with the data, revising hypotheses.",
        completed: false,
    },
    ProjectPhase {
        date: "Sep 2026",
        title: "Analysis & wrap-up",
        description: "Evaluating the charts, reflection, video documentation, field trip.",
        completed: false,
    },
];

pub static MONTHLY_LIGHT: &[MonthlyLight] = &[
    MonthlyLight { month: "Oct", lux: 900.0 },
    MonthlyLight { month: "Nov", lux: 600.0 },
    MonthlyLight { month: "Dec", lux: 450.0 },
    MonthlyLight { month: "Jan", lux: 500.0 },
    MonthlyLight { month: "Feb", lux: 750.0 },
    MonthlyLight { month: "Mar", lux: 1200.0 },
];

pub static EVALUATION: &[EvaluationScore] = &[
    EvaluationScore {
        label: "Practical use",
        score: 4.7,
        out_of: 5.0,
    },
    EvaluationScore {
        label: "Motivation through research",
        score: 4.5,
        out_of: 5.0,
    },
];

/// Project name shown in headers.
pub const PROJECT_NAME: &str = "MeteoLab";

/// One-paragraph project description for the About view.
pub const PROJECT_SUMMARY: &str = "Engineering in practice: an online weather station in the school \
greenhouse. Students of the MeteoLab club connect IoT hardware (Arduino, ESP8266, DHT22 and LDR \
sensors) with horticulture, studying how temperature, humidity and light affect plant growth.";

/// Share of completed timeline phases, in [0, 1].
pub fn timeline_progress() -> f64 {
    if TIMELINE.is_empty() {
        return 0.0;
    }
    TIMELINE.iter().filter(|p| p.completed).count() as f64 / TIMELINE.len() as f64
}

/// Hypotheses with the given status.
pub fn hypotheses_with(status: HypothesisStatus) -> impl Iterator<Item = &'static Hypothesis> {
    HYPOTHESES.iter().filter(move |h| h.status == status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hypothesis_ids_are_unique_and_ordered() {
        assert!(HYPOTHESES.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn status_counts() {
        assert_eq!(hypotheses_with(HypothesisStatus::Verified).count(), 2);
        assert_eq!(hypotheses_with(HypothesisStatus::Refuted).count(), 1);
        assert_eq!(hypotheses_with(HypothesisStatus::Pending).count(), 0);
    }

    #[test]
    fn timeline_completed_phases_come_first() {
        let first_open = TIMELINE.iter().position(|p| !p.completed).unwrap();
        assert!(TIMELINE[first_open..].iter().all(|p| !p.completed));
        assert!((timeline_progress() - 0.4).abs() < 1e-12);
    }

    #[test]
    fn seasonal_light_covers_six_months() {
        assert_eq!(MONTHLY_LIGHT.len(), 6);
        assert_eq!(MONTHLY_LIGHT[0].month, "Oct");
        assert_eq!(MONTHLY_LIGHT[5].lux, 1200.0);
    }

    #[test]
    fn hypothesis_json_uses_camel_case() {
        let json = serde_json::to_value(&HYPOTHESES[0]).unwrap();
        assert_eq!(json["studentName"], "Group Alpha (III.S)");
        assert_eq!(json["status"], "verified");
    }

    #[test]
    fn status_names_parse_back() {
        for st in HypothesisStatus::ALL {
            assert_eq!(HypothesisStatus::from_name(&st.to_string()), Some(st));
        }
        assert_eq!(HypothesisStatus::from_name("VERIFIED"), None);
    }

    #[test]
    fn badges() {
        assert_eq!(HypothesisStatus::Verified.badge(), "VERIFIED");
        assert_eq!(HypothesisStatus::Pending.to_string(), "pending");
    }
}
