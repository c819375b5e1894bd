use crate::model::{Coordinates, Level, Pollutant};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Classification result for a single reading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollutantScore {
    pub pollutant: Pollutant,
    /// Concentration in ug/m3.
    pub concentration: Decimal,
    /// Health-impact weight from the threshold table.
    pub weight: Decimal,
    /// weight * concentration, the reading's contribution to the composite.
    pub weighted: Decimal,
    pub level: Level,
    /// Human-readable explanation of the banding.
    pub reason: String,
    /// The highest bound the concentration crossed, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exceeded_bound: Option<Decimal>,
}

/// Composite result for one observation (one station at one timestamp).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationScore {
    pub station: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub coordinates: Coordinates,
    /// Mean of weighted concentrations across the readings present.
    pub score: Decimal,
    /// Worst per-pollutant level.
    pub overall: Level,
    /// Human-readable explanation of the overall level.
    pub overall_reason: String,
    /// Pollutant(s) at the overall level.
    pub determining: Vec<Pollutant>,
    /// Per-pollutant results.
    pub pollutant_scores: Vec<PollutantScore>,
    /// Pollutants skipped because the table has no entry for them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<Pollutant>,
}

/// Scoring result for a whole dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Name of the threshold table that was applied.
    pub table_name: String,
    pub observations: Vec<ObservationScore>,
}

impl ScoreReport {
    /// Observation counts per overall level, in severity order.
    pub fn level_counts(&self) -> [(Level, usize); 3] {
        let count = |level| {
            self.observations
                .iter()
                .filter(|o| o.overall == level)
                .count()
        };
        [
            (Level::Good, count(Level::Good)),
            (Level::Moderate, count(Level::Moderate)),
            (Level::High, count(Level::High)),
        ]
    }
}
