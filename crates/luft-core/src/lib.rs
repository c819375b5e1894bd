pub mod aggregate;
pub mod dataset;
pub mod error;
pub mod model;
pub mod score;
pub mod thresholds;

use error::LuftError;
use model::PollutantReading;
use score::outcome::ScoreReport;
use thresholds::schema::ThresholdTableDef;

/// Options controlling how scoring is performed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreOptions {
    /// Tighten every band for sensitive populations.
    pub sensitive: bool,
}

/// Main API entry point: parse a measurement CSV export and score every
/// observation against the threshold table.
pub fn score_csv(
    csv_bytes: &[u8],
    table: &ThresholdTableDef,
    options: &ScoreOptions,
) -> Result<ScoreReport, LuftError> {
    let dataset = dataset::parse_dataset(csv_bytes)?;
    score_readings(&dataset.readings, table, options)
}

/// Score pre-parsed readings, grouped into observations by station and
/// timestamp.
///
/// A pollutant kind missing from the table never aborts the batch: it is
/// recorded on its observation, and observations with nothing scorable
/// are dropped.
pub fn score_readings(
    readings: &[PollutantReading],
    table: &ThresholdTableDef,
    options: &ScoreOptions,
) -> Result<ScoreReport, LuftError> {
    let sensitive_table;
    let table = if options.sensitive {
        sensitive_table = table.for_sensitive();
        &sensitive_table
    } else {
        table
    };

    let mut observations = Vec::new();
    for observation in aggregate::group_observations(readings) {
        match score::engine::score_observation(&observation, table) {
            Ok(scored) => observations.push(scored),
            Err(LuftError::EmptyObservation) => continue,
            Err(e) => return Err(e),
        }
    }

    Ok(ScoreReport {
        table_name: table.name.clone(),
        observations,
    })
}
