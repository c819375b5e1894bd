use luft_core::error::LuftError;
use luft_core::model::PollutantReading;
use luft_core::ScoreOptions;
use std::path::PathBuf;

use crate::commands::resolve_table;
use crate::output;

pub fn run(
    input_file: PathBuf,
    thresholds: Option<PathBuf>,
    preset: &str,
    sensitive: bool,
    output_format: &str,
    show_all: bool,
    verbose: bool,
) -> Result<(), LuftError> {
    let table = resolve_table(thresholds, preset)?;
    let options = ScoreOptions { sensitive };

    let bytes = std::fs::read(&input_file).map_err(|e| LuftError::DatasetLoad {
        path: input_file.clone(),
        reason: e.to_string(),
    })?;

    // Readings pre-parsed with `luft parse --out` can be scored directly.
    let is_json = input_file
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let report = if is_json {
        let readings: Vec<PollutantReading> = serde_json::from_slice(&bytes)?;
        luft_core::score_readings(&readings, &table, &options)?
    } else {
        luft_core::score_csv(&bytes, &table, &options)?
    };

    match output_format {
        "json" => output::json::print(&report)?,
        _ => output::table::print_report(&report, show_all, verbose),
    }

    Ok(())
}
