use luft_core::aggregate::city_summaries;
use luft_core::dataset;
use luft_core::error::LuftError;
use std::path::PathBuf;

use crate::commands::resolve_table;
use crate::output;

pub fn run(
    input_file: PathBuf,
    thresholds: Option<PathBuf>,
    preset: &str,
    sensitive: bool,
    top: Option<usize>,
    output_format: &str,
) -> Result<(), LuftError> {
    let mut table = resolve_table(thresholds, preset)?;
    if sensitive {
        table = table.for_sensitive();
    }

    let dataset = dataset::load_dataset(&input_file)?;
    let mut summaries = city_summaries(&dataset.readings, &table);
    if let Some(n) = top {
        summaries.truncate(n);
    }

    match output_format {
        "json" => output::json::print(&summaries)?,
        _ => output::table::print_cities(&table.name, &summaries),
    }

    Ok(())
}
