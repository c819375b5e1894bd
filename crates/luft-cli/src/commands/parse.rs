use luft_core::dataset::{self, Dataset};
use luft_core::error::LuftError;
use luft_core::model::Pollutant;
use std::path::PathBuf;

pub fn run(
    input_file: PathBuf,
    output_format: &str,
    out: Option<PathBuf>,
) -> Result<(), LuftError> {
    let dataset = dataset::load_dataset(&input_file)?;

    if let Some(path) = out {
        let json = serde_json::to_string_pretty(&dataset.readings)?;
        std::fs::write(&path, json)?;
        println!(
            "Wrote {} readings to {}",
            dataset.readings.len(),
            path.display()
        );
        return Ok(());
    }

    match output_format {
        "json" => crate::output::json::print(&dataset)?,
        _ => print_summary(&dataset),
    }

    Ok(())
}

fn print_summary(dataset: &Dataset) {
    println!("Parsed {} readings\n", dataset.readings.len());

    println!("  Readings per pollutant:");
    for pollutant in Pollutant::ALL {
        let count = dataset
            .readings
            .iter()
            .filter(|r| r.pollutant == pollutant)
            .count();
        if count > 0 {
            println!("    {:<6} {}", pollutant, count);
        }
    }

    let skipped = &dataset.skipped;
    if skipped.total() > 0 {
        println!("\n  Skipped {} rows:", skipped.total());
        let causes = [
            ("unrecognized pollutant", skipped.unknown_pollutant),
            ("missing value", skipped.missing_value),
            ("value out of range", skipped.out_of_range),
            ("bad coordinates", skipped.bad_coordinates),
            ("bad timestamp", skipped.bad_timestamp),
            ("network code as city", skipped.invalid_city),
        ];
        for (label, count) in causes {
            if count > 0 {
                println!("    {:<24} {}", label, count);
            }
        }
    }
}
