use luft_core::error::LuftError;
use luft_core::model::Level;
use luft_core::thresholds::builtin;
use std::path::Path;

pub fn list() -> Result<(), LuftError> {
    println!("Available predefined threshold tables:\n");
    for name in builtin::PRESETS {
        let table = builtin::load_preset(name)?;
        println!("  {:<8} {} (v{})", name, table.name, table.version);
        if let Some(ref desc) = table.description {
            println!("           {}", desc);
        }
        println!();
    }
    Ok(())
}

pub fn explain(preset: &str) -> Result<(), LuftError> {
    let table = builtin::load_preset(preset)?;

    println!("{} (version {})\n", table.name, table.version);

    if let Some(ref desc) = table.description {
        println!("{}\n", desc);
    }

    println!("This table bands pollutant concentrations into severity levels:\n");
    for level in [Level::Good, Level::Moderate, Level::High] {
        print!("  {}", level);
        if let Some(desc) = table.level_descriptions.get(&level) {
            println!(" -- {}", desc);
        } else {
            println!();
        }
    }
    println!();
    println!("A concentration is banded into the first level whose bound");
    println!("exceeds it; at or above every bound it is {}.\n", Level::WORST);

    println!("Bounds:");
    println!();

    let max_name_len = table
        .pollutants
        .iter()
        .map(|r| r.pollutant.as_str().len())
        .max()
        .unwrap_or(10);

    print!("  {:<width$}", "Pollutant", width = max_name_len + 2);
    for level in Level::BANDED {
        print!("  {:<10}", level);
    }
    println!("  Weight  Unit");
    println!(
        "  {}",
        "-".repeat(max_name_len + 2 + (Level::BANDED.len() * 12) + 16)
    );

    for rule in &table.pollutants {
        print!(
            "  {:<width$}",
            rule.pollutant.as_str(),
            width = max_name_len + 2
        );
        for level in Level::BANDED {
            match rule.bounds.get(&level) {
                Some(bound) => print!("  {:<10}", bound),
                None => print!("  {:<10}", "-"),
            }
        }
        print!("  {:<6}", rule.weight);
        print!("  {}", rule.unit.as_deref().unwrap_or("ug/m3"));
        println!();
    }

    println!();

    Ok(())
}

pub fn schema() -> Result<(), LuftError> {
    print!(
        r#"JSON Threshold Schema
=====================

A threshold file defines severity bands and health-impact weights for
pollutant kinds. When you run `luft score`, each reading is compared
against these bounds to determine its level, and the weights feed the
composite score and the pollution index.

Top-level fields:
  name          (string, required)  Human-readable name of the table
  description   (string, optional)  What this table is for
  version       (string, required)  Version identifier (e.g., "2021.1")
  level_descriptions
                (object, optional)  Map of level ("good", "moderate",
                                    "high") to human-readable description.
                                    Used by `luft thresholds explain`.
  pollutants    (array, required)   List of pollutant rules (see below)

Each rule in the "pollutants" array:
  pollutant     (string, required)  One of: NO2, O3, PM10, PM2.5, SO2,
                                    NO, CO.
  bounds        (object, required)  Map of level -> upper concentration
                                    bound, as quoted decimal strings.
                                    A reading is banded into the first
                                    level whose bound exceeds it; "high"
                                    is the residual band and takes no
                                    bound.
  weight        (string, optional)  Positive health-impact multiplier.
                                    Default: "1".
  unit          (string, optional)  Unit for display. Default: "ug/m3"
  note          (string, optional)  Reference or explanation.

Example:
{{
  "name": "My custom bands",
  "description": "Project-specific bounds for the 2024 campaign",
  "version": "1.0",
  "level_descriptions": {{
    "good": "Below the campaign target",
    "moderate": "Above target, watch",
    "high": "Above the alert value"
  }},
  "pollutants": [
    {{
      "pollutant": "NO2",
      "bounds": {{ "good": "20", "moderate": "40" }},
      "weight": "1.3",
      "note": "Tighter than the WHO 2021 guideline"
    }},
    {{
      "pollutant": "PM2.5",
      "bounds": {{ "good": "10", "moderate": "20" }},
      "weight": "1.5"
    }}
  ]
}}

Note: bound and weight values must be quoted strings, not bare numbers,
to preserve exact decimal precision (e.g., "0.5" not 0.5).
"#
    );
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), LuftError> {
    let table = luft_core::thresholds::load_table(file)?;

    println!("Threshold table '{}' (v{}) is valid.", table.name, table.version);
    println!("  Pollutants: {}", table.pollutants.len());

    // Check for potential issues (warnings, not errors)
    let mut warnings = Vec::new();
    for rule in &table.pollutants {
        for level in Level::BANDED {
            if !rule.bounds.contains_key(&level) {
                let mut warning = format!(
                    "pollutant '{}' has no bound for level '{}'",
                    rule.pollutant, level
                );
                if level == Level::Moderate {
                    warning.push_str(" (it will not contribute to the pollution index)");
                }
                warnings.push(warning);
            }
        }
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}
