use crate::error::LuftError;
use crate::thresholds::schema::ThresholdTableDef;

const WHO_2021_JSON: &str = include_str!("../../../../thresholds/who-2021.json");

/// Available predefined threshold tables.
pub const PRESETS: &[&str] = &["who"];

/// Load a predefined threshold table by name.
pub fn load_preset(name: &str) -> Result<ThresholdTableDef, LuftError> {
    match name {
        "who" => {
            let table: ThresholdTableDef = serde_json::from_str(WHO_2021_JSON)?;
            Ok(table)
        }
        _ => Err(LuftError::ThresholdsInvalid(format!(
            "unknown preset '{}'. Available: {}",
            name,
            PRESETS.join(", ")
        ))),
    }
}
