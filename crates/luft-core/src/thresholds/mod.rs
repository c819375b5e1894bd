pub mod builtin;
pub mod schema;

use crate::error::LuftError;
use crate::model::Level;
use schema::ThresholdTableDef;
use std::path::Path;

/// Load a threshold table from a JSON file.
pub fn load_table(path: &Path) -> Result<ThresholdTableDef, LuftError> {
    let content = std::fs::read_to_string(path).map_err(|e| LuftError::ThresholdsLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_table(&content, path)
}

/// Parse a threshold table from a JSON string.
pub fn parse_table(json: &str, source: &Path) -> Result<ThresholdTableDef, LuftError> {
    let table: ThresholdTableDef =
        serde_json::from_str(json).map_err(|e| LuftError::ThresholdsLoad {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_table(&table)?;
    Ok(table)
}

/// Parse a threshold table from a JSON string (no file path context).
pub fn parse_table_str(json: &str) -> Result<ThresholdTableDef, LuftError> {
    let table: ThresholdTableDef = serde_json::from_str(json).map_err(LuftError::Json)?;
    validate_table(&table)?;
    Ok(table)
}

/// Validate that a threshold table is well-formed.
pub fn validate_table(table: &ThresholdTableDef) -> Result<(), LuftError> {
    if table.pollutants.is_empty() {
        return Err(LuftError::ThresholdsInvalid(
            "pollutants must not be empty".into(),
        ));
    }

    for (i, rule) in table.pollutants.iter().enumerate() {
        if table.pollutants[..i]
            .iter()
            .any(|r| r.pollutant == rule.pollutant)
        {
            return Err(LuftError::ThresholdsInvalid(format!(
                "duplicate rule for pollutant '{}'",
                rule.pollutant
            )));
        }

        if rule.bounds.is_empty() {
            return Err(LuftError::ThresholdsInvalid(format!(
                "pollutant '{}' has no bounds",
                rule.pollutant
            )));
        }

        if rule.bounds.contains_key(&Level::WORST) {
            return Err(LuftError::ThresholdsInvalid(format!(
                "pollutant '{}' has a bound for '{}', the residual band",
                rule.pollutant,
                Level::WORST
            )));
        }

        // BTreeMap iterates in severity order, so bounds must be ascending.
        let mut prev = None;
        for (level, bound) in &rule.bounds {
            if bound.is_sign_negative() || bound.is_zero() {
                return Err(LuftError::ThresholdsInvalid(format!(
                    "pollutant '{}' has non-positive bound {} for '{}'",
                    rule.pollutant, bound, level
                )));
            }
            if let Some(prev) = prev {
                if bound <= prev {
                    return Err(LuftError::ThresholdsInvalid(format!(
                        "pollutant '{}' has non-ascending bounds",
                        rule.pollutant
                    )));
                }
            }
            prev = Some(bound);
        }

        if rule.weight.is_sign_negative() || rule.weight.is_zero() {
            return Err(LuftError::ThresholdsInvalid(format!(
                "pollutant '{}' has non-positive weight {}",
                rule.pollutant, rule.weight
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_table() {
        let json = r#"{
            "name": "Test",
            "version": "1.0",
            "pollutants": [
                { "pollutant": "NO2", "bounds": { "good": "25", "moderate": "50" }, "weight": "1.3" }
            ]
        }"#;
        let table = parse_table_str(json).unwrap();
        assert_eq!(table.name, "Test");
        assert_eq!(table.pollutants.len(), 1);
    }

    #[test]
    fn test_default_weight_is_one() {
        let json = r#"{
            "name": "Test",
            "version": "1.0",
            "pollutants": [
                { "pollutant": "O3", "bounds": { "good": "100" } }
            ]
        }"#;
        let table = parse_table_str(json).unwrap();
        assert_eq!(
            table.pollutants[0].weight,
            rust_decimal::Decimal::ONE
        );
    }

    #[test]
    fn test_empty_pollutants_rejected() {
        let json = r#"{ "name": "Bad", "version": "1.0", "pollutants": [] }"#;
        assert!(parse_table_str(json).is_err());
    }

    #[test]
    fn test_duplicate_pollutant_rejected() {
        let json = r#"{
            "name": "Bad",
            "version": "1.0",
            "pollutants": [
                { "pollutant": "NO2", "bounds": { "good": "25" } },
                { "pollutant": "NO2", "bounds": { "good": "30" } }
            ]
        }"#;
        assert!(parse_table_str(json).is_err());
    }

    #[test]
    fn test_bound_on_worst_level_rejected() {
        let json = r#"{
            "name": "Bad",
            "version": "1.0",
            "pollutants": [
                { "pollutant": "NO2", "bounds": { "good": "25", "high": "100" } }
            ]
        }"#;
        assert!(parse_table_str(json).is_err());
    }

    #[test]
    fn test_non_ascending_bounds_rejected() {
        let json = r#"{
            "name": "Bad",
            "version": "1.0",
            "pollutants": [
                { "pollutant": "NO2", "bounds": { "good": "50", "moderate": "25" } }
            ]
        }"#;
        assert!(parse_table_str(json).is_err());
    }

    #[test]
    fn test_non_positive_weight_rejected() {
        let json = r#"{
            "name": "Bad",
            "version": "1.0",
            "pollutants": [
                { "pollutant": "NO2", "bounds": { "good": "25" }, "weight": "0" }
            ]
        }"#;
        assert!(parse_table_str(json).is_err());
    }
}
