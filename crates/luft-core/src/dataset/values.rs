use crate::error::LuftError;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Highest plausible concentration in ug/m3. Values at or above this are
/// treated as sensor spikes and dropped.
pub const MAX_VALUE: i64 = 1000;

/// Parse a concentration cell from the export.
///
/// Handles formats like:
/// - "68" -> 68
/// - "0.5" -> 0.5
/// - "0,5" -> 0.5 (French decimal comma)
/// - "", "-", "n.a.", "N/A" are empty markers (returns None)
pub fn parse_concentration(s: &str) -> Result<Option<Decimal>, LuftError> {
    let s = s.trim();

    if s.is_empty() || s == "-" || s == "n.a." || s == "N/A" {
        return Ok(None);
    }

    let normalized = s.replace(',', ".");
    let value = Decimal::from_str(&normalized)
        .map_err(|e| LuftError::ParseError(format!("invalid concentration '{}': {}", s, e)))?;
    Ok(Some(value))
}

/// Range filter from the source dataset: negative readings are sensor
/// errors, values at or above `MAX_VALUE` are spikes.
pub fn in_plausible_range(value: Decimal) -> bool {
    value >= Decimal::ZERO && value < Decimal::from(MAX_VALUE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_integer() {
        let v = parse_concentration("68").unwrap().unwrap();
        assert_eq!(v, dec!(68));
    }

    #[test]
    fn test_decimal_point() {
        let v = parse_concentration("0.5").unwrap().unwrap();
        assert_eq!(v, dec!(0.5));
    }

    #[test]
    fn test_decimal_comma() {
        let v = parse_concentration("0,5").unwrap().unwrap();
        assert_eq!(v, dec!(0.5));
    }

    #[test]
    fn test_whitespace_trimmed() {
        let v = parse_concentration("  68  ").unwrap().unwrap();
        assert_eq!(v, dec!(68));
    }

    #[test]
    fn test_empty_markers_return_none() {
        assert!(parse_concentration("").unwrap().is_none());
        assert!(parse_concentration("-").unwrap().is_none());
        assert!(parse_concentration("N/A").unwrap().is_none());
    }

    #[test]
    fn test_invalid_returns_error() {
        assert!(parse_concentration("abc").is_err());
    }

    #[test]
    fn test_plausible_range() {
        assert!(in_plausible_range(dec!(0)));
        assert!(in_plausible_range(dec!(999.9)));
        assert!(!in_plausible_range(dec!(-1)));
        assert!(!in_plausible_range(dec!(1000)));
    }
}
