use crate::model::{Level, Pollutant};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A threshold table defining severity bands and health-impact weights
/// per pollutant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdTableDef {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    #[serde(default)]
    pub level_descriptions: BTreeMap<Level, String>,
    pub pollutants: Vec<PollutantRuleDef>,
}

/// Bands and weight for a single pollutant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollutantRuleDef {
    pub pollutant: Pollutant,
    /// Upper concentration bound per banded level (as strings for exact
    /// decimals). The worst level has no bound; values at or above every
    /// bound fall into it.
    pub bounds: BTreeMap<Level, Decimal>,
    /// Positive multiplier reflecting health impact, used by the composite
    /// score and the pollution index.
    #[serde(default = "default_weight")]
    pub weight: Decimal,
    /// Unit string for display. Default: "ug/m3".
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

fn default_weight() -> Decimal {
    Decimal::ONE
}

/// Bound scale factor applied in sensitive-population mode (children,
/// elderly, pre-existing respiratory conditions).
pub fn sensitive_factor() -> Decimal {
    // 0.7
    Decimal::new(7, 1)
}

impl ThresholdTableDef {
    /// Look up the rule for a pollutant kind, if the table has one.
    pub fn rule(&self, pollutant: Pollutant) -> Option<&PollutantRuleDef> {
        self.pollutants.iter().find(|r| r.pollutant == pollutant)
    }

    /// Derive a stricter table for sensitive populations by scaling every
    /// bound with `sensitive_factor`. Weights are unchanged.
    pub fn for_sensitive(&self) -> ThresholdTableDef {
        let factor = sensitive_factor();
        let mut table = self.clone();
        table.name = format!("{} (sensitive)", self.name);
        for rule in &mut table.pollutants {
            for bound in rule.bounds.values_mut() {
                *bound *= factor;
            }
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn pm25_rule() -> PollutantRuleDef {
        PollutantRuleDef {
            pollutant: Pollutant::Pm25,
            bounds: BTreeMap::from([(Level::Good, dec!(15)), (Level::Moderate, dec!(25))]),
            weight: dec!(1.5),
            unit: None,
            note: None,
        }
    }

    #[test]
    fn test_rule_lookup() {
        let table = ThresholdTableDef {
            name: "Test".into(),
            description: None,
            version: "1".into(),
            level_descriptions: BTreeMap::new(),
            pollutants: vec![pm25_rule()],
        };
        assert!(table.rule(Pollutant::Pm25).is_some());
        assert!(table.rule(Pollutant::Co).is_none());
    }

    #[test]
    fn test_sensitive_scales_bounds_not_weights() {
        let table = ThresholdTableDef {
            name: "Test".into(),
            description: None,
            version: "1".into(),
            level_descriptions: BTreeMap::new(),
            pollutants: vec![pm25_rule()],
        };
        let sensitive = table.for_sensitive();
        let rule = sensitive.rule(Pollutant::Pm25).unwrap();
        assert_eq!(rule.bounds[&Level::Good], dec!(10.5));
        assert_eq!(rule.bounds[&Level::Moderate], dec!(17.5));
        assert_eq!(rule.weight, dec!(1.5));
        assert!(sensitive.name.contains("sensitive"));
    }
}
