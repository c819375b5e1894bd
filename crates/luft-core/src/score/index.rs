use crate::model::{Level, Pollutant};
use crate::thresholds::schema::ThresholdTableDef;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Cap for a single pollutant's normalized contribution.
const MAX_NORMALIZED: i64 = 150;
/// Index values below this are Good.
const INDEX_MODERATE: i64 = 50;
/// Index values below this are Moderate; at or above, High.
const INDEX_HIGH: i64 = 100;

/// Normalized, weighted composite pollution index.
///
/// Each pollutant's mean concentration is normalized against its Moderate
/// bound (100 = at the bound), capped at 150, then averaged using the
/// health-impact weights. Unlike the raw composite score this is
/// comparable across locations measuring different pollutant mixes.
/// Pollutants without a table entry or without a Moderate bound are
/// ignored; returns zero when nothing contributes.
pub fn pollution_index(
    means: &BTreeMap<Pollutant, Decimal>,
    table: &ThresholdTableDef,
) -> Decimal {
    let mut weighted_sum = Decimal::ZERO;
    let mut total_weight = Decimal::ZERO;

    for (&pollutant, &mean) in means {
        let Some(rule) = table.rule(pollutant) else {
            continue;
        };
        let Some(&moderate) = rule.bounds.get(&Level::Moderate) else {
            continue;
        };
        if moderate <= Decimal::ZERO {
            continue;
        }

        let normalized =
            (mean / moderate * Decimal::ONE_HUNDRED).min(Decimal::from(MAX_NORMALIZED));
        weighted_sum += normalized * rule.weight;
        total_weight += rule.weight;
    }

    if total_weight.is_zero() {
        return Decimal::ZERO;
    }

    (weighted_sum / total_weight).round_dp(1)
}

/// Band an index value: below 50 Good, below 100 Moderate, else High.
pub fn index_level(index: Decimal) -> Level {
    if index < Decimal::from(INDEX_MODERATE) {
        Level::Good
    } else if index < Decimal::from(INDEX_HIGH) {
        Level::Moderate
    } else {
        Level::High
    }
}
