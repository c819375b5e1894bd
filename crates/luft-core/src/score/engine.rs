use crate::error::LuftError;
use crate::model::{Level, Observation, Pollutant, PollutantReading};
use crate::score::outcome::{ObservationScore, PollutantScore};
use crate::thresholds::schema::{PollutantRuleDef, ThresholdTableDef};
use rust_decimal::Decimal;

/// Classify a single concentration against the table.
///
/// Scans the banded levels in ascending severity order and returns the
/// first level whose upper bound exceeds the concentration. A value at or
/// above every bound falls into the worst band, so classification is
/// total for any non-negative concentration.
pub fn classify(
    pollutant: Pollutant,
    concentration: Decimal,
    table: &ThresholdTableDef,
) -> Result<Level, LuftError> {
    let rule = table
        .rule(pollutant)
        .ok_or_else(|| LuftError::UnknownPollutant {
            pollutant: pollutant.to_string(),
        })?;
    Ok(band(concentration, rule))
}

/// Classify one reading against the table.
pub fn classify_reading(
    reading: &PollutantReading,
    table: &ThresholdTableDef,
) -> Result<Level, LuftError> {
    classify(reading.pollutant, reading.concentration, table)
}

fn band(concentration: Decimal, rule: &PollutantRuleDef) -> Level {
    for level in Level::BANDED {
        if let Some(&bound) = rule.bounds.get(&level) {
            if concentration < bound {
                return level;
            }
        }
    }
    Level::WORST
}

/// Composite score for the readings of one observation.
///
/// The score is the mean of weight * concentration over the readings
/// present: a weighted average of raw concentrations, not a normalized
/// index. Pollutants absent from the observation are not imputed, so the
/// score is only comparable between observations measuring the same
/// kinds. The overall level is the worst per-reading classification.
pub fn composite_score(
    readings: &[PollutantReading],
    table: &ThresholdTableDef,
) -> Result<(Decimal, Level), LuftError> {
    if readings.is_empty() {
        return Err(LuftError::EmptyObservation);
    }

    let mut sum = Decimal::ZERO;
    let mut overall = Level::Good;
    for reading in readings {
        let rule = table
            .rule(reading.pollutant)
            .ok_or_else(|| LuftError::UnknownPollutant {
                pollutant: reading.pollutant.to_string(),
            })?;
        sum += reading.concentration * rule.weight;
        overall = overall.max(band(reading.concentration, rule));
    }

    Ok((sum / Decimal::from(readings.len()), overall))
}

/// Score a full observation.
///
/// Readings whose pollutant has no table entry are skipped and recorded,
/// never aborting the rest. Fails with `EmptyObservation` when nothing
/// scorable remains.
pub fn score_observation(
    observation: &Observation,
    table: &ThresholdTableDef,
) -> Result<ObservationScore, LuftError> {
    let mut pollutant_scores = Vec::new();
    let mut skipped = Vec::new();

    for reading in &observation.readings {
        match table.rule(reading.pollutant) {
            Some(rule) => pollutant_scores.push(score_reading(reading, rule)),
            None => skipped.push(reading.pollutant),
        }
    }

    if pollutant_scores.is_empty() {
        return Err(LuftError::EmptyObservation);
    }

    let sum: Decimal = pollutant_scores.iter().map(|s| s.weighted).sum();
    let score = sum / Decimal::from(pollutant_scores.len());

    let (overall, overall_reason, determining) = determine_overall(&pollutant_scores);

    Ok(ObservationScore {
        station: observation.station.clone(),
        city: observation.city.clone(),
        timestamp: observation.timestamp,
        coordinates: observation.coordinates,
        score,
        overall,
        overall_reason,
        determining,
        pollutant_scores,
        skipped,
    })
}

/// Classify a single reading and build its result with the reason string.
fn score_reading(reading: &PollutantReading, rule: &PollutantRuleDef) -> PollutantScore {
    let level = band(reading.concentration, rule);
    let unit = rule.unit.as_deref().unwrap_or("ug/m3");

    // Highest bound below the assigned band, i.e. the one that was crossed.
    let exceeded_bound = Level::BANDED
        .iter()
        .rev()
        .filter(|banded| **banded < level)
        .find_map(|banded| rule.bounds.get(banded).copied());

    let reason = match (rule.bounds.get(&level), exceeded_bound) {
        (Some(bound), None) => format!(
            "{}: {} {} < {} -> {}",
            reading.pollutant, reading.concentration, unit, bound, level
        ),
        (None, Some(crossed)) => format!(
            "{}: {} {} >= {} -> exceeds all bounds -> {}",
            reading.pollutant, reading.concentration, unit, crossed, level
        ),
        (Some(bound), Some(crossed)) => format!(
            "{}: {} {} >= {} but < {} -> {}",
            reading.pollutant, reading.concentration, unit, crossed, bound, level
        ),
        (None, None) => format!(
            "{}: {} {} -> {}",
            reading.pollutant, reading.concentration, unit, level
        ),
    };

    PollutantScore {
        pollutant: reading.pollutant,
        concentration: reading.concentration,
        weight: rule.weight,
        weighted: reading.concentration * rule.weight,
        level,
        reason,
        exceeded_bound,
    }
}

/// Determine the overall level from per-pollutant results.
fn determine_overall(results: &[PollutantScore]) -> (Level, String, Vec<Pollutant>) {
    let worst = results
        .iter()
        .map(|r| r.level)
        .max()
        .unwrap_or(Level::Good);

    let determining: Vec<Pollutant> = results
        .iter()
        .filter(|r| r.level == worst)
        .map(|r| r.pollutant)
        .collect();

    let reason = if determining.len() == 1 {
        format!("Determined by {} ({})", determining[0], worst)
    } else {
        format!(
            "Determined by {} pollutants at {} level",
            determining.len(),
            worst
        )
    };

    (worst, reason, determining)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;
    use std::collections::BTreeMap;

    fn make_table() -> ThresholdTableDef {
        ThresholdTableDef {
            name: "Test bands".into(),
            description: None,
            version: "1.0".into(),
            level_descriptions: BTreeMap::new(),
            pollutants: vec![
                PollutantRuleDef {
                    pollutant: Pollutant::Pm25,
                    bounds: BTreeMap::from([
                        (Level::Good, dec!(15)),
                        (Level::Moderate, dec!(25)),
                    ]),
                    weight: dec!(1.5),
                    unit: None,
                    note: None,
                },
                PollutantRuleDef {
                    pollutant: Pollutant::Pm10,
                    bounds: BTreeMap::from([
                        (Level::Good, dec!(45)),
                        (Level::Moderate, dec!(75)),
                    ]),
                    weight: dec!(1.2),
                    unit: None,
                    note: None,
                },
                PollutantRuleDef {
                    pollutant: Pollutant::No2,
                    bounds: BTreeMap::from([
                        (Level::Good, dec!(25)),
                        (Level::Moderate, dec!(50)),
                    ]),
                    weight: dec!(1.3),
                    unit: None,
                    note: None,
                },
            ],
        }
    }

    fn reading(pollutant: Pollutant, concentration: Decimal) -> PollutantReading {
        PollutantReading {
            pollutant,
            concentration,
            station: "FR-STATION-1".into(),
            city: Some("PARIS".into()),
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 14, 0, 0).unwrap(),
            coordinates: crate::model::Coordinates {
                latitude: 48.85,
                longitude: 2.35,
            },
        }
    }

    fn observation(readings: Vec<PollutantReading>) -> Observation {
        Observation {
            station: "FR-STATION-1".into(),
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 14, 0, 0).unwrap(),
            city: Some("PARIS".into()),
            coordinates: crate::model::Coordinates {
                latitude: 48.85,
                longitude: 2.35,
            },
            readings,
        }
    }

    #[test]
    fn test_classify_below_first_bound_is_good() {
        let table = make_table();
        let level = classify(Pollutant::Pm25, dec!(14.9), &table).unwrap();
        assert_eq!(level, Level::Good);
    }

    #[test]
    fn test_classify_at_bound_moves_to_next_band() {
        let table = make_table();
        // A bound is exclusive: exactly 15 is no longer Good.
        assert_eq!(
            classify(Pollutant::Pm25, dec!(15.0), &table).unwrap(),
            Level::Moderate
        );
        assert_eq!(
            classify(Pollutant::Pm25, dec!(25.0), &table).unwrap(),
            Level::High
        );
    }

    #[test]
    fn test_classify_above_all_bounds_is_high() {
        let table = make_table();
        assert_eq!(
            classify(Pollutant::Pm25, dec!(25.1), &table).unwrap(),
            Level::High
        );
        assert_eq!(
            classify(Pollutant::Pm25, dec!(900), &table).unwrap(),
            Level::High
        );
    }

    #[test]
    fn test_classify_monotonic_in_concentration() {
        let table = make_table();
        let mut prev = Level::Good;
        for v in [0, 5, 14, 15, 20, 24, 25, 30, 100] {
            let level = classify(Pollutant::Pm25, Decimal::from(v), &table).unwrap();
            assert!(level >= prev, "severity decreased at {}", v);
            prev = level;
        }
    }

    #[test]
    fn test_classify_unknown_pollutant() {
        let table = make_table();
        let err = classify(Pollutant::Co, dec!(10), &table).unwrap_err();
        assert!(matches!(err, LuftError::UnknownPollutant { .. }));
    }

    #[test]
    fn test_composite_weighted_mean() {
        let table = make_table();
        // NO2 30 * 1.3 = 39, PM10 50 * 1.2 = 60, mean = 49.5
        let readings = vec![
            reading(Pollutant::No2, dec!(30)),
            reading(Pollutant::Pm10, dec!(50)),
        ];
        let (score, overall) = composite_score(&readings, &table).unwrap();
        assert_eq!(score, dec!(49.5));
        assert_eq!(overall, Level::Moderate);
    }

    #[test]
    fn test_composite_single_reading_is_weight_times_value() {
        let table = make_table();
        let readings = vec![reading(Pollutant::Pm25, dec!(10))];
        let (score, overall) = composite_score(&readings, &table).unwrap();
        assert_eq!(score, dec!(15.0));
        assert_eq!(overall, Level::Good);
    }

    #[test]
    fn test_composite_order_invariant() {
        let table = make_table();
        let forward = vec![
            reading(Pollutant::No2, dec!(30)),
            reading(Pollutant::Pm10, dec!(50)),
            reading(Pollutant::Pm25, dec!(8)),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();
        let (a, la) = composite_score(&forward, &table).unwrap();
        let (b, lb) = composite_score(&reversed, &table).unwrap();
        assert_eq!(a, b);
        assert_eq!(la, lb);
    }

    #[test]
    fn test_composite_empty_observation() {
        let table = make_table();
        let err = composite_score(&[], &table).unwrap_err();
        assert!(matches!(err, LuftError::EmptyObservation));
    }

    #[test]
    fn test_composite_unknown_pollutant_fails() {
        let table = make_table();
        let readings = vec![reading(Pollutant::Co, dec!(500))];
        let err = composite_score(&readings, &table).unwrap_err();
        assert!(matches!(err, LuftError::UnknownPollutant { .. }));
    }

    #[test]
    fn test_score_observation_worst_of_overall() {
        let table = make_table();
        let obs = observation(vec![
            reading(Pollutant::No2, dec!(30)),
            reading(Pollutant::Pm25, dec!(8)),
        ]);
        let result = score_observation(&obs, &table).unwrap();
        assert_eq!(result.overall, Level::Moderate);
        assert_eq!(result.determining, vec![Pollutant::No2]);
        assert!(result.overall_reason.contains("NO2"));
        assert!(result.skipped.is_empty());
    }

    #[test]
    fn test_score_observation_skips_unknown_kinds() {
        let table = make_table();
        let obs = observation(vec![
            reading(Pollutant::No2, dec!(30)),
            reading(Pollutant::Co, dec!(5000)),
        ]);
        let result = score_observation(&obs, &table).unwrap();
        assert_eq!(result.skipped, vec![Pollutant::Co]);
        assert_eq!(result.pollutant_scores.len(), 1);
        // CO does not contribute to the composite.
        assert_eq!(result.score, dec!(39.0));
    }

    #[test]
    fn test_score_observation_nothing_scorable() {
        let table = make_table();
        let obs = observation(vec![reading(Pollutant::Co, dec!(5000))]);
        let err = score_observation(&obs, &table).unwrap_err();
        assert!(matches!(err, LuftError::EmptyObservation));
    }

    #[test]
    fn test_reason_strings_populated() {
        let table = make_table();
        let obs = observation(vec![
            reading(Pollutant::Pm25, dec!(8)),
            reading(Pollutant::No2, dec!(30)),
            reading(Pollutant::Pm10, dec!(200)),
        ]);
        let result = score_observation(&obs, &table).unwrap();
        for ps in &result.pollutant_scores {
            assert!(!ps.reason.is_empty());
        }
        let pm10 = result
            .pollutant_scores
            .iter()
            .find(|p| p.pollutant == Pollutant::Pm10)
            .unwrap();
        assert!(pm10.reason.contains("exceeds all bounds"));
        assert_eq!(pm10.exceeded_bound, Some(dec!(75)));
        let no2 = result
            .pollutant_scores
            .iter()
            .find(|p| p.pollutant == Pollutant::No2)
            .unwrap();
        assert_eq!(no2.exceeded_bound, Some(dec!(25)));
    }
}
