use crate::model::{Level, Observation, Pollutant, PollutantReading};
use crate::score::index::{index_level, pollution_index};
use crate::thresholds::schema::ThresholdTableDef;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Group readings into observations by (station, timestamp).
///
/// Groups appear in first-encounter order. Duplicate readings of one
/// pollutant within a group are averaged, so downstream scoring sees at
/// most one reading per kind.
pub fn group_observations(readings: &[PollutantReading]) -> Vec<Observation> {
    let mut order: Vec<(String, DateTime<Utc>)> = Vec::new();
    let mut groups: HashMap<(String, DateTime<Utc>), Vec<&PollutantReading>> = HashMap::new();

    for reading in readings {
        let key = (reading.station.clone(), reading.timestamp);
        if !groups.contains_key(&key) {
            order.push(key.clone());
        }
        groups.entry(key).or_default().push(reading);
    }

    order
        .into_iter()
        .map(|key| {
            let members = groups.remove(&key).unwrap_or_default();
            build_observation(members)
        })
        .collect()
}

fn build_observation(members: Vec<&PollutantReading>) -> Observation {
    let first = members[0];
    let station = first.station.clone();
    let timestamp = first.timestamp;
    let city = first.city.clone();
    let coordinates = first.coordinates;

    // Merge duplicates of one kind into their mean, keeping kinds in
    // first-appearance order.
    let mut readings: Vec<PollutantReading> = Vec::new();
    let mut counts: Vec<u32> = Vec::new();
    for reading in members {
        match readings
            .iter()
            .position(|m| m.pollutant == reading.pollutant)
        {
            Some(i) => {
                readings[i].concentration += reading.concentration;
                counts[i] += 1;
            }
            None => {
                readings.push(reading.clone());
                counts.push(1);
            }
        }
    }
    for (reading, &count) in readings.iter_mut().zip(&counts) {
        if count > 1 {
            reading.concentration /= Decimal::from(count);
        }
    }

    Observation {
        station,
        timestamp,
        city,
        coordinates,
        readings,
    }
}

/// Aggregated picture for one normalized city.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitySummary {
    pub city: String,
    pub stations: usize,
    pub readings: usize,
    /// Mean concentration per pollutant across all readings.
    pub mean_concentrations: BTreeMap<Pollutant, Decimal>,
    /// Pollutant with the highest mean concentration.
    pub dominant: Option<Pollutant>,
    /// Weighted pollution index over the mean concentrations.
    pub index: Decimal,
    pub index_level: Level,
}

/// Summarize readings per city, ranked by pollution index, worst first.
///
/// Readings without a usable city are left out.
pub fn city_summaries(
    readings: &[PollutantReading],
    table: &ThresholdTableDef,
) -> Vec<CitySummary> {
    let mut by_city: BTreeMap<&str, Vec<&PollutantReading>> = BTreeMap::new();
    for reading in readings {
        if let Some(city) = reading.city.as_deref() {
            by_city.entry(city).or_default().push(reading);
        }
    }

    let mut summaries: Vec<CitySummary> = by_city
        .into_iter()
        .map(|(city, members)| summarize_city(city, &members, table))
        .collect();

    summaries.sort_by(|a, b| b.index.cmp(&a.index).then_with(|| a.city.cmp(&b.city)));
    summaries
}

fn summarize_city(
    city: &str,
    members: &[&PollutantReading],
    table: &ThresholdTableDef,
) -> CitySummary {
    let stations: HashSet<&str> = members.iter().map(|r| r.station.as_str()).collect();

    let mut sums: BTreeMap<Pollutant, (Decimal, u32)> = BTreeMap::new();
    for reading in members {
        let entry = sums.entry(reading.pollutant).or_insert((Decimal::ZERO, 0));
        entry.0 += reading.concentration;
        entry.1 += 1;
    }
    let mean_concentrations: BTreeMap<Pollutant, Decimal> = sums
        .into_iter()
        .map(|(pollutant, (sum, count))| (pollutant, sum / Decimal::from(count)))
        .collect();

    let dominant = mean_concentrations
        .iter()
        .max_by_key(|(_, mean)| **mean)
        .map(|(pollutant, _)| *pollutant);

    let index = pollution_index(&mean_concentrations, table);

    CitySummary {
        city: city.to_string(),
        stations: stations.len(),
        readings: members.len(),
        mean_concentrations,
        dominant,
        index,
        index_level: index_level(index),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Coordinates;
    use crate::thresholds::builtin::load_preset;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn reading(
        station: &str,
        city: &str,
        pollutant: Pollutant,
        concentration: Decimal,
        hour: u32,
    ) -> PollutantReading {
        PollutantReading {
            pollutant,
            concentration,
            station: station.into(),
            city: Some(city.into()),
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap(),
            coordinates: Coordinates {
                latitude: 48.85,
                longitude: 2.35,
            },
        }
    }

    #[test]
    fn test_grouping_by_station_and_time() {
        let readings = vec![
            reading("A", "PARIS", Pollutant::No2, dec!(30), 14),
            reading("B", "LYON", Pollutant::No2, dec!(20), 14),
            reading("A", "PARIS", Pollutant::Pm10, dec!(50), 14),
            reading("A", "PARIS", Pollutant::No2, dec!(35), 15),
        ];
        let observations = group_observations(&readings);
        assert_eq!(observations.len(), 3);
        assert_eq!(observations[0].station, "A");
        assert_eq!(observations[0].readings.len(), 2);
        assert_eq!(observations[1].station, "B");
        assert_eq!(observations[2].readings.len(), 1);
    }

    #[test]
    fn test_duplicate_kinds_averaged() {
        let readings = vec![
            reading("A", "PARIS", Pollutant::No2, dec!(30), 14),
            reading("A", "PARIS", Pollutant::No2, dec!(50), 14),
        ];
        let observations = group_observations(&readings);
        assert_eq!(observations.len(), 1);
        assert_eq!(observations[0].readings.len(), 1);
        assert_eq!(observations[0].readings[0].concentration, dec!(40));
    }

    #[test]
    fn test_city_summaries_ranked_by_index() {
        let table = load_preset("who").unwrap();
        let readings = vec![
            reading("A", "PARIS", Pollutant::Pm25, dec!(25), 14),
            reading("B", "BREST", Pollutant::Pm25, dec!(5), 14),
            reading("C", "PARIS", Pollutant::Pm25, dec!(35), 14),
        ];
        let summaries = city_summaries(&readings, &table);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].city, "PARIS");
        assert_eq!(summaries[0].stations, 2);
        assert_eq!(summaries[0].readings, 2);
        // PARIS PM2.5 mean 30 -> 30/25*100 = 120
        assert_eq!(summaries[0].index, dec!(120.0));
        assert_eq!(summaries[0].index_level, Level::High);
        assert!(summaries[1].index < summaries[0].index);
    }

    #[test]
    fn test_dominant_pollutant() {
        let table = load_preset("who").unwrap();
        let readings = vec![
            reading("A", "PARIS", Pollutant::No2, dec!(30), 14),
            reading("A", "PARIS", Pollutant::O3, dec!(90), 14),
        ];
        let summaries = city_summaries(&readings, &table);
        assert_eq!(summaries[0].dominant, Some(Pollutant::O3));
    }

    #[test]
    fn test_readings_without_city_left_out() {
        let table = load_preset("who").unwrap();
        let mut anonymous = reading("A", "PARIS", Pollutant::No2, dec!(30), 14);
        anonymous.city = None;
        let summaries = city_summaries(&[anonymous], &table);
        assert!(summaries.is_empty());
    }
}
