use luft_core::aggregate::CitySummary;
use luft_core::model::Level;
use luft_core::score::outcome::ScoreReport;

pub fn print_report(report: &ScoreReport, show_all: bool, verbose: bool) {
    println!("=== {} ===\n", report.table_name);

    if report.observations.is_empty() {
        println!("  No scorable observations.");
        return;
    }

    let counts = report.level_counts();
    println!(
        "  {} observations: {} Good, {} Moderate, {} High\n",
        report.observations.len(),
        counts[0].1,
        counts[1].1,
        counts[2].1
    );

    let shown: Vec<_> = if show_all {
        report.observations.iter().collect()
    } else {
        report
            .observations
            .iter()
            .filter(|o| o.overall > Level::Good)
            .collect()
    };

    if shown.is_empty() {
        println!("  All observations are Good. Use --show-all to list them.");
        return;
    }

    let max_station = shown.iter().map(|o| o.station.len()).max().unwrap_or(10);

    for obs in &shown {
        let place = match &obs.city {
            Some(city) => format!("{} ({})", obs.station, city),
            None => obs.station.clone(),
        };
        println!(
            "  {:<width$}  {}  score {:>8}  -> {} ({})",
            place,
            obs.timestamp.format("%Y-%m-%d %H:%M"),
            obs.score.round_dp(1),
            obs.overall,
            obs.overall_reason,
            width = max_station + 2
        );

        if verbose {
            for ps in &obs.pollutant_scores {
                println!("    {}", ps.reason);
            }
            if !obs.skipped.is_empty() {
                let skipped: Vec<&str> = obs.skipped.iter().map(|p| p.as_str()).collect();
                println!("    No threshold entry for: {}", skipped.join(", "));
            }
            println!();
        }
    }
}

pub fn print_cities(table_name: &str, summaries: &[CitySummary]) {
    println!("=== Pollution index by city ({}) ===\n", table_name);

    if summaries.is_empty() {
        println!("  No readings with a usable city.");
        return;
    }

    let max_city = summaries
        .iter()
        .map(|s| s.city.len())
        .max()
        .unwrap_or(10)
        .max("City".len());

    println!(
        "  {:<4}  {:<width$}  {:>7}  {:<10}  {:<9}  {:>9}  {:>8}",
        "Rank",
        "City",
        "Index",
        "Level",
        "Dominant",
        "Stations",
        "Readings",
        width = max_city
    );

    for (i, summary) in summaries.iter().enumerate() {
        let dominant = summary
            .dominant
            .map(|p| p.as_str())
            .unwrap_or("-");
        println!(
            "  {:<4}  {:<width$}  {:>7}  {:<10}  {:<9}  {:>9}  {:>8}",
            i + 1,
            summary.city,
            summary.index,
            summary.index_level,
            dominant,
            summary.stations,
            summary.readings,
            width = max_city
        );
    }

    println!();
}
