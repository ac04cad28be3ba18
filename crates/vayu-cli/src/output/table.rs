use vayu_core::advice::{Advice, AdviceBook};
use vayu_core::classify::outcome::{FetchOutcome, StationReport};
use vayu_core::classify::Classifier;
use vayu_core::format::format_value;
use vayu_core::pollutant::PollutantDescriptor;
use vayu_core::rankings::{CityRanking, RankedCity, RankingDataset};
use vayu_core::scale::schema::ScaleDef;

/// Widest entry in characters, for `{:<width$}` padding. Byte length
/// overcounts labels such as "NO₂" or "µg/m³".
pub fn column_width<'a>(cells: impl IntoIterator<Item = &'a str>, min: usize) -> usize {
    cells
        .into_iter()
        .map(|c| c.chars().count())
        .max()
        .unwrap_or(0)
        .max(min)
}

/// Text gauge such as `[######..............]`.
pub fn gauge_bar(fraction: f64, width: usize) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
}

pub fn print_outcomes(outcomes: &[FetchOutcome]) {
    for (i, outcome) in outcomes.iter().enumerate() {
        if i > 0 {
            println!();
        }
        match &outcome.result {
            Ok(report) => print_report(report),
            Err(e) => println!("=== {} ===\n\n  Could not load station: {}", outcome.query, e),
        }
    }
}

pub fn print_report(report: &StationReport) {
    println!("=== {} ===\n", report.station);

    println!(
        "  AQI {}  {} {}",
        report.aqi, report.tier.icon, report.tier.label
    );
    println!(
        "  {}  {}",
        gauge_bar(report.gauge_fraction, 30),
        report.tier.color
    );
    if let Some(ref dominant) = report.dominant_pollutant {
        println!("  Dominant pollutant: {}", dominant.long_name);
    }
    println!("  Updated: {}\n", report.updated);

    if !report.pollutants.is_empty() {
        println!("  Pollutants:");
        for row in &report.pollutants {
            println!("    {}", row.line);
        }
        println!();
    }

    if !report.weather.is_empty() {
        println!("  Weather:");
        for row in &report.weather {
            println!("    {}", row.line);
        }
        println!();
    }

    if !report.forecast.is_empty() {
        println!("  Forecast:");
        let max_name = column_width(report.forecast.iter().map(|f| f.name.as_str()), 4);
        for f in &report.forecast {
            println!(
                "    {}  {:<width$}  avg {:>4}  ({}-{})  {}",
                f.day,
                f.name,
                format_value(f.avg),
                format_value(f.min),
                format_value(f.max),
                f.tier_label,
                width = max_name
            );
        }
        println!();
    }

    println!("  {}", report.health_tip);

    if !report.attributions.is_empty() {
        println!("\n  Data: {}", report.attributions.join("; "));
    }
}

pub fn print_pollutants(descriptors: &[PollutantDescriptor]) {
    let max_code = column_width(descriptors.iter().map(|d| d.code.as_str()), 4);
    let max_name = column_width(descriptors.iter().map(|d| d.display_name.as_str()), 4);

    for d in descriptors {
        let unit = if d.unit.is_empty() { "-" } else { d.unit.as_str() };
        println!(
            "  {:<cw$}  {:<nw$}  {:<8}  {}",
            d.code,
            d.display_name,
            unit,
            d.long_name,
            cw = max_code,
            nw = max_name
        );
    }
}

pub fn print_rankings(dataset: &RankingDataset, rows: &[RankedCity]) {
    println!(
        "=== {} ({}, {}) ===\n",
        dataset.name, dataset.year, dataset.unit
    );

    let max_city = column_width(rows.iter().map(|r| r.city.as_str()), 4);

    println!(
        "  {:>4}  {:<width$}  {:>5}  {:<30}  Peak",
        "Rank",
        "City",
        "Avg",
        "Level",
        width = max_city
    );
    println!("  {}", "-".repeat(max_city + 62));
    for r in rows {
        println!(
            "  {:>4}  {:<width$}  {:>5}  {:<30}  {} {} ({})",
            r.rank,
            r.city,
            r.avg,
            r.tier_label,
            r.peak_month,
            r.peak_value,
            r.peak_tier_label,
            width = max_city
        );
    }

    println!("\n  National average: {}", dataset.national_average());
}

pub fn print_city(dataset: &RankingDataset, city: &CityRanking, classifier: &Classifier) {
    println!("=== {} ({} {}) ===\n", city.city, dataset.name, dataset.year);
    println!(
        "  Rank {}  annual average {} {}\n",
        city.rank, city.avg, dataset.unit
    );

    for (month, value) in city.monthly_series() {
        let tier = classifier.classify(f64::from(value));
        println!(
            "  {}  {:>4}  {}  {}",
            month,
            value,
            gauge_bar(classifier.gauge_fraction(f64::from(value)), 20),
            tier.label
        );
    }

    let (peak, peak_value) = city.peak_month();
    let (clean, clean_value) = city.cleanest_month();
    println!("\n  Worst month: {peak} ({peak_value})");
    println!("  Cleanest month: {clean} ({clean_value})");
}

pub fn print_tiers(scale: &ScaleDef) {
    let max_label = column_width(scale.tiers.iter().map(|t| t.label.as_str()), 10);

    for (i, tier) in scale.tiers.iter().enumerate() {
        let range = match scale.tiers.get(i + 1) {
            Some(next) => format!("{}-{}", tier.lower_bound, next.lower_bound - 1),
            None => format!("{}+", tier.lower_bound),
        };
        println!(
            "  {:<9}  {} {:<width$}  {}",
            range,
            tier.icon,
            tier.label,
            tier.color,
            width = max_label
        );
        println!("             {}", tier.advice);
        println!();
    }

    println!(
        "  {:<9}  {} {:<width$}  {}",
        "-",
        scale.no_data.icon,
        scale.no_data.label,
        scale.no_data.color,
        width = max_label
    );
    println!("             {}", scale.no_data.advice);
}

pub fn print_conditions(book: &AdviceBook) {
    for category in &book.categories {
        println!("{} {}", category.icon, category.name);
        for advice in &category.conditions {
            println!("  - {}", advice.name);
        }
        println!();
    }
    println!("Run `vayu advice <CONDITION>` for do's and don'ts.");
}

pub fn print_advice(advice: &Advice) {
    println!("=== {} ===\n", advice.name);

    println!("  Do:");
    for item in &advice.dos {
        println!("    + {}", item);
    }
    println!();

    println!("  Don't:");
    for item in &advice.donts {
        println!("    - {}", item);
    }
}
