use anyhow::Result;
use colored::Colorize;
use rent_forecast::{
    config, estimator,
    models::{estimate::EstimateResponse, query::RentQuery},
    projection::TrendDirection,
};
use std::path::Path;

use crate::cli::QueryOptions;

/// Build a query from CLI arguments
pub fn build_query(location: String, options: &QueryOptions) -> RentQuery {
    let query = RentQuery::new(location, options.bedrooms, options.years);
    match options.kind {
        Some(kind) => query.with_kind(kind),
        None => query,
    }
}

/// Execute the estimate command
pub async fn execute(
    config_path: &Path,
    location: String,
    options: QueryOptions,
    json: bool,
) -> Result<()> {
    let cfg = config::load_config(config_path)?;
    let query = build_query(location, &options);

    let response = estimator::estimate(&reqwest::Client::new(), &cfg, &query).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_response(&response);
    }
    Ok(())
}

fn print_response(response: &EstimateResponse) {
    let estimate = &response.estimate;

    println!(
        "{} {}",
        estimate.location.bold(),
        format!("({} units)", estimate.bedrooms.label()).dimmed()
    );
    println!(
        "  {}: {}",
        "Current Rent".cyan(),
        format_money(estimate.current_rent).bold()
    );
    println!(
        "  {}: {}  {}",
        "Trend".cyan(),
        format_growth(response.milestones.growth_rate_percent),
        format!("volatility ±{:.1}%", estimate.volatility).dimmed()
    );
    if let (Some(change), Some(direction)) =
        (response.yearly_change_percent, response.trend_direction)
    {
        println!(
            "  {}: {}",
            "Yearly Change".cyan(),
            format_change(change, direction)
        );
    }
    println!();

    println!("{}", "Projections:".bold());
    println!("  6 months: {}", format_money(response.milestones.six_months));
    println!("  1 year:   {}", format_money(response.milestones.one_year));
    println!("  3 years:  {}", format_money(response.milestones.three_years));
    for (i, rent) in estimate.projections.iter().enumerate() {
        println!("  Year {}:   {}", i + 1, format_money(*rent));
    }
    println!();

    println!("{}", "Market Health:".bold());
    println!("  Affordability: {}", gauge(response.scores.affordability));
    println!("  Risk:          {}", gauge(response.scores.risk));
    println!();

    println!("  {}: {}", "Source".cyan(), estimate.source);
    if response.degraded {
        println!("  {}", "Upstream unavailable; showing fallback data".yellow());
    }
    for warning in &response.warnings {
        println!("  {} {}", "!".yellow(), warning.dimmed());
    }
}

/// "$1,234" with thousands separators; non-finite values print as "-"
pub fn format_money(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded < 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

pub fn format_growth(percent: f64) -> colored::ColoredString {
    if percent >= 0.0 {
        format!("+{:.1}% UPWARD", percent).green()
    } else {
        format!("{:.1}% DOWNWARD", percent).red()
    }
}

fn format_change(percent: f64, direction: TrendDirection) -> colored::ColoredString {
    let sign = if percent >= 0.0 { "+" } else { "" };
    let text = format!("{}{:.1}% {}", sign, percent, direction.as_str());
    match direction {
        TrendDirection::Upward => text.green(),
        TrendDirection::Downward => text.red(),
    }
}

fn gauge(score: f64) -> String {
    let filled = (score / 5.0).round() as usize;
    format!("{}{} {:>5.1}", "█".repeat(filled), "░".repeat(20 - filled.min(20)), score)
}
