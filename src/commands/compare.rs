use anyhow::Result;
use colored::Colorize;
use futures::future::join_all;
use rent_forecast::{comparison::ComparisonTable, config, estimator};
use std::path::Path;

use crate::cli::QueryOptions;
use crate::commands::estimate::{build_query, format_money};

/// Execute the compare command
///
/// Estimates every location concurrently, then folds the results into a
/// comparison table so repeated locations collapse into one row.
pub async fn execute(config_path: &Path, locations: Vec<String>, options: QueryOptions) -> Result<()> {
    let cfg = config::load_config(config_path)?;
    let client = reqwest::Client::new();

    let queries: Vec<_> = locations
        .into_iter()
        .map(|location| build_query(location, &options))
        .collect();

    let results = join_all(
        queries
            .iter()
            .map(|query| estimator::estimate(&client, &cfg, query)),
    )
    .await;

    let mut table = ComparisonTable::new();
    let mut degraded = Vec::new();
    for (query, result) in queries.iter().zip(results) {
        match result {
            Ok(response) => {
                if response.degraded {
                    degraded.push(response.estimate.location.clone());
                }
                table.upsert(response.estimate);
            }
            Err(e) => {
                eprintln!("{} {}: {}", "✗".red(), query.location, e);
            }
        }
    }

    if table.is_empty() {
        anyhow::bail!("No location could be estimated");
    }

    let years = options.years as usize;
    print!("{:<24} {:>10} {:>8}", "Location".bold(), "Current".bold(), "Growth".bold());
    for year in 1..=years {
        print!(" {:>10}", format!("Year {}", year).bold());
    }
    println!(" {:>9}", "Source".bold());

    for row in table.rows() {
        print!(
            "{:<24} {:>10} {:>7.1}%",
            truncate(&row.location, 24),
            format_money(row.current_rent),
            (row.trend - 1.0) * 100.0
        );
        for rent in &row.projections {
            print!(" {:>10}", format_money(*rent));
        }
        println!(" {:>9}", row.source.as_str());
    }

    if !degraded.is_empty() {
        println!();
        println!(
            "{} {}",
            "Fallback data used for:".yellow(),
            degraded.join(", ")
        );
    }

    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max - 1).collect();
        out.push('…');
        out
    }
}
