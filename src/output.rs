//! Output formatting for query results.
//!
//! Supports plain text for terminals, JSON for scripting, and a debug dump
//! through the log.

use anyhow::Result;
use tracing::debug;

use crate::query::{FareSummary, ProductShare, Query, QueryOutput, StatusShare};

pub const INVALID_CHOICE: &str = "Invalid Choice!";
pub const NO_DATA: &str = "No data available";

/// Logs a query result using Rust's debug pretty-print format.
pub fn print_pretty(output: &QueryOutput) {
    debug!("{:#?}", output);
}

/// Serializes a query result as pretty-printed JSON.
pub fn render_json(output: &QueryOutput) -> Result<String> {
    Ok(serde_json::to_string_pretty(output)?)
}

/// Renders a query result as human-readable text. Fare lines are labeled
/// with `currency`.
pub fn render_text(output: &QueryOutput, currency: &str) -> String {
    match output {
        QueryOutput::TotalTrips { total } => format!("Total trips: {total}"),
        QueryOutput::TripsBreakdown { total, statuses } => {
            format!("Total trips: {total}\n{}", status_table(statuses))
        }
        QueryOutput::ProductBreakdown { products } => product_table(products),
        QueryOutput::FareAndDistance(summary) => fare_lines(summary, currency),
        QueryOutput::LeadTime { avg_lead_time } => {
            format!("Avg. lead time before requesting a trip: {avg_lead_time:.1} minutes")
        }
        QueryOutput::Placeholder { text } => text.clone(),
        QueryOutput::NoData => NO_DATA.to_string(),
        QueryOutput::InvalidChoice => INVALID_CHOICE.to_string(),
    }
}

/// The selectable menu, one `code) label` line per query.
pub fn render_menu() -> String {
    Query::ALL
        .iter()
        .map(|q| format!("{}) {}", q.code(), q.label()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn status_table(statuses: &[StatusShare]) -> String {
    let width = statuses.iter().map(|s| s.status.len()).max().unwrap_or(0);
    statuses
        .iter()
        .map(|share| format!("{:<width$}  {:>5.1}", share.status, share.pct))
        .collect::<Vec<_>>()
        .join("\n")
}

fn product_table(products: &[ProductShare]) -> String {
    let width = products
        .iter()
        .map(|p| p.product_type.len())
        .max()
        .unwrap_or(0)
        .max("Product Type".len());

    let header = format!("{:<width$}  {:>11}  {:>5}", "Product Type", "Total Rides", "%");
    std::iter::once(header)
        .chain(products.iter().map(|share| {
            format!(
                "{:<width$}  {:>11}  {:>5.1}",
                share.product_type, share.total_rides, share.pct
            )
        }))
        .collect::<Vec<_>>()
        .join("\n")
}

fn fare_lines(summary: &FareSummary, currency: &str) -> String {
    format!(
        "Avg. fare: {:.1} {currency}\n\
         Avg. distance: {:.1} km\n\
         Avg. fare/km: {:.1} {currency}/km\n\
         Avg. time spent on trips: {:.1} minutes",
        summary.avg_fare, summary.avg_distance_km, summary.fare_per_km, summary.avg_trip_duration,
    )
}
