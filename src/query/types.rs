//! Result types produced by the query engine.

use serde::Serialize;

/// Share of one trip status across the full table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusShare {
    pub status: String,
    pub count: usize,
    pub pct: f64,
}

/// Ride count and share of one product type within Completed Rides.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductShare {
    pub product_type: String,
    pub total_rides: usize,
    pub pct: f64,
}

/// Fare, distance and duration averages over Completed Rides.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FareSummary {
    pub avg_fare: f64,
    pub avg_distance_km: f64,
    /// `sum(fare) / sum(distance_km)`, not a mean of per-trip ratios.
    pub fare_per_km: f64,
    pub avg_trip_duration: f64,
}

/// Answer to a single menu query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueryOutput {
    TotalTrips { total: usize },
    TripsBreakdown { total: usize, statuses: Vec<StatusShare> },
    ProductBreakdown { products: Vec<ProductShare> },
    FareAndDistance(FareSummary),
    LeadTime { avg_lead_time: f64 },
    /// Menu entries that only describe a question without answering it.
    Placeholder { text: String },
    NoData,
    InvalidChoice,
}
