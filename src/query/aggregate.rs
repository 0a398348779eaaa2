use std::collections::{BTreeMap, HashMap};

use crate::error::ComputationError;
use crate::features::Trip;
use crate::query::types::{FareSummary, ProductShare, QueryOutput, StatusShare};
use crate::stats::{mean, pct, round_to, sum};

/// Number of completed rides.
pub fn total_trips(completed: &[Trip]) -> Result<QueryOutput, ComputationError> {
    if completed.is_empty() {
        return Err(ComputationError::NoData);
    }
    Ok(QueryOutput::TotalTrips {
        total: completed.len(),
    })
}

/// Row count of the full table and the percentage of each status, most
/// frequent first.
pub fn trips_breakdown(trips: &[Trip]) -> Result<QueryOutput, ComputationError> {
    if trips.is_empty() {
        return Err(ComputationError::NoData);
    }

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for trip in trips {
        *counts.entry(trip.status.as_str()).or_default() += 1;
    }

    let mut statuses: Vec<StatusShare> = counts
        .into_iter()
        .map(|(status, count)| StatusShare {
            status: status.to_string(),
            count,
            pct: round_to(pct(count, trips.len()), 1),
        })
        .collect();
    statuses.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.status.cmp(&b.status)));

    Ok(QueryOutput::TripsBreakdown {
        total: trips.len(),
        statuses,
    })
}

/// Rides and share per product type, product types in descending order.
pub fn product_breakdown(completed: &[Trip]) -> Result<QueryOutput, ComputationError> {
    if completed.is_empty() {
        return Err(ComputationError::NoData);
    }

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for trip in completed {
        *counts.entry(trip.product_type.as_str()).or_default() += 1;
    }

    let products = counts
        .into_iter()
        .rev()
        .map(|(product_type, total_rides)| ProductShare {
            product_type: product_type.to_string(),
            total_rides,
            pct: round_to(pct(total_rides, completed.len()), 1),
        })
        .collect();

    Ok(QueryOutput::ProductBreakdown { products })
}

/// Average fare, distance, fare per kilometer and trip duration.
pub fn fare_and_distance(completed: &[Trip]) -> Result<QueryOutput, ComputationError> {
    let avg_fare = mean(completed.iter().map(|t| t.fare_amount))?;
    let avg_distance_km = mean(completed.iter().map(|t| t.distance_km))?;
    let avg_trip_duration = mean(completed.iter().map(|t| Some(t.trip_duration)))?;

    let total_km = sum(completed.iter().map(|t| t.distance_km));
    if total_km == 0.0 {
        return Err(ComputationError::NoData);
    }
    let fare_per_km = sum(completed.iter().map(|t| t.fare_amount)) / total_km;

    Ok(QueryOutput::FareAndDistance(FareSummary {
        avg_fare: round_to(avg_fare, 1),
        avg_distance_km: round_to(avg_distance_km, 1),
        fare_per_km: round_to(fare_per_km, 1),
        avg_trip_duration: round_to(avg_trip_duration, 1),
    }))
}

/// Average minutes between request and pickup.
pub fn lead_time(completed: &[Trip]) -> Result<QueryOutput, ComputationError> {
    let avg = mean(completed.iter().map(|t| t.request_lead_time))?;
    Ok(QueryOutput::LeadTime {
        avg_lead_time: round_to(avg, 1),
    })
}
