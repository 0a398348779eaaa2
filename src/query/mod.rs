//! The fixed menu of report questions and the engine that answers them.
//!
//! Every query is a pure read over a [`RideDataset`]. Aggregates that have
//! nothing to aggregate over come back as [`QueryOutput::NoData`] and
//! unrecognized identifiers as [`QueryOutput::InvalidChoice`]; neither is an
//! error.

pub mod aggregate;
pub mod types;

pub use types::{FareSummary, ProductShare, QueryOutput, StatusShare};

use tracing::debug;

use crate::dataset::RideDataset;
use crate::error::ComputationError;

/// One entry of the report menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Query {
    TotalTrips,
    TripsBreakdown,
    MostLayoffs,
    ProductBreakdown,
    FareAndDistance,
    DaysOfWeek,
    LongestShortestRide,
    LeadTime,
}

impl Query {
    /// Menu order.
    pub const ALL: [Query; 8] = [
        Query::TotalTrips,
        Query::TripsBreakdown,
        Query::MostLayoffs,
        Query::ProductBreakdown,
        Query::FareAndDistance,
        Query::DaysOfWeek,
        Query::LongestShortestRide,
        Query::LeadTime,
    ];

    /// Looks up a query by its single-letter identifier. Matching is exact
    /// and case-sensitive.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|q| q.code() == code)
    }

    pub fn code(self) -> &'static str {
        match self {
            Query::TotalTrips => "a",
            Query::TripsBreakdown => "b",
            Query::MostLayoffs => "c",
            Query::ProductBreakdown => "d",
            Query::FareAndDistance => "e",
            Query::DaysOfWeek => "f",
            Query::LongestShortestRide => "g",
            Query::LeadTime => "h",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Query::TotalTrips => "Total Trips",
            Query::TripsBreakdown => "Trips Breakdown",
            Query::MostLayoffs => "Most Layoffs",
            Query::ProductBreakdown => "Product Type Breakdown",
            Query::FareAndDistance => "Avg. Fare & Distance",
            Query::DaysOfWeek => "Days of the Week",
            Query::LongestShortestRide => "Longest/Shortest Ride",
            Query::LeadTime => "Avg. Lead Time",
        }
    }

    /// Answers the query against `dataset`.
    pub fn run(self, dataset: &RideDataset) -> QueryOutput {
        let result = match self {
            Query::TotalTrips => aggregate::total_trips(dataset.completed()),
            Query::TripsBreakdown => aggregate::trips_breakdown(dataset.trips()),
            Query::MostLayoffs => Ok(placeholder(
                "Where did most of the layoffs take place? (Map)",
            )),
            Query::ProductBreakdown => aggregate::product_breakdown(dataset.completed()),
            Query::FareAndDistance => aggregate::fare_and_distance(dataset.completed()),
            Query::DaysOfWeek => Ok(placeholder(
                "Days of the week highest number of rides per kilometer",
            )),
            Query::LongestShortestRide => Ok(placeholder(
                "Longest/shortest and most expensive/cheapest ride",
            )),
            Query::LeadTime => aggregate::lead_time(dataset.completed()),
        };

        result.unwrap_or_else(|err: ComputationError| {
            debug!(query = self.code(), error = %err, "Query fell back to no data");
            QueryOutput::NoData
        })
    }
}

/// Answers the menu choice `code`, falling back to
/// [`QueryOutput::InvalidChoice`] for anything outside the menu.
#[tracing::instrument(skip(dataset))]
pub fn answer(dataset: &RideDataset, code: &str) -> QueryOutput {
    match Query::from_code(code) {
        Some(query) => query.run(dataset),
        None => {
            debug!("Unrecognized menu choice");
            QueryOutput::InvalidChoice
        }
    }
}

fn placeholder(text: &str) -> QueryOutput {
    QueryOutput::Placeholder {
        text: text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for query in Query::ALL {
            assert_eq!(Query::from_code(query.code()), Some(query));
        }
    }

    #[test]
    fn test_codes_are_case_sensitive_and_exact() {
        assert_eq!(Query::from_code("A"), None);
        assert_eq!(Query::from_code("aa"), None);
        assert_eq!(Query::from_code(" a"), None);
        assert_eq!(Query::from_code(""), None);
    }

    #[test]
    fn test_unknown_choice_is_invalid() {
        let dataset = RideDataset::default();
        assert_eq!(answer(&dataset, "z"), QueryOutput::InvalidChoice);
    }

    #[test]
    fn test_empty_dataset_yields_no_data() {
        let dataset = RideDataset::default();
        for code in ["a", "b", "d", "e", "h"] {
            assert_eq!(answer(&dataset, code), QueryOutput::NoData, "query {code}");
        }
    }

    #[test]
    fn test_placeholders_answer_without_data() {
        let dataset = RideDataset::default();
        assert_eq!(
            answer(&dataset, "c"),
            placeholder("Where did most of the layoffs take place? (Map)")
        );
        assert!(matches!(
            answer(&dataset, "f"),
            QueryOutput::Placeholder { .. }
        ));
        assert!(matches!(
            answer(&dataset, "g"),
            QueryOutput::Placeholder { .. }
        ));
    }
}
