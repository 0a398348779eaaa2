//! The resident, read-only trip data every query runs against.

use tracing::info;

use crate::columns::TIMESTAMP_COLUMNS;
use crate::error::ReportError;
use crate::features::{Trip, completed_rides, derive_trips};
use crate::loader::{RawTable, load_source};
use crate::normalize::{NormalizeSummary, normalize};

/// Full derived trip table plus its Completed Rides view.
///
/// Built once from the trip log and never mutated afterwards, so a shared
/// reference can be handed to any number of concurrent queries.
#[derive(Debug, Clone, Default)]
pub struct RideDataset {
    trips: Vec<Trip>,
    completed: Vec<Trip>,
    normalization: NormalizeSummary,
}

impl RideDataset {
    /// Runs normalization and feature derivation over an already loaded table.
    pub fn from_raw(raw: RawTable) -> Result<Self, ReportError> {
        Self::from_raw_with(raw, TIMESTAMP_COLUMNS)
    }

    /// Same as [`RideDataset::from_raw`] with an explicit list of timestamp
    /// columns.
    pub fn from_raw_with(raw: RawTable, timestamp_columns: &[&str]) -> Result<Self, ReportError> {
        let (normalized, normalization) = normalize(raw);
        let trips = derive_trips(&normalized, timestamp_columns)?;
        Ok(Self {
            normalization,
            ..Self::from_trips(trips)
        })
    }

    /// Wraps already derived trips, computing the Completed Rides view.
    pub fn from_trips(trips: Vec<Trip>) -> Self {
        let completed = completed_rides(&trips);
        info!(
            trips = trips.len(),
            completed = completed.len(),
            "Ride dataset ready"
        );
        Self {
            trips,
            completed,
            normalization: NormalizeSummary::default(),
        }
    }

    /// Loads, normalizes and derives the dataset from a path or URL.
    pub async fn load(source: &str) -> Result<Self, ReportError> {
        let raw = load_source(source).await?;
        Self::from_raw(raw)
    }

    /// Every trip that survived normalization.
    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    /// Trips that actually happened and have dropoff coordinates.
    pub fn completed(&self) -> &[Trip] {
        &self.completed
    }

    /// How many product types were remapped and marketplace rows dropped
    /// while the dataset was built.
    pub fn normalization(&self) -> NormalizeSummary {
        self.normalization
    }
}
