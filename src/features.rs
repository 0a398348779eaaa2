//! Typed trip records and the columns derived from them.
//!
//! Turns the normalized [`RawTable`] into [`Trip`]s: timestamps are parsed,
//! calendar fields are taken from the request time, distances are converted
//! to kilometers, and per-km fares, lead times and durations are computed.
//! Canceled trips keep their calendar fields but lose the metrics that only
//! make sense for a ride that actually happened.

use chrono::NaiveDateTime;
use tracing::{debug, info};

use crate::columns::{
    BEGIN_TRIP_TIME, DISTANCE_MILES, DROPOFF_LAT, DROPOFF_LNG, DROPOFF_TIME, FARE_AMOUNT,
    PRODUCT_TYPE, REQUEST_TIME, STATUS,
};
use crate::error::{LoadError, ParseError, ReportError};
use crate::loader::RawTable;
use crate::stats::round_to;

pub const KM_PER_MILE: f64 = 1.60934;

/// Suffix every exported timestamp carries.
pub const TIMEZONE_SUFFIX: &str = " +0000 UTC";

const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const MISSING_MARKERS: &[&str] = &["", "NaN", "nan", "NA", "N/A", "null"];

/// Trip or order status. Statuses other than the three the report cares
/// about are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TripStatus {
    Completed,
    Canceled,
    DriverCanceled,
    Other(String),
}

impl TripStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "COMPLETED" => Self::Completed,
            "CANCELED" => Self::Canceled,
            "DRIVER_CANCELED" => Self::DriverCanceled,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Completed => "COMPLETED",
            Self::Canceled => "CANCELED",
            Self::DriverCanceled => "DRIVER_CANCELED",
            Self::Other(s) => s,
        }
    }

    pub fn is_canceled(&self) -> bool {
        matches!(self, Self::Canceled | Self::DriverCanceled)
    }
}

/// One row of the derived trip table.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub request_time: NaiveDateTime,
    pub begin_trip_time: NaiveDateTime,
    pub dropoff_time: NaiveDateTime,
    pub product_type: String,
    pub status: TripStatus,
    pub fare_amount: Option<f64>,
    pub distance_miles: Option<f64>,
    pub dropoff_lat: Option<f64>,
    pub dropoff_lng: Option<f64>,

    // derived from request_time
    pub year: String,
    pub month: String,
    pub weekday: String,
    pub time: String,

    pub distance_km: Option<f64>,
    /// `None` for canceled trips and when the distance is zero or missing.
    pub amount_km: Option<f64>,
    /// Minutes between request and trip start. `None` for canceled trips.
    pub request_lead_time: Option<f64>,
    /// Minutes between trip start and dropoff.
    pub trip_duration: f64,
}

impl Trip {
    /// Whether the trip belongs to the Completed Rides view.
    pub fn is_completed_ride(&self) -> bool {
        !self.status.is_canceled() && self.dropoff_lat.is_some() && self.dropoff_lng.is_some()
    }
}

/// Parses an exported timestamp, dropping the timezone suffix first.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    let value = trimmed.strip_suffix(TIMEZONE_SUFFIX).unwrap_or(trimmed);

    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// `round(miles * 1.60934, 2)`
pub fn miles_to_km(miles: f64) -> f64 {
    round_to(miles * KM_PER_MILE, 2)
}

/// Fare per kilometer, undefined for a zero, missing or non-finite ratio.
pub fn amount_per_km(fare: Option<f64>, distance_km: Option<f64>) -> Option<f64> {
    let (fare, km) = (fare?, distance_km?);
    if km == 0.0 {
        return None;
    }
    let ratio = fare / km;
    ratio.is_finite().then(|| round_to(ratio, 2))
}

/// Minutes from `from` to `to`, rounded to one decimal.
pub fn minutes_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    round_to((to - from).num_milliseconds() as f64 / 60_000.0, 1)
}

/// Parses every column in `columns` as a timestamp.
///
/// Returns one vector per row, holding the parsed values in the order of
/// `columns`.
pub fn parse_timestamp_columns(
    table: &RawTable,
    columns: &[&str],
) -> Result<Vec<Vec<NaiveDateTime>>, ReportError> {
    let positions = columns
        .iter()
        .map(|c| table.require_column(c))
        .collect::<Result<Vec<_>, _>>()?;

    let mut parsed = Vec::with_capacity(table.len());
    for (i, row) in table.rows.iter().enumerate() {
        let mut values = Vec::with_capacity(positions.len());
        for (&pos, &column) in positions.iter().zip(columns) {
            let raw = cell(row, pos);
            let ts = parse_timestamp(raw).ok_or_else(|| ParseError::Timestamp {
                column: column.to_string(),
                row: i + 1,
                value: raw.to_string(),
            })?;
            values.push(ts);
        }
        parsed.push(values);
    }

    Ok(parsed)
}

/// Builds the derived trip table from a normalized raw table.
///
/// `timestamp_columns` names the columns to parse as timestamps; it must
/// include the request, begin and dropoff columns.
#[tracing::instrument(skip(table), fields(rows = table.len()))]
pub fn derive_trips(table: &RawTable, timestamp_columns: &[&str]) -> Result<Vec<Trip>, ReportError> {
    let timestamps = parse_timestamp_columns(table, timestamp_columns)?;

    let ts_index = |name: &str| {
        timestamp_columns
            .iter()
            .position(|c| *c == name)
            .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
    };
    let request_at = ts_index(REQUEST_TIME)?;
    let begin_at = ts_index(BEGIN_TRIP_TIME)?;
    let dropoff_at = ts_index(DROPOFF_TIME)?;

    let product_col = table.require_column(PRODUCT_TYPE)?;
    let status_col = table.require_column(STATUS)?;
    let fare_col = table.require_column(FARE_AMOUNT)?;
    let miles_col = table.require_column(DISTANCE_MILES)?;
    let lat_col = table.require_column(DROPOFF_LAT)?;
    let lng_col = table.require_column(DROPOFF_LNG)?;

    let mut trips = Vec::with_capacity(table.len());
    let mut canceled = 0usize;

    for (i, (row, ts)) in table.rows.iter().zip(&timestamps).enumerate() {
        let number = |pos: usize, column: &str| parse_number(cell(row, pos), column, i + 1);

        let request_time = ts[request_at];
        let begin_trip_time = ts[begin_at];
        let dropoff_time = ts[dropoff_at];
        let status = TripStatus::parse(cell(row, status_col));
        let fare_amount = number(fare_col, FARE_AMOUNT)?;
        let distance_miles = number(miles_col, DISTANCE_MILES)?;

        let distance_km = distance_miles.map(miles_to_km);
        let mut amount_km = amount_per_km(fare_amount, distance_km);
        let mut request_lead_time = Some(minutes_between(request_time, begin_trip_time));
        let trip_duration = minutes_between(begin_trip_time, dropoff_time);

        if status.is_canceled() {
            amount_km = None;
            request_lead_time = None;
            canceled += 1;
        }

        trips.push(Trip {
            request_time,
            begin_trip_time,
            dropoff_time,
            product_type: cell(row, product_col).to_string(),
            status,
            fare_amount,
            distance_miles,
            dropoff_lat: number(lat_col, DROPOFF_LAT)?,
            dropoff_lng: number(lng_col, DROPOFF_LNG)?,
            year: request_time.format("%Y").to_string(),
            month: request_time.format("%b").to_string(),
            weekday: request_time.format("%a").to_string(),
            time: request_time.format("%H:%M").to_string(),
            distance_km,
            amount_km,
            request_lead_time,
            trip_duration,
        });
    }

    debug!(canceled, "Cancellation metrics cleared");
    info!(trips = trips.len(), "Trip features derived");
    Ok(trips)
}

/// Trips that were neither canceled nor missing dropoff coordinates.
pub fn completed_rides(trips: &[Trip]) -> Vec<Trip> {
    trips
        .iter()
        .filter(|t| t.is_completed_ride())
        .cloned()
        .collect()
}

fn cell(row: &[String], pos: usize) -> &str {
    row.get(pos).map(String::as_str).unwrap_or("")
}

fn parse_number(raw: &str, column: &str, row: usize) -> Result<Option<f64>, ParseError> {
    let value = raw.trim();
    if MISSING_MARKERS.contains(&value) {
        return Ok(None);
    }
    value
        .parse::<f64>()
        .map(Some)
        .map_err(|_| ParseError::Number {
            column: column.to_string(),
            row,
            value: raw.to_string(),
        })
}
