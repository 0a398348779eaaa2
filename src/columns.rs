//! Header names of the trip log export.

pub const REQUEST_TIME: &str = "Request Time";
pub const BEGIN_TRIP_TIME: &str = "Begin Trip Time";
pub const DROPOFF_TIME: &str = "Dropoff Time";
pub const DISTANCE_MILES: &str = "Distance (miles)";
pub const FARE_AMOUNT: &str = "Fare Amount";
pub const PRODUCT_TYPE: &str = "Product Type";
pub const STATUS: &str = "Trip or Order Status";
pub const DROPOFF_LAT: &str = "Dropoff Lat";
pub const DROPOFF_LNG: &str = "Dropoff Lng";

/// Columns that carry timestamps with the `" +0000 UTC"` suffix.
pub const TIMESTAMP_COLUMNS: &[&str] = &[REQUEST_TIME, BEGIN_TRIP_TIME, DROPOFF_TIME];
