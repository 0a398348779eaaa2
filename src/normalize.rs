//! Product-type cleanup applied right after loading.

use tracing::{debug, info, warn};

use crate::columns::PRODUCT_TYPE;
use crate::loader::RawTable;

/// Raw product spellings and the canonical name each one collapses into.
static PRODUCT_MAPPING: &[(&str, &str)] = &[
    ("UberX", "UberX"),
    ("uberX", "UberX"),
    ("uberX VIP", "UberX"),
    ("VIP", "UberX"),
    ("uberx", "UberX"),
    ("POOL", "Pool"),
    ("POOL: MATCHED", "Pool"),
    ("uberPOOL", "Pool"),
    ("uberPOOL: MATCHED", "Pool"),
    ("Pool: MATCHED", "Pool"),
    ("UberBLACK", "Black"),
];

/// Food-delivery orders share the export with rides and are not trips.
pub const EXCLUDED_PRODUCT: &str = "UberEATS Marketplace";

/// Returns the canonical product name for `raw`, or `raw` itself when it has
/// no mapping.
pub fn canonical_product(raw: &str) -> &str {
    PRODUCT_MAPPING
        .iter()
        .find(|(from, _)| *from == raw)
        .map(|(_, to)| *to)
        .unwrap_or(raw)
}

/// What [`normalize`] changed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeSummary {
    pub remapped: usize,
    pub dropped: usize,
}

/// Rewrites product types to their canonical names and removes marketplace
/// orders. Unknown product types are kept as they are.
pub fn normalize(mut table: RawTable) -> (RawTable, NormalizeSummary) {
    let mut summary = NormalizeSummary::default();

    let Some(col) = table.column(PRODUCT_TYPE) else {
        warn!(column = PRODUCT_TYPE, "Column absent, skipping normalization");
        return (table, summary);
    };

    for row in &mut table.rows {
        let Some(cell) = row.get_mut(col) else {
            continue;
        };
        let canonical = canonical_product(cell);
        if canonical != cell.as_str() {
            *cell = canonical.to_string();
            summary.remapped += 1;
        }
    }

    let before = table.rows.len();
    table
        .rows
        .retain(|row| row.get(col).map(String::as_str) != Some(EXCLUDED_PRODUCT));
    summary.dropped = before - table.rows.len();

    debug!(remapped = summary.remapped, "Product types remapped");
    info!(
        rows = table.rows.len(),
        dropped = summary.dropped,
        "Trip log normalized"
    );

    (table, summary)
}
