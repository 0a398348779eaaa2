//! Small numeric helpers shared by the feature deriver and the query engine.

use crate::error::ComputationError;

/// Rounds `value` to `decimals` places, ties to even.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round_ties_even() / scale
}

/// Share of `part` in `total` as a percentage. Returns 0.0 for an empty total.
pub fn pct(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}

/// Arithmetic mean of the present values, skipping `None`.
///
/// # Errors
///
/// [`ComputationError::NoData`] when no value is present.
pub fn mean<I>(values: I) -> Result<f64, ComputationError>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let (sum, count) = values
        .into_iter()
        .flatten()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        return Err(ComputationError::NoData);
    }
    Ok(sum / count as f64)
}

/// Sum of the present values, skipping `None`.
pub fn sum<I>(values: I) -> f64
where
    I: IntoIterator<Item = Option<f64>>,
{
    values.into_iter().flatten().sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_places() {
        assert_eq!(round_to(16.0934, 2), 16.09);
        assert_eq!(round_to(3.14159, 1), 3.1);
        assert_eq!(round_to(20.0, 1), 20.0);
    }

    #[test]
    fn test_round_to_ties_even() {
        assert_eq!(round_to(0.25, 1), 0.2);
        assert_eq!(round_to(0.75, 1), 0.8);
        assert_eq!(round_to(2.5, 0), 2.0);
    }

    #[test]
    fn test_round_to_is_idempotent() {
        for miles in [0.0, 1.0, 2.37, 10.0, 13.33, 99.99] {
            let once = round_to(miles * 1.60934, 2);
            assert_eq!(round_to(once, 2), once);
        }
    }

    #[test]
    fn test_pct_with_zero_total() {
        assert_eq!(pct(10, 0), 0.0);
    }

    #[test]
    fn test_pct_normal_values() {
        assert_eq!(pct(50, 100), 50.0);
        assert_eq!(pct(1, 4), 25.0);
    }

    #[test]
    fn test_mean_skips_missing() {
        assert_eq!(mean([Some(1.0), None, Some(3.0)]), Ok(2.0));
    }

    #[test]
    fn test_mean_of_nothing_is_no_data() {
        assert_eq!(mean(Vec::<Option<f64>>::new()), Err(ComputationError::NoData));
        assert_eq!(mean([None, None]), Err(ComputationError::NoData));
    }

    #[test]
    fn test_sum_skips_missing() {
        assert_eq!(sum([Some(1.5), None, Some(2.5)]), 4.0);
    }
}
