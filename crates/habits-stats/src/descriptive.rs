use serde::Serialize;

use crate::percentiles::{Percentiles, QUARTILES};

/// Summary statistics of a numeric column.
///
/// The standard deviation is the sample estimate (`n - 1` denominator), matching
/// the column summaries shown in the data preview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptiveStats {
    /// Number of values.
    pub count: usize,
    /// The arithmetic mean.
    pub mean: f64,
    /// Sample standard deviation; `NaN` for a single value.
    pub std_dev: f64,
    /// The minimum value.
    pub min: f64,
    /// First quartile.
    pub q1: f64,
    /// The median.
    pub median: f64,
    /// Third quartile.
    pub q3: f64,
    /// The maximum value.
    pub max: f64,
}

impl DescriptiveStats {
    /// Computes descriptive statistics from unsorted values.
    ///
    /// Returns `None` if the dataset is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use habits_stats::descriptive::DescriptiveStats;
    /// let stats = DescriptiveStats::new([5.0, 2.0, 4.0, 1.0, 3.0]).unwrap();
    /// assert_eq!(stats.count, 5);
    /// assert_eq!(stats.min, 1.0);
    /// assert_eq!(stats.max, 5.0);
    /// assert_eq!(stats.mean, 3.0);
    /// assert_eq!(stats.median, 3.0);
    /// assert_eq!(stats.q1, 2.0);
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        Self::from_sorted(&values)
    }

    /// Computes descriptive statistics from values sorted in ascending order.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted by [`f64::total_cmp`].
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a.total_cmp(b).is_le()),
            "values must be sorted in ascending order"
        );

        let min = *sorted_values.first()?;
        let max = *sorted_values.last()?;
        let [q1, median, q3] = Percentiles::from_sorted(sorted_values, &QUARTILES).quartiles()?;
        let count = sorted_values.len();
        let n = count as f64;
        let mean = sorted_values.iter().sum::<f64>() / n;
        let std_dev = if count > 1 {
            let ss = sorted_values
                .iter()
                .map(|v| (v - mean).powi(2))
                .sum::<f64>();
            (ss / (n - 1.0)).sqrt()
        } else {
            f64::NAN
        };

        Some(Self {
            count,
            mean,
            std_dev,
            min,
            q1,
            median,
            q3,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_std_dev() {
        let stats = DescriptiveStats::new([2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(stats.mean, 5.0);
        // Sum of squared deviations is 32
        assert!((stats.std_dev - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
        assert_eq!(stats.median, 4.5);
    }

    #[test]
    fn test_empty() {
        assert!(DescriptiveStats::new(std::iter::empty()).is_none());
    }

    #[test]
    fn test_nan_does_not_panic() {
        let stats = DescriptiveStats::new([1.0, f64::NAN, 3.0]).unwrap();
        assert_eq!(stats.count, 3);
        assert_eq!(stats.min, 1.0);
        assert!(stats.max.is_nan());
    }

    #[test]
    fn test_single_value() {
        let stats = DescriptiveStats::new([3.0]).unwrap();
        assert!(stats.std_dev.is_nan());
        assert_eq!(stats.q3, 3.0);
    }
}
