/// Precomputed percentile values for a column.
///
/// Percentiles are computed with linear interpolation between the two nearest
/// ranks, the convention used by common dataframe libraries.
///
/// # Examples
///
/// ```
/// use habits_stats::percentiles::Percentiles;
///
/// let values = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let percentiles = Percentiles::new(&values, &[25.0, 50.0, 75.0]);
///
/// assert_eq!(percentiles.get(50.0), Some(3.0));
/// assert_eq!(percentiles.get(25.0), Some(2.0));
/// assert_eq!(percentiles.get(90.0), None);
/// ```
/// Percentile points of the first quartile, the median and the third quartile.
pub const QUARTILES: [f64; 3] = [25.0, 50.0, 75.0];

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Percentiles {
    /// `(percentile, value)` pairs in the order they were requested.
    values: Vec<(f64, f64)>,
}

impl Percentiles {
    /// Computes percentiles from unsorted values.
    #[must_use]
    pub fn new(values: &[f64], percentile_points: &[f64]) -> Self {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted, percentile_points)
    }

    /// Computes percentiles from values sorted in ascending order.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted by [`f64::total_cmp`].
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64], percentile_points: &[f64]) -> Self {
        assert!(
            sorted_values.is_sorted_by(|a, b| a.total_cmp(b).is_le()),
            "values must be sorted in ascending order"
        );

        let values = percentile_points
            .iter()
            .map(|&p| (p, compute_percentile(sorted_values, p)))
            .collect();
        Self { values }
    }

    /// Gets the value at a precomputed percentile.
    #[must_use]
    pub fn get(&self, percentile: f64) -> Option<f64> {
        self.values
            .iter()
            .find(|(p, _)| (p - percentile).abs() < f64::EPSILON)
            .map(|&(_, value)| value)
    }

    /// First quartile, median and third quartile, if all three were computed.
    ///
    /// ```
    /// use habits_stats::percentiles::{Percentiles, QUARTILES};
    ///
    /// let percentiles = Percentiles::new(&[4.0, 1.0, 3.0, 2.0, 5.0], &QUARTILES);
    /// assert_eq!(percentiles.quartiles(), Some([2.0, 3.0, 4.0]));
    /// assert_eq!(Percentiles::new(&[1.0], &[50.0]).quartiles(), None);
    /// ```
    #[must_use]
    pub fn quartiles(&self) -> Option<[f64; 3]> {
        Some([self.get(25.0)?, self.get(50.0)?, self.get(75.0)?])
    }

    /// Returns an iterator over all `(percentile, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.values.iter().copied()
    }
}

/// Computes a single percentile of sorted data with linear interpolation.
///
/// The percentile `k` sits at fractional position `(n - 1) * k / 100`. Returns
/// `f64::NAN` if the input is empty.
///
/// # Examples
///
/// ```
/// use habits_stats::percentiles::compute_percentile;
///
/// let values = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(compute_percentile(&values, 50.0), 2.5);
/// assert_eq!(compute_percentile(&values, 0.0), 1.0);
/// assert_eq!(compute_percentile(&values, 100.0), 4.0);
/// ```
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn compute_percentile(sorted_values: &[f64], percentile: f64) -> f64 {
    let Some(&last) = sorted_values.last() else {
        return f64::NAN;
    };
    let position = (sorted_values.len() - 1) as f64 * percentile.clamp(0.0, 100.0) / 100.0;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    if upper >= sorted_values.len() {
        return last;
    }
    let fraction = position - position.floor();
    sorted_values[lower] + (sorted_values[upper] - sorted_values[lower]) * fraction
}
