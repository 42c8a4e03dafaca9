use serde::Serialize;

use crate::{StatsError, pvalue};

/// Result of a Pearson correlation test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Correlation {
    /// Correlation coefficient, always in `[-1, 1]`.
    pub r: f64,
    /// Two-sided p-value for the null hypothesis `r = 0`.
    pub p_value: f64,
    /// Number of paired samples.
    pub n: usize,
}

/// Computes the Pearson product-moment correlation between two paired series.
///
/// The p-value is two-sided and derived from Student's t distribution with
/// `n - 2` degrees of freedom. With exactly two samples the coefficient is
/// always ±1 and the p-value is 1.
///
/// # Errors
///
/// Returns [`StatsError::InsufficientData`] if the series have different lengths,
/// fewer than two samples, non-finite values, or zero variance.
///
/// # Examples
///
/// ```
/// use habits_stats::correlation::correlate;
///
/// let x = [1.0, 2.0, 3.0, 4.0];
/// let y = [8.0, 6.0, 4.0, 2.0];
/// let result = correlate(&x, &y).unwrap();
/// assert!((result.r + 1.0).abs() < 1e-12);
/// assert!(result.p_value < 1e-6);
/// ```
#[expect(clippy::cast_precision_loss)]
pub fn correlate(x: &[f64], y: &[f64]) -> Result<Correlation, StatsError> {
    if x.len() != y.len() {
        return Err(StatsError::insufficient("series have different lengths"));
    }
    let n = x.len();
    if n < 2 {
        return Err(StatsError::insufficient("fewer than 2 paired samples"));
    }
    if x.iter().chain(y).any(|v| !v.is_finite()) {
        return Err(StatsError::insufficient("non-finite value in series"));
    }

    let nf = n as f64;
    let mean_x = x.iter().sum::<f64>() / nf;
    let mean_y = y.iter().sum::<f64>() / nf;

    let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return Err(StatsError::insufficient("zero variance in series"));
    }

    let r = (sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0);
    let p_value = correlation_p_value(r, n)?;
    Ok(Correlation { r, p_value, n })
}

#[expect(clippy::cast_precision_loss)]
fn correlation_p_value(r: f64, n: usize) -> Result<f64, StatsError> {
    if n == 2 {
        return Ok(1.0);
    }
    if r.abs() == 1.0 {
        return Ok(0.0);
    }
    let df = (n - 2) as f64;
    let t = r * (df / ((1.0 - r) * (1.0 + r))).sqrt();
    pvalue::students_t_two_tailed(t, df)
}
