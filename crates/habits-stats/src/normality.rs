//! Shapiro-Wilk test for normality.
//!
//! Coefficients and p-values follow Royston's approximation (Algorithm AS R94),
//! which is valid for sample sizes between 3 and 5000.

use std::f64::consts::{FRAC_1_SQRT_2, PI};

use serde::Serialize;

use crate::{StatsError, pvalue};

/// Smallest sample the test is defined for.
pub const MIN_SAMPLE_SIZE: usize = 3;
/// Largest sample the approximation is valid for.
pub const MAX_SAMPLE_SIZE: usize = 5000;

const C1: [f64; 6] = [0.0, 0.221_157, -0.147_981, -2.071_19, 4.434_685, -2.706_056];
const C2: [f64; 6] = [0.0, 0.042_981, -0.293_762, -1.752_461, 5.682_633, -3.582_633];
const C3: [f64; 4] = [0.544, -0.399_78, 0.025_054, -6.714e-4];
const C4: [f64; 4] = [1.3822, -0.778_57, 0.062_767, -0.002_032_2];
const C5: [f64; 4] = [-1.5861, -0.310_82, -0.083_751, 0.003_891_5];
const C6: [f64; 3] = [-0.4803, -0.082_676, 0.003_030_2];
const G: [f64; 2] = [-2.273, 0.459];

/// Result of a Shapiro-Wilk test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Normality {
    /// W statistic in `(0, 1]`; values close to 1 indicate normality.
    pub w: f64,
    /// p-value for the null hypothesis that the sample is normal.
    pub p_value: f64,
    /// Sample size.
    pub n: usize,
}

/// Tests whether a sample was drawn from a normal distribution.
///
/// # Errors
///
/// - [`StatsError::SampleSize`] if the sample has fewer than [`MIN_SAMPLE_SIZE`]
///   or more than [`MAX_SAMPLE_SIZE`] values.
/// - [`StatsError::InsufficientData`] if the sample contains non-finite values or
///   all values are identical.
///
/// # Examples
///
/// ```
/// use habits_stats::normality::test_normality;
///
/// let sample = [-1.5, -1.0, -0.5, 0.0, 0.5, 1.0, 1.5];
/// let result = test_normality(&sample).unwrap();
/// assert!(result.w > 0.9);
/// assert!(result.p_value > 0.05);
///
/// assert!(test_normality(&[1.0, 2.0]).is_err());
/// ```
pub fn test_normality(sample: &[f64]) -> Result<Normality, StatsError> {
    let n = sample.len();
    if !(MIN_SAMPLE_SIZE..=MAX_SAMPLE_SIZE).contains(&n) {
        return Err(StatsError::SampleSize {
            size: n,
            min: MIN_SAMPLE_SIZE,
            max: MAX_SAMPLE_SIZE,
        });
    }
    if sample.iter().any(|v| !v.is_finite()) {
        return Err(StatsError::insufficient("non-finite value in sample"));
    }

    let mut sorted = sample.to_vec();
    sorted.sort_by(f64::total_cmp);
    if sorted[n - 1] == sorted[0] {
        return Err(StatsError::insufficient("all values are identical"));
    }

    let coefficients = coefficients(n);
    let w = w_statistic(&sorted, &coefficients);
    let p_value = p_value(w, n);
    Ok(Normality { w, p_value, n })
}

/// Evaluates `c[0] + c[1] x + c[2] x² + ...`.
fn poly(c: &[f64], x: f64) -> f64 {
    c.iter().rev().fold(0.0, |acc, &ci| acc * x + ci)
}

/// Antisymmetric weights `a[i]` for the `n / 2` outermost order-statistic pairs.
#[expect(clippy::cast_precision_loss)]
fn coefficients(n: usize) -> Vec<f64> {
    let half = n / 2;
    if n == 3 {
        return vec![FRAC_1_SQRT_2];
    }

    let nf = n as f64;
    let m = (1..=half)
        .map(|i| pvalue::standard_normal_quantile((i as f64 - 0.375) / (nf + 0.25)))
        .collect::<Vec<_>>();
    let summ2 = 2.0 * m.iter().map(|mi| mi * mi).sum::<f64>();
    let ssumm2 = summ2.sqrt();
    let rsn = 1.0 / nf.sqrt();

    let mut a = vec![0.0; half];
    a[0] = poly(&C1, rsn) - m[0] / ssumm2;

    let (first_plain, fac) = if n > 5 {
        a[1] = -m[1] / ssumm2 + poly(&C2, rsn);
        let fac = ((summ2 - 2.0 * m[0] * m[0] - 2.0 * m[1] * m[1])
            / (1.0 - 2.0 * a[0] * a[0] - 2.0 * a[1] * a[1]))
            .sqrt();
        (2, fac)
    } else {
        let fac = ((summ2 - 2.0 * m[0] * m[0]) / (1.0 - 2.0 * a[0] * a[0])).sqrt();
        (1, fac)
    };
    for (ai, mi) in a.iter_mut().zip(&m).skip(first_plain) {
        *ai = -mi / fac;
    }
    a
}

#[expect(clippy::cast_precision_loss)]
fn w_statistic(sorted: &[f64], a: &[f64]) -> f64 {
    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let ss = sorted.iter().map(|x| (x - mean).powi(2)).sum::<f64>();
    let numerator = a
        .iter()
        .enumerate()
        .map(|(i, ai)| ai * (sorted[n - 1 - i] - sorted[i]))
        .sum::<f64>();
    (numerator * numerator / ss).min(1.0)
}

#[expect(clippy::cast_precision_loss)]
fn p_value(w: f64, n: usize) -> f64 {
    if n == 3 {
        // Exact distribution for n = 3
        let p = 6.0 / PI * (w.sqrt().asin() - PI / 3.0);
        return p.clamp(0.0, 1.0);
    }

    let w1 = 1.0 - w;
    if w1 <= 0.0 {
        return 1.0;
    }
    let nf = n as f64;
    let (y, m, s) = if n <= 11 {
        let gamma = poly(&G, nf);
        let log_w1 = w1.ln();
        if log_w1 >= gamma {
            return 0.0;
        }
        (-(gamma - log_w1).ln(), poly(&C3, nf), poly(&C4, nf).exp())
    } else {
        let ln_n = nf.ln();
        (w1.ln(), poly(&C5, ln_n), poly(&C6, ln_n).exp())
    };
    pvalue::standard_normal_upper_tail((y - m) / s).clamp(0.0, 1.0)
}
