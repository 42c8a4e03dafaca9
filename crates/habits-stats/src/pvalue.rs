//! Tail probabilities of the reference distributions used by the tests.

use statrs::distribution::{ChiSquared, ContinuousCDF, Normal, StudentsT};

use crate::StatsError;

/// Two-tailed p-value of a t-statistic with `df` degrees of freedom.
pub(crate) fn students_t_two_tailed(t: f64, df: f64) -> Result<f64, StatsError> {
    let dist = StudentsT::new(0.0, 1.0, df)
        .map_err(|_| StatsError::insufficient("invalid degrees of freedom"))?;
    Ok((2.0 * dist.sf(t.abs())).clamp(0.0, 1.0))
}

/// Upper-tail probability `P(X >= stat)` for `X ~ χ²(dof)`.
pub(crate) fn chi_squared_upper_tail(stat: f64, dof: f64) -> Result<f64, StatsError> {
    let dist =
        ChiSquared::new(dof).map_err(|_| StatsError::insufficient("invalid degrees of freedom"))?;
    Ok(dist.sf(stat).clamp(0.0, 1.0))
}

/// Upper-tail probability of the standard normal distribution.
pub(crate) fn standard_normal_upper_tail(z: f64) -> f64 {
    Normal::standard().sf(z)
}

/// Quantile function of the standard normal distribution.
pub(crate) fn standard_normal_quantile(p: f64) -> f64 {
    Normal::standard().inverse_cdf(p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_t_zero_statistic_is_one() {
        let p = students_t_two_tailed(0.0, 10.0).unwrap();
        assert!((p - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_t_rejects_zero_dof() {
        assert!(students_t_two_tailed(1.0, 0.0).is_err());
    }

    #[test]
    fn test_chi_squared_critical_value() {
        // 3.841 is the 95th percentile of χ²(1)
        let p = chi_squared_upper_tail(3.841_458_820_694_124, 1.0).unwrap();
        assert!((p - 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_normal_quantile_is_inverse_of_tail() {
        let z = standard_normal_quantile(0.975);
        assert!((standard_normal_upper_tail(z) - 0.025).abs() < 1e-9);
    }
}
