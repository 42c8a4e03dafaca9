//! Kruskal-Wallis H-test for independent groups.
//!
//! Observations from all groups are pooled and ranked (ties receive the average
//! of the ranks they span). The H statistic measures how far each group's mean
//! rank is from the pooled mean rank, divided by the tie correction factor
//! `1 - Σ(t³ - t) / (N³ - N)`. Under the null hypothesis H follows `χ²(k - 1)`.

use serde::Serialize;

use crate::{StatsError, pvalue};

/// Result of a Kruskal-Wallis test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GroupComparison {
    /// Tie-corrected H statistic.
    pub h: f64,
    /// Upper-tail p-value from `χ²(k - 1)`.
    pub p_value: f64,
    /// Degrees of freedom (`k - 1`).
    pub dof: usize,
}

/// Compares exactly two independent groups.
///
/// The H statistic does not depend on the order of the groups.
///
/// # Examples
///
/// ```
/// use habits_stats::kruskal::compare_groups;
///
/// let a = [1.0, 2.0, 3.0];
/// let b = [4.0, 5.0, 6.0];
/// let ab = compare_groups(&a, &b).unwrap();
/// let ba = compare_groups(&b, &a).unwrap();
/// assert_eq!(ab.h, ba.h);
/// assert_eq!(ab.dof, 1);
/// ```
pub fn compare_groups(a: &[f64], b: &[f64]) -> Result<GroupComparison, StatsError> {
    kruskal_wallis(&[a, b])
}

/// Runs the Kruskal-Wallis test across any number of groups.
///
/// # Errors
///
/// Returns [`StatsError::InsufficientData`] if there are fewer than two groups,
/// a group is empty, a value is non-finite, or all observations are identical.
#[expect(clippy::cast_precision_loss)]
pub fn kruskal_wallis(groups: &[&[f64]]) -> Result<GroupComparison, StatsError> {
    if groups.len() < 2 {
        return Err(StatsError::insufficient("fewer than 2 groups"));
    }
    if groups.iter().any(|g| g.is_empty()) {
        return Err(StatsError::insufficient("empty group"));
    }
    if groups.iter().flat_map(|g| g.iter()).any(|v| !v.is_finite()) {
        return Err(StatsError::insufficient("non-finite value in group"));
    }

    let mut pooled = groups
        .iter()
        .enumerate()
        .flat_map(|(group, values)| values.iter().map(move |&v| (v, group)))
        .collect::<Vec<_>>();
    pooled.sort_by(|a, b| a.0.total_cmp(&b.0));

    let total = pooled.len() as f64;
    let mut rank_sums = vec![0.0; groups.len()];
    let mut tie_sum = 0.0;

    // Walk runs of equal values, giving every member the run's average rank.
    let mut start = 0;
    while start < pooled.len() {
        let value = pooled[start].0;
        let end = pooled[start..]
            .iter()
            .position(|&(v, _)| v != value)
            .map_or(pooled.len(), |offset| start + offset);
        let average_rank = (start + 1 + end) as f64 / 2.0;
        for &(_, group) in &pooled[start..end] {
            rank_sums[group] += average_rank;
        }
        let run = (end - start) as f64;
        tie_sum += run * run * run - run;
        start = end;
    }

    let tie_correction = 1.0 - tie_sum / (total * total * total - total);
    if tie_correction <= 0.0 {
        return Err(StatsError::insufficient("all observations are identical"));
    }

    let weighted = groups
        .iter()
        .zip(&rank_sums)
        .map(|(values, &sum)| sum * sum / values.len() as f64)
        .sum::<f64>();
    let h = (12.0 / (total * (total + 1.0)) * weighted - 3.0 * (total + 1.0)) / tie_correction;

    let dof = groups.len() - 1;
    let p_value = pvalue::chi_squared_upper_tail(h, dof as f64)?;
    Ok(GroupComparison { h, p_value, dof })
}
