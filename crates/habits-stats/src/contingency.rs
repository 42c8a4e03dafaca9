//! Contingency tables and the chi-squared test of independence.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{StatsError, pvalue};

/// Observed counts for every pair of row and column categories.
///
/// Labels are kept in ascending order, so tables built from the same pairs always
/// have the same layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContingencyTable {
    row_labels: Vec<String>,
    column_labels: Vec<String>,
    counts: Vec<Vec<u64>>,
}

impl ContingencyTable {
    /// Creates a table from explicit labels and a row-major count matrix.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::InsufficientData`] if the matrix shape does not match
    /// the labels.
    pub fn new(
        row_labels: Vec<String>,
        column_labels: Vec<String>,
        counts: Vec<Vec<u64>>,
    ) -> Result<Self, StatsError> {
        if counts.len() != row_labels.len()
            || counts.iter().any(|row| row.len() != column_labels.len())
        {
            return Err(StatsError::insufficient(
                "count matrix shape does not match labels",
            ));
        }
        Ok(Self {
            row_labels,
            column_labels,
            counts,
        })
    }

    /// Cross-tabulates `(row category, column category)` observations.
    ///
    /// # Examples
    ///
    /// ```
    /// use habits_stats::contingency::ContingencyTable;
    ///
    /// let table = ContingencyTable::from_pairs([("No", "Alto"), ("Yes", "Bajo"), ("No", "Alto")]);
    /// assert_eq!(table.row_labels(), ["No", "Yes"]);
    /// assert_eq!(table.column_labels(), ["Alto", "Bajo"]);
    /// assert_eq!(table.counts(), [vec![2, 0], vec![0, 1]]);
    /// ```
    #[must_use]
    pub fn from_pairs<I, R, C>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (R, C)>,
        R: Into<String>,
        C: Into<String>,
    {
        let mut cells = BTreeMap::<(String, String), u64>::new();
        for (row, column) in pairs {
            *cells.entry((row.into(), column.into())).or_default() += 1;
        }

        let mut row_labels = cells.keys().map(|(r, _)| r.clone()).collect::<Vec<_>>();
        row_labels.dedup();
        let mut column_labels = cells.keys().map(|(_, c)| c.clone()).collect::<Vec<_>>();
        column_labels.sort();
        column_labels.dedup();

        let counts = row_labels
            .iter()
            .map(|r| {
                column_labels
                    .iter()
                    .map(|c| {
                        cells
                            .get(&(r.clone(), c.clone()))
                            .copied()
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect();

        Self {
            row_labels,
            column_labels,
            counts,
        }
    }

    #[must_use]
    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    #[must_use]
    pub fn column_labels(&self) -> &[String] {
        &self.column_labels
    }

    #[must_use]
    pub fn counts(&self) -> &[Vec<u64>] {
        &self.counts
    }

    /// Total number of observations.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }
}

/// Result of a chi-squared test of independence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Independence {
    /// Chi-squared statistic (Yates-corrected when `dof == 1`).
    pub chi2: f64,
    /// Upper-tail p-value from `χ²(dof)`.
    pub p_value: f64,
    /// Degrees of freedom, `(rows - 1) * (columns - 1)`.
    pub dof: usize,
    /// Expected counts under independence, same layout as the observed table.
    pub expected: Vec<Vec<f64>>,
}

impl Independence {
    /// Returns whether every expected count reaches the usual validity threshold of 5.
    ///
    /// A `false` result is not an error; it means the statistic is unreliable.
    #[must_use]
    pub fn is_reliable(&self) -> bool {
        self.expected.iter().flatten().all(|&e| e >= 5.0)
    }
}

/// Tests whether the row and column variables of a contingency table are independent.
///
/// For 2×2 tables (one degree of freedom) Yates' continuity correction is
/// applied: each observed count moves by at most 0.5 towards its expected count.
/// A table with a single row or column has zero degrees of freedom and yields
/// `chi2 = 0`, `p = 1`.
///
/// # Errors
///
/// Returns [`StatsError::InsufficientData`] if the table is empty or any row or
/// column total is zero (some expected count would be zero).
///
/// # Examples
///
/// ```
/// use habits_stats::contingency::{ContingencyTable, test_independence};
///
/// let table = ContingencyTable::new(
///     vec!["a".into(), "b".into()],
///     vec!["x".into(), "y".into()],
///     vec![vec![30, 10], vec![20, 40]],
/// )
/// .unwrap();
/// let result = test_independence(&table).unwrap();
/// assert_eq!(result.dof, 1);
/// assert!(result.p_value < 0.01);
/// assert_eq!(result.expected[0][0], 20.0);
/// ```
#[expect(clippy::cast_precision_loss)]
pub fn test_independence(table: &ContingencyTable) -> Result<Independence, StatsError> {
    let counts = table.counts();
    let rows = counts.len();
    let columns = table.column_labels().len();
    if rows == 0 || columns == 0 {
        return Err(StatsError::insufficient("empty contingency table"));
    }

    let row_totals = counts
        .iter()
        .map(|row| row.iter().sum::<u64>() as f64)
        .collect::<Vec<_>>();
    let column_totals = (0..columns)
        .map(|j| counts.iter().map(|row| row[j]).sum::<u64>() as f64)
        .collect::<Vec<_>>();
    let total = table.total() as f64;
    if row_totals.contains(&0.0) || column_totals.contains(&0.0) {
        return Err(StatsError::insufficient(
            "contingency table has an all-zero row or column",
        ));
    }

    let expected = row_totals
        .iter()
        .map(|r| column_totals.iter().map(|c| r * c / total).collect())
        .collect::<Vec<Vec<f64>>>();

    let dof = (rows - 1) * (columns - 1);
    if dof == 0 {
        return Ok(Independence {
            chi2: 0.0,
            p_value: 1.0,
            dof,
            expected,
        });
    }

    let yates = dof == 1;
    let chi2 = counts
        .iter()
        .zip(&expected)
        .flat_map(|(observed, expected)| observed.iter().zip(expected))
        .map(|(&o, &e)| {
            let o = o as f64;
            let diff = e - o;
            let o = if yates {
                o + diff.signum() * diff.abs().min(0.5)
            } else {
                o
            };
            (o - e).powi(2) / e
        })
        .sum::<f64>();

    let p_value = pvalue::chi_squared_upper_tail(chi2, dof as f64)?;
    Ok(Independence {
        chi2,
        p_value,
        dof,
        expected,
    })
}
