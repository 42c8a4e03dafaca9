//! Statistical tests and summaries for the study habits dashboard.
//!
//! This crate provides the test runner used by every analysis section:
//!
//! - **Correlation**: Pearson product-moment correlation with a two-sided p-value
//! - **Group comparison**: Kruskal-Wallis H-test on independent groups
//! - **Normality**: Shapiro-Wilk W-test (Royston approximation)
//! - **Independence**: Chi-squared test on a contingency table
//! - **Descriptive statistics**: count, mean, standard deviation, extrema, quartiles
//!
//! All tests are pure functions of their inputs. Running a test twice on the same
//! data yields bit-identical results.
//!
//! # Modules
//!
//! - [`correlation`]: Pearson correlation
//! - [`kruskal`]: Kruskal-Wallis rank test
//! - [`normality`]: Shapiro-Wilk normality test
//! - [`contingency`]: Contingency tables and the chi-squared independence test
//! - [`descriptive`]: Descriptive statistics for summarizing columns
//! - [`percentiles`]: Percentile computation (linear interpolation)
//!
//! # Examples
//!
//! ## Correlating two series
//!
//! ```
//! use habits_stats::correlation::correlate;
//!
//! let hours = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let score = [52.0, 60.0, 71.0, 75.0, 90.0];
//! let result = correlate(&hours, &score).unwrap();
//! assert!(result.r > 0.9);
//! ```
//!
//! ## Comparing two groups
//!
//! ```
//! use habits_stats::kruskal::compare_groups;
//!
//! let with_job = [55.0, 61.0, 58.0, 70.0];
//! let without_job = [72.0, 80.0, 77.0, 91.0];
//! let result = compare_groups(&with_job, &without_job).unwrap();
//! assert!(result.p_value < 0.05);
//! ```
//!
//! ## Testing independence
//!
//! ```
//! use habits_stats::contingency::{ContingencyTable, test_independence};
//!
//! let table = ContingencyTable::from_pairs([
//!     ("Yes", "Alto"),
//!     ("Yes", "Bajo"),
//!     ("No", "Alto"),
//!     ("No", "Alto"),
//! ]);
//! let result = test_independence(&table).unwrap();
//! assert_eq!(result.dof, 1);
//! ```

pub use self::error::StatsError;

pub mod contingency;
pub mod correlation;
pub mod descriptive;
mod error;
pub mod kruskal;
pub mod normality;
pub mod percentiles;
mod pvalue;

/// Significance level used by every interpretive conclusion.
pub const ALPHA: f64 = 0.05;

/// Returns whether a p-value is significant at [`ALPHA`].
///
/// ```
/// assert!(habits_stats::is_significant(0.01));
/// assert!(!habits_stats::is_significant(0.05));
/// ```
#[must_use]
pub fn is_significant(p_value: f64) -> bool {
    p_value < ALPHA
}
