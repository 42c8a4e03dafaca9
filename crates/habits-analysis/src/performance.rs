//! The derived `Rendimiento` column.
//!
//! Exam scores are bucketed into two left-open intervals:
//!
//! ```text
//! (0, 69.99]    -> Bajo
//! (69.99, 100]  -> Alto
//! ```
//!
//! Scores outside `(0, 100]` fall in no bucket.

use serde::Serialize;

/// Lower edge of the bucket range (exclusive).
pub const SCORE_MIN: f64 = 0.0;
/// Upper edge of the `Bajo` bucket (inclusive).
pub const LOW_UPPER_EDGE: f64 = 69.99;
/// Upper edge of the `Alto` bucket (inclusive).
pub const SCORE_MAX: f64 = 100.0;

/// Performance bucket of an exam score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Performance {
    Alto,
    Bajo,
}

impl Performance {
    /// Buckets an exam score.
    ///
    /// # Examples
    ///
    /// ```
    /// use habits_analysis::performance::Performance;
    ///
    /// assert_eq!(Performance::classify(70.0), Some(Performance::Alto));
    /// assert_eq!(Performance::classify(69.99), Some(Performance::Bajo));
    /// assert_eq!(Performance::classify(0.0), None);
    /// ```
    #[must_use]
    pub fn classify(score: f64) -> Option<Self> {
        if score > SCORE_MIN && score <= LOW_UPPER_EDGE {
            Some(Self::Bajo)
        } else if score > LOW_UPPER_EDGE && score <= SCORE_MAX {
            Some(Self::Alto)
        } else {
            None
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Alto => "Alto",
            Self::Bajo => "Bajo",
        }
    }
}
