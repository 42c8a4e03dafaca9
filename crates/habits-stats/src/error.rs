/// Failure of a statistical test on degenerate input.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum StatsError {
    /// The input cannot support the test (too few values, zero variance, empty group, ...).
    #[display("insufficient data: {reason}")]
    InsufficientData { reason: &'static str },
    /// The sample size is outside the range the test is defined for.
    #[display("sample size {size} is outside the valid range {min}..={max}")]
    SampleSize { size: usize, min: usize, max: usize },
}

impl StatsError {
    pub(crate) fn insufficient(reason: &'static str) -> Self {
        Self::InsufficientData { reason }
    }
}
