//! Declarative chart specifications.
//!
//! A [`ChartRequest`] names the columns to plot; [`ChartSpec::bind`] resolves it
//! against the table into plain data that any display surface can draw. No test
//! statistics are computed here, only the five-number summaries a box plot needs.

use std::collections::BTreeMap;

use habits_stats::percentiles::{Percentiles, QUARTILES};
use serde::Serialize;

use crate::{
    dataset::{Column, DataTable, Observation},
    section::AnalysisError,
};

/// Whisker reach in multiples of the interquartile range.
const WHISKER_IQR: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Continuous `x` against continuous `y`.
    Scatter,
    /// Categorical `x` against continuous `y`.
    Box,
}

/// What to plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ChartRequest {
    pub kind: ChartKind,
    pub x: Column,
    pub y: Column,
    /// Categorical column splitting the data into colored series.
    pub color: Option<Column>,
    pub title: &'static str,
}

impl ChartRequest {
    #[must_use]
    pub const fn scatter(x: Column, y: Column, title: &'static str) -> Self {
        Self {
            kind: ChartKind::Scatter,
            x,
            y,
            color: None,
            title,
        }
    }

    #[must_use]
    pub const fn boxes(x: Column, y: Column, title: &'static str) -> Self {
        Self {
            kind: ChartKind::Box,
            x,
            y,
            color: None,
            title,
        }
    }

    #[must_use]
    pub const fn colored_by(mut self, column: Column) -> Self {
        self.color = Some(column);
        self
    }
}

/// One colored group of scatter points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    /// Category of the color column, `None` for an uncolored chart.
    pub label: Option<String>,
    pub points: Vec<(f64, f64)>,
}

/// Box plot summary of one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxSummary {
    pub label: String,
    pub count: usize,
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
    /// Values beyond the whiskers.
    pub outliers: Vec<f64>,
}

impl BoxSummary {
    /// Summarizes a non-empty group; returns `None` for an empty one.
    #[must_use]
    pub fn from_values(label: impl Into<String>, values: &[f64]) -> Option<Self> {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let (&min, &max) = (sorted.first()?, sorted.last()?);

        let [q1, median, q3] = Percentiles::from_sorted(&sorted, &QUARTILES).quartiles()?;
        let reach = WHISKER_IQR * (q3 - q1);
        let (low_fence, high_fence) = (q1 - reach, q3 + reach);

        let lower_whisker = sorted
            .iter()
            .copied()
            .find(|&v| v >= low_fence)
            .unwrap_or(min);
        let upper_whisker = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= high_fence)
            .unwrap_or(max);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|&v| v < lower_whisker || v > upper_whisker)
            .collect();

        Some(Self {
            label: label.into(),
            count: sorted.len(),
            lower_whisker,
            q1,
            median,
            q3,
            upper_whisker,
            outliers,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartBody {
    Scatter { series: Vec<Series> },
    Box { groups: Vec<BoxSummary> },
}

/// A chart ready to be drawn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Label of the color column, if any.
    pub color_label: Option<String>,
    pub body: ChartBody,
}

impl ChartSpec {
    /// Resolves a request against the table.
    ///
    /// # Errors
    ///
    /// Fails if a column has the wrong kind for the chart: scatter axes must be
    /// numeric, box plot `x` and any color column must be categorical.
    ///
    /// # Examples
    ///
    /// ```
    /// use habits_analysis::{
    ///     chart::{ChartBody, ChartRequest, ChartSpec},
    ///     dataset::{Column, DataTable},
    /// };
    ///
    /// let csv = "\
    /// study_hours_per_day,sleep_hours,exam_score,part_time_job,attendance_percentage
    /// 1.0,6.0,50.0,Yes,80.0
    /// 3.0,8.0,90.0,No,95.0
    /// ";
    /// let table = DataTable::from_reader(csv.as_bytes()).unwrap();
    /// let request = ChartRequest::scatter(Column::StudyHours, Column::ExamScore, "Estudio vs Nota")
    ///     .colored_by(Column::PartTimeJob);
    /// let spec = ChartSpec::bind(&table, &request).unwrap();
    /// let ChartBody::Scatter { series } = spec.body else { panic!() };
    /// assert_eq!(series.len(), 2);
    /// ```
    pub fn bind(table: &DataTable, request: &ChartRequest) -> Result<Self, AnalysisError> {
        if let Some(color) = request.color {
            require_categorical(color)?;
        }
        require_numeric(request.y)?;

        let body = match request.kind {
            ChartKind::Scatter => {
                require_numeric(request.x)?;
                ChartBody::Scatter {
                    series: scatter_series(table, request),
                }
            }
            ChartKind::Box => {
                require_categorical(request.x)?;
                let groups = table
                    .numeric_by_category(request.y, request.x)
                    .unwrap_or_default()
                    .into_iter()
                    .filter_map(|(label, values)| BoxSummary::from_values(label, &values))
                    .collect();
                ChartBody::Box { groups }
            }
        };

        Ok(Self {
            title: request.title.to_owned(),
            x_label: request.x.label().to_owned(),
            y_label: request.y.label().to_owned(),
            color_label: request.color.map(|c| c.label().to_owned()),
            body,
        })
    }

    /// Range of the `y` values, or `None` for an empty chart.
    #[must_use]
    pub fn y_bounds(&self) -> Option<[f64; 2]> {
        match &self.body {
            ChartBody::Scatter { series } => {
                bounds(series.iter().flat_map(|s| &s.points).map(|p| p.1))
            }
            ChartBody::Box { groups } => bounds(groups.iter().flat_map(|g| {
                [g.lower_whisker, g.upper_whisker]
                    .into_iter()
                    .chain(g.outliers.iter().copied())
            })),
        }
    }

    /// Range of the `x` values of a scatter chart.
    #[must_use]
    pub fn x_bounds(&self) -> Option<[f64; 2]> {
        match &self.body {
            ChartBody::Scatter { series } => {
                bounds(series.iter().flat_map(|s| &s.points).map(|p| p.0))
            }
            ChartBody::Box { .. } => None,
        }
    }

    /// Number of plotted observations.
    #[must_use]
    pub fn point_count(&self) -> usize {
        match &self.body {
            ChartBody::Scatter { series } => series.iter().map(|s| s.points.len()).sum(),
            ChartBody::Box { groups } => groups.iter().map(|g| g.count).sum(),
        }
    }
}

fn scatter_series(table: &DataTable, request: &ChartRequest) -> Vec<Series> {
    let point = |row: &Observation| {
        Some((row.numeric(request.x)?, row.numeric(request.y)?))
    };
    match request.color {
        None => vec![Series {
            label: None,
            points: table.rows().iter().filter_map(point).collect(),
        }],
        Some(color) => {
            let mut groups = BTreeMap::<&str, Vec<(f64, f64)>>::new();
            for row in table.rows() {
                if let (Some(category), Some(p)) = (row.category(color), point(row)) {
                    groups.entry(category).or_default().push(p);
                }
            }
            groups
                .into_iter()
                .map(|(label, points)| Series {
                    label: Some(label.to_owned()),
                    points,
                })
                .collect()
        }
    }
}

fn bounds(values: impl Iterator<Item = f64>) -> Option<[f64; 2]> {
    values.fold(None, |acc, v| match acc {
        None => Some([v, v]),
        Some([lo, hi]) => Some([lo.min(v), hi.max(v)]),
    })
}

fn require_numeric(column: Column) -> Result<(), AnalysisError> {
    if column.is_numeric() {
        Ok(())
    } else {
        Err(AnalysisError::NotNumeric { column })
    }
}

fn require_categorical(column: Column) -> Result<(), AnalysisError> {
    if column.is_numeric() {
        Err(AnalysisError::NotCategorical { column })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::PartTimeJob;

    fn observation(score: f64, job: PartTimeJob) -> Observation {
        Observation {
            study_hours: score / 20.0,
            sleep_hours: 7.0,
            exam_score: score,
            part_time_job: job,
            attendance: 85.0,
        }
    }

    #[test]
    fn test_box_summary_whiskers() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 100.0];
        let summary = BoxSummary::from_values("g", &values).unwrap();
        assert_eq!(summary.q1, 3.0);
        assert_eq!(summary.median, 5.0);
        assert_eq!(summary.q3, 7.0);
        assert_eq!(summary.lower_whisker, 1.0);
        assert_eq!(summary.upper_whisker, 8.0);
        assert_eq!(summary.outliers, [100.0]);
        assert!(BoxSummary::from_values("empty", &[]).is_none());
    }

    #[test]
    fn test_box_chart_groups() {
        let table = DataTable::from_observations([
            observation(50.0, PartTimeJob::Yes),
            observation(60.0, PartTimeJob::Yes),
            observation(80.0, PartTimeJob::No),
        ]);
        let request = ChartRequest::boxes(Column::PartTimeJob, Column::ExamScore, "t")
            .colored_by(Column::PartTimeJob);
        let spec = ChartSpec::bind(&table, &request).unwrap();
        let ChartBody::Box { groups } = &spec.body else {
            panic!("expected a box chart");
        };
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].label, "No");
        assert_eq!(groups[1].median, 55.0);
        assert_eq!(spec.y_bounds(), Some([50.0, 80.0]));
        assert_eq!(spec.x_bounds(), None);
        assert_eq!(spec.point_count(), 3);
        assert_eq!(spec.x_label, "Trabajo Medio Tiempo");
    }

    #[test]
    fn test_scatter_without_color() {
        let table = DataTable::from_observations([
            observation(40.0, PartTimeJob::Yes),
            observation(80.0, PartTimeJob::No),
        ]);
        let request = ChartRequest::scatter(Column::StudyHours, Column::ExamScore, "t");
        let spec = ChartSpec::bind(&table, &request).unwrap();
        let ChartBody::Scatter { series } = &spec.body else {
            panic!("expected a scatter chart");
        };
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].points, [(2.0, 40.0), (4.0, 80.0)]);
        assert_eq!(spec.x_bounds(), Some([2.0, 4.0]));
        assert_eq!(spec.color_label, None);
    }

    #[test]
    fn test_wrong_column_kinds() {
        let table = DataTable::default();
        let request = ChartRequest::scatter(Column::PartTimeJob, Column::ExamScore, "t");
        assert_eq!(
            ChartSpec::bind(&table, &request),
            Err(AnalysisError::NotNumeric {
                column: Column::PartTimeJob
            })
        );
        let request = ChartRequest::boxes(Column::StudyHours, Column::ExamScore, "t");
        assert!(ChartSpec::bind(&table, &request).is_err());
        let request = ChartRequest::scatter(Column::StudyHours, Column::ExamScore, "t")
            .colored_by(Column::SleepHours);
        assert!(ChartSpec::bind(&table, &request).is_err());
    }

    #[test]
    fn test_empty_table_has_no_bounds() {
        let request = ChartRequest::scatter(Column::StudyHours, Column::ExamScore, "t");
        let spec = ChartSpec::bind(&DataTable::default(), &request).unwrap();
        assert_eq!(spec.y_bounds(), None);
        assert_eq!(spec.point_count(), 0);
    }
}
