//! Loading and cleaning of the student habits dataset.
//!
//! The source file is a CSV export with one row per student. Only five columns
//! are used; everything else is ignored. Cleaning is a fixed three-step pipeline:
//!
//! 1. **Project** to the required columns (missing columns are an error)
//! 2. **Drop** rows with a missing value in any required column
//! 3. **Deduplicate** exact duplicate rows, keeping the first occurrence
//!
//! Columns are then addressed by [`Column`], which carries the display label used
//! throughout the report.
//!
//! # Examples
//!
//! ```
//! use habits_analysis::dataset::{Column, DataTable};
//!
//! let csv = "\
//! student_id,study_hours_per_day,sleep_hours,exam_score,part_time_job,attendance_percentage
//! S1,2.5,7.0,66.1,No,90.2
//! S2,,6.0,71.0,Yes,80.0
//! S3,2.5,7.0,66.1,No,90.2
//! S4,4.0,8.1,88.4,Yes,95.5
//! ";
//! let table = DataTable::from_reader(csv.as_bytes()).unwrap();
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.numeric(Column::ExamScore), Some(vec![66.1, 88.4]));
//! assert_eq!(Column::StudyHours.label(), "Horas de Estudio");
//! ```

use std::{
    collections::{BTreeMap, HashSet},
    fs::File,
    io,
    path::{Path, PathBuf},
};

use habits_stats::descriptive::DescriptiveStats;
use serde::Serialize;

use crate::performance::Performance;

/// Default dataset location, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "student_habits_performance.csv";

/// Cell contents treated as missing values.
const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A column of the cleaned table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Column {
    StudyHours,
    SleepHours,
    ExamScore,
    PartTimeJob,
    Attendance,
    /// Derived `Alto`/`Bajo` bucket of the exam score.
    Performance,
}

impl Column {
    /// Columns read from the source file, in display order.
    pub const SOURCE: [Self; 5] = [
        Self::StudyHours,
        Self::SleepHours,
        Self::ExamScore,
        Self::PartTimeJob,
        Self::Attendance,
    ];

    /// Header of the column in the source file, or `None` for derived columns.
    #[must_use]
    pub fn source_name(self) -> Option<&'static str> {
        match self {
            Self::StudyHours => Some("study_hours_per_day"),
            Self::SleepHours => Some("sleep_hours"),
            Self::ExamScore => Some("exam_score"),
            Self::PartTimeJob => Some("part_time_job"),
            Self::Attendance => Some("attendance_percentage"),
            Self::Performance => None,
        }
    }

    /// Display label used in tables, charts and conclusions.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::StudyHours => "Horas de Estudio",
            Self::SleepHours => "Horas de Sueño",
            Self::ExamScore => "Nota del Examen",
            Self::PartTimeJob => "Trabajo Medio Tiempo",
            Self::Attendance => "Porcentaje de Asistencia",
            Self::Performance => "Rendimiento",
        }
    }

    #[must_use]
    pub fn is_numeric(self) -> bool {
        !matches!(self, Self::PartTimeJob | Self::Performance)
    }
}

/// Whether the student holds a part-time job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PartTimeJob {
    Yes,
    No,
}

impl PartTimeJob {
    /// Category label as it appears in the source file.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "Yes" => Some(Self::Yes),
            "No" => Some(Self::No),
            _ => None,
        }
    }
}

/// One cleaned student record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Observation {
    pub study_hours: f64,
    pub sleep_hours: f64,
    pub exam_score: f64,
    pub part_time_job: PartTimeJob,
    pub attendance: f64,
}

impl Observation {
    /// Value of a numeric column, or `None` for categorical columns.
    #[must_use]
    pub fn numeric(&self, column: Column) -> Option<f64> {
        match column {
            Column::StudyHours => Some(self.study_hours),
            Column::SleepHours => Some(self.sleep_hours),
            Column::ExamScore => Some(self.exam_score),
            Column::Attendance => Some(self.attendance),
            Column::PartTimeJob | Column::Performance => None,
        }
    }

    /// Category label of a categorical column.
    ///
    /// Returns `None` for numeric columns and for scores outside every
    /// performance bucket.
    #[must_use]
    pub fn category(&self, column: Column) -> Option<&'static str> {
        match column {
            Column::PartTimeJob => Some(self.part_time_job.label()),
            Column::Performance => Performance::classify(self.exam_score).map(Performance::label),
            _ => None,
        }
    }

    /// Formats a cell for tabular display.
    #[must_use]
    pub fn display(&self, column: Column) -> String {
        match self.numeric(column) {
            Some(value) => format!("{value}"),
            None => self.category(column).unwrap_or("").to_owned(),
        }
    }

    fn dedup_key(&self) -> ([u64; 4], PartTimeJob) {
        // Adding +0.0 maps -0.0 to 0.0 so both compare equal
        let bits = |v: f64| (v + 0.0).to_bits();
        (
            [
                bits(self.study_hours),
                bits(self.sleep_hours),
                bits(self.exam_score),
                bits(self.attendance),
            ],
            self.part_time_job,
        )
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum DatasetError {
    #[display("failed to open dataset {}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[display("failed to read dataset")]
    Csv(csv::Error),
    #[display("dataset is missing required columns: {}", columns.join(", "))]
    MissingColumns { columns: Vec<String> },
    #[display("invalid value '{value}' in column '{column}' at data row {row}")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },
}

impl From<csv::Error> for DatasetError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Summary of one column for the data preview.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnSummary {
    Numeric {
        column: Column,
        stats: DescriptiveStats,
    },
    Categorical {
        column: Column,
        counts: BTreeMap<&'static str, usize>,
    },
}

/// The cleaned working table.
///
/// Fixed once loaded; every analysis reads from it without mutating it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataTable {
    rows: Vec<Observation>,
    dropped_missing: usize,
    dropped_duplicates: usize,
}

impl DataTable {
    /// Loads and cleans the dataset at `path`.
    pub fn from_path(path: &Path) -> Result<Self, DatasetError> {
        let file = File::open(path).map_err(|source| DatasetError::Open {
            path: path.to_owned(),
            source,
        })?;
        let table = Self::from_reader(file)?;
        log::info!(
            "loaded {} rows from {} ({} with missing values, {} duplicates dropped)",
            table.len(),
            path.display(),
            table.dropped_missing,
            table.dropped_duplicates
        );
        Ok(table)
    }

    /// Loads and cleans CSV data from any reader.
    pub fn from_reader<R>(reader: R) -> Result<Self, DatasetError>
    where
        R: io::Read,
    {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

        let headers = reader.headers()?.clone();
        let mut indices = Vec::with_capacity(Column::SOURCE.len());
        let mut missing = Vec::new();
        for column in Column::SOURCE {
            let name = column.source_name().unwrap_or_default();
            match headers.iter().position(|h| h == name) {
                Some(index) => indices.push(index),
                None => missing.push(name.to_owned()),
            }
        }
        if !missing.is_empty() {
            return Err(DatasetError::MissingColumns { columns: missing });
        }

        let mut table = Self::default();
        let mut seen = HashSet::new();
        for (i, record) in reader.records().enumerate() {
            let record = record?;
            let row = i + 1;
            let cells = indices
                .iter()
                .map(|&index| record.get(index).unwrap_or_default())
                .collect::<Vec<_>>();
            if cells.iter().any(|cell| MISSING_MARKERS.contains(cell)) {
                table.dropped_missing += 1;
                continue;
            }

            let observation = Observation {
                study_hours: parse_number(row, Column::StudyHours, cells[0])?,
                sleep_hours: parse_number(row, Column::SleepHours, cells[1])?,
                exam_score: parse_number(row, Column::ExamScore, cells[2])?,
                part_time_job: PartTimeJob::parse(cells[3])
                    .ok_or_else(|| invalid_value(row, Column::PartTimeJob, cells[3]))?,
                attendance: parse_number(row, Column::Attendance, cells[4])?,
            };
            if seen.insert(observation.dedup_key()) {
                table.rows.push(observation);
            } else {
                table.dropped_duplicates += 1;
            }
        }
        Ok(table)
    }

    /// Builds a table from already clean observations (duplicates are still removed).
    #[must_use]
    pub fn from_observations<I>(observations: I) -> Self
    where
        I: IntoIterator<Item = Observation>,
    {
        let mut table = Self::default();
        let mut seen = HashSet::new();
        for observation in observations {
            if seen.insert(observation.dedup_key()) {
                table.rows.push(observation);
            } else {
                table.dropped_duplicates += 1;
            }
        }
        table
    }

    #[must_use]
    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows dropped because a required value was missing.
    #[must_use]
    pub fn dropped_missing(&self) -> usize {
        self.dropped_missing
    }

    /// Rows dropped as exact duplicates of an earlier row.
    #[must_use]
    pub fn dropped_duplicates(&self) -> usize {
        self.dropped_duplicates
    }

    /// All values of a numeric column, or `None` for categorical columns.
    #[must_use]
    pub fn numeric(&self, column: Column) -> Option<Vec<f64>> {
        column
            .is_numeric()
            .then(|| self.rows.iter().filter_map(|r| r.numeric(column)).collect())
    }

    /// Values of a numeric column grouped by the categories of another column.
    ///
    /// Rows without a category are skipped. Returns `None` if `value` is not
    /// numeric or `group` is not categorical.
    #[must_use]
    pub fn numeric_by_category(
        &self,
        value: Column,
        group: Column,
    ) -> Option<BTreeMap<&'static str, Vec<f64>>> {
        if !value.is_numeric() || group.is_numeric() {
            return None;
        }
        let mut groups = BTreeMap::<&'static str, Vec<f64>>::new();
        for row in &self.rows {
            if let (Some(category), Some(v)) = (row.category(group), row.numeric(value)) {
                groups.entry(category).or_default().push(v);
            }
        }
        Some(groups)
    }

    /// Pairs of categories from two categorical columns, skipping rows where
    /// either is undefined.
    #[must_use]
    pub fn category_pairs(
        &self,
        rows: Column,
        columns: Column,
    ) -> Option<Vec<(&'static str, &'static str)>> {
        if rows.is_numeric() || columns.is_numeric() {
            return None;
        }
        Some(
            self.rows
                .iter()
                .filter_map(|r| Some((r.category(rows)?, r.category(columns)?)))
                .collect(),
        )
    }

    /// Per-column summaries of the source columns.
    #[must_use]
    pub fn summaries(&self) -> Vec<ColumnSummary> {
        Column::SOURCE
            .iter()
            .filter_map(|&column| {
                if let Some(values) = self.numeric(column) {
                    let stats = DescriptiveStats::new(values)?;
                    Some(ColumnSummary::Numeric { column, stats })
                } else {
                    let mut counts = BTreeMap::new();
                    for row in &self.rows {
                        if let Some(category) = row.category(column) {
                            *counts.entry(category).or_default() += 1;
                        }
                    }
                    Some(ColumnSummary::Categorical { column, counts })
                }
            })
            .collect()
    }
}

/// Parses a finite number; `inf` and NaN spellings that are not missing markers
/// are invalid values.
fn parse_number(row: usize, column: Column, cell: &str) -> Result<f64, DatasetError> {
    cell.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| invalid_value(row, column, cell))
}

fn invalid_value(row: usize, column: Column, cell: &str) -> DatasetError {
    DatasetError::InvalidValue {
        row,
        column: column.source_name().unwrap_or(column.label()).to_owned(),
        value: cell.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "student_id,age,study_hours_per_day,sleep_hours,exam_score,part_time_job,attendance_percentage\n";

    fn load(body: &str) -> Result<DataTable, DatasetError> {
        DataTable::from_reader(format!("{HEADER}{body}").as_bytes())
    }

    #[test]
    fn test_projection_and_order() {
        let table = load("S1,20,1.5,6.5,55.0,Yes,80.0\nS2,21,3.0,8.0,77.5,No,92.3\n").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.rows()[1],
            Observation {
                study_hours: 3.0,
                sleep_hours: 8.0,
                exam_score: 77.5,
                part_time_job: PartTimeJob::No,
                attendance: 92.3,
            }
        );
    }

    #[test]
    fn test_missing_markers_are_dropped() {
        let table = load(
            "S1,20,1.5,NA,55.0,Yes,80.0\n\
             S2,21,3.0,8.0,,No,92.3\n\
             S3,22,2.0,7.0,60.0,None,70.0\n\
             S4,23,2.0,7.0,60.0,No,70.0\n",
        )
        .unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.dropped_missing(), 3);
    }

    #[test]
    fn test_nan_spellings() {
        let table = load(
            "S1,20,1.5,-NaN,55.0,Yes,80.0\n\
             S2,21,3.0,1.#QNAN,70.0,No,92.3\n\
             S3,22,2.0,7.0,60.0,No,70.0\n",
        )
        .unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.dropped_missing(), 2);
        assert_eq!(table.summaries().len(), 5);

        for cell in ["NAN", "inf", "-Infinity"] {
            let err = load(&format!("S1,20,1.5,{cell},55.0,Yes,80.0\n")).unwrap_err();
            assert!(matches!(
                err,
                DatasetError::InvalidValue { ref column, ref value, .. }
                    if column == "sleep_hours" && value == cell
            ));
        }
    }

    #[test]
    fn test_signed_zero_duplicates() {
        let table = load("S1,20,0.0,7.0,55.0,Yes,80.0\nS2,21,-0.0,7.0,55.0,Yes,80.0\n").unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.dropped_duplicates(), 1);
    }

    #[test]
    fn test_ignored_columns_do_not_affect_cleaning() {
        // Missing age and differing student ids are irrelevant after projection
        let table = load("S1,,1.5,6.5,55.0,Yes,80.0\nS2,30,1.5,6.5,55.0,Yes,80.0\n").unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.dropped_missing(), 0);
        assert_eq!(table.dropped_duplicates(), 1);
    }

    #[test]
    fn test_missing_columns() {
        let err = DataTable::from_reader("study_hours_per_day,exam_score\n1.0,50.0\n".as_bytes())
            .unwrap_err();
        match err {
            DatasetError::MissingColumns { columns } => assert_eq!(
                columns,
                ["sleep_hours", "part_time_job", "attendance_percentage"]
            ),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_values() {
        let err = load("S1,20,abc,6.5,55.0,Yes,80.0\n").unwrap_err();
        assert!(matches!(
            err,
            DatasetError::InvalidValue { row: 1, ref column, ref value }
                if column == "study_hours_per_day" && value == "abc"
        ));
        let err = load("S1,20,1.0,6.5,55.0,Maybe,80.0\n").unwrap_err();
        assert!(matches!(err, DatasetError::InvalidValue { .. }));
    }

    #[test]
    fn test_open_error() {
        let err = DataTable::from_path(Path::new("/nonexistent/habits.csv")).unwrap_err();
        assert!(matches!(err, DatasetError::Open { .. }));
    }

    #[test]
    fn test_grouping_and_pairs() {
        let table = load(
            "S1,20,1.0,6.0,50.0,Yes,80.0\n\
             S2,20,2.0,7.0,70.0,No,85.0\n\
             S3,20,3.0,8.0,90.0,No,95.0\n",
        )
        .unwrap();
        let groups = table
            .numeric_by_category(Column::ExamScore, Column::PartTimeJob)
            .unwrap();
        assert_eq!(groups["Yes"], [50.0]);
        assert_eq!(groups["No"], [70.0, 90.0]);
        assert!(table.numeric_by_category(Column::PartTimeJob, Column::ExamScore).is_none());

        let pairs = table
            .category_pairs(Column::PartTimeJob, Column::Performance)
            .unwrap();
        assert_eq!(pairs, [("Yes", "Bajo"), ("No", "Alto"), ("No", "Alto")]);
    }

    #[test]
    fn test_summaries() {
        let table = load("S1,20,1.0,6.0,50.0,Yes,80.0\nS2,20,3.0,8.0,70.0,No,90.0\n").unwrap();
        let summaries = table.summaries();
        assert_eq!(summaries.len(), 5);
        match &summaries[0] {
            ColumnSummary::Numeric { column, stats } => {
                assert_eq!(*column, Column::StudyHours);
                assert_eq!(stats.mean, 2.0);
            }
            ColumnSummary::Categorical { .. } => panic!("study hours must be numeric"),
        }
        match &summaries[3] {
            ColumnSummary::Categorical { counts, .. } => {
                assert_eq!(counts.get("Yes"), Some(&1));
                assert_eq!(counts.get("No"), Some(&1));
            }
            ColumnSummary::Numeric { .. } => panic!("part-time job must be categorical"),
        }
    }
}
