//! Report subsections and the analyses they run.
//!
//! The report has two variants of four subsections each. Both variants share the
//! same objectives and charts and differ in the statistical tests they apply:
//!
//! | id  | chart                                  | primary             | complementary            |
//! |-----|----------------------------------------|---------------------|--------------------------|
//! | 1.1 | study hours vs score                   | Pearson             | Shapiro-Wilk on both     |
//! | 1.2 | sleep hours vs score                   | Pearson             | Shapiro-Wilk on sleep    |
//! | 2.1 | score by part-time job (box)           | Kruskal-Wallis      | χ² job × performance     |
//! | 2.2 | attendance vs score, colored by job    | none                | Pearson                  |

use std::fmt::Write as _;

use habits_stats::{
    StatsError,
    contingency::{self, ContingencyTable, Independence},
    correlation::{self, Correlation},
    is_significant,
    kruskal::{self, GroupComparison},
    normality::{self, Normality},
};
use serde::Serialize;

use crate::{
    chart::ChartRequest,
    dataset::{Column, DataTable},
};

/// Failure of a single analysis. Shown inline in its subsection.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum AnalysisError {
    #[display("{_0}")]
    #[from]
    Stats(StatsError),
    #[display("column '{}' is not numeric", column.label())]
    NotNumeric { column: Column },
    #[display("column '{}' is not categorical", column.label())]
    NotCategorical { column: Column },
}

/// A statistical test applied to fixed columns of the table.
///
/// Results are pure functions of the table and this key, so it doubles as the
/// memoization key of a [`Session`](crate::session::Session).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(tag = "test", rename_all = "snake_case")]
pub enum Analysis {
    /// Pearson correlation between two numeric columns.
    Correlation { x: Column, y: Column },
    /// Kruskal-Wallis comparison of a numeric column across the categories of another.
    GroupComparison { value: Column, group: Column },
    /// Shapiro-Wilk normality test of one numeric column.
    Normality { column: Column },
    /// Chi-squared independence test of two categorical columns.
    Independence { rows: Column, columns: Column },
}

impl Analysis {
    /// Heading shown above the statistic line.
    #[must_use]
    pub fn name(self) -> String {
        match self {
            Self::Correlation { .. } => "Prueba de correlación de Pearson".to_owned(),
            Self::GroupComparison { .. } => "Prueba de Kruskal-Wallis".to_owned(),
            Self::Normality { column } => format!("Prueba de Shapiro-Wilk ({})", column.label()),
            Self::Independence { .. } => "Prueba Chi-cuadrado de independencia".to_owned(),
        }
    }

    /// Runs the test against the table.
    ///
    /// # Examples
    ///
    /// ```
    /// use habits_analysis::{
    ///     dataset::{Column, DataTable},
    ///     section::Analysis,
    /// };
    ///
    /// let csv = "\
    /// study_hours_per_day,sleep_hours,exam_score,part_time_job,attendance_percentage
    /// 1.0,6.0,50.0,Yes,80.0
    /// 2.0,7.5,62.0,No,85.0
    /// 3.0,7.0,81.0,No,95.0
    /// ";
    /// let table = DataTable::from_reader(csv.as_bytes()).unwrap();
    /// let analysis = Analysis::Correlation { x: Column::StudyHours, y: Column::ExamScore };
    /// let outcome = analysis.run(&table).unwrap();
    /// assert!(outcome.statistic() > 0.9);
    /// ```
    pub fn run(self, table: &DataTable) -> Result<AnalysisOutcome, AnalysisError> {
        match self {
            Self::Correlation { x, y } => {
                let xs = numeric(table, x)?;
                let ys = numeric(table, y)?;
                Ok(AnalysisOutcome::Correlation(correlation::correlate(&xs, &ys)?))
            }
            Self::GroupComparison { value, group } => {
                let groups = table
                    .numeric_by_category(value, group)
                    .ok_or_else(|| kind_error(value, group))?;
                let slices = groups.values().map(Vec::as_slice).collect::<Vec<_>>();
                Ok(AnalysisOutcome::GroupComparison(kruskal::kruskal_wallis(
                    &slices,
                )?))
            }
            Self::Normality { column } => {
                let sample = numeric(table, column)?;
                Ok(AnalysisOutcome::Normality(normality::test_normality(
                    &sample,
                )?))
            }
            Self::Independence { rows, columns } => {
                let pairs = table
                    .category_pairs(rows, columns)
                    .ok_or(AnalysisError::NotCategorical {
                        column: if rows.is_numeric() { rows } else { columns },
                    })?;
                let table = ContingencyTable::from_pairs(pairs);
                let result = contingency::test_independence(&table)?;
                Ok(AnalysisOutcome::Independence { table, result })
            }
        }
    }
}

fn numeric(table: &DataTable, column: Column) -> Result<Vec<f64>, AnalysisError> {
    table
        .numeric(column)
        .ok_or(AnalysisError::NotNumeric { column })
}

fn kind_error(value: Column, group: Column) -> AnalysisError {
    if value.is_numeric() {
        AnalysisError::NotCategorical { column: group }
    } else {
        AnalysisError::NotNumeric { column: value }
    }
}

/// Result of a successful analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "test", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    Correlation(Correlation),
    GroupComparison(GroupComparison),
    Normality(Normality),
    Independence {
        table: ContingencyTable,
        result: Independence,
    },
}

impl AnalysisOutcome {
    /// The test statistic (r, H, W or χ²).
    #[must_use]
    pub fn statistic(&self) -> f64 {
        match self {
            Self::Correlation(c) => c.r,
            Self::GroupComparison(g) => g.h,
            Self::Normality(n) => n.w,
            Self::Independence { result, .. } => result.chi2,
        }
    }

    #[must_use]
    pub fn p_value(&self) -> f64 {
        match self {
            Self::Correlation(c) => c.p_value,
            Self::GroupComparison(g) => g.p_value,
            Self::Normality(n) => n.p_value,
            Self::Independence { result, .. } => result.p_value,
        }
    }

    #[must_use]
    pub fn is_significant(&self) -> bool {
        is_significant(self.p_value())
    }

    /// Formats the statistic with 3 decimals and the p-value with 4.
    ///
    /// ```
    /// use habits_analysis::section::AnalysisOutcome;
    /// use habits_stats::correlation::Correlation;
    ///
    /// let outcome = AnalysisOutcome::Correlation(Correlation { r: 0.82545, p_value: 0.000_04, n: 100 });
    /// assert_eq!(outcome.statistic_line(), "Estadístico: 0.825, Valor P: 0.0000");
    /// ```
    #[must_use]
    pub fn statistic_line(&self) -> String {
        let mut line = format!(
            "Estadístico: {:.3}, Valor P: {:.4}",
            self.statistic(),
            self.p_value()
        );
        if let Self::Independence { result, .. } = self {
            let _ = write!(line, ", Grados de libertad: {}", result.dof);
        }
        line
    }
}

/// One of the two script variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Correlations and a group comparison.
    Primary,
    /// Normality checks, an independence test and the attendance correlation.
    Complementary,
}

impl Variant {
    pub const ALL: [Self; 2] = [Self::Primary, Self::Complementary];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Primary => "Análisis principal",
            Self::Complementary => "Análisis complementario",
        }
    }

    /// The four subsections of this variant in display order.
    #[must_use]
    pub fn sections(self) -> [SectionId; 4] {
        Subsection::ALL.map(|subsection| SectionId {
            variant: self,
            subsection,
        })
    }

    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::Primary => Self::Complementary,
            Self::Complementary => Self::Primary,
        }
    }
}

/// A research objective grouping two subsections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Objective {
    StudyAndSleep,
    EmploymentAndAttendance,
}

impl Objective {
    pub const ALL: [Self; 2] = [Self::StudyAndSleep, Self::EmploymentAndAttendance];

    #[must_use]
    pub fn header(self) -> &'static str {
        match self {
            Self::StudyAndSleep => "Objetivo 1",
            Self::EmploymentAndAttendance => "Objetivo 2",
        }
    }

    #[must_use]
    pub fn statement(self) -> &'static str {
        match self {
            Self::StudyAndSleep => {
                "**Analizar la relación entre las horas de estudio por día, horas de sueño y la calificación del examen**"
            }
            Self::EmploymentAndAttendance => {
                "**Comparar el rendimiento académico entre estudiantes que tienen trabajo a medio tiempo y los que no, considerando también su asistencia a clases.**"
            }
        }
    }

    #[must_use]
    pub fn goal(self) -> &'static str {
        match self {
            Self::StudyAndSleep => {
                "El objetivo es identificar si existe una combinación óptima entre descanso y estudio que favorezca el rendimiento académico."
            }
            Self::EmploymentAndAttendance => {
                "El objetivo es evaluar si el empleo afecta negativamente el desempeño, y si una alta asistencia puede compensarlo."
            }
        }
    }

    #[must_use]
    pub fn subsections(self) -> [Subsection; 2] {
        match self {
            Self::StudyAndSleep => [Subsection::StudyScore, Subsection::SleepScore],
            Self::EmploymentAndAttendance => [Subsection::JobScore, Subsection::AttendanceScore],
        }
    }
}

/// Position of a subsection within a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Subsection {
    StudyScore,
    SleepScore,
    JobScore,
    AttendanceScore,
}

impl Subsection {
    pub const ALL: [Self; 4] = [
        Self::StudyScore,
        Self::SleepScore,
        Self::JobScore,
        Self::AttendanceScore,
    ];

    /// Subsection number such as `"2.1"`.
    #[must_use]
    pub fn number(self) -> &'static str {
        match self {
            Self::StudyScore => "1.1",
            Self::SleepScore => "1.2",
            Self::JobScore => "2.1",
            Self::AttendanceScore => "2.2",
        }
    }

    /// Looks a subsection up by its number.
    ///
    /// ```
    /// use habits_analysis::section::Subsection;
    ///
    /// assert_eq!(Subsection::from_number("2.1"), Some(Subsection::JobScore));
    /// assert_eq!(Subsection::from_number("3.1"), None);
    /// ```
    #[must_use]
    pub fn from_number(number: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.number() == number.trim())
    }

    #[must_use]
    pub fn objective(self) -> Objective {
        match self {
            Self::StudyScore | Self::SleepScore => Objective::StudyAndSleep,
            Self::JobScore | Self::AttendanceScore => Objective::EmploymentAndAttendance,
        }
    }

    /// The chart shown by this subsection in both variants.
    #[must_use]
    pub fn chart(self) -> ChartRequest {
        match self {
            Self::StudyScore => ChartRequest::scatter(
                Column::StudyHours,
                Column::ExamScore,
                "Horas de Estudio vs Nota del Examen",
            ),
            Self::SleepScore => ChartRequest::scatter(
                Column::SleepHours,
                Column::ExamScore,
                "Horas de Sueño vs Nota del Examen",
            ),
            Self::JobScore => ChartRequest::boxes(
                Column::PartTimeJob,
                Column::ExamScore,
                "Trabajo a Medio Tiempo vs Nota del Examen",
            )
            .colored_by(Column::PartTimeJob),
            Self::AttendanceScore => ChartRequest::scatter(
                Column::Attendance,
                Column::ExamScore,
                "Asistencia vs Nota del Examen por tipo de Trabajo",
            )
            .colored_by(Column::PartTimeJob),
        }
    }
}

/// Identifies one of the eight toggleable subsections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SectionId {
    pub variant: Variant,
    pub subsection: Subsection,
}

const STUDY_SCORE: Analysis = Analysis::Correlation {
    x: Column::StudyHours,
    y: Column::ExamScore,
};
const SLEEP_SCORE: Analysis = Analysis::Correlation {
    x: Column::SleepHours,
    y: Column::ExamScore,
};
const SCORE_BY_JOB: Analysis = Analysis::GroupComparison {
    value: Column::ExamScore,
    group: Column::PartTimeJob,
};
const ATTENDANCE_SCORE: Analysis = Analysis::Correlation {
    x: Column::Attendance,
    y: Column::ExamScore,
};
const STUDY_NORMALITY: Analysis = Analysis::Normality {
    column: Column::StudyHours,
};
const SCORE_NORMALITY: Analysis = Analysis::Normality {
    column: Column::ExamScore,
};
const SLEEP_NORMALITY: Analysis = Analysis::Normality {
    column: Column::SleepHours,
};
const JOB_PERFORMANCE: Analysis = Analysis::Independence {
    rows: Column::PartTimeJob,
    columns: Column::Performance,
};

impl SectionId {
    /// Every subsection, primary variant first.
    pub const ALL: [Self; 8] = [
        Self::new(Variant::Primary, Subsection::StudyScore),
        Self::new(Variant::Primary, Subsection::SleepScore),
        Self::new(Variant::Primary, Subsection::JobScore),
        Self::new(Variant::Primary, Subsection::AttendanceScore),
        Self::new(Variant::Complementary, Subsection::StudyScore),
        Self::new(Variant::Complementary, Subsection::SleepScore),
        Self::new(Variant::Complementary, Subsection::JobScore),
        Self::new(Variant::Complementary, Subsection::AttendanceScore),
    ];

    #[must_use]
    pub const fn new(variant: Variant, subsection: Subsection) -> Self {
        Self {
            variant,
            subsection,
        }
    }

    /// Title used both for the toggle and the subsection header.
    #[must_use]
    pub fn title(self) -> &'static str {
        match (self.variant, self.subsection) {
            (Variant::Primary, Subsection::StudyScore) => {
                "1.1 Relación entre Horas de Estudio y Nota del Examen"
            }
            (Variant::Primary, Subsection::SleepScore) => {
                "1.2 Relación entre Horas de Sueño y Nota del Examen"
            }
            (Variant::Primary, Subsection::JobScore) => {
                "2.1 Comparación de Notas entre Estudiantes con y sin Trabajo"
            }
            (Variant::Primary, Subsection::AttendanceScore) => {
                "2.2 Relación entre Asistencia y Nota del Examen según Trabajo"
            }
            (Variant::Complementary, Subsection::StudyScore) => {
                "1.1 Normalidad de las Horas de Estudio y la Nota del Examen"
            }
            (Variant::Complementary, Subsection::SleepScore) => {
                "1.2 Normalidad de las Horas de Sueño"
            }
            (Variant::Complementary, Subsection::JobScore) => {
                "2.1 Independencia entre Trabajo a Medio Tiempo y Rendimiento"
            }
            (Variant::Complementary, Subsection::AttendanceScore) => {
                "2.2 Correlación entre Asistencia y Nota del Examen"
            }
        }
    }

    #[must_use]
    pub fn chart(self) -> ChartRequest {
        self.subsection.chart()
    }

    /// Tests run when the subsection is enabled, in display order.
    #[must_use]
    pub fn analyses(self) -> &'static [Analysis] {
        match (self.variant, self.subsection) {
            (Variant::Primary, Subsection::StudyScore) => &[STUDY_SCORE],
            (Variant::Primary, Subsection::SleepScore) => &[SLEEP_SCORE],
            (Variant::Primary, Subsection::JobScore) => &[SCORE_BY_JOB],
            (Variant::Primary, Subsection::AttendanceScore) => &[],
            (Variant::Complementary, Subsection::StudyScore) => {
                &[STUDY_NORMALITY, SCORE_NORMALITY]
            }
            (Variant::Complementary, Subsection::SleepScore) => &[SLEEP_NORMALITY],
            (Variant::Complementary, Subsection::JobScore) => &[JOB_PERFORMANCE],
            (Variant::Complementary, Subsection::AttendanceScore) => &[ATTENDANCE_SCORE],
        }
    }

    /// Interpretive conclusion given the outcomes of [`Self::analyses`].
    ///
    /// Returns `None` when a conclusion needs a result that failed.
    #[must_use]
    pub fn conclusion(self, outcomes: &[Result<AnalysisOutcome, AnalysisError>]) -> Option<String> {
        let prefix = format!("**Conclusión {}:**", self.subsection.number());
        let body = match (self.variant, self.subsection) {
            (Variant::Primary, Subsection::StudyScore) => {
                let r = outcomes.first()?.as_ref().ok()?.statistic();
                format!(
                    "Existe una correlación de {r:.3} entre las horas de estudio y la nota del examen. Esto indica una relación positiva significativa: estudiar más tiende a mejorar el rendimiento académico."
                )
            }
            (Variant::Primary, Subsection::SleepScore) => {
                let r = outcomes.first()?.as_ref().ok()?.statistic();
                format!(
                    "Se observó una correlación de {r:.3} entre horas de sueño y nota del examen. La relación es estadísticamente significativa (p < 0.05), por lo que dormir más parece contribuir a un mejor desempeño académico."
                )
            }
            (Variant::Primary, Subsection::JobScore) => {
                "Se compararon las notas entre estudiantes que tienen y no tienen trabajo a medio tiempo. No se encontró una diferencia significativa (p ≥ 0.05), por lo tanto no se puede afirmar que el trabajo influya directamente en las notas.".to_owned()
            }
            (Variant::Primary, Subsection::AttendanceScore) => {
                "Aunque no se aplicó una prueba estadística adicional aquí, el gráfico sugiere que una alta asistencia puede estar asociada con mejores resultados académicos, incluso entre quienes tienen trabajo.".to_owned()
            }
            (Variant::Complementary, Subsection::StudyScore | Subsection::SleepScore) => {
                if outcomes.len() < self.analyses().len() {
                    return None;
                }
                let sentences = self
                    .analyses()
                    .iter()
                    .zip(outcomes)
                    .map(|(analysis, outcome)| {
                        let Analysis::Normality { column } = analysis else {
                            return None;
                        };
                        Some(normality_sentence(*column, outcome.as_ref().ok()?))
                    })
                    .collect::<Option<Vec<_>>>()?;
                sentences.join(" ")
            }
            (Variant::Complementary, Subsection::JobScore) => {
                let AnalysisOutcome::Independence { result, .. } = outcomes.first()?.as_ref().ok()?
                else {
                    return None;
                };
                independence_sentence(result)
            }
            (Variant::Complementary, Subsection::AttendanceScore) => {
                let outcome = outcomes.first()?.as_ref().ok()?;
                let r = outcome.statistic();
                if outcome.is_significant() {
                    format!(
                        "Se observó una correlación de {r:.3} entre el porcentaje de asistencia y la nota del examen. La relación es estadísticamente significativa (p < 0.05): asistir más a clases se asocia con mejores notas."
                    )
                } else {
                    format!(
                        "Se observó una correlación de {r:.3} entre el porcentaje de asistencia y la nota del examen, pero no es estadísticamente significativa (p ≥ 0.05)."
                    )
                }
            }
        };
        Some(format!("{prefix} {body}"))
    }
}

fn normality_sentence(column: Column, outcome: &AnalysisOutcome) -> String {
    let label = column.label();
    if outcome.is_significant() {
        format!(
            "La distribución de {label} se aparta significativamente de la normal (p < 0.05); conviene usar pruebas no paramétricas."
        )
    } else {
        format!(
            "No hay evidencia de que la distribución de {label} se aparte de la normal (p ≥ 0.05)."
        )
    }
}

fn independence_sentence(result: &Independence) -> String {
    let mut sentence = if is_significant(result.p_value) {
        "Existe una asociación significativa entre tener trabajo a medio tiempo y el rendimiento (p < 0.05).".to_owned()
    } else {
        "No se encontró una asociación significativa entre tener trabajo a medio tiempo y el rendimiento (p ≥ 0.05), por lo que ambas variables parecen independientes.".to_owned()
    };
    if !result.is_reliable() {
        sentence.push_str(
            " Algunas frecuencias esperadas son menores que 5, así que el resultado debe interpretarse con cautela.",
        );
    }
    sentence
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Observation, PartTimeJob};

    fn table() -> DataTable {
        let rows = [
            (1.0, 6.0, 52.0, PartTimeJob::Yes, 70.0),
            (2.0, 7.0, 61.0, PartTimeJob::No, 80.0),
            (3.0, 6.5, 74.0, PartTimeJob::Yes, 90.0),
            (4.0, 8.0, 85.0, PartTimeJob::No, 95.0),
            (2.5, 7.5, 68.0, PartTimeJob::No, 85.0),
            (3.5, 5.5, 79.0, PartTimeJob::Yes, 75.0),
        ];
        DataTable::from_observations(rows.map(
            |(study_hours, sleep_hours, exam_score, part_time_job, attendance)| Observation {
                study_hours,
                sleep_hours,
                exam_score,
                part_time_job,
                attendance,
            },
        ))
    }

    #[test]
    fn test_all_sections_are_unique() {
        let mut ids = SectionId::ALL.to_vec();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 8);
        assert_eq!(
            Variant::Complementary.sections().as_slice(),
            &SectionId::ALL[4..]
        );
    }

    #[test]
    fn test_every_analysis_runs() {
        let table = table();
        for id in SectionId::ALL {
            for analysis in id.analyses() {
                let outcome = analysis.run(&table).unwrap();
                assert!((0.0..=1.0).contains(&outcome.p_value()), "{analysis:?}");
            }
        }
    }

    #[test]
    fn test_wrong_column_kinds() {
        let table = table();
        let analysis = Analysis::Correlation {
            x: Column::PartTimeJob,
            y: Column::ExamScore,
        };
        assert_eq!(
            analysis.run(&table),
            Err(AnalysisError::NotNumeric {
                column: Column::PartTimeJob
            })
        );
        let analysis = Analysis::GroupComparison {
            value: Column::ExamScore,
            group: Column::StudyHours,
        };
        assert_eq!(
            analysis.run(&table),
            Err(AnalysisError::NotCategorical {
                column: Column::StudyHours
            })
        );
        let analysis = Analysis::Independence {
            rows: Column::Attendance,
            columns: Column::Performance,
        };
        assert!(analysis.run(&table).is_err());
    }

    #[test]
    fn test_stats_errors_are_wrapped() {
        let err = STUDY_NORMALITY.run(&DataTable::default()).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::Stats(StatsError::SampleSize { size: 0, .. })
        ));
        assert!(err.to_string().contains("sample size 0"));
    }

    #[test]
    fn test_independence_outcome() {
        let outcome = JOB_PERFORMANCE.run(&table()).unwrap();
        let AnalysisOutcome::Independence { table, result } = &outcome else {
            panic!("expected an independence outcome");
        };
        assert_eq!(table.row_labels(), ["No", "Yes"]);
        assert_eq!(table.column_labels(), ["Alto", "Bajo"]);
        assert_eq!(result.dof, 1);
        assert!(outcome.statistic_line().ends_with("Grados de libertad: 1"));
    }

    #[test]
    fn test_primary_conclusions() {
        let id = SectionId::new(Variant::Primary, Subsection::StudyScore);
        let outcome = Ok(AnalysisOutcome::Correlation(Correlation {
            r: 0.8254,
            p_value: 0.0,
            n: 1000,
        }));
        let text = id.conclusion(&[outcome]).unwrap();
        assert!(text.starts_with("**Conclusión 1.1:** Existe una correlación de 0.825 "));

        let failed = Err(AnalysisError::Stats(StatsError::InsufficientData {
            reason: "test",
        }));
        assert_eq!(id.conclusion(&[failed]), None);

        let id = SectionId::new(Variant::Primary, Subsection::AttendanceScore);
        assert!(id.conclusion(&[]).unwrap().starts_with("**Conclusión 2.2:**"));
    }

    #[test]
    fn test_complementary_conclusions_follow_significance() {
        let id = SectionId::new(Variant::Complementary, Subsection::StudyScore);
        let outcomes = [
            Ok(AnalysisOutcome::Normality(Normality {
                w: 0.95,
                p_value: 0.001,
                n: 100,
            })),
            Ok(AnalysisOutcome::Normality(Normality {
                w: 0.99,
                p_value: 0.4,
                n: 100,
            })),
        ];
        let text = id.conclusion(&outcomes).unwrap();
        assert!(text.contains("Horas de Estudio se aparta significativamente"));
        assert!(text.contains("No hay evidencia de que la distribución de Nota del Examen"));
        assert_eq!(id.conclusion(&outcomes[..1]), None);
    }

    #[test]
    fn test_subsection_numbers_round_trip() {
        for subsection in Subsection::ALL {
            assert_eq!(Subsection::from_number(subsection.number()), Some(subsection));
            assert!(subsection.objective().subsections().contains(&subsection));
        }
    }
}
