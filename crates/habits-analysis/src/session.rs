//! Session state behind the dashboard.
//!
//! A [`Session`] owns the cleaned table, one toggle per subsection and the memo
//! caches. Rendering is explicit: callers change toggles and then call
//! [`Session::render`] (or [`Session::render_variants`]) to obtain a fresh
//! [`ReportDocument`]. Analyses and charts are computed the first time an
//! enabled subsection needs them and reused afterwards.

use std::collections::{BTreeSet, HashMap};

use crate::{
    chart::{ChartRequest, ChartSpec},
    dataset::{Column, DataTable},
    document::{Block, ReportDocument, group_thousands},
    section::{Analysis, AnalysisError, AnalysisOutcome, Objective, SectionId, Variant},
};

/// Rows included in the document preview.
pub const PREVIEW_ROWS: usize = 10;

const TITLE: &str = "Hábitos Estudiantiles y Rendimiento Académico";
const DESCRIPTION: &str = "Este estudio analiza cómo los hábitos de estudio, sueño, trabajo a medio tiempo y asistencia influyen en el rendimiento académico.";
const PREVIEW_HEADER: &str = "Vista previa de los datos";

#[derive(Debug)]
pub struct Session {
    table: DataTable,
    enabled: BTreeSet<SectionId>,
    outcomes: HashMap<Analysis, Result<AnalysisOutcome, AnalysisError>>,
    charts: HashMap<ChartRequest, Result<ChartSpec, AnalysisError>>,
}

impl Session {
    /// Creates a session with every subsection disabled.
    #[must_use]
    pub fn new(table: DataTable) -> Self {
        Self {
            table,
            enabled: BTreeSet::new(),
            outcomes: HashMap::new(),
            charts: HashMap::new(),
        }
    }

    #[must_use]
    pub fn table(&self) -> &DataTable {
        &self.table
    }

    #[must_use]
    pub fn is_enabled(&self, section: SectionId) -> bool {
        self.enabled.contains(&section)
    }

    pub fn set_enabled(&mut self, section: SectionId, enabled: bool) {
        if enabled {
            self.enabled.insert(section);
        } else {
            self.enabled.remove(&section);
        }
    }

    /// Flips a toggle and returns its new state.
    pub fn toggle(&mut self, section: SectionId) -> bool {
        let enabled = !self.is_enabled(section);
        self.set_enabled(section, enabled);
        enabled
    }

    /// Enables every subsection of a variant, or disables them all if they are
    /// already all enabled.
    pub fn toggle_variant(&mut self, variant: Variant) {
        let enable = !variant.sections().iter().all(|&s| self.is_enabled(s));
        for section in variant.sections() {
            self.set_enabled(section, enable);
        }
    }

    pub fn enabled_sections(&self) -> impl Iterator<Item = SectionId> + '_ {
        self.enabled.iter().copied()
    }

    /// Number of memoized analysis results.
    #[must_use]
    pub fn cached_outcomes(&self) -> usize {
        self.outcomes.len()
    }

    /// Runs an analysis, or returns the result of an earlier run.
    pub fn outcome(&mut self, analysis: Analysis) -> &Result<AnalysisOutcome, AnalysisError> {
        let table = &self.table;
        self.outcomes.entry(analysis).or_insert_with(|| {
            log::debug!("computing {analysis:?}");
            let outcome = analysis.run(table);
            if let Err(err) = &outcome {
                log::warn!("{} failed: {err}", analysis.name());
            }
            outcome
        })
    }

    /// Binds a chart, or returns an earlier binding.
    pub fn chart(&mut self, request: ChartRequest) -> &Result<ChartSpec, AnalysisError> {
        let table = &self.table;
        self.charts.entry(request).or_insert_with(|| {
            log::debug!("binding chart '{}'", request.title);
            ChartSpec::bind(table, &request)
        })
    }

    /// Renders both variants.
    pub fn render(&mut self) -> ReportDocument {
        self.render_variants(&Variant::ALL)
    }

    /// Renders the introduction followed by the given variants.
    pub fn render_variants(&mut self, variants: &[Variant]) -> ReportDocument {
        let mut document = ReportDocument::default();
        self.render_introduction(&mut document);
        for &variant in variants {
            if variants.len() > 1 {
                document.push(Block::Header {
                    text: variant.label().to_owned(),
                });
            }
            for objective in Objective::ALL {
                document.push(Block::Header {
                    text: objective.header().to_owned(),
                });
                document.push(Block::Markdown {
                    text: objective.statement().to_owned(),
                });
                document.push(Block::Markdown {
                    text: objective.goal().to_owned(),
                });
                for subsection in objective.subsections() {
                    self.render_section(&mut document, SectionId::new(variant, subsection));
                }
            }
        }
        document
    }

    fn render_introduction(&self, document: &mut ReportDocument) {
        document.push(Block::Title {
            text: TITLE.to_owned(),
        });
        document.push(Block::Subheader {
            text: format!(
                "Análisis basado en datos de {} estudiantes",
                group_thousands(self.table.len())
            ),
        });
        document.push(Block::Text {
            text: DESCRIPTION.to_owned(),
        });
        document.push(Block::Subheader {
            text: PREVIEW_HEADER.to_owned(),
        });
        document.push(Block::Preview {
            columns: Column::SOURCE.to_vec(),
            rows: self
                .table
                .rows()
                .iter()
                .take(PREVIEW_ROWS)
                .map(|row| Column::SOURCE.iter().map(|&c| row.display(c)).collect())
                .collect(),
            total_rows: self.table.len(),
            summaries: self.table.summaries(),
        });
    }

    fn render_section(&mut self, document: &mut ReportDocument, section: SectionId) {
        let enabled = self.is_enabled(section);
        document.push(Block::Toggle {
            section,
            label: section.title().to_owned(),
            enabled,
        });
        if !enabled {
            return;
        }

        document.push(Block::Subheader {
            text: section.title().to_owned(),
        });
        match self.chart(section.chart()) {
            Ok(spec) => document.push(Block::Chart { spec: spec.clone() }),
            Err(err) => document.push(Block::Error {
                section,
                message: format!("{}: {err}", section.chart().title),
            }),
        }

        let mut outcomes = Vec::with_capacity(section.analyses().len());
        for &analysis in section.analyses() {
            let outcome = self.outcome(analysis).clone();
            match &outcome {
                Ok(result) => document.push(Block::Statistic {
                    test: analysis.name(),
                    line: result.statistic_line(),
                }),
                Err(err) => document.push(Block::Error {
                    section,
                    message: format!("{}: {err}", analysis.name()),
                }),
            }
            outcomes.push(outcome);
        }

        if let Some(text) = section.conclusion(&outcomes) {
            document.push(Block::Markdown { text });
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng as _, SeedableRng as _};
    use rand_distr::{Distribution as _, Normal};
    use rand_pcg::Pcg64Mcg;

    use super::*;
    use crate::{
        dataset::{Observation, PartTimeJob},
        section::Subsection,
    };

    /// 1,000 students whose score rises with study hours.
    fn synthetic_table() -> DataTable {
        let mut rng = Pcg64Mcg::seed_from_u64(7);
        let noise = Normal::new(0.0, 6.0).unwrap();
        DataTable::from_observations((0..1000).map(|_| {
            let study_hours: f64 = rng.random_range(0.0..8.0);
            let sleep_hours = rng.random_range(4.0..10.0);
            let attendance = rng.random_range(55.0..100.0);
            let exam_score = (35.0 + 7.0 * study_hours + noise.sample(&mut rng)).clamp(1.0, 100.0);
            let part_time_job = if rng.random_bool(0.25) {
                PartTimeJob::Yes
            } else {
                PartTimeJob::No
            };
            Observation {
                study_hours,
                sleep_hours,
                exam_score,
                part_time_job,
                attendance,
            }
        }))
    }

    /// The rows of [`synthetic_table`] as a source file, with an extra column,
    /// rows with missing values and repeated rows mixed in.
    fn synthetic_csv() -> String {
        let mut csv = String::from(
            "student_id,study_hours_per_day,sleep_hours,exam_score,part_time_job,attendance_percentage\n",
        );
        let table = synthetic_table();
        for (i, row) in table.rows().iter().enumerate() {
            let line = format!(
                "{},{},{},{},{}",
                row.study_hours,
                row.sleep_hours,
                row.exam_score,
                row.part_time_job.label(),
                row.attendance
            );
            csv.push_str(&format!("S{i},{line}\n"));
            if i % 200 == 0 {
                csv.push_str(&format!("D{i},{line}\n"));
                csv.push_str(&format!("M{i},{},NA,50.0,No,90.0\n", row.study_hours));
            }
        }
        csv
    }

    fn section(variant: Variant, subsection: Subsection) -> SectionId {
        SectionId::new(variant, subsection)
    }

    #[test]
    fn test_disabled_sections_compute_nothing() {
        let mut session = Session::new(synthetic_table());
        let document = session.render();
        assert_eq!(session.cached_outcomes(), 0);
        let toggles = document
            .blocks
            .iter()
            .filter(|b| matches!(b, Block::Toggle { enabled: false, .. }))
            .count();
        assert_eq!(toggles, 8);
        assert!(!document.blocks.iter().any(|b| matches!(b, Block::Chart { .. })));
    }

    #[test]
    fn test_positive_study_association() {
        let table = DataTable::from_reader(synthetic_csv().as_bytes()).unwrap();
        assert_eq!(table.len(), 1000);
        assert_eq!(table.dropped_missing(), 5);
        assert_eq!(table.dropped_duplicates(), 5);
        assert_eq!(table.rows(), synthetic_table().rows());

        let mut session = Session::new(table);
        let id = section(Variant::Primary, Subsection::StudyScore);
        session.set_enabled(id, true);
        let document = session.render_variants(&[Variant::Primary]);

        let Ok(AnalysisOutcome::Correlation(correlation)) = session.outcome(id.analyses()[0])
        else {
            panic!("expected a correlation");
        };
        assert!(correlation.r > 0.0);
        assert_eq!(correlation.n, 1000);

        let blocks = document.section_blocks(id);
        assert!(blocks.iter().any(|b| matches!(b, Block::Chart { .. })));
        assert!(blocks.iter().any(|b| matches!(
            b,
            Block::Markdown { text } if text.starts_with("**Conclusión 1.1:**")
        )));
        assert!(matches!(
            &document.blocks[1],
            Block::Subheader { text } if text == "Análisis basado en datos de 1,000 estudiantes"
        ));
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let table = synthetic_table();
        let mut session = Session::new(table.clone());
        session.toggle_variant(Variant::Primary);
        session.toggle_variant(Variant::Complementary);
        let first = session.render();
        let second = session.render();
        assert_eq!(first, second);

        let mut fresh = Session::new(table);
        for id in SectionId::ALL {
            fresh.set_enabled(id, true);
        }
        assert_eq!(fresh.render(), first);
    }

    #[test]
    fn test_shared_analyses_are_memoized() {
        let mut session = Session::new(synthetic_table());
        session.toggle_variant(Variant::Complementary);
        session.render();
        // Two normality tests in 1.1, one in 1.2, the independence test and one correlation
        assert_eq!(session.cached_outcomes(), 5);

        session.toggle_variant(Variant::Complementary);
        session.set_enabled(section(Variant::Complementary, Subsection::StudyScore), true);
        session.render();
        assert_eq!(session.cached_outcomes(), 5);
    }

    #[test]
    fn test_section_errors_stay_inline() {
        // Too few rows for Shapiro-Wilk and a single job category for Kruskal-Wallis
        let table = DataTable::from_observations([
            Observation {
                study_hours: 1.0,
                sleep_hours: 6.0,
                exam_score: 50.0,
                part_time_job: PartTimeJob::No,
                attendance: 80.0,
            },
            Observation {
                study_hours: 2.0,
                sleep_hours: 7.0,
                exam_score: 60.0,
                part_time_job: PartTimeJob::No,
                attendance: 90.0,
            },
        ]);
        let mut session = Session::new(table);
        for id in SectionId::ALL {
            session.set_enabled(id, true);
        }
        let document = session.render();

        let failing = document.errors().map(|(id, _)| id).collect::<BTreeSet<_>>();
        assert!(failing.contains(&section(Variant::Primary, Subsection::JobScore)));
        assert!(failing.contains(&section(Variant::Complementary, Subsection::StudyScore)));
        assert!(!failing.contains(&section(Variant::Primary, Subsection::StudyScore)));

        // Sections after a failing one still render
        let attendance =
            document.section_blocks(section(Variant::Primary, Subsection::AttendanceScore));
        assert!(attendance.iter().any(|b| matches!(b, Block::Chart { .. })));
    }

    #[test]
    fn test_toggle() {
        let mut session = Session::new(DataTable::default());
        let id = section(Variant::Primary, Subsection::SleepScore);
        assert!(session.toggle(id));
        assert!(session.is_enabled(id));
        assert!(!session.toggle(id));
        assert_eq!(session.enabled_sections().count(), 0);

        session.toggle_variant(Variant::Primary);
        assert_eq!(session.enabled_sections().count(), 4);
        session.toggle_variant(Variant::Primary);
        assert_eq!(session.enabled_sections().count(), 0);
    }
}
