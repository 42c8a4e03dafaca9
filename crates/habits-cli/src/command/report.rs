use std::path::{Path, PathBuf};

use clap::ValueEnum;
use habits_analysis::{
    markdown,
    section::{SectionId, Subsection, Variant},
    session::Session,
};

use crate::util::{self, Output};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum ReportFormat {
    #[default]
    Markdown,
    Json,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum VariantSelection {
    Primary,
    Complementary,
    #[default]
    All,
}

impl VariantSelection {
    fn variants(self) -> &'static [Variant] {
        match self {
            Self::Primary => &[Variant::Primary],
            Self::Complementary => &[Variant::Complementary],
            Self::All => &Variant::ALL,
        }
    }
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ReportArg {
    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: ReportFormat,
    /// Which variant of the analysis to include
    #[arg(long, value_enum, default_value_t)]
    variant: VariantSelection,
    /// Subsections to enable, comma-separated (e.g. 1.1,2.1). All when omitted
    #[arg(long, value_delimiter = ',', value_parser = parse_subsection)]
    sections: Vec<Subsection>,
    /// Write the report to this file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn parse_subsection(value: &str) -> Result<Subsection, String> {
    Subsection::from_number(value).ok_or_else(|| {
        let known = Subsection::ALL.map(Subsection::number).join(", ");
        format!("unknown subsection '{value}' (expected one of {known})")
    })
}

pub(crate) fn run(data: &Path, arg: &ReportArg) -> anyhow::Result<()> {
    let ReportArg {
        format,
        variant,
        sections,
        output,
    } = arg;

    let table = util::read_data_file(data)?;
    let mut session = Session::new(table);
    let variants = variant.variants();
    for &variant in variants {
        for section in variant.sections() {
            let enabled = sections.is_empty() || sections.contains(&section.subsection);
            session.set_enabled(section, enabled);
        }
    }
    log::info!(
        "rendering {} subsections",
        session.enabled_sections().count()
    );

    let document = session.render_variants(variants);
    for (section, message) in document.errors() {
        log::warn!("{}: {message}", section_label(section));
    }

    let mut output = Output::from_output_path(output.as_deref())?;
    match format {
        ReportFormat::Markdown => output.write_text(&markdown::to_markdown(&document))?,
        ReportFormat::Json => output.write_json(&document)?,
    }
    log::info!("report written to {}", output.display_path());
    Ok(())
}

fn section_label(section: SectionId) -> String {
    format!("{} {}", section.variant.label(), section.subsection.number())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[clap(flatten)]
        report: ReportArg,
    }

    #[test]
    fn test_parse_sections() {
        let cli = TestCli::try_parse_from(["test", "--sections", "1.1,2.2", "--format", "json"])
            .unwrap();
        assert_eq!(
            cli.report.sections,
            [Subsection::StudyScore, Subsection::AttendanceScore]
        );
        assert_eq!(cli.report.format, ReportFormat::Json);
        assert_eq!(cli.report.variant, VariantSelection::All);
    }

    #[test]
    fn test_unknown_section_is_rejected() {
        assert!(TestCli::try_parse_from(["test", "--sections", "3.4"]).is_err());
    }

    #[test]
    fn test_variant_selection() {
        assert_eq!(VariantSelection::Primary.variants(), [Variant::Primary]);
        assert_eq!(VariantSelection::All.variants().len(), 2);
    }
}
