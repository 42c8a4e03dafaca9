//! Markdown rendering of a [`ReportDocument`].
//!
//! Charts cannot be drawn in Markdown, so they are replaced by a short textual
//! summary: point counts for scatter plots, five-number summaries for box plots.

use std::fmt::Write as _;

use crate::{
    chart::{ChartBody, ChartSpec},
    dataset::{Column, ColumnSummary},
    document::{Block, ReportDocument},
};

/// Renders the whole document.
///
/// # Examples
///
/// ```
/// use habits_analysis::{
///     document::{Block, ReportDocument},
///     markdown::to_markdown,
/// };
///
/// let mut document = ReportDocument::default();
/// document.push(Block::Title { text: "Informe".into() });
/// document.push(Block::Text { text: "Hola".into() });
/// assert_eq!(to_markdown(&document), "# Informe\n\nHola\n");
/// ```
#[must_use]
pub fn to_markdown(document: &ReportDocument) -> String {
    let mut out = String::new();
    for block in &document.blocks {
        if !out.is_empty() {
            out.push('\n');
        }
        write_block(&mut out, block);
    }
    out
}

fn write_block(out: &mut String, block: &Block) {
    match block {
        Block::Title { text } => writeln!(out, "# {text}"),
        Block::Header { text } => writeln!(out, "## {text}"),
        Block::Subheader { text } => writeln!(out, "### {text}"),
        Block::Text { text } | Block::Markdown { text } => writeln!(out, "{text}"),
        Block::Preview {
            columns,
            rows,
            total_rows,
            summaries,
        } => write_preview(out, columns, rows, *total_rows, summaries),
        Block::Toggle { label, enabled, .. } => {
            let mark = if *enabled { 'x' } else { ' ' };
            writeln!(out, "- [{mark}] {label}")
        }
        Block::Chart { spec } => write_chart(out, spec),
        Block::Statistic { test, line } => writeln!(out, "**{test}:**\n\n{line}"),
        Block::Error { message, .. } => writeln!(out, "> **Error:** {message}"),
    }
    .unwrap_or_default();
}

fn write_preview(
    out: &mut String,
    columns: &[Column],
    rows: &[Vec<String>],
    total_rows: usize,
    summaries: &[ColumnSummary],
) -> std::fmt::Result {
    write_row(out, columns.iter().map(|c| c.label()))?;
    write_row(out, columns.iter().map(|_| "---"))?;
    for row in rows {
        write_row(out, row.iter().map(String::as_str))?;
    }
    if total_rows > rows.len() {
        writeln!(out, "\n_Mostrando {} de {total_rows} filas._", rows.len())?;
    }

    let mut numeric = summaries
        .iter()
        .filter_map(|summary| match summary {
            ColumnSummary::Numeric { column, stats } => Some((column, stats)),
            ColumnSummary::Categorical { .. } => None,
        })
        .peekable();
    if numeric.peek().is_some() {
        writeln!(out)?;
        write_row(
            out,
            [
                "Columna", "Recuento", "Media", "Desv. típica", "Mín", "Q1", "Mediana", "Q3",
                "Máx",
            ],
        )?;
        write_row(out, ["---"; 9])?;
        for (column, stats) in numeric {
            writeln!(
                out,
                "| {} | {} | {:.3} | {:.3} | {:.3} | {:.3} | {:.3} | {:.3} | {:.3} |",
                column.label(),
                stats.count,
                stats.mean,
                stats.std_dev,
                stats.min,
                stats.q1,
                stats.median,
                stats.q3,
                stats.max
            )?;
        }
    }

    for summary in summaries {
        if let ColumnSummary::Categorical { column, counts } = summary {
            let counts = counts
                .iter()
                .map(|(category, count)| format!("{category} = {count}"))
                .collect::<Vec<_>>();
            writeln!(out, "\n{}: {}", column.label(), counts.join(", "))?;
        }
    }
    Ok(())
}

fn write_row<'a>(out: &mut String, cells: impl IntoIterator<Item = &'a str>) -> std::fmt::Result {
    out.push('|');
    for cell in cells {
        write!(out, " {cell} |")?;
    }
    out.push('\n');
    Ok(())
}

fn write_chart(out: &mut String, spec: &ChartSpec) -> std::fmt::Result {
    write!(
        out,
        "> **Gráfico:** {} ({} vs {}",
        spec.title, spec.x_label, spec.y_label
    )?;
    if let Some(color) = &spec.color_label {
        write!(out, ", color por {color}")?;
    }
    writeln!(out, ")")?;

    match &spec.body {
        ChartBody::Scatter { series } => {
            for s in series {
                let label = s.label.as_deref().unwrap_or("Todos");
                writeln!(out, ">\n> - {label}: {} puntos", s.points.len())?;
            }
        }
        ChartBody::Box { groups } => {
            for g in groups {
                writeln!(
                    out,
                    ">\n> - {}: n = {}, mediana = {:.3}, Q1 = {:.3}, Q3 = {:.3}, bigotes = [{:.3}, {:.3}], atípicos = {}",
                    g.label,
                    g.count,
                    g.median,
                    g.q1,
                    g.q3,
                    g.lower_whisker,
                    g.upper_whisker,
                    g.outliers.len()
                )?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        chart::{BoxSummary, Series},
        section::{SectionId, Subsection, Variant},
    };

    #[test]
    fn test_toggles_and_errors() {
        let id = SectionId::new(Variant::Primary, Subsection::JobScore);
        let document = ReportDocument {
            blocks: vec![
                Block::Toggle {
                    section: id,
                    label: "2.1 Comparación".into(),
                    enabled: true,
                },
                Block::Error {
                    section: id,
                    message: "insufficient data".into(),
                },
                Block::Toggle {
                    section: id,
                    label: "2.2 Relación".into(),
                    enabled: false,
                },
            ],
        };
        assert_eq!(
            to_markdown(&document),
            "- [x] 2.1 Comparación\n\n> **Error:** insufficient data\n\n- [ ] 2.2 Relación\n"
        );
    }

    #[test]
    fn test_statistic_block() {
        let document = ReportDocument {
            blocks: vec![Block::Statistic {
                test: "Prueba de Kruskal-Wallis".into(),
                line: "Estadístico: 1.234, Valor P: 0.2667".into(),
            }],
        };
        assert_eq!(
            to_markdown(&document),
            "**Prueba de Kruskal-Wallis:**\n\nEstadístico: 1.234, Valor P: 0.2667\n"
        );
    }

    #[test]
    fn test_preview_truncation_note() {
        let document = ReportDocument {
            blocks: vec![Block::Preview {
                columns: vec![Column::StudyHours, Column::PartTimeJob],
                rows: vec![vec!["1.5".into(), "Yes".into()]],
                total_rows: 3,
                summaries: vec![],
            }],
        };
        let markdown = to_markdown(&document);
        assert!(markdown.starts_with(
            "| Horas de Estudio | Trabajo Medio Tiempo |\n| --- | --- |\n| 1.5 | Yes |\n"
        ));
        assert!(markdown.contains("_Mostrando 1 de 3 filas._"));
    }

    #[test]
    fn test_chart_summary() {
        let spec = ChartSpec {
            title: "Asistencia vs Nota".into(),
            x_label: "Porcentaje de Asistencia".into(),
            y_label: "Nota del Examen".into(),
            color_label: Some("Trabajo Medio Tiempo".into()),
            body: ChartBody::Scatter {
                series: vec![
                    Series {
                        label: Some("No".into()),
                        points: vec![(90.0, 80.0), (70.0, 60.0)],
                    },
                    Series {
                        label: Some("Yes".into()),
                        points: vec![(85.0, 75.0)],
                    },
                ],
            },
        };
        let markdown = to_markdown(&ReportDocument {
            blocks: vec![Block::Chart { spec }],
        });
        assert!(markdown.contains("color por Trabajo Medio Tiempo"));
        assert!(markdown.contains("> - No: 2 puntos"));
        assert!(markdown.contains("> - Yes: 1 puntos"));

        let group = BoxSummary::from_values("No", &[1.0, 2.0, 3.0]).unwrap();
        let markdown = to_markdown(&ReportDocument {
            blocks: vec![Block::Chart {
                spec: ChartSpec {
                    title: "t".into(),
                    x_label: "x".into(),
                    y_label: "y".into(),
                    color_label: None,
                    body: ChartBody::Box {
                        groups: vec![group],
                    },
                },
            }],
        });
        assert!(markdown.contains("> - No: n = 3, mediana = 2.000"));
    }
}
