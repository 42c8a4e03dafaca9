use habits_analysis::dataset::{Column, ColumnSummary, DataTable};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols::merge::MergeStrategy,
    text::Line,
    widgets::{Block, Cell, Paragraph, Row, Table, Widget},
};

use crate::ui::widgets::color;

/// Scrollable view of the cleaned table with per-column summaries.
#[derive(Debug)]
pub struct DataPreview<'a> {
    table: &'a DataTable,
    summaries: &'a [ColumnSummary],
    offset: usize,
}

impl<'a> DataPreview<'a> {
    pub fn new(table: &'a DataTable, summaries: &'a [ColumnSummary], offset: usize) -> Self {
        Self {
            table,
            summaries,
            offset,
        }
    }

    fn header_style() -> Style {
        Style::default()
            .fg(color::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    fn rows_table(&self, visible: usize) -> Table<'a> {
        let rows = self
            .table
            .rows()
            .iter()
            .enumerate()
            .skip(self.offset)
            .take(visible)
            .map(|(i, row)| {
                let cells = std::iter::once(Cell::from((i + 1).to_string()).style(color::MUTED))
                    .chain(Column::SOURCE.iter().map(|&c| Cell::from(row.display(c))));
                Row::new(cells)
            })
            .collect::<Vec<_>>();
        let header = Row::new(std::iter::once(Cell::from("#")).chain(header_cells()))
            .style(Self::header_style());
        let widths = std::iter::once(Constraint::Length(5))
            .chain(Column::SOURCE.iter().map(|_| Constraint::Fill(1)));

        Table::new(rows, widths).header(header).block(
            Block::bordered()
                .merge_borders(MergeStrategy::Exact)
                .title(format!(
                    "Vista previa de los datos ({} filas)",
                    self.table.len()
                )),
        )
    }

    fn summary_table(&self) -> Table<'a> {
        let header = [
            "Columna", "Media", "Desv.", "Mín", "Q1", "Mediana", "Q3", "Máx",
        ];
        let rows = self
            .summaries
            .iter()
            .filter_map(|summary| match summary {
                ColumnSummary::Numeric { column, stats } => Some(Row::new([
                    column.label().to_owned(),
                    format!("{:.2}", stats.mean),
                    format!("{:.2}", stats.std_dev),
                    format!("{:.2}", stats.min),
                    format!("{:.2}", stats.q1),
                    format!("{:.2}", stats.median),
                    format!("{:.2}", stats.q3),
                    format!("{:.2}", stats.max),
                ])),
                ColumnSummary::Categorical { .. } => None,
            })
            .collect::<Vec<_>>();
        let widths = std::iter::once(Constraint::Length(26))
            .chain(std::iter::repeat_n(Constraint::Fill(1), header.len() - 1));

        Table::new(rows, widths)
            .header(Row::new(header).style(Self::header_style()))
            .block(
                Block::bordered()
                    .merge_borders(MergeStrategy::Exact)
                    .title("Resumen"),
            )
    }

    fn category_lines(&self) -> Vec<Line<'a>> {
        self.summaries
            .iter()
            .filter_map(|summary| match summary {
                ColumnSummary::Categorical { column, counts } => {
                    let counts = counts
                        .iter()
                        .map(|(category, count)| format!("{category} = {count}"))
                        .collect::<Vec<_>>()
                        .join(", ");
                    Some(Line::raw(format!(" {}: {counts}", column.label())))
                }
                ColumnSummary::Numeric { .. } => None,
            })
            .collect()
    }
}

fn header_cells() -> impl Iterator<Item = Cell<'static>> {
    Column::SOURCE.into_iter().map(|c| Cell::from(c.label()))
}

impl Widget for DataPreview<'_> {
    #[expect(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let numeric = self
            .summaries
            .iter()
            .filter(|s| matches!(s, ColumnSummary::Numeric { .. }))
            .count();
        let categories = self.category_lines();

        let [rows_area, summary_area, category_area] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(numeric as u16 + 3),
            Constraint::Length(categories.len() as u16),
        ])
        .areas(area);

        // Border and header row take three lines
        let visible = usize::from(rows_area.height.saturating_sub(3));
        Widget::render(self.rows_table(visible), rows_area, buf);
        Widget::render(self.summary_table(), summary_area, buf);
        Widget::render(Paragraph::new(categories), category_area, buf);
    }
}
