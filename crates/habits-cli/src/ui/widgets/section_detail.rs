use habits_analysis::{document::Block, section::SectionId};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols::merge::MergeStrategy,
    text::{Line, Span},
    widgets::{Block as BlockWidget, Padding, Paragraph, Widget, Wrap},
};

use crate::ui::widgets::{ChartDisplay, color, emphasized_line};

/// Chart, statistics and conclusion of the selected subsection.
#[derive(Debug)]
pub struct SectionDetail<'a> {
    section: SectionId,
    blocks: &'a [Block],
    enabled: bool,
    scroll: u16,
}

impl<'a> SectionDetail<'a> {
    pub fn new(section: SectionId, blocks: &'a [Block], enabled: bool) -> Self {
        Self {
            section,
            blocks,
            enabled,
            scroll: 0,
        }
    }

    /// Scrolls the text below the chart by `scroll` lines.
    pub fn scroll(self, scroll: u16) -> Self {
        Self { scroll, ..self }
    }

    fn text(&self) -> Vec<Line<'static>> {
        let objective = self.section.subsection.objective();
        let mut lines = vec![
            emphasized_line(objective.statement()),
            Line::styled(objective.goal(), Style::default().fg(color::MUTED)),
            Line::default(),
        ];
        if !self.enabled {
            lines.push(Line::styled(
                "Sección desactivada. Pulsa Espacio para calcularla.",
                Style::default().fg(color::MUTED),
            ));
            return lines;
        }

        let bold = Style::default().add_modifier(Modifier::BOLD);
        for block in self.blocks {
            match block {
                Block::Statistic { test, line } => {
                    lines.push(Line::styled(format!("{test}:"), bold));
                    lines.push(Line::raw(line.clone()));
                    lines.push(Line::default());
                }
                Block::Error { message, .. } => {
                    lines.push(Line::from(vec![
                        Span::styled("Error: ", bold.fg(color::ERROR)),
                        Span::styled(message.clone(), Style::default().fg(color::ERROR)),
                    ]));
                    lines.push(Line::default());
                }
                Block::Markdown { text } => {
                    lines.push(emphasized_line(text));
                    lines.push(Line::default());
                }
                Block::Text { text } => {
                    lines.push(Line::raw(text.clone()));
                    lines.push(Line::default());
                }
                // The subheader repeats the border title and charts are drawn separately
                _ => {}
            }
        }
        lines
    }
}

impl Widget for SectionDetail<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let block = BlockWidget::bordered()
            .title(self.section.title())
            .merge_borders(MergeStrategy::Exact)
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        Widget::render(block, area, buf);

        let chart = self
            .enabled
            .then(|| {
                self.blocks.iter().find_map(|b| match b {
                    Block::Chart { spec } => Some(spec),
                    _ => None,
                })
            })
            .flatten();
        let text_area = match chart {
            Some(spec) => {
                let [chart_area, text_area] =
                    Layout::vertical([Constraint::Percentage(60), Constraint::Fill(1)])
                        .areas(inner);
                Widget::render(ChartDisplay::new(spec), chart_area, buf);
                text_area
            }
            None => inner,
        };

        let paragraph = Paragraph::new(self.text())
            .wrap(Wrap { trim: true })
            .scroll((self.scroll, 0));
        Widget::render(paragraph, text_area, buf);
    }
}
