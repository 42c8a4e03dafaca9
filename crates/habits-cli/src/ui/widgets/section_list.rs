use habits_analysis::section::{Objective, SectionId, Variant};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    symbols::merge::MergeStrategy,
    text::Line,
    widgets::{Block, List, ListItem, ListState, StatefulWidget, Widget},
};

use crate::ui::widgets::color;

/// Toggles of one variant grouped under their objectives.
#[derive(Debug)]
pub struct SectionList {
    variant: Variant,
    /// Index of the highlighted subsection in display order.
    selected: usize,
    /// Toggle state per subsection in display order.
    enabled: [bool; 4],
}

impl SectionList {
    pub fn new(variant: Variant, selected: usize, enabled: [bool; 4]) -> Self {
        Self {
            variant,
            selected,
            enabled,
        }
    }
}

impl Widget for SectionList {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let mut items = Vec::new();
        let mut selected_item = None;
        let mut index = 0;
        for objective in Objective::ALL {
            items.push(ListItem::new(Line::styled(
                objective.header(),
                Style::default()
                    .fg(color::MUTED)
                    .add_modifier(Modifier::BOLD),
            )));
            for subsection in objective.subsections() {
                let section = SectionId::new(self.variant, subsection);
                let mark = if self.enabled[index] { "[x]" } else { "[ ]" };
                if index == self.selected {
                    selected_item = Some(items.len());
                }
                items.push(ListItem::new(format!("{mark} {}", section.title())));
                index += 1;
            }
        }

        let list = List::new(items)
            .block(
                Block::bordered()
                    .title("Secciones")
                    .merge_borders(MergeStrategy::Exact),
            )
            .highlight_style(
                Style::default()
                    .fg(color::ACCENT)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol(">> ");

        let mut list_state = ListState::default();
        list_state.select(selected_item);

        StatefulWidget::render(list, area, buf, &mut list_state);
    }
}
