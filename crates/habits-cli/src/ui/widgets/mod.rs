use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

pub use self::{chart_display::*, data_preview::*, section_detail::*, section_list::*};

mod chart_display;
mod data_preview;
mod section_detail;
mod section_list;

mod color {
    use ratatui::style::Color;

    /// Colors assigned to chart series in order.
    pub const SERIES: [Color; 4] = [Color::Cyan, Color::Yellow, Color::Magenta, Color::Green];
    pub const ACCENT: Color = Color::Yellow;
    pub const MUTED: Color = Color::DarkGray;
    pub const ERROR: Color = Color::Red;

    pub fn series(index: usize) -> Color {
        SERIES[index % SERIES.len()]
    }
}

/// Converts `**bold**` emphasis into styled spans. Other Markdown is kept verbatim.
fn emphasized_line(text: &str) -> Line<'static> {
    let bold = Style::new().add_modifier(Modifier::BOLD);
    let spans = text
        .split("**")
        .enumerate()
        .filter(|(_, part)| !part.is_empty())
        .map(|(i, part)| {
            if i % 2 == 1 {
                Span::styled(part.to_owned(), bold)
            } else {
                Span::raw(part.to_owned())
            }
        })
        .collect::<Vec<_>>();
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emphasized_line() {
        let line = emphasized_line("**Conclusión 1.1:** Existe una correlación");
        assert_eq!(line.spans.len(), 2);
        assert_eq!(line.spans[0].content, "Conclusión 1.1:");
        assert!(line.spans[0].style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(line.spans[1].content, " Existe una correlación");
        assert!(line.spans[1].style.add_modifier.is_empty());
    }
}
