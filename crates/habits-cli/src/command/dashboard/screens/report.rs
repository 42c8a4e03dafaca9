use crossterm::event::{Event, KeyCode};
use habits_analysis::{
    document::{Block, ReportDocument},
    section::{SectionId, Subsection, Variant},
    session::Session,
};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Spacing},
    style::{Color, Modifier, Style, Stylize as _},
    text::{Line, Text},
    widgets::{Paragraph, Tabs, Wrap},
};

use crate::{
    command::dashboard::screens::PreviewScreen,
    tui::{Screen, Transition},
    ui::widgets::{SectionDetail, SectionList},
};

/// Lines moved by one page of scrolling.
const PAGE: u16 = 5;

/// Main dashboard: toggles on the left, the selected subsection on the right.
#[derive(Debug)]
pub struct ReportScreen {
    session: Session,
    variant: Variant,
    selected: usize,
    scroll: u16,
    document: ReportDocument,
}

impl ReportScreen {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            variant: Variant::Primary,
            selected: 0,
            scroll: 0,
            document: ReportDocument::default(),
        }
    }

    fn selected_section(&self) -> SectionId {
        SectionId::new(self.variant, Subsection::ALL[self.selected])
    }

    fn refresh(&mut self) {
        self.document = self.session.render_variants(&[self.variant]);
    }

    fn intro_text(&self) -> Text<'_> {
        let mut lines = Vec::new();
        for block in &self.document.blocks {
            match block {
                Block::Title { text } => lines.push(Line::from(text.as_str()).bold()),
                Block::Text { text } => {
                    lines.push(Line::from(text.as_str()).fg(Color::DarkGray));
                }
                Block::Subheader { text } if lines.len() == 1 => {
                    lines.push(Line::from(text.as_str()));
                }
                Block::Preview { .. } => break,
                _ => {}
            }
        }
        Text::from(lines).centered()
    }
}

impl Screen for ReportScreen {
    fn on_active(&mut self) {
        self.refresh();
    }

    fn handle_event(&mut self, event: &Event) -> Transition {
        let Some(event) = event.as_key_event() else {
            return Transition::Stay;
        };
        let count = Subsection::ALL.len();
        match event.code {
            KeyCode::Char('q') | KeyCode::Esc => return Transition::Exit,
            KeyCode::Up => {
                self.selected = self.selected.checked_sub(1).unwrap_or(count - 1);
                self.scroll = 0;
            }
            KeyCode::Down => {
                self.selected = (self.selected + 1) % count;
                self.scroll = 0;
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                self.session.toggle(self.selected_section());
                self.refresh();
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.variant = self.variant.other();
                self.scroll = 0;
                self.refresh();
            }
            KeyCode::Char('a') => {
                self.session.toggle_variant(self.variant);
                self.refresh();
            }
            KeyCode::Char('p') => {
                let preview = PreviewScreen::new(self.session.table().clone());
                return Transition::Push(Box::new(preview));
            }
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(PAGE),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(PAGE),
            _ => {}
        }
        Transition::Stay
    }

    fn draw(&self, frame: &mut Frame) {
        let [intro_area, tabs_area, main_area, help_area] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());
        let [list_area, detail_area] =
            Layout::horizontal([Constraint::Percentage(35), Constraint::Percentage(65)])
                .spacing(Spacing::Overlap(1))
                .areas(main_area);

        let intro = Paragraph::new(self.intro_text()).wrap(Wrap { trim: true });

        let tabs = Tabs::new(Variant::ALL.map(Variant::label))
            .select(Variant::ALL.iter().position(|&v| v == self.variant))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );

        let enabled = self
            .variant
            .sections()
            .map(|section| self.session.is_enabled(section));
        let list = SectionList::new(self.variant, self.selected, enabled);

        let section = self.selected_section();
        let detail = SectionDetail::new(
            section,
            self.document.section_blocks(section),
            self.session.is_enabled(section),
        )
        .scroll(self.scroll);

        let help = Text::from(
            "↑/↓: Sección | Espacio/Enter: Activar | Tab: Variante | a: Todas | p: Datos | PgUp/PgDn: Desplazar | q/Esc: Salir",
        )
        .style(Style::default().fg(Color::DarkGray))
        .centered();

        frame.render_widget(intro, intro_area);
        frame.render_widget(tabs, tabs_area);
        frame.render_widget(list, list_area);
        frame.render_widget(detail, detail_area);
        frame.render_widget(help, help_area);
    }
}
