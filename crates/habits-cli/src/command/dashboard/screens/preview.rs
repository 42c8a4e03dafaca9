use crossterm::event::{Event, KeyCode};
use habits_analysis::dataset::{ColumnSummary, DataTable};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::Text,
};

use crate::{
    tui::{Screen, Transition},
    ui::widgets::DataPreview,
};

const PAGE: usize = 10;

/// Full-screen browser over the cleaned rows.
#[derive(Debug)]
pub struct PreviewScreen {
    table: DataTable,
    summaries: Vec<ColumnSummary>,
    offset: usize,
}

impl PreviewScreen {
    pub fn new(table: DataTable) -> Self {
        let summaries = table.summaries();
        Self {
            table,
            summaries,
            offset: 0,
        }
    }

    fn last_offset(&self) -> usize {
        self.table.len().saturating_sub(1)
    }
}

impl Screen for PreviewScreen {
    fn on_active(&mut self) {}

    fn handle_event(&mut self, event: &Event) -> Transition {
        let Some(event) = event.as_key_event() else {
            return Transition::Stay;
        };
        match event.code {
            KeyCode::Char('q') => return Transition::Exit,
            KeyCode::Esc | KeyCode::Char('p') => return Transition::Pop,
            KeyCode::Up => self.offset = self.offset.saturating_sub(1),
            KeyCode::Down => self.offset = (self.offset + 1).min(self.last_offset()),
            KeyCode::PageUp => self.offset = self.offset.saturating_sub(PAGE),
            KeyCode::PageDown => self.offset = (self.offset + PAGE).min(self.last_offset()),
            KeyCode::Home => self.offset = 0,
            KeyCode::End => self.offset = self.last_offset(),
            _ => {}
        }
        Transition::Stay
    }

    fn draw(&self, frame: &mut Frame) {
        let [main_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());

        let preview = DataPreview::new(&self.table, &self.summaries, self.offset);
        let help = Text::from(
            "↑/↓: Fila | PgUp/PgDn: Página | Home/End: Inicio/Fin | Esc/p: Volver | q: Salir",
        )
        .style(Style::default().fg(Color::DarkGray))
        .centered();

        frame.render_widget(preview, main_area);
        frame.render_widget(help, help_area);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyModifiers};
    use habits_analysis::dataset::{Observation, PartTimeJob};

    use super::*;
    use crate::command::dashboard::screens::test_util;

    fn screen(rows: u32) -> PreviewScreen {
        PreviewScreen::new(DataTable::from_observations((0..rows).map(|i| Observation {
            study_hours: f64::from(i) / 10.0,
            sleep_hours: 7.0,
            exam_score: 50.0 + f64::from(i % 50),
            part_time_job: if i % 2 == 0 {
                PartTimeJob::No
            } else {
                PartTimeJob::Yes
            },
            attendance: 90.0,
        })))
    }

    fn press(screen: &mut PreviewScreen, code: KeyCode) -> Transition {
        screen.handle_event(&Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    #[test]
    fn test_scrolling_is_clamped() {
        let mut screen = screen(25);
        press(&mut screen, KeyCode::Up);
        assert_eq!(screen.offset, 0);
        press(&mut screen, KeyCode::PageDown);
        press(&mut screen, KeyCode::PageDown);
        press(&mut screen, KeyCode::PageDown);
        assert_eq!(screen.offset, 24);
        press(&mut screen, KeyCode::Down);
        assert_eq!(screen.offset, 24);
        press(&mut screen, KeyCode::Home);
        assert_eq!(screen.offset, 0);
        press(&mut screen, KeyCode::End);
        assert_eq!(screen.offset, 24);
    }

    #[test]
    fn test_transitions() {
        let mut screen = screen(3);
        assert!(matches!(press(&mut screen, KeyCode::Esc), Transition::Pop));
        assert!(matches!(press(&mut screen, KeyCode::Char('p')), Transition::Pop));
        assert!(matches!(press(&mut screen, KeyCode::Char('q')), Transition::Exit));
        assert!(matches!(press(&mut screen, KeyCode::Down), Transition::Stay));
    }

    #[test]
    fn test_draw() {
        let mut screen = screen(30);
        press(&mut screen, KeyCode::PageDown);
        let text = test_util::text(&test_util::draw(&screen, 150, 40));
        assert!(text.contains("Vista previa de los datos (30 filas)"));
        assert!(text.contains("Resumen"));
        assert!(text.contains("Mediana"));
        // Scrolled past the first ten rows
        assert!(text.contains("11 "));
        assert!(!text.lines().any(|line| line.starts_with("│1 ")));
    }
}
