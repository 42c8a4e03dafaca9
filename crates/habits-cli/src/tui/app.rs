use crossterm::event::Event;
use ratatui::Frame;

/// Application driven by [`Runtime::run`](super::Runtime::run).
pub trait App {
    /// Called once before the first frame.
    fn init(&mut self);

    fn should_exit(&self) -> bool;

    /// Handles key input, resizes and other terminal events.
    fn handle_event(&mut self, event: Event);

    /// Draws the current state. Called only when the state may have changed.
    fn draw(&self, frame: &mut Frame);
}
