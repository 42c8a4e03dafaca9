use std::io;

use super::{
    App,
    event_loop::{EventLoop, LoopEvent},
};

/// Runs an [`App`] on the real terminal.
#[derive(Default, Debug)]
pub struct Runtime {
    events: EventLoop,
}

impl Runtime {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the application until it asks to exit.
    ///
    /// The terminal is switched to raw mode and the alternate screen for the
    /// duration of the call and restored afterwards, even on error.
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        app.init();

        ratatui::run(|terminal| {
            while !app.should_exit() {
                match self.events.next()? {
                    LoopEvent::Render => {
                        terminal.draw(|f| app.draw(f))?;
                    }
                    LoopEvent::Terminal(event) => app.handle_event(event),
                }
            }
            Ok(())
        })
    }
}
