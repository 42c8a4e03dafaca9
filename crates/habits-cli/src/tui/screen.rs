use std::fmt;

use crossterm::event::Event;
use ratatui::Frame;

use super::App;

/// One full-screen view of the dashboard.
///
/// Only the top screen of a [`ScreenStack`] receives events and is drawn.
/// [`on_active`](Self::on_active) runs when a screen reaches the top: at startup,
/// after being pushed, and when the screen above it is popped.
pub trait Screen: fmt::Debug {
    fn on_active(&mut self);

    /// Handles a terminal event and decides where to go next.
    fn handle_event(&mut self, event: &Event) -> Transition;

    fn draw(&self, frame: &mut Frame);
}

/// Result of handling an event.
#[derive(Debug)]
pub enum Transition {
    Stay,
    /// Open a new screen on top of the current one.
    Push(Box<dyn Screen>),
    /// Close the current screen and return to the previous one.
    Pop,
    /// Close every screen.
    Exit,
}

/// Stack of screens implementing [`App`].
#[derive(Debug)]
pub struct ScreenStack {
    screens: Vec<Box<dyn Screen>>,
    should_exit: bool,
}

impl ScreenStack {
    #[must_use]
    pub fn new(initial: Box<dyn Screen>) -> Self {
        Self {
            screens: vec![initial],
            should_exit: false,
        }
    }

    fn apply_transition(&mut self, transition: Transition) {
        match transition {
            Transition::Stay => {}
            Transition::Push(mut screen) => {
                screen.on_active();
                self.screens.push(screen);
            }
            Transition::Pop => {
                self.screens.pop();
                if let Some(previous) = self.screens.last_mut() {
                    previous.on_active();
                }
            }
            Transition::Exit => {
                self.screens.clear();
                self.should_exit = true;
            }
        }
    }
}

impl App for ScreenStack {
    fn init(&mut self) {
        if let Some(screen) = self.screens.last_mut() {
            screen.on_active();
        }
    }

    fn should_exit(&self) -> bool {
        self.should_exit || self.screens.is_empty()
    }

    fn handle_event(&mut self, event: Event) {
        if let Some(current) = self.screens.last_mut() {
            let transition = current.handle_event(&event);
            self.apply_transition(transition);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        if let Some(current) = self.screens.last() {
            current.draw(frame);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::*;

    #[derive(Debug, Clone, Default)]
    struct CallLog(Rc<RefCell<Vec<String>>>);

    impl CallLog {
        fn push(&self, call: String) {
            self.0.borrow_mut().push(call);
        }

        fn take(&self) -> Vec<String> {
            std::mem::take(&mut *self.0.borrow_mut())
        }
    }

    /// Screen that records calls and replies with queued transitions.
    #[derive(Debug)]
    struct ScriptedScreen {
        name: &'static str,
        log: CallLog,
        replies: Vec<Transition>,
    }

    impl ScriptedScreen {
        fn boxed(name: &'static str, log: &CallLog, replies: Vec<Transition>) -> Box<Self> {
            Box::new(Self {
                name,
                log: log.clone(),
                replies,
            })
        }
    }

    impl Screen for ScriptedScreen {
        fn on_active(&mut self) {
            self.log.push(format!("{}: active", self.name));
        }

        fn handle_event(&mut self, _event: &Event) -> Transition {
            self.log.push(format!("{}: event", self.name));
            if self.replies.is_empty() {
                Transition::Stay
            } else {
                self.replies.remove(0)
            }
        }

        fn draw(&self, _frame: &mut Frame) {}
    }

    fn key() -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char('p'), KeyModifiers::NONE))
    }

    #[test]
    fn test_init_activates_initial_screen() {
        let log = CallLog::default();
        let mut stack = ScreenStack::new(ScriptedScreen::boxed("report", &log, vec![]));
        stack.init();
        assert_eq!(log.take(), ["report: active"]);
        assert!(!stack.should_exit());
    }

    #[test]
    fn test_push_then_pop_reactivates_previous() {
        let log = CallLog::default();
        let preview = ScriptedScreen::boxed("preview", &log, vec![Transition::Pop]);
        let mut stack = ScreenStack::new(ScriptedScreen::boxed(
            "report",
            &log,
            vec![Transition::Push(preview)],
        ));
        stack.init();
        log.take();

        stack.handle_event(key());
        assert_eq!(log.take(), ["report: event", "preview: active"]);

        stack.handle_event(key());
        assert_eq!(log.take(), ["preview: event", "report: active"]);
        assert!(!stack.should_exit());

        // Events reach the reactivated screen again
        stack.handle_event(key());
        assert_eq!(log.take(), ["report: event"]);
    }

    #[test]
    fn test_exit_clears_stack() {
        let log = CallLog::default();
        let mut stack = ScreenStack::new(ScriptedScreen::boxed(
            "report",
            &log,
            vec![Transition::Exit],
        ));
        stack.init();
        stack.handle_event(key());
        assert!(stack.should_exit());
        assert!(stack.screens.is_empty());
    }

    #[test]
    fn test_popping_last_screen_exits() {
        let log = CallLog::default();
        let mut stack = ScreenStack::new(ScriptedScreen::boxed(
            "report",
            &log,
            vec![Transition::Pop],
        ));
        stack.init();
        stack.handle_event(key());
        assert!(stack.should_exit());
    }

    #[test]
    fn test_stay_keeps_current_screen() {
        let log = CallLog::default();
        let mut stack = ScreenStack::new(ScriptedScreen::boxed("report", &log, vec![]));
        stack.init();
        log.take();
        stack.handle_event(key());
        stack.handle_event(key());
        assert_eq!(log.take(), ["report: event", "report: event"]);
    }
}
