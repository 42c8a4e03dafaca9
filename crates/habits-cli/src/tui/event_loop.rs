use std::io;

use crossterm::event::{self, Event};

/// Next step of the event loop.
#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum LoopEvent {
    /// The state changed since the last frame.
    Render,
    Terminal(Event),
}

/// Dirty-flag event loop.
///
/// A frame is rendered first, then after every terminal event. Between events
/// the loop blocks, so an idle dashboard uses no CPU.
#[derive(Debug)]
pub(super) struct EventLoop {
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    pub(super) fn new() -> Self {
        // The first frame must always be drawn
        Self { dirty: true }
    }

    /// Returns the next event, blocking until terminal input arrives.
    pub(super) fn next(&mut self) -> io::Result<LoopEvent> {
        self.next_with(event::read)
    }

    fn next_with<F>(&mut self, read: F) -> io::Result<LoopEvent>
    where
        F: FnOnce() -> io::Result<Event>,
    {
        if self.dirty {
            self.dirty = false;
            return Ok(LoopEvent::Render);
        }
        let event = read()?;
        self.dirty = true;
        Ok(event.into())
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::*;

    fn key() -> io::Result<Event> {
        Ok(Event::Key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE)))
    }

    #[test]
    fn test_renders_first() {
        let mut events = EventLoop::new();
        assert!(events.next_with(key).unwrap().is_render());
        assert!(events.next_with(key).unwrap().is_terminal());
    }

    #[test]
    fn test_renders_after_each_event() {
        let mut events = EventLoop::new();
        let mut kinds = Vec::new();
        for _ in 0..5 {
            kinds.push(events.next_with(key).unwrap().is_render());
        }
        assert_eq!(kinds, [true, false, true, false, true]);
    }

    #[test]
    fn test_read_error_keeps_state() {
        let mut events = EventLoop::new();
        events.next_with(key).unwrap();
        let err = events.next_with(|| Err(io::Error::other("closed")));
        assert!(err.is_err());
        assert!(events.next_with(key).unwrap().is_terminal());
    }
}
