//! Minimal screen-based runtime for the dashboard.
//!
//! The dashboard never animates, so the event loop only redraws after input or a
//! terminal resize.

pub use self::{
    app::App,
    runtime::Runtime,
    screen::{Screen, ScreenStack, Transition},
};

mod app;
mod event_loop;
mod runtime;
mod screen;
