//! Turn-based terminal runtime.
//!
//! The puzzle only changes in response to key presses, so the loop has no
//! tick: it blocks on terminal input and redraws only after the app reports a
//! visible change.

pub use self::{app::App, event_loop::RenderMode, runtime::Runtime};

mod app;
mod event_loop;
mod runtime;
