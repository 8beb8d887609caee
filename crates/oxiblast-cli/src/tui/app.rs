use crossterm::event::Event;
use ratatui::Frame;

use super::Runtime;

/// Application driven by [`Runtime::run`].
pub trait App {
    /// Called once before the first frame. Use this to pick a render mode.
    fn init(&mut self, runtime: &mut Runtime);

    fn should_exit(&self) -> bool;

    /// Applies a terminal event and returns whether anything visible changed.
    ///
    /// The screen is only redrawn after events that return `true` (and after
    /// terminal resizes).
    fn handle_event(&mut self, runtime: &mut Runtime, event: Event) -> bool;

    fn draw(&self, frame: &mut Frame);
}
