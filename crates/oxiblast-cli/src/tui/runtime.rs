use std::io;

use crossterm::event::Event;

use super::{
    App,
    event_loop::{EventLoop, LoopEvent, RenderMode},
};

/// Drives an [`App`] on the terminal until it asks to exit.
#[derive(Default, Debug)]
pub struct Runtime {
    events: EventLoop,
}

impl Runtime {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.events.set_render_mode(mode);
    }

    /// Runs `app` in the alternate screen and restores the terminal afterwards.
    ///
    /// The first frame is drawn before any input is read.
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        app.init(&mut self);

        ratatui::run(|terminal| {
            while !app.should_exit() {
                match self.events.next()? {
                    LoopEvent::Render => {
                        terminal.draw(|f| app.draw(f))?;
                    }
                    LoopEvent::Input(event) => {
                        let resized = matches!(event, Event::Resize(..));
                        if app.handle_event(&mut self, event) || resized {
                            self.events.mark_dirty();
                        }
                    }
                }
            }
            Ok(())
        })
    }
}
