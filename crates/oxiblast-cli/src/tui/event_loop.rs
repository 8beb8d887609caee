use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event::{self, Event};

/// What the runtime should do next.
#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum LoopEvent {
    /// The screen is dirty and a frame may be drawn now.
    Render,
    /// A terminal event (key input, resize, ...).
    Input(Event),
}

/// When to redraw once the screen is dirty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Redraw as soon as the screen is dirty.
    #[default]
    OnDirty,
    /// Redraw at most once per interval.
    ///
    /// Bursts of events (e.g. key repeat) are batched into one render.
    Throttled(Duration),
}

impl RenderMode {
    /// Creates `Throttled` mode from a frame rate (FPS).
    #[must_use]
    pub fn throttled_from_rate(rate: f64) -> Self {
        Self::Throttled(Duration::from_secs_f64(1.0 / rate))
    }
}

/// Event source for the runtime.
///
/// Yields a render event whenever the screen is dirty (and the throttle
/// allows it), and otherwise blocks on the next terminal event. Input does not
/// dirty the screen by itself: the runtime marks it dirty when the app reports
/// a change.
#[derive(Debug)]
pub(super) struct EventLoop {
    render_mode: RenderMode,
    last_render: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    pub(super) fn new() -> Self {
        let now = Instant::now();
        let past_time = now.checked_sub(Duration::from_secs(86400)).unwrap_or(now);
        Self {
            render_mode: RenderMode::default(),
            last_render: past_time,
            // The first frame is drawn before any input arrives.
            dirty: true,
        }
    }

    pub(super) fn set_render_mode(&mut self, render_mode: RenderMode) {
        self.render_mode = render_mode;
    }

    pub(super) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn render_due(&self, now: Instant) -> bool {
        match self.render_mode {
            RenderMode::OnDirty => self.dirty,
            RenderMode::Throttled(interval) => {
                self.dirty && now.duration_since(self.last_render) >= interval
            }
        }
    }

    /// Time to wait for input before the next render is due, or `None` to
    /// wait indefinitely.
    fn compute_timeout(&self, now: Instant) -> Option<Duration> {
        if !self.dirty {
            return None;
        }
        let next_render_at = match self.render_mode {
            RenderMode::OnDirty => now,
            RenderMode::Throttled(interval) => self.last_render + interval,
        };
        Some(next_render_at.saturating_duration_since(now))
    }

    pub(super) fn next(&mut self) -> io::Result<LoopEvent> {
        loop {
            let now = Instant::now();
            if self.render_due(now) {
                self.last_render = now;
                self.dirty = false;
                return Ok(LoopEvent::Render);
            }

            if let Some(timeout) = self.compute_timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            return Ok(event::read()?.into());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_render_is_due() {
        let events = EventLoop::new();
        let now = Instant::now();
        assert!(events.render_due(now));
        assert_eq!(events.compute_timeout(now), Some(Duration::ZERO));
    }

    #[test]
    fn test_clean_loop_blocks_on_input() {
        let mut events = EventLoop::new();
        events.dirty = false;
        let now = Instant::now();
        assert!(!events.render_due(now));
        assert_eq!(events.compute_timeout(now), None);
    }

    #[test]
    fn test_mark_dirty_schedules_render() {
        let mut events = EventLoop::new();
        events.dirty = false;
        events.mark_dirty();
        let now = Instant::now();
        assert!(events.render_due(now));
        assert_eq!(events.compute_timeout(now), Some(Duration::ZERO));
    }

    #[test]
    fn test_throttle_delays_render() {
        let mut events = EventLoop::new();
        events.set_render_mode(RenderMode::Throttled(Duration::from_millis(100)));
        let now = Instant::now();
        events.last_render = now;
        assert!(!events.render_due(now));
        assert_eq!(events.compute_timeout(now), Some(Duration::from_millis(100)));
        assert!(events.render_due(now + Duration::from_millis(100)));
    }
}
