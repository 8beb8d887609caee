use ratatui::{
    prelude::{Buffer, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Keys that trigger one action, e.g. `Enter`/`Space` to place.
#[derive(Debug, Clone, Copy)]
pub struct KeyHint {
    pub keys: &'static [&'static str],
    pub action: &'static str,
}

impl KeyHint {
    pub const fn new(keys: &'static [&'static str], action: &'static str) -> Self {
        Self { keys, action }
    }

    fn spans(self) -> Vec<Span<'static>> {
        let mut spans = vec![];
        for (i, key) in self.keys.iter().copied().enumerate() {
            if i > 0 {
                spans.push(Span::styled("/", SEPARATOR_STYLE));
            }
            spans.push(Span::styled(key, KEY_STYLE));
        }
        spans.push(Span::styled(" ", ACTION_STYLE));
        spans.push(Span::styled(self.action, ACTION_STYLE));
        spans
    }
}

const KEY_STYLE: Style = Style::new().fg(Color::Cyan);
const SEPARATOR_STYLE: Style = Style::new().fg(Color::DarkGray);
const ACTION_STYLE: Style = Style::new().fg(Color::White);
const GAP: &str = "  ";

/// One centered help line. Hints that do not fit the width are dropped from
/// the end.
#[derive(Debug)]
pub struct KeyBindingDisplay<'a> {
    hints: &'a [KeyHint],
}

impl<'a> KeyBindingDisplay<'a> {
    pub fn new(hints: &'a [KeyHint]) -> Self {
        Self { hints }
    }
}

impl Widget for KeyBindingDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut line = Line::default();
        for hint in self.hints {
            let spans = hint.spans();
            let gap = if line.spans.is_empty() { 0 } else { GAP.len() };
            let hint_width: usize = spans.iter().map(Span::width).sum();
            if line.width() + gap + hint_width > usize::from(area.width) {
                break;
            }
            if gap > 0 {
                line.push_span(Span::raw(GAP));
            }
            for span in spans {
                line.push_span(span);
            }
        }
        line.centered().render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HINTS: &[KeyHint] = &[
        KeyHint::new(&["Enter", "Space"], "Place"),
        KeyHint::new(&["Q"], "Quit"),
    ];

    fn rendered(width: u16) -> String {
        let area = Rect::new(0, 0, width, 1);
        let mut buf = Buffer::empty(area);
        KeyBindingDisplay::new(HINTS).render(area, &mut buf);
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_all_hints_fit() {
        assert_eq!(rendered(25).trim(), "Enter/Space Place  Q Quit");
    }

    #[test]
    fn test_overflowing_hints_are_dropped() {
        assert_eq!(rendered(20).trim(), "Enter/Space Place");
    }
}
