//! TextBlock Widget
//!
//! A borderless, scrollable text region.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::StatefulWidget;
use textwrap::wrap;

/// State for a scrollable text block
#[derive(Debug, Default)]
pub struct TextBlockState {
    /// Scroll offset (lines from top)
    pub scroll_offset: usize,
    /// Total wrapped lines at the last render
    pub total_lines: usize,
}

impl TextBlockState {
    /// Scroll by delta (positive = down)
    pub fn scroll(&mut self, delta: isize) {
        self.scroll_offset = self.scroll_offset.saturating_add_signed(delta);
    }

    /// Scroll to top
    pub fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }
}

/// A borderless, scrollable text block
pub struct TextBlock<'a> {
    content: &'a str,
    style: Style,
}

impl<'a> TextBlock<'a> {
    pub fn new(content: &'a str) -> Self {
        Self {
            content,
            style: Style::default(),
        }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

impl StatefulWidget for TextBlock<'_> {
    type State = TextBlockState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let wrapped: Vec<String> = self
            .content
            .lines()
            .flat_map(|line| {
                if line.is_empty() {
                    vec![String::new()]
                } else {
                    wrap(line, area.width as usize)
                        .into_iter()
                        .map(|cow| cow.to_string())
                        .collect()
                }
            })
            .collect();

        state.total_lines = wrapped.len();

        // Clamp scroll
        let max_scroll = state.total_lines.saturating_sub(area.height as usize);
        state.scroll_offset = state.scroll_offset.min(max_scroll);

        for (row, line) in (area.y..area.y + area.height).zip(
            wrapped
                .iter()
                .skip(state.scroll_offset)
                .take(area.height as usize),
        ) {
            buf.set_string(area.x, row, line, self.style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    #[test]
    fn test_wraps_and_clamps_scroll() {
        let area = Rect::new(0, 0, 8, 2);
        let mut buf = Buffer::empty(area);
        let mut state = TextBlockState {
            scroll_offset: 99,
            total_lines: 0,
        };

        TextBlock::new("abcdefgh ij\nkl").render(area, &mut buf, &mut state);

        assert_eq!(state.total_lines, 3);
        assert_eq!(state.scroll_offset, 1);
        assert_eq!(row_text(&buf, 0), "ij");
        assert_eq!(row_text(&buf, 1), "kl");
    }

    #[test]
    fn test_scroll_saturates_at_zero() {
        let mut state = TextBlockState::default();
        state.scroll(-5);
        assert_eq!(state.scroll_offset, 0);
        state.scroll(3);
        assert_eq!(state.scroll_offset, 3);
        state.scroll_to_top();
        assert_eq!(state.scroll_offset, 0);
    }
}
