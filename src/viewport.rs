//! Vertical scroll window over pre-rendered lines.
//!
//! The viewport owns a list of content lines and an offset. It knows how
//! many rows sit below the visible window ([`Model::rows_below`]), which is
//! what the launch list measures "near the bottom" against.
//!
//! ```rust
//! use launch_browser::viewport::Model;
//!
//! let mut viewport = Model::new(40, 3);
//! viewport.set_content_lines((1..=10).map(|i| format!("line {i}")).collect());
//!
//! assert_eq!(viewport.rows_below(), 7);
//! viewport.scroll_down(5);
//! assert_eq!(viewport.visible_lines()[0], "line 6");
//! assert_eq!(viewport.rows_below(), 2);
//! ```

/// A snapshot of the viewport's scroll geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollPosition {
    pub offset: usize,
    pub visible: usize,
    pub total: usize,
}

impl ScrollPosition {
    /// Content rows below the visible window.
    pub fn rows_below(&self) -> usize {
        self.total.saturating_sub(self.offset + self.visible)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Model {
    pub width: usize,
    pub height: usize,
    y_offset: usize,
    lines: Vec<String>,
}

impl Model {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn set_size(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.clamp_offset();
    }

    /// Replaces the content, keeping the offset where it still fits.
    pub fn set_content_lines(&mut self, lines: Vec<String>) {
        self.lines = lines;
        self.clamp_offset();
    }

    pub fn y_offset(&self) -> usize {
        self.y_offset
    }

    fn max_y_offset(&self) -> usize {
        self.lines.len().saturating_sub(self.height)
    }

    fn clamp_offset(&mut self) {
        self.y_offset = self.y_offset.min(self.max_y_offset());
    }

    pub fn at_top(&self) -> bool {
        self.y_offset == 0
    }

    pub fn at_bottom(&self) -> bool {
        self.y_offset >= self.max_y_offset()
    }

    pub fn set_y_offset(&mut self, n: usize) {
        self.y_offset = n.min(self.max_y_offset());
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.set_y_offset(self.y_offset.saturating_add(n));
    }

    pub fn scroll_up(&mut self, n: usize) {
        self.set_y_offset(self.y_offset.saturating_sub(n));
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.height.max(1));
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.height.max(1));
    }

    pub fn goto_top(&mut self) {
        self.y_offset = 0;
    }

    pub fn goto_bottom(&mut self) {
        self.y_offset = self.max_y_offset();
    }

    /// Scrolls the least amount needed to show rows `start..start + len`.
    /// Blocks taller than the window are aligned to their first row.
    pub fn ensure_visible(&mut self, start: usize, len: usize) {
        let end = start + len;
        if start < self.y_offset || len > self.height {
            self.set_y_offset(start);
        } else if end > self.y_offset + self.height {
            self.set_y_offset(end - self.height);
        }
    }

    pub fn position(&self) -> ScrollPosition {
        ScrollPosition {
            offset: self.y_offset,
            visible: self.height.min(self.lines.len()),
            total: self.lines.len(),
        }
    }

    pub fn rows_below(&self) -> usize {
        self.position().rows_below()
    }

    /// Fraction scrolled, 0.0 at the top and 1.0 at the bottom.
    pub fn scroll_percent(&self) -> f64 {
        let max = self.max_y_offset();
        if max == 0 {
            return 1.0;
        }
        (self.y_offset as f64 / max as f64).clamp(0.0, 1.0)
    }

    pub fn visible_lines(&self) -> &[String] {
        let top = self.y_offset.min(self.lines.len());
        let bottom = (top + self.height).min(self.lines.len());
        &self.lines[top..bottom]
    }

    /// Visible lines padded with blank rows to the full height.
    pub fn view(&self) -> String {
        let mut rows: Vec<&str> = self.visible_lines().iter().map(String::as_str).collect();
        rows.resize(self.height, "");
        rows.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(height: usize, count: usize) -> Model {
        let mut viewport = Model::new(20, height);
        viewport.set_content_lines((0..count).map(|i| i.to_string()).collect());
        viewport
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut viewport = filled(5, 12);
        viewport.scroll_down(100);
        assert_eq!(viewport.y_offset(), 7);
        assert!(viewport.at_bottom());
        assert_eq!(viewport.rows_below(), 0);

        viewport.scroll_up(100);
        assert!(viewport.at_top());
    }

    #[test]
    fn test_short_content_is_always_at_bottom() {
        let viewport = filled(10, 4);
        assert!(viewport.at_top());
        assert!(viewport.at_bottom());
        assert_eq!(viewport.rows_below(), 0);
        assert_eq!(viewport.view().split('\n').count(), 10);
    }

    #[test]
    fn test_shrinking_content_clamps_offset() {
        let mut viewport = filled(5, 30);
        viewport.goto_bottom();
        viewport.set_content_lines(vec!["only".to_string()]);
        assert_eq!(viewport.y_offset(), 0);
        assert_eq!(viewport.visible_lines().to_vec(), vec!["only".to_string()]);
    }

    #[test]
    fn test_ensure_visible() {
        let mut viewport = filled(5, 30);
        viewport.ensure_visible(12, 3);
        assert_eq!(viewport.y_offset(), 10);

        viewport.ensure_visible(2, 2);
        assert_eq!(viewport.y_offset(), 2);

        viewport.ensure_visible(20, 8);
        assert_eq!(viewport.y_offset(), 20);
    }

    #[test]
    fn test_paging_and_percent() {
        let mut viewport = filled(4, 12);
        assert_eq!(viewport.scroll_percent(), 0.0);
        viewport.page_down();
        assert_eq!(viewport.y_offset(), 4);
        viewport.page_down();
        assert_eq!(viewport.scroll_percent(), 1.0);
        viewport.page_up();
        assert_eq!(viewport.y_offset(), 4);
    }
}
