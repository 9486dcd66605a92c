//! Scroll position of the message view
//!
//! The viewport shows a window of `height` messages starting at `offset`.
//! Whenever the log grows the runtime calls [`Viewport::scroll_to_bottom`],
//! which pins the window to the newest messages.

use std::ops::Range;

/// Window over the message log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    height: usize,
    offset: usize,
}

impl Viewport {
    /// Create a viewport showing at most `height` messages
    pub fn new(height: usize) -> Self {
        Self {
            height: height.max(1),
            offset: 0,
        }
    }

    /// Number of messages the window holds
    pub fn height(&self) -> usize {
        self.height
    }

    /// Index of the first visible message
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Largest valid offset for a log of `total` messages
    pub fn max_offset(&self, total: usize) -> usize {
        total.saturating_sub(self.height)
    }

    /// Move the window to the end of a log of `total` messages
    pub fn scroll_to_bottom(&mut self, total: usize) {
        self.offset = self.max_offset(total);
    }

    /// Whether the newest message is visible
    pub fn is_at_bottom(&self, total: usize) -> bool {
        self.offset >= self.max_offset(total)
    }

    /// Indices of the visible messages
    ///
    /// # Examples
    ///
    /// ```
    /// use agentchat::view::Viewport;
    ///
    /// let mut viewport = Viewport::new(3);
    /// viewport.scroll_to_bottom(10);
    /// assert_eq!(viewport.visible(10), 7..10);
    /// ```
    pub fn visible(&self, total: usize) -> Range<usize> {
        let start = self.offset.min(total);
        let end = (start + self.height).min(total);
        start..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_log_fits() {
        let mut viewport = Viewport::new(5);
        viewport.scroll_to_bottom(3);
        assert_eq!(viewport.offset(), 0);
        assert_eq!(viewport.visible(3), 0..3);
        assert!(viewport.is_at_bottom(3));
    }

    #[test]
    fn test_growth_requires_scroll() {
        let mut viewport = Viewport::new(2);
        viewport.scroll_to_bottom(2);
        assert!(viewport.is_at_bottom(2));
        assert!(!viewport.is_at_bottom(4));

        viewport.scroll_to_bottom(4);
        assert_eq!(viewport.offset(), 2);
        assert_eq!(viewport.visible(4), 2..4);
    }

    #[test]
    fn test_zero_height_is_clamped() {
        let viewport = Viewport::new(0);
        assert_eq!(viewport.height(), 1);
    }

    #[test]
    fn test_empty_log() {
        let viewport = Viewport::new(4);
        assert_eq!(viewport.visible(0), 0..0);
        assert_eq!(viewport.max_offset(0), 0);
    }
}
