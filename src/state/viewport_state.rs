/// Scroll position of the diff viewport over the rendered block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewportState {
    /// Index of the first visible line.
    pub offset: usize,
    /// Number of lines the viewport can show.
    pub height: usize,
    /// Number of lines in the content.
    pub total: usize,
}

impl ViewportState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resize the viewport and content, keeping the offset in range.
    pub fn resize(&mut self, height: usize, total: usize) {
        self.height = height;
        self.total = total;
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.height)
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.offset = self.offset.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.offset = (self.offset + lines).min(self.max_offset());
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.height.max(1));
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.height.max(1));
    }

    pub fn half_page_up(&mut self) {
        self.scroll_up((self.height / 2).max(1));
    }

    pub fn half_page_down(&mut self) {
        self.scroll_down((self.height / 2).max(1));
    }

    pub fn to_top(&mut self) {
        self.offset = 0;
    }

    pub fn to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    /// Range of content lines currently on screen.
    pub fn visible(&self) -> std::ops::Range<usize> {
        let end = (self.offset + self.height).min(self.total);
        self.offset.min(end)..end
    }

    /// Fraction scrolled, in `[0, 1]`. Content that fits counts as fully scrolled.
    pub fn scroll_percent(&self) -> f64 {
        if self.height >= self.total {
            return 1.0;
        }
        let percent = self.offset as f64 / (self.total - self.height) as f64;
        percent.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(height: usize, total: usize) -> ViewportState {
        let mut vp = ViewportState::new();
        vp.resize(height, total);
        vp
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut vp = viewport(10, 25);
        vp.scroll_up(3);
        assert_eq!(vp.offset, 0);
        vp.scroll_down(100);
        assert_eq!(vp.offset, 15);
        vp.scroll_down(1);
        assert_eq!(vp.offset, 15);
    }

    #[test]
    fn test_pages() {
        let mut vp = viewport(10, 45);
        vp.page_down();
        assert_eq!(vp.offset, 10);
        vp.half_page_down();
        assert_eq!(vp.offset, 15);
        vp.half_page_up();
        vp.page_up();
        assert_eq!(vp.offset, 0);
        vp.to_bottom();
        assert_eq!(vp.offset, 35);
        vp.to_top();
        assert_eq!(vp.offset, 0);
    }

    #[test]
    fn test_resize_pulls_offset_back() {
        let mut vp = viewport(10, 50);
        vp.to_bottom();
        assert_eq!(vp.offset, 40);
        vp.resize(30, 50);
        assert_eq!(vp.offset, 20);
        vp.resize(30, 5);
        assert_eq!(vp.offset, 0);
    }

    #[test]
    fn test_scroll_percent() {
        assert_eq!(viewport(10, 4).scroll_percent(), 1.0);
        let mut vp = viewport(10, 30);
        assert_eq!(vp.scroll_percent(), 0.0);
        vp.scroll_down(10);
        assert_eq!(vp.scroll_percent(), 0.5);
        vp.to_bottom();
        assert_eq!(vp.scroll_percent(), 1.0);
    }

    #[test]
    fn test_visible_range() {
        let mut vp = viewport(10, 25);
        assert_eq!(vp.visible(), 0..10);
        vp.to_bottom();
        assert_eq!(vp.visible(), 15..25);
        assert_eq!(viewport(10, 3).visible(), 0..3);
        assert_eq!(viewport(0, 3).visible(), 0..0);
    }
}
