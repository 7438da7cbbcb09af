use crate::diff::{DiffResult, DiffStats};
use crate::input::SourceText;
use crate::layout::RenderedBlock;
use crate::theme::Theme;

use super::ViewportState;

pub struct AppState {
    pub left: SourceText,
    pub right: SourceText,
    pub theme: Theme,
    pub diff: DiffResult,
    pub block: RenderedBlock,
    pub viewport: ViewportState,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(left: SourceText, right: SourceText, theme: Theme) -> Self {
        Self {
            left,
            right,
            theme,
            diff: DiffResult::default(),
            block: RenderedBlock::default(),
            viewport: ViewportState::new(),
            should_quit: false,
        }
    }

    pub fn stats(&self) -> DiffStats {
        self.diff.stats
    }
}
