use std::collections::HashMap;

use super::types::LineToken;

/// Bidirectional map between distinct line contents and `LineToken`s.
///
/// Lines borrow from the texts being diffed, so the interner lives only for
/// the duration of one diff pass.
#[derive(Debug, Default)]
pub struct LineInterner<'a> {
    lines: Vec<&'a str>,
    ids: HashMap<&'a str, LineToken>,
}

impl<'a> LineInterner<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Split `text` into lines (each keeping its `\n`) and intern them.
    pub fn tokenize(&mut self, text: &'a str) -> Vec<LineToken> {
        text.split_inclusive('\n')
            .map(|line| self.intern(line))
            .collect()
    }

    fn intern(&mut self, line: &'a str) -> LineToken {
        if let Some(&token) = self.ids.get(line) {
            return token;
        }
        let token = LineToken(self.lines.len() as u32);
        self.lines.push(line);
        self.ids.insert(line, token);
        token
    }

    pub fn line(&self, token: LineToken) -> &'a str {
        self.lines[token.0 as usize]
    }

    /// Concatenate the lines behind a run of tokens.
    pub fn text(&self, tokens: &[LineToken]) -> String {
        tokens.iter().map(|&t| self.line(t)).collect()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }
}
