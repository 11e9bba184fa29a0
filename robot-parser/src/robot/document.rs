//! Document Parse State
//!
//!     The host editor owns the text. The core only needs to read lines from it, which is the
//!     [TextBuffer] contract. On top of that, [ParseCache] answers "what does line N look like
//!     after tokenizing" without re-tokenizing from the top every time.
//!
//! Caching
//!
//!     The cache is forward-only: entry N is always derived by tokenizing line N with the state
//!     of entry N-1 (or the initial state for line 0). Asking for a line past the cached prefix
//!     extends the prefix; asking for a line inside it is a lookup. The host calls
//!     [ParseCache::invalidate_from] with the first edited line, which drops that line and
//!     everything after it. Re-deriving is deterministic, so a cache rebuilt from any valid
//!     prefix holds exactly what a from-scratch tokenization would.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use super::error::ParseError;
use super::range::Position;
use super::state::{ParseState, TableKind};
use super::token::Token;
use super::tokenizer::{tokenize_line, TokenizedLine};

/// Read access to the host's text.
///
/// Line indices are zero based. Implementations return an empty line for indices past the
/// end; callers are expected to stay in range.
pub trait TextBuffer {
    fn line(&self, index: usize) -> Cow<'_, str>;
    fn line_count(&self) -> usize;
}

/// An owned document with precomputed line starts.
#[derive(Debug, Clone, Default)]
pub struct SourceText {
    text: String,
    /// Byte offsets where each line starts
    line_starts: Vec<usize>,
}

impl SourceText {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut line_starts = vec![0];
        line_starts.extend(
            text.char_indices()
                .filter(|(_, ch)| *ch == '\n')
                .map(|(offset, _)| offset + 1),
        );
        // A trailing newline does not open another line
        if line_starts.len() > 1 && line_starts.last() == Some(&text.len()) {
            line_starts.pop();
        }
        Self { text, line_starts }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ParseError> {
        let path = path.as_ref();
        fs::read_to_string(path)
            .map(Self::new)
            .map_err(|source| ParseError::Io {
                path: path.to_path_buf(),
                source,
            })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl TextBuffer for SourceText {
    fn line(&self, index: usize) -> Cow<'_, str> {
        let Some(&start) = self.line_starts.get(index) else {
            return Cow::Borrowed("");
        };
        let end = self
            .line_starts
            .get(index + 1)
            .map(|next| next - 1)
            .unwrap_or(self.text.len());
        let line = &self.text[start..end];
        Cow::Borrowed(line.strip_suffix('\r').unwrap_or(line))
    }

    fn line_count(&self) -> usize {
        if self.text.is_empty() {
            0
        } else {
            self.line_starts.len()
        }
    }
}

impl TextBuffer for [String] {
    fn line(&self, index: usize) -> Cow<'_, str> {
        self.get(index)
            .map(|line| Cow::Borrowed(line.as_str()))
            .unwrap_or(Cow::Borrowed(""))
    }

    fn line_count(&self) -> usize {
        self.len()
    }
}

impl TextBuffer for [&str] {
    fn line(&self, index: usize) -> Cow<'_, str> {
        Cow::Borrowed(self.get(index).copied().unwrap_or(""))
    }

    fn line_count(&self) -> usize {
        self.len()
    }
}

impl TextBuffer for Vec<String> {
    fn line(&self, index: usize) -> Cow<'_, str> {
        self.as_slice().line(index)
    }

    fn line_count(&self) -> usize {
        self.len()
    }
}

/// Forward-only cache of tokenized lines.
#[derive(Debug, Clone, Default)]
pub struct ParseCache {
    lines: Vec<TokenizedLine>,
}

impl ParseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lines currently cached (always a prefix of the document).
    pub fn cached_lines(&self) -> usize {
        self.lines.len()
    }

    /// Drop cached results for `line` and every line after it.
    pub fn invalidate_from(&mut self, line: usize) {
        if line < self.lines.len() {
            let dropped = self.lines.len() - line;
            self.lines.truncate(line);
            tracing::debug!(line, dropped, "invalidated parse cache");
        }
    }

    /// Tokenized form of `index`, deriving it (and any uncached lines before it) if needed.
    pub fn line<B: TextBuffer + ?Sized>(&mut self, buffer: &B, index: usize) -> &TokenizedLine {
        self.extend_to(buffer, index);
        &self.lines[index]
    }

    pub fn tokens<B: TextBuffer + ?Sized>(&mut self, buffer: &B, index: usize) -> &[Token] {
        &self.line(buffer, index).tokens
    }

    /// State after tokenizing line `index`.
    pub fn state_after<B: TextBuffer + ?Sized>(
        &mut self,
        buffer: &B,
        index: usize,
    ) -> &ParseState {
        &self.line(buffer, index).state
    }

    /// State handed to line `index` by the line before it.
    pub fn state_before<B: TextBuffer + ?Sized>(&mut self, buffer: &B, index: usize) -> ParseState {
        match index.checked_sub(1) {
            Some(previous) => self.state_after(buffer, previous).clone(),
            None => ParseState::initial(),
        }
    }

    /// Table the line at `position` belongs to.
    pub fn table_kind_at<B: TextBuffer + ?Sized>(
        &mut self,
        buffer: &B,
        position: Position,
    ) -> TableKind {
        self.state_after(buffer, position.line).table_kind
    }

    /// Already-cached lines, without deriving anything.
    pub fn cached(&self) -> &[TokenizedLine] {
        &self.lines
    }

    /// Tokenize every line of the buffer.
    pub fn fill<B: TextBuffer + ?Sized>(&mut self, buffer: &B) -> &[TokenizedLine] {
        if let Some(last) = buffer.line_count().checked_sub(1) {
            self.extend_to(buffer, last);
        }
        &self.lines
    }

    fn extend_to<B: TextBuffer + ?Sized>(&mut self, buffer: &B, index: usize) {
        if index < self.lines.len() {
            return;
        }
        let from = self.lines.len();
        let mut state = self
            .lines
            .last()
            .map(|line| line.state.clone())
            .unwrap_or_else(ParseState::initial);
        for line_index in from..=index {
            let tokenized = tokenize_line(&state, &buffer.line(line_index));
            state = tokenized.state.clone();
            self.lines.push(tokenized);
        }
        tracing::trace!(from, to = index, "extended parse cache");
    }
}
