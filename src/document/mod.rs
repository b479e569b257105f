// ── Document buffer ───────────────────────────────────────────────────────────
//
// The single in-memory document: UTF-8 text addressed by character index plus
// the bold annotations.  No Win32 imports; pure Rust.

mod bold;

use std::ops::Range;

pub use bold::BoldSet;

// ── Mutation ──────────────────────────────────────────────────────────────────

/// A content change to apply to a [`Document`].
///
/// Positions are character (Unicode scalar) indices.  Out-of-range positions
/// are clamped to the document length when applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Insert { at: usize, text: String },
    Delete { range: Range<usize> },
    Replace { range: Range<usize>, text: String },
}

impl Mutation {
    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self::Insert {
            at,
            text: text.into(),
        }
    }

    pub fn delete(range: Range<usize>) -> Self {
        Self::Delete { range }
    }

    /// Where the new text sits once the mutation is applied, or `None` for a
    /// pure deletion.
    pub fn inserted_range(&self) -> Option<Range<usize>> {
        let (start, text) = match self {
            Self::Insert { at, text } => (*at, text),
            Self::Replace { range, text } => (range.start, text),
            Self::Delete { .. } => return None,
        };
        let len = text.chars().count();
        (len > 0).then(|| start..start + len)
    }

    /// The single mutation that turns `old` into `new`, or `None` if they are
    /// equal.
    ///
    /// Strips the common prefix and suffix and replaces what is left.  The
    /// front end uses this to mirror the text control into the session after
    /// each change notification.
    pub fn between(old: &str, new: &str) -> Option<Self> {
        if old == new {
            return None;
        }
        let old: Vec<char> = old.chars().collect();
        let new: Vec<char> = new.chars().collect();

        let prefix = old.iter().zip(&new).take_while(|(a, b)| a == b).count();
        let suffix = old[prefix..]
            .iter()
            .rev()
            .zip(new[prefix..].iter().rev())
            .take_while(|(a, b)| a == b)
            .count();

        let range = prefix..old.len() - suffix;
        let text: String = new[prefix..new.len() - suffix].iter().collect();

        Some(if range.is_empty() {
            Self::Insert {
                at: range.start,
                text,
            }
        } else if text.is_empty() {
            Self::Delete { range }
        } else {
            Self::Replace { range, text }
        })
    }
}

// ── Document ──────────────────────────────────────────────────────────────────

/// Text content plus presentational bold ranges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    text: String,
    bold: BoldSet,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn bold(&self) -> &BoldSet {
        &self.bold
    }

    pub fn len_chars(&self) -> usize {
        self.text.chars().count()
    }

    /// Replace the content wholesale and drop every annotation.
    pub fn replace_all(&mut self, text: String) {
        self.text = text;
        self.bold.clear();
    }

    /// Apply `mutation`, keeping bold ranges attached to the text they mark.
    pub fn apply(&mut self, mutation: &Mutation) {
        match mutation {
            Mutation::Insert { at, text } => self.insert(*at, text),
            Mutation::Delete { range } => self.delete(range.clone()),
            Mutation::Replace { range, text } => {
                let range = self.clamp(range.clone());
                let start = range.start;
                self.delete(range);
                self.insert(start, text);
            }
        }
    }

    /// Insert `text` at character position `at` (clamped to the end).
    pub fn insert(&mut self, at: usize, text: &str) {
        if text.is_empty() {
            return;
        }
        let at = at.min(self.len_chars());
        let byte = self.byte_offset(at);
        self.text.insert_str(byte, text);
        self.bold.on_insert(at, text.chars().count());
    }

    fn delete(&mut self, range: Range<usize>) {
        let range = self.clamp(range);
        if range.is_empty() {
            return;
        }
        let bytes = self.byte_offset(range.start)..self.byte_offset(range.end);
        self.text.replace_range(bytes, "");
        self.bold.on_delete(range);
    }

    /// Clamp `range` into `0..=len`, with `start <= end`.
    pub fn clamp(&self, range: Range<usize>) -> Range<usize> {
        let len = self.len_chars();
        let start = range.start.min(len);
        let end = range.end.min(len).max(start);
        start..end
    }

    /// `true` when the whole non-empty `range` is bold.
    pub fn is_bold(&self, range: &Range<usize>) -> bool {
        self.bold.covers(range)
    }

    pub fn set_bold(&mut self, range: Range<usize>, bold: bool) {
        if bold {
            self.bold.add(range);
        } else {
            self.bold.remove(range);
        }
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map_or(self.text.len(), |(b, _)| b)
    }
}

/// Convert an offset in UTF-16 code units into a character index in `text`.
///
/// The Win32 text control reports caret and selection positions in UTF-16
/// units; characters outside the BMP count as two there and one here.  An
/// offset that lands inside a surrogate pair rounds up to the next character.
pub fn char_index_from_utf16(text: &str, units: usize) -> usize {
    let mut seen = 0;
    for (idx, ch) in text.chars().enumerate() {
        if seen >= units {
            return idx;
        }
        seen += ch.len_utf16();
    }
    text.chars().count()
}

/// Convert a character index in `text` into an offset in UTF-16 code units.
pub fn utf16_offset_from_char(text: &str, char_idx: usize) -> usize {
    text.chars().take(char_idx).map(char::len_utf16).sum()
}
