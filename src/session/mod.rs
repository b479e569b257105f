// ── Editor session ────────────────────────────────────────────────────────────
//
// The single source of truth for "is there unsaved work".  A `Session` owns
// the document, the bound path and the dirty flag, and mediates every
// transition that touches them.  All outside effects go through the `Host`.
//
// Errors never escape an operation: they are logged, shown through
// `Prompt::show_error`, and reported to the caller as `Outcome::Failed`.

use std::{
    ops::Range,
    path::{Path, PathBuf},
};

use tracing::{debug, info, warn};

use crate::{
    document::{Document, Mutation},
    error::EditorError,
    host::{Choice, Host, DEFAULT_EXTENSION, TEXT_FILTERS},
    ui::title::window_title,
};

/// Question asked when closing with unsaved changes.
pub const CLOSE_QUESTION: &str = "Do you want to save your changes before closing?";

// ── Results of operations ─────────────────────────────────────────────────────

/// How a file operation ended.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// The user dismissed a dialog; nothing changed.
    Cancelled,
    /// An error was shown to the user; nothing changed.
    Failed,
}

/// What `toggle_bold` did to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoldToggle {
    /// Empty or invalid selection.
    Ignored,
    Added,
    Removed,
}

/// Whether the window should go away after a close request.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseDecision {
    Terminate,
    Stay,
}

/// The two literal marks offered by the Toolbar menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Check,
    Cross,
}

impl Glyph {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Check => "\u{2714}\u{FE0F}",
            Self::Cross => "\u{2718}",
        }
    }
}

// ── Session ───────────────────────────────────────────────────────────────────

pub struct Session<H: Host> {
    doc: Document,
    path: Option<PathBuf>,
    dirty: bool,
    host: H,
}

impl<H: Host> Session<H> {
    /// An empty, untitled, clean session.  Publishes the initial title.
    pub fn new(host: H) -> Self {
        let mut session = Self {
            doc: Document::new(),
            path: None,
            dirty: false,
            host,
        };
        session.publish_title();
        session
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn text(&self) -> &str {
        self.doc.text()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn title(&self) -> String {
        window_title(self.path(), self.dirty)
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    // ── Open ──────────────────────────────────────────────────────────────────

    /// Ask for a file and open it.
    pub fn open(&mut self) -> Outcome {
        match self.host.choose_open_path(TEXT_FILTERS) {
            Some(path) => self.open_path(path),
            None => {
                debug!("open cancelled");
                Outcome::Cancelled
            }
        }
    }

    /// Load `path`, replacing the buffer and dropping all bold ranges.
    ///
    /// On failure the buffer, bound path and dirty flag are left as they were.
    pub fn open_path(&mut self, path: impl Into<PathBuf>) -> Outcome {
        let path = path.into();
        match self.host.read(&path) {
            Ok(text) => {
                info!(path = %path.display(), chars = text.chars().count(), "opened");
                self.doc.replace_all(text);
                self.path = Some(path);
                self.mark_clean();
                Outcome::Done
            }
            Err(e) => self.report("Failed to open file", &e),
        }
    }

    // ── Save ──────────────────────────────────────────────────────────────────

    /// Write to the bound path, or fall back to Save As when there is none.
    pub fn save(&mut self) -> Outcome {
        match self.path.clone() {
            Some(path) => self.write_to(&path),
            None => self.save_as(),
        }
    }

    /// Ask for a destination, bind it, and write the buffer there.
    pub fn save_as(&mut self) -> Outcome {
        let Some(path) = self.host.choose_save_path(DEFAULT_EXTENSION, TEXT_FILTERS) else {
            debug!("save as cancelled");
            return Outcome::Cancelled;
        };
        self.path = Some(path.clone());
        let outcome = self.write_to(&path);
        if outcome == Outcome::Failed {
            // The new path stays bound; keep the title in step with it.
            self.publish_title();
        }
        outcome
    }

    fn write_to(&mut self, path: &Path) -> Outcome {
        match self.host.write(path, self.doc.text()) {
            Ok(()) => {
                info!(path = %path.display(), "saved");
                self.mark_clean();
                Outcome::Done
            }
            Err(e) => self.report("Failed to save file", &e),
        }
    }

    // ── Editing ───────────────────────────────────────────────────────────────

    /// Apply a content change and mark the session dirty.
    pub fn edit(&mut self, mutation: &Mutation) {
        self.doc.apply(mutation);
        self.mark_dirty();
    }

    /// Insert one of the toolbar glyphs at `position`.
    pub fn insert_glyph(&mut self, glyph: Glyph, position: usize) {
        self.edit(&Mutation::insert(position, glyph.as_str()));
    }

    /// Toggle bold over `range`: remove it if the whole range is already bold,
    /// add it otherwise.  An empty selection is silently ignored.
    pub fn toggle_bold(&mut self, range: Range<usize>) -> BoldToggle {
        if range.start >= range.end {
            return BoldToggle::Ignored;
        }
        let range = self.doc.clamp(range);
        if range.is_empty() {
            return BoldToggle::Ignored;
        }
        let result = if self.doc.is_bold(&range) {
            self.doc.set_bold(range, false);
            BoldToggle::Removed
        } else {
            self.doc.set_bold(range, true);
            BoldToggle::Added
        };
        self.mark_dirty();
        result
    }

    // ── Closing ───────────────────────────────────────────────────────────────

    /// Decide whether the window may close, offering to save unsaved work.
    pub fn request_close(&mut self) -> CloseDecision {
        if !self.dirty {
            return CloseDecision::Terminate;
        }
        match self.host.confirm_three_way(CLOSE_QUESTION) {
            Choice::Yes => {
                let _ = self.save();
                if self.dirty {
                    debug!("close aborted: document still has unsaved changes");
                    CloseDecision::Stay
                } else {
                    CloseDecision::Terminate
                }
            }
            Choice::No => {
                info!("closing without saving");
                CloseDecision::Terminate
            }
            Choice::Cancel => CloseDecision::Stay,
        }
    }

    // ── State transitions ─────────────────────────────────────────────────────

    fn mark_dirty(&mut self) {
        if !self.dirty {
            self.dirty = true;
            self.publish_title();
        }
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
        self.publish_title();
    }

    fn publish_title(&mut self) {
        let title = self.title();
        debug!(%title, "title");
        self.host.set_title(&title);
    }

    fn report(&mut self, context: &str, error: &EditorError) -> Outcome {
        warn!(%error, "{context}");
        self.host.show_error(&format!("{context}: {error}"));
        Outcome::Failed
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
