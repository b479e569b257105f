// ── Collaborator seams ────────────────────────────────────────────────────────
//
// The session never touches the filesystem, dialogs or the window directly.
// It talks to a `Host`, which the Win32 front end implements for real and the
// tests implement with recording fakes.

use std::{borrow::Cow, fs, path::Path, path::PathBuf};

use crate::error::{EditorError, Result};

// ── File filters ──────────────────────────────────────────────────────────────

/// One entry of a file-dialog filter list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFilter {
    pub label: &'static str,
    pub pattern: &'static str,
}

/// Filters offered by the Open and Save As dialogs, primary first.
pub const TEXT_FILTERS: &[FileFilter] = &[
    FileFilter {
        label: "Text Files",
        pattern: "*.txt",
    },
    FileFilter {
        label: "All Files",
        pattern: "*.*",
    },
];

/// Render `filters` as a common-dialog filter string: label/pattern pairs,
/// each NUL-terminated, closed by an extra NUL.
///
/// `[Text Files *.txt]` → `"Text Files (*.txt)\0*.txt\0\0"`.
pub fn filter_spec(filters: &[FileFilter]) -> String {
    let mut spec = String::new();
    for f in filters {
        spec.push_str(&format!("{} ({})\0{}\0", f.label, f.pattern, f.pattern));
    }
    spec.push('\0');
    spec
}

/// Extension appended by Save As when the user types a bare name.
pub const DEFAULT_EXTENSION: &str = "txt";

// ── Prompt answers ────────────────────────────────────────────────────────────

/// Answer to a Yes / No / Cancel question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Yes,
    No,
    Cancel,
}

// ── Collaborator traits ───────────────────────────────────────────────────────

/// Reads and writes whole documents as UTF-8 text.
pub trait FileStore {
    fn read(&mut self, path: &Path) -> Result<String>;
    fn write(&mut self, path: &Path, text: &str) -> Result<()>;
}

/// Asks the user for a path.  `None` means the dialog was dismissed.
pub trait PathPicker {
    fn choose_open_path(&mut self, filters: &[FileFilter]) -> Option<PathBuf>;
    fn choose_save_path(&mut self, default_ext: &str, filters: &[FileFilter]) -> Option<PathBuf>;
}

/// Modal questions and error reports.
pub trait Prompt {
    fn confirm_three_way(&mut self, question: &str) -> Choice;
    fn show_error(&mut self, message: &str);
}

/// Receives the window title whenever the session state changes.
pub trait TitleObserver {
    fn set_title(&mut self, title: &str);
}

/// Everything a session needs from the outside world.
pub trait Host: FileStore + PathPicker + Prompt + TitleObserver {}

impl<T: FileStore + PathPicker + Prompt + TitleObserver> Host for T {}

// ── Filesystem store ──────────────────────────────────────────────────────────

/// Line-break convention of a file on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Lf,
    CrLf,
    Cr,
}

impl LineEnding {
    /// The platform convention, used until a file has been read.
    pub fn native() -> Self {
        if cfg!(windows) {
            Self::CrLf
        } else {
            Self::Lf
        }
    }

    /// The convention of the first line break in `text`, if it has one.
    pub fn detect(text: &str) -> Option<Self> {
        let at = text.find(['\r', '\n'])?;
        Some(match &text.as_bytes()[at..] {
            [b'\r', b'\n', ..] => Self::CrLf,
            [b'\r', ..] => Self::Cr,
            _ => Self::Lf,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
            Self::Cr => "\r",
        }
    }
}

impl Default for LineEnding {
    fn default() -> Self {
        Self::native()
    }
}

/// `FileStore` backed by `std::fs`.
///
/// Reads decode strictly as UTF-8 and normalise every line break to `\n`, so
/// character positions line up with the text control.  The convention of the
/// last file read is remembered and written back, so a CRLF file stays CRLF.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsStore {
    line_ending: LineEnding,
}

impl FsStore {
    pub fn with_line_ending(line_ending: LineEnding) -> Self {
        Self { line_ending }
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }
}

impl FileStore for FsStore {
    fn read(&mut self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).map_err(|source| EditorError::Read {
            path: path.to_owned(),
            source,
        })?;
        let text = std::str::from_utf8(&bytes).map_err(|source| EditorError::Decode {
            path: path.to_owned(),
            source,
        })?;
        if let Some(ending) = LineEnding::detect(text) {
            self.line_ending = ending;
        }
        Ok(normalize_newlines(text))
    }

    fn write(&mut self, path: &Path, text: &str) -> Result<()> {
        let text = match self.line_ending {
            LineEnding::Lf => Cow::Borrowed(text),
            ending => Cow::Owned(text.replace('\n', ending.as_str())),
        };
        fs::write(path, text.as_bytes()).map_err(|source| EditorError::Write {
            path: path.to_owned(),
            source,
        })
    }
}

fn normalize_newlines(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_owned();
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_store_roundtrips_utf8() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("notes.txt");
        let mut store = FsStore::default();
        store.write(&path, "✔️ done\n✘ todo").expect("write");
        assert_eq!(store.read(&path).expect("read"), "✔️ done\n✘ todo");
    }

    #[test]
    fn fs_store_normalises_line_endings() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("crlf.txt");
        fs::write(&path, b"a\r\nb\rc\n").expect("seed");
        assert_eq!(FsStore::default().read(&path).expect("read"), "a\nb\nc\n");
    }

    #[test]
    fn fs_store_writes_back_crlf() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("dos.txt");
        fs::write(&path, b"one\r\ntwo\r\n").expect("seed");

        let mut store = FsStore::with_line_ending(LineEnding::Lf);
        let text = store.read(&path).expect("read");
        assert_eq!(store.line_ending(), LineEnding::CrLf);
        store.write(&path, &format!("{text}three")).expect("write");
        assert_eq!(fs::read(&path).expect("read back"), b"one\r\ntwo\r\nthree");
    }

    #[test]
    fn fs_store_keeps_lf_files_lf() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("unix.txt");
        fs::write(&path, b"one\ntwo").expect("seed");

        let mut store = FsStore::with_line_ending(LineEnding::CrLf);
        let text = store.read(&path).expect("read");
        store.write(&path, &text).expect("write");
        assert_eq!(fs::read(&path).expect("read back"), b"one\ntwo");
    }

    #[test]
    fn file_without_breaks_keeps_current_ending() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("single.txt");
        fs::write(&path, b"one line").expect("seed");

        let mut store = FsStore::with_line_ending(LineEnding::CrLf);
        store.read(&path).expect("read");
        assert_eq!(store.line_ending(), LineEnding::CrLf);
    }

    #[test]
    fn line_ending_detects_first_break() {
        assert_eq!(LineEnding::detect("a\r\nb\nc"), Some(LineEnding::CrLf));
        assert_eq!(LineEnding::detect("a\nb\r\n"), Some(LineEnding::Lf));
        assert_eq!(LineEnding::detect("a\rb"), Some(LineEnding::Cr));
        assert_eq!(LineEnding::detect("ab\r"), Some(LineEnding::Cr));
        assert_eq!(LineEnding::detect("plain"), None);
    }

    #[test]
    fn fs_store_rejects_invalid_utf8() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("latin1.txt");
        fs::write(&path, b"caf\xE9").expect("seed");
        let err = FsStore::default().read(&path).expect_err("not utf-8");
        assert!(matches!(err, EditorError::Decode { .. }), "{err:?}");
    }

    #[test]
    fn fs_store_reports_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = FsStore::default()
            .read(&dir.path().join("missing.txt"))
            .expect_err("missing");
        assert!(matches!(err, EditorError::Read { .. }), "{err:?}");
    }

    #[test]
    fn filter_spec_is_double_nul_terminated() {
        assert_eq!(
            filter_spec(TEXT_FILTERS),
            "Text Files (*.txt)\0*.txt\0All Files (*.*)\0*.*\0\0"
        );
    }

    #[test]
    fn text_filter_is_primary() {
        assert_eq!(TEXT_FILTERS[0].pattern, "*.txt");
        assert_eq!(TEXT_FILTERS[1].pattern, "*.*");
    }
}
