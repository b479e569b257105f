//! End-to-end session flows against the real filesystem.

use std::{
    collections::VecDeque,
    fs,
    path::{Path, PathBuf},
};

use notepad_dark::{
    document::Mutation,
    error::Result,
    host::{
        Choice, FileFilter, FileStore, FsStore, LineEnding, PathPicker, Prompt, TitleObserver,
    },
    session::{CloseDecision, Glyph, Outcome, Session},
};

/// Real files, scripted dialogs.
#[derive(Default)]
struct ScriptedHost {
    files: FsStore,
    save_paths: VecDeque<PathBuf>,
    choices: VecDeque<Choice>,
    errors: Vec<String>,
    title: String,
}

impl FileStore for ScriptedHost {
    fn read(&mut self, path: &Path) -> Result<String> {
        self.files.read(path)
    }

    fn write(&mut self, path: &Path, text: &str) -> Result<()> {
        self.files.write(path, text)
    }
}

impl PathPicker for ScriptedHost {
    fn choose_open_path(&mut self, _filters: &[FileFilter]) -> Option<PathBuf> {
        None
    }

    fn choose_save_path(
        &mut self,
        _default_ext: &str,
        _filters: &[FileFilter],
    ) -> Option<PathBuf> {
        self.save_paths.pop_front()
    }
}

impl Prompt for ScriptedHost {
    fn confirm_three_way(&mut self, _question: &str) -> Choice {
        self.choices.pop_front().unwrap_or(Choice::Cancel)
    }

    fn show_error(&mut self, message: &str) {
        self.errors.push(message.to_owned());
    }
}

impl TitleObserver for ScriptedHost {
    fn set_title(&mut self, title: &str) {
        self.title = title.to_owned();
    }
}

fn append(s: &mut Session<ScriptedHost>, text: &str) {
    let at = s.document().len_chars();
    s.edit(&Mutation::insert(at, text));
}

#[test]
fn edit_save_as_edit_save() {
    let dir = tempfile::tempdir().expect("tempdir");
    let target = dir.path().join("a.txt");

    let mut s = Session::new(ScriptedHost::default());
    s.host_mut().save_paths.push_back(target.clone());

    append(&mut s, "hello");
    assert!(s.is_dirty());
    assert_eq!(s.host().title, "*Notepad Dark");

    assert_eq!(s.save_as(), Outcome::Done);
    assert!(!s.is_dirty());
    assert_eq!(s.host().title, "a.txt | Notepad Dark");

    append(&mut s, " world");
    assert!(s.is_dirty());
    assert_eq!(s.host().title, "*a.txt | Notepad Dark");

    assert_eq!(s.save(), Outcome::Done);
    assert!(!s.is_dirty());
    assert_eq!(fs::read_to_string(&target).expect("read back"), "hello world");
}

#[test]
fn open_missing_file_reports_and_keeps_state() {
    let dir = tempfile::tempdir().expect("tempdir");
    let existing = dir.path().join("notes.txt");
    fs::write(&existing, "notes").expect("seed");

    let mut s = Session::new(ScriptedHost::default());
    assert_eq!(s.open_path(&existing), Outcome::Done);
    append(&mut s, "!");

    assert_eq!(s.open_path(dir.path().join("missing/file.txt")), Outcome::Failed);
    assert_eq!(s.host().errors.len(), 1);
    assert!(s.host().errors[0].starts_with("Failed to open file: "));
    assert!(s.is_dirty());
    assert_eq!(s.path(), Some(existing.as_path()));
    assert_eq!(s.text(), "notes!");
}

#[test]
fn open_after_edits_is_clean() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("b.txt");
    fs::write(&path, "line one\r\nline two").expect("seed");

    let mut s = Session::new(ScriptedHost::default());
    append(&mut s, "scratch");
    assert_eq!(s.toggle_bold(0..7), notepad_dark::session::BoldToggle::Added);

    assert_eq!(s.open_path(&path), Outcome::Done);
    assert!(!s.is_dirty());
    assert_eq!(s.text(), "line one\nline two");
    assert!(s.document().bold().is_empty());
    assert_eq!(s.host().title, "b.txt | Notepad Dark");
}

#[test]
fn crlf_file_keeps_crlf_after_edit() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("dos.txt");
    fs::write(&path, "first\r\nsecond").expect("seed");

    let mut s = Session::new(ScriptedHost::default());
    assert_eq!(s.open_path(&path), Outcome::Done);
    assert_eq!(s.text(), "first\nsecond");
    append(&mut s, "\nthird");

    assert_eq!(s.save(), Outcome::Done);
    assert_eq!(
        fs::read_to_string(&path).expect("read back"),
        "first\r\nsecond\r\nthird"
    );
}

#[test]
fn glyphs_are_saved_as_utf8() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("todo.txt");

    let mut s = Session::new(ScriptedHost::default());
    s.host_mut().files = FsStore::with_line_ending(LineEnding::Lf);
    s.host_mut().save_paths.push_back(path.clone());
    append(&mut s, " milk");
    s.insert_glyph(Glyph::Check, 0);
    append(&mut s, "\n eggs");
    let at = s.text().chars().position(|c| c == '\n').expect("newline") + 1;
    s.insert_glyph(Glyph::Cross, at);

    assert_eq!(s.save(), Outcome::Done);
    assert_eq!(
        fs::read(&path).expect("read back"),
        "\u{2714}\u{FE0F} milk\n\u{2718} eggs".as_bytes()
    );
}

#[test]
fn close_with_save_into_unwritable_path_stays_open() {
    let dir = tempfile::tempdir().expect("tempdir");
    // A directory cannot be written as a file.
    let bad = dir.path().to_path_buf();

    let mut s = Session::new(ScriptedHost::default());
    append(&mut s, "draft");
    s.host_mut().choices.push_back(Choice::Yes);
    s.host_mut().save_paths.push_back(bad);

    assert_eq!(s.request_close(), CloseDecision::Stay);
    assert!(s.is_dirty());
    assert!(s.host().errors[0].starts_with("Failed to save file: "));

    // Second attempt discards.
    s.host_mut().choices.push_back(Choice::No);
    assert_eq!(s.request_close(), CloseDecision::Terminate);
}
