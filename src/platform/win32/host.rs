// ── Win32 host ────────────────────────────────────────────────────────────────
//
// Implements the session's collaborator traits for the main window: common
// dialogs for paths, message boxes for prompts, the window caption for the
// title, and `FsStore` for file contents.

#![allow(unsafe_code)]

use std::path::{Path, PathBuf};

use windows::{
    core::PCWSTR,
    Win32::{Foundation::HWND, UI::WindowsAndMessaging::SetWindowTextW},
};

use super::dialogs;
use crate::{
    error::Result,
    host::{Choice, FileFilter, FileStore, FsStore, PathPicker, Prompt, TitleObserver},
};

/// Caption of the unsaved-changes question box.
const CLOSE_CAPTION: &str = "Quit";
/// Caption of error boxes.
const ERROR_CAPTION: &str = "Error";

pub(crate) struct Win32Host {
    hwnd: HWND,
    files: FsStore,
}

impl Win32Host {
    pub(crate) fn new(hwnd: HWND) -> Self {
        Self {
            hwnd,
            files: FsStore::default(),
        }
    }
}

impl FileStore for Win32Host {
    fn read(&mut self, path: &Path) -> Result<String> {
        self.files.read(path)
    }

    fn write(&mut self, path: &Path, text: &str) -> Result<()> {
        self.files.write(path, text)
    }
}

impl PathPicker for Win32Host {
    fn choose_open_path(&mut self, filters: &[FileFilter]) -> Option<PathBuf> {
        dialogs::show_open_dialog(self.hwnd, filters)
    }

    fn choose_save_path(&mut self, default_ext: &str, filters: &[FileFilter]) -> Option<PathBuf> {
        dialogs::show_save_dialog(self.hwnd, default_ext, filters)
    }
}

impl Prompt for Win32Host {
    fn confirm_three_way(&mut self, question: &str) -> Choice {
        dialogs::confirm_three_way(self.hwnd, CLOSE_CAPTION, question)
    }

    fn show_error(&mut self, message: &str) {
        dialogs::show_error(self.hwnd, ERROR_CAPTION, message);
    }
}

impl TitleObserver for Win32Host {
    fn set_title(&mut self, title: &str) {
        let wide: Vec<u16> = title.encode_utf16().chain(std::iter::once(0)).collect();
        // SAFETY: hwnd is the live main window; wide is null-terminated and
        // outlives the call.  WM_SETTEXT re-enters wnd_proc while the window
        // state is borrowed, which falls through to DefWindowProcW.
        if unsafe { SetWindowTextW(self.hwnd, PCWSTR(wide.as_ptr())) }.is_err() {
            tracing::warn!(%title, "SetWindowTextW failed");
        }
    }
}
