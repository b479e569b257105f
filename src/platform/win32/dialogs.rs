// ── Common dialogs and message boxes ──────────────────────────────────────────
//
// Thin wrappers around the Win32 common-dialog and MessageBox APIs.  The path
// pickers return `Some(path)` on user confirmation and `None` on cancel or
// error.
//
// This is inside `platform::win32` so `unsafe` is permitted per crate policy.

#![allow(unsafe_code)]

use std::path::PathBuf;

use windows::{
    core::PCWSTR,
    Win32::{
        Foundation::HWND,
        UI::{
            Controls::Dialogs::{
                GetOpenFileNameW, GetSaveFileNameW, OFN_FILEMUSTEXIST, OFN_HIDEREADONLY,
                OFN_OVERWRITEPROMPT, OFN_PATHMUSTEXIST, OPENFILENAMEW,
            },
            WindowsAndMessaging::{
                MessageBoxW, IDNO, IDYES, MB_ICONERROR, MB_ICONQUESTION, MB_OK, MB_YESNOCANCEL,
                MESSAGEBOX_STYLE,
            },
        },
    },
};

use crate::host::{filter_spec, Choice, FileFilter};

// ── Buffer size ───────────────────────────────────────────────────────────────

/// Maximum path length in `WCHAR`s, including the null terminator.
/// `MAX_PATH` (260) is too short for modern Windows paths; use 32 768 which
/// is the documented maximum for `\\?\` extended paths.
const PATH_BUF_LEN: usize = 32_768;

fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

// ── Open dialog ───────────────────────────────────────────────────────────────

/// Show the standard "Open" dialog with `filters`, the first one selected.
pub(crate) fn show_open_dialog(owner: HWND, filters: &[FileFilter]) -> Option<PathBuf> {
    let mut buf = vec![0u16; PATH_BUF_LEN];
    // filter_spec already ends in the double NUL the API expects.
    let filter: Vec<u16> = filter_spec(filters).encode_utf16().collect();

    let mut ofn = OPENFILENAMEW {
        lStructSize: std::mem::size_of::<OPENFILENAMEW>() as u32,
        hwndOwner: owner,
        lpstrFilter: PCWSTR(filter.as_ptr()),
        nFilterIndex: 1,
        lpstrFile: windows::core::PWSTR(buf.as_mut_ptr()),
        nMaxFile: PATH_BUF_LEN as u32,
        Flags: OFN_FILEMUSTEXIST | OFN_PATHMUSTEXIST | OFN_HIDEREADONLY,
        ..Default::default()
    };

    // SAFETY: `ofn` is fully initialised; `buf` and `filter` outlive this
    // call.  GetOpenFileNameW reads and writes only within the buffers we
    // provided.  Called on the UI thread (required for modal dialogs).
    let ok = unsafe { GetOpenFileNameW(&mut ofn) };

    ok.as_bool().then(|| path_from_buf(&buf))
}

// ── Save dialog ───────────────────────────────────────────────────────────────

/// Show the standard "Save As" dialog.
///
/// `default_ext` (without the dot) is appended when the user types a name
/// with no extension.
pub(crate) fn show_save_dialog(
    owner: HWND,
    default_ext: &str,
    filters: &[FileFilter],
) -> Option<PathBuf> {
    let mut buf = vec![0u16; PATH_BUF_LEN];
    let filter: Vec<u16> = filter_spec(filters).encode_utf16().collect();
    let ext = wide(default_ext);

    let mut ofn = OPENFILENAMEW {
        lStructSize: std::mem::size_of::<OPENFILENAMEW>() as u32,
        hwndOwner: owner,
        lpstrFilter: PCWSTR(filter.as_ptr()),
        nFilterIndex: 1,
        lpstrFile: windows::core::PWSTR(buf.as_mut_ptr()),
        nMaxFile: PATH_BUF_LEN as u32,
        lpstrDefExt: PCWSTR(ext.as_ptr()),
        Flags: OFN_OVERWRITEPROMPT | OFN_PATHMUSTEXIST,
        ..Default::default()
    };

    // SAFETY: same invariants as show_open_dialog above; `ext` also outlives
    // the call.
    let ok = unsafe { GetSaveFileNameW(&mut ofn) };

    ok.as_bool().then(|| path_from_buf(&buf))
}

// ── Message boxes ─────────────────────────────────────────────────────────────

fn message_box(owner: HWND, text: &str, caption: &str, style: MESSAGEBOX_STYLE) -> i32 {
    let text = wide(text);
    let caption = wide(caption);
    // SAFETY: text and caption are valid null-terminated UTF-16 strings that
    // remain allocated for the duration of the MessageBoxW call.
    unsafe { MessageBoxW(owner, PCWSTR(text.as_ptr()), PCWSTR(caption.as_ptr()), style).0 }
}

/// Ask a Yes / No / Cancel question.  Closing the box counts as Cancel.
pub(crate) fn confirm_three_way(owner: HWND, caption: &str, question: &str) -> Choice {
    match message_box(owner, question, caption, MB_YESNOCANCEL | MB_ICONQUESTION) {
        r if r == IDYES.0 => Choice::Yes,
        r if r == IDNO.0 => Choice::No,
        _ => Choice::Cancel,
    }
}

/// Show a modal error box owned by `owner` (may be null).
pub(crate) fn show_error(owner: HWND, caption: &str, message: &str) {
    let _ = message_box(owner, message, caption, MB_OK | MB_ICONERROR);
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Convert a null-terminated UTF-16 buffer to a `PathBuf`.
fn path_from_buf(buf: &[u16]) -> PathBuf {
    let len = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
    PathBuf::from(String::from_utf16_lossy(&buf[..len]))
}
