// ── RichEdit child-window hosting ─────────────────────────────────────────────
//
// `RichEditDll` owns the `LoadLibraryW("Msftedit.dll")` call that registers the
// `RICHEDIT50W` class; `TextView` wraps the single child control.
//
// Drop order inside `WindowState` (Rust drops fields in declaration order):
//   1. `session`: pure Rust plus the owner HWND
//   2. `view`: stale child HWND (Windows already destroyed it); no-op drop
//   3. `dll`: `FreeLibrary`, after all windows are gone
//
// Positions exchanged with the control are UTF-16 code units.  Paragraph
// breaks are a single `\r` inside the control and `\n` in the session; both
// are one unit, so offsets line up.

#![allow(unsafe_code)]

pub(crate) mod messages;

use messages::{
    CFE_BOLD, CFM_BOLD, CFM_COLOR, CFM_FACE, CFM_SIZE, CHARFORMATW, CHARRANGE, CP_UNICODE,
    EM_EXGETSEL, EM_EXLIMITTEXT, EM_EXSETSEL, EM_GETTEXTEX, EM_GETTEXTLENGTHEX, EM_REPLACESEL,
    EM_SETBKGNDCOLOR, EM_SETCHARFORMAT, EM_SETEVENTMASK, EM_SETTARGETDEVICE, ENM_CHANGE,
    ES_AUTOVSCROLL, ES_MULTILINE, ES_NOHIDESEL, ES_WANTRETURN, GETTEXTEX, GETTEXTLENGTHEX,
    GTL_NUMCHARS, GTL_PRECISE, GT_DEFAULT, LF_FACESIZE, MSFTEDIT_CLASS, MSFTEDIT_DLL, SCF_ALL,
    SCF_DEFAULT, SCF_SELECTION,
};

use windows::{
    core::PCWSTR,
    Win32::{
        Foundation::{GetLastError, HINSTANCE, HMODULE, HWND, LPARAM, WPARAM},
        System::LibraryLoader::{FreeLibrary, LoadLibraryW},
        UI::{
            Controls::SetWindowTheme,
            Input::KeyboardAndMouse::SetFocus,
            WindowsAndMessaging::{
                CreateWindowExW, MoveWindow, SendMessageW, HMENU, WINDOW_EX_STYLE, WINDOW_STYLE,
                WM_SETTEXT, WS_CHILD, WS_VISIBLE, WS_VSCROLL,
            },
        },
    },
};

use crate::{
    error::{EditorError, Result},
    theme::Theme,
};

/// Control id of the text area, reported in WM_COMMAND notifications.
pub(crate) const TEXT_VIEW_ID: usize = 100;

fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

// ── RichEditDll ───────────────────────────────────────────────────────────────

/// RAII handle to the loaded `Msftedit.dll`.
pub(crate) struct RichEditDll(HMODULE);

impl RichEditDll {
    pub(crate) fn load() -> Result<Self> {
        let path = wide(MSFTEDIT_DLL);
        // SAFETY: path is a valid null-terminated UTF-16 string.  Msftedit.dll
        // is a system DLL, resolved from System32.
        let dll = unsafe { LoadLibraryW(PCWSTR(path.as_ptr())) }?;
        Ok(Self(dll))
    }
}

impl Drop for RichEditDll {
    fn drop(&mut self) {
        // SAFETY: self.0 came from a successful LoadLibraryW and has not been
        // freed.  The text view child is destroyed with its parent before
        // WindowState (and therefore this field) is dropped.
        unsafe {
            let _ = FreeLibrary(self.0);
        }
    }
}

// ── TextView ──────────────────────────────────────────────────────────────────

/// The RichEdit text area filling the main window's client area.
pub(crate) struct TextView {
    hwnd: HWND,
}

impl TextView {
    /// Create the text area inside `parent` and apply `theme`.
    ///
    /// `_dll` proves that the `RICHEDIT50W` class is registered.
    pub(crate) fn create(
        parent: HWND,
        hinstance: HINSTANCE,
        _dll: &RichEditDll,
        theme: &Theme,
    ) -> Result<Self> {
        let class = wide(MSFTEDIT_CLASS);
        let style = WS_CHILD
            | WS_VISIBLE
            | WS_VSCROLL
            | WINDOW_STYLE(ES_MULTILINE | ES_AUTOVSCROLL | ES_WANTRETURN | ES_NOHIDESEL);

        // SAFETY: class is the null-terminated name registered by Msftedit.dll
        // (_dll proves it is loaded).  parent and hinstance are valid handles.
        // The control id travels in the HMENU slot for child windows.
        let hwnd = unsafe {
            CreateWindowExW(
                WINDOW_EX_STYLE(0),
                PCWSTR(class.as_ptr()),
                PCWSTR::null(),
                style,
                0,
                0,
                0,
                0,
                parent,
                HMENU(TEXT_VIEW_ID as _),
                hinstance,
                None,
            )
        };

        if hwnd == HWND::default() {
            // SAFETY: GetLastError reads thread-local state set by the just-
            // failed CreateWindowExW; no Win32 calls between them.
            let code = unsafe { GetLastError().0 };
            return Err(EditorError::Win32 {
                function: "CreateWindowExW (RichEdit)",
                code,
            });
        }

        let view = Self { hwnd };
        view.apply_theme(theme);
        Ok(view)
    }

    fn send(&self, msg: u32, wparam: usize, lparam: isize) -> isize {
        // SAFETY: hwnd is the live RichEdit child.  Every caller passes either
        // plain integers or a pointer to a local that outlives this call.
        unsafe { SendMessageW(self.hwnd, msg, WPARAM(wparam), LPARAM(lparam)).0 }
    }

    fn apply_theme(&self, theme: &Theme) {
        // Lift the 32K default limit.
        self.send(EM_EXLIMITTEXT, 0, isize::MAX);
        self.send(EM_SETBKGNDCOLOR, 0, theme.text_bg.colorref() as isize);

        let mut cf = base_format(theme);
        self.send(EM_SETCHARFORMAT, SCF_DEFAULT, &mut cf as *mut _ as isize);

        if theme.word_wrap {
            self.send(EM_SETTARGETDEVICE, 0, 0);
        }
        self.send(EM_SETEVENTMASK, 0, ENM_CHANGE);

        let style = wide(&theme.scrollbar_style);
        // SAFETY: hwnd valid; style is null-terminated and outlives the call.
        let themed = unsafe { SetWindowTheme(self.hwnd, PCWSTR(style.as_ptr()), PCWSTR::null()) };
        if let Err(e) = themed {
            tracing::debug!(error = %e, "scrollbar visual style unavailable");
        }
    }

    /// Position the control at the origin of its parent with the given size.
    pub(crate) fn resize(&self, width: i32, height: i32) {
        // SAFETY: hwnd valid; MoveWindow only repositions the child.
        unsafe {
            let _ = MoveWindow(self.hwnd, 0, 0, width, height, true);
        }
    }

    pub(crate) fn focus(&self) {
        // SAFETY: hwnd valid; called on the UI thread.
        unsafe {
            let _ = SetFocus(self.hwnd);
        }
    }

    // ── Content ───────────────────────────────────────────────────────────────

    /// Replace all text.  Formatting falls back to the theme defaults.
    pub(crate) fn set_text(&self, text: &str, theme: &Theme) {
        let buf = wide(text);
        self.send(WM_SETTEXT, 0, buf.as_ptr() as isize);
        let mut cf = base_format(theme);
        self.send(EM_SETCHARFORMAT, SCF_ALL, &mut cf as *mut _ as isize);
    }

    /// The full text, with paragraph breaks as `\n`.
    pub(crate) fn text(&self) -> String {
        let mut len_req = GETTEXTLENGTHEX {
            flags: GTL_NUMCHARS | GTL_PRECISE,
            codepage: CP_UNICODE,
        };
        let len = self
            .send(EM_GETTEXTLENGTHEX, &mut len_req as *mut _ as usize, 0)
            .max(0) as usize;

        let mut buf = vec![0u16; len + 1];
        let mut req = GETTEXTEX {
            cb: (buf.len() * 2) as u32,
            flags: GT_DEFAULT,
            codepage: CP_UNICODE,
            lpDefaultChar: std::ptr::null(),
            lpUsedDefChar: std::ptr::null_mut(),
        };
        let copied = self
            .send(EM_GETTEXTEX, &mut req as *mut _ as usize, buf.as_mut_ptr() as isize)
            .max(0) as usize;
        buf.truncate(copied.min(len));
        String::from_utf16_lossy(&buf).replace('\r', "\n")
    }

    // ── Selection ─────────────────────────────────────────────────────────────

    /// Selection as `(start, end)` UTF-16 offsets; equal when nothing is selected.
    pub(crate) fn selection(&self) -> (usize, usize) {
        let mut range = CHARRANGE::default();
        self.send(EM_EXGETSEL, 0, &mut range as *mut _ as isize);
        (range.cpMin.max(0) as usize, range.cpMax.max(0) as usize)
    }

    /// Insert `text` at `pos` (UTF-16 offset) as an undoable edit.
    pub(crate) fn insert_at(&self, pos: usize, text: &str) {
        let mut range = CHARRANGE {
            cpMin: pos as i32,
            cpMax: pos as i32,
        };
        self.send(EM_EXSETSEL, 0, &mut range as *mut _ as isize);
        let buf = wide(text);
        self.send(EM_REPLACESEL, 1, buf.as_ptr() as isize);
    }

    /// Set or clear bold on `start..end` (UTF-16 offsets), leaving the
    /// selection where it was.
    pub(crate) fn set_range_bold(&self, start: usize, end: usize, bold: bool) {
        let mut saved = CHARRANGE::default();
        self.send(EM_EXGETSEL, 0, &mut saved as *mut _ as isize);
        let mut range = CHARRANGE {
            cpMin: start as i32,
            cpMax: end as i32,
        };
        self.send(EM_EXSETSEL, 0, &mut range as *mut _ as isize);
        self.set_selection_bold(bold);
        self.send(EM_EXSETSEL, 0, &mut saved as *mut _ as isize);
    }

    /// Set or clear bold on the current selection.
    pub(crate) fn set_selection_bold(&self, bold: bool) {
        let mut cf = CHARFORMATW::new(CFM_BOLD);
        cf.dwEffects = if bold { CFE_BOLD } else { 0 };
        self.send(EM_SETCHARFORMAT, SCF_SELECTION, &mut cf as *mut _ as isize);
    }
}

/// Theme font and colour, not bold.
fn base_format(theme: &Theme) -> CHARFORMATW {
    let mut cf = CHARFORMATW::new(CFM_FACE | CFM_SIZE | CFM_COLOR | CFM_BOLD);
    cf.yHeight = (theme.font.size_pt * 20) as i32;
    cf.crTextColor = theme.text_fg.colorref();
    for (dst, src) in cf
        .szFaceName
        .iter_mut()
        .zip(theme.font.face.encode_utf16().take(LF_FACESIZE - 1))
    {
        *dst = src;
    }
    cf
}
