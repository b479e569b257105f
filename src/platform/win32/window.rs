// ── Main window ───────────────────────────────────────────────────────────────
//
// Responsibilities in this file (unsafe confined here):
//   • Register the main window class with the theme's background brush.
//   • Create the top-level window, its menu bar and the RichEdit text area.
//   • Run the Win32 message loop with the keyboard accelerators.
//   • Translate WM_COMMAND / WM_CLOSE into session operations and mirror the
//     results back into the text area.
//
// `WindowState` lives in GWLP_USERDATA inside a `RefCell`.  Session operations
// open modal dialogs and change the caption, both of which re-enter
// `wnd_proc`; while the state is borrowed those nested messages fall through
// to DefWindowProcW.  The same rule silences the EN_CHANGE notifications
// caused by our own edits to the text area.

#![allow(unsafe_code)]

use std::{cell::RefCell, ffi::c_void, path::PathBuf};

use windows::{
    core::{w, PCWSTR},
    Win32::{
        Foundation::{
            GetLastError, BOOL, COLORREF, HINSTANCE, HWND, LPARAM, LRESULT, RECT, WPARAM,
        },
        Graphics::{
            Dwm::{DwmSetWindowAttribute, DWMWA_USE_IMMERSIVE_DARK_MODE},
            Gdi::{CreateSolidBrush, DeleteObject, UpdateWindow, HBRUSH},
        },
        System::LibraryLoader::GetModuleHandleW,
        UI::WindowsAndMessaging::{
            AppendMenuW, CreateAcceleratorTableW, CreateMenu, CreateWindowExW, DefWindowProcW,
            DestroyAcceleratorTable, DestroyWindow, DispatchMessageW, GetClientRect, GetMessageW,
            GetWindowLongPtrW, LoadCursorW, LoadIconW, PostQuitMessage, RegisterClassExW,
            SetMenu, SetWindowLongPtrW, ShowWindow, TranslateAcceleratorW, TranslateMessage,
            ACCEL, CS_HREDRAW, CS_VREDRAW, CW_USEDEFAULT, FCONTROL, FSHIFT, FVIRTKEY,
            GWLP_USERDATA, HACCEL, HMENU, IDC_ARROW, IDI_APPLICATION, MF_POPUP, MF_SEPARATOR,
            MF_STRING, MSG, SW_SHOW, WINDOW_EX_STYLE, WM_CLOSE, WM_COMMAND, WM_DESTROY,
            WM_SETFOCUS, WM_SIZE, WNDCLASSEXW, WS_OVERLAPPEDWINDOW,
        },
    },
};

use super::{
    dialogs, dpi,
    host::Win32Host,
    richedit::{messages::EN_CHANGE, RichEditDll, TextView, TEXT_VIEW_ID},
};
use crate::{
    document::{char_index_from_utf16, utf16_offset_from_char, Mutation},
    error::{EditorError, Result},
    session::{BoldToggle, CloseDecision, Glyph, Outcome, Session},
    theme::{Theme, WindowSize},
    ui::title::APP_NAME,
};

// ── Window identity ───────────────────────────────────────────────────────────

/// Atom name used to register (and later find) the main window class.
const CLASS_NAME: PCWSTR = w!("NotepadDarkMainWindow");

// ── Menu command IDs ──────────────────────────────────────────────────────────

const IDM_FILE_OPEN: usize = 1001;
const IDM_FILE_SAVE: usize = 1002;
const IDM_FILE_SAVE_AS: usize = 1003;
const IDM_FILE_EXIT: usize = 1004;
const IDM_TOOLBAR_CHECK: usize = 2001;
const IDM_TOOLBAR_CROSS: usize = 2002;
/// Accelerator only (Ctrl+B); there is no menu item.
const IDM_FORMAT_BOLD: usize = 3001;

// ── Public API ────────────────────────────────────────────────────────────────

/// Create the main window, optionally open `file`, and drive the message loop
/// until the user closes the application.
pub fn run(file: Option<PathBuf>) -> Result<()> {
    dpi::init();
    let theme = Theme::dark()?;

    // SAFETY: GetModuleHandleW(None) returns the .exe's own HMODULE, which is
    // always valid for the process lifetime.
    let hmodule = unsafe { GetModuleHandleW(None) }?;
    let hinstance = HINSTANCE(hmodule.0);

    // SAFETY: CreateSolidBrush has no preconditions.  The brush is released
    // in WindowState::drop.
    let bg_brush = unsafe { CreateSolidBrush(COLORREF(theme.window_bg.colorref())) };

    register_class(hinstance, bg_brush)?;
    let hwnd = create_window(hinstance, theme.window.scaled(dpi::system_dpi()))?;
    enable_dark_title_bar(hwnd);

    let dll = RichEditDll::load()?;
    let view = TextView::create(hwnd, hinstance, &dll, &theme)?;
    let session = Session::new(Win32Host::new(hwnd));

    let state = Box::new(RefCell::new(WindowState {
        session,
        view,
        theme,
        bg_brush,
        _dll: dll,
    }));
    // SAFETY: hwnd is our window; ownership of the box moves into the window
    // and is reclaimed exactly once in WM_DESTROY.
    unsafe {
        let _ = SetWindowLongPtrW(hwnd, GWLP_USERDATA, Box::into_raw(state) as isize);
    }

    // SAFETY: hwnd was just returned by CreateWindowExW and is valid.
    // ShowWindow returns the previous visibility state; UpdateWindow returns
    // a success BOOL. Neither matters here.
    unsafe {
        let _ = ShowWindow(hwnd, SW_SHOW);
        let _ = UpdateWindow(hwnd);
    }

    if let Some(cell) = state_cell(hwnd) {
        if let Ok(mut state) = cell.try_borrow_mut() {
            state.fit_to_client(hwnd);
            if let Some(path) = file {
                state.open_path(path);
            }
            state.view.focus();
        }
    }

    tracing::info!("window visible");
    let accel = create_accelerators()?;
    let result = message_loop(hwnd, accel);
    // SAFETY: accel came from CreateAcceleratorTableW and is no longer used.
    unsafe {
        let _ = DestroyAcceleratorTable(accel);
    }
    result
}

/// Show a modal error dialog with the given message.
///
/// Used by `main()` when `run()` returns an error.
pub fn show_error_dialog(message: &str) {
    dialogs::show_error(HWND::default(), &format!("{APP_NAME}: fatal error"), message);
}

// ── Window state ──────────────────────────────────────────────────────────────

struct WindowState {
    session: Session<Win32Host>,
    view: TextView,
    theme: Theme,
    bg_brush: HBRUSH,
    _dll: RichEditDll,
}

/// What `wnd_proc` should do once the state borrow is released.
enum After {
    Handled,
    Default,
    Destroy,
}

impl Drop for WindowState {
    fn drop(&mut self) {
        // SAFETY: the brush was created in run() and the window using it as
        // its class background is already destroyed.
        unsafe {
            let _ = DeleteObject(self.bg_brush);
        }
    }
}

impl WindowState {
    fn handle(&mut self, hwnd: HWND, msg: u32, wparam: WPARAM) -> After {
        match msg {
            WM_SIZE => {
                self.fit_to_client(hwnd);
                After::Handled
            }
            WM_SETFOCUS => {
                self.view.focus();
                After::Handled
            }
            WM_CLOSE => self.close(),
            WM_COMMAND => self.command(wparam),
            _ => After::Default,
        }
    }

    fn command(&mut self, wparam: WPARAM) -> After {
        // Low word: command or control id.  High word: notification code.
        let id = wparam.0 & 0xFFFF;
        let code = ((wparam.0 >> 16) & 0xFFFF) as u32;

        if id == TEXT_VIEW_ID {
            if code == EN_CHANGE {
                self.sync_from_view();
            }
            return After::Handled;
        }

        match id {
            IDM_FILE_OPEN => {
                if self.session.open() == Outcome::Done {
                    self.show_session_text();
                }
            }
            IDM_FILE_SAVE => {
                let _ = self.session.save();
            }
            IDM_FILE_SAVE_AS => {
                let _ = self.session.save_as();
            }
            IDM_FILE_EXIT => return self.close(),
            IDM_TOOLBAR_CHECK => self.insert_glyph(Glyph::Check),
            IDM_TOOLBAR_CROSS => self.insert_glyph(Glyph::Cross),
            IDM_FORMAT_BOLD => self.toggle_bold(),
            _ => return After::Default,
        }
        After::Handled
    }

    fn open_path(&mut self, path: PathBuf) {
        if self.session.open_path(path) == Outcome::Done {
            self.show_session_text();
        }
    }

    fn show_session_text(&self) {
        self.view.set_text(self.session.text(), &self.theme);
    }

    /// Mirror the text area into the session after a user edit.
    fn sync_from_view(&mut self) {
        let text = self.view.text();
        if let Some(mutation) = Mutation::between(self.session.text(), &text) {
            self.session.edit(&mutation);
            self.restyle_inserted(&mutation);
        }
    }

    fn insert_glyph(&mut self, glyph: Glyph) {
        let (_, caret) = self.view.selection();
        let pos = char_index_from_utf16(self.session.text(), caret);
        let mutation = Mutation::insert(pos, glyph.as_str());
        self.session.insert_glyph(glyph, pos);
        self.view.insert_at(caret, glyph.as_str());
        self.restyle_inserted(&mutation);
    }

    /// RichEdit gives new text the format of its neighbour; the session only
    /// bolds text typed strictly inside a bold run.  Make the view agree.
    fn restyle_inserted(&self, mutation: &Mutation) {
        let Some(range) = mutation.inserted_range() else {
            return;
        };
        let bold = self.session.document().is_bold(&range);
        let text = self.session.text();
        self.view.set_range_bold(
            utf16_offset_from_char(text, range.start),
            utf16_offset_from_char(text, range.end),
            bold,
        );
    }

    fn toggle_bold(&mut self) {
        let (start, end) = self.view.selection();
        let text = self.session.text();
        let range = char_index_from_utf16(text, start)..char_index_from_utf16(text, end);
        match self.session.toggle_bold(range) {
            BoldToggle::Added => self.view.set_selection_bold(true),
            BoldToggle::Removed => self.view.set_selection_bold(false),
            BoldToggle::Ignored => {}
        }
    }

    fn close(&mut self) -> After {
        match self.session.request_close() {
            CloseDecision::Terminate => After::Destroy,
            CloseDecision::Stay => After::Handled,
        }
    }

    fn fit_to_client(&self, hwnd: HWND) {
        let mut rect = RECT::default();
        // SAFETY: hwnd is the live main window; rect is a valid out pointer.
        if unsafe { GetClientRect(hwnd, &mut rect) }.is_ok() {
            self.view.resize(rect.right - rect.left, rect.bottom - rect.top);
        }
    }
}

fn state_cell<'a>(hwnd: HWND) -> Option<&'a RefCell<WindowState>> {
    // SAFETY: GWLP_USERDATA holds either 0 or the pointer stored in run(),
    // which stays valid until WM_DESTROY resets the slot and frees it.
    unsafe {
        let ptr = GetWindowLongPtrW(hwnd, GWLP_USERDATA) as *const RefCell<WindowState>;
        ptr.as_ref()
    }
}

// ── Window class registration ─────────────────────────────────────────────────

fn register_class(hinstance: HINSTANCE, bg_brush: HBRUSH) -> Result<()> {
    // SAFETY: LoadIconW with IDI_APPLICATION loads a built-in resource.
    let icon = unsafe { LoadIconW(None, IDI_APPLICATION) }?;
    // SAFETY: LoadCursorW with IDC_ARROW loads a built-in resource.
    let cursor = unsafe { LoadCursorW(None, IDC_ARROW) }?;

    let wndclass = WNDCLASSEXW {
        cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
        style: CS_HREDRAW | CS_VREDRAW,
        lpfnWndProc: Some(wnd_proc),
        cbClsExtra: 0,
        cbWndExtra: 0,
        hInstance: hinstance,
        hIcon: icon,
        hCursor: cursor,
        hbrBackground: bg_brush,
        lpszMenuName: PCWSTR::null(),
        lpszClassName: CLASS_NAME,
        hIconSm: icon,
    };

    // SAFETY: wndclass is fully initialised with valid handles;
    // CLASS_NAME is a valid null-terminated UTF-16 string literal.
    let atom = unsafe { RegisterClassExW(&wndclass) };
    if atom == 0 {
        return Err(last_error("RegisterClassExW"));
    }
    Ok(())
}

// ── Window creation ───────────────────────────────────────────────────────────

fn create_window(hinstance: HINSTANCE, size: WindowSize) -> Result<HWND> {
    // SAFETY: CLASS_NAME was just registered; hinstance is the exe's module.
    // Null parent creates a top-level window; the menu is attached below.
    let hwnd = unsafe {
        CreateWindowExW(
            WINDOW_EX_STYLE(0),
            CLASS_NAME,
            w!("Notepad Dark"),
            WS_OVERLAPPEDWINDOW,
            CW_USEDEFAULT,
            CW_USEDEFAULT,
            size.width,
            size.height,
            HWND::default(),
            HMENU::default(),
            hinstance,
            None,
        )
    };

    if hwnd == HWND::default() {
        return Err(last_error("CreateWindowExW"));
    }

    let menu = build_menu()?;
    // SAFETY: hwnd and menu are valid handles.
    unsafe { SetMenu(hwnd, menu) }?;

    Ok(hwnd)
}

/// Ask DWM for the dark caption.  Older Windows builds ignore the attribute.
fn enable_dark_title_bar(hwnd: HWND) {
    let dark = BOOL::from(true);
    // SAFETY: hwnd valid; the attribute value points at a BOOL that outlives
    // the call and the size matches.
    let result = unsafe {
        DwmSetWindowAttribute(
            hwnd,
            DWMWA_USE_IMMERSIVE_DARK_MODE,
            &dark as *const BOOL as *const c_void,
            std::mem::size_of::<BOOL>() as u32,
        )
    };
    if let Err(e) = result {
        tracing::debug!(error = %e, "dark title bar unavailable");
    }
}

// ── Menu and accelerators ─────────────────────────────────────────────────────

fn build_menu() -> Result<HMENU> {
    // SAFETY: CreateMenu/AppendMenuW have no preconditions beyond valid
    // handles; string literals are null-terminated UTF-16.
    unsafe {
        let bar = CreateMenu()?;

        let file = CreateMenu()?;
        AppendMenuW(file, MF_STRING, IDM_FILE_OPEN, w!("&Open\tCtrl+O"))?;
        AppendMenuW(file, MF_STRING, IDM_FILE_SAVE, w!("&Save\tCtrl+S"))?;
        AppendMenuW(file, MF_STRING, IDM_FILE_SAVE_AS, w!("Save &As…\tCtrl+Shift+S"))?;
        AppendMenuW(file, MF_SEPARATOR, 0, PCWSTR::null())?;
        AppendMenuW(file, MF_STRING, IDM_FILE_EXIT, w!("E&xit\tAlt+F4"))?;

        let toolbar = CreateMenu()?;
        AppendMenuW(toolbar, MF_STRING, IDM_TOOLBAR_CHECK, w!("\u{2714}\u{FE0F}"))?;
        AppendMenuW(toolbar, MF_STRING, IDM_TOOLBAR_CROSS, w!("\u{2718}"))?;

        // The uIDNewItem parameter for MF_POPUP is the child HMENU cast to usize.
        AppendMenuW(bar, MF_POPUP, file.0 as usize, w!("&File"))?;
        AppendMenuW(bar, MF_POPUP, toolbar.0 as usize, w!("&Toolbar"))?;

        Ok(bar)
    }
}

fn create_accelerators() -> Result<HACCEL> {
    let entry = |flags, key: u8, cmd: usize| ACCEL {
        fVirt: FVIRTKEY | flags,
        key: key as u16,
        cmd: cmd as u16,
    };
    let table = [
        entry(FCONTROL, b'B', IDM_FORMAT_BOLD),
        entry(FCONTROL, b'O', IDM_FILE_OPEN),
        entry(FCONTROL, b'S', IDM_FILE_SAVE),
        entry(FCONTROL | FSHIFT, b'S', IDM_FILE_SAVE_AS),
    ];
    // SAFETY: table is a valid slice of ACCEL entries; the API copies it.
    Ok(unsafe { CreateAcceleratorTableW(&table) }?)
}

// ── Message loop ──────────────────────────────────────────────────────────────

fn message_loop(hwnd: HWND, accel: HACCEL) -> Result<()> {
    let mut msg = MSG::default();

    loop {
        // SAFETY: &mut msg is a valid MSG pointer; HWND::default() retrieves
        // messages for all windows on this thread; 0,0 filter accepts all.
        let ret = unsafe { GetMessageW(&mut msg, HWND::default(), 0, 0) };

        match ret.0 {
            -1 => return Err(last_error("GetMessageW")),
            0 => break,
            // SAFETY: msg was populated by a successful GetMessageW call.
            // Accelerators win over the text area's own key handling.
            _ => unsafe {
                if TranslateAcceleratorW(hwnd, accel, &msg) == 0 {
                    let _ = TranslateMessage(&msg);
                    let _ = DispatchMessageW(&msg);
                }
            },
        }
    }

    Ok(())
}

// ── Window procedure ──────────────────────────────────────────────────────────

// SAFETY: wnd_proc is registered as lpfnWndProc in WNDCLASSEXW.
// Windows guarantees that hwnd, msg, wparam, and lparam are valid for the
// lifetime of this call; we must not store hwnd beyond the message handler.
unsafe extern "system" fn wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    if msg == WM_DESTROY {
        let ptr = GetWindowLongPtrW(hwnd, GWLP_USERDATA) as *mut RefCell<WindowState>;
        if !ptr.is_null() && (*ptr).try_borrow_mut().is_ok() {
            let _ = SetWindowLongPtrW(hwnd, GWLP_USERDATA, 0);
            // SAFETY: ptr came from Box::into_raw in run() and the slot is now
            // cleared, so this is the only reclaim.
            drop(Box::from_raw(ptr));
        }
        PostQuitMessage(0);
        return LRESULT(0);
    }

    let Some(cell) = state_cell(hwnd) else {
        return DefWindowProcW(hwnd, msg, wparam, lparam);
    };
    // Nested message while an operation is running (dialog, caption update,
    // our own edit notifications).
    let Ok(mut state) = cell.try_borrow_mut() else {
        return nested_default(hwnd, msg, wparam, lparam);
    };
    let after = state.handle(hwnd, msg, wparam);
    drop(state);

    match after {
        After::Handled => LRESULT(0),
        After::Default => DefWindowProcW(hwnd, msg, wparam, lparam),
        After::Destroy => {
            // SAFETY: the state borrow is released; WM_DESTROY may free it.
            let _ = DestroyWindow(hwnd);
            LRESULT(0)
        }
    }
}

/// Default handling for messages that arrive while the state is borrowed.
///
/// WM_CLOSE is swallowed: DefWindowProcW would destroy the window without
/// asking about unsaved changes, and the state could not be freed.
fn nested_default(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    match nested_action(msg) {
        Nested::Swallow => LRESULT(0),
        // SAFETY: forwarding the arguments wnd_proc received for this hwnd.
        Nested::Default => unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Nested {
    Swallow,
    Default,
}

fn nested_action(msg: u32) -> Nested {
    if msg == WM_CLOSE {
        Nested::Swallow
    } else {
        Nested::Default
    }
}

// ── Error helpers ─────────────────────────────────────────────────────────────

/// Capture the current Win32 last-error code and wrap it in an `EditorError`.
///
/// Call immediately after a Win32 function that signals failure; `GetLastError`
/// reads thread-local state that any subsequent API call can overwrite.
fn last_error(function: &'static str) -> EditorError {
    // SAFETY: GetLastError reads thread-local state set by the last Win32 call.
    let code = unsafe { GetLastError() };
    EditorError::Win32 {
        function,
        code: code.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use windows::Win32::UI::WindowsAndMessaging::WM_PAINT;

    #[test]
    fn close_during_operation_is_swallowed() {
        assert_eq!(nested_action(WM_CLOSE), Nested::Swallow);
    }

    #[test]
    fn other_nested_messages_use_default_handling() {
        for msg in [WM_COMMAND, WM_SIZE, WM_PAINT, WM_SETFOCUS] {
            assert_eq!(nested_action(msg), Nested::Default);
        }
    }
}
