// ── RichEdit message constants ────────────────────────────────────────────────
//
// Source of truth: Richedit.h / WinUser.h.
// Only the subset the editor uses is listed here.  The structs are declared
// locally with the exact C layout so the control can be driven through plain
// SendMessageW calls.

#![allow(non_snake_case)]

// ── Window class ──────────────────────────────────────────────────────────────

/// Window class registered by `Msftedit.dll` (RichEdit 4.1+).
pub(super) const MSFTEDIT_CLASS: &str = "RICHEDIT50W";
pub(super) const MSFTEDIT_DLL: &str = "Msftedit.dll";

// ── Styles ────────────────────────────────────────────────────────────────────

pub(super) const ES_MULTILINE: u32 = 0x0004;
pub(super) const ES_AUTOVSCROLL: u32 = 0x0040;
pub(super) const ES_NOHIDESEL: u32 = 0x0100;
pub(super) const ES_WANTRETURN: u32 = 0x1000;

// ── Messages ──────────────────────────────────────────────────────────────────

/// Replace the selection.  WPARAM=can-undo flag; LPARAM=null-terminated UTF-16.
pub(super) const EM_REPLACESEL: u32 = 0x00C2;
/// Read the selection as a `CHARRANGE`.
pub(super) const EM_EXGETSEL: u32 = 0x0434;
/// Raise the text limit.  LPARAM=new limit in characters.
pub(super) const EM_EXLIMITTEXT: u32 = 0x0435;
/// Set the selection from a `CHARRANGE`.
pub(super) const EM_EXSETSEL: u32 = 0x0437;
/// Background colour.  WPARAM=0; LPARAM=COLORREF.
pub(super) const EM_SETBKGNDCOLOR: u32 = 0x0443;
/// Apply a `CHARFORMATW`.  WPARAM=SCF_* scope.
pub(super) const EM_SETCHARFORMAT: u32 = 0x0444;
/// Notification mask.  LPARAM=ENM_* bits.
pub(super) const EM_SETEVENTMASK: u32 = 0x0445;
/// Line-break device.  WPARAM=0, LPARAM=0 wraps at the window edge.
pub(super) const EM_SETTARGETDEVICE: u32 = 0x0448;
/// Copy text out as described by a `GETTEXTEX`.
pub(super) const EM_GETTEXTEX: u32 = 0x045E;
/// Measure text as described by a `GETTEXTLENGTHEX`.
pub(super) const EM_GETTEXTLENGTHEX: u32 = 0x045F;

// ── Notifications ─────────────────────────────────────────────────────────────

/// Sent to the parent via WM_COMMAND after the text changed.
pub(crate) const EN_CHANGE: u32 = 0x0300;
pub(super) const ENM_CHANGE: isize = 0x0001;

// ── Character formatting ──────────────────────────────────────────────────────

pub(super) const SCF_DEFAULT: usize = 0x0000;
pub(super) const SCF_SELECTION: usize = 0x0001;
pub(super) const SCF_ALL: usize = 0x0004;

pub(super) const CFM_BOLD: u32 = 0x0000_0001;
pub(super) const CFM_FACE: u32 = 0x2000_0000;
pub(super) const CFM_COLOR: u32 = 0x4000_0000;
pub(super) const CFM_SIZE: u32 = 0x8000_0000;
pub(super) const CFE_BOLD: u32 = 0x0000_0001;

/// `CHARFORMATW.szFaceName` capacity (LF_FACESIZE).
pub(super) const LF_FACESIZE: usize = 32;

#[repr(C)]
pub(super) struct CHARFORMATW {
    pub cbSize: u32,
    pub dwMask: u32,
    pub dwEffects: u32,
    /// Height in twips (1/20 pt).
    pub yHeight: i32,
    pub yOffset: i32,
    pub crTextColor: u32,
    pub bCharSet: u8,
    pub bPitchAndFamily: u8,
    pub szFaceName: [u16; LF_FACESIZE],
}

impl CHARFORMATW {
    pub(super) fn new(mask: u32) -> Self {
        Self {
            cbSize: std::mem::size_of::<Self>() as u32,
            dwMask: mask,
            dwEffects: 0,
            yHeight: 0,
            yOffset: 0,
            crTextColor: 0,
            bCharSet: 0,
            bPitchAndFamily: 0,
            szFaceName: [0; LF_FACESIZE],
        }
    }
}

#[repr(C)]
#[derive(Default)]
pub(super) struct CHARRANGE {
    pub cpMin: i32,
    pub cpMax: i32,
}

// ── Text retrieval ────────────────────────────────────────────────────────────

/// Paragraph breaks come back as a bare `\r`, one unit per break, which keeps
/// offsets aligned with `EM_EXGETSEL`.
pub(super) const GT_DEFAULT: u32 = 0;
pub(super) const GTL_PRECISE: u32 = 2;
pub(super) const GTL_NUMCHARS: u32 = 8;
/// UTF-16 LE code page.
pub(super) const CP_UNICODE: u32 = 1200;

#[repr(C)]
pub(super) struct GETTEXTEX {
    /// Buffer size in bytes, including the terminator.
    pub cb: u32,
    pub flags: u32,
    pub codepage: u32,
    pub lpDefaultChar: *const u8,
    pub lpUsedDefChar: *mut i32,
}

#[repr(C)]
pub(super) struct GETTEXTLENGTHEX {
    pub flags: u32,
    pub codepage: u32,
}
