// ── Safety policy ────────────────────────────────────────────────────────────
// Unsafe code is forbidden everywhere except `platform::win32` (Win32 FFI).
// Each unsafe block there MUST carry a `// SAFETY:` comment.
#![deny(unsafe_code)]

//! A minimal dark-themed text editor.
//!
//! The [`session::Session`] holds the document, the bound path and the dirty
//! flag and talks to the outside world through the [`host::Host`] traits.
//! The Windows front end in `platform::win32` implements those traits over
//! Win32 dialogs and a RichEdit control.

pub mod cli;
pub mod document;
pub mod error;
pub mod host;
pub mod logging;
pub mod session;
pub mod theme;
pub mod ui;

#[cfg(windows)]
pub mod platform;
