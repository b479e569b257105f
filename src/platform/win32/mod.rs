// ── Win32 platform implementation ─────────────────────────────────────────────
//
// The only module tree in the crate where `unsafe` code is permitted.  Every
// `unsafe` block MUST carry a `// SAFETY:` comment that states:
//   • which invariant makes the operation sound, and
//   • what the caller is responsible for maintaining.
//
// Nothing in this module is `pub` beyond what callers genuinely need; keep the
// unsafe surface as small as possible.

#![allow(unsafe_code)]

pub(crate) mod dialogs;
pub(crate) mod host;
pub(crate) mod richedit;
pub mod window;

pub(crate) mod dpi;
