// ── Platform layer ────────────────────────────────────────────────────────────
//
// The window front end.  No `unsafe` lives here; all Win32 FFI is confined to
// the `win32` sub-module and never leaks outward.  Everything above this layer
// (session, document, theme) is plain Rust and builds on every target.

pub mod win32;
