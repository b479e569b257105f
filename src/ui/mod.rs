// ── Presentation helpers ──────────────────────────────────────────────────────
//
// Pure Rust functions that turn session state into display text.
// No Win32 calls here; the window module pushes the results to the screen.

pub mod title;
