// ── Central error type ────────────────────────────────────────────────────────
//
// All fallible steps in the editor return `error::Result<T>`.  Session
// operations catch these at their boundary and surface them as user-facing
// dialogs (see `session::Session::report`); nothing here panics.

use std::path::PathBuf;

use thiserror::Error;

/// Every error that the editor can produce.
#[derive(Debug, Error)]
pub enum EditorError {
    /// Reading a file from disk failed (missing, permission denied, …).
    #[error("{}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but its bytes are not valid UTF-8.
    #[error("{}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: std::str::Utf8Error,
    },

    /// Writing the buffer to disk failed.
    #[error("{}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The embedded colour scheme could not be parsed.
    #[error("invalid theme: {0}")]
    Theme(#[from] serde_json::Error),

    /// A Win32 API call returned a failure code.
    #[error("{function} failed (error {code:#010x})")]
    Win32 {
        /// The name of the failing function, for display purposes.
        function: &'static str,
        /// The raw Win32 error code (`GetLastError()` value) or HRESULT.
        code: u32,
    },
}

// Convert a windows-crate error (HRESULT) directly into an EditorError so that
// `?` can be used on `windows::core::Result<T>` throughout the platform module.
#[cfg(windows)]
impl From<windows::core::Error> for EditorError {
    fn from(e: windows::core::Error) -> Self {
        // HRESULT.0 is i32; reinterpret bits as u32 for display purposes.
        Self::Win32 {
            function: "windows",
            code: e.code().0 as u32,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EditorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_error_names_path_and_cause() {
        let err = EditorError::Read {
            path: PathBuf::from("/missing/file.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file"),
        };
        let msg = err.to_string();
        assert!(msg.contains("file.txt"), "{msg}");
        assert!(msg.contains("No such file"), "{msg}");
    }

    #[test]
    fn win32_error_formats_code_as_hex() {
        let err = EditorError::Win32 {
            function: "CreateWindowExW",
            code: 5,
        };
        assert_eq!(err.to_string(), "CreateWindowExW failed (error 0x00000005)");
    }
}
