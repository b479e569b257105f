// ── Command line ──────────────────────────────────────────────────────────────

use std::path::PathBuf;

use clap::Parser;

/// Notepad Dark command-line arguments
///
/// Examples:
///   notepad-dark                 # Start with an empty, untitled document
///   notepad-dark notes.txt       # Open notes.txt on startup
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "notepad-dark",
    version,
    about = "A minimal dark-themed text editor"
)]
pub struct CliArgs {
    /// Text file to open on startup
    ///
    /// Open failures are reported in an error dialog and the editor starts
    /// with an empty document.
    pub file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_means_no_file() {
        let args = CliArgs::try_parse_from(["notepad-dark"]).expect("parse");
        assert_eq!(args.file, None);
    }

    #[test]
    fn positional_file() {
        let args = CliArgs::try_parse_from(["notepad-dark", "notes.txt"]).expect("parse");
        assert_eq!(args.file, Some(PathBuf::from("notes.txt")));
    }

    #[test]
    fn extra_positional_is_rejected() {
        assert!(CliArgs::try_parse_from(["notepad-dark", "a.txt", "b.txt"]).is_err());
    }
}
