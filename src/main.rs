// Release builds run as a GUI application (no console window).
// Debug builds keep the console so that log output is visible.
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use clap::Parser;

use notepad_dark::{cli::CliArgs, logging};

#[cfg(windows)]
fn main() {
    logging::init();
    let args = CliArgs::parse();

    if let Err(e) = notepad_dark::platform::win32::window::run(args.file) {
        // Startup failed before or during the message loop.
        // A GUI subsystem process has no console; the dialog is the only output.
        tracing::error!(error = %e, "fatal");
        notepad_dark::platform::win32::window::show_error_dialog(&e.to_string());
        std::process::exit(1);
    }
}

#[cfg(not(windows))]
fn main() {
    logging::init();
    let args = CliArgs::parse();
    tracing::error!(file = ?args.file, "the notepad-dark window requires Windows");
    std::process::exit(1);
}
