// ── Window title ──────────────────────────────────────────────────────────────

use std::path::Path;

/// Application name shown in every title.
pub const APP_NAME: &str = "Notepad Dark";

/// Compute the main window title from the bound path and the dirty flag.
///
/// | State | Title |
/// |---|---|
/// | No path, clean | `"Notepad Dark"` |
/// | Path set, clean | `"notes.txt \| Notepad Dark"` |
/// | Path set, dirty | `"*notes.txt \| Notepad Dark"` |
/// | No path, dirty | `"*Notepad Dark"` |
pub fn window_title(path: Option<&Path>, dirty: bool) -> String {
    let base = match path {
        Some(p) => {
            let name = p
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| p.display().to_string());
            format!("{name} | {APP_NAME}")
        }
        None => APP_NAME.to_owned(),
    };
    if dirty {
        format!("*{base}")
    } else {
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_untitled() {
        assert_eq!(window_title(None, false), "Notepad Dark");
    }

    #[test]
    fn dirty_untitled() {
        assert_eq!(window_title(None, true), "*Notepad Dark");
    }

    #[test]
    fn clean_with_path_uses_file_name_only() {
        let p = Path::new("/home/me/notes/todo.txt");
        assert_eq!(window_title(Some(p), false), "todo.txt | Notepad Dark");
    }

    #[test]
    fn dirty_with_path() {
        let p = Path::new("/tmp/a.txt");
        assert_eq!(window_title(Some(p), true), "*a.txt | Notepad Dark");
    }

    #[test]
    fn path_without_file_name_falls_back_to_whole_path() {
        let p = Path::new("/");
        assert_eq!(window_title(Some(p), false), "/ | Notepad Dark");
    }
}
