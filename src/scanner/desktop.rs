//! Application descriptor scan.
//!
//! GNOME identifies an application by its desktop-entry id - the `.desktop`
//! file name under the data directories. The scan feeds the app-folder
//! grouping its item list.

use std::collections::BTreeSet;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Directories searched for `.desktop` entries: user-local entries first,
/// then each `XDG_DATA_DIRS` entry, then the system default.
pub fn default_app_dirs() -> Vec<PathBuf> {
    let mut app_dirs = Vec::new();

    if let Some(data_dir) = dirs::data_dir() {
        app_dirs.push(data_dir.join("applications"));
    }

    if let Ok(xdg) = std::env::var("XDG_DATA_DIRS") {
        for entry in xdg.split(':').filter(|e| !e.is_empty()) {
            app_dirs.push(PathBuf::from(entry).join("applications"));
        }
    }

    app_dirs.push(PathBuf::from("/usr/share/applications"));
    app_dirs.dedup();
    app_dirs
}

/// Collect desktop-entry ids from `app_dirs`.
///
/// Ids are sorted and deduplicated so the grouping downstream is
/// deterministic regardless of directory order. Unreadable directories are
/// skipped, not errors - a fresh system may lack the user-local dir
/// entirely.
pub fn scan(app_dirs: &[PathBuf]) -> Vec<String> {
    let mut ids = BTreeSet::new();

    for dir in app_dirs {
        if !dir.is_dir() {
            log::debug!("skipping missing app dir {}", dir.display());
            continue;
        }
        for entry in WalkDir::new(dir)
            .follow_links(true)
            .into_iter()
            .filter_map(Result::ok)
        {
            if !entry.file_type().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy();
            if name.ends_with(".desktop") {
                ids.insert(name.into_owned());
            }
        }
    }

    ids.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn collects_only_desktop_entries_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("kitty.desktop"), "").unwrap();
        fs::write(root.join("firefox.desktop"), "").unwrap();
        fs::write(root.join("mimeinfo.cache"), "").unwrap();
        fs::create_dir(root.join("nested")).unwrap();
        fs::write(root.join("nested").join("code.desktop"), "").unwrap();

        let ids = scan(&[root.to_path_buf()]);
        assert_eq!(ids, ["code.desktop", "firefox.desktop", "kitty.desktop"]);
    }

    #[test]
    fn deduplicates_across_directories() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        fs::write(first.path().join("firefox.desktop"), "").unwrap();
        fs::write(second.path().join("firefox.desktop"), "").unwrap();

        let ids = scan(&[first.path().to_path_buf(), second.path().to_path_buf()]);
        assert_eq!(ids, ["firefox.desktop"]);
    }

    #[test]
    fn missing_directories_are_not_errors() {
        let ids = scan(&[PathBuf::from("/nonexistent/applications")]);
        assert!(ids.is_empty());
    }
}
