//! Atomic badge file output.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use super::descriptor::BadgeDescriptor;
use super::error::BadgeError;

/// Write the badge as pretty-printed JSON.
///
/// The document is written to a sibling temporary file and renamed into
/// place, so readers never observe a partial file.
pub fn write_badge(path: &Path, badge: &BadgeDescriptor) -> Result<(), BadgeError> {
    let mut json = serde_json::to_string_pretty(badge)?;
    json.push('\n');

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| write_failed(parent, e))?;
    }

    let tmp_path = temp_path(path);
    if let Err(e) = write_then_rename(&tmp_path, path, json.as_bytes()) {
        fs::remove_file(&tmp_path).ok();
        return Err(write_failed(path, e));
    }

    info!(path = %path.display(), message = %badge.message, "Badge written");
    Ok(())
}

fn write_then_rename(tmp_path: &Path, path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(tmp_path)?;
    file.write_all(contents)?;
    file.sync_all()?;
    fs::rename(tmp_path, path)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_failed(path: &Path, source: io::Error) -> BadgeError {
    BadgeError::WriteFailed {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn badge(message: &str) -> BadgeDescriptor {
        BadgeDescriptor {
            schema_version: 1,
            label: "F-Droid Downloads".to_string(),
            message: message.to_string(),
            color: "blue".to_string(),
            cache_seconds: Some(86_400),
            last_updated: None,
        }
    }

    #[test]
    fn test_write_badge_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fdroid-shield.json");

        write_badge(&path, &badge("1.5k")).unwrap();

        let written: BadgeDescriptor =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, badge("1.5k"));
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn test_write_badge_replaces_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("badge.json");

        write_badge(&path, &badge("1")).unwrap();
        write_badge(&path, &badge("2")).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"message\": \"2\""));
    }

    #[test]
    fn test_write_badge_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("public").join("badges").join("downloads.json");

        write_badge(&path, &badge("0")).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_write_badge_into_missing_file_parent_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "x").unwrap();

        let err = write_badge(&blocker.join("badge.json"), &badge("0")).unwrap_err();
        assert!(matches!(err, BadgeError::WriteFailed { .. }));
    }

    #[test]
    fn test_temp_path_is_sibling() {
        assert_eq!(
            temp_path(Path::new("out/fdroid-shield.json")),
            PathBuf::from("out/fdroid-shield.json.tmp")
        );
    }
}
