use crate::config::SUPPORTED_IMAGE_EXTENSIONS;
use crate::error::NavigationError;
use std::fs;
use std::path::{Path, PathBuf};

/// Returns true when the path carries one of the supported image extensions (case-insensitive).
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext_str| SUPPORTED_IMAGE_EXTENSIONS.contains(&ext_str.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Lists the supported images directly inside `dir`, sorted by path.
///
/// Subdirectories are not descended into.
pub fn scan_directory(dir: &Path) -> Result<Vec<PathBuf>, NavigationError> {
    let entries = fs::read_dir(dir).map_err(|source| NavigationError::DirectoryScanFailed {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut image_files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_supported_image(path))
        .collect();

    image_files.sort();
    Ok(image_files)
}

/// Log-friendly path rendering.
pub trait PathExt {
    /// File name only, falling back to the full path.
    fn format_for_log(&self) -> String;
}

impl PathExt for Path {
    fn format_for_log(&self) -> String {
        self.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_supported_image_ignores_case() {
        assert!(is_supported_image(Path::new("a/photo.JPG")));
        assert!(is_supported_image(Path::new("scan.TiFf")));
        assert!(is_supported_image(Path::new("x.webp")));
        assert!(!is_supported_image(Path::new("anim.gif")));
        assert!(!is_supported_image(Path::new("README")));
        assert!(!is_supported_image(Path::new(".png")));
    }

    #[test]
    fn test_scan_directory_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["c.png", "a.JPG", "notes.txt", "b.bmp", "clip.gif"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        fs::create_dir(dir.path().join("nested.png")).unwrap();

        let files = scan_directory(dir.path()).unwrap();
        let names: Vec<_> = files.iter().map(|p| p.format_for_log()).collect();
        assert_eq!(names, vec!["a.JPG", "b.bmp", "c.png"]);
    }

    #[test]
    fn test_scan_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        assert!(matches!(
            scan_directory(&missing),
            Err(NavigationError::DirectoryScanFailed { .. })
        ));
    }
}
