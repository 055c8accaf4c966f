//! Application configuration constants and editor settings.

use serde::Deserialize;
use std::path::Path;

/// Supported image file extensions for scanning directories.
pub const SUPPORTED_IMAGE_EXTENSIONS: [&str; 7] =
    ["jpg", "jpeg", "png", "bmp", "tif", "tiff", "webp"];

/// Brightness offset range added to every channel.
pub const BRIGHTNESS_RANGE: (i32, i32) = (-100, 100);

/// Contrast gain range. The neutral gain is 1.0.
pub const CONTRAST_RANGE: (f64, f64) = (0.0, 3.0);

/// Saturation offset range applied to the HSV saturation channel.
pub const SATURATION_RANGE: (i32, i32) = (-100, 100);

/// Maximum blur kernel-size hint.
pub const MAX_BLUR: u32 = 10;

/// A crop selection must be strictly larger than this in both dimensions.
pub const MIN_CROP_SIZE: u32 = 10;

/// Number of snapshots kept in the undo/redo history by default.
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Smallest usable history: the current snapshot plus the one before it.
pub const MIN_HISTORY_LIMIT: usize = 2;

/// Tunable editor settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum number of full-image snapshots retained in history.
    pub history_limit: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl EditorConfig {
    /// Reads settings from a JSON file. Missing keys fall back to defaults.
    pub fn from_json_file(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config.normalized())
    }

    /// History must keep one step back from the latest commit.
    pub fn normalized(self) -> Self {
        Self {
            history_limit: self.history_limit.max(MIN_HISTORY_LIMIT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_keys_missing() {
        let config: EditorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn test_from_json_file_raises_small_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("editor.json");
        std::fs::write(&path, r#"{ "history_limit": 0 }"#).unwrap();

        let config = EditorConfig::from_json_file(&path).unwrap();
        assert_eq!(config.history_limit, MIN_HISTORY_LIMIT);

        let one = EditorConfig { history_limit: 1 }.normalized();
        assert_eq!(one.history_limit, MIN_HISTORY_LIMIT);
    }

    #[test]
    fn test_from_json_file_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("editor.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(EditorConfig::from_json_file(&path).is_err());
    }
}
