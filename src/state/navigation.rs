//! Directory listing with a wrap-around cursor.

use crate::error::NavigationError;
use crate::file_utils::{self, PathExt};
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// Direction for navigation through images.
#[derive(Debug, Clone, Copy)]
enum Direction {
    Next,
    Previous,
}

/// Sorted sibling images of the opened path and the current position among them.
#[derive(Debug, Default)]
pub struct DirectoryLister {
    current_directory: Option<PathBuf>,
    image_files: Vec<PathBuf>,
    current_index: Option<usize>,
}

impl DirectoryLister {
    /// Creates a new empty lister.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans the directory of `path` (or `path` itself if it is a directory).
    ///
    /// Opening a file places the cursor on it; opening a directory places it
    /// on the first entry. On failure the previous listing is kept.
    pub fn open(&mut self, path: &Path) -> Result<(), NavigationError> {
        let start = std::time::Instant::now();
        debug!("Starting directory scan for: {:?}", path);

        if !path.exists() {
            warn!("Cannot open missing path {:?}", path);
            return Err(NavigationError::PathNotFound(path.to_path_buf()));
        }

        let is_dir = path.is_dir();
        let directory = if is_dir {
            path.to_path_buf()
        } else {
            match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            }
        };

        let files = file_utils::scan_directory(&directory)?;
        if files.is_empty() {
            warn!("No supported images in {:?}", directory);
            return Err(NavigationError::EmptyDirectory(directory));
        }

        let index = if is_dir {
            0
        } else {
            Self::position_of(&files, path).unwrap_or(0)
        };

        debug!(
            "Completed scan of {:?}: {} images in {:?}",
            directory,
            files.len(),
            start.elapsed()
        );

        self.current_directory = Some(directory);
        self.image_files = files;
        self.current_index = Some(index);
        Ok(())
    }

    /// Finds `path` in the listing, comparing by name when the spelling differs.
    fn position_of(files: &[PathBuf], path: &Path) -> Option<usize> {
        files.iter().position(|p| p == path).or_else(|| {
            let name = path.file_name()?;
            files.iter().position(|p| p.file_name() == Some(name))
        })
    }

    /// Moves the cursor one step with wrap-around and returns the new entry.
    fn navigate_to(&mut self, direction: Direction) -> Option<PathBuf> {
        if self.image_files.is_empty() {
            warn!("No images available for navigation");
            return None;
        }

        let len = self.image_files.len();
        let new_index = match (direction, self.current_index) {
            (Direction::Next, Some(index)) => (index + 1) % len,
            (Direction::Previous, Some(index)) => (index + len - 1) % len,
            (Direction::Next, None) => 0,
            (Direction::Previous, None) => len - 1,
        };

        self.current_index = Some(new_index);
        let path = self.image_files[new_index].clone();
        debug!("Navigated {:?} to {}", direction, path.format_for_log());
        Some(path)
    }

    /// Advances to the next image, wrapping to the first after the last.
    pub fn next(&mut self) -> Option<PathBuf> {
        self.navigate_to(Direction::Next)
    }

    /// Steps back to the previous image, wrapping to the last before the first.
    pub fn previous(&mut self) -> Option<PathBuf> {
        self.navigate_to(Direction::Previous)
    }

    /// Returns the current entry.
    pub fn current(&self) -> Option<PathBuf> {
        self.current_index
            .and_then(|index| self.image_files.get(index))
            .cloned()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn current_directory(&self) -> Option<&Path> {
        self.current_directory.as_deref()
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.image_files
    }

    pub fn image_count(&self) -> usize {
        self.image_files.len()
    }
}
