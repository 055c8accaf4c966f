//! Unified error types for the image viewer core.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn a source into pixels. Session state is never altered.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Error loading image: no data")]
    Empty,

    #[error("Error loading image: cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Error loading image: {0}")]
    Image(#[from] image::ImageError),
}

/// Failure to write the composed image. History is never altered.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("No image loaded")]
    NothingLoaded,

    #[error("No destination path for the current image")]
    NoDestination,

    #[error("Failed to save {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },
}

/// Directory scanning and navigation errors.
#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("Path does not exist: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("No supported images in {}", .0.display())]
    EmptyDirectory(PathBuf),

    #[error("Failed to scan {}: {source}", .path.display())]
    DirectoryScanFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("No current image")]
    NoCurrentPath,
}

/// Application-level errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Save(#[from] SaveError),

    #[error(transparent)]
    Navigation(#[from] NavigationError),

    #[error("Invalid edit command `{0}`")]
    InvalidCommand(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Type alias for Results in this application.
pub type Result<T> = std::result::Result<T, AppError>;
