//! Service coordinating directory navigation with the edit session.
//!
//! The lister decides which file is current; the session only ever receives
//! that path by value and loads it.

use crate::config::EditorConfig;
use crate::error::{AppError, NavigationError, Result};
use crate::file_utils::PathExt;
use crate::state::{DirectoryLister, EditSession, LiveParameter};
use crate::transforms::CropRect;
use log::{error, info};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// A single user command against the viewer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditCommand {
    Next,
    Previous,
    Rotate,
    Sharpen,
    Grayscale,
    Crop(CropRect),
    Live(LiveParameter),
    /// Commits the live adjustments (slider release).
    Commit,
    Undo,
    Redo,
    Reset,
    Save,
}

impl FromStr for EditCommand {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || AppError::InvalidCommand(s.to_string());
        let (name, value) = match s.split_once('=') {
            Some((name, value)) => (name.trim(), Some(value.trim())),
            None => (s.trim(), None),
        };

        let command = match (name.to_lowercase().as_str(), value) {
            ("next", None) => EditCommand::Next,
            ("prev" | "previous", None) => EditCommand::Previous,
            ("rotate", None) => EditCommand::Rotate,
            ("sharpen", None) => EditCommand::Sharpen,
            ("grayscale", None) => EditCommand::Grayscale,
            ("commit", None) => EditCommand::Commit,
            ("undo", None) => EditCommand::Undo,
            ("redo", None) => EditCommand::Redo,
            ("reset", None) => EditCommand::Reset,
            ("save", None) => EditCommand::Save,
            ("brightness", Some(v)) => {
                EditCommand::Live(LiveParameter::Brightness(v.parse().map_err(|_| invalid())?))
            }
            ("contrast", Some(v)) => {
                EditCommand::Live(LiveParameter::Contrast(v.parse().map_err(|_| invalid())?))
            }
            ("saturation", Some(v)) => {
                EditCommand::Live(LiveParameter::Saturation(v.parse().map_err(|_| invalid())?))
            }
            ("blur", Some(v)) => {
                EditCommand::Live(LiveParameter::Blur(v.parse().map_err(|_| invalid())?))
            }
            ("crop", Some(v)) if v.contains(':') => {
                let (a, b) = v.split_once(':').ok_or_else(invalid)?;
                let corner = |point: &str| -> Result<(i32, i32)> {
                    let (x, y) = point.split_once(',').ok_or_else(invalid)?;
                    Ok((
                        x.trim().parse().map_err(|_| invalid())?,
                        y.trim().parse().map_err(|_| invalid())?,
                    ))
                };
                EditCommand::Crop(CropRect::from_corners(corner(a)?, corner(b)?))
            }
            ("crop", Some(v)) => {
                let parts: Vec<&str> = v.split(',').map(str::trim).collect();
                let [x, y, w, h] = parts.as_slice() else {
                    return Err(invalid());
                };
                EditCommand::Crop(CropRect::new(
                    x.parse().map_err(|_| invalid())?,
                    y.parse().map_err(|_| invalid())?,
                    w.parse().map_err(|_| invalid())?,
                    h.parse().map_err(|_| invalid())?,
                ))
            }
            _ => return Err(invalid()),
        };
        Ok(command)
    }
}

/// Owns the directory lister and the edit session for one viewer window.
pub struct ViewerService {
    lister: DirectoryLister,
    session: EditSession,
}

impl Default for ViewerService {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl ViewerService {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            lister: DirectoryLister::new(),
            session: EditSession::new(config),
        }
    }

    /// Scans the directory of `path` and loads the selected image.
    pub fn open(&mut self, path: &Path) -> Result<PathBuf> {
        self.lister.open(path)?;
        self.load_current()
    }

    /// Moves to the next sibling and loads it.
    pub fn next(&mut self) -> Result<PathBuf> {
        self.lister.next().ok_or(NavigationError::NoCurrentPath)?;
        self.load_current()
    }

    /// Moves to the previous sibling and loads it.
    pub fn previous(&mut self) -> Result<PathBuf> {
        self.lister.previous().ok_or(NavigationError::NoCurrentPath)?;
        self.load_current()
    }

    fn load_current(&mut self) -> Result<PathBuf> {
        let path = self.lister.current().ok_or(NavigationError::NoCurrentPath)?;
        if let Err(e) = self.session.load_file(&path) {
            error!("Failed to load {}: {}", path.format_for_log(), e);
            return Err(e.into());
        }
        Ok(path)
    }

    /// Runs one command. Edits on an unloaded session are silently ignored.
    pub fn apply(&mut self, command: EditCommand) -> Result<()> {
        info!("Applying {:?}", command);
        match command {
            EditCommand::Next => {
                self.next()?;
            }
            EditCommand::Previous => {
                self.previous()?;
            }
            EditCommand::Rotate => {
                self.session.rotate();
            }
            EditCommand::Sharpen => {
                self.session.sharpen();
            }
            EditCommand::Grayscale => self.session.toggle_grayscale(),
            EditCommand::Crop(rect) => {
                self.session.crop(rect);
            }
            EditCommand::Live(param) => self.session.set_live_parameter(param),
            EditCommand::Commit => {
                self.session.commit_live_adjustment();
            }
            EditCommand::Undo => {
                self.session.undo();
            }
            EditCommand::Redo => {
                self.session.redo();
            }
            EditCommand::Reset => {
                self.session.reset_to_clean();
            }
            EditCommand::Save => self.session.save()?,
        }
        Ok(())
    }

    /// `File: <name> | Res: <w>x<h>` for the current image.
    pub fn status_line(&self) -> Option<String> {
        let path = self.session.source_path()?;
        let (width, height) = self.session.dimensions()?;
        Some(format!(
            "File: {} | Res: {}x{}",
            path.format_for_log(),
            width,
            height
        ))
    }

    pub fn lister(&self) -> &DirectoryLister {
        &self.lister
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_commands() {
        assert_eq!("rotate".parse::<EditCommand>().unwrap(), EditCommand::Rotate);
        assert_eq!("PREV".parse::<EditCommand>().unwrap(), EditCommand::Previous);
        assert_eq!("undo".parse::<EditCommand>().unwrap(), EditCommand::Undo);
    }

    #[test]
    fn test_parse_valued_commands() {
        assert_eq!(
            "brightness=-40".parse::<EditCommand>().unwrap(),
            EditCommand::Live(LiveParameter::Brightness(-40))
        );
        assert_eq!(
            "contrast = 1.5".parse::<EditCommand>().unwrap(),
            EditCommand::Live(LiveParameter::Contrast(1.5))
        );
        assert_eq!(
            "crop=5,-2,40,30".parse::<EditCommand>().unwrap(),
            EditCommand::Crop(CropRect::new(5, -2, 40, 30))
        );
    }

    #[test]
    fn test_parse_crop_corners_in_any_order() {
        assert_eq!(
            "crop=40,30:10,5".parse::<EditCommand>().unwrap(),
            EditCommand::Crop(CropRect::new(10, 5, 30, 25))
        );
        assert_eq!(
            "crop = -4, 2 : 6, 12".parse::<EditCommand>().unwrap(),
            EditCommand::Crop(CropRect::new(-4, 2, 10, 10))
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["spin", "blur", "blur=-1", "rotate=3", "crop=1,2,3", "crop=1,2:3", "crop=a,b:1,1", "saturation=lots"] {
            assert!(
                matches!(bad.parse::<EditCommand>(), Err(AppError::InvalidCommand(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_navigation_without_listing_fails() {
        let mut service = ViewerService::default();
        assert!(matches!(
            service.next(),
            Err(AppError::Navigation(NavigationError::NoCurrentPath))
        ));
        assert!(service.status_line().is_none());
    }

    #[test]
    fn test_edits_without_image_are_ignored() {
        let mut service = ViewerService::default();
        service.apply(EditCommand::Rotate).unwrap();
        service.apply(EditCommand::Undo).unwrap();
        assert!(!service.session().is_loaded());
    }
}
