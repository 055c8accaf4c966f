//! Edit session: committed base image, undo/redo history, and live preview.
//!
//! Three buffers are kept per loaded image:
//! - `clean`: identical to what is on disk (replaced on load and on save)
//! - `base`: every committed edit applied; the entry under the history cursor
//! - `display`: `base` with the live adjustments rendered on top
//!
//! `display` is only ever written by [`EditSession::recompute`].

use crate::config::{EditorConfig, MIN_CROP_SIZE};
use crate::error::{DecodeError, SaveError};
use crate::image_loader;
use crate::state::adjustments::{LiveAdjustments, LiveParameter};
use crate::state::history::HistoryStack;
use crate::transforms::{self, CropRect};
use image::RgbImage;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

struct LoadedImage {
    clean: RgbImage,
    base: RgbImage,
    display: RgbImage,
    source_path: Option<PathBuf>,
}

pub struct EditSession {
    image: Option<LoadedImage>,
    history: HistoryStack<RgbImage>,
    live: LiveAdjustments,
    /// History index of a grayscale toggle that has not been followed by anything else.
    grayscale_commit: Option<usize>,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditSession {
    pub fn new(config: EditorConfig) -> Self {
        let config = config.normalized();
        Self {
            image: None,
            history: HistoryStack::new(config.history_limit),
            live: LiveAdjustments::default(),
            grayscale_commit: None,
        }
    }

    /// Decodes `bytes` and starts a fresh session on it.
    ///
    /// On failure the current session is left untouched. A session loaded
    /// this way has no path, so [`save`](Self::save) needs [`save_as`](Self::save_as).
    pub fn load(&mut self, bytes: &[u8]) -> Result<(), DecodeError> {
        let decoded = image_loader::decode_image(bytes)?;
        self.install(decoded, None);
        Ok(())
    }

    /// Reads and decodes `path`, remembering it as the save destination.
    pub fn load_file(&mut self, path: &Path) -> Result<(), DecodeError> {
        let decoded = image_loader::load_image_blocking(path)?;
        self.install(decoded, Some(path.to_path_buf()));
        Ok(())
    }

    fn install(&mut self, decoded: RgbImage, source_path: Option<PathBuf>) {
        info!(
            "Loaded {}x{} image{}",
            decoded.width(),
            decoded.height(),
            source_path
                .as_ref()
                .map(|p| format!(" from {}", p.display()))
                .unwrap_or_default()
        );

        self.history.reset(decoded.clone());
        self.live.reset();
        self.grayscale_commit = None;
        self.image = Some(LoadedImage {
            clean: decoded.clone(),
            display: decoded.clone(),
            base: decoded,
            source_path,
        });
        self.recompute();
    }

    /// Re-derives `display` from `base` and the live adjustments.
    pub fn recompute(&mut self) {
        if let Some(image) = self.image.as_mut() {
            image.display = self.live.render(&image.base);
        }
    }

    /// Commits `produce(base)` as the new base.
    ///
    /// Drops any redo suffix, records the result in history, resets the live
    /// adjustments and re-renders. Returns `false` when nothing is loaded.
    pub fn commit_edit_action<F>(&mut self, produce: F) -> bool
    where
        F: FnOnce(&RgbImage) -> RgbImage,
    {
        let Some(image) = self.image.as_ref() else {
            debug!("Ignoring edit: no image loaded");
            return false;
        };
        let new_base = produce(&image.base);
        self.push_base(new_base);
        true
    }

    /// Commits the current `display` (base plus live adjustments) as the new base.
    pub fn commit_live_adjustment(&mut self) -> bool {
        let Some(image) = self.image.as_ref() else {
            debug!("Ignoring commit: no image loaded");
            return false;
        };
        let new_base = image.display.clone();
        self.push_base(new_base);
        true
    }

    fn push_base(&mut self, new_base: RgbImage) {
        let Some(image) = self.image.as_mut() else {
            return;
        };
        self.history.push(new_base.clone());
        image.base = new_base;
        self.live.reset();
        self.grayscale_commit = None;
        self.recompute();
        debug!(
            "Committed edit, history {}/{}",
            self.history.cursor().map_or(0, |c| c + 1),
            self.history.len()
        );
    }

    /// Updates one live control and re-renders. History is not touched.
    pub fn set_live_parameter(&mut self, param: LiveParameter) {
        self.live.set(param);
        self.recompute();
    }

    /// Flips grayscale.
    ///
    /// Turning it on commits immediately. Turning it off straight after that
    /// commit steps the cursor back to the colour snapshot without adding an
    /// entry, leaving the grayscale snapshot as the redo target.
    pub fn toggle_grayscale(&mut self) {
        if self.image.is_none() {
            debug!("Ignoring grayscale toggle: no image loaded");
            return;
        }

        if self.grayscale_commit.is_some() && self.grayscale_commit == self.history.cursor() {
            self.grayscale_commit = None;
            if self.undo() {
                debug!("Grayscale off, restored colour snapshot");
            } else {
                warn!("Grayscale off: colour snapshot no longer in history");
            }
            return;
        }

        self.live.grayscale = !self.live.grayscale;
        self.recompute();

        if self.live.grayscale {
            self.commit_live_adjustment();
            self.grayscale_commit = self.history.cursor();
        }
    }

    /// Whether grayscale is currently applied, live or as the latest toggle commit.
    pub fn is_grayscale(&self) -> bool {
        self.live.grayscale
            || (self.grayscale_commit.is_some() && self.grayscale_commit == self.history.cursor())
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo().cloned() {
            Some(entry) => {
                self.restore(entry);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo().cloned() {
            Some(entry) => {
                self.restore(entry);
                true
            }
            None => false,
        }
    }

    fn restore(&mut self, entry: RgbImage) {
        let Some(image) = self.image.as_mut() else {
            return;
        };
        image.display = entry.clone();
        image.base = entry;
        self.live.reset();
        self.grayscale_commit = None;
        self.recompute();
        debug!(
            "History moved to {}/{}",
            self.history.cursor().map_or(0, |c| c + 1),
            self.history.len()
        );
    }

    /// Throws away all edits and history, starting again from `clean`.
    pub fn reset_to_clean(&mut self) -> bool {
        let Some(image) = self.image.as_mut() else {
            return false;
        };
        image.base = image.clean.clone();
        self.history.reset(image.clean.clone());
        self.live.reset();
        self.grayscale_commit = None;
        self.recompute();
        info!("Edits reset");
        true
    }

    /// Writes `display` back to the loaded path and adopts it as `clean`.
    pub fn save(&mut self) -> Result<(), SaveError> {
        let image = self.image.as_mut().ok_or(SaveError::NothingLoaded)?;
        let path = image.source_path.as_deref().ok_or(SaveError::NoDestination)?;

        image_loader::encode_image(&image.display, path)?;
        image.clean = image.display.clone();
        info!("Saved: {}", path.display());
        Ok(())
    }

    /// Writes `display` to `path`. The session keeps its loaded path and `clean` image.
    pub fn save_as(&self, path: &Path) -> Result<(), SaveError> {
        let image = self.image.as_ref().ok_or(SaveError::NothingLoaded)?;
        image_loader::encode_image(&image.display, path)?;
        info!("Saved As: {}", path.display());
        Ok(())
    }

    pub fn rotate(&mut self) -> bool {
        self.commit_edit_action(transforms::rotate90)
    }

    pub fn sharpen(&mut self) -> bool {
        self.commit_edit_action(transforms::sharpen)
    }

    /// Crops the base image to `rect`.
    ///
    /// The rectangle is clamped to the image first; selections not larger than
    /// `MIN_CROP_SIZE` in both dimensions are ignored.
    pub fn crop(&mut self, rect: CropRect) -> bool {
        let Some((width, height)) = self.dimensions() else {
            return false;
        };
        let Some(clamped) = rect.clamped(width, height) else {
            debug!("Crop {:?} lies outside the image", rect);
            return false;
        };
        if clamped.width <= MIN_CROP_SIZE || clamped.height <= MIN_CROP_SIZE {
            debug!("Crop {:?} too small", clamped);
            return false;
        }
        self.commit_edit_action(|base| transforms::crop(base, clamped))
    }

    pub fn is_loaded(&self) -> bool {
        self.image.is_some()
    }

    pub fn display(&self) -> Option<&RgbImage> {
        self.image.as_ref().map(|image| &image.display)
    }

    pub fn base(&self) -> Option<&RgbImage> {
        self.image.as_ref().map(|image| &image.base)
    }

    pub fn clean(&self) -> Option<&RgbImage> {
        self.image.as_ref().map(|image| &image.clean)
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.image.as_ref().and_then(|image| image.source_path.as_deref())
    }

    /// Dimensions of the committed base image.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.base().map(|base| base.dimensions())
    }

    pub fn live(&self) -> &LiveAdjustments {
        &self.live
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn history_index(&self) -> Option<usize> {
        self.history.cursor()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }
}
