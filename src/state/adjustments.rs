//! Live (uncommitted) slider adjustments and the display pipeline.
//!
//! These values only ever shape the preview. They become part of the image
//! when the session commits the composed result, at which point they reset.

use crate::config::{BRIGHTNESS_RANGE, CONTRAST_RANGE, MAX_BLUR, SATURATION_RANGE};
use crate::transforms;
use image::RgbImage;
use log::debug;

/// Neutral contrast gain.
pub const NEUTRAL_CONTRAST: f64 = 1.0;

/// The live adjustment controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiveAdjustments {
    /// Offset added to every channel (-100 to +100). 0 = no adjustment.
    pub brightness: i32,
    /// Multiplicative gain (0.0 to 3.0). 1.0 = no adjustment.
    pub contrast: f64,
    /// Offset added to HSV saturation (-100 to +100). 0 = no adjustment.
    pub saturation: i32,
    /// Blur kernel-size hint (0 to 10). 0 = no blur.
    pub blur: u32,
    pub grayscale: bool,
}

impl Default for LiveAdjustments {
    fn default() -> Self {
        Self {
            brightness: 0,
            contrast: NEUTRAL_CONTRAST,
            saturation: 0,
            blur: 0,
            grayscale: false,
        }
    }
}

/// One slider-driven parameter with its new value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiveParameter {
    Brightness(i32),
    Contrast(f64),
    Saturation(i32),
    Blur(u32),
}

impl LiveAdjustments {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when every control sits at its neutral value.
    pub fn is_unedited(&self) -> bool {
        *self == Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Stores `param`, clamped to its slider range.
    pub fn set(&mut self, param: LiveParameter) {
        match param {
            LiveParameter::Brightness(value) => {
                self.brightness = value.clamp(BRIGHTNESS_RANGE.0, BRIGHTNESS_RANGE.1);
            }
            LiveParameter::Contrast(value) => {
                let value = if value.is_nan() { NEUTRAL_CONTRAST } else { value };
                self.contrast = value.clamp(CONTRAST_RANGE.0, CONTRAST_RANGE.1);
            }
            LiveParameter::Saturation(value) => {
                self.saturation = value.clamp(SATURATION_RANGE.0, SATURATION_RANGE.1);
            }
            LiveParameter::Blur(value) => {
                self.blur = value.min(MAX_BLUR);
            }
        }
    }

    /// Composes the display image from `base`.
    ///
    /// Stage order is saturation, brightness/contrast, blur, grayscale. A stage
    /// at its neutral value is skipped, so all-default controls return an exact
    /// copy of `base`.
    pub fn render(&self, base: &RgbImage) -> RgbImage {
        let mut result = base.clone();

        if self.saturation != 0 {
            result = transforms::adjust_saturation(&result, self.saturation);
        }
        if self.contrast != NEUTRAL_CONTRAST || self.brightness != 0 {
            result = transforms::adjust_brightness_contrast(&result, self.contrast, self.brightness);
        }
        if self.blur > 0 {
            result = transforms::apply_blur(&result, self.blur);
        }
        if self.grayscale {
            result = transforms::to_grayscale(&result);
        }

        debug!("Rendered display with {:?}", self);
        result
    }
}
