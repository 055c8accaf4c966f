//! Pure pixel transforms used by the edit pipeline.
//!
//! Each function takes the source buffer by reference and returns a new one;
//! nothing here mutates its input. Geometry and convolution are delegated to
//! `image::imageops`; per-pixel tone maps run in parallel with rayon.

use image::{DynamicImage, RgbImage, imageops};
use rayon::prelude::*;

/// 3x3 sharpen kernel (centre-weighted Laplacian).
const SHARPEN_KERNEL: [f32; 9] = [0.0, -1.0, 0.0, -1.0, 5.0, -1.0, 0.0, -1.0, 0.0];

/// Axis-aligned selection in image coordinates. The origin may lie outside the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds the rectangle spanned by two opposite corners, in either order.
    pub fn from_corners(a: (i32, i32), b: (i32, i32)) -> Self {
        let x = a.0.min(b.0);
        let y = a.1.min(b.1);
        Self {
            x,
            y,
            width: a.0.abs_diff(b.0),
            height: a.1.abs_diff(b.1),
        }
    }

    /// Intersects the rectangle with a `width` x `height` image.
    ///
    /// Returns `None` when the intersection is empty.
    pub fn clamped(&self, width: u32, height: u32) -> Option<CropRect> {
        let left = i64::from(self.x).max(0);
        let top = i64::from(self.y).max(0);
        let right = (i64::from(self.x) + i64::from(self.width)).min(i64::from(width));
        let bottom = (i64::from(self.y) + i64::from(self.height)).min(i64::from(height));

        if right <= left || bottom <= top {
            return None;
        }

        Some(CropRect {
            x: left as i32,
            y: top as i32,
            width: (right - left) as u32,
            height: (bottom - top) as u32,
        })
    }
}

fn saturate_u8(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Applies `alpha * v + beta` to every channel, saturating to 0..=255.
pub fn adjust_brightness_contrast(src: &RgbImage, alpha: f64, beta: i32) -> RgbImage {
    let mut dst = src.clone();
    let subpixels: &mut [u8] = &mut dst;
    let beta = f64::from(beta);
    subpixels
        .par_iter_mut()
        .for_each(|v| *v = saturate_u8(alpha * f64::from(*v) + beta));
    dst
}

/// Adds `delta` to the HSV saturation channel (0..=255 scale) of every pixel.
pub fn adjust_saturation(src: &RgbImage, delta: i32) -> RgbImage {
    let mut dst = src.clone();
    let subpixels: &mut [u8] = &mut dst;
    subpixels.par_chunks_mut(3).for_each(|px| {
        let (h, s, v) = rgb_to_hsv([px[0], px[1], px[2]]);
        let s = ((s * 255.0).round() + delta as f32).clamp(0.0, 255.0) / 255.0;
        px.copy_from_slice(&hsv_to_rgb(h, s, v));
    });
    dst
}

/// Gaussian blur driven by a kernel-size hint. Even sizes round up to the next odd size.
pub fn apply_blur(src: &RgbImage, kernel_size: u32) -> RgbImage {
    if kernel_size == 0 {
        return src.clone();
    }
    let k = if kernel_size % 2 == 0 {
        kernel_size + 1
    } else {
        kernel_size
    };
    imageops::blur(src, kernel_sigma(k))
}

/// Sigma used for a `k`-wide Gaussian kernel when no sigma is given.
fn kernel_sigma(k: u32) -> f32 {
    0.3 * ((k as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Luma conversion, kept in three channels.
pub fn to_grayscale(src: &RgbImage) -> RgbImage {
    DynamicImage::ImageLuma8(imageops::grayscale(src)).to_rgb8()
}

/// Rotates 90 degrees clockwise.
pub fn rotate90(src: &RgbImage) -> RgbImage {
    imageops::rotate90(src)
}

pub fn sharpen(src: &RgbImage) -> RgbImage {
    imageops::filter3x3(src, &SHARPEN_KERNEL)
}

/// Crops to `rect` intersected with the image bounds. An empty intersection yields a 0x0 image.
pub fn crop(src: &RgbImage, rect: CropRect) -> RgbImage {
    match rect.clamped(src.width(), src.height()) {
        Some(r) => imageops::crop_imm(src, r.x as u32, r.y as u32, r.width, r.height).to_image(),
        None => RgbImage::new(0, 0),
    }
}

/// RGB to (hue degrees, saturation 0..=1, value 0..=255).
fn rgb_to_hsv(rgb: [u8; 3]) -> (f32, f32, f32) {
    let [r, g, b] = rgb.map(f32::from);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let s = if max > 0.0 { delta / max } else { 0.0 };
    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };

    (h, s, max)
}

fn hsv_to_rgb(h: f32, s: f32, v: f32) -> [u8; 3] {
    let c = v * s;
    let hp = (h / 60.0).rem_euclid(6.0);
    let x = c * (1.0 - (hp.rem_euclid(2.0) - 1.0).abs());
    let (r, g, b) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = v - c;
    [r + m, g + m, b + m].map(|ch| ch.round().clamp(0.0, 255.0) as u8)
}
