//! Codec boundary: bytes or files in, RGB8 pixel buffers out, and back.
//!
//! Every buffer handled by the editor is normalised to `RgbImage` on decode,
//! so alpha channels and higher bit depths are flattened here.

use crate::error::{DecodeError, SaveError};
use image::RgbImage;
use log::debug;
use std::path::Path;

/// Decodes an encoded image held in memory. The format is guessed from the data.
pub fn decode_image(bytes: &[u8]) -> Result<RgbImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }

    // 拡張子ではなくデータ先頭からフォーマットを判定する
    let image = image::load_from_memory(bytes)?;
    debug!(
        "Decoded {}x{} image ({:?})",
        image.width(),
        image.height(),
        image.color()
    );
    Ok(image.to_rgb8())
}

/// Reads and decodes an image file on the calling thread.
pub fn load_image_blocking(path: &Path) -> Result<RgbImage, DecodeError> {
    let bytes = std::fs::read(path).map_err(|source| DecodeError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    decode_image(&bytes)
}

/// Encodes `image` to `path`; the format follows the file extension.
pub fn encode_image(image: &RgbImage, path: &Path) -> Result<(), SaveError> {
    image.save(path).map_err(|source| SaveError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        "Wrote {}x{} image to {}",
        image.width(),
        image.height(),
        path.display()
    );
    Ok(())
}
