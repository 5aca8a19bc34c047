use std::path::Path;

use image::{DynamicImage, GrayImage, ImageFormat};
use ndarray::{Array2, ArrayView2};
use tracing::debug;

use crate::consts::{Intensity, MAX_8BIT_INTENSITY};
use crate::error::{Result, SpeckleError};

/// Decode a single-channel raster (TIFF, PNG, ...) into intensities.
///
/// 8-bit and 16-bit grayscale images keep their raw integer levels
/// (0..=255 and 0..=65535). Anything else is converted to 8-bit luma.
pub fn load_raster(path: &Path) -> Result<Array2<Intensity>> {
    let img = image::open(path)?;
    let data = match img {
        DynamicImage::ImageLuma16(gray) => {
            let (w, h) = gray.dimensions();
            Array2::from_shape_vec(
                (h as usize, w as usize),
                gray.into_raw().into_iter().map(Intensity::from).collect(),
            )
        }
        other => {
            let gray = other.to_luma8();
            let (w, h) = gray.dimensions();
            Array2::from_shape_vec(
                (h as usize, w as usize),
                gray.into_raw().into_iter().map(Intensity::from).collect(),
            )
        }
    }
    .map_err(|e| SpeckleError::Format(e.to_string()))?;

    debug!(
        path = %path.display(),
        width = data.ncols(),
        height = data.nrows(),
        "Decoded raster"
    );
    Ok(data)
}

/// Quantize to 8 bits: clamp to `[0, 255]` and truncate the fraction.
pub fn to_8bit(value: Intensity) -> u8 {
    value.clamp(0.0, MAX_8BIT_INTENSITY) as u8
}

/// Save intensities as an 8-bit grayscale raster. The format follows the
/// file extension; unknown extensions are written as TIFF.
pub fn save_8bit(path: &Path, data: &ArrayView2<'_, Intensity>) -> Result<()> {
    let (h, w) = data.dim();
    let pixels: Vec<u8> = data.iter().map(|&v| to_8bit(v)).collect();
    let img = GrayImage::from_raw(w as u32, h as u32, pixels).ok_or_else(|| {
        SpeckleError::Format(format!("Buffer does not match {w}x{h} image"))
    })?;

    let format = ImageFormat::from_path(path).unwrap_or(ImageFormat::Tiff);
    img.save_with_format(path, format)?;
    debug!(
        path = %path.display(),
        width = w,
        height = h,
        ?format,
        "Wrote 8-bit raster"
    );
    Ok(())
}
