pub mod image_io;
pub mod rawi;
pub mod region;

use std::path::Path;

use ndarray::Array2;

use crate::consts::{Intensity, RAWI_EXTENSION};
use crate::error::Result;

/// True when `path` carries the raw-intensity extension.
pub fn is_rawi_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(RAWI_EXTENSION))
}

/// Load intensities from `.rawi` or any raster format the `image` crate decodes.
pub fn read_intensities(path: &Path) -> Result<Array2<Intensity>> {
    if is_rawi_path(path) {
        rawi::read_rawi(path)
    } else {
        image_io::load_raster(path)
    }
}
