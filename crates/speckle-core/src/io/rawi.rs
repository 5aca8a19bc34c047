//! Raw-intensity (`.rawi`) format: full-precision intensities without the
//! quantization of 8-bit rasters.
//!
//! Layout, little-endian:
//!
//! | bytes  | content                                   |
//! |--------|-------------------------------------------|
//! | 0..4   | `u32` width                               |
//! | 4..8   | `u32` height                              |
//! | 8..    | `width * height` `f64` values, row-major  |

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use memmap2::Mmap;
use ndarray::{Array2, ArrayView2};
use tracing::debug;

use crate::consts::Intensity;
use crate::error::{Result, SpeckleError};

pub const RAWI_HEADER_SIZE: usize = 8;

const BYTES_PER_VALUE: usize = std::mem::size_of::<f64>();

/// Write `data` (shape `(height, width)`) to `path`.
pub fn write_rawi(path: &Path, data: &ArrayView2<'_, Intensity>) -> Result<()> {
    let (height, width) = data.dim();
    let width_u32 = u32::try_from(width)
        .map_err(|_| SpeckleError::Format(format!("Width {width} too large for rawi")))?;
    let height_u32 = u32::try_from(height)
        .map_err(|_| SpeckleError::Format(format!("Height {height} too large for rawi")))?;

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_u32::<LittleEndian>(width_u32)?;
    writer.write_u32::<LittleEndian>(height_u32)?;
    for &value in data.iter() {
        writer.write_f64::<LittleEndian>(value)?;
    }
    writer.flush()?;

    debug!(path = %path.display(), width, height, "Wrote rawi");
    Ok(())
}

/// Read a `.rawi` file into a `(height, width)` array.
pub fn read_rawi(path: &Path) -> Result<Array2<Intensity>> {
    let file = File::open(path)?;
    let mmap = unsafe { Mmap::map(&file)? };
    let data = parse_rawi(&mmap)?;
    debug!(
        path = %path.display(),
        width = data.ncols(),
        height = data.nrows(),
        "Read rawi"
    );
    Ok(data)
}

fn parse_rawi(bytes: &[u8]) -> Result<Array2<Intensity>> {
    if bytes.len() < RAWI_HEADER_SIZE {
        return Err(SpeckleError::Format(
            "File too small for rawi header".into(),
        ));
    }

    let mut cursor = bytes;
    let width = cursor.read_u32::<LittleEndian>()? as usize;
    let height = cursor.read_u32::<LittleEndian>()? as usize;
    if width == 0 || height == 0 {
        return Err(SpeckleError::Format(format!(
            "Invalid rawi dimensions: {width}x{height}"
        )));
    }

    let expected = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(BYTES_PER_VALUE))
        .ok_or_else(|| SpeckleError::Format("rawi dimensions overflow".into()))?;
    if cursor.len() != expected {
        return Err(SpeckleError::Format(format!(
            "rawi payload is {} bytes, expected {expected} for {width}x{height}",
            cursor.len()
        )));
    }

    let mut values = vec![0.0; width * height];
    cursor.read_f64_into::<LittleEndian>(&mut values)?;
    Array2::from_shape_vec((height, width), values)
        .map_err(|e| SpeckleError::Format(e.to_string()))
}
