//! Pixel intensity container with derived gradient fields.
//!
//! Coordinates run from the top-left corner, x to the right (column) and y
//! down (row). Access is always local: `(0, 0)` is the first stored pixel
//! even when the buffer is a window into a larger image, whose position is
//! kept in `offset_x`/`offset_y`.

use std::path::Path;

use ndarray::{s, ArcArray2, Array2, ArrayView2};
use tracing::debug;

use crate::compute::create_strategy;
use crate::consts::{Intensity, Scalar};
use crate::dual::DualBuffer;
use crate::error::{Result, SpeckleError};
use crate::filters::gauss::GaussMask;
use crate::io::image_io::save_8bit;
use crate::io::rawi::write_rawi;
use crate::io::region::Region;
use crate::io::{is_rawi_path, read_intensities};
use crate::params::{DispatchOptions, ImageParams};

/// A single-channel image: intensities plus lazily computed gradients.
#[derive(Clone, Debug)]
pub struct Image {
    offset_x: usize,
    offset_y: usize,
    width: usize,
    height: usize,
    intensities: DualBuffer<Intensity>,
    grad_x: DualBuffer<Scalar>,
    grad_y: DualBuffer<Scalar>,
    has_gradients: bool,
    gauss_mask: GaussMask,
    params: ImageParams,
}

impl Image {
    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    /// Decode a whole image file (`.rawi` or a raster format).
    pub fn from_file(path: &Path, params: &ImageParams) -> Result<Self> {
        let data = read_intensities(path)?;
        Self::from_storage(data.into_shared(), 0, 0, params)
    }

    /// Decode a file and keep only `region`. The region origin becomes the
    /// image offset. A region outside the decoded extents is a format error.
    pub fn from_file_region(path: &Path, region: &Region, params: &ImageParams) -> Result<Self> {
        let data = read_intensities(path)?;
        let (h, w) = data.dim();
        let r = region
            .validated(w, h)
            .map_err(|e| SpeckleError::Format(format!("{}: {e}", path.display())))?;
        let window = data
            .slice(s![r.y..r.y + r.height, r.x..r.x + r.width])
            .to_owned();
        Self::from_storage(window.into_shared(), r.x, r.y, params)
    }

    /// Take ownership of a row-major intensity array.
    pub fn from_vec(
        intensities: Vec<Intensity>,
        width: usize,
        height: usize,
        params: &ImageParams,
    ) -> Result<Self> {
        check_extents(width, height, intensities.len())?;
        let data = Array2::from_shape_vec((height, width), intensities)
            .map_err(|e| SpeckleError::Construction(e.to_string()))?;
        Self::from_storage(data.into_shared(), 0, 0, params)
    }

    /// Copy a row-major intensity slice.
    pub fn from_slice(
        intensities: &[Intensity],
        width: usize,
        height: usize,
        params: &ImageParams,
    ) -> Result<Self> {
        Self::from_vec(intensities.to_vec(), width, height, params)
    }

    /// Share a reference-counted intensity array with the caller.
    ///
    /// The storage stays alive for as long as either side holds it. The
    /// image never writes through to the caller's copy: the first in-place
    /// filter pass detaches it.
    pub fn from_shared(
        width: usize,
        height: usize,
        intensities: ArcArray2<Intensity>,
        params: &ImageParams,
    ) -> Result<Self> {
        check_extents(width, height, intensities.len())?;
        if intensities.dim() != (height, width) {
            return Err(SpeckleError::Construction(format!(
                "Shared array shape {:?} does not match {width}x{height}",
                intensities.dim()
            )));
        }
        Self::from_storage(intensities, 0, 0, params)
    }

    /// Take ownership of an `(height, width)` array.
    pub fn from_array(intensities: Array2<Intensity>, params: &ImageParams) -> Result<Self> {
        Self::from_storage(intensities.into_shared(), 0, 0, params)
    }

    /// Copy `region` of this image into a new image. Offsets accumulate, so
    /// the child still knows where it sits in the global image.
    pub fn sub_image(&self, region: &Region) -> Result<Self> {
        let r = region.validated(self.width, self.height)?;
        let window = self
            .intensities()
            .slice(s![r.y..r.y + r.height, r.x..r.x + r.width])
            .to_owned();
        Self::from_storage(
            window.into_shared(),
            self.offset_x + r.x,
            self.offset_y + r.y,
            &self.params,
        )
    }

    fn from_storage(
        host: ArcArray2<Intensity>,
        offset_x: usize,
        offset_y: usize,
        params: &ImageParams,
    ) -> Result<Self> {
        let (height, width) = host.dim();
        check_extents(width, height, host.len())?;
        let gauss_mask = GaussMask::new(params.gauss_mask_size)?;

        debug!(width, height, offset_x, offset_y, "Image constructed");
        Ok(Self {
            offset_x,
            offset_y,
            width,
            height,
            intensities: DualBuffer::from_host(host),
            grad_x: DualBuffer::zeros(height, width),
            grad_y: DualBuffer::zeros(height, width),
            has_gradients: false,
            gauss_mask,
            params: params.clone(),
        })
    }

    // -----------------------------------------------------------------------
    // Geometry
    // -----------------------------------------------------------------------

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn num_pixels(&self) -> usize {
        self.width * self.height
    }

    pub fn offset_x(&self) -> usize {
        self.offset_x
    }

    pub fn offset_y(&self) -> usize {
        self.offset_y
    }

    /// Translate local `(x, y)` to coordinates in the global image.
    pub fn to_global(&self, x: usize, y: usize) -> (usize, usize) {
        (x + self.offset_x, y + self.offset_y)
    }

    pub fn params(&self) -> &ImageParams {
        &self.params
    }

    pub fn gauss_mask(&self) -> &GaussMask {
        &self.gauss_mask
    }

    // -----------------------------------------------------------------------
    // Intensity access
    // -----------------------------------------------------------------------

    /// Intensity at column `x`, row `y`.
    ///
    /// Bounds are asserted in debug builds; release builds still panic on
    /// out-of-range indices through ndarray. Use [`Image::try_at`] for a
    /// recoverable check.
    #[inline]
    pub fn at(&self, x: usize, y: usize) -> Intensity {
        debug_assert!(
            x < self.width && y < self.height,
            "({x}, {y}) outside {}x{} image",
            self.width,
            self.height
        );
        self.intensities.host()[[y, x]]
    }

    pub fn try_at(&self, x: usize, y: usize) -> Result<Intensity> {
        self.check_bounds(x, y)?;
        Ok(self.at(x, y))
    }

    /// Host view of the intensities, shape `(height, width)`.
    pub fn intensities(&self) -> ArrayView2<'_, Intensity> {
        self.intensities.host()
    }

    // -----------------------------------------------------------------------
    // Gradients
    // -----------------------------------------------------------------------

    pub fn has_gradients(&self) -> bool {
        self.has_gradients
    }

    pub fn grad_x(&self, x: usize, y: usize) -> Result<Scalar> {
        self.require_gradients()?;
        self.check_bounds(x, y)?;
        Ok(self.grad_x.host()[[y, x]])
    }

    pub fn grad_y(&self, x: usize, y: usize) -> Result<Scalar> {
        self.require_gradients()?;
        self.check_bounds(x, y)?;
        Ok(self.grad_y.host()[[y, x]])
    }

    /// Host view of dI/dx, shape `(height, width)`.
    pub fn grad_x_view(&self) -> Result<ArrayView2<'_, Scalar>> {
        self.require_gradients()?;
        Ok(self.grad_x.host())
    }

    /// Host view of dI/dy, shape `(height, width)`.
    pub fn grad_y_view(&self) -> Result<ArrayView2<'_, Scalar>> {
        self.require_gradients()?;
        Ok(self.grad_y.host())
    }

    /// Compute both gradient fields.
    ///
    /// Runs the selected strategy on the device copies and syncs the results
    /// to the host before returning. If dispatch cannot start, the image is
    /// left without gradients.
    pub fn compute_gradients(&mut self, options: &DispatchOptions) -> Result<()> {
        self.has_gradients = false;
        let strategy = create_strategy(options)?;

        debug!(
            width = self.width,
            height = self.height,
            strategy = strategy.name(),
            "Computing image gradients"
        );
        self.intensities.sync_device();
        strategy.gradients(
            self.intensities.device(),
            self.grad_x.device_mut(),
            self.grad_y.device_mut(),
        );
        self.grad_x.sync_host();
        self.grad_y.sync_host();

        self.has_gradients = true;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Gaussian filter
    // -----------------------------------------------------------------------

    /// Smooth the intensities in place with this image's Gaussian mask.
    ///
    /// Previously computed gradients are discarded.
    pub fn gauss_filter(&mut self, options: &DispatchOptions) -> Result<()> {
        let strategy = create_strategy(options)?;

        debug!(
            width = self.width,
            height = self.height,
            mask_size = self.gauss_mask.size(),
            strategy = strategy.name(),
            "Gauss filtering image"
        );
        self.intensities.sync_device();
        let mut work = Array2::<Intensity>::zeros((self.height, self.width));
        strategy.gauss(self.intensities.device(), &self.gauss_mask, work.view_mut());
        self.intensities.swap_device(&mut work);
        self.intensities.sync_host();

        self.has_gradients = false;
        Ok(())
    }

    /// Filtered copy of this image; `self` is left untouched.
    pub fn gauss_filtered(&self, options: &DispatchOptions) -> Result<Image> {
        let mut filtered = self.clone();
        filtered.gauss_filter(options)?;
        Ok(filtered)
    }

    // -----------------------------------------------------------------------
    // Output
    // -----------------------------------------------------------------------

    /// Write an 8-bit raster (values clamped to 0..=255 and truncated).
    /// The format follows the extension, TIFF when unknown.
    pub fn write_tiff(&self, path: &Path) -> Result<()> {
        save_8bit(path, &self.intensities())
    }

    /// Write full-precision intensities in the raw-intensity format.
    pub fn write_rawi(&self, path: &Path) -> Result<()> {
        write_rawi(path, &self.intensities())
    }

    /// Write `.rawi` for the raw-intensity extension, an 8-bit raster otherwise.
    pub fn write(&self, path: &Path) -> Result<()> {
        if is_rawi_path(path) {
            self.write_rawi(path)
        } else {
            self.write_tiff(path)
        }
    }

    fn check_bounds(&self, x: usize, y: usize) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(SpeckleError::Access {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    fn require_gradients(&self) -> Result<()> {
        if !self.has_gradients {
            return Err(SpeckleError::GradientsNotComputed);
        }
        Ok(())
    }
}

fn check_extents(width: usize, height: usize, len: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(SpeckleError::Construction(format!(
            "Invalid image dimensions: {width}x{height}"
        )));
    }
    if width.checked_mul(height) != Some(len) {
        return Err(SpeckleError::Construction(format!(
            "Buffer holds {len} values, expected {width}x{height}"
        )));
    }
    Ok(())
}
