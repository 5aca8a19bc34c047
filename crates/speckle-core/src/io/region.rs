use crate::error::{Result, SpeckleError};

/// A rectangle in local image coordinates, used to cut a sub-image out of
/// a larger one. `(x, y)` becomes the sub-image's offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Region {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The whole of a `width` x `height` image.
    pub fn full(width: usize, height: usize) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Check that the region is non-empty and lies within a parent of the
    /// given extents.
    pub fn validated(&self, parent_width: usize, parent_height: usize) -> Result<Region> {
        if self.width == 0 || self.height == 0 {
            return Err(SpeckleError::Construction(
                "Region width and height must be > 0".into(),
            ));
        }

        let fits_x = self
            .x
            .checked_add(self.width)
            .is_some_and(|right| right <= parent_width);
        let fits_y = self
            .y
            .checked_add(self.height)
            .is_some_and(|bottom| bottom <= parent_height);
        if !fits_x || !fits_y {
            return Err(SpeckleError::Construction(format!(
                "Region ({},{} {}x{}) exceeds parent dimensions ({parent_width}x{parent_height})",
                self.x, self.y, self.width, self.height
            )));
        }

        Ok(*self)
    }
}
