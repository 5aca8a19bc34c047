//! Host/device mirrored 2D buffers.
//!
//! Every buffer the compute kernels touch lives twice: a host copy read by
//! callers through the accessor API, and a device copy read and written by
//! the kernels. Each side carries a modified flag; a `sync_*` call copies the
//! modified side over the other and marks both clean. Nothing is mirrored
//! implicitly.

use ndarray::{ArcArray2, Array2, ArrayView2, ArrayViewMut2};

/// A 2D buffer with an explicit host copy and device copy.
///
/// The host copy is reference counted so caller-supplied storage can be
/// adopted without copying. Host writes are copy-on-write: a shared host
/// array is detached before it is modified, never written through.
#[derive(Clone, Debug)]
pub struct DualBuffer<T> {
    host: ArcArray2<T>,
    device: Array2<T>,
    host_modified: bool,
    device_modified: bool,
}

impl<T: Clone + Default> DualBuffer<T> {
    /// Allocate a `(rows, cols)` buffer, default-filled and clean on both sides.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            host: ArcArray2::default((rows, cols)),
            device: Array2::default((rows, cols)),
            host_modified: false,
            device_modified: false,
        }
    }

    /// Adopt host storage and push it to the device.
    pub fn from_host(host: ArcArray2<T>) -> Self {
        let device = Array2::default(host.raw_dim());
        let mut buffer = Self {
            host,
            device,
            host_modified: true,
            device_modified: false,
        };
        buffer.sync_device();
        buffer
    }

    /// `(rows, cols)` of both copies.
    pub fn dim(&self) -> (usize, usize) {
        self.host.dim()
    }

    /// Host view. Must not be read while the device copy holds unsynced writes.
    pub fn host(&self) -> ArrayView2<'_, T> {
        debug_assert!(
            !self.device_modified,
            "host copy read while device copy is modified"
        );
        self.host.view()
    }

    /// Mutable host view; marks the host side modified.
    pub fn host_mut(&mut self) -> ArrayViewMut2<'_, T> {
        self.modify_host();
        self.host.view_mut()
    }

    /// Device view. Must not be read while the host copy holds unsynced writes.
    pub fn device(&self) -> ArrayView2<'_, T> {
        debug_assert!(
            !self.host_modified,
            "device copy read while host copy is modified"
        );
        self.device.view()
    }

    /// Mutable device view; marks the device side modified.
    pub fn device_mut(&mut self) -> ArrayViewMut2<'_, T> {
        self.modify_device();
        self.device.view_mut()
    }

    /// Exchange the device copy with `other` (same shape); marks the device
    /// side modified.
    pub fn swap_device(&mut self, other: &mut Array2<T>) {
        debug_assert_eq!(self.device.dim(), other.dim());
        std::mem::swap(&mut self.device, other);
        self.modify_device();
    }

    pub fn modify_host(&mut self) {
        debug_assert!(!self.device_modified, "both copies modified");
        self.host_modified = true;
    }

    pub fn modify_device(&mut self) {
        debug_assert!(!self.host_modified, "both copies modified");
        self.device_modified = true;
    }

    pub fn need_sync_host(&self) -> bool {
        self.device_modified
    }

    pub fn need_sync_device(&self) -> bool {
        self.host_modified
    }

    /// Copy device -> host if the device side is modified.
    pub fn sync_host(&mut self) {
        if self.device_modified {
            self.host.assign(&self.device);
            self.device_modified = false;
        }
    }

    /// Copy host -> device if the host side is modified.
    pub fn sync_device(&mut self) {
        if self.host_modified {
            self.device.assign(&self.host);
            self.host_modified = false;
        }
    }

    /// True when the host storage is shared with another owner.
    pub fn is_host_shared(&self) -> bool {
        !self.host.is_unique()
    }
}
