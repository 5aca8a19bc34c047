/// Pixel intensity type.
pub type Intensity = f64;

/// Scalar type for derived fields (gradients, mask weights).
pub type Scalar = f64;

/// Outer coefficient of the 4th-order central difference: `1/12`.
pub const GRAD_C1: Scalar = 1.0 / 12.0;

/// Inner coefficient of the 4th-order central difference: `8/12`.
pub const GRAD_C2: Scalar = 8.0 / 12.0;

/// Half-width of the interior gradient stencil. Pixels closer than this to an
/// edge fall back to the 2-point stencil.
pub const GRAD_STENCIL_RADIUS: usize = 2;

/// Largest supported Gaussian mask edge length.
pub const MAX_GAUSS_MASK_SIZE: usize = 13;

/// Smallest supported Gaussian mask edge length.
pub const MIN_GAUSS_MASK_SIZE: usize = 3;

/// Default Gaussian mask edge length (the 7-point filter).
pub const DEFAULT_GAUSS_MASK_SIZE: usize = 7;

/// Gaussian sigma is `mask_size / GAUSS_SIGMA_DIVISOR`, so 3 sigma spans the half-width.
pub const GAUSS_SIGMA_DIVISOR: f64 = 6.0;

/// Default number of pixels per team for hierarchical dispatch.
pub const DEFAULT_TEAM_SIZE: usize = 256;

/// Extension of the lossless raw-intensity format.
pub const RAWI_EXTENSION: &str = "rawi";

/// Largest value representable by the 8-bit raster writer.
pub const MAX_8BIT_INTENSITY: Intensity = 255.0;
