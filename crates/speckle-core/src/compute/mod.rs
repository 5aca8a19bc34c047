mod flat;
pub mod stencil;
mod team;

use ndarray::{ArrayView2, ArrayViewMut2};
use tracing::debug;

use crate::consts::{Intensity, Scalar};
use crate::error::Result;
use crate::filters::gauss::GaussMask;
use crate::params::DispatchOptions;

pub use flat::FlatStrategy;
pub use team::TeamStrategy;

/// Work-partitioning strategy for the image kernels.
///
/// Implementations differ only in how pixels are grouped onto threads; the
/// per-pixel arithmetic is shared (see [`stencil`]), so every strategy
/// produces identical output for identical input.
pub trait ComputeStrategy: Send + Sync {
    fn name(&self) -> &str;

    /// Fill `grad_x`/`grad_y` with the intensity derivatives of `src`.
    /// All three views have the same shape.
    fn gradients(
        &self,
        src: ArrayView2<'_, Intensity>,
        grad_x: ArrayViewMut2<'_, Scalar>,
        grad_y: ArrayViewMut2<'_, Scalar>,
    );

    /// Write the mask-weighted average of `src` into `dst` (same shape).
    fn gauss(
        &self,
        src: ArrayView2<'_, Intensity>,
        mask: &GaussMask,
        dst: ArrayViewMut2<'_, Intensity>,
    );
}

/// Build the strategy selected by `options`.
pub fn create_strategy(options: &DispatchOptions) -> Result<Box<dyn ComputeStrategy>> {
    options.validate()?;
    let strategy: Box<dyn ComputeStrategy> = if options.use_hierarchical_parallelism {
        Box::new(TeamStrategy::new(options.team_size))
    } else {
        Box::new(FlatStrategy)
    };
    debug!(
        strategy = strategy.name(),
        team_size = options.team_size,
        "Dispatch strategy selected"
    );
    Ok(strategy)
}
