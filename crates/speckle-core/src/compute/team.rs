use ndarray::{s, ArrayView2, ArrayViewMut2};
use rayon::prelude::*;

use crate::consts::{Intensity, Scalar, GRAD_STENCIL_RADIUS};
use crate::filters::gauss::GaussMask;

use super::stencil::{gauss_at, gradient_at, PixelSource};
use super::ComputeStrategy;

/// Hierarchical dispatch: the row-major pixel range is cut into teams of
/// `team_size` consecutive pixels. A team's pixels form at most three
/// rectangular blocks (leading partial row, whole rows, trailing partial
/// row). For each block the team copies only the window its stencil
/// footprint reaches into team-local scratch, then evaluates the block's
/// pixels out of that scratch.
pub struct TeamStrategy {
    team_size: usize,
}

impl TeamStrategy {
    /// `team_size` must be non-zero.
    pub fn new(team_size: usize) -> Self {
        debug_assert!(team_size > 0);
        Self { team_size }
    }

    pub fn team_size(&self) -> usize {
        self.team_size
    }

    /// Run `per_pixel` for every pixel, team by team. Each team's results
    /// come back in row-major order.
    fn dispatch<T, F>(
        &self,
        src: &ArrayView2<'_, Intensity>,
        halo: usize,
        per_pixel: F,
    ) -> Vec<Vec<T>>
    where
        T: Send,
        F: Fn(&TeamScratch, usize, usize) -> T + Sync,
    {
        let (height, width) = src.dim();
        let total = height * width;
        let team_size = self.team_size;
        let num_teams = total.div_ceil(team_size);

        (0..num_teams)
            .into_par_iter()
            .map(|team| {
                let start = team * team_size;
                let end = (start + team_size).min(total);
                let mut results = Vec::with_capacity(end - start);
                for block in row_blocks(start, end, width) {
                    let scratch = TeamScratch::load(src, &block, halo);
                    for y in block.y0..=block.y1 {
                        for x in block.x0..=block.x1 {
                            results.push(per_pixel(&scratch, x, y));
                        }
                    }
                }
                results
            })
            .collect()
    }
}

impl ComputeStrategy for TeamStrategy {
    fn name(&self) -> &str {
        "team"
    }

    fn gradients(
        &self,
        src: ArrayView2<'_, Intensity>,
        mut grad_x: ArrayViewMut2<'_, Scalar>,
        mut grad_y: ArrayViewMut2<'_, Scalar>,
    ) {
        if src.is_empty() {
            return;
        }
        let teams = self.dispatch(&src, GRAD_STENCIL_RADIUS, |scratch, x, y| {
            gradient_at(scratch, x, y)
        });

        for ((gx, gy), (dx, dy)) in grad_x
            .iter_mut()
            .zip(grad_y.iter_mut())
            .zip(teams.into_iter().flatten())
        {
            *gx = dx;
            *gy = dy;
        }
    }

    fn gauss(
        &self,
        src: ArrayView2<'_, Intensity>,
        mask: &GaussMask,
        mut dst: ArrayViewMut2<'_, Intensity>,
    ) {
        if src.is_empty() {
            return;
        }
        let teams = self.dispatch(&src, mask.half(), |scratch, x, y| {
            gauss_at(scratch, mask, x, y)
        });

        for (out, value) in dst.iter_mut().zip(teams.into_iter().flatten()) {
            *out = value;
        }
    }
}

/// Inclusive pixel rectangle `[x0, x1] x [y0, y1]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Block {
    x0: usize,
    x1: usize,
    y0: usize,
    y1: usize,
}

impl Block {
    fn len(&self) -> usize {
        (self.x1 - self.x0 + 1) * (self.y1 - self.y0 + 1)
    }
}

/// Split the row-major pixel range `start..end` into rectangles, in order.
fn row_blocks(start: usize, end: usize, width: usize) -> Vec<Block> {
    let mut blocks = Vec::with_capacity(3);
    let mut pixel = start;
    while pixel < end {
        let (x, y) = (pixel % width, pixel / width);
        let remaining = end - pixel;
        let block = if x > 0 || remaining < width {
            let count = (width - x).min(remaining);
            Block {
                x0: x,
                x1: x + count - 1,
                y0: y,
                y1: y,
            }
        } else {
            Block {
                x0: 0,
                x1: width - 1,
                y0: y,
                y1: y + remaining / width - 1,
            }
        };
        pixel += block.len();
        blocks.push(block);
    }
    blocks
}

/// Team-local copy of the image window around one block, plus the full
/// image extent so boundary handling sees the whole image.
struct TeamScratch {
    values: Vec<Intensity>,
    first_col: usize,
    first_row: usize,
    cols: usize,
    width: usize,
    height: usize,
}

impl TeamScratch {
    /// Cache `block` grown by `halo` on every side, clamped to the image.
    fn load(src: &ArrayView2<'_, Intensity>, block: &Block, halo: usize) -> Self {
        let (height, width) = src.dim();
        let first_col = block.x0.saturating_sub(halo);
        let last_col = (block.x1 + halo).min(width - 1);
        let first_row = block.y0.saturating_sub(halo);
        let last_row = (block.y1 + halo).min(height - 1);
        let values = src
            .slice(s![first_row..=last_row, first_col..=last_col])
            .iter()
            .copied()
            .collect();
        Self {
            values,
            first_col,
            first_row,
            cols: last_col - first_col + 1,
            width,
            height,
        }
    }
}

impl PixelSource for TeamScratch {
    fn extent(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    #[inline]
    fn intensity(&self, x: usize, y: usize) -> Intensity {
        debug_assert!(
            x >= self.first_col && x < self.first_col + self.cols && y >= self.first_row,
            "({x}, {y}) not cached by this team"
        );
        self.values[(y - self.first_row) * self.cols + (x - self.first_col)]
    }
}
