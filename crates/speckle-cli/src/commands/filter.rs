use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use speckle_core::image::Image;
use tracing::debug;

use super::ComputeArgs;

#[derive(Args)]
pub struct FilterArgs {
    /// Input image (.rawi, TIFF, PNG, ...)
    pub file: PathBuf,

    #[command(flatten)]
    pub compute: ComputeArgs,

    /// Output file; .rawi keeps full precision, other extensions are 8-bit
    #[arg(short, long, default_value = "filtered.rawi")]
    pub output: PathBuf,
}

pub fn run(args: &FilterArgs) -> Result<()> {
    let config = args.compute.resolve()?;
    let mut image = Image::from_file(&args.file, &config.image)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    println!("Loaded {}x{} image", image.width(), image.height());
    println!("Applying {0}x{0} Gauss filter", image.gauss_mask().size());
    image.gauss_filter(&config.dispatch)?;
    debug!(path = %args.output.display(), "writing filtered image");

    image
        .write(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    println!("Saved to {}", args.output.display());

    Ok(())
}
