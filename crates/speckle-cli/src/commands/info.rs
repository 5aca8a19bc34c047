use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use speckle_core::image::Image;
use speckle_core::params::ImageParams;

#[derive(Args)]
pub struct InfoArgs {
    /// Input image (.rawi, TIFF, PNG, ...)
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let image = Image::from_file(&args.file, &ImageParams::default())
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    let data = image.intensities();
    let min = data.iter().copied().fold(f64::INFINITY, f64::min);
    let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = data.sum() / image.num_pixels() as f64;

    println!("File:        {}", args.file.display());
    println!("Dimensions:  {}x{}", image.width(), image.height());
    println!("Pixels:      {}", image.num_pixels());
    println!("Intensity:   min {:.3}, max {:.3}, mean {:.3}", min, max, mean);

    Ok(())
}
