use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use speckle_core::image::Image;
use speckle_core::io::rawi::write_rawi;
use tracing::info;

use super::{parse_region, ComputeArgs};

#[derive(Args)]
pub struct GradientsArgs {
    /// Input image (.rawi, TIFF, PNG, ...)
    pub file: PathBuf,

    /// Only load this window: "x,y,width,height"
    #[arg(long)]
    pub region: Option<String>,

    /// Gauss filter the image before differentiating
    #[arg(long)]
    pub smooth: bool,

    #[command(flatten)]
    pub compute: ComputeArgs,

    /// Output file for dI/dx
    #[arg(long, default_value = "grad_x.rawi")]
    pub out_x: PathBuf,

    /// Output file for dI/dy
    #[arg(long, default_value = "grad_y.rawi")]
    pub out_y: PathBuf,
}

pub fn run(args: &GradientsArgs) -> Result<()> {
    let config = args.compute.resolve()?;
    let mut image = match &args.region {
        Some(region) => {
            let region = parse_region(region)?;
            Image::from_file_region(&args.file, &region, &config.image)
        }
        None => Image::from_file(&args.file, &config.image),
    }
    .with_context(|| format!("Failed to load {}", args.file.display()))?;

    println!(
        "Loaded {}x{} image at offset ({}, {})",
        image.width(),
        image.height(),
        image.offset_x(),
        image.offset_y()
    );

    if args.smooth {
        println!("Applying {0}x{0} Gauss filter", image.gauss_mask().size());
        image.gauss_filter(&config.dispatch)?;
    }

    image.compute_gradients(&config.dispatch)?;
    let strategy = if config.dispatch.use_hierarchical_parallelism {
        "team"
    } else {
        "flat"
    };
    info!(strategy, "gradients computed");

    write_rawi(&args.out_x, &image.grad_x_view()?)
        .with_context(|| format!("Failed to write {}", args.out_x.display()))?;
    write_rawi(&args.out_y, &image.grad_y_view()?)
        .with_context(|| format!("Failed to write {}", args.out_y.display()))?;
    println!(
        "Saved gradients to {} and {}",
        args.out_x.display(),
        args.out_y.display()
    );

    Ok(())
}
