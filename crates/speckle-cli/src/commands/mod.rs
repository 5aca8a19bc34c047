pub mod config;
pub mod filter;
pub mod gradients;
pub mod info;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use speckle_core::io::region::Region;
use speckle_core::params::SpeckleConfig;

/// Options shared by every command that runs a kernel.
#[derive(Args)]
pub struct ComputeArgs {
    /// TOML parameter file with optional [image] and [dispatch] tables
    #[arg(long)]
    pub params: Option<PathBuf>,

    /// Gaussian mask size (odd, 3..=13); overrides the parameter file
    #[arg(long)]
    pub mask_size: Option<usize>,

    /// Use team (hierarchical) dispatch instead of one work item per pixel
    #[arg(long)]
    pub hierarchical: bool,

    /// Pixels per team for hierarchical dispatch
    #[arg(long)]
    pub team_size: Option<usize>,
}

impl ComputeArgs {
    /// Parameter file (or defaults) with command-line overrides applied.
    pub fn resolve(&self) -> Result<SpeckleConfig> {
        let mut config = match &self.params {
            Some(path) => SpeckleConfig::from_toml_file(path)
                .with_context(|| format!("Failed to load parameters from {}", path.display()))?,
            None => SpeckleConfig::default(),
        };

        if let Some(size) = self.mask_size {
            config.image.gauss_mask_size = size;
        }
        if self.hierarchical {
            config.dispatch.use_hierarchical_parallelism = true;
        }
        if let Some(team_size) = self.team_size {
            config.dispatch.team_size = team_size;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Parse "x,y,width,height".
pub fn parse_region(s: &str) -> Result<Region> {
    let parts: Vec<usize> = s
        .split(',')
        .map(|p| p.trim().parse::<usize>())
        .collect::<std::result::Result<_, _>>()
        .context("Invalid region format (expected 'x,y,width,height')")?;
    if parts.len() != 4 {
        anyhow::bail!("Region requires exactly 4 values: x,y,width,height");
    }
    Ok(Region::new(parts[0], parts[1], parts[2], parts[3]))
}
