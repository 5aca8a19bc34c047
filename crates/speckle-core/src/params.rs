use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_GAUSS_MASK_SIZE, DEFAULT_TEAM_SIZE};
use crate::error::{Result, SpeckleError};
use crate::filters::gauss::validate_mask_size;

/// Per-image construction parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageParams {
    /// Edge length of the Gaussian smoothing mask (odd, 3..=13).
    #[serde(default = "default_gauss_mask_size")]
    pub gauss_mask_size: usize,
}

fn default_gauss_mask_size() -> usize {
    DEFAULT_GAUSS_MASK_SIZE
}

impl Default for ImageParams {
    fn default() -> Self {
        Self {
            gauss_mask_size: DEFAULT_GAUSS_MASK_SIZE,
        }
    }
}

impl ImageParams {
    pub fn with_gauss_mask_size(gauss_mask_size: usize) -> Self {
        Self { gauss_mask_size }
    }

    pub fn validate(&self) -> Result<()> {
        validate_mask_size(self.gauss_mask_size)
    }
}

/// Per-call kernel dispatch options.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DispatchOptions {
    /// Use team (hierarchical) dispatch instead of one work item per pixel.
    #[serde(default)]
    pub use_hierarchical_parallelism: bool,
    /// Pixels per team when hierarchical dispatch is enabled.
    #[serde(default = "default_team_size")]
    pub team_size: usize,
}

fn default_team_size() -> usize {
    DEFAULT_TEAM_SIZE
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self {
            use_hierarchical_parallelism: false,
            team_size: DEFAULT_TEAM_SIZE,
        }
    }
}

impl DispatchOptions {
    pub fn flat() -> Self {
        Self::default()
    }

    pub fn hierarchical(team_size: usize) -> Self {
        Self {
            use_hierarchical_parallelism: true,
            team_size,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.team_size == 0 {
            return Err(SpeckleError::Config("Team size must be > 0".into()));
        }
        Ok(())
    }
}

/// Parameter file layout: an `[image]` table and a `[dispatch]` table, both optional.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SpeckleConfig {
    #[serde(default)]
    pub image: ImageParams,
    #[serde(default)]
    pub dispatch: DispatchOptions,
}

impl SpeckleConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| SpeckleError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| SpeckleError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        self.image.validate()?;
        self.dispatch.validate()
    }
}
