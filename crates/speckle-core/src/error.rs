use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpeckleError {
    #[error("Construction error: {0}")]
    Construction(String),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Format error: I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Pixel ({x}, {y}) out of range for {width}x{height} image")]
    Access {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("Image gradients have not been computed")]
    GradientsNotComputed,
}

impl SpeckleError {
    /// True for every variant that reports an unreadable or unwritable file.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            SpeckleError::Format(_) | SpeckleError::Io(_) | SpeckleError::ImageError(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SpeckleError>;
