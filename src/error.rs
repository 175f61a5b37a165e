use thiserror::Error;

/// Errors that can occur while exporting the canvas to an image
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Cannot allocate a {width}x{height} export surface")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Failed to write export: {0}")]
    Write(#[from] std::io::Error),
}

/// Errors that can occur while loading the configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
