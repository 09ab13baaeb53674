//! Asset loading

pub mod image_loader;

pub use image_loader::{ImageData, PixelFormat};

use thiserror::Error;

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// The file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Offending path
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The file was read but could not be decoded
    #[error("Asset load failed: {0}")]
    LoadFailed(String),
}
