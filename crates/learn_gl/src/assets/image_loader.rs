//! Image loading utilities for texture data
//!
//! Decodes PNG and JPEG files into tightly packed 8-bit pixels ready for
//! `glTexImage2D`.

use std::path::Path;
use serde::{Deserialize, Serialize};

use crate::assets::AssetError;

/// Channel layout of decoded pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PixelFormat {
    /// 3 bytes per pixel
    Rgb8,
    /// 4 bytes per pixel
    Rgba8,
}

impl PixelFormat {
    /// Bytes per pixel
    pub const fn channels(self) -> u8 {
        match self {
            Self::Rgb8 => 3,
            Self::Rgba8 => 4,
        }
    }
}

/// Loaded image data ready for GPU upload
#[derive(Debug, Clone)]
pub struct ImageData {
    /// Raw pixel data, rows top to bottom, no row padding
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Channel layout of `data`
    pub format: PixelFormat,
}

impl ImageData {
    /// Load an image from a file path
    pub fn from_file<P: AsRef<Path>>(path: P, format: PixelFormat) -> Result<Self, AssetError> {
        let path_ref = path.as_ref();

        log::debug!("Loading image from: {:?}", path_ref);

        let bytes = std::fs::read(path_ref).map_err(|source| AssetError::Io {
            path: path_ref.display().to_string(),
            source,
        })?;
        let image = Self::from_bytes(&bytes, format)?;

        log::info!("Loaded image {}x{} from {:?}", image.width, image.height, path_ref);
        Ok(image)
    }

    /// Decode an image held in memory
    pub fn from_bytes(bytes: &[u8], format: PixelFormat) -> Result<Self, AssetError> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| AssetError::LoadFailed(format!("Failed to decode image: {e}")))?;

        let (width, height, data) = match format {
            PixelFormat::Rgb8 => {
                let rgb = img.to_rgb8();
                let (w, h) = rgb.dimensions();
                (w, h, rgb.into_raw())
            }
            PixelFormat::Rgba8 => {
                let rgba = img.to_rgba8();
                let (w, h) = rgba.dimensions();
                (w, h, rgba.into_raw())
            }
        };

        if width == 0 || height == 0 {
            return Err(AssetError::LoadFailed("image has no pixels".to_string()));
        }

        Ok(Self { data, width, height, format })
    }

    /// Reverse the row order so the first row is the bottom of the image
    ///
    /// OpenGL samples texture coordinate (0, 0) from the first row uploaded.
    pub fn flip_vertically(&mut self) {
        let row_len = self.row_len();
        if row_len == 0 {
            return;
        }
        let flipped: Vec<u8> = self.data.chunks_exact(row_len).rev().flatten().copied().collect();
        self.data = flipped;
    }

    /// Length of one pixel row in bytes
    pub fn row_len(&self) -> usize {
        self.width as usize * self.format.channels() as usize
    }
}
