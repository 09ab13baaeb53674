//! 2D textures
//!
//! Sampling parameters are plain serde types so they can live in the config
//! file; [`Texture2D`] applies them while its own texture object is bound.

use gl::types::{GLenum, GLint, GLuint};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::assets::{AssetError, ImageData, PixelFormat};

/// What to sample outside the `[0, 1]` texture coordinate range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapMode {
    /// Tile the image
    Repeat,
    /// Tile the image, mirroring every other copy
    MirroredRepeat,
    /// Stretch the edge texels
    ClampToEdge,
    /// Use the border color
    ClampToBorder,
}

impl WrapMode {
    /// Matching GL enum
    pub const fn to_gl(self) -> GLenum {
        match self {
            Self::Repeat => gl::REPEAT,
            Self::MirroredRepeat => gl::MIRRORED_REPEAT,
            Self::ClampToEdge => gl::CLAMP_TO_EDGE,
            Self::ClampToBorder => gl::CLAMP_TO_BORDER,
        }
    }
}

/// Texel filtering, optionally across mipmap levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// Closest texel
    Nearest,
    /// Bilinear blend of neighbouring texels
    Linear,
    /// Closest texel on the closest mipmap level
    NearestMipmapNearest,
    /// Bilinear on the closest mipmap level
    LinearMipmapNearest,
    /// Closest texel, blended between two mipmap levels
    NearestMipmapLinear,
    /// Bilinear, blended between two mipmap levels
    LinearMipmapLinear,
}

impl FilterMode {
    /// Matching GL enum
    pub const fn to_gl(self) -> GLenum {
        match self {
            Self::Nearest => gl::NEAREST,
            Self::Linear => gl::LINEAR,
            Self::NearestMipmapNearest => gl::NEAREST_MIPMAP_NEAREST,
            Self::LinearMipmapNearest => gl::LINEAR_MIPMAP_NEAREST,
            Self::NearestMipmapLinear => gl::NEAREST_MIPMAP_LINEAR,
            Self::LinearMipmapLinear => gl::LINEAR_MIPMAP_LINEAR,
        }
    }

    /// Whether sampling with this filter reads mipmap levels
    pub const fn uses_mipmaps(self) -> bool {
        !matches!(self, Self::Nearest | Self::Linear)
    }
}

/// Texture sampling parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextureParams {
    /// Wrap mode along S (horizontal)
    pub wrap_s: WrapMode,
    /// Wrap mode along T (vertical)
    pub wrap_t: WrapMode,
    /// Color returned by [`WrapMode::ClampToBorder`]
    pub border_color: [f32; 4],
    /// Filter when the texture is drawn smaller than its size
    pub min_filter: FilterMode,
    /// Filter when the texture is drawn larger than its size
    pub mag_filter: FilterMode,
    /// Generate the mipmap chain after upload
    pub mipmaps: bool,
    /// Upload rows bottom-up so the image is not upside down
    pub flip_vertically: bool,
}

impl TextureParams {
    /// Check that the filter/mipmap combination is usable
    pub fn validate(&self) -> Result<(), String> {
        if self.mag_filter.uses_mipmaps() {
            return Err(format!(
                "magnification filter must be nearest or linear, got {:?}",
                self.mag_filter
            ));
        }
        if self.min_filter.uses_mipmaps() && !self.mipmaps {
            return Err(format!(
                "minification filter {:?} needs mipmaps enabled",
                self.min_filter
            ));
        }
        if self.border_color.iter().any(|c| !(0.0..=1.0).contains(c)) {
            return Err(format!("border color components must be in [0, 1], got {:?}", self.border_color));
        }
        Ok(())
    }
}

impl Default for TextureParams {
    fn default() -> Self {
        Self {
            wrap_s: WrapMode::ClampToBorder,
            wrap_t: WrapMode::ClampToBorder,
            border_color: [1.0, 1.0, 0.0, 1.0],
            min_filter: FilterMode::LinearMipmapLinear,
            mag_filter: FilterMode::Linear,
            mipmaps: true,
            flip_vertically: false,
        }
    }
}

const fn pixel_format_to_gl(format: PixelFormat) -> GLenum {
    match format {
        PixelFormat::Rgb8 => gl::RGB,
        PixelFormat::Rgba8 => gl::RGBA,
    }
}

/// Immutable 2D texture, deleted on drop
pub struct Texture2D {
    id: GLuint,
    width: u32,
    height: u32,
}

impl Texture2D {
    /// Load an image file as RGB and upload it
    pub fn from_file(path: impl AsRef<Path>, params: &TextureParams) -> Result<Self, AssetError> {
        let mut image = ImageData::from_file(path, PixelFormat::Rgb8)?;
        if params.flip_vertically {
            image.flip_vertically();
        }
        Ok(Self::from_image(&image, params))
    }

    /// Upload decoded pixels and apply `params`
    pub fn from_image(image: &ImageData, params: &TextureParams) -> Self {
        let format = pixel_format_to_gl(image.format);
        let mut id: GLuint = 0;

        // SAFETY: requires a current context. `image.data` holds exactly
        // width * height * channels bytes and unpack alignment is 1, so GL
        // reads only inside the slice.
        unsafe {
            gl::GenTextures(1, &mut id);
            gl::BindTexture(gl::TEXTURE_2D, id);

            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, params.wrap_s.to_gl() as GLint);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, params.wrap_t.to_gl() as GLint);
            gl::TexParameterfv(gl::TEXTURE_2D, gl::TEXTURE_BORDER_COLOR, params.border_color.as_ptr());
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, params.min_filter.to_gl() as GLint);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, params.mag_filter.to_gl() as GLint);

            gl::PixelStorei(gl::UNPACK_ALIGNMENT, 1);
            gl::TexImage2D(
                gl::TEXTURE_2D,
                0,
                format as GLint,
                image.width as GLint,
                image.height as GLint,
                0,
                format,
                gl::UNSIGNED_BYTE,
                image.data.as_ptr().cast(),
            );
            if params.mipmaps {
                gl::GenerateMipmap(gl::TEXTURE_2D);
            }

            gl::BindTexture(gl::TEXTURE_2D, 0);
        }

        log::debug!("Uploaded {}x{} texture {}", image.width, image.height, id);
        Self { id, width: image.width, height: image.height }
    }

    /// Bind to texture unit `unit`
    pub fn bind(&self, unit: u32) {
        // SAFETY: id is a live texture owned by self.
        unsafe {
            gl::ActiveTexture(gl::TEXTURE0 + unit);
            gl::BindTexture(gl::TEXTURE_2D, self.id);
        }
    }

    /// Size in pixels
    pub const fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl Drop for Texture2D {
    fn drop(&mut self) {
        // SAFETY: id came from glGenTextures and is deleted exactly once.
        unsafe { gl::DeleteTextures(1, &self.id) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = TextureParams::default();
        assert_eq!(params.wrap_s, WrapMode::ClampToBorder);
        assert_eq!(params.wrap_t, WrapMode::ClampToBorder);
        assert_eq!(params.border_color, [1.0, 1.0, 0.0, 1.0]);
        assert_eq!(params.min_filter, FilterMode::LinearMipmapLinear);
        assert_eq!(params.mag_filter, FilterMode::Linear);
        assert!(params.mipmaps);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_gl_enum_mapping() {
        assert_eq!(WrapMode::Repeat.to_gl(), gl::REPEAT);
        assert_eq!(WrapMode::ClampToBorder.to_gl(), gl::CLAMP_TO_BORDER);
        assert_eq!(FilterMode::Nearest.to_gl(), gl::NEAREST);
        assert_eq!(FilterMode::LinearMipmapLinear.to_gl(), gl::LINEAR_MIPMAP_LINEAR);
        assert_eq!(pixel_format_to_gl(PixelFormat::Rgb8), gl::RGB);
        assert_eq!(pixel_format_to_gl(PixelFormat::Rgba8), gl::RGBA);
    }

    #[test]
    fn test_mipmap_filters() {
        assert!(!FilterMode::Linear.uses_mipmaps());
        assert!(FilterMode::NearestMipmapLinear.uses_mipmaps());
    }

    #[test]
    fn test_validation() {
        let mag_mipmap = TextureParams { mag_filter: FilterMode::LinearMipmapLinear, ..TextureParams::default() };
        assert!(mag_mipmap.validate().is_err());

        let no_chain = TextureParams { mipmaps: false, ..TextureParams::default() };
        assert!(no_chain.validate().is_err());

        let plain = TextureParams {
            mipmaps: false,
            min_filter: FilterMode::Nearest,
            ..TextureParams::default()
        };
        assert!(plain.validate().is_ok());

        let bright_border = TextureParams { border_color: [2.0, 0.0, 0.0, 1.0], ..TextureParams::default() };
        assert!(bright_border.validate().is_err());
    }

    #[test]
    fn test_missing_file_fails_before_upload() {
        let result = Texture2D::from_file("no/such/container.jpg", &TextureParams::default());
        assert!(matches!(result, Err(AssetError::Io { .. })));
    }
}
