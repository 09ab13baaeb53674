//! OpenGL rendering
//!
//! Everything that touches the GL context lives under this module. GL objects
//! are wrapped in owning types that delete them on drop; they must be dropped
//! while the context from [`window::Window`] is still current.

pub mod buffer;
pub mod color;
pub mod mesh;
pub mod renderer;
pub mod shader;
pub mod texture;
pub mod window;

pub use renderer::Renderer;
pub use window::{Window, WindowError};

use thiserror::Error;

use crate::assets::AssetError;
use shader::ShaderError;

/// Rendering errors
#[derive(Error, Debug)]
pub enum RenderError {
    /// Shader program could not be built
    #[error(transparent)]
    Shader(#[from] ShaderError),

    /// Texture image could not be loaded
    #[error("Texture error: {0}")]
    Texture(#[from] AssetError),

    /// Geometry failed validation before upload
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// Renderer settings are inconsistent
    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;

/// Symbolic name of a `glGetError` code
pub const fn gl_error_name(code: gl::types::GLenum) -> &'static str {
    match code {
        gl::NO_ERROR => "GL_NO_ERROR",
        gl::INVALID_ENUM => "GL_INVALID_ENUM",
        gl::INVALID_VALUE => "GL_INVALID_VALUE",
        gl::INVALID_OPERATION => "GL_INVALID_OPERATION",
        gl::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        gl::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        _ => "unknown GL error",
    }
}

/// Drain the GL error queue, logging each entry with `context`
///
/// Returns the number of errors found.
pub(crate) fn drain_gl_errors(context: &str) -> usize {
    let mut count = 0;
    loop {
        // SAFETY: glGetError has no preconditions beyond a current context.
        let code = unsafe { gl::GetError() };
        if code == gl::NO_ERROR {
            break;
        }
        log::error!("{context}: {} (0x{code:04X})", gl_error_name(code));
        count += 1;
        // A lost context can report the same error forever
        if count >= 16 {
            break;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gl_error_names() {
        assert_eq!(gl_error_name(gl::NO_ERROR), "GL_NO_ERROR");
        assert_eq!(gl_error_name(gl::INVALID_OPERATION), "GL_INVALID_OPERATION");
        assert_eq!(gl_error_name(0xFFFF), "unknown GL error");
    }

    #[test]
    fn test_render_error_messages() {
        let err = RenderError::InvalidMesh("index 7 out of range".to_string());
        assert_eq!(err.to_string(), "Invalid mesh: index 7 out of range");

        let err: RenderError = AssetError::LoadFailed("bad header".to_string()).into();
        assert_eq!(err.to_string(), "Texture error: Asset load failed: bad header");
    }
}
