//! Shader program loading
//!
//! A [`ShaderProgram`] is built from one vertex and one fragment source: each
//! is compiled, both are attached and linked, and the intermediate shader
//! objects are released whatever the outcome. Any read, compile or link
//! failure is returned as a [`ShaderError`] carrying the driver's info log.

use gl::types::{GLchar, GLenum, GLint, GLuint};
use std::collections::HashMap;
use std::ffi::{CStr, CString};
use std::fmt;
use std::path::Path;
use std::ptr;
use thiserror::Error;

/// Programmable pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    /// Per-vertex stage
    Vertex,
    /// Per-fragment stage
    Fragment,
}

impl ShaderStage {
    const fn gl_kind(self) -> GLenum {
        match self {
            Self::Vertex => gl::VERTEX_SHADER,
            Self::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex => f.write_str("vertex"),
            Self::Fragment => f.write_str("fragment"),
        }
    }
}

/// Shader loading errors
#[derive(Error, Debug)]
pub enum ShaderError {
    /// Source file could not be read
    #[error("Failed to read {stage} shader source {path}: {source}")]
    Read {
        /// Stage the file was meant for
        stage: ShaderStage,
        /// Path that was read
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Source text cannot be handed to the driver
    #[error("{stage} shader source contains a NUL byte at offset {position}")]
    InvalidSource {
        /// Offending stage
        stage: ShaderStage,
        /// Byte offset of the NUL
        position: usize,
    },

    /// The driver rejected a source
    #[error("{stage} shader compilation failed:\n{log}")]
    Compile {
        /// Offending stage
        stage: ShaderStage,
        /// Driver info log
        log: String,
    },

    /// Compiled stages could not be linked
    #[error("Shader program linking failed:\n{log}")]
    Link {
        /// Driver info log
        log: String,
    },
}

/// Read a whole shader source file
pub fn read_source(stage: ShaderStage, path: impl AsRef<Path>) -> Result<String, ShaderError> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|source| ShaderError::Read {
        stage,
        path: path.display().to_string(),
        source,
    })
}

fn to_c_source(stage: ShaderStage, source: &str) -> Result<CString, ShaderError> {
    CString::new(source).map_err(|e| ShaderError::InvalidSource {
        stage,
        position: e.nul_position(),
    })
}

/// Turn a raw info log buffer into text, dropping the terminator and trailing whitespace
fn info_log_to_string(buffer: &[u8]) -> String {
    let end = buffer.iter().position(|&b| b == 0).unwrap_or(buffer.len());
    String::from_utf8_lossy(&buffer[..end]).trim_end().to_string()
}

/// Compiled shader object, deleted on drop
struct CompiledShader {
    id: GLuint,
}

impl CompiledShader {
    fn compile(stage: ShaderStage, source: &CStr) -> Result<Self, ShaderError> {
        // SAFETY: requires a current context; `source` is NUL-terminated and
        // outlives the ShaderSource call, which copies it.
        let shader = unsafe {
            let shader = Self { id: gl::CreateShader(stage.gl_kind()) };
            gl::ShaderSource(shader.id, 1, &source.as_ptr(), ptr::null());
            gl::CompileShader(shader.id);
            shader
        };

        let mut success = GLint::from(gl::FALSE);
        // SAFETY: `success` is a valid out pointer.
        unsafe { gl::GetShaderiv(shader.id, gl::COMPILE_STATUS, &mut success) };

        if success == GLint::from(gl::TRUE) {
            Ok(shader)
        } else {
            Err(ShaderError::Compile { stage, log: shader.info_log() })
        }
    }

    fn info_log(&self) -> String {
        let mut len: GLint = 0;
        // SAFETY: out pointers are valid; the buffer is sized from INFO_LOG_LENGTH.
        unsafe {
            gl::GetShaderiv(self.id, gl::INFO_LOG_LENGTH, &mut len);
            let mut buffer = vec![0u8; len.max(1) as usize];
            gl::GetShaderInfoLog(
                self.id,
                buffer.len() as GLint,
                ptr::null_mut(),
                buffer.as_mut_ptr().cast::<GLchar>(),
            );
            info_log_to_string(&buffer)
        }
    }
}

impl Drop for CompiledShader {
    fn drop(&mut self) {
        // SAFETY: id came from glCreateShader; deleting an attached shader only flags it.
        unsafe { gl::DeleteShader(self.id) };
    }
}

/// Linked GPU program
pub struct ShaderProgram {
    id: GLuint,
    uniform_locations: HashMap<String, Option<GLint>>,
}

impl ShaderProgram {
    /// Read, compile and link the two source files
    pub fn from_files(
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<Self, ShaderError> {
        let vertex_path = vertex_path.as_ref();
        let fragment_path = fragment_path.as_ref();
        log::debug!("Loading shaders {:?} and {:?}", vertex_path, fragment_path);

        let vertex_source = read_source(ShaderStage::Vertex, vertex_path)?;
        let fragment_source = read_source(ShaderStage::Fragment, fragment_path)?;
        Self::from_sources(&vertex_source, &fragment_source)
    }

    /// Compile and link two GLSL sources
    pub fn from_sources(vertex_source: &str, fragment_source: &str) -> Result<Self, ShaderError> {
        let vertex_source = to_c_source(ShaderStage::Vertex, vertex_source)?;
        let fragment_source = to_c_source(ShaderStage::Fragment, fragment_source)?;

        let vertex = CompiledShader::compile(ShaderStage::Vertex, &vertex_source)?;
        let fragment = CompiledShader::compile(ShaderStage::Fragment, &fragment_source)?;

        // SAFETY: requires a current context; the program is owned by `program`
        // from here on so every early return deletes it.
        let program = unsafe {
            let program = Self { id: gl::CreateProgram(), uniform_locations: HashMap::new() };
            gl::AttachShader(program.id, vertex.id);
            gl::AttachShader(program.id, fragment.id);
            gl::LinkProgram(program.id);
            gl::DetachShader(program.id, vertex.id);
            gl::DetachShader(program.id, fragment.id);
            program
        };

        let mut success = GLint::from(gl::FALSE);
        // SAFETY: `success` is a valid out pointer.
        unsafe { gl::GetProgramiv(program.id, gl::LINK_STATUS, &mut success) };

        if success != GLint::from(gl::TRUE) {
            return Err(ShaderError::Link { log: program.info_log() });
        }

        log::info!("Linked shader program {}", program.id);
        Ok(program)
    }

    fn info_log(&self) -> String {
        let mut len: GLint = 0;
        // SAFETY: out pointers are valid; the buffer is sized from INFO_LOG_LENGTH.
        unsafe {
            gl::GetProgramiv(self.id, gl::INFO_LOG_LENGTH, &mut len);
            let mut buffer = vec![0u8; len.max(1) as usize];
            gl::GetProgramInfoLog(
                self.id,
                buffer.len() as GLint,
                ptr::null_mut(),
                buffer.as_mut_ptr().cast::<GLchar>(),
            );
            info_log_to_string(&buffer)
        }
    }

    /// Make this the active program
    pub fn use_program(&self) {
        // SAFETY: id is a linked program owned by self.
        unsafe { gl::UseProgram(self.id) };
    }

    /// Location of an active uniform, `None` if the linker dropped or never saw it
    pub fn uniform_location(&mut self, name: &str) -> Option<GLint> {
        if let Some(&location) = self.uniform_locations.get(name) {
            return location;
        }

        let location = CString::new(name).ok().and_then(|c_name| {
            // SAFETY: c_name is NUL-terminated and lives across the call.
            let location = unsafe { gl::GetUniformLocation(self.id, c_name.as_ptr()) };
            (location >= 0).then_some(location)
        });

        if location.is_none() {
            log::debug!("Uniform '{}' is not active in program {}", name, self.id);
        }
        self.uniform_locations.insert(name.to_string(), location);
        location
    }

    /// Set a `vec4` uniform; the program must be in use
    pub fn set_vec4(&mut self, name: &str, value: [f32; 4]) {
        if let Some(location) = self.uniform_location(name) {
            // SAFETY: location belongs to this program.
            unsafe { gl::Uniform4f(location, value[0], value[1], value[2], value[3]) };
        }
    }

    /// Set an `int` (or sampler) uniform; the program must be in use
    pub fn set_int(&mut self, name: &str, value: i32) {
        if let Some(location) = self.uniform_location(name) {
            // SAFETY: location belongs to this program.
            unsafe { gl::Uniform1i(location, value) };
        }
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        // SAFETY: id came from glCreateProgram and is deleted exactly once.
        unsafe { gl::DeleteProgram(self.id) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_source() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "#version 330 core\nvoid main() {{}}\n").unwrap();

        let source = read_source(ShaderStage::Vertex, file.path()).unwrap();
        assert!(source.starts_with("#version 330 core"));
    }

    #[test]
    fn test_missing_source_is_an_error() {
        let err = read_source(ShaderStage::Fragment, "no/such/shader.frag").unwrap_err();
        match &err {
            ShaderError::Read { stage, path, .. } => {
                assert_eq!(*stage, ShaderStage::Fragment);
                assert_eq!(path, "no/such/shader.frag");
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(err.to_string().starts_with("Failed to read fragment shader source no/such/shader.frag"));
    }

    #[test]
    fn test_from_files_fails_before_touching_gl() {
        // Reading happens first, so no context is needed to see this error
        let result = ShaderProgram::from_files("missing.vs", "missing.frag");
        assert!(matches!(result, Err(ShaderError::Read { stage: ShaderStage::Vertex, .. })));
    }

    #[test]
    fn test_nul_bytes_are_rejected() {
        let err = to_c_source(ShaderStage::Vertex, "void main() {\0}").unwrap_err();
        assert!(matches!(err, ShaderError::InvalidSource { stage: ShaderStage::Vertex, position: 13 }));

        assert!(to_c_source(ShaderStage::Fragment, "void main() {}").is_ok());
    }

    #[test]
    fn test_info_log_trimming() {
        assert_eq!(info_log_to_string(b"0(3) : error C0000: syntax error\n\0"), "0(3) : error C0000: syntax error");
        assert_eq!(info_log_to_string(b"\0\0\0"), "");
        assert_eq!(info_log_to_string(b"no terminator  "), "no terminator");
    }

    #[test]
    fn test_error_messages() {
        let err = ShaderError::Compile {
            stage: ShaderStage::Vertex,
            log: "0:1: 'foo' : undeclared identifier".to_string(),
        };
        assert_eq!(err.to_string(), "vertex shader compilation failed:\n0:1: 'foo' : undeclared identifier");

        let err = ShaderError::Link { log: "missing main".to_string() };
        assert_eq!(err.to_string(), "Shader program linking failed:\nmissing main");
    }
}
