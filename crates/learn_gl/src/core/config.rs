//! # Application Configuration
//!
//! All settings a tutorial program needs, grouped by subsystem: window and GL
//! context, shader sources, the optional texture, per-frame render state and
//! logging. Two presets mirror the two programs shipped in `tutorial_app`.
//!
//! Every section has a `Default`, builder-style `with_*` setters and a
//! structural `validate()`. File existence is not checked here; missing shader
//! or texture files surface as load errors when the renderer is built.

use serde::{Serialize, Deserialize};
use std::path::Path;

use crate::config::{Config, ConfigError};
use crate::render::texture::TextureParams;

/// Directories searched, in order, when resolving a bare asset file name
const SHADER_DIRS: [&str; 4] = ["resources/shaders/", "shaders/", "../resources/shaders/", "./"];
const TEXTURE_DIRS: [&str; 4] = ["resources/textures/", "textures/", "../resources/textures/", "./"];

/// Resolve `file_name` against `dirs`, returning the first existing candidate
///
/// Falls back to the first directory when nothing exists so that the eventual
/// read error names a sensible path.
fn resolve_asset_path(file_name: &str, dirs: &[&str]) -> String {
    dirs.iter()
        .map(|dir| format!("{dir}{file_name}"))
        .find(|candidate| Path::new(candidate).exists())
        .unwrap_or_else(|| format!("{}{file_name}", dirs.first().copied().unwrap_or("")))
}

/// Which of the two tutorial scenes to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneKind {
    /// One triangle, no index buffer, no texture
    ColoredTriangle,
    /// A rectangle made of two indexed triangles with a texture
    TexturedQuad,
}

/// # Window Configuration
///
/// Window size and title plus the OpenGL context that GLFW is asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Client area width in screen coordinates
    pub width: u32,
    /// Client area height in screen coordinates
    pub height: u32,
    /// Whether the user may resize the window
    pub resizable: bool,
    /// Requested OpenGL context version (major, minor); always a core profile
    pub gl_version: (u32, u32),
    /// Wait for vertical sync when swapping buffers
    pub vsync: bool,
}

impl WindowConfig {
    /// Create a window configuration with the given title and the default 800x600 size
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            width: 800,
            height: 600,
            resizable: false,
            gl_version: (3, 3),
            vsync: true,
        }
    }

    /// Set the window size
    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Allow or forbid resizing
    #[must_use]
    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    /// Enable or disable vsync
    #[must_use]
    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.title.is_empty() {
            return Err(ConfigError::Invalid("window title cannot be empty".to_string()));
        }
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.gl_version < (3, 3) {
            return Err(ConfigError::Invalid(format!(
                "OpenGL {}.{} has no core profile with vertex array objects, need 3.3 or newer",
                self.gl_version.0, self.gl_version.1
            )));
        }
        Ok(())
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::new("LearnOpenGL")
    }
}

/// # Shader Configuration
///
/// Paths of the GLSL vertex and fragment sources compiled at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShaderConfig {
    /// Path to the vertex shader source
    pub vertex_shader_path: String,
    /// Path to the fragment shader source
    pub fragment_shader_path: String,
}

impl ShaderConfig {
    /// Create a new shader configuration
    pub fn new(vertex_path: impl Into<String>, fragment_path: impl Into<String>) -> Self {
        Self {
            vertex_shader_path: vertex_path.into(),
            fragment_shader_path: fragment_path.into(),
        }
    }

    /// Create shader config with automatic path resolution
    ///
    /// Tries the usual shader directories so the programs work when started
    /// from the workspace root or from a member directory.
    pub fn with_path_resolution(base_vertex: &str, base_fragment: &str) -> Self {
        Self {
            vertex_shader_path: resolve_asset_path(base_vertex, &SHADER_DIRS),
            fragment_shader_path: resolve_asset_path(base_fragment, &SHADER_DIRS),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.vertex_shader_path.is_empty() || self.fragment_shader_path.is_empty() {
            return Err(ConfigError::Invalid("shader paths cannot be empty".to_string()));
        }
        Ok(())
    }
}

impl Default for ShaderConfig {
    fn default() -> Self {
        Self::with_path_resolution("triangle.vs", "triangle.frag")
    }
}

/// # Texture Configuration
///
/// Image file and sampling parameters for the textured scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureConfig {
    /// Path to the image file
    pub path: String,
    /// Name of the `sampler2D` uniform bound to texture unit 0
    pub sampler_uniform: String,
    /// Wrapping, filtering and mipmap settings
    pub params: TextureParams,
}

impl TextureConfig {
    /// Create a texture configuration with default sampling parameters
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            sampler_uniform: "ourTexture".to_string(),
            params: TextureParams::default(),
        }
    }

    /// Create a texture configuration with automatic path resolution
    pub fn with_path_resolution(file_name: &str) -> Self {
        Self::new(resolve_asset_path(file_name, &TEXTURE_DIRS))
    }

    /// Set sampling parameters
    #[must_use]
    pub fn with_params(mut self, params: TextureParams) -> Self {
        self.params = params;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.path.is_empty() {
            return Err(ConfigError::Invalid("texture path cannot be empty".to_string()));
        }
        if self.sampler_uniform.is_empty() {
            return Err(ConfigError::Invalid("sampler uniform name cannot be empty".to_string()));
        }
        self.params.validate().map_err(ConfigError::Invalid)
    }
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self::with_path_resolution("container.png")
    }
}

/// # Render Configuration
///
/// Per-frame state: clear color, the animated color uniform, polygon mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// RGBA color the back buffer is cleared to every frame
    pub clear_color: [f32; 4],
    /// Name of the `vec4` uniform receiving the pulse color
    pub color_uniform: String,
    /// Start in wireframe polygon mode
    pub wireframe: bool,
    /// Seconds between frame-rate log lines; zero disables them
    pub stats_interval_secs: f32,
}

impl RenderConfig {
    /// Set the clear color
    #[must_use]
    pub fn with_clear_color(mut self, color: [f32; 4]) -> Self {
        self.clear_color = color;
        self
    }

    /// Start in wireframe mode
    #[must_use]
    pub fn with_wireframe(mut self, wireframe: bool) -> Self {
        self.wireframe = wireframe;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.clear_color.iter().any(|c| !(0.0..=1.0).contains(c)) {
            return Err(ConfigError::Invalid(format!(
                "clear color components must be in [0, 1], got {:?}",
                self.clear_color
            )));
        }
        if self.color_uniform.is_empty() {
            return Err(ConfigError::Invalid("color uniform name cannot be empty".to_string()));
        }
        if !self.stats_interval_secs.is_finite() || self.stats_interval_secs < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "stats interval must be a non-negative number of seconds, got {}",
                self.stats_interval_secs
            )));
        }
        Ok(())
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            clear_color: [0.2, 0.3, 0.3, 1.0],
            color_uniform: "ourColor".to_string(),
            wireframe: false,
            stats_interval_secs: 5.0,
        }
    }
}

/// # Logging Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// env_logger filter used when `RUST_LOG` is not set
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: if cfg!(debug_assertions) { "debug" } else { "info" }.to_string(),
        }
    }
}

/// # Complete Application Configuration
///
/// Top-level configuration read by [`crate::App`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Scene to build
    pub scene: SceneKind,
    /// Window and context settings
    pub window: WindowConfig,
    /// Shader sources
    pub shaders: ShaderConfig,
    /// Per-frame render state
    pub render: RenderConfig,
    /// Logging settings
    pub logging: LoggingConfig,
    /// Texture, required by [`SceneKind::TexturedQuad`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture: Option<TextureConfig>,
}

impl ApplicationConfig {
    /// Preset for the colored triangle program
    pub fn colored_triangle() -> Self {
        Self {
            scene: SceneKind::ColoredTriangle,
            window: WindowConfig::default(),
            shaders: ShaderConfig::with_path_resolution("triangle.vs", "triangle.frag"),
            render: RenderConfig::default(),
            logging: LoggingConfig::default(),
            texture: None,
        }
    }

    /// Preset for the textured rectangle program
    pub fn textured_quad() -> Self {
        Self {
            scene: SceneKind::TexturedQuad,
            window: WindowConfig::default(),
            shaders: ShaderConfig::with_path_resolution("textured.vs", "textured.frag"),
            render: RenderConfig::default(),
            logging: LoggingConfig::default(),
            texture: Some(TextureConfig::default()),
        }
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.window.validate()?;
        self.shaders.validate()?;
        self.render.validate()?;

        match (&self.scene, &self.texture) {
            (SceneKind::TexturedQuad, None) => Err(ConfigError::Invalid(
                "the textured_quad scene needs a [texture] section".to_string(),
            )),
            (_, Some(texture)) => texture.validate(),
            (SceneKind::ColoredTriangle, None) => Ok(()),
        }
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self::colored_triangle()
    }
}

impl Config for ApplicationConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::texture::{FilterMode, WrapMode};

    #[test]
    fn test_presets_are_valid() {
        let triangle = ApplicationConfig::colored_triangle();
        assert_eq!(triangle.scene, SceneKind::ColoredTriangle);
        assert!(triangle.texture.is_none());
        assert!(triangle.validate().is_ok());

        let quad = ApplicationConfig::textured_quad();
        assert_eq!(quad.scene, SceneKind::TexturedQuad);
        assert!(quad.texture.is_some());
        assert!(quad.validate().is_ok());
    }

    #[test]
    fn test_window_defaults() {
        let window = WindowConfig::default();
        assert_eq!((window.width, window.height), (800, 600));
        assert_eq!(window.title, "LearnOpenGL");
        assert_eq!(window.gl_version, (3, 3));
        assert!(!window.resizable);
    }

    #[test]
    fn test_window_validation() {
        assert!(WindowConfig::default().with_size(0, 600).validate().is_err());
        assert!(WindowConfig::new("").validate().is_err());

        let mut old_gl = WindowConfig::default();
        old_gl.gl_version = (2, 1);
        assert!(old_gl.validate().is_err());

        let mut newer_gl = WindowConfig::default();
        newer_gl.gl_version = (4, 1);
        assert!(newer_gl.validate().is_ok());
    }

    #[test]
    fn test_textured_scene_requires_texture() {
        let mut config = ApplicationConfig::textured_quad();
        config.texture = None;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_texture_params_are_validated() {
        let mut config = ApplicationConfig::textured_quad();
        config.texture = Some(TextureConfig::new("wall.png").with_params(TextureParams {
            mipmaps: false,
            min_filter: FilterMode::LinearMipmapLinear,
            ..TextureParams::default()
        }));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_render_validation() {
        assert!(RenderConfig::default().validate().is_ok());
        assert!(RenderConfig::default().with_clear_color([1.5, 0.0, 0.0, 1.0]).validate().is_err());

        let mut render = RenderConfig::default();
        render.stats_interval_secs = -1.0;
        assert!(render.validate().is_err());
    }

    #[test]
    fn test_path_resolution_falls_back_to_first_dir() {
        let shaders = ShaderConfig::with_path_resolution("no_such_shader.vs", "no_such_shader.frag");
        assert_eq!(shaders.vertex_shader_path, "resources/shaders/no_such_shader.vs");
        assert_eq!(shaders.fragment_shader_path, "resources/shaders/no_such_shader.frag");
    }

    #[test]
    fn test_path_resolution_prefers_first_existing_dir() {
        let missing = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        let third = tempfile::tempdir().unwrap();
        std::fs::write(second.path().join("shared.vs"), "").unwrap();
        std::fs::write(third.path().join("shared.vs"), "").unwrap();
        std::fs::write(third.path().join("late.vs"), "").unwrap();

        let dirs: Vec<String> = [&missing, &second, &third]
            .iter()
            .map(|dir| format!("{}/", dir.path().display()))
            .collect();
        let dirs: Vec<&str> = dirs.iter().map(String::as_str).collect();

        assert_eq!(resolve_asset_path("shared.vs", &dirs), format!("{}shared.vs", dirs[1]));
        assert_eq!(resolve_asset_path("late.vs", &dirs), format!("{}late.vs", dirs[2]));
        assert_eq!(resolve_asset_path("nowhere.vs", &dirs), format!("{}nowhere.vs", dirs[0]));
    }

    #[test]
    fn test_builders() {
        let window = WindowConfig::new("Builders").with_size(640, 480).with_vsync(false);
        assert_eq!((window.width, window.height), (640, 480));
        assert!(!window.vsync);
        assert!(window.validate().is_ok());

        let render = RenderConfig::default().with_wireframe(true);
        assert!(render.wireframe);
        assert!(!RenderConfig::default().wireframe);
    }

    #[test]
    fn test_config_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ApplicationConfig::textured_quad();
        config.window = config.window.with_size(1024, 768).with_resizable(true);
        config.texture = Some(TextureConfig::new("wall.jpg").with_params(TextureParams {
            wrap_s: WrapMode::Repeat,
            ..TextureParams::default()
        }));

        for file in ["app.toml", "app.ron"] {
            let path = dir.path().join(file);
            config.save_to_file(&path).unwrap();
            let loaded = ApplicationConfig::load_from_file(&path).unwrap();
            assert_eq!(loaded, config);
        }
    }

    #[test]
    fn test_partial_file_without_texture() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("triangle.toml");
        ApplicationConfig::colored_triangle().save_to_file(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("[texture"));

        let loaded = ApplicationConfig::load_from_file(&path).unwrap();
        assert!(loaded.texture.is_none());
    }
}
