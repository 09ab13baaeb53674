//! Scene renderer
//!
//! Owns the GPU resources of one tutorial scene and records the fixed
//! per-frame sequence: clear, activate the program, update the pulse color,
//! bind the texture, draw.

use gl::types::{GLenum, GLint};
use std::ffi::CStr;

use crate::core::config::{ApplicationConfig, RenderConfig, SceneKind};
use crate::render::buffer::GpuMesh;
use crate::render::color::pulse_color;
use crate::render::mesh::Mesh;
use crate::render::shader::ShaderProgram;
use crate::render::texture::Texture2D;
use crate::render::{drain_gl_errors, RenderError, RenderResult};

/// Texture unit the scene texture is bound to
const TEXTURE_UNIT: u32 = 0;

/// Driver identification and the limits the tutorial cares about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlInfo {
    /// `GL_VENDOR`
    pub vendor: String,
    /// `GL_RENDERER`
    pub renderer: String,
    /// `GL_VERSION`
    pub version: String,
    /// `GL_MAX_VERTEX_ATTRIBS`
    pub max_vertex_attribs: i32,
}

impl GlInfo {
    /// Query the current context
    pub fn query() -> Self {
        let mut max_vertex_attribs: GLint = 0;
        // SAFETY: valid out pointer, current context.
        unsafe { gl::GetIntegerv(gl::MAX_VERTEX_ATTRIBS, &mut max_vertex_attribs) };

        Self {
            vendor: gl_string(gl::VENDOR),
            renderer: gl_string(gl::RENDERER),
            version: gl_string(gl::VERSION),
            max_vertex_attribs,
        }
    }
}

fn gl_string(name: GLenum) -> String {
    // SAFETY: glGetString returns NULL or a static NUL-terminated string.
    unsafe {
        let ptr = gl::GetString(name);
        if ptr.is_null() {
            return String::from("unknown");
        }
        CStr::from_ptr(ptr.cast()).to_string_lossy().into_owned()
    }
}

/// Build the CPU-side geometry for a scene
pub fn scene_mesh(scene: SceneKind) -> Mesh {
    match scene {
        SceneKind::ColoredTriangle => Mesh::colored_triangle(),
        SceneKind::TexturedQuad => Mesh::textured_quad(),
    }
}

/// GPU resources and per-frame state of one scene
pub struct Renderer {
    program: ShaderProgram,
    mesh: GpuMesh,
    texture: Option<Texture2D>,
    settings: RenderConfig,
    wireframe: bool,
    checked_first_frame: bool,
}

impl Renderer {
    /// Upload the scene geometry, load the texture and build the shader program
    ///
    /// Requires the context of a live [`crate::render::Window`].
    pub fn new(config: &ApplicationConfig, framebuffer_size: (u32, u32)) -> RenderResult<Self> {
        let info = GlInfo::query();
        log::info!("OpenGL {} on {} ({})", info.version, info.renderer, info.vendor);
        log::info!("Maximum number of vertex attributes supported: {}", info.max_vertex_attribs);

        let mesh = GpuMesh::upload(&scene_mesh(config.scene))?;

        let texture = match (config.scene, &config.texture) {
            (SceneKind::TexturedQuad, None) => {
                return Err(RenderError::InvalidConfig(
                    "textured_quad scene has no texture configured".to_string(),
                ));
            }
            (SceneKind::TexturedQuad, Some(texture)) => {
                Some((Texture2D::from_file(&texture.path, &texture.params)?, texture))
            }
            (SceneKind::ColoredTriangle, _) => None,
        };

        let mut program = ShaderProgram::from_files(
            &config.shaders.vertex_shader_path,
            &config.shaders.fragment_shader_path,
        )?;

        if let Some((_, texture_config)) = &texture {
            program.use_program();
            program.set_int(&texture_config.sampler_uniform, TEXTURE_UNIT as i32);
        }

        log::info!(
            "Scene {:?}: {} mesh{}",
            config.scene,
            if mesh.is_indexed() { "indexed" } else { "non-indexed" },
            texture.as_ref().map_or_else(String::new, |(t, _)| {
                let (w, h) = t.size();
                format!(", {w}x{h} texture")
            })
        );

        let mut renderer = Self {
            program,
            mesh,
            texture: texture.map(|(texture, _)| texture),
            settings: config.render.clone(),
            wireframe: false,
            checked_first_frame: false,
        };
        renderer.set_viewport(framebuffer_size.0, framebuffer_size.1);
        renderer.set_wireframe(config.render.wireframe);

        if drain_gl_errors("renderer setup") > 0 {
            log::warn!("OpenGL reported errors while building the scene");
        }
        Ok(renderer)
    }

    /// Draw one frame for `elapsed_secs` since startup
    pub fn render_frame(&mut self, elapsed_secs: f64) {
        let [r, g, b, a] = self.settings.clear_color;
        // SAFETY: plain state calls on the current context.
        unsafe {
            gl::ClearColor(r, g, b, a);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }

        self.program.use_program();
        self.program.set_vec4(&self.settings.color_uniform, pulse_color(elapsed_secs));

        if let Some(texture) = &self.texture {
            texture.bind(TEXTURE_UNIT);
        }
        self.mesh.draw();

        if !self.checked_first_frame || cfg!(debug_assertions) {
            self.checked_first_frame = true;
            drain_gl_errors("frame");
        }
    }

    /// Map normalized device coordinates onto a `width` x `height` framebuffer
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        log::debug!("Viewport {}x{}", width, height);
        // SAFETY: non-negative sizes; plain state call.
        unsafe { gl::Viewport(0, 0, width as GLint, height as GLint) };
    }

    /// Draw polygon outlines instead of filled triangles
    pub fn set_wireframe(&mut self, wireframe: bool) {
        self.wireframe = wireframe;
        let mode = if wireframe { gl::LINE } else { gl::FILL };
        // SAFETY: plain state call.
        unsafe { gl::PolygonMode(gl::FRONT_AND_BACK, mode) };
    }

    /// Flip between wireframe and filled polygons
    pub fn toggle_wireframe(&mut self) {
        self.set_wireframe(!self.wireframe);
        log::info!("Wireframe {}", if self.wireframe { "on" } else { "off" });
    }
}
