//! GLFW window with an OpenGL context
//!
//! Creating a [`Window`] initializes GLFW, opens the window with a core
//! profile context, makes that context current on the calling thread and
//! loads the GL function pointers. Everything in [`crate::render`] assumes a
//! live `Window` on the same thread.

use glfw::Context;
use thiserror::Error;

use crate::core::config::WindowConfig;

/// Window management errors
#[derive(Error, Debug)]
pub enum WindowError {
    /// GLFW itself could not start
    #[error("GLFW initialization failed: {0}")]
    InitializationFailed(String),

    /// No window/context matching the hints could be created
    #[error("Failed to create GLFW window with an OpenGL {0}.{1} core context")]
    CreationFailed(u32, u32),

    /// Context is current but GL entry points are missing
    #[error("Failed to load OpenGL function pointers (missing {0})")]
    GlLoadFailed(&'static str),
}

/// GLFW error callback; errors that matter also surface as return values
fn log_glfw_error(error: glfw::Error, description: String) {
    log::error!("GLFW error {:?}: {}", error, description);
}

/// Result type for window operations
pub type WindowResult<T> = Result<T, WindowError>;

/// GLFW window owning the current GL context
pub struct Window {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
}

impl Window {
    /// Open a window as described by `config` and load OpenGL
    pub fn new(config: &WindowConfig) -> WindowResult<Self> {
        let mut glfw = glfw::init(log_glfw_error)
            .map_err(|e| WindowError::InitializationFailed(format!("{e:?}")))?;

        let (major, minor) = config.gl_version;
        glfw.window_hint(glfw::WindowHint::ContextVersion(major, minor));
        glfw.window_hint(glfw::WindowHint::OpenGlProfile(glfw::OpenGlProfileHint::Core));
        #[cfg(target_os = "macos")]
        glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));
        glfw.window_hint(glfw::WindowHint::Resizable(config.resizable));

        let (mut window, events) = glfw
            .create_window(config.width, config.height, &config.title, glfw::WindowMode::Windowed)
            .ok_or(WindowError::CreationFailed(major, minor))?;

        window.make_current();
        window.set_key_polling(true);
        window.set_close_polling(true);
        window.set_framebuffer_size_polling(true);

        gl::load_with(|symbol| window.get_proc_address(symbol) as *const _);
        // Spot-check entry points from each family the renderer uses
        for (name, loaded) in [
            ("glClear", gl::Clear::is_loaded()),
            ("glGenVertexArrays", gl::GenVertexArrays::is_loaded()),
            ("glCreateShader", gl::CreateShader::is_loaded()),
            ("glGenerateMipmap", gl::GenerateMipmap::is_loaded()),
        ] {
            if !loaded {
                return Err(WindowError::GlLoadFailed(name));
            }
        }

        glfw.set_swap_interval(if config.vsync {
            glfw::SwapInterval::Sync(1)
        } else {
            glfw::SwapInterval::None
        });

        log::info!(
            "Created {}x{} window '{}' with OpenGL {}.{} core context",
            config.width, config.height, config.title, major, minor
        );

        Ok(Self { glfw, window, events })
    }

    /// Whether the close flag is set (close button or [`Window::set_should_close`])
    pub fn should_close(&self) -> bool {
        self.window.should_close()
    }

    /// Set or clear the close flag
    pub fn set_should_close(&mut self, should_close: bool) {
        self.window.set_should_close(should_close);
    }

    /// Process pending window system events
    pub fn poll_events(&mut self) {
        self.glfw.poll_events();
    }

    /// Events received by the last [`Window::poll_events`]
    pub fn flush_events(&self) -> glfw::FlushedMessages<'_, (f64, glfw::WindowEvent)> {
        glfw::flush_messages(&self.events)
    }

    /// Present the back buffer; blocks for vsync when enabled
    pub fn swap_buffers(&mut self) {
        self.window.swap_buffers();
    }

    /// Seconds since GLFW was initialized
    pub fn time(&self) -> f64 {
        self.glfw.get_time()
    }

    /// Framebuffer size in pixels (differs from the window size on high-DPI screens)
    pub fn framebuffer_size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_framebuffer_size();
        (width.max(0) as u32, height.max(0) as u32)
    }
}
