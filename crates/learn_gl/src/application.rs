//! Application lifecycle
//!
//! [`App`] wires the subsystems together in startup order (window and
//! context, geometry, texture, shaders) and runs the render loop until the
//! window's close flag is set.

use thiserror::Error;

use crate::config::ConfigError;
use crate::core::config::ApplicationConfig;
use crate::foundation::time::Timer;
use crate::input::{command_for_event, InputCommand};
use crate::render::{RenderError, Renderer, Window, WindowError};

/// Exit status for window, context and GL loader failures (-1 as an unsigned byte)
pub const EXIT_INIT_FAILURE: u8 = 255;
/// Exit status for every other startup failure
pub const EXIT_FAILURE: u8 = 1;

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration could not be loaded or is invalid
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Window, context or GL loader failure
    #[error("Window error: {0}")]
    Window(#[from] WindowError),

    /// Scene could not be built
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

impl AppError {
    /// Process exit status for this error
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Window(_) => EXIT_INIT_FAILURE,
            Self::Config(_) | Self::Render(_) => EXIT_FAILURE,
        }
    }
}

/// A running tutorial program
pub struct App {
    // Field order is drop order: GL objects go before the context that owns them
    renderer: Renderer,
    window: Window,
    timer: Timer,
    stats_interval_secs: f32,
}

impl App {
    /// Validate `config`, open the window and build the scene
    pub fn new(config: ApplicationConfig) -> Result<Self, AppError> {
        config.validate()?;
        log::info!("Starting {:?} scene", config.scene);

        let window = Window::new(&config.window)?;
        let renderer = Renderer::new(&config, window.framebuffer_size())?;

        Ok(Self {
            renderer,
            window,
            timer: Timer::new(),
            stats_interval_secs: config.render.stats_interval_secs,
        })
    }

    /// Run the render loop until the window is asked to close
    pub fn run(&mut self) -> Result<(), AppError> {
        log::info!("Entering render loop");

        while !self.window.should_close() {
            self.window.poll_events();
            self.handle_events();

            self.renderer.render_frame(self.window.time());
            self.window.swap_buffers();

            self.timer.update();
            if let Some(fps) = self.timer.take_report(self.stats_interval_secs) {
                log::debug!("{:.1} fps over the last {:.0}s", fps, self.stats_interval_secs);
            }
        }

        log::info!(
            "Window closed after {} frames ({:.1} fps average)",
            self.timer.frame_count(),
            self.timer.average_fps()
        );
        Ok(())
    }

    fn handle_events(&mut self) {
        let events: Vec<glfw::WindowEvent> =
            self.window.flush_events().map(|(_, event)| event).collect();

        for event in events {
            if let glfw::WindowEvent::FramebufferSize(width, height) = event {
                self.renderer.set_viewport(width.max(0) as u32, height.max(0) as u32);
                continue;
            }

            match command_for_event(&event) {
                Some(InputCommand::Close) => {
                    log::info!("Escape pressed, closing window");
                    self.window.set_should_close(true);
                }
                Some(InputCommand::ToggleWireframe) => self.renderer.toggle_wireframe(),
                None => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::shader::{ShaderError, ShaderStage};

    #[test]
    fn test_exit_codes() {
        let window = AppError::from(WindowError::CreationFailed(3, 3));
        assert_eq!(window.exit_code(), EXIT_INIT_FAILURE);

        let loader = AppError::from(WindowError::GlLoadFailed("glClear"));
        assert_eq!(loader.exit_code(), EXIT_INIT_FAILURE);

        let shader = AppError::from(RenderError::from(ShaderError::Compile {
            stage: ShaderStage::Fragment,
            log: String::new(),
        }));
        assert_eq!(shader.exit_code(), EXIT_FAILURE);

        let config = AppError::from(ConfigError::Invalid("bad".to_string()));
        assert_eq!(config.exit_code(), EXIT_FAILURE);
    }

    #[test]
    fn test_invalid_config_fails_before_opening_a_window() {
        let mut config = ApplicationConfig::colored_triangle();
        config.window.width = 0;

        let result = App::new(config);
        assert!(matches!(result, Err(AppError::Config(ConfigError::Invalid(_)))));
    }

    #[test]
    fn test_error_messages_chain() {
        let err = AppError::from(WindowError::GlLoadFailed("glGenVertexArrays"));
        assert_eq!(
            err.to_string(),
            "Window error: Failed to load OpenGL function pointers (missing glGenVertexArrays)"
        );
    }
}
