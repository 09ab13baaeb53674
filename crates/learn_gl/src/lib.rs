//! # learn_gl
//!
//! A small OpenGL 3.3 core engine for tutorial programs: a GLFW window with a
//! current GL context, shader programs compiled from text files, static meshes
//! uploaded once, optional 2D textures and a single render loop.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use learn_gl::prelude::*;
//!
//! fn main() -> std::process::ExitCode {
//!     let config = ApplicationConfig::colored_triangle();
//!     learn_gl::foundation::logging::init(&config.logging.level);
//!
//!     match App::new(config).and_then(|mut app| app.run()) {
//!         Ok(()) => std::process::ExitCode::SUCCESS,
//!         Err(e) => {
//!             log::error!("{e}");
//!             std::process::ExitCode::from(e.exit_code())
//!         }
//!     }
//! }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod core;
pub mod foundation;
pub mod assets;
pub mod input;
pub mod render;

mod application;

pub use application::{App, AppError, EXIT_FAILURE, EXIT_INIT_FAILURE};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        App, AppError,
        config::{Config, ConfigError},
        core::config::{
            ApplicationConfig, LoggingConfig, RenderConfig, SceneKind, ShaderConfig,
            TextureConfig, WindowConfig,
        },
        foundation::time::Timer,
        input::InputCommand,
        render::{
            color::pulse_color,
            mesh::{Mesh, Vertex},
            renderer::Renderer,
            shader::{ShaderError, ShaderProgram},
            texture::{FilterMode, Texture2D, TextureParams, WrapMode},
            window::{Window, WindowError},
            RenderError,
        },
    };
}
