//! Textured rectangle demo
//!
//! Draws a textured rectangle from two indexed triangles, tinted by the same
//! pulsing uniform as the triangle demo.

mod common;

use learn_gl::prelude::ApplicationConfig;
use std::process::ExitCode;

fn main() -> ExitCode {
    common::run("textured_quad", ApplicationConfig::textured_quad)
}
