//! Colored triangle demo
//!
//! Draws one triangle whose color pulses green over time. Press Escape to quit,
//! W to toggle wireframe.

mod common;

use learn_gl::prelude::ApplicationConfig;
use std::process::ExitCode;

fn main() -> ExitCode {
    common::run("triangle", ApplicationConfig::colored_triangle)
}
