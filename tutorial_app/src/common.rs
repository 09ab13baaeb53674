//! Startup shared by the tutorial binaries

use learn_gl::prelude::*;
use std::path::PathBuf;
use std::process::ExitCode;

/// Config files looked up in the working directory; TOML wins over RON
fn config_candidates(program: &str) -> [PathBuf; 2] {
    [PathBuf::from(format!("{program}.toml")), PathBuf::from(format!("{program}.ron"))]
}

/// Load the program's config (or `preset`), then open the window and render until closed
pub fn run(program: &str, preset: fn() -> ApplicationConfig) -> ExitCode {
    let [toml_path, ron_path] = config_candidates(program);
    let config_path = if ron_path.exists() && !toml_path.exists() { ron_path } else { toml_path };

    let config = match ApplicationConfig::load_or_else(&config_path, preset) {
        Ok(config) => {
            learn_gl::foundation::logging::init(&config.logging.level);
            config
        }
        Err(e) => {
            learn_gl::foundation::logging::init("info");
            log::error!("{}: {e}", config_path.display());
            return ExitCode::from(learn_gl::EXIT_FAILURE);
        }
    };

    if config_path.exists() {
        log::info!("Using configuration from {}", config_path.display());
    } else {
        log::info!("Using built-in {program} configuration");
    }

    match App::new(config).and_then(|mut app| app.run()) {
        Ok(()) => {
            log::info!("{program} finished successfully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}
