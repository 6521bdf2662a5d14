mod app;
mod commands;
mod effects;
mod render;
mod settings;

use std::path::PathBuf;

use anyhow::Context;

fn main() -> anyhow::Result<()> {
    let settings_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(settings::DEFAULT_SETTINGS_FILE));

    let settings = settings::load_settings(&settings_path)
        .with_context(|| format!("loading settings from {}", settings_path.display()))?;
    engine_logging::initialize(settings.log_destination, settings.log_level()?);

    app::run_app(settings)
}
