use anyhow::Context;
use clap::Parser;

use ringed_planet::{
    app::PlanetApp,
    config::{CliArgs, SceneConfig},
};

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let mut config = match &args.config {
        Some(path) => SceneConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => SceneConfig::default(),
    };
    config.apply_cli_overrides(&args);
    config.validate().context("invalid scene configuration")?;

    // RUST_LOG wins over the configured level
    let filter = format!(
        "{},wgpu_core=warn,wgpu_hal=warn,naga=warn",
        config.debug.log_level
    );
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    if let Some(path) = &args.dump_config {
        config
            .save(path)
            .with_context(|| format!("failed to write config to {}", path.display()))?;
        return Ok(());
    }

    let app = PlanetApp::new(&config).context("failed to set up the scene")?;
    app.run()?;
    Ok(())
}
