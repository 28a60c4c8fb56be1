use anyhow::Context;
use orrery::{OrreryApp, OrreryConfig};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = OrreryConfig::from_env().context("invalid ORRERY_* override")?;
    log::info!(
        "Starting orrery with assets from {}",
        config.asset_dir.display()
    );

    let app = OrreryApp::new(config).context("failed to create the event loop")?;
    app.run().context("orrery stopped with an error")
}
