use anyhow::Context;
use diorama::{AppConfig, DioramaApp};

fn run() -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    log::info!("loading assets from {}", config.asset_root.display());

    let app = DioramaApp::new(config).context("failed to start")?;
    app.run()
}

fn main() {
    env_logger::init();

    if let Err(err) = run() {
        log::error!("{:#}", err);
        std::process::exit(1);
    }
}
