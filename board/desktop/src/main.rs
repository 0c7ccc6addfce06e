use anyhow::{anyhow, Context};
use log::info;

use app::RemoteApp;
use config::Config;

mod app;
mod config;
mod link;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().context("Failed to load configuration")?;
    info!(
        "Vehicle at {} (controls every {:?}, telemetry every {:?})",
        config.base_url, config.control_interval, config.telemetry_interval
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([760.0, 520.0])
            .with_title("DucRemote"),
        ..Default::default()
    };

    eframe::run_native(
        "DucRemote",
        options,
        Box::new(move |cc| Ok(Box::new(RemoteApp::new(cc, config)))),
    )
    .map_err(|e| anyhow!("DucRemote exited with an error: {e}"))?;

    info!("Stopped");
    Ok(())
}
