mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use app::SalaryDashboardApp;
use clap::Parser;
use config::{Config, DEFAULT_CONFIG_PATH};
use eframe::egui;
use state::AppState;

#[derive(Parser, Debug)]
#[command(name = "salary-prism", version, about = "Salary dataset dashboard")]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_found = cli.config.exists();
    let config = if config_found {
        Config::load(&cli.config).context("loading configuration")?
    } else {
        Config::default()
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.logging.level)).init();
    if !config_found {
        log::info!("{} not found, using default configuration", cli.config.display());
    }

    let title = config.app.title.clone();
    let state = AppState::new(config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(|_cc| Ok(Box::new(SalaryDashboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard: {e}"))
}
