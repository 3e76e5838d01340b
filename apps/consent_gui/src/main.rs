mod backend_bridge;
mod config;
mod controller;
mod ui;

use anyhow::{anyhow, Context};
use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use location_core::build_provider;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::config::{load_settings, Args};
use crate::controller::{events::UiEvent, reducer::Capability};
use crate::ui::ConsentApp;

const COMMAND_QUEUE_CAPACITY: usize = 32;
const EVENT_QUEUE_CAPACITY: usize = 256;

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let loaded = load_settings(&args)?;
    let settings = loaded.settings;

    init_tracing(&settings.log_filter);
    match &loaded.source {
        Some(path) => tracing::info!(path = %path.display(), "loaded settings file"),
        None => tracing::info!("no settings file found; using defaults"),
    }
    for warning in &loaded.warnings {
        tracing::warn!("{warning}");
    }

    let maps_base = settings.maps_base_url()?;
    let provider =
        build_provider(&settings.location).context("invalid location provider configuration")?;
    let capability = if provider.is_some() {
        Capability::Supported
    } else {
        Capability::Unsupported
    };
    tracing::info!(
        provider = settings.location.provider.as_str(),
        ?capability,
        "starting consent window"
    );

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(COMMAND_QUEUE_CAPACITY);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(EVENT_QUEUE_CAPACITY);
    backend_bridge::runtime::launch(provider, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(settings.window_title.clone())
            .with_inner_size([480.0, 640.0])
            .with_min_inner_size([360.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        &settings.window_title,
        options,
        Box::new(move |_cc| Ok(Box::new(ConsentApp::new(cmd_tx, ui_rx, capability, maps_base)))),
    )
    .map_err(|err| anyhow!("consent window failed: {err}"))
}
