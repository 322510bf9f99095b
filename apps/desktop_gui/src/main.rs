use std::{path::PathBuf, sync::Arc};

mod backend_bridge;
mod controller;
mod ui;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use client_core::{
    config::{self, DEFAULT_CONFIG_FILE},
    StudyBackend, StudyClient,
};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::{commands::BackendCommand, runtime};
use crate::controller::events::UiEvent;
use crate::ui::{DesktopGuiApp, StartupConfig};

const COMMAND_QUEUE_CAPACITY: usize = 64;
const EVENT_QUEUE_CAPACITY: usize = 256;

#[derive(Parser, Debug)]
#[command(about = "Upload study material, ask questions about it, and take generated quizzes")]
struct Args {
    /// Backend base URL, e.g. http://localhost:8000/api
    #[arg(long)]
    backend_url: Option<String>,
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let args = Args::parse();

    let file_settings = config::load_file_settings(&args.config)?;
    let resolved = config::resolve_backend_from_process(args.backend_url.as_deref(), &file_settings)
        .context("invalid backend URL")?;
    tracing::info!(backend = %resolved.endpoint, source = ?resolved.source, "resolved backend");

    let startup = StartupConfig {
        backend_url: resolved.endpoint.to_string(),
        source: resolved.source,
    };
    let backend: Arc<dyn StudyBackend> = Arc::new(StudyClient::new(resolved.endpoint));

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(COMMAND_QUEUE_CAPACITY);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(EVENT_QUEUE_CAPACITY);
    let _worker = runtime::launch(cmd_rx, ui_tx, backend);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Recall")
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([760.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Recall",
        options,
        Box::new(|_cc| Ok(Box::new(DesktopGuiApp::new(cmd_tx, ui_rx, startup)))),
    )
    .map_err(|err| anyhow!("desktop window failed: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_default_to_config_in_working_directory() {
        let args = Args::parse_from(["recall"]);
        assert_eq!(args.backend_url, None);
        assert_eq!(args.config, PathBuf::from("recall.toml"));

        let args = Args::parse_from(["recall", "--backend-url", "http://10.0.0.2:8000/api"]);
        assert_eq!(args.backend_url.as_deref(), Some("http://10.0.0.2:8000/api"));
    }
}
