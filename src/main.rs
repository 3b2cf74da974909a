mod engine;
mod model;
mod ui;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::engine::llm_client::LlmClient;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Missing credentials are fatal before any window opens.
    let client = LlmClient::from_env()?;

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Dead Air",
        options,
        Box::new(move |_cc| Ok(Box::new(ui::app::App::new(client)))),
    )
    .map_err(|e| anyhow::anyhow!("failed to start UI: {e}"))
}
