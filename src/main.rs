//! # reelmap Main Entry Point

use anyhow::{Context, Result};
use reelmap::{cmd_args::CommandLineArgs, config, AppController};
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{fmt::time::ChronoLocal, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cmd_args = CommandLineArgs::parse();

    // The terminal belongs to the UI, so logs only go to a file
    if let Some(path) = cmd_args.log_file() {
        init_tracing_subscriber(path)?;
    }

    let mut app = AppController::new(&cmd_args)?;
    app.run().await
}

fn init_tracing_subscriber(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Cannot create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_env(config::LOG_LEVEL_ENV_VAR)
                .add_directive("reqwest=warn".parse()?)
                .add_directive("hyper=warn".parse()?)
                .add_directive("hyper_util=warn".parse()?)
                .add_directive("rustls=warn".parse()?),
        )
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .with_timer(ChronoLocal::rfc_3339())
        .init();
    Ok(())
}
