mod app;
mod bbs;
mod config;
mod domain;
mod infrastructure;
mod policy;
mod scan;

use anyhow::Result;
use infrastructure::{directories, interrupt, logging};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load_config()?;
    let paths = directories::ensure_directories(&config.directories)?;
    logging::init_tracing(&config.logging, &paths)?;

    let interrupt = interrupt::install();

    let app = app::JanitorApp::initialize(config, paths, interrupt).await?;
    app.run().await
}
