mod app;
mod config;
mod error;
mod forms;
mod ui;

use tracing_subscriber::EnvFilter;

use crate::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;

    // Logging goes to stderr and must be wired up before raw mode.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.level.clone()))
        .with_writer(std::io::stderr)
        .init();

    let mut app = app::App::new(config);
    app.run().await?;
    Ok(())
}
