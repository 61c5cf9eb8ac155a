mod cli;
mod config;
mod converters;
mod error;
mod logger;
mod model;
mod service;
mod transport;
mod wire;

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    // Load config
    let config = config::load_config()?;
    logger::initialize(&config.log)?;

    cli::run(&config, &args).await
}
