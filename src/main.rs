use clap::Parser;
use log::{error, info};
use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use address_clean::record::clean_path;
use crate::cli::Cli;

mod cli;

fn main() {
    init_tracing();

    if let Err(e) = run() {
        error!("Error: {:?}", e);
        std::process::exit(1);
    }
}

fn run() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let options = cli.options()?;

    info!("cleaning [{}] into [{}]", cli.input.display(), cli.output.display());
    let summary = clean_path(&cli.input, &cli.output, &options)?;
    info!("finished, [{}/{}] rows written to [{}]", summary.rows_written, summary.rows_read, cli.output.display());
    Ok(())
}

/// `RUST_LOG` wins over the default `info` level
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(ErrorLayer::default())
        .init();
}
