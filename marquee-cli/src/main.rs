//! Marquee CLI - Command-line interface
//!
//! Searches the movie database, filters and sorts results, and manages the
//! persisted favorites list.

mod browse;
mod commands;
mod render;

use clap::Parser;
use marquee_core::tracing_setup::init_tracing;

#[derive(Parser)]
#[command(name = "marquee")]
#[command(about = "Search movies and keep a list of favorites")]
struct Cli {
    #[command(flatten)]
    options: commands::GlobalOptions,

    #[command(subcommand)]
    command: commands::Commands,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(
        cli.options.log_level.as_tracing_level(),
        cli.options.logs_dir.as_deref(),
    )
    .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    commands::handle_command(cli.command, &cli.options).await
}
