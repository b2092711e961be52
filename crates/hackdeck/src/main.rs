mod app;
mod cli;
mod commands;
mod config;
mod deck;
mod highlight;
mod map;
mod navigation;
mod render;
mod theme;

use clap::Parser;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: u8, quiet: bool) {
    let default = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn,hackdeck=info",
        (false, 1) => "warn,hackdeck=debug",
        (false, _) => "info,hackdeck=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose > 0)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    init_tracing(cli.verbose, cli.quiet);
    if cli.no_color {
        colored::control::set_override(false);
    }

    cli.run()
}
