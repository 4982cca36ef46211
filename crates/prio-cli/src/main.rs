use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod dashboard;
mod error;
mod gate;
mod output;
mod render;
mod router;
mod session;

use commands::{Commands, GlobalArgs};

#[derive(Parser)]
#[command(name = "prio", version, about = "Impact/feasibility prioritization matrix")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = cli.command.run(cli.global).await {
        eprintln!("{}", error::format_error(&err));
        std::process::exit(1);
    }
}
