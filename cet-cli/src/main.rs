//! CET CLI - Command line tool for climate extremes analysis.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "cet-cli",
    version,
    about = "Climate extremes analysis toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: cet_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    cet_cmd::run(cli.command)
}
