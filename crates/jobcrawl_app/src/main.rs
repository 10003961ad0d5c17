mod cli;
mod platform;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    platform::initialize_logging(cli.log, cli.log_level.into());
    platform::run(cli)
}
