use anyhow::Result;
use clap::Parser;
use contribmap::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.execute()
}
