use anyhow::Result;
use clap::Parser;
use flotilla::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run()
}
