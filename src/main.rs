mod bibtex;
mod cli;
mod commands;
mod common;
mod extract;
mod resolve;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};
use commands::{run_convert, run_enrich};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert(args) => {
            run_convert(args)?;
        }
        Commands::Enrich(args) => {
            run_enrich(args)?;
        }
    }

    Ok(())
}
