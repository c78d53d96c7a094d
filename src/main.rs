use anyhow::Result;
use clap::Parser;

use bioc_corpus_server::cli::{Cli, Commands};
use bioc_corpus_server::commands::{run_serve, run_show, run_summary};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => {
            run_serve(args)?;
        }
        Commands::Summary(args) => {
            run_summary(args)?;
        }
        Commands::Show(args) => {
            run_show(args)?;
        }
    }

    Ok(())
}
