use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;

use crate::subcommands::*;

mod connection;
mod error;
mod invocation;
mod path;
mod signer;
mod subcommands;
mod tokenizer;
mod verbosity;

#[derive(Debug, Parser)]
#[clap(author, version, about)]
struct Cli {
    #[clap(subcommand)]
    command: Subcommands,
}

#[derive(Debug, Subcommand)]
enum Subcommands {
    #[clap(about = "Generate an image from a description and tokenize it")]
    Generate(Generate),
    #[clap(about = "Generate shell completions script")]
    Completions(Completions),
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_command(Cli::parse()).await {
        eprintln!("{}", format!("Error: {err:?}").red());
        std::process::exit(1);
    }
}

async fn run_command(cli: Cli) -> Result<()> {
    match cli.command {
        Subcommands::Generate(cmd) => cmd.run().await,
        Subcommands::Completions(cmd) => cmd.run(),
    }
}
