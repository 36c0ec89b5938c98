#![deny(missing_docs)]

//! # Repatch CLI
//!
//! Command line driver for the structural patch engine.
//!
//! Supported Commands:
//! - `run`: applies one recipe (stock or from a YAML/JSON file) to every
//!   matching source file under a root directory.
//! - `list`: prints the stock recipe catalog.

use clap::{Parser, Subcommand};
use repatch_core::recipes;

use crate::error::CliResult;

mod error;
mod run;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Structural patch recipes for Java-like sources")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply a recipe to every matching source file under a root.
    Run(run::RunArgs),
    /// List the stock recipes.
    List,
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Run(args) => run::execute(args)?,
        Commands::List => {
            for (name, description) in recipes::catalog() {
                println!("{:<24} {}", name, description);
            }
        }
    }

    Ok(())
}
