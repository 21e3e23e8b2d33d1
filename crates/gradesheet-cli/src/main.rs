//! Gradesheet CLI - extract, review, and commit PDF grade sheets.

mod cli;
mod commands;
mod db;
mod export;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Upload {
            file,
            store_dir,
            json,
        } => commands::upload::run(file, store_dir, json, cli.verbose),

        Commands::Confirm {
            token,
            source,
            rename,
            store_dir,
            database,
            export_dir,
        } => commands::confirm::run(
            token,
            source,
            rename,
            store_dir,
            database,
            export_dir,
            cli.verbose,
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
