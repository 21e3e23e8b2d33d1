//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Gradesheet: PDF grade-sheet extraction and import
#[derive(Parser)]
#[command(name = "gradesheet")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract a grade sheet and stage it for review
    Upload {
        /// Path to the PDF grade sheet
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Directory for staged preview artifacts
        #[arg(long, default_value = "uploads")]
        store_dir: PathBuf,

        /// Print the full upload outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Commit a staged preview to the database and export it
    Confirm {
        /// Preview token returned by upload
        #[arg(value_name = "TOKEN")]
        token: String,

        /// Original document name (or stem) used for table naming and
        /// export titles
        #[arg(value_name = "SOURCE")]
        source: String,

        /// Rename a preview column before type inference (OLD=NEW,
        /// repeatable)
        #[arg(long, value_name = "OLD=NEW")]
        rename: Vec<String>,

        /// Directory holding staged preview artifacts
        #[arg(long, default_value = "uploads")]
        store_dir: PathBuf,

        /// SQLite database file
        #[arg(long, default_value = "gradesheet.db")]
        database: PathBuf,

        /// Directory for exported files
        #[arg(long, default_value = "exports")]
        export_dir: PathBuf,
    },
}
