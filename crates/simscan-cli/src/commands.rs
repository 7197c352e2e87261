use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "simscan")]
#[command(about = "Similarity detection over an encrypted document corpus", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Encrypt .txt files (or directories of them) into the store
    Add {
        /// Files or directories to ingest
        paths: Vec<PathBuf>,
    },
    /// List stored documents, newest first
    List,
    /// Generate a similarity report over all stored documents
    Report {
        /// Matching method: word_based, char_based or line_based
        #[arg(short, long, default_value = "word_based")]
        method: String,
        /// Write the JSON report to this path instead of the reports directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Decrypt one document into the scratch directory
    Export {
        /// Document id (see `list`)
        id: i64,
    },
    /// Remove residual exported plaintext from the scratch directory
    Cleanup,
    /// Delete all stored documents
    Purge,
    /// Print configuration values
    PrintConfig,
}
