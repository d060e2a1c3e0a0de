//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `phylocurate`.
#[derive(Debug, Parser)]
#[command(name = "phylocurate", version, about = "Curate phyloreferences against phylogenies")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check a Newick string for syntax problems.
    Check {
        /// Tree in Newick notation.
        newick: String,
    },
    /// List node labels of a Newick tree.
    Labels {
        /// Tree in Newick notation.
        newick: String,
        /// Which nodes to list: all, internal or terminal.
        #[arg(long)]
        scope: Option<String>,
    },
    /// Resolve every phyloreference in a document on its phylogenies.
    Resolve {
        /// JSON or YAML curation document.
        document: PathBuf,
    },
    /// List the publishing status vocabulary.
    Statuses,
    /// Record a new status for a phyloreference in a document.
    SetStatus {
        /// JSON or YAML curation document, rewritten in place.
        document: PathBuf,
        /// Label of the phyloreference to update.
        phyloref: String,
        /// Status CURIE, e.g. `pso:submitted`.
        status: String,
    },
}
