//! CLI definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod commands;

/// Output format for list commands.
#[derive(ValueEnum, Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table (default)
    #[default]
    Table,
    /// JSON (same as --json)
    Json,
    /// Comma-separated values
    Csv,
}

/// Embedded resource archive
#[derive(Parser, Debug)]
#[command(name = "archive", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Archive file (default: ~/.archive/data/archive.db)
    #[arg(long, short = 'a', global = true, env = "ARCHIVE_DB")]
    pub archive: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Output format (table, json, csv)
    #[arg(long, value_enum, global = true, default_value_t)]
    pub format: OutputFormat,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no logging, errors without hints); command output is unchanged
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

impl Cli {
    /// Whether JSON output was requested by flag or format.
    #[must_use]
    pub fn wants_json(&self) -> bool {
        self.json || self.format == OutputFormat::Json
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Store a file as a resource (creates or replaces)
    Store {
        /// Resource identifier
        id: String,

        /// File to read the payload from
        file: PathBuf,

        /// Content type (guessed from the file extension if omitted)
        #[arg(long = "type", short = 't')]
        content_type: Option<String>,

        /// Label attribute
        #[arg(long, short = 'l')]
        label: Option<String>,

        /// Extra attribute as KEY=VALUE (repeatable)
        #[arg(long = "attr", value_name = "KEY=VALUE")]
        attributes: Vec<String>,
    },

    /// Write a resource's payload to a file
    Load {
        /// Resource identifier
        id: String,

        /// Destination file
        file: PathBuf,
    },

    /// Delete a resource
    Delete {
        /// Resource identifier
        id: String,
    },

    /// List resources
    List {
        /// Only identifiers starting with this prefix
        #[arg(long, short = 'p')]
        prefix: Option<String>,
    },

    /// Show a resource with its attributes
    Show {
        /// Resource identifier
        id: String,

        /// Print only the attribute block
        #[arg(long)]
        attributes_only: bool,
    },

    /// Print the archive revision
    Revision,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
