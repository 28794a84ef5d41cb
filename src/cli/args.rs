//! Command-line argument parsing for bconfig
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::types::{ProductScope, ProductType};

/// bconfig - Product configuration workbooks over HTTP
#[derive(Parser, Debug)]
#[command(name = "bconfig")]
#[command(version)]
#[command(about = "Browse and question the product configuration workbooks", long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level: -q (quiet), default (normal), -v (verbose), -vv (very verbose)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (warnings and errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand; `serve` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Start the HTTP API
    Serve {
        /// Address to bind, overrides the configured one
        #[arg(long)]
        bind: Option<String>,
    },

    /// List the sheets of a product workbook
    Index {
        /// Product code: BC, CC or CS
        product: ProductType,
    },

    /// Print one sheet as JSON
    Sheet {
        /// Product code: BC, CC or CS
        product: ProductType,
        /// Sheet name
        name: String,
    },

    /// Show the candidate rows a question would retrieve
    Search {
        /// Free-text query
        query: String,
        /// Product code or ALL
        #[arg(short, long, default_value = "ALL")]
        product: ProductScope,
    },

    /// Ask the assistant a single question
    Ask {
        /// The question
        question: String,
        /// Product code or ALL
        #[arg(short, long, default_value = "ALL")]
        product: ProductScope,
    },

    /// Run deployment diagnostics
    Doctor,

    /// Display current configuration
    Config {
        /// Write the default configuration file
        #[arg(long)]
        init: bool,
    },
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }

    /// Subcommand to run, defaulting to `serve`
    pub fn command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or(Commands::Serve { bind: None })
    }
}

impl Verbosity {
    /// Log level filter for this verbosity
    pub fn level_filter(&self) -> log::LevelFilter {
        match self {
            Verbosity::Quiet => log::LevelFilter::Warn,
            Verbosity::Normal => log::LevelFilter::Info,
            Verbosity::Verbose => log::LevelFilter::Debug,
            Verbosity::VeryVerbose => log::LevelFilter::Trace,
        }
    }

    /// Whether the default log filter should be overridden
    pub fn overrides_env(&self) -> bool {
        !matches!(self, Verbosity::Normal)
    }
}
