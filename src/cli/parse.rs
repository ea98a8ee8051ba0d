//! CLI parse: clap types for oomax. No behavior; definitions only.

use crate::error::ExchangeError;
use crate::macro_path::ModulePath;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Push/pull office Basic macro code between files and a running office instance.
#[derive(Parser)]
#[command(name = "oomax")]
#[command(about = "Push/pull office Basic macro code between files and a running office instance")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Host of the office bridge
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Port of the office bridge
    #[arg(long, global = true)]
    pub port: Option<u16>,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stderr, stdout, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Push code into the given module
    Push {
        /// The name of a document which is open in the running office, e.g. 'Untitled 1',
        /// or 'application' for the application libraries
        document: String,

        /// The module to write, e.g. 'Standard.Module1'. With --run, also the macro to run,
        /// e.g. 'Standard.Module1.main'
        #[arg(value_name = "MACRO", value_parser = parse_module_path)]
        macro_path: ModulePath,

        /// The file which contains the source code. Defaults to standard in
        source_file: Option<PathBuf>,

        /// Store the document after pushing instead of only marking it modified
        #[arg(long)]
        save: bool,

        /// Run MACRO on the document after pushing; for 'application' the active document
        #[arg(long)]
        run: bool,
    },
    /// Pull code from the given module
    Pull {
        /// The name of a document which is open in the running office, e.g. 'Untitled 1',
        /// or 'application' for the application libraries
        document: String,

        /// The module to read, e.g. 'Standard.Module1'
        #[arg(value_name = "MACRO", value_parser = parse_module_path)]
        macro_path: ModulePath,

        /// The file to write the source code to. Defaults to standard out
        source_file: Option<PathBuf>,
    },
    /// Invoke the given macro
    Invoke {
        /// The name of a document which is open in the running office, e.g. 'Untitled 1',
        /// or 'application' for the active document
        document: String,

        /// The name of the macro routine, e.g. 'Standard.Module1.main'
        #[arg(value_name = "MACRO")]
        macro_name: String,
    },
}

/// Value parser for module names, so a malformed name is reported through the usage of
/// the subcommand that received it.
pub fn parse_module_path(raw: &str) -> Result<ModulePath, ExchangeError> {
    ModulePath::parse(raw)
}
