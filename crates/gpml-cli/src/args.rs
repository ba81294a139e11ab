//! Command-line argument definitions for the GPML CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, the GPML version to
//! write, configuration file selection, and logging verbosity.

use clap::Parser;

use gpml::GpmlVersion;

/// Command-line arguments for the GPML converter
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input GPML file
    #[arg(help = "Path to the input file (GPML2013a or GPML2021)")]
    pub input: String,

    /// Path to the converted GPML file
    #[arg(short, long, required_unless_present = "validate_only")]
    pub output: Option<String>,

    /// GPML version to write (legacy or current), overrides the configuration
    #[arg(long, value_name = "VERSION")]
    pub to: Option<GpmlVersion>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Check the input against its schema without writing anything
    #[arg(long)]
    pub validate_only: bool,

    /// Fail instead of dropping information the output version cannot hold
    #[arg(long)]
    pub strict: bool,
}
