//! GPML CLI library
//!
//! This module contains the core CLI logic for the GPML converter.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use gpml::{GpmlError, PathwayConverter};

/// Run the GPML CLI application
///
/// With `--validate-only` the input is checked against its schema and read.
/// Otherwise it is converted into the configured GPML version and written to
/// the output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `GpmlError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed or invalid input documents
/// - Lossy writes with `--strict`
pub fn run(args: &Args) -> Result<(), GpmlError> {
    info!(
        input_path = args.input,
        output_path:? = args.output;
        "Processing pathway"
    );

    let mut converter_config = config::load_config(args.config.as_ref())?;
    if let Some(version) = args.to {
        converter_config = converter_config.with_output_version(version);
    }
    if args.strict {
        converter_config = converter_config.with_strict_warnings(true);
    }
    let converter = PathwayConverter::new(converter_config);

    let source = fs::read_to_string(&args.input)?;

    if args.validate_only {
        let version = converter.validate_str(&source)?;
        info!(input_path = args.input, version:% = version; "Pathway is valid");
        return Ok(());
    }

    let Some(output) = &args.output else {
        return Err(GpmlError::Config("an output path is required".to_string()));
    };

    let converted = converter.convert(&source)?;
    fs::write(output, &converted.text)?;

    info!(
        output_file = output,
        version:% = converted.version,
        warnings = converted.warnings.len();
        "GPML exported successfully"
    );

    Ok(())
}
