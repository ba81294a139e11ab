//! Error types for GPML operations.
//!
//! [`GpmlError`] wraps codec failures, file I/O and configuration problems
//! behind one type.

use std::io;

use thiserror::Error;

use gpml_codec::{ConverterError, Warning};

/// The main error type of the facade.
#[derive(Debug, Error)]
pub enum GpmlError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Converter(#[from] ConverterError),

    #[error("Configuration error: {0}")]
    Config(String),

    /// A write dropped information while strict warnings are enabled.
    #[error("{} warning(s) with strict warnings enabled, first: {}", .0.len(), first_warning(.0))]
    Lossy(Vec<Warning>),
}

fn first_warning(warnings: &[Warning]) -> String {
    warnings
        .first()
        .map(ToString::to_string)
        .unwrap_or_default()
}
