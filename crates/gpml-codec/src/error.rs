//! Errors and warnings of the GPML readers and writers.
//!
//! # Overview
//!
//! - [`ConverterError`] aborts a read or write. No partial model or document
//!   is produced once one is raised.
//! - [`Warning`] records information that was normalised on read or dropped
//!   on write. Warnings never fail the operation; callers decide whether to
//!   treat them as errors.

mod converter_error;
mod warning;

pub use converter_error::{ConverterError, Result};
pub use warning::Warning;
