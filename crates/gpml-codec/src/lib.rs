//! GPML readers and writers.
//!
//! This crate moves a [`PathwayModel`] to and from the two GPML schema
//! generations:
//!
//! - **GPML2013a** ([`legacy`]): the PathVisio format, namespace
//!   `http://pathvisio.org/GPML/2013a`. GPML2010a documents are read too.
//! - **GPML2021** ([`current`]): namespace `http://pathvisio.org/GPML/2021`.
//!
//! Conversion between the generations always goes through the model; there
//! is no XML to XML transcoding.
//!
//! # Organization
//!
//! - [`dom`] - The owned XML tree both formats are read from and written to
//! - [`format`] - [`GpmlVersion`] and its detection from a root namespace
//! - [`schema`] - Per-version attribute tables (kind, default, usage)
//! - [`validate`] - Boundary check of assembled documents against a table
//! - [`error`] - [`ConverterError`] and [`Warning`]
//!
//! # Example
//!
//! ```
//! use gpml_codec::{GpmlVersion, read_str, write};
//! use gpml_core::xref::PassthroughLookup;
//!
//! let text = r#"<Pathway xmlns="http://pathvisio.org/GPML/2021" title="Example">
//!   <Graphics boardWidth="100" boardHeight="100"/>
//! </Pathway>"#;
//!
//! let mut outcome = read_str(text).unwrap();
//! let written = write(&mut outcome.model, GpmlVersion::Legacy, &PassthroughLookup).unwrap();
//! assert_eq!(written.document.root().attribute("Name"), Some("Example"));
//! ```

mod attributes;
mod emit;
mod outcome;
mod resolve;

pub mod current;
pub mod dom;
pub mod error;
pub mod format;
pub mod legacy;
pub mod schema;
pub mod validate;

use log::debug;

use gpml_core::{model::PathwayModel, xref::DataSourceLookup};

pub use dom::Document;
pub use error::{ConverterError, Result, Warning};
pub use format::GpmlVersion;
pub use outcome::{ReadOutcome, WriteOutcome};

/// Reads a parsed document with the reader matching its namespace.
///
/// # Errors
///
/// Returns [`ConverterError::UnknownFormat`] for documents that are not
/// GPML, and any error of the selected reader.
pub fn read(document: &Document) -> Result<ReadOutcome> {
    let version = GpmlVersion::detect(document)?;
    debug!(version:% = version; "Detected document version");
    match version {
        GpmlVersion::Legacy => legacy::read(document),
        GpmlVersion::Current => current::read(document),
    }
}

/// Parses and reads GPML text.
///
/// # Errors
///
/// Returns [`ConverterError::Xml`] for malformed XML and any error of
/// [`read`].
pub fn read_str(text: &str) -> Result<ReadOutcome> {
    read(&Document::parse(text)?)
}

/// Writes the model in the given version.
///
/// Empty groups are pruned from the model before anything is written.
///
/// # Errors
///
/// Returns the selected writer's error; no document is produced then.
pub fn write(model: &mut PathwayModel, version: GpmlVersion, lookup: &dyn DataSourceLookup) -> Result<WriteOutcome> {
    match version {
        GpmlVersion::Legacy => legacy::write(model, lookup),
        GpmlVersion::Current => current::write(model, lookup),
    }
}
