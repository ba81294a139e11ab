//! GPML - Read, write and convert pathway diagrams.
//!
//! A thin, configuration driven layer over [`gpml_codec`]: strings and files
//! go in, a [`PathwayModel`](model::PathwayModel) or serialised GPML comes
//! out. Both GPML2013a and GPML2021 are read; the version written is chosen
//! per call or by [`ConverterConfig::output_version`].

pub mod config;

mod error;

pub use gpml_codec::{ConverterError, GpmlVersion, ReadOutcome, Warning};
pub use gpml_core::{color, geometry, identifier, model, style, types, xref};

pub use error::GpmlError;

use std::{fs, path::Path};

use log::{debug, info, warn};

use gpml_codec::Document;
use gpml_core::xref::SourceAliases;

use config::ConverterConfig;
use model::PathwayModel;

/// Serialised GPML with everything reported along the way.
#[derive(Debug)]
pub struct Converted {
    /// The written document.
    pub text: String,
    /// Version the document was written in.
    pub version: GpmlVersion,
    /// Input quirks normalised by the reader, empty for plain writes.
    pub notes: Vec<Warning>,
    /// Information the writer could not express.
    pub warnings: Vec<Warning>,
}

/// Reads, writes and converts GPML according to a [`ConverterConfig`].
///
/// # Examples
///
/// ```
/// use gpml::{GpmlVersion, PathwayConverter, config::ConverterConfig};
///
/// let text = r#"<Pathway xmlns="http://pathvisio.org/GPML/2021" title="Example">
///   <Graphics boardWidth="100" boardHeight="100"/>
/// </Pathway>"#;
///
/// let config = ConverterConfig::default().with_output_version(GpmlVersion::Legacy);
/// let converted = PathwayConverter::new(config).convert(text).unwrap();
/// assert!(converted.text.contains(r#"Name="Example""#));
/// ```
#[derive(Debug, Default)]
pub struct PathwayConverter {
    config: ConverterConfig,
    lookup: SourceAliases,
}

impl PathwayConverter {
    /// Creates a converter with the given configuration.
    pub fn new(config: ConverterConfig) -> Self {
        let lookup = config.source_lookup();
        Self { config, lookup }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Reads GPML text of either version.
    ///
    /// # Errors
    ///
    /// Returns [`GpmlError::Converter`] for malformed XML, unknown formats
    /// and every structural error of the reader.
    pub fn read_str(&self, text: &str) -> Result<ReadOutcome, GpmlError> {
        let outcome = gpml_codec::read_str(text)?;
        for note in &outcome.notes {
            debug!(note:% = note; "Input normalised");
        }
        Ok(outcome)
    }

    /// Reads a GPML file of either version.
    ///
    /// # Errors
    ///
    /// Returns [`GpmlError::Io`] if the file cannot be read and any error of
    /// [`read_str`](Self::read_str).
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<ReadOutcome, GpmlError> {
        let path = path.as_ref();
        info!(path:? = path; "Reading GPML file");
        let text = fs::read_to_string(path)?;
        self.read_str(&text)
    }

    /// Writes the model as `version`.
    ///
    /// Empty groups are pruned from the model first. With validation enabled
    /// the assembled document is checked before it is serialised.
    ///
    /// # Errors
    ///
    /// - [`GpmlError::Converter`] for models that cannot be written and
    ///   documents failing validation.
    /// - [`GpmlError::Lossy`] if information was dropped while strict
    ///   warnings are enabled.
    pub fn write_string(&self, model: &mut PathwayModel, version: GpmlVersion) -> Result<Converted, GpmlError> {
        let written = gpml_codec::write(model, version, &self.lookup)?;
        for warning in &written.warnings {
            warn!(warning:% = warning; "Information dropped");
        }
        if self.config.strict_warnings() && !written.warnings.is_empty() {
            return Err(GpmlError::Lossy(written.warnings));
        }
        if self.config.validate() {
            gpml_codec::validate::validate(&written.document, version)?;
        }

        let text = written.document.to_xml_string(self.config.indent())?;
        debug!(version:% = version, bytes = text.len(); "Serialised pathway");
        Ok(Converted {
            text,
            version,
            notes: Vec::new(),
            warnings: written.warnings,
        })
    }

    /// Writes the model as `version` to a file.
    ///
    /// # Errors
    ///
    /// Returns [`GpmlError::Io`] if the file cannot be written and any error
    /// of [`write_string`](Self::write_string). Nothing is written on error.
    pub fn write_file(
        &self,
        model: &mut PathwayModel,
        version: GpmlVersion,
        path: impl AsRef<Path>,
    ) -> Result<Vec<Warning>, GpmlError> {
        let path = path.as_ref();
        let converted = self.write_string(model, version)?;
        fs::write(path, converted.text)?;
        info!(path:? = path, version:% = version; "GPML file written");
        Ok(converted.warnings)
    }

    /// Reads GPML text and writes it in the configured output version.
    ///
    /// # Errors
    ///
    /// Any error of [`read_str`](Self::read_str) or
    /// [`write_string`](Self::write_string).
    pub fn convert(&self, text: &str) -> Result<Converted, GpmlError> {
        let mut outcome = self.read_str(text)?;
        let mut converted = self.write_string(&mut outcome.model, self.config.output_version())?;
        converted.notes = outcome.notes;
        Ok(converted)
    }

    /// Converts one file into another.
    ///
    /// # Errors
    ///
    /// Returns [`GpmlError::Io`] for either file and any error of
    /// [`convert`](Self::convert). The output is left untouched on error.
    pub fn convert_file(&self, input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<Converted, GpmlError> {
        let (input, output) = (input.as_ref(), output.as_ref());
        info!(input:? = input, output:? = output; "Converting GPML file");
        let text = fs::read_to_string(input)?;
        let converted = self.convert(&text)?;
        fs::write(output, &converted.text)?;
        Ok(converted)
    }

    /// Checks GPML text against its version's attribute table and reads it.
    ///
    /// Returns the detected version.
    ///
    /// # Errors
    ///
    /// Returns [`GpmlError::Converter`] with
    /// [`ConverterError::SchemaValidation`] for documents breaking the
    /// table, and any error of [`read_str`](Self::read_str).
    pub fn validate_str(&self, text: &str) -> Result<GpmlVersion, GpmlError> {
        let document = Document::parse(text)?;
        let version = GpmlVersion::detect(&document)?;
        gpml_codec::validate::validate(&document, version)?;
        let outcome = gpml_codec::read(&document)?;
        info!(version:% = version, elements = outcome.model.len(); "Document is valid");
        Ok(version)
    }
}
