//! Error adapter for converting GpmlError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! # Lossy Writes
//!
//! When a write fails because strict warnings are enabled, every dropped
//! piece of information is rendered as its own report.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use gpml::{GpmlError, model::ModelError};
use gpml_codec::{ConverterError, Warning};

/// Adapter for one warning of a [`GpmlError::Lossy`] write.
pub struct WarningAdapter<'a>(pub &'a Warning);

impl fmt::Debug for WarningAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for WarningAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for WarningAdapter<'_> {}

impl MietteDiagnostic for WarningAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            Warning::ReservedProperty { .. } => "gpml::reserved_property",
            Warning::UnsupportedFeature { .. } => "gpml::unsupported_feature",
            Warning::Normalised { .. } => "gpml::normalised",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("run without --strict to write the file anyway"))
    }
}

/// Adapter for [`GpmlError`] variants other than lossy writes.
pub struct ErrorAdapter<'a>(pub &'a GpmlError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            GpmlError::Io(_) => "gpml::io",
            GpmlError::Config(_) => "gpml::config",
            GpmlError::Lossy(_) => "gpml::lossy",
            GpmlError::Converter(err) => converter_code(err),
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            GpmlError::Converter(ConverterError::UnknownFormat(_)) => {
                "the root element must be <Pathway> in the GPML2013a or GPML2021 namespace"
            }
            GpmlError::Converter(ConverterError::Model(ModelError::DuplicateId(_))) => {
                "element ids must be unique across the whole pathway"
            }
            GpmlError::Converter(ConverterError::UnresolvedRequiredReference { .. }) => {
                "citations need an xref or a url, evidences need an xref"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

fn converter_code(err: &ConverterError) -> &'static str {
    match err {
        ConverterError::Model(err) => match err {
            ModelError::DuplicateId(_) => "gpml::duplicate_id",
            ModelError::NotFound(_) => "gpml::not_found",
            ModelError::InvalidLine { .. } => "gpml::invalid_line",
            ModelError::GroupMembership(_) => "gpml::group_membership",
            ModelError::InvalidReference { .. } => "gpml::invalid_reference",
            ModelError::InvalidValue(_) => "gpml::invalid_value",
        },
        ConverterError::MissingRequiredAttribute { .. } => "gpml::missing_attribute",
        ConverterError::MalformedValue { .. } => "gpml::malformed_value",
        ConverterError::UnresolvedRequiredReference { .. } => "gpml::unresolved_reference",
        ConverterError::SchemaValidation(_) => "gpml::schema_validation",
        ConverterError::UnknownFormat(_) => "gpml::unknown_format",
        ConverterError::Xml(_) => "gpml::xml",
        ConverterError::Io(_) => "gpml::io",
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// Information a strict write refused to drop.
    Warning(WarningAdapter<'a>),
    /// Any other error.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Warning(w) => fmt::Display::fmt(w, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Warning(_) => None,
            Reportable::Error(e) => std::error::Error::source(e),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Warning(w) => w.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Warning(w) => w.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Warning(w) => w.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`GpmlError`] into a list of reportable errors.
///
/// For [`GpmlError::Lossy`], this returns one [`Reportable`] for each
/// warning. For other error variants, this returns a single [`Reportable`].
pub fn to_reportables(err: &GpmlError) -> Vec<Reportable<'_>> {
    match err {
        GpmlError::Lossy(warnings) if !warnings.is_empty() => warnings
            .iter()
            .map(|w| Reportable::Warning(WarningAdapter(w)))
            .collect(),
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}
