//! Configuration of a [`PathwayConverter`](crate::PathwayConverter).
//!
//! All fields implement [`serde::Deserialize`] with defaults, so a TOML file
//! only needs to name the settings it changes.
//!
//! # Overview
//!
//! - `output_version` - The GPML version written by conversions.
//! - `validate` - Check assembled documents against the attribute table
//!   before serialising them.
//! - `indent` - Spaces per nesting level in written XML.
//! - `strict_warnings` - Fail a write that had to drop information.
//! - `data_source_aliases` - Data source names rewritten on output.
//!
//! # Example
//!
//! ```
//! # use gpml::config::ConverterConfig;
//! # use gpml::GpmlVersion;
//! let config = ConverterConfig::default().with_output_version(GpmlVersion::Legacy);
//! assert_eq!(config.output_version(), GpmlVersion::Legacy);
//! assert_eq!(config.indent(), 2);
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;

use gpml_codec::GpmlVersion;
use gpml_core::xref::SourceAliases;

const DEFAULT_INDENT: usize = 2;

/// Settings for reading, writing and converting GPML.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConverterConfig {
    /// Version written by [`convert`](crate::PathwayConverter::convert).
    #[serde(default)]
    output_version: GpmlVersion,

    #[serde(default)]
    validate: bool,

    #[serde(default = "default_indent")]
    indent: usize,

    #[serde(default)]
    strict_warnings: bool,

    /// Data source name to the tag written in its place.
    #[serde(default)]
    data_source_aliases: BTreeMap<String, String>,
}

fn default_indent() -> usize {
    DEFAULT_INDENT
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            output_version: GpmlVersion::default(),
            validate: false,
            indent: DEFAULT_INDENT,
            strict_warnings: false,
            data_source_aliases: BTreeMap::new(),
        }
    }
}

impl ConverterConfig {
    pub fn output_version(&self) -> GpmlVersion {
        self.output_version
    }

    pub fn validate(&self) -> bool {
        self.validate
    }

    pub fn indent(&self) -> usize {
        self.indent
    }

    pub fn strict_warnings(&self) -> bool {
        self.strict_warnings
    }

    pub fn data_source_aliases(&self) -> &BTreeMap<String, String> {
        &self.data_source_aliases
    }

    /// The aliases as a lookup for the writers.
    pub fn source_lookup(&self) -> SourceAliases {
        self.data_source_aliases
            .iter()
            .map(|(name, tag)| (name.as_str(), tag.as_str()))
            .collect()
    }

    pub fn with_output_version(mut self, version: GpmlVersion) -> Self {
        self.output_version = version;
        self
    }

    pub fn with_validate(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_strict_warnings(mut self, strict: bool) -> Self {
        self.strict_warnings = strict;
        self
    }

    pub fn with_data_source_alias(mut self, name: impl Into<String>, tag: impl Into<String>) -> Self {
        self.data_source_aliases.insert(name.into(), tag.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use gpml_core::xref::DataSourceLookup;

    #[test]
    fn test_defaults() {
        let config = ConverterConfig::default();
        assert_eq!(config.output_version(), GpmlVersion::Current);
        assert!(!config.validate());
        assert_eq!(config.indent(), 2);
        assert!(!config.strict_warnings());
        assert!(config.source_lookup().is_empty());
    }

    #[test]
    fn test_builders() {
        let config = ConverterConfig::default()
            .with_validate(true)
            .with_indent(4)
            .with_strict_warnings(true)
            .with_data_source_alias("NCBI Gene", "Entrez Gene");

        assert!(config.validate());
        assert_eq!(config.indent(), 4);
        assert!(config.strict_warnings());
        assert_eq!(config.source_lookup().render("NCBI Gene"), "Entrez Gene");
    }
}
