//! GPML schema generations and their detection.

use std::{fmt, str::FromStr};

use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    dom::Document,
    error::{ConverterError, Result},
};

/// Namespace of GPML2010a, an older legacy revision read by the legacy reader.
pub const GPML_2010A_NAMESPACE: &str = "http://pathvisio.org/GPML/2010a";

/// The GPML schema generation of a document.
///
/// The names match external configuration strings (snake_case).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GpmlVersion {
    /// GPML2013a.
    Legacy,
    /// GPML2021.
    #[default]
    Current,
}

impl GpmlVersion {
    /// Root namespace written by this version.
    pub fn namespace(self) -> &'static str {
        match self {
            Self::Legacy => "http://pathvisio.org/GPML/2013a",
            Self::Current => "http://pathvisio.org/GPML/2021",
        }
    }

    /// The schema name, e.g. `GPML2013a`.
    pub fn schema_name(self) -> &'static str {
        match self {
            Self::Legacy => "GPML2013a",
            Self::Current => "GPML2021",
        }
    }

    /// Maps a root namespace to the reader able to handle it.
    pub fn from_namespace(namespace: &str) -> Option<Self> {
        match namespace {
            ns if ns == Self::Legacy.namespace() || ns == GPML_2010A_NAMESPACE => Some(Self::Legacy),
            ns if ns == Self::Current.namespace() => Some(Self::Current),
            _ => None,
        }
    }

    /// Determines the version of a parsed document from its root element.
    ///
    /// # Errors
    ///
    /// Returns [`ConverterError::UnknownFormat`] when the root is not a
    /// `Pathway` element in a known GPML namespace.
    pub fn detect(document: &Document) -> Result<Self> {
        let root = document.root();
        if root.name() != "Pathway" {
            return Err(ConverterError::UnknownFormat(format!(
                "root element is <{}>, expected <Pathway>",
                root.name()
            )));
        }
        // Assembled documents carry their namespace only as an attribute.
        let namespace = root
            .namespace()
            .or_else(|| root.attribute("xmlns"))
            .unwrap_or_default();
        let version = Self::from_namespace(namespace).ok_or_else(|| {
            ConverterError::UnknownFormat(format!("unrecognised namespace `{namespace}`"))
        })?;
        if namespace == GPML_2010A_NAMESPACE {
            info!(namespace = namespace; "Reading GPML2010a document with the GPML2013a reader");
        }
        Ok(version)
    }
}

impl FromStr for GpmlVersion {
    type Err = &'static str;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "legacy" | "gpml2013a" | "2013a" => Ok(Self::Legacy),
            "current" | "gpml2021" | "2021" => Ok(Self::Current),
            _ => Err("Unsupported GPML version"),
        }
    }
}

impl From<GpmlVersion> for &'static str {
    fn from(val: GpmlVersion) -> Self {
        match val {
            GpmlVersion::Legacy => "legacy",
            GpmlVersion::Current => "current",
        }
    }
}

impl fmt::Display for GpmlVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.schema_name())
    }
}
