//! Cross references to external databases.
//!
//! An [`Xref`] is an opaque `(identifier, data source)` pair. The model never
//! interprets either part. Format writers ask a [`DataSourceLookup`] for the
//! tag to write for a data source, which lets callers canonicalise names
//! (`"Entrez Gene"` vs `"NCBI Gene"`) without the model knowing any database.

use std::collections::HashMap;

/// Reference to an entry of an external database.
///
/// # Examples
///
/// ```
/// use gpml_core::xref::Xref;
///
/// let xref = Xref::new("1234", "Entrez Gene");
/// assert_eq!(xref.identifier(), "1234");
/// assert_eq!(xref.data_source(), "Entrez Gene");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Xref {
    identifier: String,
    data_source: String,
}

impl Xref {
    pub fn new(identifier: impl Into<String>, data_source: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            data_source: data_source.into(),
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn data_source(&self) -> &str {
        &self.data_source
    }

    /// An xref with neither identifier nor data source carries no information.
    pub fn is_empty(&self) -> bool {
        self.identifier.is_empty() && self.data_source.is_empty()
    }
}

/// Maps a data source name to the tag written into a document.
pub trait DataSourceLookup {
    /// Returns the canonical tag for `source`, or `None` when unknown.
    fn canonical_tag(&self, source: &str) -> Option<&str>;

    /// Returns the tag to write, falling back to the name itself.
    fn render<'a>(&'a self, source: &'a str) -> &'a str {
        self.canonical_tag(source).unwrap_or(source)
    }
}

/// Writes every data source name unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughLookup;

impl DataSourceLookup for PassthroughLookup {
    fn canonical_tag(&self, _source: &str) -> Option<&str> {
        None
    }
}

/// A lookup backed by an explicit name to tag table.
///
/// # Examples
///
/// ```
/// use gpml_core::xref::{DataSourceLookup, SourceAliases};
///
/// let mut aliases = SourceAliases::default();
/// aliases.insert("NCBI Gene", "Entrez Gene");
/// assert_eq!(aliases.render("NCBI Gene"), "Entrez Gene");
/// assert_eq!(aliases.render("ChEBI"), "ChEBI");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SourceAliases {
    table: HashMap<String, String>,
}

impl SourceAliases {
    pub fn insert(&mut self, name: impl Into<String>, tag: impl Into<String>) {
        self.table.insert(name.into(), tag.into());
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SourceAliases {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut aliases = Self::default();
        for (name, tag) in iter {
            aliases.insert(name, tag);
        }
        aliases
    }
}

impl DataSourceLookup for SourceAliases {
    fn canonical_tag(&self, source: &str) -> Option<&str> {
        self.table.get(source).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough() {
        assert_eq!(PassthroughLookup.render("Ensembl"), "Ensembl");
    }

    #[test]
    fn test_aliases_from_iter() {
        let aliases: SourceAliases = [("HMDB", "Human Metabolome Database")].into_iter().collect();
        assert_eq!(aliases.render("HMDB"), "Human Metabolome Database");
        assert_eq!(aliases.canonical_tag("Wikidata"), None);
    }

    #[test]
    fn test_empty_xref() {
        assert!(Xref::default().is_empty());
        assert!(!Xref::new("", "Ensembl").is_empty());
    }
}
