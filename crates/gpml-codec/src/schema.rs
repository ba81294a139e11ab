//! Per-version attribute tables.
//!
//! For every element path and attribute name a table records the value kind,
//! the default and whether the attribute is required. Readers fill missing
//! optional attributes from the default, writers leave out values equal to
//! it, and [`validate`](crate::validate) checks assembled documents against
//! it.
//!
//! Element paths name an element by its parent where the same element name
//! has different attributes in different places (`DataNode.Graphics` vs
//! `Interaction.Graphics`). Elements that look the same everywhere (`Xref`,
//! `Comment`, `Point`) use their bare name.

mod current;
mod legacy;

use std::{collections::HashMap, sync::OnceLock};

use indexmap::IndexMap;

use gpml_core::color::Color;

use crate::format::GpmlVersion;

/// What values an attribute accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Float,
    Integer,
    Color,
    /// One of a closed set of words.
    Choice(&'static [&'static str]),
}

impl ValueKind {
    /// Checks that `value` is well-formed for this kind.
    ///
    /// # Errors
    ///
    /// Returns a description of the problem.
    pub fn check(self, value: &str) -> Result<(), String> {
        match self {
            Self::Text => Ok(()),
            Self::Float => value
                .trim()
                .parse::<f64>()
                .map(|_| ())
                .map_err(|_| "not a number".to_string()),
            Self::Integer => value
                .trim()
                .parse::<i64>()
                .map(|_| ())
                .map_err(|_| "not an integer".to_string()),
            Self::Color => Color::new(value).map(|_| ()),
            Self::Choice(words) => {
                if words.contains(&value) {
                    Ok(())
                } else {
                    Err(format!("expected one of {}", words.join(", ")))
                }
            }
        }
    }

    /// Compares two values by meaning rather than spelling.
    fn same_value(self, a: &str, b: &str) -> bool {
        match self {
            Self::Float => match (a.trim().parse::<f64>(), b.trim().parse::<f64>()) {
                (Ok(a), Ok(b)) => a == b,
                _ => a == b,
            },
            Self::Integer => match (a.trim().parse::<i64>(), b.trim().parse::<i64>()) {
                (Ok(a), Ok(b)) => a == b,
                _ => a == b,
            },
            Self::Color => match (Color::new(a), Color::new(b)) {
                (Ok(a), Ok(b)) => a == b,
                _ => a.eq_ignore_ascii_case(b),
            },
            Self::Text | Self::Choice(_) => a == b,
        }
    }
}

/// Whether an attribute must be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Usage {
    Required,
    Optional,
}

/// Kind, default and usage of one attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeInfo {
    kind: ValueKind,
    default: Option<&'static str>,
    usage: Usage,
}

impl AttributeInfo {
    pub const fn required(kind: ValueKind) -> Self {
        Self {
            kind,
            default: None,
            usage: Usage::Required,
        }
    }

    pub const fn optional(kind: ValueKind) -> Self {
        Self {
            kind,
            default: None,
            usage: Usage::Optional,
        }
    }

    pub const fn defaulted(kind: ValueKind, default: &'static str) -> Self {
        Self {
            kind,
            default: Some(default),
            usage: Usage::Optional,
        }
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn default(&self) -> Option<&'static str> {
        self.default
    }

    pub fn usage(&self) -> Usage {
        self.usage
    }

    pub fn is_required(&self) -> bool {
        self.usage == Usage::Required
    }
}

/// A named group of attribute definitions reused by several elements.
pub(crate) type AttributeSet = &'static [(&'static str, AttributeInfo)];

/// The attribute table of one GPML version.
#[derive(Debug)]
pub struct AttributeTable {
    version: GpmlVersion,
    elements: HashMap<&'static str, IndexMap<&'static str, AttributeInfo>>,
}

impl AttributeTable {
    /// The shared table for `version`, built on first use.
    pub fn for_version(version: GpmlVersion) -> &'static AttributeTable {
        static LEGACY: OnceLock<AttributeTable> = OnceLock::new();
        static CURRENT: OnceLock<AttributeTable> = OnceLock::new();
        match version {
            GpmlVersion::Legacy => LEGACY.get_or_init(legacy::build),
            GpmlVersion::Current => CURRENT.get_or_init(current::build),
        }
    }

    fn new(version: GpmlVersion) -> Self {
        Self {
            version,
            elements: HashMap::new(),
        }
    }

    /// Declares an element path with the union of the given attribute sets.
    fn element(&mut self, path: &'static str, sets: &[&[(&'static str, AttributeInfo)]]) -> &mut Self {
        let entry = self.elements.entry(path).or_default();
        for set in sets {
            for (name, info) in set.iter() {
                entry.insert(*name, *info);
            }
        }
        self
    }

    /// Replaces the default of an already declared attribute.
    fn with_default(&mut self, path: &'static str, name: &'static str, default: &'static str) -> &mut Self {
        if let Some(info) = self.elements.get_mut(path).and_then(|attrs| attrs.get_mut(name)) {
            info.default = Some(default);
        }
        self
    }

    pub fn version(&self) -> GpmlVersion {
        self.version
    }

    pub fn knows_element(&self, path: &str) -> bool {
        self.elements.contains_key(path)
    }

    pub fn get(&self, path: &str, name: &str) -> Option<&AttributeInfo> {
        self.elements.get(path)?.get(name)
    }

    /// Attributes of an element path in declaration order.
    pub fn attributes(&self, path: &str) -> impl Iterator<Item = (&'static str, &AttributeInfo)> {
        self.elements
            .get(path)
            .into_iter()
            .flat_map(|attrs| attrs.iter().map(|(name, info)| (*name, info)))
    }

    /// Whether `value` equals the declared default. Required attributes
    /// never have one.
    pub fn is_default(&self, path: &str, name: &str, value: &str) -> bool {
        self.get(path, name)
            .and_then(|info| info.default.map(|default| info.kind.same_value(default, value)))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_compare_by_value() {
        let table = AttributeTable::for_version(GpmlVersion::Current);
        assert!(table.is_default("DataNode.Graphics", "fontSize", "12"));
        assert!(table.is_default("DataNode.Graphics", "fontSize", "12.0"));
        assert!(table.is_default("DataNode.Graphics", "textColor", "000000"));
        assert!(!table.is_default("DataNode.Graphics", "textColor", "ff0000"));
        assert!(!table.is_default("DataNode.Graphics", "centerX", "0"));
    }

    #[test]
    fn test_legacy_named_colors() {
        let table = AttributeTable::for_version(GpmlVersion::Legacy);
        assert!(table.is_default("DataNode.Graphics", "Color", "Black"));
        assert!(table.is_default("Label.Graphics", "FillColor", "Transparent"));
        assert!(!table.is_default("DataNode.Graphics", "FillColor", "Transparent"));
    }

    #[test]
    fn test_value_kinds() {
        assert!(ValueKind::Float.check("1.5").is_ok());
        assert!(ValueKind::Float.check("wide").is_err());
        assert!(ValueKind::Integer.check("32768").is_ok());
        assert!(ValueKind::Color.check("Transparent").is_ok());
        assert!(ValueKind::Choice(&["Normal", "Bold"]).check("Heavy").is_err());
    }

    #[test]
    fn test_required_attributes() {
        let table = AttributeTable::for_version(GpmlVersion::Current);
        assert!(table.get("DataNode", "elementId").is_some_and(AttributeInfo::is_required));
        assert!(table.get("DataNode", "groupRef").is_some_and(|info| !info.is_required()));
        assert!(table.get("DataNode", "Name").is_none());
    }
}
