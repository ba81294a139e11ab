//! Element identifiers backed by a global string interner.
//!
//! Every identity-bearing object of a pathway carries an [`ElementId`]. Ids
//! are compared and hashed as interned symbols, so they are `Copy` and cheap
//! to pass around, while ordering follows the underlying strings.

use std::{
    cmp::Ordering,
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock")
}

/// Identifier of a pathway element, unique within one pathway model.
///
/// # Examples
///
/// ```
/// use gpml_core::identifier::ElementId;
///
/// let id = ElementId::new("a1b2c");
/// assert_eq!(id, "a1b2c");
/// assert_eq!(id, ElementId::from("a1b2c"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(DefaultSymbol);

impl ElementId {
    /// Creates an `ElementId` from its string form.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Returns an owned copy of the identifier string.
    pub fn as_string(&self) -> String {
        interner()
            .resolve(self.0)
            .expect("Symbol should exist in interner")
            .to_string()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

impl PartialOrd for ElementId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ElementId {
    /// Orders identifiers lexicographically by their string form.
    fn cmp(&self, other: &Self) -> Ordering {
        if self.0 == other.0 {
            return Ordering::Equal;
        }
        let interner = interner();
        let lhs = interner.resolve(self.0).expect("Symbol should exist in interner");
        let rhs = interner.resolve(other.0).expect("Symbol should exist in interner");
        lhs.cmp(rhs)
    }
}

impl From<&str> for ElementId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<&String> for ElementId {
    fn from(name: &String) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for ElementId {
    fn eq(&self, other: &str) -> bool {
        interner()
            .resolve(self.0)
            .is_some_and(|value| value == other)
    }
}

impl PartialEq<&str> for ElementId {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_interns_equal_strings() {
        let id1 = ElementId::new("d1");
        let id2 = ElementId::new("d1");
        let id3 = ElementId::new("d2");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
        assert_eq!(id1, "d1");
    }

    #[test]
    fn test_ordering_follows_strings() {
        let mut ids = vec![
            ElementId::new("zz"),
            ElementId::new("ab"),
            ElementId::new("b"),
        ];
        ids.sort();

        let names: Vec<String> = ids.iter().map(ElementId::as_string).collect();
        assert_eq!(names, vec!["ab", "b", "zz"]);
    }

    #[test]
    fn test_display() {
        let id = ElementId::new("e7a3f");
        assert_eq!(id.to_string(), "e7a3f");
        assert_eq!(format!("<{id}>"), "<e7a3f>");
    }
}
