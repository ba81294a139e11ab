//! Shared annotation targets.
//!
//! Annotations, citations and evidences are pathway-wide objects. Elements
//! point at them through refs (see [`refs`](super::refs)); removing one from
//! the model strips every ref that points at it.

use crate::{identifier::ElementId, types::AnnotationType, xref::Xref};

/// An ontology term or other controlled annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    element_id: ElementId,
    value: String,
    annotation_type: AnnotationType,
    xref: Option<Xref>,
    url: Option<String>,
}

impl Annotation {
    pub fn new(element_id: ElementId, value: impl Into<String>, annotation_type: AnnotationType) -> Self {
        Self {
            element_id,
            value: value.into(),
            annotation_type,
            xref: None,
            url: None,
        }
    }

    pub fn with_xref(mut self, xref: Xref) -> Self {
        self.xref = Some(xref);
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn element_id(&self) -> ElementId {
        self.element_id
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn annotation_type(&self) -> &AnnotationType {
        &self.annotation_type
    }

    pub fn xref(&self) -> Option<&Xref> {
        self.xref.as_ref()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn set_annotation_type(&mut self, annotation_type: AnnotationType) {
        self.annotation_type = annotation_type;
    }

    pub fn set_xref(&mut self, xref: Option<Xref>) {
        self.xref = xref;
    }

    pub fn set_url(&mut self, url: Option<String>) {
        self.url = url;
    }
}

/// A literature reference.
///
/// A citation needs an xref, a url, or both before it can be written.
///
/// # Examples
///
/// ```
/// use gpml_core::{identifier::ElementId, model::Citation, xref::Xref};
///
/// let citation = Citation::new(ElementId::new("c1")).with_xref(Xref::new("17588266", "PubMed"));
/// assert!(citation.is_resolvable());
/// assert!(!Citation::new(ElementId::new("c2")).is_resolvable());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Citation {
    element_id: ElementId,
    xref: Option<Xref>,
    url: Option<String>,
}

impl Citation {
    pub fn new(element_id: ElementId) -> Self {
        Self {
            element_id,
            xref: None,
            url: None,
        }
    }

    pub fn with_xref(mut self, xref: Xref) -> Self {
        self.xref = Some(xref);
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn element_id(&self) -> ElementId {
        self.element_id
    }

    pub fn xref(&self) -> Option<&Xref> {
        self.xref.as_ref()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Returns `true` when the citation carries an xref or a url.
    pub fn is_resolvable(&self) -> bool {
        self.xref.is_some() || self.url.is_some()
    }

    pub fn set_xref(&mut self, xref: Option<Xref>) {
        self.xref = xref;
    }

    pub fn set_url(&mut self, url: Option<String>) {
        self.url = url;
    }
}

/// Evidence backing an element, such as an experimental method.
#[derive(Debug, Clone, PartialEq)]
pub struct Evidence {
    element_id: ElementId,
    value: Option<String>,
    xref: Xref,
    url: Option<String>,
}

impl Evidence {
    pub fn new(element_id: ElementId, xref: Xref) -> Self {
        Self {
            element_id,
            value: None,
            xref,
            url: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn element_id(&self) -> ElementId {
        self.element_id
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn xref(&self) -> &Xref {
        &self.xref
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn set_value(&mut self, value: Option<String>) {
        self.value = value;
    }

    pub fn set_xref(&mut self, xref: Xref) {
        self.xref = xref;
    }

    pub fn set_url(&mut self, url: Option<String>) {
        self.url = url;
    }
}
