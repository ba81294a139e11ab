//! Data carried by every graph element.
//!
//! # Overview
//!
//! - [`Comment`] - Free text with an optional source tag
//! - [`CommentGroup`] - Comments, dynamic properties and annotation refs. The
//!   pathway and every [`ElementInfo`] hold one.
//! - [`ElementInfo`] - Identity, parent group and draw order of an element

use indexmap::IndexMap;

use crate::identifier::ElementId;

use super::refs::{AnnotationRef, CitationRef, EvidenceRef};

/// A free text comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    text: String,
    source: Option<String>,
}

impl Comment {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

/// Comments, dynamic properties and annotation refs of one owner.
///
/// Dynamic properties form a string map. Setting a key replaces its previous
/// value; a missing key means the property is absent.
///
/// Refs can be read here but are only attached or detached through
/// [`PathwayModel`](super::PathwayModel), which checks that their targets
/// exist.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommentGroup {
    comments: Vec<Comment>,
    dynamic_properties: IndexMap<String, String>,
    annotation_refs: Vec<AnnotationRef>,
    citation_refs: Vec<CitationRef>,
    evidence_refs: Vec<EvidenceRef>,
}

impl CommentGroup {
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn add_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
    }

    /// Removes and returns the comment at `index`, if any.
    pub fn remove_comment(&mut self, index: usize) -> Option<Comment> {
        (index < self.comments.len()).then(|| self.comments.remove(index))
    }

    pub fn dynamic_property(&self, key: &str) -> Option<&str> {
        self.dynamic_properties.get(key).map(String::as_str)
    }

    /// Iterates over dynamic properties in insertion order.
    pub fn dynamic_properties(&self) -> impl Iterator<Item = (&str, &str)> {
        self.dynamic_properties
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Sets a dynamic property, returning the value it replaced.
    pub fn set_dynamic_property(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.dynamic_properties.insert(key.into(), value.into())
    }

    pub fn remove_dynamic_property(&mut self, key: &str) -> Option<String> {
        self.dynamic_properties.shift_remove(key)
    }

    pub fn annotation_refs(&self) -> &[AnnotationRef] {
        &self.annotation_refs
    }

    pub fn citation_refs(&self) -> &[CitationRef] {
        &self.citation_refs
    }

    pub fn evidence_refs(&self) -> &[EvidenceRef] {
        &self.evidence_refs
    }

    /// Returns `true` when the group holds no data at all.
    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
            && self.dynamic_properties.is_empty()
            && self.annotation_refs.is_empty()
            && self.citation_refs.is_empty()
            && self.evidence_refs.is_empty()
    }

    pub(crate) fn push_annotation_ref(&mut self, annotation_ref: AnnotationRef) {
        self.annotation_refs.push(annotation_ref);
    }

    pub(crate) fn push_citation_ref(&mut self, citation_ref: CitationRef) {
        self.citation_refs.push(citation_ref);
    }

    pub(crate) fn push_evidence_ref(&mut self, evidence_ref: EvidenceRef) {
        self.evidence_refs.push(evidence_ref);
    }

    pub(crate) fn take_annotation_ref(&mut self, annotation: ElementId) -> Option<AnnotationRef> {
        let index = self
            .annotation_refs
            .iter()
            .position(|r| r.annotation() == annotation)?;
        Some(self.annotation_refs.remove(index))
    }

    pub(crate) fn take_citation_ref(&mut self, citation: ElementId) -> Option<CitationRef> {
        let index = self
            .citation_refs
            .iter()
            .position(|r| r.citation() == citation)?;
        Some(self.citation_refs.remove(index))
    }

    pub(crate) fn take_evidence_ref(&mut self, evidence: ElementId) -> Option<EvidenceRef> {
        let index = self
            .evidence_refs
            .iter()
            .position(|r| r.evidence() == evidence)?;
        Some(self.evidence_refs.remove(index))
    }

    /// Drops every ref, at any depth, pointing at `target`.
    pub(crate) fn strip_target(&mut self, target: ElementId) {
        self.annotation_refs.retain(|r| r.annotation() != target);
        self.citation_refs.retain(|r| r.citation() != target);
        self.evidence_refs.retain(|r| r.evidence() != target);
        for annotation_ref in &mut self.annotation_refs {
            annotation_ref.strip_target(target);
        }
        for citation_ref in &mut self.citation_refs {
            citation_ref.strip_target(target);
        }
    }

    pub(crate) fn clear_refs(&mut self) {
        self.annotation_refs.clear();
        self.citation_refs.clear();
        self.evidence_refs.clear();
    }
}

/// Identity, parent group, draw order and comment group of a graph element.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementInfo {
    element_id: ElementId,
    group_ref: Option<ElementId>,
    z_order: i32,
    comment_group: CommentGroup,
}

impl ElementInfo {
    pub fn new(element_id: ElementId) -> Self {
        Self {
            element_id,
            group_ref: None,
            z_order: 0,
            comment_group: CommentGroup::default(),
        }
    }

    pub fn element_id(&self) -> ElementId {
        self.element_id
    }

    /// The group this element belongs to, if any.
    pub fn group_ref(&self) -> Option<ElementId> {
        self.group_ref
    }

    pub fn z_order(&self) -> i32 {
        self.z_order
    }

    pub fn comment_group(&self) -> &CommentGroup {
        &self.comment_group
    }

    pub fn comment_group_mut(&mut self) -> &mut CommentGroup {
        &mut self.comment_group
    }

    pub(crate) fn set_group_ref(&mut self, group: Option<ElementId>) {
        self.group_ref = group;
    }

    pub(crate) fn set_z_order(&mut self, z_order: i32) {
        self.z_order = z_order;
    }
}

/// Common access to the [`ElementInfo`] of graph elements.
pub trait PathwayElement {
    fn info(&self) -> &ElementInfo;

    fn info_mut(&mut self) -> &mut ElementInfo;

    fn element_id(&self) -> ElementId {
        self.info().element_id()
    }

    fn z_order(&self) -> i32 {
        self.info().z_order()
    }

    fn comment_group(&self) -> &CommentGroup {
        self.info().comment_group()
    }

    fn comment_group_mut(&mut self) -> &mut CommentGroup {
        self.info_mut().comment_group_mut()
    }
}
