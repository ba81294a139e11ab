//! Links from an annotated object to shared annotation targets.
//!
//! A ref is owned by whoever holds it (the pathway, an element, or an
//! enclosing ref) and points at one shared [`Annotation`](super::Annotation),
//! [`Citation`](super::Citation) or [`Evidence`](super::Evidence). Refs nest:
//! an [`AnnotationRef`] may carry citation and evidence refs that qualify it,
//! and a [`CitationRef`] may carry annotation refs.
//!
//! Refs are plain values. Their targets are checked when the ref is attached
//! through [`PathwayModel`](super::PathwayModel).

use crate::identifier::ElementId;

/// Reference to an [`Annotation`](super::Annotation).
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationRef {
    annotation: ElementId,
    citation_refs: Vec<CitationRef>,
    evidence_refs: Vec<EvidenceRef>,
}

impl AnnotationRef {
    pub fn new(annotation: ElementId) -> Self {
        Self {
            annotation,
            citation_refs: Vec::new(),
            evidence_refs: Vec::new(),
        }
    }

    pub fn annotation(&self) -> ElementId {
        self.annotation
    }

    pub fn citation_refs(&self) -> &[CitationRef] {
        &self.citation_refs
    }

    pub fn evidence_refs(&self) -> &[EvidenceRef] {
        &self.evidence_refs
    }

    pub fn with_citation_ref(mut self, citation_ref: CitationRef) -> Self {
        self.citation_refs.push(citation_ref);
        self
    }

    pub fn with_evidence_ref(mut self, evidence_ref: EvidenceRef) -> Self {
        self.evidence_refs.push(evidence_ref);
        self
    }

    pub(crate) fn strip_target(&mut self, target: ElementId) {
        self.citation_refs.retain(|r| r.citation != target);
        self.evidence_refs.retain(|r| r.evidence != target);
        for citation_ref in &mut self.citation_refs {
            citation_ref.strip_target(target);
        }
    }
}

/// Reference to a [`Citation`](super::Citation).
#[derive(Debug, Clone, PartialEq)]
pub struct CitationRef {
    citation: ElementId,
    annotation_refs: Vec<AnnotationRef>,
}

impl CitationRef {
    pub fn new(citation: ElementId) -> Self {
        Self {
            citation,
            annotation_refs: Vec::new(),
        }
    }

    pub fn citation(&self) -> ElementId {
        self.citation
    }

    pub fn annotation_refs(&self) -> &[AnnotationRef] {
        &self.annotation_refs
    }

    pub fn with_annotation_ref(mut self, annotation_ref: AnnotationRef) -> Self {
        self.annotation_refs.push(annotation_ref);
        self
    }

    pub(crate) fn strip_target(&mut self, target: ElementId) {
        self.annotation_refs.retain(|r| r.annotation != target);
        for annotation_ref in &mut self.annotation_refs {
            annotation_ref.strip_target(target);
        }
    }
}

/// Reference to an [`Evidence`](super::Evidence).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvidenceRef {
    evidence: ElementId,
}

impl EvidenceRef {
    pub fn new(evidence: ElementId) -> Self {
        Self { evidence }
    }

    pub fn evidence(&self) -> ElementId {
        self.evidence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_nested_target() {
        let a1 = ElementId::new("refs_a1");
        let c1 = ElementId::new("refs_c1");
        let e1 = ElementId::new("refs_e1");

        let mut annotation_ref = AnnotationRef::new(a1)
            .with_citation_ref(CitationRef::new(c1))
            .with_evidence_ref(EvidenceRef::new(e1));
        annotation_ref.strip_target(c1);

        assert!(annotation_ref.citation_refs().is_empty());
        assert_eq!(annotation_ref.evidence_refs().len(), 1);
    }
}
