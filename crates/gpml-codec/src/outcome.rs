//! Results of successful reads and writes.

use gpml_core::model::PathwayModel;

use crate::{dom::Document, error::Warning};

/// A model read from a document, with notes on input quirks that were
/// normalised along the way.
#[derive(Debug)]
pub struct ReadOutcome {
    pub model: PathwayModel,
    pub notes: Vec<Warning>,
}

/// A written document, with the information that could not be expressed.
#[derive(Debug)]
pub struct WriteOutcome {
    pub document: Document,
    pub warnings: Vec<Warning>,
}
