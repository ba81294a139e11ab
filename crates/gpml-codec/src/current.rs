//! GPML2021 support.
//!
//! # Overview
//!
//! - [`read`] builds a model from a GPML2021 document. Elements live in typed
//!   list containers (`DataNodes`, `Groups`, ...), every element carries an
//!   `elementId`, and references (`groupRef`, `aliasRef`, `elementRef`) use
//!   those ids directly.
//! - [`write`] emits annotations, citations and evidences, then the graph
//!   elements per category in draw order. `zOrder` is always written.

mod reader;
mod writer;

pub use reader::read;
pub use writer::write;
