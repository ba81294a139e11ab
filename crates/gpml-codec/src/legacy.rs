//! GPML2013a support.
//!
//! # Overview
//!
//! - [`read`] builds a model from a GPML2013a (or GPML2010a) document,
//!   generating ids for elements without `GraphId`, attaching top-level
//!   states to their data nodes and fitting group graphics around members.
//! - [`write`] emits the fixed GPML2013a child sequence and reports
//!   everything the schema cannot carry as warnings.
//! - [`RESERVED_KEYS`] lists the dynamic property keys the legacy format
//!   generates itself; model properties with those keys are dropped on write.

mod biopax;
mod names;
mod reader;
mod writer;

pub use names::{RESERVED_KEYS, is_reserved_key};
pub use reader::read;
pub use writer::write;
