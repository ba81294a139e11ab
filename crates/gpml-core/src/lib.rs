//! GPML Core Types and Definitions
//!
//! This crate provides the pathway object model shared by the GPML readers
//! and writers. It includes:
//!
//! - **Identifiers**: String-interned element ids ([`identifier::ElementId`])
//! - **Colors**: RGBA colors with GPML hex rendering ([`color::Color`])
//! - **Geometry**: Coordinates, sizes and bounding boxes ([`geometry`] module)
//! - **Vocabularies**: Node, group, arrow and shape types ([`types`] module)
//! - **Style**: Font, shape and line styling ([`style`] module)
//! - **Xrefs**: External database references ([`xref`] module)
//! - **Model**: Pathway elements and the [`model::PathwayModel`] registry

pub mod color;
pub mod geometry;
pub mod identifier;
pub mod model;
pub mod style;
pub mod types;
pub mod xref;
