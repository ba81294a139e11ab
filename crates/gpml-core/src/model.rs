//! The pathway object graph.
//!
//! A [`PathwayModel`] owns every identity-bearing object of one pathway and
//! is the only place where cross references between objects are created or
//! broken. Objects refer to each other by [`ElementId`](crate::identifier::ElementId);
//! back references (an element's group, a state's data node, a point's line)
//! are resolved through the model, never held as pointers.
//!
//! # Organization
//!
//! - [`info`] - Data shared by all graph elements: [`ElementInfo`], [`CommentGroup`], [`Comment`]
//! - [`refs`] - Evidence annotation links: [`AnnotationRef`], [`CitationRef`], [`EvidenceRef`]
//! - [`pathway`] - The singleton [`Pathway`] with its metadata and [`Author`]s
//! - [`shaped`] - Geometry and style of boxed elements: [`ShapedGraphics`]
//! - [`data_node`] - [`DataNode`] and its owned [`State`]s
//! - [`label`], [`shape`], [`group`] - The remaining shaped elements
//! - [`line`] - [`Interaction`], [`GraphicalLine`], [`LinePoint`], [`Anchor`]
//! - [`annotation`] - Shared [`Annotation`], [`Citation`] and [`Evidence`] targets
//! - [`entity`] - Owned and borrowed views over any registered object
//! - [`pathway_model`] - The [`PathwayModel`] registry itself
//! - [`observer`] - Change notifications for model consumers
//! - [`error`] - [`ModelError`]

pub mod annotation;
pub mod data_node;
pub mod entity;
pub mod error;
pub mod group;
pub mod info;
pub mod label;
pub mod line;
pub mod observer;
pub mod pathway;
pub mod pathway_model;
pub mod refs;
pub mod shape;
pub mod shaped;

pub use annotation::*;
pub use data_node::*;
pub use entity::*;
pub use error::*;
pub use group::*;
pub use info::*;
pub use label::*;
pub use line::*;
pub use observer::*;
pub use pathway::*;
pub use pathway_model::*;
pub use refs::*;
pub use shape::*;
pub use shaped::*;
