//! Uniform views over every object kind the model registers.

use std::fmt;

use crate::identifier::ElementId;

use super::{
    annotation::{Annotation, Citation, Evidence},
    data_node::{DataNode, State},
    group::Group,
    info::{ElementInfo, PathwayElement},
    label::Label,
    line::{Anchor, GraphicalLine, Interaction, LinePoint},
    shape::Shape,
};

/// Kind of a registered object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    DataNode,
    State,
    Interaction,
    GraphicalLine,
    LinePoint,
    Anchor,
    Label,
    Shape,
    Group,
    Annotation,
    Citation,
    Evidence,
}

impl EntityKind {
    /// Kinds a line point may attach to.
    pub fn is_linkable(self) -> bool {
        matches!(
            self,
            Self::DataNode | Self::State | Self::Label | Self::Shape | Self::Group | Self::Anchor
        )
    }

    /// Kinds that may be members of a group.
    pub fn is_groupable(self) -> bool {
        matches!(
            self,
            Self::DataNode
                | Self::Label
                | Self::Shape
                | Self::Interaction
                | Self::GraphicalLine
                | Self::Group
        )
    }

    /// Kinds that carry an [`ElementInfo`].
    pub fn has_info(self) -> bool {
        self.is_groupable() || self == Self::State
    }

    /// Kinds owned by another element rather than by the model directly.
    pub fn is_owned_child(self) -> bool {
        matches!(self, Self::State | Self::LinePoint | Self::Anchor)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::DataNode => "DataNode",
            Self::State => "State",
            Self::Interaction => "Interaction",
            Self::GraphicalLine => "GraphicalLine",
            Self::LinePoint => "Point",
            Self::Anchor => "Anchor",
            Self::Label => "Label",
            Self::Shape => "Shape",
            Self::Group => "Group",
            Self::Annotation => "Annotation",
            Self::Citation => "Citation",
            Self::Evidence => "Evidence",
        };
        f.write_str(name)
    }
}

/// An owned object, as passed to [`PathwayModel::add`](super::PathwayModel::add)
/// or returned by [`PathwayModel::remove`](super::PathwayModel::remove).
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    DataNode(DataNode),
    State(State),
    Interaction(Interaction),
    GraphicalLine(GraphicalLine),
    LinePoint(LinePoint),
    Anchor(Anchor),
    Label(Label),
    Shape(Shape),
    Group(Group),
    Annotation(Annotation),
    Citation(Citation),
    Evidence(Evidence),
}

/// A borrowed object, as returned by [`PathwayModel::lookup`](super::PathwayModel::lookup).
#[derive(Debug, Clone, Copy)]
pub enum EntityRef<'a> {
    DataNode(&'a DataNode),
    State(&'a State),
    Interaction(&'a Interaction),
    GraphicalLine(&'a GraphicalLine),
    LinePoint(&'a LinePoint),
    Anchor(&'a Anchor),
    Label(&'a Label),
    Shape(&'a Shape),
    Group(&'a Group),
    Annotation(&'a Annotation),
    Citation(&'a Citation),
    Evidence(&'a Evidence),
}

macro_rules! dispatch_id {
    ($value:expr, $enum:ident) => {
        match $value {
            $enum::DataNode(e) => e.element_id(),
            $enum::State(e) => e.element_id(),
            $enum::Interaction(e) => e.element_id(),
            $enum::GraphicalLine(e) => e.element_id(),
            $enum::LinePoint(e) => e.element_id(),
            $enum::Anchor(e) => e.element_id(),
            $enum::Label(e) => e.element_id(),
            $enum::Shape(e) => e.element_id(),
            $enum::Group(e) => e.element_id(),
            $enum::Annotation(e) => e.element_id(),
            $enum::Citation(e) => e.element_id(),
            $enum::Evidence(e) => e.element_id(),
        }
    };
}

macro_rules! dispatch_kind {
    ($value:expr, $enum:ident) => {
        match $value {
            $enum::DataNode(_) => EntityKind::DataNode,
            $enum::State(_) => EntityKind::State,
            $enum::Interaction(_) => EntityKind::Interaction,
            $enum::GraphicalLine(_) => EntityKind::GraphicalLine,
            $enum::LinePoint(_) => EntityKind::LinePoint,
            $enum::Anchor(_) => EntityKind::Anchor,
            $enum::Label(_) => EntityKind::Label,
            $enum::Shape(_) => EntityKind::Shape,
            $enum::Group(_) => EntityKind::Group,
            $enum::Annotation(_) => EntityKind::Annotation,
            $enum::Citation(_) => EntityKind::Citation,
            $enum::Evidence(_) => EntityKind::Evidence,
        }
    };
}

impl Entity {
    pub fn element_id(&self) -> ElementId {
        dispatch_id!(self, Entity)
    }

    pub fn kind(&self) -> EntityKind {
        dispatch_kind!(self, Entity)
    }

    /// Ids this entity brings into the model: its own and those of owned children.
    pub fn registered_ids(&self) -> Vec<ElementId> {
        let mut ids = vec![self.element_id()];
        match self {
            Entity::DataNode(node) => ids.extend(node.states().iter().map(|s| s.element_id())),
            Entity::Interaction(line) => ids.extend(line.line().child_ids()),
            Entity::GraphicalLine(line) => ids.extend(line.line().child_ids()),
            _ => {}
        }
        ids
    }
}

impl<'a> EntityRef<'a> {
    pub fn element_id(&self) -> ElementId {
        dispatch_id!(self, EntityRef)
    }

    pub fn kind(&self) -> EntityKind {
        dispatch_kind!(self, EntityRef)
    }

    /// The [`ElementInfo`] of kinds that carry one.
    pub fn info(&self) -> Option<&'a ElementInfo> {
        match *self {
            EntityRef::DataNode(e) => Some(e.info()),
            EntityRef::State(e) => Some(e.info()),
            EntityRef::Interaction(e) => Some(e.info()),
            EntityRef::GraphicalLine(e) => Some(e.info()),
            EntityRef::Label(e) => Some(e.info()),
            EntityRef::Shape(e) => Some(e.info()),
            EntityRef::Group(e) => Some(e.info()),
            EntityRef::LinePoint(_)
            | EntityRef::Anchor(_)
            | EntityRef::Annotation(_)
            | EntityRef::Citation(_)
            | EntityRef::Evidence(_) => None,
        }
    }
}

macro_rules! impl_from_entity {
    ($($variant:ident),+ $(,)?) => {
        $(
            impl From<$variant> for Entity {
                fn from(value: $variant) -> Self {
                    Entity::$variant(value)
                }
            }
        )+
    };
}

impl_from_entity!(
    DataNode,
    State,
    Interaction,
    GraphicalLine,
    LinePoint,
    Anchor,
    Label,
    Shape,
    Group,
    Annotation,
    Citation,
    Evidence,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capabilities() {
        assert!(EntityKind::Anchor.is_linkable());
        assert!(!EntityKind::Anchor.is_groupable());
        assert!(EntityKind::Interaction.is_groupable());
        assert!(!EntityKind::Interaction.is_linkable());
        assert!(EntityKind::State.is_linkable());
        assert!(!EntityKind::State.is_groupable());
        assert!(EntityKind::State.has_info());
        assert!(!EntityKind::Citation.has_info());
    }
}
