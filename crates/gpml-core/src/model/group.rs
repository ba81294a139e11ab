//! Groups of pathway elements.

use indexmap::IndexSet;

use crate::{identifier::ElementId, types::GroupType, xref::Xref};

use super::{
    info::{ElementInfo, PathwayElement},
    shaped::ShapedGraphics,
};

/// A set of groupable elements drawn and moved as a unit.
///
/// Membership is two sided: a member's [`ElementInfo::group_ref`] names the
/// group and the group lists the member. Both sides change together through
/// [`PathwayModel::group_add_member`](super::PathwayModel::group_add_member)
/// and [`PathwayModel::group_remove_member`](super::PathwayModel::group_remove_member).
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    info: ElementInfo,
    graphics: ShapedGraphics,
    group_type: GroupType,
    text_label: Option<String>,
    xref: Option<Xref>,
    members: IndexSet<ElementId>,
}

impl Group {
    pub fn new(element_id: ElementId, group_type: GroupType) -> Self {
        Self {
            info: ElementInfo::new(element_id),
            graphics: ShapedGraphics::default(),
            group_type,
            text_label: None,
            xref: None,
            members: IndexSet::new(),
        }
    }

    pub fn with_graphics(mut self, graphics: ShapedGraphics) -> Self {
        self.graphics = graphics;
        self
    }

    pub fn with_text_label(mut self, text_label: impl Into<String>) -> Self {
        self.text_label = Some(text_label.into());
        self
    }

    pub fn with_xref(mut self, xref: Xref) -> Self {
        self.xref = Some(xref);
        self
    }

    pub fn graphics(&self) -> &ShapedGraphics {
        &self.graphics
    }

    pub fn graphics_mut(&mut self) -> &mut ShapedGraphics {
        &mut self.graphics
    }

    pub fn group_type(&self) -> &GroupType {
        &self.group_type
    }

    pub fn text_label(&self) -> Option<&str> {
        self.text_label.as_deref()
    }

    pub fn xref(&self) -> Option<&Xref> {
        self.xref.as_ref()
    }

    /// Member ids in the order they joined.
    pub fn members(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.members.iter().copied()
    }

    pub fn has_member(&self, id: ElementId) -> bool {
        self.members.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn set_group_type(&mut self, group_type: GroupType) {
        self.group_type = group_type;
    }

    pub fn set_text_label(&mut self, text_label: Option<String>) {
        self.text_label = text_label;
    }

    pub fn set_xref(&mut self, xref: Option<Xref>) {
        self.xref = xref;
    }

    pub fn set_z_order(&mut self, z_order: i32) {
        self.info.set_z_order(z_order);
    }

    pub(crate) fn insert_member(&mut self, id: ElementId) {
        self.members.insert(id);
    }

    pub(crate) fn remove_member(&mut self, id: ElementId) -> bool {
        self.members.shift_remove(&id)
    }

    pub(crate) fn take_members(&mut self) -> Vec<ElementId> {
        self.members.drain(..).collect()
    }
}

impl PathwayElement for Group {
    fn info(&self) -> &ElementInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut ElementInfo {
        &mut self.info
    }
}
