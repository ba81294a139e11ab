//! Reference resolution shared by both readers.
//!
//! Group membership is resolved as soon as the groups exist. Data node
//! aliases and line point links may point at anything in the document, so
//! they are collected in a [`DeferredRefs`] table and resolved once after
//! every element has been added. Targets that cannot be resolved leave the
//! reference unset.

use log::debug;

use gpml_core::{
    identifier::ElementId,
    model::{EntityKind, PathwayModel, PointLink},
};

use crate::error::Result;

/// Adds `member` to `group` when the group exists.
///
/// # Errors
///
/// Propagates membership violations such as cycles.
pub(crate) fn join_group(
    model: &mut PathwayModel,
    member: ElementId,
    key: &str,
    group: Option<ElementId>,
) -> Result<()> {
    match group.filter(|group| model.kind_of(*group) == Some(EntityKind::Group)) {
        Some(group) => {
            model.group_add_member(group, member)?;
        }
        None => {
            debug!(element_id:% = member, group_ref = key; "Skipping unresolved group reference");
        }
    }
    Ok(())
}

/// Resolves a document id against the registered ids.
pub(crate) fn registered(model: &PathwayModel, key: &str) -> Option<ElementId> {
    let id = ElementId::new(key);
    model.contains(id).then_some(id)
}

#[derive(Debug)]
enum Deferred {
    Alias {
        data_node: ElementId,
        target: String,
    },
    PointLink {
        point: ElementId,
        target: String,
        rel_x: f64,
        rel_y: f64,
    },
}

/// References recorded while reading, resolved in one pass at the end.
#[derive(Debug, Default)]
pub(crate) struct DeferredRefs {
    refs: Vec<Deferred>,
}

impl DeferredRefs {
    pub fn alias(&mut self, data_node: ElementId, target: impl Into<String>) {
        self.refs.push(Deferred::Alias {
            data_node,
            target: target.into(),
        });
    }

    pub fn point_link(&mut self, point: ElementId, target: impl Into<String>, rel_x: f64, rel_y: f64) {
        self.refs.push(Deferred::PointLink {
            point,
            target: target.into(),
            rel_x,
            rel_y,
        });
    }

    pub fn len(&self) -> usize {
        self.refs.len()
    }

    /// Resolves every recorded reference. Returns how many were set.
    ///
    /// # Errors
    ///
    /// Propagates model errors other than an unusable target.
    pub fn resolve(self, model: &mut PathwayModel) -> Result<usize> {
        let mut resolved = 0;
        for deferred in self.refs {
            match deferred {
                Deferred::Alias { data_node, target } => {
                    match registered(model, &target).filter(|id| model.kind_of(*id) == Some(EntityKind::Group)) {
                        Some(group) => {
                            model.set_alias_ref(data_node, Some(group))?;
                            resolved += 1;
                        }
                        None => {
                            debug!(element_id:% = data_node, alias_ref = target.as_str(); "Leaving alias unset");
                        }
                    }
                }
                Deferred::PointLink {
                    point,
                    target,
                    rel_x,
                    rel_y,
                } => {
                    let linkable = registered(model, &target)
                        .filter(|id| model.kind_of(*id).is_some_and(EntityKind::is_linkable));
                    match linkable {
                        Some(target) => {
                            model.set_point_link(point, Some(PointLink::new(target, rel_x, rel_y)))?;
                            resolved += 1;
                        }
                        None => {
                            debug!(element_id:% = point, element_ref = target.as_str(); "Leaving point link unset");
                        }
                    }
                }
            }
        }
        Ok(resolved)
    }
}
