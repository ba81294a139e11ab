//! Change notifications emitted by [`PathwayModel`](super::PathwayModel).
//!
//! Events are raised by the model's structural operations only (adding,
//! removing, regrouping). Property setters on individual elements do not
//! notify.

use std::sync::mpsc::Sender;

use crate::identifier::ElementId;

use super::entity::EntityKind;

/// A structural change of the model.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelEvent {
    Added { id: ElementId, kind: EntityKind },
    Removed { id: ElementId, kind: EntityKind },
    MemberAdded { group: ElementId, member: ElementId },
    MemberRemoved { group: ElementId, member: ElementId },
}

/// Receives [`ModelEvent`]s from a model.
pub trait ModelObserver: Send {
    fn on_event(&mut self, event: &ModelEvent);
}

impl ModelObserver for Sender<ModelEvent> {
    /// Forwards events to a channel; a closed receiver drops them.
    fn on_event(&mut self, event: &ModelEvent) {
        let _ = self.send(event.clone());
    }
}
