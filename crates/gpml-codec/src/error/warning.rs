//! Non-fatal findings of a read or write.

use std::fmt;

use gpml_core::identifier::ElementId;

/// Information that was normalised on read or dropped on write.
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    /// A dynamic property whose key the legacy format reserves was dropped.
    ReservedProperty {
        element_id: Option<ElementId>,
        key: String,
        value: String,
    },

    /// Data the target format cannot express was dropped.
    UnsupportedFeature {
        element_id: Option<ElementId>,
        feature: String,
    },

    /// An input quirk was rewritten into the model's form.
    Normalised {
        element_id: Option<ElementId>,
        detail: String,
    },
}

impl Warning {
    pub(crate) fn unsupported(element_id: Option<ElementId>, feature: impl Into<String>) -> Self {
        Self::UnsupportedFeature {
            element_id,
            feature: feature.into(),
        }
    }

    pub(crate) fn normalised(element_id: Option<ElementId>, detail: impl Into<String>) -> Self {
        Self::Normalised {
            element_id,
            detail: detail.into(),
        }
    }

    /// The element the warning is about, if it is not the pathway itself.
    pub fn element_id(&self) -> Option<ElementId> {
        match self {
            Self::ReservedProperty { element_id, .. }
            | Self::UnsupportedFeature { element_id, .. }
            | Self::Normalised { element_id, .. } => *element_id,
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let owner = |id: &Option<ElementId>| match id {
            Some(id) => format!("`{id}`"),
            None => "pathway".to_string(),
        };
        match self {
            Self::ReservedProperty {
                element_id,
                key,
                value,
            } => write!(
                f,
                "{}: dropped reserved property `{key}` = `{value}`",
                owner(element_id)
            ),
            Self::UnsupportedFeature {
                element_id,
                feature,
            } => write!(f, "{}: {feature} cannot be written", owner(element_id)),
            Self::Normalised { element_id, detail } => {
                write!(f, "{}: {detail}", owner(element_id))
            }
        }
    }
}
