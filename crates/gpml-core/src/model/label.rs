//! Free text labels.

use crate::identifier::ElementId;

use super::{
    info::{ElementInfo, PathwayElement},
    shaped::ShapedGraphics,
};

/// A text label, optionally linking to a web resource.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    info: ElementInfo,
    graphics: ShapedGraphics,
    text_label: String,
    href: Option<String>,
}

impl Label {
    pub fn new(element_id: ElementId, text_label: impl Into<String>, graphics: ShapedGraphics) -> Self {
        Self {
            info: ElementInfo::new(element_id),
            graphics,
            text_label: text_label.into(),
            href: None,
        }
    }

    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn graphics(&self) -> &ShapedGraphics {
        &self.graphics
    }

    pub fn graphics_mut(&mut self) -> &mut ShapedGraphics {
        &mut self.graphics
    }

    pub fn text_label(&self) -> &str {
        &self.text_label
    }

    pub fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }

    pub fn set_text_label(&mut self, text_label: impl Into<String>) {
        self.text_label = text_label.into();
    }

    pub fn set_href(&mut self, href: Option<String>) {
        self.href = href;
    }

    pub fn set_z_order(&mut self, z_order: i32) {
        self.info.set_z_order(z_order);
    }
}

impl PathwayElement for Label {
    fn info(&self) -> &ElementInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut ElementInfo {
        &mut self.info
    }
}
