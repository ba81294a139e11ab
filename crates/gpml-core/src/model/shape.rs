//! Decorative shapes such as cell compartments.

use crate::identifier::ElementId;

use super::{
    info::{ElementInfo, PathwayElement},
    shaped::ShapedGraphics,
};

/// A graphical shape. Its outline and rotation live in the shape style.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    info: ElementInfo,
    graphics: ShapedGraphics,
    text_label: Option<String>,
}

impl Shape {
    pub fn new(element_id: ElementId, graphics: ShapedGraphics) -> Self {
        Self {
            info: ElementInfo::new(element_id),
            graphics,
            text_label: None,
        }
    }

    pub fn with_text_label(mut self, text_label: impl Into<String>) -> Self {
        self.text_label = Some(text_label.into());
        self
    }

    pub fn graphics(&self) -> &ShapedGraphics {
        &self.graphics
    }

    pub fn graphics_mut(&mut self) -> &mut ShapedGraphics {
        &mut self.graphics
    }

    pub fn text_label(&self) -> Option<&str> {
        self.text_label.as_deref()
    }

    pub fn set_text_label(&mut self, text_label: Option<String>) {
        self.text_label = text_label;
    }

    pub fn set_z_order(&mut self, z_order: i32) {
        self.info.set_z_order(z_order);
    }
}

impl PathwayElement for Shape {
    fn info(&self) -> &ElementInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut ElementInfo {
        &mut self.info
    }
}
