//! Font, shape and line style value objects.
//!
//! # Overview
//!
//! - [`FontProperty`]: text colour, face, weight/style flags, size and alignment
//! - [`ShapeStyle`]: border, fill, outline type and rotation of a shaped element
//! - [`LineStyle`]: colour, pattern, width and routing of a line element
//!
//! All three are plain values without identity. They provide both mutable
//! (`set_*`) and immutable (`with_*`) APIs.

use crate::{
    color::Color,
    types::{ConnectorType, HAlign, LineStyleType, ShapeType, VAlign},
};

// =============================================================================
// Font
// =============================================================================

/// Text rendering properties of a shaped element.
///
/// # Examples
///
/// ```
/// use gpml_core::style::FontProperty;
///
/// let font = FontProperty::default().with_bold(true).with_font_size(14.0);
/// assert!(font.bold());
/// assert_eq!(font.font_name(), "Arial");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FontProperty {
    text_color: Color,
    font_name: String,
    bold: bool,
    italic: bool,
    underline: bool,
    strikethrough: bool,
    font_size: f64,
    h_align: HAlign,
    v_align: VAlign,
}

impl Default for FontProperty {
    fn default() -> Self {
        Self {
            text_color: Color::BLACK,
            font_name: "Arial".to_string(),
            bold: false,
            italic: false,
            underline: false,
            strikethrough: false,
            font_size: 12.0,
            h_align: HAlign::Center,
            v_align: VAlign::Middle,
        }
    }
}

impl FontProperty {
    pub fn text_color(&self) -> Color {
        self.text_color
    }

    pub fn font_name(&self) -> &str {
        &self.font_name
    }

    pub fn bold(&self) -> bool {
        self.bold
    }

    pub fn italic(&self) -> bool {
        self.italic
    }

    pub fn underline(&self) -> bool {
        self.underline
    }

    pub fn strikethrough(&self) -> bool {
        self.strikethrough
    }

    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    pub fn h_align(&self) -> HAlign {
        self.h_align
    }

    pub fn v_align(&self) -> VAlign {
        self.v_align
    }

    pub fn set_text_color(&mut self, color: Color) {
        self.text_color = color;
    }

    pub fn set_font_name(&mut self, name: impl Into<String>) {
        self.font_name = name.into();
    }

    pub fn set_bold(&mut self, bold: bool) {
        self.bold = bold;
    }

    pub fn set_italic(&mut self, italic: bool) {
        self.italic = italic;
    }

    pub fn set_underline(&mut self, underline: bool) {
        self.underline = underline;
    }

    pub fn set_strikethrough(&mut self, strikethrough: bool) {
        self.strikethrough = strikethrough;
    }

    /// Sets the font size, ignoring negative values.
    pub fn set_font_size(&mut self, size: f64) {
        if size >= 0.0 {
            self.font_size = size;
        }
    }

    pub fn set_h_align(&mut self, align: HAlign) {
        self.h_align = align;
    }

    pub fn set_v_align(&mut self, align: VAlign) {
        self.v_align = align;
    }

    pub fn with_text_color(mut self, color: Color) -> Self {
        self.set_text_color(color);
        self
    }

    pub fn with_font_name(mut self, name: impl Into<String>) -> Self {
        self.set_font_name(name);
        self
    }

    pub fn with_bold(mut self, bold: bool) -> Self {
        self.set_bold(bold);
        self
    }

    pub fn with_italic(mut self, italic: bool) -> Self {
        self.set_italic(italic);
        self
    }

    pub fn with_font_size(mut self, size: f64) -> Self {
        self.set_font_size(size);
        self
    }

    pub fn with_h_align(mut self, align: HAlign) -> Self {
        self.set_h_align(align);
        self
    }

    pub fn with_v_align(mut self, align: VAlign) -> Self {
        self.set_v_align(align);
        self
    }
}

// =============================================================================
// Shape
// =============================================================================

/// Border, fill and outline properties of a shaped element.
///
/// Rotation is stored in radians.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeStyle {
    border_color: Color,
    border_style: LineStyleType,
    border_width: f64,
    fill_color: Color,
    shape_type: ShapeType,
    rotation: f64,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            border_color: Color::BLACK,
            border_style: LineStyleType::Solid,
            border_width: 1.0,
            fill_color: Color::WHITE,
            shape_type: ShapeType::Rectangle,
            rotation: 0.0,
        }
    }
}

impl ShapeStyle {
    /// A borderless, unfilled style, as used for free text labels.
    pub fn transparent() -> Self {
        Self {
            fill_color: Color::TRANSPARENT,
            shape_type: ShapeType::None,
            ..Self::default()
        }
    }

    pub fn border_color(&self) -> Color {
        self.border_color
    }

    pub fn border_style(&self) -> LineStyleType {
        self.border_style
    }

    pub fn border_width(&self) -> f64 {
        self.border_width
    }

    pub fn fill_color(&self) -> Color {
        self.fill_color
    }

    pub fn shape_type(&self) -> &ShapeType {
        &self.shape_type
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn set_border_color(&mut self, color: Color) {
        self.border_color = color;
    }

    pub fn set_border_style(&mut self, style: LineStyleType) {
        self.border_style = style;
    }

    /// Sets the border width, ignoring negative values.
    pub fn set_border_width(&mut self, width: f64) {
        if width >= 0.0 {
            self.border_width = width;
        }
    }

    pub fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    pub fn set_shape_type(&mut self, shape_type: ShapeType) {
        self.shape_type = shape_type;
    }

    pub fn set_rotation(&mut self, radians: f64) {
        self.rotation = radians;
    }

    pub fn with_border_color(mut self, color: Color) -> Self {
        self.set_border_color(color);
        self
    }

    pub fn with_border_style(mut self, style: LineStyleType) -> Self {
        self.set_border_style(style);
        self
    }

    pub fn with_border_width(mut self, width: f64) -> Self {
        self.set_border_width(width);
        self
    }

    pub fn with_fill_color(mut self, color: Color) -> Self {
        self.set_fill_color(color);
        self
    }

    pub fn with_shape_type(mut self, shape_type: ShapeType) -> Self {
        self.set_shape_type(shape_type);
        self
    }

    pub fn with_rotation(mut self, radians: f64) -> Self {
        self.set_rotation(radians);
        self
    }
}

// =============================================================================
// Line
// =============================================================================

/// Stroke and routing properties of a line element.
///
/// # Examples
///
/// ```
/// use gpml_core::{color::Color, style::LineStyle, types::LineStyleType};
///
/// let style = LineStyle::default()
///     .with_line_style(LineStyleType::Dashed)
///     .with_line_width(2.0);
/// assert_eq!(style.line_color(), Color::BLACK);
/// assert_eq!(style.line_style(), LineStyleType::Dashed);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    line_color: Color,
    line_style: LineStyleType,
    line_width: f64,
    connector_type: ConnectorType,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            line_color: Color::BLACK,
            line_style: LineStyleType::Solid,
            line_width: 1.0,
            connector_type: ConnectorType::Straight,
        }
    }
}

impl LineStyle {
    pub fn line_color(&self) -> Color {
        self.line_color
    }

    pub fn line_style(&self) -> LineStyleType {
        self.line_style
    }

    pub fn line_width(&self) -> f64 {
        self.line_width
    }

    pub fn connector_type(&self) -> &ConnectorType {
        &self.connector_type
    }

    pub fn set_line_color(&mut self, color: Color) {
        self.line_color = color;
    }

    pub fn set_line_style(&mut self, style: LineStyleType) {
        self.line_style = style;
    }

    /// Sets the line width, ignoring negative values.
    pub fn set_line_width(&mut self, width: f64) {
        if width >= 0.0 {
            self.line_width = width;
        }
    }

    pub fn set_connector_type(&mut self, connector_type: ConnectorType) {
        self.connector_type = connector_type;
    }

    pub fn with_line_color(mut self, color: Color) -> Self {
        self.set_line_color(color);
        self
    }

    pub fn with_line_style(mut self, style: LineStyleType) -> Self {
        self.set_line_style(style);
        self
    }

    pub fn with_line_width(mut self, width: f64) -> Self {
        self.set_line_width(width);
        self
    }

    pub fn with_connector_type(mut self, connector_type: ConnectorType) -> Self {
        self.set_connector_type(connector_type);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_defaults() {
        let font = FontProperty::default();
        assert_eq!(font.text_color(), Color::BLACK);
        assert_eq!(font.font_size(), 12.0);
        assert_eq!(font.h_align(), HAlign::Center);
        assert_eq!(font.v_align(), VAlign::Middle);
        assert!(!font.bold() && !font.italic() && !font.underline());
    }

    #[test]
    fn test_negative_sizes_are_ignored() {
        let mut font = FontProperty::default();
        font.set_font_size(-3.0);
        assert_eq!(font.font_size(), 12.0);

        let style = ShapeStyle::default().with_border_width(-1.0);
        assert_eq!(style.border_width(), 1.0);

        let line = LineStyle::default().with_line_width(-2.0);
        assert_eq!(line.line_width(), 1.0);
    }

    #[test]
    fn test_transparent_shape_style() {
        let style = ShapeStyle::transparent();
        assert!(style.fill_color().is_transparent());
        assert_eq!(style.shape_type(), &ShapeType::None);
        assert_eq!(style.border_color(), Color::BLACK);
    }
}
