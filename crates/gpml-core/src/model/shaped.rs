//! Geometry and style shared by boxed elements.

use crate::{
    geometry::{Bounds, Coordinate, Size},
    style::{FontProperty, ShapeStyle},
};

use super::error::ModelError;

/// Centre, size, font and shape style of a data node, label, shape or group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapedGraphics {
    center: Coordinate,
    size: Size,
    font: FontProperty,
    shape_style: ShapeStyle,
}

impl ShapedGraphics {
    /// Creates graphics centred on `center` with the given dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidValue`] when a dimension is negative.
    pub fn new(center: Coordinate, width: f64, height: f64) -> Result<Self, ModelError> {
        Ok(Self {
            center,
            size: Size::new(width, height).map_err(ModelError::InvalidValue)?,
            ..Self::default()
        })
    }

    pub fn center(&self) -> Coordinate {
        self.center
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn font(&self) -> &FontProperty {
        &self.font
    }

    pub fn font_mut(&mut self) -> &mut FontProperty {
        &mut self.font
    }

    pub fn shape_style(&self) -> &ShapeStyle {
        &self.shape_style
    }

    pub fn shape_style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.shape_style
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_center(self.center, self.size)
    }

    pub fn set_center(&mut self, center: Coordinate) {
        self.center = center;
    }

    /// Sets width and height.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidValue`] when a dimension is negative.
    pub fn set_size(&mut self, width: f64, height: f64) -> Result<(), ModelError> {
        self.size = Size::new(width, height).map_err(ModelError::InvalidValue)?;
        Ok(())
    }

    /// Moves and resizes the graphics to cover `bounds`.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.center = bounds.center();
        self.size = bounds.size();
    }

    pub fn set_font(&mut self, font: FontProperty) {
        self.font = font;
    }

    pub fn set_shape_style(&mut self, shape_style: ShapeStyle) {
        self.shape_style = shape_style;
    }

    pub fn with_font(mut self, font: FontProperty) -> Self {
        self.font = font;
        self
    }

    pub fn with_shape_style(mut self, shape_style: ShapeStyle) -> Self {
        self.shape_style = shape_style;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_negative_size() {
        assert!(ShapedGraphics::new(Coordinate::default(), -1.0, 1.0).is_err());
    }

    #[test]
    fn test_set_bounds() {
        let mut graphics = ShapedGraphics::new(Coordinate::new(0.0, 0.0), 1.0, 1.0).unwrap();
        graphics.set_bounds(Bounds::new(10.0, 20.0, 50.0, 40.0));

        assert_eq!(graphics.center(), Coordinate::new(30.0, 30.0));
        assert_eq!(graphics.size().width(), 40.0);
        assert_eq!(graphics.size().height(), 20.0);
    }
}
