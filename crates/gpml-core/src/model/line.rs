//! Line elements: interactions, graphical lines, their points and anchors.
//!
//! # Overview
//!
//! - [`LineElement`] - Points, anchors and line style shared by both line kinds
//! - [`Interaction`] - A biological interaction, optionally with an [`Xref`]
//! - [`GraphicalLine`] - A purely graphical line
//! - [`LinePoint`] - A waypoint, optionally linked to a linkable element
//! - [`Anchor`] - An attachment site along a line, itself linkable
//!
//! Points and anchors have ids in the model's id space. They are registered
//! with their line and removed with it.

use log::warn;

use crate::{
    geometry::{Bounds, Coordinate},
    identifier::ElementId,
    style::LineStyle,
    types::{AnchorShapeType, ArrowHeadType},
    xref::Xref,
};

use super::{
    error::ModelError,
    info::{ElementInfo, PathwayElement},
};

/// Attachment of a line point to another element.
///
/// `rel_x`/`rel_y` locate the point relative to the target: `-1..1` spans
/// the target's box. Values outside that range are kept but logged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLink {
    target: ElementId,
    rel_x: f64,
    rel_y: f64,
}

impl PointLink {
    pub fn new(target: ElementId, rel_x: f64, rel_y: f64) -> Self {
        if rel_x.abs() > 1.0 || rel_y.abs() > 1.0 {
            warn!(element_id:% = target, rel_x, rel_y; "Relative point position lies outside the target");
        }
        Self {
            target,
            rel_x,
            rel_y,
        }
    }

    pub fn target(&self) -> ElementId {
        self.target
    }

    pub fn rel_x(&self) -> f64 {
        self.rel_x
    }

    pub fn rel_y(&self) -> f64 {
        self.rel_y
    }
}

/// A waypoint of a line.
#[derive(Debug, Clone, PartialEq)]
pub struct LinePoint {
    element_id: ElementId,
    coordinate: Coordinate,
    arrow_head: ArrowHeadType,
    link: Option<PointLink>,
}

impl LinePoint {
    pub fn new(element_id: ElementId, coordinate: Coordinate) -> Self {
        Self {
            element_id,
            coordinate,
            arrow_head: ArrowHeadType::default(),
            link: None,
        }
    }

    pub fn with_arrow_head(mut self, arrow_head: ArrowHeadType) -> Self {
        self.arrow_head = arrow_head;
        self
    }

    pub fn element_id(&self) -> ElementId {
        self.element_id
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    pub fn arrow_head(&self) -> &ArrowHeadType {
        &self.arrow_head
    }

    /// The element this point is attached to, set through the model.
    pub fn link(&self) -> Option<&PointLink> {
        self.link.as_ref()
    }

    pub fn set_coordinate(&mut self, coordinate: Coordinate) {
        self.coordinate = coordinate;
    }

    pub fn set_arrow_head(&mut self, arrow_head: ArrowHeadType) {
        self.arrow_head = arrow_head;
    }

    pub(crate) fn set_link(&mut self, link: Option<PointLink>) {
        self.link = link;
    }
}

/// An attachment site at a fractional position along a line.
#[derive(Debug, Clone, PartialEq)]
pub struct Anchor {
    element_id: ElementId,
    position: f64,
    shape_type: AnchorShapeType,
}

impl Anchor {
    /// Creates an anchor at `position` along its line.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidValue`] when `position` lies outside `[0, 1]`.
    pub fn new(element_id: ElementId, position: f64) -> Result<Self, ModelError> {
        check_position(position)?;
        Ok(Self {
            element_id,
            position,
            shape_type: AnchorShapeType::default(),
        })
    }

    pub fn with_shape_type(mut self, shape_type: AnchorShapeType) -> Self {
        self.shape_type = shape_type;
        self
    }

    pub fn element_id(&self) -> ElementId {
        self.element_id
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn shape_type(&self) -> &AnchorShapeType {
        &self.shape_type
    }

    /// Moves the anchor along its line.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidValue`] when `position` lies outside `[0, 1]`.
    pub fn set_position(&mut self, position: f64) -> Result<(), ModelError> {
        check_position(position)?;
        self.position = position;
        Ok(())
    }

    pub fn set_shape_type(&mut self, shape_type: AnchorShapeType) {
        self.shape_type = shape_type;
    }
}

fn check_position(position: f64) -> Result<(), ModelError> {
    if (0.0..=1.0).contains(&position) {
        Ok(())
    } else {
        Err(ModelError::InvalidValue(format!(
            "anchor position {position} is outside [0, 1]"
        )))
    }
}

/// Points, anchors and style shared by [`Interaction`] and [`GraphicalLine`].
#[derive(Debug, Clone, PartialEq)]
pub struct LineElement {
    info: ElementInfo,
    points: Vec<LinePoint>,
    anchors: Vec<Anchor>,
    line_style: LineStyle,
}

impl LineElement {
    pub fn new(element_id: ElementId) -> Self {
        Self {
            info: ElementInfo::new(element_id),
            points: Vec::new(),
            anchors: Vec::new(),
            line_style: LineStyle::default(),
        }
    }

    pub fn with_point(mut self, point: LinePoint) -> Self {
        self.points.push(point);
        self
    }

    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchors.push(anchor);
        self
    }

    pub fn with_line_style(mut self, line_style: LineStyle) -> Self {
        self.line_style = line_style;
        self
    }

    /// Points in drawing order; the first is the start, the last the end.
    pub fn points(&self) -> &[LinePoint] {
        &self.points
    }

    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    pub fn point(&self, id: ElementId) -> Option<&LinePoint> {
        self.points.iter().find(|p| p.element_id == id)
    }

    pub fn point_mut(&mut self, id: ElementId) -> Option<&mut LinePoint> {
        self.points.iter_mut().find(|p| p.element_id == id)
    }

    pub fn anchor(&self, id: ElementId) -> Option<&Anchor> {
        self.anchors.iter().find(|a| a.element_id == id)
    }

    pub fn anchor_mut(&mut self, id: ElementId) -> Option<&mut Anchor> {
        self.anchors.iter_mut().find(|a| a.element_id == id)
    }

    pub fn start_point(&self) -> Option<&LinePoint> {
        self.points.first()
    }

    pub fn end_point(&self) -> Option<&LinePoint> {
        self.points.last()
    }

    pub fn line_style(&self) -> &LineStyle {
        &self.line_style
    }

    pub fn line_style_mut(&mut self) -> &mut LineStyle {
        &mut self.line_style
    }

    /// Bounding box of the line's points.
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.points.iter().map(LinePoint::coordinate))
    }

    pub fn set_z_order(&mut self, z_order: i32) {
        self.info.set_z_order(z_order);
    }

    /// Ids of the points and anchors owned by this line.
    pub(crate) fn child_ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.points
            .iter()
            .map(|p| p.element_id)
            .chain(self.anchors.iter().map(|a| a.element_id))
    }

    pub(crate) fn points_mut(&mut self) -> &mut [LinePoint] {
        &mut self.points
    }

    pub(crate) fn push_point(&mut self, point: LinePoint) {
        self.points.push(point);
    }

    pub(crate) fn push_anchor(&mut self, anchor: Anchor) {
        self.anchors.push(anchor);
    }

    pub(crate) fn take_point(&mut self, id: ElementId) -> Option<LinePoint> {
        let index = self.points.iter().position(|p| p.element_id == id)?;
        Some(self.points.remove(index))
    }

    pub(crate) fn take_anchor(&mut self, id: ElementId) -> Option<Anchor> {
        let index = self.anchors.iter().position(|a| a.element_id == id)?;
        Some(self.anchors.remove(index))
    }
}

impl PathwayElement for LineElement {
    fn info(&self) -> &ElementInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut ElementInfo {
        &mut self.info
    }
}

/// A biological interaction between pathway elements.
#[derive(Debug, Clone, PartialEq)]
pub struct Interaction {
    line: LineElement,
    xref: Option<Xref>,
}

impl Interaction {
    pub fn new(line: LineElement) -> Self {
        Self { line, xref: None }
    }

    pub fn with_xref(mut self, xref: Xref) -> Self {
        self.xref = Some(xref);
        self
    }

    pub fn line(&self) -> &LineElement {
        &self.line
    }

    pub fn line_mut(&mut self) -> &mut LineElement {
        &mut self.line
    }

    pub fn xref(&self) -> Option<&Xref> {
        self.xref.as_ref()
    }

    pub fn set_xref(&mut self, xref: Option<Xref>) {
        self.xref = xref;
    }
}

impl PathwayElement for Interaction {
    fn info(&self) -> &ElementInfo {
        self.line.info()
    }

    fn info_mut(&mut self) -> &mut ElementInfo {
        self.line.info_mut()
    }
}

/// A line without biological meaning.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphicalLine {
    line: LineElement,
}

impl GraphicalLine {
    pub fn new(line: LineElement) -> Self {
        Self { line }
    }

    pub fn line(&self) -> &LineElement {
        &self.line
    }

    pub fn line_mut(&mut self) -> &mut LineElement {
        &mut self.line
    }
}

impl PathwayElement for GraphicalLine {
    fn info(&self) -> &ElementInfo {
        self.line.info()
    }

    fn info_mut(&mut self) -> &mut ElementInfo {
        self.line.info_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_position_range() {
        assert!(Anchor::new(ElementId::new("an_bad"), 1.2).is_err());
        assert!(Anchor::new(ElementId::new("an_bad"), -0.1).is_err());

        let mut anchor = Anchor::new(ElementId::new("an_ok"), 0.5).unwrap();
        assert!(anchor.set_position(2.0).is_err());
        assert_eq!(anchor.position(), 0.5);
    }

    #[test]
    fn test_line_bounds_and_endpoints() {
        let line = LineElement::new(ElementId::new("ln_b"))
            .with_point(LinePoint::new(ElementId::new("ln_b_p1"), Coordinate::new(0.0, 5.0)))
            .with_point(
                LinePoint::new(ElementId::new("ln_b_p2"), Coordinate::new(10.0, -5.0))
                    .with_arrow_head(ArrowHeadType::Directed),
            );

        let bounds = line.bounds().unwrap();
        assert_eq!(bounds.min_y(), -5.0);
        assert_eq!(bounds.max_x(), 10.0);
        assert_eq!(line.end_point().map(|p| p.arrow_head()), Some(&ArrowHeadType::Directed));
    }

    #[test]
    fn test_child_ids() {
        let line = LineElement::new(ElementId::new("ln_c"))
            .with_point(LinePoint::new(ElementId::new("ln_c_p1"), Coordinate::default()))
            .with_anchor(Anchor::new(ElementId::new("ln_c_a1"), 0.5).unwrap());

        let ids: Vec<_> = line.child_ids().collect();
        assert_eq!(ids, vec![ElementId::new("ln_c_p1"), ElementId::new("ln_c_a1")]);
    }
}
