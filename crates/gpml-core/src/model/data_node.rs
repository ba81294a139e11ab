//! Data nodes and the states attached to them.

use crate::{
    geometry::Size,
    identifier::ElementId,
    style::{FontProperty, ShapeStyle},
    types::{DataNodeType, StateType},
    xref::Xref,
};

use super::{
    error::ModelError,
    info::{ElementInfo, PathwayElement},
    shaped::ShapedGraphics,
};

/// A biological entity: gene product, metabolite, pathway reference, ...
///
/// A data node owns its [`State`]s. State ids live in the model's id space
/// and are registered together with the node.
///
/// # Examples
///
/// ```
/// use gpml_core::{
///     geometry::Coordinate,
///     identifier::ElementId,
///     model::{DataNode, PathwayElement, ShapedGraphics, State},
///     types::DataNodeType,
/// };
///
/// let graphics = ShapedGraphics::new(Coordinate::new(100.0, 50.0), 80.0, 20.0).unwrap();
/// let node = DataNode::new(ElementId::new("dn1"), "TP53", DataNodeType::GeneProduct, graphics)
///     .with_state(State::new(ElementId::new("st1"), "P", 1.0, -1.0).unwrap());
///
/// assert_eq!(node.states().len(), 1);
/// assert_eq!(node.states()[0].z_order(), node.z_order() + 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DataNode {
    info: ElementInfo,
    graphics: ShapedGraphics,
    text_label: String,
    node_type: DataNodeType,
    xref: Option<Xref>,
    alias_ref: Option<ElementId>,
    states: Vec<State>,
}

impl DataNode {
    pub fn new(
        element_id: ElementId,
        text_label: impl Into<String>,
        node_type: DataNodeType,
        graphics: ShapedGraphics,
    ) -> Self {
        Self {
            info: ElementInfo::new(element_id),
            graphics,
            text_label: text_label.into(),
            node_type,
            xref: None,
            alias_ref: None,
            states: Vec::new(),
        }
    }

    pub fn with_xref(mut self, xref: Xref) -> Self {
        self.xref = Some(xref);
        self
    }

    /// Adds a state before the node is attached to a model.
    pub fn with_state(mut self, state: State) -> Self {
        self.push_state(state);
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

    pub fn node_type(&self) -> &DataNodeType {
        &self.node_type
    }

    pub fn xref(&self) -> Option<&Xref> {
        self.xref.as_ref()
    }

    /// The group this node is an alias of, set through the model.
    pub fn alias_ref(&self) -> Option<ElementId> {
        self.alias_ref
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn state(&self, id: ElementId) -> Option<&State> {
        self.states.iter().find(|s| s.element_id() == id)
    }

    pub fn state_mut(&mut self, id: ElementId) -> Option<&mut State> {
        self.states.iter_mut().find(|s| s.element_id() == id)
    }

    pub fn set_text_label(&mut self, text_label: impl Into<String>) {
        self.text_label = text_label.into();
    }

    pub fn set_node_type(&mut self, node_type: DataNodeType) {
        self.node_type = node_type;
    }

    pub fn set_xref(&mut self, xref: Option<Xref>) {
        self.xref = xref;
    }

    /// Sets the draw order of the node; its states follow one level above.
    pub fn set_z_order(&mut self, z_order: i32) {
        self.info.set_z_order(z_order);
        for state in &mut self.states {
            state.info.set_z_order(z_order + 1);
        }
    }

    pub(crate) fn set_alias_ref(&mut self, group: Option<ElementId>) {
        self.alias_ref = group;
    }

    pub(crate) fn push_state(&mut self, mut state: State) {
        state.info.set_z_order(self.info.z_order() + 1);
        state.data_node = Some(self.info.element_id());
        self.states.push(state);
    }

    pub(crate) fn take_state(&mut self, id: ElementId) -> Option<State> {
        let index = self.states.iter().position(|s| s.element_id() == id)?;
        let mut state = self.states.remove(index);
        state.data_node = None;
        Some(state)
    }

    pub(crate) fn states_mut(&mut self) -> &mut [State] {
        &mut self.states
    }
}

impl PathwayElement for DataNode {
    fn info(&self) -> &ElementInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut ElementInfo {
        &mut self.info
    }
}

/// A modification site or other state drawn on the border of a data node.
///
/// The position is relative to the parent node: `rel_x`/`rel_y` of `-1` and
/// `1` are the node's edges, `0` its centre.
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    info: ElementInfo,
    data_node: Option<ElementId>,
    text_label: String,
    state_type: StateType,
    rel_x: f64,
    rel_y: f64,
    size: Size,
    font: FontProperty,
    shape_style: ShapeStyle,
    xref: Option<Xref>,
}

impl State {
    /// Creates a state at a relative position on its future parent.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidValue`] when a relative coordinate lies
    /// outside `[-1, 1]`.
    pub fn new(
        element_id: ElementId,
        text_label: impl Into<String>,
        rel_x: f64,
        rel_y: f64,
    ) -> Result<Self, ModelError> {
        check_relative(rel_x)?;
        check_relative(rel_y)?;
        Ok(Self {
            info: ElementInfo::new(element_id),
            data_node: None,
            text_label: text_label.into(),
            state_type: StateType::default(),
            rel_x,
            rel_y,
            size: Size::default(),
            font: FontProperty::default(),
            shape_style: ShapeStyle::default(),
            xref: None,
        })
    }

    pub fn with_state_type(mut self, state_type: StateType) -> Self {
        self.state_type = state_type;
        self
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn with_xref(mut self, xref: Xref) -> Self {
        self.xref = Some(xref);
        self
    }

    /// The owning data node, once attached.
    pub fn data_node(&self) -> Option<ElementId> {
        self.data_node
    }

    pub fn text_label(&self) -> &str {
        &self.text_label
    }

    pub fn state_type(&self) -> &StateType {
        &self.state_type
    }

    pub fn rel_x(&self) -> f64 {
        self.rel_x
    }

    pub fn rel_y(&self) -> f64 {
        self.rel_y
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

    pub fn xref(&self) -> Option<&Xref> {
        self.xref.as_ref()
    }

    pub fn set_text_label(&mut self, text_label: impl Into<String>) {
        self.text_label = text_label.into();
    }

    pub fn set_state_type(&mut self, state_type: StateType) {
        self.state_type = state_type;
    }

    /// Moves the state along its parent's border.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidValue`] when a coordinate lies outside
    /// `[-1, 1]`.
    pub fn set_relative_position(&mut self, rel_x: f64, rel_y: f64) -> Result<(), ModelError> {
        check_relative(rel_x)?;
        check_relative(rel_y)?;
        self.rel_x = rel_x;
        self.rel_y = rel_y;
        Ok(())
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

    pub fn set_xref(&mut self, xref: Option<Xref>) {
        self.xref = xref;
    }
}

impl PathwayElement for State {
    fn info(&self) -> &ElementInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut ElementInfo {
        &mut self.info
    }
}

fn check_relative(value: f64) -> Result<(), ModelError> {
    if (-1.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ModelError::InvalidValue(format!(
            "relative coordinate {value} is outside [-1, 1]"
        )))
    }
}

#[cfg(test)]
mod tests {
    use crate::geometry::Coordinate;

    use super::*;

    fn node(id: &str) -> DataNode {
        let graphics = ShapedGraphics::new(Coordinate::new(10.0, 10.0), 60.0, 20.0).unwrap();
        DataNode::new(ElementId::new(id), "label", DataNodeType::Protein, graphics)
    }

    #[test]
    fn test_state_rejects_out_of_range() {
        assert!(State::new(ElementId::new("s_bad"), "P", 1.5, 0.0).is_err());
        assert!(State::new(ElementId::new("s_bad"), "P", 0.0, -1.01).is_err());
        assert!(State::new(ElementId::new("s_ok"), "P", -1.0, 1.0).is_ok());
    }

    #[test]
    fn test_state_z_order_follows_parent() {
        let mut node = node("dn_z").with_state(State::new(ElementId::new("s_z"), "P", 0.0, 1.0).unwrap());
        node.set_z_order(32768);

        assert_eq!(node.states()[0].z_order(), 32769);
        assert_eq!(node.states()[0].data_node(), Some(ElementId::new("dn_z")));
    }

    #[test]
    fn test_take_state_detaches() {
        let mut node = node("dn_t").with_state(State::new(ElementId::new("s_t"), "P", 0.0, 1.0).unwrap());
        let state = node.take_state(ElementId::new("s_t")).unwrap();

        assert!(node.states().is_empty());
        assert_eq!(state.data_node(), None);
    }
}
