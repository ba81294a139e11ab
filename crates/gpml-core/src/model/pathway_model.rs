//! The registry owning every object of one pathway.
//!
//! [`PathwayModel`] is the single place where ids are registered and where
//! cross references (group membership, aliases, point links, annotation refs)
//! are created or broken. This keeps the following true at rest:
//!
//! - every registered id is unique, including state, point and anchor ids
//! - `e.group_ref() == Some(g)` exactly when group `g` lists `e` as a member
//! - every alias, point link and ref names a live object of the right kind
//!
//! Removing an object runs its terminate sequence: outgoing refs are dropped,
//! the object leaves its group, every inbound reference to it (or to a child
//! removed with it) is cleared, and finally its ids are deregistered.

use std::{
    collections::{HashMap, HashSet},
    fmt,
};

use indexmap::IndexMap;
use log::{debug, trace};

use crate::{geometry::Bounds, identifier::ElementId};

use super::{
    annotation::{Annotation, Citation, Evidence},
    data_node::{DataNode, State},
    entity::{Entity, EntityKind, EntityRef},
    error::ModelError,
    group::Group,
    info::{CommentGroup, ElementInfo, PathwayElement},
    label::Label,
    line::{Anchor, GraphicalLine, Interaction, LineElement, LinePoint, PointLink},
    observer::{ModelEvent, ModelObserver},
    pathway::Pathway,
    refs::{AnnotationRef, CitationRef, EvidenceRef},
    shape::Shape,
};

/// Where a registered id lives. Owned children record their owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Location {
    DataNode,
    State(ElementId),
    Interaction,
    GraphicalLine,
    LinePoint(ElementId),
    Anchor(ElementId),
    Label,
    Shape,
    Group,
    Annotation,
    Citation,
    Evidence,
}

impl Location {
    fn kind(self) -> EntityKind {
        match self {
            Self::DataNode => EntityKind::DataNode,
            Self::State(_) => EntityKind::State,
            Self::Interaction => EntityKind::Interaction,
            Self::GraphicalLine => EntityKind::GraphicalLine,
            Self::LinePoint(_) => EntityKind::LinePoint,
            Self::Anchor(_) => EntityKind::Anchor,
            Self::Label => EntityKind::Label,
            Self::Shape => EntityKind::Shape,
            Self::Group => EntityKind::Group,
            Self::Annotation => EntityKind::Annotation,
            Self::Citation => EntityKind::Citation,
            Self::Evidence => EntityKind::Evidence,
        }
    }
}

/// Holder of a [`CommentGroup`] and thus of annotation refs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefOwner {
    Pathway,
    Element(ElementId),
}

impl fmt::Display for RefOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pathway => f.write_str("pathway"),
            Self::Element(id) => write!(f, "{id}"),
        }
    }
}

/// All objects of one pathway, keyed by element id.
///
/// # Examples
///
/// ```
/// use gpml_core::{
///     geometry::Coordinate,
///     identifier::ElementId,
///     model::{DataNode, Group, PathwayElement, PathwayModel, ShapedGraphics},
///     types::{DataNodeType, GroupType},
/// };
///
/// let mut model = PathwayModel::default();
/// let graphics = ShapedGraphics::new(Coordinate::new(50.0, 50.0), 60.0, 20.0).unwrap();
/// let node = model
///     .add(DataNode::new(ElementId::new("n1"), "ATP", DataNodeType::Metabolite, graphics))
///     .unwrap();
/// let group = model.add(Group::new(ElementId::new("g1"), GroupType::Group)).unwrap();
///
/// model.group_add_member(group, node).unwrap();
/// assert_eq!(model.data_node(node).unwrap().info().group_ref(), Some(group));
///
/// model.remove(node).unwrap();
/// assert_eq!(model.remove_empty_groups(), vec![group]);
/// assert!(model.lookup(group).is_none());
/// ```
pub struct PathwayModel {
    pathway: Pathway,
    data_nodes: IndexMap<ElementId, DataNode>,
    interactions: IndexMap<ElementId, Interaction>,
    graphical_lines: IndexMap<ElementId, GraphicalLine>,
    labels: IndexMap<ElementId, Label>,
    shapes: IndexMap<ElementId, Shape>,
    groups: IndexMap<ElementId, Group>,
    annotations: IndexMap<ElementId, Annotation>,
    citations: IndexMap<ElementId, Citation>,
    evidences: IndexMap<ElementId, Evidence>,
    index: HashMap<ElementId, Location>,
    next_id: u64,
    observer: Option<Box<dyn ModelObserver>>,
}

impl PathwayModel {
    pub fn new(pathway: Pathway) -> Self {
        Self {
            pathway,
            data_nodes: IndexMap::new(),
            interactions: IndexMap::new(),
            graphical_lines: IndexMap::new(),
            labels: IndexMap::new(),
            shapes: IndexMap::new(),
            groups: IndexMap::new(),
            annotations: IndexMap::new(),
            citations: IndexMap::new(),
            evidences: IndexMap::new(),
            index: HashMap::new(),
            next_id: 0,
            observer: None,
        }
    }

    pub fn pathway(&self) -> &Pathway {
        &self.pathway
    }

    pub fn pathway_mut(&mut self) -> &mut Pathway {
        &mut self.pathway
    }

    /// Installs (or with `None` removes) the observer receiving [`ModelEvent`]s.
    pub fn set_observer(&mut self, observer: Option<Box<dyn ModelObserver>>) {
        self.observer = observer;
    }

    fn notify(&mut self, event: ModelEvent) {
        if let Some(observer) = self.observer.as_mut() {
            observer.on_event(&event);
        }
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Number of registered ids, owned children included.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn kind_of(&self, id: ElementId) -> Option<EntityKind> {
        self.index.get(&id).map(|location| location.kind())
    }

    /// Returns an id that is not registered in this model.
    ///
    /// Successive calls never return the same id, even before it is used.
    pub fn generate_unique_id(&mut self, prefix: &str) -> ElementId {
        loop {
            let candidate = ElementId::new(&format!("{prefix}{:x}", self.next_id));
            self.next_id += 1;
            if !self.index.contains_key(&candidate) {
                return candidate;
            }
        }
    }

    /// Registers a top-level object together with its owned children.
    ///
    /// # Errors
    ///
    /// - [`ModelError::DuplicateId`] if any id the object brings is taken.
    ///   Nothing is registered in that case.
    /// - [`ModelError::InvalidValue`] for states, points and anchors, which
    ///   are attached to their owner with [`add_state`](Self::add_state),
    ///   [`add_line_point`](Self::add_line_point) and
    ///   [`add_anchor`](Self::add_anchor).
    pub fn add(&mut self, entity: impl Into<Entity>) -> Result<ElementId, ModelError> {
        let entity = entity.into();
        let kind = entity.kind();
        let id = entity.element_id();

        if kind.is_owned_child() {
            return Err(ModelError::InvalidValue(format!(
                "{kind} `{id}` must be attached to its owner"
            )));
        }
        self.check_fresh(&entity.registered_ids())?;

        let location = match entity {
            Entity::DataNode(node) => {
                for state in node.states() {
                    self.index.insert(state.element_id(), Location::State(id));
                }
                self.data_nodes.insert(id, node);
                Location::DataNode
            }
            Entity::Interaction(interaction) => {
                self.register_line_children(id, interaction.line());
                self.interactions.insert(id, interaction);
                Location::Interaction
            }
            Entity::GraphicalLine(line) => {
                self.register_line_children(id, line.line());
                self.graphical_lines.insert(id, line);
                Location::GraphicalLine
            }
            Entity::Label(label) => {
                self.labels.insert(id, label);
                Location::Label
            }
            Entity::Shape(shape) => {
                self.shapes.insert(id, shape);
                Location::Shape
            }
            Entity::Group(group) => {
                self.groups.insert(id, group);
                Location::Group
            }
            Entity::Annotation(annotation) => {
                self.annotations.insert(id, annotation);
                Location::Annotation
            }
            Entity::Citation(citation) => {
                self.citations.insert(id, citation);
                Location::Citation
            }
            Entity::Evidence(evidence) => {
                self.evidences.insert(id, evidence);
                Location::Evidence
            }
            Entity::State(_) | Entity::LinePoint(_) | Entity::Anchor(_) => {
                unreachable!("owned children are rejected above")
            }
        };
        self.index.insert(id, location);

        trace!(element_id:% = id, kind:% = kind; "Element registered");
        self.notify(ModelEvent::Added { id, kind });
        Ok(id)
    }

    /// Attaches a state to a registered data node.
    ///
    /// # Errors
    ///
    /// [`ModelError::NotFound`] for an unknown data node,
    /// [`ModelError::DuplicateId`] if the state id is taken.
    pub fn add_state(&mut self, data_node: ElementId, state: State) -> Result<ElementId, ModelError> {
        let id = state.element_id();
        if !self.data_nodes.contains_key(&data_node) {
            return Err(ModelError::NotFound(data_node));
        }
        self.check_fresh(&[id])?;

        if let Some(node) = self.data_nodes.get_mut(&data_node) {
            node.push_state(state);
        }
        self.index.insert(id, Location::State(data_node));
        self.notify(ModelEvent::Added {
            id,
            kind: EntityKind::State,
        });
        Ok(id)
    }

    /// Appends a point to a registered interaction or graphical line.
    ///
    /// # Errors
    ///
    /// [`ModelError::NotFound`] for an unknown line,
    /// [`ModelError::DuplicateId`] if the point id is taken.
    pub fn add_line_point(&mut self, line: ElementId, point: LinePoint) -> Result<ElementId, ModelError> {
        let id = point.element_id();
        self.check_fresh(&[id])?;
        self.line_element_mut(line)
            .ok_or(ModelError::NotFound(line))?
            .push_point(point);
        self.index.insert(id, Location::LinePoint(line));
        self.notify(ModelEvent::Added {
            id,
            kind: EntityKind::LinePoint,
        });
        Ok(id)
    }

    /// Appends an anchor to a registered interaction or graphical line.
    ///
    /// # Errors
    ///
    /// [`ModelError::NotFound`] for an unknown line,
    /// [`ModelError::DuplicateId`] if the anchor id is taken.
    pub fn add_anchor(&mut self, line: ElementId, anchor: Anchor) -> Result<ElementId, ModelError> {
        let id = anchor.element_id();
        self.check_fresh(&[id])?;
        self.line_element_mut(line)
            .ok_or(ModelError::NotFound(line))?
            .push_anchor(anchor);
        self.index.insert(id, Location::Anchor(line));
        self.notify(ModelEvent::Added {
            id,
            kind: EntityKind::Anchor,
        });
        Ok(id)
    }

    fn check_fresh(&self, ids: &[ElementId]) -> Result<(), ModelError> {
        let mut seen = HashSet::with_capacity(ids.len());
        for &id in ids {
            if self.index.contains_key(&id) || !seen.insert(id) {
                return Err(ModelError::DuplicateId(id));
            }
        }
        Ok(())
    }

    fn register_line_children(&mut self, line_id: ElementId, line: &LineElement) {
        for point in line.points() {
            self.index
                .insert(point.element_id(), Location::LinePoint(line_id));
        }
        for anchor in line.anchors() {
            self.index.insert(anchor.element_id(), Location::Anchor(line_id));
        }
    }

    // =========================================================================
    // Removal
    // =========================================================================

    /// Removes an object and everything it owns, returning it detached.
    ///
    /// Group members are released, not removed. Aliases and point links that
    /// pointed at any removed id are cleared, and refs to a removed
    /// annotation, citation or evidence are stripped everywhere.
    ///
    /// # Errors
    ///
    /// [`ModelError::NotFound`] if `id` is not registered.
    pub fn remove(&mut self, id: ElementId) -> Result<Entity, ModelError> {
        let location = *self.index.get(&id).ok_or(ModelError::NotFound(id))?;
        let kind = location.kind();

        let mut entity = match location {
            Location::DataNode => {
                let node = self.data_nodes.shift_remove(&id).ok_or(ModelError::NotFound(id))?;
                self.leave_group(id, node.info().group_ref());
                let mut gone = vec![id];
                gone.extend(node.states().iter().map(|s| s.element_id()));
                self.forget(&gone);
                Entity::DataNode(node)
            }
            Location::State(owner) => {
                let state = self
                    .data_nodes
                    .get_mut(&owner)
                    .and_then(|node| node.take_state(id))
                    .ok_or(ModelError::NotFound(id))?;
                self.forget(&[id]);
                Entity::State(state)
            }
            Location::Interaction => {
                let interaction = self
                    .interactions
                    .shift_remove(&id)
                    .ok_or(ModelError::NotFound(id))?;
                self.leave_group(id, interaction.info().group_ref());
                let mut gone = vec![id];
                gone.extend(interaction.line().child_ids());
                self.forget(&gone);
                Entity::Interaction(interaction)
            }
            Location::GraphicalLine => {
                let line = self
                    .graphical_lines
                    .shift_remove(&id)
                    .ok_or(ModelError::NotFound(id))?;
                self.leave_group(id, line.info().group_ref());
                let mut gone = vec![id];
                gone.extend(line.line().child_ids());
                self.forget(&gone);
                Entity::GraphicalLine(line)
            }
            Location::LinePoint(owner) => {
                let point = self
                    .line_element_mut(owner)
                    .and_then(|line| line.take_point(id))
                    .ok_or(ModelError::NotFound(id))?;
                self.forget(&[id]);
                Entity::LinePoint(point)
            }
            Location::Anchor(owner) => {
                let anchor = self
                    .line_element_mut(owner)
                    .and_then(|line| line.take_anchor(id))
                    .ok_or(ModelError::NotFound(id))?;
                self.forget(&[id]);
                Entity::Anchor(anchor)
            }
            Location::Label => {
                let label = self.labels.shift_remove(&id).ok_or(ModelError::NotFound(id))?;
                self.leave_group(id, label.info().group_ref());
                self.forget(&[id]);
                Entity::Label(label)
            }
            Location::Shape => {
                let shape = self.shapes.shift_remove(&id).ok_or(ModelError::NotFound(id))?;
                self.leave_group(id, shape.info().group_ref());
                self.forget(&[id]);
                Entity::Shape(shape)
            }
            Location::Group => {
                let mut group = self.groups.shift_remove(&id).ok_or(ModelError::NotFound(id))?;
                self.leave_group(id, group.info().group_ref());
                for member in group.take_members() {
                    if let Some(info) = self.element_info_mut(member) {
                        info.set_group_ref(None);
                    }
                    self.notify(ModelEvent::MemberRemoved { group: id, member });
                }
                self.forget(&[id]);
                Entity::Group(group)
            }
            Location::Annotation => {
                let annotation = self
                    .annotations
                    .shift_remove(&id)
                    .ok_or(ModelError::NotFound(id))?;
                self.strip_ref_target(id);
                self.index.remove(&id);
                Entity::Annotation(annotation)
            }
            Location::Citation => {
                let citation = self.citations.shift_remove(&id).ok_or(ModelError::NotFound(id))?;
                self.strip_ref_target(id);
                self.index.remove(&id);
                Entity::Citation(citation)
            }
            Location::Evidence => {
                let evidence = self.evidences.shift_remove(&id).ok_or(ModelError::NotFound(id))?;
                self.strip_ref_target(id);
                self.index.remove(&id);
                Entity::Evidence(evidence)
            }
        };

        detach(&mut entity);
        debug!(element_id:% = id, kind:% = kind; "Element removed");
        self.notify(ModelEvent::Removed { id, kind });
        Ok(entity)
    }

    fn leave_group(&mut self, member: ElementId, group: Option<ElementId>) {
        let Some(group) = group else {
            return;
        };
        if let Some(parent) = self.groups.get_mut(&group) {
            parent.remove_member(member);
            self.notify(ModelEvent::MemberRemoved { group, member });
        }
    }

    /// Deregisters `ids` and clears every alias and point link aimed at them.
    fn forget(&mut self, ids: &[ElementId]) {
        for id in ids {
            self.index.remove(id);
        }
        for node in self.data_nodes.values_mut() {
            if node.alias_ref().is_some_and(|alias| ids.contains(&alias)) {
                debug!(element_id:% = node.element_id(); "Alias reference cleared");
                node.set_alias_ref(None);
            }
        }
        let lines = self
            .interactions
            .values_mut()
            .map(Interaction::line_mut)
            .chain(self.graphical_lines.values_mut().map(GraphicalLine::line_mut));
        for line in lines {
            for point in line.points_mut() {
                if point.link().is_some_and(|link| ids.contains(&link.target())) {
                    debug!(element_id:% = point.element_id(); "Point link cleared");
                    point.set_link(None);
                }
            }
        }
    }

    fn strip_ref_target(&mut self, target: ElementId) {
        self.pathway.comment_group_mut().strip_target(target);
        self.for_each_info_mut(|info| info.comment_group_mut().strip_target(target));
    }

    fn for_each_info_mut(&mut self, mut f: impl FnMut(&mut ElementInfo)) {
        for node in self.data_nodes.values_mut() {
            f(node.info_mut());
            for state in node.states_mut() {
                f(state.info_mut());
            }
        }
        for interaction in self.interactions.values_mut() {
            f(interaction.info_mut());
        }
        for line in self.graphical_lines.values_mut() {
            f(line.info_mut());
        }
        for label in self.labels.values_mut() {
            f(label.info_mut());
        }
        for shape in self.shapes.values_mut() {
            f(shape.info_mut());
        }
        for group in self.groups.values_mut() {
            f(group.info_mut());
        }
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Resolves any registered id. Absence is not an error.
    pub fn lookup(&self, id: ElementId) -> Option<EntityRef<'_>> {
        match *self.index.get(&id)? {
            Location::DataNode => self.data_nodes.get(&id).map(EntityRef::DataNode),
            Location::State(owner) => self.data_nodes.get(&owner)?.state(id).map(EntityRef::State),
            Location::Interaction => self.interactions.get(&id).map(EntityRef::Interaction),
            Location::GraphicalLine => self.graphical_lines.get(&id).map(EntityRef::GraphicalLine),
            Location::LinePoint(owner) => self.line_element(owner)?.point(id).map(EntityRef::LinePoint),
            Location::Anchor(owner) => self.line_element(owner)?.anchor(id).map(EntityRef::Anchor),
            Location::Label => self.labels.get(&id).map(EntityRef::Label),
            Location::Shape => self.shapes.get(&id).map(EntityRef::Shape),
            Location::Group => self.groups.get(&id).map(EntityRef::Group),
            Location::Annotation => self.annotations.get(&id).map(EntityRef::Annotation),
            Location::Citation => self.citations.get(&id).map(EntityRef::Citation),
            Location::Evidence => self.evidences.get(&id).map(EntityRef::Evidence),
        }
    }

    /// The [`ElementInfo`] of any element that carries one.
    pub fn element_info(&self, id: ElementId) -> Option<&ElementInfo> {
        self.lookup(id)?.info()
    }

    pub fn element_info_mut(&mut self, id: ElementId) -> Option<&mut ElementInfo> {
        match *self.index.get(&id)? {
            Location::DataNode => self.data_nodes.get_mut(&id).map(|e| e.info_mut()),
            Location::State(owner) => self
                .data_nodes
                .get_mut(&owner)?
                .state_mut(id)
                .map(|e| e.info_mut()),
            Location::Interaction => self.interactions.get_mut(&id).map(|e| e.info_mut()),
            Location::GraphicalLine => self.graphical_lines.get_mut(&id).map(|e| e.info_mut()),
            Location::Label => self.labels.get_mut(&id).map(|e| e.info_mut()),
            Location::Shape => self.shapes.get_mut(&id).map(|e| e.info_mut()),
            Location::Group => self.groups.get_mut(&id).map(|e| e.info_mut()),
            Location::LinePoint(_)
            | Location::Anchor(_)
            | Location::Annotation
            | Location::Citation
            | Location::Evidence => None,
        }
    }

    /// The comment group of the pathway or of an element.
    pub fn comment_group(&self, owner: RefOwner) -> Option<&CommentGroup> {
        match owner {
            RefOwner::Pathway => Some(self.pathway.comment_group()),
            RefOwner::Element(id) => self.element_info(id).map(ElementInfo::comment_group),
        }
    }

    pub fn comment_group_mut(&mut self, owner: RefOwner) -> Option<&mut CommentGroup> {
        match owner {
            RefOwner::Pathway => Some(self.pathway.comment_group_mut()),
            RefOwner::Element(id) => self
                .element_info_mut(id)
                .map(ElementInfo::comment_group_mut),
        }
    }

    pub fn data_node(&self, id: ElementId) -> Option<&DataNode> {
        self.data_nodes.get(&id)
    }

    pub fn data_node_mut(&mut self, id: ElementId) -> Option<&mut DataNode> {
        self.data_nodes.get_mut(&id)
    }

    pub fn data_nodes(&self) -> impl Iterator<Item = &DataNode> {
        self.data_nodes.values()
    }

    pub fn state(&self, id: ElementId) -> Option<&State> {
        match *self.index.get(&id)? {
            Location::State(owner) => self.data_nodes.get(&owner)?.state(id),
            _ => None,
        }
    }

    pub fn state_mut(&mut self, id: ElementId) -> Option<&mut State> {
        match *self.index.get(&id)? {
            Location::State(owner) => self.data_nodes.get_mut(&owner)?.state_mut(id),
            _ => None,
        }
    }

    pub fn interaction(&self, id: ElementId) -> Option<&Interaction> {
        self.interactions.get(&id)
    }

    pub fn interaction_mut(&mut self, id: ElementId) -> Option<&mut Interaction> {
        self.interactions.get_mut(&id)
    }

    pub fn interactions(&self) -> impl Iterator<Item = &Interaction> {
        self.interactions.values()
    }

    pub fn graphical_line(&self, id: ElementId) -> Option<&GraphicalLine> {
        self.graphical_lines.get(&id)
    }

    pub fn graphical_line_mut(&mut self, id: ElementId) -> Option<&mut GraphicalLine> {
        self.graphical_lines.get_mut(&id)
    }

    pub fn graphical_lines(&self) -> impl Iterator<Item = &GraphicalLine> {
        self.graphical_lines.values()
    }

    /// The line data of an interaction or graphical line.
    pub fn line_element(&self, id: ElementId) -> Option<&LineElement> {
        self.interactions
            .get(&id)
            .map(Interaction::line)
            .or_else(|| self.graphical_lines.get(&id).map(GraphicalLine::line))
    }

    pub fn line_element_mut(&mut self, id: ElementId) -> Option<&mut LineElement> {
        if self.interactions.contains_key(&id) {
            return self.interactions.get_mut(&id).map(Interaction::line_mut);
        }
        self.graphical_lines.get_mut(&id).map(GraphicalLine::line_mut)
    }

    pub fn line_point(&self, id: ElementId) -> Option<&LinePoint> {
        match *self.index.get(&id)? {
            Location::LinePoint(owner) => self.line_element(owner)?.point(id),
            _ => None,
        }
    }

    pub fn anchor(&self, id: ElementId) -> Option<&Anchor> {
        match *self.index.get(&id)? {
            Location::Anchor(owner) => self.line_element(owner)?.anchor(id),
            _ => None,
        }
    }

    /// The line owning a point or anchor.
    pub fn owning_line(&self, id: ElementId) -> Option<ElementId> {
        match *self.index.get(&id)? {
            Location::LinePoint(owner) | Location::Anchor(owner) => Some(owner),
            _ => None,
        }
    }

    pub fn label(&self, id: ElementId) -> Option<&Label> {
        self.labels.get(&id)
    }

    pub fn label_mut(&mut self, id: ElementId) -> Option<&mut Label> {
        self.labels.get_mut(&id)
    }

    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.labels.values()
    }

    pub fn shape(&self, id: ElementId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    pub fn shape_mut(&mut self, id: ElementId) -> Option<&mut Shape> {
        self.shapes.get_mut(&id)
    }

    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.values()
    }

    pub fn group(&self, id: ElementId) -> Option<&Group> {
        self.groups.get(&id)
    }

    pub fn group_mut(&mut self, id: ElementId) -> Option<&mut Group> {
        self.groups.get_mut(&id)
    }

    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.values()
    }

    pub fn annotation(&self, id: ElementId) -> Option<&Annotation> {
        self.annotations.get(&id)
    }

    pub fn annotation_mut(&mut self, id: ElementId) -> Option<&mut Annotation> {
        self.annotations.get_mut(&id)
    }

    pub fn annotations(&self) -> impl Iterator<Item = &Annotation> {
        self.annotations.values()
    }

    pub fn citation(&self, id: ElementId) -> Option<&Citation> {
        self.citations.get(&id)
    }

    pub fn citation_mut(&mut self, id: ElementId) -> Option<&mut Citation> {
        self.citations.get_mut(&id)
    }

    pub fn citations(&self) -> impl Iterator<Item = &Citation> {
        self.citations.values()
    }

    pub fn evidence(&self, id: ElementId) -> Option<&Evidence> {
        self.evidences.get(&id)
    }

    pub fn evidence_mut(&mut self, id: ElementId) -> Option<&mut Evidence> {
        self.evidences.get_mut(&id)
    }

    pub fn evidences(&self) -> impl Iterator<Item = &Evidence> {
        self.evidences.values()
    }

    // =========================================================================
    // Groups
    // =========================================================================

    /// Makes `member` part of `group`, updating both sides.
    ///
    /// Adding an element to the group it already belongs to does nothing.
    ///
    /// # Errors
    ///
    /// - [`ModelError::NotFound`] if either id is unknown.
    /// - [`ModelError::GroupMembership`] if `group` is not a group, `member`
    ///   cannot be grouped, already belongs to another group, or the change
    ///   would make a group contain itself.
    pub fn group_add_member(&mut self, group: ElementId, member: ElementId) -> Result<(), ModelError> {
        let group_kind = self.kind_of(group).ok_or(ModelError::NotFound(group))?;
        if group_kind != EntityKind::Group {
            return Err(ModelError::GroupMembership(format!(
                "`{group}` is a {group_kind}, not a group"
            )));
        }
        let member_kind = self.kind_of(member).ok_or(ModelError::NotFound(member))?;
        if !member_kind.is_groupable() {
            return Err(ModelError::GroupMembership(format!(
                "{member_kind} `{member}` cannot be a group member"
            )));
        }

        match self.element_info(member).and_then(ElementInfo::group_ref) {
            Some(current) if current == group => return Ok(()),
            Some(current) => {
                return Err(ModelError::GroupMembership(format!(
                    "`{member}` already belongs to group `{current}`"
                )));
            }
            None => {}
        }

        if member_kind == EntityKind::Group && self.is_within(group, member) {
            return Err(ModelError::GroupMembership(format!(
                "adding group `{member}` to `{group}` would create a cycle"
            )));
        }

        self.groups
            .get_mut(&group)
            .ok_or(ModelError::NotFound(group))?
            .insert_member(member);
        self.element_info_mut(member)
            .ok_or(ModelError::NotFound(member))?
            .set_group_ref(Some(group));

        self.notify(ModelEvent::MemberAdded { group, member });
        Ok(())
    }

    /// Releases `member` from `group`, updating both sides.
    ///
    /// # Errors
    ///
    /// [`ModelError::NotFound`] for an unknown group,
    /// [`ModelError::GroupMembership`] if `member` is not in the group.
    pub fn group_remove_member(&mut self, group: ElementId, member: ElementId) -> Result<(), ModelError> {
        let removed = self
            .groups
            .get_mut(&group)
            .ok_or(ModelError::NotFound(group))?
            .remove_member(member);
        if !removed {
            return Err(ModelError::GroupMembership(format!(
                "`{member}` is not a member of group `{group}`"
            )));
        }
        if let Some(info) = self.element_info_mut(member) {
            info.set_group_ref(None);
        }

        self.notify(ModelEvent::MemberRemoved { group, member });
        Ok(())
    }

    /// Whether `group` is `ancestor` or nested (at any depth) inside it.
    fn is_within(&self, group: ElementId, ancestor: ElementId) -> bool {
        let mut current = Some(group);
        let mut steps = 0;
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            steps += 1;
            if steps > self.groups.len() {
                return false;
            }
            current = self.groups.get(&id).and_then(|g| g.info().group_ref());
        }
        false
    }

    /// Removes every group without members, repeating until none is left.
    ///
    /// Removing an empty group may empty its parent, which is then removed
    /// too. Returns the removed ids; a second call returns nothing.
    pub fn remove_empty_groups(&mut self) -> Vec<ElementId> {
        let mut removed = Vec::new();
        loop {
            let empty: Vec<ElementId> = self
                .groups
                .values()
                .filter(|group| group.is_empty())
                .map(|group| group.element_id())
                .collect();
            if empty.is_empty() {
                break;
            }
            for id in empty {
                if self.remove(id).is_ok() {
                    debug!(element_id:% = id; "Empty group removed");
                    removed.push(id);
                }
            }
        }
        removed
    }

    /// Extent of a group's members, grown by `padding` on every side.
    ///
    /// Nested groups contribute their own padded extent. Returns `None` for
    /// unknown ids and for groups whose members have no geometry.
    pub fn fitted_group_bounds(&self, group: ElementId, padding: f64) -> Option<Bounds> {
        let group = self.groups.get(&group)?;
        group
            .members()
            .filter_map(|member| self.element_extent(member, padding))
            .reduce(|acc, bounds| acc.merge(&bounds))
            .map(|bounds| bounds.inflate(padding))
    }

    fn element_extent(&self, id: ElementId, padding: f64) -> Option<Bounds> {
        match self.kind_of(id)? {
            EntityKind::DataNode => Some(self.data_nodes.get(&id)?.graphics().bounds()),
            EntityKind::Label => Some(self.labels.get(&id)?.graphics().bounds()),
            EntityKind::Shape => Some(self.shapes.get(&id)?.graphics().bounds()),
            EntityKind::Interaction | EntityKind::GraphicalLine => self.line_element(id)?.bounds(),
            EntityKind::Group => self.fitted_group_bounds(id, padding),
            _ => None,
        }
    }

    // =========================================================================
    // References
    // =========================================================================

    /// Sets or clears the group a data node is an alias of.
    ///
    /// # Errors
    ///
    /// [`ModelError::NotFound`] for an unknown data node,
    /// [`ModelError::InvalidReference`] if the target is not a group.
    pub fn set_alias_ref(&mut self, data_node: ElementId, group: Option<ElementId>) -> Result<(), ModelError> {
        if let Some(target) = group {
            if self.kind_of(target) != Some(EntityKind::Group) {
                return Err(ModelError::invalid_reference(
                    data_node,
                    target,
                    "alias target must be a group",
                ));
            }
        }
        self.data_nodes
            .get_mut(&data_node)
            .ok_or(ModelError::NotFound(data_node))?
            .set_alias_ref(group);
        Ok(())
    }

    /// Attaches a line point to a linkable element, or detaches it.
    ///
    /// # Errors
    ///
    /// [`ModelError::NotFound`] for an unknown point,
    /// [`ModelError::InvalidReference`] if the target is unknown or not linkable.
    pub fn set_point_link(&mut self, point: ElementId, link: Option<PointLink>) -> Result<(), ModelError> {
        let Some(Location::LinePoint(line)) = self.index.get(&point).copied() else {
            return Err(ModelError::NotFound(point));
        };
        if let Some(link) = &link {
            let target = link.target();
            match self.kind_of(target) {
                Some(kind) if kind.is_linkable() => {}
                Some(kind) => {
                    return Err(ModelError::invalid_reference(
                        point,
                        target,
                        format!("a {kind} cannot be linked to"),
                    ));
                }
                None => {
                    return Err(ModelError::invalid_reference(point, target, "target does not exist"));
                }
            }
        }
        self.line_element_mut(line)
            .and_then(|l| l.point_mut(point))
            .ok_or(ModelError::NotFound(point))?
            .set_link(link);
        Ok(())
    }

    /// Attaches an annotation ref (with its nested refs) to an owner.
    ///
    /// # Errors
    ///
    /// [`ModelError::InvalidReference`] if any target in the ref tree is not
    /// a live object of the expected kind, [`ModelError::NotFound`] if the
    /// owner cannot hold refs.
    pub fn attach_annotation_ref(&mut self, owner: RefOwner, annotation_ref: AnnotationRef) -> Result<(), ModelError> {
        self.check_annotation_ref(owner, &annotation_ref)?;
        self.ref_holder(owner)?.push_annotation_ref(annotation_ref);
        Ok(())
    }

    /// Attaches a citation ref (with its nested refs) to an owner.
    ///
    /// # Errors
    ///
    /// As for [`attach_annotation_ref`](Self::attach_annotation_ref).
    pub fn attach_citation_ref(&mut self, owner: RefOwner, citation_ref: CitationRef) -> Result<(), ModelError> {
        self.check_citation_ref(owner, &citation_ref)?;
        self.ref_holder(owner)?.push_citation_ref(citation_ref);
        Ok(())
    }

    /// Attaches an evidence ref to an owner.
    ///
    /// # Errors
    ///
    /// As for [`attach_annotation_ref`](Self::attach_annotation_ref).
    pub fn attach_evidence_ref(&mut self, owner: RefOwner, evidence_ref: EvidenceRef) -> Result<(), ModelError> {
        self.check_target(owner, evidence_ref.evidence(), EntityKind::Evidence)?;
        self.ref_holder(owner)?.push_evidence_ref(evidence_ref);
        Ok(())
    }

    /// Detaches the first annotation ref of `owner` pointing at `annotation`.
    ///
    /// Nested refs go with it; the annotation itself stays in the model.
    ///
    /// # Errors
    ///
    /// [`ModelError::NotFound`] if the owner has no such ref.
    pub fn detach_annotation_ref(&mut self, owner: RefOwner, annotation: ElementId) -> Result<AnnotationRef, ModelError> {
        self.ref_holder(owner)?
            .take_annotation_ref(annotation)
            .ok_or(ModelError::NotFound(annotation))
    }

    /// Detaches the first citation ref of `owner` pointing at `citation`.
    ///
    /// # Errors
    ///
    /// [`ModelError::NotFound`] if the owner has no such ref.
    pub fn detach_citation_ref(&mut self, owner: RefOwner, citation: ElementId) -> Result<CitationRef, ModelError> {
        self.ref_holder(owner)?
            .take_citation_ref(citation)
            .ok_or(ModelError::NotFound(citation))
    }

    /// Detaches the first evidence ref of `owner` pointing at `evidence`.
    ///
    /// # Errors
    ///
    /// [`ModelError::NotFound`] if the owner has no such ref.
    pub fn detach_evidence_ref(&mut self, owner: RefOwner, evidence: ElementId) -> Result<EvidenceRef, ModelError> {
        self.ref_holder(owner)?
            .take_evidence_ref(evidence)
            .ok_or(ModelError::NotFound(evidence))
    }

    fn ref_holder(&mut self, owner: RefOwner) -> Result<&mut CommentGroup, ModelError> {
        match owner {
            RefOwner::Pathway => Ok(self.pathway.comment_group_mut()),
            RefOwner::Element(id) => self
                .element_info_mut(id)
                .map(ElementInfo::comment_group_mut)
                .ok_or(ModelError::NotFound(id)),
        }
    }

    fn check_annotation_ref(&self, owner: RefOwner, annotation_ref: &AnnotationRef) -> Result<(), ModelError> {
        self.check_target(owner, annotation_ref.annotation(), EntityKind::Annotation)?;
        for citation_ref in annotation_ref.citation_refs() {
            self.check_citation_ref(owner, citation_ref)?;
        }
        for evidence_ref in annotation_ref.evidence_refs() {
            self.check_target(owner, evidence_ref.evidence(), EntityKind::Evidence)?;
        }
        Ok(())
    }

    fn check_citation_ref(&self, owner: RefOwner, citation_ref: &CitationRef) -> Result<(), ModelError> {
        self.check_target(owner, citation_ref.citation(), EntityKind::Citation)?;
        for annotation_ref in citation_ref.annotation_refs() {
            self.check_annotation_ref(owner, annotation_ref)?;
        }
        Ok(())
    }

    fn check_target(&self, owner: RefOwner, target: ElementId, expected: EntityKind) -> Result<(), ModelError> {
        match self.kind_of(target) {
            Some(kind) if kind == expected => Ok(()),
            Some(kind) => Err(ModelError::invalid_reference(
                owner,
                target,
                format!("expected a {expected}, found a {kind}"),
            )),
            None => Err(ModelError::invalid_reference(
                owner,
                target,
                format!("{expected} does not exist"),
            )),
        }
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Checks that every interaction and graphical line has at least 2 points.
    ///
    /// # Errors
    ///
    /// [`ModelError::InvalidLine`] naming the first offending line.
    pub fn validate_line_elements(&self) -> Result<(), ModelError> {
        let lines = self
            .interactions
            .values()
            .map(Interaction::line)
            .chain(self.graphical_lines.values().map(GraphicalLine::line));
        for line in lines {
            let points = line.points().len();
            if points < 2 {
                return Err(ModelError::InvalidLine {
                    id: line.element_id(),
                    points,
                });
            }
        }
        Ok(())
    }
}

impl Default for PathwayModel {
    fn default() -> Self {
        Self::new(Pathway::default())
    }
}

impl fmt::Debug for PathwayModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathwayModel")
            .field("pathway", &self.pathway)
            .field("data_nodes", &self.data_nodes)
            .field("interactions", &self.interactions)
            .field("graphical_lines", &self.graphical_lines)
            .field("labels", &self.labels)
            .field("shapes", &self.shapes)
            .field("groups", &self.groups)
            .field("annotations", &self.annotations)
            .field("citations", &self.citations)
            .field("evidences", &self.evidences)
            .finish_non_exhaustive()
    }
}

/// Structural equality: same pathway and the same objects under the same
/// ids, regardless of insertion order.
impl PartialEq for PathwayModel {
    fn eq(&self, other: &Self) -> bool {
        self.pathway == other.pathway
            && self.data_nodes == other.data_nodes
            && self.interactions == other.interactions
            && self.graphical_lines == other.graphical_lines
            && self.labels == other.labels
            && self.shapes == other.shapes
            && self.groups == other.groups
            && self.annotations == other.annotations
            && self.citations == other.citations
            && self.evidences == other.evidences
    }
}

/// Drops the outgoing references of a removed object.
fn detach(entity: &mut Entity) {
    fn clear(info: &mut ElementInfo) {
        info.set_group_ref(None);
        info.comment_group_mut().clear_refs();
    }

    match entity {
        Entity::DataNode(node) => {
            clear(node.info_mut());
            node.set_alias_ref(None);
            for state in node.states_mut() {
                state.info_mut().comment_group_mut().clear_refs();
            }
        }
        Entity::State(state) => clear(state.info_mut()),
        Entity::Interaction(interaction) => {
            clear(interaction.info_mut());
            for point in interaction.line_mut().points_mut() {
                point.set_link(None);
            }
        }
        Entity::GraphicalLine(line) => {
            clear(line.info_mut());
            for point in line.line_mut().points_mut() {
                point.set_link(None);
            }
        }
        Entity::LinePoint(point) => point.set_link(None),
        Entity::Label(label) => clear(label.info_mut()),
        Entity::Shape(shape) => clear(shape.info_mut()),
        Entity::Group(group) => clear(group.info_mut()),
        Entity::Anchor(_) | Entity::Annotation(_) | Entity::Citation(_) | Entity::Evidence(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        geometry::Coordinate,
        model::shaped::ShapedGraphics,
        types::{DataNodeType, GroupType},
    };

    use super::*;

    fn node(id: &str) -> DataNode {
        let graphics = ShapedGraphics::new(Coordinate::new(0.0, 0.0), 10.0, 10.0).unwrap();
        DataNode::new(ElementId::new(id), id, DataNodeType::GeneProduct, graphics)
    }

    #[test]
    fn test_generate_unique_id_skips_taken() {
        let mut model = PathwayModel::default();
        model.add(node("id0")).unwrap();

        let first = model.generate_unique_id("id");
        let second = model.generate_unique_id("id");
        assert_ne!(first, ElementId::new("id0"));
        assert_ne!(first, second);
        assert!(!model.contains(first));
    }

    #[test]
    fn test_add_rejects_owned_children() {
        let mut model = PathwayModel::default();
        let state = State::new(ElementId::new("pm_state"), "P", 0.0, 0.0).unwrap();
        assert!(matches!(model.add(state), Err(ModelError::InvalidValue(_))));
    }

    #[test]
    fn test_is_within_detects_nesting() {
        let mut model = PathwayModel::default();
        let outer = model.add(Group::new(ElementId::new("pm_outer"), GroupType::Group)).unwrap();
        let inner = model.add(Group::new(ElementId::new("pm_inner"), GroupType::Group)).unwrap();
        model.group_add_member(outer, inner).unwrap();

        assert!(model.is_within(inner, outer));
        assert!(!model.is_within(outer, inner));
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use crate::{
        geometry::Coordinate,
        model::shaped::ShapedGraphics,
        types::{DataNodeType, GroupType},
    };

    use super::*;

    const NODES: usize = 4;
    const GROUPS: usize = 3;

    #[derive(Debug, Clone, Copy)]
    enum Op {
        AddMember(usize, usize),
        RemoveMember(usize, usize),
        Remove(usize),
        PruneGroups,
    }

    // ===================
    // Strategies
    // ===================

    fn op_strategy() -> impl Strategy<Value = Op> {
        let slots = NODES + GROUPS;
        prop_oneof![
            3 => (0..GROUPS, 0..slots).prop_map(|(g, m)| Op::AddMember(g, m)),
            2 => (0..GROUPS, 0..slots).prop_map(|(g, m)| Op::RemoveMember(g, m)),
            1 => (0..slots).prop_map(Op::Remove),
            1 => Just(Op::PruneGroups),
        ]
    }

    fn seeded_model() -> (PathwayModel, Vec<ElementId>) {
        let mut model = PathwayModel::default();
        let mut ids = Vec::new();
        for i in 0..NODES {
            let graphics = ShapedGraphics::new(Coordinate::new(i as f64 * 20.0, 0.0), 10.0, 10.0).unwrap();
            let node = DataNode::new(ElementId::new(&format!("prop_n{i}")), "n", DataNodeType::GeneProduct, graphics);
            ids.push(model.add(node).unwrap());
        }
        for i in 0..GROUPS {
            let group = Group::new(ElementId::new(&format!("prop_g{i}")), GroupType::Group);
            ids.push(model.add(group).unwrap());
        }
        (model, ids)
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Membership is recorded on both sides and never forms a cycle.
    fn check_membership_stays_bidirectional(ops: Vec<Op>) -> Result<(), TestCaseError> {
        let (mut model, ids) = seeded_model();
        let group_id = |g: usize| ids[NODES + g];

        for op in ops {
            match op {
                Op::AddMember(g, m) => {
                    let _ = model.group_add_member(group_id(g), ids[m]);
                }
                Op::RemoveMember(g, m) => {
                    let _ = model.group_remove_member(group_id(g), ids[m]);
                }
                Op::Remove(m) => {
                    let _ = model.remove(ids[m]);
                }
                Op::PruneGroups => {
                    model.remove_empty_groups();
                    prop_assert!(model.groups().all(|g| !g.is_empty()));
                }
            }

            for group in model.groups() {
                for member in group.members() {
                    let info = model.element_info(member);
                    prop_assert!(info.is_some(), "dangling member {}", member);
                    prop_assert_eq!(info.and_then(ElementInfo::group_ref), Some(group.element_id()));
                }
                if let Some(parent) = group.info().group_ref() {
                    prop_assert!(!model.is_within(parent, group.element_id()), "cycle through {}", parent);
                }
            }
            for &id in &ids {
                if let Some(parent) = model.element_info(id).and_then(ElementInfo::group_ref) {
                    let group = model.group(parent);
                    prop_assert!(group.is_some_and(|g| g.has_member(id)));
                }
            }
        }
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn membership_stays_bidirectional(ops in prop::collection::vec(op_strategy(), 0..40)) {
            check_membership_stays_bidirectional(ops)?;
        }
    }
}
