//! GPML2021 reader.

use log::{debug, info};

use gpml_core::{
    geometry::Coordinate,
    identifier::ElementId,
    model::{
        Anchor, Annotation, AnnotationRef, Author, Citation, CitationRef, Comment, DataNode,
        Evidence, EvidenceRef, GraphicalLine, Group, Interaction, Label, LineElement, LinePoint,
        Pathway, PathwayElement, PathwayModel, PathwayOptions, RefOwner, Shape, ShapedGraphics,
        State,
    },
    style::{FontProperty, LineStyle, ShapeStyle},
    types::{
        AnchorShapeType, AnnotationType, ArrowHeadType, ConnectorType, DataNodeType, GroupType,
        ShapeType, StateType,
    },
    xref::Xref,
};

use crate::{
    attributes::Attributes,
    dom::{Document, Element},
    error::{ConverterError, Result, Warning},
    format::GpmlVersion,
    outcome::ReadOutcome,
    resolve::{DeferredRefs, join_group, registered},
    schema::AttributeTable,
};

/// Reads a GPML2021 document into a new model.
///
/// # Errors
///
/// - [`ConverterError::UnknownFormat`] if the document is not GPML2021.
/// - [`ConverterError::MissingRequiredAttribute`] and
///   [`ConverterError::MalformedValue`] for attributes that break the schema.
/// - [`ConverterError::UnresolvedRequiredReference`] for a citation with
///   neither xref nor url, or an evidence without xref.
/// - [`ConverterError::Model`] for duplicate ids, short lines and other
///   model invariants.
pub fn read(document: &Document) -> Result<ReadOutcome> {
    let version = GpmlVersion::detect(document)?;
    if version != GpmlVersion::Current {
        return Err(ConverterError::UnknownFormat(format!(
            "expected {}, found {}",
            GpmlVersion::Current,
            version
        )));
    }
    Reader::new(document.root())?.run()
}

struct Reader<'a> {
    root: &'a Element,
    table: &'static AttributeTable,
    model: PathwayModel,
    deferred: DeferredRefs,
    notes: Vec<Warning>,
}

impl<'a> Reader<'a> {
    /// Reads the pathway metadata and authors.
    fn new(root: &'a Element) -> Result<Self> {
        let table = AttributeTable::for_version(GpmlVersion::Current);
        let pathway = read_pathway(root, table)?;
        debug!(title = pathway.title(); "Read pathway metadata");
        Ok(Self {
            root,
            table,
            model: PathwayModel::new(pathway),
            deferred: DeferredRefs::default(),
            notes: Vec::new(),
        })
    }

    fn run(mut self) -> Result<ReadOutcome> {
        self.read_annotations()?;
        self.read_citations()?;
        self.read_evidences()?;
        let root = self.root;
        self.read_comment_group(RefOwner::Pathway, root)?;
        self.read_groups()?;
        self.read_labels()?;
        self.read_shapes()?;
        self.read_data_nodes()?;
        self.read_interactions()?;
        self.read_graphical_lines()?;

        let pending = self.deferred.len();
        let resolved = std::mem::take(&mut self.deferred).resolve(&mut self.model)?;
        debug!(pending = pending, resolved = resolved; "Resolved deferred references");

        let pruned = self.model.remove_empty_groups();
        if !pruned.is_empty() {
            debug!(count = pruned.len(); "Pruned empty groups");
        }
        self.model.validate_line_elements()?;

        info!(elements = self.model.len(); "Read GPML2021 pathway");
        Ok(ReadOutcome {
            model: self.model,
            notes: self.notes,
        })
    }

    fn attrs(&self, element: &'a Element, path: &'static str) -> Attributes<'a> {
        Attributes::new(element, path, self.table)
    }

    // ========================================================================
    // Annotations, citations, evidences
    // ========================================================================

    fn read_annotations(&mut self) -> Result<()> {
        for element in listed(self.root, "Annotations", "Annotation") {
            let attrs = self.attrs(element, "Annotation");
            let id = ElementId::new(&attrs.text("elementId")?);
            let mut annotation = Annotation::new(
                id,
                attrs.text("value")?,
                AnnotationType::from(attrs.text("type")?.as_str()),
            );
            if let Some(xref) = read_xref(element, self.table)? {
                annotation = annotation.with_xref(xref);
            }
            if let Some(url) = read_url(element, self.table)? {
                annotation = annotation.with_url(url);
            }
            self.model.add(annotation)?;
        }
        Ok(())
    }

    fn read_citations(&mut self) -> Result<()> {
        for element in listed(self.root, "Citations", "Citation") {
            let id = ElementId::new(&self.attrs(element, "Citation").text("elementId")?);
            let mut citation = Citation::new(id);
            if let Some(xref) = read_xref(element, self.table)? {
                citation = citation.with_xref(xref);
            }
            if let Some(url) = read_url(element, self.table)? {
                citation = citation.with_url(url);
            }
            if !citation.is_resolvable() {
                return Err(ConverterError::UnresolvedRequiredReference {
                    kind: "citation".to_string(),
                    element_id: id,
                    requirement: "an xref or a url".to_string(),
                });
            }
            self.model.add(citation)?;
        }
        Ok(())
    }

    fn read_evidences(&mut self) -> Result<()> {
        for element in listed(self.root, "Evidences", "Evidence") {
            let attrs = self.attrs(element, "Evidence");
            let id = ElementId::new(&attrs.text("elementId")?);
            let xref = read_xref(element, self.table)?.ok_or_else(|| {
                ConverterError::UnresolvedRequiredReference {
                    kind: "evidence".to_string(),
                    element_id: id,
                    requirement: "an xref".to_string(),
                }
            })?;
            let mut evidence = Evidence::new(id, xref);
            if let Some(value) = attrs.optional_text("value") {
                evidence = evidence.with_value(value);
            }
            if let Some(url) = read_url(element, self.table)? {
                evidence = evidence.with_url(url);
            }
            self.model.add(evidence)?;
        }
        Ok(())
    }

    // ========================================================================
    // Comment groups
    // ========================================================================

    fn read_comment_group(&mut self, owner: RefOwner, element: &'a Element) -> Result<()> {
        let mut comments = Vec::new();
        for comment in element.children_named("Comment") {
            let mut parsed = Comment::new(comment.text());
            if let Some(source) = self.attrs(comment, "Comment").optional_text("source") {
                parsed = parsed.with_source(source);
            }
            comments.push(parsed);
        }
        let mut properties = Vec::new();
        for property in element.children_named("Property") {
            let attrs = self.attrs(property, "Property");
            properties.push((attrs.text("key")?, attrs.text("value")?));
        }
        if let Some(group) = self.model.comment_group_mut(owner) {
            for comment in comments {
                group.add_comment(comment);
            }
            for (key, value) in properties {
                group.set_dynamic_property(key, value);
            }
        }

        for child in element.children_named("AnnotationRef") {
            if let Some(annotation_ref) = self.annotation_ref(child)? {
                self.model.attach_annotation_ref(owner, annotation_ref)?;
            }
        }
        for child in element.children_named("CitationRef") {
            if let Some(citation_ref) = self.citation_ref(child)? {
                self.model.attach_citation_ref(owner, citation_ref)?;
            }
        }
        for child in element.children_named("EvidenceRef") {
            if let Some(evidence_ref) = self.evidence_ref(child)? {
                self.model.attach_evidence_ref(owner, evidence_ref)?;
            }
        }
        Ok(())
    }

    /// Resolves a ref target, or `None` when it names nothing of that kind.
    fn ref_target(
        &self,
        element: &'a Element,
        path: &'static str,
        exists: impl Fn(&PathwayModel, ElementId) -> bool,
    ) -> Result<Option<ElementId>> {
        let key = self.attrs(element, path).text("elementRef")?;
        let target = registered(&self.model, &key).filter(|id| exists(&self.model, *id));
        if target.is_none() {
            debug!(element_ref = key.as_str(), kind = path; "Skipping unresolved reference");
        }
        Ok(target)
    }

    fn annotation_ref(&self, element: &'a Element) -> Result<Option<AnnotationRef>> {
        let Some(target) = self.ref_target(element, "AnnotationRef", |m, id| m.annotation(id).is_some())? else {
            return Ok(None);
        };
        let mut annotation_ref = AnnotationRef::new(target);
        for child in element.children_named("CitationRef") {
            if let Some(citation_ref) = self.citation_ref(child)? {
                annotation_ref = annotation_ref.with_citation_ref(citation_ref);
            }
        }
        for child in element.children_named("EvidenceRef") {
            if let Some(evidence_ref) = self.evidence_ref(child)? {
                annotation_ref = annotation_ref.with_evidence_ref(evidence_ref);
            }
        }
        Ok(Some(annotation_ref))
    }

    fn citation_ref(&self, element: &'a Element) -> Result<Option<CitationRef>> {
        let Some(target) = self.ref_target(element, "CitationRef", |m, id| m.citation(id).is_some())? else {
            return Ok(None);
        };
        let mut citation_ref = CitationRef::new(target);
        for child in element.children_named("AnnotationRef") {
            if let Some(annotation_ref) = self.annotation_ref(child)? {
                citation_ref = citation_ref.with_annotation_ref(annotation_ref);
            }
        }
        Ok(Some(citation_ref))
    }

    fn evidence_ref(&self, element: &'a Element) -> Result<Option<EvidenceRef>> {
        Ok(self
            .ref_target(element, "EvidenceRef", |m, id| m.evidence(id).is_some())?
            .map(EvidenceRef::new))
    }

    // ========================================================================
    // Groups
    // ========================================================================

    fn read_groups(&mut self) -> Result<()> {
        let mut nested = Vec::new();
        for element in listed(self.root, "Groups", "Group") {
            let attrs = self.attrs(element, "Group");
            let id = ElementId::new(&attrs.text("elementId")?);
            let graphics = self.shaped_graphics(element, "Group.Graphics")?;
            let mut group = Group::new(id, GroupType::from(attrs.text("type")?.as_str()))
                .with_graphics(graphics);
            if let Some(label) = attrs.optional_text("textLabel") {
                group = group.with_text_label(label);
            }
            if let Some(xref) = read_xref(element, self.table)? {
                group = group.with_xref(xref);
            }
            if let Some(z_order) = self.z_order(element, "Group.Graphics")? {
                group.set_z_order(z_order);
            }
            self.model.add(group)?;
            self.read_comment_group(RefOwner::Element(id), element)?;
            if let Some(parent) = attrs.optional_text("groupRef") {
                nested.push((id, parent));
            }
        }

        // Groups may name a parent that appears later in the list.
        for (id, parent) in nested {
            let group = registered(&self.model, &parent);
            join_group(&mut self.model, id, &parent, group)?;
        }
        debug!(groups = self.model.groups().count(); "Read groups");
        Ok(())
    }

    fn join_group_of(&mut self, id: ElementId, element: &'a Element, path: &'static str) -> Result<()> {
        if let Some(key) = self.attrs(element, path).optional_text("groupRef") {
            let group = registered(&self.model, &key);
            join_group(&mut self.model, id, &key, group)?;
        }
        Ok(())
    }

    // ========================================================================
    // Shaped elements
    // ========================================================================

    fn read_labels(&mut self) -> Result<()> {
        for element in listed(self.root, "Labels", "Label") {
            let attrs = self.attrs(element, "Label");
            let id = ElementId::new(&attrs.text("elementId")?);
            let graphics = self.shaped_graphics(element, "Label.Graphics")?;
            let mut label = Label::new(id, attrs.text("textLabel")?, graphics);
            if let Some(href) = attrs.optional_text("href") {
                label = label.with_href(href);
            }
            if let Some(z_order) = self.z_order(element, "Label.Graphics")? {
                label.set_z_order(z_order);
            }
            self.model.add(label)?;
            self.join_group_of(id, element, "Label")?;
            self.read_comment_group(RefOwner::Element(id), element)?;
        }
        Ok(())
    }

    fn read_shapes(&mut self) -> Result<()> {
        for element in listed(self.root, "Shapes", "Shape") {
            let attrs = self.attrs(element, "Shape");
            let id = ElementId::new(&attrs.text("elementId")?);
            let mut shape = Shape::new(id, self.shaped_graphics(element, "Shape.Graphics")?);
            if let Some(text) = attrs.optional_text("textLabel") {
                shape = shape.with_text_label(text);
            }
            if let Some(z_order) = self.z_order(element, "Shape.Graphics")? {
                shape.set_z_order(z_order);
            }
            self.model.add(shape)?;
            self.join_group_of(id, element, "Shape")?;
            self.read_comment_group(RefOwner::Element(id), element)?;
        }
        Ok(())
    }

    fn read_data_nodes(&mut self) -> Result<()> {
        for element in listed(self.root, "DataNodes", "DataNode") {
            let attrs = self.attrs(element, "DataNode");
            let id = ElementId::new(&attrs.text("elementId")?);
            let mut node = DataNode::new(
                id,
                attrs.text("textLabel")?,
                DataNodeType::from(attrs.text("type")?.as_str()),
                self.shaped_graphics(element, "DataNode.Graphics")?,
            );
            if let Some(xref) = read_xref(element, self.table)? {
                node = node.with_xref(xref);
            }
            let states: Vec<&'a Element> = listed(element, "States", "State").collect();
            for state in &states {
                node = node.with_state(self.read_state(state)?);
            }
            if let Some(z_order) = self.z_order(element, "DataNode.Graphics")? {
                node.set_z_order(z_order);
            }
            self.model.add(node)?;

            let alias = attrs
                .optional_text("aliasRef")
                .or_else(|| attrs.optional_text("elementRef"));
            if let Some(alias) = alias {
                self.deferred.alias(id, alias);
            }
            self.join_group_of(id, element, "DataNode")?;
            self.read_comment_group(RefOwner::Element(id), element)?;
            for state in states {
                let state_id = ElementId::new(&self.attrs(state, "State").text("elementId")?);
                self.read_comment_group(RefOwner::Element(state_id), state)?;
            }
        }
        Ok(())
    }

    fn read_state(&self, element: &'a Element) -> Result<State> {
        let attrs = self.attrs(element, "State");
        let empty = Element::default();
        let graphics = element.child("Graphics").unwrap_or(&empty);
        let graphic_attrs = Attributes::new(graphics, "State.Graphics", self.table);

        let mut state = State::new(
            ElementId::new(&attrs.text("elementId")?),
            attrs.text("textLabel")?,
            graphic_attrs.float("relX")?,
            graphic_attrs.float("relY")?,
        )?
        .with_state_type(StateType::from(attrs.text("type")?.as_str()));
        state.set_size(graphic_attrs.float("width")?, graphic_attrs.float("height")?)?;
        *state.font_mut() = self.font(&graphic_attrs)?;
        *state.shape_style_mut() = self.shape_style(&graphic_attrs)?;
        if let Some(xref) = read_xref(element, self.table)? {
            state = state.with_xref(xref);
        }
        Ok(state)
    }

    fn shaped_graphics(&self, element: &'a Element, path: &'static str) -> Result<ShapedGraphics> {
        let empty = Element::default();
        let graphics = element.child("Graphics").unwrap_or(&empty);
        let attrs = Attributes::new(graphics, path, self.table);

        let center = Coordinate::new(attrs.float("centerX")?, attrs.float("centerY")?);
        Ok(ShapedGraphics::new(center, attrs.float("width")?, attrs.float("height")?)?
            .with_font(self.font(&attrs)?)
            .with_shape_style(self.shape_style(&attrs)?))
    }

    fn z_order(&self, element: &'a Element, path: &'static str) -> Result<Option<i32>> {
        match element.child("Graphics") {
            Some(graphics) => self.attrs(graphics, path).optional_integer("zOrder"),
            None => Ok(None),
        }
    }

    fn font(&self, attrs: &Attributes<'_>) -> Result<FontProperty> {
        let mut font = FontProperty::default()
            .with_text_color(attrs.color("textColor")?)
            .with_font_name(attrs.text("fontName")?)
            .with_bold(attrs.checked("fontWeight")? == "Bold")
            .with_italic(attrs.checked("fontStyle")? == "Italic")
            .with_font_size(attrs.float("fontSize")?)
            .with_h_align(attrs.parse("hAlign")?)
            .with_v_align(attrs.parse("vAlign")?);
        font.set_underline(attrs.checked("fontDecoration")? == "Underline");
        font.set_strikethrough(attrs.checked("fontStrikethru")? == "Strikethru");
        Ok(font)
    }

    fn shape_style(&self, attrs: &Attributes<'_>) -> Result<ShapeStyle> {
        Ok(ShapeStyle::default()
            .with_border_color(attrs.color("borderColor")?)
            .with_border_style(attrs.parse("borderStyle")?)
            .with_border_width(attrs.float("borderWidth")?)
            .with_fill_color(attrs.color("fillColor")?)
            .with_shape_type(ShapeType::from(attrs.text("shapeType")?.as_str()))
            .with_rotation(attrs.float("rotation")?))
    }

    // ========================================================================
    // Lines
    // ========================================================================

    fn read_interactions(&mut self) -> Result<()> {
        for element in listed(self.root, "Interactions", "Interaction") {
            let line = self.line_element(element, "Interaction")?;
            let id = line.element_id();
            let mut interaction = Interaction::new(line);
            if let Some(xref) = read_xref(element, self.table)? {
                interaction = interaction.with_xref(xref);
            }
            self.model.add(interaction)?;
            self.join_group_of(id, element, "Interaction")?;
            self.read_comment_group(RefOwner::Element(id), element)?;
        }
        Ok(())
    }

    fn read_graphical_lines(&mut self) -> Result<()> {
        for element in listed(self.root, "GraphicalLines", "GraphicalLine") {
            let line = self.line_element(element, "GraphicalLine")?;
            let id = line.element_id();
            self.model.add(GraphicalLine::new(line))?;
            self.join_group_of(id, element, "GraphicalLine")?;
            self.read_comment_group(RefOwner::Element(id), element)?;
        }
        Ok(())
    }

    /// Reads the points, anchors and style shared by both line kinds.
    fn line_element(&mut self, element: &'a Element, path: &'static str) -> Result<LineElement> {
        let id = ElementId::new(&self.attrs(element, path).text("elementId")?);
        let graphics_path = if path == "Interaction" {
            "Interaction.Graphics"
        } else {
            "GraphicalLine.Graphics"
        };

        let empty = Element::default();
        let graphics = element.child("Graphics").unwrap_or(&empty);
        let style_attrs = Attributes::new(graphics, graphics_path, self.table);
        let style = LineStyle::default()
            .with_line_color(style_attrs.color("lineColor")?)
            .with_line_style(style_attrs.parse("lineStyle")?)
            .with_line_width(style_attrs.float("lineWidth")?)
            .with_connector_type(ConnectorType::from(style_attrs.text("connectorType")?.as_str()));
        let mut line = LineElement::new(id).with_line_style(style);
        if let Some(z_order) = style_attrs.optional_integer("zOrder")? {
            line.set_z_order(z_order);
        }

        for waypoints in element.children_named("Waypoints") {
            for point in waypoints.children_named("Point") {
                line = line.with_point(self.line_point(point)?);
            }
            for anchor in waypoints.children_named("Anchor") {
                let attrs = self.attrs(anchor, "Anchor");
                let anchor = Anchor::new(ElementId::new(&attrs.text("elementId")?), attrs.float("position")?)?
                    .with_shape_type(AnchorShapeType::from(attrs.text("shapeType")?.as_str()));
                line = line.with_anchor(anchor);
            }
        }
        debug!(element_id:% = line.element_id(), points = line.points().len(); "Read line");
        Ok(line)
    }

    fn line_point(&mut self, element: &'a Element) -> Result<LinePoint> {
        let attrs = self.attrs(element, "Point");
        let id = ElementId::new(&attrs.text("elementId")?);
        let point = LinePoint::new(id, Coordinate::new(attrs.float("x")?, attrs.float("y")?))
            .with_arrow_head(ArrowHeadType::from(attrs.text("arrowHead")?.as_str()));

        match attrs.optional_text("elementRef") {
            Some(target) => {
                let rel_x = attrs.optional_float("relX")?.unwrap_or(0.0);
                let rel_y = attrs.optional_float("relY")?.unwrap_or(0.0);
                self.deferred.point_link(id, target, rel_x, rel_y);
            }
            None if attrs.is_present("relX") || attrs.is_present("relY") => {
                self.notes.push(Warning::normalised(
                    Some(id),
                    "relative position without elementRef ignored",
                ));
            }
            None => {}
        }
        Ok(point)
    }
}

/// Children called `name` of the list element `container`.
fn listed<'a>(
    root: &'a Element,
    container: &'static str,
    name: &'static str,
) -> impl Iterator<Item = &'a Element> {
    root.children_named(container)
        .flat_map(move |list| list.children_named(name))
}

fn read_pathway(root: &Element, table: &'static AttributeTable) -> Result<Pathway> {
    let attrs = Attributes::new(root, "Pathway", table);
    let empty = Element::default();
    let graphics = root.child("Graphics").unwrap_or(&empty);
    let graphic_attrs = Attributes::new(graphics, "Pathway.Graphics", table);

    let mut authors = Vec::new();
    for author in listed(root, "Authors", "Author") {
        let author_attrs = Attributes::new(author, "Author", table);
        let mut parsed = Author::new(author_attrs.text("name")?);
        if let Some(username) = author_attrs.optional_text("username") {
            parsed = parsed.with_username(username);
        }
        if let Some(order) = author_attrs.optional_integer("order")? {
            let order = u32::try_from(order).map_err(|_| {
                ConverterError::malformed("Author", "order", order.to_string(), "negative order")
            })?;
            parsed = parsed.with_order(order);
        }
        if let Some(xref) = read_xref(author, table)? {
            parsed = parsed.with_xref(xref);
        }
        authors.push(parsed);
    }

    let options = PathwayOptions {
        organism: attrs.optional_text("organism"),
        source: attrs.optional_text("source"),
        version: attrs.optional_text("version"),
        license: attrs.optional_text("license"),
        description: root.child("Description").map(Element::text),
        xref: read_xref(root, table)?,
        background_color: graphic_attrs.color("backgroundColor")?,
        authors,
        ..PathwayOptions::default()
    };
    let mut pathway = Pathway::new(attrs.text("title")?, options);
    pathway.set_board_size(graphic_attrs.float("boardWidth")?, graphic_attrs.float("boardHeight")?)?;
    Ok(pathway)
}

/// The `Xref` child of an element. An xref with neither part is absent.
fn read_xref(element: &Element, table: &'static AttributeTable) -> Result<Option<Xref>> {
    let Some(xref) = element.child("Xref") else {
        return Ok(None);
    };
    let attrs = Attributes::new(xref, "Xref", table);
    let xref = Xref::new(attrs.text("identifier")?, attrs.text("dataSource")?);
    Ok((!xref.is_empty()).then_some(xref))
}

fn read_url(element: &Element, table: &'static AttributeTable) -> Result<Option<String>> {
    element
        .child("Url")
        .map(|url| Attributes::new(url, "Url", table).text("link"))
        .transpose()
}
