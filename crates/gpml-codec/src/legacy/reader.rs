//! GPML2013a reader.
//!
//! Legacy documents differ from the model's shape in a few ways the reader
//! normalises:
//!
//! - `GraphId` is optional. Elements without one get a generated id that
//!   collides with no id written anywhere in the document.
//! - Group membership goes through `GroupId`, a second id space.
//! - States are top-level elements attached through `GraphRef`.
//! - Citations live in the `Biopax` block and are referenced by `rdf:id`.
//! - Groups store no graphics; they are fitted around their members.

use std::collections::{HashMap, HashSet};

use log::{debug, info};

use gpml_core::{
    geometry::Coordinate,
    identifier::ElementId,
    model::{
        Anchor, Author, Citation, CitationRef, Comment, DataNode, GraphicalLine, Group,
        Interaction, Label, LineElement, LinePoint, Pathway, PathwayElement, PathwayModel,
        PathwayOptions, RefOwner, Shape, ShapedGraphics, State,
    },
    style::{FontProperty, LineStyle, ShapeStyle},
    types::ConnectorType,
    xref::Xref,
};

use super::{
    biopax,
    names::{
        self, CELLULAR_COMPONENT_KEY, DESCRIPTION_SOURCE, DOUBLE_LINE_KEY, is_reserved_key,
    },
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

/// Padding around member bounds when fitting group graphics.
pub(crate) const GROUP_PADDING: f64 = 8.0;

/// Pathway properties holding legacy-only pathway attributes.
pub(crate) const MAINTAINER_KEY: &str = "pathway_maintainer_gpml2013a";
pub(crate) const EMAIL_KEY: &str = "pathway_email_gpml2013a";
pub(crate) const LAST_MODIFIED_KEY: &str = "pathway_last_modified_gpml2013a";
pub(crate) const LEGEND_X_KEY: &str = "pathway_legend_center_x_gpml2013a";
pub(crate) const LEGEND_Y_KEY: &str = "pathway_legend_center_y_gpml2013a";

/// Reads a GPML2013a (or GPML2010a) document into a new model.
///
/// # Errors
///
/// - [`ConverterError::UnknownFormat`] if the document is not a legacy one.
/// - [`ConverterError::MissingRequiredAttribute`] and
///   [`ConverterError::MalformedValue`] for attributes that break the schema.
/// - [`ConverterError::Model`] for duplicate ids, group cycles, short lines
///   and other model invariants.
pub fn read(document: &Document) -> Result<ReadOutcome> {
    let version = GpmlVersion::detect(document)?;
    if version != GpmlVersion::Legacy {
        return Err(ConverterError::UnknownFormat(format!(
            "expected {}, found {}",
            GpmlVersion::Legacy,
            version
        )));
    }
    Reader::new(document.root())?.run()
}

/// Reserved keys read by bordered elements and lines.
const BORDER_KEYS: &[&str] = &[DOUBLE_LINE_KEY];

/// Reserved keys read by shapes.
const SHAPE_KEYS: &[&str] = &[DOUBLE_LINE_KEY, CELLULAR_COMPONENT_KEY];

/// Legacy `Attribute` elements of one element, split from the reserved ones.
#[derive(Debug, Default)]
struct Properties {
    plain: Vec<(String, String)>,
    reserved: HashMap<String, String>,
}

impl Properties {
    fn reserved(&self, key: &str) -> Option<&str> {
        self.reserved.get(key).map(String::as_str)
    }

    fn is_double(&self) -> bool {
        self.reserved(DOUBLE_LINE_KEY).is_some()
    }
}

struct Reader<'a> {
    root: &'a Element,
    table: &'static AttributeTable,
    model: PathwayModel,
    /// Every `GraphId` written in the document.
    written_ids: HashSet<String>,
    generated: usize,
    /// `GroupId` to the group's element id.
    group_ids: HashMap<String, ElementId>,
    /// Biopax `rdf:id` to the citation's element id.
    citation_ids: HashMap<String, ElementId>,
    deferred: DeferredRefs,
    notes: Vec<Warning>,
}

impl<'a> Reader<'a> {
    fn new(root: &'a Element) -> Result<Self> {
        let table = AttributeTable::for_version(GpmlVersion::Legacy);
        let mut written_ids = HashSet::new();
        collect_graph_ids(root, &mut written_ids);

        let mut reader = Self {
            root,
            table,
            model: PathwayModel::new(Pathway::new("", PathwayOptions::default())),
            written_ids,
            generated: 0,
            group_ids: HashMap::new(),
            citation_ids: HashMap::new(),
            deferred: DeferredRefs::default(),
            notes: Vec::new(),
        };
        let pathway = reader.read_pathway()?;
        *reader.model.pathway_mut() = pathway;
        Ok(reader)
    }

    fn run(mut self) -> Result<ReadOutcome> {
        self.read_biopax()?;
        let root = self.root;
        self.read_info(RefOwner::Pathway, root, &[DESCRIPTION_SOURCE], &[])?;
        self.read_groups()?;
        self.read_labels()?;
        self.read_shapes()?;
        self.read_data_nodes()?;
        self.read_states()?;
        self.read_lines()?;

        let resolved = std::mem::take(&mut self.deferred).resolve(&mut self.model)?;
        debug!(resolved = resolved; "Resolved deferred references");

        let pruned = self.model.remove_empty_groups();
        if !pruned.is_empty() {
            debug!(count = pruned.len(); "Pruned empty groups");
        }
        self.model.validate_line_elements()?;
        self.fit_groups();

        if self.generated > 0 {
            self.notes.push(Warning::normalised(
                None,
                format!("generated ids for {} elements without GraphId", self.generated),
            ));
        }
        info!(elements = self.model.len(), notes = self.notes.len(); "Read GPML2013a pathway");
        Ok(ReadOutcome {
            model: self.model,
            notes: self.notes,
        })
    }

    fn attrs(&self, element: &'a Element, path: &'static str) -> Attributes<'a> {
        Attributes::new(element, path, self.table)
    }

    /// The element's `GraphId`, or a generated id.
    fn graph_id(&mut self, element: &'a Element, path: &'static str) -> ElementId {
        match self.attrs(element, path).optional_text("GraphId") {
            Some(id) if !id.is_empty() => ElementId::new(&id),
            _ => self.fresh_id(),
        }
    }

    fn fresh_id(&mut self) -> ElementId {
        self.generated += 1;
        loop {
            let id = self.model.generate_unique_id("id");
            if !self.written_ids.contains(&id.as_string()) {
                return id;
            }
        }
    }

    // ========================================================================
    // Pathway
    // ========================================================================

    fn read_pathway(&self) -> Result<Pathway> {
        let root = self.root;
        let attrs = self.attrs(root, "Pathway");

        let authors = attrs
            .optional_text("Author")
            .map(|names| {
                names
                    .split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(Author::new)
                    .collect()
            })
            .unwrap_or_default();

        let description = root
            .children_named("Comment")
            .find(|comment| comment.attribute("Source") == Some(DESCRIPTION_SOURCE))
            .map(Element::text);

        let options = PathwayOptions {
            organism: attrs.optional_text("Organism"),
            source: attrs.optional_text("Data-Source"),
            version: attrs.optional_text("Version"),
            license: attrs.optional_text("License"),
            description,
            authors,
            ..PathwayOptions::default()
        };
        let mut pathway = Pathway::new(attrs.text("Name")?, options);

        if let Some(graphics) = root.child("Graphics") {
            let graphic_attrs = self.attrs(graphics, "Pathway.Graphics");
            pathway.set_board_size(graphic_attrs.float("BoardWidth")?, graphic_attrs.float("BoardHeight")?)?;
        }
        if let Some(infobox) = root.child("InfoBox") {
            let infobox_attrs = self.attrs(infobox, "InfoBox");
            pathway.set_infobox(Coordinate::new(
                infobox_attrs.float("CenterX")?,
                infobox_attrs.float("CenterY")?,
            ));
        }

        let properties = pathway.comment_group_mut();
        for (attribute, key) in [
            ("Maintainer", MAINTAINER_KEY),
            ("Email", EMAIL_KEY),
            ("Last-Modified", LAST_MODIFIED_KEY),
        ] {
            if let Some(value) = attrs.optional_text(attribute) {
                properties.set_dynamic_property(key, value);
            }
        }
        if let Some(legend) = root.child("Legend") {
            let legend_attrs = self.attrs(legend, "Legend");
            properties.set_dynamic_property(LEGEND_X_KEY, legend_attrs.text("CenterX")?);
            properties.set_dynamic_property(LEGEND_Y_KEY, legend_attrs.text("CenterY")?);
        }

        debug!(title = pathway.title(), authors = pathway.authors().len(); "Read pathway metadata");
        Ok(pathway)
    }

    // ========================================================================
    // Biopax
    // ========================================================================

    fn read_biopax(&mut self) -> Result<()> {
        let root = self.root;
        let Some(block) = root.child("Biopax") else {
            return Ok(());
        };
        let content = biopax::parse(block)?;

        for publication in content.publications {
            if publication.identifier.is_empty() {
                self.notes.push(Warning::normalised(
                    None,
                    format!("publication `{}` without ID skipped", publication.rdf_id),
                ));
                continue;
            }
            let rdf_id = publication.rdf_id;
            let id = if rdf_id.is_empty()
                || self.written_ids.contains(&rdf_id)
                || self.model.contains(ElementId::new(&rdf_id))
            {
                self.fresh_id()
            } else {
                ElementId::new(&rdf_id)
            };
            if !publication.dropped.is_empty() {
                self.notes.push(Warning::normalised(
                    Some(id),
                    format!("publication fields dropped: {}", publication.dropped.join(", ")),
                ));
            }
            let xref = Xref::new(publication.identifier, publication.database);
            self.model.add(Citation::new(id).with_xref(xref))?;
            self.citation_ids.insert(rdf_id, id);
        }

        self.model.pathway_mut().set_legacy_biopax(content.remainder);
        debug!(citations = self.citation_ids.len(); "Read Biopax block");
        Ok(())
    }

    // ========================================================================
    // Comments, attributes, Biopax refs
    // ========================================================================

    /// Reads the `Attribute` elements of an element.
    fn properties(&self, element: &'a Element) -> Result<Properties> {
        let mut properties = Properties::default();
        for attribute in element.children_named("Attribute") {
            let attrs = self.attrs(attribute, "Attribute");
            let (key, value) = (attrs.text("Key")?, attrs.text("Value")?);
            if is_reserved_key(&key) {
                properties.reserved.insert(key, value);
            } else {
                properties.plain.push((key, value));
            }
        }
        Ok(properties)
    }

    /// Reads comments, plain properties and Biopax refs of an element.
    /// Comments whose source is in `skip_sources` were consumed elsewhere.
    /// Reserved properties outside `interpreted` mean nothing on this element
    /// and are reported as dropped.
    fn read_info(
        &mut self,
        owner: RefOwner,
        element: &'a Element,
        skip_sources: &[&str],
        interpreted: &[&str],
    ) -> Result<()> {
        let properties = self.properties(element)?;
        let mut ignored: Vec<(&String, &String)> = properties
            .reserved
            .iter()
            .filter(|(key, _)| !interpreted.contains(&key.as_str()))
            .collect();
        ignored.sort();
        let element_id = match owner {
            RefOwner::Pathway => None,
            RefOwner::Element(id) => Some(id),
        };
        for (key, value) in ignored {
            debug!(owner:% = owner, key = key.as_str(); "Ignoring reserved property");
            self.notes.push(Warning::ReservedProperty {
                element_id,
                key: key.clone(),
                value: value.clone(),
            });
        }

        let mut comments = Vec::new();
        let mut skipped_description = false;
        for comment in element.children_named("Comment") {
            let source = self.attrs(comment, "Comment").optional_text("Source");
            if let Some(source) = &source {
                if skip_sources.contains(&source.as_str()) && !skipped_description {
                    skipped_description = true;
                    continue;
                }
            }
            let mut parsed = Comment::new(comment.text());
            if let Some(source) = source {
                parsed = parsed.with_source(source);
            }
            comments.push(parsed);
        }
        if let Some(group) = self.model.comment_group_mut(owner) {
            for comment in comments {
                group.add_comment(comment);
            }
            for (key, value) in properties.plain {
                group.set_dynamic_property(key, value);
            }
        }

        for biopax_ref in element.children_named("BiopaxRef") {
            let key = biopax_ref.text();
            let key = key.trim();
            match self.citation_ids.get(key) {
                Some(citation) => self.model.attach_citation_ref(owner, CitationRef::new(*citation))?,
                None => {
                    debug!(biopax_ref = key; "Skipping unresolved Biopax reference");
                }
            }
        }
        Ok(())
    }

    fn xref(&self, element: &'a Element) -> Result<Option<Xref>> {
        let Some(xref) = element.child("Xref") else {
            return Ok(None);
        };
        let attrs = self.attrs(xref, "Xref");
        let xref = Xref::new(attrs.text("ID")?, attrs.text("Database")?);
        Ok((!xref.is_empty()).then_some(xref))
    }

    fn join_group_of(&mut self, id: ElementId, element: &'a Element, path: &'static str) -> Result<()> {
        if let Some(key) = self.attrs(element, path).optional_text("GroupRef") {
            let group = self.group_ids.get(&key).copied();
            join_group(&mut self.model, id, &key, group)?;
        }
        Ok(())
    }

    // ========================================================================
    // Groups
    // ========================================================================

    fn read_groups(&mut self) -> Result<()> {
        let root = self.root;
        let mut nested = Vec::new();
        for element in root.children_named("Group") {
            let id = self.graph_id(element, "Group");
            let attrs = self.attrs(element, "Group");
            let group_id = attrs.text("GroupId")?;

            let mut group = Group::new(id, names::group_type_from_legacy(&attrs.text("Style")?));
            if let Some(label) = attrs.optional_text("TextLabel") {
                group = group.with_text_label(label);
            }
            if let Some(xref) = self.xref(element)? {
                group = group.with_xref(xref);
            }
            self.model.add(group)?;
            self.group_ids.insert(group_id, id);
            self.read_info(RefOwner::Element(id), element, &[], &[])?;
            if let Some(parent) = attrs.optional_text("GroupRef") {
                nested.push((id, parent));
            }
        }

        for (id, parent) in nested {
            let group = self.group_ids.get(&parent).copied();
            join_group(&mut self.model, id, &parent, group)?;
        }
        debug!(groups = self.group_ids.len(); "Read groups");
        Ok(())
    }

    /// Fits each group's graphics around its members.
    fn fit_groups(&mut self) {
        let ids: Vec<ElementId> = self.model.groups().map(|group| group.element_id()).collect();
        for id in ids {
            let Some(bounds) = self.model.fitted_group_bounds(id, GROUP_PADDING) else {
                continue;
            };
            if let Some(group) = self.model.group_mut(id) {
                group.graphics_mut().set_bounds(bounds);
            }
        }
    }

    // ========================================================================
    // Shaped elements
    // ========================================================================

    fn read_labels(&mut self) -> Result<()> {
        let root = self.root;
        for element in root.children_named("Label") {
            let id = self.graph_id(element, "Label");
            let attrs = self.attrs(element, "Label");
            let double = self.properties(element)?.is_double();
            let (graphics, z_order) = self.shaped_graphics(element, "Label.Graphics", None, double)?;
            let mut label = Label::new(id, attrs.text("TextLabel")?, graphics);
            if let Some(href) = attrs.optional_text("Href") {
                label = label.with_href(href);
            }
            if let Some(z_order) = z_order {
                label.set_z_order(z_order);
            }
            self.model.add(label)?;
            self.join_group_of(id, element, "Label")?;
            self.read_info(RefOwner::Element(id), element, &[], BORDER_KEYS)?;
        }
        Ok(())
    }

    fn read_shapes(&mut self) -> Result<()> {
        let root = self.root;
        for element in root.children_named("Shape") {
            let id = self.graph_id(element, "Shape");
            let attrs = self.attrs(element, "Shape");
            let properties = self.properties(element)?;
            let component = properties.reserved(CELLULAR_COMPONENT_KEY);
            let (graphics, z_order) =
                self.shaped_graphics(element, "Shape.Graphics", component, properties.is_double())?;

            let mut shape = Shape::new(id, graphics);
            if let Some(text) = attrs.optional_text("TextLabel") {
                shape = shape.with_text_label(text);
            }
            if let Some(z_order) = z_order {
                shape.set_z_order(z_order);
            }
            self.model.add(shape)?;
            self.join_group_of(id, element, "Shape")?;
            self.read_info(RefOwner::Element(id), element, &[], SHAPE_KEYS)?;
        }
        Ok(())
    }

    fn read_data_nodes(&mut self) -> Result<()> {
        let root = self.root;
        for element in root.children_named("DataNode") {
            let id = self.graph_id(element, "DataNode");
            let attrs = self.attrs(element, "DataNode");
            let double = self.properties(element)?.is_double();
            let (graphics, z_order) = self.shaped_graphics(element, "DataNode.Graphics", None, double)?;
            let mut node = DataNode::new(
                id,
                attrs.text("TextLabel")?,
                names::data_node_type_from_legacy(&attrs.text("Type")?),
                graphics,
            );
            if let Some(xref) = self.xref(element)? {
                node = node.with_xref(xref);
            }
            if let Some(z_order) = z_order {
                node.set_z_order(z_order);
            }
            self.model.add(node)?;
            self.join_group_of(id, element, "DataNode")?;
            self.read_info(RefOwner::Element(id), element, &[], BORDER_KEYS)?;
        }
        Ok(())
    }

    /// Attaches the top-level states to their data nodes.
    fn read_states(&mut self) -> Result<()> {
        let root = self.root;
        for element in root.children_named("State") {
            let id = self.graph_id(element, "State");
            let attrs = self.attrs(element, "State");
            let parent = attrs.text("GraphRef")?;
            let data_node = registered(&self.model, &parent).filter(|node| self.model.data_node(*node).is_some());
            let Some(data_node) = data_node else {
                self.notes.push(Warning::normalised(
                    Some(id),
                    format!("state on unknown data node `{parent}` skipped"),
                ));
                continue;
            };

            let empty = Element::default();
            let graphics = element.child("Graphics").unwrap_or(&empty);
            let graphic_attrs = Attributes::new(graphics, "State.Graphics", self.table);
            let mut state = State::new(
                id,
                attrs.text("TextLabel")?,
                graphic_attrs.float("RelX")?,
                graphic_attrs.float("RelY")?,
            )?
            .with_state_type(names::state_type_from_legacy(&attrs.text("StateType")?));
            state.set_size(graphic_attrs.float("Width")?, graphic_attrs.float("Height")?)?;
            *state.font_mut() = self.font(&graphic_attrs)?;
            let double = self.properties(element)?.is_double();
            *state.shape_style_mut() = self.shape_style(&graphic_attrs, None, double)?;
            if let Some(xref) = self.xref(element)? {
                state = state.with_xref(xref);
            }

            self.model.add_state(data_node, state)?;
            self.read_info(RefOwner::Element(id), element, &[], BORDER_KEYS)?;
        }
        Ok(())
    }

    fn shaped_graphics(
        &self,
        element: &'a Element,
        path: &'static str,
        cellular_component: Option<&str>,
        double: bool,
    ) -> Result<(ShapedGraphics, Option<i32>)> {
        let empty = Element::default();
        let graphics = element.child("Graphics").unwrap_or(&empty);
        let attrs = Attributes::new(graphics, path, self.table);

        let center = Coordinate::new(attrs.float("CenterX")?, attrs.float("CenterY")?);
        let shaped = ShapedGraphics::new(center, attrs.float("Width")?, attrs.float("Height")?)?
            .with_font(self.font(&attrs)?)
            .with_shape_style(self.shape_style(&attrs, cellular_component, double)?);
        Ok((shaped, attrs.optional_integer("ZOrder")?))
    }

    fn font(&self, attrs: &Attributes<'_>) -> Result<FontProperty> {
        let mut font = FontProperty::default()
            .with_text_color(attrs.color("Color")?)
            .with_font_name(attrs.text("FontName")?)
            .with_bold(attrs.checked("FontWeight")? == "Bold")
            .with_italic(attrs.checked("FontStyle")? == "Italic")
            .with_font_size(attrs.float("FontSize")?)
            .with_h_align(attrs.parse("Align")?)
            .with_v_align(attrs.parse("Valign")?);
        font.set_underline(attrs.checked("FontDecoration")? == "Underline");
        font.set_strikethrough(attrs.checked("FontStrikethru")? == "Strikethru");
        Ok(font)
    }

    fn shape_style(
        &self,
        attrs: &Attributes<'_>,
        cellular_component: Option<&str>,
        double: bool,
    ) -> Result<ShapeStyle> {
        let mut style = ShapeStyle::default()
            .with_border_color(attrs.color("Color")?)
            .with_border_style(names::line_style_from_legacy(&attrs.checked("LineStyle")?, double))
            .with_border_width(attrs.float("LineThickness")?)
            .with_fill_color(attrs.color("FillColor")?)
            .with_shape_type(names::shape_type_from_legacy(&attrs.text("ShapeType")?, cellular_component));
        if attrs.is_present("Rotation") {
            let value = attrs.text("Rotation")?;
            let radians = names::rotation_from_legacy(&value)
                .map_err(|reason| ConverterError::malformed("Shape.Graphics", "Rotation", &value, reason))?;
            style.set_rotation(radians);
        }
        Ok(style)
    }

    // ========================================================================
    // Lines
    // ========================================================================

    fn read_lines(&mut self) -> Result<()> {
        let root = self.root;
        for element in root.children_named("Interaction") {
            let line = self.line_element(element, "Interaction", "Interaction.Graphics")?;
            let id = line.element_id();
            let mut interaction = Interaction::new(line);
            if let Some(xref) = self.xref(element)? {
                interaction = interaction.with_xref(xref);
            }
            self.model.add(interaction)?;
            self.join_group_of(id, element, "Interaction")?;
            self.read_info(RefOwner::Element(id), element, &[], BORDER_KEYS)?;
        }
        for element in root.children_named("GraphicalLine") {
            let line = self.line_element(element, "GraphicalLine", "GraphicalLine.Graphics")?;
            let id = line.element_id();
            self.model.add(GraphicalLine::new(line))?;
            self.join_group_of(id, element, "GraphicalLine")?;
            self.read_info(RefOwner::Element(id), element, &[], BORDER_KEYS)?;
        }
        Ok(())
    }

    /// Reads a line. Points and anchors sit inside the line's `Graphics`.
    fn line_element(
        &mut self,
        element: &'a Element,
        path: &'static str,
        graphics_path: &'static str,
    ) -> Result<LineElement> {
        let id = self.graph_id(element, path);
        let properties = self.properties(element)?;
        let graphics = element.child("Graphics");

        let style = self.line_style(graphics, graphics_path, properties.is_double())?;
        let mut line = LineElement::new(id).with_line_style(style);
        if let Some(graphics) = graphics {
            let attrs = Attributes::new(graphics, graphics_path, self.table);
            if let Some(z_order) = attrs.optional_integer("ZOrder")? {
                line.set_z_order(z_order);
            }
            for point in graphics.children_named("Point") {
                line = line.with_point(self.line_point(point)?);
            }
            for anchor in graphics.children_named("Anchor") {
                let anchor_id = self.graph_id(anchor, "Anchor");
                let anchor_attrs = self.attrs(anchor, "Anchor");
                let anchor = Anchor::new(anchor_id, anchor_attrs.float("Position")?)?
                    .with_shape_type(names::anchor_shape_from_legacy(&anchor_attrs.text("Shape")?));
                line = line.with_anchor(anchor);
            }
        }
        debug!(element_id:% = id, points = line.points().len(); "Read line");
        Ok(line)
    }

    /// Line style of a line's `Graphics`; defaults apply when it is missing.
    fn line_style(
        &self,
        graphics: Option<&Element>,
        graphics_path: &'static str,
        double: bool,
    ) -> Result<LineStyle> {
        let empty = Element::default();
        let attrs = Attributes::new(graphics.unwrap_or(&empty), graphics_path, self.table);
        Ok(LineStyle::default()
            .with_line_color(attrs.color("Color")?)
            .with_line_style(names::line_style_from_legacy(&attrs.checked("LineStyle")?, double))
            .with_line_width(attrs.float("LineThickness")?)
            .with_connector_type(ConnectorType::from(attrs.text("ConnectorType")?.as_str())))
    }

    fn line_point(&mut self, element: &'a Element) -> Result<LinePoint> {
        let id = self.graph_id(element, "Point");
        let attrs = self.attrs(element, "Point");
        let point = LinePoint::new(id, Coordinate::new(attrs.float("X")?, attrs.float("Y")?))
            .with_arrow_head(names::arrow_head_from_legacy(&attrs.text("ArrowHead")?));

        match attrs.optional_text("GraphRef").filter(|target| !target.is_empty()) {
            Some(target) => {
                let rel_x = attrs.optional_float("RelX")?.unwrap_or(0.0);
                let rel_y = attrs.optional_float("RelY")?.unwrap_or(0.0);
                self.deferred.point_link(id, target, rel_x, rel_y);
            }
            None if attrs.is_present("RelX") || attrs.is_present("RelY") => {
                self.notes.push(Warning::normalised(
                    Some(id),
                    "relative position without GraphRef ignored",
                ));
            }
            None => {}
        }
        Ok(point)
    }
}

/// Collects every `GraphId` in the subtree.
fn collect_graph_ids(element: &Element, ids: &mut HashSet<String>) {
    if let Some(id) = element.attribute("GraphId") {
        ids.insert(id.to_string());
    }
    for child in element.children() {
        collect_graph_ids(child, ids);
    }
}
