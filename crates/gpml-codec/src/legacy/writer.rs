//! GPML2013a writer.
//!
//! The legacy schema has no place for annotations, evidences, pathway xrefs
//! and several other parts of the model. Everything that cannot be written
//! is reported as a [`Warning`] and the write carries on.

use std::collections::HashSet;

use log::{debug, info, warn};

use gpml_core::{
    color::Color,
    identifier::ElementId,
    model::{
        CommentGroup, DataNode, Group, Label, LineElement, PathwayElement, PathwayModel, Shape,
        ShapedGraphics, State,
    },
    style::{FontProperty, ShapeStyle},
    xref::{DataSourceLookup, Xref},
};

use super::{
    biopax::{self, BIOPAX_NAMESPACE, RDF_NAMESPACE},
    names::{self, CELLULAR_COMPONENT_KEY, DESCRIPTION_SOURCE, DOUBLE_LINE_KEY, is_reserved_key},
    reader::{EMAIL_KEY, GROUP_PADDING, LAST_MODIFIED_KEY, LEGEND_X_KEY, LEGEND_Y_KEY, MAINTAINER_KEY},
};
use crate::{
    attributes::{AttributeWriter, format_number},
    dom::{Document, Element},
    emit::{draw_order, prepare},
    error::{Result, Warning},
    format::GpmlVersion,
    outcome::WriteOutcome,
    schema::AttributeTable,
};

/// Pathway properties that are written as attributes or elements of their own.
const PATHWAY_ONLY_KEYS: &[&str] = &[
    MAINTAINER_KEY,
    EMAIL_KEY,
    LAST_MODIFIED_KEY,
    LEGEND_X_KEY,
    LEGEND_Y_KEY,
];

/// Writes the model as a GPML2013a document.
///
/// Lines, empty groups and citations are checked on the live model first;
/// empty groups are pruned from it.
///
/// # Errors
///
/// [`ConverterError::Model`](crate::error::ConverterError::Model) for a line
/// with fewer than two points and
/// [`ConverterError::UnresolvedRequiredReference`](crate::error::ConverterError::UnresolvedRequiredReference)
/// for a citation with neither xref nor url.
pub fn write(model: &mut PathwayModel, lookup: &dyn DataSourceLookup) -> Result<WriteOutcome> {
    prepare(model)?;
    let publications = model
        .citations()
        .filter(|citation| citation.xref().is_some())
        .map(|citation| citation.element_id())
        .collect();
    let mut writer = Writer {
        model,
        table: AttributeTable::for_version(GpmlVersion::Legacy),
        lookup,
        publications,
        warnings: Vec::new(),
    };
    let root = writer.pathway();
    info!(warnings = writer.warnings.len(); "Wrote GPML2013a pathway");
    Ok(WriteOutcome {
        document: Document::new(root),
        warnings: writer.warnings,
    })
}

struct Writer<'a> {
    model: &'a PathwayModel,
    table: &'static AttributeTable,
    lookup: &'a dyn DataSourceLookup,
    /// Citations written as Biopax publications.
    publications: HashSet<ElementId>,
    warnings: Vec<Warning>,
}

impl Writer<'_> {
    fn element(&self, name: &str, path: &'static str) -> AttributeWriter {
        AttributeWriter::new(name, path, self.table)
    }

    fn drop_feature(&mut self, element_id: Option<ElementId>, feature: impl Into<String>) {
        let feature = feature.into();
        warn!(feature = feature.as_str(); "Dropping information GPML2013a cannot carry");
        self.warnings.push(Warning::unsupported(element_id, feature));
    }

    // ========================================================================
    // Pathway
    // ========================================================================

    fn pathway(&mut self) -> Element {
        let model = self.model;
        let pathway = model.pathway();
        let properties = pathway.comment_group();

        let authors: Vec<&str> = pathway.authors().iter().map(|author| author.name()).collect();
        let mut root = self.element("Pathway", "Pathway");
        root.set("xmlns", GpmlVersion::Legacy.namespace())
            .set("xmlns:bp", BIOPAX_NAMESPACE)
            .set("xmlns:rdf", RDF_NAMESPACE)
            .set("Name", pathway.title())
            .set_optional("Organism", pathway.organism())
            .set_optional("Data-Source", pathway.source())
            .set_optional("Version", pathway.version())
            .set_optional("Author", (!authors.is_empty()).then(|| authors.join(", ")))
            .set_optional("Maintainer", properties.dynamic_property(MAINTAINER_KEY))
            .set_optional("Email", properties.dynamic_property(EMAIL_KEY))
            .set_optional("License", pathway.license())
            .set_optional("Last-Modified", properties.dynamic_property(LAST_MODIFIED_KEY));

        if pathway.xref().is_some() {
            self.drop_feature(None, "pathway xref");
        }
        if pathway.background_color() != Color::WHITE {
            self.drop_feature(None, "background colour");
        }
        if pathway
            .authors()
            .iter()
            .any(|author| author.username().is_some() || author.order().is_some() || author.xref().is_some())
        {
            self.drop_feature(None, "author details beyond names");
        }

        let mut root = root.finish();
        if let Some(description) = pathway.description() {
            root.push_child(
                Element::new("Comment")
                    .with_attribute("Source", DESCRIPTION_SOURCE)
                    .with_text(description),
            );
        }
        self.info(&mut root, None, properties, &[]);

        let mut graphics = self.element("Graphics", "Pathway.Graphics");
        graphics
            .set("BoardWidth", format_number(pathway.board_size().width()))
            .set("BoardHeight", format_number(pathway.board_size().height()));
        root.push_child(graphics.finish());

        for node in draw_order(model.data_nodes()) {
            let element = self.data_node(node);
            root.push_child(element);
        }
        for node in draw_order(model.data_nodes()) {
            for state in node.states() {
                let element = self.state(node, state);
                root.push_child(element);
            }
        }
        for interaction in draw_order(model.interactions()) {
            let mut element = self.line("Interaction", "Interaction.Graphics", interaction.line());
            if let Some(xref) = interaction.xref() {
                element.push_child(self.xref(xref));
            }
            root.push_child(element);
        }
        for line in draw_order(model.graphical_lines()) {
            let element = self.line("GraphicalLine", "GraphicalLine.Graphics", line.line());
            root.push_child(element);
        }
        for label in draw_order(model.labels()) {
            let element = self.label(label);
            root.push_child(element);
        }
        for shape in draw_order(model.shapes()) {
            let element = self.shape(shape);
            root.push_child(element);
        }
        for group in draw_order(model.groups()) {
            let element = self.group(group);
            root.push_child(element);
        }

        let infobox = pathway.infobox();
        let mut element = self.element("InfoBox", "InfoBox");
        element
            .set("CenterX", format_number(infobox.x()))
            .set("CenterY", format_number(infobox.y()));
        root.push_child(element.finish());

        if let (Some(x), Some(y)) = (
            properties.dynamic_property(LEGEND_X_KEY),
            properties.dynamic_property(LEGEND_Y_KEY),
        ) {
            root.push_child(
                Element::new("Legend")
                    .with_attribute("CenterX", x)
                    .with_attribute("CenterY", y),
            );
        }

        if let Some(biopax) = self.biopax() {
            root.push_child(biopax);
        }
        self.drop_annotations();
        root
    }

    /// The Biopax block: publications for citations with an xref, then the
    /// kept legacy markup.
    fn biopax(&mut self) -> Option<Element> {
        let model = self.model;
        let mut block = Element::new("Biopax");
        let mut citations: Vec<_> = model.citations().collect();
        citations.sort_by_key(|citation| citation.element_id());
        for citation in citations {
            let id = citation.element_id();
            match citation.xref() {
                Some(xref) => {
                    block.push_child(biopax::publication_xref(
                        &id.to_string(),
                        xref.identifier(),
                        self.lookup.render(xref.data_source()),
                    ));
                    if citation.url().is_some() {
                        self.drop_feature(Some(id), "citation url");
                    }
                }
                None => self.drop_feature(Some(id), "citation without xref"),
            }
        }
        if let Some(markup) = model.pathway().legacy_biopax() {
            block.push_raw(markup);
        }
        (!block.is_empty()).then_some(block)
    }

    fn drop_annotations(&mut self) {
        let model = self.model;
        let mut annotations: Vec<_> = model.annotations().map(|a| a.element_id()).collect();
        annotations.sort();
        for id in annotations {
            self.drop_feature(Some(id), "annotation");
        }
        let mut evidences: Vec<_> = model.evidences().map(|e| e.element_id()).collect();
        evidences.sort();
        for id in evidences {
            self.drop_feature(Some(id), "evidence");
        }
    }

    // ========================================================================
    // Shared children
    // ========================================================================

    /// Appends comments, Biopax refs and attributes. `generated` holds the
    /// reserved properties the writer derives from the element itself.
    fn info(
        &mut self,
        element: &mut Element,
        owner: Option<ElementId>,
        group: &CommentGroup,
        generated: &[(&str, &str)],
    ) {
        for comment in group.comments() {
            let mut child = self.element("Comment", "Comment");
            child.set_optional("Source", comment.source());
            element.push_child(child.finish().with_text(comment.text()));
        }

        for citation_ref in group.citation_refs() {
            let citation = citation_ref.citation();
            if self.publications.contains(&citation) {
                element.push_child(Element::new("BiopaxRef").with_text(citation.to_string()));
            } else {
                self.drop_feature(owner, format!("reference to citation `{citation}` without xref"));
            }
            if !citation_ref.annotation_refs().is_empty() {
                self.drop_feature(owner, format!("annotation refs nested in citation ref `{citation}`"));
            }
        }
        for annotation_ref in group.annotation_refs() {
            self.drop_feature(owner, format!("annotation ref `{}`", annotation_ref.annotation()));
        }
        for evidence_ref in group.evidence_refs() {
            self.drop_feature(owner, format!("evidence ref `{}`", evidence_ref.evidence()));
        }

        for (key, value) in group.dynamic_properties() {
            if owner.is_none() && PATHWAY_ONLY_KEYS.contains(&key) {
                continue;
            }
            if is_reserved_key(key) {
                warn!(key = key, value = value; "Dropping reserved property");
                self.warnings.push(Warning::ReservedProperty {
                    element_id: owner,
                    key: key.to_string(),
                    value: value.to_string(),
                });
                continue;
            }
            element.push_child(attribute(key, value));
        }
        for (key, value) in generated {
            element.push_child(attribute(key, value));
        }
    }

    fn xref(&self, xref: &Xref) -> Element {
        let mut element = self.element("Xref", "Xref");
        element
            .set("Database", self.lookup.render(xref.data_source()))
            .set("ID", xref.identifier());
        element.finish()
    }

    /// Opens an element with its `GraphId` and `GroupRef`.
    fn graph_element(&self, name: &str, path: &'static str, element: &impl PathwayElement) -> AttributeWriter {
        let mut writer = self.element(name, path);
        writer
            .set("GraphId", element.element_id().to_string())
            .set_optional("GroupRef", element.info().group_ref().map(|id| id.to_string()));
        writer
    }

    /// Writes shaped graphics. `color` is the single legacy colour. Also
    /// returns the reserved properties the style needs.
    fn graphics(
        &self,
        path: &'static str,
        graphics: &ShapedGraphics,
        color: Color,
        z_order: Option<i32>,
    ) -> (Element, Vec<(&'static str, &'static str)>) {
        let mut element = self.element("Graphics", path);
        element
            .set_number("CenterX", graphics.center().x())
            .set_number("CenterY", graphics.center().y())
            .set_number("Width", graphics.size().width())
            .set_number("Height", graphics.size().height());
        font_attributes(&mut element, graphics.font());
        let (component, double) = style_attributes(&mut element, graphics.shape_style(), color);
        if let Some(z_order) = z_order {
            element.set("ZOrder", z_order.to_string());
        }
        (element.finish(), generated(component, double))
    }

    /// GPML2013a has one colour for text and border. `kept` is written;
    /// a different `lost` colour is reported.
    fn merge_colors(&mut self, id: ElementId, kept: Color, lost: Color, feature: &str) {
        if kept != lost {
            self.drop_feature(Some(id), feature);
        }
    }

    // ========================================================================
    // Shaped elements
    // ========================================================================

    fn data_node(&mut self, node: &DataNode) -> Element {
        let id = node.element_id();
        if node.alias_ref().is_some() {
            self.drop_feature(Some(id), "data node alias");
        }
        let mut writer = self.graph_element("DataNode", "DataNode", node);
        writer
            .set("TextLabel", node.text_label())
            .set_non_default("Type", names::data_node_type_to_legacy(node.node_type()));
        let mut element = writer.finish();

        let graphics = node.graphics();
        let text_color = graphics.font().text_color();
        self.merge_colors(id, text_color, graphics.shape_style().border_color(), "border colour");
        let (graphics, generated) =
            self.graphics("DataNode.Graphics", graphics, text_color, Some(node.z_order()));
        self.info(&mut element, Some(id), node.comment_group(), &generated);
        element.push_child(graphics);
        let empty = Xref::default();
        element.push_child(self.xref(node.xref().unwrap_or(&empty)));
        element
    }

    fn state(&mut self, node: &DataNode, state: &State) -> Element {
        let id = state.element_id();
        let mut writer = self.element("State", "State");
        writer
            .set("GraphId", id.to_string())
            .set("GraphRef", node.element_id().to_string())
            .set("TextLabel", state.text_label())
            .set_non_default("StateType", names::state_type_to_legacy(state.state_type()));
        let mut element = writer.finish();

        let text_color = state.font().text_color();
        self.merge_colors(id, text_color, state.shape_style().border_color(), "border colour");
        let mut graphics = self.element("Graphics", "State.Graphics");
        graphics
            .set_number("RelX", state.rel_x())
            .set_number("RelY", state.rel_y())
            .set_number("Width", state.size().width())
            .set_number("Height", state.size().height());
        font_attributes(&mut graphics, state.font());
        let (_, double) = style_attributes(&mut graphics, state.shape_style(), text_color);
        self.info(&mut element, Some(id), state.comment_group(), &generated(None, double));
        element.push_child(graphics.finish());
        if let Some(xref) = state.xref() {
            element.push_child(self.xref(xref));
        }
        element
    }

    fn label(&mut self, label: &Label) -> Element {
        let id = label.element_id();
        let mut writer = self.graph_element("Label", "Label", label);
        writer
            .set("TextLabel", label.text_label())
            .set_optional("Href", label.href());
        let mut element = writer.finish();

        let graphics = label.graphics();
        let text_color = graphics.font().text_color();
        self.merge_colors(id, text_color, graphics.shape_style().border_color(), "border colour");
        let (graphics, generated) =
            self.graphics("Label.Graphics", graphics, text_color, Some(label.z_order()));
        self.info(&mut element, Some(id), label.comment_group(), &generated);
        element.push_child(graphics);
        element
    }

    fn shape(&mut self, shape: &Shape) -> Element {
        let id = shape.element_id();
        let mut writer = self.graph_element("Shape", "Shape", shape);
        writer.set_optional("TextLabel", shape.text_label());
        let mut element = writer.finish();

        let style = shape.graphics().shape_style();
        if shape.text_label().is_some_and(|text| !text.is_empty()) {
            let text_color = shape.graphics().font().text_color();
            self.merge_colors(id, style.border_color(), text_color, "text colour");
        }
        let (mut graphics, generated) = self.graphics(
            "Shape.Graphics",
            shape.graphics(),
            style.border_color(),
            Some(shape.z_order()),
        );
        match names::rotation_to_legacy(style.rotation()) {
            Some("Top") => {}
            Some(keyword) => graphics.set_attribute("Rotation", keyword),
            None => graphics.set_attribute("Rotation", format_number(style.rotation())),
        }

        self.info(&mut element, Some(id), shape.comment_group(), &generated);
        element.push_child(graphics);
        element
    }

    fn group(&mut self, group: &Group) -> Element {
        let id = group.element_id();
        if group.xref().is_some() {
            self.drop_feature(Some(id), "group xref");
        }
        let mut expected = ShapedGraphics::default();
        if let Some(bounds) = self.model.fitted_group_bounds(id, GROUP_PADDING) {
            expected.set_bounds(bounds);
        }
        if group.graphics() != &expected {
            self.drop_feature(Some(id), "group graphics");
        }

        let mut writer = self.graph_element("Group", "Group", group);
        writer
            .set("GroupId", id.to_string())
            .set_non_default("Style", names::group_type_to_legacy(group.group_type()))
            .set_optional("TextLabel", group.text_label());
        let mut element = writer.finish();
        self.info(&mut element, Some(id), group.comment_group(), &[]);
        element
    }

    // ========================================================================
    // Lines
    // ========================================================================

    fn line(&mut self, name: &str, graphics_path: &'static str, line: &LineElement) -> Element {
        let id = line.element_id();
        let path = if name == "Interaction" {
            "Interaction"
        } else {
            "GraphicalLine"
        };
        let mut element = self.graph_element(name, path, line).finish();

        let style = line.line_style();
        let (line_style, double) = names::line_style_to_legacy(style.line_style());
        let generated: &[(&str, &str)] = if double {
            &[(DOUBLE_LINE_KEY, "Double")]
        } else {
            &[]
        };
        self.info(&mut element, Some(id), line.comment_group(), generated);

        let mut graphics = self.element("Graphics", graphics_path);
        graphics
            .set_non_default("ConnectorType", style.connector_type().as_str())
            .set("ZOrder", line.z_order().to_string())
            .set_color("Color", style.line_color())
            .set_non_default("LineStyle", line_style)
            .set_number("LineThickness", style.line_width());

        for point in line.points() {
            let mut child = self.element("Point", "Point");
            child
                .set("GraphId", point.element_id().to_string())
                .set_number("X", point.coordinate().x())
                .set_number("Y", point.coordinate().y());
            if let Some(link) = point.link() {
                child
                    .set("RelX", format_number(link.rel_x()))
                    .set("RelY", format_number(link.rel_y()))
                    .set("GraphRef", link.target().to_string());
            }
            child.set_non_default("ArrowHead", names::arrow_head_to_legacy(point.arrow_head()));
            graphics.child(child.finish());
        }
        for anchor in line.anchors() {
            let mut child = self.element("Anchor", "Anchor");
            child
                .set("GraphId", anchor.element_id().to_string())
                .set("Position", format_number(anchor.position()))
                .set_non_default("Shape", names::anchor_shape_to_legacy(anchor.shape_type()));
            graphics.child(child.finish());
        }
        element.push_child(graphics.finish());
        debug!(element_id:% = id, points = line.points().len(); "Wrote line");
        element
    }
}

fn attribute(key: &str, value: &str) -> Element {
    Element::new("Attribute")
        .with_attribute("Key", key)
        .with_attribute("Value", value)
}

fn font_attributes(element: &mut AttributeWriter, font: &FontProperty) {
    element
        .set_non_default("FontName", font.font_name())
        .set_non_default("FontStyle", if font.italic() { "Italic" } else { "Normal" })
        .set_non_default(
            "FontDecoration",
            if font.underline() { "Underline" } else { "Normal" },
        )
        .set_non_default(
            "FontStrikethru",
            if font.strikethrough() { "Strikethru" } else { "Normal" },
        )
        .set_non_default("FontWeight", if font.bold() { "Bold" } else { "Normal" })
        .set_number("FontSize", font.font_size())
        .set_non_default("Align", font.h_align().as_str())
        .set_non_default("Valign", font.v_align().as_str());
}

/// Writes the border and fill. Returns the cellular component property
/// value when the shape type needs one and whether the border is double.
fn style_attributes(
    element: &mut AttributeWriter,
    style: &ShapeStyle,
    color: Color,
) -> (Option<&'static str>, bool) {
    let (border, double) = names::line_style_to_legacy(style.border_style());
    let (shape_type, component) = names::shape_type_to_legacy(style.shape_type());
    element
        .set_color("Color", color)
        .set_non_default("LineStyle", border)
        .set_number("LineThickness", style.border_width())
        .set_color("FillColor", style.fill_color())
        .set_non_default("ShapeType", shape_type);
    (component, double)
}

/// Reserved properties standing in for a cellular component and a double border.
fn generated(component: Option<&'static str>, double: bool) -> Vec<(&'static str, &'static str)> {
    let mut properties = Vec::new();
    if let Some(name) = component {
        properties.push((CELLULAR_COMPONENT_KEY, name));
    }
    if double {
        properties.push((DOUBLE_LINE_KEY, "Double"));
    }
    properties
}
