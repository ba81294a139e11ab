//! GPML2021 writer.

use log::{debug, info, warn};

use gpml_core::{
    geometry::Coordinate,
    identifier::ElementId,
    model::{
        AnnotationRef, CitationRef, CommentGroup, DataNode, EvidenceRef, Group, Label, LineElement,
        PathwayElement, PathwayModel, Shape, ShapedGraphics, State,
    },
    style::{FontProperty, ShapeStyle},
    xref::{DataSourceLookup, Xref},
};

use crate::{
    attributes::{AttributeWriter, format_number},
    dom::{Document, Element},
    emit::{draw_order, id_order, prepare},
    error::{Result, Warning},
    format::GpmlVersion,
    outcome::WriteOutcome,
    schema::AttributeTable,
};

/// Writes the model as a GPML2021 document.
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
    let mut writer = Writer {
        model,
        table: AttributeTable::for_version(GpmlVersion::Current),
        lookup,
        warnings: Vec::new(),
    };
    let root = writer.pathway();
    info!(warnings = writer.warnings.len(); "Wrote GPML2021 pathway");
    Ok(WriteOutcome {
        document: Document::new(root),
        warnings: writer.warnings,
    })
}

struct Writer<'a> {
    model: &'a PathwayModel,
    table: &'static AttributeTable,
    lookup: &'a dyn DataSourceLookup,
    warnings: Vec<Warning>,
}

impl Writer<'_> {
    fn element(&self, name: &str, path: &'static str) -> AttributeWriter {
        AttributeWriter::new(name, path, self.table)
    }

    fn pathway(&mut self) -> Element {
        let model = self.model;
        let pathway = model.pathway();

        let mut root = self.element("Pathway", "Pathway");
        root.set("xmlns", GpmlVersion::Current.namespace())
            .set("title", pathway.title())
            .set_optional("organism", pathway.organism())
            .set_optional("source", pathway.source())
            .set_optional("version", pathway.version())
            .set_optional("license", pathway.license());

        if let Some(xref) = pathway.xref() {
            root.child(self.xref(xref));
        }
        if let Some(description) = pathway.description() {
            root.child(Element::new("Description").with_text(description));
        }
        if !pathway.authors().is_empty() {
            let mut authors = Element::new("Authors");
            for author in pathway.authors() {
                let mut element = self.element("Author", "Author");
                element
                    .set("name", author.name())
                    .set_optional("username", author.username())
                    .set_optional("order", author.order().map(|order| order.to_string()));
                if let Some(xref) = author.xref() {
                    element.child(self.xref(xref));
                }
                authors.push_child(element.finish());
            }
            root.child(authors);
        }

        let mut graphics = self.element("Graphics", "Pathway.Graphics");
        graphics
            .set("boardWidth", format_number(pathway.board_size().width()))
            .set("boardHeight", format_number(pathway.board_size().height()))
            .set_color("backgroundColor", pathway.background_color());
        root.child(graphics.finish());

        root.child_if_filled(self.annotations())
            .child_if_filled(self.citations())
            .child_if_filled(self.evidences())
            .child_if_filled(self.groups())
            .child_if_filled(self.labels())
            .child_if_filled(self.shapes())
            .child_if_filled(self.data_nodes())
            .child_if_filled(self.lines("Interactions"))
            .child_if_filled(self.lines("GraphicalLines"));

        let mut root = root.finish();
        self.comment_group(&mut root, pathway.comment_group());

        if pathway.legacy_biopax().is_some() {
            self.drop_feature(None, "legacy Biopax block");
        }
        if pathway.infobox() != Coordinate::default() {
            self.drop_feature(None, "InfoBox position");
        }
        root
    }

    fn drop_feature(&mut self, element_id: Option<ElementId>, feature: &str) {
        warn!(feature = feature; "Dropping information GPML2021 cannot carry");
        self.warnings.push(Warning::unsupported(element_id, feature));
    }

    // ========================================================================
    // Shared children
    // ========================================================================

    fn xref(&self, xref: &Xref) -> Element {
        let mut element = self.element("Xref", "Xref");
        element
            .set("identifier", xref.identifier())
            .set("dataSource", self.lookup.render(xref.data_source()));
        element.finish()
    }

    fn url(link: &str) -> Element {
        Element::new("Url").with_attribute("link", link)
    }

    /// Appends comments, properties and refs, in that order.
    fn comment_group(&self, element: &mut Element, group: &CommentGroup) {
        for comment in group.comments() {
            let mut child = self.element("Comment", "Comment");
            child.set_optional("source", comment.source());
            element.push_child(child.finish().with_text(comment.text()));
        }
        for (key, value) in group.dynamic_properties() {
            element.push_child(
                Element::new("Property")
                    .with_attribute("key", key)
                    .with_attribute("value", value),
            );
        }
        for annotation_ref in group.annotation_refs() {
            element.push_child(annotation_ref_element(annotation_ref));
        }
        for citation_ref in group.citation_refs() {
            element.push_child(citation_ref_element(citation_ref));
        }
        for evidence_ref in group.evidence_refs() {
            element.push_child(evidence_ref_element(evidence_ref));
        }
    }

    fn graphics(&self, path: &'static str, graphics: &ShapedGraphics, z_order: i32) -> Element {
        let mut element = self.element("Graphics", path);
        element
            .set_number("centerX", graphics.center().x())
            .set_number("centerY", graphics.center().y())
            .set_number("width", graphics.size().width())
            .set_number("height", graphics.size().height());
        font_attributes(&mut element, graphics.font());
        style_attributes(&mut element, graphics.shape_style());
        element.set("zOrder", z_order.to_string());
        element.finish()
    }

    // ========================================================================
    // Annotations, citations, evidences
    // ========================================================================

    fn annotations(&self) -> Element {
        let mut list = Element::new("Annotations");
        for annotation in id_order(self.model.annotations(), |a| a.element_id()) {
            let mut element = self.element("Annotation", "Annotation");
            element
                .set("elementId", annotation.element_id().to_string())
                .set("value", annotation.value())
                .set_non_default("type", annotation.annotation_type().as_str());
            if let Some(xref) = annotation.xref() {
                element.child(self.xref(xref));
            }
            if let Some(url) = annotation.url() {
                element.child(Self::url(url));
            }
            list.push_child(element.finish());
        }
        list
    }

    fn citations(&self) -> Element {
        let mut list = Element::new("Citations");
        for citation in id_order(self.model.citations(), |c| c.element_id()) {
            let mut element = self.element("Citation", "Citation");
            element.set("elementId", citation.element_id().to_string());
            if let Some(xref) = citation.xref() {
                element.child(self.xref(xref));
            }
            if let Some(url) = citation.url() {
                element.child(Self::url(url));
            }
            list.push_child(element.finish());
        }
        list
    }

    fn evidences(&self) -> Element {
        let mut list = Element::new("Evidences");
        for evidence in id_order(self.model.evidences(), |e| e.element_id()) {
            let mut element = self.element("Evidence", "Evidence");
            element
                .set("elementId", evidence.element_id().to_string())
                .set_optional("value", evidence.value())
                .child(self.xref(evidence.xref()));
            if let Some(url) = evidence.url() {
                element.child(Self::url(url));
            }
            list.push_child(element.finish());
        }
        list
    }

    // ========================================================================
    // Shaped elements
    // ========================================================================

    /// Opens an element with its id and group reference.
    fn graph_element(&self, name: &str, element: &impl PathwayElement) -> AttributeWriter {
        let mut writer = self.element(name, element_path(name));
        writer
            .set("elementId", element.element_id().to_string())
            .set_optional("groupRef", element.info().group_ref().map(|id| id.to_string()));
        writer
    }

    fn groups(&self) -> Element {
        let mut list = Element::new("Groups");
        for group in draw_order(self.model.groups()) {
            list.push_child(self.group(group));
        }
        list
    }

    fn group(&self, group: &Group) -> Element {
        let mut element = self.graph_element("Group", group);
        element
            .set_non_default("type", group.group_type().as_str())
            .set_optional("textLabel", group.text_label());
        if let Some(xref) = group.xref() {
            element.child(self.xref(xref));
        }
        element.child(self.graphics("Group.Graphics", group.graphics(), group.z_order()));
        let mut element = element.finish();
        self.comment_group(&mut element, group.comment_group());
        element
    }

    fn labels(&self) -> Element {
        let mut list = Element::new("Labels");
        for label in draw_order(self.model.labels()) {
            list.push_child(self.label(label));
        }
        list
    }

    fn label(&self, label: &Label) -> Element {
        let mut element = self.graph_element("Label", label);
        element
            .set("textLabel", label.text_label())
            .set_optional("href", label.href())
            .child(self.graphics("Label.Graphics", label.graphics(), label.z_order()));
        let mut element = element.finish();
        self.comment_group(&mut element, label.comment_group());
        element
    }

    fn shapes(&self) -> Element {
        let mut list = Element::new("Shapes");
        for shape in draw_order(self.model.shapes()) {
            list.push_child(self.shape(shape));
        }
        list
    }

    fn shape(&self, shape: &Shape) -> Element {
        let mut element = self.graph_element("Shape", shape);
        element
            .set_optional("textLabel", shape.text_label())
            .child(self.graphics("Shape.Graphics", shape.graphics(), shape.z_order()));
        let mut element = element.finish();
        self.comment_group(&mut element, shape.comment_group());
        element
    }

    fn data_nodes(&self) -> Element {
        let mut list = Element::new("DataNodes");
        for node in draw_order(self.model.data_nodes()) {
            list.push_child(self.data_node(node));
        }
        list
    }

    fn data_node(&self, node: &DataNode) -> Element {
        let mut element = self.graph_element("DataNode", node);
        element
            .set("textLabel", node.text_label())
            .set_non_default("type", node.node_type().as_str())
            .set_optional("aliasRef", node.alias_ref().map(|id| id.to_string()));
        if let Some(xref) = node.xref() {
            element.child(self.xref(xref));
        }
        if !node.states().is_empty() {
            let mut states = Element::new("States");
            for state in node.states() {
                states.push_child(self.state(state));
            }
            element.child(states);
        }
        element.child(self.graphics("DataNode.Graphics", node.graphics(), node.z_order()));
        let mut element = element.finish();
        self.comment_group(&mut element, node.comment_group());
        element
    }

    fn state(&self, state: &State) -> Element {
        let mut element = self.element("State", "State");
        element
            .set("elementId", state.element_id().to_string())
            .set("textLabel", state.text_label())
            .set_non_default("type", state.state_type().as_str());
        if let Some(xref) = state.xref() {
            element.child(self.xref(xref));
        }

        // The state's draw order follows its data node and is not written.
        let mut graphics = self.element("Graphics", "State.Graphics");
        graphics
            .set_number("relX", state.rel_x())
            .set_number("relY", state.rel_y())
            .set_number("width", state.size().width())
            .set_number("height", state.size().height());
        font_attributes(&mut graphics, state.font());
        style_attributes(&mut graphics, state.shape_style());
        element.child(graphics.finish());

        let mut element = element.finish();
        self.comment_group(&mut element, state.comment_group());
        element
    }

    // ========================================================================
    // Lines
    // ========================================================================

    fn lines(&self, list_name: &str) -> Element {
        let mut list = Element::new(list_name);
        if list_name == "Interactions" {
            for interaction in draw_order(self.model.interactions()) {
                let mut element = self.line("Interaction", interaction.line());
                if let Some(xref) = interaction.xref() {
                    element.child(self.xref(xref));
                }
                let mut element = self.finish_line(element, "Interaction.Graphics", interaction.line());
                self.comment_group(&mut element, interaction.comment_group());
                list.push_child(element);
            }
        } else {
            for line in draw_order(self.model.graphical_lines()) {
                let element = self.line("GraphicalLine", line.line());
                let mut element = self.finish_line(element, "GraphicalLine.Graphics", line.line());
                self.comment_group(&mut element, line.comment_group());
                list.push_child(element);
            }
        }
        list
    }

    fn line(&self, name: &str, line: &LineElement) -> AttributeWriter {
        self.graph_element(name, line)
    }

    /// Adds the waypoints and graphics after any xref.
    fn finish_line(&self, mut element: AttributeWriter, path: &'static str, line: &LineElement) -> Element {
        let mut waypoints = Element::new("Waypoints");
        for point in line.points() {
            let mut child = self.element("Point", "Point");
            child
                .set("elementId", point.element_id().to_string())
                .set_number("x", point.coordinate().x())
                .set_number("y", point.coordinate().y())
                .set_non_default("arrowHead", point.arrow_head().as_str());
            if let Some(link) = point.link() {
                child
                    .set("elementRef", link.target().to_string())
                    .set("relX", format_number(link.rel_x()))
                    .set("relY", format_number(link.rel_y()));
            }
            waypoints.push_child(child.finish());
        }
        for anchor in line.anchors() {
            let mut child = self.element("Anchor", "Anchor");
            child
                .set("elementId", anchor.element_id().to_string())
                .set("position", format_number(anchor.position()))
                .set_non_default("shapeType", anchor.shape_type().as_str());
            waypoints.push_child(child.finish());
        }
        element.child(waypoints);

        let style = line.line_style();
        let mut graphics = self.element("Graphics", path);
        graphics
            .set_color("lineColor", style.line_color())
            .set_non_default("lineStyle", style.line_style().as_str())
            .set_number("lineWidth", style.line_width())
            .set_non_default("connectorType", style.connector_type().as_str())
            .set("zOrder", line.z_order().to_string());
        element.child(graphics.finish());
        debug!(element_id:% = line.element_id(), points = line.points().len(); "Wrote line");
        element.finish()
    }
}

/// Attribute table path of a top-level element name.
fn element_path(name: &str) -> &'static str {
    match name {
        "Group" => "Group",
        "Label" => "Label",
        "Shape" => "Shape",
        "DataNode" => "DataNode",
        "Interaction" => "Interaction",
        _ => "GraphicalLine",
    }
}

fn font_attributes(element: &mut AttributeWriter, font: &FontProperty) {
    element
        .set_color("textColor", font.text_color())
        .set_non_default("fontName", font.font_name())
        .set_non_default("fontWeight", if font.bold() { "Bold" } else { "Normal" })
        .set_non_default("fontStyle", if font.italic() { "Italic" } else { "Normal" })
        .set_non_default(
            "fontDecoration",
            if font.underline() { "Underline" } else { "Normal" },
        )
        .set_non_default(
            "fontStrikethru",
            if font.strikethrough() { "Strikethru" } else { "Normal" },
        )
        .set_number("fontSize", font.font_size())
        .set_non_default("hAlign", font.h_align().as_str())
        .set_non_default("vAlign", font.v_align().as_str());
}

fn style_attributes(element: &mut AttributeWriter, style: &ShapeStyle) {
    element
        .set_color("borderColor", style.border_color())
        .set_non_default("borderStyle", style.border_style().as_str())
        .set_number("borderWidth", style.border_width())
        .set_color("fillColor", style.fill_color())
        .set_non_default("shapeType", style.shape_type().as_str())
        .set_number("rotation", style.rotation());
}

fn annotation_ref_element(annotation_ref: &AnnotationRef) -> Element {
    let mut element =
        Element::new("AnnotationRef").with_attribute("elementRef", annotation_ref.annotation().to_string());
    for citation_ref in annotation_ref.citation_refs() {
        element.push_child(citation_ref_element(citation_ref));
    }
    for evidence_ref in annotation_ref.evidence_refs() {
        element.push_child(evidence_ref_element(evidence_ref));
    }
    element
}

fn citation_ref_element(citation_ref: &CitationRef) -> Element {
    let mut element =
        Element::new("CitationRef").with_attribute("elementRef", citation_ref.citation().to_string());
    for annotation_ref in citation_ref.annotation_refs() {
        element.push_child(annotation_ref_element(annotation_ref));
    }
    element
}

fn evidence_ref_element(evidence_ref: &EvidenceRef) -> Element {
    Element::new("EvidenceRef").with_attribute("elementRef", evidence_ref.evidence().to_string())
}
