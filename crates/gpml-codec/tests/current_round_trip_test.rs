//! Integration tests for the GPML2021 reader and writer
//!
//! The fixture is read, written back as GPML2021 text and read again; the
//! second model must carry everything the first one did.

use float_cmp::approx_eq;

use gpml_codec::{
    ConverterError, GpmlVersion, ReadOutcome, read_str, validate::validate, write,
};
use gpml_core::{
    color::Color,
    geometry::Coordinate,
    identifier::ElementId,
    model::{
        Citation, DataNode, LineElement, LinePoint, PathwayElement, PathwayModel, ShapedGraphics,
    },
    types::{AnchorShapeType, AnnotationType, DataNodeType, GroupType, LineStyleType, ShapeType},
    xref::{PassthroughLookup, SourceAliases},
};

const FIXTURE: &str = include_str!("../../../fixtures/current/insulin_signaling.gpml");

fn id(name: &str) -> ElementId {
    ElementId::new(name)
}

fn read_fixture() -> ReadOutcome {
    read_str(FIXTURE).expect("current fixture should read")
}

/// Writes the model as GPML2021 text and reads it back.
fn round_trip(model: &mut PathwayModel) -> (String, PathwayModel) {
    let written = write(model, GpmlVersion::Current, &PassthroughLookup).expect("model should write");
    let text = written.document.to_xml_string(2).expect("document should serialise");
    let reread = read_str(&text).expect("written text should read");
    (text, reread.model)
}

#[test]
fn test_fixture_reads_without_notes() {
    let outcome = read_fixture();
    assert!(outcome.notes.is_empty(), "unexpected notes: {:?}", outcome.notes);
    assert_eq!(outcome.model.pathway().background_color(), Color::new("f0f0f0").unwrap());
}

#[test]
fn test_forward_group_ref_and_pruning() {
    let model = read_fixture().model;

    let outer = model.group(id("outer")).expect("outer group is kept");
    assert!(outer.has_member(id("inner")), "groupRef to a later group resolves");
    assert!(outer.has_member(id("glucose")));
    assert_eq!(model.group(id("inner")).unwrap().group_type(), &GroupType::Complex);
    assert!(model.group(id("vacant")).is_none(), "empty group is pruned");
}

#[test]
fn test_alias_and_dangling_point() {
    let model = read_fixture().model;

    assert_eq!(
        model.data_node(id("complex_alias")).unwrap().alias_ref(),
        Some(id("inner"))
    );
    assert!(model.line_point(id("p4")).unwrap().link().is_none());
    assert_eq!(
        model.line_point(id("p3")).unwrap().link().unwrap().target(),
        id("anc1")
    );
}

#[test]
fn test_round_trip_keeps_pathway_metadata() {
    let mut model = read_fixture().model;
    let (_, reread) = round_trip(&mut model);
    let pathway = reread.pathway();

    assert_eq!(pathway.title(), "Insulin signaling");
    assert_eq!(pathway.version(), Some("20240101"));
    assert_eq!(pathway.xref().unwrap().identifier(), "WP481");
    assert_eq!(pathway.background_color(), Color::new("f0f0f0").unwrap());

    let authors = pathway.authors();
    assert_eq!(authors.len(), 2);
    assert_eq!(authors[0].username(), Some("ada"));
    assert_eq!(authors[0].order(), Some(1));
    assert_eq!(authors[1].xref().unwrap().data_source(), "ORCID");

    let group = pathway.comment_group();
    assert_eq!(group.comments()[0].text(), "Checked against Reactome.");
    assert_eq!(
        group.dynamic_property("org.pathvisio.CellularComponentProperty"),
        Some("Nucleus")
    );
    assert_eq!(group.citation_refs()[0].citation(), id("cit1"));
}

#[test]
fn test_round_trip_keeps_annotations_and_nested_refs() {
    let mut model = read_fixture().model;
    let (_, reread) = round_trip(&mut model);

    let annotation = reread.annotation(id("ann1")).unwrap();
    assert_eq!(annotation.annotation_type(), &AnnotationType::Ontology);
    assert_eq!(annotation.xref().unwrap().identifier(), "PW:0000041");
    assert_eq!(reread.citation(id("cit2")).unwrap().url(), Some("https://example.org/review"));
    assert_eq!(
        reread.evidence(id("evi1")).unwrap().xref().data_source(),
        "Evidence & Conclusion Ontology"
    );

    let info = reread.data_node(id("ins")).unwrap().comment_group();
    assert_eq!(info.citation_refs().len(), 1);
    let annotation_ref = &info.annotation_refs()[0];
    assert_eq!(annotation_ref.annotation(), id("ann1"));
    assert_eq!(annotation_ref.citation_refs()[0].citation(), id("cit2"));
    assert_eq!(annotation_ref.evidence_refs()[0].evidence(), id("evi1"));
    assert_eq!(info.dynamic_property("reviewed"), Some("yes"));
}

#[test]
fn test_round_trip_keeps_graph_elements() {
    let mut model = read_fixture().model;
    let (_, reread) = round_trip(&mut model);

    let ins = reread.data_node(id("ins")).unwrap();
    assert_eq!(ins.node_type(), &DataNodeType::Protein);
    assert_eq!(ins.graphics().font().text_color(), Color::new("0000ff").unwrap());
    assert_eq!(ins.z_order(), 32768);
    assert_eq!(ins.info().group_ref(), Some(id("inner")));

    let state = reread.state(id("st1")).unwrap();
    assert!(approx_eq!(f64, state.rel_y(), -1.0));
    assert_eq!(state.comment_group().comments()[0].text(), "Tyrosine.");

    let shape = reread.shape(id("shp1")).unwrap();
    let style = shape.graphics().shape_style();
    assert_eq!(style.shape_type(), &ShapeType::Nucleus);
    assert!(approx_eq!(f64, style.rotation(), 1.5));
    assert!(style.fill_color().is_transparent());

    let interaction = reread.interaction(id("int1")).unwrap().line();
    assert_eq!(interaction.line_style().line_style(), LineStyleType::Double);
    assert_eq!(interaction.anchors()[0].shape_type(), &AnchorShapeType::Circle);
    assert_eq!(
        interaction.start_point().unwrap().link().unwrap().target(),
        id("ins")
    );
    assert!(reread.line_point(id("p4")).unwrap().link().is_none());
    assert_eq!(reread.group(id("inner")).unwrap().graphics().center(), Coordinate::new(100.0, 155.0));
}

#[test]
fn test_written_text_is_stable() {
    let mut model = read_fixture().model;
    let (first, mut reread) = round_trip(&mut model);
    let (second, _) = round_trip(&mut reread);
    assert_eq!(first, second);
}

#[test]
fn test_written_document_passes_validation() {
    let mut model = read_fixture().model;
    let written = write(&mut model, GpmlVersion::Current, &PassthroughLookup).unwrap();
    assert!(written.warnings.is_empty());
    validate(&written.document, GpmlVersion::Current).expect("writer output is schema valid");
}

#[test]
fn test_data_source_aliases_are_applied() {
    let mut model = read_fixture().model;
    let aliases: SourceAliases = [("Entrez Gene", "NCBI Gene")].into_iter().collect();
    let written = write(&mut model, GpmlVersion::Current, &aliases).unwrap();
    let text = written.document.to_xml_string(2).unwrap();

    assert!(text.contains(r#"dataSource="NCBI Gene""#));
    assert!(!text.contains(r#"dataSource="Entrez Gene""#));
    assert!(text.contains(r#"dataSource="UniProt""#));
}

#[test]
fn test_citation_without_xref_or_url_is_not_written() {
    let mut model = read_fixture().model;
    model.add(Citation::new(id("bare_citation"))).unwrap();

    for version in [GpmlVersion::Current, GpmlVersion::Legacy] {
        let err = write(&mut model, version, &PassthroughLookup).unwrap_err();
        assert!(matches!(
            err,
            ConverterError::UnresolvedRequiredReference { ref element_id, .. } if *element_id == id("bare_citation")
        ));
    }
}

#[test]
fn test_short_line_is_not_written() {
    let mut model = PathwayModel::default();
    let graphics = ShapedGraphics::new(Coordinate::new(10.0, 10.0), 20.0, 20.0).unwrap();
    model
        .add(DataNode::new(id("short_node"), "A", DataNodeType::GeneProduct, graphics))
        .unwrap();
    let line = LineElement::new(id("short_line")).with_point(LinePoint::new(
        id("short_line_p1"),
        Coordinate::new(0.0, 0.0),
    ));
    model.add(gpml_core::model::GraphicalLine::new(line)).unwrap();

    let err = write(&mut model, GpmlVersion::Current, &PassthroughLookup).unwrap_err();
    assert!(matches!(err, ConverterError::Model(_)));
}

#[test]
fn test_citation_without_xref_or_url_is_rejected_on_read() {
    let text = r#"<Pathway xmlns="http://pathvisio.org/GPML/2021" title="P">
        <Graphics boardWidth="10" boardHeight="10"/>
        <Citations><Citation elementId="c1"/></Citations>
      </Pathway>"#;
    let err = read_str(text).unwrap_err();
    assert!(matches!(err, ConverterError::UnresolvedRequiredReference { .. }));
}

#[test]
fn test_unknown_namespace_is_rejected() {
    let text = r#"<Pathway xmlns="http://example.org/not-gpml" title="P"/>"#;
    assert!(matches!(read_str(text), Err(ConverterError::UnknownFormat(_))));
}

#[test]
fn test_alias_written_as_element_ref_is_read() {
    let text = r#"<Pathway xmlns="http://pathvisio.org/GPML/2021" title="P">
        <Graphics boardWidth="400" boardHeight="400"/>
        <Groups>
          <Group elementId="g1" type="Complex">
            <Graphics centerX="50" centerY="50" width="80" height="40"/>
          </Group>
        </Groups>
        <DataNodes>
          <DataNode elementId="member" textLabel="A" type="Protein" groupRef="g1">
            <Graphics centerX="50" centerY="50" width="60" height="20"/>
          </DataNode>
          <DataNode elementId="alias" textLabel="Complex" type="Complex" elementRef="g1">
            <Graphics centerX="200" centerY="50" width="60" height="20"/>
          </DataNode>
        </DataNodes>
      </Pathway>"#;
    let mut model = read_str(text).expect("document should read").model;
    assert_eq!(model.data_node(id("alias")).unwrap().alias_ref(), Some(id("g1")));

    let (written, reread) = round_trip(&mut model);
    assert!(written.contains(r#"aliasRef="g1""#));
    assert_eq!(reread.data_node(id("alias")).unwrap().alias_ref(), Some(id("g1")));
}
