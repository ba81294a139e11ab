//! Integration tests for writing GPML2021 content as GPML2013a
//!
//! Everything the legacy schema cannot carry is reported as a warning and
//! the rest of the pathway must survive a read of the written document.

use gpml_codec::{
    GpmlVersion, Warning, WriteOutcome, read_str, validate::validate, write,
};
use gpml_core::{
    identifier::ElementId,
    model::{PathwayElement, PathwayModel},
    types::{LineStyleType, ShapeType},
    xref::PassthroughLookup,
};

const FIXTURE: &str = include_str!("../../../fixtures/current/insulin_signaling.gpml");

fn id(name: &str) -> ElementId {
    ElementId::new(name)
}

fn downgrade() -> (PathwayModel, WriteOutcome) {
    let mut model = read_str(FIXTURE).expect("current fixture should read").model;
    let written = write(&mut model, GpmlVersion::Legacy, &PassthroughLookup).expect("legacy write");
    (model, written)
}

fn features(warnings: &[Warning]) -> Vec<String> {
    warnings
        .iter()
        .filter_map(|warning| match warning {
            Warning::UnsupportedFeature { feature, .. } => Some(feature.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_reserved_keys_warn_exactly_once() {
    let (_, written) = downgrade();

    let reserved: Vec<(Option<ElementId>, &str)> = written
        .warnings
        .iter()
        .filter_map(|warning| match warning {
            Warning::ReservedProperty { element_id, key, .. } => Some((*element_id, key.as_str())),
            _ => None,
        })
        .collect();
    assert_eq!(reserved.len(), 2, "got {reserved:?}");
    assert!(reserved.contains(&(None, "org.pathvisio.CellularComponentProperty")));
    assert!(reserved.contains(&(Some(id("shp1")), "org.pathvisio.DoubleLineProperty")));
}

#[test]
fn test_unsupported_features_are_reported() {
    let (_, written) = downgrade();
    let features = features(&written.warnings);

    for expected in [
        "pathway xref",
        "background colour",
        "author details beyond names",
        "data node alias",
        "citation without xref",
        "annotation",
        "evidence",
        "annotation ref `ann1`",
        "group graphics",
    ] {
        assert!(
            features.iter().any(|feature| feature == expected),
            "missing `{expected}` in {features:?}"
        );
    }
}

#[test]
fn test_written_document_passes_validation() {
    let (_, written) = downgrade();
    validate(&written.document, GpmlVersion::Legacy).expect("legacy writer output is schema valid");
}

#[test]
fn test_generated_attributes_are_written() {
    let (_, written) = downgrade();
    let text = written.document.to_xml_string(2).unwrap();

    assert!(text.contains(r#"Key="org.pathvisio.CellularComponentProperty" Value="Nucleus""#));
    assert!(text.contains(r#"Key="org.pathvisio.DoubleLineProperty" Value="Double""#));
    assert!(text.contains(r#"ArrowHead="mim-binding""#));
    assert!(text.contains("<InfoBox"));
    assert!(text.contains("<bp:PublicationXref"));
    // The user property with a reserved key is not written for the shape.
    assert_eq!(text.matches("org.pathvisio.DoubleLineProperty").count(), 1);
}

#[test]
fn test_downgraded_document_reads_back() {
    let (_, written) = downgrade();
    let text = written.document.to_xml_string(2).unwrap();
    let model = read_str(&text).expect("legacy output should read").model;

    assert_eq!(model.pathway().title(), "Insulin signaling");
    let authors: Vec<&str> = model.pathway().authors().iter().map(|a| a.name()).collect();
    assert_eq!(authors, vec!["Ada Lovelace", "Alan Turing"]);

    let shape = model.shape(id("shp1")).unwrap();
    assert_eq!(shape.graphics().shape_style().shape_type(), &ShapeType::Nucleus);
    assert!(shape.comment_group().dynamic_properties().next().is_none());

    let interaction = model.interaction(id("int1")).unwrap().line();
    assert_eq!(interaction.line_style().line_style(), LineStyleType::Double);

    let outer = model.group(id("outer")).unwrap();
    assert!(outer.has_member(id("inner")));
    assert_eq!(model.data_node(id("ins")).unwrap().info().group_ref(), Some(id("inner")));
    assert_eq!(model.state(id("st1")).unwrap().data_node(), Some(id("insr")));

    // Only the citation with an xref becomes a publication.
    assert!(model.citation(id("cit1")).is_some());
    assert!(model.citation(id("cit2")).is_none());
    assert_eq!(model.annotations().count(), 0);
}

#[test]
fn test_legacy_fixture_round_trips_through_legacy() {
    let legacy = include_str!("../../../fixtures/legacy/insulin_signaling.gpml");
    let mut model = read_str(legacy).unwrap().model;
    let written = write(&mut model, GpmlVersion::Legacy, &PassthroughLookup).unwrap();
    assert!(
        written.warnings.is_empty(),
        "legacy content needs no warnings: {:?}",
        written.warnings
    );

    let text = written.document.to_xml_string(2).unwrap();
    let reread = read_str(&text).unwrap().model;
    let properties = reread.pathway().comment_group();
    assert_eq!(
        properties.dynamic_property("pathway_maintainer_gpml2013a"),
        Some("Grace Hopper")
    );
    assert_eq!(
        properties.dynamic_property("pathway_legend_center_y_gpml2013a"),
        Some("550.0")
    );
    assert_eq!(reread.data_nodes().count(), model.data_nodes().count());
    assert_eq!(reread.group(id("grp1")).unwrap().len(), 2);
}

/// Reads a GPML2021 document and writes it as GPML2013a.
fn downgrade_text(text: &str) -> WriteOutcome {
    let mut model = read_str(text).expect("document should read").model;
    write(&mut model, GpmlVersion::Legacy, &PassthroughLookup).expect("legacy write")
}

#[test]
fn test_double_borders_become_the_reserved_property() {
    let written = downgrade_text(
        r#"<Pathway xmlns="http://pathvisio.org/GPML/2021" title="Borders">
  <Graphics boardWidth="400" boardHeight="400"/>
  <Shapes>
    <Shape elementId="shp1">
      <Graphics centerX="100" centerY="100" width="50" height="50" borderStyle="Double" shapeType="Nucleus"/>
    </Shape>
  </Shapes>
  <DataNodes>
    <DataNode elementId="dn1" textLabel="TP53" type="GeneProduct">
      <Graphics centerX="200" centerY="100" width="60" height="20" borderStyle="Double"/>
    </DataNode>
  </DataNodes>
</Pathway>"#,
    );
    assert!(
        !written
            .warnings
            .iter()
            .any(|warning| matches!(warning, Warning::ReservedProperty { .. })),
        "got {:?}",
        written.warnings
    );
    validate(&written.document, GpmlVersion::Legacy).expect("double borders write valid GPML2013a");

    let text = written.document.to_xml_string(2).unwrap();
    assert!(!text.contains(r#"LineStyle="Double""#));
    assert_eq!(text.matches(r#"Key="org.pathvisio.DoubleLineProperty" Value="Double""#).count(), 2);

    let model = read_str(&text).expect("legacy output should read").model;
    let node = model.data_node(id("dn1")).unwrap();
    assert_eq!(node.graphics().shape_style().border_style(), LineStyleType::Double);
    let shape = model.shape(id("shp1")).unwrap().graphics().shape_style();
    assert_eq!(shape.border_style(), LineStyleType::Double);
    assert_eq!(shape.shape_type(), &ShapeType::Nucleus);
}

#[test]
fn test_second_colour_is_reported() {
    let written = downgrade_text(
        r#"<Pathway xmlns="http://pathvisio.org/GPML/2021" title="Colours">
  <Graphics boardWidth="400" boardHeight="400"/>
  <Labels>
    <Label elementId="lbl1" textLabel="Note">
      <Graphics centerX="50" centerY="50" width="40" height="20" borderColor="00ff00"/>
    </Label>
  </Labels>
  <Shapes>
    <Shape elementId="shp1" textLabel="Nucleus">
      <Graphics centerX="100" centerY="100" width="50" height="50" textColor="ff0000"/>
    </Shape>
    <Shape elementId="shp2">
      <Graphics centerX="200" centerY="100" width="50" height="50" textColor="ff0000"/>
    </Shape>
  </Shapes>
  <DataNodes>
    <DataNode elementId="dn1" textLabel="TP53" type="GeneProduct">
      <States>
        <State elementId="st1" textLabel="P">
          <Graphics relX="1" relY="1" width="10" height="10" borderColor="ff0000"/>
        </State>
      </States>
      <Graphics centerX="200" centerY="200" width="60" height="20" textColor="0000ff" borderColor="ff0000"/>
    </DataNode>
    <DataNode elementId="dn2" textLabel="MDM2" type="GeneProduct">
      <Graphics centerX="300" centerY="200" width="60" height="20" textColor="0000ff" borderColor="0000ff"/>
    </DataNode>
  </DataNodes>
</Pathway>"#,
    );

    let mut lost: Vec<(Option<ElementId>, String)> = written
        .warnings
        .iter()
        .filter_map(|warning| match warning {
            Warning::UnsupportedFeature { element_id, feature } if feature.ends_with("colour") => {
                Some((*element_id, feature.clone()))
            }
            _ => None,
        })
        .collect();
    lost.sort_by_key(|(element_id, _)| element_id.map(|id| id.to_string()));
    assert_eq!(
        lost,
        vec![
            (Some(id("dn1")), "border colour".to_string()),
            (Some(id("lbl1")), "border colour".to_string()),
            (Some(id("shp1")), "text colour".to_string()),
            (Some(id("st1")), "border colour".to_string()),
        ]
    );

    let text = written.document.to_xml_string(2).unwrap();
    let model = read_str(&text).unwrap().model;
    let node = model.data_node(id("dn1")).unwrap();
    assert_eq!(node.graphics().font().text_color(), node.graphics().shape_style().border_color());
}
