//! Integration tests for the GPML2013a reader
//!
//! The fixture exercises the legacy quirks: missing GraphIds, GroupId
//! membership, top-level states, Biopax citations and reserved attributes.

use std::f64::consts::FRAC_PI_2;

use float_cmp::approx_eq;

use gpml_codec::{ConverterError, GpmlVersion, ReadOutcome, Warning, read_str};
use gpml_core::{
    identifier::ElementId,
    model::{PathwayElement, PathwayModel},
    types::{ArrowHeadType, DataNodeType, GroupType, LineStyleType, ShapeType, StateType},
};

const FIXTURE: &str = include_str!("../../../fixtures/legacy/insulin_signaling.gpml");

fn read_fixture() -> ReadOutcome {
    read_str(FIXTURE).expect("legacy fixture should read")
}

fn id(name: &str) -> ElementId {
    ElementId::new(name)
}

fn model() -> PathwayModel {
    read_fixture().model
}

#[test]
fn test_pathway_metadata() {
    let model = model();
    let pathway = model.pathway();

    assert_eq!(pathway.title(), "Insulin signaling");
    assert_eq!(pathway.organism(), Some("Homo sapiens"));
    assert_eq!(pathway.source(), Some("WikiPathways"));
    assert_eq!(pathway.license(), Some("CC0"));
    assert_eq!(
        pathway.description(),
        Some("Binding of insulin to its receptor starts a phosphorylation cascade.")
    );
    let authors: Vec<&str> = pathway.authors().iter().map(|author| author.name()).collect();
    assert_eq!(authors, vec!["Ada Lovelace", "Alan Turing"]);
    assert!(approx_eq!(f64, pathway.board_size().width(), 800.0));
    assert!(approx_eq!(f64, pathway.infobox().y(), 20.0));

    // The description comment is not repeated as a plain comment.
    let comments = pathway.comment_group().comments();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].source(), Some("curator"));
    assert_eq!(pathway.comment_group().dynamic_property("reviewed"), Some("yes"));
}

#[test]
fn test_legacy_only_attributes_become_properties() {
    let model = model();
    let properties = model.pathway().comment_group();

    assert_eq!(
        properties.dynamic_property("pathway_maintainer_gpml2013a"),
        Some("Grace Hopper")
    );
    assert_eq!(
        properties.dynamic_property("pathway_last_modified_gpml2013a"),
        Some("2024-01-01")
    );
    assert_eq!(
        properties.dynamic_property("pathway_legend_center_x_gpml2013a"),
        Some("700.0")
    );
    assert_eq!(properties.dynamic_property("pathway_email_gpml2013a"), None);
}

#[test]
fn test_data_nodes_and_xrefs() {
    let model = model();

    let ins = model.data_node(id("ins")).expect("INS is read");
    assert_eq!(ins.node_type(), &DataNodeType::Protein);
    let xref = ins.xref().expect("INS has an xref");
    assert_eq!(xref.identifier(), "P01308");
    assert_eq!(xref.data_source(), "UniProt");
    assert_eq!(ins.z_order(), 32768);
    assert!(approx_eq!(f64, ins.graphics().font().font_size(), 10.0));
    assert_eq!(ins.comment_group().comments()[0].text(), "Ligand.");

    let glucose = model
        .data_nodes()
        .find(|node| node.text_label() == "Glucose")
        .expect("Glucose is read without a GraphId");
    assert_eq!(glucose.node_type(), &DataNodeType::Metabolite);
    assert!(glucose.xref().is_none(), "empty xref is dropped");
}

#[test]
fn test_generated_ids_are_reported_once() {
    let outcome = read_fixture();

    // Glucose plus the four line points carry no GraphId.
    let generated: Vec<&Warning> = outcome
        .notes
        .iter()
        .filter(|note| note.to_string().contains("generated ids"))
        .collect();
    assert_eq!(generated.len(), 1);
    assert!(generated[0].to_string().contains("5 elements"));
}

#[test]
fn test_generated_ids_avoid_later_graph_ids() {
    let text = r#"<Pathway xmlns="http://pathvisio.org/GPML/2013a" Name="Ids">
        <DataNode TextLabel="first">
          <Graphics CenterX="10" CenterY="10" Width="10" Height="10"/>
        </DataNode>
        <DataNode TextLabel="second" GraphId="id0">
          <Graphics CenterX="30" CenterY="10" Width="10" Height="10"/>
        </DataNode>
        <DataNode TextLabel="third" GraphId="id1">
          <Graphics CenterX="50" CenterY="10" Width="10" Height="10"/>
        </DataNode>
      </Pathway>"#;

    let model = read_str(text).unwrap().model;
    assert_eq!(model.data_node(id("id0")).unwrap().text_label(), "second");
    assert_eq!(model.data_node(id("id1")).unwrap().text_label(), "third");
    let first = model
        .data_nodes()
        .find(|node| node.text_label() == "first")
        .unwrap();
    assert_ne!(first.element_id(), id("id0"));
    assert_ne!(first.element_id(), id("id1"));
}

#[test]
fn test_groups_resolve_through_group_id() {
    let model = model();

    let group = model.group(id("grp1")).expect("populated group is kept");
    assert_eq!(group.group_type(), &GroupType::Complex);
    assert_eq!(group.text_label(), Some("Receptor complex"));
    assert!(group.has_member(id("ins")));
    assert!(group.has_member(id("insr")));
    assert_eq!(model.data_node(id("ins")).unwrap().info().group_ref(), Some(id("grp1")));

    assert!(model.group(id("grp2")).is_none(), "empty group is pruned");
}

#[test]
fn test_group_graphics_are_fitted() {
    let model = model();
    let graphics = model.group(id("grp1")).unwrap().graphics();

    // Members span x 60..140 and y 90..210, grown by the padding.
    assert!(approx_eq!(f64, graphics.center().x(), 100.0));
    assert!(approx_eq!(f64, graphics.center().y(), 150.0));
    assert!(approx_eq!(f64, graphics.size().width(), 96.0));
    assert!(approx_eq!(f64, graphics.size().height(), 136.0));
}

#[test]
fn test_states_attach_to_their_data_node() {
    let outcome = read_fixture();
    let model = outcome.model;

    let insr = model.data_node(id("insr")).unwrap();
    assert_eq!(insr.states().len(), 1);
    let state = model.state(id("st1")).expect("state is registered");
    assert_eq!(state.data_node(), Some(id("insr")));
    assert_eq!(state.state_type(), &StateType::from("PhosphoSite"));
    assert_eq!(state.shape_style().shape_type(), &ShapeType::Oval);

    assert!(model.state(id("st2")).is_none());
    assert!(
        outcome
            .notes
            .iter()
            .any(|note| note.element_id() == Some(id("st2")))
    );
}

#[test]
fn test_lines_points_and_anchors() {
    let model = model();

    let interaction = model.interaction(id("int1")).expect("interaction is read");
    let line = interaction.line();
    assert_eq!(line.line_style().line_style(), LineStyleType::Double);
    assert!(approx_eq!(f64, line.line_style().line_width(), 2.0));
    assert!(interaction.comment_group().dynamic_properties().next().is_none());

    let start = line.start_point().unwrap().link().expect("start is linked");
    assert_eq!(start.target(), id("ins"));
    assert!(approx_eq!(f64, start.rel_y(), 1.0));
    let end = line.end_point().unwrap();
    assert_eq!(end.arrow_head(), &ArrowHeadType::Binding);
    assert_eq!(end.link().unwrap().target(), id("insr"));
    assert_eq!(model.owning_line(id("anc1")), Some(id("int1")));

    let graphical = model.graphical_line(id("gl1")).unwrap().line();
    assert_eq!(graphical.line_style().line_style(), LineStyleType::Dashed);
    assert_eq!(graphical.start_point().unwrap().link().unwrap().target(), id("anc1"));
    assert!(graphical.end_point().unwrap().link().is_none(), "dangling GraphRef stays unset");
    assert_eq!(graphical.end_point().unwrap().arrow_head(), &ArrowHeadType::Directed);
}

#[test]
fn test_labels_and_shapes() {
    let model = model();

    let label = model.label(id("lbl1")).unwrap();
    assert_eq!(label.href(), Some("https://example.org/membrane"));
    assert!(label.graphics().font().italic());

    let nucleus = model.shape(id("shp1")).unwrap();
    let style = nucleus.graphics().shape_style();
    assert_eq!(style.shape_type(), &ShapeType::Nucleus);
    assert!(approx_eq!(f64, style.rotation(), FRAC_PI_2));
    assert!(approx_eq!(f64, style.border_width(), 3.0));
    assert!(nucleus.comment_group().dynamic_properties().next().is_none());

    let er = model.shape(id("shp2")).unwrap();
    assert_eq!(er.graphics().shape_style().shape_type(), &ShapeType::EndoplasmicReticulum);
}

#[test]
fn test_biopax_publications_become_citations() {
    let outcome = read_fixture();
    let model = &outcome.model;

    let citation = model.citation(id("pub1")).expect("publication is a citation");
    let xref = citation.xref().unwrap();
    assert_eq!(xref.identifier(), "12345678");
    assert_eq!(xref.data_source(), "PubMed");
    assert_eq!(model.citations().count(), 1, "publication without ID is skipped");

    let refs = model.data_node(id("ins")).unwrap().comment_group().citation_refs();
    assert_eq!(refs.len(), 1);
    assert_eq!(refs[0].citation(), id("pub1"));
    assert_eq!(model.pathway().comment_group().citation_refs().len(), 1);
    assert!(model.pathway().legacy_biopax().is_none());

    let details: Vec<String> = outcome.notes.iter().map(ToString::to_string).collect();
    assert!(details.iter().any(|note| note.contains("publication fields dropped: TITLE")));
    assert!(details.iter().any(|note| note.contains("`pub2` without ID")));
}

#[test]
fn test_missing_name_is_an_error() {
    let text = r#"<Pathway xmlns="http://pathvisio.org/GPML/2013a"/>"#;
    let err = read_str(text).unwrap_err();
    assert!(matches!(
        err,
        ConverterError::MissingRequiredAttribute { ref attribute, .. } if attribute == "Name"
    ));
}

#[test]
fn test_gpml2010a_is_read_as_legacy() {
    let text = r#"<Pathway xmlns="http://pathvisio.org/GPML/2010a" Name="Old"/>"#;
    let document = gpml_codec::Document::parse(text).unwrap();
    assert_eq!(GpmlVersion::detect(&document).unwrap(), GpmlVersion::Legacy);
    assert_eq!(read_str(text).unwrap().model.pathway().title(), "Old");
}

#[test]
fn test_double_borders_on_shaped_elements() {
    let text = r#"<Pathway xmlns="http://pathvisio.org/GPML/2013a" Name="Borders">
  <DataNode TextLabel="TP53" GraphId="dn1" Type="GeneProduct">
    <Attribute Key="org.pathvisio.DoubleLineProperty" Value="Double" />
    <Graphics CenterX="100.0" CenterY="100.0" Width="80.0" Height="20.0" />
  </DataNode>
  <State GraphId="st1" GraphRef="dn1" TextLabel="P">
    <Attribute Key="org.pathvisio.DoubleLineProperty" Value="Double" />
    <Graphics RelX="1.0" RelY="1.0" Width="10.0" Height="10.0" />
  </State>
  <Label TextLabel="Note" GraphId="lbl1">
    <Attribute Key="org.pathvisio.DoubleLineProperty" Value="Double" />
    <Graphics CenterX="50.0" CenterY="50.0" Width="40.0" Height="20.0" />
  </Label>
  <Shape GraphId="shp1">
    <Attribute Key="org.pathvisio.DoubleLineProperty" Value="Double" />
    <Graphics CenterX="300.0" CenterY="300.0" Width="50.0" Height="50.0" ShapeType="Rectangle" LineStyle="Broken" />
  </Shape>
  <Shape GraphId="shp2">
    <Graphics CenterX="400.0" CenterY="300.0" Width="50.0" Height="50.0" ShapeType="Rectangle" />
  </Shape>
</Pathway>"#;
    let outcome = read_str(text).expect("document should read");
    let model = &outcome.model;

    let node = model.data_node(id("dn1")).unwrap();
    assert_eq!(node.graphics().shape_style().border_style(), LineStyleType::Double);
    assert!(node.comment_group().dynamic_properties().next().is_none());
    assert_eq!(model.state(id("st1")).unwrap().shape_style().border_style(), LineStyleType::Double);
    let label = model.label(id("lbl1")).unwrap();
    assert_eq!(label.graphics().shape_style().border_style(), LineStyleType::Double);
    let double = model.shape(id("shp1")).unwrap();
    assert_eq!(double.graphics().shape_style().border_style(), LineStyleType::Double);
    let single = model.shape(id("shp2")).unwrap();
    assert_eq!(single.graphics().shape_style().border_style(), LineStyleType::Solid);

    assert!(
        outcome
            .notes
            .iter()
            .all(|note| !matches!(note, Warning::ReservedProperty { .. })),
        "double borders are read, not dropped: {:?}",
        outcome.notes
    );
}

#[test]
fn test_reserved_properties_without_meaning_are_reported() {
    let text = r#"<Pathway xmlns="http://pathvisio.org/GPML/2013a" Name="Reserved">
  <Attribute Key="org.pathvisio.DoubleLineProperty" Value="Double" />
  <DataNode TextLabel="Mito" GraphId="dn1" Type="GeneProduct">
    <Attribute Key="org.pathvisio.CellularComponentProperty" Value="Mitochondria" />
    <Attribute Key="note" Value="kept" />
    <Graphics CenterX="100.0" CenterY="100.0" Width="80.0" Height="20.0" />
  </DataNode>
  <Interaction GraphId="int1">
    <Attribute Key="org.pathvisio.CellularComponentProperty" Value="Nucleus" />
    <Graphics>
      <Point X="0.0" Y="0.0" />
      <Point X="10.0" Y="0.0" />
    </Graphics>
  </Interaction>
</Pathway>"#;
    let outcome = read_str(text).expect("document should read");

    let reserved: Vec<(Option<ElementId>, &str)> = outcome
        .notes
        .iter()
        .filter_map(|note| match note {
            Warning::ReservedProperty { element_id, key, .. } => Some((*element_id, key.as_str())),
            _ => None,
        })
        .collect();
    assert_eq!(
        reserved,
        vec![
            (None, "org.pathvisio.DoubleLineProperty"),
            (Some(id("dn1")), "org.pathvisio.CellularComponentProperty"),
            (Some(id("int1")), "org.pathvisio.CellularComponentProperty"),
        ]
    );

    let node = outcome.model.data_node(id("dn1")).unwrap();
    assert_eq!(node.graphics().shape_style().shape_type(), &ShapeType::Rectangle);
    assert_eq!(node.comment_group().dynamic_property("note"), Some("kept"));
    assert!(outcome.model.pathway().comment_group().dynamic_properties().next().is_none());
}

#[test]
fn test_double_is_not_a_legacy_line_style() {
    let text = r#"<Pathway xmlns="http://pathvisio.org/GPML/2013a" Name="Styles">
  <Shape GraphId="shp1">
    <Graphics CenterX="10.0" CenterY="10.0" Width="5.0" Height="5.0" LineStyle="Double" />
  </Shape>
</Pathway>"#;
    let err = read_str(text).unwrap_err();
    assert!(matches!(
        err,
        ConverterError::MalformedValue { ref attribute, ref value, .. }
            if attribute == "LineStyle" && value == "Double"
    ));
}
