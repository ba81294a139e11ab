//! Integration tests for the PathwayModel registry
//!
//! These tests drive the public model API the way the readers do and check
//! that cross references survive additions and removals intact.

use std::sync::mpsc;

use gpml_core::{
    geometry::Coordinate,
    identifier::ElementId,
    model::{
        Annotation, AnnotationRef, Anchor, Citation, CitationRef, DataNode, Entity, EntityKind,
        Evidence, EvidenceRef, GraphicalLine, Group, Interaction, Label, LineElement, LinePoint,
        ModelError, ModelEvent, PathwayElement, PathwayModel, PointLink, RefOwner, ShapedGraphics,
        State,
    },
    types::{AnnotationType, DataNodeType, GroupType},
    xref::Xref,
};

fn graphics(x: f64, y: f64) -> ShapedGraphics {
    ShapedGraphics::new(Coordinate::new(x, y), 40.0, 20.0).unwrap()
}

fn data_node(id: &str) -> DataNode {
    DataNode::new(ElementId::new(id), id, DataNodeType::GeneProduct, graphics(100.0, 100.0))
}

fn two_point_line(id: &str) -> LineElement {
    LineElement::new(ElementId::new(id))
        .with_point(LinePoint::new(
            ElementId::new(&format!("{id}_p1")),
            Coordinate::new(0.0, 0.0),
        ))
        .with_point(LinePoint::new(
            ElementId::new(&format!("{id}_p2")),
            Coordinate::new(50.0, 0.0),
        ))
}

#[test]
fn test_add_rejects_duplicate_ids() {
    let mut model = PathwayModel::default();
    model.add(data_node("dup_a")).unwrap();

    let err = model
        .add(Label::new(ElementId::new("dup_a"), "text", graphics(0.0, 0.0)))
        .unwrap_err();
    assert_eq!(err, ModelError::DuplicateId(ElementId::new("dup_a")));
    assert_eq!(model.kind_of(ElementId::new("dup_a")), Some(EntityKind::DataNode));
}

#[test]
fn test_add_is_atomic_when_a_child_id_is_taken() {
    let mut model = PathwayModel::default();
    model.add(data_node("atomic_taken")).unwrap();

    let node = data_node("atomic_owner")
        .with_state(State::new(ElementId::new("atomic_taken"), "P", 1.0, 0.0).unwrap());
    assert!(matches!(model.add(node), Err(ModelError::DuplicateId(_))));
    assert!(!model.contains(ElementId::new("atomic_owner")));
    assert_eq!(model.len(), 1);
}

#[test]
fn test_states_points_and_anchors_share_the_id_space() {
    let mut model = PathwayModel::default();
    let node = model.add(data_node("space_n")).unwrap();
    let line = model
        .add(Interaction::new(two_point_line("space_l")))
        .unwrap();

    let state = State::new(ElementId::new("space_s"), "P", -1.0, 1.0).unwrap();
    model.add_state(node, state).unwrap();
    model
        .add_anchor(line, Anchor::new(ElementId::new("space_a"), 0.5).unwrap())
        .unwrap();

    let clash = Anchor::new(ElementId::new("space_s"), 0.2).unwrap();
    assert!(matches!(model.add_anchor(line, clash), Err(ModelError::DuplicateId(_))));

    assert_eq!(model.kind_of(ElementId::new("space_s")), Some(EntityKind::State));
    assert_eq!(model.kind_of(ElementId::new("space_l_p2")), Some(EntityKind::LinePoint));
    assert_eq!(model.owning_line(ElementId::new("space_a")), Some(line));
    assert_eq!(
        model.state(ElementId::new("space_s")).and_then(State::data_node),
        Some(node)
    );
}

#[test]
fn test_group_membership_rules() {
    let mut model = PathwayModel::default();
    let node = model.add(data_node("grp_n")).unwrap();
    let g1 = model.add(Group::new(ElementId::new("grp_g1"), GroupType::Group)).unwrap();
    let g2 = model.add(Group::new(ElementId::new("grp_g2"), GroupType::Complex)).unwrap();

    model.group_add_member(g1, node).unwrap();
    // Repeating the same membership is a no-op.
    model.group_add_member(g1, node).unwrap();
    assert_eq!(model.group(g1).unwrap().len(), 1);

    assert!(matches!(
        model.group_add_member(g2, node),
        Err(ModelError::GroupMembership(_))
    ));
    assert!(matches!(
        model.group_add_member(g1, g1),
        Err(ModelError::GroupMembership(_))
    ));

    model.group_add_member(g2, g1).unwrap();
    assert!(matches!(
        model.group_add_member(g1, g2),
        Err(ModelError::GroupMembership(_))
    ));

    model.group_remove_member(g1, node).unwrap();
    assert_eq!(model.element_info(node).unwrap().group_ref(), None);
    assert!(matches!(
        model.group_remove_member(g1, node),
        Err(ModelError::GroupMembership(_))
    ));
}

#[test]
fn test_states_cannot_be_grouped() {
    let mut model = PathwayModel::default();
    let node = model
        .add(data_node("sg_n").with_state(State::new(ElementId::new("sg_s"), "P", 0.0, 0.0).unwrap()))
        .unwrap();
    let group = model.add(Group::new(ElementId::new("sg_g"), GroupType::Group)).unwrap();

    assert!(model.group_add_member(group, node).is_ok());
    assert!(matches!(
        model.group_add_member(group, ElementId::new("sg_s")),
        Err(ModelError::GroupMembership(_))
    ));
}

#[test]
fn test_removing_a_group_releases_members_and_aliases() {
    let mut model = PathwayModel::default();
    let member = model.add(data_node("rg_member")).unwrap();
    let alias = model.add(data_node("rg_alias")).unwrap();
    let group = model.add(Group::new(ElementId::new("rg_g"), GroupType::Group)).unwrap();

    model.group_add_member(group, member).unwrap();
    model.set_alias_ref(alias, Some(group)).unwrap();

    let removed = model.remove(group).unwrap();
    assert_eq!(removed.kind(), EntityKind::Group);
    assert!(model.contains(member));
    assert_eq!(model.element_info(member).unwrap().group_ref(), None);
    assert_eq!(model.data_node(alias).unwrap().alias_ref(), None);
}

#[test]
fn test_alias_target_must_be_a_group() {
    let mut model = PathwayModel::default();
    let a = model.add(data_node("alias_a")).unwrap();
    let b = model.add(data_node("alias_b")).unwrap();

    assert!(matches!(
        model.set_alias_ref(a, Some(b)),
        Err(ModelError::InvalidReference { .. })
    ));
}

#[test]
fn test_removing_a_target_clears_point_links() {
    let mut model = PathwayModel::default();
    let node = model
        .add(data_node("pl_n").with_state(State::new(ElementId::new("pl_s"), "P", 1.0, 1.0).unwrap()))
        .unwrap();
    let line = model
        .add(GraphicalLine::new(two_point_line("pl_l")))
        .unwrap();
    let start = ElementId::new("pl_l_p1");
    let end = ElementId::new("pl_l_p2");

    model
        .set_point_link(start, Some(PointLink::new(node, 0.0, 1.0)))
        .unwrap();
    model
        .set_point_link(end, Some(PointLink::new(ElementId::new("pl_s"), 0.0, 0.0)))
        .unwrap();

    model.remove(node).unwrap();
    assert!(!model.contains(ElementId::new("pl_s")));

    let line = model.line_element(line).unwrap();
    assert!(line.points().iter().all(|p| p.link().is_none()));
}

#[test]
fn test_point_link_target_must_be_linkable() {
    let mut model = PathwayModel::default();
    let first = model.add(Interaction::new(two_point_line("lk_a"))).unwrap();
    model.add(Interaction::new(two_point_line("lk_b"))).unwrap();

    let err = model
        .set_point_link(ElementId::new("lk_b_p1"), Some(PointLink::new(first, 0.0, 0.0)))
        .unwrap_err();
    assert!(matches!(err, ModelError::InvalidReference { .. }));

    let anchor = model
        .add_anchor(first, Anchor::new(ElementId::new("lk_a_anchor"), 0.5).unwrap())
        .unwrap();
    model
        .set_point_link(ElementId::new("lk_b_p1"), Some(PointLink::new(anchor, 0.0, 0.0)))
        .unwrap();

    // Removing the owning line removes the anchor and clears the link to it.
    model.remove(first).unwrap();
    let point = model.line_point(ElementId::new("lk_b_p1")).unwrap();
    assert!(point.link().is_none());
}

#[test]
fn test_remove_empty_groups_cascades_to_parents() {
    let mut model = PathwayModel::default();
    let node = model.add(data_node("prune_n")).unwrap();
    let inner = model.add(Group::new(ElementId::new("prune_inner"), GroupType::Group)).unwrap();
    let outer = model.add(Group::new(ElementId::new("prune_outer"), GroupType::Group)).unwrap();
    let kept = model.add(Group::new(ElementId::new("prune_kept"), GroupType::Group)).unwrap();
    let keeper = model.add(data_node("prune_keeper")).unwrap();

    model.group_add_member(inner, node).unwrap();
    model.group_add_member(outer, inner).unwrap();
    model.group_add_member(kept, keeper).unwrap();

    model.remove(node).unwrap();
    let removed = model.remove_empty_groups();

    assert_eq!(removed, vec![inner, outer]);
    assert!(model.contains(kept));
    assert!(model.remove_empty_groups().is_empty());
}

#[test]
fn test_refs_are_validated_and_stripped() {
    let mut model = PathwayModel::default();
    let node = model.add(data_node("refs_n")).unwrap();
    let annotation = model
        .add(Annotation::new(ElementId::new("refs_a"), "cell cycle", AnnotationType::Ontology))
        .unwrap();
    let citation = model
        .add(Citation::new(ElementId::new("refs_c")).with_xref(Xref::new("123", "PubMed")))
        .unwrap();
    let evidence = model
        .add(Evidence::new(ElementId::new("refs_e"), Xref::new("ECO:0000269", "ECO")))
        .unwrap();

    let bad = AnnotationRef::new(citation);
    assert!(matches!(
        model.attach_annotation_ref(RefOwner::Element(node), bad),
        Err(ModelError::InvalidReference { .. })
    ));

    let annotation_ref = AnnotationRef::new(annotation)
        .with_citation_ref(CitationRef::new(citation))
        .with_evidence_ref(EvidenceRef::new(evidence));
    model
        .attach_annotation_ref(RefOwner::Element(node), annotation_ref)
        .unwrap();
    model
        .attach_citation_ref(RefOwner::Pathway, CitationRef::new(citation))
        .unwrap();

    model.remove(citation).unwrap();

    assert!(model.pathway().comment_group().citation_refs().is_empty());
    let refs = model.comment_group(RefOwner::Element(node)).unwrap().annotation_refs();
    assert_eq!(refs.len(), 1);
    assert!(refs[0].citation_refs().is_empty());
    assert_eq!(refs[0].evidence_refs().len(), 1);

    let detached = model
        .detach_annotation_ref(RefOwner::Element(node), annotation)
        .unwrap();
    assert_eq!(detached.annotation(), annotation);
    assert!(model.annotation(annotation).is_some());
}

#[test]
fn test_removed_entity_is_detached() {
    let mut model = PathwayModel::default();
    let node = model.add(data_node("det_n")).unwrap();
    let group = model.add(Group::new(ElementId::new("det_g"), GroupType::Group)).unwrap();
    model.group_add_member(group, node).unwrap();

    let Entity::DataNode(removed) = model.remove(node).unwrap() else {
        panic!("expected a data node");
    };
    assert!(removed.info().group_ref().is_none());
    assert!(model.group(group).unwrap().is_empty());

    // The detached node can be registered again.
    model.add(removed).unwrap();
    assert!(model.contains(node));
}

#[test]
fn test_validate_line_elements() {
    let mut model = PathwayModel::default();
    model.add(Interaction::new(two_point_line("val_ok"))).unwrap();
    assert!(model.validate_line_elements().is_ok());

    let short = LineElement::new(ElementId::new("val_short")).with_point(LinePoint::new(
        ElementId::new("val_short_p1"),
        Coordinate::new(1.0, 1.0),
    ));
    model.add(GraphicalLine::new(short)).unwrap();

    assert_eq!(
        model.validate_line_elements(),
        Err(ModelError::InvalidLine {
            id: ElementId::new("val_short"),
            points: 1,
        })
    );
}

#[test]
fn test_fitted_group_bounds_include_nested_groups() {
    let mut model = PathwayModel::default();
    let a = model
        .add(DataNode::new(ElementId::new("fit_a"), "a", DataNodeType::Protein, graphics(50.0, 50.0)))
        .unwrap();
    let b = model
        .add(DataNode::new(ElementId::new("fit_b"), "b", DataNodeType::Protein, graphics(150.0, 90.0)))
        .unwrap();
    let inner = model.add(Group::new(ElementId::new("fit_inner"), GroupType::Group)).unwrap();
    let outer = model.add(Group::new(ElementId::new("fit_outer"), GroupType::Group)).unwrap();

    model.group_add_member(inner, b).unwrap();
    model.group_add_member(outer, a).unwrap();
    model.group_add_member(outer, inner).unwrap();

    let bounds = model.fitted_group_bounds(outer, 8.0).unwrap();
    assert_eq!(bounds.min_x(), 30.0 - 8.0);
    assert_eq!(bounds.min_y(), 40.0 - 8.0);
    assert_eq!(bounds.max_x(), 170.0 + 16.0);
    assert_eq!(bounds.max_y(), 100.0 + 16.0);
}

#[test]
fn test_observer_receives_structural_events() {
    let (sender, receiver) = mpsc::channel();
    let mut model = PathwayModel::default();
    model.set_observer(Some(Box::new(sender)));

    let node = model.add(data_node("obs_n")).unwrap();
    let group = model.add(Group::new(ElementId::new("obs_g"), GroupType::Group)).unwrap();
    model.group_add_member(group, node).unwrap();
    model.remove(node).unwrap();

    let events: Vec<ModelEvent> = receiver.try_iter().collect();
    assert_eq!(
        events,
        vec![
            ModelEvent::Added { id: node, kind: EntityKind::DataNode },
            ModelEvent::Added { id: group, kind: EntityKind::Group },
            ModelEvent::MemberAdded { group, member: node },
            ModelEvent::MemberRemoved { group, member: node },
            ModelEvent::Removed { id: node, kind: EntityKind::DataNode },
        ]
    );
}
