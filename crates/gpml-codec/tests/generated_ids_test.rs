//! Property tests for ids the GPML2013a reader generates
//!
//! Legacy documents may leave `GraphId` out on any element. Generated ids
//! must never take an id written elsewhere in the document, even one that
//! only appears further down.

use std::collections::HashSet;

use proptest::prelude::*;

use gpml_codec::read_str;
use gpml_core::{identifier::ElementId, model::PathwayElement};

// ===================
// Strategies
// ===================

/// Per node: `Some(n)` writes `GraphId="id{n:x}"`, `None` leaves it out.
/// The written ids use the same spelling as generated ones.
fn graph_ids_strategy() -> impl Strategy<Value = Vec<Option<u8>>> {
    prop::collection::vec(prop::option::of(0u8..12), 1..12).prop_map(|ids| {
        let mut seen = HashSet::new();
        ids.into_iter()
            .map(|id| id.filter(|n| seen.insert(*n)))
            .collect()
    })
}

fn document(graph_ids: &[Option<u8>]) -> String {
    let mut text = String::from(r#"<Pathway xmlns="http://pathvisio.org/GPML/2013a" Name="Generated">"#);
    for (index, graph_id) in graph_ids.iter().enumerate() {
        let attribute = graph_id
            .map(|n| format!(r#" GraphId="id{n:x}""#))
            .unwrap_or_default();
        text.push_str(&format!(
            r#"<DataNode TextLabel="node{index}"{attribute}><Graphics CenterX="{x}" CenterY="10" Width="10" Height="10"/></DataNode>"#,
            x = index * 20 + 10,
        ));
    }
    text.push_str("</Pathway>");
    text
}

// ===================
// Property Test Functions
// ===================

/// Written ids are kept on their node and generated ids take none of them.
fn check_generated_ids_are_fresh(graph_ids: Vec<Option<u8>>) -> Result<(), TestCaseError> {
    let model = read_str(&document(&graph_ids))
        .map_err(|err| TestCaseError::fail(err.to_string()))?
        .model;
    prop_assert_eq!(model.data_nodes().count(), graph_ids.len());

    let written: HashSet<ElementId> = graph_ids
        .iter()
        .flatten()
        .map(|n| ElementId::new(&format!("id{n:x}")))
        .collect();
    for (index, graph_id) in graph_ids.iter().enumerate() {
        let label = format!("node{index}");
        let node = model.data_nodes().find(|node| node.text_label() == label);
        prop_assert!(node.is_some(), "{} is missing", label);
        let Some(node) = node else {
            continue;
        };
        match graph_id {
            Some(n) => prop_assert_eq!(node.element_id(), ElementId::new(&format!("id{n:x}"))),
            None => prop_assert!(
                !written.contains(&node.element_id()),
                "{} took the written id {}",
                label,
                node.element_id()
            ),
        }
    }
    Ok(())
}

// ===================
// Proptest Wrappers
// ===================

proptest! {
    #[test]
    fn generated_ids_are_fresh(graph_ids in graph_ids_strategy()) {
        check_generated_ids_are_fresh(graph_ids)?;
    }
}
