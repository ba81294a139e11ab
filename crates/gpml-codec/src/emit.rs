//! Steps shared by both writers.

use log::debug;

use gpml_core::{
    identifier::ElementId,
    model::{PathwayElement, PathwayModel},
};

use crate::error::{ConverterError, Result};

/// Brings the model into a writable state.
///
/// Lines must have at least two points, empty groups are pruned from the
/// live model and every citation needs an xref or a url.
///
/// # Errors
///
/// [`ConverterError::Model`] for a short line and
/// [`ConverterError::UnresolvedRequiredReference`] for an unresolvable
/// citation. Nothing is written in either case.
pub(crate) fn prepare(model: &mut PathwayModel) -> Result<()> {
    model.validate_line_elements()?;

    let pruned = model.remove_empty_groups();
    if !pruned.is_empty() {
        debug!(count = pruned.len(); "Pruned empty groups before writing");
    }

    if let Some(citation) = model.citations().find(|citation| !citation.is_resolvable()) {
        return Err(ConverterError::UnresolvedRequiredReference {
            kind: "citation".to_string(),
            element_id: citation.element_id(),
            requirement: "an xref or a url".to_string(),
        });
    }
    Ok(())
}

/// Sorts graph elements by `z_order`, then by id.
pub(crate) fn draw_order<'a, T: PathwayElement>(elements: impl Iterator<Item = &'a T>) -> Vec<&'a T>
where
    T: 'a,
{
    let mut elements: Vec<_> = elements.collect();
    elements.sort_by(|a, b| {
        a.z_order()
            .cmp(&b.z_order())
            .then_with(|| a.element_id().cmp(&b.element_id()))
    });
    elements
}

/// Sorts elements without a draw order by id.
pub(crate) fn id_order<'a, T: 'a>(
    elements: impl Iterator<Item = &'a T>,
    id: impl Fn(&T) -> ElementId,
) -> Vec<&'a T> {
    let mut elements: Vec<_> = elements.collect();
    elements.sort_by_key(|element| id(element));
    elements
}

#[cfg(test)]
mod tests {
    use gpml_core::{
        geometry::Coordinate,
        model::{
            Citation, DataNode, GraphicalLine, LineElement, LinePoint, Pathway, PathwayOptions,
            ShapedGraphics,
        },
        types::DataNodeType,
    };

    use super::*;

    fn node(id: &str, z_order: i32) -> DataNode {
        let graphics = ShapedGraphics::new(Coordinate::new(0.0, 0.0), 10.0, 10.0).unwrap();
        let mut node = DataNode::new(ElementId::new(id), id, DataNodeType::Undefined, graphics);
        node.set_z_order(z_order);
        node
    }

    #[test]
    fn test_draw_order_sorts_by_z_then_id() {
        let nodes = [node("c", 1), node("b", 2), node("a", 1)];
        let sorted: Vec<_> = draw_order(nodes.iter())
            .into_iter()
            .map(|n| n.element_id().to_string())
            .collect();
        assert_eq!(sorted, vec!["a", "c", "b"]);
    }

    #[test]
    fn test_prepare_rejects_bare_citation() {
        let mut model = PathwayModel::new(Pathway::new("P", PathwayOptions::default()));
        model.add(Citation::new(ElementId::new("cit"))).unwrap();

        let err = prepare(&mut model).unwrap_err();
        assert!(matches!(
            err,
            ConverterError::UnresolvedRequiredReference { element_id, .. } if element_id == "cit"
        ));
    }

    #[test]
    fn test_prepare_rejects_short_line() {
        let mut model = PathwayModel::new(Pathway::new("P", PathwayOptions::default()));
        let line = LineElement::new(ElementId::new("l"))
            .with_point(LinePoint::new(ElementId::new("p1"), Coordinate::new(0.0, 0.0)));
        model.add(GraphicalLine::new(line)).unwrap();

        assert!(matches!(prepare(&mut model), Err(ConverterError::Model(_))));
    }
}
