//! Boundary check of an assembled document against its attribute table.
//!
//! Every GPML element must be declared for the version, carry only declared
//! attributes, carry every required attribute, and hold well-formed values.
//! Namespace declarations, prefixed attributes and the content of the
//! `Biopax` block are foreign markup and are not checked.

use log::debug;

use crate::{
    dom::{Document, Element},
    error::{ConverterError, Result},
    format::GpmlVersion,
    schema::AttributeTable,
};

/// Checks `document` against the attribute table of `version`.
///
/// # Errors
///
/// Returns [`ConverterError::SchemaValidation`] listing every problem found.
pub fn validate(document: &Document, version: GpmlVersion) -> Result<()> {
    let table = AttributeTable::for_version(version);
    let root = document.root();
    let mut problems = Vec::new();
    if root.name() != "Pathway" {
        problems.push(format!("root element is <{}>, expected <Pathway>", root.name()));
    }
    check_element(table, root, None, &mut problems);

    if problems.is_empty() {
        debug!(version:% = version; "Document passed schema validation");
        Ok(())
    } else {
        Err(ConverterError::SchemaValidation(problems.join("; ")))
    }
}

/// The table path of an element. `Graphics` is qualified by its parent.
fn element_path(element: &Element, parent: Option<&str>) -> String {
    match parent {
        Some(parent) if element.name() == "Graphics" => format!("{parent}.Graphics"),
        _ => element.name().to_string(),
    }
}

fn check_element(table: &AttributeTable, element: &Element, parent: Option<&str>, problems: &mut Vec<String>) {
    let path = element_path(element, parent);
    if !table.knows_element(&path) {
        problems.push(format!("unknown element <{path}>"));
        return;
    }

    for (name, value) in element.attributes() {
        if is_foreign(name) {
            continue;
        }
        match table.get(&path, name) {
            None => problems.push(format!("unknown attribute `{name}` on <{path}>")),
            Some(info) => {
                if let Err(reason) = info.kind().check(value) {
                    problems.push(format!("bad value `{value}` for `{name}` on <{path}>: {reason}"));
                }
            }
        }
    }
    for (name, info) in table.attributes(&path) {
        if info.is_required() && element.attribute(name).is_none() {
            problems.push(format!("<{path}> is missing required attribute `{name}`"));
        }
    }

    if element.name() == "Biopax" {
        return;
    }
    for child in element.children() {
        if is_foreign(child.name()) {
            continue;
        }
        check_element(table, child, Some(element.name()), problems);
    }
}

fn is_foreign(name: &str) -> bool {
    name == "xmlns" || name.contains(':')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn current(text: &str) -> Document {
        Document::parse(text).unwrap()
    }

    #[test]
    fn test_valid_document() {
        let document = current(
            r#"<Pathway xmlns="http://pathvisio.org/GPML/2021" title="P">
                 <Graphics boardWidth="10" boardHeight="10"/>
                 <DataNodes>
                   <DataNode elementId="n1" textLabel="A">
                     <Graphics centerX="1" centerY="1" width="2" height="2" fontWeight="Bold"/>
                   </DataNode>
                 </DataNodes>
               </Pathway>"#,
        );
        assert!(validate(&document, GpmlVersion::Current).is_ok());
    }

    #[test]
    fn test_reports_every_problem() {
        let document = current(
            r#"<Pathway xmlns="http://pathvisio.org/GPML/2021" title="P" colour="red">
                 <Graphics boardWidth="10"/>
                 <DataNodes>
                   <DataNode elementId="n1" textLabel="A">
                     <Graphics centerX="1" centerY="1" width="2" height="2" fontWeight="Heavy"/>
                   </DataNode>
                 </DataNodes>
                 <Legend/>
               </Pathway>"#,
        );
        let Err(ConverterError::SchemaValidation(message)) = validate(&document, GpmlVersion::Current) else {
            panic!("expected a validation failure");
        };
        assert!(message.contains("unknown attribute `colour` on <Pathway>"));
        assert!(message.contains("missing required attribute `boardHeight`"));
        assert!(message.contains("`fontWeight`"));
        assert!(message.contains("unknown element <Legend>"));
    }

    #[test]
    fn test_biopax_content_is_not_checked() {
        let document = current(
            r#"<Pathway xmlns="http://pathvisio.org/GPML/2013a"
                        xmlns:bp="http://www.biopax.org/release/biopax-level3.owl#" Name="P">
                 <Biopax><bp:PublicationXref><bp:ID>1</bp:ID></bp:PublicationXref></Biopax>
               </Pathway>"#,
        );
        assert!(validate(&document, GpmlVersion::Legacy).is_ok());
    }
}
