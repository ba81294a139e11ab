//! The GPML2013a `Biopax` block.
//!
//! Only `bp:PublicationXref` entries have a counterpart in the model (as
//! citations). Everything else in the block is kept as serialised markup on
//! the pathway and written back unchanged.

use crate::{
    dom::{Element, Node, write_fragment},
    error::Result,
};

pub const BIOPAX_NAMESPACE: &str = "http://www.biopax.org/release/biopax-level3.owl#";
pub const RDF_NAMESPACE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

/// One `bp:PublicationXref`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PublicationXref {
    pub rdf_id: String,
    pub identifier: String,
    pub database: String,
    /// Local names of fields the model has no place for (`TITLE`, `YEAR`, ...).
    pub dropped: Vec<String>,
}

/// The parsed content of a `Biopax` element.
#[derive(Debug, Default)]
pub(crate) struct BiopaxContent {
    pub publications: Vec<PublicationXref>,
    /// Markup of the remaining children, if any.
    pub remainder: Option<String>,
}

pub(crate) fn parse(biopax: &Element) -> Result<BiopaxContent> {
    let mut content = BiopaxContent::default();
    let mut rest = Vec::new();

    for child in biopax.children() {
        if child.local_name() != "PublicationXref" {
            rest.push(Node::Element(child.clone()));
            continue;
        }
        let mut publication = PublicationXref {
            rdf_id: rdf_id(child).unwrap_or_default().to_string(),
            identifier: String::new(),
            database: String::new(),
            dropped: Vec::new(),
        };
        for field in child.children() {
            match field.local_name() {
                "ID" => publication.identifier = field.text().trim().to_string(),
                "DB" => publication.database = field.text().trim().to_string(),
                other => publication.dropped.push(other.to_string()),
            }
        }
        content.publications.push(publication);
    }

    if !rest.is_empty() {
        content.remainder = Some(write_fragment(&rest, 2)?);
    }
    Ok(content)
}

fn rdf_id(element: &Element) -> Option<&str> {
    element
        .attributes()
        .find(|(name, _)| {
            let local = name.rsplit(':').next().unwrap_or(*name);
            local.eq_ignore_ascii_case("id")
        })
        .map(|(_, value)| value)
}

pub(crate) fn publication_xref(rdf_id: &str, identifier: &str, database: &str) -> Element {
    Element::new("bp:PublicationXref")
        .with_attribute("rdf:id", rdf_id)
        .with_child(
            Element::new("bp:ID")
                .with_attribute("rdf:datatype", XSD_STRING)
                .with_text(identifier),
        )
        .with_child(
            Element::new("bp:DB")
                .with_attribute("rdf:datatype", XSD_STRING)
                .with_text(database),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    const BIOPAX: &str = r#"<Pathway xmlns="http://pathvisio.org/GPML/2013a"
        xmlns:bp="http://www.biopax.org/release/biopax-level3.owl#"
        xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
      <Biopax>
        <bp:PublicationXref rdf:id="c1">
          <bp:ID rdf:datatype="http://www.w3.org/2001/XMLSchema#string">123</bp:ID>
          <bp:DB rdf:datatype="http://www.w3.org/2001/XMLSchema#string">PubMed</bp:DB>
          <bp:TITLE rdf:datatype="http://www.w3.org/2001/XMLSchema#string">A title</bp:TITLE>
        </bp:PublicationXref>
        <bp:openControlledVocabulary>
          <bp:TERM>apoptosis</bp:TERM>
        </bp:openControlledVocabulary>
      </Biopax>
    </Pathway>"#;

    #[test]
    fn test_parse_publications_and_remainder() {
        let document = Document::parse(BIOPAX).unwrap();
        let content = parse(document.root().child("Biopax").unwrap()).unwrap();

        assert_eq!(
            content.publications,
            vec![PublicationXref {
                rdf_id: "c1".to_string(),
                identifier: "123".to_string(),
                database: "PubMed".to_string(),
                dropped: vec!["TITLE".to_string()],
            }]
        );
        let remainder = content.remainder.unwrap();
        assert!(remainder.contains("<bp:openControlledVocabulary>"));
        assert!(remainder.contains("<bp:TERM>apoptosis</bp:TERM>"));
    }

    #[test]
    fn test_publication_xref_element() {
        let element = publication_xref("c2", "456", "PubMed");
        assert_eq!(element.attribute("rdf:id"), Some("c2"));
        assert_eq!(element.child("bp:ID").unwrap().text(), "456");
        assert_eq!(element.child("bp:DB").unwrap().text(), "PubMed");
    }
}
