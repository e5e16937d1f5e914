use super::{
    attribute_decl::AttributeDecl,
    error::XsdError,
    particle::Particle,
    shared::{content_children, unsupported, UnhandledAttribute},
    values::{attribute, required_attribute},
    xstypes::NCName,
};
use roxmltree::Node;

/// A named, top-level `<complexType>` with implicit complex content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComplexTypeDecl {
    pub name: NCName,
    pub particle: Option<Particle>,
    pub attributes: Vec<AttributeDecl>,
    pub any_attribute: bool,
    pub mixed: bool,
    pub unhandled_attributes: Vec<UnhandledAttribute>,
}

impl ComplexTypeDecl {
    pub const TAG_NAME: &'static str = "complexType";

    pub fn new(name: impl Into<NCName>, particle: Option<Particle>) -> Self {
        Self {
            name: name.into(),
            particle,
            attributes: Vec::new(),
            any_attribute: false,
            mixed: false,
            unhandled_attributes: Vec::new(),
        }
    }

    pub(crate) fn map_from_xml(complex_type: Node) -> Result<Self, XsdError> {
        let name = required_attribute::<String>(complex_type, "name")?;
        let mixed = attribute(complex_type, "mixed")?.unwrap_or(false);

        let mut particle = None;
        let mut attributes = Vec::new();
        let mut any_attribute = false;

        for child in content_children(complex_type)? {
            match child.tag_name().name() {
                "all" | "choice" | "sequence" if particle.is_none() && attributes.is_empty() => {
                    particle = Some(Particle::map_from_xml(child)?);
                }
                AttributeDecl::TAG_NAME if !any_attribute => {
                    attributes.push(AttributeDecl::map_from_xml(child)?);
                }
                "anyAttribute" if !any_attribute => any_attribute = true,
                // simpleContent, complexContent, group references, attribute groups, assertions
                // and anything out of order
                _ => return Err(unsupported(child, complex_type)),
            }
        }

        Ok(Self {
            name,
            particle,
            attributes,
            any_attribute,
            mixed,
            unhandled_attributes: UnhandledAttribute::collect_from_xml(complex_type),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::Compositor;

    fn parse(body: &str) -> Result<ComplexTypeDecl, XsdError> {
        let xml = format!(
            r#"<xs:complexType xmlns:xs="http://www.w3.org/2001/XMLSchema" xmlns:x="urn:x" {body}</xs:complexType>"#
        );
        let doc = roxmltree::Document::parse(&xml).unwrap();
        ComplexTypeDecl::map_from_xml(doc.root_element())
    }

    #[test]
    fn maps_particle_attributes_and_wildcard() {
        let decl = parse(
            r#"name="T" x:flag="yes">
                <xs:annotation><xs:documentation>ignored</xs:documentation></xs:annotation>
                <xs:all><xs:element name="a" type="xs:int"/></xs:all>
                <xs:attribute name="id" type="xs:string" use="required"/>
                <xs:anyAttribute/>"#,
        )
        .unwrap();

        assert_eq!(decl.name, "T");
        assert_eq!(
            decl.particle.as_ref().map(|p| p.compositor),
            Some(Compositor::All)
        );
        assert_eq!(decl.attributes.len(), 1);
        assert!(decl.any_attribute);
        assert_eq!(decl.unhandled_attributes.len(), 1);
        assert_eq!(decl.unhandled_attributes[0].value, "yes");
    }

    #[test]
    fn empty_type_has_no_particle() {
        let decl = parse(r#"name="Empty">"#).unwrap();
        assert!(decl.particle.is_none());
        assert!(!decl.any_attribute);
    }

    #[test]
    fn rejects_complex_content() {
        let err = parse(
            r#"name="Derived"><xs:complexContent><xs:extension base="x:Base"/></xs:complexContent>"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            XsdError::Unsupported { element, .. } if element == "complexContent"
        ));
    }

    #[test]
    fn requires_a_name() {
        let err = parse(">").unwrap_err();
        assert!(matches!(err, XsdError::MissingAttribute { attribute: "name", .. }));
    }
}
