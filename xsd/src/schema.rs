use std::io;

use super::{
    attribute_decl::AttributeDecl,
    builtins::{is_xs_element, XML_NAMESPACE},
    complex_type_def::ComplexTypeDecl,
    element_decl::ElementDecl,
    error::XsdError,
    import::Import,
    model_group_def::GroupDecl,
    shared::{content_children, unsupported},
    simple_type_def::SimpleTypeDecl,
    values::attribute,
    xstypes::AnyURI,
};
use roxmltree::Node;
use tracing::debug;

/// An XSD schema document as an object tree: header, namespace bindings, imports and the
/// top-level items in document order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct XmlSchema {
    pub id: Option<String>,
    pub target_namespace: Option<AnyURI>,
    pub version: Option<String>,
    pub element_form_default: Option<Form>,
    pub namespaces: Vec<NamespaceBinding>,
    pub imports: Vec<Import>,
    pub items: Vec<SchemaItem>,
}

/// A namespace declaration on the `<schema>` element; an empty prefix is the default namespace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamespaceBinding {
    pub prefix: String,
    pub uri: AnyURI,
}

impl NamespaceBinding {
    pub fn new(prefix: impl Into<String>, uri: impl Into<AnyURI>) -> Self {
        Self {
            prefix: prefix.into(),
            uri: uri.into(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Form {
    Qualified,
    Unqualified,
}

impl Form {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Qualified => "qualified",
            Self::Unqualified => "unqualified",
        }
    }
}

/// A top-level declaration of a schema document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SchemaItem {
    Element(ElementDecl),
    ComplexType(ComplexTypeDecl),
    SimpleType(SimpleTypeDecl),
    Attribute(AttributeDecl),
    Group(GroupDecl),
}

impl SchemaItem {
    /// The XSD tag name of the item
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Element(_) => ElementDecl::TAG_NAME,
            Self::ComplexType(_) => ComplexTypeDecl::TAG_NAME,
            Self::SimpleType(_) => SimpleTypeDecl::TAG_NAME,
            Self::Attribute(_) => AttributeDecl::TAG_NAME,
            Self::Group(_) => GroupDecl::TAG_NAME,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Element(e) => e.name.as_deref(),
            Self::ComplexType(c) => Some(&c.name),
            Self::SimpleType(s) => Some(&s.name),
            Self::Attribute(a) => a.name.as_deref(),
            Self::Group(g) => Some(&g.name),
        }
    }
}

/// Options for [`XmlSchema::parse_with_options()`].
#[derive(Copy, Clone, Debug, Default)]
pub struct ParseOptions {
    /// Allow a XML Document Type Definition (DTD) to occur
    pub allow_dtd: bool,
}

impl XmlSchema {
    pub const TAG_NAME: &'static str = "schema";

    pub fn parse(text: &str) -> Result<Self, XsdError> {
        Self::parse_with_options(text, ParseOptions::default())
    }

    pub fn parse_with_options(text: &str, options: ParseOptions) -> Result<Self, XsdError> {
        let options = roxmltree::ParsingOptions {
            allow_dtd: options.allow_dtd,
            ..roxmltree::ParsingOptions::default()
        };
        let document = roxmltree::Document::parse_with_options(text, options)?;
        Self::map_from_xml(document.root_element())
    }

    pub fn from_reader(mut reader: impl io::Read) -> Result<Self, XsdError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::parse(&text)
    }

    pub fn map_from_xml(schema: Node) -> Result<Self, XsdError> {
        if !is_xs_element(schema, Self::TAG_NAME) {
            return Err(XsdError::NotASchema(schema.tag_name().name().to_string()));
        }

        let element_form_default = match schema.attribute("elementFormDefault") {
            None => None,
            Some("qualified") => Some(Form::Qualified),
            Some("unqualified") => Some(Form::Unqualified),
            Some(other) => {
                return Err(XsdError::InvalidAttribute {
                    element: Self::TAG_NAME.to_string(),
                    attribute: "elementFormDefault".to_string(),
                    value: other.to_string(),
                    datatype: "qualified | unqualified",
                })
            }
        };

        let namespaces = schema
            .namespaces()
            .filter(|ns| ns.uri() != XML_NAMESPACE)
            .map(|ns| NamespaceBinding::new(ns.name().unwrap_or_default(), ns.uri()))
            .collect();

        let mut imports = Vec::new();
        let mut items = Vec::new();

        for child in content_children(schema)? {
            let item = match child.tag_name().name() {
                Import::TAG_NAME => {
                    imports.push(Import::map_from_xml(child, schema)?);
                    continue;
                }
                ElementDecl::TAG_NAME => SchemaItem::Element(ElementDecl::map_from_xml(child)?),
                ComplexTypeDecl::TAG_NAME => {
                    SchemaItem::ComplexType(ComplexTypeDecl::map_from_xml(child)?)
                }
                SimpleTypeDecl::TAG_NAME => {
                    SchemaItem::SimpleType(SimpleTypeDecl::map_from_xml(child)?)
                }
                AttributeDecl::TAG_NAME => {
                    SchemaItem::Attribute(AttributeDecl::map_from_xml(child)?)
                }
                GroupDecl::TAG_NAME => SchemaItem::Group(GroupDecl::map_from_xml(child)?),
                // include, redefine, override, attributeGroup, notation, defaultOpenContent
                _ => return Err(unsupported(child, schema)),
            };
            debug!(kind = item.kind(), name = item.name(), "parsed schema item");
            items.push(item);
        }

        Ok(Self {
            id: attribute(schema, "id")?,
            target_namespace: attribute(schema, "targetNamespace")?,
            version: attribute(schema, "version")?,
            element_form_default,
            namespaces,
            imports,
            items,
        })
    }

    /// The first prefix bound to `uri`, if any.
    pub fn prefix_of(&self, uri: &str) -> Option<&str> {
        self.namespaces
            .iter()
            .find(|ns| ns.uri == uri)
            .map(|ns| ns.prefix.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::XS_NAMESPACE;
    use crate::particle::Compositor;
    use crate::xstypes::QName;

    const SCHEMA: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<xs:schema xmlns="http://example.com/crm" xmlns:xs="http://www.w3.org/2001/XMLSchema"
           xmlns:sme="http://schemas.sage.com/sdata/sme/2007"
           targetNamespace="http://example.com/crm" elementFormDefault="qualified"
           id="crm" version="1.2">
  <xs:import namespace="http://schemas.sage.com/sdata/sme/2007" schemaLocation="sme.xsd"/>
  <xs:annotation><xs:documentation>CRM</xs:documentation></xs:annotation>
  <xs:element name="account" type="tns-free:nothing-here" sme:role="resourceKind"
              xmlns:tns-free="http://example.com/crm"/>
  <xs:complexType name="account--type">
    <xs:all><xs:element name="name" type="xs:string" minOccurs="0"/></xs:all>
  </xs:complexType>
  <xs:simpleType name="status--enum">
    <xs:restriction base="xs:string"><xs:enumeration value="Open"/></xs:restriction>
  </xs:simpleType>
  <xs:attribute name="flag" type="xs:boolean"/>
</xs:schema>"#;

    #[test]
    fn maps_header_and_items_in_order() {
        let schema = XmlSchema::parse(SCHEMA).unwrap();

        assert_eq!(schema.id.as_deref(), Some("crm"));
        assert_eq!(schema.version.as_deref(), Some("1.2"));
        assert_eq!(
            schema.target_namespace.as_deref(),
            Some("http://example.com/crm")
        );
        assert_eq!(schema.element_form_default, Some(Form::Qualified));
        assert_eq!(schema.prefix_of(XS_NAMESPACE), Some("xs"));
        assert_eq!(schema.prefix_of("http://example.com/crm"), Some(""));
        assert_eq!(schema.imports.len(), 1);
        assert_eq!(schema.imports[0].schema_location.as_deref(), Some("sme.xsd"));

        let kinds = schema.items.iter().map(SchemaItem::kind).collect::<Vec<_>>();
        assert_eq!(kinds, ["element", "complexType", "simpleType", "attribute"]);

        let SchemaItem::Element(element) = &schema.items[0] else {
            panic!("expected an element");
        };
        assert_eq!(
            element.type_name,
            Some(QName::with_namespace("http://example.com/crm", "nothing-here"))
        );
        assert_eq!(element.unhandled_attributes.len(), 1);
        assert!(element.unhandled_attributes[0]
            .name
            .is("http://schemas.sage.com/sdata/sme/2007", "role"));

        let SchemaItem::ComplexType(complex_type) = &schema.items[1] else {
            panic!("expected a complex type");
        };
        assert_eq!(
            complex_type.particle.as_ref().map(|p| p.compositor),
            Some(Compositor::All)
        );
    }

    #[test]
    fn rejects_non_schema_documents() {
        let err = XmlSchema::parse("<root/>").unwrap_err();
        assert!(matches!(err, XsdError::NotASchema(name) if name == "root"));
    }

    #[test]
    fn rejects_includes() {
        let err = XmlSchema::parse(
            r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
                <xs:include schemaLocation="other.xsd"/>
            </xs:schema>"#,
        )
        .unwrap_err();
        assert!(matches!(err, XsdError::Unsupported { element, .. } if element == "include"));
    }

    #[test]
    fn rejects_import_of_own_namespace() {
        let err = XmlSchema::parse(
            r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema" targetNamespace="urn:a">
                <xs:import namespace="urn:a"/>
            </xs:schema>"#,
        )
        .unwrap_err();
        assert!(matches!(err, XsdError::ImportConstraint(Some(ns)) if ns == "urn:a"));
    }

    #[test]
    fn reports_malformed_xml() {
        assert!(matches!(
            XmlSchema::parse("<xs:schema"),
            Err(XsdError::Xml(_))
        ));
    }
}
