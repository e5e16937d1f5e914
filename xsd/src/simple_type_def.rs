use super::{
    constraining_facet::Facet,
    error::XsdError,
    shared::{content_children, unsupported, UnhandledAttribute},
    values::{attribute, required_attribute},
    xstypes::{NCName, QName},
};
use roxmltree::Node;

/// A named, top-level `<simpleType>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimpleTypeDecl {
    pub name: NCName,
    pub content: SimpleTypeContent,
    pub unhandled_attributes: Vec<UnhandledAttribute>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SimpleTypeContent {
    Restriction(Restriction),
    List { item_type: QName },
    Union { member_types: Vec<QName> },
}

/// A `<restriction>` of a named base type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Restriction {
    pub base: Option<QName>,
    pub facets: Vec<Facet>,
}

impl SimpleTypeDecl {
    pub const TAG_NAME: &'static str = "simpleType";

    pub fn restriction(name: impl Into<NCName>, base: Option<QName>, facets: Vec<Facet>) -> Self {
        Self {
            name: name.into(),
            content: SimpleTypeContent::Restriction(Restriction { base, facets }),
            unhandled_attributes: Vec::new(),
        }
    }

    pub(crate) fn map_from_xml(simple_type: Node) -> Result<Self, XsdError> {
        let name = required_attribute::<String>(simple_type, "name")?;

        let children = content_children(simple_type)?;
        let [child] = children.as_slice() else {
            return Err(match children.get(1) {
                Some(extra) => unsupported(*extra, simple_type),
                None => XsdError::Unsupported {
                    element: "(empty)".to_string(),
                    context: Self::TAG_NAME.to_string(),
                },
            });
        };
        let child = *child;

        let content = match child.tag_name().name() {
            "restriction" => SimpleTypeContent::Restriction(Restriction::map_from_xml(child)?),
            "list" => {
                if let Some(inline) = content_children(child)?.into_iter().next() {
                    return Err(unsupported(inline, child));
                }
                SimpleTypeContent::List {
                    item_type: required_attribute(child, "itemType")?,
                }
            }
            "union" => {
                if let Some(inline) = content_children(child)?.into_iter().next() {
                    return Err(unsupported(inline, child));
                }
                SimpleTypeContent::Union {
                    member_types: attribute(child, "memberTypes")?.unwrap_or_default(),
                }
            }
            _ => return Err(unsupported(child, simple_type)),
        };

        Ok(Self {
            name,
            content,
            unhandled_attributes: UnhandledAttribute::collect_from_xml(simple_type),
        })
    }
}

impl Restriction {
    fn map_from_xml(restriction: Node) -> Result<Self, XsdError> {
        let base = attribute(restriction, "base")?;
        let facets = content_children(restriction)?
            .into_iter()
            .map(|child| {
                if Facet::is_facet_element(child) {
                    Facet::map_from_xml(child)
                } else {
                    // Inline base types and assertions
                    Err(unsupported(child, restriction))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { base, facets })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::{XS_NAMESPACE, XS_STRING_NAME};
    use crate::constraining_facet::WhiteSpaceValue;

    fn parse(body: &str) -> Result<SimpleTypeDecl, XsdError> {
        let xml = format!(
            r#"<xs:simpleType xmlns:xs="http://www.w3.org/2001/XMLSchema" name="S">{body}</xs:simpleType>"#
        );
        let doc = roxmltree::Document::parse(&xml).unwrap();
        SimpleTypeDecl::map_from_xml(doc.root_element())
    }

    #[test]
    fn keeps_facets_in_document_order() {
        let decl = parse(
            r#"<xs:restriction base="xs:string">
                <xs:enumeration value="B"/>
                <xs:maxLength value="10"/>
                <xs:enumeration value="A"/>
                <xs:whiteSpace value="collapse"/>
            </xs:restriction>"#,
        )
        .unwrap();

        let SimpleTypeContent::Restriction(restriction) = decl.content else {
            panic!("expected a restriction");
        };
        assert_eq!(restriction.base.as_ref(), Some(&*XS_STRING_NAME));
        assert_eq!(
            restriction.facets,
            vec![
                Facet::Enumeration("B".into()),
                Facet::MaxLength(10),
                Facet::Enumeration("A".into()),
                Facet::WhiteSpace(WhiteSpaceValue::Collapse),
            ]
        );
    }

    #[test]
    fn maps_list_and_union() {
        let list = parse(r#"<xs:list itemType="xs:int"/>"#).unwrap();
        assert_eq!(
            list.content,
            SimpleTypeContent::List {
                item_type: QName::with_namespace(XS_NAMESPACE, "int")
            }
        );

        let union = parse(r#"<xs:union memberTypes="xs:int xs:string"/>"#).unwrap();
        assert_eq!(
            union.content,
            SimpleTypeContent::Union {
                member_types: vec![
                    QName::with_namespace(XS_NAMESPACE, "int"),
                    XS_STRING_NAME.clone()
                ]
            }
        );
    }

    #[test]
    fn rejects_invalid_facet_values() {
        let err = parse(r#"<xs:restriction base="xs:string"><xs:length value="-1"/></xs:restriction>"#)
            .unwrap_err();
        assert!(matches!(err, XsdError::InvalidAttribute { element, .. } if element == "length"));
    }
}
