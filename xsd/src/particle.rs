use super::{
    error::XsdError,
    shared::{content_children, unsupported},
    values::attribute,
    ElementDecl,
};
use roxmltree::Node;

/// A model group (`<all>`, `<sequence>` or `<choice>`) with its occurrence range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Particle {
    pub compositor: Compositor,
    pub min_occurs: u64,
    pub max_occurs: MaxOccurs,
    pub items: Vec<ParticleItem>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Compositor {
    All,
    Choice,
    Sequence,
}

impl Compositor {
    pub const fn tag_name(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Choice => "choice",
            Self::Sequence => "sequence",
        }
    }

    pub(crate) fn from_tag_name(tag_name: &str) -> Option<Self> {
        match tag_name {
            "all" => Some(Self::All),
            "choice" => Some(Self::Choice),
            "sequence" => Some(Self::Sequence),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MaxOccurs {
    Unbounded,
    Count(u64),
}

impl MaxOccurs {
    pub(crate) fn to_xml_value(self) -> String {
        match self {
            Self::Unbounded => "unbounded".to_string(),
            Self::Count(n) => n.to_string(),
        }
    }
}

/// A member of a model group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParticleItem {
    Element(ElementDecl),
    Any(Wildcard),
    Group(Particle),
}

/// An `<any>` wildcard particle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Wildcard {
    pub namespace: Option<String>,
    pub process_contents: Option<String>,
    pub min_occurs: u64,
    pub max_occurs: MaxOccurs,
}

impl Particle {
    pub fn new(compositor: Compositor, items: Vec<ParticleItem>) -> Self {
        Self {
            compositor,
            min_occurs: 1,
            max_occurs: MaxOccurs::Count(1),
            items,
        }
    }

    /// Mapper for model groups `<all>`, `<sequence>`, and `<choice>`
    pub(crate) fn map_from_xml(particle: Node) -> Result<Self, XsdError> {
        let compositor = Compositor::from_tag_name(particle.tag_name().name())
            .ok_or_else(|| unsupported(particle, particle.parent().unwrap_or(particle)))?;

        // {min occurs}
        //   The ·actual value· of the minOccurs [attribute], if present, otherwise 1.
        let min_occurs = attribute(particle, "minOccurs")?.unwrap_or(1);

        // {max occurs}
        //   unbounded, if the maxOccurs [attribute] equals unbounded, otherwise the ·actual value·
        //   of the maxOccurs [attribute], if present, otherwise 1.
        let max_occurs = attribute(particle, "maxOccurs")?.unwrap_or(MaxOccurs::Count(1));

        // {particles}
        //   A sequence of particles corresponding to all the <all>, <choice>, <sequence>,
        //   <any>, <group> or <element> items among the [children], in order.
        let items = content_children(particle)?
            .into_iter()
            .map(|child| match child.tag_name().name() {
                "all" | "choice" | "sequence" => Self::map_from_xml(child).map(ParticleItem::Group),
                "any" => Wildcard::map_from_xml(child).map(ParticleItem::Any),
                ElementDecl::TAG_NAME => {
                    ElementDecl::map_from_xml(child).map(ParticleItem::Element)
                }
                // Group references need the model group definitions to be resolved, which this
                // object model doesn't do
                _ => Err(unsupported(child, particle)),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            compositor,
            min_occurs,
            max_occurs,
            items,
        })
    }
}

impl Wildcard {
    pub(crate) fn map_from_xml(any: Node) -> Result<Self, XsdError> {
        Ok(Self {
            namespace: attribute(any, "namespace")?,
            process_contents: attribute(any, "processContents")?,
            min_occurs: attribute(any, "minOccurs")?.unwrap_or(1),
            max_occurs: attribute(any, "maxOccurs")?.unwrap_or(MaxOccurs::Count(1)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::XS_STRING_NAME;

    fn parse(xml: &str) -> Result<Particle, XsdError> {
        let doc = roxmltree::Document::parse(xml).unwrap();
        Particle::map_from_xml(doc.root_element())
    }

    #[test]
    fn maps_nested_groups_in_order() {
        let particle = parse(
            r###"<xs:sequence xmlns:xs="http://www.w3.org/2001/XMLSchema" minOccurs="0">
                <xs:element name="a" type="xs:string"/>
                <xs:choice maxOccurs="unbounded">
                    <xs:element name="b" type="xs:string"/>
                </xs:choice>
                <xs:any namespace="##other" processContents="lax"/>
            </xs:sequence>"###,
        )
        .unwrap();

        assert_eq!(particle.compositor, Compositor::Sequence);
        assert_eq!(particle.min_occurs, 0);
        assert_eq!(particle.max_occurs, MaxOccurs::Count(1));
        assert_eq!(particle.items.len(), 3);

        let ParticleItem::Element(a) = &particle.items[0] else {
            panic!("expected an element, got {:?}", particle.items[0]);
        };
        assert_eq!(a.name.as_deref(), Some("a"));
        assert_eq!(a.type_name.as_ref(), Some(&*XS_STRING_NAME));

        let ParticleItem::Group(choice) = &particle.items[1] else {
            panic!("expected a nested group, got {:?}", particle.items[1]);
        };
        assert_eq!(choice.compositor, Compositor::Choice);
        assert_eq!(choice.max_occurs, MaxOccurs::Unbounded);

        assert!(matches!(
            &particle.items[2],
            ParticleItem::Any(Wildcard { namespace: Some(ns), .. }) if ns == "##other"
        ));
    }

    #[test]
    fn rejects_group_references() {
        let err = parse(
            r#"<xs:all xmlns:xs="http://www.w3.org/2001/XMLSchema">
                <xs:group ref="xs:foo"/>
            </xs:all>"#,
        )
        .unwrap_err();
        assert!(matches!(err, XsdError::Unsupported { element, .. } if element == "group"));
    }
}
