use super::{
    error::XsdError,
    particle::MaxOccurs,
    shared::{content_children, unsupported, UnhandledAttribute},
    values::attribute,
    xstypes::{NCName, QName},
};
use roxmltree::Node;

/// An `<element>` declaration, either global (a schema item) or local (a particle member).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementDecl {
    pub name: Option<NCName>,
    pub ref_name: Option<QName>,
    pub type_name: Option<QName>,
    pub min_occurs: u64,
    pub max_occurs: MaxOccurs,
    pub nillable: bool,
    pub unhandled_attributes: Vec<UnhandledAttribute>,
}

impl ElementDecl {
    pub const TAG_NAME: &'static str = "element";

    /// A named element of type `type_name`, occurring exactly once.
    pub fn new(name: impl Into<NCName>, type_name: QName) -> Self {
        Self {
            name: Some(name.into()),
            ref_name: None,
            type_name: Some(type_name),
            min_occurs: 1,
            max_occurs: MaxOccurs::Count(1),
            nillable: false,
            unhandled_attributes: Vec::new(),
        }
    }

    pub(crate) fn map_from_xml(element: Node) -> Result<Self, XsdError> {
        // Anonymous type definitions and identity constraints are not part of this object model
        if let Some(child) = content_children(element)?.into_iter().next() {
            return Err(unsupported(child, element));
        }

        let name = attribute::<String>(element, "name")?;
        let ref_name = attribute::<QName>(element, "ref")?;
        if name.is_none() && ref_name.is_none() {
            return Err(XsdError::MissingAttribute {
                element: Self::TAG_NAME.to_string(),
                attribute: "name",
            });
        }

        Ok(Self {
            name,
            ref_name,
            type_name: attribute(element, "type")?,
            min_occurs: attribute(element, "minOccurs")?.unwrap_or(1),
            max_occurs: attribute(element, "maxOccurs")?.unwrap_or(MaxOccurs::Count(1)),
            nillable: attribute(element, "nillable")?.unwrap_or(false),
            unhandled_attributes: UnhandledAttribute::collect_from_xml(element),
        })
    }
}
