use super::{
    error::XsdError,
    shared::{content_children, unsupported, UnhandledAttribute},
    values::attribute,
    xstypes::{NCName, QName},
};
use roxmltree::Node;

/// An `<attribute>` declaration, global or local to a complex type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeDecl {
    pub name: Option<NCName>,
    pub ref_name: Option<QName>,
    pub type_name: Option<QName>,
    pub use_: AttributeUse,
    pub default: Option<String>,
    pub unhandled_attributes: Vec<UnhandledAttribute>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum AttributeUse {
    #[default]
    Optional,
    Required,
    Prohibited,
}

impl AttributeUse {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Optional => "optional",
            Self::Required => "required",
            Self::Prohibited => "prohibited",
        }
    }
}

impl AttributeDecl {
    pub const TAG_NAME: &'static str = "attribute";

    pub(crate) fn map_from_xml(node: Node) -> Result<Self, XsdError> {
        if let Some(child) = content_children(node)?.into_iter().next() {
            return Err(unsupported(child, node));
        }

        let name = attribute::<String>(node, "name")?;
        let ref_name = attribute::<QName>(node, "ref")?;
        if name.is_none() && ref_name.is_none() {
            return Err(XsdError::MissingAttribute {
                element: Self::TAG_NAME.to_string(),
                attribute: "name",
            });
        }

        let use_ = match node.attribute("use") {
            None | Some("optional") => AttributeUse::Optional,
            Some("required") => AttributeUse::Required,
            Some("prohibited") => AttributeUse::Prohibited,
            Some(other) => {
                return Err(XsdError::InvalidAttribute {
                    element: Self::TAG_NAME.to_string(),
                    attribute: "use".to_string(),
                    value: other.to_string(),
                    datatype: "optional | required | prohibited",
                })
            }
        };

        Ok(Self {
            name,
            ref_name,
            type_name: attribute(node, "type")?,
            use_,
            default: attribute(node, "default")?,
            unhandled_attributes: UnhandledAttribute::collect_from_xml(node),
        })
    }
}
