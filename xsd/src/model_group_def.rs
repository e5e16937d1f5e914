use super::{
    error::XsdError,
    particle::Particle,
    shared::{content_children, unsupported},
    values::required_attribute,
    xstypes::NCName,
};
use roxmltree::Node;

/// A named, top-level model group definition (`<group name="...">`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupDecl {
    pub name: NCName,
    pub particle: Particle,
}

impl GroupDecl {
    pub const TAG_NAME: &'static str = "group";

    pub(crate) fn map_from_xml(group: Node) -> Result<Self, XsdError> {
        let name = required_attribute::<String>(group, "name")?;
        let children = content_children(group)?;
        match children.as_slice() {
            [particle] => Ok(Self {
                name,
                particle: Particle::map_from_xml(*particle)?,
            }),
            [] => Err(XsdError::Unsupported {
                element: "(empty)".to_string(),
                context: Self::TAG_NAME.to_string(),
            }),
            [_, extra, ..] => Err(unsupported(*extra, group)),
        }
    }
}
