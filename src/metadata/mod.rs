//! The SData type model: a [`SchemaDocument`] and the types it declares.

mod choice_type;
mod complex_type;
pub mod node;
mod schema;
mod simple_type;
mod top_level;
mod type_reference;
mod types;

pub use choice_type::{ChoiceItem, ChoiceType};
pub use complex_type::{ComplexType, ListDescriptor, Property};
pub use node::{Descendants, SchemaNode, SchemaNodeMut, SchemaObject};
pub use schema::{SchemaDocument, TypeView, Types};
pub use simple_type::{EnumType, SimpleType};
pub use top_level::{
    InvocationMode, NamedQueryType, ResourceCapabilities, ResourceType, Role,
    ServiceOperationType, TopLevelType,
};
pub use type_reference::TypeReference;
pub use types::SchemaType;

pub(crate) use simple_type::map_from_xsd as simple_type_from_xsd;
pub(crate) use top_level::map_from_xsd as top_level_from_xsd;

use sdata_xsd::{ComplexTypeDecl, ElementDecl, ParticleItem, QName};

use crate::error::UnsupportedSchemaError;

/// Qualified name of a type declared in a document with the given target namespace.
pub(crate) fn qualify(target_namespace: Option<&str>, local_name: &str) -> QName {
    QName::with_optional_namespace(target_namespace, local_name)
}

/// A member of a model group that is a named element with a declared type.
pub(crate) struct TypedMember<'a> {
    pub element: &'a ElementDecl,
    pub name: &'a str,
    pub type_name: &'a QName,
}

pub(crate) fn typed_member<'a>(
    item: &'a ParticleItem,
    owner: &str,
) -> Result<TypedMember<'a>, UnsupportedSchemaError> {
    match item {
        ParticleItem::Element(element) => {
            match (&element.name, &element.ref_name, &element.type_name) {
                (Some(name), None, Some(type_name)) => Ok(TypedMember {
                    element,
                    name,
                    type_name,
                }),
                (_, Some(ref_name), _) => Err(unsupported_content(
                    owner,
                    format!("element reference `{ref_name}`"),
                )),
                (name, _, _) => Err(unsupported_content(
                    owner,
                    format!(
                        "element `{}` without a declared type",
                        name.as_deref().unwrap_or_default()
                    ),
                )),
            }
        }
        ParticleItem::Any(_) => Err(unsupported_content(owner, "wildcard")),
        ParticleItem::Group(group) => Err(unsupported_content(
            owner,
            format!("nested <{}>", group.compositor.tag_name()),
        )),
    }
}

pub(crate) fn unsupported_content(
    type_name: &str,
    content: impl Into<String>,
) -> UnsupportedSchemaError {
    UnsupportedSchemaError::UnsupportedContent {
        type_name: type_name.to_string(),
        content: content.into(),
    }
}

/// Attribute declarations and mixed content have no counterpart in the type model.
pub(crate) fn check_no_attributes(decl: &ComplexTypeDecl) -> Result<(), UnsupportedSchemaError> {
    if let Some(attribute) = decl.attributes.first() {
        let name = attribute
            .name
            .clone()
            .or_else(|| attribute.ref_name.as_ref().map(ToString::to_string))
            .unwrap_or_default();
        return Err(unsupported_content(&decl.name, format!("attribute `{name}`")));
    }
    if decl.mixed {
        return Err(unsupported_content(&decl.name, "mixed content"));
    }
    Ok(())
}
