use sdata_xsd::{Facet, QName, SimpleTypeContent, SimpleTypeDecl, UnhandledAttribute};

use super::{
    node::{SchemaNode, SchemaNodeMut, SchemaObject},
    SchemaType, TypeReference,
};
use crate::error::UnsupportedSchemaError;

/// A restriction of another simple type by value facets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimpleType {
    pub name: String,
    pub base: Option<TypeReference>,
    pub facets: Vec<Facet>,
    pub extensions: Vec<UnhandledAttribute>,
}

/// A restriction consisting only of enumeration facets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumType {
    pub name: String,
    pub base: Option<TypeReference>,
    pub values: Vec<String>,
    pub extensions: Vec<UnhandledAttribute>,
}

impl SimpleType {
    pub fn new(name: impl Into<String>, base: QName, facets: Vec<Facet>) -> Self {
        Self {
            name: name.into(),
            base: Some(TypeReference::new(base)),
            facets,
            extensions: Vec::new(),
        }
    }

    pub(crate) fn map_to_xsd(&self) -> SimpleTypeDecl {
        let mut decl = SimpleTypeDecl::restriction(
            self.name.clone(),
            self.base.as_ref().map(|base| base.qualified_name().clone()),
            self.facets.clone(),
        );
        decl.unhandled_attributes = self.extensions.clone();
        decl
    }
}

impl EnumType {
    pub fn new(name: impl Into<String>, base: QName, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            base: Some(TypeReference::new(base)),
            values,
            extensions: Vec::new(),
        }
    }

    pub(crate) fn map_to_xsd(&self) -> SimpleTypeDecl {
        let mut decl = SimpleTypeDecl::restriction(
            self.name.clone(),
            self.base.as_ref().map(|base| base.qualified_name().clone()),
            self.values.iter().cloned().map(Facet::Enumeration).collect(),
        );
        decl.unhandled_attributes = self.extensions.clone();
        decl
    }
}

/// Classifies a simple type: a restriction made only of enumeration facets is an enum, any
/// other restriction is a plain simple type. A restriction without facets counts as an enum
/// with no values.
pub(crate) fn map_from_xsd(decl: &SimpleTypeDecl) -> Result<SchemaType, UnsupportedSchemaError> {
    let SimpleTypeContent::Restriction(restriction) = &decl.content else {
        return Err(UnsupportedSchemaError::NotARestriction {
            name: decl.name.clone(),
        });
    };

    let name = decl.name.clone();
    let base = restriction.base.clone().map(TypeReference::new);
    let extensions = decl.unhandled_attributes.clone();

    if restriction.facets.iter().all(Facet::is_enumeration) {
        let values = restriction
            .facets
            .iter()
            .filter_map(|facet| match facet {
                Facet::Enumeration(value) => Some(value.clone()),
                _ => None,
            })
            .collect();
        Ok(SchemaType::Enum(EnumType {
            name,
            base,
            values,
            extensions,
        }))
    } else {
        Ok(SchemaType::Simple(SimpleType {
            name,
            base,
            facets: restriction.facets.clone(),
            extensions,
        }))
    }
}

impl SchemaObject for SimpleType {
    fn children(&self) -> Vec<SchemaNode<'_>> {
        self.base.iter().map(SchemaNode::TypeReference).collect()
    }

    fn children_mut(&mut self) -> Vec<SchemaNodeMut<'_>> {
        self.base.iter_mut().map(SchemaNodeMut::TypeReference).collect()
    }
}

impl SchemaObject for EnumType {
    fn children(&self) -> Vec<SchemaNode<'_>> {
        self.base.iter().map(SchemaNode::TypeReference).collect()
    }

    fn children_mut(&mut self) -> Vec<SchemaNodeMut<'_>> {
        self.base.iter_mut().map(SchemaNodeMut::TypeReference).collect()
    }
}
