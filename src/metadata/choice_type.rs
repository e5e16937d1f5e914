use sdata_xsd::{
    ComplexTypeDecl, Compositor, ElementDecl, MaxOccurs, Particle, ParticleItem, QName,
    UnhandledAttribute,
};

use super::{
    check_no_attributes, typed_member,
    node::{SchemaNode, SchemaNodeMut, SchemaObject},
    TypeReference,
};
use crate::error::UnsupportedSchemaError;

/// A structured type whose members are mutually exclusive, i.e. a `<choice>` group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoiceType {
    pub name: String,
    pub items: Vec<ChoiceItem>,
    pub min_occurs: u64,
    pub max_occurs: MaxOccurs,
    pub any_attribute: bool,
    pub extensions: Vec<UnhandledAttribute>,
}

/// One branch of a choice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoiceItem {
    pub name: String,
    pub type_ref: TypeReference,
    pub min_occurs: u64,
    pub max_occurs: MaxOccurs,
}

impl ChoiceType {
    pub fn new(name: impl Into<String>, items: Vec<ChoiceItem>) -> Self {
        Self {
            name: name.into(),
            items,
            min_occurs: 1,
            max_occurs: MaxOccurs::Count(1),
            any_attribute: false,
            extensions: Vec::new(),
        }
    }

    pub(crate) fn map_from_xsd(
        decl: &ComplexTypeDecl,
        particle: &Particle,
    ) -> Result<Self, UnsupportedSchemaError> {
        check_no_attributes(decl)?;

        let items = particle
            .items
            .iter()
            .map(|item| {
                let member = typed_member(item, &decl.name)?;
                Ok(ChoiceItem {
                    name: member.name.to_string(),
                    type_ref: TypeReference::new(member.type_name.clone()),
                    min_occurs: member.element.min_occurs,
                    max_occurs: member.element.max_occurs,
                })
            })
            .collect::<Result<_, UnsupportedSchemaError>>()?;

        Ok(Self {
            name: decl.name.clone(),
            items,
            min_occurs: particle.min_occurs,
            max_occurs: particle.max_occurs,
            any_attribute: decl.any_attribute,
            extensions: decl.unhandled_attributes.clone(),
        })
    }

    pub(crate) fn map_to_xsd(&self) -> ComplexTypeDecl {
        let mut particle = Particle::new(
            Compositor::Choice,
            self.items
                .iter()
                .map(|item| {
                    let mut element =
                        ElementDecl::new(item.name.clone(), item.type_ref.qualified_name().clone());
                    element.min_occurs = item.min_occurs;
                    element.max_occurs = item.max_occurs;
                    ParticleItem::Element(element)
                })
                .collect(),
        );
        particle.min_occurs = self.min_occurs;
        particle.max_occurs = self.max_occurs;

        let mut decl = ComplexTypeDecl::new(self.name.clone(), Some(particle));
        decl.any_attribute = self.any_attribute;
        decl.unhandled_attributes = self.extensions.clone();
        decl
    }
}

impl ChoiceItem {
    pub fn new(name: impl Into<String>, type_name: QName) -> Self {
        Self {
            name: name.into(),
            type_ref: TypeReference::new(type_name),
            min_occurs: 1,
            max_occurs: MaxOccurs::Count(1),
        }
    }
}

impl SchemaObject for ChoiceType {
    fn children(&self) -> Vec<SchemaNode<'_>> {
        self.items.iter().map(SchemaNode::ChoiceItem).collect()
    }

    fn children_mut(&mut self) -> Vec<SchemaNodeMut<'_>> {
        self.items.iter_mut().map(SchemaNodeMut::ChoiceItem).collect()
    }
}

impl SchemaObject for ChoiceItem {
    fn children(&self) -> Vec<SchemaNode<'_>> {
        vec![SchemaNode::TypeReference(&self.type_ref)]
    }

    fn children_mut(&mut self) -> Vec<SchemaNodeMut<'_>> {
        vec![SchemaNodeMut::TypeReference(&mut self.type_ref)]
    }
}
