use std::collections::{hash_map::Entry, HashMap};

use sdata_xsd::{Form, Import, NamespaceBinding, QName};

use super::{
    node::{Descendants, SchemaNode},
    qualify, ComplexType, EnumType, ListDescriptor, NamedQueryType, ResourceType, SchemaType,
    ServiceOperationType, SimpleType, TypeReference,
};
use crate::error::UnsupportedSchemaError;

/// An SData metadata schema: the document header plus the declared types, in declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SchemaDocument {
    pub id: Option<String>,
    pub target_namespace: Option<String>,
    pub version: Option<String>,
    pub element_form_default: Option<Form>,
    pub namespaces: Vec<NamespaceBinding>,
    pub imports: Vec<Import>,
    pub(crate) types: Types,
}

/// Declared types keyed by their local name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Types {
    types: Vec<SchemaType>,
    index: HashMap<String, usize>,
}

impl Types {
    /// Adds a type after the others.
    ///
    /// Fails if its name, or the name of its collection wrapper, is already taken by a type or a
    /// wrapper.
    pub fn insert(
        &mut self,
        schema_type: impl Into<SchemaType>,
    ) -> Result<(), UnsupportedSchemaError> {
        let schema_type = schema_type.into();
        if let Some(list) = schema_type.as_complex().and_then(|complex| complex.list.as_ref()) {
            if list.name == schema_type.name() || self.is_claimed(&list.name) {
                return Err(UnsupportedSchemaError::DuplicateType(list.name.clone()));
            }
        }
        if self.is_wrapper(schema_type.name()) {
            return Err(UnsupportedSchemaError::DuplicateType(schema_type.name().to_string()));
        }
        match self.index.entry(schema_type.name().to_string()) {
            Entry::Occupied(entry) => {
                Err(UnsupportedSchemaError::DuplicateType(entry.key().clone()))
            }
            Entry::Vacant(entry) => {
                entry.insert(self.types.len());
                self.types.push(schema_type);
                Ok(())
            }
        }
    }

    /// Gives the complex type `item_type` the collection wrapper `list`.
    pub(crate) fn attach_list(
        &mut self,
        item_type: &str,
        list: ListDescriptor,
    ) -> Result<(), UnsupportedSchemaError> {
        if self.is_claimed(&list.name) {
            return Err(UnsupportedSchemaError::DuplicateType(list.name));
        }
        match self.get_mut(item_type).and_then(SchemaType::as_complex_mut) {
            Some(complex) => {
                complex.list = Some(list);
                Ok(())
            }
            None => Err(UnsupportedSchemaError::WrapperMismatch {
                wrapper: list.name,
                expected: item_type.to_string(),
                found: String::new(),
            }),
        }
    }

    /// Whether `name` is a declared type or a collection wrapper.
    pub fn is_claimed(&self, name: &str) -> bool {
        self.contains(name) || self.is_wrapper(name)
    }

    fn is_wrapper(&self, name: &str) -> bool {
        self.types
            .iter()
            .filter_map(SchemaType::as_complex)
            .filter_map(|complex| complex.list.as_ref())
            .any(|list| list.name == name)
    }

    pub fn remove(&mut self, name: &str) -> Option<SchemaType> {
        let position = self.index.remove(name)?;
        for index in self.index.values_mut() {
            if *index > position {
                *index -= 1;
            }
        }
        Some(self.types.remove(position))
    }

    pub fn get(&self, name: &str) -> Option<&SchemaType> {
        self.index.get(name).map(|&index| &self.types[index])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SchemaType> {
        self.types.iter()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    // Callers must not rename through these, the index is keyed by name.
    fn get_mut(&mut self, name: &str) -> Option<&mut SchemaType> {
        let index = *self.index.get(name)?;
        self.types.get_mut(index)
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, SchemaType> {
        self.types.iter_mut()
    }
}

impl<'a> IntoIterator for &'a Types {
    type Item = &'a SchemaType;
    type IntoIter = std::slice::Iter<'a, SchemaType>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// The declared types of one kind, keyed by that kind's natural key.
pub struct TypeView<'a, T> {
    types: &'a Types,
    select: fn(&SchemaType) -> Option<&T>,
    key: fn(&T) -> &str,
}

impl<'a, T: 'a> TypeView<'a, T> {
    fn new(types: &'a Types, select: fn(&SchemaType) -> Option<&T>, key: fn(&T) -> &str) -> Self {
        Self { types, select, key }
    }

    pub fn get(&self, key: &str) -> Option<&'a T> {
        self.iter().find(|&t| (self.key)(t) == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a T> + 'a {
        let select = self.select;
        self.types.iter().filter_map(move |t| select(t))
    }

    pub fn keys(&self) -> impl Iterator<Item = &'a str> + 'a {
        let key = self.key;
        self.iter().map(move |t| key(t))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl SchemaDocument {
    pub fn new(target_namespace: impl Into<String>) -> Self {
        Self {
            target_namespace: Some(target_namespace.into()),
            ..Self::default()
        }
    }

    pub fn types(&self) -> &Types {
        &self.types
    }

    /// Structural edits need a [`compile`](Self::compile) before references are bound again.
    pub fn types_mut(&mut self) -> &mut Types {
        &mut self.types
    }

    /// `local_name` qualified with the target namespace.
    pub fn qualified_name(&self, local_name: &str) -> QName {
        qualify(self.target_namespace.as_deref(), local_name)
    }

    pub fn simple_types(&self) -> TypeView<'_, SimpleType> {
        TypeView::new(&self.types, SchemaType::as_simple, |t| t.name.as_str())
    }

    pub fn enum_types(&self) -> TypeView<'_, EnumType> {
        TypeView::new(&self.types, SchemaType::as_enum, |t| t.name.as_str())
    }

    /// Plain complex types together with the complex types of resource kinds, service
    /// operations and named queries.
    pub fn complex_types(&self) -> TypeView<'_, ComplexType> {
        TypeView::new(&self.types, SchemaType::as_complex, |t| t.name.as_str())
    }

    pub fn resource_types(&self) -> TypeView<'_, ResourceType> {
        TypeView::new(&self.types, SchemaType::as_resource, |t| {
            t.top_level.element_name.as_str()
        })
    }

    pub fn service_operation_types(&self) -> TypeView<'_, ServiceOperationType> {
        TypeView::new(&self.types, SchemaType::as_service_operation, |t| {
            t.top_level.element_name.as_str()
        })
    }

    pub fn named_query_types(&self) -> TypeView<'_, NamedQueryType> {
        TypeView::new(&self.types, SchemaType::as_named_query, |t| {
            t.top_level.element_name.as_str()
        })
    }

    /// The type a reference was bound to by the last compile, if it is declared here.
    pub fn resolve(&self, reference: &TypeReference) -> Option<&SchemaType> {
        let target = reference.resolved_name()?;
        if target.namespace_name.as_deref() != self.target_namespace.as_deref() {
            return None;
        }
        self.types.get(&target.local_name)
    }

    /// Every node of the model, types first and each followed by its subtree.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants::new(self.types.iter().map(SchemaNode::Type))
    }

    pub fn type_references(&self) -> impl Iterator<Item = &TypeReference> {
        self.descendants().filter_map(|node| match node {
            SchemaNode::TypeReference(reference) => Some(reference),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{Property, TopLevelType};
    use sdata_xsd::{Facet, XS_STRING_NAME};

    fn document() -> SchemaDocument {
        let mut document = SchemaDocument::new("urn:crm");
        let types = document.types_mut();
        types
            .insert(SimpleType::new("code", XS_STRING_NAME.clone(), vec![Facet::Length(3)]))
            .unwrap();
        types
            .insert(EnumType::new(
                "status",
                XS_STRING_NAME.clone(),
                vec!["open".to_string(), "closed".to_string()],
            ))
            .unwrap();
        types
            .insert(ComplexType::new("address--type").with_properties(vec![Property::new(
                "city",
                XS_STRING_NAME.clone(),
            )]))
            .unwrap();
        types
            .insert(ResourceType::new(TopLevelType::new(
                "contact",
                ComplexType::new("contact--type"),
            )))
            .unwrap();
        types
            .insert(NamedQueryType::new(TopLevelType::new(
                "active",
                ComplexType::new("active--type"),
            )))
            .unwrap();
        document
    }

    #[test]
    fn views_filter_by_kind_and_key() {
        let document = document();

        assert_eq!(document.types().len(), 5);
        assert_eq!(document.simple_types().keys().collect::<Vec<_>>(), ["code"]);
        assert_eq!(document.enum_types().keys().collect::<Vec<_>>(), ["status"]);
        assert_eq!(
            document.complex_types().keys().collect::<Vec<_>>(),
            ["address--type", "contact--type", "active--type"]
        );
        assert_eq!(document.resource_types().len(), 1);
        assert!(document.resource_types().get("contact").is_some());
        assert!(document.resource_types().get("contact--type").is_none());
        assert!(document.service_operation_types().is_empty());
        assert_eq!(
            document.named_query_types().get("active").map(|q| q.top_level.complex.name.as_str()),
            Some("active--type")
        );
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut document = document();
        assert_eq!(
            document.types_mut().insert(ComplexType::new("code")),
            Err(UnsupportedSchemaError::DuplicateType("code".to_string()))
        );
        assert_eq!(document.types().len(), 5);
    }

    #[test]
    fn wrapper_names_share_the_type_namespace() {
        let mut document = document();
        let types = document.types_mut();
        let duplicate = |name: &str| Err(UnsupportedSchemaError::DuplicateType(name.to_string()));

        assert_eq!(
            types.insert(ComplexType::new("party").with_list(ListDescriptor::new("code", "p"))),
            duplicate("code")
        );
        assert_eq!(
            types.insert(ComplexType::new("party").with_list(ListDescriptor::new("party", "p"))),
            duplicate("party")
        );
        types
            .insert(ComplexType::new("party").with_list(ListDescriptor::new("parties", "p")))
            .unwrap();
        assert_eq!(types.insert(ComplexType::new("parties")), duplicate("parties"));
        assert_eq!(
            types.attach_list("address--type", ListDescriptor::new("parties", "a")),
            duplicate("parties")
        );

        types
            .attach_list("address--type", ListDescriptor::new("addresses", "a"))
            .unwrap();
        assert!(types.is_claimed("addresses"));
        assert_eq!(types.len(), 6);
    }

    #[test]
    fn remove_keeps_order_and_index() {
        let mut document = document();
        let removed = document.types_mut().remove("status").unwrap();
        assert_eq!(removed.name(), "status");

        let names: Vec<_> = document.types().iter().map(SchemaType::name).collect();
        assert_eq!(names, ["code", "address--type", "contact--type", "active--type"]);
        assert_eq!(
            document.types().get("active--type").map(SchemaType::name),
            Some("active--type")
        );
        assert!(!document.types().contains("status"));
    }

    #[test]
    fn descendants_walk_in_declaration_order() {
        let document = document();
        let kinds: Vec<_> = document
            .descendants()
            .map(|node| match node {
                SchemaNode::Type(t) => t.name().to_string(),
                SchemaNode::Property(p) => format!("property {}", p.name),
                SchemaNode::ChoiceItem(c) => format!("branch {}", c.name),
                SchemaNode::TypeReference(r) => format!("ref {}", r.qualified_name().local_name),
            })
            .collect();
        assert_eq!(
            kinds,
            [
                "code",
                "ref string",
                "status",
                "ref string",
                "address--type",
                "property city",
                "ref string",
                "contact--type",
                "active--type",
            ]
        );
        assert_eq!(document.type_references().count(), 3);
    }
}
