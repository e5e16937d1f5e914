//! Binding of type references to the types they name.

use std::collections::{hash_map::Entry, HashMap};

use sdata_xsd::QName;
use tracing::{trace, warn};

use crate::metadata::{SchemaDocument, SchemaNode, SchemaNodeMut, SchemaType};

/// Lookup from the qualified names a reference may use to the declared type it denotes.
///
/// Besides one entry per declared type, every collection wrapper gets an entry under its own
/// name pointing at the item type, since wrappers are not types of their own.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    lookup: HashMap<QName, QName>,
}

impl SymbolTable {
    pub fn build(document: &SchemaDocument) -> Self {
        let mut table = Self::default();
        table.extend_from(document);
        table
    }

    /// Adds the types of `document`, e.g. to resolve across several documents.
    pub fn extend_from(&mut self, document: &SchemaDocument) {
        let namespace = document.target_namespace.as_deref();

        for schema_type in document.types() {
            let name = schema_type.qualified_name(namespace);
            self.lookup.insert(name.clone(), name);
        }

        // Names are unique within a document, but a merged document may declare a type under
        // the name of a wrapper. The declared type wins.
        for complex in document.types().iter().filter_map(SchemaType::as_complex) {
            let Some(list_name) = complex.list_qualified_name(namespace) else {
                continue;
            };
            match self.lookup.entry(list_name) {
                Entry::Occupied(entry) => warn!(
                    wrapper = %entry.key(),
                    item_type = %complex.name,
                    "collection wrapper shadowed by a declared type"
                ),
                Entry::Vacant(entry) => {
                    entry.insert(complex.qualified_name(namespace));
                }
            }
        }
    }

    /// The qualified name of the declared type `name` denotes.
    pub fn get(&self, name: &QName) -> Option<&QName> {
        self.lookup.get(name)
    }

    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }
}

impl SchemaDocument {
    /// Rebinds every type reference in the document against its own declarations.
    ///
    /// References to undeclared names are left unbound.
    pub fn compile(&mut self) {
        let table = SymbolTable::build(self);
        trace!(entries = table.len(), "built symbol table");
        self.bind(&table);
    }

    /// Rebinds every type reference in the document against `table`.
    pub fn bind(&mut self, table: &SymbolTable) {
        let mut stack: Vec<SchemaNodeMut<'_>> = self
            .types_mut()
            .iter_mut()
            .map(SchemaNodeMut::Type)
            .collect();

        while let Some(node) = stack.pop() {
            match node {
                SchemaNodeMut::TypeReference(reference) => {
                    let target = table.get(reference.qualified_name()).cloned();
                    if target.is_none() {
                        trace!(name = %reference.qualified_name(), "unresolved type reference");
                    }
                    reference.bind(target);
                }
                node => stack.extend(node.into_children()),
            }
        }
    }

    /// References that the last compile could not bind.
    pub fn unresolved_references(&self) -> impl Iterator<Item = &QName> {
        self.descendants().filter_map(|node| match node {
            SchemaNode::TypeReference(reference) if !reference.is_resolved() => {
                Some(reference.qualified_name())
            }
            _ => None,
        })
    }
}
