//! Emission of the type model as a generic schema document.

use std::io;

use sdata_xsd::{NamespaceBinding, SchemaItem, XmlSchema, XS_NAMESPACE};

use crate::{
    error::Error,
    metadata::{ComplexType, SchemaDocument, SchemaType},
    sme::{SME_NAMESPACE, SME_PREFIX},
};

impl SchemaDocument {
    /// Builds the generic schema document for this model.
    ///
    /// Top-level types are written as a global element followed by their complex type, and
    /// every collection wrapper as a complex type right after its item type.
    pub fn write(&self) -> XmlSchema {
        let target_namespace = self.target_namespace.as_deref();

        let mut namespaces = self.namespaces.clone();
        ensure_binding(&mut namespaces, SME_NAMESPACE, SME_PREFIX);
        ensure_binding(&mut namespaces, XS_NAMESPACE, "xs");
        if let Some(target_namespace) = target_namespace {
            ensure_binding(&mut namespaces, target_namespace, "");
        }

        let mut items = Vec::new();
        for schema_type in self.types() {
            match schema_type {
                SchemaType::Simple(simple) => {
                    items.push(SchemaItem::SimpleType(simple.map_to_xsd()))
                }
                SchemaType::Enum(enum_type) => {
                    items.push(SchemaItem::SimpleType(enum_type.map_to_xsd()))
                }
                SchemaType::Choice(choice) => {
                    items.push(SchemaItem::ComplexType(choice.map_to_xsd()))
                }
                SchemaType::Complex(complex) => {
                    write_complex_type(&mut items, complex, target_namespace)
                }
                SchemaType::Resource(resource) => {
                    items.push(SchemaItem::Element(resource.element_to_xsd(target_namespace)));
                    write_complex_type(&mut items, &resource.top_level.complex, target_namespace);
                }
                SchemaType::ServiceOperation(operation) => {
                    items.push(SchemaItem::Element(operation.element_to_xsd(target_namespace)));
                    write_complex_type(&mut items, &operation.top_level.complex, target_namespace);
                }
                SchemaType::NamedQuery(query) => {
                    items.push(SchemaItem::Element(query.element_to_xsd(target_namespace)));
                    write_complex_type(&mut items, &query.top_level.complex, target_namespace);
                }
            }
        }

        XmlSchema {
            id: self.id.clone(),
            target_namespace: self.target_namespace.clone(),
            version: self.version.clone(),
            element_form_default: self.element_form_default,
            namespaces,
            imports: self.imports.clone(),
            items,
        }
    }

    pub fn to_xml_string(&self) -> Result<String, Error> {
        Ok(self.write().to_xml_string()?)
    }

    pub fn write_to(&self, writer: impl io::Write) -> Result<(), Error> {
        Ok(self.write().write_to(writer)?)
    }
}

fn write_complex_type(
    items: &mut Vec<SchemaItem>,
    complex: &ComplexType,
    target_namespace: Option<&str>,
) {
    items.push(SchemaItem::ComplexType(complex.map_to_xsd()));
    if let Some(wrapper) = complex.wrapper_to_xsd(target_namespace) {
        items.push(SchemaItem::ComplexType(wrapper));
    }
}

/// Binds `uri` unless some prefix already does, preferring `prefix` when it is free.
fn ensure_binding(namespaces: &mut Vec<NamespaceBinding>, uri: &str, prefix: &str) {
    if namespaces.iter().any(|ns| ns.uri == uri) {
        return;
    }

    let stem = if prefix.is_empty() { "tns" } else { prefix };
    let free = std::iter::once(prefix.to_string())
        .chain(std::iter::once(stem.to_string()))
        .chain((1..).map(|n| format!("{stem}{n}")))
        .find(|candidate| namespaces.iter().all(|ns| ns.prefix != *candidate));

    if let Some(free) = free {
        namespaces.push(NamespaceBinding::new(free, uri));
    }
}
