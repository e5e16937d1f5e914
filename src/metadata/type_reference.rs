use sdata_xsd::QName;

use super::node::{SchemaNode, SchemaNodeMut, SchemaObject};

/// A by-name link to another type, e.g. the declared type of a property.
///
/// The link is non-owning: the reference keeps the qualified name it was declared with plus the
/// qualified name of the type it was bound to by the last compile, which differs from the
/// former when the reference names a collection wrapper. Use
/// [`SchemaDocument::resolve`](crate::SchemaDocument::resolve) to get at the type itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeReference {
    qualified_name: QName,
    resolved: Option<QName>,
}

impl TypeReference {
    pub fn new(qualified_name: QName) -> Self {
        Self {
            qualified_name,
            resolved: None,
        }
    }

    pub fn qualified_name(&self) -> &QName {
        &self.qualified_name
    }

    /// The qualified name of the declared type this reference was bound to.
    pub fn resolved_name(&self) -> Option<&QName> {
        self.resolved.as_ref()
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.is_some()
    }

    pub(crate) fn bind(&mut self, target: Option<QName>) {
        self.resolved = target;
    }
}

impl SchemaObject for TypeReference {
    fn children(&self) -> Vec<SchemaNode<'_>> {
        Vec::new()
    }

    fn children_mut(&mut self) -> Vec<SchemaNodeMut<'_>> {
        Vec::new()
    }
}
