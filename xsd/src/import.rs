use roxmltree::Node;

use super::{error::XsdError, values::attribute};

/// This structure represents the `import` element; it is not a schema component.
///
/// Note that an import is allowed to have neither a `schemaLocation` nor a `namespace` attribute.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Import {
    pub namespace: Option<String>,
    pub schema_location: Option<String>,
}

impl Import {
    pub const TAG_NAME: &'static str = "import";

    pub(crate) fn map_from_xml(import: Node, schema: Node) -> Result<Self, XsdError> {
        let namespace = attribute::<String>(import, "namespace")?;
        let schema_location = attribute(import, "schemaLocation")?;

        // § 4.2.6 Schema Representation Constraint: Import Constraints and Semantics
        // 1 The appropriate case among the following must be true:
        let target_namespace = schema.attribute("targetNamespace");
        let valid = match namespace.as_deref() {
            // 1.1 If the namespace [attribute] is present, then its ·actual value· does not match
            //   the ·actual value· of the enclosing <schema>'s targetNamespace [attribute].
            Some(namespace) => target_namespace != Some(namespace),
            // 1.2 If the namespace [attribute] is not present, then the enclosing <schema> has a
            //   targetNamespace [attribute]
            None => target_namespace.is_some(),
        };
        if !valid {
            return Err(XsdError::ImportConstraint(namespace));
        }

        Ok(Import {
            namespace,
            schema_location,
        })
    }
}
