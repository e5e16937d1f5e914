use super::builtins::{is_xs_element, XS_NAMESPACE};
use super::error::XsdError;
use super::xstypes::QName;
use roxmltree::Node;

/// A namespace-qualified attribute outside of the XSD namespace, kept verbatim.
///
/// Schema documents use these as extension points (e.g. `sme:role="resourceKind"`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnhandledAttribute {
    pub name: QName,
    pub value: String,
}

impl UnhandledAttribute {
    pub fn new(name: QName, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }

    pub(crate) fn collect_from_xml(node: Node) -> Vec<Self> {
        node.attributes()
            .filter_map(|attribute| {
                let namespace = attribute.namespace()?;
                (namespace != XS_NAMESPACE).then(|| {
                    Self::new(
                        QName::with_namespace(namespace, attribute.name()),
                        attribute.value(),
                    )
                })
            })
            .collect()
    }
}

/// The element children of `node` that carry content, i.e. everything except `<annotation>`.
///
/// Fails for element children outside the XSD namespace, which are only allowed inside
/// annotations.
pub(crate) fn content_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> Result<Vec<Node<'a, 'input>>, XsdError> {
    node.children()
        .filter(|c| c.is_element() && !is_xs_element(*c, "annotation"))
        .map(|c| {
            if c.tag_name().namespace() == Some(XS_NAMESPACE) {
                Ok(c)
            } else {
                Err(unsupported(c, node))
            }
        })
        .collect()
}

pub(crate) fn unsupported(element: Node, context: Node) -> XsdError {
    XsdError::Unsupported {
        element: element.tag_name().name().to_string(),
        context: context.tag_name().name().to_string(),
    }
}
