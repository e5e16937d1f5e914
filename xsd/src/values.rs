use crate::error::XsdError;
use crate::particle::MaxOccurs;
use crate::xstypes::QName;
use roxmltree::Node;

pub trait ActualValue: Sized {
    fn convert(src: &str, parent: Node) -> Result<Self, XsdError>;
}

impl ActualValue for String {
    fn convert(src: &str, _parent: Node) -> Result<Self, XsdError> {
        Ok(src.to_string())
    }
}

impl ActualValue for QName {
    fn convert(src: &str, parent: Node) -> Result<Self, XsdError> {
        QName::parse(src.trim(), parent)
    }
}

impl<T: ActualValue> ActualValue for Vec<T> {
    fn convert(src: &str, parent: Node) -> Result<Self, XsdError> {
        // NOTE: This assumes a list with whiteSpace="collapse"
        src.split_ascii_whitespace()
            .map(|a| T::convert(a, parent))
            .collect()
    }
}

impl ActualValue for bool {
    fn convert(src: &str, _parent: Node) -> Result<Self, XsdError> {
        match src.trim() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(XsdError::InvalidValue {
                value: src.to_string(),
                datatype: "xs:boolean",
            }),
        }
    }
}

impl ActualValue for u64 {
    fn convert(src: &str, _parent: Node) -> Result<Self, XsdError> {
        src.trim().parse().map_err(|_| XsdError::InvalidValue {
            value: src.to_string(),
            datatype: "xs:nonNegativeInteger",
        })
    }
}

impl ActualValue for MaxOccurs {
    fn convert(src: &str, parent: Node) -> Result<Self, XsdError> {
        if src.trim() == "unbounded" {
            Ok(MaxOccurs::Unbounded)
        } else {
            u64::convert(src, parent).map(MaxOccurs::Count)
        }
    }
}

pub fn actual_value<T: ActualValue>(x: &str, parent: Node) -> Result<T, XsdError> {
    T::convert(x, parent)
}

/// Reads the ·actual value· of an optional attribute of `node`.
pub(crate) fn attribute<T: ActualValue>(node: Node, name: &str) -> Result<Option<T>, XsdError> {
    node.attribute(name)
        .map(|value| {
            actual_value(value, node).map_err(|e| match e {
                XsdError::InvalidValue { value, datatype } => XsdError::InvalidAttribute {
                    element: node.tag_name().name().to_string(),
                    attribute: name.to_string(),
                    value,
                    datatype,
                },
                other => other,
            })
        })
        .transpose()
}

pub(crate) fn required_attribute<T: ActualValue>(
    node: Node,
    name: &'static str,
) -> Result<T, XsdError> {
    attribute(node, name)?.ok_or_else(|| XsdError::MissingAttribute {
        element: node.tag_name().name().to_string(),
        attribute: name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booleans_accept_lexical_variants() {
        let doc = roxmltree::Document::parse(r#"<e a="1" b="false" c="yes"/>"#).unwrap();
        let e = doc.root_element();
        assert_eq!(attribute::<bool>(e, "a").unwrap(), Some(true));
        assert_eq!(attribute::<bool>(e, "b").unwrap(), Some(false));
        assert_eq!(attribute::<bool>(e, "missing").unwrap(), None);
        let err = attribute::<bool>(e, "c").unwrap_err();
        assert!(matches!(
            err,
            XsdError::InvalidAttribute { attribute, value, .. } if attribute == "c" && value == "yes"
        ));
    }

    #[test]
    fn max_occurs_parses_unbounded() {
        let doc = roxmltree::Document::parse(r#"<e a="unbounded" b="3"/>"#).unwrap();
        let e = doc.root_element();
        assert_eq!(
            required_attribute::<MaxOccurs>(e, "a").unwrap(),
            MaxOccurs::Unbounded
        );
        assert_eq!(
            required_attribute::<MaxOccurs>(e, "b").unwrap(),
            MaxOccurs::Count(3)
        );
        assert!(matches!(
            required_attribute::<MaxOccurs>(e, "c"),
            Err(XsdError::MissingAttribute { attribute: "c", .. })
        ));
    }
}
