use crate::{
    error::XsdError,
    shared::unsupported,
    values::{attribute, required_attribute},
};
use roxmltree::Node;

/// A single constraining facet of a `<restriction>` (pt. 2, §4.3), in document order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Facet {
    Length(u64),
    MinLength(u64),
    MaxLength(u64),
    Pattern(String),
    Enumeration(String),
    WhiteSpace(WhiteSpaceValue),
    MaxInclusive(String),
    MaxExclusive(String),
    MinExclusive(String),
    MinInclusive(String),
    TotalDigits(u64),
    FractionDigits(u64),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WhiteSpaceValue {
    Preserve,
    Replace,
    Collapse,
}

impl WhiteSpaceValue {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Preserve => "preserve",
            Self::Replace => "replace",
            Self::Collapse => "collapse",
        }
    }
}

impl Facet {
    pub fn is_enumeration(&self) -> bool {
        matches!(self, Self::Enumeration(_))
    }

    pub fn tag_name(&self) -> &'static str {
        match self {
            Self::Length(_) => "length",
            Self::MinLength(_) => "minLength",
            Self::MaxLength(_) => "maxLength",
            Self::Pattern(_) => "pattern",
            Self::Enumeration(_) => "enumeration",
            Self::WhiteSpace(_) => "whiteSpace",
            Self::MaxInclusive(_) => "maxInclusive",
            Self::MaxExclusive(_) => "maxExclusive",
            Self::MinExclusive(_) => "minExclusive",
            Self::MinInclusive(_) => "minInclusive",
            Self::TotalDigits(_) => "totalDigits",
            Self::FractionDigits(_) => "fractionDigits",
        }
    }

    /// The lexical form of the `value` attribute.
    pub fn value(&self) -> String {
        match self {
            Self::Length(n)
            | Self::MinLength(n)
            | Self::MaxLength(n)
            | Self::TotalDigits(n)
            | Self::FractionDigits(n) => n.to_string(),
            Self::Pattern(s)
            | Self::Enumeration(s)
            | Self::MaxInclusive(s)
            | Self::MaxExclusive(s)
            | Self::MinExclusive(s)
            | Self::MinInclusive(s) => s.clone(),
            Self::WhiteSpace(ws) => ws.as_str().to_string(),
        }
    }

    /// `true` if `node` is a facet element this object model knows about.
    pub(crate) fn is_facet_element(node: Node) -> bool {
        matches!(
            node.tag_name().name(),
            "length"
                | "minLength"
                | "maxLength"
                | "pattern"
                | "enumeration"
                | "whiteSpace"
                | "maxInclusive"
                | "maxExclusive"
                | "minExclusive"
                | "minInclusive"
                | "totalDigits"
                | "fractionDigits"
        )
    }

    pub(crate) fn map_from_xml(facet: Node) -> Result<Self, XsdError> {
        let facet = match facet.tag_name().name() {
            "length" => Self::Length(required_attribute(facet, "value")?),
            "minLength" => Self::MinLength(required_attribute(facet, "value")?),
            "maxLength" => Self::MaxLength(required_attribute(facet, "value")?),
            "totalDigits" => Self::TotalDigits(required_attribute(facet, "value")?),
            "fractionDigits" => Self::FractionDigits(required_attribute(facet, "value")?),
            // The enumeration value is kept as written; an empty string is a legal literal
            "enumeration" => Self::Enumeration(attribute(facet, "value")?.unwrap_or_default()),
            "pattern" => Self::Pattern(required_attribute(facet, "value")?),
            "maxInclusive" => Self::MaxInclusive(required_attribute(facet, "value")?),
            "maxExclusive" => Self::MaxExclusive(required_attribute(facet, "value")?),
            "minExclusive" => Self::MinExclusive(required_attribute(facet, "value")?),
            "minInclusive" => Self::MinInclusive(required_attribute(facet, "value")?),
            "whiteSpace" => {
                let value = required_attribute::<String>(facet, "value")?;
                Self::WhiteSpace(match value.as_str() {
                    "preserve" => WhiteSpaceValue::Preserve,
                    "replace" => WhiteSpaceValue::Replace,
                    "collapse" => WhiteSpaceValue::Collapse,
                    _ => {
                        return Err(XsdError::InvalidAttribute {
                            element: "whiteSpace".to_string(),
                            attribute: "value".to_string(),
                            value,
                            datatype: "preserve | replace | collapse",
                        })
                    }
                })
            }
            _ => return Err(unsupported(facet, facet.parent().unwrap_or(facet))),
        };
        Ok(facet)
    }
}
