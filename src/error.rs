use sdata_xsd::XsdError;
use thiserror::Error;

/// A schema shape the SData conventions do not cover.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum UnsupportedSchemaError {
    #[error("global element `{element}` declares a role type but has no sme:role attribute")]
    MissingRole { element: String },
    #[error("global element `{element}` has unknown role `{role}`")]
    UnknownRole { element: String, role: String },
    #[error("collection wrapper `{wrapper}` must contain exactly one typed element")]
    MalformedWrapper { wrapper: String },
    #[error("collection wrapper `{wrapper}` wraps `{found}` but is followed by `{expected}`")]
    WrapperMismatch {
        wrapper: String,
        expected: String,
        found: String,
    },
    #[error("unsupported schema item: {kind} `{name}`")]
    UnsupportedItem { kind: &'static str, name: String },
    #[error("unsupported content in type `{type_name}`: {content}")]
    UnsupportedContent { type_name: String, content: String },
    #[error("simple type `{name}` is not a restriction")]
    NotARestriction { name: String },
    #[error("invalid value `{value}` for sme:{attribute} on `{owner}`")]
    InvalidAttribute {
        owner: String,
        attribute: &'static str,
        value: String,
    },
    #[error("type `{0}` is declared more than once")]
    DuplicateType(String),
}

/// Errors of the text entry points, which run both the document layer and the translation.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Xsd(#[from] XsdError),
    #[error(transparent)]
    Unsupported(#[from] UnsupportedSchemaError),
}
