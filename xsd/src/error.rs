use thiserror::Error;

#[derive(Debug, Error)]
pub enum XsdError {
    #[error("malformed XML: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("expected a <schema> document element, found <{0}>")]
    NotASchema(String),
    #[error("Failed to resolve prefix {0:?} to a namespace URI")]
    NamePrefixNotResolved(String),
    #[error("missing required attribute {attribute:?} on <{element}>")]
    MissingAttribute {
        element: String,
        attribute: &'static str,
    },
    #[error("invalid {datatype} value {value:?}")]
    InvalidValue {
        value: String,
        datatype: &'static str,
    },
    #[error("invalid value {value:?} for attribute {attribute:?} on <{element}>, expected {datatype}")]
    InvalidAttribute {
        element: String,
        attribute: String,
        value: String,
        datatype: &'static str,
    },
    #[error("unsupported <{element}> inside <{context}>")]
    Unsupported { element: String, context: String },
    #[error("import of namespace {0:?} violates the import constraints")]
    ImportConstraint(Option<String>),
    #[error("namespace {0:?} is not bound to a usable prefix")]
    UnboundNamespace(String),
    #[error("failed to write schema: {0}")]
    Write(#[from] quick_xml::Error),
    #[error("written schema is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
