//! Reads and writes SData metadata schemas.
//!
//! An SData schema is an XML Schema document that follows a few conventions on top of plain XSD:
//! a global element carrying `sme:role` introduces a resource kind, service operation or named
//! query, and a complex type holding a single unbounded element next to its item type is that
//! type's collection wrapper. [`SchemaDocument::read`] recognizes these conventions and builds a
//! typed model, [`SchemaDocument::write`] emits them again.
//!
//! ```no_run
//! # fn main() -> Result<(), sdata_schema::Error> {
//! let text = std::fs::read_to_string("contacts.xsd").map_err(sdata_schema::xsd::XsdError::from)?;
//! let document = sdata_schema::SchemaDocument::parse(&text)?;
//! for resource in document.resource_types().iter() {
//!     println!("{}", resource.top_level.element_name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod compile;
pub mod error;
pub mod metadata;
mod reader;
pub mod sme;
mod writer;

#[cfg(test)]
mod tests;

pub use sdata_xsd as xsd;

pub use compile::SymbolTable;
pub use error::{Error, UnsupportedSchemaError};
pub use metadata::{
    ChoiceItem, ChoiceType, ComplexType, EnumType, InvocationMode, ListDescriptor,
    NamedQueryType, Property, ResourceCapabilities, ResourceType, Role, SchemaDocument,
    SchemaNode, SchemaType, ServiceOperationType, SimpleType, TopLevelType, TypeReference,
};
pub use sme::SME_NAMESPACE;
