//! Object model for the subset of XML Schema used by SData metadata documents.
//!
//! Documents are parsed with `roxmltree` into an [`XmlSchema`] tree that keeps every global item in
//! document order, together with the namespace bindings of the root element and any attributes in
//! foreign namespaces. The tree can be written back with [`XmlSchema::to_xml_string`].

pub mod attribute_decl;
pub mod complex_type_def;
pub mod constraining_facet;
pub mod element_decl;
pub mod error;
pub mod import;
pub mod model_group_def;
pub mod particle;
pub mod schema;
pub mod shared;
pub mod simple_type_def;
pub mod xstypes;

mod builtins;
mod values;
mod writer;

pub use attribute_decl::{AttributeDecl, AttributeUse};
pub use builtins::{XML_NAMESPACE, XS_NAMESPACE, XS_STRING_NAME};
pub use complex_type_def::ComplexTypeDecl;
pub use constraining_facet::{Facet, WhiteSpaceValue};
pub use element_decl::ElementDecl;
pub use error::XsdError;
pub use import::Import;
pub use model_group_def::GroupDecl;
pub use particle::{Compositor, MaxOccurs, Particle, ParticleItem, Wildcard};
pub use schema::{Form, NamespaceBinding, ParseOptions, SchemaItem, XmlSchema};
pub use shared::UnhandledAttribute;
pub use simple_type_def::{Restriction, SimpleTypeContent, SimpleTypeDecl};
pub use xstypes::{AnyURI, NCName, QName};
