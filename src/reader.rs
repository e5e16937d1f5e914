//! Recognition of the SData conventions in a generic schema document.

use std::io;

use sdata_xsd::{ComplexTypeDecl, Compositor, ElementDecl, Particle, SchemaItem, XmlSchema};
use tracing::{debug, warn};

use crate::{
    error::{Error, UnsupportedSchemaError},
    metadata::{
        qualify, simple_type_from_xsd, top_level_from_xsd, typed_member, ChoiceType, ComplexType,
        ListDescriptor, SchemaDocument, Types,
    },
};

/// Lookbehind carried from one schema item to the next.
#[derive(Default)]
struct ReadState<'a> {
    /// The last global element, which may announce the next complex type.
    element: Option<&'a ElementDecl>,
    pending: Pending<'a>,
}

#[derive(Default)]
enum Pending<'a> {
    #[default]
    Nothing,
    /// A complex type whose wrapper may follow.
    ItemType(String),
    /// A wrapper whose item type may follow.
    Wrapper(Wrapper<'a>),
}

struct Wrapper<'a> {
    decl: &'a ComplexTypeDecl,
    item: &'a ElementDecl,
    item_name: &'a str,
}

impl Wrapper<'_> {
    fn list_descriptor(&self) -> ListDescriptor {
        ListDescriptor {
            name: self.decl.name.clone(),
            item_name: self.item_name.to_string(),
            any_attribute: self.decl.any_attribute,
        }
    }
}

impl<'a> Pending<'a> {
    /// Drops the state, complaining about a wrapper nobody claimed.
    fn discard(self) {
        if let Self::Wrapper(wrapper) = self {
            warn!(
                wrapper = %wrapper.decl.name,
                "collection wrapper is not adjacent to its item type, ignoring it"
            );
        }
    }
}

struct Reader<'a> {
    target_namespace: Option<&'a str>,
    types: Types,
}

impl<'a> Reader<'a> {
    fn read_item(
        &mut self,
        item: &'a SchemaItem,
        state: ReadState<'a>,
    ) -> Result<ReadState<'a>, UnsupportedSchemaError> {
        match item {
            SchemaItem::Element(element) => {
                if element.name.is_none() {
                    return Err(UnsupportedSchemaError::UnsupportedItem {
                        kind: "element",
                        name: element
                            .ref_name
                            .as_ref()
                            .map(ToString::to_string)
                            .unwrap_or_default(),
                    });
                }
                state.pending.discard();
                Ok(ReadState {
                    element: Some(element),
                    pending: Pending::Nothing,
                })
            }
            SchemaItem::ComplexType(decl) => match &decl.particle {
                Some(particle) if particle.compositor == Compositor::Sequence => {
                    self.read_wrapper(decl, particle, state)
                }
                Some(particle) if particle.compositor == Compositor::Choice => {
                    state.pending.discard();
                    self.types.insert(ChoiceType::map_from_xsd(decl, particle)?)?;
                    Ok(ReadState::default())
                }
                _ => self.read_complex_type(decl, state),
            },
            SchemaItem::SimpleType(decl) => {
                state.pending.discard();
                self.types.insert(simple_type_from_xsd(decl)?)?;
                Ok(ReadState::default())
            }
            other => Err(UnsupportedSchemaError::UnsupportedItem {
                kind: other.kind(),
                name: other.name().unwrap_or_default().to_string(),
            }),
        }
    }

    /// A complex type without particle or with an `<all>` group.
    fn read_complex_type(
        &mut self,
        decl: &'a ComplexTypeDecl,
        state: ReadState<'a>,
    ) -> Result<ReadState<'a>, UnsupportedSchemaError> {
        let mut complex = ComplexType::map_from_xsd(decl)?;
        let qualified_name = complex.qualified_name(self.target_namespace);

        let pending = match state.pending {
            Pending::Wrapper(wrapper) => {
                if wrapper.item.type_name.as_ref() != Some(&qualified_name) {
                    return Err(UnsupportedSchemaError::WrapperMismatch {
                        wrapper: wrapper.decl.name.clone(),
                        expected: decl.name.clone(),
                        found: wrapper
                            .item
                            .type_name
                            .as_ref()
                            .map(ToString::to_string)
                            .unwrap_or_default(),
                    });
                }
                debug!(
                    item_type = %decl.name,
                    wrapper = %wrapper.decl.name,
                    "attached collection wrapper"
                );
                complex.list = Some(wrapper.list_descriptor());
                Pending::Nothing
            }
            Pending::ItemType(_) | Pending::Nothing => Pending::ItemType(decl.name.clone()),
        };

        let announced = state
            .element
            .filter(|element| element.type_name.as_ref() == Some(&qualified_name));
        match announced {
            Some(element) => {
                let element_name = element.name.as_deref().unwrap_or_default();
                let schema_type = top_level_from_xsd(element, element_name, complex)?;
                debug!(
                    element = element_name,
                    type_name = %decl.name,
                    kind = schema_type.kind(),
                    "read top-level type"
                );
                self.types.insert(schema_type)?;
            }
            None => self.types.insert(complex)?,
        }

        Ok(ReadState {
            element: None,
            pending,
        })
    }

    /// A complex type with a `<sequence>`, which can only be a collection wrapper.
    fn read_wrapper(
        &mut self,
        decl: &'a ComplexTypeDecl,
        particle: &'a Particle,
        state: ReadState<'a>,
    ) -> Result<ReadState<'a>, UnsupportedSchemaError> {
        let malformed = || UnsupportedSchemaError::MalformedWrapper {
            wrapper: decl.name.clone(),
        };
        let [item] = particle.items.as_slice() else {
            return Err(malformed());
        };
        let member = typed_member(item, &decl.name).map_err(|_| malformed())?;
        let wrapper = Wrapper {
            decl,
            item: member.element,
            item_name: member.name,
        };

        if let Pending::ItemType(item_type) = &state.pending {
            if member.type_name == &qualify(self.target_namespace, item_type) {
                self.types.attach_list(item_type, wrapper.list_descriptor())?;
                debug!(item_type = %item_type, wrapper = %decl.name, "attached collection wrapper");
                return Ok(ReadState {
                    element: state.element,
                    pending: Pending::Nothing,
                });
            }
        }

        state.pending.discard();
        Ok(ReadState {
            element: state.element,
            pending: Pending::Wrapper(wrapper),
        })
    }

    fn finish(self, state: ReadState<'a>) -> Types {
        state.pending.discard();
        self.types
    }
}

impl SchemaDocument {
    /// Builds the type model of `schema` and compiles it.
    ///
    /// Fails on the first item that does not fit the SData conventions.
    pub fn read(schema: &XmlSchema) -> Result<Self, UnsupportedSchemaError> {
        let mut reader = Reader {
            target_namespace: schema.target_namespace.as_deref(),
            types: Types::default(),
        };

        let mut state = ReadState::default();
        for item in &schema.items {
            state = reader.read_item(item, state)?;
        }

        let mut document = Self {
            id: schema.id.clone(),
            target_namespace: schema.target_namespace.clone(),
            version: schema.version.clone(),
            element_form_default: schema.element_form_default,
            namespaces: schema.namespaces.clone(),
            imports: schema.imports.clone(),
            types: reader.finish(state),
        };
        document.compile();
        Ok(document)
    }

    pub fn parse(text: &str) -> Result<Self, Error> {
        Ok(Self::read(&XmlSchema::parse(text)?)?)
    }

    pub fn from_reader(reader: impl io::Read) -> Result<Self, Error> {
        Ok(Self::read(&XmlSchema::from_reader(reader)?)?)
    }
}
