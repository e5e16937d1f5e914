use sdata_xsd::{
    ComplexTypeDecl, Compositor, ElementDecl, MaxOccurs, Particle, ParticleItem, QName,
    UnhandledAttribute,
};

use super::{
    check_no_attributes, qualify, typed_member, unsupported_content,
    node::{SchemaNode, SchemaNodeMut, SchemaObject},
    TypeReference,
};
use crate::{
    error::UnsupportedSchemaError,
    sme::{SmeAttributeWriter, SmeAttributes},
};

/// A structured type: the element members of an `<all>` group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComplexType {
    pub name: String,
    pub properties: Vec<Property>,
    pub any_attribute: bool,
    /// Set when the type also has a collection wrapper.
    pub list: Option<ListDescriptor>,
    pub extensions: Vec<UnhandledAttribute>,
}

/// The collection wrapper of a complex type.
///
/// In a document this is a second complex type holding a `<sequence>` with one optional,
/// unbounded element of the item type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListDescriptor {
    pub name: String,
    pub item_name: String,
    pub any_attribute: bool,
}

impl ListDescriptor {
    pub fn new(name: impl Into<String>, item_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            item_name: item_name.into(),
            any_attribute: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub type_ref: TypeReference,
    pub min_occurs: u64,
    pub max_occurs: MaxOccurs,
    pub nillable: bool,
    pub label: Option<String>,
    pub is_mandatory: Option<bool>,
    pub is_read_only: Option<bool>,
    pub can_sort: Option<bool>,
    pub can_filter: Option<bool>,
    pub can_group: Option<bool>,
    pub precision: Option<u32>,
    pub scale: Option<u32>,
    pub max_length: Option<u32>,
    pub extensions: Vec<UnhandledAttribute>,
}

impl ComplexType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
            any_attribute: false,
            list: None,
            extensions: Vec::new(),
        }
    }

    pub fn with_properties(mut self, properties: Vec<Property>) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_list(mut self, list: ListDescriptor) -> Self {
        self.list = Some(list);
        self
    }

    pub fn qualified_name(&self, target_namespace: Option<&str>) -> QName {
        qualify(target_namespace, &self.name)
    }

    pub fn list_qualified_name(&self, target_namespace: Option<&str>) -> Option<QName> {
        self.list
            .as_ref()
            .map(|list| qualify(target_namespace, &list.name))
    }

    /// Maps a complex type whose particle is absent or an `<all>` group.
    pub(crate) fn map_from_xsd(decl: &ComplexTypeDecl) -> Result<Self, UnsupportedSchemaError> {
        check_no_attributes(decl)?;

        let properties = match &decl.particle {
            None => Vec::new(),
            Some(particle) if particle.compositor == Compositor::All => particle
                .items
                .iter()
                .map(|item| Property::map_from_xsd(item, &decl.name))
                .collect::<Result<_, _>>()?,
            Some(particle) => {
                return Err(unsupported_content(
                    &decl.name,
                    format!("<{}> particle", particle.compositor.tag_name()),
                ))
            }
        };

        Ok(Self {
            name: decl.name.clone(),
            properties,
            any_attribute: decl.any_attribute,
            list: None,
            extensions: decl.unhandled_attributes.clone(),
        })
    }

    pub(crate) fn map_to_xsd(&self) -> ComplexTypeDecl {
        let particle = (!self.properties.is_empty()).then(|| {
            Particle::new(
                Compositor::All,
                self.properties
                    .iter()
                    .map(|property| ParticleItem::Element(property.map_to_xsd()))
                    .collect(),
            )
        });

        let mut decl = ComplexTypeDecl::new(self.name.clone(), particle);
        decl.any_attribute = self.any_attribute;
        decl.unhandled_attributes = self.extensions.clone();
        decl
    }

    /// The wrapper type, if the type has one.
    pub(crate) fn wrapper_to_xsd(&self, target_namespace: Option<&str>) -> Option<ComplexTypeDecl> {
        let list = self.list.as_ref()?;

        let mut item =
            ElementDecl::new(list.item_name.clone(), self.qualified_name(target_namespace));
        item.min_occurs = 0;
        item.max_occurs = MaxOccurs::Unbounded;

        let mut decl = ComplexTypeDecl::new(
            list.name.clone(),
            Some(Particle::new(
                Compositor::Sequence,
                vec![ParticleItem::Element(item)],
            )),
        );
        decl.any_attribute = list.any_attribute;
        Some(decl)
    }
}

impl SchemaObject for ComplexType {
    fn children(&self) -> Vec<SchemaNode<'_>> {
        self.properties.iter().map(SchemaNode::Property).collect()
    }

    fn children_mut(&mut self) -> Vec<SchemaNodeMut<'_>> {
        self.properties
            .iter_mut()
            .map(SchemaNodeMut::Property)
            .collect()
    }
}

impl Property {
    pub fn new(name: impl Into<String>, type_name: QName) -> Self {
        Self {
            name: name.into(),
            type_ref: TypeReference::new(type_name),
            min_occurs: 1,
            max_occurs: MaxOccurs::Count(1),
            nillable: false,
            label: None,
            is_mandatory: None,
            is_read_only: None,
            can_sort: None,
            can_filter: None,
            can_group: None,
            precision: None,
            scale: None,
            max_length: None,
            extensions: Vec::new(),
        }
    }

    pub(crate) fn map_from_xsd(
        item: &ParticleItem,
        owner: &str,
    ) -> Result<Self, UnsupportedSchemaError> {
        let member = typed_member(item, owner)?;
        let element = member.element;
        let mut attributes = SmeAttributes::new(member.name, &element.unhandled_attributes);

        Ok(Self {
            name: member.name.to_string(),
            type_ref: TypeReference::new(member.type_name.clone()),
            min_occurs: element.min_occurs,
            max_occurs: element.max_occurs,
            nillable: element.nillable,
            label: attributes.take("label"),
            is_mandatory: attributes.take_bool("isMandatory")?,
            is_read_only: attributes.take_bool("isReadOnly")?,
            can_sort: attributes.take_bool("canSort")?,
            can_filter: attributes.take_bool("canFilter")?,
            can_group: attributes.take_bool("canGroup")?,
            precision: attributes.take_u32("precision")?,
            scale: attributes.take_u32("scale")?,
            max_length: attributes.take_u32("maxLength")?,
            extensions: attributes.into_rest(),
        })
    }

    pub(crate) fn map_to_xsd(&self) -> ElementDecl {
        let mut element =
            ElementDecl::new(self.name.clone(), self.type_ref.qualified_name().clone());
        element.min_occurs = self.min_occurs;
        element.max_occurs = self.max_occurs;
        element.nillable = self.nillable;
        element.unhandled_attributes = SmeAttributeWriter::default()
            .push_opt("label", self.label.as_ref())
            .push_opt("isMandatory", self.is_mandatory)
            .push_opt("isReadOnly", self.is_read_only)
            .push_opt("canSort", self.can_sort)
            .push_opt("canFilter", self.can_filter)
            .push_opt("canGroup", self.can_group)
            .push_opt("precision", self.precision)
            .push_opt("scale", self.scale)
            .push_opt("maxLength", self.max_length)
            .extend(&self.extensions)
            .finish();
        element
    }
}

impl SchemaObject for Property {
    fn children(&self) -> Vec<SchemaNode<'_>> {
        vec![SchemaNode::TypeReference(&self.type_ref)]
    }

    fn children_mut(&mut self) -> Vec<SchemaNodeMut<'_>> {
        vec![SchemaNodeMut::TypeReference(&mut self.type_ref)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sme::SME_NAMESPACE;
    use sdata_xsd::{AttributeDecl, SchemaItem, XmlSchema, XS_STRING_NAME};

    fn complex_type(body: &str) -> ComplexTypeDecl {
        let text = format!(
            r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
                          xmlns:sme="http://schemas.sage.com/sdata/sme/2007"
                          xmlns="urn:crm" targetNamespace="urn:crm">
                 {body}
               </xs:schema>"#
        );
        match XmlSchema::parse(&text).unwrap().items.remove(0) {
            SchemaItem::ComplexType(decl) => decl,
            other => panic!("expected a complex type, got {other:?}"),
        }
    }

    #[test]
    fn maps_properties_and_their_sme_attributes() {
        let decl = complex_type(
            r#"<xs:complexType name="contact--type">
                 <xs:all>
                   <xs:element name="name" type="xs:string" minOccurs="0" nillable="true"
                               sme:label="Name" sme:canSort="true" sme:maxLength="64" sme:hint="x"/>
                   <xs:element name="account" type="account--type"/>
                 </xs:all>
                 <xs:anyAttribute/>
               </xs:complexType>"#,
        );

        let complex = ComplexType::map_from_xsd(&decl).unwrap();
        assert_eq!(complex.name, "contact--type");
        assert!(complex.any_attribute);
        assert_eq!(complex.list, None);
        assert_eq!(complex.properties.len(), 2);

        let name = &complex.properties[0];
        assert_eq!(name.type_ref.qualified_name(), &*XS_STRING_NAME);
        assert_eq!(name.min_occurs, 0);
        assert!(name.nillable);
        assert_eq!(name.label.as_deref(), Some("Name"));
        assert_eq!(name.can_sort, Some(true));
        assert_eq!(name.can_filter, None);
        assert_eq!(name.max_length, Some(64));
        assert_eq!(name.extensions.len(), 1);
        assert!(name.extensions[0].name.is(SME_NAMESPACE, "hint"));

        let account = &complex.properties[1];
        assert_eq!(
            account.type_ref.qualified_name(),
            &QName::with_namespace("urn:crm", "account--type")
        );
        assert!(!account.type_ref.is_resolved());

        assert_eq!(complex.map_to_xsd(), decl);
    }

    #[test]
    fn empty_types_have_no_particle() {
        let decl = complex_type(r#"<xs:complexType name="empty"/>"#);
        let complex = ComplexType::map_from_xsd(&decl).unwrap();
        assert!(complex.properties.is_empty());
        assert_eq!(complex.map_to_xsd().particle, None);
    }

    #[test]
    fn rejects_members_that_are_not_typed_elements() {
        let decl = complex_type(
            r#"<xs:complexType name="open">
                 <xs:all><xs:element ref="other"/></xs:all>
               </xs:complexType>"#,
        );
        assert!(matches!(
            ComplexType::map_from_xsd(&decl),
            Err(UnsupportedSchemaError::UnsupportedContent { type_name, .. }) if type_name == "open"
        ));

        let mut decl = ComplexTypeDecl::new("attributed", None);
        decl.attributes.push(AttributeDecl {
            name: Some("id".to_string()),
            ref_name: None,
            type_name: Some(XS_STRING_NAME.clone()),
            use_: Default::default(),
            default: None,
            unhandled_attributes: Vec::new(),
        });
        assert!(matches!(
            ComplexType::map_from_xsd(&decl),
            Err(UnsupportedSchemaError::UnsupportedContent { .. })
        ));
    }

    #[test]
    fn writes_the_collection_wrapper() {
        let complex = ComplexType::new("contact--type")
            .with_list(ListDescriptor::new("contact--list", "contact"));

        let wrapper = complex.wrapper_to_xsd(Some("urn:crm")).unwrap();
        assert_eq!(wrapper.name, "contact--list");
        let particle = wrapper.particle.unwrap();
        assert_eq!(particle.compositor, Compositor::Sequence);
        let ParticleItem::Element(item) = &particle.items[0] else {
            panic!("expected an element member");
        };
        assert_eq!(item.name.as_deref(), Some("contact"));
        assert_eq!(
            item.type_name,
            Some(QName::with_namespace("urn:crm", "contact--type"))
        );
        assert_eq!(item.min_occurs, 0);
        assert_eq!(item.max_occurs, MaxOccurs::Unbounded);

        assert_eq!(ComplexType::new("plain").wrapper_to_xsd(None), None);
    }
}
