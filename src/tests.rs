use std::collections::BTreeMap;

use crate::{
    metadata::{ComplexType, ListDescriptor, Property, TopLevelType},
    InvocationMode, ResourceType, Role, SchemaDocument, SchemaType, ServiceOperationType,
};
use sdata_xsd::{Facet, QName, XS_NAMESPACE, XS_STRING_NAME};

const CRM: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
           xmlns:sme="http://schemas.sage.com/sdata/sme/2007"
           xmlns:common="http://schemas.sage.com/common"
           xmlns="http://schemas.sage.com/crm"
           targetNamespace="http://schemas.sage.com/crm"
           elementFormDefault="qualified" version="1.0" id="crm">
  <xs:import namespace="http://schemas.sage.com/common" schemaLocation="common.xsd"/>

  <xs:element name="contact" type="contact--type" sme:role="resourceKind" sme:pluralName="contacts"
              sme:label="Contact" sme:canGet="true" sme:canPost="true" sme:canPagePrevious="false"/>
  <xs:complexType name="contact--type">
    <xs:all>
      <xs:element name="name" type="xs:string" sme:label="Name" sme:canSort="true"/>
      <xs:element name="status" type="contactStatus--enum" minOccurs="0"/>
      <xs:element name="address" type="address--type" minOccurs="0" nillable="true"/>
      <xs:element name="balance" type="xs:decimal" sme:precision="18" sme:scale="2" sme:isReadOnly="true"/>
    </xs:all>
    <xs:anyAttribute/>
  </xs:complexType>
  <xs:complexType name="contact--list">
    <xs:sequence>
      <xs:element name="contact" type="contact--type" minOccurs="0" maxOccurs="unbounded"/>
    </xs:sequence>
    <xs:anyAttribute/>
  </xs:complexType>

  <xs:complexType name="address--list">
    <xs:sequence>
      <xs:element name="address" type="address--type" minOccurs="0" maxOccurs="unbounded"/>
    </xs:sequence>
  </xs:complexType>
  <xs:complexType name="address--type">
    <xs:all>
      <xs:element name="city" type="xs:string"/>
      <xs:element name="postcode" type="postcode--type" minOccurs="0"/>
    </xs:all>
  </xs:complexType>

  <xs:element name="recalculate" type="recalculate--type" sme:role="serviceOperation"
              sme:path="$service/recalculate" sme:invocationMode="async"/>
  <xs:complexType name="recalculate--type">
    <xs:all>
      <xs:element name="contacts" type="contact--list"/>
    </xs:all>
  </xs:complexType>

  <xs:element name="overdue" type="overdue--type" sme:role="query" sme:path="$queries/overdue"/>
  <xs:complexType name="overdue--type"/>

  <xs:complexType name="party--choice">
    <xs:choice>
      <xs:element name="contact" type="contact--type"/>
      <xs:element name="other" type="common:party--type"/>
    </xs:choice>
  </xs:complexType>

  <xs:simpleType name="contactStatus--enum">
    <xs:restriction base="xs:string">
      <xs:enumeration value="Active"/>
      <xs:enumeration value="Inactive"/>
    </xs:restriction>
  </xs:simpleType>
  <xs:simpleType name="postcode--type">
    <xs:restriction base="xs:string">
      <xs:maxLength value="10"/>
      <xs:pattern value="[0-9A-Z ]+"/>
    </xs:restriction>
  </xs:simpleType>
</xs:schema>
"#;

/// Qualified name of every type with its kind, role, element name and wrapper.
fn summary(document: &SchemaDocument) -> BTreeMap<String, String> {
    let namespace = document.target_namespace.as_deref();
    document
        .types()
        .iter()
        .map(|schema_type| {
            let role = schema_type.role().map(Role::as_str).unwrap_or("-");
            let element = schema_type
                .as_top_level()
                .map_or("-", |t| t.element_name.as_str());
            let list = schema_type
                .as_complex()
                .and_then(|c| c.list.as_ref())
                .map_or("-".to_string(), |l| {
                    format!("{}/{}/{}", l.name, l.item_name, l.any_attribute)
                });
            (
                schema_type.qualified_name(namespace).to_string(),
                format!("{} {role} {element} {list}", schema_type.kind()),
            )
        })
        .collect()
}

#[test]
fn reads_the_conventions() {
    let document = SchemaDocument::parse(CRM).unwrap();

    assert_eq!(document.id.as_deref(), Some("crm"));
    assert_eq!(document.imports.len(), 1);
    assert_eq!(document.types().len(), 7);

    let contact = document.resource_types().get("contact").unwrap();
    assert_eq!(contact.plural_name.as_deref(), Some("contacts"));
    assert_eq!(contact.capabilities.can_post, Some(true));
    assert_eq!(contact.capabilities.can_page_previous, Some(false));
    let list = contact.top_level.complex.list.as_ref().unwrap();
    assert_eq!((list.name.as_str(), list.item_name.as_str()), ("contact--list", "contact"));

    let address = document.complex_types().get("address--type").unwrap();
    assert_eq!(address.list.as_ref().map(|l| l.name.as_str()), Some("address--list"));

    let recalculate = document.service_operation_types().get("recalculate").unwrap();
    assert_eq!(recalculate.invocation_mode, Some(InvocationMode::Async));
    // A reference to a wrapper resolves to the item type
    let contacts = &recalculate.top_level.complex.properties[0].type_ref;
    assert!(std::ptr::eq(
        document.resolve(contacts).unwrap(),
        document.types().get("contact--type").unwrap()
    ));

    assert!(document.named_query_types().get("overdue").is_some());
    assert!(document.enum_types().get("contactStatus--enum").is_some());
    assert!(document.simple_types().get("postcode--type").is_some());

    let unresolved: Vec<_> = document
        .unresolved_references()
        .map(|name| name.local_name.as_str())
        .collect();
    assert_eq!(unresolved, ["string", "decimal", "string", "party--type", "string", "string"]);
}

#[test]
fn write_then_read_is_equivalent() {
    let document = SchemaDocument::parse(CRM).unwrap();
    let text = document.to_xml_string().unwrap();
    let reread = SchemaDocument::parse(&text).unwrap();

    assert_eq!(summary(&reread), summary(&document));
    assert_eq!(reread.types(), document.types());
    assert_eq!(reread.imports, document.imports);
    assert_eq!(reread.version, document.version);
    assert_eq!(reread.element_form_default, document.element_form_default);
}

#[test]
fn written_document_pairs_types_with_wrappers() {
    let document = SchemaDocument::parse(CRM).unwrap();
    let schema = document.write();

    let names: Vec<_> = schema
        .items
        .iter()
        .map(|item| format!("{} {}", item.kind(), item.name().unwrap_or_default()))
        .collect();
    assert_eq!(
        names,
        [
            "element contact",
            "complexType contact--type",
            "complexType contact--list",
            "complexType address--type",
            "complexType address--list",
            "element recalculate",
            "complexType recalculate--type",
            "element overdue",
            "complexType overdue--type",
            "complexType party--choice",
            "simpleType contactStatus--enum",
            "simpleType postcode--type",
        ]
    );
}

#[test]
fn programmatic_model_round_trips() {
    let mut document = SchemaDocument::new("urn:orders");
    let order_line = document.qualified_name("orderLine--type");

    let mut resource = ResourceType::new(TopLevelType::new(
        "order",
        ComplexType::new("order--type")
            .with_properties(vec![
                Property::new("reference", XS_STRING_NAME.clone()),
                Property::new("lines", document.qualified_name("orderLine--list")),
            ])
            .with_list(ListDescriptor::new("order--list", "order")),
    ));
    resource.capabilities.has_uuid = Some(true);

    let mut operation = ServiceOperationType::new(TopLevelType::new(
        "approve",
        ComplexType::new("approve--type").with_properties(vec![Property::new("order", order_line)]),
    ));
    operation.path = Some("$service/approve".to_string());

    let decimal = QName::with_namespace(XS_NAMESPACE, "decimal");
    let types = document.types_mut();
    types.insert(resource).unwrap();
    types
        .insert(
            ComplexType::new("orderLine--type")
                .with_properties(vec![Property::new("amount", decimal)])
                .with_list(ListDescriptor::new("orderLine--list", "orderLine")),
        )
        .unwrap();
    types.insert(operation).unwrap();
    types
        .insert(crate::SimpleType::new("code", XS_STRING_NAME.clone(), vec![Facet::Length(4)]))
        .unwrap();
    document.compile();

    let mut sink = Vec::new();
    document.write_to(&mut sink).unwrap();
    let reread = SchemaDocument::from_reader(sink.as_slice()).unwrap();

    assert_eq!(reread.types(), document.types());
    assert_eq!(summary(&reread), summary(&document));
    assert!(matches!(
        reread.types().get("approve--type"),
        Some(SchemaType::ServiceOperation(_))
    ));
}

#[test]
fn text_errors_are_reported_by_layer() {
    assert!(matches!(
        SchemaDocument::parse("<xs:schema"),
        Err(crate::Error::Xsd(_))
    ));

    let text = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
                    <xs:group name="g"><xs:sequence/></xs:group>
                  </xs:schema>"#;
    assert!(matches!(
        SchemaDocument::parse(text),
        Err(crate::Error::Unsupported(crate::UnsupportedSchemaError::UnsupportedItem {
            kind: "group",
            ..
        }))
    ));
}
