use std::io;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;

use super::{
    attribute_decl::{AttributeDecl, AttributeUse},
    builtins::{XML_NAMESPACE, XS_NAMESPACE},
    complex_type_def::ComplexTypeDecl,
    element_decl::ElementDecl,
    error::XsdError,
    import::Import,
    model_group_def::GroupDecl,
    particle::{MaxOccurs, Particle, ParticleItem, Wildcard},
    schema::{NamespaceBinding, SchemaItem, XmlSchema},
    shared::UnhandledAttribute,
    simple_type_def::{SimpleTypeContent, SimpleTypeDecl},
    xstypes::QName,
};

impl XmlSchema {
    /// Serializes the schema as an indented XML document.
    ///
    /// Prefixes are taken from [`XmlSchema::namespaces`]; every namespace used by a qualified
    /// name or an extension attribute must be bound there, except the XSD namespace itself, which
    /// is declared on demand.
    pub fn write_to(&self, writer: impl io::Write) -> Result<(), XsdError> {
        SchemaWriter::new(&self.namespaces, writer).write_schema(self)
    }

    pub fn to_xml_string(&self) -> Result<String, XsdError> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

#[derive(Default)]
struct Attributes(Vec<(String, String)>);

impl Attributes {
    fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push((key.into(), value.into()));
    }

    fn push_opt(&mut self, key: &str, value: Option<impl Into<String>>) {
        if let Some(value) = value {
            self.push(key, value);
        }
    }
}

struct SchemaWriter<'s, W: io::Write> {
    writer: Writer<W>,
    namespaces: &'s [NamespaceBinding],
    xs_prefix: String,
    declare_xs: bool,
}

impl<'s, W: io::Write> SchemaWriter<'s, W> {
    fn new(namespaces: &'s [NamespaceBinding], inner: W) -> Self {
        let bound = namespaces
            .iter()
            .find(|ns| ns.uri == XS_NAMESPACE)
            .map(|ns| ns.prefix.clone());
        let declare_xs = bound.is_none();
        let xs_prefix = bound.unwrap_or_else(|| {
            let mut prefix = "xs".to_string();
            let mut counter = 0;
            while namespaces.iter().any(|ns| ns.prefix == prefix) {
                counter += 1;
                prefix = format!("xs{counter}");
            }
            prefix
        });

        Self {
            writer: Writer::new_with_indent(inner, b' ', 2),
            namespaces,
            xs_prefix,
            declare_xs,
        }
    }

    fn tag(&self, local_name: &str) -> String {
        if self.xs_prefix.is_empty() {
            local_name.to_string()
        } else {
            format!("{}:{}", self.xs_prefix, local_name)
        }
    }

    /// Lexical form of a QName-valued attribute. Unprefixed values resolve against the default
    /// namespace, so it is usable here.
    fn qname_value(&self, name: &QName) -> Result<String, XsdError> {
        let Some(uri) = name.namespace_name.as_deref() else {
            return Ok(name.local_name.clone());
        };
        let prefix = if uri == XS_NAMESPACE {
            Some(self.xs_prefix.as_str())
        } else {
            self.namespaces
                .iter()
                .find(|ns| ns.uri == uri)
                .map(|ns| ns.prefix.as_str())
        };
        match prefix {
            Some("") => Ok(name.local_name.clone()),
            Some(prefix) => Ok(format!("{prefix}:{}", name.local_name)),
            None => Err(XsdError::UnboundNamespace(uri.to_string())),
        }
    }

    /// Attribute names never pick up the default namespace, so this needs a real prefix.
    fn attribute_name(&self, name: &QName) -> Result<String, XsdError> {
        let Some(uri) = name.namespace_name.as_deref() else {
            return Ok(name.local_name.clone());
        };
        if uri == XML_NAMESPACE {
            return Ok(format!("xml:{}", name.local_name));
        }
        self.namespaces
            .iter()
            .find(|ns| ns.uri == uri && !ns.prefix.is_empty())
            .map(|ns| format!("{}:{}", ns.prefix, name.local_name))
            .ok_or_else(|| XsdError::UnboundNamespace(uri.to_string()))
    }

    fn push_unhandled(
        &self,
        attributes: &mut Attributes,
        unhandled: &[UnhandledAttribute],
    ) -> Result<(), XsdError> {
        for attribute in unhandled {
            attributes.push(self.attribute_name(&attribute.name)?, attribute.value.clone());
        }
        Ok(())
    }

    fn open(
        &mut self,
        local_name: &str,
        attributes: Attributes,
        empty: bool,
    ) -> Result<(), XsdError> {
        let mut start = BytesStart::new(self.tag(local_name));
        for (key, value) in &attributes.0 {
            start.push_attribute((key.as_str(), value.as_str()));
        }
        let event = if empty {
            Event::Empty(start)
        } else {
            Event::Start(start)
        };
        self.writer.write_event(event)?;
        Ok(())
    }

    fn close(&mut self, local_name: &str) -> Result<(), XsdError> {
        self.writer
            .write_event(Event::End(BytesEnd::new(self.tag(local_name))))?;
        Ok(())
    }

    fn write_schema(mut self, schema: &XmlSchema) -> Result<(), XsdError> {
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

        let mut attributes = Attributes::default();
        for ns in self.namespaces {
            if ns.prefix.is_empty() {
                attributes.push("xmlns", ns.uri.clone());
            } else {
                attributes.push(format!("xmlns:{}", ns.prefix), ns.uri.clone());
            }
        }
        if self.declare_xs {
            attributes.push(format!("xmlns:{}", self.xs_prefix), XS_NAMESPACE);
        }
        attributes.push_opt("id", schema.id.clone());
        attributes.push_opt("targetNamespace", schema.target_namespace.clone());
        attributes.push_opt("version", schema.version.clone());
        attributes.push_opt(
            "elementFormDefault",
            schema.element_form_default.map(|f| f.as_str()),
        );

        let empty = schema.imports.is_empty() && schema.items.is_empty();
        self.open(XmlSchema::TAG_NAME, attributes, empty)?;
        if empty {
            return Ok(());
        }

        for import in &schema.imports {
            self.write_import(import)?;
        }
        for item in &schema.items {
            match item {
                SchemaItem::Element(element) => self.write_element(element)?,
                SchemaItem::ComplexType(complex_type) => self.write_complex_type(complex_type)?,
                SchemaItem::SimpleType(simple_type) => self.write_simple_type(simple_type)?,
                SchemaItem::Attribute(attribute) => self.write_attribute(attribute)?,
                SchemaItem::Group(group) => self.write_group(group)?,
            }
        }
        self.close(XmlSchema::TAG_NAME)
    }

    fn write_import(&mut self, import: &Import) -> Result<(), XsdError> {
        let mut attributes = Attributes::default();
        attributes.push_opt("namespace", import.namespace.clone());
        attributes.push_opt("schemaLocation", import.schema_location.clone());
        self.open(Import::TAG_NAME, attributes, true)
    }

    fn push_occurs(attributes: &mut Attributes, min_occurs: u64, max_occurs: MaxOccurs) {
        if min_occurs != 1 {
            attributes.push("minOccurs", min_occurs.to_string());
        }
        if max_occurs != MaxOccurs::Count(1) {
            attributes.push("maxOccurs", max_occurs.to_xml_value());
        }
    }

    fn write_element(&mut self, element: &ElementDecl) -> Result<(), XsdError> {
        let mut attributes = Attributes::default();
        attributes.push_opt("name", element.name.clone());
        if let Some(ref_name) = &element.ref_name {
            attributes.push("ref", self.qname_value(ref_name)?);
        }
        if let Some(type_name) = &element.type_name {
            attributes.push("type", self.qname_value(type_name)?);
        }
        Self::push_occurs(&mut attributes, element.min_occurs, element.max_occurs);
        if element.nillable {
            attributes.push("nillable", "true");
        }
        self.push_unhandled(&mut attributes, &element.unhandled_attributes)?;
        self.open(ElementDecl::TAG_NAME, attributes, true)
    }

    fn write_complex_type(&mut self, complex_type: &ComplexTypeDecl) -> Result<(), XsdError> {
        let mut attributes = Attributes::default();
        attributes.push("name", complex_type.name.clone());
        if complex_type.mixed {
            attributes.push("mixed", "true");
        }
        self.push_unhandled(&mut attributes, &complex_type.unhandled_attributes)?;

        let empty = complex_type.particle.is_none()
            && complex_type.attributes.is_empty()
            && !complex_type.any_attribute;
        self.open(ComplexTypeDecl::TAG_NAME, attributes, empty)?;
        if empty {
            return Ok(());
        }

        if let Some(particle) = &complex_type.particle {
            self.write_particle(particle)?;
        }
        for attribute in &complex_type.attributes {
            self.write_attribute(attribute)?;
        }
        if complex_type.any_attribute {
            self.open("anyAttribute", Attributes::default(), true)?;
        }
        self.close(ComplexTypeDecl::TAG_NAME)
    }

    fn write_particle(&mut self, particle: &Particle) -> Result<(), XsdError> {
        let tag_name = particle.compositor.tag_name();
        let mut attributes = Attributes::default();
        Self::push_occurs(&mut attributes, particle.min_occurs, particle.max_occurs);

        let empty = particle.items.is_empty();
        self.open(tag_name, attributes, empty)?;
        if empty {
            return Ok(());
        }
        for item in &particle.items {
            match item {
                ParticleItem::Element(element) => self.write_element(element)?,
                ParticleItem::Any(wildcard) => self.write_wildcard(wildcard)?,
                ParticleItem::Group(group) => self.write_particle(group)?,
            }
        }
        self.close(tag_name)
    }

    fn write_wildcard(&mut self, wildcard: &Wildcard) -> Result<(), XsdError> {
        let mut attributes = Attributes::default();
        attributes.push_opt("namespace", wildcard.namespace.clone());
        attributes.push_opt("processContents", wildcard.process_contents.clone());
        Self::push_occurs(&mut attributes, wildcard.min_occurs, wildcard.max_occurs);
        self.open("any", attributes, true)
    }

    fn write_simple_type(&mut self, simple_type: &SimpleTypeDecl) -> Result<(), XsdError> {
        let mut attributes = Attributes::default();
        attributes.push("name", simple_type.name.clone());
        self.push_unhandled(&mut attributes, &simple_type.unhandled_attributes)?;
        self.open(SimpleTypeDecl::TAG_NAME, attributes, false)?;

        match &simple_type.content {
            SimpleTypeContent::Restriction(restriction) => {
                let mut attributes = Attributes::default();
                if let Some(base) = &restriction.base {
                    attributes.push("base", self.qname_value(base)?);
                }
                let empty = restriction.facets.is_empty();
                self.open("restriction", attributes, empty)?;
                if !empty {
                    for facet in &restriction.facets {
                        let mut attributes = Attributes::default();
                        attributes.push("value", facet.value());
                        self.open(facet.tag_name(), attributes, true)?;
                    }
                    self.close("restriction")?;
                }
            }
            SimpleTypeContent::List { item_type } => {
                let mut attributes = Attributes::default();
                attributes.push("itemType", self.qname_value(item_type)?);
                self.open("list", attributes, true)?;
            }
            SimpleTypeContent::Union { member_types } => {
                let member_types = member_types
                    .iter()
                    .map(|name| self.qname_value(name))
                    .collect::<Result<Vec<_>, _>>()?;
                let mut attributes = Attributes::default();
                attributes.push("memberTypes", member_types.join(" "));
                self.open("union", attributes, true)?;
            }
        }

        self.close(SimpleTypeDecl::TAG_NAME)
    }

    fn write_attribute(&mut self, attribute: &AttributeDecl) -> Result<(), XsdError> {
        let mut attributes = Attributes::default();
        attributes.push_opt("name", attribute.name.clone());
        if let Some(ref_name) = &attribute.ref_name {
            attributes.push("ref", self.qname_value(ref_name)?);
        }
        if let Some(type_name) = &attribute.type_name {
            attributes.push("type", self.qname_value(type_name)?);
        }
        if attribute.use_ != AttributeUse::Optional {
            attributes.push("use", attribute.use_.as_str());
        }
        attributes.push_opt("default", attribute.default.clone());
        self.push_unhandled(&mut attributes, &attribute.unhandled_attributes)?;
        self.open(AttributeDecl::TAG_NAME, attributes, true)
    }

    fn write_group(&mut self, group: &GroupDecl) -> Result<(), XsdError> {
        let mut attributes = Attributes::default();
        attributes.push("name", group.name.clone());
        self.open(GroupDecl::TAG_NAME, attributes, false)?;
        self.write_particle(&group.particle)?;
        self.close(GroupDecl::TAG_NAME)
    }
}
