use std::fmt;

use sdata_xsd::{ElementDecl, UnhandledAttribute};

use super::{ComplexType, SchemaType};
use crate::{
    error::UnsupportedSchemaError,
    sme::{SmeAttributeWriter, SmeAttributes, ROLE_NAME},
};

/// Role named by the `sme:role` attribute of a global element.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    ResourceKind,
    ServiceOperation,
    Query,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ResourceKind => "resourceKind",
            Self::ServiceOperation => "serviceOperation",
            Self::Query => "query",
        }
    }

    pub fn from_attribute(value: &str) -> Option<Self> {
        match value {
            "resourceKind" => Some(Self::ResourceKind),
            "serviceOperation" => Some(Self::ServiceOperation),
            "query" => Some(Self::Query),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A complex type introduced by a global element.
///
/// The type is keyed by the element name in the views of a
/// [`SchemaDocument`](crate::SchemaDocument), but by the complex type name in its `Types`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TopLevelType {
    pub complex: ComplexType,
    pub element_name: String,
    pub label: Option<String>,
    /// Extension attributes of the element other than the ones mapped to fields.
    pub element_extensions: Vec<UnhandledAttribute>,
}

impl TopLevelType {
    pub fn new(element_name: impl Into<String>, complex: ComplexType) -> Self {
        Self {
            complex,
            element_name: element_name.into(),
            label: None,
            element_extensions: Vec::new(),
        }
    }

    fn with_rest(mut self, attributes: SmeAttributes) -> Self {
        self.element_extensions = attributes.into_rest();
        self
    }

    /// The global element, carrying `role` plus whatever `role_attributes` adds.
    fn element_to_xsd(
        &self,
        role: Role,
        target_namespace: Option<&str>,
        role_attributes: impl FnOnce(&mut SmeAttributeWriter),
    ) -> ElementDecl {
        let mut attributes = SmeAttributeWriter::default();
        attributes
            .push("role", role.as_str())
            .push_opt("label", self.label.as_ref());
        role_attributes(&mut attributes);
        attributes.extend(&self.element_extensions);

        let mut element = ElementDecl::new(
            self.element_name.clone(),
            self.complex.qualified_name(target_namespace),
        );
        element.unhandled_attributes = attributes.finish();
        element
    }
}

/// Operations supported by a resource kind.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ResourceCapabilities {
    pub can_get: Option<bool>,
    pub can_post: Option<bool>,
    pub can_put: Option<bool>,
    pub can_delete: Option<bool>,
    pub can_page_previous: Option<bool>,
    pub can_page_next: Option<bool>,
    pub can_page_index: Option<bool>,
    pub supports_etag: Option<bool>,
    pub has_uuid: Option<bool>,
    pub is_sync_source: Option<bool>,
    pub is_sync_target: Option<bool>,
}

impl ResourceCapabilities {
    // attribute name, accessor
    const ATTRIBUTES: [(&'static str, fn(&mut Self) -> &mut Option<bool>); 11] = [
        ("canGet", |c| &mut c.can_get),
        ("canPost", |c| &mut c.can_post),
        ("canPut", |c| &mut c.can_put),
        ("canDelete", |c| &mut c.can_delete),
        ("canPagePrevious", |c| &mut c.can_page_previous),
        ("canPageNext", |c| &mut c.can_page_next),
        ("canPageIndex", |c| &mut c.can_page_index),
        ("supportsETag", |c| &mut c.supports_etag),
        ("hasUuid", |c| &mut c.has_uuid),
        ("isSyncSource", |c| &mut c.is_sync_source),
        ("isSyncTarget", |c| &mut c.is_sync_target),
    ];

    fn take_from(attributes: &mut SmeAttributes) -> Result<Self, UnsupportedSchemaError> {
        let mut capabilities = Self::default();
        for (name, field) in Self::ATTRIBUTES {
            *field(&mut capabilities) = attributes.take_bool(name)?;
        }
        Ok(capabilities)
    }

    fn write_to(mut self, attributes: &mut SmeAttributeWriter) {
        for (name, field) in Self::ATTRIBUTES {
            attributes.push_opt(name, *field(&mut self));
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceType {
    pub top_level: TopLevelType,
    pub plural_name: Option<String>,
    pub capabilities: ResourceCapabilities,
}

/// How a service operation may be invoked.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InvocationMode {
    Sync,
    Async,
    SyncOrAsync,
}

impl InvocationMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sync => "sync",
            Self::Async => "async",
            Self::SyncOrAsync => "syncOrAsync",
        }
    }

    fn from_attribute(value: &str) -> Option<Self> {
        match value {
            "sync" => Some(Self::Sync),
            "async" => Some(Self::Async),
            "syncOrAsync" => Some(Self::SyncOrAsync),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceOperationType {
    pub top_level: TopLevelType,
    pub path: Option<String>,
    pub invocation_mode: Option<InvocationMode>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamedQueryType {
    pub top_level: TopLevelType,
    pub path: Option<String>,
}

impl ResourceType {
    pub fn new(top_level: TopLevelType) -> Self {
        Self {
            top_level,
            plural_name: None,
            capabilities: ResourceCapabilities::default(),
        }
    }

    pub(crate) fn element_to_xsd(&self, target_namespace: Option<&str>) -> ElementDecl {
        self.top_level
            .element_to_xsd(Role::ResourceKind, target_namespace, |attributes| {
                attributes.push_opt("pluralName", self.plural_name.as_ref());
                self.capabilities.write_to(attributes);
            })
    }
}

impl ServiceOperationType {
    pub fn new(top_level: TopLevelType) -> Self {
        Self {
            top_level,
            path: None,
            invocation_mode: None,
        }
    }

    pub(crate) fn element_to_xsd(&self, target_namespace: Option<&str>) -> ElementDecl {
        self.top_level
            .element_to_xsd(Role::ServiceOperation, target_namespace, |attributes| {
                attributes
                    .push_opt("path", self.path.as_ref())
                    .push_opt("invocationMode", self.invocation_mode.map(InvocationMode::as_str));
            })
    }
}

impl NamedQueryType {
    pub fn new(top_level: TopLevelType) -> Self {
        Self {
            top_level,
            path: None,
        }
    }

    pub(crate) fn element_to_xsd(&self, target_namespace: Option<&str>) -> ElementDecl {
        self.top_level
            .element_to_xsd(Role::Query, target_namespace, |attributes| {
                attributes.push_opt("path", self.path.as_ref());
            })
    }
}

/// Builds the top-level type announced by `element` around `complex`.
pub(crate) fn map_from_xsd(
    element: &ElementDecl,
    element_name: &str,
    complex: ComplexType,
) -> Result<SchemaType, UnsupportedSchemaError> {
    let mut attributes = SmeAttributes::new(element_name, &element.unhandled_attributes);

    let role = attributes
        .take_name(&ROLE_NAME)
        .ok_or_else(|| UnsupportedSchemaError::MissingRole {
            element: element_name.to_string(),
        })?;
    let role = Role::from_attribute(&role).ok_or_else(|| UnsupportedSchemaError::UnknownRole {
        element: element_name.to_string(),
        role,
    })?;

    let mut top_level = TopLevelType::new(element_name, complex);
    top_level.label = attributes.take("label");

    Ok(match role {
        Role::ResourceKind => {
            let plural_name = attributes.take("pluralName");
            let capabilities = ResourceCapabilities::take_from(&mut attributes)?;
            SchemaType::Resource(ResourceType {
                top_level: top_level.with_rest(attributes),
                plural_name,
                capabilities,
            })
        }
        Role::ServiceOperation => {
            let path = attributes.take("path");
            let invocation_mode =
                attributes.take_parsed("invocationMode", InvocationMode::from_attribute)?;
            SchemaType::ServiceOperation(ServiceOperationType {
                top_level: top_level.with_rest(attributes),
                path,
                invocation_mode,
            })
        }
        Role::Query => {
            let path = attributes.take("path");
            SchemaType::NamedQuery(NamedQueryType {
                top_level: top_level.with_rest(attributes),
                path,
            })
        }
    })
}
