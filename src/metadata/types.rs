use sdata_xsd::QName;

use super::{
    node::{SchemaNode, SchemaNodeMut, SchemaObject},
    qualify, ChoiceType, ComplexType, EnumType, NamedQueryType, ResourceType, Role,
    ServiceOperationType, SimpleType, TopLevelType,
};

/// Every kind of type a schema document declares.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SchemaType {
    Simple(SimpleType),
    Enum(EnumType),
    Complex(ComplexType),
    Resource(ResourceType),
    ServiceOperation(ServiceOperationType),
    NamedQuery(NamedQueryType),
    Choice(ChoiceType),
}

impl SchemaType {
    /// The local name, which is also the key in [`Types`](super::Types).
    pub fn name(&self) -> &str {
        match self {
            Self::Simple(t) => &t.name,
            Self::Enum(t) => &t.name,
            Self::Choice(t) => &t.name,
            Self::Complex(t) => &t.name,
            Self::Resource(t) => &t.top_level.complex.name,
            Self::ServiceOperation(t) => &t.top_level.complex.name,
            Self::NamedQuery(t) => &t.top_level.complex.name,
        }
    }

    pub fn qualified_name(&self, target_namespace: Option<&str>) -> QName {
        qualify(target_namespace, self.name())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Simple(_) => "simple type",
            Self::Enum(_) => "enum type",
            Self::Complex(_) => "complex type",
            Self::Resource(_) => "resource kind",
            Self::ServiceOperation(_) => "service operation",
            Self::NamedQuery(_) => "named query",
            Self::Choice(_) => "choice type",
        }
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            Self::Resource(_) => Some(Role::ResourceKind),
            Self::ServiceOperation(_) => Some(Role::ServiceOperation),
            Self::NamedQuery(_) => Some(Role::Query),
            _ => None,
        }
    }

    pub fn as_simple(&self) -> Option<&SimpleType> {
        match self {
            Self::Simple(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumType> {
        match self {
            Self::Enum(t) => Some(t),
            _ => None,
        }
    }

    /// The complex type of plain complex types and of the three top-level kinds.
    pub fn as_complex(&self) -> Option<&ComplexType> {
        match self {
            Self::Complex(t) => Some(t),
            _ => self.as_top_level().map(|t| &t.complex),
        }
    }

    pub fn as_complex_mut(&mut self) -> Option<&mut ComplexType> {
        match self {
            Self::Complex(t) => Some(t),
            Self::Resource(t) => Some(&mut t.top_level.complex),
            Self::ServiceOperation(t) => Some(&mut t.top_level.complex),
            Self::NamedQuery(t) => Some(&mut t.top_level.complex),
            _ => None,
        }
    }

    pub fn as_top_level(&self) -> Option<&TopLevelType> {
        match self {
            Self::Resource(t) => Some(&t.top_level),
            Self::ServiceOperation(t) => Some(&t.top_level),
            Self::NamedQuery(t) => Some(&t.top_level),
            _ => None,
        }
    }

    pub fn as_resource(&self) -> Option<&ResourceType> {
        match self {
            Self::Resource(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_service_operation(&self) -> Option<&ServiceOperationType> {
        match self {
            Self::ServiceOperation(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_named_query(&self) -> Option<&NamedQueryType> {
        match self {
            Self::NamedQuery(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_choice(&self) -> Option<&ChoiceType> {
        match self {
            Self::Choice(t) => Some(t),
            _ => None,
        }
    }
}

impl SchemaObject for SchemaType {
    fn children(&self) -> Vec<SchemaNode<'_>> {
        match self {
            Self::Simple(t) => t.children(),
            Self::Enum(t) => t.children(),
            Self::Choice(t) => t.children(),
            Self::Complex(t) => t.children(),
            Self::Resource(t) => t.top_level.complex.children(),
            Self::ServiceOperation(t) => t.top_level.complex.children(),
            Self::NamedQuery(t) => t.top_level.complex.children(),
        }
    }

    fn children_mut(&mut self) -> Vec<SchemaNodeMut<'_>> {
        match self {
            Self::Simple(t) => t.children_mut(),
            Self::Enum(t) => t.children_mut(),
            Self::Choice(t) => t.children_mut(),
            Self::Complex(t) => t.children_mut(),
            Self::Resource(t) => t.top_level.complex.children_mut(),
            Self::ServiceOperation(t) => t.top_level.complex.children_mut(),
            Self::NamedQuery(t) => t.top_level.complex.children_mut(),
        }
    }
}

macro_rules! impl_from {
    ($($variant:ident($type:ty)),* $(,)?) => {
        $(
            impl From<$type> for SchemaType {
                fn from(value: $type) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from!(
    Simple(SimpleType),
    Enum(EnumType),
    Complex(ComplexType),
    Resource(ResourceType),
    ServiceOperation(ServiceOperationType),
    NamedQuery(NamedQueryType),
    Choice(ChoiceType),
);
