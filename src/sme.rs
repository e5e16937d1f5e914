//! Helpers for the "Simple Metadata Extensions" attributes that carry the SData conventions.

use lazy_static::lazy_static;
use sdata_xsd::{QName, UnhandledAttribute};

use crate::error::UnsupportedSchemaError;

pub const SME_NAMESPACE: &str = "http://schemas.sage.com/sdata/sme/2007";
pub const SME_PREFIX: &str = "sme";

lazy_static! {
    /// `sme:role`, which marks a global element as introducing a top-level type.
    pub static ref ROLE_NAME: QName = QName::with_namespace(SME_NAMESPACE, "role");
}

/// The extension attributes of one declaration, consumed one SME attribute at a time.
///
/// Whatever is left over is preserved verbatim by [`SmeAttributes::into_rest`].
pub(crate) struct SmeAttributes<'a> {
    owner: &'a str,
    attributes: Vec<UnhandledAttribute>,
}

impl<'a> SmeAttributes<'a> {
    pub fn new(owner: &'a str, attributes: &[UnhandledAttribute]) -> Self {
        Self {
            owner,
            attributes: attributes.to_vec(),
        }
    }

    pub fn take(&mut self, local_name: &str) -> Option<String> {
        let index = self
            .attributes
            .iter()
            .position(|a| a.name.is(SME_NAMESPACE, local_name))?;
        Some(self.attributes.remove(index).value)
    }

    pub fn take_name(&mut self, name: &QName) -> Option<String> {
        let index = self.attributes.iter().position(|a| a.name == *name)?;
        Some(self.attributes.remove(index).value)
    }

    pub fn take_bool(
        &mut self,
        local_name: &'static str,
    ) -> Result<Option<bool>, UnsupportedSchemaError> {
        self.take(local_name)
            .map(|value| match value.trim() {
                "true" | "1" => Ok(true),
                "false" | "0" => Ok(false),
                _ => Err(self.invalid(local_name, value)),
            })
            .transpose()
    }

    pub fn take_u32(
        &mut self,
        local_name: &'static str,
    ) -> Result<Option<u32>, UnsupportedSchemaError> {
        self.take(local_name)
            .map(|value| {
                value
                    .trim()
                    .parse()
                    .map_err(|_| self.invalid(local_name, value))
            })
            .transpose()
    }

    /// Parses an attribute with a closed set of values.
    pub fn take_parsed<T>(
        &mut self,
        local_name: &'static str,
        parse: impl FnOnce(&str) -> Option<T>,
    ) -> Result<Option<T>, UnsupportedSchemaError> {
        self.take(local_name)
            .map(|value| parse(value.trim()).ok_or_else(|| self.invalid(local_name, value)))
            .transpose()
    }

    pub fn into_rest(self) -> Vec<UnhandledAttribute> {
        self.attributes
    }

    fn invalid(&self, attribute: &'static str, value: String) -> UnsupportedSchemaError {
        UnsupportedSchemaError::InvalidAttribute {
            owner: self.owner.to_string(),
            attribute,
            value,
        }
    }
}

/// Collects SME attributes for a declaration being written, followed by preserved extensions.
#[derive(Default)]
pub(crate) struct SmeAttributeWriter(Vec<UnhandledAttribute>);

impl SmeAttributeWriter {
    pub fn push(&mut self, local_name: &str, value: impl Into<String>) -> &mut Self {
        self.0.push(UnhandledAttribute::new(
            QName::with_namespace(SME_NAMESPACE, local_name),
            value,
        ));
        self
    }

    pub fn push_opt(&mut self, local_name: &str, value: Option<impl ToString>) -> &mut Self {
        if let Some(value) = value {
            self.push(local_name, value.to_string());
        }
        self
    }

    pub fn extend(&mut self, rest: &[UnhandledAttribute]) -> &mut Self {
        self.0.extend_from_slice(rest);
        self
    }

    pub fn finish(&mut self) -> Vec<UnhandledAttribute> {
        std::mem::take(&mut self.0)
    }
}
