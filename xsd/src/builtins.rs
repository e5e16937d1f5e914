use lazy_static::lazy_static;

use super::xstypes::QName;

pub const XS_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

lazy_static! {
    pub static ref XS_STRING_NAME: QName = QName::with_namespace(XS_NAMESPACE, "string");
}

/// `true` if `node` is an element in the XSD namespace called `local_name`.
pub(crate) fn is_xs_element(node: roxmltree::Node, local_name: &str) -> bool {
    node.is_element()
        && node.tag_name().namespace() == Some(XS_NAMESPACE)
        && node.tag_name().name() == local_name
}
