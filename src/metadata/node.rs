//! Generic traversal over the type model.

use super::{ChoiceItem, Property, SchemaType, TypeReference};

/// A borrowed node of the type model.
#[derive(Clone, Copy, Debug)]
pub enum SchemaNode<'a> {
    Type(&'a SchemaType),
    Property(&'a Property),
    ChoiceItem(&'a ChoiceItem),
    TypeReference(&'a TypeReference),
}

#[derive(Debug)]
pub enum SchemaNodeMut<'a> {
    Type(&'a mut SchemaType),
    Property(&'a mut Property),
    ChoiceItem(&'a mut ChoiceItem),
    TypeReference(&'a mut TypeReference),
}

/// Implemented by every node kind; exposes the nodes it owns, in declaration order.
pub trait SchemaObject {
    fn children(&self) -> Vec<SchemaNode<'_>>;
    fn children_mut(&mut self) -> Vec<SchemaNodeMut<'_>>;
}

impl<'a> SchemaNode<'a> {
    pub fn children(self) -> Vec<SchemaNode<'a>> {
        match self {
            Self::Type(node) => node.children(),
            Self::Property(node) => node.children(),
            Self::ChoiceItem(node) => node.children(),
            Self::TypeReference(node) => node.children(),
        }
    }
}

impl<'a> SchemaNodeMut<'a> {
    pub fn into_children(self) -> Vec<SchemaNodeMut<'a>> {
        match self {
            Self::Type(node) => node.children_mut(),
            Self::Property(node) => node.children_mut(),
            Self::ChoiceItem(node) => node.children_mut(),
            Self::TypeReference(node) => node.children_mut(),
        }
    }
}

/// Pre-order depth-first walk, see
/// [`SchemaDocument::descendants`](crate::SchemaDocument::descendants).
pub struct Descendants<'a> {
    stack: Vec<SchemaNode<'a>>,
}

impl<'a> Descendants<'a> {
    pub(crate) fn new(roots: impl DoubleEndedIterator<Item = SchemaNode<'a>>) -> Self {
        Self {
            stack: roots.rev().collect(),
        }
    }
}

impl<'a> Iterator for Descendants<'a> {
    type Item = SchemaNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().into_iter().rev());
        Some(node)
    }
}
