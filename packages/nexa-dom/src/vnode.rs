//! Minimal virtual node shape, enough to carry attributes and children
//! through slot parsing.

use crate::slots::Slotted;
use nexa_shared::coerce::to_js_string;
use nexa_shared::{Object, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    /// `None` for elements created without props.
    pub attributes: Option<Object>,
    pub children: Vec<Option<VNode>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum VNode {
    Element(Element),
    Text(String),
}

impl VNode {
    pub fn element(tag: impl Into<String>) -> Self {
        VNode::Element(Element {
            tag: tag.into(),
            attributes: None,
            children: Vec::new(),
        })
    }

    pub fn text(text: impl Into<String>) -> Self {
        VNode::Text(text.into())
    }

    /// Sets an attribute. Text nodes have none and are returned unchanged.
    pub fn attr(mut self, name: &str, value: impl Into<Value>) -> Self {
        if let VNode::Element(el) = &mut self {
            el.attributes
                .get_or_insert_with(Object::new)
                .insert(name, value);
        }
        self
    }

    pub fn child(mut self, child: VNode) -> Self {
        if let VNode::Element(el) = &mut self {
            el.children.push(Some(child));
        }
        self
    }

    pub fn attributes(&self) -> Option<&Object> {
        match self {
            VNode::Element(el) => el.attributes.as_ref(),
            VNode::Text(_) => None,
        }
    }
}

impl Slotted for VNode {
    fn slot(&self) -> Option<String> {
        self.attributes()?
            .get("slot")
            .filter(|name| name.is_truthy())
            .map(to_js_string)
    }
}
