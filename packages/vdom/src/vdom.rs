use crate::properties::{PropertyList, BOOLEAN_ATTRIBUTE};
use crate::stylesheet::{Rule, Stylesheet};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Tag of the element wrapping a document's top-level nodes.
pub const DOCUMENT_TAG: &str = "document";

/// Synthetic DOM node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Node {
    Element(Element),
    Text(TextNode),
}

impl Node {
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text(TextNode::new(value))
    }

    pub fn element(tag: impl Into<String>) -> Self {
        Node::Element(Element::new(tag))
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextNode> {
        match self {
            Node::Text(text) => Some(text),
            Node::Element(_) => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Element(_) => "element",
            Node::Text(_) => "text",
        }
    }

    /// Same kind and, for elements, same tag. Nodes that fail this are
    /// replaced wholesale rather than patched in place.
    pub fn same_shape(&self, other: &Node) -> bool {
        match (self, other) {
            (Node::Element(a), Node::Element(b)) => a.tag == b.tag,
            (Node::Text(_), Node::Text(_)) => true,
            _ => false,
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

impl From<TextNode> for Node {
    fn from(text: TextNode) -> Self {
        Node::Text(text)
    }
}

/// Text node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextNode {
    pub value: String,
}

impl TextNode {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// Element with attributes, children and an optional embedded stylesheet
/// living in its shadow root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Element {
    pub tag: String,
    #[serde(default, skip_serializing_if = "PropertyList::is_empty")]
    pub attributes: PropertyList,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Arc<Node>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stylesheet: Option<Arc<Stylesheet>>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: PropertyList::new(),
            children: Vec::new(),
            stylesheet: None,
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name, value);
        self
    }

    /// Valueless attribute, stored with [`BOOLEAN_ATTRIBUTE`].
    pub fn with_flag(mut self, name: impl Into<String>) -> Self {
        self.attributes.insert(name, BOOLEAN_ATTRIBUTE);
        self
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(Arc::new(child.into()));
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children.into_iter().map(Arc::new));
        self
    }

    pub fn with_text(self, value: impl Into<String>) -> Self {
        self.with_child(Node::text(value))
    }

    pub fn with_rule(mut self, rule: impl Into<Rule>) -> Self {
        let sheet = self
            .stylesheet
            .get_or_insert_with(|| Arc::new(Stylesheet::new()));
        Arc::make_mut(sheet).rules.push(Arc::new(rule.into()));
        self
    }

    pub fn with_stylesheet(mut self, sheet: Stylesheet) -> Self {
        self.stylesheet = Some(Arc::new(sheet));
        self
    }

    pub fn child(&self, index: usize) -> Option<&Node> {
        self.children.get(index).map(Arc::as_ref)
    }

    /// Rules of the embedded stylesheet; empty when there is none.
    pub fn rules(&self) -> &[Arc<Rule>] {
        self.stylesheet
            .as_deref()
            .map(|sheet| sheet.rules.as_slice())
            .unwrap_or(&[])
    }

    pub fn has_stylesheet(&self) -> bool {
        !self.rules().is_empty()
    }
}

// A missing stylesheet and an empty one are the same document.
impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag
            && self.attributes == other.attributes
            && self.children == other.children
            && self.rules() == other.rules()
    }
}

impl Eq for Element {}

/// One evaluated document.
///
/// `modules` records where the document came from. It and the root tag are
/// ignored by equality. Trees are never mutated; patching builds a new tree that shares
/// every untouched subtree with the old one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub root: Arc<Element>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modules: Vec<String>,
}

impl Tree {
    pub fn new(root: Element) -> Self {
        Self {
            root: Arc::new(root),
            modules: Vec::new(),
        }
    }

    /// Wrap top-level nodes in a [`DOCUMENT_TAG`] root element.
    pub fn document(children: impl IntoIterator<Item = Node>) -> Self {
        Self::new(Element::new(DOCUMENT_TAG).with_children(children))
    }

    pub fn with_module(mut self, uri: impl Into<String>) -> Self {
        self.modules.push(uri.into());
        self
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Whether both trees share the same root allocation.
    pub fn ptr_eq(&self, other: &Tree) -> bool {
        Arc::ptr_eq(&self.root, &other.root)
    }
}

// The root tag names the document wrapper, which has no parent to be
// replaced in, so it is metadata like `modules`.
impl PartialEq for Tree {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = (&self.root, &other.root);
        Arc::ptr_eq(a, b)
            || (a.attributes == b.attributes && a.children == b.children && a.rules() == b.rules())
    }
}

impl Eq for Tree {}
