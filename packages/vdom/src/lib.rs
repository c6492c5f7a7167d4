//! # Paperclip synthetic DOM
//!
//! Immutable document trees produced by the evaluator: elements, text and
//! embedded stylesheets, plus the structural addressing used to diff and
//! patch them.

pub mod cache;
pub mod properties;
pub mod resolve;
pub mod serializer;
pub mod stylesheet;
pub mod vdom;
pub mod visitor;

pub use cache::TreeQueryCache;
pub use properties::{PropertyList, BOOLEAN_ATTRIBUTE};
pub use resolve::{resolve, resolve_mut, Resolved, ResolvedMut};
pub use serializer::{node_to_html, to_html};
pub use stylesheet::{ConditionKind, ConditionRule, KeyframeStep, Rule, StyleRule, Stylesheet};
pub use vdom::{Element, Node, TextNode, Tree, DOCUMENT_TAG};
pub use visitor::{walk_element, walk_node, walk_rule, walk_stylesheet, walk_tree, Visitor};

pub use paperclip_common::{Address, AddressError, Segment};
