//! Address resolution.
//!
//! [`resolve`] reads a tree. [`resolve_mut`] walks the same path with
//! copy-on-write, cloning only the nodes on the path that are still shared
//! with other trees, and hands back a mutable view of the target.

use crate::stylesheet::{Rule, Stylesheet};
use crate::vdom::{Element, Node, TextNode, Tree};
use paperclip_common::{Address, AddressError, AddressErrorKind, Segment};
use std::sync::Arc;
use tracing::trace;

static EMPTY_STYLESHEET: Stylesheet = Stylesheet { rules: Vec::new() };

/// What an address points at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolved<'a> {
    Element(&'a Element),
    Text(&'a TextNode),
    Stylesheet(&'a Stylesheet),
    Rule(&'a Rule),
    Declaration { name: &'a str, value: &'a str },
}

impl<'a> Resolved<'a> {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Resolved::Element(_) => "element",
            Resolved::Text(_) => "text",
            Resolved::Stylesheet(_) => "stylesheet",
            Resolved::Rule(rule) => rule.kind_name(),
            Resolved::Declaration { .. } => "declaration",
        }
    }

    pub fn as_element(&self) -> Option<&'a Element> {
        match self {
            Resolved::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&'a TextNode> {
        match self {
            Resolved::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_rule(&self) -> Option<&'a Rule> {
        match self {
            Resolved::Rule(rule) => Some(rule),
            _ => None,
        }
    }

    fn from_node(node: &'a Node) -> Self {
        match node {
            Node::Element(el) => Resolved::Element(el),
            Node::Text(text) => Resolved::Text(text),
        }
    }
}

/// Mutable view of an address target.
#[derive(Debug)]
pub enum ResolvedMut<'a> {
    Element(&'a mut Element),
    Text(&'a mut TextNode),
    Stylesheet(&'a mut Stylesheet),
    Rule(&'a mut Rule),
    Declaration { name: &'a str, value: &'a mut String },
}

impl<'a> ResolvedMut<'a> {
    pub fn kind_name(&self) -> &'static str {
        match self {
            ResolvedMut::Element(_) => "element",
            ResolvedMut::Text(_) => "text",
            ResolvedMut::Stylesheet(_) => "stylesheet",
            ResolvedMut::Rule(rule) => rule.kind_name(),
            ResolvedMut::Declaration { .. } => "declaration",
        }
    }

    fn from_node(node: &'a mut Node) -> Self {
        match node {
            Node::Element(el) => ResolvedMut::Element(el),
            Node::Text(text) => ResolvedMut::Text(text),
        }
    }
}

/// Resolve `address` against `tree`.
///
/// `Shadow` on an element without a stylesheet resolves to an empty one.
pub fn resolve<'a>(tree: &'a Tree, address: &Address) -> Result<Resolved<'a>, AddressError> {
    trace!(%address, "resolving address");

    let fail = |kind: AddressErrorKind| AddressError::new(address.clone(), kind);
    let mut current = Resolved::Element(&tree.root);

    for segment in address.segments() {
        current = match (current, *segment) {
            (Resolved::Element(el), Segment::Child(index)) => {
                let node = el.children.get(index).ok_or_else(|| {
                    fail(AddressErrorKind::ChildOutOfRange {
                        index,
                        len: el.children.len(),
                    })
                })?;
                Resolved::from_node(node)
            }
            (Resolved::Element(el), Segment::Shadow) => {
                Resolved::Stylesheet(el.stylesheet.as_deref().unwrap_or(&EMPTY_STYLESHEET))
            }
            (Resolved::Stylesheet(sheet), Segment::Rule(index)) => {
                Resolved::Rule(rule_at(&sheet.rules, index).map_err(fail)?)
            }
            (Resolved::Rule(Rule::Condition(rule)), Segment::Rule(index)) => {
                Resolved::Rule(rule_at(&rule.rules, index).map_err(fail)?)
            }
            (Resolved::Rule(rule), Segment::Declaration(index)) => {
                let declarations = rule.declarations().ok_or_else(|| {
                    fail(AddressErrorKind::NotAContainer {
                        segment: Segment::Declaration(index).to_string(),
                        found: rule.kind_name(),
                    })
                })?;
                let (name, value) = declarations.get_index(index).ok_or_else(|| {
                    fail(AddressErrorKind::DeclarationOutOfRange {
                        index,
                        len: declarations.len(),
                    })
                })?;
                Resolved::Declaration { name, value }
            }
            (Resolved::Declaration { .. }, _) => {
                return Err(fail(AddressErrorKind::TrailingSegment));
            }
            (other, segment) => {
                return Err(fail(AddressErrorKind::NotAContainer {
                    segment: segment.to_string(),
                    found: other.kind_name(),
                }));
            }
        };
    }

    Ok(current)
}

/// Resolve `address` for writing, detaching every node on the path from
/// other trees that share it. `Shadow` creates an empty stylesheet when the
/// element has none.
pub fn resolve_mut<'a>(
    root: &'a mut Arc<Element>,
    address: &Address,
) -> Result<ResolvedMut<'a>, AddressError> {
    trace!(%address, "resolving address for write");

    let fail = |kind: AddressErrorKind| AddressError::new(address.clone(), kind);
    let mut current = ResolvedMut::Element(Arc::make_mut(root));

    for segment in address.segments() {
        current = match (current, *segment) {
            (ResolvedMut::Element(el), Segment::Child(index)) => {
                let len = el.children.len();
                let node = el
                    .children
                    .get_mut(index)
                    .ok_or_else(|| fail(AddressErrorKind::ChildOutOfRange { index, len }))?;
                ResolvedMut::from_node(Arc::make_mut(node))
            }
            (ResolvedMut::Element(el), Segment::Shadow) => {
                let sheet = el
                    .stylesheet
                    .get_or_insert_with(|| Arc::new(Stylesheet::new()));
                ResolvedMut::Stylesheet(Arc::make_mut(sheet))
            }
            (ResolvedMut::Stylesheet(sheet), Segment::Rule(index)) => {
                ResolvedMut::Rule(rule_at_mut(&mut sheet.rules, index).map_err(fail)?)
            }
            (ResolvedMut::Rule(Rule::Condition(rule)), Segment::Rule(index)) => {
                ResolvedMut::Rule(rule_at_mut(&mut rule.rules, index).map_err(fail)?)
            }
            (ResolvedMut::Rule(rule), Segment::Declaration(index)) => {
                let found = rule.kind_name();
                let declarations = match rule.declarations_mut() {
                    Some(declarations) => declarations,
                    None => {
                        return Err(fail(AddressErrorKind::NotAContainer {
                            segment: Segment::Declaration(index).to_string(),
                            found,
                        }));
                    }
                };
                let len = declarations.len();
                let (name, value) = declarations
                    .get_index_mut(index)
                    .ok_or_else(|| fail(AddressErrorKind::DeclarationOutOfRange { index, len }))?;
                ResolvedMut::Declaration { name, value }
            }
            (ResolvedMut::Declaration { .. }, _) => {
                return Err(fail(AddressErrorKind::TrailingSegment));
            }
            (other, segment) => {
                return Err(fail(AddressErrorKind::NotAContainer {
                    segment: segment.to_string(),
                    found: other.kind_name(),
                }));
            }
        };
    }

    Ok(current)
}

fn rule_at(rules: &[Arc<Rule>], index: usize) -> Result<&Rule, AddressErrorKind> {
    rules
        .get(index)
        .map(Arc::as_ref)
        .ok_or(AddressErrorKind::RuleOutOfRange {
            index,
            len: rules.len(),
        })
}

fn rule_at_mut(rules: &mut [Arc<Rule>], index: usize) -> Result<&mut Rule, AddressErrorKind> {
    let len = rules.len();
    rules
        .get_mut(index)
        .map(Arc::make_mut)
        .ok_or(AddressErrorKind::RuleOutOfRange { index, len })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stylesheet::{ConditionRule, StyleRule};

    fn sample() -> Tree {
        Tree::document(vec![Node::Element(
            Element::new("div")
                .with_attr("class", "card")
                .with_rule(StyleRule::new(".card").with_declaration("color", "red"))
                .with_rule(
                    ConditionRule::media("screen")
                        .with_rule(StyleRule::new(".card").with_declaration("color", "blue")),
                )
                .with_text("hello"),
        )])
    }

    #[test]
    fn test_resolve_nodes() {
        let tree = sample();

        let root = resolve(&tree, &Address::root()).unwrap();
        assert_eq!(root.as_element().map(|el| el.tag.as_str()), Some("document"));

        let text = resolve(&tree, &Address::root().child(0).child(0)).unwrap();
        assert_eq!(text.as_text().map(|t| t.value.as_str()), Some("hello"));
    }

    #[test]
    fn test_resolve_stylesheet_paths() {
        let tree = sample();
        let sheet = Address::root().child(0).shadow();

        let decl = resolve(&tree, &sheet.rule(1).rule(0).declaration(0)).unwrap();
        assert_eq!(
            decl,
            Resolved::Declaration {
                name: "color",
                value: "blue"
            }
        );

        let missing = Address::root().shadow();
        assert!(matches!(
            resolve(&tree, &missing),
            Ok(Resolved::Stylesheet(sheet)) if sheet.is_empty()
        ));
    }

    #[test]
    fn test_resolve_errors() {
        let tree = sample();

        let err = resolve(&tree, &Address::root().child(3)).unwrap_err();
        assert_eq!(
            err.kind,
            AddressErrorKind::ChildOutOfRange { index: 3, len: 1 }
        );
        assert_eq!(err.address, Address::root().child(3));

        let err = resolve(&tree, &Address::root().child(0).child(0).child(0)).unwrap_err();
        assert!(matches!(
            err.kind,
            AddressErrorKind::NotAContainer { found: "text", .. }
        ));

        let err = resolve(&tree, &Address::root().child(0).shadow().rule(9)).unwrap_err();
        assert_eq!(err.kind, AddressErrorKind::RuleOutOfRange { index: 9, len: 2 });

        let decl = Address::root().child(0).shadow().rule(0).declaration(0);
        let err = resolve(&tree, &decl.declaration(0)).unwrap_err();
        assert_eq!(err.kind, AddressErrorKind::TrailingSegment);
    }

    #[test]
    fn test_resolve_mut_copies_on_write() {
        let tree = sample();
        let mut root = tree.root.clone();

        match resolve_mut(&mut root, &Address::root().child(0).child(0)).unwrap() {
            ResolvedMut::Text(text) => text.value = "bye".to_string(),
            other => panic!("expected text, got {}", other.kind_name()),
        }

        let patched = Tree {
            root,
            modules: Vec::new(),
        };
        assert_ne!(patched, tree);
        assert!(!patched.ptr_eq(&tree));

        let old_text = resolve(&tree, &Address::root().child(0).child(0)).unwrap();
        assert_eq!(old_text.as_text().map(|t| t.value.as_str()), Some("hello"));

        // The stylesheet was not on the edited path and stays shared.
        let old_sheet = tree.root.child(0).and_then(Node::as_element).unwrap();
        let new_sheet = patched.root.child(0).and_then(Node::as_element).unwrap();
        assert!(Arc::ptr_eq(
            old_sheet.stylesheet.as_ref().unwrap(),
            new_sheet.stylesheet.as_ref().unwrap()
        ));
    }

    #[test]
    fn test_resolve_mut_materializes_stylesheet() {
        let mut root = Arc::new(Element::new("document"));
        match resolve_mut(&mut root, &Address::root().shadow()).unwrap() {
            ResolvedMut::Stylesheet(sheet) => {
                sheet.rules.push(Arc::new(StyleRule::new(".a").into()));
            }
            other => panic!("expected stylesheet, got {}", other.kind_name()),
        }
        assert!(root.has_stylesheet());
    }
}
