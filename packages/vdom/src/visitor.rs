use crate::stylesheet::{Rule, Stylesheet};
use crate::vdom::{Element, Node, TextNode, Tree};
use paperclip_common::Address;

/// Visitor pattern for traversing synthetic trees
///
/// Every callback receives the address of the item it is visiting. The
/// default implementations walk the entire tree in document order: an
/// element's stylesheet is visited before its children. Override specific
/// visit_* methods to act on nodes; call the matching walk_* function to keep
/// descending.
pub trait Visitor: Sized {
    fn visit_tree(&mut self, tree: &Tree) {
        walk_tree(self, tree);
    }

    fn visit_node(&mut self, node: &Node, address: &Address) {
        walk_node(self, node, address);
    }

    fn visit_element(&mut self, element: &Element, address: &Address) {
        walk_element(self, element, address);
    }

    fn visit_text(&mut self, _text: &TextNode, _address: &Address) {
        // Leaf node, no children to walk
    }

    fn visit_stylesheet(&mut self, sheet: &Stylesheet, address: &Address) {
        walk_stylesheet(self, sheet, address);
    }

    fn visit_rule(&mut self, rule: &Rule, address: &Address) {
        walk_rule(self, rule, address);
    }
}

pub fn walk_tree<V: Visitor>(visitor: &mut V, tree: &Tree) {
    visitor.visit_element(&tree.root, &Address::root());
}

pub fn walk_node<V: Visitor>(visitor: &mut V, node: &Node, address: &Address) {
    match node {
        Node::Element(element) => visitor.visit_element(element, address),
        Node::Text(text) => visitor.visit_text(text, address),
    }
}

pub fn walk_element<V: Visitor>(visitor: &mut V, element: &Element, address: &Address) {
    if let Some(sheet) = &element.stylesheet {
        visitor.visit_stylesheet(sheet, &address.shadow());
    }
    for (i, child) in element.children.iter().enumerate() {
        visitor.visit_node(child, &address.child(i));
    }
}

pub fn walk_stylesheet<V: Visitor>(visitor: &mut V, sheet: &Stylesheet, address: &Address) {
    for (i, rule) in sheet.rules.iter().enumerate() {
        visitor.visit_rule(rule, &address.rule(i));
    }
}

pub fn walk_rule<V: Visitor>(visitor: &mut V, rule: &Rule, address: &Address) {
    if let Rule::Condition(condition) = rule {
        for (i, nested) in condition.rules.iter().enumerate() {
            visitor.visit_rule(nested, &address.rule(i));
        }
    }
}
