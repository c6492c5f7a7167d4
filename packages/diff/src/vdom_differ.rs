//! Node differ.
//!
//! Walks the old and new trees in lock step, top-down and left to right,
//! comparing children purely by position. Reordered siblings come out as
//! remove/insert pairs; moves are never inferred.

use crate::css_differ::diff_rules;
use crate::mutation::{Child, Mutation};
use paperclip_common::Address;
use paperclip_vdom::{Element, Node, PropertyList, Tree};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Diff two trees. Applying the result to `old`, in order, yields a tree
/// equal to `new`.
#[instrument(skip_all, fields(old_children = old.root.children.len(), new_children = new.root.children.len()))]
pub fn diff(old: &Tree, new: &Tree) -> Vec<Mutation> {
    let mut mutations = Vec::new();

    // The root is the document wrapper and cannot itself be replaced.
    if !Arc::ptr_eq(&old.root, &new.root) {
        diff_element(&old.root, &new.root, &Address::root(), &mut mutations);
    }

    debug!(mutations = mutations.len(), "Diff complete");
    mutations
}

fn diff_node(old: &Node, new: &Node, parent: &Address, index: usize, out: &mut Vec<Mutation>) {
    if !old.same_shape(new) {
        debug!(
            %parent,
            index,
            old = old.kind_name(),
            new = new.kind_name(),
            "Replacing node"
        );
        replace_node(new, parent, index, out);
        return;
    }

    match (old, new) {
        (Node::Text(old_text), Node::Text(new_text)) => {
            if old_text.value != new_text.value {
                out.push(Mutation::SetTextNodeValue {
                    target: parent.child(index),
                    new_value: new_text.value.clone(),
                    old_value: Some(old_text.value.clone()),
                });
            }
        }
        (Node::Element(old_el), Node::Element(new_el)) => {
            diff_element(old_el, new_el, &parent.child(index), out);
        }
        _ => replace_node(new, parent, index, out),
    }
}

fn replace_node(new: &Node, parent: &Address, index: usize, out: &mut Vec<Mutation>) {
    out.push(Mutation::RemoveChildNode {
        target: parent.clone(),
        index,
    });
    out.push(Mutation::InsertChildNode {
        target: parent.clone(),
        index,
        child: Child::Node(Arc::new(new.clone())),
        clone: true,
    });
}

/// Diff two elements known to share a tag.
fn diff_element(old: &Element, new: &Element, address: &Address, out: &mut Vec<Mutation>) {
    diff_attributes(&old.attributes, &new.attributes, address, out);

    let same_sheet = match (&old.stylesheet, &new.stylesheet) {
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        _ => false,
    };
    if !same_sheet && (old.has_stylesheet() || new.has_stylesheet()) {
        diff_rules(old.rules(), new.rules(), &address.shadow(), out);
    }

    diff_children(&old.children, &new.children, address, out);
}

fn diff_children(old: &[Arc<Node>], new: &[Arc<Node>], parent: &Address, out: &mut Vec<Mutation>) {
    let common = old.len().min(new.len());

    for index in 0..common {
        if !Arc::ptr_eq(&old[index], &new[index]) {
            diff_node(&old[index], &new[index], parent, index, out);
        }
    }

    for index in (new.len()..old.len()).rev() {
        out.push(Mutation::RemoveChildNode {
            target: parent.clone(),
            index,
        });
    }

    for (index, child) in new.iter().enumerate().skip(old.len()) {
        out.push(Mutation::InsertChildNode {
            target: parent.clone(),
            index,
            child: Child::Node(child.clone()),
            clone: true,
        });
    }
}

fn diff_attributes(old: &PropertyList, new: &PropertyList, target: &Address, out: &mut Vec<Mutation>) {
    for change in diff_properties(old, new) {
        out.push(match change {
            PropertyChange::Removed { name, old_value } => Mutation::RemoveAttribute {
                target: target.clone(),
                name,
                old_value: Some(old_value),
            },
            PropertyChange::Changed {
                name,
                new_value,
                old_value,
                ..
            } => Mutation::SetAttribute {
                target: target.clone(),
                name,
                new_value,
                old_value: Some(old_value),
            },
            PropertyChange::Inserted {
                name,
                index,
                new_value,
            } => Mutation::InsertAttribute {
                target: target.clone(),
                index,
                name,
                new_value,
            },
        });
    }
}

/// One difference between two property lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PropertyChange {
    Removed {
        name: String,
        old_value: String,
    },
    Changed {
        name: String,
        index: usize,
        new_value: String,
        old_value: String,
    },
    Inserted {
        name: String,
        index: usize,
        new_value: String,
    },
}

/// Compare by name with raw string equality on values. Removals come first
/// (old order), then changed values, then insertions (new order, with the
/// position in the new list).
pub(crate) fn diff_properties(old: &PropertyList, new: &PropertyList) -> Vec<PropertyChange> {
    let mut changes = Vec::new();

    for (name, old_value) in old.iter() {
        if !new.contains(name) {
            changes.push(PropertyChange::Removed {
                name: name.to_string(),
                old_value: old_value.to_string(),
            });
        }
    }

    for (index, (name, new_value)) in new.iter().enumerate() {
        match old.get(name) {
            Some(old_value) if old_value != new_value => {
                changes.push(PropertyChange::Changed {
                    name: name.to_string(),
                    index,
                    new_value: new_value.to_string(),
                    old_value: old_value.to_string(),
                });
            }
            _ => {}
        }
    }

    for (index, (name, new_value)) in new.iter().enumerate() {
        if !old.contains(name) {
            changes.push(PropertyChange::Inserted {
                name: name.to_string(),
                index,
                new_value: new_value.to_string(),
            });
        }
    }

    changes
}
