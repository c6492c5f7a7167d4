//! Stylesheet differ - compute incremental updates for hot reload
//!
//! Rules are compared by position. A rule whose header (kind plus selector,
//! keyframe offset or condition) changed is replaced wholesale; otherwise its
//! declarations are diffed by name, and condition rules recurse into their
//! nested rules. Unknown at-rules are opaque: any change replaces them.

use crate::mutation::{Child, Mutation};
use crate::vdom_differ::{diff_properties, PropertyChange};
use paperclip_common::Address;
use paperclip_vdom::{PropertyList, Rule};
use std::sync::Arc;
use tracing::debug;

/// Diff two rule lists held by the stylesheet or condition rule at
/// `container`.
pub(crate) fn diff_rules(
    old: &[Arc<Rule>],
    new: &[Arc<Rule>],
    container: &Address,
    out: &mut Vec<Mutation>,
) {
    let common = old.len().min(new.len());

    for index in 0..common {
        if !Arc::ptr_eq(&old[index], &new[index]) {
            diff_rule(&old[index], &new[index], container, index, out);
        }
    }

    for index in (new.len()..old.len()).rev() {
        out.push(Mutation::RemoveChildNode {
            target: container.clone(),
            index,
        });
    }

    for (index, rule) in new.iter().enumerate().skip(old.len()) {
        out.push(Mutation::InsertChildNode {
            target: container.clone(),
            index,
            child: Child::Rule(rule.clone()),
            clone: true,
        });
    }
}

fn diff_rule(old: &Rule, new: &Rule, container: &Address, index: usize, out: &mut Vec<Mutation>) {
    if old == new {
        return;
    }

    if !old.same_header(new) {
        debug!(%container, index, kind = new.kind_name(), "Replacing rule");
        replace_rule(new, container, index, out);
        return;
    }

    let address = container.rule(index);
    match (old, new) {
        (Rule::Style(a), Rule::Style(b)) => {
            diff_declarations(&a.declarations, &b.declarations, &address, out);
        }
        (Rule::KeyframeStep(a), Rule::KeyframeStep(b)) => {
            diff_declarations(&a.declarations, &b.declarations, &address, out);
        }
        (Rule::Condition(a), Rule::Condition(b)) if !a.kind.is_opaque() => {
            diff_rules(&a.rules, &b.rules, &address, out);
        }
        _ => {
            debug!(%container, index, "Replacing opaque at-rule");
            replace_rule(new, container, index, out);
        }
    }
}

fn replace_rule(new: &Rule, container: &Address, index: usize, out: &mut Vec<Mutation>) {
    out.push(Mutation::RemoveChildNode {
        target: container.clone(),
        index,
    });
    out.push(Mutation::InsertChildNode {
        target: container.clone(),
        index,
        child: Child::Rule(Arc::new(new.clone())),
        clone: true,
    });
}

fn diff_declarations(
    old: &PropertyList,
    new: &PropertyList,
    target: &Address,
    out: &mut Vec<Mutation>,
) {
    for change in diff_properties(old, new) {
        out.push(match change {
            PropertyChange::Removed { name, old_value } => Mutation::Remove {
                target: target.clone(),
                name,
                old_value: Some(old_value),
            },
            PropertyChange::Changed {
                name,
                index,
                new_value,
                old_value,
            } => Mutation::SetProperty {
                target: target.clone(),
                index,
                name,
                new_value,
                old_value: Some(old_value),
            },
            PropertyChange::Inserted {
                name,
                index,
                new_value,
            } => Mutation::SetProperty {
                target: target.clone(),
                index,
                name,
                new_value,
                old_value: None,
            },
        });
    }
}
