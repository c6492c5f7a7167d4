//! Patch application.
//!
//! A patch never touches its input: the root is cloned (an `Arc` bump) and
//! every node on the path to the edit is copied on write, so the new tree
//! shares all untouched subtrees with the old one.

use crate::mutation::{Child, Mutation};
use paperclip_common::{
    Address, AddressError, AddressErrorKind, PatchError, PatchResult, ShapeMismatchError,
};
use paperclip_vdom::{resolve_mut, Element, PropertyList, ResolvedMut, Rule, Tree};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Apply one mutation, returning the patched tree.
pub fn patch(tree: &Tree, mutation: &Mutation) -> PatchResult<Tree> {
    let mut root = tree.root.clone();
    apply(&mut root, mutation)?;
    Ok(Tree {
        root,
        modules: tree.modules.clone(),
    })
}

/// Apply mutations strictly in order. Each mutation's addresses refer to the
/// tree produced by the ones before it.
#[instrument(skip_all)]
pub fn patch_all<'a, I>(tree: &Tree, mutations: I) -> PatchResult<Tree>
where
    I: IntoIterator<Item = &'a Mutation>,
{
    let mut root = tree.root.clone();
    let mut applied = 0usize;

    for mutation in mutations {
        debug!(%mutation, "Applying mutation");
        if let Err(err) = apply(&mut root, mutation) {
            warn!(applied, error = %err, "Patch failed");
            return Err(err);
        }
        applied += 1;
    }

    debug!(applied, "Patch complete");
    Ok(Tree {
        root,
        modules: tree.modules.clone(),
    })
}

const ATTRIBUTE: &str = "attribute";
const DECLARATION: &str = "declaration";

fn apply(root: &mut Arc<Element>, mutation: &Mutation) -> PatchResult<()> {
    let target = mutation.target();
    let resolved = resolve_mut(root, target)?;

    match mutation {
        Mutation::SetTextNodeValue { new_value, .. } => match resolved {
            ResolvedMut::Text(text) => {
                text.value.clone_from(new_value);
                Ok(())
            }
            other => Err(mismatch(target, "text", &other)),
        },

        Mutation::InsertChildNode { index, child, .. } => insert_child(resolved, target, *index, child),

        Mutation::RemoveChildNode { index, .. } => remove_child(resolved, target, *index),

        Mutation::SetAttribute {
            name, new_value, ..
        } => {
            let element = expect_element(resolved, target)?;
            if !element.attributes.contains(name) {
                return Err(name_not_found(target, ATTRIBUTE, name));
            }
            element.attributes.insert(name.as_str(), new_value.as_str());
            Ok(())
        }

        Mutation::InsertAttribute {
            index,
            name,
            new_value,
            ..
        } => {
            let element = expect_element(resolved, target)?;
            if element.attributes.contains(name) {
                return Err(name_exists(target, ATTRIBUTE, name));
            }
            element
                .attributes
                .insert_at(*index, name.as_str(), new_value.as_str());
            Ok(())
        }

        Mutation::RemoveAttribute { name, .. } => {
            let element = expect_element(resolved, target)?;
            element
                .attributes
                .remove(name)
                .map(drop)
                .ok_or_else(|| name_not_found(target, ATTRIBUTE, name))
        }

        Mutation::SetProperty {
            index,
            name,
            new_value,
            old_value,
            ..
        } => {
            let declarations = expect_declarations(resolved, target)?;
            // A non-null old value marks a change, a null one an insert.
            match (old_value.is_some(), declarations.contains(name)) {
                (true, true) => {
                    declarations.insert(name.as_str(), new_value.as_str());
                    Ok(())
                }
                (false, false) => {
                    declarations.insert_at(*index, name.as_str(), new_value.as_str());
                    Ok(())
                }
                (true, false) => Err(name_not_found(target, DECLARATION, name)),
                (false, true) => Err(name_exists(target, DECLARATION, name)),
            }
        }

        Mutation::Remove { name, .. } => {
            let declarations = expect_declarations(resolved, target)?;
            declarations
                .remove(name)
                .map(drop)
                .ok_or_else(|| name_not_found(target, DECLARATION, name))
        }
    }
}

fn insert_child(
    resolved: ResolvedMut<'_>,
    target: &Address,
    index: usize,
    child: &Child,
) -> PatchResult<()> {
    match (resolved, child) {
        (ResolvedMut::Element(element), Child::Node(node)) => {
            let len = element.children.len();
            if index > len {
                return Err(out_of_range(target, AddressErrorKind::ChildOutOfRange { index, len }));
            }
            element.children.insert(index, node.clone());
            Ok(())
        }
        (ResolvedMut::Stylesheet(sheet), Child::Rule(rule)) => {
            insert_rule(&mut sheet.rules, target, index, rule)
        }
        (ResolvedMut::Rule(Rule::Condition(condition)), Child::Rule(rule)) => {
            insert_rule(&mut condition.rules, target, index, rule)
        }
        (other, Child::Node(_)) => Err(mismatch(target, "element", &other)),
        (other, Child::Rule(_)) => Err(mismatch(target, "stylesheet or condition rule", &other)),
    }
}

fn insert_rule(
    rules: &mut Vec<Arc<Rule>>,
    target: &Address,
    index: usize,
    rule: &Arc<Rule>,
) -> PatchResult<()> {
    let len = rules.len();
    if index > len {
        return Err(out_of_range(target, AddressErrorKind::RuleOutOfRange { index, len }));
    }
    rules.insert(index, rule.clone());
    Ok(())
}

fn remove_child(resolved: ResolvedMut<'_>, target: &Address, index: usize) -> PatchResult<()> {
    match resolved {
        ResolvedMut::Element(element) => {
            let len = element.children.len();
            if index >= len {
                return Err(out_of_range(target, AddressErrorKind::ChildOutOfRange { index, len }));
            }
            element.children.remove(index);
            Ok(())
        }
        ResolvedMut::Stylesheet(sheet) => remove_rule(&mut sheet.rules, target, index),
        ResolvedMut::Rule(Rule::Condition(condition)) => {
            remove_rule(&mut condition.rules, target, index)
        }
        other => Err(mismatch(target, "element, stylesheet or condition rule", &other)),
    }
}

fn remove_rule(rules: &mut Vec<Arc<Rule>>, target: &Address, index: usize) -> PatchResult<()> {
    let len = rules.len();
    if index >= len {
        return Err(out_of_range(target, AddressErrorKind::RuleOutOfRange { index, len }));
    }
    rules.remove(index);
    Ok(())
}

fn expect_element<'a>(resolved: ResolvedMut<'a>, target: &Address) -> PatchResult<&'a mut Element> {
    match resolved {
        ResolvedMut::Element(element) => Ok(element),
        other => Err(mismatch(target, "element", &other)),
    }
}

fn expect_declarations<'a>(
    resolved: ResolvedMut<'a>,
    target: &Address,
) -> PatchResult<&'a mut PropertyList> {
    const EXPECTED: &str = "style rule or keyframe step";
    match resolved {
        ResolvedMut::Rule(rule) => {
            let found = rule.kind_name();
            rule.declarations_mut()
                .ok_or_else(|| ShapeMismatchError::new(target.clone(), EXPECTED, found).into())
        }
        other => Err(mismatch(target, EXPECTED, &other)),
    }
}

fn mismatch(target: &Address, expected: &'static str, found: &ResolvedMut<'_>) -> PatchError {
    ShapeMismatchError::new(target.clone(), expected, found.kind_name()).into()
}

fn out_of_range(target: &Address, kind: AddressErrorKind) -> PatchError {
    AddressError::new(target.clone(), kind).into()
}

fn name_not_found(target: &Address, what: &'static str, name: &str) -> PatchError {
    let name = name.to_string();
    AddressError::new(target.clone(), AddressErrorKind::NameNotFound { what, name }).into()
}

fn name_exists(target: &Address, what: &'static str, name: &str) -> PatchError {
    let name = name.to_string();
    AddressError::new(target.clone(), AddressErrorKind::NameExists { what, name }).into()
}
