//! Mutation records exchanged between the differ, the patcher and renderers.
//!
//! Serialized form is one flat record per mutation: `{ "type": "INSERT_CHILD_NODE",
//! "target": [...], "index": 0, "newValue": null, "oldValue": null,
//! "child": {...}, "clone": true }`. `newValue` and `oldValue` are always
//! present, null when the mutation kind has no use for them. Every mutation
//! carries the address it applies to, expressed against the tree as it stands
//! after all preceding mutations of the same batch.

use paperclip_common::Address;
use paperclip_vdom::{Node, Rule};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "MutationRecord", try_from = "MutationRecord")]
pub enum Mutation {
    /// Replace the value of the text node at `target`.
    SetTextNodeValue {
        target: Address,
        new_value: String,
        old_value: Option<String>,
    },

    /// Insert `child` at `index` of the element, stylesheet or condition rule
    /// at `target`.
    InsertChildNode {
        target: Address,
        index: usize,
        child: Child,
        /// The consumer must deep-copy `child` instead of reusing it.
        clone: bool,
    },

    /// Remove item `index` of the element, stylesheet or condition rule at
    /// `target`.
    RemoveChildNode { target: Address, index: usize },

    SetAttribute {
        target: Address,
        name: String,
        new_value: String,
        old_value: Option<String>,
    },

    InsertAttribute {
        target: Address,
        index: usize,
        name: String,
        new_value: String,
    },

    RemoveAttribute {
        target: Address,
        name: String,
        old_value: Option<String>,
    },

    /// Set a declaration of the style rule or keyframe step at `target`.
    /// `old_value` is null when the declaration is new, in which case it is
    /// placed at `index`.
    SetProperty {
        target: Address,
        index: usize,
        name: String,
        new_value: String,
        old_value: Option<String>,
    },

    /// Remove a declaration of the style rule or keyframe step at `target`.
    Remove {
        target: Address,
        name: String,
        old_value: Option<String>,
    },
}

/// Payload of [`Mutation::InsertChildNode`]. Serialized as the bare subtree;
/// node kinds (`element`, `text`) and rule kinds (`style`, `condition`,
/// `keyframeStep`) never share a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Child {
    Node(Arc<Node>),
    Rule(Arc<Rule>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum MutationType {
    SetTextNodeValue,
    InsertChildNode,
    RemoveChildNode,
    SetAttribute,
    InsertAttribute,
    RemoveAttribute,
    SetProperty,
    Remove,
}

/// Flat wire form of a [`Mutation`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MutationRecord {
    #[serde(rename = "type")]
    kind: MutationType,
    target: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default)]
    new_value: Option<String>,
    #[serde(default)]
    old_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    child: Option<Child>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    clone: Option<bool>,
}

/// A wire record lacks a field its `type` requires.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} record is missing `{field}`")]
pub struct MissingFieldError {
    pub kind: &'static str,
    pub field: &'static str,
}

impl MutationRecord {
    fn new(kind: MutationType, target: Address) -> Self {
        Self {
            kind,
            target,
            index: None,
            name: None,
            new_value: None,
            old_value: None,
            child: None,
            clone: None,
        }
    }
}

impl MutationType {
    fn wire_name(self) -> &'static str {
        match self {
            MutationType::SetTextNodeValue => "SET_TEXT_NODE_VALUE",
            MutationType::InsertChildNode => "INSERT_CHILD_NODE",
            MutationType::RemoveChildNode => "REMOVE_CHILD_NODE",
            MutationType::SetAttribute => "SET_ATTRIBUTE",
            MutationType::InsertAttribute => "INSERT_ATTRIBUTE",
            MutationType::RemoveAttribute => "REMOVE_ATTRIBUTE",
            MutationType::SetProperty => "SET_PROPERTY",
            MutationType::Remove => "REMOVE",
        }
    }
}

impl From<Mutation> for MutationRecord {
    fn from(mutation: Mutation) -> Self {
        match mutation {
            Mutation::SetTextNodeValue {
                target,
                new_value,
                old_value,
            } => MutationRecord {
                new_value: Some(new_value),
                old_value,
                ..MutationRecord::new(MutationType::SetTextNodeValue, target)
            },
            Mutation::InsertChildNode {
                target,
                index,
                child,
                clone,
            } => MutationRecord {
                index: Some(index),
                child: Some(child),
                clone: Some(clone),
                ..MutationRecord::new(MutationType::InsertChildNode, target)
            },
            Mutation::RemoveChildNode { target, index } => MutationRecord {
                index: Some(index),
                ..MutationRecord::new(MutationType::RemoveChildNode, target)
            },
            Mutation::SetAttribute {
                target,
                name,
                new_value,
                old_value,
            } => MutationRecord {
                name: Some(name),
                new_value: Some(new_value),
                old_value,
                ..MutationRecord::new(MutationType::SetAttribute, target)
            },
            Mutation::InsertAttribute {
                target,
                index,
                name,
                new_value,
            } => MutationRecord {
                index: Some(index),
                name: Some(name),
                new_value: Some(new_value),
                ..MutationRecord::new(MutationType::InsertAttribute, target)
            },
            Mutation::RemoveAttribute {
                target,
                name,
                old_value,
            } => MutationRecord {
                name: Some(name),
                old_value,
                ..MutationRecord::new(MutationType::RemoveAttribute, target)
            },
            Mutation::SetProperty {
                target,
                index,
                name,
                new_value,
                old_value,
            } => MutationRecord {
                index: Some(index),
                name: Some(name),
                new_value: Some(new_value),
                old_value,
                ..MutationRecord::new(MutationType::SetProperty, target)
            },
            Mutation::Remove {
                target,
                name,
                old_value,
            } => MutationRecord {
                name: Some(name),
                old_value,
                ..MutationRecord::new(MutationType::Remove, target)
            },
        }
    }
}

impl TryFrom<MutationRecord> for Mutation {
    type Error = MissingFieldError;

    fn try_from(record: MutationRecord) -> Result<Self, Self::Error> {
        let MutationRecord {
            kind,
            target,
            index,
            name,
            new_value,
            old_value,
            child,
            clone,
        } = record;
        let missing = |field| MissingFieldError {
            kind: kind.wire_name(),
            field,
        };
        let index = index.ok_or_else(|| missing("index"));
        let name = name.ok_or_else(|| missing("name"));
        let new_value = new_value.ok_or_else(|| missing("newValue"));

        Ok(match kind {
            MutationType::SetTextNodeValue => Mutation::SetTextNodeValue {
                target,
                new_value: new_value?,
                old_value,
            },
            MutationType::InsertChildNode => Mutation::InsertChildNode {
                target,
                index: index?,
                child: child.ok_or_else(|| missing("child"))?,
                clone: clone.unwrap_or(false),
            },
            MutationType::RemoveChildNode => Mutation::RemoveChildNode {
                target,
                index: index?,
            },
            MutationType::SetAttribute => Mutation::SetAttribute {
                target,
                name: name?,
                new_value: new_value?,
                old_value,
            },
            MutationType::InsertAttribute => Mutation::InsertAttribute {
                target,
                index: index?,
                name: name?,
                new_value: new_value?,
            },
            MutationType::RemoveAttribute => Mutation::RemoveAttribute {
                target,
                name: name?,
                old_value,
            },
            MutationType::SetProperty => Mutation::SetProperty {
                target,
                index: index?,
                name: name?,
                new_value: new_value?,
                old_value,
            },
            MutationType::Remove => Mutation::Remove {
                target,
                name: name?,
                old_value,
            },
        })
    }
}

impl Child {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Child::Node(node) => node.kind_name(),
            Child::Rule(rule) => rule.kind_name(),
        }
    }
}

impl Mutation {
    pub fn target(&self) -> &Address {
        match self {
            Mutation::SetTextNodeValue { target, .. }
            | Mutation::InsertChildNode { target, .. }
            | Mutation::RemoveChildNode { target, .. }
            | Mutation::SetAttribute { target, .. }
            | Mutation::InsertAttribute { target, .. }
            | Mutation::RemoveAttribute { target, .. }
            | Mutation::SetProperty { target, .. }
            | Mutation::Remove { target, .. } => target,
        }
    }

    /// Wire name of the mutation type.
    pub fn kind(&self) -> &'static str {
        self.mutation_type().wire_name()
    }

    fn mutation_type(&self) -> MutationType {
        match self {
            Mutation::SetTextNodeValue { .. } => MutationType::SetTextNodeValue,
            Mutation::InsertChildNode { .. } => MutationType::InsertChildNode,
            Mutation::RemoveChildNode { .. } => MutationType::RemoveChildNode,
            Mutation::SetAttribute { .. } => MutationType::SetAttribute,
            Mutation::InsertAttribute { .. } => MutationType::InsertAttribute,
            Mutation::RemoveAttribute { .. } => MutationType::RemoveAttribute,
            Mutation::SetProperty { .. } => MutationType::SetProperty,
            Mutation::Remove { .. } => MutationType::Remove,
        }
    }
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.target())?;
        match self {
            Mutation::SetTextNodeValue { new_value, .. } => write!(f, " {:?}", new_value),
            Mutation::InsertChildNode { index, child, .. } => {
                write!(f, " [{}] {}", index, child.kind_name())
            }
            Mutation::RemoveChildNode { index, .. } => write!(f, " [{}]", index),
            Mutation::SetAttribute {
                name, new_value, ..
            }
            | Mutation::InsertAttribute {
                name, new_value, ..
            }
            | Mutation::SetProperty {
                name, new_value, ..
            } => write!(f, " {}={:?}", name, new_value),
            Mutation::RemoveAttribute { name, .. } | Mutation::Remove { name, .. } => {
                write!(f, " {}", name)
            }
        }
    }
}
