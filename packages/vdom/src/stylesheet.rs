//! Embedded stylesheets: style rules, condition rules and keyframe steps.

use crate::properties::PropertyList;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Stylesheet embedded in an element's shadow root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stylesheet {
    #[serde(default)]
    pub rules: Vec<Arc<Rule>>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rule(mut self, rule: impl Into<Rule>) -> Self {
        self.rules.push(Arc::new(rule.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Rule {
    Style(StyleRule),
    Condition(ConditionRule),
    KeyframeStep(KeyframeStep),
}

impl Rule {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Rule::Style(_) => "style rule",
            Rule::Condition(_) => "condition rule",
            Rule::KeyframeStep(_) => "keyframe step",
        }
    }

    /// Declarations of rules that carry them directly.
    pub fn declarations(&self) -> Option<&PropertyList> {
        match self {
            Rule::Style(rule) => Some(&rule.declarations),
            Rule::KeyframeStep(step) => Some(&step.declarations),
            Rule::Condition(_) => None,
        }
    }

    pub fn declarations_mut(&mut self) -> Option<&mut PropertyList> {
        match self {
            Rule::Style(rule) => Some(&mut rule.declarations),
            Rule::KeyframeStep(step) => Some(&mut step.declarations),
            Rule::Condition(_) => None,
        }
    }

    /// Nested rules of a condition rule.
    pub fn rules(&self) -> Option<&[Arc<Rule>]> {
        match self {
            Rule::Condition(rule) => Some(&rule.rules),
            _ => None,
        }
    }

    pub fn rules_mut(&mut self) -> Option<&mut Vec<Arc<Rule>>> {
        match self {
            Rule::Condition(rule) => Some(&mut rule.rules),
            _ => None,
        }
    }

    /// Two rules with the same header (kind plus selector, offset or
    /// condition) are diffed in place; anything else is a replacement.
    pub fn same_header(&self, other: &Rule) -> bool {
        match (self, other) {
            (Rule::Style(a), Rule::Style(b)) => a.selector == b.selector,
            (Rule::KeyframeStep(a), Rule::KeyframeStep(b)) => a.offset == b.offset,
            (Rule::Condition(a), Rule::Condition(b)) => {
                a.kind == b.kind && a.condition == b.condition
            }
            _ => false,
        }
    }
}

impl From<StyleRule> for Rule {
    fn from(rule: StyleRule) -> Self {
        Rule::Style(rule)
    }
}

impl From<ConditionRule> for Rule {
    fn from(rule: ConditionRule) -> Self {
        Rule::Condition(rule)
    }
}

impl From<KeyframeStep> for Rule {
    fn from(step: KeyframeStep) -> Self {
        Rule::KeyframeStep(step)
    }
}

/// `selector { property: value; ... }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleRule {
    pub selector: String,
    #[serde(default)]
    pub declarations: PropertyList,
}

impl StyleRule {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            declarations: PropertyList::new(),
        }
    }

    pub fn with_declaration(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.declarations.insert(name, value);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConditionKind {
    Media,
    Supports,
    Keyframes,
    /// At-rule whose body grammar is not understood, e.g. `font-feature-values`.
    Unknown(String),
}

impl ConditionKind {
    /// At-rule name without the `@`.
    pub fn at_keyword(&self) -> &str {
        match self {
            ConditionKind::Media => "media",
            ConditionKind::Supports => "supports",
            ConditionKind::Keyframes => "keyframes",
            ConditionKind::Unknown(name) => name,
        }
    }

    /// Opaque at-rules are never diffed below the rule itself.
    pub fn is_opaque(&self) -> bool {
        matches!(self, ConditionKind::Unknown(_))
    }
}

impl fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.at_keyword())
    }
}

/// `@kind condition { rules... }`. Keyframes use the animation name as the
/// condition and hold [`KeyframeStep`] rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionRule {
    #[serde(rename = "atRule")]
    pub kind: ConditionKind,
    pub condition: String,
    #[serde(default)]
    pub rules: Vec<Arc<Rule>>,
}

impl ConditionRule {
    pub fn new(kind: ConditionKind, condition: impl Into<String>) -> Self {
        Self {
            kind,
            condition: condition.into(),
            rules: Vec::new(),
        }
    }

    pub fn media(condition: impl Into<String>) -> Self {
        Self::new(ConditionKind::Media, condition)
    }

    pub fn keyframes(name: impl Into<String>) -> Self {
        Self::new(ConditionKind::Keyframes, name)
    }

    pub fn unknown(keyword: impl Into<String>, condition: impl Into<String>) -> Self {
        Self::new(ConditionKind::Unknown(keyword.into()), condition)
    }

    pub fn with_rule(mut self, rule: impl Into<Rule>) -> Self {
        self.rules.push(Arc::new(rule.into()));
        self
    }
}

/// One step of a keyframes block, e.g. `0%, 50% { opacity: 0; }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyframeStep {
    pub offset: String,
    #[serde(default)]
    pub declarations: PropertyList,
}

impl KeyframeStep {
    pub fn new(offset: impl Into<String>) -> Self {
        Self {
            offset: offset.into(),
            declarations: PropertyList::new(),
        }
    }

    pub fn with_declaration(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.declarations.insert(name, value);
        self
    }
}
