//! Structural addresses into a synthetic tree.
//!
//! Nodes, stylesheets, rules and declarations are located by walking a
//! sequence of segments from the root element instead of by identity, so an
//! address computed while diffing stays valid against the tree the patcher
//! is folding over.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single step in an [`Address`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Segment {
    /// Child `n` of an element.
    Child(usize),
    /// Descend from an element into its embedded stylesheet.
    Shadow,
    /// Rule `n` of a stylesheet or condition rule.
    Rule(usize),
    /// Declaration `n` of a style rule or keyframe step. Always terminal.
    Declaration(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Child(i) => write!(f, "{}", i),
            Segment::Shadow => f.write_str("shadow"),
            Segment::Rule(i) => write!(f, "r{}", i),
            Segment::Declaration(i) => write!(f, "d{}", i),
        }
    }
}

/// Path from a tree's root element to a node, stylesheet, rule or declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(Vec<Segment>);

impl Address {
    /// The root element.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn from_segments(segments: impl Into<Vec<Segment>>) -> Self {
        Self(segments.into())
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<Segment> {
        self.0.last().copied()
    }

    /// Address of the container this address points into, if any.
    pub fn parent(&self) -> Option<Address> {
        if self.0.is_empty() {
            return None;
        }
        Some(Self(self.0[..self.0.len() - 1].to_vec()))
    }

    /// A new address with `segment` appended.
    pub fn join(&self, segment: Segment) -> Address {
        let mut segments = Vec::with_capacity(self.0.len() + 1);
        segments.extend_from_slice(&self.0);
        segments.push(segment);
        Self(segments)
    }

    pub fn child(&self, index: usize) -> Address {
        self.join(Segment::Child(index))
    }

    pub fn shadow(&self) -> Address {
        self.join(Segment::Shadow)
    }

    pub fn rule(&self, index: usize) -> Address {
        self.join(Segment::Rule(index))
    }

    pub fn declaration(&self, index: usize) -> Address {
        self.join(Segment::Declaration(index))
    }

    /// Whether `self` is `other` or lies underneath it.
    pub fn starts_with(&self, other: &Address) -> bool {
        self.0.starts_with(&other.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.0 {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

impl From<Vec<Segment>> for Address {
    fn from(segments: Vec<Segment>) -> Self {
        Self(segments)
    }
}

impl FromIterator<Segment> for Address {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
