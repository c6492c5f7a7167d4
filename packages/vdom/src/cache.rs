//! Caller-owned memo for tree queries.
//!
//! Entries belong to the last tree queried, recognized by its root
//! allocation. Asking about a different tree drops them. The cache holds a
//! weak reference to that root, so the allocation is never reused for another
//! tree while the entries exist. Call [`TreeQueryCache::invalidate`] at the
//! start of every evaluation cycle.

use crate::vdom::{Element, TextNode, Tree};
use crate::visitor::{walk_element, Visitor};
use paperclip_common::Address;
use std::collections::BTreeMap;
use std::sync::{Arc, Weak};
use tracing::debug;

#[derive(Debug, Default)]
pub struct TreeQueryCache {
    generation: u64,
    tree_key: Option<Weak<Element>>,
    index: Option<TreeIndex>,
    hits: u64,
    misses: u64,
}

#[derive(Debug, Default)]
struct TreeIndex {
    node_count: usize,
    text_count: usize,
    elements_by_tag: BTreeMap<String, Vec<Address>>,
}

impl Visitor for TreeIndex {
    fn visit_element(&mut self, element: &Element, address: &Address) {
        self.node_count += 1;
        self.elements_by_tag
            .entry(element.tag.clone())
            .or_default()
            .push(address.clone());
        walk_element(self, element, address);
    }

    fn visit_text(&mut self, _text: &TextNode, _address: &Address) {
        self.node_count += 1;
        self.text_count += 1;
    }
}

impl TreeQueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything. Marks the start of a new evaluation cycle.
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.tree_key = None;
        self.index = None;
        debug!(generation = self.generation, "tree query cache invalidated");
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// (hits, misses) since creation.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    /// Number of element and text nodes, the root included.
    pub fn node_count(&mut self, tree: &Tree) -> usize {
        self.index_for(tree).node_count
    }

    pub fn text_count(&mut self, tree: &Tree) -> usize {
        self.index_for(tree).text_count
    }

    /// Addresses of every element with `tag`, in document order.
    pub fn find_by_tag(&mut self, tree: &Tree, tag: &str) -> &[Address] {
        self.index_for(tree)
            .elements_by_tag
            .get(tag)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn index_for(&mut self, tree: &Tree) -> &TreeIndex {
        let same_tree = self
            .tree_key
            .as_ref()
            .is_some_and(|key| Weak::ptr_eq(key, &Arc::downgrade(&tree.root)));
        if same_tree && self.index.is_some() {
            self.hits += 1;
        } else {
            self.misses += 1;
            let mut index = TreeIndex::default();
            index.visit_tree(tree);
            self.tree_key = Some(Arc::downgrade(&tree.root));
            self.index = Some(index);
        }
        self.index.get_or_insert_with(TreeIndex::default)
    }
}
