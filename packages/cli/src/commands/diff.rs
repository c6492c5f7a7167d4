use super::{read_json, to_json};
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use paperclip_diff::{patch_all, Mutation};
use paperclip_vdom::{Tree, TreeQueryCache};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Previously rendered tree (JSON)
    pub old: PathBuf,

    /// Newly evaluated tree (JSON)
    pub new: PathBuf,

    /// Pretty-print the mutation list
    #[arg(long)]
    pub pretty: bool,

    /// Fail unless patching the old tree reproduces the new one
    #[arg(long)]
    pub verify: bool,
}

pub fn diff(args: DiffArgs, config: &Config) -> Result<()> {
    let old: Tree = read_json(&args.old)?;
    let new: Tree = read_json(&args.new)?;

    let mut cache = TreeQueryCache::new();
    let old_nodes = cache.node_count(&old);
    let new_nodes = cache.node_count(&new);
    info!(old_nodes, new_nodes, "Diffing trees");

    let mutations = paperclip_diff::diff(&old, &new);

    for (kind, count) in summarize(&mutations) {
        info!(kind, count, "Mutations");
    }

    if args.verify || config.verify {
        verify(&old, &new, &mutations)?;
        eprintln!(
            "{} {} mutations reproduce {}",
            "✓".green(),
            mutations.len(),
            args.new.display()
        );
    }

    println!("{}", to_json(&mutations, args.pretty || config.pretty)?);
    Ok(())
}

/// Mutation counts by wire type, in type order.
pub fn summarize(mutations: &[Mutation]) -> BTreeMap<&'static str, usize> {
    let mut counts = BTreeMap::new();
    for mutation in mutations {
        *counts.entry(mutation.kind()).or_insert(0) += 1;
    }
    counts
}

fn verify(old: &Tree, new: &Tree, mutations: &[Mutation]) -> Result<()> {
    let patched = patch_all(old, mutations)?;
    if &patched != new {
        return Err(anyhow!(
            "Patched tree does not match the new tree ({} mutations)",
            mutations.len()
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use paperclip_vdom::{Element, Node};

    #[test]
    fn test_summarize() {
        let old = Tree::document(vec![Node::element("a"), Node::text("x")]);
        let new = Tree::document(vec![Node::Element(Element::new("b").with_flag("c"))]);
        let mutations = paperclip_diff::diff(&old, &new);

        let counts = summarize(&mutations);
        assert_eq!(counts.get("REMOVE_CHILD_NODE"), Some(&2));
        assert_eq!(counts.get("INSERT_CHILD_NODE"), Some(&1));
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_verify() {
        let old = Tree::document(vec![Node::text("a")]);
        let new = Tree::document(vec![Node::text("b")]);
        let mutations = paperclip_diff::diff(&old, &new);

        assert!(verify(&old, &new, &mutations).is_ok());
        assert!(verify(&old, &new, &[]).is_err());
    }
}
