use super::{read_json, to_json};
use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use paperclip_diff::{patch_all, Mutation};
use paperclip_vdom::{to_html, Tree};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Args)]
pub struct PatchArgs {
    /// Tree to patch (JSON)
    pub tree: PathBuf,

    /// Mutation list produced by `paperclip diff` (JSON)
    pub mutations: PathBuf,

    /// Print the patched tree as HTML instead of JSON
    #[arg(long)]
    pub html: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub fn patch(args: PatchArgs, config: &Config) -> Result<()> {
    let tree: Tree = read_json(&args.tree)?;
    let mutations: Vec<Mutation> = read_json(&args.mutations)?;

    info!(mutations = mutations.len(), "Patching tree");
    let patched = patch_all(&tree, &mutations)
        .with_context(|| format!("Mutations do not apply to {}", args.tree.display()))?;

    if args.html {
        println!("{}", to_html(&patched));
    } else {
        println!("{}", to_json(&patched, args.pretty || config.pretty)?);
    }
    Ok(())
}
