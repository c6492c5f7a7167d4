use super::read_json;
use anyhow::Result;
use clap::Args;
use paperclip_vdom::{to_html, Tree};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Tree to render (JSON)
    pub tree: PathBuf,
}

pub fn render(args: RenderArgs) -> Result<()> {
    let tree: Tree = read_json(&args.tree)?;
    println!("{}", to_html(&tree));
    Ok(())
}
