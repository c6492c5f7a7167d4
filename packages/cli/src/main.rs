mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{diff, patch, render, DiffArgs, PatchArgs, RenderArgs};
use config::Config;
use tracing_subscriber::EnvFilter;

/// Paperclip CLI - diff and patch synthetic documents
#[derive(Parser, Debug)]
#[command(name = "paperclip")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the mutations that turn one tree into another
    Diff(DiffArgs),

    /// Apply a mutation list to a tree
    Patch(PatchArgs),

    /// Print a tree as HTML
    Render(RenderArgs),
}

fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config = Config::load(&cwd)?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Diff(args) => diff(args, &config),
        Command::Patch(args) => patch(args, &config),
        Command::Render(args) => render(args),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
