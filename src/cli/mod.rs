//! cli
//!
//! Command-line interface layer for Surfacer.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and resolve config-provided defaults
//! - Load the graph document and resolve the root namespace
//! - Delegate to [`crate::crawl`] and render the requested listings
//!
//! # Exit behavior
//!
//! Recoverable crawl failures (the error records) never affect the exit
//! status; they are data. The process only fails when the config or graph
//! document cannot be loaded or the root identifier does not resolve.

pub mod args;

pub use args::Cli;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::CommandFactory;

use crate::core::config::Config;
use crate::core::types::CrawlResult;
use crate::crawl;
use crate::graph::{GraphDocument, Reflect};
use crate::ui::output::{self, Verbosity};

/// Which listings to print.
#[derive(Debug, Clone, Copy)]
struct Selection {
    public: bool,
    private: bool,
    errors: bool,
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    if let Some(shell) = cli.completions {
        let mut command = Cli::command();
        clap_complete::generate(shell, &mut command, "surf", &mut std::io::stdout());
        return Ok(());
    }

    let verbosity = Verbosity::from_flags(cli.quiet, cli.debug);
    let config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;

    let selection = Selection {
        public: cli.public(config.public_default()),
        private: cli.private(config.private_default()),
        errors: cli.errors(config.errors_default()),
    };

    let graph_path: PathBuf = match cli.graph.clone().or_else(|| config.graph().map(Into::into)) {
        Some(path) => path,
        None => bail!("no graph document given; pass --graph or set `graph` in surf.toml"),
    };

    let root_ident = match cli.root.as_deref() {
        Some(ident) => ident,
        None => bail!("--root is required"),
    };

    let document = GraphDocument::load(&graph_path)?;
    let store = document.build();
    let root = store
        .resolve_namespace(root_ident)
        .with_context(|| format!("failed to resolve root namespace '{}'", root_ident))?;

    let result = crawl::crawl(&store, root, verbosity);
    render(&result, selection);
    Ok(())
}

/// Print the requested listings: public lines, then private, then errors.
fn render(result: &CrawlResult, selection: Selection) {
    if selection.public {
        for path in &result.public {
            output::line(path);
        }
    }
    if selection.private {
        for path in &result.private {
            output::line(path);
        }
    }
    if selection.errors {
        for error in &result.errors {
            output::line(error);
        }
    }
}
