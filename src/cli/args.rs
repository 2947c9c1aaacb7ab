//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Toggles
//!
//! The three listing toggles come in `--flag` / `--no-flag` pairs so a
//! config-provided default can be overridden in either direction:
//! - `--public` / `--no-public`: public paths (default on)
//! - `--private` / `--no-private`: private paths (default off)
//! - `--errors` / `--no-errors`: error records (default off)

use clap::Parser;
use clap_complete::Shell;
use std::path::PathBuf;

/// Surfacer - crawl a namespace graph and snapshot its API surface
#[derive(Parser, Debug)]
#[command(name = "surf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Root namespace identifier to crawl (e.g. "pkg" or "pkg.sub")
    #[arg(long, value_name = "IDENT", required_unless_present = "completions")]
    pub root: Option<String>,

    /// Graph document to crawl (overrides the configured default)
    #[arg(long, value_name = "FILE")]
    pub graph: Option<PathBuf>,

    /// Config file to use instead of the standard locations
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug diagnostics
    #[arg(long)]
    pub debug: bool,

    /// Minimal diagnostic output
    #[arg(short, long)]
    pub quiet: bool,

    /// List public paths
    #[arg(long, overrides_with = "no_public")]
    public: bool,

    /// Do not list public paths
    #[arg(long)]
    no_public: bool,

    /// List private paths (those with a leading-underscore segment)
    #[arg(long, overrides_with = "no_private")]
    private: bool,

    /// Do not list private paths
    #[arg(long)]
    no_private: bool,

    /// List error records (unreachable entities)
    #[arg(long, overrides_with = "no_errors")]
    errors: bool,

    /// Do not list error records
    #[arg(long)]
    no_errors: bool,

    /// Generate shell completions and exit
    #[arg(long, value_name = "SHELL", value_enum)]
    pub completions: Option<Shell>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    /// Effective public toggle, given the configured default.
    pub fn public(&self, default: bool) -> bool {
        resolve_toggle(self.public, self.no_public, default)
    }

    /// Effective private toggle, given the configured default.
    pub fn private(&self, default: bool) -> bool {
        resolve_toggle(self.private, self.no_private, default)
    }

    /// Effective errors toggle, given the configured default.
    pub fn errors(&self, default: bool) -> bool {
        resolve_toggle(self.errors, self.no_errors, default)
    }
}

fn resolve_toggle(on: bool, off: bool, default: bool) -> bool {
    if on {
        true
    } else if off {
        false
    } else {
        default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("args should parse")
    }

    #[test]
    fn root_is_required() {
        assert!(Cli::try_parse_from(["surf"]).is_err());
    }

    #[test]
    fn toggles_fall_back_to_defaults() {
        let cli = parse(&["surf", "--root", "pkg"]);
        assert!(cli.public(true));
        assert!(!cli.private(false));
        assert!(!cli.errors(false));
    }

    #[test]
    fn explicit_flags_beat_defaults() {
        let cli = parse(&["surf", "--root", "pkg", "--no-public", "--private", "--errors"]);
        assert!(!cli.public(true));
        assert!(cli.private(false));
        assert!(cli.errors(false));
    }

    #[test]
    fn later_toggle_wins() {
        let cli = parse(&["surf", "--root", "pkg", "--private", "--no-private"]);
        assert!(!cli.private(false));
        let cli = parse(&["surf", "--root", "pkg", "--no-private", "--private"]);
        assert!(cli.private(false));
    }

    #[test]
    fn completions_do_not_require_root() {
        let cli = parse(&["surf", "--completions", "bash"]);
        assert!(cli.root.is_none());
        assert!(cli.completions.is_some());
    }
}
