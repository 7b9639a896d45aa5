//! Command-line surface (SPEC_FULL.md §6, "CLI surface"). Parsing only --
//! everything this struct produces is handed to [`crate::orchestrator::run`]
//! unchanged.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "clrbind",
    version,
    about = "Binds a CLR assembly graph to a structurally-typed target surface"
)]
pub struct CliArgs {
    /// Seed assembly. May be repeated; each seed starts its own closure walk.
    #[arg(long = "seed", required = true)]
    pub seeds: Vec<PathBuf>,

    /// A directory searched for referenced assemblies that are not seeds.
    /// May be repeated; seeds are always searched first.
    #[arg(long = "reference-path")]
    pub reference_paths: Vec<PathBuf>,

    /// Build policy as JSON. Defaults to `Policy::default()` when omitted.
    #[arg(long)]
    pub policy: Option<PathBuf>,

    /// Directory the declaration tree, sidecars, and diagnostic files are
    /// written under.
    #[arg(long = "out-dir")]
    pub out_dir: PathBuf,

    /// Treat a mismatched public key token for the same assembly name as a
    /// fatal error instead of taking the highest version seen.
    #[arg(long)]
    pub strict_versions: bool,

    /// Increase tracing verbosity. Repeatable: `-v` is debug, `-vv` is trace.
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}
