//! Command-line front end (SPEC_FULL.md §6, "CLI surface"): the
//! `clap`-derived argument parser and the orchestrator that strings Load,
//! Shape, Plan, Phase Gate, and Emit into a single run. This is the "command
//! line parsing" spec.md §1 calls an external collaborator -- it contains no
//! pipeline logic of its own beyond sequencing, every phase it calls is
//! owned by its own crate.

pub mod args;
pub mod fixture_source;
pub mod orchestrator;

pub use args::CliArgs;
pub use orchestrator::{run, RunOutcome};
