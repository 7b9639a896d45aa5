use anyhow::Context;
use clap::Parser;
use clrbind_cli::{args::CliArgs, orchestrator};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("clrbind: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn run(args: &CliArgs) -> anyhow::Result<ExitCode> {
    let outcome = orchestrator::run(args).context("build failed")?;
    if outcome.error_count == 0 {
        tracing::info!(files = outcome.emitted_files, "build succeeded");
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!(
            "clrbind: {} blocking diagnostic(s); see {}",
            outcome.error_count,
            outcome.diagnostics_path.display()
        );
        Ok(ExitCode::from(1))
    }
}

/// Verbosity defaults to `info`; each repeated `-v` drops one level,
/// bottoming out at `trace`. `RUST_LOG`, when set, always wins.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
