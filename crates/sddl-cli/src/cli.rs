use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::backend;

/// Compiles SDDL schema files against a named back-end target.
#[derive(Parser, Debug)]
#[command(name = "sddlc", version, about)]
struct Cli {
    /// Schema files to compile, in `require` order.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Where to write the emitted output.
    #[arg(short, long)]
    output: PathBuf,

    /// Back-end target to emit (see `--list-targets`).
    #[arg(short, long)]
    target: String,

    /// Namespace passed to the back-end; defaults to the output file stem.
    #[arg(short, long)]
    namespace: Option<String>,

    /// Raise the log level to debug.
    #[arg(short, long)]
    verbose: bool,

    /// Print the available back-end target names and exit.
    #[arg(long)]
    list_targets: bool,
}

pub fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info })
        .format_timestamp(None)
        .init();

    if cli.list_targets {
        for name in backend::names() {
            println!("{name}");
        }
        return Ok(());
    }

    let namespace = cli.namespace.clone().unwrap_or_else(|| {
        cli.output
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    });

    let mut target = backend::make(&cli.target, &namespace)
        .ok_or_else(|| anyhow::anyhow!("unknown target '{}'; see --list-targets", cli.target))?;

    let compiler = sddl::Compiler::compile(&cli.files).map_err(|e| anyhow::anyhow!("{e}"))?;

    let mut sink = File::create(&cli.output).with_context(|| format!("creating {}", cli.output.display()))?;
    compiler
        .emit(target.as_mut(), &mut sink)
        .with_context(|| format!("writing {}", cli.output.display()))?;

    Ok(())
}
