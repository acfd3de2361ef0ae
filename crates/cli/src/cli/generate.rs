use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use modgen_core::{generate_from_path, write_files};
use tracing::info;

use crate::cli::common::load_config;
use crate::cli::run_cli;

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[arg(
        long,
        short,
        value_name = "SPEC",
        help = "OpenAPI / Swagger document (.yaml, .yml or .json)"
    )]
    pub input: PathBuf,
    #[arg(
        long,
        short,
        value_name = "DIR",
        help = "Output root. Overrides `output_dir` from the config file"
    )]
    pub output: Option<PathBuf>,
    #[arg(long, value_name = "PATH", help = "Path to a modgen.toml config file")]
    pub config: Option<PathBuf>,
    #[arg(
        long = "api-prefix",
        value_name = "SEGMENT",
        help = "Leading path segment ignored when naming modules"
    )]
    pub api_prefix: Option<String>,
    #[arg(long = "dry-run", help = "List the files that would be written")]
    pub dry_run: bool,
}

/// Generate the module tree and write it, or list it with `--dry-run`.
pub fn run(args: GenerateArgs) -> i32 {
    run_cli(|| run_inner(args))
}

fn run_inner(args: GenerateArgs) -> Result<(), String> {
    let start = Instant::now();
    let mut config = load_config(args.config.as_deref())?;
    if let Some(prefix) = args.api_prefix {
        config.api_prefix = prefix;
    }
    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(&config.output_dir));

    let files = generate_from_path(&args.input, &config).map_err(|err| err.to_string())?;

    if args.dry_run {
        for (path, content) in &files {
            println!("{} ({} bytes)", output.join(path).display(), content.len());
        }
        return Ok(());
    }

    let summary = write_files(&output, &files).map_err(|err| err.to_string())?;
    info!(
        written = summary.written,
        unchanged = summary.unchanged,
        elapsed_ms = start.elapsed().as_millis(),
        "Wrote generated files."
    );
    println!(
        "Generated {} files in {} ({} written, {} unchanged)",
        files.len(),
        output.display(),
        summary.written,
        summary.unchanged
    );
    Ok(())
}
