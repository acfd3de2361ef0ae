//! `modgen`: generate TypeScript modules from an OpenAPI document.

use std::process::ExitCode;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

mod cli;

#[derive(Parser)]
#[command(
    name = "modgen",
    version,
    about = "Generate typed TypeScript modules from an OpenAPI / Swagger document"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the module tree
    Generate(cli::generate::GenerateArgs),
    /// Print the module classification without writing files
    Inspect(cli::inspect::InspectArgs),
}

fn main() -> ExitCode {
    init_tracing();

    let code = match Cli::try_parse() {
        Ok(cli) => match cli.command {
            Some(Commands::Generate(args)) => cli::generate::run(args),
            Some(Commands::Inspect(args)) => cli::inspect::run(args),
            None => {
                let mut cmd = Cli::command();
                let _ = cmd.print_help();
                println!();
                0
            }
        },
        Err(e) => {
            let code = e.exit_code();
            let _ = e.print();
            code
        }
    };
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

fn init_tracing() {
    // MODGEN_LOG is either a plain level applied to the workspace crates or a
    // full filter spec like "modgen_core=trace,modgen_cli=info"
    let filter = match std::env::var("MODGEN_LOG") {
        Ok(level) if is_plain_level(&level) => {
            format!("modgen_core={level},modgen_cli={level}")
        }
        Ok(spec) => spec,
        Err(_) => "modgen_core=info,modgen_cli=info".to_string(),
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_filter(EnvFilter::new(filter));

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn is_plain_level(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    )
}
