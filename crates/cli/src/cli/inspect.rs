use std::path::PathBuf;

use clap::Args;
use modgen_core::codegen::{ModuleContext, service_methods};
use modgen_core::{classify_spec, load_spec};

use crate::cli::common::load_config;
use crate::cli::run_cli;

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    #[arg(long, short, value_name = "SPEC", help = "OpenAPI / Swagger document")]
    pub input: PathBuf,
    #[arg(long, value_name = "PATH", help = "Path to a modgen.toml config file")]
    pub config: Option<PathBuf>,
}

/// Print the module partition of a document.
pub fn run(args: InspectArgs) -> i32 {
    run_cli(|| run_inner(args))
}

fn run_inner(args: InspectArgs) -> Result<(), String> {
    let config = load_config(args.config.as_deref())?;
    let spec = load_spec(&args.input).map_err(|err| err.to_string())?;
    let modules = classify_spec(&spec, &config);

    for (name, module) in &modules {
        println!("{name} ({}/)", module.dir());
        match &module.primary {
            Some(primary) => println!("  primary: {} ({})", primary.name, primary.raw_name),
            None => println!("  primary: -"),
        }
        for path in &module.paths {
            println!("  path:    {path}");
        }
        for schema in module.schemas.keys() {
            println!("  schema:  {schema}");
        }
        let ctx = ModuleContext::new(module, spec.schemas(), &config);
        for method in service_methods(&ctx) {
            let origin = method.operation_id.as_deref().unwrap_or("(synthesized)");
            println!(
                "  method:  {} {} {} <- {origin}",
                method.name, method.method, method.endpoint.path
            );
        }
    }
    Ok(())
}
