//! End-to-end pipeline: load, collect enums, classify, emit every module,
//! emit the endpoints registry.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, info};

use crate::classify::classify;
use crate::codegen::{
    ModuleContext, endpoints_module, models_module, presentation_module, service_impl_module,
    service_interface_module, service_methods,
};
use crate::config::GeneratorConfig;
use crate::enums::EnumRegistry;
use crate::error::Result;
use crate::ir::Emit;
use crate::loader::load_spec;
use crate::module::Module;
use crate::spec::OpenApiSpec;

/// Relative output path -> file content.
pub type FileMap = BTreeMap<String, String>;

/// Relative path of the shared endpoints registry.
pub const ENDPOINTS_FILE: &str = "constants/endpoints.ts";

/// Collect enums and classify, without emitting anything.
pub fn classify_spec(spec: &OpenApiSpec, config: &GeneratorConfig) -> BTreeMap<String, Module> {
    let global = EnumRegistry::collect(spec.schemas());
    debug!(enums = global.len(), "Collected global enums.");
    classify(spec, &global, config)
}

/// Generate the full file set for a parsed specification.
pub fn generate(spec: &OpenApiSpec, config: &GeneratorConfig) -> FileMap {
    let modules = classify_spec(spec, config);
    let schemas = spec.schemas();

    let mut files = FileMap::new();
    let mut endpoints = BTreeMap::new();

    for (name, module) in &modules {
        let ctx = ModuleContext::new(module, schemas, config);
        let dir = module.dir();

        let models = models_module(&ctx);
        let methods = service_methods(&ctx);

        files.insert(
            format!("{dir}/domains/models/{name}.ts"),
            models.module.emit(),
        );
        files.insert(
            format!("{dir}/domains/{}.ts", ctx.interface_name()),
            service_interface_module(&ctx, &methods, &models).emit(),
        );
        files.insert(
            format!("{dir}/{name}.service.ts"),
            service_impl_module(&ctx, &methods).emit(),
        );
        files.insert(
            format!("{dir}/{name}.presentation.ts"),
            presentation_module(&ctx, &methods, &models).emit(),
        );

        debug!(
            module = %name,
            schemas = module.schemas.len(),
            methods = methods.len(),
            primary = module.primary.as_ref().map_or("-", |p| p.name.as_str()),
            "Emitted module."
        );
        endpoints.insert(name.clone(), methods);
    }

    files.insert(ENDPOINTS_FILE.to_string(), endpoints_module(&endpoints).emit());

    info!(
        modules = modules.len(),
        files = files.len(),
        "Generated TypeScript modules."
    );
    files
}

/// Load a specification file and generate its file set.
pub fn generate_from_path(path: &Path, config: &GeneratorConfig) -> Result<FileMap> {
    let spec = load_spec(path)?;
    Ok(generate(&spec, config))
}
