//! Module IR -> TypeScript AST.
//!
//! Every builder here returns a `TsModule`; text is produced only by `Emit`.
//! Imports are computed from the named types a file actually mentions.

mod endpoints;
mod models;
mod operations;
mod presentation;
mod service;
mod service_impl;

use std::collections::{BTreeMap, BTreeSet};

use crate::config::GeneratorConfig;
use crate::ir::types::{TsImport, TsType};
use crate::module::Module;
use crate::spec::Schema;
use crate::typemap::TypeMapper;

pub use endpoints::endpoints_module;
pub use models::{ModelsFile, models_module};
pub use operations::service_methods;
pub use presentation::presentation_module;
pub use service::service_interface_module;
pub use service_impl::service_impl_module;

/// First line of every generated file.
pub const GENERATED_BANNER: &str = "This file is generated by modgen. Do not edit it by hand.";

/// Name of the endpoints registry constant.
pub const ENDPOINTS_CONST: &str = "ENDPOINTS";

/// Everything the emitters of one module read.
#[derive(Debug, Clone, Copy)]
pub struct ModuleContext<'a> {
    /// Module being emitted
    pub module: &'a Module,
    /// Run configuration
    pub config: &'a GeneratorConfig,
    /// Schema lowering scoped to the module's enum registry
    pub mapper: TypeMapper<'a>,
}

impl<'a> ModuleContext<'a> {
    /// Context for `module`, resolving refs against `schemas`.
    pub fn new(
        module: &'a Module,
        schemas: &'a BTreeMap<String, Schema>,
        config: &'a GeneratorConfig,
    ) -> Self {
        Self {
            module,
            config,
            mapper: TypeMapper::new(&module.enum_types, schemas, config),
        }
    }

    /// `I{Module}Service`
    pub fn interface_name(&self) -> String {
        format!("I{}Service", self.module.name)
    }

    /// `{Module}Service`
    pub fn factory_name(&self) -> String {
        format!("{}Service", self.module.name)
    }

    /// `{Module}Presentation`
    pub fn presentation_name(&self) -> String {
        format!("{}Presentation", self.module.name)
    }

    /// `ApiResponse<T>`
    pub fn envelope(&self, payload: TsType) -> TsType {
        TsType::generic(&self.config.response_type, payload)
    }

    /// `PaginatedResponse<T>`
    pub fn paginated(&self, item: TsType) -> TsType {
        TsType::generic(&self.config.paginated_type, item)
    }

    /// Type-only import of the HTTP-layer helper types among `refs`.
    pub fn http_type_import(&self, refs: &BTreeSet<String>) -> Option<TsImport> {
        let items: Vec<String> = [
            &self.config.response_type,
            &self.config.paginated_type,
            &self.config.pagination_params_type,
        ]
        .into_iter()
        .filter(|name| refs.contains(*name))
        .cloned()
        .collect();
        type_import(items, &self.config.http_module)
    }
}

/// Type-only import of the model types among `refs`.
pub(crate) fn model_import(
    models: &ModelsFile,
    refs: &BTreeSet<String>,
    from: &str,
) -> Option<TsImport> {
    let items: Vec<String> = models.exports.intersection(refs).cloned().collect();
    type_import(items, from)
}

fn type_import(items: Vec<String>, from: &str) -> Option<TsImport> {
    (!items.is_empty()).then(|| TsImport {
        items,
        from: from.to_string(),
        type_only: true,
    })
}

/// Named types referenced by a set of types.
pub(crate) fn referenced_names<'t>(types: impl IntoIterator<Item = &'t TsType>) -> BTreeSet<String> {
    let mut refs = Vec::new();
    for ty in types {
        ty.collect_refs(&mut refs);
    }
    refs.into_iter().collect()
}
