//! `{m}/domains/models/{M}.ts`: enum aliases, entity interfaces and the
//! params interfaces derived from the primary schema.

use std::collections::BTreeSet;

use tracing::debug;

use super::{GENERATED_BANNER, ModuleContext, referenced_names};
use crate::ir::types::{TsModule, TsProp, TsType, TsTypeDef, TypeDefKind};
use crate::naming::{is_paginated, pascal_case, simplify_schema_name};
use crate::spec::Schema;
use crate::typemap::literal_union;

/// Rendered-to-be model file plus the names it exports.
#[derive(Debug, Clone)]
pub struct ModelsFile {
    /// File contents
    pub module: TsModule,
    /// Type names declared by the file
    pub exports: BTreeSet<String>,
}

/// Models file of one module.
pub fn models_module(ctx: &ModuleContext<'_>) -> ModelsFile {
    let module = ctx.module;
    let mut exports = BTreeSet::new();
    let mut types = Vec::new();

    for (name, values) in module.enum_types.iter() {
        let alias = pascal_case(name);
        if alias.is_empty() || !exports.insert(alias.clone()) {
            continue;
        }
        types.push(TsTypeDef {
            name: alias,
            doc: None,
            kind: TypeDefKind::TypeAlias {
                ty: literal_union(values),
            },
        });
    }

    for (raw_name, schema) in &module.schemas {
        if is_paginated(raw_name) {
            continue;
        }
        let name = simplify_schema_name(raw_name);
        if !exports.insert(name.clone()) {
            debug!(module = %module.name, schema = %raw_name, %name, "Skipping duplicate simplified name.");
            continue;
        }
        types.push(entity_def(ctx, name, schema));
    }

    if let Some(primary) = &module.primary {
        let properties = ctx.mapper.properties(&primary.schema);
        let writable = || {
            properties
                .iter()
                .filter(|p| p.name != "id" && !p.readonly)
                .cloned()
        };

        let create: Vec<TsProp> = writable().collect();
        let mut update = vec![TsProp::new("id", TsType::id(), false)];
        update.extend(writable().map(|p| TsProp { optional: true, ..p }));

        for (name, properties) in [
            (primary.params_name(), Vec::new()),
            (primary.create_params_name(), create),
            (primary.update_params_name(), update),
        ] {
            if exports.insert(name.clone()) {
                types.push(TsTypeDef {
                    name,
                    doc: None,
                    kind: TypeDefKind::Interface { properties },
                });
            }
        }
    }

    let refs = referenced_names(types.iter().flat_map(def_types));
    let imports = ctx.http_type_import(&refs).into_iter().collect();

    ModelsFile {
        module: TsModule {
            banner: Some(GENERATED_BANNER.to_string()),
            imports,
            types,
            statements: Vec::new(),
            functions: Vec::new(),
        },
        exports,
    }
}

fn entity_def(ctx: &ModuleContext<'_>, name: String, schema: &Schema) -> TsTypeDef {
    let kind = if schema.ref_path.is_none()
        && let Some(values) = &schema.enum_values
    {
        TypeDefKind::TypeAlias {
            ty: literal_union(values),
        }
    } else if schema.has_properties() {
        TypeDefKind::Interface {
            properties: ctx.mapper.properties(schema),
        }
    } else if schema.ref_path.is_none()
        && schema.additional_properties.is_none()
        && matches!(schema.primary_type(), None | Some("object"))
    {
        TypeDefKind::Interface {
            properties: Vec::new(),
        }
    } else {
        TypeDefKind::TypeAlias {
            ty: ctx.mapper.map(schema),
        }
    };
    TsTypeDef {
        name,
        doc: schema.description.clone(),
        kind,
    }
}

fn def_types(def: &TsTypeDef) -> Vec<&TsType> {
    match &def.kind {
        TypeDefKind::Interface { properties } => properties.iter().map(|p| &p.ty).collect(),
        TypeDefKind::TypeAlias { ty } => vec![ty],
        TypeDefKind::Contract { methods } => methods.iter().map(|m| &m.return_type).collect(),
    }
}
