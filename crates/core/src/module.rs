//! Classified modules.
//!
//! A `Module` is frozen at the end of classification and read-only for every
//! emitter. Its enum registry and primary schema are computed exactly once,
//! at freeze time.

use std::collections::{BTreeMap, BTreeSet};

use crate::enums::EnumRegistry;
use crate::ir::api::HttpMethod;
use crate::ir::types::TsType;
use crate::naming::{is_auxiliary_schema, is_paginated, module_dir, simplify_schema_name};
use crate::spec::{Operation, Schema};

/// An operation placed in a module, with path-level parameters merged in.
#[derive(Debug, Clone)]
pub struct ModuleOperation {
    /// HTTP method
    pub method: HttpMethod,
    /// Path template the operation lives under
    pub path: String,
    /// The operation, parameters merged
    pub operation: Operation,
}

/// The schema representing a module's main entity.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimarySchema {
    /// Name in `components.schemas`
    pub raw_name: String,
    /// Simplified name used for the entity interface and derived params
    pub name: String,
    /// The schema itself
    pub schema: Schema,
}

impl PrimarySchema {
    /// `{Name}Params`
    pub fn params_name(&self) -> String {
        format!("{}Params", self.name)
    }

    /// `{Name}CreateParams`
    pub fn create_params_name(&self) -> String {
        format!("{}CreateParams", self.name)
    }

    /// `{Name}UpdateParams`
    pub fn update_params_name(&self) -> String {
        format!("{}UpdateParams", self.name)
    }
}

/// Unit of output.
#[derive(Debug, Clone)]
pub struct Module {
    /// PascalCase module name
    pub name: String,
    /// Specification paths whose inferred module is this one
    pub paths: BTreeSet<String>,
    /// Schemas owned by the module, including everything they reference
    pub schemas: BTreeMap<String, Schema>,
    /// operationId -> operation
    pub operations: BTreeMap<String, ModuleOperation>,
    /// Enum registry visible to this module's type mapping
    pub enum_types: EnumRegistry,
    /// Elected main entity, `None` for modules without schemas
    pub primary: Option<PrimarySchema>,
}

impl Module {
    /// Output directory (`{m}`).
    pub fn dir(&self) -> String {
        module_dir(&self.name)
    }

    /// Canonical entity type: the primary schema, or `any` without one.
    ///
    /// A `Paginated*` primary is never emitted as an interface, so it maps to
    /// `any` as well.
    pub fn entity_type(&self) -> TsType {
        self.primary
            .as_ref()
            .filter(|p| !is_paginated(&p.raw_name))
            .map_or_else(TsType::any, |p| TsType::named(&p.name))
    }

    /// Collection path used by synthesized CRUD members.
    ///
    /// The leading `api_prefix` segment and the module segment of the first
    /// known path; `/{api_prefix}/{m}/` for modules without paths.
    pub fn base_path(&self, api_prefix: &str) -> String {
        let Some(first) = self.paths.iter().next() else {
            return if api_prefix.is_empty() {
                format!("/{}/", self.dir())
            } else {
                format!("/{api_prefix}/{}/", self.dir())
            };
        };
        let mut base = String::from("/");
        for (index, segment) in first.split('/').filter(|s| !s.is_empty()).enumerate() {
            if segment.starts_with('{') {
                break;
            }
            base.push_str(segment);
            base.push('/');
            if index > 0 || api_prefix.is_empty() || segment != api_prefix {
                break;
            }
        }
        base
    }
}

/// Elect the primary schema of a module.
///
/// Candidates exclude `Paginated*`, `*Serializer*` and `*For{Qualifier}`
/// names as well as bare enum schemas. Precedence:
/// 1. a candidate whose simplified name equals the module name
/// 2. the first candidate in name order
/// 3. the first schema of any kind
pub fn elect_primary(module_name: &str, schemas: &BTreeMap<String, Schema>) -> Option<PrimarySchema> {
    let candidates = || {
        schemas
            .iter()
            .filter(|(name, schema)| !is_auxiliary_schema(name) && schema.enum_values.is_none())
    };

    candidates()
        .find(|(name, _)| simplify_schema_name(name) == module_name)
        .or_else(|| candidates().next())
        .or_else(|| schemas.iter().next())
        .map(|(raw_name, schema)| PrimarySchema {
            raw_name: raw_name.clone(),
            name: simplify_schema_name(raw_name),
            schema: schema.clone(),
        })
}
