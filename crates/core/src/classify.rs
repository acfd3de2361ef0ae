//! Partition paths, operations and schemas into modules.
//!
//! Steps, all iterating in name order:
//! 1. every path is mapped to a module name
//! 2. operations with an `operationId` are recorded in their path's module
//! 3. schemas referenced by any operation of a module (with or without an
//!    `operationId`) are copied into it, with everything they reference
//! 4. every schema still unowned is placed by `match_schema`
//!
//! Modules are then frozen: enum registries are folded and primary schemas
//! elected.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::config::GeneratorConfig;
use crate::enums::{EnumRegistry, collect_enum_references};
use crate::module::{Module, ModuleOperation, elect_primary};
use crate::naming::{COMMON_MODULE, envelope_base_name, has_envelope_suffix, module_name_for_path, pascal_case};
use crate::spec::{AdditionalProperties, OpenApiSpec, Operation, Parameter, Schema};

/// Where a residual schema goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// An existing module, matched by name
    Existing(String),
    /// A new module named after the schema's base name
    New(String),
    /// The shared `Common` module
    Common,
}

impl Placement {
    /// Name of the receiving module.
    pub fn module_name(&self) -> &str {
        match self {
            Placement::Existing(name) | Placement::New(name) => name,
            Placement::Common => COMMON_MODULE,
        }
    }
}

/// Place a schema that no operation references.
///
/// `base` is the schema name without `Request` / `Response` suffixes.
/// Precedence, comparisons ignoring case:
/// 1. exact: a module named `base`
/// 2. substring: the module name occurs in the schema name, or `base` occurs
///    in the module name; the longest such module name wins
/// 3. a `Request` / `Response` suffix synthesizes module `pascal(base)`
/// 4. `Common`
pub fn match_schema(schema_name: &str, modules: &BTreeSet<String>) -> Placement {
    let base = envelope_base_name(schema_name);
    if base.is_empty() {
        return Placement::Common;
    }
    let lower_name = schema_name.to_lowercase();
    let lower_base = base.to_lowercase();

    if let Some(module) = modules.iter().find(|m| m.to_lowercase() == lower_base) {
        return Placement::Existing(module.clone());
    }

    let substring = modules
        .iter()
        .filter(|m| {
            let lower = m.to_lowercase();
            lower_name.contains(&lower) || lower.contains(&lower_base)
        })
        .min_by_key(|m| std::cmp::Reverse(m.len()));
    if let Some(module) = substring {
        return Placement::Existing(module.clone());
    }

    if has_envelope_suffix(schema_name) {
        let name = pascal_case(base);
        if !name.is_empty() {
            return Placement::New(name);
        }
    }
    Placement::Common
}

#[derive(Debug, Default)]
struct ModuleBuilder {
    paths: BTreeSet<String>,
    schemas: BTreeMap<String, Schema>,
    operations: BTreeMap<String, ModuleOperation>,
}

impl ModuleBuilder {
    fn freeze(self, name: String, spec: &OpenApiSpec, global: &EnumRegistry) -> Module {
        let operation_schemas = self.paths.iter().flat_map(|path| {
            spec.paths[path].operations().flat_map(|(_, op)| {
                op.content_schemas()
                    .chain(op.parameters.iter().filter_map(|p| p.schema.as_ref()))
            })
        });
        let enum_types: EnumRegistry = self
            .schemas
            .values()
            .chain(operation_schemas)
            .flat_map(|schema| collect_enum_references(schema, global))
            .collect();
        let primary = elect_primary(&name, &self.schemas);

        debug!(
            module = %name,
            paths = self.paths.len(),
            operations = self.operations.len(),
            schemas = self.schemas.len(),
            enums = enum_types.len(),
            primary = primary.as_ref().map(|p| p.raw_name.as_str()),
            "Froze module."
        );

        Module {
            name,
            paths: self.paths,
            schemas: self.schemas,
            operations: self.operations,
            enum_types,
            primary,
        }
    }
}

/// Classify a specification into modules keyed by name.
pub fn classify(
    spec: &OpenApiSpec,
    global: &EnumRegistry,
    config: &GeneratorConfig,
) -> BTreeMap<String, Module> {
    let mut builders: BTreeMap<String, ModuleBuilder> = BTreeMap::new();

    for (path, item) in &spec.paths {
        let module_name = module_name_for_path(path, &config.api_prefix);
        let builder = builders.entry(module_name).or_default();
        builder.paths.insert(path.clone());

        for (method, op) in item.operations() {
            let Some(operation_id) = op.operation_id.as_deref().filter(|id| !id.is_empty()) else {
                debug!(%path, %method, "Skipping operation without operationId.");
                continue;
            };
            if builder.operations.contains_key(operation_id) {
                debug!(%path, %method, operation_id, "Skipping duplicate operationId.");
                continue;
            }
            builder.operations.insert(
                operation_id.to_string(),
                ModuleOperation {
                    method,
                    path: path.clone(),
                    operation: merge_path_parameters(op, &item.parameters),
                },
            );
        }
    }

    let schemas = spec.schemas();
    let mut owned: BTreeSet<String> = BTreeSet::new();

    for builder in builders.values_mut() {
        for path in &builder.paths {
            for (_, op) in spec.paths[path].operations() {
                for content in op.content_schemas() {
                    for target in schema_refs(content) {
                        adopt(&mut builder.schemas, &target, schemas, global, &mut owned);
                    }
                }
            }
        }
    }

    let mut module_names: BTreeSet<String> = builders.keys().cloned().collect();
    for (name, schema) in schemas {
        if owned.contains(name) {
            continue;
        }
        let placement = match_schema(name, &module_names);
        debug!(schema = %name, ?placement, "Placed residual schema.");
        let module_name = placement.module_name().to_string();
        module_names.insert(module_name.clone());

        let builder = builders.entry(module_name).or_default();
        builder.schemas.insert(name.clone(), schema.clone());
        owned.insert(name.clone());
        for target in schema_refs(schema) {
            adopt(&mut builder.schemas, &target, schemas, global, &mut owned);
        }
    }

    builders
        .into_iter()
        .map(|(name, builder)| {
            let module = builder.freeze(name.clone(), spec, global);
            (name, module)
        })
        .collect()
}

/// Copy `root` and every schema it transitively references into `target`.
///
/// Registered enums are skipped: references to them are inlined as literal
/// unions through the module's enum registry.
fn adopt(
    target: &mut BTreeMap<String, Schema>,
    root: &str,
    schemas: &BTreeMap<String, Schema>,
    global: &EnumRegistry,
    owned: &mut BTreeSet<String>,
) {
    let mut pending = vec![root.to_string()];
    while let Some(name) = pending.pop() {
        if global.contains(&name) || target.contains_key(&name) {
            continue;
        }
        let Some(schema) = schemas.get(&name) else {
            continue;
        };
        pending.extend(schema_refs(schema));
        target.insert(name.clone(), schema.clone());
        owned.insert(name);
    }
}

/// Names of every schema referenced inside `schema`, without following refs.
fn schema_refs(schema: &Schema) -> Vec<String> {
    let mut refs = Vec::new();
    let mut stack = vec![schema];
    while let Some(node) = stack.pop() {
        if let Some(name) = node.ref_name() {
            refs.push(name.to_string());
            continue;
        }
        stack.extend(node.properties.iter().flatten().map(|(_, prop)| prop));
        stack.extend(node.items.as_deref());
        if let Some(AdditionalProperties::Schema(value)) = &node.additional_properties {
            stack.push(value);
        }
    }
    refs
}

/// Operation with path-level parameters prepended; an operation-level
/// parameter overrides a path-level one with the same name and location.
fn merge_path_parameters(op: &Operation, shared: &[Parameter]) -> Operation {
    let mut merged: Vec<Parameter> = shared
        .iter()
        .filter(|p| {
            !op.parameters
                .iter()
                .any(|own| own.name == p.name && own.location == p.location)
        })
        .cloned()
        .collect();
    merged.extend(op.parameters.iter().cloned());
    Operation {
        parameters: merged,
        ..op.clone()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn modules(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| (*n).to_string()).collect()
    }

    #[test]
    fn test_match_exact_before_substring() {
        let known = modules(&["Widget", "WidgetsAdmin"]);
        assert_eq!(
            match_schema("WidgetRequest", &known),
            Placement::Existing("Widget".into())
        );
    }

    #[test]
    fn test_plural_module_is_a_substring_match() {
        let known = modules(&["Widgets", "WidgetsAdmin"]);
        assert_eq!(
            match_schema("WidgetRequest", &known),
            Placement::Existing("WidgetsAdmin".into())
        );
        assert_eq!(
            match_schema("WidgetRequest", &modules(&["Widgets"])),
            Placement::Existing("Widgets".into())
        );
    }

    #[test]
    fn test_match_substring_prefers_longest() {
        let known = modules(&["Users", "UsersGroups"]);
        assert_eq!(
            match_schema("UsersGroupsMembership", &known),
            Placement::Existing("UsersGroups".into())
        );
        assert_eq!(
            match_schema("Order", &modules(&["Orders", "OrderItems"])),
            Placement::Existing("OrderItems".into())
        );
    }

    #[test]
    fn test_match_synthesizes_module_for_envelopes() {
        let known = modules(&["Widgets"]);
        assert_eq!(
            match_schema("InvoiceResponse", &known),
            Placement::New("Invoice".into())
        );
        assert_eq!(match_schema("Response", &known), Placement::Common);
        assert_eq!(match_schema("Token", &known), Placement::Common);
        assert_eq!(Placement::Common.module_name(), "Common");
    }

    #[test]
    fn test_classify_assigns_and_freezes() {
        let spec = OpenApiSpec::from_yaml(
            r##"
paths:
  /api/widgets/:
    parameters:
      - { name: org, in: query, schema: { type: string } }
    get:
      operationId: widgets_list
      responses:
        "200":
          content:
            application/json:
              schema:
                type: array
                items: { $ref: "#/components/schemas/Widget" }
    post:
      responses: {}
  /api/reports/{id}/export:
    get:
      operationId: reports_export
      responses: {}
components:
  schemas:
    Widget:
      type: object
      properties:
        status: { $ref: "#/components/schemas/StatusEnum" }
        part: { $ref: "#/components/schemas/Part" }
    Part:
      type: object
      properties:
        kind: { type: string, enum: [a, b] }
    StatusEnum: { type: string, enum: [open, closed] }
    InvoiceResponse: { type: object }
"##,
        )
        .unwrap();
        let global = EnumRegistry::collect(spec.schemas());
        let modules = classify(&spec, &global, &GeneratorConfig::default());

        let names: Vec<_> = modules.keys().cloned().collect();
        assert_eq!(names, ["Common", "Invoice", "Reports", "Widgets"]);

        let widgets = &modules["Widgets"];
        let owned: Vec<_> = widgets.schemas.keys().cloned().collect();
        assert_eq!(owned, ["Part", "Widget"]);
        assert_eq!(widgets.primary.as_ref().unwrap().raw_name, "Part");
        assert!(widgets.enum_types.contains("StatusEnum"));
        assert!(widgets.enum_types.contains("kindEnum"));
        assert_eq!(widgets.operations["widgets_list"].operation.parameters.len(), 1);

        let reports = &modules["Reports"];
        assert!(reports.schemas.is_empty());
        assert!(reports.primary.is_none());
        assert!(modules["Common"].schemas.contains_key("StatusEnum"));
        assert!(modules["Invoice"].schemas.contains_key("InvoiceResponse"));
    }

    #[test]
    fn test_operation_parameter_overrides_path_parameter() {
        let shared: Vec<Parameter> = serde_json::from_str(
            r#"[{"name":"id","in":"path","required":true},{"name":"q","in":"query"}]"#,
        )
        .unwrap();
        let op: Operation = serde_json::from_str(
            r#"{"parameters":[{"name":"id","in":"path","required":true,"schema":{"type":"integer"}}]}"#,
        )
        .unwrap();
        let merged = merge_path_parameters(&op, &shared);
        let names: Vec<_> = merged.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["q", "id"]);
        assert!(merged.parameters[1].schema.is_some());
    }
}
