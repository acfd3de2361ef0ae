//! Schema to TypeScript type mapping.
//!
//! Rules, in precedence order:
//! 1. `$ref`: enum in the module registry -> literal union; paginated envelope
//!    -> `PaginatedResponse<Item>`; known schema -> simplified name; unknown
//!    target -> `any` or the simplified name, per `UnresolvedRefPolicy`
//! 2. `string`: `Date` for date formats, literal union for enums, else `string`
//! 3. `integer` / `number` -> `number`, `boolean` -> `boolean`
//! 4. `array` -> mapped items with `[]`
//! 5. objects with properties -> inline structural type
//! 6. objects with `additionalProperties` -> `Record<string, T>`
//! 7. anything else -> `any`

use std::collections::BTreeMap;

use crate::config::{GeneratorConfig, UnresolvedRefPolicy};
use crate::enums::EnumRegistry;
use crate::ir::types::{TsPrimitive, TsProp, TsType};
use crate::ir::utils::enum_value_to_literal;
use crate::naming::{is_paginated, simplify_schema_name};
use crate::spec::{AdditionalProperties, EnumValue, Parameter, Schema, ref_to_name};

/// Property holding the page items of a paginated envelope schema.
const PAGE_ITEMS_PROPERTY: &str = "results";

/// Maps schema nodes for one module.
#[derive(Debug, Clone, Copy)]
pub struct TypeMapper<'a> {
    enums: &'a EnumRegistry,
    schemas: &'a BTreeMap<String, Schema>,
    config: &'a GeneratorConfig,
}

impl<'a> TypeMapper<'a> {
    /// `enums` is the owning module's registry, `schemas` the document's
    /// component schemas (used to tell resolved from dangling references).
    pub fn new(
        enums: &'a EnumRegistry,
        schemas: &'a BTreeMap<String, Schema>,
        config: &'a GeneratorConfig,
    ) -> Self {
        Self {
            enums,
            schemas,
            config,
        }
    }

    /// Lower a schema to a TypeScript type; anything unmodeled is `any`.
    pub fn map(&self, schema: &Schema) -> TsType {
        if let Some(ref_path) = &schema.ref_path {
            return self.map_ref(ref_path);
        }

        match schema.primary_type() {
            Some("string") => {
                if matches!(schema.format.as_deref(), Some("date" | "date-time")) {
                    TsType::named("Date")
                } else if let Some(values) = &schema.enum_values {
                    literal_union(values)
                } else {
                    TsType::string()
                }
            }
            Some("integer" | "number") => TsType::Primitive(TsPrimitive::Number),
            Some("boolean") => TsType::Primitive(TsPrimitive::Boolean),
            Some("null") => TsType::Primitive(TsPrimitive::Null),
            Some("array") => {
                let inner = schema
                    .items
                    .as_deref()
                    .map_or_else(TsType::any, |items| self.map(items));
                TsType::Array(Box::new(inner))
            }
            Some("object") | None => self.map_object(schema),
            Some(_) => TsType::any(),
        }
    }

    /// Members of an object schema in declaration order, with descriptions
    /// carried as docs.
    pub fn properties(&self, schema: &Schema) -> Vec<TsProp> {
        schema
            .properties
            .iter()
            .flatten()
            .map(|(name, prop)| TsProp {
                name: name.clone(),
                ty: self.map(prop),
                optional: !schema.requires(name),
                readonly: prop.read_only,
                doc: prop.description.clone(),
            })
            .collect()
    }

    /// Type of a parameter: its schema, or the Swagger 2 inline `type`.
    pub fn map_parameter(&self, param: &Parameter) -> Option<TsType> {
        if let Some(schema) = &param.schema {
            return Some(self.map(schema));
        }
        match param.inline_type.as_deref()? {
            "string" => Some(TsType::string()),
            "integer" | "number" => Some(TsType::Primitive(TsPrimitive::Number)),
            "boolean" => Some(TsType::Primitive(TsPrimitive::Boolean)),
            _ => None,
        }
    }

    fn map_object(&self, schema: &Schema) -> TsType {
        if schema.has_properties() {
            return TsType::Object(self.properties(schema));
        }
        match &schema.additional_properties {
            Some(AdditionalProperties::Schema(value)) => {
                TsType::Record(Box::new(self.map(value)))
            }
            Some(AdditionalProperties::Bool(true)) => TsType::Record(Box::new(TsType::any())),
            _ => match &schema.enum_values {
                Some(values) if schema.schema_type.is_none() => literal_union(values),
                _ => TsType::any(),
            },
        }
    }

    fn map_ref(&self, ref_path: &str) -> TsType {
        let target = ref_to_name(ref_path);
        if let Some(values) = self.enums.get(target) {
            return literal_union(values);
        }
        match self.schemas.get(target) {
            Some(schema) if is_paginated(target) => self
                .page_items(schema)
                .map(|item| TsType::generic(&self.config.paginated_type, item))
                .unwrap_or_else(|| TsType::named(simplify_schema_name(target))),
            Some(_) => TsType::named(simplify_schema_name(target)),
            None => match self.config.unresolved_refs {
                UnresolvedRefPolicy::Any => TsType::any(),
                UnresolvedRefPolicy::Name => TsType::named(simplify_schema_name(target)),
            },
        }
    }

    fn page_items(&self, envelope: &Schema) -> Option<TsType> {
        let results = envelope.properties.as_ref()?.get(PAGE_ITEMS_PROPERTY)?;
        let items = results.items.as_deref()?;
        Some(self.map(items))
    }
}

/// Literal union of enum values; an empty enum degrades to `string`.
pub fn literal_union(values: &[EnumValue]) -> TsType {
    let mut literals: Vec<TsType> = values
        .iter()
        .map(|v| TsType::Literal(enum_value_to_literal(v)))
        .collect();
    match literals.len() {
        0 => TsType::string(),
        1 => literals.remove(0),
        _ => TsType::Union(literals),
    }
}
