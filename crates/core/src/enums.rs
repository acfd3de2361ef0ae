//! Enum registries.
//!
//! The global registry is collected once from `components.schemas` and is
//! read-only afterwards. Each module gets its own registry, folded from
//! `collect_enum_references` over everything the module owns, so the type
//! mapping of a module never consults global state.

use std::collections::BTreeMap;

use crate::spec::{AdditionalProperties, EnumValue, Schema};

/// Enum name -> ordered literal values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnumRegistry(BTreeMap<String, Vec<EnumValue>>);

impl EnumRegistry {
    /// Collect every string enum declared in `schemas`.
    ///
    /// A string-enum schema is registered under its own name; a string-enum
    /// property under `{schema}_{property}`.
    pub fn collect(schemas: &BTreeMap<String, Schema>) -> Self {
        let mut entries = BTreeMap::new();
        for (name, schema) in schemas {
            if let Some(values) = schema.string_enum() {
                entries.insert(name.clone(), values.to_vec());
            }
            for (prop, prop_schema) in schema.properties.iter().flatten() {
                if let Some(values) = prop_schema.string_enum() {
                    entries.insert(format!("{name}_{prop}"), values.to_vec());
                }
            }
        }
        Self(entries)
    }

    /// Values registered under `name`.
    pub fn get(&self, name: &str) -> Option<&[EnumValue]> {
        self.0.get(name).map(Vec::as_slice)
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[EnumValue])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of registered enums.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Entries are folded in order; the first value for a name wins.
impl FromIterator<(String, Vec<EnumValue>)> for EnumRegistry {
    fn from_iter<I: IntoIterator<Item = (String, Vec<EnumValue>)>>(iter: I) -> Self {
        let mut entries = BTreeMap::new();
        for (name, values) in iter {
            entries.entry(name).or_insert(values);
        }
        Self(entries)
    }
}

/// Enum entries a schema needs in its owning module's registry.
///
/// - a `$ref` (on the schema, a property or array items) whose target is in
///   `global` copies that entry under the target name
/// - a property carrying an inline string enum registers `{property}Enum`
///
/// Nested inline objects, array items and `additionalProperties` are walked
/// as well.
pub fn collect_enum_references(
    schema: &Schema,
    global: &EnumRegistry,
) -> Vec<(String, Vec<EnumValue>)> {
    let mut found = Vec::new();
    visit(schema, None, global, &mut found);
    found
}

fn visit(
    schema: &Schema,
    property: Option<&str>,
    global: &EnumRegistry,
    found: &mut Vec<(String, Vec<EnumValue>)>,
) {
    if let Some(target) = schema.ref_name() {
        if let Some(values) = global.get(target) {
            found.push((target.to_string(), values.to_vec()));
        }
        return;
    }
    if let Some(prop) = property
        && let Some(values) = schema.string_enum()
    {
        found.push((format!("{prop}Enum"), values.to_vec()));
    }
    for (name, prop_schema) in schema.properties.iter().flatten() {
        visit(prop_schema, Some(name), global, found);
    }
    if let Some(items) = &schema.items {
        visit(items, property, global, found);
    }
    if let Some(AdditionalProperties::Schema(value)) = &schema.additional_properties {
        visit(value, None, global, found);
    }
}
