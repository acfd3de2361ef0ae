//! OpenAPI specification structs for serde deserialization.
//!
//! This is the minimal subset of OpenAPI 2/3 the generator reads: paths with
//! their GET/POST/PUT/PATCH/DELETE operations and `components.schemas`.
//! Composition keywords (`oneOf`, `allOf`, `anyOf`) and discriminators are
//! deliberately not modeled; schemas using them map to `any`.
//!
//! Ordered maps are used throughout so that every later stage iterates
//! paths and schemas by name, independent of declaration order.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::ir::api::HttpMethod;

/// Prefix of local schema references.
pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Root OpenAPI specification.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenApiSpec {
    /// Path templates and their operations
    #[serde(default)]
    pub paths: BTreeMap<String, PathItem>,
    /// Reusable components
    #[serde(default)]
    pub components: Components,
}

/// Components section containing reusable schemas.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Components {
    /// Named schemas, the targets of `#/components/schemas/` refs
    #[serde(default)]
    pub schemas: BTreeMap<String, Schema>,
}

/// A path item containing operations for different HTTP methods.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathItem {
    /// GET operation
    pub get: Option<Operation>,
    /// POST operation
    pub post: Option<Operation>,
    /// PUT operation
    pub put: Option<Operation>,
    /// PATCH operation
    pub patch: Option<Operation>,
    /// DELETE operation
    pub delete: Option<Operation>,
    /// Path-level parameters shared by all operations.
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

impl PathItem {
    /// Operations present under this path, in a fixed method order.
    pub fn operations(&self) -> impl Iterator<Item = (HttpMethod, &Operation)> {
        [
            (HttpMethod::Get, self.get.as_ref()),
            (HttpMethod::Post, self.post.as_ref()),
            (HttpMethod::Put, self.put.as_ref()),
            (HttpMethod::Patch, self.patch.as_ref()),
            (HttpMethod::Delete, self.delete.as_ref()),
        ]
        .into_iter()
        .filter_map(|(method, op)| op.map(|op| (method, op)))
    }
}

/// An API operation (endpoint).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Identifier that names the service method
    pub operation_id: Option<String>,
    /// One-line description
    pub summary: Option<String>,
    /// Operation-level parameters
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// OpenAPI 3 request body
    pub request_body: Option<RequestBody>,
    /// Responses keyed by status code or `default`
    #[serde(default)]
    pub responses: BTreeMap<String, Response>,
}

impl Operation {
    /// Body schema, preferring `application/json` over any other media type.
    pub fn body_schema(&self) -> Option<&Schema> {
        self.request_body
            .as_ref()
            .and_then(|body| preferred_schema(&body.content))
    }

    /// Schema of the first 2xx (or `default`) response that has one.
    pub fn success_schema(&self) -> Option<&Schema> {
        self.responses
            .iter()
            .filter(|(status, _)| status.starts_with('2'))
            .chain(self.responses.iter().filter(|(status, _)| *status == "default"))
            .find_map(|(_, response)| preferred_schema(&response.content))
    }

    /// Every schema attached to the request body or to any response.
    pub fn content_schemas(&self) -> impl Iterator<Item = &Schema> {
        let body = self
            .request_body
            .iter()
            .flat_map(|body| body.content.values());
        let responses = self
            .responses
            .values()
            .flat_map(|response| response.content.values());
        body.chain(responses).filter_map(|media| media.schema.as_ref())
    }
}

fn preferred_schema(content: &BTreeMap<String, MediaType>) -> Option<&Schema> {
    content
        .get("application/json")
        .and_then(|media| media.schema.as_ref())
        .or_else(|| content.values().find_map(|media| media.schema.as_ref()))
}

/// Parameter location. Header and cookie parameters are not emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    /// `in: path`
    Path,
    /// `in: query`, also assumed when `in` is missing
    #[default]
    Query,
    /// `in: header`
    Header,
    /// `in: cookie`
    Cookie,
    /// Any other location, such as Swagger 2 `body` or `formData`
    #[serde(other)]
    Other,
}

/// A path or query parameter.
///
/// `name` defaults to empty so that `$ref` parameters still deserialize;
/// nameless parameters are skipped by the normalizer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Parameter {
    /// Parameter name
    #[serde(default)]
    pub name: String,
    /// Where the parameter is sent
    #[serde(rename = "in", default)]
    pub location: ParameterLocation,
    /// Path parameters are always required
    #[serde(default)]
    pub required: bool,
    /// OpenAPI 3 schema
    pub schema: Option<Schema>,
    /// Swagger 2 parameters carry their type inline.
    #[serde(rename = "type")]
    pub inline_type: Option<String>,
}

/// A request body definition.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestBody {
    /// Schemas keyed by media type
    #[serde(default)]
    pub content: BTreeMap<String, MediaType>,
}

/// A response definition.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Response {
    /// Schemas keyed by media type
    #[serde(default)]
    pub content: BTreeMap<String, MediaType>,
}

/// Media type content (e.g., application/json).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaType {
    /// Payload schema
    pub schema: Option<Schema>,
}

/// JSON Schema node as used in OpenAPI documents.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// `type`, possibly a list for nullable types
    #[serde(rename = "type")]
    pub schema_type: Option<SchemaType>,

    /// `$ref` target
    #[serde(rename = "$ref")]
    pub ref_path: Option<String>,

    /// Properties in declaration order.
    pub properties: Option<IndexMap<String, Schema>>,

    /// Names of required properties
    #[serde(default)]
    pub required: Vec<String>,

    /// Array element schema
    pub items: Option<Box<Schema>>,

    /// Allowed values
    #[serde(rename = "enum")]
    pub enum_values: Option<Vec<EnumValue>>,

    /// Map value schema, or whether extra keys are allowed
    pub additional_properties: Option<AdditionalProperties>,

    /// `date-time`, `uuid`, ...
    pub format: Option<String>,

    /// Server-assigned property
    #[serde(default)]
    pub read_only: bool,

    /// Rendered as a doc comment
    pub description: Option<String>,
}

/// Enum value can be string, integer, float, boolean, or null.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum EnumValue {
    /// String member
    String(String),
    /// Integer member
    Integer(i64),
    /// Float member
    Float(f64),
    /// Boolean member
    Bool(bool),
    /// `null` member
    Null,
}

/// Schema type can be a single type or an array of types (for nullable).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SchemaType {
    /// `type: string`
    Single(String),
    /// `type: [string, "null"]`
    Multiple(Vec<String>),
}

/// Additional properties can be a boolean or a schema.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    /// `additionalProperties: true` or `false`
    Bool(bool),
    /// Schema of every extra value
    Schema(Box<Schema>),
}

impl OpenApiSpec {
    /// Parse a specification from JSON text.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a specification from YAML text.
    pub fn from_yaml(yaml: &str) -> crate::Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Shorthand for `components.schemas`.
    pub fn schemas(&self) -> &BTreeMap<String, Schema> {
        &self.components.schemas
    }
}

impl Schema {
    /// The first non-null entry of `type`.
    pub fn primary_type(&self) -> Option<&str> {
        match self.schema_type.as_ref()? {
            SchemaType::Single(t) => Some(t.as_str()),
            SchemaType::Multiple(types) => types.iter().map(String::as_str).find(|t| *t != "null"),
        }
    }

    /// Target name of `$ref`: the last pointer segment.
    pub fn ref_name(&self) -> Option<&str> {
        self.ref_path.as_deref().map(ref_to_name)
    }

    /// Whether `name` is listed in `required`.
    pub fn requires(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }

    /// Enum values when this node is a string enum.
    pub fn string_enum(&self) -> Option<&[EnumValue]> {
        if self.primary_type() == Some("string") {
            self.enum_values.as_deref()
        } else {
            None
        }
    }

    /// Whether the schema describes an object with named properties.
    pub fn has_properties(&self) -> bool {
        self.properties.as_ref().is_some_and(|p| !p.is_empty())
    }
}

/// Extract the target name from a `$ref` pointer.
pub fn ref_to_name(ref_path: &str) -> &str {
    ref_path
        .strip_prefix(SCHEMA_REF_PREFIX)
        .unwrap_or_else(|| ref_path.rsplit('/').next().unwrap_or(ref_path))
}
