//! API-level IR for normalized service methods.
//!
//! One `ServiceMethodIR` is computed per emitted method of a module, explicit
//! or synthesized. The service contract, its implementation, the hooks and
//! the endpoint registry are all rendered from the same list, so they cannot
//! disagree on names, parameters or paths.

use super::types::{TsParam, TsType};

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
}

impl HttpMethod {
    /// Upper-case method name.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Member name on the request dispatcher (`httpClient.get`, ...).
    pub fn verb(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Patch => "patch",
            HttpMethod::Delete => "delete",
        }
    }

    /// Whether the method reads (GET) rather than mutates.
    pub fn is_query(&self) -> bool {
        matches!(self, HttpMethod::Get)
    }

    /// Whether the dispatcher call takes a payload argument.
    pub fn sends_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The five canonical CRUD members every service exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CrudKind {
    /// `getAll`: paginated collection
    GetAll,
    /// `get`: one entity by id
    Get,
    /// `create`
    Create,
    /// `update`
    Update,
    /// `remove`
    Remove,
}

impl CrudKind {
    /// Every member, in emission order.
    pub const ALL: [CrudKind; 5] = [
        CrudKind::GetAll,
        CrudKind::Get,
        CrudKind::Create,
        CrudKind::Update,
        CrudKind::Remove,
    ];

    /// Service member name.
    pub fn method_name(&self) -> &'static str {
        match self {
            CrudKind::GetAll => "getAll",
            CrudKind::Get => "get",
            CrudKind::Create => "create",
            CrudKind::Update => "update",
            CrudKind::Remove => "remove",
        }
    }

    /// Registry key used when the member is synthesized.
    pub fn endpoint_key(&self) -> &'static str {
        match self {
            CrudKind::GetAll => "GET_ALL",
            CrudKind::Get => "GET_BY_ID",
            CrudKind::Create => "POST_CREATE",
            CrudKind::Update => "PUT_UPDATE",
            CrudKind::Remove => "DELETE_REMOVE",
        }
    }

    /// HTTP method of the synthesized member.
    pub fn http_method(&self) -> HttpMethod {
        match self {
            CrudKind::GetAll | CrudKind::Get => HttpMethod::Get,
            CrudKind::Create => HttpMethod::Post,
            CrudKind::Update => HttpMethod::Put,
            CrudKind::Remove => HttpMethod::Delete,
        }
    }

    /// Classify an operationId that follows the `{module}_{suffix}`
    /// convention.
    ///
    /// Comparison ignores case, `_` and `-`, and the operationId must be
    /// exactly the module name plus the suffix: `auth_login_create` does not
    /// claim `create` in module `Auth`. The second element ranks competing
    /// conventions for the same member; lower wins (`_update` is preferred
    /// over `_partial_update`).
    pub fn from_operation_id(module_name: &str, operation_id: &str) -> Option<(CrudKind, u8)> {
        const CONVENTIONS: [(&str, CrudKind, u8); 9] = [
            ("partialupdate", CrudKind::Update, 1),
            ("update", CrudKind::Update, 0),
            ("list", CrudKind::GetAll, 0),
            ("all", CrudKind::GetAll, 1),
            ("read", CrudKind::Get, 0),
            ("retrieve", CrudKind::Get, 1),
            ("create", CrudKind::Create, 0),
            ("destroy", CrudKind::Remove, 0),
            ("delete", CrudKind::Remove, 1),
        ];
        let squash = |s: &str| -> String {
            s.chars()
                .filter(|c| *c != '_' && *c != '-')
                .map(|c| c.to_ascii_lowercase())
                .collect()
        };
        let module = squash(module_name);
        let rest = squash(operation_id).strip_prefix(module.as_str())?.to_string();
        CONVENTIONS
            .iter()
            .find(|(suffix, _, _)| rest == *suffix)
            .map(|(_, kind, rank)| (*kind, *rank))
    }
}

/// Positional path argument of a service method.
#[derive(Debug, Clone, PartialEq)]
pub struct PathParamIR {
    /// TypeScript-safe identifier
    pub name: String,
    /// Placeholder name in the path template
    pub original_name: String,
    /// Argument type
    pub ty: TsType,
}

/// Request payload of a service method.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyIR {
    /// Payload type
    pub ty: TsType,
    /// Path placeholder carried as `id` inside the payload object
    /// (update-style methods take a single `UpdateParams` argument).
    pub folded_id: Option<String>,
}

/// Path builder registered in the endpoints file.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointIR {
    /// UPPER_SNAKE key inside the module's entry
    pub key: String,
    /// Path template with `{param}` placeholders
    pub path: String,
}

impl EndpointIR {
    /// Placeholder names in template order, without duplicates.
    pub fn placeholders(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        let mut rest = self.path.as_str();
        while let Some(start) = rest.find('{') {
            let Some(len) = rest[start..].find('}') else {
                break;
            };
            let name = &rest[start + 1..start + len];
            if !name.is_empty() && !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
            rest = &rest[start + len + 1..];
        }
        names
    }
}

/// Normalized service method
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceMethodIR {
    /// camelCase member name (e.g., "getAll", "exportCsv")
    pub name: String,
    /// HTTP method
    pub method: HttpMethod,
    /// Set for the five canonical members, explicit or synthesized
    pub crud: Option<CrudKind>,
    /// Source operationId; `None` for synthesized members
    pub operation_id: Option<String>,
    /// Registry entry the implementation calls
    pub endpoint: EndpointIR,
    /// Positional path arguments
    pub path_params: Vec<PathParamIR>,
    /// Request payload, if the method sends one
    pub body: Option<BodyIR>,
    /// Type of the optional `params` options object
    pub query: Option<TsType>,
    /// Payload type inside `Promise<...>`
    pub response: TsType,
    /// Operation summary, rendered as a doc comment
    pub doc: Option<String>,
}

impl ServiceMethodIR {
    /// Name of a plain payload argument.
    pub const BODY_PARAM: &'static str = "body";
    /// Name of a payload argument that carries the folded id.
    pub const FOLDED_PARAM: &'static str = "data";
    /// Name of the options argument.
    pub const QUERY_PARAM: &'static str = "params";

    /// Arguments of the contract signature: path, payload, options.
    pub fn params(&self) -> Vec<TsParam> {
        let mut params: Vec<TsParam> = self
            .path_params
            .iter()
            .map(|p| TsParam::new(&p.name, p.ty.clone()))
            .collect();
        if let Some(body) = &self.body {
            let name = if body.folded_id.is_some() {
                Self::FOLDED_PARAM
            } else {
                Self::BODY_PARAM
            };
            params.push(TsParam::new(name, body.ty.clone()));
        }
        if let Some(query) = &self.query {
            params.push(TsParam::optional(Self::QUERY_PARAM, query.clone()));
        }
        params
    }

    /// `Promise<response>`
    pub fn return_type(&self) -> TsType {
        TsType::generic("Promise", self.response.clone())
    }

    /// Whether hooks wrap the method in `useMutation`.
    pub fn is_mutation(&self) -> bool {
        !self.method.is_query()
    }

    /// Hook name exposed by the presentation layer (`useGetAll`, ...).
    pub fn hook_name(&self) -> String {
        let mut chars = self.name.trim_start_matches('_').chars();
        match chars.next() {
            Some(first) => format!("use{}{}", first.to_ascii_uppercase(), chars.as_str()),
            None => "use".to_string(),
        }
    }
}
