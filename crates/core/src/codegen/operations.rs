//! Normalization of a module's operations into service methods.
//!
//! Explicit operations come first, in operationId order, followed by the
//! canonical CRUD members no explicit operation claimed.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use super::ModuleContext;
use crate::ir::api::{BodyIR, CrudKind, EndpointIR, HttpMethod, PathParamIR, ServiceMethodIR};
use crate::ir::types::{TsPrimitive, TsProp, TsType};
use crate::ir::utils::sanitize_ts_identifier;
use crate::module::ModuleOperation;
use crate::naming::{camel_case, upper_snake_case};
use crate::spec::ParameterLocation;

/// Name the folded placeholder takes inside an update payload.
const FOLDED_ID: &str = "id";
const RENAMED_ID: &str = "idParam";

/// Service methods of a module, explicit and synthesized.
pub fn service_methods(ctx: &ModuleContext<'_>) -> Vec<ServiceMethodIR> {
    let module = ctx.module;

    // The best-ranked operation per CRUD member claims the canonical name.
    let mut claims: BTreeMap<CrudKind, (u8, &str)> = BTreeMap::new();
    for operation_id in module.operations.keys() {
        if let Some((kind, rank)) = CrudKind::from_operation_id(&module.name, operation_id) {
            let better = claims.get(&kind).is_none_or(|(held, _)| rank < *held);
            if better {
                claims.insert(kind, (rank, operation_id.as_str()));
            }
        }
    }
    let canonical: BTreeMap<&str, CrudKind> =
        claims.iter().map(|(kind, (_, id))| (*id, *kind)).collect();

    let mut names = Allocator::new(CrudKind::ALL.iter().map(|k| k.method_name().to_string()), "");
    let mut keys = Allocator::new(CrudKind::ALL.iter().map(|k| k.endpoint_key().to_string()), "_");

    let mut methods = Vec::new();
    for (operation_id, op) in &module.operations {
        let crud = canonical.get(operation_id.as_str()).copied();
        let name = match crud {
            Some(kind) => kind.method_name().to_string(),
            None => names.claim(derive_method_name(&module.name, operation_id)),
        };
        let key = keys.claim(upper_snake_case(operation_id));
        methods.push(explicit_method(ctx, operation_id, op, name, key, crud));
    }

    let base = module.base_path(&ctx.config.api_prefix);
    for kind in CrudKind::ALL {
        if !claims.contains_key(&kind) {
            methods.push(synthesized_method(ctx, kind, &base));
        }
    }

    debug!(
        module = %module.name,
        explicit = module.operations.len(),
        synthesized = CrudKind::ALL.len() - claims.len(),
        "Normalized service methods."
    );
    methods
}

/// Hands out unique names, suffixing repeats with 2, 3, ...
#[derive(Debug)]
struct Allocator {
    used: BTreeSet<String>,
    separator: &'static str,
}

impl Allocator {
    fn new(reserved: impl Iterator<Item = String>, separator: &'static str) -> Self {
        Self {
            used: reserved.collect(),
            separator,
        }
    }

    fn claim(&mut self, base: String) -> String {
        if self.used.insert(base.clone()) {
            return base;
        }
        let mut n = 2;
        loop {
            let candidate = format!("{base}{}{n}", self.separator);
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}

/// Strip the module-name prefix (ignoring case) and camelCase the rest.
fn derive_method_name(module_name: &str, operation_id: &str) -> String {
    let rest = operation_id
        .get(..module_name.len())
        .filter(|prefix| prefix.eq_ignore_ascii_case(module_name))
        .map_or(operation_id, |_| &operation_id[module_name.len()..]);
    let mut name = camel_case(rest);
    if name.is_empty() {
        name = camel_case(operation_id);
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    name
}

/// GET on a path ending in `/` whose last segment is not a placeholder.
fn is_collection_path(path: &str) -> bool {
    path.ends_with('/')
        && path
            .split('/')
            .rfind(|segment| !segment.is_empty())
            .is_none_or(|segment| !segment.starts_with('{'))
}

fn explicit_method(
    ctx: &ModuleContext<'_>,
    operation_id: &str,
    module_op: &ModuleOperation,
    name: String,
    key: String,
    crud: Option<CrudKind>,
) -> ServiceMethodIR {
    let op = &module_op.operation;
    let method = module_op.method;
    let mapper = &ctx.mapper;
    let endpoint = EndpointIR {
        key,
        path: module_op.path.clone(),
    };
    let is_list = method == HttpMethod::Get
        && (crud == Some(CrudKind::GetAll) || is_collection_path(&module_op.path));

    // Path arguments: declared parameters, then undeclared placeholders.
    let mut path_params: Vec<PathParamIR> = op
        .parameters
        .iter()
        .filter(|p| p.location == ParameterLocation::Path && !p.name.is_empty())
        .map(|p| PathParamIR {
            name: sanitize_ts_identifier(&p.name),
            original_name: p.name.clone(),
            ty: mapper.map_parameter(p).unwrap_or_else(TsType::id),
        })
        .collect();
    for placeholder in endpoint.placeholders() {
        if !path_params.iter().any(|p| p.original_name == placeholder) {
            path_params.push(PathParamIR {
                name: sanitize_ts_identifier(&placeholder),
                original_name: placeholder,
                ty: TsType::id(),
            });
        }
    }

    let query_params: Vec<_> = op
        .parameters
        .iter()
        .filter(|p| p.location == ParameterLocation::Query && !p.name.is_empty())
        .collect();
    let paginated = is_list || query_params.iter().any(|p| ctx.config.is_pagination_param(&p.name));
    let fields: Vec<TsProp> = query_params
        .iter()
        .filter(|p| !ctx.config.is_pagination_param(&p.name))
        .map(|p| TsProp::new(&p.name, mapper.map_parameter(p).unwrap_or_else(TsType::any), true))
        .collect();
    let query = query_type(ctx, paginated, fields);

    let primary = ctx.module.primary.as_ref();
    let body = op.body_schema().filter(|_| method.sends_body()).map(|schema| {
        let is_entity_ref = schema
            .ref_name()
            .is_some_and(|target| !ctx.module.enum_types.contains(target));
        match (method, primary) {
            (HttpMethod::Post, Some(p)) if is_entity_ref => BodyIR {
                ty: TsType::named(p.create_params_name()),
                folded_id: None,
            },
            (HttpMethod::Put | HttpMethod::Patch, Some(p)) if is_entity_ref => BodyIR {
                ty: TsType::named(p.update_params_name()),
                folded_id: fold_last_placeholder(&endpoint, &mut path_params),
            },
            _ => BodyIR {
                ty: mapper.map(schema),
                folded_id: None,
            },
        }
    });

    let success = op
        .success_schema()
        .map(|schema| mapper.map(schema))
        .filter(|ty| *ty != TsType::any());
    let response = if is_list {
        ctx.envelope(ctx.paginated(ctx.module.entity_type()))
    } else if method.is_query() {
        ctx.envelope(success.unwrap_or_else(|| ctx.module.entity_type()))
    } else {
        ctx.envelope(success.unwrap_or(TsType::Primitive(TsPrimitive::Null)))
    };

    ServiceMethodIR {
        name,
        method,
        crud,
        operation_id: Some(operation_id.to_string()),
        endpoint,
        path_params,
        body,
        query,
        response,
        doc: op.summary.clone().filter(|s| !s.trim().is_empty()),
    }
}

/// Move the last template placeholder out of the positional arguments.
///
/// The folded value travels as `id` inside the payload, so a remaining
/// argument already called `id` is renamed.
fn fold_last_placeholder(endpoint: &EndpointIR, path_params: &mut Vec<PathParamIR>) -> Option<String> {
    let last = endpoint.placeholders().pop()?;
    path_params.retain(|p| p.original_name != last);
    for param in path_params.iter_mut().filter(|p| p.name == FOLDED_ID) {
        param.name = RENAMED_ID.to_string();
    }
    Some(last)
}

/// Options object type: list helpers plus the remaining query fields.
fn query_type(ctx: &ModuleContext<'_>, paginated: bool, fields: Vec<TsProp>) -> Option<TsType> {
    let mut parts = Vec::new();
    if paginated {
        if let Some(primary) = &ctx.module.primary {
            parts.push(TsType::named(primary.params_name()));
        }
        parts.push(TsType::named(&ctx.config.pagination_params_type));
    }
    if !fields.is_empty() {
        parts.push(TsType::Object(fields));
    }
    match parts.len() {
        0 => None,
        1 => parts.pop(),
        _ => Some(TsType::Intersection(parts)),
    }
}

fn synthesized_method(ctx: &ModuleContext<'_>, kind: CrudKind, base: &str) -> ServiceMethodIR {
    let primary = ctx.module.primary.as_ref();
    let entity = ctx.module.entity_type();
    let detail = format!("{base}{{id}}/");
    let id_param = || PathParamIR {
        name: "id".to_string(),
        original_name: "id".to_string(),
        ty: TsType::id(),
    };

    let (path, path_params, body, query, response) = match kind {
        CrudKind::GetAll => {
            let query = match primary {
                Some(_) => query_type(ctx, true, Vec::new()),
                None => Some(TsType::any()),
            };
            (base.to_string(), vec![], None, query, ctx.envelope(ctx.paginated(entity)))
        }
        CrudKind::Get => (detail, vec![id_param()], None, None, ctx.envelope(entity)),
        CrudKind::Create => {
            let body = BodyIR {
                ty: primary.map_or_else(TsType::any, |p| TsType::named(p.create_params_name())),
                folded_id: None,
            };
            (base.to_string(), vec![], Some(body), None, ctx.envelope(entity))
        }
        CrudKind::Update => {
            let body = BodyIR {
                ty: primary.map_or_else(TsType::any, |p| TsType::named(p.update_params_name())),
                folded_id: Some("id".to_string()),
            };
            (detail, vec![], Some(body), None, ctx.envelope(entity))
        }
        CrudKind::Remove => (
            detail,
            vec![id_param()],
            None,
            None,
            ctx.envelope(TsType::Primitive(TsPrimitive::Null)),
        ),
    };

    ServiceMethodIR {
        name: kind.method_name().to_string(),
        method: kind.http_method(),
        crud: Some(kind),
        operation_id: None,
        endpoint: EndpointIR {
            key: kind.endpoint_key().to_string(),
            path,
        },
        path_params,
        body,
        query,
        response,
        doc: None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::config::GeneratorConfig;
    use crate::enums::EnumRegistry;
    use crate::ir::Emit;
    use crate::spec::OpenApiSpec;

    const SPEC: &str = r##"
paths:
  /api/widgets/:
    get:
      operationId: widgets_list
      parameters:
        - { name: page, in: query, schema: { type: integer } }
        - { name: search, in: query, schema: { type: string } }
      responses: {}
    post:
      operationId: widgets_create
      requestBody:
        content:
          application/json:
            schema: { $ref: "#/components/schemas/WidgetRequest" }
      responses:
        "201":
          content:
            application/json:
              schema: { $ref: "#/components/schemas/Widget" }
  /api/widgets/{id}/:
    patch:
      operationId: widgets_partial_update
      parameters:
        - { name: id, in: path, required: true, schema: { type: integer } }
      requestBody:
        content:
          application/json:
            schema: { $ref: "#/components/schemas/WidgetRequest" }
      responses: {}
    put:
      operationId: widgets_update
      parameters:
        - { name: id, in: path, required: true, schema: { type: integer } }
      requestBody:
        content:
          application/json:
            schema: { $ref: "#/components/schemas/WidgetRequest" }
      responses: {}
  /api/widgets/{widget-id}/export:
    get:
      operationId: widgets_export_csv
      summary: Export as CSV
      responses: {}
components:
  schemas:
    Widget:
      type: object
      properties:
        id: { type: integer, readOnly: true }
    WidgetRequest:
      type: object
      properties:
        title: { type: string }
"##;

    fn methods_of(yaml: &str, module: &str) -> Vec<ServiceMethodIR> {
        let spec = OpenApiSpec::from_yaml(yaml).unwrap();
        let config = GeneratorConfig::default();
        let global = EnumRegistry::collect(spec.schemas());
        let modules = classify(&spec, &global, &config);
        let ctx = ModuleContext::new(&modules[module], spec.schemas(), &config);
        service_methods(&ctx)
    }

    fn methods() -> Vec<ServiceMethodIR> {
        methods_of(SPEC, "Widgets")
    }

    fn find<'a>(methods: &'a [ServiceMethodIR], name: &str) -> &'a ServiceMethodIR {
        methods.iter().find(|m| m.name == name).unwrap()
    }

    #[test]
    fn test_method_names_and_order() {
        let names: Vec<_> = methods().into_iter().map(|m| m.name).collect();
        assert_eq!(
            names,
            ["create", "exportCsv", "getAll", "partialUpdate", "update", "get", "remove"]
        );
    }

    #[test]
    fn test_list_method() {
        let methods = methods();
        let list = find(&methods, "getAll");
        assert_eq!(list.endpoint.key, "WIDGETS_LIST");
        assert_eq!(
            list.query.as_ref().unwrap().emit(),
            "WidgetParams & PaginationParams & { search?: string }"
        );
        assert_eq!(
            list.response.emit(),
            "ApiResponse<PaginatedResponse<Widget>>"
        );
    }

    #[test]
    fn test_create_and_update_bodies() {
        let methods = methods();
        let create = find(&methods, "create");
        assert_eq!(create.body.as_ref().unwrap().ty.emit(), "WidgetCreateParams");
        assert_eq!(create.response.emit(), "ApiResponse<Widget>");

        let update = find(&methods, "update");
        let body = update.body.as_ref().unwrap();
        assert_eq!(body.ty.emit(), "WidgetUpdateParams");
        assert_eq!(body.folded_id.as_deref(), Some("id"));
        assert!(update.path_params.is_empty());
        assert_eq!(update.response.emit(), "ApiResponse<null>");
    }

    #[test]
    fn test_explicit_detail_get_with_placeholder_param() {
        let methods = methods();
        let export = find(&methods, "exportCsv");
        assert_eq!(export.path_params[0].name, "widgetId");
        assert_eq!(export.path_params[0].original_name, "widget-id");
        assert_eq!(export.doc.as_deref(), Some("Export as CSV"));
        assert_eq!(export.response.emit(), "ApiResponse<Widget>");
    }

    #[test]
    fn test_synthesized_members() {
        let methods = methods();
        let get = find(&methods, "get");
        assert!(get.operation_id.is_none());
        assert_eq!(get.endpoint.key, "GET_BY_ID");
        assert_eq!(get.endpoint.path, "/api/widgets/{id}/");
        let remove = find(&methods, "remove");
        assert_eq!(remove.method, HttpMethod::Delete);
        assert_eq!(remove.response.emit(), "ApiResponse<null>");
    }

    #[test]
    fn test_derive_method_name() {
        assert_eq!(derive_method_name("Widgets", "widgets_export_csv"), "exportCsv");
        assert_eq!(derive_method_name("Widgets", "archiveWidget"), "archiveWidget");
        assert_eq!(derive_method_name("Widgets", "widgets"), "widgets");
        assert_eq!(derive_method_name("Widgets", "widgets_delete_all"), "deleteAll");
        assert_eq!(derive_method_name("Reports", "reports_export"), "export");
        assert_eq!(derive_method_name("Reports", "reports_2fa"), "_2fa");
    }

    #[test]
    fn test_is_collection_path() {
        assert!(is_collection_path("/api/widgets/"));
        assert!(!is_collection_path("/api/widgets/{id}/"));
        assert!(!is_collection_path("/api/widgets/{id}/export"));
    }

    #[test]
    fn test_allocator_suffixes_repeats() {
        let mut names = Allocator::new(["get".to_string()].into_iter(), "");
        assert_eq!(names.claim("get".into()), "get2");
        assert_eq!(names.claim("get".into()), "get3");
        assert_eq!(names.claim("export".into()), "export");
    }

    #[test]
    fn test_crud_suffix_from_other_resource_does_not_claim() {
        let methods = methods_of(
            r##"
paths:
  /api/auth/login/:
    post: { operationId: auth_login_create, responses: {} }
  /api/auth/logout/:
    post: { operationId: auth_logout_create, responses: {} }
  /api/auth/{user_pk}/sessions/:
    get: { operationId: auth_sessions_list, responses: {} }
"##,
            "Auth",
        );
        let names: Vec<_> = methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(
            names,
            ["loginCreate", "logoutCreate", "sessionsList", "getAll", "get", "create", "update", "remove"]
        );
        assert!(methods.iter().all(|m| m.crud.is_none() || m.operation_id.is_none()));

        let sessions = find(&methods, "sessionsList");
        assert_eq!(sessions.endpoint.key, "AUTH_SESSIONS_LIST");
        assert_eq!(sessions.path_params[0].name, "user_pk");
        let get_all = find(&methods, "getAll");
        assert!(get_all.path_params.is_empty());
        assert_eq!(get_all.endpoint.path, "/api/auth/");
    }

    const SHOP_ITEMS: &str = r##"
paths:
  /api/shops/{shop_id}/items/{id}/:
    put:
      operationId: shops_items_update
      parameters:
        - { name: id, in: path, required: true, schema: { type: integer } }
        - { name: shop_id, in: path, required: true, schema: { type: integer } }
      requestBody:
        content:
          application/json:
            schema: { $ref: "#/components/schemas/Item" }
      responses: {}
  /api/shops/{id}/items/{item_pk}/:
    patch:
      operationId: shops_items_partial_update
      parameters:
        - { name: item_pk, in: path, required: true }
        - { name: id, in: path, required: true }
      requestBody:
        content:
          application/json:
            schema: { $ref: "#/components/schemas/Item" }
      responses: {}
    delete:
      operationId: shops_items_destroy
      parameters:
        - { name: id, in: path, required: true }
        - { name: item_pk, in: path, required: true }
      requestBody:
        content:
          application/json:
            schema: { $ref: "#/components/schemas/Item" }
      responses: {}
components:
  schemas:
    Item:
      type: object
      properties:
        sku: { type: string }
"##;

    #[test]
    fn test_update_folds_last_placeholder_of_template() {
        let methods = methods_of(SHOP_ITEMS, "Shops");

        let update = find(&methods, "itemsUpdate");
        assert_eq!(update.body.as_ref().unwrap().folded_id.as_deref(), Some("id"));
        let remaining: Vec<_> = update.path_params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(remaining, ["shop_id"]);
        assert_eq!(update.path_params[0].ty.emit(), "number");

        let partial = find(&methods, "itemsPartialUpdate");
        assert_eq!(partial.body.as_ref().unwrap().folded_id.as_deref(), Some("item_pk"));
        assert_eq!(partial.path_params.len(), 1);
        assert_eq!(partial.path_params[0].name, "idParam");
        assert_eq!(partial.path_params[0].original_name, "id");
    }

    #[test]
    fn test_delete_drops_request_body() {
        let methods = methods_of(SHOP_ITEMS, "Shops");
        let destroy = find(&methods, "itemsDestroy");
        assert!(destroy.body.is_none());
        let names: Vec<_> = destroy.params().into_iter().map(|p| p.name).collect();
        assert_eq!(names, ["id", "item_pk"]);
    }
}
