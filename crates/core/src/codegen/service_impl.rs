//! `{m}/{M}.service.ts`: factory returning an object that implements the
//! contract by delegating to the HTTP client and the endpoints registry.

use super::{ENDPOINTS_CONST, GENERATED_BANNER, ModuleContext};
use crate::ir::api::ServiceMethodIR;
use crate::ir::types::{
    ObjectEntry, TsExpr, TsFunction, TsImport, TsModule, TsParam, TsStmt, TsType,
};

/// Destructuring pattern used by update-style members.
const FOLDED_PATTERN: &str = "{ id, ...body }";

/// The `{Module}Service()` factory.
pub fn service_impl_module(ctx: &ModuleContext<'_>, methods: &[ServiceMethodIR]) -> TsModule {
    let entries = methods
        .iter()
        .map(|m| ObjectEntry::Property(m.name.clone(), method_arrow(ctx, m)))
        .collect();

    let interface = ctx.interface_name();
    let imports = vec![
        TsImport {
            items: vec![ctx.config.http_client.clone()],
            from: ctx.config.http_module.clone(),
            type_only: false,
        },
        TsImport {
            items: vec![ENDPOINTS_CONST.to_string()],
            from: "../constants/endpoints".to_string(),
            type_only: false,
        },
        TsImport {
            items: vec![interface.clone()],
            from: format!("./domains/{interface}"),
            type_only: true,
        },
    ];

    TsModule {
        banner: Some(GENERATED_BANNER.to_string()),
        imports,
        types: Vec::new(),
        statements: Vec::new(),
        functions: vec![TsFunction {
            name: ctx.factory_name(),
            params: Vec::new(),
            return_type: Some(TsType::named(interface)),
            body: vec![TsStmt::Return(TsExpr::Object {
                entries,
                multiline: true,
            })],
            is_export: true,
        }],
    }
}

/// `(args) => httpClient.verb(ENDPOINTS.M.KEY(pathArgs), payload?, { params }?)`
fn method_arrow(ctx: &ModuleContext<'_>, method: &ServiceMethodIR) -> TsExpr {
    let mut params: Vec<TsParam> = method
        .path_params
        .iter()
        .map(|p| TsParam::untyped(&p.name))
        .collect();
    let folded = method.body.as_ref().and_then(|b| b.folded_id.as_deref());
    match (&method.body, folded) {
        (Some(_), Some(_)) => params.push(TsParam::untyped(FOLDED_PATTERN)),
        (Some(_), None) => params.push(TsParam::untyped(ServiceMethodIR::BODY_PARAM)),
        (None, _) => {}
    }
    if method.query.is_some() {
        params.push(TsParam::untyped(ServiceMethodIR::QUERY_PARAM));
    }

    let path_args = method
        .endpoint
        .placeholders()
        .into_iter()
        .map(|placeholder| {
            if folded == Some(placeholder.as_str()) {
                return TsExpr::ident("id");
            }
            let name = method
                .path_params
                .iter()
                .find(|p| p.original_name == placeholder)
                .map_or(placeholder, |p| p.name.clone());
            TsExpr::ident(name)
        })
        .collect();
    let url = TsExpr::call(
        TsExpr::path(&[
            ENDPOINTS_CONST,
            ctx.module.name.as_str(),
            method.endpoint.key.as_str(),
        ]),
        path_args,
    );

    let mut args = vec![url];
    if method.method.sends_body() {
        if method.body.is_some() {
            args.push(TsExpr::ident(ServiceMethodIR::BODY_PARAM));
        } else if method.query.is_some() {
            args.push(TsExpr::ident("undefined"));
        }
    }
    if method.query.is_some() {
        args.push(TsExpr::Object {
            entries: vec![ObjectEntry::Shorthand(ServiceMethodIR::QUERY_PARAM.to_string())],
            multiline: false,
        });
    }

    let dispatch = TsExpr::call(
        TsExpr::path(&[ctx.config.http_client.as_str(), method.method.verb()]),
        args,
    );
    TsExpr::arrow(params, dispatch)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::codegen::service_methods;
    use crate::config::GeneratorConfig;
    use crate::enums::EnumRegistry;
    use crate::ir::Emit;
    use crate::spec::OpenApiSpec;

    #[test]
    fn test_call_shapes() {
        let spec = OpenApiSpec::from_yaml(
            r##"
paths:
  /api/widgets/:
    get:
      operationId: widgets_list
      responses: {}
  /api/widgets/{id}/archive:
    post:
      operationId: widgets_archive
      parameters:
        - { name: id, in: path, required: true }
        - { name: reason, in: query, schema: { type: string } }
      responses: {}
components:
  schemas:
    Widget: { type: object, properties: { title: { type: string } } }
"##,
        )
        .unwrap();
        let config = GeneratorConfig::default();
        let global = EnumRegistry::collect(spec.schemas());
        let modules = classify(&spec, &global, &config);
        let ctx = ModuleContext::new(&modules["Widgets"], spec.schemas(), &config);
        let out = service_impl_module(&ctx, &service_methods(&ctx)).emit();

        assert!(out.contains("import { httpClient } from '@/core/http';\n"));
        assert!(out.contains("import { ENDPOINTS } from '../constants/endpoints';\n"));
        assert!(out.contains("import type { IWidgetsService } from './domains/IWidgetsService';\n"));
        assert!(out.contains("export function WidgetsService(): IWidgetsService {\n  return {\n"));
        assert!(out.contains(
            "    archive: (id, params) => httpClient.post(ENDPOINTS.Widgets.WIDGETS_ARCHIVE(id), undefined, { params }),\n"
        ));
        assert!(out.contains(
            "    getAll: (params) => httpClient.get(ENDPOINTS.Widgets.WIDGETS_LIST(), { params }),\n"
        ));
        assert!(out.contains("    get: (id) => httpClient.get(ENDPOINTS.Widgets.GET_BY_ID(id)),\n"));
        assert!(out.contains("    create: (body) => httpClient.post(ENDPOINTS.Widgets.POST_CREATE(), body),\n"));
        assert!(out.contains(
            "    update: ({ id, ...body }) => httpClient.put(ENDPOINTS.Widgets.PUT_UPDATE(id), body),\n"
        ));
        assert!(out.contains("    remove: (id) => httpClient.delete(ENDPOINTS.Widgets.DELETE_REMOVE(id)),\n"));
        assert!(out.ends_with("  };\n}\n"));
    }

    #[test]
    fn test_delete_ignores_request_body() {
        let spec = OpenApiSpec::from_yaml(
            r##"
paths:
  /api/widgets/{id}/:
    delete:
      operationId: widgets_purge
      parameters:
        - { name: id, in: path, required: true }
      requestBody:
        content:
          application/json:
            schema: { type: object, properties: { reason: { type: string } } }
      responses: {}
"##,
        )
        .unwrap();
        let config = GeneratorConfig::default();
        let global = EnumRegistry::collect(spec.schemas());
        let modules = classify(&spec, &global, &config);
        let ctx = ModuleContext::new(&modules["Widgets"], spec.schemas(), &config);
        let out = service_impl_module(&ctx, &service_methods(&ctx)).emit();

        assert!(out.contains(
            "    purge: (id) => httpClient.delete(ENDPOINTS.Widgets.WIDGETS_PURGE(id)),\n"
        ));
    }
}
