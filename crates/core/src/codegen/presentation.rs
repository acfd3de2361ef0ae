//! `{m}/{M}.presentation.ts`: query and mutation hooks around the service.
//!
//! Query hooks take every service argument as optional and stay disabled
//! until the required ones are present. Mutation hooks take an optional
//! redirect target and navigate there on success.

use super::{GENERATED_BANNER, ModelsFile, ModuleContext, model_import, referenced_names};
use crate::ir::api::ServiceMethodIR;
use crate::ir::types::{
    BinOp, ObjectEntry, TsExpr, TsFunction, TsImport, TsLiteral, TsModule, TsParam, TsPrimitive,
    TsProp, TsStmt, TsType,
};

const SERVICE_PARAM: &str = "service";
const NAVIGATE: &str = "navigate";
const REDIRECT_PARAM: &str = "redirectTo";
const VARS_PARAM: &str = "vars";

/// `{Module}Presentation` hooks over the module's service methods.
pub fn presentation_module(
    ctx: &ModuleContext<'_>,
    methods: &[ServiceMethodIR],
    models: &ModelsFile,
) -> TsModule {
    let mut referenced: Vec<TsType> = Vec::new();
    let mut entries = Vec::new();
    for method in methods {
        let hook = if method.is_mutation() {
            mutation_hook(method, &mut referenced)
        } else {
            query_hook(ctx, method, &mut referenced)
        };
        entries.push(ObjectEntry::Property(method.hook_name(), hook));
    }

    let has_queries = methods.iter().any(|m| !m.is_mutation());
    let has_mutations = methods.iter().any(ServiceMethodIR::is_mutation);

    let mut body = Vec::new();
    if has_mutations {
        body.push(TsStmt::Const {
            name: NAVIGATE.to_string(),
            init: TsExpr::call(TsExpr::ident("useNavigate"), Vec::new()),
            exported: false,
        });
    }
    body.push(TsStmt::Return(TsExpr::Object {
        entries,
        multiline: true,
    }));

    let interface = ctx.interface_name();
    let factory = ctx.factory_name();
    let refs = referenced_names(&referenced);

    let mut query_items = Vec::new();
    if has_mutations {
        query_items.push("useMutation".to_string());
    }
    if has_queries {
        query_items.push("useQuery".to_string());
    }
    let mut imports = vec![TsImport {
        items: query_items,
        from: ctx.config.query_module.clone(),
        type_only: false,
    }];
    if has_mutations {
        imports.push(TsImport {
            items: vec!["useNavigate".to_string()],
            from: ctx.config.router_module.clone(),
            type_only: false,
        });
    }
    imports.extend(ctx.http_type_import(&refs));
    imports.push(TsImport {
        items: vec![interface.clone()],
        from: format!("./domains/{interface}"),
        type_only: true,
    });
    imports.extend(model_import(
        models,
        &refs,
        &format!("./domains/models/{}", ctx.module.name),
    ));
    imports.push(TsImport {
        items: vec![factory.clone()],
        from: format!("./{}.service", ctx.module.name),
        type_only: false,
    });

    TsModule {
        banner: Some(GENERATED_BANNER.to_string()),
        imports,
        types: Vec::new(),
        statements: Vec::new(),
        functions: vec![TsFunction {
            name: ctx.presentation_name(),
            params: vec![TsParam {
                name: SERVICE_PARAM.to_string(),
                ty: Some(TsType::named(interface)),
                optional: false,
                default: Some(TsExpr::call(TsExpr::ident(factory), Vec::new())),
            }],
            return_type: None,
            body,
            is_export: true,
        }],
    }
}

fn service_call(method: &ServiceMethodIR, args: Vec<TsExpr>) -> TsExpr {
    TsExpr::call(
        TsExpr::path(&[SERVICE_PARAM, method.name.as_str()]),
        args,
    )
}

/// `(id?, params?) => useQuery({ queryKey, queryFn, enabled })`
fn query_hook(
    ctx: &ModuleContext<'_>,
    method: &ServiceMethodIR,
    referenced: &mut Vec<TsType>,
) -> TsExpr {
    let service_params = method.params();
    let mut hook_params = Vec::new();
    let mut call_args = Vec::new();
    let mut key = vec![TsExpr::string(format!("{}.{}", ctx.module.name, method.name))];
    let mut guards: Vec<TsExpr> = Vec::new();

    for param in &service_params {
        if let Some(ty) = &param.ty {
            referenced.push(ty.clone());
            hook_params.push(TsParam::optional(&param.name, ty.clone()));
        }
        let ident = TsExpr::ident(&param.name);
        if param.name == ServiceMethodIR::QUERY_PARAM {
            let values = TsExpr::call(
                TsExpr::path(&["Object", "values"]),
                vec![TsExpr::bin(
                    ident.clone(),
                    BinOp::Nullish,
                    TsExpr::Object {
                        entries: Vec::new(),
                        multiline: false,
                    },
                )],
            );
            key.push(TsExpr::Spread(Box::new(values)));
        } else {
            key.push(ident.clone());
        }
        if param.optional {
            call_args.push(ident);
        } else {
            guards.push(TsExpr::bin(
                ident.clone(),
                BinOp::NotEqual,
                TsExpr::Literal(TsLiteral::Null),
            ));
            call_args.push(TsExpr::NonNull(Box::new(ident)));
        }
    }

    let mut options = vec![
        ObjectEntry::Property("queryKey".to_string(), TsExpr::Array(key)),
        ObjectEntry::Property(
            "queryFn".to_string(),
            TsExpr::arrow(Vec::new(), service_call(method, call_args)),
        ),
    ];
    if let Some(enabled) = guards
        .into_iter()
        .reduce(|acc, guard| TsExpr::bin(acc, BinOp::And, guard))
    {
        options.push(ObjectEntry::Property("enabled".to_string(), enabled));
    }

    TsExpr::arrow(
        hook_params,
        TsExpr::call(
            TsExpr::ident("useQuery"),
            vec![TsExpr::Object {
                entries: options,
                multiline: true,
            }],
        ),
    )
}

/// `(redirectTo?) => useMutation({ mutationFn, onSuccess })`
fn mutation_hook(method: &ServiceMethodIR, referenced: &mut Vec<TsType>) -> TsExpr {
    let service_params = method.params();
    let vars = TsExpr::ident(VARS_PARAM);

    let mutation_fn = match service_params.as_slice() {
        [] => TsExpr::arrow(Vec::new(), service_call(method, Vec::new())),
        [single] => {
            let ty = single.ty.clone().unwrap_or_else(TsType::any);
            referenced.push(ty.clone());
            let param = TsParam {
                name: VARS_PARAM.to_string(),
                ty: Some(ty),
                optional: single.optional,
                default: None,
            };
            TsExpr::arrow(vec![param], service_call(method, vec![vars]))
        }
        many => {
            let props: Vec<TsProp> = many
                .iter()
                .map(|p| TsProp::new(&p.name, p.ty.clone().unwrap_or_else(TsType::any), p.optional))
                .collect();
            let ty = TsType::Object(props);
            referenced.push(ty.clone());
            let args = many
                .iter()
                .map(|p| TsExpr::member(vars.clone(), &p.name))
                .collect();
            TsExpr::arrow(
                vec![TsParam::new(VARS_PARAM, ty)],
                service_call(method, args),
            )
        }
    };

    let redirect = TsExpr::ident(REDIRECT_PARAM);
    let on_success = TsExpr::arrow(
        Vec::new(),
        TsExpr::bin(
            redirect.clone(),
            BinOp::And,
            TsExpr::call(TsExpr::ident(NAVIGATE), vec![redirect]),
        ),
    );

    TsExpr::arrow(
        vec![TsParam::optional(
            REDIRECT_PARAM,
            TsType::Primitive(TsPrimitive::String),
        )],
        TsExpr::call(
            TsExpr::ident("useMutation"),
            vec![TsExpr::Object {
                entries: vec![
                    ObjectEntry::Property("mutationFn".to_string(), mutation_fn),
                    ObjectEntry::Property("onSuccess".to_string(), on_success),
                ],
                multiline: true,
            }],
        ),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::codegen::{models_module, service_methods};
    use crate::config::GeneratorConfig;
    use crate::enums::EnumRegistry;
    use crate::ir::Emit;
    use crate::spec::OpenApiSpec;
    use std::collections::BTreeSet;

    fn imported_models(file: &TsModule, models: &ModelsFile) -> BTreeSet<String> {
        file.imports
            .iter()
            .filter(|import| import.from.contains("/models/"))
            .flat_map(|import| import.items.iter().cloned())
            .filter(|item| models.exports.contains(item))
            .collect()
    }

    fn render(yaml: &str, module: &str) -> (String, BTreeSet<String>) {
        let spec = OpenApiSpec::from_yaml(yaml).unwrap();
        let config = GeneratorConfig::default();
        let global = EnumRegistry::collect(spec.schemas());
        let modules = classify(&spec, &global, &config);
        let ctx = ModuleContext::new(&modules[module], spec.schemas(), &config);
        let models = models_module(&ctx);
        let file = presentation_module(&ctx, &service_methods(&ctx), &models);
        let imported = imported_models(&file, &models);
        (file.emit(), imported)
    }

    const WIDGETS: &str = r##"
paths:
  /api/widgets/:
    get:
      operationId: widgets_list
      parameters:
        - { name: search, in: query, schema: { type: string } }
      responses: {}
components:
  schemas:
    Widget: { type: object, properties: { title: { type: string } } }
"##;

    #[test]
    fn test_hooks() {
        let (out, imported) = render(WIDGETS, "Widgets");
        assert!(out.contains("import { useMutation, useQuery } from '@tanstack/react-query';\n"));
        assert!(out.contains("import { useNavigate } from 'react-router-dom';\n"));
        assert!(out.contains("import type { PaginationParams } from '@/core/http';\n"));
        assert!(out.contains(
            "import type { WidgetCreateParams, WidgetParams, WidgetUpdateParams } from './domains/models/Widgets';\n"
        ));
        assert!(out.contains("import { WidgetsService } from './Widgets.service';\n"));
        assert!(out.contains(
            "export function WidgetsPresentation(service: IWidgetsService = WidgetsService()) {\n  const navigate = useNavigate();\n  return {\n"
        ));
        assert!(out.contains(
            "    useGetAll: (params?: WidgetParams & PaginationParams & { search?: string }) => useQuery({\n      queryKey: ['Widgets.getAll', ...Object.values(params ?? {})],\n      queryFn: () => service.getAll(params),\n    }),\n"
        ));
        assert!(out.contains(
            "    useGet: (id?: string | number) => useQuery({\n      queryKey: ['Widgets.get', id],\n      queryFn: () => service.get(id!),\n      enabled: id != null,\n    }),\n"
        ));
        assert!(out.contains(
            "    useCreate: (redirectTo?: string) => useMutation({\n      mutationFn: (vars: WidgetCreateParams) => service.create(vars),\n      onSuccess: () => redirectTo && navigate(redirectTo),\n    }),\n"
        ));
        assert!(out.contains("      mutationFn: (vars: string | number) => service.remove(vars),\n"));
        assert_eq!(imported.len(), 3);
    }

    #[test]
    fn test_multi_argument_mutation() {
        let (out, _) = render(
            r##"
paths:
  /api/shops/{shop_id}/items/:
    post:
      operationId: shops_add_item
      parameters:
        - { name: shop_id, in: path, required: true, schema: { type: integer } }
      requestBody:
        content:
          application/json:
            schema: { type: object, properties: { sku: { type: string } } }
      responses: {}
"##,
            "Shops",
        );
        assert!(out.contains(
            "      mutationFn: (vars: { shop_id: number; body: { sku?: string } }) => service.addItem(vars.shop_id, vars.body),\n"
        ));
    }
}
