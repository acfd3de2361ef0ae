//! `{m}/domains/I{M}Service.ts`: the service contract.

use super::{GENERATED_BANNER, ModelsFile, ModuleContext, model_import, referenced_names};
use crate::ir::api::ServiceMethodIR;
use crate::ir::types::{TsMethodSig, TsModule, TsTypeDef, TypeDefKind};

/// The `I{Module}Service` contract.
pub fn service_interface_module(
    ctx: &ModuleContext<'_>,
    methods: &[ServiceMethodIR],
    models: &ModelsFile,
) -> TsModule {
    let signatures: Vec<TsMethodSig> = methods
        .iter()
        .map(|m| TsMethodSig {
            name: m.name.clone(),
            params: m.params(),
            return_type: m.return_type(),
            doc: m.doc.clone(),
        })
        .collect();

    let refs = referenced_names(signatures.iter().flat_map(|sig| {
        sig.params
            .iter()
            .filter_map(|p| p.ty.as_ref())
            .chain(std::iter::once(&sig.return_type))
    }));
    let models_path = format!("./models/{}", ctx.module.name);
    let imports = ctx
        .http_type_import(&refs)
        .into_iter()
        .chain(model_import(models, &refs, &models_path))
        .collect();

    TsModule {
        banner: Some(GENERATED_BANNER.to_string()),
        imports,
        types: vec![TsTypeDef {
            name: ctx.interface_name(),
            doc: None,
            kind: TypeDefKind::Contract {
                methods: signatures,
            },
        }],
        statements: Vec::new(),
        functions: Vec::new(),
    }
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

    fn render(yaml: &str, module: &str) -> String {
        let spec = OpenApiSpec::from_yaml(yaml).unwrap();
        let config = GeneratorConfig::default();
        let global = EnumRegistry::collect(spec.schemas());
        let modules = classify(&spec, &global, &config);
        let ctx = ModuleContext::new(&modules[module], spec.schemas(), &config);
        let models = models_module(&ctx);
        service_interface_module(&ctx, &service_methods(&ctx), &models).emit()
    }

    #[test]
    fn test_widgets_contract() {
        let out = render(
            r##"
paths:
  /api/widgets/:
    get:
      operationId: widgets_list
      summary: List widgets
      responses: {}
components:
  schemas:
    Widget:
      type: object
      properties:
        title: { type: string }
"##,
            "Widgets",
        );
        assert!(out.contains(
            "import type { ApiResponse, PaginatedResponse, PaginationParams } from '@/core/http';\n"
        ));
        assert!(out.contains(
            "import type { Widget, WidgetCreateParams, WidgetParams, WidgetUpdateParams } from './models/Widgets';\n"
        ));
        assert!(out.contains("export interface IWidgetsService {\n"));
        assert!(out.contains(
            "  /** List widgets */\n  getAll(params?: WidgetParams & PaginationParams): Promise<ApiResponse<PaginatedResponse<Widget>>>;\n"
        ));
        assert!(out.contains("  get(id: string | number): Promise<ApiResponse<Widget>>;\n"));
        assert!(out.contains("  create(body: WidgetCreateParams): Promise<ApiResponse<Widget>>;\n"));
        assert!(out.contains("  update(data: WidgetUpdateParams): Promise<ApiResponse<Widget>>;\n"));
        assert!(out.contains("  remove(id: string | number): Promise<ApiResponse<null>>;\n"));
    }

    #[test]
    fn test_contract_without_primary_uses_any() {
        let out = render(
            "paths:\n  /api/reports/{id}/export:\n    get:\n      operationId: reports_export\n      responses: {}\n",
            "Reports",
        );
        assert!(!out.contains("./models/"));
        assert!(out.contains("  export(id: string | number): Promise<ApiResponse<any>>;\n"));
        assert!(out.contains("  getAll(params?: any): Promise<ApiResponse<PaginatedResponse<any>>>;\n"));
        assert!(out.contains("  create(body: any): Promise<ApiResponse<any>>;\n"));
        assert!(out.contains("  update(data: any): Promise<ApiResponse<any>>;\n"));
    }
}
