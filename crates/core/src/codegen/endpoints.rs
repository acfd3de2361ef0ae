//! `constants/endpoints.ts`: one path builder per service member, grouped by
//! module.

use std::collections::BTreeMap;

use super::{ENDPOINTS_CONST, GENERATED_BANNER};
use crate::ir::api::{EndpointIR, ServiceMethodIR};
use crate::ir::types::{ObjectEntry, TemplatePart, TsExpr, TsModule, TsParam, TsStmt, TsType};
use crate::ir::utils::sanitize_ts_identifier;

/// The shared registry, one entry per module in name order.
pub fn endpoints_module(methods_by_module: &BTreeMap<String, Vec<ServiceMethodIR>>) -> TsModule {
    let modules = methods_by_module
        .iter()
        .map(|(module, methods)| {
            let builders = methods
                .iter()
                .map(|m| ObjectEntry::Property(m.endpoint.key.clone(), path_builder(&m.endpoint)))
                .collect();
            ObjectEntry::Property(
                module.clone(),
                TsExpr::Object {
                    entries: builders,
                    multiline: true,
                },
            )
        })
        .collect();

    let registry = TsExpr::Cast {
        expr: Box::new(TsExpr::Object {
            entries: modules,
            multiline: true,
        }),
        ty: TsType::named("const"),
    };

    TsModule {
        banner: Some(GENERATED_BANNER.to_string()),
        imports: Vec::new(),
        types: Vec::new(),
        statements: vec![TsStmt::Const {
            name: ENDPOINTS_CONST.to_string(),
            init: registry,
            exported: true,
        }],
        functions: Vec::new(),
    }
}

/// Arrow building one path. Placeholders become `string | number` arguments.
fn path_builder(endpoint: &EndpointIR) -> TsExpr {
    let placeholders = endpoint.placeholders();
    if placeholders.is_empty() {
        return TsExpr::arrow(Vec::new(), TsExpr::string(&endpoint.path));
    }

    let params = placeholders
        .iter()
        .map(|name| TsParam::new(sanitize_ts_identifier(name), TsType::id()))
        .collect();

    let mut parts = Vec::new();
    let mut rest = endpoint.path.as_str();
    while let Some(start) = rest.find('{') {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        if start > 0 {
            parts.push(TemplatePart::Static(rest[..start].to_string()));
        }
        let name = &rest[start + 1..start + len];
        if name.is_empty() {
            parts.push(TemplatePart::Static("{}".to_string()));
        } else {
            parts.push(TemplatePart::Dynamic(TsExpr::ident(sanitize_ts_identifier(
                name,
            ))));
        }
        rest = &rest[start + len + 1..];
    }
    if !rest.is_empty() {
        parts.push(TemplatePart::Static(rest.to_string()));
    }

    TsExpr::arrow(params, TsExpr::Template(parts))
}
