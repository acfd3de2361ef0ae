//! TypeScript code emission via the Emit trait.
//!
//! Each IR node implements `Emit`; emission is purely mechanical string
//! building, all naming and typing decisions are made before this point.

use super::types::{
    BinOp, ObjectEntry, TemplatePart, TsExpr, TsFunction, TsImport, TsLiteral, TsMethodSig,
    TsModule, TsParam, TsPrimitive, TsProp, TsStmt, TsType, TsTypeDef, TypeDefKind,
};
use super::utils::{escape_ts_string, quote_if_needed};

const INDENT: &str = "  ";

/// Trait for emitting TypeScript code from IR nodes.
pub trait Emit {
    /// Convert the node to its TypeScript string representation.
    fn emit(&self) -> String;
}

// =============================================================================
// Primitive Types
// =============================================================================

impl Emit for TsPrimitive {
    fn emit(&self) -> String {
        match self {
            TsPrimitive::String => "string",
            TsPrimitive::Number => "number",
            TsPrimitive::Boolean => "boolean",
            TsPrimitive::Null => "null",
            TsPrimitive::Any => "any",
        }
        .to_string()
    }
}

impl Emit for TsLiteral {
    fn emit(&self) -> String {
        match self {
            TsLiteral::String(s) => format!("'{}'", escape_ts_string(s)),
            TsLiteral::Number(n) => n.to_string(),
            TsLiteral::Int(i) => i.to_string(),
            TsLiteral::Bool(b) => b.to_string(),
            TsLiteral::Null => "null".to_string(),
        }
    }
}

// =============================================================================
// Types
// =============================================================================

impl Emit for TsType {
    fn emit(&self) -> String {
        match self {
            TsType::Primitive(p) => p.emit(),
            TsType::Array(inner) => {
                if matches!(**inner, TsType::Union(_) | TsType::Intersection(_)) {
                    format!("({})[]", inner.emit())
                } else {
                    format!("{}[]", inner.emit())
                }
            }
            TsType::Union(types) => join(types, " | "),
            TsType::Intersection(types) => types
                .iter()
                .map(|t| {
                    if matches!(t, TsType::Union(_)) {
                        format!("({})", t.emit())
                    } else {
                        t.emit()
                    }
                })
                .collect::<Vec<_>>()
                .join(" & "),
            TsType::Object(props) => {
                if props.is_empty() {
                    "{}".to_string()
                } else {
                    format!("{{ {} }}", join(props, "; "))
                }
            }
            TsType::Record(value) => format!("Record<string, {}>", value.emit()),
            TsType::Literal(lit) => lit.emit(),
            TsType::Ref(name) => name.clone(),
            TsType::Generic { name, args } => format!("{}<{}>", name, join(args, ", ")),
        }
    }
}

impl Emit for TsProp {
    fn emit(&self) -> String {
        let opt = if self.optional { "?" } else { "" };
        let readonly = if self.readonly { " /* readonly */" } else { "" };
        format!(
            "{}{}: {}{}",
            quote_if_needed(&self.name),
            opt,
            self.ty.emit(),
            readonly
        )
    }
}

impl Emit for TsParam {
    fn emit(&self) -> String {
        let opt = if self.optional { "?" } else { "" };
        let mut out = match &self.ty {
            Some(ty) => format!("{}{}: {}", self.name, opt, ty.emit()),
            None => format!("{}{}", self.name, opt),
        };
        if let Some(default) = &self.default {
            out.push_str(" = ");
            out.push_str(&default.emit());
        }
        out
    }
}

// =============================================================================
// Type Definitions
// =============================================================================

impl Emit for TsMethodSig {
    fn emit(&self) -> String {
        format!(
            "{}({}): {}",
            self.name,
            join(&self.params, ", "),
            self.return_type.emit()
        )
    }
}

impl Emit for TsTypeDef {
    fn emit(&self) -> String {
        let mut output = self
            .doc
            .as_deref()
            .map(|doc| doc_comment(doc, ""))
            .unwrap_or_default();
        match &self.kind {
            TypeDefKind::Interface { properties } => {
                output.push_str(&format!("export interface {} {{", self.name));
                if properties.is_empty() {
                    output.push_str("}\n");
                    return output;
                }
                output.push('\n');
                for prop in properties {
                    if let Some(doc) = &prop.doc {
                        output.push_str(&doc_comment(doc, INDENT));
                    }
                    output.push_str(&format!("{INDENT}{};\n", prop.emit()));
                }
                output.push_str("}\n");
            }
            TypeDefKind::Contract { methods } => {
                output.push_str(&format!("export interface {} {{\n", self.name));
                for method in methods {
                    if let Some(doc) = &method.doc {
                        output.push_str(&doc_comment(doc, INDENT));
                    }
                    output.push_str(&format!("{INDENT}{};\n", method.emit()));
                }
                output.push_str("}\n");
            }
            TypeDefKind::TypeAlias { ty } => {
                output.push_str(&format!("export type {} = {};\n", self.name, ty.emit()));
            }
        }
        output
    }
}

/// Render a JSDoc block; single-line text stays on one line.
fn doc_comment(text: &str, pad: &str) -> String {
    let text = text.trim().replace("*/", "*\\/");
    let lines: Vec<&str> = text.lines().map(str::trim_end).collect();
    match lines.as_slice() {
        [] => String::new(),
        [line] => format!("{pad}/** {line} */\n"),
        _ => {
            let mut out = format!("{pad}/**\n");
            for line in lines {
                if line.is_empty() {
                    out.push_str(&format!("{pad} *\n"));
                } else {
                    out.push_str(&format!("{pad} * {line}\n"));
                }
            }
            out.push_str(&format!("{pad} */\n"));
            out
        }
    }
}

// =============================================================================
// Expressions
// =============================================================================

impl Emit for BinOp {
    fn emit(&self) -> String {
        match self {
            BinOp::And => "&&",
            BinOp::NotEqual => "!=",
            BinOp::Nullish => "??",
        }
        .to_string()
    }
}

impl Emit for TsExpr {
    fn emit(&self) -> String {
        self.emit_at(0)
    }
}

impl TsExpr {
    /// Emit with the given indentation level for multi-line object literals.
    pub fn emit_at(&self, indent: usize) -> String {
        match self {
            TsExpr::Ident(name) => name.clone(),
            TsExpr::Literal(lit) => lit.emit(),
            TsExpr::Call { callee, args } => {
                let args_str = args
                    .iter()
                    .map(|a| a.emit_at(indent))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{}({})", callee.emit_at(indent), args_str)
            }
            TsExpr::Arrow { params, body } => {
                let body_str = body.emit_at(indent);
                if matches!(**body, TsExpr::Object { .. }) {
                    format!("({}) => ({})", join(params, ", "), body_str)
                } else {
                    format!("({}) => {}", join(params, ", "), body_str)
                }
            }
            TsExpr::Object { entries, multiline } => {
                if entries.is_empty() {
                    return "{}".to_string();
                }
                if *multiline {
                    let pad = INDENT.repeat(indent);
                    let inner = INDENT.repeat(indent + 1);
                    let mut out = "{\n".to_string();
                    for entry in entries {
                        out.push_str(&format!("{inner}{},\n", entry.emit_at(indent + 1)));
                    }
                    out.push_str(&format!("{pad}}}"));
                    out
                } else {
                    let parts: Vec<_> = entries.iter().map(|e| e.emit_at(indent)).collect();
                    format!("{{ {} }}", parts.join(", "))
                }
            }
            TsExpr::Member { object, prop } => format!("{}.{}", object.emit_at(indent), prop),
            TsExpr::Template(parts) => {
                let content: String = parts
                    .iter()
                    .map(|p| match p {
                        TemplatePart::Static(s) => s.replace('`', "\\`"),
                        TemplatePart::Dynamic(e) => format!("${{{}}}", e.emit_at(indent)),
                    })
                    .collect();
                format!("`{content}`")
            }
            TsExpr::Spread(expr) => format!("...{}", expr.emit_at(indent)),
            TsExpr::BinOp { left, op, right } => format!(
                "{} {} {}",
                left.emit_at(indent),
                op.emit(),
                right.emit_at(indent)
            ),
            TsExpr::Array(items) => {
                let items_str = items
                    .iter()
                    .map(|i| i.emit_at(indent))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("[{items_str}]")
            }
            TsExpr::NonNull(expr) => format!("{}!", expr.emit_at(indent)),
            TsExpr::Cast { expr, ty } => format!("{} as {}", expr.emit_at(indent), ty.emit()),
        }
    }
}

impl ObjectEntry {
    fn emit_at(&self, indent: usize) -> String {
        match self {
            ObjectEntry::Property(key, value) => {
                format!("{}: {}", quote_if_needed(key), value.emit_at(indent))
            }
            ObjectEntry::Shorthand(key) => key.clone(),
        }
    }
}

// =============================================================================
// Statements
// =============================================================================

impl Emit for TsStmt {
    fn emit(&self) -> String {
        self.emit_indented(0)
    }
}

impl TsStmt {
    /// Emit with specified indentation level (2 spaces per level)
    pub fn emit_indented(&self, indent: usize) -> String {
        let prefix = INDENT.repeat(indent);
        match self {
            TsStmt::Const {
                name,
                init,
                exported,
            } => {
                let export = if *exported { "export " } else { "" };
                format!("{prefix}{export}const {name} = {};\n", init.emit_at(indent))
            }
            TsStmt::Return(expr) => format!("{prefix}return {};\n", expr.emit_at(indent)),
        }
    }
}

// =============================================================================
// Functions
// =============================================================================

impl Emit for TsFunction {
    fn emit(&self) -> String {
        let export = if self.is_export { "export " } else { "" };
        let return_type_str = self
            .return_type
            .as_ref()
            .map(|t| format!(": {}", t.emit()))
            .unwrap_or_default();
        let mut output = format!(
            "{export}function {}({}){return_type_str} {{",
            self.name,
            join(&self.params, ", ")
        );
        if self.body.is_empty() {
            output.push_str("}\n");
            return output;
        }
        output.push('\n');
        for stmt in &self.body {
            output.push_str(&stmt.emit_indented(1));
        }
        output.push_str("}\n");
        output
    }
}

// =============================================================================
// Imports
// =============================================================================

impl Emit for TsImport {
    fn emit(&self) -> String {
        let type_keyword = if self.type_only { "type " } else { "" };
        format!(
            "import {type_keyword}{{ {} }} from '{}';\n",
            self.items.join(", "),
            self.from
        )
    }
}

// =============================================================================
// Module
// =============================================================================

impl Emit for TsModule {
    fn emit(&self) -> String {
        let mut blocks = Vec::new();

        if let Some(banner) = &self.banner {
            blocks.push(format!("// {banner}\n"));
        }
        if !self.imports.is_empty() {
            blocks.push(self.imports.iter().map(Emit::emit).collect::<String>());
        }
        blocks.extend(self.types.iter().map(Emit::emit));
        blocks.extend(self.statements.iter().map(Emit::emit));
        blocks.extend(self.functions.iter().map(Emit::emit));

        blocks.join("\n")
    }
}

fn join<T: Emit>(items: &[T], sep: &str) -> String {
    items.iter().map(Emit::emit).collect::<Vec<_>>().join(sep)
}

// =============================================================================
// Tests
// =============================================================================
