//! TypeScript IR types for code generation.
//!
//! Emitters build these trees; only the `Emit` implementations in
//! `emit.rs` turn them into text.

/// TypeScript type representation
#[derive(Debug, Clone, PartialEq)]
pub enum TsType {
    /// Primitive types: string, number, boolean, null, any
    Primitive(TsPrimitive),
    /// Array type: T[]
    Array(Box<TsType>),
    /// Union type: A | B | C
    Union(Vec<TsType>),
    /// Intersection type: A & B
    Intersection(Vec<TsType>),
    /// Object type: { foo: string; bar?: number }
    Object(Vec<TsProp>),
    /// String-keyed map: Record<string, T>
    Record(Box<TsType>),
    /// Literal type: 'foo', 42, true
    Literal(TsLiteral),
    /// Named type reference: Widget, Date
    Ref(String),
    /// Generic instantiation: ApiResponse<Widget>
    Generic {
        /// Generic type name
        name: String,
        /// Type arguments
        args: Vec<TsType>,
    },
}

impl TsType {
    /// `any`
    pub fn any() -> Self {
        Self::Primitive(TsPrimitive::Any)
    }

    /// `string`
    pub fn string() -> Self {
        Self::Primitive(TsPrimitive::String)
    }

    /// Reference to a named type.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Ref(name.into())
    }

    /// Single-argument instantiation, as in `Promise<T>`.
    pub fn generic(name: impl Into<String>, arg: TsType) -> Self {
        Self::Generic {
            name: name.into(),
            args: vec![arg],
        }
    }

    /// `string | number`, the id type accepted by path builders.
    pub fn id() -> Self {
        Self::Union(vec![
            Self::Primitive(TsPrimitive::String),
            Self::Primitive(TsPrimitive::Number),
        ])
    }

    /// Collect every named type this type mentions.
    pub fn collect_refs(&self, out: &mut Vec<String>) {
        match self {
            Self::Ref(name) => out.push(name.clone()),
            Self::Generic { name, args } => {
                out.push(name.clone());
                for arg in args {
                    arg.collect_refs(out);
                }
            }
            Self::Array(inner) | Self::Record(inner) => inner.collect_refs(out),
            Self::Union(types) | Self::Intersection(types) => {
                for ty in types {
                    ty.collect_refs(out);
                }
            }
            Self::Object(props) => {
                for prop in props {
                    prop.ty.collect_refs(out);
                }
            }
            Self::Primitive(_) | Self::Literal(_) => {}
        }
    }
}

/// TypeScript primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TsPrimitive {
    /// `string`
    String,
    /// `number`
    Number,
    /// `boolean`
    Boolean,
    /// `null`
    Null,
    /// `any`
    Any,
}

/// Object or interface member
#[derive(Debug, Clone, PartialEq)]
pub struct TsProp {
    /// Property key, quoted on emission when it is not an identifier
    pub name: String,
    /// Property type
    pub ty: TsType,
    /// Rendered with `?`
    pub optional: bool,
    /// Rendered with a trailing `/* readonly */` marker
    pub readonly: bool,
    /// Doc comment rendered above the member
    pub doc: Option<String>,
}

impl TsProp {
    /// Writable, undocumented member.
    pub fn new(name: impl Into<String>, ty: TsType, optional: bool) -> Self {
        Self {
            name: name.into(),
            ty,
            optional,
            readonly: false,
            doc: None,
        }
    }
}

/// TypeScript literal values
#[derive(Debug, Clone, PartialEq)]
pub enum TsLiteral {
    /// Single-quoted string
    String(String),
    /// Floating-point number
    Number(f64),
    /// Integer
    Int(i64),
    /// `true` or `false`
    Bool(bool),
    /// `null`
    Null,
}

/// TypeScript expression
#[derive(Debug, Clone, PartialEq)]
pub enum TsExpr {
    /// Identifier: foo
    Ident(String),
    /// Literal value: 'bar', 42
    Literal(TsLiteral),
    /// Function call: foo(a, b)
    Call {
        /// Called expression
        callee: Box<TsExpr>,
        /// Arguments
        args: Vec<TsExpr>,
    },
    /// Arrow function: (x) => x.foo
    Arrow {
        /// Parameters
        params: Vec<TsParam>,
        /// Expression body
        body: Box<TsExpr>,
    },
    /// Object literal, rendered on one line or one entry per line
    Object {
        /// Entries in order
        entries: Vec<ObjectEntry>,
        /// One entry per line, indented, with trailing commas
        multiline: bool,
    },
    /// Member access: foo.bar
    Member {
        /// Accessed object
        object: Box<TsExpr>,
        /// Property name
        prop: String,
    },
    /// Template literal: `/api/widgets/${id}/`
    Template(Vec<TemplatePart>),
    /// Spread: ...values
    Spread(Box<TsExpr>),
    /// Binary operation: a != null
    BinOp {
        /// Left operand
        left: Box<TsExpr>,
        /// Operator
        op: BinOp,
        /// Right operand
        right: Box<TsExpr>,
    },
    /// Array literal: [a, b, c]
    Array(Vec<TsExpr>),
    /// Non-null assertion: id!
    NonNull(Box<TsExpr>),
    /// Type cast: expr as Type
    Cast {
        /// Cast expression
        expr: Box<TsExpr>,
        /// Target type
        ty: TsType,
    },
}

impl TsExpr {
    /// Identifier expression.
    pub fn ident(name: impl Into<String>) -> Self {
        Self::Ident(name.into())
    }

    /// String literal expression.
    pub fn string(value: impl Into<String>) -> Self {
        Self::Literal(TsLiteral::String(value.into()))
    }

    /// Call expression.
    pub fn call(callee: TsExpr, args: Vec<TsExpr>) -> Self {
        Self::Call {
            callee: Box::new(callee),
            args,
        }
    }

    /// Single member access.
    pub fn member(object: TsExpr, prop: impl Into<String>) -> Self {
        Self::Member {
            object: Box::new(object),
            prop: prop.into(),
        }
    }

    /// Member access by a chain of identifiers: `a.b.c`.
    pub fn path(parts: &[&str]) -> Self {
        let mut parts = parts.iter();
        let first = parts.next().map_or_else(String::new, |p| (*p).to_string());
        parts.fold(Self::Ident(first), |acc, part| Self::member(acc, *part))
    }

    /// Arrow function with an expression body.
    pub fn arrow(params: Vec<TsParam>, body: TsExpr) -> Self {
        Self::Arrow {
            params,
            body: Box::new(body),
        }
    }

    /// Binary operation.
    pub fn bin(left: TsExpr, op: BinOp, right: TsExpr) -> Self {
        Self::BinOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }
}

/// Object literal entry
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectEntry {
    /// key: value
    Property(String, TsExpr),
    /// key
    Shorthand(String),
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    /// `&&`
    And,
    /// `!=`
    NotEqual,
    /// `??`
    Nullish,
}

/// Function or method parameter
#[derive(Debug, Clone, PartialEq)]
pub struct TsParam {
    /// Identifier or destructuring pattern
    pub name: String,
    /// Annotation; `None` leaves the parameter untyped
    pub ty: Option<TsType>,
    /// Rendered with `?`
    pub optional: bool,
    /// Default value: `name: T = default`
    pub default: Option<TsExpr>,
}

impl TsParam {
    /// Required, typed parameter.
    pub fn new(name: impl Into<String>, ty: TsType) -> Self {
        Self {
            name: name.into(),
            ty: Some(ty),
            optional: false,
            default: None,
        }
    }

    /// Optional, typed parameter.
    pub fn optional(name: impl Into<String>, ty: TsType) -> Self {
        Self {
            optional: true,
            ..Self::new(name, ty)
        }
    }

    /// Untyped parameter, relying on contextual typing.
    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: None,
            optional: false,
            default: None,
        }
    }
}

/// Template literal part
#[derive(Debug, Clone, PartialEq)]
pub enum TemplatePart {
    /// Static string part
    Static(String),
    /// Dynamic expression part: ${expr}
    Dynamic(TsExpr),
}

// =============================================================================
// Module-Level IR
// =============================================================================

/// Import statement
#[derive(Debug, Clone, PartialEq)]
pub struct TsImport {
    /// Imported names, rendered in the given order
    pub items: Vec<String>,
    /// Module specifier
    pub from: String,
    /// Rendered as `import type`
    pub type_only: bool,
}

/// Method signature inside an interface
#[derive(Debug, Clone, PartialEq)]
pub struct TsMethodSig {
    /// Method name
    pub name: String,
    /// Parameters
    pub params: Vec<TsParam>,
    /// Return type
    pub return_type: TsType,
    /// Doc comment rendered above the method
    pub doc: Option<String>,
}

/// Type definition kind
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDefKind {
    /// interface Foo { prop: T; ... }
    Interface {
        /// Members in order
        properties: Vec<TsProp>,
    },
    /// interface IFoo { method(): T; ... }
    Contract {
        /// Method signatures in order
        methods: Vec<TsMethodSig>,
    },
    /// type Foo = ...
    TypeAlias {
        /// Aliased type
        ty: TsType,
    },
}

/// Exported type definition
#[derive(Debug, Clone, PartialEq)]
pub struct TsTypeDef {
    /// Exported name
    pub name: String,
    /// Doc comment rendered above the definition
    pub doc: Option<String>,
    /// Interface, contract or alias body
    pub kind: TypeDefKind,
}

/// Statement in a function body or at module level
#[derive(Debug, Clone, PartialEq)]
pub enum TsStmt {
    /// const declaration, optionally exported
    Const {
        /// Binding name
        name: String,
        /// Initializer
        init: TsExpr,
        /// Rendered with `export`
        exported: bool,
    },
    /// Return statement
    Return(TsExpr),
}

/// Function definition
#[derive(Debug, Clone, PartialEq)]
pub struct TsFunction {
    /// Function name
    pub name: String,
    /// Parameters
    pub params: Vec<TsParam>,
    /// Declared return type
    pub return_type: Option<TsType>,
    /// Statements in order
    pub body: Vec<TsStmt>,
    /// Rendered with `export`
    pub is_export: bool,
}

/// Complete TypeScript file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TsModule {
    /// Leading comment line
    pub banner: Option<String>,
    /// Import statements
    pub imports: Vec<TsImport>,
    /// Exported type definitions
    pub types: Vec<TsTypeDef>,
    /// Module-level statements
    pub statements: Vec<TsStmt>,
    /// Function definitions
    pub functions: Vec<TsFunction>,
}
