//! Intermediate Representation for TypeScript module generation.
//!
//! Two layers:
//! 1. API-level IR: normalized service methods shared by every emitter
//! 2. TypeScript AST IR: types, expressions, statements, functions
//!
//! Emission from the AST to text happens only through the `Emit` trait.
//!
//! ## Module Structure
//!
//! - `api`: service method IR (ServiceMethodIR, EndpointIR, CrudKind)
//! - `types`: TypeScript AST IR (TsType, TsExpr, TsStmt, TsFunction, TsModule)
//! - `emit`: TypeScript AST -> code strings (via Emit trait)
//! - `utils`: lexical helpers shared across modules

pub mod api;
pub mod emit;
pub mod types;
pub mod utils;

pub use emit::Emit;
