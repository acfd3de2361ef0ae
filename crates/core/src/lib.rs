//! OpenAPI / Swagger to TypeScript module generator.
//!
//! The pipeline is linear and single-pass:
//!
//! 1. [`loader`] parses a YAML or JSON document into [`spec::OpenApiSpec`].
//! 2. [`enums::EnumRegistry`] collects every string enum in the components.
//! 3. [`classify`] groups paths, operations and schemas into [`module::Module`]s.
//! 4. [`codegen`] lowers each module to a TypeScript AST ([`ir`]) for the
//!    models, service contract, service implementation and hooks files, plus
//!    one shared endpoints registry.
//! 5. [`ir::Emit`] renders the AST; [`writer`] persists the file map.
//!
//! Output is a pure function of the document and [`GeneratorConfig`]: every
//! map that drives iteration is ordered, so reordering the input does not
//! change a single byte of output.

pub mod classify;
pub mod codegen;
pub mod config;
pub mod enums;
pub mod error;
pub mod generator;
pub mod ir;
pub mod loader;
pub mod module;
pub mod naming;
pub mod spec;
pub mod typemap;
pub mod writer;

pub use config::{CONFIG_FILE_NAME, GeneratorConfig, UnresolvedRefPolicy};
pub use error::{GeneratorError, Result};
pub use generator::{ENDPOINTS_FILE, FileMap, classify_spec, generate, generate_from_path};
pub use loader::load_spec;
pub use spec::OpenApiSpec;
pub use writer::{WriteSummary, write_files};
