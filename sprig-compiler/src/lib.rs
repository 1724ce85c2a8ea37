//! Sprig compiler: templates and decorated classes in, TSX modules out.
//!
//! A run goes through a [`CompilationBuilder`], which discovers decorated
//! classes and fills the directive and pipe registries, then a frozen
//! [`Compilation`] that compiles each unit independently.

pub mod codegen;
pub mod compilation;
pub mod config;
pub mod dev_props;
pub mod error;
pub mod expr;
pub mod imports;
pub mod registry;
pub mod route_path;
pub mod transform;
pub mod wrappers;

pub use codegen::{BANNER, GeneratedFile};
pub use compilation::{
    CompilationBuilder, Compilation, CompileOutput, SourceModule, SourceReader, SprigComponent, SprigService,
    UnitFailure,
};
pub use config::CompilerConfig;
pub use dev_props::{DevProps, load_dev_props_file, resolve_dev_props};
pub use error::{CompileError, ConfigError};
pub use imports::Import;
pub use registry::{DirectiveEntry, DirectiveRegistry, PipeEntry, PipeRegistry};
pub use route_path::route_output_path;
pub use transform::{
    DirectiveUsage, KnownComponent, Outlet, PipeUsage, TransformContext, TransformResult,
    check_route_interactivity, collect_directive_usages, transform, transform_directive,
};
